/*!
XOR message cipher over an agreed key.

A downstream collaborator of the protocol core: it consumes the final
key's bits and combines them with a message by bitwise XOR. The
operation is self-inverse, so encryption and decryption are the same
transform. The key must cover the whole message; key stretching and
padding are deliberately not provided here.
*/

use crate::core::error::{Error, Result};
use crate::core::qubit::Bit;

/// XOR `data` against the leading bits of `key`, MSB first within each
/// byte. Fails if the key is shorter than the message in bits.
fn xor_with_key(data: &[u8], key: &[Bit]) -> Result<Vec<u8>> {
    let needed = data.len() * 8;
    if key.len() < needed {
        return Err(Error::KeyTooShort {
            needed,
            available: key.len(),
        });
    }

    let out = data
        .iter()
        .enumerate()
        .map(|(i, &byte)| {
            let mut pad = 0u8;
            for bit in 0..8 {
                pad |= key[i * 8 + bit].as_u8() << (7 - bit);
            }
            byte ^ pad
        })
        .collect();

    Ok(out)
}

/// Encrypt a message with the agreed key bits.
pub fn encrypt(plaintext: &[u8], key: &[Bit]) -> Result<Vec<u8>> {
    xor_with_key(plaintext, key)
}

/// Decrypt a message with the agreed key bits.
///
/// Identical to [`encrypt`]; XOR is self-inverse.
pub fn decrypt(ciphertext: &[u8], key: &[Bit]) -> Result<Vec<u8>> {
    xor_with_key(ciphertext, key)
}

/*!
Key agreement: classifying the run and deriving the final key.

A run whose estimated error rate stays below the configured threshold
is classified secure and yields a final key taken from Alice's sifted
bits at the retained positions. Bob's matched-basis measurements are
expected to equal them in the honest case, which the estimator has just
verified on a sample. A run at or above the threshold terminates with
an eavesdropping-detected outcome and yields no key.
*/

use std::fmt;

use sha2::{Digest, Sha256};

use crate::core::constants::FINGERPRINT_BYTES;
use crate::core::qubit::Bit;
use crate::core::sifting::SiftedKey;

/// Terminal classification of a protocol run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    /// Error rate below threshold; a shared key was produced
    KeyAgreed,
    /// Error rate at or above threshold; no key was produced
    EavesdropDetected,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::KeyAgreed => write!(f, "KeyAgreed"),
            RunStatus::EavesdropDetected => write!(f, "EavesdropDetected"),
        }
    }
}

/// Classify a run from its estimated error rate.
///
/// Secure iff the rate is strictly below the threshold.
pub fn classify(error_rate: f64, error_threshold: f64) -> RunStatus {
    if error_rate < error_threshold {
        RunStatus::KeyAgreed
    } else {
        RunStatus::EavesdropDetected
    }
}

/// The agreed shared secret bit string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalKey {
    bits: Vec<Bit>,
}

impl FinalKey {
    /// Wrap an ordered bit sequence as a final key.
    pub fn new(bits: Vec<Bit>) -> Self {
        Self { bits }
    }

    /// The key bits, in order.
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// Key length in bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the key holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// A copy of this key trimmed to at most `len` bits.
    pub fn truncated(&self, len: usize) -> Self {
        Self {
            bits: self.bits.iter().copied().take(len).collect(),
        }
    }

    /// Pack the key bits into bytes, MSB first, zero-padding the last
    /// byte when the length is not a multiple of eight.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, bit) in self.bits.iter().enumerate() {
            bytes[i / 8] |= bit.as_u8() << (7 - (i % 8));
        }
        bytes
    }

    /// SHA-256 fingerprint of the key.
    ///
    /// Lets both parties confirm they derived the same key over the
    /// public channel without revealing any key bits. The bit length is
    /// hashed alongside the packed bytes so keys differing only in
    /// trailing padding cannot collide.
    pub fn fingerprint(&self) -> [u8; FINGERPRINT_BYTES] {
        let mut hasher = Sha256::new();
        hasher.update((self.bits.len() as u64).to_be_bytes());
        hasher.update(self.to_bytes());
        hasher.finalize().into()
    }
}

/// Which sifted positions the final key retains relative to the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum SampledBitPolicy {
    /// Drop sampled positions from the final key. Their bit values were
    /// revealed on the public channel during estimation.
    #[default]
    Discard,
    /// Keep sampled positions in the final key.
    Retain,
}

/// Derive the final key from Alice's sifted bits.
///
/// `sampled_indices` must be the ascending index list the estimator
/// consumed; under [`SampledBitPolicy::Discard`] those positions are
/// excluded from the key.
pub fn derive_final_key(
    sifted: &SiftedKey,
    sampled_indices: &[usize],
    policy: SampledBitPolicy,
) -> FinalKey {
    let bits = sifted
        .pairs()
        .iter()
        .enumerate()
        .filter(|(i, _)| match policy {
            SampledBitPolicy::Retain => true,
            SampledBitPolicy::Discard => sampled_indices.binary_search(i).is_err(),
        })
        .map(|(_, pair)| pair.alice_bit)
        .collect();

    FinalKey::new(bits)
}

/// The outcome of one protocol run, returned to the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Number of qubits transmitted
    pub raw_length: usize,
    /// Number of sifted positions
    pub sifted_key_length: usize,
    /// Number of sifted positions consumed for estimation
    pub sample_size: usize,
    /// Estimated bit-mismatch rate over the sample
    pub estimated_error_rate: f64,
    /// Terminal classification of the run
    pub status: RunStatus,
    /// The agreed key; present only when `status` is `KeyAgreed`
    pub final_key: Option<FinalKey>,
}

/*!
Transcript records and basis sifting.

After transmission, Alice and Bob publicly reveal their basis choices
(never their bits) and keep only the positions where they happened to
agree. Mismatched positions carry no reliable shared information and
are discarded. With both parties choosing uniformly between two bases,
roughly half of the transcript survives sifting.
*/

use crate::core::qubit::{Basis, Bit};

/// Everything that happened at one transmission position.
///
/// The eavesdropper fields record the first interceptor's observation,
/// the hop that saw Alice's original encoding. They are `None` on an
/// unintercepted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmissionRecord {
    /// The bit Alice encoded
    pub alice_bit: Bit,
    /// The basis Alice encoded in
    pub alice_basis: Basis,
    /// The basis the first interceptor measured in, if any
    pub eve_basis: Option<Basis>,
    /// The bit the first interceptor observed, if any
    pub eve_bit: Option<Bit>,
    /// The basis Bob measured in
    pub bob_basis: Basis,
    /// The bit Bob observed
    pub bob_bit: Bit,
}

impl TransmissionRecord {
    /// Whether Alice's and Bob's basis choices agreed at this position.
    pub fn bases_match(&self) -> bool {
        self.alice_basis == self.bob_basis
    }
}

/// One retained position of the sifted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiftedPair {
    /// Position in the raw transcript this pair came from
    pub position: usize,
    /// Alice's bit at this position
    pub alice_bit: Bit,
    /// Bob's measured bit at this position
    pub bob_bit: Bit,
}

/// The ordered sequence of basis-matched bit pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiftedKey {
    pairs: Vec<SiftedPair>,
}

impl SiftedKey {
    /// The retained pairs, in transcript order.
    pub fn pairs(&self) -> &[SiftedPair] {
        &self.pairs
    }

    /// Number of retained positions.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no positions were retained.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Sift a transcript down to the basis-matched positions.
///
/// Keeps the ordered subsequence of positions where Alice's and Bob's
/// bases agree, pairing Alice's bit with Bob's measured bit. An empty
/// transcript yields an empty sifted key.
pub fn sift(transcript: &[TransmissionRecord]) -> SiftedKey {
    let pairs = transcript
        .iter()
        .enumerate()
        .filter(|(_, record)| record.bases_match())
        .map(|(position, record)| SiftedPair {
            position,
            alice_bit: record.alice_bit,
            bob_bit: record.bob_bit,
        })
        .collect();

    SiftedKey { pairs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(alice_basis: Basis, bob_basis: Basis, alice_bit: Bit, bob_bit: Bit) -> TransmissionRecord {
        TransmissionRecord {
            alice_bit,
            alice_basis,
            eve_basis: None,
            eve_bit: None,
            bob_basis,
            bob_bit,
        }
    }

    #[test]
    fn test_empty_transcript_sifts_to_empty_key() {
        let sifted = sift(&[]);
        assert!(sifted.is_empty());
        assert_eq!(sifted.len(), 0);
    }

    #[test]
    fn test_only_matched_positions_survive() {
        let transcript = vec![
            record(Basis::Rectilinear, Basis::Rectilinear, Bit::One, Bit::One),
            record(Basis::Rectilinear, Basis::Diagonal, Bit::Zero, Bit::One),
            record(Basis::Diagonal, Basis::Diagonal, Bit::Zero, Bit::Zero),
            record(Basis::Diagonal, Basis::Rectilinear, Bit::One, Bit::Zero),
        ];

        let sifted = sift(&transcript);

        assert_eq!(sifted.len(), 2);
        assert_eq!(sifted.pairs()[0].position, 0);
        assert_eq!(sifted.pairs()[0].alice_bit, Bit::One);
        assert_eq!(sifted.pairs()[1].position, 2);
        assert_eq!(sifted.pairs()[1].bob_bit, Bit::Zero);
    }

    #[test]
    fn test_no_matching_position_is_dropped() {
        let transcript = vec![
            record(Basis::Diagonal, Basis::Diagonal, Bit::One, Bit::Zero),
            record(Basis::Rectilinear, Basis::Rectilinear, Bit::Zero, Bit::Zero),
        ];

        let sifted = sift(&transcript);
        assert_eq!(sifted.len(), transcript.len());
    }

    #[test]
    fn test_mismatched_bits_are_retained_when_bases_match() {
        // Sifting compares bases only; a bit disagreement at a matched
        // position is exactly what error estimation later looks for.
        let transcript = vec![record(
            Basis::Rectilinear,
            Basis::Rectilinear,
            Bit::One,
            Bit::Zero,
        )];

        let sifted = sift(&transcript);
        assert_eq!(sifted.len(), 1);
        assert_ne!(sifted.pairs()[0].alice_bit, sifted.pairs()[0].bob_bit);
    }
}

/*!
Sampled error-rate estimation.

Alice and Bob publicly compare the bits at a randomly agreed sample of
sifted positions. On an honest, undisturbed channel the matched-basis
rule is deterministic, so the observed mismatch rate stays near zero.
An intercept-resend eavesdropper pushes the expected rate to 25%: she
mismatches Alice's basis with p=0.5, and a mismatched re-preparation
flips Bob's matched-basis outcome with p=0.5.
*/

use crate::core::error::{Error, Result};
use crate::core::random::RandomSource;
use crate::core::sifting::SiftedKey;

/// The outcome of comparing a sample of the sifted key.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEstimate {
    /// Number of sifted positions compared
    pub sample_size: usize,
    /// Number of compared positions where the bits disagreed
    pub mismatches: usize,
    /// `mismatches / sample_size`
    pub error_rate: f64,
    /// Indices into the sifted key that were consumed by the sample,
    /// in ascending order
    pub sampled_indices: Vec<usize>,
}

/// Estimate the bit-mismatch rate from a random sample of the sifted key.
///
/// The sample size is `floor(sifted_len * sample_fraction)`. If that
/// would be zero the run fails with [`Error::InsufficientSiftedBits`]
/// rather than estimating from no evidence. `sample_fraction` is
/// assumed already validated to lie in (0, 1).
pub fn estimate_error_rate(
    sifted: &SiftedKey,
    sample_fraction: f64,
    rng: &mut RandomSource,
) -> Result<ErrorEstimate> {
    let sample_size = (sifted.len() as f64 * sample_fraction).floor() as usize;

    if sample_size == 0 {
        return Err(Error::InsufficientSiftedBits {
            needed: (1.0 / sample_fraction).ceil() as usize,
            available: sifted.len(),
        });
    }

    let sampled_indices = rng.sample_indices(sifted.len(), sample_size);

    let mismatches = sampled_indices
        .iter()
        .filter(|&&i| {
            let pair = &sifted.pairs()[i];
            pair.alice_bit != pair.bob_bit
        })
        .count();

    Ok(ErrorEstimate {
        sample_size,
        mismatches,
        error_rate: mismatches as f64 / sample_size as f64,
        sampled_indices,
    })
}

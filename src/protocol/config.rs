/*!
Run configuration for the QKD protocol simulation.

All knobs of a protocol run live here, explicitly, rather than in
global state: round count, eavesdropper presence, sampling fraction,
the security threshold, and the optional seed. Validation fails fast
before any round executes.
*/

use crate::core::constants::defaults;
use crate::core::error::{Result, config_err};

pub use crate::core::key::SampledBitPolicy;

/// Configuration for one protocol run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Number of qubits Alice transmits
    pub num_qubits: usize,
    /// Whether an intercept-resend eavesdropper sits on the channel
    pub eavesdropper_present: bool,
    /// Fraction of the sifted key sacrificed for error estimation,
    /// in (0, 1)
    pub sample_fraction: f64,
    /// Error rate at or above which the run is classified as
    /// eavesdropped, in [0, 1)
    pub error_threshold: f64,
    /// Seed for the run's random source; `None` draws from OS entropy
    pub random_seed: Option<u64>,
    /// Whether sampled positions are discarded from or retained in the
    /// final key
    pub sampled_bit_policy: SampledBitPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_qubits: defaults::NUM_QUBITS,
            eavesdropper_present: false,
            sample_fraction: defaults::SAMPLE_FRACTION,
            error_threshold: defaults::ERROR_THRESHOLD,
            random_seed: None,
            sampled_bit_policy: SampledBitPolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// Rejects a zero round count, a sample fraction outside (0, 1),
    /// and a threshold outside [0, 1).
    pub fn validate(&self) -> Result<()> {
        if self.num_qubits == 0 {
            return config_err("num_qubits must be greater than zero");
        }

        if !(self.sample_fraction > 0.0 && self.sample_fraction < 1.0) {
            return config_err(format!(
                "sample_fraction must lie in (0, 1), got {}",
                self.sample_fraction
            ));
        }

        if !(self.error_threshold >= 0.0 && self.error_threshold < 1.0) {
            return config_err(format!(
                "error_threshold must lie in [0, 1), got {}",
                self.error_threshold
            ));
        }

        Ok(())
    }
}

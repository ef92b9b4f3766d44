/*!
The BB84 protocol session.

Drives one complete run: Alice draws random bits and bases and
transmits, the channel relays (through an eavesdropper hop when
configured), Bob measures in his own random bases, then bases are
sifted, a sample is compared for error estimation, and the run
terminates in key agreement or eavesdropping detection.

Each session owns its random source, channel, and transcript; nothing
is shared between runs, so batch simulations can run sessions in
parallel without coordination. The state machine enforces strict
forward progression, and a failed run yields no key.
*/

use crate::core::channel::{Eavesdropper, QuantumChannel};
use crate::core::error::{Result, protocol_err};
use crate::core::estimation::{ErrorEstimate, estimate_error_rate};
use crate::core::key::{RunResult, RunStatus, classify, derive_final_key};
use crate::core::qubit::Qubit;
use crate::core::random::RandomSource;
use crate::core::session::state::{ProtocolState, StateManager};
use crate::core::sifting::{SiftedKey, TransmissionRecord, sift};
use crate::protocol::config::SimulationConfig;

/// One run of the BB84 protocol.
pub struct Bb84Session {
    config: SimulationConfig,
    state: StateManager,
    rng: RandomSource,
    channel: QuantumChannel,
    transcript: Vec<TransmissionRecord>,
    sifted: Option<SiftedKey>,
    estimate: Option<ErrorEstimate>,
}

impl Bb84Session {
    /// Create a session from a validated configuration.
    ///
    /// Fails fast with a configuration error before any round executes.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.random_seed {
            Some(seed) => RandomSource::seeded(seed),
            None => RandomSource::from_entropy(),
        };

        let mut channel = QuantumChannel::new();
        if config.eavesdropper_present {
            channel = channel.with_hop(Box::new(Eavesdropper::new()));
        }

        Ok(Self {
            transcript: Vec::with_capacity(config.num_qubits),
            config,
            state: StateManager::new(),
            rng,
            channel,
            sifted: None,
            estimate: None,
        })
    }

    /// Run the whole protocol in one call.
    pub fn run(config: SimulationConfig) -> Result<RunResult> {
        let mut session = Self::new(config)?;
        session.transmit()?;
        session.sift()?;
        session.estimate()?;
        session.agree()
    }

    /// Current state of the run.
    pub fn state(&self) -> ProtocolState {
        self.state.state()
    }

    /// The raw transcript, one record per transmitted qubit.
    pub fn transcript(&self) -> &[TransmissionRecord] {
        &self.transcript
    }

    /// The sifted key, once sifting has run.
    pub fn sifted_key(&self) -> Option<&SiftedKey> {
        self.sifted.as_ref()
    }

    /// The error estimate, once estimation has run.
    pub fn error_estimate(&self) -> Option<&ErrorEstimate> {
        self.estimate.as_ref()
    }

    /// Transmit every qubit and record the transcript.
    ///
    /// For each round Alice draws a fresh bit and basis, the channel
    /// relays the encoded qubit through its hops, and Bob measures the
    /// arriving qubit in his own fresh random basis.
    pub fn transmit(&mut self) -> Result<()> {
        if !self.state.can_transmit() {
            return protocol_err(format!(
                "cannot transmit in state {}",
                self.state.state()
            ));
        }

        for _ in 0..self.config.num_qubits {
            let alice_bit = self.rng.next_bit();
            let alice_basis = self.rng.next_basis();

            let (arrived, interceptions) = self
                .channel
                .transmit(Qubit::new(alice_bit, alice_basis), &mut self.rng);

            let bob_basis = self.rng.next_basis();
            let bob_bit = arrived.measure(bob_basis, &mut self.rng);

            // The first hop is the one that saw Alice's original encoding.
            let eve = interceptions.first();

            self.transcript.push(TransmissionRecord {
                alice_bit,
                alice_basis,
                eve_basis: eve.map(|i| i.basis),
                eve_bit: eve.map(|i| i.bit),
                bob_basis,
                bob_bit,
            });
        }

        self.state.transition_to_transmitting();
        Ok(())
    }

    /// Compare bases publicly and keep the matched positions.
    pub fn sift(&mut self) -> Result<&SiftedKey> {
        if !self.state.can_sift() {
            return protocol_err(format!("cannot sift in state {}", self.state.state()));
        }

        let sifted = sift(&self.transcript);
        self.state.transition_to_sifting();

        Ok(self.sifted.insert(sifted))
    }

    /// Compare a random sample of sifted positions and estimate the
    /// error rate.
    pub fn estimate(&mut self) -> Result<&ErrorEstimate> {
        if !self.state.can_estimate() {
            return protocol_err(format!(
                "cannot estimate in state {}",
                self.state.state()
            ));
        }

        let Some(sifted) = self.sifted.as_ref() else {
            return protocol_err("no sifted key available");
        };
        let estimate = estimate_error_rate(sifted, self.config.sample_fraction, &mut self.rng)?;
        self.state.transition_to_estimating();

        Ok(self.estimate.insert(estimate))
    }

    /// Classify the run against the threshold and finish it.
    ///
    /// Below the threshold the run terminates in `KeyAgreed` and the
    /// result carries the final key, taken from Alice's sifted bits at
    /// the retained positions. At or above the threshold the run
    /// terminates in `EavesdropDetected` and no key is produced.
    pub fn agree(&mut self) -> Result<RunResult> {
        if !self.state.can_agree() {
            return protocol_err(format!("cannot agree in state {}", self.state.state()));
        }

        let (Some(sifted), Some(estimate)) = (self.sifted.as_ref(), self.estimate.as_ref())
        else {
            return protocol_err("no error estimate available");
        };

        let status = classify(estimate.error_rate, self.config.error_threshold);

        let final_key = match status {
            RunStatus::KeyAgreed => {
                self.state.transition_to_key_agreed();
                Some(derive_final_key(
                    sifted,
                    &estimate.sampled_indices,
                    self.config.sampled_bit_policy,
                ))
            }
            RunStatus::EavesdropDetected => {
                self.state.transition_to_eavesdrop_detected();
                None
            }
        };

        Ok(RunResult {
            raw_length: self.transcript.len(),
            sifted_key_length: sifted.len(),
            sample_size: estimate.sample_size,
            estimated_error_rate: estimate.error_rate,
            status,
            final_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    fn seeded_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            num_qubits: 256,
            random_seed: Some(seed),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = SimulationConfig {
            num_qubits: 0,
            ..SimulationConfig::default()
        };

        assert!(matches!(Bb84Session::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_steps_must_run_in_order() {
        let mut session = Bb84Session::new(seeded_config(1)).unwrap();

        assert!(matches!(session.sift(), Err(Error::Protocol(_))));
        assert!(matches!(session.estimate(), Err(Error::Protocol(_))));
        assert!(matches!(session.agree(), Err(Error::Protocol(_))));

        session.transmit().unwrap();
        assert!(matches!(session.transmit(), Err(Error::Protocol(_))));
        assert!(matches!(session.estimate(), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_transcript_length_matches_config() {
        let mut session = Bb84Session::new(seeded_config(2)).unwrap();
        session.transmit().unwrap();

        assert_eq!(session.transcript().len(), 256);
        assert_eq!(session.state(), ProtocolState::Transmitting);
    }

    #[test]
    fn test_honest_transcript_has_no_interceptions() {
        let mut session = Bb84Session::new(seeded_config(3)).unwrap();
        session.transmit().unwrap();

        assert!(session
            .transcript()
            .iter()
            .all(|r| r.eve_basis.is_none() && r.eve_bit.is_none()));
    }

    #[test]
    fn test_eavesdropped_transcript_records_every_interception() {
        let config = SimulationConfig {
            eavesdropper_present: true,
            ..seeded_config(4)
        };
        let mut session = Bb84Session::new(config).unwrap();
        session.transmit().unwrap();

        assert!(session
            .transcript()
            .iter()
            .all(|r| r.eve_basis.is_some() && r.eve_bit.is_some()));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = Bb84Session::run(seeded_config(42)).unwrap();
        let b = Bb84Session::run(seeded_config(42)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_run_result_accounting() {
        let result = Bb84Session::run(seeded_config(5)).unwrap();

        assert_eq!(result.raw_length, 256);
        assert!(result.sifted_key_length <= result.raw_length);
        assert!(result.sample_size <= result.sifted_key_length);

        // Discard policy: key length is what the sample left behind.
        let key = result.final_key.expect("honest run agrees on a key");
        assert_eq!(key.len(), result.sifted_key_length - result.sample_size);
    }

    #[test]
    fn test_insufficient_sifted_bits_surfaces() {
        // A couple of qubits cannot yield a quarter-sample.
        let config = SimulationConfig {
            num_qubits: 2,
            random_seed: Some(6),
            ..SimulationConfig::default()
        };

        let result = Bb84Session::run(config);
        assert!(matches!(
            result,
            Err(Error::InsufficientSiftedBits { .. })
        ));
    }
}

/*!
Run state management for the QKD protocol.

This module defines run states and the state machine for protocol
progression. A run moves strictly forward through transmission,
sifting, and estimation, and ends in one of two terminal states. No
retries happen within a run; a caller wanting another attempt starts a
fresh run with fresh randomness.
*/

use std::fmt;

/// Run state for tracking protocol progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    /// Run created, nothing transmitted yet
    Init,
    /// Qubits transmitted and measured, transcript complete
    Transmitting,
    /// Bases compared, sifted key derived
    Sifting,
    /// Sample compared, error rate estimated
    Estimating,
    /// Terminal: error rate below threshold, key produced
    KeyAgreed,
    /// Terminal: error rate at or above threshold, no key produced
    EavesdropDetected,
}

impl ProtocolState {
    /// Whether this state ends the run
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProtocolState::KeyAgreed | ProtocolState::EavesdropDetected
        )
    }
}

impl fmt::Display for ProtocolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolState::Init => write!(f, "Init"),
            ProtocolState::Transmitting => write!(f, "Transmitting"),
            ProtocolState::Sifting => write!(f, "Sifting"),
            ProtocolState::Estimating => write!(f, "Estimating"),
            ProtocolState::KeyAgreed => write!(f, "KeyAgreed"),
            ProtocolState::EavesdropDetected => write!(f, "EavesdropDetected"),
        }
    }
}

/// Run state manager
///
/// Handles state transitions and validation of operations based on the
/// current run state.
#[derive(Debug, Clone, Copy)]
pub struct StateManager {
    /// Current state of the run
    state: ProtocolState,
}

impl StateManager {
    /// Create a new state manager
    pub fn new() -> Self {
        Self {
            state: ProtocolState::Init,
        }
    }

    /// Get the current state
    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// Check if transmission is allowed
    pub fn can_transmit(&self) -> bool {
        self.state == ProtocolState::Init
    }

    /// Check if sifting is allowed
    pub fn can_sift(&self) -> bool {
        self.state == ProtocolState::Transmitting
    }

    /// Check if error estimation is allowed
    pub fn can_estimate(&self) -> bool {
        self.state == ProtocolState::Sifting
    }

    /// Check if key agreement is allowed
    pub fn can_agree(&self) -> bool {
        self.state == ProtocolState::Estimating
    }

    /// Transition to the transmitting state
    pub fn transition_to_transmitting(&mut self) {
        if self.can_transmit() {
            self.state = ProtocolState::Transmitting;
        }
    }

    /// Transition to the sifting state
    pub fn transition_to_sifting(&mut self) {
        if self.can_sift() {
            self.state = ProtocolState::Sifting;
        }
    }

    /// Transition to the estimating state
    pub fn transition_to_estimating(&mut self) {
        if self.can_estimate() {
            self.state = ProtocolState::Estimating;
        }
    }

    /// Transition to the key-agreed terminal state
    pub fn transition_to_key_agreed(&mut self) {
        if self.can_agree() {
            self.state = ProtocolState::KeyAgreed;
        }
    }

    /// Transition to the eavesdrop-detected terminal state
    pub fn transition_to_eavesdrop_detected(&mut self) {
        if self.can_agree() {
            self.state = ProtocolState::EavesdropDetected;
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

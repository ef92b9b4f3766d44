/*!
Error handling for the QKD protocol simulation.
*/

use thiserror::Error;

/// Result type for the QKD protocol simulation
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the QKD protocol simulation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid configuration, rejected before any round executes
    #[error("Configuration error: {0}")]
    Config(String),

    /// Protocol error (operation not valid in the current state)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The sifted key is too short to draw the configured sample
    #[error("Insufficient sifted bits: {available} available, at least {needed} required for sampling")]
    InsufficientSiftedBits {
        /// Minimum sifted length that would yield a non-empty sample
        needed: usize,
        /// Actual sifted length
        available: usize,
    },

    /// The agreed key is too short for the message being ciphered
    #[error("Key too short: message requires {needed} key bits, {available} available")]
    KeyTooShort {
        /// Bits required to cover the message
        needed: usize,
        /// Bits available in the key
        available: usize,
    },
}

/// Convert a string to an Error::Config
pub fn config_err<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(Error::Config(msg.into()))
}

/// Convert a string to an Error::Protocol
pub fn protocol_err<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(Error::Protocol(msg.into()))
}

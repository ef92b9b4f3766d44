//! Core components for the QKD protocol simulation.
//!
//! This module contains the fundamental building blocks of the protocol,
//! including the measurement model, the channel pipeline, sifting,
//! error estimation, key agreement, and error handling.

// Export the measurement model
pub mod qubit;

// Export the channel pipeline
pub mod channel;

// Export basis sifting
pub mod sifting;

// Export error estimation
pub mod estimation;

// Export key agreement
pub mod key;

// Export the XOR cipher collaborator
pub mod cipher;

// Export randomness
pub mod random;

// Export session state management
pub mod session;

// Protocol constants
pub mod constants;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::error::{Error, Result};
pub use self::qubit::{Basis, Bit, Qubit};
pub use self::random::RandomSource;
pub use self::session::state::ProtocolState;

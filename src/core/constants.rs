/*!
Constants for the QKD protocol simulation.

This module contains protocol constants and configuration defaults.
*/

/// Protocol version
pub const VERSION: u8 = 0x01;

/// Size of a SHA-256 key fingerprint in bytes
pub const FINGERPRINT_BYTES: usize = 32;

/// Configuration defaults
pub mod defaults {
    /// Default number of transmitted qubits per run
    pub const NUM_QUBITS: usize = 1024;

    /// Default fraction of the sifted key sacrificed for error estimation
    pub const SAMPLE_FRACTION: f64 = 0.25;

    /// Default error-rate threshold above which eavesdropping is assumed.
    /// A demonstration constant, not a derived security parameter.
    pub const ERROR_THRESHOLD: f64 = 0.11;
}

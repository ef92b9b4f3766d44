//! Protocol orchestration.
//!
//! Ties the core components into a complete BB84 run: configuration,
//! the per-run session, and its state machine progression.

// Run configuration
pub mod config;

// Session driving a full BB84 run
pub mod bb84;

pub use self::bb84::Bb84Session;
pub use self::config::{SampledBitPolicy, SimulationConfig};

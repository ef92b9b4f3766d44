//! Session state management for a protocol run.

pub mod state;

pub use self::state::{ProtocolState, StateManager};

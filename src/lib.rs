/*!
# QKD Protocol

A classical simulation of the BB84 quantum key distribution protocol:
two parties (Alice and Bob) establish a shared secret bit string over a
channel that may be intercepted, and interception is statistically
revealed through an elevated error rate on the sifted key.

## Overview

This library provides:

- A measurement/collapse model capturing the quantum behavior with a
  small set of probability rules (no circuit execution required)
- A composable channel pipeline where an eavesdropper is just one
  measure-and-reprepare hop
- Basis sifting, sampled error estimation, and key agreement with an
  explicit security threshold
- Seedable randomness for reproducible runs
- An XOR cipher collaborator that consumes the agreed key

## Example

```
use qkd_protocol::{Bb84Session, RunStatus, SimulationConfig};

let config = SimulationConfig {
    num_qubits: 256,
    random_seed: Some(42),
    ..SimulationConfig::default()
};

let result = Bb84Session::run(config).unwrap();
assert_eq!(result.status, RunStatus::KeyAgreed);
```
*/

// Core protocol components
pub mod core;

// Protocol orchestration
pub mod protocol;

// Re-export commonly used types for convenience
pub use self::core::channel::{ChannelHop, Eavesdropper, Interception, QuantumChannel};
pub use self::core::cipher::{decrypt, encrypt};
pub use self::core::constants::{VERSION, defaults};
pub use self::core::error::{Error, Result};
pub use self::core::estimation::{ErrorEstimate, estimate_error_rate};
pub use self::core::key::{FinalKey, RunResult, RunStatus, classify, derive_final_key};
pub use self::core::qubit::{Basis, Bit, Qubit};
pub use self::core::random::RandomSource;
pub use self::core::session::state::{ProtocolState, StateManager};
pub use self::core::sifting::{SiftedKey, SiftedPair, TransmissionRecord, sift};

pub use self::protocol::bb84::Bb84Session;
pub use self::protocol::config::{SampledBitPolicy, SimulationConfig};

//! Quantum Phase Estimation
//!
//! This crate estimates the phase θ of a unitary operator U satisfying
//! U|ψ⟩ = e^{2πiθ}|ψ⟩ by simulating the textbook phase estimation
//! circuit on a classical statevector backend. It provides the quantum
//! primitives (states, gates, circuits), a statevector simulator with
//! shot sampling, and the estimation algorithm itself.

pub mod estimation;
pub mod quantum;
pub mod simulators;

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::estimation::{
        controlled_phase, estimate_phase, inverse_qft, phase_estimation_circuit,
        EstimationOutcome, DEFAULT_SHOTS,
    };
    pub use crate::quantum::prelude::*;
    pub use crate::simulators::{MeasurementOutcome, Outcome, StatevectorSimulator};
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

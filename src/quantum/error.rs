// src/quantum/error.rs
//! Error type shared by states, gates, circuits and simulators.

use thiserror::Error;

/// Errors that can occur when building or simulating quantum circuits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// A vector or matrix does not have the dimension the operation requires
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A computational basis index outside the state space
    #[error("basis index {index} out of range for dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },

    /// A qubit index outside the register
    #[error("qubit index {index} out of range for {qubit_count}-qubit register")]
    QubitOutOfRange { index: usize, qubit_count: usize },

    /// A gate was given the wrong number of target qubits
    #[error("gate {name} acts on {expected} qubits, but {actual} targets were specified")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// The same qubit appears twice in a target list
    #[error("duplicate target qubit {index}")]
    DuplicateTarget { index: usize },

    /// Amplitudes do not form a unit vector
    #[error("state vector is not normalized (norm² = {norm_sqr})")]
    NotNormalized { norm_sqr: f64 },

    /// Conditioning on a measurement branch that cannot occur
    #[error("measurement outcome {outcome} has zero probability")]
    ZeroProbability { outcome: String },

    /// Phase estimation needs at least one counting qubit
    #[error("phase estimation requires at least one counting qubit")]
    EmptyRegister,

    /// Decoding was attempted on an empty measurement histogram
    #[error("cannot decode an empty measurement histogram")]
    EmptyHistogram,
}

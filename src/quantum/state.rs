// src/quantum/state.rs
//! Quantum state representations
//!
//! This module defines the state vector of a qubit register. Qubit 0 is the
//! most significant bit of a basis index, so |q0 q1 ... q(n-1)⟩ reads left
//! to right.

use std::fmt::{self, Display};

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::quantum::error::QuantumError;

/// Tolerance used when checking normalization and comparing amplitudes.
pub const NORM_TOLERANCE: f64 = 1e-10;

/// State vector representation of a quantum register
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    /// Number of qubits
    qubit_count: usize,

    /// The state vector as an array of complex amplitudes
    amplitudes: Array1<Complex64>,
}

impl StateVector {
    /// Create a new state vector with the given amplitudes
    pub fn new(qubit_count: usize, amplitudes: Array1<Complex64>) -> Result<Self, QuantumError> {
        let expected_dim = 1 << qubit_count;

        if amplitudes.len() != expected_dim {
            return Err(QuantumError::DimensionMismatch {
                expected: expected_dim,
                actual: amplitudes.len(),
            });
        }

        let state = StateVector {
            qubit_count,
            amplitudes,
        };

        let norm_sqr = state.norm_sqr();
        if (norm_sqr - 1.0).abs() > NORM_TOLERANCE {
            return Err(QuantumError::NotNormalized { norm_sqr });
        }

        Ok(state)
    }

    /// Create a state vector in the computational basis state |index⟩
    pub fn computational_basis(qubit_count: usize, index: usize) -> Result<Self, QuantumError> {
        let dim = 1 << qubit_count;

        if index >= dim {
            return Err(QuantumError::IndexOutOfRange {
                index,
                dimension: dim,
            });
        }

        let mut amplitudes = Array1::zeros(dim);
        amplitudes[index] = Complex64::new(1.0, 0.0);

        Ok(StateVector {
            qubit_count,
            amplitudes,
        })
    }

    /// Create the zero state |00...0⟩
    pub fn zero_state(qubit_count: usize) -> Self {
        let mut amplitudes = Array1::zeros(1 << qubit_count);
        amplitudes[0] = Complex64::new(1.0, 0.0);

        StateVector {
            qubit_count,
            amplitudes,
        }
    }

    /// Internal constructor for amplitudes produced by unitary application.
    /// Callers must preserve the norm.
    pub(crate) fn from_parts(qubit_count: usize, amplitudes: Array1<Complex64>) -> Self {
        StateVector {
            qubit_count,
            amplitudes,
        }
    }

    /// Returns the number of qubits in this register
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Returns the dimension of the Hilbert space (2^n for n qubits)
    pub fn dimension(&self) -> usize {
        1 << self.qubit_count
    }

    /// Get a reference to the amplitudes
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|amp| amp.norm_sqr()).sum()
    }

    /// Check that the state is normalized
    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() <= NORM_TOLERANCE
    }

    /// Calculate the probability of measuring the given basis index
    pub fn probability(&self, index: usize) -> f64 {
        if index >= self.dimension() {
            return 0.0;
        }

        self.amplitudes[index].norm_sqr()
    }

    /// Inner product ⟨self|other⟩
    pub fn inner_product(&self, other: &Self) -> Result<Complex64, QuantumError> {
        if self.qubit_count != other.qubit_count {
            return Err(QuantumError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }

        let mut result = Complex64::new(0.0, 0.0);
        for i in 0..self.dimension() {
            result += self.amplitudes[i].conj() * other.amplitudes[i];
        }

        Ok(result)
    }

    /// Apply a unitary matrix acting on the full register
    pub fn apply_matrix(&self, matrix: &Array2<Complex64>) -> Result<Self, QuantumError> {
        let dim = self.dimension();

        if matrix.shape() != [dim, dim] {
            return Err(QuantumError::DimensionMismatch {
                expected: dim,
                actual: matrix.shape()[0],
            });
        }

        let new_amplitudes = matrix.dot(&self.amplitudes);

        Ok(StateVector {
            qubit_count: self.qubit_count,
            amplitudes: new_amplitudes,
        })
    }

    /// Tensor product with another register, self's qubits first
    pub fn tensor(&self, other: &Self) -> Self {
        let self_dim = self.dimension();
        let other_dim = other.dimension();

        let mut new_amplitudes = Array1::zeros(self_dim * other_dim);
        for i in 0..self_dim {
            for j in 0..other_dim {
                new_amplitudes[i * other_dim + j] = self.amplitudes[i] * other.amplitudes[j];
            }
        }

        StateVector {
            qubit_count: self.qubit_count + other.qubit_count,
            amplitudes: new_amplitudes,
        }
    }
}

impl Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}-qubit state:", self.qubit_count)?;

        let mut has_entries = false;
        for i in 0..self.dimension() {
            let amp = self.amplitudes[i];
            let prob = amp.norm_sqr();
            if prob > NORM_TOLERANCE {
                has_entries = true;

                let bit_string = format!("{:0width$b}", i, width = self.qubit_count);
                writeln!(
                    f,
                    "  ({:.6}{:+.6}i) |{}⟩ [{:.1}%]",
                    amp.re,
                    amp.im,
                    bit_string,
                    prob * 100.0
                )?;
            }
        }

        if !has_entries {
            writeln!(f, "  (zero state)")?;
        }

        Ok(())
    }
}

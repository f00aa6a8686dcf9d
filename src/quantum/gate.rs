// src/quantum/gate.rs
//! Quantum gates implementation
//!
//! Gates carry their matrix representation and apply themselves to chosen
//! qubits of a larger register. Application works block-wise on the state
//! vector: for every configuration of the untargeted qubits the 2^k
//! targeted amplitudes are gathered, multiplied by the gate matrix and
//! scattered back, so the full 2^n × 2^n embedding is never materialized.

use std::fmt::Debug;

use ndarray::{array, Array1, Array2};
use num_complex::Complex64;

use crate::quantum::error::QuantumError;
use crate::quantum::state::StateVector;

/// Common complex numbers used in quantum gates
pub mod constants {
    use num_complex::Complex64;

    /// The imaginary unit i
    pub const I: Complex64 = Complex64::new(0.0, 1.0);

    /// 1/sqrt(2)
    pub const FRAC_1_SQRT_2: f64 = 0.7071067811865475;
}

/// Trait for quantum gates
///
/// The first entry of a target list is the most significant bit of the
/// gate's own matrix index, so `CNOT` applied to `[control, target]`
/// behaves as written.
pub trait QuantumGate: Debug + Send + Sync {
    /// Returns the number of qubits this gate acts on
    fn qubit_count(&self) -> usize;

    /// Returns the matrix representation of this gate
    fn matrix(&self) -> Array2<Complex64>;

    /// Returns a display name for this gate
    fn name(&self) -> String;

    /// Create a clone of this gate
    fn clone_box(&self) -> Box<dyn QuantumGate>;

    /// Returns the adjoint (Hermitian conjugate) of this gate
    fn adjoint(&self) -> Box<dyn QuantumGate>;

    /// Compares this gate with another gate by matrix, with tolerance
    /// for floating point
    fn equals(&self, other: &dyn QuantumGate) -> bool {
        let m1 = self.matrix();
        let m2 = other.matrix();

        if m1.shape() != m2.shape() {
            return false;
        }

        for i in 0..m1.shape()[0] {
            for j in 0..m1.shape()[1] {
                let diff = m1[[i, j]] - m2[[i, j]];
                if diff.re.abs() > 1e-10 || diff.im.abs() > 1e-10 {
                    return false;
                }
            }
        }

        true
    }

    /// Apply this gate to specific qubits in a state
    fn apply_to_qubits(
        &self,
        state: &StateVector,
        qubits: &[usize],
    ) -> Result<StateVector, QuantumError> {
        let total_qubits = state.qubit_count();
        if qubits.len() != self.qubit_count() {
            return Err(QuantumError::ArityMismatch {
                name: self.name(),
                expected: self.qubit_count(),
                actual: qubits.len(),
            });
        }
        validate_targets(qubits, total_qubits)?;

        let matrix = self.matrix();
        let gate_dim = 1 << self.qubit_count();
        let dim = state.dimension();

        // Offset into the state index contributed by each gate basis state.
        // Qubit q occupies bit (n - 1 - q) of a state index.
        let offsets: Vec<usize> = (0..gate_dim)
            .map(|sub| {
                let mut offset = 0;
                for (pos, &q) in qubits.iter().enumerate() {
                    if (sub >> (qubits.len() - 1 - pos)) & 1 == 1 {
                        offset |= 1 << (total_qubits - 1 - q);
                    }
                }
                offset
            })
            .collect();
        let target_mask: usize = qubits.iter().map(|&q| 1 << (total_qubits - 1 - q)).sum();

        let amplitudes = state.amplitudes();
        let mut new_amplitudes = Array1::zeros(dim);

        for base in 0..dim {
            // Visit each block once, at the index where all target bits are 0
            if base & target_mask != 0 {
                continue;
            }

            for row in 0..gate_dim {
                let mut acc = Complex64::new(0.0, 0.0);
                for col in 0..gate_dim {
                    acc += matrix[[row, col]] * amplitudes[base | offsets[col]];
                }
                new_amplitudes[base | offsets[row]] = acc;
            }
        }

        Ok(StateVector::from_parts(total_qubits, new_amplitudes))
    }
}

pub(crate) fn validate_targets(qubits: &[usize], total_qubits: usize) -> Result<(), QuantumError> {
    for (pos, &q) in qubits.iter().enumerate() {
        if q >= total_qubits {
            return Err(QuantumError::QubitOutOfRange {
                index: q,
                qubit_count: total_qubits,
            });
        }
        if qubits[..pos].contains(&q) {
            return Err(QuantumError::DuplicateTarget { index: q });
        }
    }

    Ok(())
}

impl Clone for Box<dyn QuantumGate> {
    fn clone(&self) -> Box<dyn QuantumGate> {
        self.clone_box()
    }
}

impl PartialEq for Box<dyn QuantumGate> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other.as_ref())
    }
}

/// Standard quantum gates (Pauli, Hadamard, etc.)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StandardGate {
    /// Identity gate
    I(usize), // number of qubits

    /// Pauli-X gate (NOT gate)
    X,

    /// Pauli-Y gate
    Y,

    /// Pauli-Z gate
    Z,

    /// Hadamard gate
    H,

    /// Phase gate (S gate)
    S,

    /// π/8 gate (T gate)
    T,

    /// CNOT gate
    CNOT,

    /// Controlled-Z gate
    CZ,

    /// SWAP gate
    SWAP,
}

impl QuantumGate for StandardGate {
    fn qubit_count(&self) -> usize {
        match self {
            StandardGate::I(n) => *n,
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::T => 1,
            StandardGate::CNOT | StandardGate::CZ | StandardGate::SWAP => 2,
        }
    }

    fn matrix(&self) -> Array2<Complex64> {
        use constants::*;
        match self {
            StandardGate::I(n) => {
                let dim = 1 << n;
                Array2::from_diag(&Array1::from_elem(dim, Complex64::new(1.0, 0.0)))
            }
            StandardGate::X => {
                array![
                    [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
                    [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]
                ]
            }
            StandardGate::Y => {
                array![
                    [Complex64::new(0.0, 0.0), -I],
                    [I, Complex64::new(0.0, 0.0)]
                ]
            }
            StandardGate::Z => {
                array![
                    [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                    [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0)]
                ]
            }
            StandardGate::H => {
                let factor = Complex64::new(FRAC_1_SQRT_2, 0.0);
                array![[factor, factor], [factor, -factor]]
            }
            StandardGate::S => {
                array![
                    [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                    [Complex64::new(0.0, 0.0), I]
                ]
            }
            StandardGate::T => {
                array![
                    [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                    [
                        Complex64::new(0.0, 0.0),
                        Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)
                    ]
                ]
            }
            StandardGate::CNOT => {
                let mut matrix = Array2::zeros((4, 4));
                matrix[[0, 0]] = Complex64::new(1.0, 0.0);
                matrix[[1, 1]] = Complex64::new(1.0, 0.0);
                matrix[[2, 3]] = Complex64::new(1.0, 0.0);
                matrix[[3, 2]] = Complex64::new(1.0, 0.0);
                matrix
            }
            StandardGate::CZ => {
                Array2::from_diag(&array![
                    Complex64::new(1.0, 0.0),
                    Complex64::new(1.0, 0.0),
                    Complex64::new(1.0, 0.0),
                    Complex64::new(-1.0, 0.0)
                ])
            }
            StandardGate::SWAP => {
                let mut matrix = Array2::zeros((4, 4));
                matrix[[0, 0]] = Complex64::new(1.0, 0.0);
                matrix[[1, 2]] = Complex64::new(1.0, 0.0);
                matrix[[2, 1]] = Complex64::new(1.0, 0.0);
                matrix[[3, 3]] = Complex64::new(1.0, 0.0);
                matrix
            }
        }
    }

    fn name(&self) -> String {
        match self {
            StandardGate::I(n) => format!("I({})", n),
            StandardGate::X => "X".to_string(),
            StandardGate::Y => "Y".to_string(),
            StandardGate::Z => "Z".to_string(),
            StandardGate::H => "H".to_string(),
            StandardGate::S => "S".to_string(),
            StandardGate::T => "T".to_string(),
            StandardGate::CNOT => "CNOT".to_string(),
            StandardGate::CZ => "CZ".to_string(),
            StandardGate::SWAP => "SWAP".to_string(),
        }
    }

    fn clone_box(&self) -> Box<dyn QuantumGate> {
        Box::new(self.clone())
    }

    fn adjoint(&self) -> Box<dyn QuantumGate> {
        use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
        match self {
            // Hermitian gates are their own adjoint
            StandardGate::I(_)
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::CNOT
            | StandardGate::CZ
            | StandardGate::SWAP => self.clone_box(),

            // S = P(π/2) and T = P(π/4), so the adjoints rotate backwards
            StandardGate::S => Box::new(ParametrizedGate::Phase(-FRAC_PI_2)),
            StandardGate::T => Box::new(ParametrizedGate::Phase(-FRAC_PI_4)),
        }
    }
}

/// Parametrized quantum gates
#[derive(Clone, Debug)]
pub enum ParametrizedGate {
    /// Rotation around X-axis
    Rx(f64),

    /// Rotation around Y-axis
    Ry(f64),

    /// Rotation around Z-axis
    Rz(f64),

    /// Phase gate with arbitrary angle
    Phase(f64),

    /// Controlled phase gate with arbitrary angle
    CPhase(f64),
}

impl QuantumGate for ParametrizedGate {
    fn qubit_count(&self) -> usize {
        match self {
            ParametrizedGate::Rx(_)
            | ParametrizedGate::Ry(_)
            | ParametrizedGate::Rz(_)
            | ParametrizedGate::Phase(_) => 1,
            ParametrizedGate::CPhase(_) => 2,
        }
    }

    fn matrix(&self) -> Array2<Complex64> {
        match self {
            ParametrizedGate::Rx(theta) => {
                let cos = (theta / 2.0).cos();
                let sin = (theta / 2.0).sin();
                array![
                    [Complex64::new(cos, 0.0), Complex64::new(0.0, -sin)],
                    [Complex64::new(0.0, -sin), Complex64::new(cos, 0.0)]
                ]
            }
            ParametrizedGate::Ry(theta) => {
                let cos = (theta / 2.0).cos();
                let sin = (theta / 2.0).sin();
                array![
                    [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
                    [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)]
                ]
            }
            ParametrizedGate::Rz(theta) => {
                let phase_pos = Complex64::new(0.0, theta / 2.0).exp();
                let phase_neg = Complex64::new(0.0, -theta / 2.0).exp();
                array![
                    [phase_neg, Complex64::new(0.0, 0.0)],
                    [Complex64::new(0.0, 0.0), phase_pos]
                ]
            }
            ParametrizedGate::Phase(theta) => {
                let phase = Complex64::new(theta.cos(), theta.sin());
                array![
                    [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                    [Complex64::new(0.0, 0.0), phase]
                ]
            }
            ParametrizedGate::CPhase(theta) => {
                Array2::from_diag(&array![
                    Complex64::new(1.0, 0.0),
                    Complex64::new(1.0, 0.0),
                    Complex64::new(1.0, 0.0),
                    Complex64::new(theta.cos(), theta.sin())
                ])
            }
        }
    }

    fn name(&self) -> String {
        match self {
            ParametrizedGate::Rx(theta) => format!("Rx({:.2})", theta),
            ParametrizedGate::Ry(theta) => format!("Ry({:.2})", theta),
            ParametrizedGate::Rz(theta) => format!("Rz({:.2})", theta),
            ParametrizedGate::Phase(theta) => format!("P({:.2})", theta),
            ParametrizedGate::CPhase(theta) => format!("CP({:.2})", theta),
        }
    }

    fn clone_box(&self) -> Box<dyn QuantumGate> {
        Box::new(self.clone())
    }

    fn adjoint(&self) -> Box<dyn QuantumGate> {
        // Rotations invert by negating the angle
        match self {
            ParametrizedGate::Rx(theta) => Box::new(ParametrizedGate::Rx(-theta)),
            ParametrizedGate::Ry(theta) => Box::new(ParametrizedGate::Ry(-theta)),
            ParametrizedGate::Rz(theta) => Box::new(ParametrizedGate::Rz(-theta)),
            ParametrizedGate::Phase(theta) => Box::new(ParametrizedGate::Phase(-theta)),
            ParametrizedGate::CPhase(theta) => Box::new(ParametrizedGate::CPhase(-theta)),
        }
    }
}

// src/quantum/circuit.rs
//! Quantum circuits as ordered gate sequences, plus a builder with
//! per-gate helper methods.

use crate::quantum::error::QuantumError;
use crate::quantum::gate::{validate_targets, ParametrizedGate, QuantumGate, StandardGate};
use crate::quantum::state::StateVector;

/// A quantum circuit consisting of a sequence of gates
#[derive(Debug)]
pub struct QuantumCircuit {
    pub gates: Vec<(Box<dyn QuantumGate>, Vec<usize>)>,
    pub qubit_count: usize,
}

impl QuantumCircuit {
    /// Create a new empty quantum circuit
    pub fn new(qubit_count: usize) -> Self {
        QuantumCircuit {
            gates: Vec::new(),
            qubit_count,
        }
    }

    /// Append a gate acting on the given qubits
    pub fn add_gate(
        &mut self,
        gate: Box<dyn QuantumGate>,
        qubits: &[usize],
    ) -> Result<(), QuantumError> {
        if gate.qubit_count() != qubits.len() {
            return Err(QuantumError::ArityMismatch {
                name: gate.name(),
                expected: gate.qubit_count(),
                actual: qubits.len(),
            });
        }
        validate_targets(qubits, self.qubit_count)?;

        self.gates.push((gate, qubits.to_vec()));
        Ok(())
    }

    /// Get the number of gates in the circuit
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Apply the circuit to a quantum state
    pub fn apply(&self, state: &StateVector) -> Result<StateVector, QuantumError> {
        if state.qubit_count() < self.qubit_count {
            return Err(QuantumError::DimensionMismatch {
                expected: 1 << self.qubit_count,
                actual: state.dimension(),
            });
        }

        let mut current_state = state.clone();
        for (gate, qubits) in &self.gates {
            current_state = gate.apply_to_qubits(&current_state, qubits)?;
        }

        Ok(current_state)
    }

    /// Compose this circuit with another circuit, self's gates first
    pub fn compose(&self, other: &QuantumCircuit) -> Result<QuantumCircuit, QuantumError> {
        if self.qubit_count != other.qubit_count {
            return Err(QuantumError::DimensionMismatch {
                expected: 1 << self.qubit_count,
                actual: 1 << other.qubit_count,
            });
        }

        let mut result = QuantumCircuit::new(self.qubit_count);
        for (gate, qubits) in self.gates.iter().chain(&other.gates) {
            result.add_gate(gate.clone_box(), qubits)?;
        }

        Ok(result)
    }

    /// Create the adjoint (dagger) of this circuit
    ///
    /// Gates are adjointed individually and appended in reverse order, so
    /// composing a circuit with its adjoint gives the identity.
    pub fn adjoint(&self) -> Self {
        let mut result = QuantumCircuit::new(self.qubit_count);

        for (gate, qubits) in self.gates.iter().rev() {
            result.gates.push((gate.adjoint(), qubits.clone()));
        }

        result
    }
}

impl Clone for QuantumCircuit {
    fn clone(&self) -> Self {
        QuantumCircuit {
            gates: self
                .gates
                .iter()
                .map(|(gate, qubits)| (gate.clone_box(), qubits.clone()))
                .collect(),
            qubit_count: self.qubit_count,
        }
    }
}

impl PartialEq for QuantumCircuit {
    fn eq(&self, other: &Self) -> bool {
        if self.qubit_count != other.qubit_count || self.gates.len() != other.gates.len() {
            return false;
        }

        // Gates must match pairwise, on the same qubits
        self.gates
            .iter()
            .zip(&other.gates)
            .all(|((gate1, qubits1), (gate2, qubits2))| {
                qubits1 == qubits2 && gate1.equals(gate2.as_ref())
            })
    }
}

/// A builder for quantum circuits
pub struct CircuitBuilder {
    circuit: QuantumCircuit,
}

impl CircuitBuilder {
    /// Create a new circuit builder
    pub fn new(qubit_count: usize) -> Self {
        CircuitBuilder {
            circuit: QuantumCircuit::new(qubit_count),
        }
    }

    /// Build the quantum circuit
    pub fn build(self) -> QuantumCircuit {
        self.circuit
    }

    /// Add an arbitrary gate
    pub fn add_gate<G: QuantumGate + 'static>(
        &mut self,
        gate: G,
        qubits: &[usize],
    ) -> Result<(), QuantumError> {
        self.circuit.add_gate(Box::new(gate), qubits)
    }

    /// Add a Hadamard gate
    pub fn h(&mut self, qubit: usize) -> Result<(), QuantumError> {
        self.add_gate(StandardGate::H, &[qubit])
    }

    /// Add a Pauli-X gate
    pub fn x(&mut self, qubit: usize) -> Result<(), QuantumError> {
        self.add_gate(StandardGate::X, &[qubit])
    }

    /// Add a Pauli-Y gate
    pub fn y(&mut self, qubit: usize) -> Result<(), QuantumError> {
        self.add_gate(StandardGate::Y, &[qubit])
    }

    /// Add a Pauli-Z gate
    pub fn z(&mut self, qubit: usize) -> Result<(), QuantumError> {
        self.add_gate(StandardGate::Z, &[qubit])
    }

    /// Add an S gate
    pub fn s(&mut self, qubit: usize) -> Result<(), QuantumError> {
        self.add_gate(StandardGate::S, &[qubit])
    }

    /// Add a T gate
    pub fn t(&mut self, qubit: usize) -> Result<(), QuantumError> {
        self.add_gate(StandardGate::T, &[qubit])
    }

    /// Add a CNOT gate
    pub fn cnot(&mut self, control: usize, target: usize) -> Result<(), QuantumError> {
        self.add_gate(StandardGate::CNOT, &[control, target])
    }

    /// Add a controlled-Z gate
    pub fn cz(&mut self, control: usize, target: usize) -> Result<(), QuantumError> {
        self.add_gate(StandardGate::CZ, &[control, target])
    }

    /// Add a SWAP gate
    pub fn swap(&mut self, qubit1: usize, qubit2: usize) -> Result<(), QuantumError> {
        self.add_gate(StandardGate::SWAP, &[qubit1, qubit2])
    }

    /// Add an Rx gate
    pub fn rx(&mut self, qubit: usize, theta: f64) -> Result<(), QuantumError> {
        self.add_gate(ParametrizedGate::Rx(theta), &[qubit])
    }

    /// Add an Ry gate
    pub fn ry(&mut self, qubit: usize, theta: f64) -> Result<(), QuantumError> {
        self.add_gate(ParametrizedGate::Ry(theta), &[qubit])
    }

    /// Add an Rz gate
    pub fn rz(&mut self, qubit: usize, theta: f64) -> Result<(), QuantumError> {
        self.add_gate(ParametrizedGate::Rz(theta), &[qubit])
    }

    /// Add a phase gate P(θ) = diag(1, e^{iθ})
    pub fn phase(&mut self, qubit: usize, theta: f64) -> Result<(), QuantumError> {
        self.add_gate(ParametrizedGate::Phase(theta), &[qubit])
    }

    /// Add a controlled phase gate
    pub fn cphase(&mut self, control: usize, target: usize, theta: f64) -> Result<(), QuantumError> {
        self.add_gate(ParametrizedGate::CPhase(theta), &[control, target])
    }

    /// Number of gates added so far
    pub fn gate_count(&self) -> usize {
        self.circuit.gate_count()
    }

    /// Qubit count of the circuit under construction
    pub fn qubit_count(&self) -> usize {
        self.circuit.qubit_count
    }
}

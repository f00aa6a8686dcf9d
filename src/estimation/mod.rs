// src/estimation/mod.rs
//! Quantum phase estimation
//!
//! Estimates the phase θ of a unitary U with U|ψ⟩ = e^{2πiθ}|ψ⟩. Each of
//! `bits` counting qubits is put into superposition and made to control
//! 2^j applications of U, so qubit j picks up the phase e^{2πiθ·2^j}
//! (phase kickback). An inverse quantum Fourier transform then converts
//! the accumulated phases into the basis state |round(θ·2^bits)⟩, which
//! measurement recovers as the most frequent outcome.

use std::collections::HashMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::quantum::circuit::{CircuitBuilder, QuantumCircuit};
use crate::quantum::error::QuantumError;
use crate::simulators::{Outcome, StatevectorSimulator};

/// Number of shots used when the caller does not specify one
pub const DEFAULT_SHOTS: usize = 2048;

/// The controlled application of U = diag(1, e^{iλ})
///
/// This is the unitary of the original demo: for a known eigenphase λ the
/// controlled application is a single controlled phase gate. Pass the
/// result to [`estimate_phase`] with λ = 2πθ to recover θ.
pub fn controlled_phase(
    lambda: f64,
) -> impl Fn(&mut CircuitBuilder, usize, usize) -> Result<(), QuantumError> {
    move |builder, control, target| builder.cphase(control, target, lambda)
}

/// Append the inverse quantum Fourier transform on qubits 0..qubits
///
/// Bit-reversal swap network first, then for each qubit i the controlled
/// rotations by -π/2^(i-j) against every earlier qubit j, followed by a
/// Hadamard.
pub fn inverse_qft(builder: &mut CircuitBuilder, qubits: usize) -> Result<(), QuantumError> {
    for a in 0..qubits / 2 {
        builder.swap(a, qubits - 1 - a)?;
    }

    for i in 0..qubits {
        for j in 0..i {
            builder.cphase(j, i, -PI / (1 << (i - j)) as f64)?;
        }
        builder.h(i)?;
    }

    Ok(())
}

/// Build the phase estimation circuit
///
/// The register holds `bits` counting qubits (0..bits) and one eigenstate
/// qubit (index `bits`), prepared in |1⟩. `controlled_u` appends one
/// controlled application of U given (builder, control, target).
pub fn phase_estimation_circuit<U>(
    controlled_u: U,
    bits: usize,
) -> Result<QuantumCircuit, QuantumError>
where
    U: Fn(&mut CircuitBuilder, usize, usize) -> Result<(), QuantumError>,
{
    if bits == 0 {
        return Err(QuantumError::EmptyRegister);
    }

    let mut builder = CircuitBuilder::new(bits + 1);

    // Prepare the eigenstate |ψ⟩ = |1⟩
    builder.x(bits)?;

    // Phase kickback: counting qubit j controls 2^j applications of U
    for j in 0..bits {
        builder.h(j)?;
        for _ in 0..(1usize << j) {
            controlled_u(&mut builder, j, bits)?;
        }
    }

    inverse_qft(&mut builder, bits)?;

    Ok(builder.build())
}

/// Result of a phase estimation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationOutcome {
    /// The estimated phase, best_index / 2^bits
    pub estimate: f64,
    /// The most frequent measured index
    pub best_index: usize,
    /// Number of counting qubits
    pub bits: usize,
    /// Number of shots executed
    pub shots: usize,
    /// Histogram of measured indices over all shots
    pub counts: HashMap<usize, usize>,
}

/// Estimate θ for the given controlled unitary
///
/// Builds the estimation circuit, runs it for `shots` shots on a
/// statevector simulator, and decodes the most frequent outcome m as
/// θ̂ = m / 2^bits. Ties are broken toward the smaller index.
pub fn estimate_phase<U>(
    controlled_u: U,
    bits: usize,
    shots: usize,
) -> Result<EstimationOutcome, QuantumError>
where
    U: Fn(&mut CircuitBuilder, usize, usize) -> Result<(), QuantumError>,
{
    let circuit = phase_estimation_circuit(controlled_u, bits)?;

    let mut simulator = StatevectorSimulator::new(bits + 1);
    simulator.run_circuit(&circuit)?;

    let counting_qubits: Vec<usize> = (0..bits).collect();
    let samples = simulator.sample_counts(&counting_qubits, shots)?;

    let counts: HashMap<usize, usize> = samples
        .into_iter()
        .map(|(outcomes, count)| (outcome_index(&outcomes), count))
        .collect();

    let best_index = *counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .ok_or(QuantumError::EmptyHistogram)?
        .0;

    Ok(EstimationOutcome {
        estimate: best_index as f64 / (1usize << bits) as f64,
        best_index,
        bits,
        shots,
        counts,
    })
}

/// Decode measured counting qubits into an index: qubit j has weight 2^j
pub fn outcome_index(outcomes: &[Outcome]) -> usize {
    outcomes
        .iter()
        .enumerate()
        .fold(0, |index, (j, outcome)| index | (outcome.bit() << j))
}

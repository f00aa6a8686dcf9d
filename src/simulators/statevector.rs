// src/simulators/statevector.rs
//! Statevector simulator for quantum circuits
//!
//! Runs circuits against an in-memory state vector and exposes
//! measurement as probabilities, collapsing single measurements, and
//! histogram sampling over many shots. Shot sampling draws from the final
//! joint distribution directly instead of re-collapsing a copy of the
//! state per shot.

use std::collections::HashMap;
use std::fmt;

use ndarray::Array1;
use num_complex::Complex64;
use rand::Rng;
use rayon::prelude::*;

use crate::quantum::circuit::QuantumCircuit;
use crate::quantum::error::QuantumError;
use crate::quantum::gate::QuantumGate;
use crate::quantum::state::{StateVector, NORM_TOLERANCE};

/// A measurement outcome for a single qubit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Measurement yielded 0
    Zero,
    /// Measurement yielded 1
    One,
}

impl Outcome {
    /// The outcome as a bit value
    pub fn bit(self) -> usize {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Zero => write!(f, "0"),
            Outcome::One => write!(f, "1"),
        }
    }
}

/// An outcome of measuring multiple qubits
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementOutcome {
    /// The outcomes for each measured qubit
    pub outcomes: Vec<Outcome>,
    /// The probability of this outcome
    pub probability: f64,
}

impl fmt::Display for MeasurementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            write!(f, "{}", outcome)?;
        }
        write!(f, " (p={})", self.probability)
    }
}

/// A statevector simulator for quantum circuits
#[derive(Clone)]
pub struct StatevectorSimulator {
    /// The current state of the simulator
    state: StateVector,
}

impl StatevectorSimulator {
    /// Create a new simulator in the |0...0⟩ state
    pub fn new(qubit_count: usize) -> Self {
        StatevectorSimulator {
            state: StateVector::zero_state(qubit_count),
        }
    }

    /// Create a simulator from an existing state vector
    pub fn from_state(state: StateVector) -> Self {
        StatevectorSimulator { state }
    }

    /// Get the current state vector
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Reset the simulator to the |0...0⟩ state
    pub fn reset(&mut self) {
        self.state = StateVector::zero_state(self.state.qubit_count());
    }

    /// Get the number of qubits in the simulator
    pub fn qubit_count(&self) -> usize {
        self.state.qubit_count()
    }

    /// Apply a quantum gate to the specified qubits
    pub fn apply_gate(
        &mut self,
        gate: &dyn QuantumGate,
        qubits: &[usize],
    ) -> Result<(), QuantumError> {
        self.state = gate.apply_to_qubits(&self.state, qubits)?;
        Ok(())
    }

    /// Run a quantum circuit, applying its gates in sequence
    pub fn run_circuit(&mut self, circuit: &QuantumCircuit) -> Result<(), QuantumError> {
        self.state = circuit.apply(&self.state)?;
        Ok(())
    }

    /// Measurement probabilities for a single qubit, without collapsing
    pub fn measure_qubit_probability(
        &self,
        qubit: usize,
    ) -> Result<HashMap<Outcome, f64>, QuantumError> {
        if qubit >= self.qubit_count() {
            return Err(QuantumError::QubitOutOfRange {
                index: qubit,
                qubit_count: self.qubit_count(),
            });
        }

        let shift = self.qubit_count() - 1 - qubit;
        let mut prob_one = 0.0;
        for i in 0..self.state.dimension() {
            if (i >> shift) & 1 == 1 {
                prob_one += self.state.probability(i);
            }
        }

        let mut probabilities = HashMap::new();
        probabilities.insert(Outcome::Zero, 1.0 - prob_one);
        probabilities.insert(Outcome::One, prob_one);
        Ok(probabilities)
    }

    /// Joint measurement probabilities for several qubits, without
    /// collapsing. Outcomes with vanishing probability are omitted.
    pub fn measure_qubits_probability(
        &self,
        qubits: &[usize],
    ) -> Result<HashMap<Vec<Outcome>, f64>, QuantumError> {
        for &q in qubits {
            if q >= self.qubit_count() {
                return Err(QuantumError::QubitOutOfRange {
                    index: q,
                    qubit_count: self.qubit_count(),
                });
            }
        }

        let mut probabilities = HashMap::new();
        for i in 0..self.state.dimension() {
            let prob = self.state.probability(i);
            if prob > NORM_TOLERANCE {
                let outcomes = self.extract_outcomes(i, qubits);
                *probabilities.entry(outcomes).or_insert(0.0) += prob;
            }
        }

        Ok(probabilities)
    }

    /// Bit values of the given qubits within a basis index
    fn extract_outcomes(&self, index: usize, qubits: &[usize]) -> Vec<Outcome> {
        qubits
            .iter()
            .map(|&q| {
                let shift = self.qubit_count() - 1 - q;
                if (index >> shift) & 1 == 1 {
                    Outcome::One
                } else {
                    Outcome::Zero
                }
            })
            .collect()
    }

    /// Measure a single qubit and collapse the state
    pub fn measure_qubit(&mut self, qubit: usize) -> Result<Outcome, QuantumError> {
        Ok(self.measure_qubits(&[qubit])?[0])
    }

    /// Measure multiple qubits and collapse the state
    pub fn measure_qubits(&mut self, qubits: &[usize]) -> Result<Vec<Outcome>, QuantumError> {
        let entries = self.distribution(qubits)?;

        // Draw a single sample by cumulative-probability inversion
        let total: f64 = entries.iter().map(|(_, p)| p).sum();
        let mut random_value = rand::thread_rng().gen::<f64>() * total;
        let mut chosen = entries.len() - 1;
        for (i, (_, prob)) in entries.iter().enumerate() {
            if random_value < *prob {
                chosen = i;
                break;
            }
            random_value -= prob;
        }

        let outcomes = entries[chosen].0.clone();
        self.collapse_to_outcomes(qubits, &outcomes)?;
        Ok(outcomes)
    }

    /// Sample measurement outcomes over a number of shots
    ///
    /// The state is not collapsed: each shot is an independent draw from
    /// the joint distribution of the given qubits, fanned out with rayon.
    /// Only observed outcomes appear in the histogram.
    pub fn sample_counts(
        &self,
        qubits: &[usize],
        shots: usize,
    ) -> Result<HashMap<Vec<Outcome>, usize>, QuantumError> {
        let entries = self.distribution(qubits)?;

        let mut cumulative = Vec::with_capacity(entries.len());
        let mut total = 0.0;
        for (_, prob) in &entries {
            total += prob;
            cumulative.push(total);
        }

        let tallies = (0..shots)
            .into_par_iter()
            .map_init(rand::thread_rng, |rng, _| {
                let r = rng.gen::<f64>() * total;
                cumulative
                    .partition_point(|&c| c <= r)
                    .min(entries.len() - 1)
            })
            .fold(
                || vec![0usize; entries.len()],
                |mut counts, slot| {
                    counts[slot] += 1;
                    counts
                },
            )
            .reduce(
                || vec![0usize; entries.len()],
                |mut left, right| {
                    for (l, r) in left.iter_mut().zip(right) {
                        *l += r;
                    }
                    left
                },
            );

        Ok(entries
            .into_iter()
            .zip(tallies)
            .filter(|(_, count)| *count > 0)
            .map(|((outcomes, _), count)| (outcomes, count))
            .collect())
    }

    /// All measurement outcomes with their probabilities, most likely first
    pub fn get_measurement_outcomes(
        &self,
        qubits: &[usize],
    ) -> Result<Vec<MeasurementOutcome>, QuantumError> {
        let mut outcomes: Vec<MeasurementOutcome> = self
            .measure_qubits_probability(qubits)?
            .into_iter()
            .map(|(outcomes, probability)| MeasurementOutcome {
                outcomes,
                probability,
            })
            .collect();

        outcomes.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.outcomes.cmp(&b.outcomes))
        });

        Ok(outcomes)
    }

    /// Joint distribution as a deterministically ordered list
    fn distribution(&self, qubits: &[usize]) -> Result<Vec<(Vec<Outcome>, f64)>, QuantumError> {
        let mut entries: Vec<(Vec<Outcome>, f64)> = self
            .measure_qubits_probability(qubits)?
            .into_iter()
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        if entries.is_empty() {
            return Err(QuantumError::ZeroProbability {
                outcome: "(all)".to_string(),
            });
        }

        Ok(entries)
    }

    /// Collapse the state to specific outcomes for the given qubits
    fn collapse_to_outcomes(
        &mut self,
        qubits: &[usize],
        outcomes: &[Outcome],
    ) -> Result<(), QuantumError> {
        let dim = self.state.dimension();
        let mut new_amplitudes: Array1<Complex64> = Array1::zeros(dim);
        let mut norm_sqr = 0.0;

        // Project onto the subspace where every qubit has its measured value
        for i in 0..dim {
            if self.extract_outcomes(i, qubits) == outcomes {
                new_amplitudes[i] = self.state.amplitudes()[i];
                norm_sqr += new_amplitudes[i].norm_sqr();
            }
        }

        if norm_sqr < NORM_TOLERANCE {
            let outcome: String = outcomes.iter().map(Outcome::to_string).collect();
            return Err(QuantumError::ZeroProbability { outcome });
        }

        let scale = Complex64::new(1.0 / norm_sqr.sqrt(), 0.0);
        new_amplitudes.mapv_inplace(|amp| amp * scale);

        self.state = StateVector::from_parts(self.qubit_count(), new_amplitudes);
        Ok(())
    }
}

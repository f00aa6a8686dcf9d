//quantum_tests.rs

use std::f64::consts::{FRAC_PI_2, PI};

use ndarray::Array1;
use num_complex::Complex64;

use kickback::quantum::circuit::CircuitBuilder;
use kickback::quantum::error::QuantumError;
use kickback::quantum::gate::{ParametrizedGate, QuantumGate, StandardGate};
use kickback::quantum::state::StateVector;

/// Helper function for comparing complex numbers with tolerance
fn complex_approx_eq(a: Complex64, b: Complex64, epsilon: f64) -> bool {
    (a - b).norm() < epsilon
}

/// Helper function for comparing state vectors with tolerance
fn state_approx_eq(a: &StateVector, b: &StateVector, epsilon: f64) -> bool {
    if a.qubit_count() != b.qubit_count() {
        return false;
    }

    let a_amp = a.amplitudes();
    let b_amp = b.amplitudes();
    (0..a_amp.len()).all(|i| complex_approx_eq(a_amp[i], b_amp[i], epsilon))
}

#[test]
fn test_state_vector_creation() {
    let zero_state = StateVector::zero_state(2);

    assert_eq!(zero_state.qubit_count(), 2);
    assert_eq!(zero_state.dimension(), 4);

    let amplitudes = zero_state.amplitudes();
    assert!(complex_approx_eq(amplitudes[0], Complex64::new(1.0, 0.0), 1e-10));
    for i in 1..4 {
        assert!(complex_approx_eq(amplitudes[i], Complex64::new(0.0, 0.0), 1e-10));
    }

    // |10⟩ has qubit 0 set, so it sits at index 2
    let basis = StateVector::computational_basis(2, 2).unwrap();
    assert!(complex_approx_eq(basis.amplitudes()[2], Complex64::new(1.0, 0.0), 1e-10));
    assert_eq!(basis.probability(2), 1.0);
    assert_eq!(basis.probability(0), 0.0);
}

#[test]
fn test_state_vector_validation() {
    // Wrong dimension
    let result = StateVector::new(2, Array1::zeros(3));
    assert!(matches!(result, Err(QuantumError::DimensionMismatch { .. })));

    // Not normalized
    let mut amplitudes = Array1::zeros(2);
    amplitudes[0] = Complex64::new(0.5, 0.0);
    let result = StateVector::new(1, amplitudes);
    assert!(matches!(result, Err(QuantumError::NotNormalized { .. })));

    // Basis index out of range
    let result = StateVector::computational_basis(2, 4);
    assert!(matches!(result, Err(QuantumError::IndexOutOfRange { .. })));
}

#[test]
fn test_state_tensor_product() {
    let one = StateVector::computational_basis(1, 1).unwrap();
    let zero = StateVector::zero_state(1);

    // |1⟩ ⊗ |0⟩ = |10⟩
    let product = one.tensor(&zero);
    assert_eq!(product.qubit_count(), 2);
    assert!(complex_approx_eq(product.amplitudes()[2], Complex64::new(1.0, 0.0), 1e-10));
}

#[test]
fn test_state_inner_product() {
    let zero = StateVector::zero_state(1);
    let one = StateVector::computational_basis(1, 1).unwrap();

    // Basis states are orthonormal
    assert!(complex_approx_eq(
        zero.inner_product(&zero).unwrap(),
        Complex64::new(1.0, 0.0),
        1e-10
    ));
    assert!(complex_approx_eq(
        zero.inner_product(&one).unwrap(),
        Complex64::new(0.0, 0.0),
        1e-10
    ));

    // Mismatched registers are rejected
    assert!(zero.inner_product(&StateVector::zero_state(2)).is_err());
}

#[test]
fn test_standard_gate_matrices_are_unitary() {
    let gates: Vec<Box<dyn QuantumGate>> = vec![
        Box::new(StandardGate::I(1)),
        Box::new(StandardGate::X),
        Box::new(StandardGate::Y),
        Box::new(StandardGate::Z),
        Box::new(StandardGate::H),
        Box::new(StandardGate::S),
        Box::new(StandardGate::T),
        Box::new(StandardGate::CNOT),
        Box::new(StandardGate::CZ),
        Box::new(StandardGate::SWAP),
    ];

    for gate in gates {
        let matrix = gate.matrix();
        let adjoint = gate.adjoint().matrix();
        let product = adjoint.dot(&matrix);

        // U† U = I
        let dim = product.shape()[0];
        for i in 0..dim {
            for j in 0..dim {
                let expected = if i == j {
                    Complex64::new(1.0, 0.0)
                } else {
                    Complex64::new(0.0, 0.0)
                };
                assert!(
                    complex_approx_eq(product[[i, j]], expected, 1e-10),
                    "U†U != I for {}",
                    gate.name()
                );
            }
        }
    }
}

#[test]
fn test_phase_gate_family() {
    // S = P(π/2)
    let s = StandardGate::S;
    let p = ParametrizedGate::Phase(FRAC_PI_2);
    assert!(s.equals(&p));

    // T² = S
    let t = StandardGate::T.matrix();
    let t_squared = t.dot(&t);
    for i in 0..2 {
        for j in 0..2 {
            assert!(complex_approx_eq(t_squared[[i, j]], s.matrix()[[i, j]], 1e-10));
        }
    }

    // CPhase(π) = CZ
    let cp = ParametrizedGate::CPhase(PI);
    assert!(cp.equals(&StandardGate::CZ));
}

#[test]
fn test_adjoint_involution() {
    let gates: Vec<Box<dyn QuantumGate>> = vec![
        Box::new(StandardGate::S),
        Box::new(StandardGate::T),
        Box::new(ParametrizedGate::Rx(2.1)),
        Box::new(ParametrizedGate::Ry(-0.6)),
        Box::new(ParametrizedGate::Rz(0.3)),
        Box::new(ParametrizedGate::Phase(1.1)),
        Box::new(ParametrizedGate::CPhase(-0.7)),
    ];

    for gate in gates {
        let twice = gate.adjoint().adjoint();
        assert!(gate.equals(twice.as_ref()), "(U†)† != U for {}", gate.name());
    }
}

#[test]
fn test_gate_application() {
    // X on qubit 0 of a 2-qubit register: |00⟩ -> |10⟩
    let state = StateVector::zero_state(2);
    let flipped = StandardGate::X.apply_to_qubits(&state, &[0]).unwrap();
    assert!(complex_approx_eq(flipped.amplitudes()[2], Complex64::new(1.0, 0.0), 1e-10));

    // CNOT with control on qubit 0: |10⟩ -> |11⟩
    let both = StandardGate::CNOT.apply_to_qubits(&flipped, &[0, 1]).unwrap();
    assert!(complex_approx_eq(both.amplitudes()[3], Complex64::new(1.0, 0.0), 1e-10));

    // CNOT with reversed targets: qubit 1 controls, qubit 0 flips,
    // so |01⟩ -> |11⟩
    let one = StandardGate::X.apply_to_qubits(&state, &[1]).unwrap();
    let flipped_back = StandardGate::CNOT.apply_to_qubits(&one, &[1, 0]).unwrap();
    assert!(complex_approx_eq(flipped_back.amplitudes()[3], Complex64::new(1.0, 0.0), 1e-10));
}

#[test]
fn test_cphase_is_symmetric() {
    let mut builder = CircuitBuilder::new(2);
    builder.h(0).unwrap();
    builder.h(1).unwrap();
    let prepared = builder.build().apply(&StateVector::zero_state(2)).unwrap();

    let forward = ParametrizedGate::CPhase(0.4)
        .apply_to_qubits(&prepared, &[0, 1])
        .unwrap();
    let backward = ParametrizedGate::CPhase(0.4)
        .apply_to_qubits(&prepared, &[1, 0])
        .unwrap();

    assert!(state_approx_eq(&forward, &backward, 1e-10));
}

#[test]
fn test_gate_application_errors() {
    let state = StateVector::zero_state(2);

    let result = StandardGate::H.apply_to_qubits(&state, &[0, 1]);
    assert!(matches!(result, Err(QuantumError::ArityMismatch { .. })));

    let result = StandardGate::H.apply_to_qubits(&state, &[2]);
    assert!(matches!(result, Err(QuantumError::QubitOutOfRange { .. })));

    let result = StandardGate::CNOT.apply_to_qubits(&state, &[1, 1]);
    assert!(matches!(result, Err(QuantumError::DuplicateTarget { .. })));
}

#[test]
fn test_circuit_builder_and_apply() {
    let mut builder = CircuitBuilder::new(2);
    builder.h(0).unwrap();
    builder.cnot(0, 1).unwrap();
    let circuit = builder.build();

    assert_eq!(circuit.gate_count(), 2);

    let state = circuit.apply(&StateVector::zero_state(2)).unwrap();
    let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
    assert!(complex_approx_eq(state.amplitudes()[0], Complex64::new(sqrt2_inv, 0.0), 1e-10));
    assert!(complex_approx_eq(state.amplitudes()[3], Complex64::new(sqrt2_inv, 0.0), 1e-10));
}

#[test]
fn test_circuit_adjoint_round_trip() {
    let mut builder = CircuitBuilder::new(3);
    builder.h(0).unwrap();
    builder.s(1).unwrap();
    builder.t(0).unwrap();
    builder.y(2).unwrap();
    builder.cnot(0, 2).unwrap();
    builder.rx(1, 0.4).unwrap();
    builder.ry(0, -0.2).unwrap();
    builder.phase(2, 0.9).unwrap();
    builder.swap(1, 2).unwrap();
    let circuit = builder.build();

    let state = StateVector::computational_basis(3, 5).unwrap();
    let round_trip = circuit
        .adjoint()
        .apply(&circuit.apply(&state).unwrap())
        .unwrap();

    assert!(state_approx_eq(&round_trip, &state, 1e-10));
}

#[test]
fn test_circuit_compose() {
    let mut first = CircuitBuilder::new(1);
    first.h(0).unwrap();
    let first = first.build();

    let mut second = CircuitBuilder::new(1);
    second.z(0).unwrap();
    let second = second.build();

    let composed = first.compose(&second).unwrap();
    assert_eq!(composed.gate_count(), 2);

    // H then Z on |0⟩ gives (|0⟩ - |1⟩)/√2
    let state = composed.apply(&StateVector::zero_state(1)).unwrap();
    let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
    assert!(complex_approx_eq(state.amplitudes()[0], Complex64::new(sqrt2_inv, 0.0), 1e-10));
    assert!(complex_approx_eq(state.amplitudes()[1], Complex64::new(-sqrt2_inv, 0.0), 1e-10));

    // Composing circuits of different widths is rejected
    let wide = CircuitBuilder::new(2).build();
    assert!(first.compose(&wide).is_err());
}

#[test]
fn test_circuit_rejects_invalid_gates() {
    let mut builder = CircuitBuilder::new(2);
    assert!(matches!(
        builder.h(2),
        Err(QuantumError::QubitOutOfRange { .. })
    ));
    assert!(matches!(
        builder.cnot(0, 0),
        Err(QuantumError::DuplicateTarget { .. })
    ));
}

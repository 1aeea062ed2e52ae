use sha2::{Digest, Sha256};

use crate::runtime::{
    error::VarError,
    scalar::Scalar,
    type_id::{PrimitiveKind, RuntimeTypeId},
    value_cell::ValueCell,
};

use super::{
    bootstrap::register_primitives,
    operator::OperatorKind,
    registry::{DispatchRegistry, OperatorMatrix},
};

fn always_one(_: &ValueCell, _: &ValueCell) -> Result<ValueCell, VarError> {
    Ok(ValueCell::new(1i32))
}

fn always_two(_: &ValueCell, _: &ValueCell) -> Result<ValueCell, VarError> {
    Ok(ValueCell::new(2i32))
}

#[test]
fn empty_matrix_misses_everything() {
    let matrix = OperatorMatrix::default();
    let id = RuntimeTypeId::of::<i32>();
    assert!(!matrix.has_type(id));
    assert!(!matrix.has_pair(id, id));
    assert!(matrix.get_operation(id, id).is_none());
    assert!(matrix.is_empty());
}

#[test]
fn set_operation_never_overwrites() {
    let mut matrix = OperatorMatrix::default();
    let a = RuntimeTypeId::of::<i32>();
    let b = RuntimeTypeId::of::<f64>();

    assert!(matrix.set_operation(a, b, always_one));
    assert!(!matrix.set_operation(a, b, always_two));
    assert_eq!(matrix.len(), 1);

    let func = matrix.get_operation(a, b).unwrap();
    let result = func(&ValueCell::new(0i32), &ValueCell::new(0.0f64)).unwrap();
    assert_eq!(result.primitive::<i32>(), Some(1));
}

#[test]
fn has_type_tracks_left_operands_only() {
    let mut matrix = OperatorMatrix::default();
    let a = RuntimeTypeId::of::<u8>();
    let b = RuntimeTypeId::of::<char>();
    matrix.set_operation(a, b, always_one);

    assert!(matrix.has_type(a));
    assert!(!matrix.has_type(b));
    assert!(matrix.has_pair(a, b));
    assert!(!matrix.has_pair(b, a));
}

#[test]
fn bootstrap_populates_exactly_the_well_formed_pairs() {
    let registry = DispatchRegistry::bootstrap();
    for op in OperatorKind::ALL {
        for lhs in PrimitiveKind::ALL {
            for rhs in PrimitiveKind::ALL {
                assert_eq!(
                    registry.has_pair(op, lhs.type_id(), rhs.type_id()),
                    op.accepts(lhs, rhs),
                    "{} {} {}",
                    lhs,
                    op,
                    rhs
                );
            }
        }
        let expected = if op.integral_only() { 100 } else { 169 };
        assert_eq!(registry.matrix(op).len(), expected, "{}", op);
    }
    assert_eq!(registry.len(), 12 * 169 + 4 * 100);
}

#[test]
fn rerunning_bootstrap_is_a_no_op() {
    let mut registry = DispatchRegistry::bootstrap();
    let before = registry.fingerprint();
    register_primitives(&mut registry);
    assert_eq!(registry.len(), 2428);
    assert_eq!(registry.fingerprint(), before);
}

#[test]
fn bootstrap_keeps_earlier_custom_bindings() {
    let mut registry = DispatchRegistry::new();
    let i32_id = RuntimeTypeId::of::<i32>();
    registry.set_operation(OperatorKind::Add, i32_id, i32_id, always_two);
    register_primitives(&mut registry);

    let result = registry
        .dispatch(OperatorKind::Add, &ValueCell::new(5i32), &ValueCell::new(3i32))
        .unwrap();
    assert_eq!(result.primitive::<i32>(), Some(2));
}

#[test]
fn fingerprints_agree_across_bootstraps() {
    let a = DispatchRegistry::bootstrap().fingerprint();
    let b = DispatchRegistry::bootstrap().fingerprint();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert_ne!(a, DispatchRegistry::new().fingerprint());
}

#[test]
fn fingerprint_hashes_primitive_labels() {
    let mut registry = DispatchRegistry::new();
    registry.set_operation(
        OperatorKind::Add,
        RuntimeTypeId::of::<half::f16>(),
        RuntimeTypeId::of::<i32>(),
        always_one,
    );
    registry.set_operation(
        OperatorKind::BitAnd,
        RuntimeTypeId::of::<u8>(),
        RuntimeTypeId::of::<char>(),
        always_one,
    );

    let digest = Sha256::digest(b"add f16 i32\nbit_and u8 char\n");
    let expected: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    assert_eq!(registry.fingerprint(), expected);
}

#[test]
fn dispatch_miss_names_operator_and_types() {
    let registry = DispatchRegistry::bootstrap();
    let err = registry
        .dispatch(
            OperatorKind::BitOr,
            &ValueCell::new(1.0f32),
            &ValueCell::new(true),
        )
        .unwrap_err();
    assert_eq!(
        err,
        VarError::UnsupportedOperandTypes {
            op: OperatorKind::BitOr,
            lhs: "f32",
            rhs: "bool"
        }
    );
}

#[test]
fn arrays_have_no_bindings() {
    let registry = DispatchRegistry::bootstrap();
    let err = registry
        .dispatch(
            OperatorKind::Add,
            &ValueCell::new([1i32, 2]),
            &ValueCell::new([3i32, 4]),
        )
        .unwrap_err();
    assert!(matches!(err, VarError::UnsupportedOperandTypes { .. }));
}

#[test]
fn entries_reject_payloads_of_the_wrong_type() {
    let registry = DispatchRegistry::bootstrap();
    let func = registry
        .get_operation(
            OperatorKind::Add,
            RuntimeTypeId::of::<i32>(),
            RuntimeTypeId::of::<i32>(),
        )
        .unwrap();
    let err = func(&ValueCell::new(1u8), &ValueCell::new(1i32)).unwrap_err();
    assert_eq!(
        err,
        VarError::DispatchProducedNothing {
            op: OperatorKind::Add,
            lhs: "i32",
            rhs: "i32"
        }
    );
}

#[test]
fn ref_boxed_cells_dispatch_like_inline_ones() {
    let registry = DispatchRegistry::bootstrap();
    let seven = 7u16;
    let lhs = ValueCell::from_ref(&seven).unwrap();
    let result = registry
        .dispatch(OperatorKind::Mul, &lhs, &ValueCell::new(6i64))
        .unwrap();
    assert_eq!(result.scalar(), Some(Scalar::I64(42)));
}

#[test]
fn coverage_lists_unbound_pairs() {
    let report = DispatchRegistry::bootstrap().coverage();
    assert_eq!(report.total_bound, 2428);

    let add = report.for_operator(OperatorKind::Add).unwrap();
    assert_eq!(add.bound, 169);
    assert!(add.unbound.is_empty());

    let xor = report.for_operator(OperatorKind::BitXor).unwrap();
    assert_eq!(xor.candidates, 169);
    assert_eq!(xor.unbound.len(), 69);
    assert!(xor.unbound.contains(&(PrimitiveKind::Bool, PrimitiveKind::F32)));
    assert!(xor.unbound.contains(&(PrimitiveKind::F16, PrimitiveKind::F16)));
    assert!(!xor.unbound.contains(&(PrimitiveKind::Char, PrimitiveKind::U64)));

    let rem = report.for_operator(OperatorKind::Mod).unwrap();
    assert_eq!(rem.bound, 100);
    assert_eq!(rem.unbound, xor.unbound);
}

#[test]
fn float_remainder_is_unbound() {
    let registry = DispatchRegistry::bootstrap();
    let f64_id = RuntimeTypeId::of::<f64>();
    let i32_id = RuntimeTypeId::of::<i32>();
    assert!(!registry.has_pair(OperatorKind::Mod, f64_id, f64_id));
    assert!(!registry.has_pair(OperatorKind::Mod, i32_id, f64_id));
    assert!(registry.has_pair(OperatorKind::Mod, i32_id, i32_id));

    let err = registry
        .dispatch(
            OperatorKind::Mod,
            &ValueCell::new(7.5f64),
            &ValueCell::new(2i32),
        )
        .unwrap_err();
    assert_eq!(
        err,
        VarError::UnsupportedOperandTypes {
            op: OperatorKind::Mod,
            lhs: "f64",
            rhs: "i32"
        }
    );
}

#[test]
fn coverage_serializes_to_json() {
    let json = DispatchRegistry::bootstrap().coverage().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_bound"], 2428);
    assert_eq!(value["operators"][13]["operator"], "bit_and");
    assert_eq!(value["operators"][13]["unbound"][0][0], "bool");
    assert_eq!(value["operators"][13]["unbound"][0][1], "f16");
}

use half::f16;

use crate::runtime::scalar::Scalar;

use super::native::{
    AddOperator, AndOperator, BitAndOperator, BitXorOperator, DivOperator, EqOperator, Fault,
    LtOperator, ModOperator, NativeOperator, Promoted, Rank, SubOperator, unify,
};

fn apply<O: NativeOperator>(lhs: Scalar, rhs: Scalar) -> Result<Scalar, Fault> {
    O::apply(Promoted::from_scalar(lhs), Promoted::from_scalar(rhs))
}

#[test]
fn small_kinds_promote_to_i32() {
    assert_eq!(Promoted::from_scalar(Scalar::Bool(true)), Promoted::I32(1));
    assert_eq!(Promoted::from_scalar(Scalar::U8(200)), Promoted::I32(200));
    assert_eq!(Promoted::from_scalar(Scalar::I16(-3)), Promoted::I32(-3));
    assert_eq!(Promoted::from_scalar(Scalar::Char('A')), Promoted::I32(65));
    assert_eq!(Promoted::from_scalar(Scalar::U32(7)), Promoted::U32(7));
}

#[test]
fn common_type_follows_rank_order() {
    let (l, r) = unify(Promoted::I32(-1), Promoted::U32(1));
    assert_eq!((l, r), (Promoted::U32(u32::MAX), Promoted::U32(1)));

    let (l, r) = unify(Promoted::U32(5), Promoted::I64(-5));
    assert_eq!((l, r), (Promoted::I64(5), Promoted::I64(-5)));

    let (l, r) = unify(Promoted::U64(3), Promoted::F16(f16::from_f32(0.5)));
    assert_eq!(l.rank(), Rank::F16);
    assert_eq!(r, Promoted::F16(f16::from_f32(0.5)));

    let (l, _) = unify(Promoted::F16(f16::ONE), Promoted::F32(2.0));
    assert_eq!(l, Promoted::F32(1.0));
}

#[test]
fn subtraction_respects_operand_order() {
    assert_eq!(
        apply::<SubOperator>(Scalar::I32(5), Scalar::F64(2.0)),
        Ok(Scalar::F64(3.0))
    );
    assert_eq!(
        apply::<SubOperator>(Scalar::F64(2.0), Scalar::I32(5)),
        Ok(Scalar::F64(-3.0))
    );
}

#[test]
fn mixed_signedness_matches_c_conversions() {
    // -1 converted to u32 is u32::MAX, which is not less than 1.
    assert_eq!(
        apply::<LtOperator>(Scalar::I32(-1), Scalar::U32(1)),
        Ok(Scalar::Bool(false))
    );
    assert_eq!(
        apply::<LtOperator>(Scalar::I64(-1), Scalar::U32(1)),
        Ok(Scalar::Bool(true))
    );
}

#[test]
fn bool_and_char_arithmetic_yields_i32() {
    assert_eq!(
        apply::<AddOperator>(Scalar::Bool(true), Scalar::Bool(true)),
        Ok(Scalar::I32(2))
    );
    assert_eq!(
        apply::<AddOperator>(Scalar::Char('a'), Scalar::I8(1)),
        Ok(Scalar::I32(98))
    );
    assert_eq!(
        apply::<EqOperator>(Scalar::Char('A'), Scalar::U8(65)),
        Ok(Scalar::Bool(true))
    );
}

#[test]
fn integer_overflow_wraps() {
    assert_eq!(
        apply::<AddOperator>(Scalar::I32(i32::MAX), Scalar::I32(1)),
        Ok(Scalar::I32(i32::MIN))
    );
    assert_eq!(
        apply::<DivOperator>(Scalar::I64(i64::MIN), Scalar::I64(-1)),
        Ok(Scalar::I64(i64::MIN))
    );
}

#[test]
fn integer_division_by_zero_faults() {
    assert_eq!(
        apply::<DivOperator>(Scalar::U16(1), Scalar::Bool(false)),
        Err(Fault::DivisionByZero)
    );
    assert_eq!(
        apply::<ModOperator>(Scalar::U64(9), Scalar::U64(0)),
        Err(Fault::DivisionByZero)
    );
}

#[test]
fn float_division_by_zero_follows_ieee() {
    assert_eq!(
        apply::<DivOperator>(Scalar::F64(1.0), Scalar::I32(0)),
        Ok(Scalar::F64(f64::INFINITY))
    );
}

#[test]
fn remainder_is_integral_only() {
    assert_eq!(
        apply::<ModOperator>(Scalar::I32(-7), Scalar::U8(2)),
        Ok(Scalar::I32(-1))
    );
    assert_eq!(
        apply::<ModOperator>(Scalar::F32(7.5), Scalar::I32(2)),
        Err(Fault::Mismatch)
    );
    assert_eq!(
        apply::<ModOperator>(Scalar::I64(7), Scalar::F16(f16::ONE)),
        Err(Fault::Mismatch)
    );
}

#[test]
fn logical_operators_use_contextual_truth() {
    assert_eq!(
        apply::<AndOperator>(Scalar::F64(f64::NAN), Scalar::Char('x')),
        Ok(Scalar::Bool(true))
    );
    assert_eq!(
        apply::<AndOperator>(Scalar::F32(0.0), Scalar::Bool(true)),
        Ok(Scalar::Bool(false))
    );
}

#[test]
fn bitwise_on_floats_produces_nothing() {
    assert_eq!(
        apply::<BitAndOperator>(Scalar::F32(1.0), Scalar::F32(1.0)),
        Err(Fault::Mismatch)
    );
    assert_eq!(
        apply::<BitXorOperator>(Scalar::U8(0b1100), Scalar::I16(0b1010)),
        Ok(Scalar::I32(0b0110))
    );
}

//! Native binary operators over primitive scalars.
//!
//! Rust has no mixed-type primitive operators, so each operand is first
//! promoted (small integers, `bool` and `char` become `i32`) and both sides
//! are converted to the higher of their two ranks before Rust's own
//! operator runs on the common type. Integer arithmetic wraps; integer
//! division and remainder by zero are reported instead of panicking.
//! Remainder, like the bitwise operators, is defined on integers only.

use half::f16;

use crate::{dispatch::operator::OperatorKind, runtime::scalar::Scalar};

/// Conversion rank of a promoted operand. The common type of a pair is the
/// maximum of the two ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    I32,
    U32,
    I64,
    U64,
    F16,
    F32,
    F64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Promoted {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F16(f16),
    F32(f32),
    F64(f64),
}

/// Why a native operator produced no scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    DivisionByZero,
    /// Operands did not unify to a type the operator is defined on.
    Mismatch,
}

impl Promoted {
    pub fn from_scalar(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Bool(v) => Promoted::I32(i32::from(v)),
            Scalar::I8(v) => Promoted::I32(i32::from(v)),
            Scalar::U8(v) => Promoted::I32(i32::from(v)),
            Scalar::Char(v) => Promoted::I32(u32::from(v) as i32),
            Scalar::I16(v) => Promoted::I32(i32::from(v)),
            Scalar::U16(v) => Promoted::I32(i32::from(v)),
            Scalar::I32(v) => Promoted::I32(v),
            Scalar::U32(v) => Promoted::U32(v),
            Scalar::I64(v) => Promoted::I64(v),
            Scalar::U64(v) => Promoted::U64(v),
            Scalar::F16(v) => Promoted::F16(v),
            Scalar::F32(v) => Promoted::F32(v),
            Scalar::F64(v) => Promoted::F64(v),
        }
    }

    pub fn rank(self) -> Rank {
        match self {
            Promoted::I32(_) => Rank::I32,
            Promoted::U32(_) => Rank::U32,
            Promoted::I64(_) => Rank::I64,
            Promoted::U64(_) => Rank::U64,
            Promoted::F16(_) => Rank::F16,
            Promoted::F32(_) => Rank::F32,
            Promoted::F64(_) => Rank::F64,
        }
    }

    fn integer(self) -> i128 {
        match self {
            Promoted::I32(v) => i128::from(v),
            Promoted::U32(v) => i128::from(v),
            Promoted::I64(v) => i128::from(v),
            Promoted::U64(v) => i128::from(v),
            Promoted::F16(v) => v.to_f64() as i128,
            Promoted::F32(v) => v as i128,
            Promoted::F64(v) => v as i128,
        }
    }

    fn to_f32(self) -> f32 {
        match self {
            Promoted::I32(v) => v as f32,
            Promoted::U32(v) => v as f32,
            Promoted::I64(v) => v as f32,
            Promoted::U64(v) => v as f32,
            Promoted::F16(v) => v.to_f32(),
            Promoted::F32(v) => v,
            Promoted::F64(v) => v as f32,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Promoted::I32(v) => f64::from(v),
            Promoted::U32(v) => f64::from(v),
            Promoted::I64(v) => v as f64,
            Promoted::U64(v) => v as f64,
            Promoted::F16(v) => v.to_f64(),
            Promoted::F32(v) => f64::from(v),
            Promoted::F64(v) => v,
        }
    }

    /// Converts to `rank` with `as` semantics: integers wrap, floats round.
    pub fn cast(self, rank: Rank) -> Promoted {
        if self.rank() == rank {
            return self;
        }
        match rank {
            Rank::I32 => Promoted::I32(self.integer() as i32),
            Rank::U32 => Promoted::U32(self.integer() as u32),
            Rank::I64 => Promoted::I64(self.integer() as i64),
            Rank::U64 => Promoted::U64(self.integer() as u64),
            Rank::F16 => Promoted::F16(f16::from_f64(self.to_f64())),
            Rank::F32 => Promoted::F32(self.to_f32()),
            Rank::F64 => Promoted::F64(self.to_f64()),
        }
    }

    /// Contextual boolean conversion; NaN counts as nonzero.
    pub fn is_nonzero(self) -> bool {
        match self {
            Promoted::I32(v) => v != 0,
            Promoted::U32(v) => v != 0,
            Promoted::I64(v) => v != 0,
            Promoted::U64(v) => v != 0,
            Promoted::F16(v) => v != f16::ZERO,
            Promoted::F32(v) => v != 0.0,
            Promoted::F64(v) => v != 0.0,
        }
    }
}

/// Converts both operands to their common type.
pub fn unify(lhs: Promoted, rhs: Promoted) -> (Promoted, Promoted) {
    let rank = lhs.rank().max(rhs.rank());
    (lhs.cast(rank), rhs.cast(rank))
}

macro_rules! arithmetic {
    ($lhs:expr, $rhs:expr, $int:ident, $op:tt) => {
        match unify($lhs, $rhs) {
            (Promoted::I32(a), Promoted::I32(b)) => Ok(Scalar::I32(a.$int(b))),
            (Promoted::U32(a), Promoted::U32(b)) => Ok(Scalar::U32(a.$int(b))),
            (Promoted::I64(a), Promoted::I64(b)) => Ok(Scalar::I64(a.$int(b))),
            (Promoted::U64(a), Promoted::U64(b)) => Ok(Scalar::U64(a.$int(b))),
            (Promoted::F16(a), Promoted::F16(b)) => Ok(Scalar::F16(a $op b)),
            (Promoted::F32(a), Promoted::F32(b)) => Ok(Scalar::F32(a $op b)),
            (Promoted::F64(a), Promoted::F64(b)) => Ok(Scalar::F64(a $op b)),
            _ => Err(Fault::Mismatch),
        }
    };
}

macro_rules! checked_arithmetic {
    ($lhs:expr, $rhs:expr, $int:ident, $op:tt) => {
        match unify($lhs, $rhs) {
            (Promoted::I32(_), Promoted::I32(0))
            | (Promoted::U32(_), Promoted::U32(0))
            | (Promoted::I64(_), Promoted::I64(0))
            | (Promoted::U64(_), Promoted::U64(0)) => Err(Fault::DivisionByZero),
            (Promoted::I32(a), Promoted::I32(b)) => Ok(Scalar::I32(a.$int(b))),
            (Promoted::U32(a), Promoted::U32(b)) => Ok(Scalar::U32(a.$int(b))),
            (Promoted::I64(a), Promoted::I64(b)) => Ok(Scalar::I64(a.$int(b))),
            (Promoted::U64(a), Promoted::U64(b)) => Ok(Scalar::U64(a.$int(b))),
            (Promoted::F16(a), Promoted::F16(b)) => Ok(Scalar::F16(a $op b)),
            (Promoted::F32(a), Promoted::F32(b)) => Ok(Scalar::F32(a $op b)),
            (Promoted::F64(a), Promoted::F64(b)) => Ok(Scalar::F64(a $op b)),
            _ => Err(Fault::Mismatch),
        }
    };
}

macro_rules! comparison {
    ($lhs:expr, $rhs:expr, $op:tt) => {
        match unify($lhs, $rhs) {
            (Promoted::I32(a), Promoted::I32(b)) => Ok(Scalar::Bool(a $op b)),
            (Promoted::U32(a), Promoted::U32(b)) => Ok(Scalar::Bool(a $op b)),
            (Promoted::I64(a), Promoted::I64(b)) => Ok(Scalar::Bool(a $op b)),
            (Promoted::U64(a), Promoted::U64(b)) => Ok(Scalar::Bool(a $op b)),
            (Promoted::F16(a), Promoted::F16(b)) => Ok(Scalar::Bool(a $op b)),
            (Promoted::F32(a), Promoted::F32(b)) => Ok(Scalar::Bool(a $op b)),
            (Promoted::F64(a), Promoted::F64(b)) => Ok(Scalar::Bool(a $op b)),
            _ => Err(Fault::Mismatch),
        }
    };
}

macro_rules! bitwise {
    ($lhs:expr, $rhs:expr, $op:tt) => {
        match unify($lhs, $rhs) {
            (Promoted::I32(a), Promoted::I32(b)) => Ok(Scalar::I32(a $op b)),
            (Promoted::U32(a), Promoted::U32(b)) => Ok(Scalar::U32(a $op b)),
            (Promoted::I64(a), Promoted::I64(b)) => Ok(Scalar::I64(a $op b)),
            (Promoted::U64(a), Promoted::U64(b)) => Ok(Scalar::U64(a $op b)),
            _ => Err(Fault::Mismatch),
        }
    };
}

fn add(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    arithmetic!(lhs, rhs, wrapping_add, +)
}

fn sub(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    arithmetic!(lhs, rhs, wrapping_sub, -)
}

fn mul(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    arithmetic!(lhs, rhs, wrapping_mul, *)
}

fn div(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    checked_arithmetic!(lhs, rhs, wrapping_div, /)
}

// Remainder has no floating-point form; float operands unify to a mismatch.
fn rem(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    match unify(lhs, rhs) {
        (Promoted::I32(_), Promoted::I32(0))
        | (Promoted::U32(_), Promoted::U32(0))
        | (Promoted::I64(_), Promoted::I64(0))
        | (Promoted::U64(_), Promoted::U64(0)) => Err(Fault::DivisionByZero),
        (Promoted::I32(a), Promoted::I32(b)) => Ok(Scalar::I32(a.wrapping_rem(b))),
        (Promoted::U32(a), Promoted::U32(b)) => Ok(Scalar::U32(a.wrapping_rem(b))),
        (Promoted::I64(a), Promoted::I64(b)) => Ok(Scalar::I64(a.wrapping_rem(b))),
        (Promoted::U64(a), Promoted::U64(b)) => Ok(Scalar::U64(a.wrapping_rem(b))),
        _ => Err(Fault::Mismatch),
    }
}

fn eq(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    comparison!(lhs, rhs, ==)
}

fn ne(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    comparison!(lhs, rhs, !=)
}

fn gt(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    comparison!(lhs, rhs, >)
}

fn lt(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    comparison!(lhs, rhs, <)
}

fn ge(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    comparison!(lhs, rhs, >=)
}

fn le(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    comparison!(lhs, rhs, <=)
}

fn and(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    Ok(Scalar::Bool(lhs.is_nonzero() && rhs.is_nonzero()))
}

fn or(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    Ok(Scalar::Bool(lhs.is_nonzero() || rhs.is_nonzero()))
}

fn bit_and(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    bitwise!(lhs, rhs, &)
}

fn bit_or(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    bitwise!(lhs, rhs, |)
}

fn bit_xor(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
    bitwise!(lhs, rhs, ^)
}

/// One native operator, bound at compile time so each registered entry is a
/// plain function pointer.
pub trait NativeOperator {
    const KIND: OperatorKind;

    fn apply(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault>;
}

macro_rules! native_operators {
    ($($marker:ident => $kind:ident, $apply:ident;)*) => {
        $(
            pub struct $marker;

            impl NativeOperator for $marker {
                const KIND: OperatorKind = OperatorKind::$kind;

                fn apply(lhs: Promoted, rhs: Promoted) -> Result<Scalar, Fault> {
                    $apply(lhs, rhs)
                }
            }
        )*
    };
}

native_operators! {
    AddOperator => Add, add;
    SubOperator => Sub, sub;
    MulOperator => Mul, mul;
    DivOperator => Div, div;
    ModOperator => Mod, rem;
    EqOperator => Eq, eq;
    NeOperator => Ne, ne;
    GtOperator => Gt, gt;
    LtOperator => Lt, lt;
    GeOperator => Ge, ge;
    LeOperator => Le, le;
    AndOperator => And, and;
    OrOperator => Or, or;
    BitAndOperator => BitAnd, bit_and;
    BitOrOperator => BitOr, bit_or;
    BitXorOperator => BitXor, bit_xor;
}

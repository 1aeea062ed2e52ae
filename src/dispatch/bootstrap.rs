use half::f16;

use crate::{
    dispatch::{
        native::{
            AddOperator, AndOperator, BitAndOperator, BitOrOperator, BitXorOperator, DivOperator,
            EqOperator, Fault, GeOperator, GtOperator, LeOperator, LtOperator, ModOperator,
            MulOperator, NativeOperator, NeOperator, OrOperator, Promoted, SubOperator,
        },
        registry::DispatchRegistry,
    },
    runtime::{
        error::VarError, scalar::Primitive, type_id::RuntimeTypeId, value_cell::ValueCell,
    },
};

/// Entry bound for `(O, A, B)`: reads both payloads, runs the native
/// operator in operand order, and wraps the scalar it returns.
fn entry<A: Primitive, B: Primitive, O: NativeOperator>(
    lhs: &ValueCell,
    rhs: &ValueCell,
) -> Result<ValueCell, VarError> {
    let op = O::KIND;
    let (lhs_name, rhs_name) = (A::KIND.label(), B::KIND.label());
    let (Some(a), Some(b)) = (lhs.primitive::<A>(), rhs.primitive::<B>()) else {
        return Err(VarError::DispatchProducedNothing {
            op,
            lhs: lhs_name,
            rhs: rhs_name,
        });
    };

    match O::apply(
        Promoted::from_scalar(a.into_scalar()),
        Promoted::from_scalar(b.into_scalar()),
    ) {
        Ok(scalar) => Ok(ValueCell::from_scalar(scalar)),
        Err(Fault::DivisionByZero) => Err(VarError::DivisionByZero {
            op,
            lhs: lhs_name,
            rhs: rhs_name,
        }),
        Err(Fault::Mismatch) => Err(VarError::DispatchProducedNothing {
            op,
            lhs: lhs_name,
            rhs: rhs_name,
        }),
    }
}

/// Binds `(O, A, B)` only when the native operator is well-formed for it.
fn enable<A: Primitive, B: Primitive, O: NativeOperator>(registry: &mut DispatchRegistry) {
    if O::KIND.accepts(A::KIND, B::KIND) {
        registry.set_operation(
            O::KIND,
            RuntimeTypeId::of::<A>(),
            RuntimeTypeId::of::<B>(),
            entry::<A, B, O>,
        );
    }
}

fn enable_all_operators<A: Primitive, B: Primitive>(registry: &mut DispatchRegistry) {
    enable::<A, B, AddOperator>(registry);
    enable::<A, B, SubOperator>(registry);
    enable::<A, B, MulOperator>(registry);
    enable::<A, B, DivOperator>(registry);
    enable::<A, B, ModOperator>(registry);
    enable::<A, B, EqOperator>(registry);
    enable::<A, B, NeOperator>(registry);
    enable::<A, B, GtOperator>(registry);
    enable::<A, B, LtOperator>(registry);
    enable::<A, B, GeOperator>(registry);
    enable::<A, B, LeOperator>(registry);
    enable::<A, B, AndOperator>(registry);
    enable::<A, B, OrOperator>(registry);
    enable::<A, B, BitAndOperator>(registry);
    enable::<A, B, BitOrOperator>(registry);
    enable::<A, B, BitXorOperator>(registry);
}

// Visits every ordered pair of the listed types, including A == B.
macro_rules! enable_matrix {
    ($registry:ident; $($ty:ty),* $(,)?) => {
        enable_matrix!(@rows $registry; [$($ty),*]; [$($ty),*]);
    };
    (@rows $registry:ident; [$($lhs:ty),*]; $rhs:tt) => {
        $( enable_matrix!(@row $registry; $lhs; $rhs); )*
    };
    (@row $registry:ident; $lhs:ty; [$($rhs:ty),*]) => {
        $( enable_all_operators::<$lhs, $rhs>($registry); )*
    };
}

/// Populates `registry` for the closed primitive list.
///
/// Safe to run again on the same registry: bound slots are left as they are.
pub fn register_primitives(registry: &mut DispatchRegistry) {
    enable_matrix!(registry; bool, i8, u8, char, i16, u16, i32, u32, i64, u64, f16, f32, f64);
}

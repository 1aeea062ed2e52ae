pub mod dispatch;
pub mod runtime;

pub use dispatch::{operator::OperatorKind, registry::DispatchRegistry};
pub use runtime::{
    erasable::Erasable, error::VarError, generic_value::GenericValue, type_id::PrimitiveKind,
    value_cell::ValueCell,
};

use std::{fmt, ops};

use crate::{
    dispatch::{self, operator::OperatorKind, registry::DispatchRegistry},
    runtime::{
        erasable::Erasable,
        error::VarError,
        scalar::Primitive,
        text_source::TextSource,
        type_id::{PrimitiveKind, RuntimeTypeId},
        value_cell::{StorageKind, ValueCell},
    },
};

/// Owning, value-semantics handle over one [`ValueCell`].
///
/// Copies are deep, and every operator yields a freshly allocated handle;
/// compound assignment replaces the left operand instead of mutating it.
pub struct GenericValue {
    cell: ValueCell,
}

impl Clone for GenericValue {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }

    /// Copy-assignment: the old cell's payload is released first.
    fn clone_from(&mut self, source: &Self) {
        self.cell.clone_from(&source.cell);
    }
}

impl GenericValue {
    pub fn new<T: Erasable>(value: T) -> Self {
        Self {
            cell: ValueCell::new(value),
        }
    }

    pub fn from_ref<T: Erasable>(value: &T) -> Result<Self, VarError> {
        ValueCell::from_ref(value).map(Self::from_cell)
    }

    pub fn from_cell(cell: ValueCell) -> Self {
        Self { cell }
    }

    /// Parses `text` as a value of the primitive `kind`.
    pub fn parse_as(kind: PrimitiveKind, text: &str) -> Result<Self, VarError> {
        let mut cell = ValueCell::default_of(kind);
        cell.parse(&mut TextSource::new(text))?;
        Ok(Self { cell })
    }

    pub fn cell(&self) -> &ValueCell {
        &self.cell
    }

    pub fn into_cell(self) -> ValueCell {
        self.cell
    }

    pub fn format(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
        self.cell.format(sink)
    }

    pub fn parse(&mut self, source: &mut TextSource<'_>) -> Result<(), VarError> {
        self.cell.parse(source)
    }

    pub fn is_truthy(&self) -> bool {
        self.cell.truthiness()
    }

    pub fn byte_size(&self) -> usize {
        self.cell.byte_size()
    }

    pub fn runtime_type_id(&self) -> RuntimeTypeId {
        self.cell.runtime_type_id()
    }

    pub fn runtime_type_name(&self) -> &'static str {
        self.cell.runtime_type_name()
    }

    pub fn storage(&self) -> StorageKind {
        self.cell.storage()
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.cell.downcast_ref()
    }

    pub fn primitive<T: Primitive>(&self) -> Option<T> {
        self.cell.primitive()
    }

    /// Applies `op` through the process-wide registry.
    pub fn apply(&self, op: OperatorKind, rhs: &GenericValue) -> Result<GenericValue, VarError> {
        self.apply_in(dispatch::global(), op, rhs)
    }

    /// Applies `op` through an explicitly built registry.
    pub fn apply_in(
        &self,
        registry: &DispatchRegistry,
        op: OperatorKind,
        rhs: &GenericValue,
    ) -> Result<GenericValue, VarError> {
        registry
            .dispatch(op, &self.cell, &rhs.cell)
            .map(Self::from_cell)
    }

    /// `self = self op rhs`. On failure `self` is left as it was.
    ///
    /// The old cell is an operand of the result, so it is released only
    /// once the result exists; use `clone_from` for plain reassignment.
    pub fn assign_with(&mut self, op: OperatorKind, rhs: &GenericValue) -> Result<(), VarError> {
        let result = self.apply(op, rhs)?;
        *self = result;
        Ok(())
    }

    pub fn try_add_assign(&mut self, rhs: &GenericValue) -> Result<(), VarError> {
        self.assign_with(OperatorKind::Add, rhs)
    }

    pub fn try_sub_assign(&mut self, rhs: &GenericValue) -> Result<(), VarError> {
        self.assign_with(OperatorKind::Sub, rhs)
    }

    pub fn try_mul_assign(&mut self, rhs: &GenericValue) -> Result<(), VarError> {
        self.assign_with(OperatorKind::Mul, rhs)
    }

    pub fn try_div_assign(&mut self, rhs: &GenericValue) -> Result<(), VarError> {
        self.assign_with(OperatorKind::Div, rhs)
    }

    pub fn try_rem_assign(&mut self, rhs: &GenericValue) -> Result<(), VarError> {
        self.assign_with(OperatorKind::Mod, rhs)
    }

    pub fn eq_value(&self, rhs: &GenericValue) -> Result<GenericValue, VarError> {
        self.apply(OperatorKind::Eq, rhs)
    }

    pub fn ne_value(&self, rhs: &GenericValue) -> Result<GenericValue, VarError> {
        self.apply(OperatorKind::Ne, rhs)
    }

    pub fn gt(&self, rhs: &GenericValue) -> Result<GenericValue, VarError> {
        self.apply(OperatorKind::Gt, rhs)
    }

    pub fn lt(&self, rhs: &GenericValue) -> Result<GenericValue, VarError> {
        self.apply(OperatorKind::Lt, rhs)
    }

    pub fn ge(&self, rhs: &GenericValue) -> Result<GenericValue, VarError> {
        self.apply(OperatorKind::Ge, rhs)
    }

    pub fn le(&self, rhs: &GenericValue) -> Result<GenericValue, VarError> {
        self.apply(OperatorKind::Le, rhs)
    }

    pub fn and(&self, rhs: &GenericValue) -> Result<GenericValue, VarError> {
        self.apply(OperatorKind::And, rhs)
    }

    pub fn or(&self, rhs: &GenericValue) -> Result<GenericValue, VarError> {
        self.apply(OperatorKind::Or, rhs)
    }
}

macro_rules! binary_operator {
    ($($trait:ident::$method:ident => $kind:ident),* $(,)?) => {
        $(
            impl ops::$trait<&GenericValue> for &GenericValue {
                type Output = Result<GenericValue, VarError>;

                fn $method(self, rhs: &GenericValue) -> Self::Output {
                    self.apply(OperatorKind::$kind, rhs)
                }
            }

            impl ops::$trait for GenericValue {
                type Output = Result<GenericValue, VarError>;

                fn $method(self, rhs: GenericValue) -> Self::Output {
                    self.apply(OperatorKind::$kind, &rhs)
                }
            }
        )*
    };
}

binary_operator! {
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Mod,
    BitAnd::bitand => BitAnd,
    BitOr::bitor => BitOr,
    BitXor::bitxor => BitXor,
}

impl fmt::Display for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cell.format(f)
    }
}

impl fmt::Debug for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenericValue({:?})", self.cell)
    }
}

use std::{any::Any, fmt, mem};

use crate::runtime::{
    erasable::Erasable,
    error::VarError,
    generic_value::GenericValue,
    scalar::{Primitive, Scalar},
    stats,
    text_source::TextSource,
    type_id::{PrimitiveKind, RuntimeTypeId},
};

/// Object-safe view over an [`Erasable`] payload held behind a box.
trait ErasedPayload: Send + Sync {
    fn format(&self, sink: &mut dyn fmt::Write) -> fmt::Result;
    fn parse(&mut self, source: &mut TextSource<'_>) -> Result<(), VarError>;
    fn truthiness(&self) -> bool;
    fn byte_size(&self) -> usize;
    fn runtime_type_id(&self) -> RuntimeTypeId;
    fn extent(&self) -> Option<usize>;
    fn clone_boxed(&self) -> Box<dyn ErasedPayload>;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Erasable> ErasedPayload for T {
    fn format(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
        Erasable::format(self, sink)
    }

    fn parse(&mut self, source: &mut TextSource<'_>) -> Result<(), VarError> {
        Erasable::parse(self, source)
    }

    fn truthiness(&self) -> bool {
        Erasable::truthiness(self)
    }

    fn byte_size(&self) -> usize {
        mem::size_of::<T>()
    }

    fn runtime_type_id(&self) -> RuntimeTypeId {
        RuntimeTypeId::of::<T>()
    }

    fn extent(&self) -> Option<usize> {
        T::EXTENT
    }

    fn clone_boxed(&self) -> Box<dyn ErasedPayload> {
        Box::new(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

enum Slot {
    Inline(Scalar),
    RefBox(Box<Scalar>),
    Boxed(Box<dyn ErasedPayload>),
}

impl Clone for Slot {
    fn clone(&self) -> Self {
        match self {
            Slot::Inline(scalar) => Slot::Inline(*scalar),
            Slot::RefBox(scalar) => Slot::RefBox(Box::new(**scalar)),
            Slot::Boxed(payload) => Slot::Boxed(payload.clone_boxed()),
        }
    }
}

/// How a cell holds its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Primitive copied into the cell.
    Inline,
    /// Primitive wrapped from a reference, kept in its own box.
    RefBox,
    /// Fixed-size array copied as a whole.
    Array { len: usize },
    /// Any other erasable payload.
    Boxed,
}

/// Type-erased owner of exactly one payload.
///
/// Cloning is always deep: two cells never share storage.
pub struct ValueCell {
    slot: Slot,
}

impl ValueCell {
    /// Wraps `value` by copy. Primitives are stored inline, arrays and
    /// user-defined payloads are boxed.
    pub fn new<T: Erasable>(value: T) -> Self {
        let slot = match Scalar::capture(&value) {
            Some(scalar) => Slot::Inline(scalar),
            None => Slot::Boxed(Box::new(value)),
        };
        Self::from_slot(slot)
    }

    /// Wraps a referenced primitive in an owned reference box.
    ///
    /// Fails with [`VarError::UnsupportedReferenceWrap`] for anything that is
    /// not one of the primitive kinds.
    pub fn from_ref<T: Erasable>(value: &T) -> Result<Self, VarError> {
        let scalar = Scalar::capture(value).ok_or(VarError::UnsupportedReferenceWrap {
            type_name: RuntimeTypeId::of::<T>().name(),
        })?;
        Ok(Self::from_slot(Slot::RefBox(Box::new(scalar))))
    }

    pub fn from_scalar(scalar: Scalar) -> Self {
        Self::from_slot(Slot::Inline(scalar))
    }

    /// Zero value of a primitive kind, ready to be filled by [`ValueCell::parse`].
    pub fn default_of(kind: PrimitiveKind) -> Self {
        Self::from_scalar(Scalar::zero(kind))
    }

    fn from_slot(slot: Slot) -> Self {
        stats::record_cell_created();
        Self { slot }
    }

    pub fn format(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
        match &self.slot {
            Slot::Inline(scalar) => scalar.format(sink),
            Slot::RefBox(scalar) => scalar.format(sink),
            Slot::Boxed(payload) => payload.format(sink),
        }
    }

    pub fn parse(&mut self, source: &mut TextSource<'_>) -> Result<(), VarError> {
        match &mut self.slot {
            Slot::Inline(scalar) => scalar.parse(source),
            Slot::RefBox(scalar) => scalar.parse(source),
            Slot::Boxed(payload) => payload.parse(source),
        }
    }

    pub fn byte_size(&self) -> usize {
        match &self.slot {
            Slot::Inline(scalar) => scalar.byte_size(),
            Slot::RefBox(scalar) => scalar.byte_size(),
            Slot::Boxed(payload) => payload.byte_size(),
        }
    }

    pub fn runtime_type_id(&self) -> RuntimeTypeId {
        match &self.slot {
            Slot::Inline(scalar) => scalar.kind().type_id(),
            Slot::RefBox(scalar) => scalar.kind().type_id(),
            Slot::Boxed(payload) => payload.runtime_type_id(),
        }
    }

    /// Implementation-defined name; not stable across builds or platforms.
    pub fn runtime_type_name(&self) -> &'static str {
        self.runtime_type_id().name()
    }

    pub fn truthiness(&self) -> bool {
        match &self.slot {
            Slot::Inline(scalar) => scalar.truthiness(),
            Slot::RefBox(scalar) => scalar.truthiness(),
            Slot::Boxed(payload) => payload.truthiness(),
        }
    }

    pub fn storage(&self) -> StorageKind {
        match &self.slot {
            Slot::Inline(_) => StorageKind::Inline,
            Slot::RefBox(_) => StorageKind::RefBox,
            Slot::Boxed(payload) => match payload.extent() {
                Some(len) => StorageKind::Array { len },
                None => StorageKind::Boxed,
            },
        }
    }

    /// The payload as a scalar, when it is a primitive.
    pub fn scalar(&self) -> Option<Scalar> {
        match &self.slot {
            Slot::Inline(scalar) => Some(*scalar),
            Slot::RefBox(scalar) => Some(**scalar),
            Slot::Boxed(_) => None,
        }
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match &self.slot {
            Slot::Inline(scalar) => scalar.as_any().downcast_ref(),
            Slot::RefBox(scalar) => scalar.as_any().downcast_ref(),
            Slot::Boxed(payload) => payload.as_any().downcast_ref(),
        }
    }

    pub fn primitive<T: Primitive>(&self) -> Option<T> {
        self.downcast_ref::<T>().copied()
    }
}

impl Clone for ValueCell {
    fn clone(&self) -> Self {
        stats::record_cell_cloned();
        Self {
            slot: self.slot.clone(),
        }
    }

    /// Releases the current payload before copying `source`'s, so the two
    /// payloads are never held at once.
    fn clone_from(&mut self, source: &Self) {
        self.slot = Slot::Inline(Scalar::Bool(false));
        stats::record_cell_released();
        self.slot = source.slot.clone();
        stats::record_cell_cloned();
    }
}

impl Drop for ValueCell {
    fn drop(&mut self) {
        stats::record_cell_released();
    }
}

impl TryFrom<&GenericValue> for ValueCell {
    type Error = VarError;

    /// Generic values are handles, never payloads.
    fn try_from(_value: &GenericValue) -> Result<Self, Self::Error> {
        Err(VarError::RecursiveAbstraction)
    }
}

impl fmt::Display for ValueCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format(f)
    }
}

impl fmt::Debug for ValueCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueCell({}: ", self.runtime_type_id().label())?;
        self.format(f)?;
        f.write_str(")")
    }
}

use std::{
    any::{TypeId, type_name},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use half::f16;
use serde::Serialize;

/// Run-time identity of a concrete payload type.
///
/// Equality, ordering and hashing only look at the underlying [`TypeId`];
/// the attached name is informational and may differ between builds.
#[derive(Clone, Copy)]
pub struct RuntimeTypeId {
    id: TypeId,
    name: &'static str,
}

impl RuntimeTypeId {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Implementation-defined type name, e.g. `i32` or `[u8; 4]`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Short label: the primitive label when this id names a primitive kind,
    /// otherwise the full type name.
    pub fn label(&self) -> &'static str {
        PrimitiveKind::from_type_id(*self)
            .map(PrimitiveKind::label)
            .unwrap_or(self.name)
    }
}

impl PartialEq for RuntimeTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RuntimeTypeId {}

impl Hash for RuntimeTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for RuntimeTypeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RuntimeTypeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for RuntimeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuntimeTypeId({})", self.name)
    }
}

impl fmt::Display for RuntimeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The closed set of primitive kinds the dispatch bootstrap knows about.
///
/// `I8`/`U8` play the narrow character role, `Char` is the wide character
/// kind. Declaration order is the bootstrap and reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Bool,
    I8,
    U8,
    Char,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F16,
    F32,
    F64,
}

impl PrimitiveKind {
    pub const COUNT: usize = 13;

    pub const ALL: [PrimitiveKind; Self::COUNT] = [
        PrimitiveKind::Bool,
        PrimitiveKind::I8,
        PrimitiveKind::U8,
        PrimitiveKind::Char,
        PrimitiveKind::I16,
        PrimitiveKind::U16,
        PrimitiveKind::I32,
        PrimitiveKind::U32,
        PrimitiveKind::I64,
        PrimitiveKind::U64,
        PrimitiveKind::F16,
        PrimitiveKind::F32,
        PrimitiveKind::F64,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::Char => "char",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::F16 => "f16",
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::F64 => "f64",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    pub fn type_id(self) -> RuntimeTypeId {
        match self {
            PrimitiveKind::Bool => RuntimeTypeId::of::<bool>(),
            PrimitiveKind::I8 => RuntimeTypeId::of::<i8>(),
            PrimitiveKind::U8 => RuntimeTypeId::of::<u8>(),
            PrimitiveKind::Char => RuntimeTypeId::of::<char>(),
            PrimitiveKind::I16 => RuntimeTypeId::of::<i16>(),
            PrimitiveKind::U16 => RuntimeTypeId::of::<u16>(),
            PrimitiveKind::I32 => RuntimeTypeId::of::<i32>(),
            PrimitiveKind::U32 => RuntimeTypeId::of::<u32>(),
            PrimitiveKind::I64 => RuntimeTypeId::of::<i64>(),
            PrimitiveKind::U64 => RuntimeTypeId::of::<u64>(),
            PrimitiveKind::F16 => RuntimeTypeId::of::<f16>(),
            PrimitiveKind::F32 => RuntimeTypeId::of::<f32>(),
            PrimitiveKind::F64 => RuntimeTypeId::of::<f64>(),
        }
    }

    pub fn from_type_id(id: RuntimeTypeId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_id() == id)
    }

    pub fn byte_size(self) -> usize {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::I8 | PrimitiveKind::U8 => 1,
            PrimitiveKind::I16 | PrimitiveKind::U16 | PrimitiveKind::F16 => 2,
            PrimitiveKind::Char | PrimitiveKind::I32 | PrimitiveKind::U32 | PrimitiveKind::F32 => 4,
            PrimitiveKind::I64 | PrimitiveKind::U64 | PrimitiveKind::F64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(
            self,
            PrimitiveKind::F16 | PrimitiveKind::F32 | PrimitiveKind::F64
        )
    }

    /// Bool and the character kinds count as integral, as in C.
    pub fn is_integral(self) -> bool {
        !self.is_float()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

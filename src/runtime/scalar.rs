use std::{any::Any, fmt};

use half::f16;

use crate::runtime::{
    erasable::Erasable, error::VarError, text_source::TextSource, type_id::PrimitiveKind,
};

/// Inline storage for one value of a primitive kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Bool(bool),
    I8(i8),
    U8(u8),
    Char(char),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F16(f16),
    F32(f32),
    F64(f64),
}

mod sealed {
    pub trait Sealed {}
}

/// A type from the closed primitive set.
pub trait Primitive: Erasable + sealed::Sealed {
    const KIND: PrimitiveKind;

    fn into_scalar(self) -> Scalar;
}

macro_rules! scalar_kinds {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        impl Scalar {
            pub fn kind(&self) -> PrimitiveKind {
                match self {
                    $(Scalar::$variant(_) => PrimitiveKind::$variant,)*
                }
            }

            /// Captures `value` as a scalar when `T` is one of the primitive kinds.
            pub fn capture<T: 'static>(value: &T) -> Option<Scalar> {
                let any = value as &dyn Any;
                $(
                    if let Some(v) = any.downcast_ref::<$ty>() {
                        return Some(Scalar::$variant(*v));
                    }
                )*
                None
            }

            pub fn zero(kind: PrimitiveKind) -> Scalar {
                match kind {
                    $(PrimitiveKind::$variant => Scalar::$variant(<$ty>::default()),)*
                }
            }

            pub fn as_any(&self) -> &dyn Any {
                match self {
                    $(Scalar::$variant(v) => v as &dyn Any,)*
                }
            }

            pub fn format(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
                match self {
                    $(Scalar::$variant(v) => v.format(sink),)*
                }
            }

            pub fn parse(&mut self, source: &mut TextSource<'_>) -> Result<(), VarError> {
                match self {
                    $(Scalar::$variant(v) => v.parse(source),)*
                }
            }

            pub fn truthiness(&self) -> bool {
                match self {
                    $(Scalar::$variant(v) => v.truthiness(),)*
                }
            }
        }

        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const KIND: PrimitiveKind = PrimitiveKind::$variant;

                fn into_scalar(self) -> Scalar {
                    Scalar::$variant(self)
                }
            }
        )*
    };
}

scalar_kinds! {
    Bool(bool),
    I8(i8),
    U8(u8),
    Char(char),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F16(f16),
    F32(f32),
    F64(f64),
}

impl Scalar {
    pub fn byte_size(&self) -> usize {
        self.kind().byte_size()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format(f)
    }
}

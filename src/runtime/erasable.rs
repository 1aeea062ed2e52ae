use std::{fmt, str::FromStr};

use bytemuck::NoUninit;
use half::f16;

use crate::runtime::{error::VarError, text_source::TextSource, type_id::RuntimeTypeId};

/// Capabilities a payload must provide to live inside a value cell.
///
/// Implemented for the primitive kinds and for fixed-size arrays of any
/// erasable element. User-defined aggregates opt in by implementing
/// `format` and `parse`; `truthiness` falls back to an OR-reduction over
/// the payload's raw bytes unless the type has its own boolean meaning.
pub trait Erasable: Copy + NoUninit + Send + Sync + 'static {
    /// Element count when the payload is a fixed-size array.
    const EXTENT: Option<usize> = None;

    fn format(&self, sink: &mut dyn fmt::Write) -> fmt::Result;

    /// Reads the payload back from `source`. On failure `self` is unchanged.
    fn parse(&mut self, source: &mut TextSource<'_>) -> Result<(), VarError>;

    fn truthiness(&self) -> bool {
        raw_truthiness(self)
    }
}

/// True iff any byte of `value`'s storage is nonzero.
pub fn raw_truthiness<T: NoUninit>(value: &T) -> bool {
    bytemuck::bytes_of(value)
        .iter()
        .fold(0u8, |acc, byte| acc | byte)
        != 0
}

/// Reads one token from `source` and parses it with `T`'s `FromStr`.
pub fn parse_token<T>(source: &mut TextSource<'_>) -> Result<T, VarError>
where
    T: FromStr + 'static,
{
    let type_name = RuntimeTypeId::of::<T>().label();
    let token = source
        .next_token()
        .ok_or(VarError::UnexpectedEndOfInput { type_name })?;
    token.parse().map_err(|_| VarError::Parse {
        type_name,
        token: token.to_string(),
    })
}

macro_rules! erasable_primitive {
    ($($ty:ty => |$v:ident| $truthy:expr),* $(,)?) => {
        $(
            impl Erasable for $ty {
                fn format(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
                    write!(sink, "{}", self)
                }

                fn parse(&mut self, source: &mut TextSource<'_>) -> Result<(), VarError> {
                    *self = parse_token::<$ty>(source)?;
                    Ok(())
                }

                fn truthiness(&self) -> bool {
                    let $v = *self;
                    $truthy
                }
            }
        )*
    };
}

erasable_primitive! {
    bool => |v| v,
    i8 => |v| v != 0,
    u8 => |v| v != 0,
    char => |v| v != '\0',
    i16 => |v| v != 0,
    u16 => |v| v != 0,
    i32 => |v| v != 0,
    u32 => |v| v != 0,
    i64 => |v| v != 0,
    u64 => |v| v != 0,
    f16 => |v| v != f16::ZERO,
    f32 => |v| v != 0.0,
    f64 => |v| v != 0.0,
}

// Arrays have no boolean meaning of their own, so they keep the raw-byte default.
impl<T: Erasable, const N: usize> Erasable for [T; N]
where
    [T; N]: NoUninit,
{
    const EXTENT: Option<usize> = Some(N);

    fn format(&self, sink: &mut dyn fmt::Write) -> fmt::Result {
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                sink.write_char(' ')?;
            }
            item.format(sink)?;
        }
        Ok(())
    }

    fn parse(&mut self, source: &mut TextSource<'_>) -> Result<(), VarError> {
        let mut staged = *self;
        for item in staged.iter_mut() {
            item.parse(source)?;
        }
        *self = staged;
        Ok(())
    }
}

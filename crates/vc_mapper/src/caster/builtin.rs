use alloc::string::{String, ToString};
use core::any::type_name;

use vc_plain::{Plain, PlainKind};

use crate::caster::Cast;
use crate::error::CastError;

#[cold]
fn unexpected(expected: PlainKind, plain: &Plain) -> CastError {
    CastError::UnexpectedPlain {
        expected,
        found: plain.kind(),
    }
}

// -----------------------------------------------------------------------------
// bool

impl Cast for bool {
    const KIND: PlainKind = PlainKind::Bool;

    #[inline]
    fn to_plain(&self) -> Result<Plain, CastError> {
        Ok(Plain::Bool(*self))
    }

    fn from_plain(plain: &Plain) -> Result<Self, CastError> {
        plain.as_bool().ok_or_else(|| unexpected(Self::KIND, plain))
    }
}

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_cast_int {
    ($($ty:ty),*) => {
        $(
            impl Cast for $ty {
                const KIND: PlainKind = PlainKind::Int;

                fn to_plain(&self) -> Result<Plain, CastError> {
                    i64::try_from(*self)
                        .map(Plain::Int)
                        .map_err(|_| CastError::OutOfRange {
                            value: self.to_string(),
                            target: "i64",
                        })
                }

                fn from_plain(plain: &Plain) -> Result<Self, CastError> {
                    let value = plain.as_i64().ok_or_else(|| unexpected(Self::KIND, plain))?;
                    <$ty>::try_from(value).map_err(|_| CastError::OutOfRange {
                        value: value.to_string(),
                        target: type_name::<$ty>(),
                    })
                }
            }
        )*
    };
}

impl_cast_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// -----------------------------------------------------------------------------
// Floats

// Only `Float` is accepted inside unions; outside them integers widen.
macro_rules! impl_cast_float {
    ($($ty:ty),*) => {
        $(
            impl Cast for $ty {
                const KIND: PlainKind = PlainKind::Float;

                #[inline]
                fn to_plain(&self) -> Result<Plain, CastError> {
                    Ok(Plain::Float(f64::from(*self)))
                }

                fn from_plain(plain: &Plain) -> Result<Self, CastError> {
                    plain
                        .as_f64()
                        .map(|v| v as $ty)
                        .ok_or_else(|| unexpected(Self::KIND, plain))
                }
            }
        )*
    };
}

impl_cast_float!(f32, f64);

// -----------------------------------------------------------------------------
// Strings

impl Cast for String {
    const KIND: PlainKind = PlainKind::String;

    #[inline]
    fn to_plain(&self) -> Result<Plain, CastError> {
        Ok(Plain::String(self.clone()))
    }

    fn from_plain(plain: &Plain) -> Result<Self, CastError> {
        plain
            .as_str()
            .map(String::from)
            .ok_or_else(|| unexpected(Self::KIND, plain))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl Cast for char {
    const KIND: PlainKind = PlainKind::String;

    fn accepts(plain: &Plain) -> bool {
        plain.as_str().and_then(single_char).is_some()
    }

    #[inline]
    fn to_plain(&self) -> Result<Plain, CastError> {
        Ok(Plain::String(self.to_string()))
    }

    fn from_plain(plain: &Plain) -> Result<Self, CastError> {
        let s = plain.as_str().ok_or_else(|| unexpected(Self::KIND, plain))?;
        single_char(s).ok_or_else(|| CastError::OutOfRange {
            value: String::from(s),
            target: "char",
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

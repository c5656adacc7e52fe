use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::PlainMap;

// -----------------------------------------------------------------------------
// PlainKind

/// The shape of a [`Plain`] value, without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlainKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
    Map,
}

impl PlainKind {
    /// Returns a lowercase name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            PlainKind::Null => "null",
            PlainKind::Bool => "bool",
            PlainKind::Int => "int",
            PlainKind::Float => "float",
            PlainKind::String => "string",
            PlainKind::List => "list",
            PlainKind::Map => "map",
        }
    }

    /// Returns `true` for `Bool`, `Int`, `Float` and `String`.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            PlainKind::Bool | PlainKind::Int | PlainKind::Float | PlainKind::String
        )
    }
}

impl fmt::Display for PlainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Plain

/// An untyped value as it crosses the system boundary.
///
/// This is the only shape accepted by hydration and produced by serialization:
/// a scalar, an ordered list, or an insertion-ordered string-keyed map.
///
/// # Examples
///
/// ```
/// use vc_plain::{Plain, PlainKind, PlainMap};
///
/// let mut map = PlainMap::new();
/// map.insert("id", 7);
/// map.insert("tags", Plain::List(vec!["a".into(), "b".into()]));
///
/// let plain = Plain::from(map);
/// assert_eq!(plain.kind(), PlainKind::Map);
/// assert_eq!(plain.as_map().unwrap().get("id"), Some(&Plain::Int(7)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Plain {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Plain>),
    Map(PlainMap),
}

impl Plain {
    /// Returns the [`PlainKind`] of this value.
    pub const fn kind(&self) -> PlainKind {
        match self {
            Plain::Null => PlainKind::Null,
            Plain::Bool(_) => PlainKind::Bool,
            Plain::Int(_) => PlainKind::Int,
            Plain::Float(_) => PlainKind::Float,
            Plain::String(_) => PlainKind::String,
            Plain::List(_) => PlainKind::List,
            Plain::Map(_) => PlainKind::Map,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Plain::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Plain::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Plain::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the numeric value, widening integers.
    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Plain::Float(v) => Some(*v),
            Plain::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Plain::String(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Plain]> {
        match self {
            Plain::List(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&PlainMap> {
        match self {
            Plain::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the value and returns the inner map, or gives the value back.
    #[inline]
    pub fn into_map(self) -> Result<PlainMap, Self> {
        match self {
            Plain::Map(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Consumes the value and returns the inner list, or gives the value back.
    #[inline]
    pub fn into_list(self) -> Result<Vec<Plain>, Self> {
        match self {
            Plain::List(v) => Ok(v),
            other => Err(other),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Plain {
                #[inline]
                fn from(value: $ty) -> Self {
                    Plain::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Plain {
    #[inline]
    fn from(value: bool) -> Self {
        Plain::Bool(value)
    }
}

impl From<f32> for Plain {
    #[inline]
    fn from(value: f32) -> Self {
        Plain::Float(f64::from(value))
    }
}

impl From<f64> for Plain {
    #[inline]
    fn from(value: f64) -> Self {
        Plain::Float(value)
    }
}

impl From<&str> for Plain {
    #[inline]
    fn from(value: &str) -> Self {
        Plain::String(String::from(value))
    }
}

impl From<String> for Plain {
    #[inline]
    fn from(value: String) -> Self {
        Plain::String(value)
    }
}

impl From<Vec<Plain>> for Plain {
    #[inline]
    fn from(value: Vec<Plain>) -> Self {
        Plain::List(value)
    }
}

impl From<PlainMap> for Plain {
    #[inline]
    fn from(value: PlainMap) -> Self {
        Plain::Map(value)
    }
}

impl<T: Into<Plain>> From<Option<T>> for Plain {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Plain::Null,
        }
    }
}

impl<T: Into<Plain>> FromIterator<T> for Plain {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Plain::List(iter.into_iter().map(Into::into).collect())
    }
}

// -----------------------------------------------------------------------------
// Tests

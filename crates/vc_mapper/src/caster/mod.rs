//! Two-way conversions between typed scalars and [`Plain`] values.
//!
//! ## Menu
//!
//! - [`Caster`]: type-erased conversion pair used by the engine.
//! - [`Cast`]: typed conversion pair, adapted through [`TypedCaster`].
//! - [`CasterRegistry`]: casters keyed by type or by name.
//! - [`DateTimeCaster`]: temporal caster bound to a format.
//! - [`SerdeCaster`]: any `serde` type through the plain serde bridge.
//!
//! ## Built-in casters
//!
//! - `bool` `char` `String` `f32` `f64`
//! - `i8` `i16` `i32` `i64` `isize`
//! - `u8` `u16` `u32` `u64` `usize`
//! - `DateTime<Utc>` `DateTime<FixedOffset>` `NaiveDateTime` `NaiveDate`
//!
//! ## auto_register
//!
//! With the `auto_register` feature, casters declared through
//! [`submit_caster!`](crate::submit_caster) are collected with the
//! [`inventory`] crate and added by [`CasterRegistry::auto_register`].
//!
//! [`Plain`]: vc_plain::Plain

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod registry;
mod serde;
mod temporal;

#[cfg(feature = "auto_register")]
pub(crate) mod auto_register;

// -----------------------------------------------------------------------------
// Exports

pub use self::serde::SerdeCaster;
pub use registry::CasterRegistry;
pub use temporal::{DateTimeCaster, Temporal};

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;

use vc_plain::{Plain, PlainKind};

use crate::error::CastError;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Caster

/// A pure, two-way conversion between a typed value and its plain form.
///
/// Casters must round-trip: `to_value(&to_plain(v)?)` is equal to `v` for
/// every valid `v`.
pub trait Caster: Send + Sync + 'static {
    /// The plain kind produced by [`to_plain`](Caster::to_plain).
    fn kind(&self) -> PlainKind;

    /// Whether `plain` can be cast, used to pick a union candidate.
    fn accepts(&self, plain: &Plain) -> bool {
        plain.kind() == self.kind()
    }

    fn to_plain(&self, value: &dyn Value) -> Result<Plain, CastError>;

    fn to_value(&self, plain: &Plain) -> Result<Box<dyn Value>, CastError>;
}

// -----------------------------------------------------------------------------
// Cast

/// Typed counterpart of [`Caster`], implemented by scalar types.
///
/// # Examples
///
/// ```
/// use vc_mapper::caster::{Cast, Caster, TypedCaster};
/// use vc_mapper::{CastError, Value};
/// use vc_plain::{Plain, PlainKind};
///
/// #[derive(Debug, PartialEq)]
/// struct Cents(i64);
///
/// impl Cast for Cents {
///     const KIND: PlainKind = PlainKind::Int;
///
///     fn to_plain(&self) -> Result<Plain, CastError> {
///         Ok(Plain::Int(self.0))
///     }
///
///     fn from_plain(plain: &Plain) -> Result<Self, CastError> {
///         plain.as_i64().map(Cents).ok_or(CastError::UnexpectedPlain {
///             expected: PlainKind::Int,
///             found: plain.kind(),
///         })
///     }
/// }
///
/// let caster = TypedCaster::<Cents>::new();
/// assert_eq!(caster.to_plain(&Cents(250)).unwrap(), Plain::Int(250));
///
/// let value = caster.to_value(&Plain::Int(99)).unwrap();
/// assert_eq!(value.take::<Cents>().ok(), Some(Cents(99)));
/// ```
pub trait Cast: Value + Sized {
    const KIND: PlainKind;

    fn accepts(plain: &Plain) -> bool {
        plain.kind() == Self::KIND
    }

    fn to_plain(&self) -> Result<Plain, CastError>;

    fn from_plain(plain: &Plain) -> Result<Self, CastError>;
}

/// Adapts a [`Cast`] type into a [`Caster`].
pub struct TypedCaster<T>(PhantomData<fn() -> T>);

impl<T> TypedCaster<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TypedCaster<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Cast> Caster for TypedCaster<T> {
    #[inline]
    fn kind(&self) -> PlainKind {
        T::KIND
    }

    #[inline]
    fn accepts(&self, plain: &Plain) -> bool {
        T::accepts(plain)
    }

    fn to_plain(&self, value: &dyn Value) -> Result<Plain, CastError> {
        downcast::<T>(value)?.to_plain()
    }

    fn to_value(&self, plain: &Plain) -> Result<Box<dyn Value>, CastError> {
        T::from_plain(plain).map(|v| Box::new(v) as Box<dyn Value>)
    }
}

/// Downcasts the value handed to a caster, reporting the mismatch otherwise.
pub fn downcast<T: Value>(value: &dyn Value) -> Result<&T, CastError> {
    value
        .downcast_ref::<T>()
        .ok_or_else(|| CastError::UnexpectedValue {
            expected: type_name::<T>(),
            found: value.value_type_name(),
        })
}

// -----------------------------------------------------------------------------
// CasterKey

/// Key of a registered caster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasterKey {
    /// Associated with a type.
    Type { id: TypeId, name: &'static str },
    /// Referenced explicitly by members.
    Name(Cow<'static, str>),
}

impl CasterKey {
    #[inline]
    pub fn of<T: Value>() -> Self {
        Self::Type {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[inline]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Name(name.into())
    }
}

impl fmt::Display for CasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CasterKey::Type { name, .. } => write!(f, "type `{name}`"),
            CasterKey::Name(name) => write!(f, "name `{name}`"),
        }
    }
}

// -----------------------------------------------------------------------------
// CasterRef

/// An explicit caster attached to a member.
#[derive(Clone)]
pub enum CasterRef {
    /// Resolved from the engine's registry when the plan is built.
    Named(Cow<'static, str>),
    Instance(Arc<dyn Caster>),
}

impl fmt::Debug for CasterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CasterRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            CasterRef::Instance(caster) => f.debug_tuple("Instance").field(&caster.kind()).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use vc_plain::Plain;

    use super::{Caster, CasterKey, TypedCaster};
    use crate::error::CastError;

    #[test]
    fn typed_caster_rejects_foreign_values() {
        let caster = TypedCaster::<i32>::new();
        let err = caster.to_plain(&String::from("x")).unwrap_err();
        assert_eq!(
            err,
            CastError::UnexpectedValue {
                expected: "i32",
                found: "alloc::string::String",
            }
        );
        assert_eq!(caster.to_plain(&7_i32).unwrap(), Plain::Int(7));
    }

    #[test]
    fn keys_display() {
        assert_eq!(alloc::format!("{}", CasterKey::of::<u8>()), "type `u8`");
        assert_eq!(alloc::format!("{}", CasterKey::named("money")), "name `money`");
    }
}

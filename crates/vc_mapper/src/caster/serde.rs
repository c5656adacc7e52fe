use alloc::boxed::Box;
use core::marker::PhantomData;

use ::serde::Serialize;
use ::serde::de::DeserializeOwned;
use vc_plain::{Plain, PlainKind, from_plain, to_plain};

use crate::caster::{Caster, downcast};
use crate::error::CastError;
use crate::value::Value;

// -----------------------------------------------------------------------------
// SerdeCaster

/// Casts any `serde` type through the plain serde bridge.
///
/// The plain kind cannot be known from the type, so it is given explicitly;
/// union hydration only accepts plain values of that kind which also
/// deserialize.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use vc_mapper::caster::{Caster, SerdeCaster};
/// use vc_plain::{Plain, PlainKind};
///
/// #[derive(Serialize, Deserialize, PartialEq, Debug)]
/// enum Level {
///     Low,
///     High,
/// }
///
/// let caster = SerdeCaster::<Level>::new(PlainKind::String);
/// assert_eq!(caster.to_plain(&Level::High).unwrap(), Plain::from("High"));
/// assert!(caster.accepts(&Plain::from("Low")));
/// assert!(!caster.accepts(&Plain::from("Medium")));
/// ```
pub struct SerdeCaster<T> {
    kind: PlainKind,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeCaster<T> {
    #[inline]
    pub const fn new(kind: PlainKind) -> Self {
        Self {
            kind,
            _marker: PhantomData,
        }
    }
}

impl<T: Value + Serialize + DeserializeOwned> Caster for SerdeCaster<T> {
    #[inline]
    fn kind(&self) -> PlainKind {
        self.kind
    }

    fn accepts(&self, plain: &Plain) -> bool {
        plain.kind() == self.kind && from_plain::<T>(plain.clone()).is_ok()
    }

    fn to_plain(&self, value: &dyn Value) -> Result<Plain, CastError> {
        to_plain(downcast::<T>(value)?).map_err(CastError::custom)
    }

    fn to_value(&self, plain: &Plain) -> Result<Box<dyn Value>, CastError> {
        from_plain::<T>(plain.clone())
            .map(|v| Box::new(v) as Box<dyn Value>)
            .map_err(CastError::custom)
    }
}

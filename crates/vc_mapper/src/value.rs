use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// Value

/// A type-erased typed value.
///
/// Every `'static` type is a `Value`; the trait only exists so the mapper can
/// move objects, scalars and union branches around as `dyn Value` and recover
/// them with [`downcast_ref`](dyn Value::downcast_ref) or
/// [`take`](dyn Value::take).
///
/// Note that `Box<dyn Value>` is itself a `Value`. Call the inherent helpers
/// through `&*boxed` when the inner value is meant.
pub trait Value: Any {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Returns the name of the concrete type, for error messages.
    fn value_type_name(&self) -> &'static str;
}

impl<T: Any> Value for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline]
    fn value_type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

impl dyn Value {
    /// Returns the [`TypeId`] of the concrete type.
    #[inline]
    pub fn value_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Moves the concrete value out, or gives the box back on a type mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_mapper::Value;
    ///
    /// let boxed: Box<dyn Value> = Box::new(7_u32);
    /// let boxed = boxed.take::<String>().unwrap_err();
    /// assert_eq!(boxed.take::<u32>().ok(), Some(7));
    /// ```
    pub fn take<T: Any>(self: Box<Self>) -> Result<T, Box<dyn Value>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type was checked before the downcast"),
        }
    }
}

impl fmt::Debug for dyn Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Value<{}>", self.value_type_name())
    }
}

// -----------------------------------------------------------------------------
// Fetched

/// What a member reader returns while serializing.
pub enum Fetched<'a> {
    /// An absent optional value.
    Null,
    /// A value borrowed from the instance, e.g. a public field.
    Borrowed(&'a dyn Value),
    /// A value produced on the fly, e.g. by an accessor method.
    Owned(Box<dyn Value>),
    List(Vec<Fetched<'a>>),
}

// -----------------------------------------------------------------------------
// Hydrated

/// A member value produced while hydrating, waiting for the constructor.
pub enum Hydrated {
    Null,
    Value(Box<dyn Value>),
    List(Vec<Hydrated>),
}

impl Hydrated {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Hydrated::Null => "null",
            Hydrated::Value(value) => (**value).value_type_name(),
            Hydrated::List(_) => "list",
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

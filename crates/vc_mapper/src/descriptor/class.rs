use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;

use crate::de::Arguments;
use crate::descriptor::MemberDescriptor;
use crate::error::HydrateError;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Internal types

pub(crate) type Constructor =
    Arc<dyn Fn(&mut Arguments) -> Result<Box<dyn Value>, HydrateError> + Send + Sync>;

// -----------------------------------------------------------------------------
// ClassDescriptor

/// Structural metadata of a class: its identity, its members in declared
/// order and, optionally, how to construct it.
///
/// Descriptors are immutable. The engine asks for one through
/// [`Object::describe`] the first time a class is mapped and keeps the
/// resolved plan for its whole lifetime.
///
/// [`Object::describe`]: crate::Object::describe
pub struct ClassDescriptor {
    id: TypeId,
    name: &'static str,
    members: Vec<MemberDescriptor>,
    constructor: Option<Constructor>,
}

impl ClassDescriptor {
    /// Starts a descriptor for `C`.
    #[inline]
    pub fn builder<C: Value>() -> ClassBuilder<C> {
        ClassBuilder {
            members: Vec::new(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    #[inline]
    pub const fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    pub(crate) fn into_parts(self) -> (Vec<MemberDescriptor>, Option<Constructor>) {
        (self.members, self.constructor)
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("members", &self.members)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ClassBuilder

/// Builder returned by [`ClassDescriptor::builder`].
pub struct ClassBuilder<C> {
    members: Vec<MemberDescriptor>,
    _marker: PhantomData<fn() -> C>,
}

impl<C: Value> ClassBuilder<C> {
    /// Appends a member. Declaration order is serialization order.
    pub fn member(mut self, member: impl Into<MemberDescriptor>) -> Self {
        self.members.push(member.into());
        self
    }

    /// Finishes the descriptor with a constructor.
    ///
    /// The constructor receives every writable member at once, so an
    /// instance is never observed half-built.
    pub fn construct<F>(self, f: F) -> ClassDescriptor
    where
        F: Fn(&mut Arguments) -> Result<C, HydrateError> + Send + Sync + 'static,
    {
        let constructor: Constructor = Arc::new(move |args: &mut Arguments| {
            f(args).map(|value| Box::new(value) as Box<dyn Value>)
        });
        self.finish(Some(constructor))
    }

    /// Finishes a serialize-only descriptor.
    pub fn build(self) -> ClassDescriptor {
        self.finish(None)
    }

    fn finish(self, constructor: Option<Constructor>) -> ClassDescriptor {
        ClassDescriptor {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
            members: self.members,
            constructor,
        }
    }
}

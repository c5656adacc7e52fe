use core::any::{TypeId, type_name};
use core::fmt;

use crate::descriptor::{ClassDescriptor, Object};
use crate::value::Value;

// -----------------------------------------------------------------------------
// TypeKind

/// How a candidate type is mapped.
#[derive(Clone, Copy)]
pub enum TypeKind {
    /// Mapped by a caster.
    Scalar,
    /// Mapped member by member; the descriptor is produced on first use.
    Class(fn() -> ClassDescriptor),
}

// -----------------------------------------------------------------------------
// TypeRef

/// A reference to a candidate type of a member.
///
/// Classes carry a function pointer to their descriptor instead of the
/// descriptor itself, so recursive types can refer to each other.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_mapper::TypeRef;
///
/// let ty = TypeRef::scalar::<i32>();
/// assert_eq!(ty.id(), TypeId::of::<i32>());
/// assert_eq!(ty.name(), "i32");
/// assert!(!ty.is_class());
/// ```
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
}

impl TypeRef {
    #[inline]
    pub fn scalar<T: Value>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind: TypeKind::Scalar,
        }
    }

    #[inline]
    pub fn class<T: Object>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind: TypeKind::Class(T::describe),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub const fn is_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class(_))
    }
}

impl PartialEq for TypeRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_class() { "class" } else { "scalar" };
        write!(f, "{kind} `{}`", self.name)
    }
}

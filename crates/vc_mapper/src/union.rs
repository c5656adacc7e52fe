//! Members typed as one of several candidates.
//!
//! Candidates are declared in order and that order is a contract:
//!
//! - When serializing, the candidate whose type is exactly the runtime type
//!   of the value is used.
//! - When hydrating, candidates are tried in declared order and the first
//!   one accepting the plain value wins. A class accepts a map whose keys
//!   all belong to members of that class and which holds every required
//!   key; keys of read-only members are ignored. A scalar accepts what its
//!   caster [`accepts`](crate::caster::Caster::accepts).
//!
//! Rust unions are enums with one single-field variant per candidate; see
//! [`impl_union!`](crate::impl_union).

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use vc_plain::{Plain, PlainMap};

use crate::descriptor::{Access, TypeRef};
use crate::engine::{Branch, ClassPlan, MappingEngine, MemberPlan};
use crate::error::DescriptorError;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Union

/// An enum whose variants are the candidates of a union member.
///
/// Usually implemented with [`impl_union!`](crate::impl_union).
pub trait Union: Value + Sized {
    /// Candidate types in trial order.
    fn candidates() -> Vec<TypeRef>;

    /// The value held by the active variant.
    fn branch(&self) -> &dyn Value;

    /// Wraps a hydrated candidate, or gives it back if no variant holds
    /// its type.
    fn from_branch(value: Box<dyn Value>) -> Result<Self, Box<dyn Value>>;
}

/// Implements [`Union`] for an enum of single-field variants.
///
/// Each variant names the kind of its candidate: `class` for types
/// implementing [`Object`](crate::Object), `scalar` for types mapped by a
/// caster. Variants are tried in the order written.
///
/// # Examples
///
/// ```
/// use vc_mapper::{TypeRef, Union, impl_union};
///
/// #[derive(Debug, PartialEq)]
/// enum Id {
///     Number(i64),
///     Text(String),
/// }
///
/// impl_union!(Id {
///     Number(i64) => scalar,
///     Text(String) => scalar,
/// });
///
/// assert_eq!(Id::candidates(), [TypeRef::scalar::<i64>(), TypeRef::scalar::<String>()]);
///
/// let id = Id::from_branch(Box::new(String::from("a1"))).unwrap();
/// assert_eq!(id, Id::Text(String::from("a1")));
/// assert!(Id::from_branch(Box::new(1.5_f64)).is_err());
/// ```
#[macro_export]
macro_rules! impl_union {
    (@type_ref class $inner:ty) => {
        $crate::TypeRef::class::<$inner>()
    };
    (@type_ref scalar $inner:ty) => {
        $crate::TypeRef::scalar::<$inner>()
    };
    ($ty:ty { $($variant:ident($inner:ty) => $kind:ident),+ $(,)? }) => {
        impl $crate::Union for $ty {
            fn candidates() -> $crate::__macro_exports::Vec<$crate::TypeRef> {
                $crate::__macro_exports::vec![
                    $($crate::impl_union!(@type_ref $kind $inner)),+
                ]
            }

            fn branch(&self) -> &dyn $crate::Value {
                match self {
                    $(Self::$variant(inner) => inner,)+
                }
            }

            fn from_branch(
                value: $crate::__macro_exports::Box<dyn $crate::Value>,
            ) -> ::core::result::Result<Self, $crate::__macro_exports::Box<dyn $crate::Value>> {
                $(
                    let value = match value.take::<$inner>() {
                        ::core::result::Result::Ok(inner) => {
                            return ::core::result::Result::Ok(Self::$variant(inner));
                        }
                        ::core::result::Result::Err(value) => value,
                    };
                )+
                ::core::result::Result::Err(value)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// UnionResolver

/// Picks the candidate of a union member for a value or a plain value.
///
/// The resolver only selects branches; walking the chosen branch is left to
/// the serializer and the hydrator.
pub struct UnionResolver<'e> {
    engine: &'e MappingEngine,
}

impl<'e> UnionResolver<'e> {
    #[inline]
    pub const fn new(engine: &'e MappingEngine) -> Self {
        Self { engine }
    }

    /// The branch whose type is exactly the type of `value`.
    pub fn branch_for_value<'p>(
        &self,
        member: &'p MemberPlan,
        value: &dyn Value,
    ) -> Option<&'p Branch> {
        let id = value.value_type_id();
        member.branches().iter().find(|branch| branch.type_ref().id() == id)
    }

    /// The first branch, in declared order, accepting `plain`.
    ///
    /// Fails only if the plan of a class candidate cannot be built.
    pub fn branch_for_plain<'p>(
        &self,
        member: &'p MemberPlan,
        plain: &Plain,
    ) -> Result<Option<&'p Branch>, DescriptorError> {
        for branch in member.branches() {
            let accepted = match branch {
                Branch::Scalar { caster, .. } => caster.accepts(plain),
                Branch::Class(ty) => match plain {
                    Plain::Map(map) => map_fits(&*self.engine.plan(ty)?, map),
                    _ => false,
                },
            };
            if accepted {
                return Ok(Some(branch));
            }
            log::trace!(
                "union candidate `{}` of `{}` rejected a {} value",
                branch.type_ref().name(),
                member.descriptor().name(),
                plain.kind(),
            );
        }
        Ok(None)
    }
}

/// Whether `map` can construct an instance of the class planned by `plan`.
fn map_fits(plan: &ClassPlan, map: &PlainMap) -> bool {
    if !plan.is_constructible() {
        return false;
    }
    // Keys of read-only members are emitted by the serializer and ignored here.
    let known = map.keys().all(|key| {
        plan.member_by_key(key).is_some_and(|member| {
            let descriptor = member.descriptor();
            descriptor.is_writable() || descriptor.access() != Access::None
        })
    });
    known
        && plan
            .members()
            .iter()
            .filter(|member| member.descriptor().is_required())
            .all(|member| map.contains_key(member.key()))
}

/// Candidate names joined for error messages.
pub(crate) fn candidate_names(member: &MemberPlan) -> String {
    let mut names = String::new();
    for (index, branch) in member.branches().iter().enumerate() {
        if index > 0 {
            names.push_str(", ");
        }
        names.push_str(branch.type_ref().name());
    }
    names
}

// -----------------------------------------------------------------------------
// Tests

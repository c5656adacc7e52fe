#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

// The plan cache needs `RwLock`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod de;
mod engine;
mod error;
mod hash;
mod ser;
mod trail;
mod union;
mod value;

pub mod caster;
pub mod descriptor;
pub mod naming;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use caster::{Caster, CasterKey, CasterRef};
pub use de::{Arguments, ObjectHydrator};
pub use descriptor::{Access, ClassBuilder, ClassDescriptor, Member, MemberDescriptor, Object};
pub use descriptor::{TypeKind, TypeRef};
pub use engine::{Branch, ClassPlan, EngineBuilder, MappingEngine, MemberPlan};
pub use error::{CastError, CasterNotFound, DescriptorError, HydrateError, SerializeError};
pub use naming::{KeyFormatter, SnakeCase, Verbatim};
pub use ser::ObjectSerializer;
pub use union::{Union, UnionResolver};
pub use value::{Fetched, Hydrated, Value};

// -----------------------------------------------------------------------------
// submit_caster

/// Declares a caster added by [`CasterRegistry::auto_register`], and so by
/// [`MappingEngine::new`].
///
/// Either associate the caster with a type or give it a name members can
/// reference with [`Member::caster_named`].
///
/// Without the `auto_register` feature the macro expands to nothing.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vc_mapper::caster::DateTimeCaster;
/// use vc_mapper::{MappingEngine, submit_caster};
///
/// submit_caster!("short_date" => DateTimeCaster::<NaiveDate>::with_format("%d.%m.%y"));
///
/// let engine = MappingEngine::new();
/// assert!(engine.casters().contains_name("short_date"));
/// ```
///
/// [`CasterRegistry::auto_register`]: crate::caster::CasterRegistry::auto_register
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! submit_caster {
    ($name:literal => $caster:expr) => {
        const _: () = {
            fn __register(registry: &mut $crate::caster::CasterRegistry) {
                registry.register_named($name, $caster);
            }

            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::CasterRegistration(__register)
            }
        };
    };
    ($ty:ty => $caster:expr) => {
        const _: () = {
            fn __register(registry: &mut $crate::caster::CasterRegistry) {
                registry.register_type::<$ty>($caster);
            }

            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::CasterRegistration(__register)
            }
        };
    };
}

/// Declares a caster added by `CasterRegistry::auto_register`.
///
/// The `auto_register` feature is disabled, so this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! submit_caster {
    ($($tt:tt)*) => {};
}

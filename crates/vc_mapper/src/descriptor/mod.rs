//! Class descriptors: the static structural metadata the engine consumes.
//!
//! - [`Object`]: implemented by every mapped class, returns its descriptor.
//! - [`ClassDescriptor`]: ordered members plus an optional constructor.
//! - [`Member`]: typed builder producing a [`MemberDescriptor`].
//! - [`TypeRef`]: a candidate type of a member, scalar or class.
//!
//! # Examples
//!
//! ```
//! use vc_mapper::{ClassDescriptor, Member, Object};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Object for Point {
//!     fn describe() -> ClassDescriptor {
//!         ClassDescriptor::builder::<Self>()
//!             .member(Member::scalar::<i32>("x").field(|p: &Self| &p.x))
//!             .member(Member::scalar::<i32>("y").field(|p: &Self| &p.y))
//!             .construct(|args| {
//!                 Ok(Self {
//!                     x: args.take("x")?,
//!                     y: args.take("y")?,
//!                 })
//!             })
//!     }
//! }
//!
//! let descriptor = Point::describe();
//! let names: Vec<_> = descriptor.members().iter().map(|m| m.name()).collect();
//! assert_eq!(names, ["x", "y"]);
//! assert!(descriptor.is_constructible());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod class;
mod member;
mod type_ref;

// -----------------------------------------------------------------------------
// Exports

pub use class::{ClassBuilder, ClassDescriptor};
pub use member::{Access, Member, MemberDescriptor};
pub use type_ref::{TypeKind, TypeRef};

pub(crate) use class::Constructor;
pub(crate) use member::UnionAdapter;

use crate::value::Value;

// -----------------------------------------------------------------------------
// Object

/// A class the engine can map member by member.
///
/// The descriptor is requested once per engine and cached, so `describe`
/// may allocate freely.
pub trait Object: Value + Sized {
    fn describe() -> ClassDescriptor;
}

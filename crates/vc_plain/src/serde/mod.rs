//! Bridge between [`Plain`] and `serde`.
//!
//! - [`Plain`] and [`PlainMap`] implement `Serialize` and `Deserialize`.
//!   Deserializing a map keeps the order in which the format yields keys.
//! - [`to_plain`] turns any `T: Serialize` into a [`Plain`].
//! - [`from_plain`] rebuilds any `T: DeserializeOwned` from a [`Plain`].
//!
//! Enums follow the externally tagged layout: unit variants become strings,
//! other variants become a single-key map.
//!
//! # Examples
//!
//! ```
//! use vc_plain::{from_plain, to_plain, Plain};
//!
//! #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
//! enum Status {
//!     Active,
//!     Banned { reason: String },
//! }
//!
//! let plain = to_plain(&Status::Active).unwrap();
//! assert_eq!(plain, Plain::from("Active"));
//!
//! let banned = Status::Banned { reason: "spam".into() };
//! let plain = to_plain(&banned).unwrap();
//! assert_eq!(from_plain::<Status>(plain).unwrap(), banned);
//! ```
//!
//! [`Plain`]: crate::Plain
//! [`PlainMap`]: crate::PlainMap

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use de::from_plain;
pub use ser::{PlainSerializer, to_plain};

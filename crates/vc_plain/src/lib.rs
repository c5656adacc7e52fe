#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod map;
mod value;

pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::PlainError;
pub use map::PlainMap;
pub use self::serde::{from_plain, to_plain};
pub use value::{Plain, PlainKind};

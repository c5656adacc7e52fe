use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

use crate::PlainKind;

// -----------------------------------------------------------------------------
// Error

/// Error produced while converting serde data to or from [`Plain`](crate::Plain).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlainError {
    #[error("{0}")]
    Custom(String),

    #[error("integer {0} does not fit into a plain integer")]
    IntegerOutOfRange(u64),

    #[error("map keys must be strings, found {0}")]
    KeyMustBeString(PlainKind),
}

impl serde::ser::Error for PlainError {
    #[cold]
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

impl serde::de::Error for PlainError {
    #[cold]
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;
use vc_plain::PlainKind;

use crate::caster::CasterKey;

// -----------------------------------------------------------------------------
// CastError

/// Error raised inside a caster.
///
/// It is carried unchanged as the `source` of [`SerializeError::Cast`] and
/// [`HydrateError::Cast`].
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CastError {
    #[error("expected a {expected} plain value, found {found}")]
    UnexpectedPlain { expected: PlainKind, found: PlainKind },

    #[error("caster for `{expected}` received a value of type `{found}`")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value} is out of range for `{target}`")]
    OutOfRange { value: String, target: &'static str },

    #[error("`{input}` does not match the format `{format}`: {reason}")]
    Format {
        input: String,
        format: String,
        reason: String,
    },

    #[error("{0}")]
    Custom(String),
}

impl CastError {
    #[cold]
    pub fn custom(msg: impl Display) -> Self {
        Self::Custom(msg.to_string())
    }
}

// -----------------------------------------------------------------------------
// CasterNotFound

#[derive(Debug, Error, Clone, PartialEq)]
#[error("no caster registered for {0}")]
pub struct CasterNotFound(pub CasterKey);

// -----------------------------------------------------------------------------
// DescriptorError

/// A class descriptor that cannot be turned into a mapping plan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DescriptorError {
    #[error("member `{member}` of `{class}` has type `{ty}`, which has no caster and is not a class")]
    UnresolvableCaster {
        class: &'static str,
        member: &'static str,
        ty: &'static str,
    },

    #[error("member `{member}` of `{class}` names the caster `{name}`, which is not registered")]
    UnknownNamedCaster {
        class: &'static str,
        member: &'static str,
        name: String,
    },

    #[error("key `{key}` is used by more than one member of `{class}`")]
    DuplicateKey { class: &'static str, key: String },

    #[error("member name `{name}` is declared more than once in `{class}`")]
    DuplicateName {
        class: &'static str,
        name: &'static str,
    },

    #[error("`{ty}` is not a class")]
    NotAClass { ty: &'static str },
}

// -----------------------------------------------------------------------------
// SerializeError

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SerializeError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("value of type `{found}` at {path} is none of the union candidates [{candidates}]")]
    UnionMismatch {
        path: String,
        found: &'static str,
        candidates: String,
    },

    #[error("failed to cast the value at {path}: {source}")]
    Cast { path: String, source: CastError },

    #[error("expected an instance of `{expected}` at {path}, found `{found}`")]
    InstanceMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("list member at {path} did not yield a list")]
    NotAList { path: String },

    #[error("member at {path} yielded a list but is not a list member")]
    UnexpectedList { path: String },
}

// -----------------------------------------------------------------------------
// HydrateError

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum HydrateError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("missing key `{key}` at {path}")]
    MissingKey { path: String, key: String },

    #[error("{found} value at {path} is accepted by none of the union candidates [{candidates}]")]
    UnionMismatch {
        path: String,
        found: PlainKind,
        candidates: String,
    },

    #[error("failed to cast the value at {path}: {source}")]
    Cast { path: String, source: CastError },

    #[error("expected a {expected} at {path}, found {found}")]
    UnexpectedPlain {
        path: String,
        expected: PlainKind,
        found: PlainKind,
    },

    #[error("`{class}` has no constructor")]
    NotConstructible { class: &'static str },

    #[error("constructor of `{class}` asked for `{name}`, which was not provided")]
    MissingArgument {
        class: &'static str,
        name: &'static str,
    },

    #[error("constructor of `{class}` asked for `{name}` as `{expected}`, found `{found}`")]
    ArgumentType {
        class: &'static str,
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("constructor of `{class}` failed: {message}")]
    Construction { class: &'static str, message: String },

    #[error("descriptor of `{expected}` constructed a `{found}`")]
    InstanceMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

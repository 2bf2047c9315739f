use core::{error, fmt};

use crate::payload::Payload;

// -----------------------------------------------------------------------------
// PayloadKind

/// The shape of a payload node.
///
/// Used in errors to describe what a reader expected against what it found.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl PayloadKind {
    /// Returns the kind of the given payload node.
    pub fn of(payload: &Payload) -> Self {
        match payload {
            Payload::Null => Self::Null,
            Payload::Bool(_) => Self::Bool,
            Payload::Number(_) => Self::Number,
            Payload::String(_) => Self::String,
            Payload::Array(_) => Self::Array,
            Payload::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// ReadError

/// An enumeration of all error outcomes that might happen when running
/// [`Serializable::read`](crate::Serializable::read).
///
/// Payload-shape mismatches are recoverable errors, never panics: malformed
/// input data must not take down the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The payload node has a different shape than the target type expects.
    KindMismatch {
        expected: PayloadKind,
        found: PayloadKind,
    },
    /// A numeric payload does not fit into the target integer type.
    NumberOutOfRange { target: &'static str },
    /// A `char` was read from a string that is not exactly one character.
    InvalidChar,
    /// An envelope or registry lookup named a type that is not registered.
    UnknownType { type_name: String },
    /// An enum payload carried a variant name the type does not declare.
    UnknownVariant {
        type_name: &'static str,
        variant: String,
    },
    /// An envelope object is missing its `$typeName` entry.
    MissingTypeName,
    /// An envelope object is missing its `$context` entry.
    MissingContext,
    /// A reconstructed instance has a different type than the target slot.
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
}

impl ReadError {
    /// Shorthand for the most common failure.
    #[inline]
    pub fn kind_mismatch(expected: PayloadKind, payload: &Payload) -> Self {
        Self::KindMismatch {
            expected,
            found: PayloadKind::of(payload),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KindMismatch { expected, found } => {
                write!(f, "expected a {expected} payload, found {found}")
            }
            Self::NumberOutOfRange { target } => {
                write!(f, "number payload does not fit into `{target}`")
            }
            Self::InvalidChar => write!(f, "expected a single-character string payload"),
            Self::UnknownType { type_name } => {
                write!(f, "type `{type_name}` is not registered")
            }
            Self::UnknownVariant { type_name, variant } => {
                write!(f, "`{type_name}` has no variant named `{variant}`")
            }
            Self::MissingTypeName => write!(f, "envelope is missing its `$typeName` entry"),
            Self::MissingContext => write!(f, "envelope is missing its `$context` entry"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected an instance of `{expected}`, found `{found}`")
            }
        }
    }
}

impl error::Error for ReadError {}

// -----------------------------------------------------------------------------
// WriteError

/// An enumeration of all error outcomes that might happen when running
/// [`Serializable::write`](crate::Serializable::write).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// A polymorphic handle named a type that is not registered.
    UnknownType { type_name: String },
    /// A registered writer was handed an instance of some other type.
    WrongInstanceType { expected: &'static str },
    /// A float payload cannot represent NaN or infinity.
    NonFiniteNumber,
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType { type_name } => {
                write!(f, "type `{type_name}` is not registered")
            }
            Self::WrongInstanceType { expected } => {
                write!(f, "expected an instance of `{expected}`")
            }
            Self::NonFiniteNumber => write!(f, "non-finite numbers have no payload form"),
        }
    }
}

impl error::Error for WriteError {}

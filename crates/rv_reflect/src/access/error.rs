use core::{error, fmt};

// -----------------------------------------------------------------------------
// AccessError

/// An enumeration of all error outcomes of field and array access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The erased instance is not of the accessor's owning type.
    WrongInstanceType { expected: &'static str },
    /// The erased value is not of the field's type.
    WrongValueType { expected: &'static str },
    /// An ordered-collection index past the end of the collection.
    OutOfBounds { index: usize, len: usize },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongInstanceType { expected } => {
                write!(f, "instance is not of type `{expected}`")
            }
            Self::WrongValueType { expected } => {
                write!(f, "value is not of type `{expected}`")
            }
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds (len {len})")
            }
        }
    }
}

impl error::Error for AccessError {}

// -----------------------------------------------------------------------------
// InvokeError

/// An enumeration of all error outcomes of reflective method invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The erased receiver is not of the method's owning type.
    WrongReceiver { expected: &'static str },
    /// The argument list has the wrong length.
    ArgCount { expected: usize, received: usize },
    /// An argument is not of the declared parameter type.
    ArgType {
        index: usize,
        expected: &'static str,
    },
    /// The boxed return value is not of the requested type.
    ReturnType { expected: &'static str },
    /// Walking a base projection towards the receiver failed.
    Projection(AccessError),
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongReceiver { expected } => {
                write!(f, "receiver is not of type `{expected}`")
            }
            Self::ArgCount { expected, received } => {
                write!(f, "expected {expected} arguments, received {received}")
            }
            Self::ArgType { index, expected } => {
                write!(f, "argument {index} is not of type `{expected}`")
            }
            Self::ReturnType { expected } => {
                write!(f, "return value is not of type `{expected}`")
            }
            Self::Projection(inner) => write!(f, "base projection failed: {inner}"),
        }
    }
}

impl error::Error for InvokeError {}

impl From<AccessError> for InvokeError {
    #[inline]
    fn from(value: AccessError) -> Self {
        Self::Projection(value)
    }
}

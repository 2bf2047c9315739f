//! Generic payload serialization.
//!
//! The interchange format is a JSON-like tree ([`Payload`], an alias for
//! [`serde_json::Value`]): null, bool, number, string, ordered array and
//! string-keyed object. The tree itself is an external data type; this module
//! only defines how reflected values map onto it.
//!
//! [`Serializable`] is the generic `Write`/`Read` contract. Primitive types
//! convert to the matching scalar kind, `Vec<T>` maps onto arrays, and
//! pointer-like types wrap their payload in an envelope carrying a runtime
//! type name so polymorphic values survive the round trip.
//!
//! A type without a `Serializable` implementation does not serialize and the
//! attempt fails to compile; there is deliberately no runtime fallback.

// -----------------------------------------------------------------------------
// Modules

mod envelope;
mod error;
mod pointer;
mod primitives;
mod sequences;

// -----------------------------------------------------------------------------
// Exports

pub use envelope::{CONTEXT_KEY, STATIC_SENTINEL, TYPE_NAME_KEY};
pub use error::{PayloadKind, ReadError, WriteError};

// -----------------------------------------------------------------------------
// Payload

/// The JSON-like interchange tree.
pub type Payload = serde_json::Value;

/// The string-keyed object node of a [`Payload`].
pub type PayloadMap = serde_json::Map<String, Payload>;

// -----------------------------------------------------------------------------
// Serializable

/// Conversion between a value and its [`Payload`] form.
///
/// Implementations come from three places: the primitive and container impls
/// in this module, the impls generated by
/// [`#[derive(Reflected)]`](crate::derive::Reflected), and manual impls for
/// types with a custom payload shape.
///
/// # Reading
///
/// [`read`](Serializable::read) fills an existing value instead of returning
/// a fresh one. Generated struct impls only touch fields whose key is present
/// and non-null, so reading an older payload into a default-constructed value
/// keeps the defaults for everything the payload does not mention.
///
/// # Examples
///
/// ```
/// use rv_reflect::{Payload, Serializable};
///
/// let payload = 42_i32.write().unwrap();
/// assert_eq!(payload, Payload::from(42));
///
/// let mut value = 0_i32;
/// i32::read(&payload, &mut value).unwrap();
/// assert_eq!(value, 42);
/// ```
pub trait Serializable: Sized {
    /// Converts this value into its payload form.
    fn write(&self) -> Result<Payload, WriteError>;

    /// Reads a payload into this value.
    ///
    /// Shape mismatches report a [`ReadError`]; the value may be partially
    /// updated when an error is returned mid-way.
    fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError>;

    /// Reads a payload into a default-constructed value.
    #[inline]
    fn read_new(payload: &Payload) -> Result<Self, ReadError>
    where
        Self: Default,
    {
        let mut value = Self::default();
        Self::read(payload, &mut value)?;
        Ok(value)
    }
}

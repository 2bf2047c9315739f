//! The envelope carrying polymorphic identity through serialization.
//!
//! Pointer-like values do not serialize to their payload directly; they wrap
//! it in an object of the shape
//!
//! ```text
//! { "$typeName": "<name>", "$context": <payload> }
//! ```
//!
//! A name starting with [`STATIC_SENTINEL`] marks concrete, non-polymorphic
//! storage: the reader keeps its statically-known type and never consults the
//! registry. Any other name is a dynamic type name resolved through
//! [`Registry::construct_from_payload`](crate::registry::Registry::construct_from_payload).

use crate::payload::{Payload, PayloadKind, PayloadMap, ReadError};

/// Envelope key holding the runtime type name.
pub const TYPE_NAME_KEY: &str = "$typeName";

/// Envelope key holding the wrapped payload.
pub const CONTEXT_KEY: &str = "$context";

/// Prefix marking a statically-typed, non-polymorphic envelope.
pub const STATIC_SENTINEL: char = '*';

/// Builds an envelope object around `context`.
pub(crate) fn wrap(type_name: &str, context: Payload) -> Payload {
    let mut object = PayloadMap::new();
    object.insert(TYPE_NAME_KEY.to_owned(), Payload::String(type_name.to_owned()));
    object.insert(CONTEXT_KEY.to_owned(), context);
    Payload::Object(object)
}

/// Splits an envelope object into its type name and wrapped payload.
pub(crate) fn unwrap(payload: &Payload) -> Result<(&str, &Payload), ReadError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ReadError::kind_mismatch(PayloadKind::Object, payload))?;
    let type_name = object
        .get(TYPE_NAME_KEY)
        .and_then(Payload::as_str)
        .ok_or(ReadError::MissingTypeName)?;
    let context = object.get(CONTEXT_KEY).ok_or(ReadError::MissingContext)?;
    Ok((type_name, context))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{unwrap, wrap};
    use crate::payload::ReadError;

    #[test]
    fn wrap_then_unwrap() {
        let envelope = wrap("Derived", json!({ "value": 1 }));
        let (name, context) = unwrap(&envelope).unwrap();
        assert_eq!(name, "Derived");
        assert_eq!(context, &json!({ "value": 1 }));
    }

    #[test]
    fn missing_entries_are_reported() {
        assert_eq!(
            unwrap(&json!({ "$context": 1 })),
            Err(ReadError::MissingTypeName)
        );
        assert_eq!(
            unwrap(&json!({ "$typeName": "Point" })),
            Err(ReadError::MissingContext)
        );
    }
}

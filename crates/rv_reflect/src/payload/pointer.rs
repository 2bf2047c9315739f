//! `Serializable` implementations for pointer-like values.
//!
//! Both impls speak the envelope shape. `Box<T>`
//! stores under its static type name behind the sentinel and never consults
//! the registry on the write side; [`PolyPtr`] stores the dynamic name of the
//! contained value and round-trips entirely through the registry.

use core::any::Any;

use crate::info::TypeName;
use crate::payload::{envelope, Payload, ReadError, Serializable, WriteError};
use crate::reflection::PolyPtr;
use crate::registry::Registry;

// -----------------------------------------------------------------------------
// Box

impl<T> Serializable for Box<T>
where
    T: Serializable + TypeName + Default + Any,
{
    fn write(&self) -> Result<Payload, WriteError> {
        let mut name = String::with_capacity(T::type_name().len() + 1);
        name.push(envelope::STATIC_SENTINEL);
        name.push_str(T::type_name());
        Ok(envelope::wrap(&name, (**self).write()?))
    }

    fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
        let (type_name, context) = envelope::unwrap(payload)?;
        match type_name.strip_prefix(envelope::STATIC_SENTINEL) {
            // Concrete, non-polymorphic storage: keep the static type.
            Some(_) => {
                let mut value = T::default();
                T::read(context, &mut value)?;
                **out = value;
            }
            // A dynamic name: reconstruct through the registry, then move
            // into the statically-typed slot.
            None => {
                let instance = Registry::global().construct_from_payload(type_name, context)?;
                let value = instance.take::<T>().map_err(|instance| ReadError::TypeMismatch {
                    expected: T::type_name(),
                    found: instance.type_name().to_owned(),
                })?;
                **out = value;
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// PolyPtr

impl Serializable for PolyPtr {
    fn write(&self) -> Result<Payload, WriteError> {
        let context = Registry::global().write_to_payload(self.type_name(), self.value())?;
        Ok(envelope::wrap(self.type_name(), context))
    }

    fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
        let (type_name, context) = envelope::unwrap(payload)?;
        let type_name = type_name
            .strip_prefix(envelope::STATIC_SENTINEL)
            .unwrap_or(type_name);
        let instance = Registry::global().construct_from_payload(type_name, context)?;
        *out = PolyPtr::from(instance);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::payload::{Payload, ReadError, Serializable, WriteError};
    use crate::reflection::PolyPtr;

    #[derive(Default, PartialEq, Debug)]
    struct Plain {
        value: i32,
    }

    impl crate::info::TypeName for Plain {
        fn type_name() -> &'static str {
            "PointerTestPlain"
        }
    }

    impl Serializable for Plain {
        fn write(&self) -> Result<Payload, WriteError> {
            self.value.write()
        }

        fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
            i32::read(payload, &mut out.value)
        }
    }

    #[test]
    fn boxed_value_uses_the_sentinel() {
        let boxed = Box::new(Plain { value: 5 });
        let payload = boxed.write().unwrap();
        assert_eq!(
            payload,
            json!({ "$typeName": "*PointerTestPlain", "$context": 5 })
        );

        let restored = Box::<Plain>::read_new(&payload).unwrap();
        assert_eq!(*restored, Plain { value: 5 });
    }

    #[test]
    fn boxed_read_of_unknown_dynamic_name_is_recoverable() {
        // No sentinel, and `PointerTestPlain` is never registered.
        let payload = json!({ "$typeName": "PointerTestPlain", "$context": 5 });
        let err = Box::<Plain>::read_new(&payload).unwrap_err();
        assert_eq!(
            err,
            ReadError::UnknownType {
                type_name: String::from("PointerTestPlain"),
            }
        );
    }

    #[test]
    fn empty_poly_ptr_does_not_write() {
        let err = PolyPtr::default().write().unwrap_err();
        assert_eq!(
            err,
            WriteError::UnknownType {
                type_name: String::new(),
            }
        );
    }
}

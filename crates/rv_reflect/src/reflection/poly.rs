use core::any::Any;
use core::fmt;

use crate::reflection::{Instance, Reflected};

// -----------------------------------------------------------------------------
// PolyPtr

/// A named, type-erased handle: a runtime type-name string paired with a
/// boxed instance.
///
/// `PolyPtr` carries polymorphic identity through serialization boundaries.
/// A field declared as a `PolyPtr` serializes to an envelope holding the name
/// of whatever was actually stored, and deserializing that envelope
/// reconstructs the stored type through the registry — not the type the
/// surrounding code happened to expect.
///
/// The default value is the *empty* handle; writing it fails with
/// `UnknownType` since it names no registered type.
///
/// # Examples
///
/// ```
/// use rv_reflect::{PolyPtr, Serializable};
/// use rv_reflect::derive::Reflected;
///
/// #[derive(Reflected, Default)]
/// struct Lamp {
///     #[reflected]
///     lit: bool,
/// }
///
/// let handle = PolyPtr::new(Lamp { lit: true });
/// assert_eq!(handle.type_name(), "Lamp");
///
/// let payload = handle.write().unwrap();
/// let restored = PolyPtr::read_new(&payload).unwrap();
/// assert_eq!(restored.type_name(), "Lamp");
/// assert!(restored.downcast_ref::<Lamp>().unwrap().lit);
/// ```
pub struct PolyPtr {
    type_name: &'static str,
    value: Box<dyn Any>,
}

impl PolyPtr {
    /// Wraps a reflected value, capturing its type name.
    pub fn new<T: Reflected>(value: T) -> Self {
        Self {
            type_name: T::type_name(),
            value: Box::new(value),
        }
    }

    /// The runtime type name of the contained value; empty for the empty
    /// handle.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this is the empty handle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_name.is_empty()
    }

    /// Borrows the erased value.
    #[inline]
    pub fn value(&self) -> &dyn Any {
        &*self.value
    }

    /// Mutably borrows the erased value.
    #[inline]
    pub fn value_mut(&mut self) -> &mut dyn Any {
        &mut *self.value
    }

    /// Borrows the value as `T`, or `None` if the types differ.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Mutably borrows the value as `T`, or `None` if the types differ.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut()
    }

    /// Unboxes the value as `T`; on a type mismatch the handle is handed
    /// back unchanged.
    pub fn take<T: Any>(self) -> Result<T, Self> {
        let Self { type_name, value } = self;
        match value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Self { type_name, value }),
        }
    }
}

impl Default for PolyPtr {
    /// The empty handle.
    fn default() -> Self {
        Self {
            type_name: "",
            value: Box::new(()),
        }
    }
}

impl From<Instance> for PolyPtr {
    fn from(instance: Instance) -> Self {
        let type_name = instance.type_name();
        Self {
            type_name,
            value: instance.into_value(),
        }
    }
}

impl fmt::Debug for PolyPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("PolyPtr(empty)")
        } else {
            write!(f, "PolyPtr({})", self.type_name)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::PolyPtr;

    #[test]
    fn default_is_empty() {
        let handle = PolyPtr::default();
        assert!(handle.is_empty());
        assert_eq!(handle.type_name(), "");
    }

    #[test]
    fn take_hands_back_on_mismatch() {
        let handle = PolyPtr::default();
        let handle = handle.take::<String>().unwrap_err();
        assert!(handle.is_empty());
        assert!(handle.take::<()>().is_ok());
    }
}

use core::any::Any;
use core::fmt;

use crate::registry::TypeMeta;

// -----------------------------------------------------------------------------
// Instance

/// A boxed value constructed through the registry, paired with its runtime
/// type name and freshly resolved [`TypeMeta`].
///
/// Produced by
/// [`Registry::construct_from_payload`](crate::registry::Registry::construct_from_payload);
/// the value is only reachable type-erased, so access goes through the meta's
/// accessors or a checked downcast.
///
/// # Examples
///
/// ```
/// use rv_reflect::{Registry, Serializable};
/// use rv_reflect::derive::Reflected;
///
/// #[derive(Reflected, Default)]
/// struct Orb {
///     #[reflected]
///     charge: i32,
/// }
///
/// let payload = Orb { charge: 9 }.write().unwrap();
/// let instance = Registry::global().construct_from_payload("Orb", &payload).unwrap();
///
/// assert_eq!(instance.type_name(), "Orb");
/// assert_eq!(instance.meta().fields().len(), 1);
/// assert_eq!(instance.downcast_ref::<Orb>().unwrap().charge, 9);
///
/// let orb: Orb = instance.take().unwrap();
/// assert_eq!(orb.charge, 9);
/// ```
pub struct Instance {
    type_name: &'static str,
    value: Box<dyn Any>,
    meta: TypeMeta,
}

impl Instance {
    pub(crate) fn new(type_name: &'static str, value: Box<dyn Any>, meta: TypeMeta) -> Self {
        Self {
            type_name,
            value,
            meta,
        }
    }

    /// The runtime type name of the contained value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The resolved meta of the contained value's type.
    #[inline]
    pub fn meta(&self) -> &TypeMeta {
        &self.meta
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

    /// Unboxes the value as `T`; on a type mismatch the instance is handed
    /// back unchanged.
    pub fn take<T: Any>(self) -> Result<T, Self> {
        let Self {
            type_name,
            value,
            meta,
        } = self;
        match value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Self {
                type_name,
                value,
                meta,
            }),
        }
    }

    /// Discards the meta and returns the boxed value.
    #[inline]
    pub fn into_value(self) -> Box<dyn Any> {
        self.value
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

use core::any::Any;
use core::fmt;

use crate::access::AccessError;
use crate::registry::FieldFunctions;

// -----------------------------------------------------------------------------
// FieldAccessor

/// Dynamic access to one field of a registered type.
///
/// A `FieldAccessor` borrows its [`FieldFunctions`] bundle from the registry
/// and never owns it; bundles live for the whole process.
///
/// Accessors for fields inherited through a base projection carry the chain
/// of projecting fields in front of the leaf bundle; `get`/`set` walk the
/// chain before touching the leaf, so the same accessor works on the derived
/// instance directly.
///
/// # Examples
///
/// ```
/// use rv_reflect::Registry;
/// use rv_reflect::derive::Reflected;
///
/// #[derive(Reflected, Default)]
/// struct Health {
///     #[reflected]
///     current: i32,
/// }
///
/// let meta = Registry::global().type_meta("Health");
/// let accessor = meta.field("current").unwrap();
///
/// let mut value = Health { current: 80 };
/// assert_eq!(accessor.get_as::<i32>(&value), Ok(&80));
///
/// accessor.set(&mut value, Box::new(55_i32)).unwrap();
/// assert_eq!(value.current, 55);
/// ```
#[derive(Clone)]
pub struct FieldAccessor {
    projections: Vec<&'static FieldFunctions>,
    leaf: &'static FieldFunctions,
}

impl FieldAccessor {
    /// Wraps a bundle for a directly declared field.
    pub(crate) fn own(leaf: &'static FieldFunctions) -> Self {
        Self {
            projections: Vec::new(),
            leaf,
        }
    }

    /// Returns a copy of this accessor reached through one more projection.
    pub(crate) fn through(&self, projection: &'static FieldFunctions) -> Self {
        let mut projections = Vec::with_capacity(self.projections.len() + 1);
        projections.push(projection);
        projections.extend_from_slice(&self.projections);
        Self {
            projections,
            leaf: self.leaf,
        }
    }

    /// The name of the field.
    #[inline]
    pub fn field_name(&self) -> &'static str {
        self.leaf.field_name
    }

    /// The name of the field's type.
    #[inline]
    pub fn field_type_name(&self) -> &'static str {
        self.leaf.field_type_name
    }

    /// The name of the type declaring the field.
    ///
    /// For an inherited field this is the base type, not the type the
    /// accessor was resolved for.
    #[inline]
    pub fn owner_type_name(&self) -> &'static str {
        self.leaf.owner_type_name
    }

    /// Whether the field is an ordered collection.
    #[inline]
    pub fn is_sequence(&self) -> bool {
        self.leaf.is_sequence
    }

    /// Whether the field is reached through a base projection.
    #[inline]
    pub fn is_inherited(&self) -> bool {
        !self.projections.is_empty()
    }

    /// Borrows the field from an erased instance.
    pub fn get<'a>(&self, instance: &'a dyn Any) -> Result<&'a dyn Any, AccessError> {
        let mut current = instance;
        for projection in &self.projections {
            current = (projection.get)(current)?;
        }
        (self.leaf.get)(current)
    }

    /// Mutably borrows the field from an erased instance.
    pub fn get_mut<'a>(&self, instance: &'a mut dyn Any) -> Result<&'a mut dyn Any, AccessError> {
        let mut current = instance;
        for projection in &self.projections {
            current = (projection.get_mut)(current)?;
        }
        (self.leaf.get_mut)(current)
    }

    /// Borrows the field as `T`.
    pub fn get_as<'a, T: Any>(&self, instance: &'a dyn Any) -> Result<&'a T, AccessError> {
        self.get(instance)?
            .downcast_ref()
            .ok_or(AccessError::WrongValueType {
                expected: self.leaf.field_type_name,
            })
    }

    /// Mutably borrows the field as `T`.
    pub fn get_mut_as<'a, T: Any>(
        &self,
        instance: &'a mut dyn Any,
    ) -> Result<&'a mut T, AccessError> {
        self.get_mut(instance)?
            .downcast_mut()
            .ok_or(AccessError::WrongValueType {
                expected: self.leaf.field_type_name,
            })
    }

    /// Moves a boxed value into the field.
    pub fn set(&self, instance: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        let mut current = instance;
        for projection in &self.projections {
            current = (projection.get_mut)(current)?;
        }
        (self.leaf.set)(current, value)
    }
}

impl fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("owner", &self.leaf.owner_type_name)
            .field("field", &self.leaf.field_name)
            .field("type", &self.leaf.field_type_name)
            .field("inherited", &self.is_inherited())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::Any;

    use super::FieldAccessor;
    use crate::access::AccessError;
    use crate::registry::FieldFunctions;

    struct Inner {
        value: i32,
    }

    struct Outer {
        inner: Inner,
    }

    fn inner_value_get(instance: &dyn Any) -> Result<&dyn Any, AccessError> {
        let inner = instance
            .downcast_ref::<Inner>()
            .ok_or(AccessError::WrongInstanceType { expected: "Inner" })?;
        Ok(&inner.value)
    }

    fn inner_value_get_mut(instance: &mut dyn Any) -> Result<&mut dyn Any, AccessError> {
        let inner = instance
            .downcast_mut::<Inner>()
            .ok_or(AccessError::WrongInstanceType { expected: "Inner" })?;
        Ok(&mut inner.value)
    }

    fn inner_value_set(instance: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        let inner = instance
            .downcast_mut::<Inner>()
            .ok_or(AccessError::WrongInstanceType { expected: "Inner" })?;
        inner.value = *value
            .downcast::<i32>()
            .map_err(|_| AccessError::WrongValueType { expected: "i32" })?;
        Ok(())
    }

    static INNER_VALUE: FieldFunctions = FieldFunctions {
        owner_type_name: "Inner",
        field_name: "value",
        field_type_name: "i32",
        is_sequence: false,
        get: inner_value_get,
        get_mut: inner_value_get_mut,
        set: inner_value_set,
    };

    fn outer_inner_get(instance: &dyn Any) -> Result<&dyn Any, AccessError> {
        let outer = instance
            .downcast_ref::<Outer>()
            .ok_or(AccessError::WrongInstanceType { expected: "Outer" })?;
        Ok(&outer.inner)
    }

    fn outer_inner_get_mut(instance: &mut dyn Any) -> Result<&mut dyn Any, AccessError> {
        let outer = instance
            .downcast_mut::<Outer>()
            .ok_or(AccessError::WrongInstanceType { expected: "Outer" })?;
        Ok(&mut outer.inner)
    }

    fn outer_inner_set(instance: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        let outer = instance
            .downcast_mut::<Outer>()
            .ok_or(AccessError::WrongInstanceType { expected: "Outer" })?;
        outer.inner = *value
            .downcast::<Inner>()
            .map_err(|_| AccessError::WrongValueType { expected: "Inner" })?;
        Ok(())
    }

    static OUTER_INNER: FieldFunctions = FieldFunctions {
        owner_type_name: "Outer",
        field_name: "inner",
        field_type_name: "Inner",
        is_sequence: false,
        get: outer_inner_get,
        get_mut: outer_inner_get_mut,
        set: outer_inner_set,
    };

    #[test]
    fn own_field_access() {
        let accessor = FieldAccessor::own(&INNER_VALUE);
        let mut inner = Inner { value: 7 };

        assert_eq!(accessor.get_as::<i32>(&inner), Ok(&7));
        accessor.set(&mut inner, Box::new(9_i32)).unwrap();
        assert_eq!(inner.value, 9);
    }

    #[test]
    fn wrong_instance_is_rejected() {
        let accessor = FieldAccessor::own(&INNER_VALUE);
        let outer = Outer {
            inner: Inner { value: 1 },
        };
        assert_eq!(
            accessor.get(&outer).unwrap_err(),
            AccessError::WrongInstanceType { expected: "Inner" }
        );
    }

    #[test]
    fn projected_access_walks_the_chain() {
        let accessor = FieldAccessor::own(&INNER_VALUE).through(&OUTER_INNER);
        let mut outer = Outer {
            inner: Inner { value: 3 },
        };

        assert!(accessor.is_inherited());
        assert_eq!(accessor.get_as::<i32>(&outer), Ok(&3));

        accessor.set(&mut outer, Box::new(12_i32)).unwrap();
        assert_eq!(outer.inner.value, 12);
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        let accessor = FieldAccessor::own(&INNER_VALUE);
        let mut inner = Inner { value: 0 };
        assert_eq!(
            accessor.set(&mut inner, Box::new("nope")).unwrap_err(),
            AccessError::WrongValueType { expected: "i32" }
        );
    }
}

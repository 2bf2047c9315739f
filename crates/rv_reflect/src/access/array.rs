use core::any::Any;
use core::fmt;

use crate::access::AccessError;
use crate::registry::ArrayFunctions;

// -----------------------------------------------------------------------------
// ArrayAccessor

/// Dynamic, bounds-checked access to an ordered-collection value.
///
/// The erased instance handed to an `ArrayAccessor` is the collection itself
/// (e.g. a `Vec<f32>` borrowed through a
/// [`FieldAccessor`](crate::access::FieldAccessor)), not the object holding
/// it. Out-of-range indices report [`AccessError::OutOfBounds`].
///
/// # Examples
///
/// ```
/// use rv_reflect::Registry;
/// use rv_reflect::derive::Reflected;
///
/// #[derive(Reflected, Default)]
/// struct Samples {
///     #[reflected]
///     values: Vec<f32>,
/// }
///
/// let accessor = Registry::global().array_accessor("Vec<f32>").unwrap();
///
/// let mut values = vec![1.0_f32, 2.0];
/// assert_eq!(accessor.len(&values), Ok(2));
/// assert_eq!(accessor.get_as::<f32>(&values, 1), Ok(&2.0));
///
/// accessor.set(&mut values, 0, Box::new(5.0_f32)).unwrap();
/// assert_eq!(values[0], 5.0);
/// ```
#[derive(Clone, Copy)]
pub struct ArrayAccessor {
    functions: &'static ArrayFunctions,
}

impl ArrayAccessor {
    pub(crate) fn new(functions: &'static ArrayFunctions) -> Self {
        Self { functions }
    }

    /// The name of the collection type, e.g. `Vec<f32>`.
    #[inline]
    pub fn array_type_name(&self) -> &'static str {
        self.functions.array_type_name
    }

    /// The name of the element type, e.g. `f32`.
    #[inline]
    pub fn element_type_name(&self) -> &'static str {
        self.functions.element_type_name
    }

    /// The number of elements in the erased collection.
    pub fn len(&self, instance: &dyn Any) -> Result<usize, AccessError> {
        (self.functions.len)(instance)
    }

    /// Borrows the element at `index`.
    pub fn get<'a>(&self, instance: &'a dyn Any, index: usize) -> Result<&'a dyn Any, AccessError> {
        (self.functions.get)(instance, index)
    }

    /// Borrows the element at `index` as `T`.
    pub fn get_as<'a, T: Any>(
        &self,
        instance: &'a dyn Any,
        index: usize,
    ) -> Result<&'a T, AccessError> {
        self.get(instance, index)?
            .downcast_ref()
            .ok_or(AccessError::WrongValueType {
                expected: self.functions.element_type_name,
            })
    }

    /// Moves a boxed element into the slot at `index`.
    pub fn set(
        &self,
        instance: &mut dyn Any,
        index: usize,
        value: Box<dyn Any>,
    ) -> Result<(), AccessError> {
        (self.functions.set)(instance, index, value)
    }
}

impl fmt::Debug for ArrayAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayAccessor")
            .field("array", &self.functions.array_type_name)
            .field("element", &self.functions.element_type_name)
            .finish()
    }
}

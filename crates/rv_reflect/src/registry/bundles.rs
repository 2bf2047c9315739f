//! Accessor-function bundles.
//!
//! A bundle is a fixed-shape group of free functions registered under a type
//! name. The derive macros emit one `static` bundle per reflected field,
//! method, class and collection type; the registry stores only references to
//! those statics, so bundles live for the whole process and are never freed.

use core::any::Any;

use crate::access::{AccessError, InvokeError};
use crate::payload::{Payload, ReadError, WriteError};

// -----------------------------------------------------------------------------
// FieldFunctions

/// The accessor bundle of one reflected field.
#[derive(Debug)]
pub struct FieldFunctions {
    /// Name of the type declaring the field.
    pub owner_type_name: &'static str,
    /// Name of the field.
    pub field_name: &'static str,
    /// Normalized name of the field's type.
    pub field_type_name: &'static str,
    /// Whether the field is an ordered collection.
    pub is_sequence: bool,
    /// Borrows the field from an erased instance of the owner.
    pub get: fn(&dyn Any) -> Result<&dyn Any, AccessError>,
    /// Mutably borrows the field from an erased instance of the owner.
    pub get_mut: fn(&mut dyn Any) -> Result<&mut dyn Any, AccessError>,
    /// Moves a boxed value of the field's type into the field.
    pub set: fn(&mut dyn Any, Box<dyn Any>) -> Result<(), AccessError>,
}

// -----------------------------------------------------------------------------
// MethodFunctions

/// The invoker bundle of one reflected method.
#[derive(Debug)]
pub struct MethodFunctions {
    /// Name of the type declaring the method.
    pub owner_type_name: &'static str,
    /// Name of the method.
    pub method_name: &'static str,
    /// Calls the method on an erased receiver with a boxed argument list,
    /// returning the boxed result (`()` for methods without a return value).
    pub invoke: fn(&mut dyn Any, Vec<Box<dyn Any>>) -> Result<Box<dyn Any>, InvokeError>,
}

// -----------------------------------------------------------------------------
// ClassFunctions

/// The construction/serialization bundle of one reflected class.
#[derive(Debug)]
pub struct ClassFunctions {
    /// Name of the class.
    pub type_name: &'static str,
    /// Builds a boxed instance from a payload, starting from the type's
    /// default value.
    pub construct: fn(&Payload) -> Result<Box<dyn Any>, ReadError>,
    /// Writes an erased instance of the class to a payload.
    pub write: fn(&dyn Any) -> Result<Payload, WriteError>,
    /// Projection bundles of the fields marked as base-class subobjects.
    pub bases: &'static [&'static FieldFunctions],
}

// -----------------------------------------------------------------------------
// ArrayFunctions

/// The indexed-access bundle of one ordered-collection type.
///
/// Registered once per collection type name (e.g. `Vec<f32>`), shared by
/// every field of that type.
#[derive(Debug)]
pub struct ArrayFunctions {
    /// Name of the collection type.
    pub array_type_name: &'static str,
    /// Name of the element type.
    pub element_type_name: &'static str,
    /// Borrows the element at an index; out of range is an error.
    pub get: fn(&dyn Any, usize) -> Result<&dyn Any, AccessError>,
    /// Moves a boxed element into the slot at an index; out of range is an
    /// error.
    pub set: fn(&mut dyn Any, usize, Box<dyn Any>) -> Result<(), AccessError>,
    /// Returns the element count.
    pub len: fn(&dyn Any) -> Result<usize, AccessError>,
}

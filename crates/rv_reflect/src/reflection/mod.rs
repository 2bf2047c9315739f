//! Reflected values: the registration contract, constructed instances and
//! polymorphic handles.

// -----------------------------------------------------------------------------
// Modules

mod instance;
mod poly;

// -----------------------------------------------------------------------------
// Exports

pub use instance::Instance;
pub use poly::PolyPtr;

// -----------------------------------------------------------------------------
// Reflected

use core::any::Any;

use crate::info::TypeName;
use crate::payload::Serializable;
use crate::registry::RegistryBuilder;

/// A type whose accessor bundles can be registered into a
/// [`Registry`](crate::registry::Registry).
///
/// Implemented by [`#[derive(Reflected)]`](crate::derive::Reflected), which
/// also emits the startup glue submitting [`register`](Reflected::register)
/// for collection by
/// [`RegistryBuilder::collect_registered`](crate::registry::RegistryBuilder::collect_registered).
///
/// # Examples
///
/// Registering by hand into a local registry:
///
/// ```
/// use rv_reflect::{Reflected, Registry};
/// use rv_reflect::derive::Reflected;
///
/// #[derive(Reflected, Default)]
/// struct Tag {
///     #[reflected]
///     name: String,
/// }
///
/// let mut builder = Registry::builder();
/// <Tag as Reflected>::register(&mut builder);
/// let registry = builder.finish();
///
/// assert!(registry.contains_class("Tag"));
/// ```
pub trait Reflected: TypeName + Serializable + Any {
    /// Registers this type's accessor bundles.
    fn register(builder: &mut RegistryBuilder);
}

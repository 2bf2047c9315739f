//! The runtime reflection registry.
//!
//! Generated code registers bundles of accessor free functions into a
//! [`RegistryBuilder`]; the builder is consumed into an
//! immutable [`Registry`] exactly once, and every later operation reads from
//! that snapshot. The global registry ([`Registry::global`]) is built on
//! first access from the registration glue collected at link time and stays
//! read-only for the rest of the process.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod bundles;
mod registry;
mod type_meta;

// -----------------------------------------------------------------------------
// Exports

pub use builder::RegistryBuilder;
pub use bundles::{ArrayFunctions, ClassFunctions, FieldFunctions, MethodFunctions};
pub use registry::Registry;
pub use type_meta::TypeMeta;

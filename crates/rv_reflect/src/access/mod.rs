//! Type-erased access to registered fields, methods and ordered collections.
//!
//! Instances travel as `&dyn Any`; every accessor re-checks the erased type
//! against its owning bundle before touching memory, so a handle applied to
//! the wrong instance reports an [`AccessError`] instead of misbehaving.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod error;
mod field;
mod method;

// -----------------------------------------------------------------------------
// Exports

pub use array::ArrayAccessor;
pub use error::{AccessError, InvokeError};
pub use field::FieldAccessor;
pub use method::MethodAccessor;

//! Items referenced by the code the derive macros generate.
//!
//! Nothing here is public API; paths and shapes may change between minor
//! versions without notice.

pub use core::any::Any;

pub use crate::access::{AccessError, InvokeError};
pub use crate::info::TypeName;
pub use crate::payload::{
    Payload, PayloadKind, PayloadMap, ReadError, Serializable, WriteError,
};
pub use crate::reflection::Reflected;
pub use crate::registry::{
    ArrayFunctions, ClassFunctions, FieldFunctions, MethodFunctions, RegistryBuilder,
};

// -----------------------------------------------------------------------------
// Auto registration

/// One registration function submitted by generated code and collected when
/// the registry is built.
pub struct AutoRegisterFn(pub fn(&mut RegistryBuilder));

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegisterFn);

#[cfg(feature = "auto_register")]
pub use inventory;

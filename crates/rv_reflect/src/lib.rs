#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// We need to use `crate` in the crate itself and `rv_reflect` in the code the
// derive macros generate (which also expands inside this crate's tests and
// doc tests), so `extern self` makes `rv_reflect` an alias for `crate`.
extern crate self as rv_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod access;
pub mod info;
pub mod payload;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use payload::{Payload, Serializable};
pub use reflection::{Instance, PolyPtr, Reflected};
pub use registry::Registry;
pub use rv_reflect_derive as derive;

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use hash::{HashMap, HashSet};

//! The semantic model built from the parsed syntax tree.
//!
//! Declarations are classified by visiting direct children only: named
//! fields become [`StructField`]s, fieldless variants become enum entries,
//! and methods of an inherent impl block become [`ReflectedMethod`]s.
//! Whether an entry takes part in generation is decided here, from its
//! `#[reflected]` flag; the code generators never look at the syntax tree
//! again.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflected_enum;
mod reflected_impl;
mod reflected_struct;
mod type_name;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, FieldFlag, TypeAttributes};

pub(crate) use reflected_enum::ReflectedEnum;
pub(crate) use reflected_impl::{ReflectedImpl, ReflectedMethod};
pub(crate) use reflected_struct::{ReflectedStruct, StructField};
pub(crate) use type_name::{is_sequence, normalized_type_name, sequence_element};

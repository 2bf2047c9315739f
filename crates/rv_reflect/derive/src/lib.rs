//! Derive macros for `rv_reflect`.
//!
//! See:
//!
//! - [`Reflected`]
//! - [`reflect_impl`]
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

static REFLECTED_ATTRIBUTE_NAME: &str = "reflected";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflected)]` implements the following traits:
///
/// - `TypeName`
/// - `Serializable`
/// - `Reflected`
///
/// and emits the registration glue inserting the type's accessor bundles
/// into the reflection registry at startup (with the `auto_register`
/// feature; without it, call `Reflected::register` yourself).
///
/// The type must also implement `Default`: payload construction starts from
/// the default value, and reading a payload that omits a field keeps that
/// field's default.
///
/// ## Field selection
///
/// Only fields carrying the `#[reflected]` attribute take part in
/// reflection and serialization; everything else is invisible to both, so a
/// field never outlives its type in the schema:
///
/// ```rust, ignore
/// #[derive(Reflected, Default)]
/// struct Monster {
///     #[reflected]
///     health: i32,
///     scratch: Vec<u8>, // not part of the schema
/// }
/// ```
///
/// An attribute whose flag cannot be recognized (e.g. `#[reflected()]`)
/// disables the field silently; this is filtering, not an error.
///
/// ## Base subobjects
///
/// `#[reflected(base)]` marks a field as a base-class subobject. The field
/// behaves like a regular reflected field, and additionally the members of
/// its type are merged into this type's resolved member set when the
/// registry is built:
///
/// ```rust, ignore
/// #[derive(Reflected, Default)]
/// struct Npc {
///     #[reflected(base)]
///     actor: Actor,
///     #[reflected]
///     dialogue: String,
/// }
/// // Registry::global().type_meta("Npc") now also resolves Actor's fields.
/// ```
///
/// ## Ordered collections
///
/// A reflected `Vec<T>` field serializes as a payload array and registers an
/// indexed-access bundle under the collection's type name (e.g. `Vec<f32>`).
/// Reading an array payload resizes the target container to the payload
/// length first.
///
/// ## Enums
///
/// Fieldless enums serialize as a string holding the variant name. Variants
/// with payloads are not supported.
///
/// ## Type path
///
/// Registry keys are unqualified type names. `#[reflected(path = "...")]`
/// records a module path returned by `TypeName::type_path`:
///
/// ```rust, ignore
/// #[derive(Reflected, Default)]
/// #[reflected(path = "game::combat")]
/// struct Weapon { /* ... */ }
/// // Weapon::type_path() == "game::combat::Weapon"
/// ```
///
/// ## Limitations
///
/// Generic types, tuple structs, unions and enums with payloads are
/// rejected with a compile error.
#[proc_macro_derive(Reflected, attributes(reflected))]
pub fn derive_reflected(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflected_impls(&ast).into()
}

/// # Method Reflection
///
/// `#[reflect_impl]` on an inherent impl block registers an invoker for
/// every method carrying the `#[reflected]` attribute. Unmarked methods are
/// left alone.
///
/// Invokers take the receiver type-erased and the arguments as a boxed
/// list, and return the boxed result; receiver type, argument count and
/// argument types are all checked at the boundary.
///
/// ```rust, ignore
/// #[derive(Reflected, Default)]
/// struct Counter {
///     #[reflected]
///     count: i32,
/// }
///
/// #[reflect_impl]
/// impl Counter {
///     #[reflected]
///     fn add(&mut self, amount: i32) -> i32 {
///         self.count += amount;
///         self.count
///     }
/// }
/// ```
///
/// Methods must take `&self` or `&mut self` and owned arguments; reference
/// parameters and by-value receivers are rejected.
///
/// Without the `auto_register` feature this macro leaves the impl block
/// unchanged and registers nothing.
#[proc_macro_attribute]
pub fn reflect_impl(_args: TokenStream, input: TokenStream) -> TokenStream {
    let block = parse_macro_input!(input as ItemImpl);

    impls::impl_methods(block).into()
}

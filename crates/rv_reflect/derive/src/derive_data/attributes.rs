//! Parsing of the `#[reflected(...)]` annotation payload.
//!
//! The first recognizable token is the flag selecting what kind of
//! reflectable entity a declaration is; everything after it is free-form.
//! A flag that cannot be recognized leaves the declaration *not enabled* and
//! it silently drops out of generation — deliberate filtering, not an error.
//! Malformed attribute syntax (an unparsable value) is still a hard error.

use syn::Attribute;

use crate::REFLECTED_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type-level `#[reflected(...)]` properties.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// Module path recorded by `#[reflected(path = "...")]`.
    pub type_path: Option<String>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECTED_ATTRIBUTE_NAME) {
                continue;
            }
            match &attr.meta {
                // Bare `#[reflected]` carries no type-level properties.
                syn::Meta::Path(_) => {}
                syn::Meta::List(_) => {
                    attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident("path") {
                            let value: syn::LitStr = meta.value()?.parse()?;
                            parsed.type_path = Some(value.value());
                            return Ok(());
                        }
                        skip_unknown(&meta)
                    })?;
                }
                syn::Meta::NameValue(_) => {}
            }
        }

        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// The flag of one field's `#[reflected]` annotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum FieldFlag {
    /// Plain reflected field.
    Enabled,
    /// Reflected field that is a base-class subobject.
    Base,
}

/// Field-level `#[reflected(...)]` properties.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub flag: Option<FieldFlag>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECTED_ATTRIBUTE_NAME) {
                continue;
            }
            match &attr.meta {
                syn::Meta::Path(_) => {
                    parsed.flag = Some(FieldFlag::Enabled);
                }
                syn::Meta::List(_) => {
                    attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident("base") {
                            parsed.flag = Some(FieldFlag::Base);
                            return Ok(());
                        }
                        skip_unknown(&meta)
                    })?;
                }
                syn::Meta::NameValue(_) => {}
            }
        }

        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// Consumes an unrecognized property without acting on it.
fn skip_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let _: proc_macro2::Group = meta.input.parse()?;
    }
    Ok(())
}

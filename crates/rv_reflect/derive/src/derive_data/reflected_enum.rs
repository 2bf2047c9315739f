use syn::{DataEnum, DeriveInput, Fields};

use crate::derive_data::TypeAttributes;

// -----------------------------------------------------------------------------
// ReflectedEnum

/// The semantic model of one reflected enum: its name and fieldless
/// variants in declaration order.
///
/// Variants serialize by name, so explicit discriminants are accepted but
/// do not show up in the generated code.
pub(crate) struct ReflectedEnum<'a> {
    pub ident: &'a syn::Ident,
    pub attrs: TypeAttributes,
    pub variants: Vec<&'a syn::Ident>,
}

impl<'a> ReflectedEnum<'a> {
    pub(crate) fn new(
        ast: &'a DeriveInput,
        attrs: TypeAttributes,
        data: &'a DataEnum,
    ) -> syn::Result<Self> {
        let variants = data
            .variants
            .iter()
            .map(|variant| match &variant.fields {
                Fields::Unit => Ok(&variant.ident),
                _ => Err(syn::Error::new_spanned(
                    variant,
                    "`Reflected` enums must be fieldless",
                )),
            })
            .collect::<syn::Result<Vec<_>>>()?;

        if variants.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "`Reflected` enums need at least one variant",
            ));
        }

        Ok(Self {
            ident: &ast.ident,
            attrs,
            variants,
        })
    }
}

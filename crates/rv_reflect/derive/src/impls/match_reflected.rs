use proc_macro2::TokenStream;
use syn::{Data, DeriveInput};

use super::{impl_enum, impl_struct};
use crate::derive_data::{ReflectedEnum, ReflectedStruct, TypeAttributes};

/// Classifies the input and dispatches to the matching generator.
pub(crate) fn match_reflected_impls(ast: &DeriveInput) -> TokenStream {
    if !ast.generics.params.is_empty() {
        // The registry is keyed by bare names, so there is no sensible key
        // for an open generic type.
        return syn::Error::new_spanned(&ast.generics, "generic types cannot derive `Reflected`")
            .into_compile_error();
    }

    let attrs = match TypeAttributes::parse_attrs(&ast.attrs) {
        Ok(attrs) => attrs,
        Err(err) => return err.into_compile_error(),
    };

    match &ast.data {
        Data::Struct(data) => match ReflectedStruct::new(ast, attrs, data) {
            Ok(model) => impl_struct(&model),
            Err(err) => err.into_compile_error(),
        },
        Data::Enum(data) => match ReflectedEnum::new(ast, attrs, data) {
            Ok(model) => impl_enum(&model),
            Err(err) => err.into_compile_error(),
        },
        Data::Union(_) => {
            syn::Error::new_spanned(&ast.ident, "unions cannot derive `Reflected`")
                .into_compile_error()
        }
    }
}

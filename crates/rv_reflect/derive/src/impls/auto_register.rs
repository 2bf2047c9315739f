use proc_macro2::TokenStream;

/// Generate the `inventory` submission for one registration function.
///
/// The tokens expand inside a block where `__exports` aliases
/// `rv_reflect::__macro_exports`.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(register_fn: TokenStream) -> TokenStream {
    quote::quote! {
        __exports::inventory::submit! {
            __exports::AutoRegisterFn(#register_fn)
        }
    }
}

/// Generate the `inventory` submission for one registration function.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_register_fn: TokenStream) -> TokenStream {
    TokenStream::new()
}

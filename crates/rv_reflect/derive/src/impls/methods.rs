use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemImpl;

use super::get_auto_register_impl;
use crate::derive_data::ReflectedImpl;

/// Expand `#[reflect_impl]`: re-emit the impl block (markers stripped) plus
/// one invoker free function and bundle static per reflected method.
pub(crate) fn impl_methods(mut block: ItemImpl) -> TokenStream {
    let model = match ReflectedImpl::new(&mut block) {
        Ok(model) => model,
        Err(err) => return err.into_compile_error(),
    };

    // Without the auto_register feature there is no way to reach the
    // generated bundles, so hand the block back untouched.
    if model.methods.is_empty() || cfg!(not(feature = "auto_register")) {
        return quote!(#block);
    }

    let self_ty = &model.self_ty;
    let owner_name = model.self_ident.to_string();

    let mut method_items = Vec::new();
    let mut method_statics = Vec::new();
    for method in &model.methods {
        let method_ident = &method.ident;
        let method_name = method_ident.to_string();
        let invoke_ident = format_ident!("__invoke_{}", method_ident);
        let static_ident = format_ident!("__METHOD_{}", method_ident.to_string().to_uppercase());

        let arg_count = method.arg_types.len();
        let arg_idents: Vec<_> = (0..arg_count)
            .map(|index| format_ident!("__arg{}", index))
            .collect();
        let arg_indices: Vec<_> = (0..arg_count).collect();
        let arg_types = &method.arg_types;
        let arg_type_names = &method.arg_type_names;

        let args_binding = if arg_count == 0 {
            TokenStream::new()
        } else {
            quote! { let mut __args = __args.into_iter(); }
        };

        method_items.push(quote! {
            fn #invoke_ident(
                __receiver: &mut dyn __exports::Any,
                __args: ::std::vec::Vec<::std::boxed::Box<dyn __exports::Any>>,
            ) -> ::core::result::Result<::std::boxed::Box<dyn __exports::Any>, __exports::InvokeError>
            {
                let __receiver = __receiver
                    .downcast_mut::<#self_ty>()
                    .ok_or(__exports::InvokeError::WrongReceiver { expected: #owner_name })?;
                if __args.len() != #arg_count {
                    return ::core::result::Result::Err(__exports::InvokeError::ArgCount {
                        expected: #arg_count,
                        received: __args.len(),
                    });
                }
                #args_binding
                #(
                    let #arg_idents = __args
                        .next()
                        .ok_or(__exports::InvokeError::ArgCount {
                            expected: #arg_count,
                            received: #arg_indices,
                        })?;
                    let #arg_idents = match #arg_idents.downcast::<#arg_types>() {
                        ::core::result::Result::Ok(__value) => *__value,
                        ::core::result::Result::Err(_) => {
                            return ::core::result::Result::Err(__exports::InvokeError::ArgType {
                                index: #arg_indices,
                                expected: #arg_type_names,
                            });
                        }
                    };
                )*
                let __returned = #self_ty::#method_ident(__receiver #(, #arg_idents)*);
                ::core::result::Result::Ok(::std::boxed::Box::new(__returned))
            }

            static #static_ident: __exports::MethodFunctions = __exports::MethodFunctions {
                owner_type_name: #owner_name,
                method_name: #method_name,
                invoke: #invoke_ident,
            };
        });
        method_statics.push(static_ident);
    }

    let auto_register_tokens = get_auto_register_impl(quote!(__register_methods));

    quote! {
        #block

        const _: () = {
            use rv_reflect::__macro_exports as __exports;

            #(#method_items)*

            fn __register_methods(__builder: &mut __exports::RegistryBuilder) {
                #(__builder.register_method(&#method_statics);)*
            }

            #auto_register_tokens
        };
    }
}

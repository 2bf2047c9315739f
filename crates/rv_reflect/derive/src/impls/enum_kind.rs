use proc_macro2::TokenStream;
use quote::quote;

use super::get_auto_register_impl;
use crate::derive_data::ReflectedEnum;

/// Implement reflection for a fieldless enum.
///
/// Enums serialize as a string payload holding the variant name and register
/// a class bundle with an empty member schema; that bundle is what makes
/// them constructible by name through the registry.
pub(crate) fn impl_enum(info: &ReflectedEnum) -> TokenStream {
    let ident = info.ident;
    let type_name = ident.to_string();
    let type_path = match &info.attrs.type_path {
        Some(path) => format!("{path}::{type_name}"),
        None => type_name.clone(),
    };

    let variant_idents = &info.variants;
    let variant_names: Vec<_> = info
        .variants
        .iter()
        .map(|variant| variant.to_string())
        .collect();

    // The first variant seeds construction; reads replace it wholesale.
    let first_variant = variant_idents[0];

    let auto_register_tokens =
        get_auto_register_impl(quote!(<#ident as __exports::Reflected>::register));

    quote! {
        impl rv_reflect::info::TypeName for #ident {
            #[inline(always)]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline(always)]
            fn type_path() -> &'static str {
                #type_path
            }
        }

        impl rv_reflect::Serializable for #ident {
            fn write(
                &self,
            ) -> ::core::result::Result<rv_reflect::Payload, rv_reflect::payload::WriteError> {
                let __name = match self {
                    #(#ident::#variant_idents => #variant_names,)*
                };
                ::core::result::Result::Ok(rv_reflect::Payload::String(__name.to_owned()))
            }

            fn read(
                __payload: &rv_reflect::Payload,
                __out: &mut Self,
            ) -> ::core::result::Result<(), rv_reflect::payload::ReadError> {
                let __name = __payload.as_str().ok_or_else(|| {
                    rv_reflect::payload::ReadError::kind_mismatch(
                        rv_reflect::payload::PayloadKind::String,
                        __payload,
                    )
                })?;
                *__out = match __name {
                    #(#variant_names => #ident::#variant_idents,)*
                    __other => {
                        return ::core::result::Result::Err(
                            rv_reflect::payload::ReadError::UnknownVariant {
                                type_name: #type_name,
                                variant: __other.to_owned(),
                            },
                        );
                    }
                };
                ::core::result::Result::Ok(())
            }
        }

        const _: () = {
            use rv_reflect::__macro_exports as __exports;

            fn __construct(
                __payload: &__exports::Payload,
            ) -> ::core::result::Result<::std::boxed::Box<dyn __exports::Any>, __exports::ReadError>
            {
                let mut __value = #ident::#first_variant;
                <#ident as __exports::Serializable>::read(__payload, &mut __value)?;
                ::core::result::Result::Ok(::std::boxed::Box::new(__value))
            }

            fn __write(
                __instance: &dyn __exports::Any,
            ) -> ::core::result::Result<__exports::Payload, __exports::WriteError> {
                let __value = __instance
                    .downcast_ref::<#ident>()
                    .ok_or(__exports::WriteError::WrongInstanceType { expected: #type_name })?;
                <#ident as __exports::Serializable>::write(__value)
            }

            static __CLASS: __exports::ClassFunctions = __exports::ClassFunctions {
                type_name: #type_name,
                construct: __construct,
                write: __write,
                bases: &[],
            };

            impl __exports::Reflected for #ident {
                fn register(__builder: &mut __exports::RegistryBuilder) {
                    __builder.register_class(&__CLASS);
                }
            }

            #auto_register_tokens
        };
    }
}

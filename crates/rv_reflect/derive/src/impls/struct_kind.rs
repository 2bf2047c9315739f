use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::get_auto_register_impl;
use crate::derive_data::{ReflectedStruct, normalized_type_name, sequence_element};

/// Implement reflection for a struct: `TypeName`, `Serializable`, the
/// accessor free functions with their bundle statics, and `Reflected`.
pub(crate) fn impl_struct(info: &ReflectedStruct) -> TokenStream {
    let ident = info.ident;
    let type_name = ident.to_string();
    let type_path = match &info.attrs.type_path {
        Some(path) => format!("{path}::{type_name}"),
        None => type_name.clone(),
    };

    let type_name_tokens = quote! {
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
    };

    let serializable_tokens = impl_serializable(info);

    // Accessor free functions and bundle statics, per compiled field.
    let mut field_items = Vec::new();
    let mut field_statics = Vec::new();
    for field in info.active_fields() {
        let field_ident = field.ident;
        let field_ty = field.ty;
        let field_name = field_ident.to_string();
        let field_type_name = &field.type_name;
        let is_sequence = field.is_sequence;

        let get_ident = format_ident!("__get_{}", field_ident);
        let get_mut_ident = format_ident!("__get_mut_{}", field_ident);
        let set_ident = format_ident!("__set_{}", field_ident);
        let static_ident = format_ident!("__FIELD_{}", field_ident.to_string().to_uppercase());

        field_items.push(quote! {
            fn #get_ident(
                __instance: &dyn __exports::Any,
            ) -> ::core::result::Result<&dyn __exports::Any, __exports::AccessError> {
                let __value = __instance
                    .downcast_ref::<#ident>()
                    .ok_or(__exports::AccessError::WrongInstanceType { expected: #type_name })?;
                ::core::result::Result::Ok(&__value.#field_ident)
            }

            fn #get_mut_ident(
                __instance: &mut dyn __exports::Any,
            ) -> ::core::result::Result<&mut dyn __exports::Any, __exports::AccessError> {
                let __value = __instance
                    .downcast_mut::<#ident>()
                    .ok_or(__exports::AccessError::WrongInstanceType { expected: #type_name })?;
                ::core::result::Result::Ok(&mut __value.#field_ident)
            }

            fn #set_ident(
                __instance: &mut dyn __exports::Any,
                __value: ::std::boxed::Box<dyn __exports::Any>,
            ) -> ::core::result::Result<(), __exports::AccessError> {
                let __target = __instance
                    .downcast_mut::<#ident>()
                    .ok_or(__exports::AccessError::WrongInstanceType { expected: #type_name })?;
                __target.#field_ident = *__value
                    .downcast::<#field_ty>()
                    .map_err(|_| __exports::AccessError::WrongValueType {
                        expected: #field_type_name,
                    })?;
                ::core::result::Result::Ok(())
            }

            static #static_ident: __exports::FieldFunctions = __exports::FieldFunctions {
                owner_type_name: #type_name,
                field_name: #field_name,
                field_type_name: #field_type_name,
                is_sequence: #is_sequence,
                get: #get_ident,
                get_mut: #get_mut_ident,
                set: #set_ident,
            };
        });
        field_statics.push(static_ident);
    }

    // One indexed-access bundle per distinct collection type.
    let mut array_items = Vec::new();
    let mut array_statics = Vec::new();
    let mut seen_arrays = HashSet::new();
    for (index, field) in info.active_fields().filter(|field| field.is_sequence).enumerate() {
        let Some(element_ty) = sequence_element(field.ty) else {
            continue;
        };
        if !seen_arrays.insert(field.type_name.clone()) {
            continue;
        }

        let field_ty = field.ty;
        let array_type_name = &field.type_name;
        let element_type_name = normalized_type_name(element_ty);

        let get_ident = format_ident!("__array_get_{}", index);
        let set_ident = format_ident!("__array_set_{}", index);
        let len_ident = format_ident!("__array_len_{}", index);
        let static_ident = format_ident!("__ARRAY_{}", index);

        array_items.push(quote! {
            fn #get_ident(
                __instance: &dyn __exports::Any,
                __index: usize,
            ) -> ::core::result::Result<&dyn __exports::Any, __exports::AccessError> {
                let __array = __instance
                    .downcast_ref::<#field_ty>()
                    .ok_or(__exports::AccessError::WrongInstanceType {
                        expected: #array_type_name,
                    })?;
                let __len = __array.len();
                match __array.get(__index) {
                    ::core::option::Option::Some(__item) => {
                        ::core::result::Result::Ok(__item as &dyn __exports::Any)
                    }
                    ::core::option::Option::None => {
                        ::core::result::Result::Err(__exports::AccessError::OutOfBounds {
                            index: __index,
                            len: __len,
                        })
                    }
                }
            }

            fn #set_ident(
                __instance: &mut dyn __exports::Any,
                __index: usize,
                __value: ::std::boxed::Box<dyn __exports::Any>,
            ) -> ::core::result::Result<(), __exports::AccessError> {
                let __array = __instance
                    .downcast_mut::<#field_ty>()
                    .ok_or(__exports::AccessError::WrongInstanceType {
                        expected: #array_type_name,
                    })?;
                let __len = __array.len();
                let __slot = __array
                    .get_mut(__index)
                    .ok_or(__exports::AccessError::OutOfBounds {
                        index: __index,
                        len: __len,
                    })?;
                *__slot = *__value
                    .downcast::<#element_ty>()
                    .map_err(|_| __exports::AccessError::WrongValueType {
                        expected: #element_type_name,
                    })?;
                ::core::result::Result::Ok(())
            }

            fn #len_ident(
                __instance: &dyn __exports::Any,
            ) -> ::core::result::Result<usize, __exports::AccessError> {
                let __array = __instance
                    .downcast_ref::<#field_ty>()
                    .ok_or(__exports::AccessError::WrongInstanceType {
                        expected: #array_type_name,
                    })?;
                ::core::result::Result::Ok(__array.len())
            }

            static #static_ident: __exports::ArrayFunctions = __exports::ArrayFunctions {
                array_type_name: #array_type_name,
                element_type_name: #element_type_name,
                get: #get_ident,
                set: #set_ident,
                len: #len_ident,
            };
        });
        array_statics.push(static_ident);
    }

    let base_statics: Vec<_> = info
        .base_fields()
        .map(|field| format_ident!("__FIELD_{}", field.ident.to_string().to_uppercase()))
        .collect();
    let base_count = base_statics.len();

    let auto_register_tokens =
        get_auto_register_impl(quote!(<#ident as __exports::Reflected>::register));

    quote! {
        #type_name_tokens

        #serializable_tokens

        const _: () = {
            use rv_reflect::__macro_exports as __exports;

            #(#field_items)*

            #(#array_items)*

            fn __construct(
                __payload: &__exports::Payload,
            ) -> ::core::result::Result<::std::boxed::Box<dyn __exports::Any>, __exports::ReadError>
            {
                let mut __value = <#ident as ::core::default::Default>::default();
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

            static __BASES: [&'static __exports::FieldFunctions; #base_count] =
                [#(&#base_statics),*];

            static __CLASS: __exports::ClassFunctions = __exports::ClassFunctions {
                type_name: #type_name,
                construct: __construct,
                write: __write,
                bases: &__BASES,
            };

            impl __exports::Reflected for #ident {
                fn register(__builder: &mut __exports::RegistryBuilder) {
                    #(__builder.register_field(&#field_statics);)*
                    #(__builder.register_array(&#array_statics);)*
                    __builder.register_class(&__CLASS);
                }
            }

            #auto_register_tokens
        };
    }
}

/// Generate the `Serializable` implementation: an object payload keyed by
/// field name, written in declaration order; reads guard every key on
/// presence and non-null.
fn impl_serializable(info: &ReflectedStruct) -> TokenStream {
    let ident = info.ident;
    let field_idents: Vec<_> = info.active_fields().map(|field| field.ident).collect();
    let field_names: Vec<_> = info
        .active_fields()
        .map(|field| field.ident.to_string())
        .collect();

    quote! {
        impl rv_reflect::Serializable for #ident {
            fn write(
                &self,
            ) -> ::core::result::Result<rv_reflect::Payload, rv_reflect::payload::WriteError> {
                let mut __object = rv_reflect::payload::PayloadMap::new();
                #(
                    __object.insert(
                        #field_names.to_owned(),
                        rv_reflect::Serializable::write(&self.#field_idents)?,
                    );
                )*
                ::core::result::Result::Ok(rv_reflect::Payload::Object(__object))
            }

            fn read(
                __payload: &rv_reflect::Payload,
                __out: &mut Self,
            ) -> ::core::result::Result<(), rv_reflect::payload::ReadError> {
                let __object = __payload.as_object().ok_or_else(|| {
                    rv_reflect::payload::ReadError::kind_mismatch(
                        rv_reflect::payload::PayloadKind::Object,
                        __payload,
                    )
                })?;
                #(
                    if let ::core::option::Option::Some(__value) = __object.get(#field_names) {
                        if !__value.is_null() {
                            rv_reflect::Serializable::read(__value, &mut __out.#field_idents)?;
                        }
                    }
                )*
                ::core::result::Result::Ok(())
            }
        }
    }
}

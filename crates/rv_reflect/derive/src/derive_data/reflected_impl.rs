use syn::{FnArg, ImplItem, ItemImpl, Type};

use crate::REFLECTED_ATTRIBUTE_NAME;
use crate::derive_data::normalized_type_name;

// -----------------------------------------------------------------------------
// ReflectedMethod

/// One reflected method: its name and owned parameter types.
///
/// Invokers generated from this model take a boxed argument list and return
/// a boxed value, so methods with parameters and return values are fully
/// reflectable.
pub(crate) struct ReflectedMethod {
    pub ident: syn::Ident,
    pub arg_types: Vec<Type>,
    /// Normalized registry names of the parameter types.
    pub arg_type_names: Vec<String>,
}

// -----------------------------------------------------------------------------
// ReflectedImpl

/// The semantic model of one `#[reflect_impl]` block.
///
/// Building the model also strips the `#[reflected]` marker attributes from
/// the block, since they only exist for this macro.
pub(crate) struct ReflectedImpl {
    pub self_ident: syn::Ident,
    pub self_ty: Type,
    pub methods: Vec<ReflectedMethod>,
}

impl ReflectedImpl {
    pub(crate) fn new(block: &mut ItemImpl) -> syn::Result<Self> {
        if let Some((_, trait_path, _)) = &block.trait_ {
            return Err(syn::Error::new_spanned(
                trait_path,
                "`reflect_impl` only supports inherent impl blocks",
            ));
        }
        if !block.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &block.generics,
                "generic impl blocks cannot be reflected",
            ));
        }

        let self_ty = (*block.self_ty).clone();
        let self_ident = match &*block.self_ty {
            Type::Path(type_path) => type_path
                .path
                .segments
                .last()
                .map(|segment| segment.ident.clone())
                .ok_or_else(|| {
                    syn::Error::new_spanned(&block.self_ty, "`reflect_impl` requires a named type")
                })?,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "`reflect_impl` requires a named type",
                ));
            }
        };

        let mut methods = Vec::new();
        for item in &mut block.items {
            let ImplItem::Fn(function) = item else {
                continue;
            };

            let mut marked = false;
            function.attrs.retain(|attr| {
                let is_marker = attr.path().is_ident(REFLECTED_ATTRIBUTE_NAME);
                marked |= is_marker;
                !is_marker
            });
            if !marked {
                continue;
            }

            let mut inputs = function.sig.inputs.iter();
            match inputs.next() {
                Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() => {}
                Some(FnArg::Receiver(receiver)) => {
                    return Err(syn::Error::new_spanned(
                        receiver,
                        "reflected methods take `&self` or `&mut self`",
                    ));
                }
                _ => {
                    return Err(syn::Error::new_spanned(
                        &function.sig,
                        "reflected methods need a `self` receiver",
                    ));
                }
            }

            let mut arg_types = Vec::new();
            for input in inputs {
                let FnArg::Typed(pattern) = input else {
                    continue;
                };
                if matches!(&*pattern.ty, Type::Reference(_)) {
                    return Err(syn::Error::new_spanned(
                        &pattern.ty,
                        "reflected methods take arguments by value",
                    ));
                }
                arg_types.push((*pattern.ty).clone());
            }

            methods.push(ReflectedMethod {
                ident: function.sig.ident.clone(),
                arg_type_names: arg_types.iter().map(normalized_type_name).collect(),
                arg_types,
            });
        }

        Ok(Self {
            self_ident,
            self_ty,
            methods,
        })
    }
}

use syn::{DataStruct, DeriveInput, Fields};

use crate::derive_data::{FieldAttributes, FieldFlag, TypeAttributes};
use crate::derive_data::{is_sequence, normalized_type_name};

// -----------------------------------------------------------------------------
// StructField

/// One named field of a reflected struct.
pub(crate) struct StructField<'a> {
    pub ident: &'a syn::Ident,
    pub ty: &'a syn::Type,
    /// `None` when the field carries no recognizable flag; such fields are
    /// silently excluded from generation.
    pub flag: Option<FieldFlag>,
    /// Normalized registry name of the field's type.
    pub type_name: String,
    pub is_sequence: bool,
}

impl StructField<'_> {
    /// Whether the field takes part in generation.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.flag.is_some()
    }

    /// Whether the field is a base-class subobject.
    #[inline]
    pub fn is_base(&self) -> bool {
        self.flag == Some(FieldFlag::Base)
    }
}

// -----------------------------------------------------------------------------
// ReflectedStruct

/// The semantic model of one reflected struct: its name, properties and
/// fields in declaration order.
pub(crate) struct ReflectedStruct<'a> {
    pub ident: &'a syn::Ident,
    pub attrs: TypeAttributes,
    pub fields: Vec<StructField<'a>>,
}

impl<'a> ReflectedStruct<'a> {
    pub(crate) fn new(
        ast: &'a DeriveInput,
        attrs: TypeAttributes,
        data: &'a DataStruct,
    ) -> syn::Result<Self> {
        let fields = match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(|field| {
                    let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                    Ok(StructField {
                        ident: field
                            .ident
                            .as_ref()
                            .expect("named fields always have an ident"),
                        ty: &field.ty,
                        flag: field_attrs.flag,
                        type_name: normalized_type_name(&field.ty),
                        is_sequence: is_sequence(&field.ty),
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?,
            // A unit struct is a valid class with an empty schema.
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "`Reflected` requires named fields",
                ));
            }
        };

        Ok(Self {
            ident: &ast.ident,
            attrs,
            fields,
        })
    }

    /// The fields taking part in generation, in declaration order.
    pub(crate) fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.is_active())
    }

    /// The fields marked as base-class subobjects.
    pub(crate) fn base_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.is_base())
    }
}

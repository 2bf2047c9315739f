use core::fmt;

use crate::access::{FieldAccessor, MethodAccessor};
use crate::registry::Registry;

// -----------------------------------------------------------------------------
// TypeMeta

/// The resolved member set of one type name.
///
/// A `TypeMeta` is rebuilt from the registry on every lookup; it holds the
/// flattened field and method accessors (own members first, then the members
/// of base-class subobjects composed through their projection) and a validity
/// flag. A name with no registered members resolves to an *invalid* meta —
/// not an error, callers check [`is_valid`](TypeMeta::is_valid).
///
/// # Examples
///
/// ```
/// use rv_reflect::Registry;
/// use rv_reflect::derive::Reflected;
///
/// #[derive(Reflected, Default)]
/// struct Badge {
///     #[reflected]
///     label: String,
/// }
///
/// let meta = Registry::global().type_meta("Badge");
/// assert!(meta.is_valid());
/// assert_eq!(meta.fields().len(), 1);
/// assert_eq!(meta.fields()[0].field_name(), "label");
///
/// assert!(!Registry::global().type_meta("NoSuchType").is_valid());
/// ```
pub struct TypeMeta {
    type_name: String,
    fields: Vec<FieldAccessor>,
    methods: Vec<MethodAccessor>,
}

impl TypeMeta {
    /// Resolves every accessor registered under exactly `type_name`.
    pub fn from_name(registry: &Registry, type_name: &str) -> Self {
        match registry.resolved_members(type_name) {
            Some((fields, methods)) => Self {
                type_name: type_name.to_owned(),
                fields: fields.clone(),
                methods: methods.clone(),
            },
            None => Self {
                type_name: type_name.to_owned(),
                fields: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    /// The name this meta was resolved for.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// `true` iff at least one field or method was found.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.fields.is_empty() || !self.methods.is_empty()
    }

    /// The flattened field accessors, declaration order, own members first.
    #[inline]
    pub fn fields(&self) -> &[FieldAccessor] {
        &self.fields
    }

    /// Finds a field accessor by name; own members shadow inherited ones.
    pub fn field(&self, field_name: &str) -> Option<&FieldAccessor> {
        self.fields
            .iter()
            .find(|accessor| accessor.field_name() == field_name)
    }

    /// The flattened method accessors.
    #[inline]
    pub fn methods(&self) -> &[MethodAccessor] {
        &self.methods
    }

    /// Finds a method accessor by name; own members shadow inherited ones.
    pub fn method(&self, method_name: &str) -> Option<&MethodAccessor> {
        self.methods
            .iter()
            .find(|accessor| accessor.method_name() == method_name)
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .finish()
    }
}

use core::any::Any;
use std::sync::OnceLock;

use rv_utils::hash::HashMap;

use crate::access::{ArrayAccessor, FieldAccessor, MethodAccessor};
use crate::payload::{Payload, ReadError, WriteError};
use crate::reflection::Instance;
use crate::registry::{
    ArrayFunctions, ClassFunctions, FieldFunctions, MethodFunctions, RegistryBuilder, TypeMeta,
};

// -----------------------------------------------------------------------------
// Registry

/// The immutable reflection registry.
///
/// Built once from a [`RegistryBuilder`] and read-only afterwards, which is
/// what makes lookups safe from any thread without locking. The process-wide
/// instance lives behind [`Registry::global`]; local registries can be built
/// for tests or tools through [`Registry::builder`].
///
/// All tables are keyed by unqualified type name. Lookups against an
/// unregistered name yield explicitly-invalid results (an invalid
/// [`TypeMeta`], or an `UnknownType` error), never a panic.
///
/// # Examples
///
/// ```
/// use rv_reflect::{Registry, Serializable};
/// use rv_reflect::derive::Reflected;
///
/// #[derive(Reflected, Default)]
/// struct Spawn {
///     #[reflected]
///     seed: u32,
/// }
///
/// let registry = Registry::global();
///
/// let payload = Spawn { seed: 7 }.write().unwrap();
/// let instance = registry.construct_from_payload("Spawn", &payload).unwrap();
/// assert_eq!(instance.downcast_ref::<Spawn>().unwrap().seed, 7);
///
/// assert!(!registry.type_meta("NotRegistered").is_valid());
/// ```
pub struct Registry {
    fields: HashMap<&'static str, Vec<&'static FieldFunctions>>,
    methods: HashMap<&'static str, Vec<&'static MethodFunctions>>,
    classes: HashMap<&'static str, &'static ClassFunctions>,
    arrays: HashMap<&'static str, &'static ArrayFunctions>,
    resolved: HashMap<&'static str, (Vec<FieldAccessor>, Vec<MethodAccessor>)>,
}

impl Registry {
    /// Creates an empty [`RegistryBuilder`].
    #[inline]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Returns the process-wide registry.
    ///
    /// The first call collects every registration function emitted by the
    /// derive macros and consumes them into the immutable table set; later
    /// calls return the same instance. Types compiled into the binary after
    /// this point (there are none in normal builds) would not be visible.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let mut builder = Registry::builder();
            builder.collect_registered();
            builder.finish()
        })
    }

    pub(crate) fn from_parts(
        fields: HashMap<&'static str, Vec<&'static FieldFunctions>>,
        methods: HashMap<&'static str, Vec<&'static MethodFunctions>>,
        classes: HashMap<&'static str, &'static ClassFunctions>,
        arrays: HashMap<&'static str, &'static ArrayFunctions>,
        resolved: HashMap<&'static str, (Vec<FieldAccessor>, Vec<MethodAccessor>)>,
    ) -> Self {
        Self {
            fields,
            methods,
            classes,
            arrays,
            resolved,
        }
    }

    /// Whether a class bundle is registered under the given name.
    #[inline]
    pub fn contains_class(&self, type_name: &str) -> bool {
        self.classes.contains_key(type_name)
    }

    /// Returns the class bundle registered under the given name.
    #[inline]
    pub fn class(&self, type_name: &str) -> Option<&'static ClassFunctions> {
        self.classes.get(type_name).copied()
    }

    /// Returns an accessor for the collection type registered under the
    /// given name (e.g. `Vec<f32>`).
    pub fn array_accessor(&self, array_type_name: &str) -> Option<ArrayAccessor> {
        self.arrays
            .get(array_type_name)
            .copied()
            .map(ArrayAccessor::new)
    }

    /// An iterator over every registered class name, in arbitrary order.
    pub fn class_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classes.keys().copied()
    }

    /// The field bundles directly declared by the given type, in
    /// registration order.
    pub fn declared_fields(&self, type_name: &str) -> &[&'static FieldFunctions] {
        self.fields
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The method bundles directly declared by the given type, in
    /// registration order.
    pub fn declared_methods(&self, type_name: &str) -> &[&'static MethodFunctions] {
        self.methods
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn resolved_members(
        &self,
        type_name: &str,
    ) -> Option<&(Vec<FieldAccessor>, Vec<MethodAccessor>)> {
        self.resolved.get(type_name)
    }

    /// Resolves the [`TypeMeta`] of the given name.
    ///
    /// An unregistered name yields an *invalid* meta (no fields, no methods);
    /// callers check [`TypeMeta::is_valid`] before use.
    #[inline]
    pub fn type_meta(&self, type_name: &str) -> TypeMeta {
        TypeMeta::from_name(self, type_name)
    }

    /// Builds a boxed instance of the named class from a payload.
    ///
    /// The returned [`Instance`] pairs the value with its freshly resolved
    /// [`TypeMeta`]. An unregistered name is a recoverable
    /// [`ReadError::UnknownType`].
    pub fn construct_from_payload(
        &self,
        type_name: &str,
        payload: &Payload,
    ) -> Result<Instance, ReadError> {
        let class = self.class(type_name).ok_or_else(|| ReadError::UnknownType {
            type_name: type_name.to_owned(),
        })?;
        let value = (class.construct)(payload)?;
        Ok(Instance::new(
            class.type_name,
            value,
            self.type_meta(class.type_name),
        ))
    }

    /// Writes an erased instance of the named class to a payload.
    pub fn write_to_payload(
        &self,
        type_name: &str,
        instance: &dyn Any,
    ) -> Result<Payload, WriteError> {
        let class = self.class(type_name).ok_or_else(|| WriteError::UnknownType {
            type_name: type_name.to_owned(),
        })?;
        (class.write)(instance)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::Any;

    use crate::access::AccessError;
    use crate::payload::{Payload, ReadError, Serializable, WriteError};
    use crate::registry::{ClassFunctions, FieldFunctions, Registry};

    #[derive(Default, PartialEq, Debug)]
    struct Marker {
        id: u32,
    }

    impl Serializable for Marker {
        fn write(&self) -> Result<Payload, WriteError> {
            self.id.write()
        }

        fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
            u32::read(payload, &mut out.id)
        }
    }

    fn marker_construct(payload: &Payload) -> Result<Box<dyn Any>, ReadError> {
        let mut value = Marker::default();
        Marker::read(payload, &mut value)?;
        Ok(Box::new(value))
    }

    fn marker_write(instance: &dyn Any) -> Result<Payload, WriteError> {
        instance
            .downcast_ref::<Marker>()
            .ok_or(WriteError::WrongInstanceType { expected: "Marker" })?
            .write()
    }

    static MARKER_CLASS: ClassFunctions = ClassFunctions {
        type_name: "Marker",
        construct: marker_construct,
        write: marker_write,
        bases: &[],
    };

    fn marker_id_get(instance: &dyn Any) -> Result<&dyn Any, AccessError> {
        let marker = instance
            .downcast_ref::<Marker>()
            .ok_or(AccessError::WrongInstanceType { expected: "Marker" })?;
        Ok(&marker.id)
    }

    fn marker_id_get_mut(instance: &mut dyn Any) -> Result<&mut dyn Any, AccessError> {
        let marker = instance
            .downcast_mut::<Marker>()
            .ok_or(AccessError::WrongInstanceType { expected: "Marker" })?;
        Ok(&mut marker.id)
    }

    fn marker_id_set(instance: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        let marker = instance
            .downcast_mut::<Marker>()
            .ok_or(AccessError::WrongInstanceType { expected: "Marker" })?;
        marker.id = *value
            .downcast::<u32>()
            .map_err(|_| AccessError::WrongValueType { expected: "u32" })?;
        Ok(())
    }

    static MARKER_ID: FieldFunctions = FieldFunctions {
        owner_type_name: "Marker",
        field_name: "id",
        field_type_name: "u32",
        is_sequence: false,
        get: marker_id_get,
        get_mut: marker_id_get_mut,
        set: marker_id_set,
    };

    fn build_registry() -> Registry {
        let mut builder = Registry::builder();
        builder.register_field(&MARKER_ID);
        builder.register_class(&MARKER_CLASS);
        builder.finish()
    }

    #[test]
    fn construct_and_write_roundtrip() {
        let registry = build_registry();

        let payload = Marker { id: 11 }.write().unwrap();
        let instance = registry.construct_from_payload("Marker", &payload).unwrap();
        assert_eq!(instance.downcast_ref::<Marker>(), Some(&Marker { id: 11 }));

        let written = registry
            .write_to_payload("Marker", instance.value())
            .unwrap();
        assert_eq!(written, payload);
    }

    #[test]
    fn unknown_name_is_recoverable() {
        let registry = build_registry();

        let err = registry
            .construct_from_payload("Ghost", &Payload::Null)
            .unwrap_err();
        assert_eq!(
            err,
            ReadError::UnknownType {
                type_name: String::from("Ghost"),
            }
        );

        let err = registry
            .write_to_payload("Ghost", &Marker::default())
            .unwrap_err();
        assert_eq!(
            err,
            WriteError::UnknownType {
                type_name: String::from("Ghost"),
            }
        );
    }

    #[test]
    fn duplicate_class_registration_is_first_wins() {
        let mut builder = Registry::builder();
        assert!(builder.register_class(&MARKER_CLASS));
        assert!(!builder.register_class(&MARKER_CLASS));

        let registry = builder.finish();
        assert!(registry.contains_class("Marker"));
        assert_eq!(registry.class_names().count(), 1);
    }

    #[test]
    fn field_bundles_accumulate() {
        let mut builder = Registry::builder();
        builder.register_field(&MARKER_ID);
        builder.register_field(&MARKER_ID);
        let registry = builder.finish();
        assert_eq!(registry.declared_fields("Marker").len(), 2);
    }
}

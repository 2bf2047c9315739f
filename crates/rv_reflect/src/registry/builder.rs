use rv_utils::hash::HashMap;

use crate::access::{FieldAccessor, MethodAccessor};
use crate::registry::{ArrayFunctions, ClassFunctions, FieldFunctions, MethodFunctions, Registry};

// -----------------------------------------------------------------------------
// RegistryBuilder

/// Collects accessor bundles and is consumed into an immutable [`Registry`].
///
/// Field and method tables are per-class multimaps: bundles accumulate in
/// registration order and never collide across classes, because lookup is
/// always class-scoped first. Class and collection tables are first-wins
/// maps: a second registration under an existing key is dropped, the drop is
/// logged, and `register_*` returns `false` so accidental double registration
/// stays visible during development.
///
/// # Examples
///
/// ```
/// use rv_reflect::Registry;
///
/// let mut builder = Registry::builder();
/// builder.collect_registered();
/// let registry = builder.finish();
/// # let _ = registry;
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    fields: HashMap<&'static str, Vec<&'static FieldFunctions>>,
    methods: HashMap<&'static str, Vec<&'static MethodFunctions>>,
    classes: HashMap<&'static str, &'static ClassFunctions>,
    arrays: HashMap<&'static str, &'static ArrayFunctions>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field bundle under its owner's type name.
    pub fn register_field(&mut self, functions: &'static FieldFunctions) {
        self.fields
            .entry(functions.owner_type_name)
            .or_default()
            .push(functions);
    }

    /// Registers a method bundle under its owner's type name.
    pub fn register_method(&mut self, functions: &'static MethodFunctions) {
        self.methods
            .entry(functions.owner_type_name)
            .or_default()
            .push(functions);
    }

    /// Registers a class bundle; the first registration under a name wins.
    ///
    /// Returns `false` (and logs) when the name is already taken and the new
    /// bundle was dropped.
    pub fn register_class(&mut self, functions: &'static ClassFunctions) -> bool {
        if self.classes.contains_key(functions.type_name) {
            log::warn!(
                "duplicate class registration for `{}` dropped; first registration wins",
                functions.type_name,
            );
            return false;
        }
        self.classes.insert(functions.type_name, functions);
        true
    }

    /// Registers a collection bundle; the first registration under a name
    /// wins.
    ///
    /// Several classes sharing a collection type routinely race for the same
    /// key, so the rejected duplicate is only logged at debug level.
    pub fn register_array(&mut self, functions: &'static ArrayFunctions) -> bool {
        if self.arrays.contains_key(functions.array_type_name) {
            log::debug!(
                "collection type `{}` already registered; keeping the first bundle",
                functions.array_type_name,
            );
            return false;
        }
        self.arrays.insert(functions.array_type_name, functions);
        true
    }

    /// Runs every registration function collected through the derive macros.
    ///
    /// Requires the `auto_register` feature; without it this is a no-op and
    /// bundles have to be registered by hand.
    #[cfg(feature = "auto_register")]
    pub fn collect_registered(&mut self) {
        for entry in inventory::iter::<crate::__macro_exports::AutoRegisterFn> {
            (entry.0)(self);
        }
    }

    /// Runs every registration function collected through the derive macros.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn collect_registered(&mut self) {}

    /// Consumes the builder into an immutable [`Registry`].
    ///
    /// This is where inheritance is flattened: for every registered name, the
    /// accessors of its base-class subobjects are resolved recursively and
    /// merged behind the type's own accessors, composed through the
    /// projecting field. The result is computed once and shared by every
    /// later [`TypeMeta`](crate::registry::TypeMeta) lookup.
    pub fn finish(self) -> Registry {
        let Self {
            fields,
            methods,
            classes,
            arrays,
        } = self;

        let mut names: Vec<&'static str> = classes
            .keys()
            .chain(fields.keys())
            .chain(methods.keys())
            .copied()
            .collect();
        names.sort_unstable();
        names.dedup();

        let mut resolved = HashMap::default();
        for name in names {
            resolve_members(name, &classes, &fields, &methods, &mut resolved, &mut Vec::new());
        }

        log::debug!(
            "reflection registry built: {} classes, {} collection types",
            classes.len(),
            arrays.len(),
        );

        Registry::from_parts(fields, methods, classes, arrays, resolved)
    }
}

/// Recursively resolves the flattened member lists of one type name.
///
/// Cycles through base projections are broken by dropping the inherited
/// members of the offending edge.
fn resolve_members(
    name: &'static str,
    classes: &HashMap<&'static str, &'static ClassFunctions>,
    fields: &HashMap<&'static str, Vec<&'static FieldFunctions>>,
    methods: &HashMap<&'static str, Vec<&'static MethodFunctions>>,
    resolved: &mut HashMap<&'static str, (Vec<FieldAccessor>, Vec<MethodAccessor>)>,
    stack: &mut Vec<&'static str>,
) -> (Vec<FieldAccessor>, Vec<MethodAccessor>) {
    if let Some(done) = resolved.get(name) {
        return done.clone();
    }
    if stack.contains(&name) {
        log::warn!("base-class cycle through `{name}`; inherited members skipped");
        return (Vec::new(), Vec::new());
    }
    stack.push(name);

    let mut field_list: Vec<FieldAccessor> = fields
        .get(name)
        .map(|list| list.iter().copied().map(FieldAccessor::own).collect())
        .unwrap_or_default();
    let mut method_list: Vec<MethodAccessor> = methods
        .get(name)
        .map(|list| list.iter().copied().map(MethodAccessor::own).collect())
        .unwrap_or_default();

    if let Some(class) = classes.get(name) {
        for &projection in class.bases {
            let (base_fields, base_methods) = resolve_members(
                projection.field_type_name,
                classes,
                fields,
                methods,
                resolved,
                stack,
            );
            field_list.extend(base_fields.iter().map(|accessor| accessor.through(projection)));
            method_list.extend(base_methods.iter().map(|accessor| accessor.through(projection)));
        }
    }

    stack.pop();
    resolved.insert(name, (field_list.clone(), method_list.clone()));
    (field_list, method_list)
}

//! Static type naming.
//!
//! Registry tables are keyed by the *unqualified* type name; qualified paths
//! exist only for diagnostics and for types whose short name would otherwise
//! be ambiguous.

// -----------------------------------------------------------------------------
// TypeName

/// Static access to a type's registry name.
///
/// `type_name` is the unqualified name used as the key in every registry
/// table. `type_path` may additionally carry a module path (set through
/// `#[reflected(path = "...")]` in the derive); it defaults to the bare name.
///
/// # Examples
///
/// ```
/// use rv_reflect::info::TypeName;
///
/// assert_eq!(<i32 as TypeName>::type_name(), "i32");
/// assert_eq!(<String as TypeName>::type_path(), "String");
/// ```
pub trait TypeName {
    /// Returns the unqualified type name.
    fn type_name() -> &'static str;

    /// Returns the qualified type path.
    #[inline]
    fn type_path() -> &'static str {
        Self::type_name()
    }
}

// -----------------------------------------------------------------------------
// Primitive impls

macro_rules! impl_type_name {
    ($($ty:ty),* $(,)?) => {$(
        impl TypeName for $ty {
            #[inline(always)]
            fn type_name() -> &'static str {
                stringify!($ty)
            }
        }
    )*};
}

impl_type_name!(bool, char);
impl_type_name!(u8, u16, u32, u64, usize);
impl_type_name!(i8, i16, i32, i64, isize);
impl_type_name!(f32, f64);

impl TypeName for String {
    #[inline(always)]
    fn type_name() -> &'static str {
        "String"
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeName;

    #[test]
    fn primitive_names() {
        assert_eq!(<u32 as TypeName>::type_name(), "u32");
        assert_eq!(<f64 as TypeName>::type_name(), "f64");
        assert_eq!(<String as TypeName>::type_name(), "String");
        assert_eq!(<bool as TypeName>::type_path(), "bool");
    }
}

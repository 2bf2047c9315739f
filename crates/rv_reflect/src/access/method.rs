use core::any::Any;
use core::fmt;

use crate::access::InvokeError;
use crate::registry::{FieldFunctions, MethodFunctions};

// -----------------------------------------------------------------------------
// MethodAccessor

/// Dynamic invocation of one method of a registered type.
///
/// Arguments travel as a boxed list and the return value comes back boxed;
/// the generated invoker checks the receiver type, the argument count and
/// every argument type before calling through.
///
/// # Examples
///
/// ```
/// use rv_reflect::Registry;
/// use rv_reflect::derive::{Reflected, reflect_impl};
///
/// #[derive(Reflected, Default)]
/// struct Counter {
///     #[reflected]
///     count: i32,
/// }
///
/// #[reflect_impl]
/// impl Counter {
///     #[reflected]
///     fn add(&mut self, amount: i32) -> i32 {
///         self.count += amount;
///         self.count
///     }
/// }
///
/// let meta = Registry::global().type_meta("Counter");
/// let method = meta.method("add").unwrap();
///
/// let mut counter = Counter { count: 2 };
/// let result = method.invoke_as::<i32>(&mut counter, vec![Box::new(3_i32)]).unwrap();
/// assert_eq!(result, 5);
/// ```
#[derive(Clone)]
pub struct MethodAccessor {
    projections: Vec<&'static FieldFunctions>,
    functions: &'static MethodFunctions,
}

impl MethodAccessor {
    /// Wraps a bundle for a directly declared method.
    pub(crate) fn own(functions: &'static MethodFunctions) -> Self {
        Self {
            projections: Vec::new(),
            functions,
        }
    }

    /// Returns a copy of this accessor reached through one more projection.
    pub(crate) fn through(&self, projection: &'static FieldFunctions) -> Self {
        let mut projections = Vec::with_capacity(self.projections.len() + 1);
        projections.push(projection);
        projections.extend_from_slice(&self.projections);
        Self {
            projections,
            functions: self.functions,
        }
    }

    /// The name of the method.
    #[inline]
    pub fn method_name(&self) -> &'static str {
        self.functions.method_name
    }

    /// The name of the type declaring the method.
    #[inline]
    pub fn owner_type_name(&self) -> &'static str {
        self.functions.owner_type_name
    }

    /// Invokes the method on an erased receiver.
    pub fn invoke(
        &self,
        receiver: &mut dyn Any,
        args: Vec<Box<dyn Any>>,
    ) -> Result<Box<dyn Any>, InvokeError> {
        let mut current = receiver;
        for projection in &self.projections {
            current = (projection.get_mut)(current)?;
        }
        (self.functions.invoke)(current, args)
    }

    /// Invokes the method and downcasts the boxed return value to `R`.
    pub fn invoke_as<R: Any>(
        &self,
        receiver: &mut dyn Any,
        args: Vec<Box<dyn Any>>,
    ) -> Result<R, InvokeError> {
        let returned = self.invoke(receiver, args)?;
        returned
            .downcast::<R>()
            .map(|boxed| *boxed)
            .map_err(|_| InvokeError::ReturnType {
                expected: core::any::type_name::<R>(),
            })
    }
}

impl fmt::Debug for MethodAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodAccessor")
            .field("owner", &self.functions.owner_type_name)
            .field("method", &self.functions.method_name)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Modules

mod match_reflected;

mod enum_kind;
mod struct_kind;

mod auto_register;
mod methods;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_reflected::match_reflected_impls;
pub(crate) use methods::impl_methods;

use auto_register::get_auto_register_impl;
use enum_kind::impl_enum;
use struct_kind::impl_struct;

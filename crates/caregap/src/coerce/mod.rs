//! Type coercion layer: raw scalars in, typed values or absence out.

mod handler;
mod value;

pub use handler::{Coerced, DateHandler, EnumHandler, Handler, DEFAULT_DATE_FORMAT};
pub use value::{EnumValue, RawValue, TypedValue};
pub(crate) use value::in_i64_range;

//! Schema registry: the fixed set of named entities and their typed columns.

mod column;
mod entities;
mod enums;
mod registry;
mod table;
mod types;

pub use column::{ColumnDescriptor, ColumnOptions, ColumnSpec};
pub use registry::{RegistryOptions, SchemaRegistry, ALL_ENTITIES, MEMBER_SOURCE};
pub use table::{quote_ident, EntityDescriptor, EntitySpec, MEMBER_TABLE};
pub use types::{Cardinality, ColumnKind, DataType, EnumDomain};

/// Closed token sets used by the registry's enum columns.
pub mod domains {
    pub use super::enums::*;
}

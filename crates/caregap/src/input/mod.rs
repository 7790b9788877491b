//! Source file parsing and partition-tagged row collections.

mod loader;
mod parser;
mod source;

pub use loader::{load_partition_dir, load_sources, logical_name, HOLDOUT_SUFFIX};
pub use parser::Parser;
pub use source::{DataTable, SourceMetadata, SourceRow, SourceTable, ID_COLUMN};

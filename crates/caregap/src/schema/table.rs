//! Entity-level schema definition.

use super::column::{ColumnDescriptor, ColumnSpec};
use super::types::Cardinality;

/// Name of the identity table.
pub const MEMBER_TABLE: &str = "member";

/// Static declaration of one satellite entity.
#[derive(Debug, Clone, Copy)]
pub struct EntitySpec {
    /// Logical source name (file stem).
    pub name: &'static str,
    /// Storage table name.
    pub table: &'static str,
    pub cardinality: Cardinality,
    /// Attributes, excluding the `id` surrogate and `member_id` key.
    pub columns: &'static [ColumnSpec],
}

/// A resolved entity: storage table plus ordered, handler-bound columns.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    pub name: &'static str,
    pub table: &'static str,
    pub cardinality: Cardinality,
    pub columns: Vec<ColumnDescriptor>,
}

impl EntityDescriptor {
    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in declaration order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// True for one-to-one satellites, which take part in the wide join.
    pub fn is_joinable(&self) -> bool {
        self.cardinality == Cardinality::OneToOne
    }

    /// `CREATE TABLE` statement for this entity.
    pub fn create_sql(&self) -> String {
        let mut definitions = vec![
            "\"id\" INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
            format!("\"member_id\" INTEGER REFERENCES {MEMBER_TABLE}(member_id)"),
        ];
        definitions.extend(
            self.columns
                .iter()
                .map(|c| format!("{} {}", quote_ident(c.name), c.kind.sql_type())),
        );
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(self.table),
            definitions.join(", ")
        )
    }

    /// Parameterized `INSERT` with `member_id` first, then every column.
    pub fn insert_sql(&self) -> String {
        let mut names = vec![quote_ident("member_id")];
        names.extend(self.columns.iter().map(|c| quote_ident(c.name)));
        let placeholders = vec!["?"; names.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            quote_ident(self.table),
            names.join(", ")
        )
    }
}

/// Quote an SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

//! Source tables and file provenance.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coerce::{in_i64_range, RawValue};
use crate::error::{CaregapError, Result};
use crate::schema::{ColumnKind, DataType};

/// Name of the source column carrying the member id.
pub const ID_COLUMN: &str = "id";

/// Metadata about one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Parsed tabular data as strings.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }
}

/// One source row, tagged with the partition of the directory it came from.
///
/// Fields are kept as read; columns the row's file lacked hold an empty field.
#[derive(Debug, Clone)]
pub struct SourceRow {
    pub partition: DataType,
    pub fields: Vec<String>,
}

impl SourceRow {
    /// Decoded value of a field, guessing its type from the text.
    pub fn value(&self, idx: usize) -> RawValue {
        self.fields
            .get(idx)
            .map_or(RawValue::Null, |f| RawValue::parse_field(f))
    }

    /// Decoded value of a field bound to a column of a known kind.
    pub fn value_as(&self, idx: usize, kind: ColumnKind) -> RawValue {
        self.fields
            .get(idx)
            .map_or(RawValue::Null, |f| RawValue::parse_field_as(f, kind))
    }
}

/// All rows for one logical source, across both partitions.
#[derive(Debug, Clone)]
pub struct SourceTable {
    /// Logical name (file stem without the holdout suffix).
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<SourceRow>,
    /// Files that contributed rows.
    pub files: Vec<SourceMetadata>,
}

impl SourceTable {
    /// Create an empty table with the given columns.
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Create an empty table from string column names.
    pub fn with_headers(name: impl Into<String>, headers: &[&str]) -> Self {
        Self::new(name, headers.iter().map(|h| h.to_string()).collect())
    }

    /// Append a row of raw CSV fields, in this table's header order.
    pub fn push_fields<S: AsRef<str>>(&mut self, partition: DataType, fields: &[S]) {
        let mut fields: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();
        fields.resize(self.headers.len(), String::new());
        self.rows.push(SourceRow { partition, fields });
    }

    /// Append a parsed file, aligning its columns to this table by header name.
    ///
    /// Columns new to this table are added; earlier rows get nulls for them.
    pub fn append(&mut self, table: DataTable, partition: DataType, metadata: SourceMetadata) {
        let mapping: Vec<usize> = table
            .headers
            .iter()
            .map(|h| match self.column_index(h) {
                Some(i) => i,
                None => {
                    self.headers.push(h.clone());
                    self.headers.len() - 1
                }
            })
            .collect();

        let width = self.headers.len();
        for row in &mut self.rows {
            row.fields.resize(width, String::new());
        }

        for row in table.rows {
            let mut fields = vec![String::new(); width];
            for (field, &target) in row.into_iter().zip(&mapping) {
                fields[target] = field;
            }
            self.rows.push(SourceRow { partition, fields });
        }

        self.files.push(metadata);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the member id column.
    pub fn id_index(&self) -> Result<usize> {
        self.column_index(ID_COLUMN)
            .ok_or_else(|| CaregapError::MissingColumn {
                source_name: self.name.clone(),
                column: ID_COLUMN.to_string(),
            })
    }

    /// Member id of a row, read from the `id` column.
    pub fn member_id(&self, row_idx: usize, id_index: usize) -> Result<i64> {
        let value = self
            .rows
            .get(row_idx)
            .map_or(RawValue::Null, |r| r.value(id_index));
        match value {
            RawValue::Int(i) => Ok(i),
            RawValue::Float(f) if f.fract() == 0.0 && in_i64_range(f) => Ok(f as i64),
            other => Err(CaregapError::Parse {
                row: row_idx + 1,
                column: id_index + 1,
                message: format!("'{}' has invalid member id {other}", self.name),
            }),
        }
    }

    /// Distinct member ids of the rows tagged with a partition.
    pub fn member_ids(&self, partition: DataType) -> Result<BTreeSet<i64>> {
        let id_index = self.id_index()?;
        let mut ids = BTreeSet::new();
        for (row_idx, row) in self.rows.iter().enumerate() {
            if row.partition == partition {
                ids.insert(self.member_id(row_idx, id_index)?);
            }
        }
        Ok(ids)
    }

    /// Keep only rows whose member id satisfies the predicate.
    pub fn retain_members(&mut self, mut keep: impl FnMut(i64) -> bool) -> Result<()> {
        let id_index = self.id_index()?;
        let mut kept = Vec::with_capacity(self.rows.len());
        for row_idx in 0..self.rows.len() {
            if keep(self.member_id(row_idx, id_index)?) {
                kept.push(row_idx);
            }
        }
        let mut rows = std::mem::take(&mut self.rows);
        let mut position = 0;
        rows.retain(|_| {
            let retained = kept.binary_search(&position).is_ok();
            position += 1;
            retained
        });
        self.rows = rows;
        Ok(())
    }
}

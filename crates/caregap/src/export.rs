//! Wide-table export: members joined with every one-to-one entity.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::coerce::RawValue;
use crate::error::{CaregapError, Result};
use crate::progress;
use crate::schema::{quote_ident, ColumnKind, SchemaRegistry, MEMBER_TABLE};
use crate::store::{decode_value, Store};

/// Default number of rows buffered before each write.
pub const DEFAULT_FETCH_SIZE: usize = 5000;

/// Leading columns of the wide table.
pub const KEY_COLUMNS: [&str; 2] = ["id", "data_type"];

/// How one-to-one entities are joined to members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// Members missing a row in any entity are dropped.
    #[default]
    Inner,
    /// Every member is kept; missing entity rows become empty cells.
    LeftOuter,
}

impl JoinMode {
    fn keyword(&self) -> &'static str {
        match self {
            JoinMode::Inner => "JOIN",
            JoinMode::LeftOuter => "LEFT JOIN",
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize)]
pub struct ExportConfig {
    /// Rows buffered per write.
    pub fetch_size: usize,
    pub join: JoinMode,
    /// Draw a progress bar.
    pub show_progress: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fetch_size: DEFAULT_FETCH_SIZE,
            join: JoinMode::Inner,
            show_progress: false,
        }
    }
}

impl ExportConfig {
    pub fn with_fetch_size(mut self, fetch_size: usize) -> Self {
        self.fetch_size = fetch_size;
        self
    }

    pub fn with_join(mut self, join: JoinMode) -> Self {
        self.join = join;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Summary of an export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    /// Members in the store.
    pub member_total: usize,
    /// Data rows written.
    pub rows_written: usize,
    /// Members absent from the output.
    pub dropped: usize,
    /// Columns written, including the two key columns.
    pub columns: usize,
}

/// Header of the wide table: key columns, then entity columns in registry order.
pub fn wide_columns(registry: &SchemaRegistry) -> Vec<&'static str> {
    let mut columns = KEY_COLUMNS.to_vec();
    for entity in registry.joinable() {
        columns.extend(entity.column_names());
    }
    columns
}

/// Query selecting the wide table, ordered by member id.
pub fn wide_query(registry: &SchemaRegistry, join: JoinMode) -> String {
    let mut select = vec!["m.member_id".to_string(), "m.data_type".to_string()];
    let mut from = format!("{MEMBER_TABLE} AS m");

    for (i, entity) in registry.joinable().enumerate() {
        let alias = format!("t{i}");
        select.extend(
            entity
                .columns
                .iter()
                .map(|c| format!("{alias}.{}", quote_ident(c.name))),
        );
        from.push_str(&format!(
            "\n{} {} AS {alias} ON {alias}.member_id = m.member_id",
            join.keyword(),
            quote_ident(entity.table)
        ));
    }

    format!(
        "SELECT {}\nFROM {from}\nORDER BY m.member_id",
        select.join(", ")
    )
}

/// Text form of a cell in the wide table.
///
/// Integral floats keep one decimal place.
pub fn format_cell(value: &RawValue) -> String {
    match value {
        RawValue::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
        RawValue::Float(f) => f.to_string(),
        other => other.to_text(),
    }
}

/// Streams the wide table out of a store.
pub struct Exporter<'a> {
    store: &'a Store,
    registry: &'a SchemaRegistry,
    config: ExportConfig,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a Store, registry: &'a SchemaRegistry) -> Self {
        Self {
            store,
            registry,
            config: ExportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Write the wide table to a CSV file, creating parent directories.
    pub fn export_to_path(&self, path: impl AsRef<Path>) -> Result<ExportReport> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(CaregapError::Config(format!(
                "output path '{}' is a directory",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CaregapError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let file = File::create(path).map_err(|e| CaregapError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let report = self.export(BufWriter::new(file))?;
        info!(path = %path.display(), rows = report.rows_written, "Wrote wide table");
        Ok(report)
    }

    /// Write the wide table as CSV to any writer.
    pub fn export<W: Write>(&self, writer: W) -> Result<ExportReport> {
        if self.config.fetch_size == 0 {
            return Err(CaregapError::Config(
                "fetch size must be at least 1".to_string(),
            ));
        }

        let header = wide_columns(self.registry);
        let mut kinds = vec![ColumnKind::Integer, ColumnKind::Text];
        for entity in self.registry.joinable() {
            kinds.extend(entity.columns.iter().map(|c| c.kind));
        }

        let member_total = self.store.member_count()?;
        let query = wide_query(self.registry, self.config.join);
        debug!(columns = header.len(), join = ?self.config.join, "Running wide query");

        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&header)?;

        let pb = progress::bar(member_total as u64, self.config.show_progress, "members");
        pb.set_message("export");

        let mut stmt = self.store.connection().prepare(&query)?;
        let mut rows = stmt.query([])?;
        let mut batch: Vec<Vec<String>> = Vec::with_capacity(self.config.fetch_size);
        let mut rows_written = 0;

        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(kinds.len());
            for (i, kind) in kinds.iter().enumerate() {
                record.push(format_cell(&decode_value(*kind, row.get_ref(i)?)));
            }
            batch.push(record);

            if batch.len() >= self.config.fetch_size {
                rows_written += flush(&mut out, &mut batch)?;
                pb.set_position(rows_written as u64);
            }
        }
        rows_written += flush(&mut out, &mut batch)?;
        out.flush().map_err(|e| CaregapError::Io {
            path: "<export>".into(),
            source: e,
        })?;
        pb.finish_and_clear();

        if rows_written != member_total {
            warn!(
                members = member_total,
                rows = rows_written,
                join = ?self.config.join,
                "Wide table row count differs from member count"
            );
        }

        Ok(ExportReport {
            member_total,
            rows_written,
            dropped: member_total.saturating_sub(rows_written),
            columns: header.len(),
        })
    }
}

fn flush<W: Write>(out: &mut csv::Writer<W>, batch: &mut Vec<Vec<String>>) -> Result<usize> {
    let n = batch.len();
    for record in batch.drain(..) {
        out.write_record(&record)?;
    }
    Ok(n)
}

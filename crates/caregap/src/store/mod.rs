//! Relational store backed by SQLite.
//!
//! A [`Store`] owns one connection. It is opened explicitly, usually from the
//! `DB_CONNECTION_STRING` environment variable, and passed by reference to the
//! ingestion and export stages.

mod batch;

use std::path::PathBuf;

use chrono::NaiveDate;
use rusqlite::types::{Value, ValueRef};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::coerce::{RawValue, TypedValue};
use crate::error::{CaregapError, Result};
use crate::schema::{quote_ident, ColumnKind, DataType, EntityDescriptor, SchemaRegistry, MEMBER_TABLE};

pub use batch::BatchWriter;

/// Environment variable holding the store connection string.
pub const CONNECTION_ENV: &str = "DB_CONNECTION_STRING";

const SQLITE_SCHEME: &str = "sqlite://";
const MEMORY: &str = ":memory:";

/// Where a connection string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Memory,
    File(PathBuf),
}

impl Location {
    /// Parse `sqlite://<path>`, `sqlite::memory:`, `:memory:` or a bare path.
    pub fn parse(connection_string: &str) -> Result<Self> {
        let s = connection_string.trim();
        if s.is_empty() {
            return Err(CaregapError::Config("connection string is empty".to_string()));
        }
        if s == MEMORY || s == "sqlite::memory:" {
            return Ok(Location::Memory);
        }
        if let Some(path) = s.strip_prefix(SQLITE_SCHEME) {
            return match path {
                "" => Err(CaregapError::Config(format!(
                    "connection string '{s}' has no database path"
                ))),
                MEMORY => Ok(Location::Memory),
                _ => Ok(Location::File(PathBuf::from(path))),
            };
        }
        if let Some((scheme, _)) = s.split_once("://") {
            return Err(CaregapError::Config(format!(
                "unsupported store scheme '{scheme}'"
            )));
        }
        Ok(Location::File(PathBuf::from(s)))
    }
}

/// Validate a connection string read from the environment.
pub fn connection_string_from(value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CaregapError::Config(format!(
            "{CONNECTION_ENV} is not set"
        ))),
    }
}

/// Convert a coerced value to its stored form.
///
/// Booleans are stored as 0/1, enum values as their token, dates as ISO-8601
/// text. A NaN float is stored as NULL.
pub fn sql_value(value: Option<&TypedValue>) -> Value {
    match value {
        None => Value::Null,
        Some(TypedValue::Float(f)) if f.is_nan() => Value::Null,
        Some(TypedValue::Float(f)) => Value::Real(*f),
        Some(TypedValue::Integer(i)) => Value::Integer(*i),
        Some(TypedValue::Boolean(b)) => Value::Integer(i64::from(*b)),
        Some(TypedValue::Text(s)) => Value::Text(s.clone()),
        Some(TypedValue::Enum(e)) => Value::Text(e.token().to_string()),
        Some(TypedValue::Date(d)) => Value::Text(d.format("%Y-%m-%d").to_string()),
    }
}

/// Decode a stored cell back into a raw scalar, guided by the column kind.
pub fn decode_value(kind: ColumnKind, value: ValueRef<'_>) -> RawValue {
    match (kind, value) {
        (_, ValueRef::Null) => RawValue::Null,
        (ColumnKind::Boolean, ValueRef::Integer(i)) => RawValue::Bool(i != 0),
        (ColumnKind::Float, ValueRef::Integer(i)) => RawValue::Float(i as f64),
        (_, ValueRef::Integer(i)) => RawValue::Int(i),
        (_, ValueRef::Real(f)) => RawValue::Float(f),
        (ColumnKind::Date, ValueRef::Text(t)) => {
            let text = String::from_utf8_lossy(t);
            match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                Ok(d) => RawValue::Date(d),
                Err(_) => RawValue::Text(text.into_owned()),
            }
        }
        (_, ValueRef::Text(t)) => RawValue::Text(String::from_utf8_lossy(t).into_owned()),
        (_, ValueRef::Blob(b)) => RawValue::Text(String::from_utf8_lossy(b).into_owned()),
    }
}

/// An open connection to the relational store.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open a store from a connection string.
    pub fn open(connection_string: &str) -> Result<Self> {
        let location = Location::parse(connection_string)?;
        let conn = match &location {
            Location::Memory => Connection::open_in_memory()?,
            Location::File(path) => {
                if path.is_dir() {
                    return Err(CaregapError::Config(format!(
                        "store path '{}' is a directory",
                        path.display()
                    )));
                }
                Connection::open(path)?
            }
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        debug!(?location, "Opened store");
        Ok(Self { conn })
    }

    /// Open the store named by `DB_CONNECTION_STRING`.
    pub fn from_env() -> Result<Self> {
        let connection_string = connection_string_from(std::env::var(CONNECTION_ENV).ok())?;
        Self::open(&connection_string)
    }

    /// Open a private in-memory store.
    pub fn in_memory() -> Result<Self> {
        Self::open(MEMORY)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the member table and one table per registry entity.
    pub fn init_schema(&self, registry: &SchemaRegistry) -> Result<()> {
        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {MEMBER_TABLE} (\
             member_id INTEGER PRIMARY KEY, data_type TEXT NOT NULL);\n"
        );
        for entity in registry.all().values() {
            sql.push_str(&entity.create_sql());
            sql.push_str(";\n");
        }
        self.conn.execute_batch(&sql)?;
        info!(tables = registry.len() + 1, "Initialized store schema");
        Ok(())
    }

    /// Batched writer for member rows `(member_id, data_type)`.
    pub fn member_writer(&self, commit_interval: usize) -> Result<BatchWriter<'_>> {
        let sql = format!("INSERT INTO {MEMBER_TABLE} (member_id, data_type) VALUES (?, ?)");
        BatchWriter::new(&self.conn, &sql, MEMBER_TABLE, commit_interval)
    }

    /// Batched writer for one entity, taking `member_id` then every column.
    pub fn entity_writer(
        &self,
        entity: &EntityDescriptor,
        commit_interval: usize,
    ) -> Result<BatchWriter<'_>> {
        BatchWriter::new(&self.conn, &entity.insert_sql(), entity.table, commit_interval)
    }

    pub fn member_count(&self) -> Result<usize> {
        self.count(MEMBER_TABLE)
    }

    /// Number of rows stored for an entity.
    pub fn row_count(&self, entity: &EntityDescriptor) -> Result<usize> {
        self.count(entity.table)
    }

    fn count(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let n: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Stored members ordered by id.
    pub fn members(&self) -> Result<Vec<(i64, DataType)>> {
        let sql = format!("SELECT member_id, data_type FROM {MEMBER_TABLE} ORDER BY member_id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;

        let mut members = Vec::new();
        for row in rows {
            let (id, data_type) = row?;
            members.push((id, data_type.parse()?));
        }
        Ok(members)
    }

    /// Values of one column in insertion order, decoded per the column kind.
    pub fn read_column(&self, entity: &EntityDescriptor, column: &str) -> Result<Vec<RawValue>> {
        let descriptor = entity.column(column).ok_or_else(|| CaregapError::MissingColumn {
            source_name: entity.name.to_string(),
            column: column.to_string(),
        })?;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            quote_ident(descriptor.name),
            quote_ident(entity.table)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            values.push(decode_value(descriptor.kind, row.get_ref(0)?));
        }
        Ok(values)
    }
}

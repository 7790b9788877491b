//! Core type definitions for the schema registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaregapError;

/// Partition a member belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataType {
    Training,
    Holdout,
}

impl DataType {
    /// Both partitions, in ingestion order.
    pub const ALL: [DataType; 2] = [DataType::Training, DataType::Holdout];

    /// Stored and exported representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Training => "Training",
            DataType::Holdout => "Holdout",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = CaregapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Training" => Ok(DataType::Training),
            "Holdout" => Ok(DataType::Holdout),
            other => Err(CaregapError::Config(format!("unknown data type '{other}'"))),
        }
    }
}

/// How many rows an entity contributes per member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// At most one row per member; joined into the wide table.
    OneToOne,
    /// Zero or many rows per member (claims, conditions); never joined.
    OneToMany,
}

/// A closed set of external string tokens.
///
/// A token's internal value is its ordinal within the domain.
pub struct EnumDomain {
    name: &'static str,
    tokens: &'static [&'static str],
}

impl EnumDomain {
    pub const fn new(name: &'static str, tokens: &'static [&'static str]) -> Self {
        Self { name, tokens }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Tokens in declaration order.
    pub fn tokens(&self) -> &'static [&'static str] {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Debug for EnumDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumDomain({}, {} tokens)", self.name, self.tokens.len())
    }
}

/// Statically declared variant tag for a registry column.
#[derive(Debug, Clone, Copy)]
pub enum ColumnKind {
    Float,
    Integer,
    Boolean,
    Text,
    Enum(&'static EnumDomain),
    Date,
}

impl ColumnKind {
    /// SQL column type used by the relational store.
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Float => "REAL",
            ColumnKind::Integer | ColumnKind::Boolean => "INTEGER",
            ColumnKind::Text | ColumnKind::Enum(_) | ColumnKind::Date => "TEXT",
        }
    }

    /// Short name for logs and listings.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Float => "float",
            ColumnKind::Integer => "integer",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Text => "text",
            ColumnKind::Enum(_) => "enum",
            ColumnKind::Date => "date",
        }
    }
}

//! Raw scalar values read from sources and the typed values handlers produce.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::schema::{ColumnKind, EnumDomain};

/// Tokens read as missing values, following the usual CSV reader defaults.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A raw scalar as read from a source file or back from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// The null sentinel.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl RawValue {
    /// Decode a single CSV field.
    pub fn parse_field(field: &str) -> Self {
        let trimmed = field.trim();
        if Self::is_null_token(trimmed) {
            return RawValue::Null;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return RawValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return RawValue::Bool(false);
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return RawValue::Int(i);
        }
        if looks_numeric(trimmed) {
            if let Ok(f) = trimmed.parse::<f64>() {
                return RawValue::Float(f);
            }
        }
        RawValue::Text(field.to_string())
    }

    /// Decode a CSV field bound to a column of a known kind.
    ///
    /// Text and enum columns keep the source text as is; other kinds fall
    /// back to [`RawValue::parse_field`].
    pub fn parse_field_as(field: &str, kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Text | ColumnKind::Enum(_) if !Self::is_null_token(field.trim()) => {
                RawValue::Text(field.to_string())
            }
            _ => Self::parse_field(field),
        }
    }

    /// Check if a field represents a missing value.
    pub fn is_null_token(value: &str) -> bool {
        NULL_TOKENS.contains(&value)
    }

    /// True for the null sentinel, including a NaN float.
    pub fn is_null(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Type name used in coercion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::Text(_) => "text",
            RawValue::Date(_) => "date",
            RawValue::DateTime(_) => "datetime",
        }
    }

    /// Stringified form used by the text and date handlers.
    ///
    /// Integral floats drop the fractional part so that numeric date keys
    /// such as `20211231.0` still parse against `%Y%m%d`.
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Null => String::new(),
            RawValue::Bool(true) => "True".to_string(),
            RawValue::Bool(false) => "False".to_string(),
            RawValue::Int(i) => i.to_string(),
            RawValue::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", *f as i64)
            }
            RawValue::Float(f) => f.to_string(),
            RawValue::Text(s) => s.clone(),
            RawValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            RawValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => f.write_str("<null>"),
            RawValue::Text(s) => write!(f, "'{s}'"),
            other => f.write_str(&other.to_text()),
        }
    }
}

/// True when a float truncates to an `i64` without saturating.
pub(crate) fn in_i64_range(f: f64) -> bool {
    f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Restrict float parsing to decimal literals so words like "inf" stay text.
fn looks_numeric(s: &str) -> bool {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    body.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '.')
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
}

/// A value from a closed enum domain.
#[derive(Clone, Copy)]
pub struct EnumValue {
    domain: &'static EnumDomain,
    ordinal: usize,
}

impl EnumValue {
    pub(crate) fn new(domain: &'static EnumDomain, ordinal: usize) -> Self {
        Self { domain, ordinal }
    }

    pub fn domain(&self) -> &'static EnumDomain {
        self.domain
    }

    /// Position of the token in the domain's declaration order.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// External token, as stored and exported.
    pub fn token(&self) -> &'static str {
        self.domain.tokens()[self.ordinal]
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.domain, other.domain) && self.ordinal == other.ordinal
    }
}

impl Eq for EnumValue {}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{:?}", self.domain.name(), self.token())
    }
}

/// A coerced value ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Float(f64),
    Integer(i64),
    Boolean(bool),
    Text(String),
    Enum(EnumValue),
    Date(NaiveDate),
}

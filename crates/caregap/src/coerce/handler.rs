//! Per-column handlers converting raw scalars into typed values.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::CoercionError;
use crate::schema::{ColumnKind, EnumDomain};

use super::value::{in_i64_range, EnumValue, RawValue, TypedValue};

/// Date format used when a date column has no configured format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of a single coercion: a typed value, absence, or a failure.
pub type Coerced = Result<Option<TypedValue>, CoercionError>;

/// A typed value-coercion unit bound to one column.
#[derive(Debug, Clone)]
pub enum Handler {
    Float,
    Integer,
    Boolean,
    Text,
    Enum(EnumHandler),
    Date(DateHandler),
}

impl Handler {
    /// Build the handler for a column kind.
    pub fn for_kind(kind: ColumnKind, date_format: Option<&str>) -> Self {
        match kind {
            ColumnKind::Float => Handler::Float,
            ColumnKind::Integer => Handler::Integer,
            ColumnKind::Boolean => Handler::Boolean,
            ColumnKind::Text => Handler::Text,
            ColumnKind::Enum(domain) => Handler::Enum(EnumHandler::new(domain)),
            ColumnKind::Date => {
                Handler::Date(DateHandler::new(date_format.unwrap_or(DEFAULT_DATE_FORMAT)))
            }
        }
    }

    /// Coerce a raw value.
    ///
    /// The float handler is the only one that does not normalize the null
    /// sentinel to absence: it returns `Some(TypedValue::Float(NaN))`.
    pub fn handle(&self, raw: &RawValue) -> Coerced {
        match self {
            Handler::Float => handle_float(raw),
            Handler::Integer => handle_integer(raw),
            Handler::Boolean => Ok(handle_boolean(raw)),
            Handler::Text => Ok(handle_text(raw)),
            Handler::Enum(h) => h.handle(raw),
            Handler::Date(h) => h.handle(raw),
        }
    }

    /// Number of enum tokens; zero for non-enum handlers.
    pub fn cardinality(&self) -> usize {
        match self {
            Handler::Enum(h) => h.len(),
            _ => 0,
        }
    }

    /// One-hot vector of length `cardinality() + 1`.
    ///
    /// Index 0 means "no mapped value". Non-enum handlers always yield `[1]`.
    pub fn to_onehot(&self, value: Option<&TypedValue>) -> Result<Vec<u8>, CoercionError> {
        match self {
            Handler::Enum(h) => h.to_onehot(value),
            _ => Ok(vec![1]),
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Handler::Date(_))
    }
}

fn handle_float(raw: &RawValue) -> Coerced {
    let f = match raw {
        RawValue::Null => f64::NAN,
        RawValue::Float(f) => *f,
        RawValue::Int(i) => *i as f64,
        RawValue::Bool(b) => f64::from(u8::from(*b)),
        RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| CoercionError::NotNumeric {
            value: s.clone(),
        })?,
        other => {
            return Err(CoercionError::UnexpectedType {
                expected: "number",
                found: other.type_name(),
            });
        }
    };
    Ok(Some(TypedValue::Float(f)))
}

fn handle_integer(raw: &RawValue) -> Coerced {
    if raw.is_null() {
        return Ok(None);
    }
    match raw {
        RawValue::Int(i) => Ok(Some(TypedValue::Integer(*i))),
        RawValue::Bool(b) => Ok(Some(TypedValue::Integer(i64::from(*b)))),
        RawValue::Float(f) if in_i64_range(*f) => Ok(Some(TypedValue::Integer(f.trunc() as i64))),
        // Infinite values cannot be truncated and are treated as missing.
        RawValue::Float(f) if f.is_infinite() => Ok(None),
        RawValue::Float(f) => Err(CoercionError::NotNumeric {
            value: f.to_string(),
        }),
        RawValue::Text(s) => Err(CoercionError::NotNumeric { value: s.clone() }),
        other => Err(CoercionError::UnexpectedType {
            expected: "number",
            found: other.type_name(),
        }),
    }
}

fn handle_boolean(raw: &RawValue) -> Option<TypedValue> {
    match raw {
        RawValue::Bool(b) => Some(TypedValue::Boolean(*b)),
        RawValue::Int(i) => Some(TypedValue::Boolean(*i != 0)),
        RawValue::Float(f) if f.is_finite() => Some(TypedValue::Boolean(f.trunc() != 0.0)),
        _ => None,
    }
}

fn handle_text(raw: &RawValue) -> Option<TypedValue> {
    match raw {
        RawValue::Null => None,
        RawValue::Float(f) if f.is_nan() => None,
        RawValue::Text(s) => Some(TypedValue::Text(s.clone())),
        other => Some(TypedValue::Text(other.to_text())),
    }
}

/// Handler for columns backed by a closed token set.
#[derive(Debug, Clone)]
pub struct EnumHandler {
    domain: &'static EnumDomain,
    lookup: HashMap<&'static str, usize>,
    /// One-hot position (1-based) for each ordinal.
    positions: Vec<usize>,
}

impl EnumHandler {
    /// Build the token lookup and assign one-hot positions.
    ///
    /// Positions follow the lexical order of the tokens, not the domain's
    /// declaration order.
    pub fn new(domain: &'static EnumDomain) -> Self {
        let lookup: HashMap<&'static str, usize> = domain
            .tokens()
            .iter()
            .enumerate()
            .map(|(ordinal, token)| (*token, ordinal))
            .collect();

        let mut by_token: Vec<(usize, &str)> = domain.tokens().iter().copied().enumerate().collect();
        by_token.sort_by(|a, b| a.1.cmp(b.1));
        let mut positions = vec![0; domain.len()];
        for (position, (ordinal, _)) in by_token.into_iter().enumerate() {
            positions[ordinal] = position + 1;
        }

        Self {
            domain,
            lookup,
            positions,
        }
    }

    pub fn domain(&self) -> &'static EnumDomain {
        self.domain
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn handle(&self, raw: &RawValue) -> Coerced {
        match raw {
            RawValue::Text(token) => self
                .lookup
                .get(token.as_str())
                .map(|&ordinal| Some(TypedValue::Enum(EnumValue::new(self.domain, ordinal))))
                .ok_or_else(|| CoercionError::UnknownToken {
                    domain: self.domain.name(),
                    token: token.clone(),
                }),
            other if other.is_null() => Ok(None),
            other => Err(CoercionError::UnexpectedType {
                expected: "text",
                found: other.type_name(),
            }),
        }
    }

    /// Look up a token directly, without going through a raw value.
    pub fn value_of(&self, token: &str) -> Option<EnumValue> {
        self.lookup
            .get(token)
            .map(|&ordinal| EnumValue::new(self.domain, ordinal))
    }

    /// One-hot position of a value (1..=len).
    pub fn position(&self, value: &EnumValue) -> Option<usize> {
        if !std::ptr::eq(value.domain(), self.domain) {
            return None;
        }
        self.positions.get(value.ordinal()).copied()
    }

    pub fn to_onehot(&self, value: Option<&TypedValue>) -> Result<Vec<u8>, CoercionError> {
        let mut onehot = vec![0u8; self.len() + 1];
        let index = match value {
            None => 0,
            Some(TypedValue::Enum(v)) => {
                self.position(v)
                    .ok_or_else(|| CoercionError::UnknownToken {
                        domain: self.domain.name(),
                        token: v.token().to_string(),
                    })?
            }
            Some(_) => {
                return Err(CoercionError::UnexpectedType {
                    expected: "enum",
                    found: "non-enum value",
                });
            }
        };
        onehot[index] = 1;
        Ok(onehot)
    }
}

/// Handler for date columns with a configured parse format.
#[derive(Debug, Clone)]
pub struct DateHandler {
    format: String,
}

impl DateHandler {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn handle(&self, raw: &RawValue) -> Coerced {
        match raw {
            other if other.is_null() => Ok(None),
            RawValue::Date(d) => Ok(Some(TypedValue::Date(*d))),
            RawValue::DateTime(dt) => Ok(Some(TypedValue::Date(dt.date()))),
            other => {
                let text = other.to_text();
                NaiveDate::parse_from_str(text.trim(), &self.format)
                    .map(|d| Some(TypedValue::Date(d)))
                    .map_err(|_| CoercionError::DateFormat {
                        value: text,
                        format: self.format.clone(),
                    })
            }
        }
    }
}

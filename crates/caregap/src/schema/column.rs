//! Column declarations and their bound handlers.

use serde::{Deserialize, Serialize};

use crate::coerce::Handler;

use super::types::{ColumnKind, EnumDomain};

/// Static declaration of one entity attribute.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub const fn float(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Float,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Integer,
        }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Boolean,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
        }
    }

    pub const fn enumerated(name: &'static str, domain: &'static EnumDomain) -> Self {
        Self {
            name,
            kind: ColumnKind::Enum(domain),
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Date,
        }
    }
}

/// Optional per-column handler configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOptions {
    /// `strftime`-style format for date columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

impl ColumnOptions {
    pub fn date_format(format: impl Into<String>) -> Self {
        Self {
            date_format: Some(format.into()),
        }
    }
}

/// A registry column with its handler bound.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    /// Column name, shared by the source header and the store.
    pub name: &'static str,
    /// Declared variant tag.
    pub kind: ColumnKind,
    /// Handler built for this column.
    pub handler: Handler,
}

impl ColumnDescriptor {
    pub fn new(spec: &ColumnSpec, options: Option<&ColumnOptions>) -> Self {
        let date_format = options.and_then(|o| o.date_format.as_deref());
        Self {
            name: spec.name,
            kind: spec.kind,
            handler: Handler::for_kind(spec.kind, date_format),
        }
    }
}

//! Property-based tests for caregap handlers.
//!
//! These tests use proptest to generate inputs and verify that handlers keep
//! their invariants for every registry column.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p caregap --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p caregap --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use caregap::coerce::{EnumHandler, Handler};
use caregap::schema::{ColumnKind, EnumDomain};
use caregap::{RawValue, SchemaRegistry, TypedValue};

// =============================================================================
// Test Strategies
// =============================================================================

/// Every enum domain used by the registry.
fn domains() -> Vec<&'static EnumDomain> {
    let mut seen = HashSet::new();
    let mut domains = Vec::new();
    for entity in SchemaRegistry::global().all().values() {
        for column in &entity.columns {
            if let ColumnKind::Enum(domain) = column.kind {
                if seen.insert(domain.name()) {
                    domains.push(domain);
                }
            }
        }
    }
    domains
}

/// Every handler bound in the registry.
fn handlers() -> Vec<&'static Handler> {
    SchemaRegistry::global()
        .all()
        .values()
        .flat_map(|e| e.columns.iter().map(|c| &c.handler))
        .collect()
}

fn null_token() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>"])
}

fn field() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_\\-\\.\\s]{0,40}",
        "-?[0-9]{1,12}",
        "-?[0-9]{1,6}\\.[0-9]{1,6}",
        "[0-9]{2}[A-Z]{3}[0-9]{4}",
        ".{0,20}",
    ]
}

// =============================================================================
// Enum Handlers
// =============================================================================

#[test]
fn test_enum_tokens_map_to_distinct_values() {
    for domain in domains() {
        let handler = EnumHandler::new(domain);
        let mut values = Vec::new();
        for token in domain.tokens() {
            match handler.handle(&RawValue::Text(token.to_string())) {
                Ok(Some(TypedValue::Enum(v))) => {
                    assert_eq!(v.token(), *token);
                    assert!(!values.contains(&v), "{} repeats {token}", domain.name());
                    values.push(v);
                }
                other => panic!("{}: {token} gave {other:?}", domain.name()),
            }
        }
        assert_eq!(values.len(), domain.len());
    }
}

#[test]
fn test_enum_onehot_single_bit_never_zero() {
    for domain in domains() {
        let handler = Handler::Enum(EnumHandler::new(domain));
        let mut positions = HashSet::new();
        for token in domain.tokens() {
            let value = handler.handle(&RawValue::Text(token.to_string())).unwrap();
            let onehot = handler.to_onehot(value.as_ref()).unwrap();
            assert_eq!(onehot.len(), domain.len() + 1);
            assert_eq!(onehot.iter().filter(|b| **b == 1).count(), 1);
            assert_eq!(onehot[0], 0, "{}: {token}", domain.name());
            positions.insert(onehot.iter().position(|b| *b == 1));
        }
        assert_eq!(positions.len(), domain.len());

        let absent = handler.to_onehot(None).unwrap();
        assert_eq!(absent[0], 1);
    }
}

// =============================================================================
// Null Handling
// =============================================================================

proptest! {
    /// Every handler but Float maps the null sentinel to absence; Float keeps
    /// it as a NaN value.
    #[test]
    fn prop_null_sentinel_is_absence(token in null_token()) {
        let raw = RawValue::parse_field(token);
        prop_assert_eq!(&raw, &RawValue::Null);

        for handler in handlers() {
            let result = handler.handle(&raw).unwrap();
            match handler {
                Handler::Float => {
                    prop_assert!(matches!(result, Some(TypedValue::Float(f)) if f.is_nan()));
                }
                _ => prop_assert!(result.is_none()),
            }
        }
    }

    /// Field decoding and every handler never panic.
    #[test]
    fn prop_handlers_never_panic(s in field()) {
        let raw = RawValue::parse_field(&s);
        for handler in handlers() {
            let _ = handler.handle(&raw);
        }
    }

    /// Decoding is deterministic.
    #[test]
    fn prop_parse_field_deterministic(s in field()) {
        prop_assert_eq!(RawValue::parse_field(&s), RawValue::parse_field(&s));
    }

    /// Integers come back as themselves from the integer handler.
    #[test]
    fn prop_integer_identity(i in any::<i64>()) {
        let raw = RawValue::parse_field(&i.to_string());
        prop_assert_eq!(Handler::Integer.handle(&raw).unwrap(), Some(TypedValue::Integer(i)));
    }

    /// Non-enum handlers always produce the one-slot encoding.
    #[test]
    fn prop_non_enum_onehot(i in any::<i32>()) {
        let value = Handler::Integer.handle(&RawValue::Int(i64::from(i))).unwrap();
        prop_assert_eq!(Handler::Integer.to_onehot(value.as_ref()).unwrap(), vec![1]);
    }
}

//! Name-to-entity lookup shared by ingestion and export.

use std::collections::HashMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::error::{CaregapError, Result};

use super::column::{ColumnDescriptor, ColumnOptions};
use super::entities::ENTITIES;
use super::table::{EntityDescriptor, EntitySpec};

/// Logical name of the member-list source.
pub const MEMBER_SOURCE: &str = "humana_mays_target_members";

/// Logical name selecting every entity.
pub const ALL_ENTITIES: &str = "all";

static GLOBAL: Lazy<SchemaRegistry> = Lazy::new(SchemaRegistry::new);

/// Per-column handler configuration, keyed by logical entity then column.
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    columns: HashMap<String, HashMap<String, ColumnOptions>>,
}

impl RegistryOptions {
    /// No per-column configuration at all.
    pub fn empty() -> Self {
        Self {
            columns: HashMap::new(),
        }
    }

    /// Configure one column.
    pub fn with_column(
        mut self,
        entity: impl Into<String>,
        column: impl Into<String>,
        options: ColumnOptions,
    ) -> Self {
        self.columns
            .entry(entity.into())
            .or_default()
            .insert(column.into(), options);
        self
    }

    pub fn get(&self, entity: &str, column: &str) -> Option<&ColumnOptions> {
        self.columns.get(entity).and_then(|c| c.get(column))
    }
}

impl Default for RegistryOptions {
    /// Date formats for the quality measurement date and the claim service date.
    fn default() -> Self {
        Self::empty()
            .with_column(
                "QUALITY_DATA",
                "base_event_date",
                ColumnOptions::date_format("%d%b%Y"),
            )
            .with_column(
                "humana_mays_target_member_visit_claims",
                "serv_date_skey",
                ColumnOptions::date_format("%Y%m%d"),
            )
    }
}

/// Immutable mapping from logical source name to entity descriptor.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    entities: IndexMap<&'static str, EntityDescriptor>,
}

impl SchemaRegistry {
    /// Build the registry with the default column options.
    pub fn new() -> Self {
        Self::build(ENTITIES, &RegistryOptions::default())
    }

    /// Build the registry with custom column options.
    ///
    /// Fails if an option names an entity or column the registry lacks.
    pub fn with_options(options: &RegistryOptions) -> Result<Self> {
        for (entity, columns) in &options.columns {
            let spec = ENTITIES
                .iter()
                .find(|e| e.name == entity)
                .ok_or_else(|| CaregapError::UnknownEntity(entity.clone()))?;
            if let Some(column) = columns
                .keys()
                .find(|c| !spec.columns.iter().any(|s| s.name == c.as_str()))
            {
                return Err(CaregapError::Config(format!(
                    "no column '{column}' in entity '{entity}'"
                )));
            }
        }
        Ok(Self::build(ENTITIES, options))
    }

    /// The process-wide registry, built once on first use.
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    fn build(specs: &[EntitySpec], options: &RegistryOptions) -> Self {
        let entities = specs
            .iter()
            .map(|spec| {
                let columns = spec
                    .columns
                    .iter()
                    .map(|c| ColumnDescriptor::new(c, options.get(spec.name, c.name)))
                    .collect();
                let descriptor = EntityDescriptor {
                    name: spec.name,
                    table: spec.table,
                    cardinality: spec.cardinality,
                    columns,
                };
                (spec.name, descriptor)
            })
            .collect();
        Self { entities }
    }

    /// Resolve one logical name.
    pub fn resolve(&self, name: &str) -> Result<&EntityDescriptor> {
        self.entities
            .get(name)
            .ok_or_else(|| CaregapError::UnknownEntity(name.to_string()))
    }

    /// Resolve a logical name, where `"all"` selects every entity in order.
    pub fn select(&self, name: &str) -> Result<Vec<&EntityDescriptor>> {
        if name == ALL_ENTITIES {
            Ok(self.entities.values().collect())
        } else {
            self.resolve(name).map(|e| vec![e])
        }
    }

    /// The full logical-name mapping, in registry order.
    pub fn all(&self) -> &IndexMap<&'static str, EntityDescriptor> {
        &self.entities
    }

    /// Entities that take part in the wide join, in registry order.
    pub fn joinable(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entities.values().filter(|e| e.is_joinable())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Ingestion of partition-tagged sources into the store.
//!
//! Ingestion runs in a fixed order:
//!
//! 1. Collect training and holdout member ids from the member-list source and
//!    reject overlapping partitions.
//! 2. Resolve every source to a registry entity and check its header.
//! 3. Either sample members for a test run, or check that every source's ids
//!    stay within the global partition sets.
//! 4. Write members, then every source's rows, in committed batches.
//!
//! Nothing is written until steps 1-3 have passed.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use rusqlite::types::Value;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{CaregapError, Result};
use crate::input::SourceTable;
use crate::progress;
use crate::schema::{DataType, EntityDescriptor, SchemaRegistry, MEMBER_SOURCE};
use crate::store::{sql_value, Store};

/// Default number of rows per committed batch.
pub const DEFAULT_COMMIT_INTERVAL: usize = 100;

/// Members drawn per partition by a test run.
pub const DEFAULT_SAMPLE_SIZE: usize = 50;

/// Ingestion settings.
#[derive(Debug, Clone, Serialize)]
pub struct IngestConfig {
    /// Rows per committed batch.
    pub commit_interval: usize,
    /// Members to keep per partition for a test run.
    pub sample_size: Option<usize>,
    /// Seed for test-run sampling.
    pub sample_seed: Option<u64>,
    /// Draw progress bars.
    pub show_progress: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            commit_interval: DEFAULT_COMMIT_INTERVAL,
            sample_size: None,
            sample_seed: None,
            show_progress: false,
        }
    }
}

impl IngestConfig {
    pub fn with_commit_interval(mut self, commit_interval: usize) -> Self {
        self.commit_interval = commit_interval;
        self
    }

    /// Keep only `size` members per partition.
    pub fn with_sample(mut self, size: usize, seed: Option<u64>) -> Self {
        self.sample_size = Some(size);
        self.sample_seed = seed;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Training and holdout member ids. The two sets never intersect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionIds {
    training: BTreeSet<i64>,
    holdout: BTreeSet<i64>,
}

impl PartitionIds {
    /// Fails with an integrity error if any id is in both sets.
    pub fn new(training: BTreeSet<i64>, holdout: BTreeSet<i64>) -> Result<Self> {
        let overlap: Vec<i64> = training.intersection(&holdout).copied().collect();
        if !overlap.is_empty() {
            return Err(CaregapError::Integrity(format!(
                "{} member id(s) are in both Training and Holdout (first: {})",
                overlap.len(),
                overlap[0]
            )));
        }
        Ok(Self { training, holdout })
    }

    /// Ids of the member-list source, split by partition.
    pub fn from_member_source(source: &SourceTable) -> Result<Self> {
        Self::new(
            source.member_ids(DataType::Training)?,
            source.member_ids(DataType::Holdout)?,
        )
    }

    pub fn get(&self, partition: DataType) -> &BTreeSet<i64> {
        match partition {
            DataType::Training => &self.training,
            DataType::Holdout => &self.holdout,
        }
    }

    pub fn training(&self) -> &BTreeSet<i64> {
        &self.training
    }

    pub fn holdout(&self) -> &BTreeSet<i64> {
        &self.holdout
    }

    pub fn contains(&self, id: i64) -> bool {
        self.training.contains(&id) || self.holdout.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.training.len() + self.holdout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.training.is_empty() && self.holdout.is_empty()
    }

    /// Draw up to `size` ids from each partition.
    pub fn sample(&self, size: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let mut draw = |ids: &BTreeSet<i64>| -> BTreeSet<i64> {
            let mut pool: Vec<i64> = ids.iter().copied().collect();
            rng.shuffle(&mut pool);
            pool.truncate(size);
            pool.into_iter().collect()
        };
        Self {
            training: draw(&self.training),
            holdout: draw(&self.holdout),
        }
    }

    /// Check that each partition's ids in `source` are within this set.
    pub fn check_coverage(&self, source: &SourceTable) -> Result<()> {
        for partition in DataType::ALL {
            let global = self.get(partition);
            let ids = source.member_ids(partition)?;
            let outside = ids.difference(global).count();
            if outside > 0 {
                return Err(CaregapError::Integrity(format!(
                    "source '{}' has {outside} {partition} member id(s) outside the {partition} set \
                     ({} of {} ids in common)",
                    source.name,
                    ids.len() - outside,
                    global.len()
                )));
            }
            if ids.len() == global.len() {
                debug!(source = %source.name, %partition, "Covers every member");
            } else {
                debug!(source = %source.name, %partition, ids = ids.len(), of = global.len(), "Covers a subset of members");
            }
        }
        Ok(())
    }
}

/// Summary of an ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub training_members: usize,
    pub holdout_members: usize,
    /// True when members were sampled for a test run.
    pub sampled: bool,
    /// Rows written per logical entity.
    pub rows_per_entity: IndexMap<String, usize>,
    /// Date values that failed to parse and were stored as null.
    pub null_dates_per_entity: IndexMap<String, usize>,
}

impl IngestReport {
    pub fn total_rows(&self) -> usize {
        self.rows_per_entity.values().sum()
    }
}

/// A source resolved against the registry.
struct SourcePlan<'r> {
    name: String,
    entity: &'r EntityDescriptor,
    /// Source column index for each entity column.
    columns: Vec<usize>,
    id_index: usize,
}

/// Writes sources into a store.
pub struct Ingestor<'a> {
    store: &'a Store,
    registry: &'a SchemaRegistry,
    config: IngestConfig,
}

impl<'a> Ingestor<'a> {
    pub fn new(store: &'a Store, registry: &'a SchemaRegistry) -> Self {
        Self {
            store,
            registry,
            config: IngestConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Ingest every source. The member-list source is required.
    pub fn ingest(&self, mut sources: IndexMap<String, SourceTable>) -> Result<IngestReport> {
        if self.config.commit_interval == 0 {
            return Err(CaregapError::Config(
                "commit interval must be at least 1".to_string(),
            ));
        }

        let member_source = sources
            .get(MEMBER_SOURCE)
            .ok_or_else(|| CaregapError::MissingSource(MEMBER_SOURCE.to_string()))?;
        let mut ids = PartitionIds::from_member_source(member_source)?;
        info!(
            training = ids.training().len(),
            holdout = ids.holdout().len(),
            "Collected member ids"
        );

        let plans = self.plan(&sources)?;

        let sampled = match self.config.sample_size {
            Some(size) => {
                ids = ids.sample(size, self.config.sample_seed);
                info!(
                    training = ids.training().len(),
                    holdout = ids.holdout().len(),
                    "Sampled members for test run"
                );
                for source in sources.values_mut() {
                    source.retain_members(|id| ids.contains(id))?;
                }
                true
            }
            None => {
                for source in sources.values() {
                    ids.check_coverage(source)?;
                }
                false
            }
        };

        let mut report = IngestReport {
            training_members: ids.training().len(),
            holdout_members: ids.holdout().len(),
            sampled,
            ..IngestReport::default()
        };

        self.write_members(&ids)?;

        for plan in &plans {
            let source = &sources[plan.name.as_str()];
            let (rows, null_dates) = self.write_source(plan, source)?;
            report.rows_per_entity.insert(plan.name.clone(), rows);
            if null_dates > 0 {
                warn!(
                    entity = %plan.name,
                    count = null_dates,
                    "Stored unparseable dates as null"
                );
                report.null_dates_per_entity.insert(plan.name.clone(), null_dates);
            }
        }

        info!(
            members = ids.len(),
            rows = report.total_rows(),
            entities = plans.len(),
            "Ingestion complete"
        );
        Ok(report)
    }

    /// Resolve each source to an entity and map its columns.
    fn plan(&self, sources: &IndexMap<String, SourceTable>) -> Result<Vec<SourcePlan<'a>>> {
        let registry: &'a SchemaRegistry = self.registry;
        let mut plans = Vec::with_capacity(sources.len());
        for (name, source) in sources {
            let entity = registry.resolve(name)?;
            let columns = entity
                .columns
                .iter()
                .map(|c| {
                    source
                        .column_index(c.name)
                        .ok_or_else(|| CaregapError::MissingColumn {
                            source_name: name.clone(),
                            column: c.name.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            plans.push(SourcePlan {
                name: name.clone(),
                entity,
                columns,
                id_index: source.id_index()?,
            });
        }
        Ok(plans)
    }

    fn write_members(&self, ids: &PartitionIds) -> Result<usize> {
        let pb = progress::bar(ids.len() as u64, self.config.show_progress, "members");
        pb.set_message("member");

        let mut writer = self.store.member_writer(self.config.commit_interval)?;
        for partition in DataType::ALL {
            for &id in ids.get(partition) {
                writer.insert(&[
                    Value::Integer(id),
                    Value::Text(partition.as_str().to_string()),
                ])?;
                pb.inc(1);
            }
        }
        let written = writer.finish()?;
        pb.finish_and_clear();

        info!(members = written, "Wrote members");
        Ok(written)
    }

    /// Coerce and write one source. Returns rows written and null dates.
    fn write_source(&self, plan: &SourcePlan<'_>, source: &SourceTable) -> Result<(usize, usize)> {
        let pb = progress::bar(source.row_count() as u64, self.config.show_progress, "rows");
        pb.set_message(plan.name.clone());

        let mut writer = self
            .store
            .entity_writer(plan.entity, self.config.commit_interval)?;
        let mut null_dates = 0;
        let mut values = Vec::with_capacity(plan.columns.len() + 1);

        for (row_idx, row) in source.rows.iter().enumerate() {
            values.clear();
            values.push(Value::Integer(source.member_id(row_idx, plan.id_index)?));

            for (column, &src) in plan.entity.columns.iter().zip(&plan.columns) {
                let raw = row.value_as(src, column.kind);
                match column.handler.handle(&raw) {
                    Ok(typed) => values.push(sql_value(typed.as_ref())),
                    Err(e) if column.handler.is_date() => {
                        debug!(entity = %plan.name, column = column.name, row = row_idx + 1, error = %e, "Unparseable date");
                        null_dates += 1;
                        values.push(Value::Null);
                    }
                    Err(e) => {
                        return Err(CaregapError::Coercion {
                            entity: plan.name.clone(),
                            column: column.name.to_string(),
                            row: row_idx + 1,
                            value: raw.to_string(),
                            source: e,
                        });
                    }
                }
            }

            writer.insert(&values)?;
            pb.inc(1);
        }

        let written = writer.finish()?;
        pb.finish_and_clear();

        debug!(entity = %plan.name, table = plan.entity.table, rows = written, "Wrote source");
        Ok((written, null_dates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(training: &[i64], holdout: &[i64]) -> SourceTable {
        let mut source = SourceTable::with_headers(MEMBER_SOURCE, &["id"]);
        for id in training {
            source.push_fields(DataType::Training, &[id.to_string()]);
        }
        for id in holdout {
            source.push_fields(DataType::Holdout, &[id.to_string()]);
        }
        source
    }

    #[test]
    fn test_overlapping_partitions_rejected() {
        let result = PartitionIds::from_member_source(&members(&[1, 2, 3], &[3, 4]));
        assert!(matches!(result, Err(CaregapError::Integrity(_))));
    }

    #[test]
    fn test_coverage_subset_and_exact() {
        let ids = PartitionIds::from_member_source(&members(&[1, 2, 3], &[4, 5])).unwrap();

        let mut subset = SourceTable::with_headers("Sales Channel", &["id"]);
        subset.push_fields(DataType::Training, &["1"]);
        subset.push_fields(DataType::Holdout, &["5"]);
        ids.check_coverage(&subset).unwrap();

        ids.check_coverage(&members(&[1, 2, 3], &[4, 5])).unwrap();
    }

    #[test]
    fn test_coverage_partial_overlap_rejected() {
        let ids = PartitionIds::from_member_source(&members(&[1, 2, 3], &[4, 5])).unwrap();

        let mut partial = SourceTable::with_headers("Sales Channel", &["id"]);
        partial.push_fields(DataType::Training, &["1"]);
        partial.push_fields(DataType::Training, &["7"]);
        assert!(matches!(
            ids.check_coverage(&partial),
            Err(CaregapError::Integrity(_))
        ));

        let mut crossed = SourceTable::with_headers("Sales Channel", &["id"]);
        crossed.push_fields(DataType::Training, &["4"]);
        assert!(matches!(
            ids.check_coverage(&crossed),
            Err(CaregapError::Integrity(_))
        ));
    }

    #[test]
    fn test_sample_is_clamped_and_seeded() {
        let ids = PartitionIds::from_member_source(&members(&[1, 2, 3, 4, 5, 6], &[7, 8])).unwrap();

        let sampled = ids.sample(3, Some(7));
        assert_eq!(sampled.training().len(), 3);
        assert_eq!(sampled.holdout().len(), 2);
        assert!(sampled.training().is_subset(ids.training()));
        assert_eq!(sampled, ids.sample(3, Some(7)));
    }

    #[test]
    fn test_missing_member_source() {
        let store = Store::in_memory().unwrap();
        let registry = SchemaRegistry::global();
        store.init_schema(registry).unwrap();

        let result = Ingestor::new(&store, registry).ingest(IndexMap::new());
        assert!(matches!(result, Err(CaregapError::MissingSource(_))));
    }

    #[test]
    fn test_config_builders() {
        let config = IngestConfig::default()
            .with_commit_interval(10)
            .with_sample(5, Some(1))
            .with_progress(true);
        assert_eq!(config.commit_interval, 10);
        assert_eq!(config.sample_size, Some(5));
        assert_eq!(config.sample_seed, Some(1));
        assert!(config.show_progress);
    }
}

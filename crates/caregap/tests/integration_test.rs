//! Integration tests for caregap: ingestion into a store and wide export.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tempfile::TempDir;

use caregap::coerce::Handler;
use caregap::input::SourceTable;
use caregap::schema::{ColumnDescriptor, ColumnKind, MEMBER_SOURCE};
use caregap::{
    load_sources, CaregapError, CoercionError, DataType, EntityDescriptor, ExportConfig,
    Exporter, IngestConfig, Ingestor, JoinMode, RawValue, SchemaRegistry, Store,
};

// =============================================================================
// Fixtures
// =============================================================================

fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 12, 31).unwrap()
}

/// A valid raw field for a column.
fn sample_value(column: &ColumnDescriptor) -> String {
    if let Handler::Date(h) = &column.handler {
        return sample_date().format(h.format()).to_string();
    }
    match column.kind {
        ColumnKind::Float => "1.5".to_string(),
        ColumnKind::Integer => "3".to_string(),
        ColumnKind::Boolean => "True".to_string(),
        ColumnKind::Text => "text".to_string(),
        ColumnKind::Enum(domain) => domain.tokens()[0].to_string(),
        ColumnKind::Date => "2021-12-31".to_string(),
    }
}

fn header(entity: &EntityDescriptor) -> Vec<String> {
    let mut header = vec!["id".to_string()];
    header.extend(entity.column_names().iter().map(|c| c.to_string()));
    header
}

fn record(entity: &EntityDescriptor, id: i64) -> Vec<String> {
    let mut record = vec![id.to_string()];
    record.extend(entity.columns.iter().map(sample_value));
    record
}

/// An in-memory source with one valid row per id.
fn source_for(entity: &EntityDescriptor, training: &[i64], holdout: &[i64]) -> SourceTable {
    let mut source = SourceTable::new(entity.name, header(entity));
    for &id in training {
        source.push_fields(DataType::Training, &record(entity, id));
    }
    for &id in holdout {
        source.push_fields(DataType::Holdout, &record(entity, id));
    }
    source
}

/// Overwrite one cell of a source.
fn set(source: &mut SourceTable, row: usize, column: &str, field: &str) {
    let idx = source.column_index(column).unwrap();
    source.rows[row].fields[idx] = field.to_string();
}

/// Every one-to-one entity, with a row for every id.
fn joinable_sources(
    registry: &SchemaRegistry,
    training: &[i64],
    holdout: &[i64],
) -> IndexMap<String, SourceTable> {
    registry
        .joinable()
        .map(|e| (e.name.to_string(), source_for(e, training, holdout)))
        .collect()
}

fn store() -> Store {
    let store = Store::in_memory().unwrap();
    store.init_schema(SchemaRegistry::global()).unwrap();
    store
}

fn write_csv(dir: &Path, stem: &str, entity: &EntityDescriptor, ids: &[i64]) {
    let mut writer = csv::Writer::from_path(dir.join(format!("{stem}.csv"))).unwrap();
    writer.write_record(header(entity)).unwrap();
    for &id in ids {
        writer.write_record(record(entity, id)).unwrap();
    }
    writer.flush().unwrap();
}

fn exported_ids(csv_text: &str) -> Vec<(i64, String)> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].parse().unwrap(), r[1].to_string())
        })
        .collect()
}

fn export_text(store: &Store, join: JoinMode) -> String {
    let mut buffer = Vec::new();
    Exporter::new(store, SchemaRegistry::global())
        .with_config(ExportConfig::default().with_join(join).with_fetch_size(2))
        .export(&mut buffer)
        .unwrap();
    String::from_utf8(buffer).unwrap()
}

// =============================================================================
// End-to-End
// =============================================================================

#[test]
fn test_end_to_end_member_missing_satellite_row_is_dropped() {
    let registry = SchemaRegistry::global();
    let training = TempDir::new().unwrap();
    let holdout = TempDir::new().unwrap();

    for entity in registry.joinable() {
        write_csv(training.path(), entity.name, entity, &[1, 2, 3]);
        let holdout_ids: &[i64] = if entity.name == "Sales Channel" {
            &[4]
        } else {
            &[4, 5]
        };
        write_csv(
            holdout.path(),
            &format!("{}_Holdout", entity.name),
            entity,
            holdout_ids,
        );
    }

    let store = store();
    let sources = load_sources(training.path(), holdout.path()).unwrap();
    let report = Ingestor::new(&store, registry).ingest(sources).unwrap();
    assert_eq!(report.training_members, 3);
    assert_eq!(report.holdout_members, 2);
    assert_eq!(report.rows_per_entity["Sales Channel"], 4);
    assert_eq!(store.member_count().unwrap(), 5);

    let output = TempDir::new().unwrap();
    let path = output.path().join("nested").join("wide.csv");
    let export = Exporter::new(&store, registry).export_to_path(&path).unwrap();
    assert_eq!(export.member_total, 5);
    assert_eq!(export.rows_written, 4);
    assert_eq!(export.dropped, 1);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("id,data_type,calendar_year,"));
    assert_eq!(
        exported_ids(&text),
        vec![
            (1, "Training".to_string()),
            (2, "Training".to_string()),
            (3, "Training".to_string()),
            (4, "Holdout".to_string()),
        ]
    );
}

#[test]
fn test_inner_join_drops_member_without_satellite_row() {
    let registry = SchemaRegistry::global();
    let mut sources = joinable_sources(registry, &[1], &[2]);
    let demographics = registry.resolve("Demographics").unwrap();
    sources.insert(
        demographics.name.to_string(),
        source_for(demographics, &[1], &[]),
    );

    let store = store();
    Ingestor::new(&store, registry).ingest(sources).unwrap();

    let inner = export_text(&store, JoinMode::Inner);
    assert_eq!(exported_ids(&inner), vec![(1, "Training".to_string())]);

    let outer = export_text(&store, JoinMode::LeftOuter);
    assert_eq!(
        exported_ids(&outer),
        vec![(1, "Training".to_string()), (2, "Holdout".to_string())]
    );
}

#[test]
fn test_export_cells() {
    let registry = SchemaRegistry::global();
    let store = store();
    Ingestor::new(&store, registry)
        .ingest(joinable_sources(registry, &[7], &[]))
        .unwrap();

    let text = export_text(&store, JoinMode::Inner);
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    let row = reader.records().next().unwrap().unwrap();
    let cell = |name: &str| {
        let idx = headers.iter().position(|h| h == name).unwrap();
        row[idx].to_string()
    };

    assert_eq!(headers.len(), row.len());
    assert_eq!(cell("calendar_year"), "3");
    assert_eq!(cell("preventive_visit_gap_ind"), "True");
    assert_eq!(cell("rucc_category"), "1-Metro");
    assert_eq!(cell("channel"), "Field");
}

// =============================================================================
// Partition Integrity
// =============================================================================

#[test]
fn test_overlapping_partitions_fail_before_writes() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let mut sources = IndexMap::new();
    sources.insert(
        MEMBER_SOURCE.to_string(),
        source_for(members, &[1, 2, 3], &[3, 4]),
    );

    let store = store();
    let result = Ingestor::new(&store, registry).ingest(sources);
    assert!(matches!(result, Err(CaregapError::Integrity(_))));
    assert_eq!(store.member_count().unwrap(), 0);
}

#[test]
fn test_coverage_subset_and_exact_match_succeed() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let channel = registry.resolve("Sales Channel").unwrap();
    let web = registry.resolve("Web Activity").unwrap();

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1, 2, 3], &[4, 5]));
    sources.insert(channel.name.to_string(), source_for(channel, &[2], &[5]));
    sources.insert(web.name.to_string(), source_for(web, &[1, 2, 3], &[4, 5]));

    let store = store();
    let report = Ingestor::new(&store, registry).ingest(sources).unwrap();
    assert_eq!(report.rows_per_entity["Sales Channel"], 2);
    assert_eq!(report.rows_per_entity["Web Activity"], 5);
    assert_eq!(store.row_count(channel).unwrap(), 2);
}

#[test]
fn test_partial_overlap_fails_before_writes() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let channel = registry.resolve("Sales Channel").unwrap();

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1, 2, 3], &[4, 5]));
    sources.insert(channel.name.to_string(), source_for(channel, &[2, 9], &[]));

    let store = store();
    let result = Ingestor::new(&store, registry).ingest(sources);
    assert!(matches!(result, Err(CaregapError::Integrity(_))));
    assert_eq!(store.member_count().unwrap(), 0);
}

#[test]
fn test_unknown_entity_and_missing_column() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1], &[]));
    sources.insert(
        "Unknown Extract".to_string(),
        SourceTable::with_headers("Unknown Extract", &["id"]),
    );
    let store = store();
    let result = Ingestor::new(&store, registry).ingest(sources);
    assert!(matches!(result, Err(CaregapError::UnknownEntity(name)) if name == "Unknown Extract"));

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1], &[]));
    sources.insert(
        "Sales Channel".to_string(),
        SourceTable::with_headers("Sales Channel", &["id", "chanel"]),
    );
    let result = Ingestor::new(&store, registry).ingest(sources);
    assert!(matches!(
        result,
        Err(CaregapError::MissingColumn { column, .. }) if column == "channel"
    ));
    assert_eq!(store.member_count().unwrap(), 0);
}

// =============================================================================
// Coercion
// =============================================================================

#[test]
fn test_round_trip_each_handler_variant() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let quality = registry.resolve("QUALITY_DATA").unwrap();
    let member_data = registry.resolve("MEMBER_DATA").unwrap();
    let demographics = registry.resolve("Demographics").unwrap();

    let mut quality_source = source_for(quality, &[1], &[]);
    set(&mut quality_source, 0, "measurement_year", "2021");
    set(&mut quality_source, 0, "measure_name", "CBP");
    set(&mut quality_source, 0, "measure_desc", "Controlling blood pressure");
    set(&mut quality_source, 0, "base_event_date", "31DEC2021");
    set(&mut quality_source, 0, "compliant_cnt", "0.75");

    let mut member_source = source_for(member_data, &[1], &[]);
    set(&mut member_source, 0, "dual_eligible_ind", "1");

    let mut demo_source = source_for(demographics, &[1], &[]);
    set(&mut demo_source, 0, "rucc_category", "1-Metro");

    let originals: Vec<(&EntityDescriptor, &str, RawValue)> = vec![
        (quality, "measurement_year", RawValue::Int(2021)),
        (quality, "measure_name", RawValue::Text("CBP".into())),
        (quality, "measure_desc", RawValue::Text("Controlling blood pressure".into())),
        (quality, "base_event_date", RawValue::Text("31DEC2021".into())),
        (quality, "compliant_cnt", RawValue::Float(0.75)),
        (member_data, "dual_eligible_ind", RawValue::Int(1)),
        (demographics, "rucc_category", RawValue::Text("1-Metro".into())),
    ];

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1], &[]));
    sources.insert(quality.name.to_string(), quality_source);
    sources.insert(member_data.name.to_string(), member_source);
    sources.insert(demographics.name.to_string(), demo_source);

    let store = store();
    Ingestor::new(&store, registry).ingest(sources).unwrap();

    for (entity, column, raw) in originals {
        let handler = &entity.column(column).unwrap().handler;
        let expected = handler.handle(&raw).unwrap();
        let stored = store.read_column(entity, column).unwrap();
        assert_eq!(stored.len(), 1, "{column}");
        assert_eq!(handler.handle(&stored[0]).unwrap(), expected, "{column}");
    }

    let dates = store.read_column(quality, "base_event_date").unwrap();
    assert_eq!(dates, vec![RawValue::Date(sample_date())]);
}

#[test]
fn test_unparseable_date_is_stored_as_null() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let quality = registry.resolve("QUALITY_DATA").unwrap();

    let mut quality_source = source_for(quality, &[1, 2], &[]);
    set(&mut quality_source, 1, "base_event_date", "2021-12-31");

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1, 2], &[]));
    sources.insert(quality.name.to_string(), quality_source);

    let store = store();
    let report = Ingestor::new(&store, registry).ingest(sources).unwrap();
    assert_eq!(report.null_dates_per_entity["QUALITY_DATA"], 1);
    assert_eq!(
        store.read_column(quality, "base_event_date").unwrap(),
        vec![RawValue::Date(sample_date()), RawValue::Null]
    );
}

#[test]
fn test_text_columns_keep_source_text() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let conditions = registry.resolve("humana_mays_target_member_conditions").unwrap();
    let claims = registry.resolve("humana_mays_target_member_visit_claims").unwrap();

    let fields = ["007", "true", "1e3", "2.50"];
    let ids = [1, 2, 3, 4];
    let mut condition_source = source_for(conditions, &ids, &[]);
    let mut claim_source = source_for(claims, &ids, &[]);
    for (row, field) in fields.iter().enumerate() {
        set(&mut condition_source, row, "cond_desc", field);
        set(&mut claim_source, row, "clm_unique_key", field);
    }

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &ids, &[]));
    sources.insert(conditions.name.to_string(), condition_source);
    sources.insert(claims.name.to_string(), claim_source);

    let store = store();
    Ingestor::new(&store, registry).ingest(sources).unwrap();

    let expected: Vec<RawValue> = fields.iter().map(|f| RawValue::Text(f.to_string())).collect();
    assert_eq!(store.read_column(conditions, "cond_desc").unwrap(), expected);
    assert_eq!(store.read_column(claims, "clm_unique_key").unwrap(), expected);
}

#[test]
fn test_out_of_range_integer_aborts() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let member_data = registry.resolve("MEMBER_DATA").unwrap();

    let mut member_source = source_for(member_data, &[1], &[]);
    set(&mut member_source, 0, "all_mm_tenure", "99999999999999999999");

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1], &[]));
    sources.insert(member_data.name.to_string(), member_source);

    let store = store();
    let result = Ingestor::new(&store, registry).ingest(sources);
    assert!(matches!(
        result,
        Err(CaregapError::Coercion {
            source: CoercionError::NotNumeric { .. },
            ..
        })
    ));
    assert_eq!(store.row_count(member_data).unwrap(), 0);
}

#[test]
fn test_unknown_enum_token_aborts() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let demographics = registry.resolve("Demographics").unwrap();

    let mut demo_source = source_for(demographics, &[1, 2], &[]);
    set(&mut demo_source, 1, "rucc_category", "10-Remote");

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1, 2], &[]));
    sources.insert(demographics.name.to_string(), demo_source);

    let store = store();
    let result = Ingestor::new(&store, registry).ingest(sources);
    match result {
        Err(CaregapError::Coercion {
            entity,
            column,
            row,
            source: CoercionError::UnknownToken { token, .. },
            ..
        }) => {
            assert_eq!(entity, "Demographics");
            assert_eq!(column, "rucc_category");
            assert_eq!(row, 2);
            assert_eq!(token, "10-Remote");
        }
        other => panic!("expected unknown token error, got {other:?}"),
    }
}

#[test]
fn test_non_numeric_integer_aborts() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let member_data = registry.resolve("MEMBER_DATA").unwrap();

    let mut member_source = source_for(member_data, &[1], &[]);
    set(&mut member_source, 0, "all_mm_tenure", "twelve");

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1], &[]));
    sources.insert(member_data.name.to_string(), member_source);

    let store = store();
    let result = Ingestor::new(&store, registry).ingest(sources);
    assert!(matches!(
        result,
        Err(CaregapError::Coercion {
            source: CoercionError::NotNumeric { .. },
            ..
        })
    ));
}

// =============================================================================
// Sampling & Batching
// =============================================================================

#[test]
fn test_sampling_filters_every_source() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let channel = registry.resolve("Sales Channel").unwrap();

    let training: Vec<i64> = (1..=6).collect();
    let holdout: Vec<i64> = (10..=13).collect();
    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &training, &holdout));
    sources.insert(channel.name.to_string(), source_for(channel, &[1, 2, 3, 4, 5, 6], &[10, 11]));

    let store = store();
    let report = Ingestor::new(&store, registry)
        .with_config(IngestConfig::default().with_sample(2, Some(42)))
        .ingest(sources)
        .unwrap();

    assert!(report.sampled);
    assert_eq!(store.member_count().unwrap(), 4);

    let stored: Vec<i64> = store.members().unwrap().into_iter().map(|(id, _)| id).collect();
    let channel_rows = report.rows_per_entity["Sales Channel"];
    assert!(channel_rows <= 4);
    assert_eq!(report.rows_per_entity[MEMBER_SOURCE], 4);
    assert!(stored.iter().filter(|id| **id < 10).count() == 2);
}

#[test]
fn test_small_commit_interval_writes_everything() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let training: Vec<i64> = (1..=7).collect();

    let mut sources = IndexMap::new();
    sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &training, &[]));

    let store = store();
    let report = Ingestor::new(&store, registry)
        .with_config(IngestConfig::default().with_commit_interval(3))
        .ingest(sources)
        .unwrap();
    assert_eq!(store.member_count().unwrap(), 7);
    assert_eq!(store.row_count(members).unwrap(), 7);
    assert_eq!(report.total_rows(), 7);
}

#[test]
fn test_rerun_on_populated_store_fails() {
    let registry = SchemaRegistry::global();
    let members = registry.resolve(MEMBER_SOURCE).unwrap();
    let build = || {
        let mut sources = IndexMap::new();
        sources.insert(MEMBER_SOURCE.to_string(), source_for(members, &[1], &[]));
        sources
    };

    let store = store();
    Ingestor::new(&store, registry).ingest(build()).unwrap();
    let result = Ingestor::new(&store, registry).ingest(build());
    assert!(matches!(result, Err(CaregapError::Store(_))));
    assert_eq!(store.member_count().unwrap(), 1);
}

//! Caregap: member-level healthcare extracts into a typed relational store.
//!
//! Caregap loads per-entity CSV extracts for a training and a holdout cohort,
//! coerces every column through a typed handler, writes the rows to SQLite and
//! exports a single wide feature table for model training.
//!
//! # Core Principles
//!
//! - **Static schema**: every entity column is declared with its handler variant
//! - **Partition integrity**: training and holdout members never mix
//! - **Fail fast**: unknown enum tokens and non-numeric values abort ingestion
//!
//! # Example
//!
//! ```no_run
//! use caregap::{load_sources, Exporter, Ingestor, SchemaRegistry, Store};
//!
//! let store = Store::from_env().unwrap();
//! let registry = SchemaRegistry::global();
//! store.init_schema(registry).unwrap();
//!
//! let sources = load_sources("data/training", "data/holdout").unwrap();
//! let report = Ingestor::new(&store, registry).ingest(sources).unwrap();
//! println!("Members: {}", report.training_members + report.holdout_members);
//!
//! let export = Exporter::new(&store, registry).export_to_path("wide.csv").unwrap();
//! println!("Rows: {}", export.rows_written);
//! ```

pub mod coerce;
pub mod error;
pub mod export;
pub mod ingest;
pub mod input;
pub mod ranking;
pub mod schema;
pub mod store;

mod progress;

pub use coerce::{Handler, RawValue, TypedValue};
pub use error::{CaregapError, CoercionError, Result};
pub use export::{ExportConfig, ExportReport, Exporter, JoinMode};
pub use ingest::{IngestConfig, IngestReport, Ingestor, PartitionIds};
pub use input::{load_sources, SourceTable};
pub use ranking::{rank_scores, read_scores, write_results, MemberScore, RankedMember};
pub use schema::{DataType, EntityDescriptor, SchemaRegistry};
pub use store::Store;

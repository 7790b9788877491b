//! Ingest command - load training and holdout extracts into the store.

use std::path::PathBuf;

use caregap::{load_sources, IngestConfig, Ingestor, SchemaRegistry, Store};
use colored::Colorize;

pub fn run(
    training_dir: PathBuf,
    holdout_dir: PathBuf,
    commit_interval: usize,
    sample_size: Option<usize>,
    seed: Option<u64>,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::from_env()?;
    let registry = SchemaRegistry::global();
    store.init_schema(registry)?;

    println!(
        "{} {} and {}",
        "Loading".cyan().bold(),
        training_dir.display().to_string().white(),
        holdout_dir.display().to_string().white()
    );
    let sources = load_sources(&training_dir, &holdout_dir)?;

    let mut config = IngestConfig::default()
        .with_commit_interval(commit_interval)
        .with_progress(true);
    if let Some(size) = sample_size {
        config = config.with_sample(size, seed);
    }

    let report = Ingestor::new(&store, registry)
        .with_config(config)
        .ingest(sources)?;

    println!();
    if report.sampled {
        println!("{}", "Test run: members were sampled".yellow().bold());
    }
    println!("{}", "Members:".yellow().bold());
    println!("  Training: {}", report.training_members.to_string().green());
    println!("  Holdout:  {}", report.holdout_members.to_string().green());
    println!();

    println!("{}", "Rows written:".yellow().bold());
    let width = report
        .rows_per_entity
        .keys()
        .map(|k| k.len())
        .max()
        .unwrap_or(0);
    for (entity, rows) in &report.rows_per_entity {
        let nulls = report
            .null_dates_per_entity
            .get(entity)
            .map(|n| format!(" ({n} unparseable dates stored as null)").yellow().to_string())
            .unwrap_or_default();
        println!("  {entity:<width$}  {}{nulls}", rows.to_string().white());
    }
    println!();
    println!(
        "{} {} rows",
        "Ingestion complete:".green().bold(),
        report.total_rows()
    );

    Ok(())
}

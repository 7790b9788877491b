//! Export command - write the wide feature table.

use std::path::PathBuf;

use caregap::{ExportConfig, Exporter, JoinMode, SchemaRegistry, Store};
use colored::Colorize;

pub fn run(
    output: PathBuf,
    fetch_size: usize,
    outer_join: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::from_env()?;
    let registry = SchemaRegistry::global();

    let join = if outer_join {
        JoinMode::LeftOuter
    } else {
        JoinMode::Inner
    };
    let config = ExportConfig::default()
        .with_fetch_size(fetch_size)
        .with_join(join)
        .with_progress(true);

    let report = Exporter::new(&store, registry)
        .with_config(config)
        .export_to_path(&output)?;

    println!(
        "{} {} rows x {} columns to {}",
        "Exported".green().bold(),
        report.rows_written,
        report.columns,
        output.display().to_string().white()
    );
    if report.dropped > 0 {
        println!(
            "  {} of {} members have no row in at least one joined table and were dropped",
            report.dropped.to_string().yellow(),
            report.member_total
        );
        println!(
            "  Use {} to keep them",
            "--outer-join".cyan().bold()
        );
    }

    Ok(())
}

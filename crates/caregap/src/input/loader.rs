//! Directory-level loading of training and holdout sources.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info};

use super::parser::Parser;
use super::source::SourceTable;
use crate::error::{CaregapError, Result};
use crate::schema::DataType;

/// Suffix marking a holdout file stem.
pub const HOLDOUT_SUFFIX: &str = "_Holdout";

/// Logical source name for a file: its stem minus an optional holdout suffix.
pub fn logical_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(stem.strip_suffix(HOLDOUT_SUFFIX).unwrap_or(stem).to_string())
}

/// Read every `*.csv` file in a directory into `sources`, tagging rows with
/// `partition`. Files are read in name order.
pub fn load_partition_dir(
    dir: &Path,
    partition: DataType,
    sources: &mut IndexMap<String, SourceTable>,
    parser: &Parser,
) -> Result<usize> {
    if !dir.is_dir() {
        return Err(CaregapError::Config(format!(
            "{partition} source directory '{}' does not exist",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir).map_err(|e| CaregapError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| CaregapError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?
            .path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();

    for path in &files {
        let Some(name) = logical_name(path) else {
            continue;
        };
        let (table, metadata) = parser.parse_file(path)?;
        debug!(
            source = %name,
            %partition,
            rows = metadata.row_count,
            columns = metadata.column_count,
            hash = %metadata.hash,
            "Loaded {}",
            metadata.file
        );
        sources
            .entry(name.clone())
            .or_insert_with(|| SourceTable::new(name, Vec::new()))
            .append(table, partition, metadata);
    }

    Ok(files.len())
}

/// Load both partitions, training first.
pub fn load_sources(
    training_dir: impl AsRef<Path>,
    holdout_dir: impl AsRef<Path>,
) -> Result<IndexMap<String, SourceTable>> {
    let parser = Parser::new();
    let mut sources = IndexMap::new();

    let training_files = load_partition_dir(
        training_dir.as_ref(),
        DataType::Training,
        &mut sources,
        &parser,
    )?;
    let holdout_files = load_partition_dir(
        holdout_dir.as_ref(),
        DataType::Holdout,
        &mut sources,
        &parser,
    )?;

    info!(
        training_files,
        holdout_files,
        sources = sources.len(),
        "Loaded source files"
    );
    Ok(sources)
}

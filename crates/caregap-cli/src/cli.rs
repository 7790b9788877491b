//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Caregap: ingest member extracts and export the wide feature table
#[derive(Parser)]
#[command(name = "caregap")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load training and holdout CSV extracts into the store
    Ingest {
        /// Directory of training CSV files
        #[arg(short = 'T', long, value_name = "DIR")]
        training_dir: PathBuf,

        /// Directory of holdout CSV files
        #[arg(short = 'H', long, value_name = "DIR")]
        holdout_dir: PathBuf,

        /// Rows per committed batch
        #[arg(long, default_value_t = caregap::ingest::DEFAULT_COMMIT_INTERVAL)]
        commit_interval: usize,

        /// Ingest a small sample of members only
        #[arg(long)]
        test_run: bool,

        /// Members per partition for a test run
        #[arg(long, default_value_t = caregap::ingest::DEFAULT_SAMPLE_SIZE, requires = "test_run")]
        test_run_n_ids: usize,

        /// Seed for test-run sampling
        #[arg(long, requires = "test_run")]
        seed: Option<u64>,
    },

    /// Export the wide table to CSV
    Export {
        /// Output CSV path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Rows fetched per batch
        #[arg(short = 't', long, default_value_t = caregap::export::DEFAULT_FETCH_SIZE)]
        fetch_size: usize,

        /// Keep members missing a row in some entity
        #[arg(long)]
        outer_join: bool,
    },

    /// Rank members by model score
    Rank {
        /// CSV with ID and SCORE columns
        #[arg(value_name = "SCORES")]
        scores: PathBuf,

        /// Output path for ID,SCORE,RANK results
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// List registry entities and their columns
    Tables {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest_args(extra: &[&str]) -> Commands {
        let mut args = vec!["caregap", "ingest", "-T", "train", "-H", "holdout"];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_test_run_defaults_to_fifty_ids() {
        match ingest_args(&["--test-run"]) {
            Commands::Ingest {
                test_run,
                test_run_n_ids,
                seed,
                ..
            } => {
                assert!(test_run);
                assert_eq!(test_run_n_ids, 50);
                assert_eq!(seed, None);
            }
            _ => panic!("expected ingest"),
        }
    }

    #[test]
    fn test_sample_options_require_test_run() {
        let result = Cli::try_parse_from([
            "caregap", "ingest", "-T", "train", "-H", "holdout", "--test-run-n-ids", "5",
        ]);
        assert!(result.is_err());
        assert!(matches!(ingest_args(&[]), Commands::Ingest { test_run: false, .. }));
    }
}

//! Caregap CLI - member extract ingestion and wide-table export.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Ingest {
            training_dir,
            holdout_dir,
            commit_interval,
            test_run,
            test_run_n_ids,
            seed,
        } => commands::ingest::run(
            training_dir,
            holdout_dir,
            commit_interval,
            test_run.then_some(test_run_n_ids),
            seed,
            cli.verbose,
        ),

        Commands::Export {
            output,
            fetch_size,
            outer_join,
        } => commands::export::run(output, fetch_size, outer_join, cli.verbose),

        Commands::Rank { scores, output } => commands::rank::run(scores, output, cli.verbose),

        Commands::Tables { json } => commands::tables::run(json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "caregap=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

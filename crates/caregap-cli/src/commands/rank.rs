//! Rank command - order members by model score.

use std::path::PathBuf;

use caregap::ranking::write_results_to_path;
use caregap::{rank_scores, read_scores};
use colored::Colorize;

pub fn run(
    scores: PathBuf,
    output: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ranked = rank_scores(&read_scores(&scores)?)?;
    write_results_to_path(&output, &ranked)?;

    println!(
        "{} {} members to {}",
        "Ranked".green().bold(),
        ranked.len(),
        output.display().to_string().white()
    );

    if verbose {
        println!();
        println!("{}", "Top members:".yellow().bold());
        for member in ranked.iter().take(10) {
            println!(
                "  {:>4}  {:<12} {:.4}",
                member.rank,
                member.id,
                member.score
            );
        }
    }

    Ok(())
}

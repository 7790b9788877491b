//! Tables command - list registry entities.

use caregap::schema::Cardinality;
use caregap::SchemaRegistry;
use colored::Colorize;

pub fn run(json_output: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = SchemaRegistry::global();

    if json_output {
        let entities: Vec<_> = registry
            .all()
            .values()
            .map(|e| {
                let columns: Vec<_> = e
                    .columns
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "name": c.name,
                            "kind": c.kind.label(),
                            "cardinality": c.handler.cardinality(),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "name": e.name,
                    "table": e.table,
                    "cardinality": e.cardinality,
                    "joined": e.is_joinable(),
                    "columns": columns,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entities)?);
        return Ok(());
    }

    println!("{}", "Registry entities:".cyan().bold());
    println!();
    for entity in registry.all().values() {
        let marker = match entity.cardinality {
            Cardinality::OneToOne => "joined".green(),
            Cardinality::OneToMany => "not joined".yellow(),
        };
        println!(
            "  {} -> {} ({} columns, {})",
            entity.name.white().bold(),
            entity.table,
            entity.columns.len(),
            marker
        );
        if verbose {
            for column in &entity.columns {
                println!("      {:<40} {}", column.name, column.kind.label());
            }
        }
    }

    Ok(())
}

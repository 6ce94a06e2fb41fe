//! Entry point of `stockroom`.
//!
//! Lifecycle:
//! - parse the command line and set up logging
//! - import the catalog, then every delivery manifest, then every sales log
//! - plan and write the next delivery manifest when `--export` is given
//! - print the final store state (text or `--json`)

mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use stockroom_observability::LogFormat;
use stockroom_records::io;
use stockroom_store::{ReplenishmentPlanner, Store};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    match args.log_format {
        LogFormat::Json => stockroom_observability::init(),
        other => stockroom_observability::init_with(other),
    }
    args.validate()?;

    let store = run(&args)?;
    print_summary(&store, args.json)
}

fn run(args: &cli::Args) -> Result<Store> {
    let mut store = Store::new(args.name.clone(), args.capital);
    info!(store = store.name(), capital = store.capital(), "store opened");

    if let Some(path) = &args.catalog {
        io::import_catalog_file(&mut store, path)
            .with_context(|| format!("importing catalog {}", path.display()))?;
    }
    for path in &args.manifests {
        io::import_manifest_file(&mut store, path)
            .with_context(|| format!("importing manifest {}", path.display()))?;
    }
    for path in &args.sales {
        io::import_sales_file(&mut store, path)
            .with_context(|| format!("importing sales log {}", path.display()))?;
    }
    if let Some(path) = &args.export {
        let planner = ReplenishmentPlanner::new(args.planner_config());
        io::export_manifest_file(&store, &planner, path)
            .with_context(|| format!("exporting manifest to {}", path.display()))?;
    }
    Ok(store)
}

fn print_summary(store: &Store, json: bool) -> Result<()> {
    let snapshot = store.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("{} (capital {:.2})", snapshot.name, snapshot.capital);
    for row in &snapshot.items {
        println!("  {:<24} {:>8}", row.name, row.quantity);
    }
    let reorder = store.generate_reorder_list();
    if !reorder.is_empty() {
        let names: Vec<&str> = reorder.iter().map(|item| item.name()).collect();
        println!("reorder: {}", names.join(", "));
    }
    Ok(())
}

//! Tables command - list the table catalog of a single PDF.

use std::path::PathBuf;

use clap::Args;
use console::style;

use docfield_core::{Diagnostics, Document, PdfBackend, TableCatalog};

/// Arguments for the tables command.
#[derive(Args)]
pub struct TablesArgs {
    /// PDF file to inspect
    #[arg(required = true)]
    input: PathBuf,

    /// Print the full content of every table
    #[arg(long)]
    full: bool,
}

pub fn run(args: TablesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.is_file() {
        anyhow::bail!("File not found: {}", args.input.display());
    }

    let config = super::load_config(config_path)?;
    let backend = PdfBackend::new(config.tables);
    let document = Document::from_path(args.input.clone());

    let mut diagnostics = Diagnostics::new();
    let catalog = TableCatalog::extract(&backend, &document, &mut diagnostics)?;

    if catalog.is_empty() {
        println!("{} No tables found in {}", style("ℹ").blue(), document.filename);
        return Ok(());
    }

    println!(
        "{} {} tables in {}",
        style("✓").green(),
        catalog.len(),
        document.filename
    );
    println!();

    let mut number = 0;
    for (page, tables) in catalog.pages() {
        for table in tables {
            number += 1;
            println!(
                "{} page {}, {} x {}",
                style(format!("Table {}", number)).bold(),
                page + 1,
                table.num_rows(),
                table.num_cols()
            );

            let rows = if args.full { table.rows() } else { &table.rows()[..1] };
            for row in rows {
                println!("  | {} |", format_row(row));
            }
        }
    }

    Ok(())
}

fn format_row(row: &[Option<String>]) -> String {
    row.iter()
        .map(|cell| cell.as_deref().unwrap_or("").replace('\n', " "))
        .collect::<Vec<_>>()
        .join(" | ")
}

//! Extract command - run a rule set over a directory of PDF files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use docfield_core::{
    BatchDriver, Diagnostics, DocumentRegistry, ExtractionResult, PdfBackend, RuleEvent, RuleSet,
    Severity,
};

/// Output format for the extracted values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Directory searched recursively for PDF files
    #[arg(short = 'd', long)]
    directory: PathBuf,

    /// Rule set file (csv, xlsx, xls, ods)
    #[arg(short = 'c', long = "rules")]
    rules: PathBuf,

    /// Output file (defaults to output.result_file from the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Save the extracted text of documents read by pattern rules
    #[arg(short = 't', long)]
    save_text: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if args.save_text {
        config.output.save_text = true;
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.result_file.clone());

    let registry = DocumentRegistry::scan(&args.directory)?;
    let rules = RuleSet::from_path(&args.rules)?;

    println!(
        "{} Found {} PDF files and {} rules",
        style("ℹ").blue(),
        registry.len(),
        rules.len()
    );

    let pb = ProgressBar::new(rules.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rules {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let backend = PdfBackend::new(config.tables.clone());
    let driver = BatchDriver::new(&backend, &config);
    let mut diagnostics = Diagnostics::new();

    let results =
        driver.run_with_progress(&rules, &registry, &mut diagnostics, |event| match event {
            RuleEvent::Started(rule) => pb.set_message(rule.field_name.clone()),
            RuleEvent::Finished(_) => pb.inc(1),
        });
    pb.finish_and_clear();
    let results = results?;

    write_results(&results, &output, args.format)?;

    let resolved = results.iter().filter(|r| r.is_resolved()).count();
    let unresolved = results.len() - resolved;
    let warnings = diagnostics.at_least(Severity::Warning).count();
    debug!("{} diagnostics recorded", diagnostics.records().len());

    println!();
    println!("{}", style("Extraction Summary").bold().underlined());
    println!("  Rules:      {}", rules.len());
    println!("  {} Resolved:   {}", style("✓").green(), resolved);
    if unresolved > 0 {
        println!("  {} No value:   {}", style("✗").red(), unresolved);
    }
    let skipped = rules.len() - results.len();
    if skipped > 0 {
        println!("  {} Skipped:    {}", style("⚠").yellow(), skipped);
    }
    if warnings > 0 {
        println!("  Warnings:   {}", warnings);
    }
    println!("  Total time: {:.2}s", start.elapsed().as_secs_f64());
    println!();
    println!(
        "{} Results written to {}",
        style("✓").green(),
        output.display()
    );

    Ok(())
}

fn write_results(
    results: &[ExtractionResult],
    output: &Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Csv => fs::write(output, format_csv(results)?)?,
        OutputFormat::Json => fs::write(output, serde_json::to_string_pretty(results)?)?,
    }

    Ok(())
}

fn format_csv(results: &[ExtractionResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["Field Name", "File Extracted Path", "Value"])?;
    for result in results {
        let path = result.document_path.to_string_lossy();
        wtr.write_record([
            result.field_name.as_str(),
            path.as_ref(),
            result.value.as_deref().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

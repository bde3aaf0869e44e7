//! CLI application for rule-driven PDF field extraction.

mod commands;

use std::fs::File;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use commands::{config, extract, tables};

/// File that receives a copy of the log output when `--debug` is given.
const DEBUG_LOG_FILE: &str = "debug_output.log";

/// docfield - Extract named fields from PDF documents using a rule set
#[derive(Parser)]
#[command(name = "docfield")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log at debug level and copy the log into debug_output.log
    #[arg(long, global = true)]
    debug: bool,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a rule set against a directory of PDF files
    Extract(extract::ExtractArgs),

    /// List the tables found in a PDF file
    Tables(tables::TablesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match (cli.debug, cli.verbose) {
        (_, 3..) => Level::TRACE,
        (true, _) | (false, 2) => Level::DEBUG,
        (false, 1) => Level::INFO,
        (false, _) => Level::WARN,
    };

    let writer = if cli.debug {
        let log_file = File::create(DEBUG_LOG_FILE)?;
        BoxMakeWriter::new(std::io::stderr.and(Mutex::new(log_file)))
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(!cli.debug)
        .with_writer(writer)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()),
        Commands::Tables(args) => tables::run(args, cli.config.as_deref()),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}

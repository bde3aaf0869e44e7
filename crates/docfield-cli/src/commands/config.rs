//! Config command - inspect and create the extraction configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use docfield_core::ExtractConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration and where it was loaded from
    Show {
        /// Print the configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Print one effective setting (e.g., "tables.strategy")
    Get {
        /// Dotted setting key
        key: String,
    },

    /// Show the default configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path (defaults to the per-user configuration file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { json } => show_config(config_path, json),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Get { key } => get_setting(config_path, &key),
        ConfigCommand::Path => show_path(),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docfield")
        .join("config.json")
}

fn show_config(config_path: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let value = serde_json::to_value(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match super::config_source(config_path) {
        Some(path) => println!("{} Loaded from {}", style("ℹ").blue(), path.display()),
        None => println!("{} No config file found, using defaults.", style("ℹ").blue()),
    }

    let defaults = serde_json::to_value(ExtractConfig::default())?;
    for (key, setting) in flatten_settings(&value) {
        let changed = lookup(&defaults, &key).map_or(true, |default| default != setting);
        if changed {
            println!("  {} = {} {}", key, setting, style("(changed)").yellow());
        } else {
            println!("  {} = {}", key, setting);
        }
    }

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    ExtractConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_setting(config_path: Option<&str>, key: &str) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let value = serde_json::to_value(&config)?;

    println!("{}", lookup(&value, key)?);

    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!("Run 'docfield config init' to create it.");
    }

    Ok(())
}

/// Resolves a dotted key to a single setting. Sections are not settings.
fn lookup<'a>(config: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    let mut current = config;
    let mut section = String::new();

    for part in key.split('.') {
        let Some(fields) = current.as_object() else {
            anyhow::bail!("Unknown setting '{}': '{}' is not a section", key, section);
        };
        current = match fields.get(part) {
            Some(next) => next,
            None => anyhow::bail!(
                "Unknown setting '{}'. Known keys{}: {}",
                key,
                if section.is_empty() {
                    String::new()
                } else {
                    format!(" under '{}'", section)
                },
                fields.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        };
        if !section.is_empty() {
            section.push('.');
        }
        section.push_str(part);
    }

    if let Some(fields) = current.as_object() {
        anyhow::bail!(
            "'{}' is a section; pick one of: {}",
            key,
            fields
                .keys()
                .map(|field| format!("{}.{}", key, field))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(current)
}

/// Every leaf setting as a dotted key and its value.
fn flatten_settings(config: &Value) -> Vec<(String, &Value)> {
    let mut settings = Vec::new();
    collect(config, String::new(), &mut settings);
    settings
}

fn collect<'a>(value: &'a Value, prefix: String, out: &mut Vec<(String, &'a Value)>) {
    match value.as_object() {
        Some(fields) => {
            for (name, field) in fields {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", prefix, name)
                };
                collect(field, key, out);
            }
        }
        None => out.push((prefix, value)),
    }
}

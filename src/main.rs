//! Confstack CLI
//!
//! Resolves layered configuration (schema defaults, global, project, local
//! files, environment variables) and exposes the merged tree for inspection.

use anyhow::Result;
use clap::Parser;
use confstack::cli::{CheckArgs, Cli, Command, ExportArgs, GetArgs, ShowArgs, ShowFormat};
use confstack::config::{ConfigResolver, LayerState};
use confstack::format::FileFormat;
use serde_json::Value;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let resolver = ConfigResolver::load(&cli.base_dir, &cli.env_prefix)?;

    match cli.command {
        Command::Check(args) => run_check(&resolver, args)?,
        Command::Get(args) => run_get(&resolver, args)?,
        Command::Show(args) => run_show(&resolver, args)?,
        Command::Export(args) => run_export(&resolver, args)?,
    }

    Ok(())
}

fn run_check(resolver: &ConfigResolver, args: CheckArgs) -> Result<()> {
    let info = resolver.info();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Base directory: {}", info.base_dir.display());
    println!("Schema: {}", info.schema_file.display());
    println!("Layers:");
    for layer in &info.layers {
        let status = match &layer.state {
            LayerState::Loaded => "loaded".to_string(),
            LayerState::Missing => "missing".to_string(),
            LayerState::Skipped { reason } => format!("skipped ({reason})"),
        };
        println!("  {}: {} [{}]", layer.layer, layer.file.display(), status);
    }
    if info.env_overrides.is_empty() {
        println!("Environment ({}): no matching variables", info.env_prefix);
    } else {
        println!("Environment ({}):", info.env_prefix);
        for var in &info.env_overrides {
            println!("  {} = {}", var.key, var.raw);
        }
    }
    if info.validation.valid {
        println!("Validation: ok");
    } else {
        println!("Validation: {} issue(s)", info.validation.issues.len());
        for issue in &info.validation.issues {
            println!("  {issue}");
        }
    }

    Ok(())
}

fn run_get(resolver: &ConfigResolver, args: GetArgs) -> Result<()> {
    match resolver.get(&args.path) {
        // Strings print bare so shell scripts get the value, not a quoted literal
        Some(Value::String(text)) => println!("{text}"),
        Some(value) => println!("{value}"),
        None => match args.default {
            Some(default) => println!("{default}"),
            None => anyhow::bail!("path '{}' not found in merged configuration", args.path),
        },
    }

    Ok(())
}

/// Convert CLI ShowFormat to the on-disk FileFormat
fn show_format_to_file(format: ShowFormat) -> FileFormat {
    match format {
        ShowFormat::Yaml => FileFormat::Yaml,
        ShowFormat::Json => FileFormat::Json,
    }
}

fn run_show(resolver: &ConfigResolver, args: ShowArgs) -> Result<()> {
    let tree = resolver.get_all();
    let format = show_format_to_file(args.format.unwrap_or_default());
    let text = format.serialize(&tree)?;
    match format {
        // serde_yaml output already ends with a newline
        FileFormat::Yaml => print!("{text}"),
        FileFormat::Json => println!("{text}"),
    }

    Ok(())
}

fn run_export(resolver: &ConfigResolver, args: ExportArgs) -> Result<()> {
    let subset = match &args.path {
        Some(path) => Some(
            resolver
                .get(path)
                .ok_or_else(|| {
                    anyhow::anyhow!("path '{path}' not found in merged configuration")
                })?
                .clone(),
        ),
        None => None,
    };
    resolver.save_config(&args.output, subset.as_ref())?;
    println!("Wrote {}", args.output.display());

    Ok(())
}

//! typed-identifier CLI
//!
//! Applies `to_typed_identifier` process mappings to newline-delimited JSON
//! source records and prints one JSON row per record.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use typed_identifier::{
    FieldConfigRegistry, MigrationConfig, MigrationRunner, Result, TypedIdentifierTransformer,
};

#[derive(Parser, Debug)]
#[command(name = "typed-identifier", version, about)]
struct Cli {
    /// Migration process mappings (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    migration: PathBuf,

    /// Field settings holding allowed identifier types
    #[arg(short, long)]
    fields: Option<PathBuf>,

    /// Newline-delimited JSON records (stdin when omitted)
    input: Option<PathBuf>,

    /// Classify the `id` key by name instead of detecting its type
    #[arg(long)]
    no_detect: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let migration = MigrationConfig::load(&cli.migration)?;
    tracing::info!(
        mappings = migration.process.len(),
        "Loaded migration from {:?}",
        cli.migration
    );

    let mut transformer = TypedIdentifierTransformer::new();
    if let Some(path) = &cli.fields {
        let registry = FieldConfigRegistry::load_file(path)?;
        tracing::info!(fields = registry.len(), "Loaded field settings from {:?}", path);
        transformer = transformer.with_field_settings(Arc::new(registry));
    }
    if !cli.no_detect {
        transformer = transformer.with_default_detector();
    }

    let runner = MigrationRunner::new(migration, transformer);

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut out = BufWriter::new(io::stdout().lock());

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: serde_json::Value = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(line = index + 1, "Skipping malformed record: {}", e);
                continue;
            }
        };

        let row = runner.process_record(&record);
        serde_json::to_writer(&mut out, &row)?;
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

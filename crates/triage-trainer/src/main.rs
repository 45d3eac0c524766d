//! Triage Trainer
//!
//! Offline CLI for the incident priority classifier: trains a model artifact
//! from a historical CSV corpus, or migrates legacy artifacts to the
//! canonical schema. Runs out-of-band (manually or from a scheduled batch
//! job), never on the live request path.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

mod corpus;
mod migrate;

use triage_classifiers::model::{PriorityModel, DEFAULT_SMOOTHING, SCHEMA_VERSION};
use triage_classifiers::train;
use triage_core::PriorityClass;

#[derive(Parser, Debug)]
#[command(name = "triage-trainer")]
#[command(about = "Offline trainer for the incident priority classifier", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a model artifact from a labeled CSV corpus
    Train {
        /// CSV corpus with text and label columns
        #[arg(short, long)]
        corpus: PathBuf,

        /// Output path for the model artifact
        #[arg(short, long, default_value = "./models/priority.json")]
        output: PathBuf,

        /// Laplace smoothing constant
        #[arg(long, default_value_t = DEFAULT_SMOOTHING)]
        smoothing: f64,
    },

    /// Convert a legacy model artifact to the canonical schema
    Migrate {
        /// Legacy artifact path
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the canonical artifact
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Train {
            corpus,
            output,
            smoothing,
        } => run_train(&corpus, &output, smoothing),
        Command::Migrate { input, output } => run_migrate(&input, &output),
    }
}

fn run_train(corpus_path: &Path, output: &Path, smoothing: f64) -> Result<()> {
    info!("Reading corpus from {}", corpus_path.display());
    let file = File::open(corpus_path)
        .with_context(|| format!("cannot open corpus {}", corpus_path.display()))?;
    let examples = corpus::read_corpus(file)?;

    for class in PriorityClass::ALL {
        let count = examples.iter().filter(|e| e.label == class).count();
        info!("  {class}: {count} examples");
    }

    let model = train(&examples, smoothing)?;
    model.save(output)?;
    info!(
        "Wrote model artifact ({} tokens, {} documents) to {}",
        model.vocabulary.len(),
        model.total_document_count,
        output.display()
    );
    Ok(())
}

fn run_migrate(input: &Path, output: &Path) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("cannot read artifact {}", input.display()))?;

    // Already canonical artifacts pass through unchanged
    if let Ok(model) = serde_json::from_str::<PriorityModel>(&content) {
        if model.schema_version == SCHEMA_VERSION && model.validate().is_ok() {
            info!("Artifact is already at schema version {SCHEMA_VERSION}");
            model.save(output)?;
            return Ok(());
        }
    }

    let model = migrate::migrate(&content)?;
    model.save(output)?;
    info!(
        "Migrated artifact to schema version {} at {}",
        SCHEMA_VERSION,
        output.display()
    );
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("triage=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("triage=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use docsieve_domain::DocType;
use std::path::PathBuf;

/// Docsieve - extract structured fields from scanned documents.
#[derive(Debug, Parser)]
#[command(name = "docsieve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value_t = CliFormat::Table)]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable table (default)
    Table,
    /// Pretty-printed JSON
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full extraction pipeline over a document
    Process(ProcessArgs),

    /// Classify a document without extracting fields
    Classify(ClassifyArgs),
}

/// Arguments for the process command.
#[derive(Debug, clap::Args)]
pub struct ProcessArgs {
    /// Document to process (image or PDF)
    pub file: PathBuf,

    /// Skip classification and treat the document as this type
    #[arg(long, value_enum)]
    pub doc_type: Option<CliDocType>,

    /// Comma-separated field names to extract instead of the defaults
    #[arg(long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Write the JSON result to this path as well
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the validation rule engine
    #[arg(long)]
    pub no_validate: bool,

    /// Flag fields scoring below this confidence
    #[arg(long, default_value_t = 0.7)]
    pub confidence_threshold: f64,

    /// Never send the page image to the vision classifier
    #[arg(long)]
    pub no_vision: bool,
}

/// Arguments for the classify command.
#[derive(Debug, clap::Args)]
pub struct ClassifyArgs {
    /// Document to classify
    pub file: PathBuf,

    /// Never send the page image to the vision classifier
    #[arg(long)]
    pub no_vision: bool,
}

/// Document types, as a clap-friendly enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliDocType {
    /// Commercial invoice
    Invoice,
    /// Medical bill
    MedicalBill,
    /// Prescription
    Prescription,
}

impl From<CliDocType> for DocType {
    fn from(value: CliDocType) -> Self {
        match value {
            CliDocType::Invoice => DocType::Invoice,
            CliDocType::MedicalBill => DocType::MedicalBill,
            CliDocType::Prescription => DocType::Prescription,
        }
    }
}

pub mod report;

use crate::error::Result;
use crate::types::Modality;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments for scancat
#[derive(Parser, Debug)]
#[command(name = "scancat")]
#[command(about = "Classify CT, MR, PET and ophthalmic series from their headers")]
#[command(version)]
pub struct Cli {
    /// Series document (JSON) or a directory of DICOM files
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Modality to classify as (defaults to the header Modality)
    #[arg(short, long)]
    pub modality: Option<String>,

    /// Acquisition label (overrides the one in the series document)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Custom classification rules (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parsed `--modality`, if given
    pub fn modality(&self) -> Result<Option<Modality>> {
        self.modality.as_deref().map(Modality::from_str).transpose()
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

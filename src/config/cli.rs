use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, Validate};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Preview document consumed by the rendering/API layer.
    Json,
    /// Per-item appendix table.
    Csv,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lcp-costing",
    about = "Generate a life care plan cost projection from a master workbook"
)]
pub struct CliConfig {
    /// Master workbook (.xlsx or .xlsm)
    pub workbook: PathBuf,

    /// Directory for generated report files
    #[arg(long, default_value = "./output")]
    pub output_dir: PathBuf,

    /// Report formats to write (repeatable)
    #[arg(long, value_enum, default_value = "json")]
    pub format: Vec<OutputFormat>,

    /// TOML file with cadence-word overrides for the frequency normalizer
    #[arg(long)]
    pub frequency_config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_file_extension("workbook", &self.workbook, &["xlsx", "xlsm"])?;

        if let Some(freq_path) = &self.frequency_config {
            validate_file_extension("frequency_config", freq_path, &["toml"])?;
        }

        Ok(())
    }
}

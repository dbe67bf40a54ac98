pub mod cli;
pub mod frequency;

pub use cli::{CliConfig, OutputFormat};
pub use frequency::FrequencyConfig;

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{FileReportSink, XlsxWorkbookSource};
pub use crate::config::{CliConfig, FrequencyConfig, OutputFormat};
pub use crate::core::aggregate::CostAggregator;
pub use crate::core::engine::ReportEngine;
pub use crate::core::frequency::FrequencyNormalizer;
pub use crate::utils::error::{LcpError, Result};

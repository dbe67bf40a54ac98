use thiserror::Error;

#[derive(Error, Debug)]
pub enum LcpError {
    #[error("Unrecognized frequency text: {text:?}")]
    UnparseableFrequency { text: String },

    #[error("Invalid frequency value in {text:?}: {reason}")]
    InvalidFrequencyValue { text: String, reason: String },

    #[error("No unit cost could be resolved for item '{item}' (codes tried: {codes})")]
    UnresolvedCost { item: String, codes: String },

    #[error("Invalid patient info: {message}")]
    InvalidPatientInfo { message: String },

    #[error("No items selected in workbook")]
    NoItemsSelected,

    #[error("Workbook error: {0}")]
    WorkbookError(#[from] calamine::XlsxError),

    #[error("Workbook layout error: {message}")]
    WorkbookLayoutError { message: String },

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Recoverable per-item issue; the aggregator downgrades these to warnings.
    Low,
    /// Bad input data that aborts the current request.
    Medium,
    /// Configuration or workbook structure problems.
    High,
    /// IO or serialization failures.
    Critical,
}

impl LcpError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LcpError::UnparseableFrequency { .. }
            | LcpError::InvalidFrequencyValue { .. }
            | LcpError::UnresolvedCost { .. } => ErrorSeverity::Low,
            LcpError::InvalidPatientInfo { .. } | LcpError::NoItemsSelected => {
                ErrorSeverity::Medium
            }
            LcpError::WorkbookError(_)
            | LcpError::WorkbookLayoutError { .. }
            | LcpError::ConfigError { .. }
            | LcpError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            LcpError::CsvError(_) | LcpError::IoError(_) | LcpError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LcpError::NoItemsSelected => {
                "No items are checked in the Master sheet (column A). Select at least one item and try again.".to_string()
            }
            LcpError::InvalidPatientInfo { message } => {
                format!("The Patient Info sheet is incomplete: {}", message)
            }
            LcpError::WorkbookLayoutError { message } => {
                format!("The workbook does not match the expected layout: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LcpError>;

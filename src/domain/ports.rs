use crate::domain::model::{CostReport, PatientInfo, WorkbookData};
use crate::utils::error::Result;

/// Anything that can produce one request's worth of parsed workbook data.
pub trait WorkbookSource {
    fn load(&self) -> Result<WorkbookData>;
}

/// Destination for a finished cost report. Returns a description of where
/// the report went (typically an output path).
pub trait ReportSink {
    fn write(&self, patient: &PatientInfo, report: &CostReport) -> Result<String>;
}

pub mod aggregate;
pub mod engine;
pub mod frequency;
pub mod rates;
pub mod report;

pub use crate::domain::model::{
    CareItem, CategoryTotals, CodeType, CostReport, CostResult, FrequencyRate, PatientInfo,
    RateTable, ReportTotals, WorkbookData,
};
pub use crate::domain::ports::{ReportSink, WorkbookSource};
pub use crate::utils::error::Result;

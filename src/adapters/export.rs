use crate::config::OutputFormat;
use crate::core::report::preview_document;
use crate::domain::model::{CostReport, PatientInfo};
use crate::domain::ports::ReportSink;
use crate::utils::currency::format_currency;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

const PREVIEW_FILENAME: &str = "preview.json";
const ITEMS_FILENAME: &str = "items.csv";

/// Writes the requested report artifacts into one output directory:
/// `preview.json` (the shape the rendering/API layer consumes) and/or
/// `items.csv` (the per-item appendix table).
pub struct FileReportSink {
    output_dir: PathBuf,
    formats: Vec<OutputFormat>,
}

impl FileReportSink {
    pub fn new(output_dir: PathBuf, formats: Vec<OutputFormat>) -> Self {
        Self {
            output_dir,
            formats,
        }
    }

    fn write_preview(&self, patient: &PatientInfo, report: &CostReport) -> Result<()> {
        let document = preview_document(patient, report);
        let path = self.output_dir.join(PREVIEW_FILENAME);
        fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        tracing::debug!("Wrote preview document to {}", path.display());
        Ok(())
    }

    fn write_items_csv(&self, report: &CostReport) -> Result<()> {
        let path = self.output_dir.join(ITEMS_FILENAME);
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record([
            "category",
            "item",
            "subcategory",
            "frequency",
            "unit_cost",
            "annual_cost",
            "one_time_cost",
            "lifetime_annual",
            "grand_total",
        ])?;

        for result in &report.results {
            writer.write_record([
                result.item.category.clone(),
                result.item.name.clone(),
                result.item.subcategory.clone(),
                result.item.frequency_text.clone(),
                format_currency(result.unit_cost),
                format_currency(result.annual_cost),
                format_currency(result.one_time_cost),
                format_currency(result.lifetime_annual),
                format_currency(result.grand_total),
            ])?;
        }

        writer.write_record([
            "Totals".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            format_currency(report.totals.total_annual),
            format_currency(report.totals.total_one_time),
            format_currency(report.totals.lifetime_annual),
            format_currency(report.totals.grand_total),
        ])?;

        writer.flush()?;
        tracing::debug!("Wrote item appendix to {}", path.display());
        Ok(())
    }
}

impl ReportSink for FileReportSink {
    fn write(&self, patient: &PatientInfo, report: &CostReport) -> Result<String> {
        fs::create_dir_all(&self.output_dir)?;

        for format in &self.formats {
            match format {
                OutputFormat::Json => self.write_preview(patient, report)?,
                OutputFormat::Csv => self.write_items_csv(report)?,
            }
        }

        Ok(self.output_dir.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CareItem, CategoryTotals, CodeType, CostResult, ReportTotals};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn sample_report() -> CostReport {
        let item = CareItem {
            category: "Physician Services".to_string(),
            name: "Office visit".to_string(),
            subcategory: "Primary care".to_string(),
            description: String::new(),
            code_type: CodeType::Pfr,
            codes: vec!["99213".to_string()],
            unit_cost: None,
            frequency_text: "2x/year".to_string(),
            source: String::new(),
            rationale: String::new(),
            selected: true,
        };

        CostReport {
            results: vec![CostResult {
                item,
                unit_cost: dec!(100),
                annual_cost: dec!(200),
                one_time_cost: dec!(0),
                lifetime_annual: dec!(6000),
                grand_total: dec!(6000),
            }],
            totals: ReportTotals {
                total_annual: dec!(200),
                total_one_time: dec!(0),
                lifetime_annual: dec!(6000),
                grand_total: dec!(6000),
                life_expectancy: dec!(30),
            },
            categories: vec![(
                "Physician Services".to_string(),
                CategoryTotals {
                    annual_cost: dec!(200),
                    one_time_cost: dec!(0),
                    item_count: 1,
                },
            )],
            warnings: vec![],
        }
    }

    #[test]
    fn test_writes_requested_formats() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileReportSink::new(
            temp_dir.path().to_path_buf(),
            vec![OutputFormat::Json, OutputFormat::Csv],
        );
        let patient = PatientInfo::new("Jane Roe", dec!(30));

        let output = sink.write(&patient, &sample_report()).unwrap();

        assert_eq!(output, temp_dir.path().display().to_string());
        assert!(temp_dir.path().join("preview.json").exists());
        assert!(temp_dir.path().join("items.csv").exists());
    }

    #[test]
    fn test_json_only_skips_csv() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileReportSink::new(temp_dir.path().to_path_buf(), vec![OutputFormat::Json]);
        let patient = PatientInfo::new("Jane Roe", dec!(30));

        sink.write(&patient, &sample_report()).unwrap();

        assert!(temp_dir.path().join("preview.json").exists());
        assert!(!temp_dir.path().join("items.csv").exists());
    }

    #[test]
    fn test_preview_document_contents() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileReportSink::new(temp_dir.path().to_path_buf(), vec![OutputFormat::Json]);
        let patient = PatientInfo::new("Jane Roe", dec!(30));

        sink.write(&patient, &sample_report()).unwrap();

        let content = fs::read_to_string(temp_dir.path().join("preview.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["patient_info"]["patient_name"], "Jane Roe");
        assert_eq!(parsed["item_count"], 1);
    }

    #[test]
    fn test_csv_has_header_items_and_totals_row() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileReportSink::new(temp_dir.path().to_path_buf(), vec![OutputFormat::Csv]);
        let patient = PatientInfo::new("Jane Roe", dec!(30));

        sink.write(&patient, &sample_report()).unwrap();

        let content = fs::read_to_string(temp_dir.path().join("items.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("category,item"));
        assert!(lines[1].contains("Office visit"));
        assert!(lines[1].contains("$200.00"));
        assert!(lines[2].starts_with("Totals"));
        assert!(lines[2].contains("$6,000.00"));
    }
}

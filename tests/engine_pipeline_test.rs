use lcp_costing::domain::model::{CareItem, CodeType, PatientInfo, RateTable, WorkbookData};
use lcp_costing::domain::ports::WorkbookSource;
use lcp_costing::utils::error::Result;
use lcp_costing::{
    CostAggregator, FileReportSink, FrequencyConfig, FrequencyNormalizer, LcpError, OutputFormat,
    ReportEngine,
};
use rust_decimal_macros::dec;
use tempfile::TempDir;

struct FixtureSource {
    data: WorkbookData,
}

impl WorkbookSource for FixtureSource {
    fn load(&self) -> Result<WorkbookData> {
        Ok(self.data.clone())
    }
}

fn care_item(category: &str, name: &str, frequency: &str, selected: bool) -> CareItem {
    CareItem {
        category: category.to_string(),
        name: name.to_string(),
        subcategory: String::new(),
        description: String::new(),
        code_type: CodeType::Pfr,
        codes: vec!["99213".to_string()],
        unit_cost: None,
        frequency_text: frequency.to_string(),
        source: "CMS fee schedule".to_string(),
        rationale: String::new(),
        selected,
    }
}

fn fixture_data() -> WorkbookData {
    let mut pfr = RateTable::new();
    pfr.insert("99213", dec!(125));

    let mut patient = PatientInfo::new("Jane Roe", dec!(20));
    patient.geo_multiplier = dec!(1.1);

    WorkbookData {
        patient,
        items: vec![
            care_item("Physician Services", "Office visit", "2x/year", true),
            care_item("Physician Services", "Annual exam", "yearly", true),
        ],
        pfr,
        apc: RateTable::new(),
    }
}

fn engine_for(
    data: WorkbookData,
    output_dir: std::path::PathBuf,
    formats: Vec<OutputFormat>,
) -> ReportEngine<FixtureSource, FileReportSink> {
    let source = FixtureSource { data };
    let sink = FileReportSink::new(output_dir, formats);
    let aggregator = CostAggregator::new(FrequencyNormalizer::new(FrequencyConfig::default()));
    ReportEngine::new(source, sink, aggregator)
}

#[test]
fn test_end_to_end_report_generation() {
    let temp_dir = TempDir::new().unwrap();
    let engine = engine_for(
        fixture_data(),
        temp_dir.path().to_path_buf(),
        vec![OutputFormat::Json, OutputFormat::Csv],
    );

    let output = engine.run().unwrap();
    assert_eq!(output, temp_dir.path().display().to_string());

    let preview: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("preview.json")).unwrap())
            .unwrap();

    // 2x/year at 125 plus yearly at 125 -> 375 annual, over 20 years.
    assert_eq!(preview["totals"]["total_annual"], "375.00");
    assert_eq!(preview["totals"]["lifetime_annual"], "7500.00");
    assert_eq!(preview["totals"]["grand_total"], "7500.00");
    assert_eq!(preview["item_count"], 2);
    assert_eq!(preview["patient_info"]["patient_name"], "Jane Roe");

    let csv_content = std::fs::read_to_string(temp_dir.path().join("items.csv")).unwrap();
    assert!(csv_content.contains("Office visit"));
    assert!(csv_content.contains("Annual exam"));
    assert!(csv_content.lines().last().unwrap().starts_with("Totals"));
}

#[test]
fn test_engine_aborts_when_nothing_selected() {
    let temp_dir = TempDir::new().unwrap();
    let mut data = fixture_data();
    for item in &mut data.items {
        item.selected = false;
    }
    let engine = engine_for(data, temp_dir.path().to_path_buf(), vec![OutputFormat::Json]);

    let err = engine.run().unwrap_err();
    assert!(matches!(err, LcpError::NoItemsSelected));
    // No partial report on disk.
    assert!(!temp_dir.path().join("preview.json").exists());
}

#[test]
fn test_engine_aborts_on_invalid_patient_info() {
    let temp_dir = TempDir::new().unwrap();
    let mut data = fixture_data();
    data.patient.life_expectancy = dec!(0);
    let engine = engine_for(data, temp_dir.path().to_path_buf(), vec![OutputFormat::Json]);

    let err = engine.run().unwrap_err();
    assert!(matches!(err, LcpError::InvalidPatientInfo { .. }));
    assert!(!temp_dir.path().join("preview.json").exists());
}

#[test]
fn test_unresolved_items_become_warnings_not_failures() {
    let temp_dir = TempDir::new().unwrap();
    let mut data = fixture_data();
    // Code that matches nothing in the PFR table.
    data.items.push({
        let mut item = care_item("Diagnostics", "Mystery scan", "yearly", true);
        item.codes = vec!["00000".to_string()];
        item
    });
    let engine = engine_for(data, temp_dir.path().to_path_buf(), vec![OutputFormat::Json]);

    engine.run().unwrap();

    let preview: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("preview.json")).unwrap())
            .unwrap();
    assert_eq!(preview["item_count"], 2);
    let warnings = preview["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].as_str().unwrap().contains("Mystery scan"));
}

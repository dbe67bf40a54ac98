use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pricing reference table an item's codes resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CodeType {
    /// Professional fee (PFR sheet).
    Pfr,
    /// Facility fee (APC sheet); geographic multiplier applies.
    Apc,
    /// Diagnosis-related group; no lookup table, cost must come from the sheet.
    Drg,
    #[default]
    None,
}

impl CodeType {
    /// Parse the code-type cell. "FACILITY" is an accepted alias for APC.
    pub fn parse(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        if upper.contains("APC") || upper.contains("FACILITY") {
            CodeType::Apc
        } else if upper.contains("PFR") {
            CodeType::Pfr
        } else if upper.contains("DRG") {
            CodeType::Drg
        } else {
            CodeType::None
        }
    }
}

/// One row of the Master sheet. Immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareItem {
    pub category: String,
    pub name: String,
    pub subcategory: String,
    pub description: String,
    pub code_type: CodeType,
    pub codes: Vec<String>,
    pub unit_cost: Option<Decimal>,
    pub frequency_text: String,
    pub source: String,
    pub rationale: String,
    pub selected: bool,
}

/// Canonical annualized form of a frequency cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyRate {
    OneTime,
    /// Invariant: `per_year > 0`.
    Recurring { per_year: Decimal },
}

/// Read-only code-to-price mapping, one per code type requiring lookup.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    prices: HashMap<String, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, price: Decimal) {
        self.prices.insert(code.into(), price);
    }

    pub fn get(&self, code: &str) -> Option<Decimal> {
        self.prices.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(String, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

/// Patient header block from the 'Patient Info' sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientInfo {
    pub patient_name: String,
    pub date_of_report: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_injury: Option<NaiveDate>,
    pub age: Option<Decimal>,
    pub age_initiated: Option<Decimal>,
    pub life_expectancy: Decimal,
    pub geo_multiplier: Decimal,
    pub city_state: Option<String>,
    pub zipcode: Option<String>,
    pub referring_attorney: Option<String>,
}

impl PatientInfo {
    pub fn new(patient_name: impl Into<String>, life_expectancy: Decimal) -> Self {
        Self {
            patient_name: patient_name.into(),
            date_of_report: None,
            date_of_birth: None,
            date_of_injury: None,
            age: None,
            age_initiated: None,
            life_expectancy,
            geo_multiplier: Decimal::ONE,
            city_state: None,
            zipcode: None,
            referring_attorney: None,
        }
    }

    /// Age through which care is projected, when both inputs are present.
    pub fn until_age(&self) -> Option<Decimal> {
        self.age_initiated.map(|age| age + self.life_expectancy)
    }
}

/// Costed projection for a single selected item.
#[derive(Debug, Clone, Serialize)]
pub struct CostResult {
    pub item: CareItem,
    pub unit_cost: Decimal,
    pub annual_cost: Decimal,
    pub one_time_cost: Decimal,
    pub lifetime_annual: Decimal,
    pub grand_total: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryTotals {
    pub annual_cost: Decimal,
    pub one_time_cost: Decimal,
    pub item_count: usize,
}

/// Report-level sums; computed once per request, never mutated after.
#[derive(Debug, Clone, Serialize)]
pub struct ReportTotals {
    pub total_annual: Decimal,
    pub total_one_time: Decimal,
    pub lifetime_annual: Decimal,
    pub grand_total: Decimal,
    pub life_expectancy: Decimal,
}

/// Everything the formatter and sinks need for one request.
#[derive(Debug, Clone)]
pub struct CostReport {
    pub results: Vec<CostResult>,
    pub totals: ReportTotals,
    /// Keyed by category name, in first-seen order.
    pub categories: Vec<(String, CategoryTotals)>,
    /// Per-item degradations collected during aggregation.
    pub warnings: Vec<String>,
}

/// Parsed workbook contents handed from a source to the aggregator.
#[derive(Debug, Clone)]
pub struct WorkbookData {
    pub patient: PatientInfo,
    pub items: Vec<CareItem>,
    pub pfr: RateTable,
    pub apc: RateTable,
}

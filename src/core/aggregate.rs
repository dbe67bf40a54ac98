use crate::core::frequency::FrequencyNormalizer;
use crate::core::rates::resolve_unit_cost;
use crate::domain::model::{
    CareItem, CategoryTotals, CostReport, CostResult, FrequencyRate, PatientInfo, RateTable,
    ReportTotals,
};
use crate::utils::error::{LcpError, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;

const UNCATEGORIZED: &str = "Uncategorized";

/// Combines per-item unit cost, frequency rate and life-expectancy horizon
/// into annual, one-time and lifetime totals, grouped per category and
/// overall. Sums are exact decimals; rounding happens only at presentation.
pub struct CostAggregator {
    normalizer: FrequencyNormalizer,
}

impl CostAggregator {
    pub fn new(normalizer: FrequencyNormalizer) -> Self {
        Self { normalizer }
    }

    /// Failure policy: per-item issues degrade to warnings (unparseable
    /// frequency falls back to one-time; invalid values and unresolvable
    /// costs exclude the item); missing patient name, non-positive life
    /// expectancy or zero selected items abort with no partial report.
    pub fn aggregate(
        &self,
        items: &[CareItem],
        pfr: &RateTable,
        apc: &RateTable,
        patient: &PatientInfo,
    ) -> Result<CostReport> {
        validate_patient(patient)?;

        let selected: Vec<&CareItem> = items.iter().filter(|item| item.selected).collect();
        if selected.is_empty() {
            return Err(LcpError::NoItemsSelected);
        }

        let mut results = Vec::new();
        let mut warnings = Vec::new();
        let mut categories: Vec<(String, CategoryTotals)> = Vec::new();
        let mut category_index: HashMap<String, usize> = HashMap::new();

        for item in selected {
            let rate = match self.normalizer.normalize(&item.frequency_text) {
                Ok(rate) => rate,
                Err(LcpError::UnparseableFrequency { text }) => {
                    warnings.push(format!(
                        "{}: unrecognized frequency {:?}, treated as one-time",
                        item.name, text
                    ));
                    FrequencyRate::OneTime
                }
                Err(err @ LcpError::InvalidFrequencyValue { .. }) => {
                    warnings.push(format!("{}: excluded ({})", item.name, err));
                    continue;
                }
                Err(err) => return Err(err),
            };

            let unit_cost = match resolve_unit_cost(item, pfr, apc, patient.geo_multiplier) {
                Ok(cost) => cost,
                Err(err @ LcpError::UnresolvedCost { .. }) => {
                    warnings.push(format!("{}: excluded ({})", item.name, err));
                    continue;
                }
                Err(err) => return Err(err),
            };

            let result = cost_item(item, unit_cost, rate, patient.life_expectancy);

            let category = if item.category.trim().is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                item.category.clone()
            };
            let index = *category_index.entry(category.clone()).or_insert_with(|| {
                categories.push((category, CategoryTotals::default()));
                categories.len() - 1
            });
            let totals = &mut categories[index].1;
            totals.annual_cost += result.annual_cost;
            totals.one_time_cost += result.one_time_cost;
            totals.item_count += 1;

            results.push(result);
        }

        let total_annual: Decimal = results.iter().map(|r| r.annual_cost).sum();
        let total_one_time: Decimal = results.iter().map(|r| r.one_time_cost).sum();
        let lifetime_annual: Decimal = results.iter().map(|r| r.lifetime_annual).sum();

        let totals = ReportTotals {
            total_annual,
            total_one_time,
            lifetime_annual,
            grand_total: lifetime_annual + total_one_time,
            life_expectancy: patient.life_expectancy,
        };

        Ok(CostReport {
            results,
            totals,
            categories,
            warnings,
        })
    }
}

fn validate_patient(patient: &PatientInfo) -> Result<()> {
    if patient.patient_name.trim().is_empty() {
        return Err(LcpError::InvalidPatientInfo {
            message: "patient name is required".to_string(),
        });
    }
    if patient.life_expectancy <= Decimal::ZERO {
        return Err(LcpError::InvalidPatientInfo {
            message: format!(
                "life expectancy must be greater than zero (got {})",
                patient.life_expectancy
            ),
        });
    }
    Ok(())
}

fn cost_item(
    item: &CareItem,
    unit_cost: Decimal,
    rate: FrequencyRate,
    life_expectancy: Decimal,
) -> CostResult {
    let (annual_cost, one_time_cost, lifetime_annual) = match rate {
        FrequencyRate::Recurring { per_year } => {
            let annual = unit_cost * per_year;
            (annual, Decimal::ZERO, annual * life_expectancy)
        }
        FrequencyRate::OneTime => (Decimal::ZERO, unit_cost, Decimal::ZERO),
    };

    CostResult {
        item: item.clone(),
        unit_cost,
        annual_cost,
        one_time_cost,
        lifetime_annual,
        grand_total: lifetime_annual + one_time_cost,
    }
}

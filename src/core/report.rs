use crate::domain::model::{CostReport, PatientInfo};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

/// Shape a finished report into the preview/response document. No
/// computation happens here; amounts are rounded to 2 places and category
/// insertion order is preserved (`serde_json` is built with
/// `preserve_order`).
pub fn preview_document(patient: &PatientInfo, report: &CostReport) -> Value {
    let mut categories = Map::new();
    for (name, totals) in &report.categories {
        categories.insert(
            name.clone(),
            json!({
                "annual_cost": money(totals.annual_cost),
                "one_time_cost": money(totals.one_time_cost),
                "item_count": totals.item_count,
            }),
        );
    }

    json!({
        "patient_info": {
            "patient_name": patient.patient_name,
            "date_of_birth": date_string(patient.date_of_birth),
            "date_of_injury": date_string(patient.date_of_injury),
            "life_expectancy": patient.life_expectancy,
        },
        "totals": {
            "total_annual": money(report.totals.total_annual),
            "total_one_time": money(report.totals.total_one_time),
            "lifetime_annual": money(report.totals.lifetime_annual),
            "grand_total": money(report.totals.grand_total),
            "life_expectancy": report.totals.life_expectancy,
        },
        "categories": categories,
        "item_count": report.results.len(),
        "warnings": report.warnings,
    })
}

fn money(amount: Decimal) -> Value {
    let mut rounded = amount.round_dp(2);
    // Present whole amounts with the same two-place scale ("200.00").
    rounded.rescale(2);
    json!(rounded)
}

fn date_string(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

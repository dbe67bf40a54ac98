use crate::domain::model::{CareItem, CodeType, PatientInfo, RateTable, WorkbookData};
use crate::domain::ports::WorkbookSource;
use crate::utils::currency;
use crate::utils::error::{LcpError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::io::{Read, Seek};
use std::path::PathBuf;

/// Master workbook layout:
/// - 'Patient Info' sheet: labelled values in column E, rows 4-14.
/// - 'Master' sheet: headers in row 3, item rows from row 6. Column A is the
///   selection flag; B-K are category, item, subcategory, description,
///   code type, codes, cost, frequency, source, rationale.
/// - 'PFR' / 'APC' sheets: code in column A, price in column B, from row 2.
pub struct XlsxWorkbookSource {
    path: PathBuf,
}

const PATIENT_SHEET: &str = "Patient Info";
const MASTER_SHEET: &str = "Master";
const PFR_SHEET: &str = "PFR";
const APC_SHEET: &str = "APC";

// Guard against workbooks with stray formatting far below the data.
const MAX_ITEM_ROWS: u32 = 1000;

impl XlsxWorkbookSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl WorkbookSource for XlsxWorkbookSource {
    fn load(&self) -> Result<WorkbookData> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)?;

        let patient = parse_patient_info(&mut workbook)?;
        let items = parse_master_items(&mut workbook)?;
        let pfr = parse_rate_sheet(&mut workbook, PFR_SHEET)?;
        let apc = parse_rate_sheet(&mut workbook, APC_SHEET)?;

        Ok(WorkbookData {
            patient,
            items,
            pfr,
            apc,
        })
    }
}

fn has_sheet<R: Read + Seek>(workbook: &Xlsx<R>, name: &str) -> bool {
    workbook.sheet_names().iter().any(|s| s == name)
}

fn parse_patient_info<R: Read + Seek>(workbook: &mut Xlsx<R>) -> Result<PatientInfo> {
    if !has_sheet(workbook, PATIENT_SHEET) {
        return Err(LcpError::InvalidPatientInfo {
            message: format!("'{}' sheet not found in workbook", PATIENT_SHEET),
        });
    }
    let range = workbook.worksheet_range(PATIENT_SHEET)?;

    // Values live in column E; rows are fixed by the template.
    const COL_E: u32 = 4;
    let value = |row: u32| range.get_value((row - 1, COL_E));

    let patient_name = text(value(5)).unwrap_or_default();
    let life_expectancy = decimal(value(9)).unwrap_or(Decimal::ZERO);
    let geo_multiplier = decimal(value(11)).unwrap_or(Decimal::ONE);

    Ok(PatientInfo {
        patient_name,
        date_of_report: date(value(4)),
        date_of_birth: date(value(6)),
        date_of_injury: date(value(8)),
        age: decimal(value(7)),
        age_initiated: decimal(value(10)),
        life_expectancy,
        geo_multiplier,
        city_state: text(value(12)),
        zipcode: text(value(13)),
        referring_attorney: text(value(14)),
    })
}

fn parse_master_items<R: Read + Seek>(workbook: &mut Xlsx<R>) -> Result<Vec<CareItem>> {
    if !has_sheet(workbook, MASTER_SHEET) {
        return Err(LcpError::WorkbookLayoutError {
            message: format!("'{}' sheet not found in workbook", MASTER_SHEET),
        });
    }
    let range = workbook.worksheet_range(MASTER_SHEET)?;

    let mut items = Vec::new();
    let last_row = range.end().map(|(row, _)| row).unwrap_or(0);

    // Data starts at row 6 (0-based index 5); an empty category+item pair
    // marks the end of the table.
    for row in 5..=last_row.min(MAX_ITEM_ROWS) {
        let cell = |col: u32| range.get_value((row, col));

        let category = text(cell(1));
        let name = text(cell(2));
        if category.is_none() && name.is_none() {
            break;
        }

        if !is_checked(cell(0)) {
            continue;
        }

        items.push(CareItem {
            category: category.unwrap_or_default(),
            name: name.unwrap_or_default(),
            subcategory: text(cell(3)).unwrap_or_default(),
            description: text(cell(4)).unwrap_or_default(),
            code_type: CodeType::parse(&text(cell(5)).unwrap_or_default()),
            codes: parse_codes(&text(cell(6)).unwrap_or_default()),
            unit_cost: cost(cell(7)),
            frequency_text: text(cell(8)).unwrap_or_default(),
            source: text(cell(9)).unwrap_or_default(),
            rationale: text(cell(10)).unwrap_or_default(),
            selected: true,
        });
    }

    Ok(items)
}

fn parse_rate_sheet<R: Read + Seek>(workbook: &mut Xlsx<R>, sheet: &str) -> Result<RateTable> {
    // Pricing sheets are optional; items then rely on spreadsheet overrides.
    if !has_sheet(workbook, sheet) {
        tracing::debug!("No '{}' sheet in workbook, using empty rate table", sheet);
        return Ok(RateTable::new());
    }
    let range = workbook.worksheet_range(sheet)?;

    let mut table = RateTable::new();
    let last_row = range.end().map(|(row, _)| row).unwrap_or(0);

    for row in 1..=last_row {
        let code = text(range.get_value((row, 0)));
        let price = decimal(range.get_value((row, 1)));

        if let (Some(code), Some(price)) = (code, price) {
            table.insert(code, price);
        }
    }

    Ok(table)
}

fn is_checked(cell: Option<&Data>) -> bool {
    match cell {
        Some(Data::Bool(b)) => *b,
        Some(Data::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Cell content as trimmed text. Numeric codes come back from Excel as
/// floats; integral ones are rendered without the trailing ".0".
fn text(cell: Option<&Data>) -> Option<String> {
    let rendered = match cell? {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) => s.trim().to_string(),
        _ => return None,
    };
    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

fn decimal(cell: Option<&Data>) -> Option<Decimal> {
    match cell? {
        Data::Float(f) => Decimal::from_f64(*f),
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::String(s) => currency::parse_cost_string(s),
        _ => None,
    }
}

/// Cost cells may be numbers, currency strings or semicolon-separated
/// lists of amounts; anything else means "look the cost up by code".
fn cost(cell: Option<&Data>) -> Option<Decimal> {
    decimal(cell)
}

fn date(cell: Option<&Data>) -> Option<NaiveDate> {
    match cell? {
        Data::DateTime(dt) => dt.as_datetime().map(|ndt| ndt.date()),
        Data::String(s) => {
            let trimmed = s.trim();
            NaiveDate::parse_from_str(trimmed, "%m/%d/%Y")
                .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
                .ok()
        }
        Data::DateTimeIso(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    }
}

fn parse_codes(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .collect()
}

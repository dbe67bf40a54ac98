use crate::domain::model::{CareItem, CodeType, RateTable};
use crate::utils::error::{LcpError, Result};
use rust_decimal::Decimal;

/// Resolve an item's unit cost. Ordered strategy, first hit wins:
/// 1. spreadsheet override (used verbatim)
/// 2. first of the item's codes found in the table its code type selects
///    (facility fees are scaled by the geographic multiplier)
/// 3. fail with `UnresolvedCost`
pub fn resolve_unit_cost(
    item: &CareItem,
    pfr: &RateTable,
    apc: &RateTable,
    geo_multiplier: Decimal,
) -> Result<Decimal> {
    if let Some(cost) = item.unit_cost {
        return Ok(cost);
    }

    // Which table applies, and what scaling. DRG and untyped items have no
    // lookup table; without an override they cannot be priced.
    let lookup = match item.code_type {
        CodeType::Pfr => Some((pfr, Decimal::ONE)),
        CodeType::Apc => Some((apc, geo_multiplier)),
        CodeType::Drg | CodeType::None => None,
    };

    if let Some((table, multiplier)) = lookup {
        for code in &item.codes {
            if let Some(price) = table.get(code) {
                return Ok(price * multiplier);
            }
        }
    }

    Err(LcpError::UnresolvedCost {
        item: item.name.clone(),
        codes: item.codes.join("; "),
    })
}

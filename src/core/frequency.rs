use crate::config::FrequencyConfig;
use crate::domain::model::FrequencyRate;
use crate::utils::error::{LcpError, Result};
use regex::Regex;
use rust_decimal::Decimal;

/// Turns free-text frequency cells ("2x/year", "every 5-10 years",
/// "24 visits every 5 years") into a canonical annualized rate.
///
/// Pattern priority, first match wins:
/// 1. one-time phrases
/// 2. `<N>x/year`, `<N> times per year`
/// 3. `<V> visits every <N> years` (before the bare `every` pattern, which
///    would otherwise swallow the `every <N> years` suffix)
/// 4. `every <N> years`, `every <N>-<M> years` (range uses the midpoint)
/// 5. cadence words from the config ("monthly", "quarterly", ...)
pub struct FrequencyNormalizer {
    config: FrequencyConfig,
    times_per_year: Regex,
    visits_every: Regex,
    every_years: Regex,
}

impl FrequencyNormalizer {
    pub fn new(config: FrequencyConfig) -> Self {
        Self {
            config,
            times_per_year: Regex::new(r"(\d+)\s*(?:times?|x)\s*(?:per|a|/)\s*year").unwrap(),
            visits_every: Regex::new(r"(\d+)\s*visits?\s*(?:every\s*)?(\d+)?\s*years?").unwrap(),
            every_years: Regex::new(r"every\s*(\d+)\s*(?:-\s*(\d+))?\s*years?").unwrap(),
        }
    }

    /// Pure and deterministic: the same text always yields the same rate.
    pub fn normalize(&self, text: &str) -> Result<FrequencyRate> {
        let lowered = text.trim().to_lowercase();

        if lowered.contains("one time") || lowered.contains("one-time") || lowered == "once" {
            return Ok(FrequencyRate::OneTime);
        }

        if let Some(caps) = self.times_per_year.captures(&lowered) {
            let times = parse_count(&lowered, &caps[1])?;
            return recurring(&lowered, Decimal::from(times));
        }

        if let Some(caps) = self.visits_every.captures(&lowered) {
            let visits = parse_count(&lowered, &caps[1])?;
            let years = match caps.get(2) {
                Some(m) => parse_count(&lowered, m.as_str())?,
                None => 1,
            };
            if years == 0 {
                return Err(invalid(&lowered, "interval of zero years"));
            }
            return recurring(&lowered, Decimal::from(visits) / Decimal::from(years));
        }

        if let Some(caps) = self.every_years.captures(&lowered) {
            let low = parse_count(&lowered, &caps[1])?;
            if low == 0 {
                return Err(invalid(&lowered, "interval of zero years"));
            }
            let per_year = match caps.get(2) {
                Some(m) => {
                    let high = parse_count(&lowered, m.as_str())?;
                    if high < low {
                        return Err(invalid(&lowered, "range upper bound below lower bound"));
                    }
                    // midpoint of the range: 1 / ((low + high) / 2)
                    Decimal::TWO / Decimal::from(low + high)
                }
                None => Decimal::ONE / Decimal::from(low),
            };
            return recurring(&lowered, per_year);
        }

        if let Some(per_year) = self.config.match_cadence(&lowered) {
            return recurring(&lowered, per_year);
        }

        Err(LcpError::UnparseableFrequency {
            text: text.to_string(),
        })
    }
}

fn parse_count(text: &str, digits: &str) -> Result<u32> {
    digits
        .parse::<u32>()
        .map_err(|_| invalid(text, "count out of range"))
}

fn recurring(text: &str, per_year: Decimal) -> Result<FrequencyRate> {
    if per_year <= Decimal::ZERO {
        return Err(invalid(text, "occurrences per year must be positive"));
    }
    Ok(FrequencyRate::Recurring { per_year })
}

fn invalid(text: &str, reason: &str) -> LcpError {
    LcpError::InvalidFrequencyValue {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a cost cell into a decimal amount.
///
/// Accepts plain numbers ("307"), currency-formatted strings ("$1,234.56")
/// and semicolon-separated lists ("1671; 853") which are summed. Returns
/// `None` for blank or unparseable input so the caller can fall through to
/// the code-based rate lookup.
pub fn parse_cost_string(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains(';') {
        let mut total = Decimal::ZERO;
        let mut any = false;
        for part in trimmed.split(';') {
            if let Some(value) = parse_single(part) {
                total += value;
                any = true;
            }
        }
        return if any { Some(total) } else { None };
    }

    parse_single(trimmed)
}

fn parse_single(part: &str) -> Option<Decimal> {
    let cleaned: String = part
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Format an amount as a currency string, e.g. `$1,234.56`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative();
    let text = format!("{:.2}", rounded.abs());

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), "00"),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    if negative {
        format!("-${}.{}", grouped, frac_part)
    } else {
        format!("${}.{}", grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_cost_string("307"), Some(dec!(307)));
        assert_eq!(parse_cost_string(" 19.95 "), Some(dec!(19.95)));
    }

    #[test]
    fn test_parse_currency_formatted() {
        assert_eq!(parse_cost_string("$1,234.56"), Some(dec!(1234.56)));
    }

    #[test]
    fn test_parse_semicolon_list_sums() {
        assert_eq!(parse_cost_string("1671; 853"), Some(dec!(2524)));
        assert_eq!(parse_cost_string("$100; $25.50"), Some(dec!(125.50)));
    }

    #[test]
    fn test_parse_blank_and_garbage() {
        assert_eq!(parse_cost_string(""), None);
        assert_eq!(parse_cost_string("   "), None);
        assert_eq!(parse_cost_string("see rationale"), None);
        assert_eq!(parse_cost_string("; ;"), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(-42)), "-$42.00");
    }
}

//! Currency and date formatting for receipt output
//!
//! Amounts print as `symbol + fixed(2)` with half-up rounding. Date and
//! time follow the configured language: English receipts use 12-hour
//! clocks, Greek receipts 24-hour. That split is long-standing register
//! convention, not something to normalize.

use chrono_tz::Tz;
use rust_decimal::prelude::*;

use crate::config::Language;

/// Resolve an ISO currency code to its symbol
///
/// Unknown codes (or strings that are already symbols) pass through.
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        "JPY" => "¥",
        "CHF" => "CHF ",
        "SEK" => "kr ",
        "BGN" => "лв ",
        "RON" => "lei ",
        other => other,
    }
}

/// Format an amount as `symbol + fixed(2)`, e.g. `€12.50`
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.2}", currency_symbol(currency), rounded)
}

/// Format a signed amount, keeping an explicit `-` ahead of the symbol
pub fn format_signed(amount: Decimal, currency: &str) -> String {
    if amount.is_sign_negative() {
        format!("-{}", format_amount(-amount, currency))
    } else {
        format_amount(amount, currency)
    }
}

/// Format a unix-millis timestamp per language convention
pub fn format_datetime(millis: i64, lang: Language, tz: Tz) -> String {
    let Some(dt) = chrono::DateTime::from_timestamp_millis(millis) else {
        return "--".to_string();
    };
    let local = dt.with_timezone(&tz);
    match lang {
        Language::En => local.format("%m/%d/%Y %I:%M %p").to_string(),
        Language::El => local.format("%d/%m/%Y %H:%M").to_string(),
    }
}

/// Time-only variant for compact columns
pub fn format_time(millis: i64, lang: Language, tz: Tz) -> String {
    let Some(dt) = chrono::DateTime::from_timestamp_millis(millis) else {
        return "--".to_string();
    };
    let local = dt.with_timezone(&tz);
    match lang {
        Language::En => local.format("%I:%M %p").to_string(),
        Language::El => local.format("%H:%M").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_symbol_resolution() {
        assert_eq!(currency_symbol("EUR"), "€");
        assert_eq!(currency_symbol("USD"), "$");
        // Passthrough for literal symbols and unknown codes
        assert_eq!(currency_symbol("€"), "€");
        assert_eq!(currency_symbol("XXX"), "XXX");
    }

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(format_amount(dec("12.5"), "EUR"), "€12.50");
        assert_eq!(format_amount(dec("0"), "EUR"), "€0.00");
        assert_eq!(format_amount(dec("3.999"), "USD"), "$4.00");
    }

    #[test]
    fn test_format_amount_half_up() {
        assert_eq!(format_amount(dec("1.005"), "EUR"), "€1.01");
        assert_eq!(format_amount(dec("1.004"), "EUR"), "€1.00");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(dec("-2.5"), "EUR"), "-€2.50");
        assert_eq!(format_signed(dec("2.5"), "EUR"), "€2.50");
    }

    #[test]
    fn test_datetime_language_convention() {
        // 2024-01-22 14:32:15 UTC
        let millis = 1705933935000;
        let en = format_datetime(millis, Language::En, chrono_tz::UTC);
        let el = format_datetime(millis, Language::El, chrono_tz::UTC);
        assert_eq!(en, "01/22/2024 02:32 PM");
        assert_eq!(el, "22/01/2024 14:32");
    }

    #[test]
    fn test_invalid_timestamp() {
        assert_eq!(format_datetime(i64::MAX, Language::En, chrono_tz::UTC), "--");
    }
}

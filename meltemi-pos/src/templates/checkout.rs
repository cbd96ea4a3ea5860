//! Shift checkout slip
//!
//! One uniform reconciliation convention for every role: expected cash
//! is starting float plus cash sales minus payouts, and the slip shows
//! the signed difference against the counted drawer.

use meltemi_printer::{Align, LineStyle, StyledLine};

use crate::config::ReceiptConfig;
use crate::i18n::t;
use crate::money::{format_amount, format_datetime, format_signed};
use crate::types::{ShiftRole, ShiftSummary};

use super::{divider, kv, section_header, total_row};

pub fn lines(data: &ShiftSummary, config: &ReceiptConfig) -> Vec<StyledLine> {
    let lang = config.language;
    let cur = &config.currency;
    let tz = config.tz();
    let mut out = Vec::new();

    out.push(StyledLine::new(t("checkout.title", lang), LineStyle::Header).with_align(Align::Center));
    let role_key = match data.role {
        ShiftRole::Driver => "checkout.role.driver",
        ShiftRole::Cashier => "checkout.role.cashier",
        ShiftRole::Waiter => "checkout.role.waiter",
    };
    out.push(
        StyledLine::new(format!("{} - {}", t(role_key, lang), data.staff_name), LineStyle::Bold)
            .with_align(Align::Center),
    );
    out.push(StyledLine::blank());

    out.push(kv(
        &t("checkout.opened", lang),
        &format_datetime(data.opened_at, lang, tz),
        LineStyle::Small,
    ));
    out.push(kv(
        &t("checkout.closed", lang),
        &format_datetime(data.closed_at, lang, tz),
        LineStyle::Small,
    ));
    out.push(kv(
        &t("checkout.orders", lang),
        &data.orders_count.to_string(),
        LineStyle::Normal,
    ));

    out.push(divider(config));
    out.push(kv(
        &t("checkout.starting_float", lang),
        &format_amount(data.starting_float, cur),
        LineStyle::Normal,
    ));
    out.push(kv(
        &t("checkout.cash_sales", lang),
        &format_amount(data.cash_sales, cur),
        LineStyle::Normal,
    ));
    out.push(kv(
        &t("checkout.card_sales", lang),
        &format_amount(data.card_sales, cur),
        LineStyle::Normal,
    ));
    if !data.payouts.is_zero() {
        out.push(kv(
            &t("checkout.payouts", lang),
            &format!("-{}", format_amount(data.payouts, cur)),
            LineStyle::Normal,
        ));
    }

    total_row(
        &t("checkout.expected_cash", lang),
        &format_amount(data.expected_cash(), cur),
        config,
        &mut out,
    );

    if data.counted_cash.is_some() {
        out.push(kv(
            &t("checkout.counted_cash", lang),
            &format_amount(data.counted_cash.unwrap_or_default(), cur),
            LineStyle::Normal,
        ));
        if let Some(due) = data.cash_due() {
            out.push(kv(
                &t("checkout.cash_due", lang),
                &format_amount(due, cur),
                LineStyle::Normal,
            ));
        }
        if let Some(diff) = data.difference() {
            out.push(kv(
                &t("checkout.difference", lang),
                &format_signed(diff, cur),
                LineStyle::Bold,
            ));
        }
    }

    out.push(StyledLine::blank());
    section_header(&t("checkout.signature", lang), config, &mut out);
    out.push(StyledLine::blank());
    out.push(StyledLine::blank());
    out.push(divider(config));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample() -> ShiftSummary {
        ShiftSummary {
            role: ShiftRole::Cashier,
            staff_name: "Nikos".to_string(),
            opened_at: 1705905000000,
            closed_at: 1705933935000,
            orders_count: 41,
            starting_float: dec("100.00"),
            cash_sales: dec("380.50"),
            card_sales: dec("512.00"),
            payouts: dec("20.00"),
            counted_cash: Some(dec("458.00")),
        }
    }

    #[test]
    fn test_expected_cash_row() {
        let lines = lines(&sample(), &ReceiptConfig::default());
        let row = lines.iter().find(|l| l.text == "Expected cash").unwrap();
        assert_eq!(row.right_text.as_deref(), Some("€460.50"));
    }

    #[test]
    fn test_difference_is_signed() {
        let lines = lines(&sample(), &ReceiptConfig::default());
        let row = lines.iter().find(|l| l.text == "Difference").unwrap();
        assert_eq!(row.right_text.as_deref(), Some("-€2.50"));
    }

    #[test]
    fn test_uncounted_drawer_omits_reconciliation() {
        let mut data = sample();
        data.counted_cash = None;
        let lines = lines(&data, &ReceiptConfig::default());
        assert!(lines.iter().all(|l| l.text != "Counted cash"));
        assert!(lines.iter().all(|l| l.text != "Difference"));
    }
}

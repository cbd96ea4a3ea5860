//! Driver assignment slip

use meltemi_printer::{Align, LineStyle, StyledLine};

use crate::config::ReceiptConfig;
use crate::i18n::{t, t_with};
use crate::money::{format_amount, format_time};
use crate::types::AssignOrderData;

use super::{divider, kv, total_row};

pub fn lines(data: &AssignOrderData, config: &ReceiptConfig) -> Vec<StyledLine> {
    let lang = config.language;
    let mut out = Vec::new();

    out.push(StyledLine::new(t("assign.title", lang), LineStyle::Header).with_align(Align::Center));
    out.push(
        StyledLine::new(
            t_with("receipt.order", lang, &[("number", &data.order_number)]),
            LineStyle::Bold,
        )
        .with_right(format_time(data.created_at, lang, config.tz())),
    );
    out.push(divider(config));

    out.push(kv(&t("assign.driver", lang), &data.driver_name, LineStyle::DoubleHeight));
    if let Some(address) = &data.address {
        out.push(StyledLine::new(format!("{}:", t("assign.address", lang)), LineStyle::Small));
        out.push(StyledLine::new(address, LineStyle::Bold));
    }
    if let Some(phone) = &data.phone {
        out.push(kv(&t("assign.phone", lang), phone, LineStyle::Normal));
    }

    if let Some(due) = data.amount_due {
        out.push(StyledLine::blank());
        total_row(
            &t("assign.amount_due", lang),
            &format_amount(due, &config.currency),
            config,
            &mut out,
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample() -> AssignOrderData {
        AssignOrderData {
            order_number: "D-101".to_string(),
            created_at: 1705933935000,
            driver_name: "Kostas".to_string(),
            address: Some("Ermou 12, Athens".to_string()),
            phone: Some("6912345678".to_string()),
            amount_due: Some(Decimal::from_str("18.40").unwrap()),
        }
    }

    #[test]
    fn test_driver_and_amount() {
        let lines = lines(&sample(), &ReceiptConfig::default());
        let driver = lines.iter().find(|l| l.text == "Driver").unwrap();
        assert_eq!(driver.right_text.as_deref(), Some("Kostas"));
        let due = lines.iter().find(|l| l.text == "Amount due").unwrap();
        assert_eq!(due.right_text.as_deref(), Some("€18.40"));
    }

    #[test]
    fn test_prepaid_order_has_no_amount_row() {
        let mut data = sample();
        data.amount_due = None;
        let lines = lines(&data, &ReceiptConfig::default());
        assert!(lines.iter().all(|l| l.text != "Amount due"));
    }
}

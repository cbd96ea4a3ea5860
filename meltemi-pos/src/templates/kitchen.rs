//! Kitchen ticket
//!
//! Optimized for legibility at arm's length: big header, double-height
//! item rows, item notes in bold. Prices never appear here.

use std::collections::BTreeMap;

use meltemi_printer::{Align, LineStyle, StyledLine};

use crate::config::ReceiptConfig;
use crate::i18n::{t, t_with};
use crate::money::format_time;
use crate::types::{KitchenItem, KitchenTicketData};

use super::{divider, section_header};

pub fn lines(data: &KitchenTicketData, config: &ReceiptConfig) -> Vec<StyledLine> {
    let lang = config.language;
    let mut out = Vec::new();

    if data.print_count > 0 {
        out.push(
            StyledLine::new(
                t_with("kitchen.reprint", lang, &[("count", &data.print_count.to_string())]),
                LineStyle::Bold,
            )
            .with_align(Align::Center)
            .inverted(),
        );
        out.push(StyledLine::blank());
    }

    let headline = data
        .table_name
        .clone()
        .unwrap_or_else(|| t("kitchen.takeaway", lang));
    out.push(StyledLine::new(headline, LineStyle::Title).with_align(Align::Center));
    out.push(
        StyledLine::new(
            t_with("receipt.order", lang, &[("number", &data.order_number)]),
            LineStyle::Normal,
        )
        .with_right(format_time(data.created_at, lang, config.tz())),
    );
    out.push(divider(config));

    // Stable grouping: BTreeMap orders categories alphabetically so a
    // reprint lays out identically to the first print.
    let mut by_category: BTreeMap<&str, Vec<&KitchenItem>> = BTreeMap::new();
    for item in &data.items {
        by_category
            .entry(item.category.as_str())
            .or_default()
            .push(item);
    }

    for (category, items) in by_category {
        if !category.is_empty() {
            section_header(category, config, &mut out);
        }
        for item in items {
            out.push(StyledLine::new(
                format!("{}x {}", item.quantity, item.name),
                LineStyle::DoubleHeight,
            ));
            for option in &item.options {
                out.push(StyledLine::new(format!("  - {option}"), LineStyle::Normal));
            }
            if let Some(note) = &item.note {
                out.push(StyledLine::new(
                    format!("  {}: {}", t("kitchen.note", lang), note),
                    LineStyle::Bold,
                ));
            }
        }
        out.push(StyledLine::blank());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str) -> KitchenItem {
        KitchenItem {
            name: name.to_string(),
            quantity: 1,
            category: category.to_string(),
            options: Vec::new(),
            note: None,
        }
    }

    fn sample() -> KitchenTicketData {
        KitchenTicketData {
            order_number: "A-042".to_string(),
            created_at: 1705933935000,
            table_name: Some("12".to_string()),
            items: vec![
                item("Souvlaki", "Grill"),
                item("Greek salad", "Cold"),
                item("Pita", "Grill"),
            ],
            print_count: 0,
        }
    }

    #[test]
    fn test_table_name_is_headline() {
        let lines = lines(&sample(), &ReceiptConfig::default());
        assert_eq!(lines[0].text, "12");
        assert_eq!(lines[0].style, LineStyle::Title);
    }

    #[test]
    fn test_items_grouped_by_category() {
        let lines = lines(&sample(), &ReceiptConfig::default());
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        let cold = texts.iter().position(|t| *t == "Cold").unwrap();
        let grill = texts.iter().position(|t| *t == "Grill").unwrap();
        assert!(cold < grill);
        let pita = texts.iter().position(|t| *t == "1x Pita").unwrap();
        assert!(pita > grill);
    }

    #[test]
    fn test_reprint_banner() {
        let mut data = sample();
        data.print_count = 2;
        let lines = lines(&data, &ReceiptConfig::default());
        assert_eq!(lines[0].text, "*** REPRINT #2 ***");
        assert!(lines[0].inverted);
    }

    #[test]
    fn test_no_prices_on_ticket() {
        let lines = lines(&sample(), &ReceiptConfig::default());
        assert!(lines.iter().all(|l| !l.text.contains('€')));
    }
}

//! Customer receipt

use meltemi_printer::{Align, LineStyle, StyledLine};

use crate::config::ReceiptConfig;
use crate::i18n::{t, t_with};
use crate::money::{format_amount, format_datetime};
use crate::types::{OrderType, ReceiptData};

use super::{divider, kv, section_header, total_row};

/// Translated copy banner for multi-copy receipts.
///
/// Copy 0 is the customer's, every later copy is the merchant's. A
/// single-copy job gets no banner at all.
pub fn copy_label(copy_index: u32, copies: u32, config: &ReceiptConfig) -> Option<String> {
    if copies < 2 {
        return None;
    }
    let key = if copy_index == 0 {
        "receipt.customer_copy"
    } else {
        "receipt.merchant_copy"
    };
    Some(t(key, config.language))
}

pub fn lines(data: &ReceiptData, config: &ReceiptConfig, copy_label: Option<&str>) -> Vec<StyledLine> {
    let lang = config.language;
    let cur = &config.currency;
    let mut out = Vec::new();

    out.push(StyledLine::new(&config.store_name, LineStyle::Title).with_align(Align::Center));
    for line in &config.header_lines {
        out.push(StyledLine::new(line, LineStyle::Small).with_align(Align::Center));
    }
    out.push(StyledLine::blank());

    out.push(
        StyledLine::new(
            t_with("receipt.order", lang, &[("number", &data.order_number)]),
            LineStyle::Header,
        )
        .with_align(Align::Center),
    );
    out.push(
        StyledLine::new(format_datetime(data.created_at, lang, config.tz()), LineStyle::Normal)
            .with_align(Align::Center),
    );

    let type_key = match data.order_type {
        OrderType::DineIn => "receipt.order_type.dine_in",
        OrderType::Takeaway => "receipt.order_type.takeaway",
        OrderType::Delivery => "receipt.order_type.delivery",
    };
    let mut context = t(type_key, lang);
    if let Some(table) = &data.table_name {
        context = format!("{} - {} {}", context, t("receipt.table", lang), table);
    }
    out.push(StyledLine::new(context, LineStyle::Normal).with_align(Align::Center));

    if data.order_type == OrderType::Delivery {
        if let Some(customer) = &data.customer {
            out.push(StyledLine::blank());
            if let Some(name) = &customer.name {
                out.push(StyledLine::new(name, LineStyle::Bold));
            }
            if let Some(address) = &customer.address {
                out.push(StyledLine::new(address, LineStyle::Normal));
            }
            if let Some(phone) = &customer.phone {
                out.push(StyledLine::new(phone, LineStyle::Normal));
            }
        }
    }

    out.push(StyledLine::blank());
    section_header(&t("receipt.items", lang), config, &mut out);

    for item in &data.items {
        out.push(
            StyledLine::new(format!("{}x {}", item.quantity, item.name), LineStyle::Normal)
                .with_right(format_amount(item.total, cur)),
        );
        for option in &item.options {
            out.push(StyledLine::new(format!("  - {option}"), LineStyle::Small));
        }
        if let Some(note) = &item.note {
            out.push(StyledLine::new(format!("  * {note}"), LineStyle::Small));
        }
    }

    out.push(divider(config));
    out.push(kv(
        &t("receipt.subtotal", lang),
        &format_amount(data.subtotal, cur),
        LineStyle::Normal,
    ));
    if let Some(discount) = data.discount {
        out.push(kv(
            &t("receipt.discount", lang),
            &format!("-{}", format_amount(discount, cur)),
            LineStyle::Normal,
        ));
    }
    if let Some(fee) = data.delivery_fee {
        out.push(kv(
            &t("receipt.delivery_fee", lang),
            &format_amount(fee, cur),
            LineStyle::Normal,
        ));
    }
    total_row(
        &t("receipt.total", lang),
        &format_amount(data.total, cur),
        config,
        &mut out,
    );

    if !data.payments.is_empty() {
        out.push(StyledLine::blank());
        for payment in &data.payments {
            out.push(kv(
                &format!("{} ({})", t("receipt.payment", lang), payment.method),
                &format_amount(payment.amount, cur),
                LineStyle::Small,
            ));
        }
        if let Some(change) = data.change {
            out.push(kv(
                &t("receipt.change", lang),
                &format_amount(change, cur),
                LineStyle::Small,
            ));
        }
    }

    out.push(StyledLine::blank());
    for line in &config.footer_lines {
        out.push(StyledLine::new(line, LineStyle::Small).with_align(Align::Center));
    }
    out.push(StyledLine::new(t("receipt.thank_you", lang), LineStyle::Normal).with_align(Align::Center));

    if let Some(label) = copy_label {
        out.push(StyledLine::blank());
        out.push(StyledLine::new(label, LineStyle::Bold).with_align(Align::Center));
    }

    out
}

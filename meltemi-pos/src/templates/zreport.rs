//! End-of-day Z report

use meltemi_printer::{Align, LineStyle, StyledLine};

use crate::config::ReceiptConfig;
use crate::i18n::t;
use crate::money::{format_amount, format_datetime};
use crate::types::ZReportSnapshot;

use super::{divider, kv, section_header, total_row};

pub fn lines(data: &ZReportSnapshot, config: &ReceiptConfig) -> Vec<StyledLine> {
    let lang = config.language;
    let cur = &config.currency;
    let mut out = Vec::new();

    out.push(StyledLine::new(t("zreport.title", lang), LineStyle::Header).with_align(Align::Center));
    out.push(StyledLine::new(&config.store_name, LineStyle::Normal).with_align(Align::Center));
    out.push(
        StyledLine::new(format_datetime(data.date, lang, config.tz()), LineStyle::Small)
            .with_align(Align::Center),
    );
    out.push(StyledLine::blank());

    out.push(kv(
        &t("zreport.orders", lang),
        &data.orders_count.to_string(),
        LineStyle::Normal,
    ));
    if data.cancelled_count > 0 {
        out.push(kv(
            &t("zreport.cancelled", lang),
            &data.cancelled_count.to_string(),
            LineStyle::Normal,
        ));
    }
    total_row(
        &t("zreport.gross_sales", lang),
        &format_amount(data.gross_sales, cur),
        config,
        &mut out,
    );

    if !data.by_method.is_empty() {
        out.push(StyledLine::blank());
        section_header(&t("zreport.by_method", lang), config, &mut out);
        for row in &data.by_method {
            out.push(kv(&row.method, &format_amount(row.amount, cur), LineStyle::Normal));
        }
    }

    if !data.by_category.is_empty() {
        out.push(StyledLine::blank());
        section_header(&t("zreport.by_category", lang), config, &mut out);
        for row in &data.by_category {
            out.push(kv(&row.category, &format_amount(row.amount, cur), LineStyle::Normal));
        }
    }

    out.push(divider(config));
    out
}

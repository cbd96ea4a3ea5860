//! Document templates
//!
//! Each generator is a pure function from a typed payload and a
//! [`ReceiptConfig`] to an ordered list of styled lines. No side
//! effects, no clock reads: timestamps come from the payload, so the
//! same input always produces the same lines.
//!
//! The `classic` variant separates sections with horizontal rules; the
//! `modern` variant uses inverted "pill" box headers. Which one is
//! picked is configuration, never computed here.

mod assign;
mod checkout;
mod kitchen;
mod receipt;
mod zreport;

use meltemi_printer::{Align, LineStyle, StyledLine};

use crate::config::{ReceiptConfig, TemplateVariant};
use crate::types::Document;

pub use receipt::copy_label;

/// Generate the styled lines for any document
pub fn document_lines(
    doc: &Document,
    config: &ReceiptConfig,
    copy_label: Option<&str>,
) -> Vec<StyledLine> {
    match doc {
        Document::Receipt(data) => receipt::lines(data, config, copy_label),
        Document::KitchenTicket(data) => kitchen::lines(data, config),
        Document::ShiftCheckout(data) => checkout::lines(data, config),
        Document::ZReport(data) => zreport::lines(data, config),
        Document::AssignOrder(data) => assign::lines(data, config),
    }
}

/// A full-width horizontal rule
pub(crate) fn divider(config: &ReceiptConfig) -> StyledLine {
    StyledLine::new("-".repeat(config.profile().char_width), LineStyle::Small)
}

/// Section title: pill in `modern`, rule + centered bold in `classic`
pub(crate) fn section_header(title: &str, config: &ReceiptConfig, out: &mut Vec<StyledLine>) {
    match config.variant {
        TemplateVariant::Modern => {
            out.push(
                StyledLine::new(title, LineStyle::BoxHeader)
                    .with_align(Align::Center)
                    .inverted(),
            );
        }
        TemplateVariant::Classic => {
            out.push(divider(config));
            out.push(StyledLine::new(title, LineStyle::Bold).with_align(Align::Center));
        }
    }
}

/// Emphasized total row: inverted pill in `modern`, title-size in `classic`
pub(crate) fn total_row(
    label: &str,
    value: &str,
    config: &ReceiptConfig,
    out: &mut Vec<StyledLine>,
) {
    let style = match config.variant {
        TemplateVariant::Modern => LineStyle::BoxHeader,
        TemplateVariant::Classic => LineStyle::Title,
    };
    let mut line = StyledLine::new(label, style).with_right(value);
    if config.variant == TemplateVariant::Modern {
        line = line.inverted();
    }
    out.push(line);
}

/// Plain label/value row
pub(crate) fn kv(label: &str, value: &str, style: LineStyle) -> StyledLine {
    StyledLine::new(label, style).with_right(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReceiptConfig;

    #[test]
    fn test_divider_matches_paper_width() {
        let mut config = ReceiptConfig::default();
        config.paper_mm = 58;
        assert_eq!(divider(&config).text.len(), 32);
        config.paper_mm = 80;
        assert_eq!(divider(&config).text.len(), 48);
    }

    #[test]
    fn test_section_header_variants() {
        let mut config = ReceiptConfig::default();

        let mut classic = Vec::new();
        config.variant = TemplateVariant::Classic;
        section_header("ITEMS", &config, &mut classic);
        assert_eq!(classic.len(), 2);
        assert!(!classic[1].inverted);

        let mut modern = Vec::new();
        config.variant = TemplateVariant::Modern;
        section_header("ITEMS", &config, &mut modern);
        assert_eq!(modern.len(), 1);
        assert!(modern[0].inverted);
        assert_eq!(modern[0].style, LineStyle::BoxHeader);
    }
}

//! Payload composition
//!
//! Turns a typed document into a complete ESC/POS byte stream: template
//! lines in the middle, init/code-page at the front, feed, optional
//! drawer pulse and cut at the back.
//!
//! Two body paths exist. The text path encodes lines as windows-1253
//! code-page text and relies on printer firmware for Greek glyphs. The
//! bitmap path rasterizes the same lines in-process with a system font
//! and ships only raster commands, so it works on printers with no
//! Greek code page at all. A bitmap render failure falls back to the
//! text path rather than losing the document.

use meltemi_printer::{
    Align, CODE_PAGE_CP1253, CutMode, DocBuilder, LineStyle, RasterImage, StyledLine,
    TextRasterizer, batch_lines,
};
use tracing::{instrument, warn};

use crate::config::{ReceiptConfig, RenderMode};
use crate::templates::{self, copy_label};
use crate::types::Document;

/// Blank lines fed past the print head before the cut
const FEED_BEFORE_CUT: u8 = 4;

pub struct Composer {
    config: ReceiptConfig,
    rasterizer: Option<Box<dyn TextRasterizer + Send + Sync>>,
    /// Pre-rasterized store logo, printed above sale receipts
    logo: Option<RasterImage>,
}

impl Composer {
    /// Text-only composer; `RenderMode::Bitmap` falls back to text
    pub fn new(config: ReceiptConfig) -> Self {
        Self {
            config,
            rasterizer: None,
            logo: None,
        }
    }

    pub fn with_rasterizer(
        config: ReceiptConfig,
        rasterizer: Box<dyn TextRasterizer + Send + Sync>,
    ) -> Self {
        Self {
            config,
            rasterizer: Some(rasterizer),
            logo: None,
        }
    }

    /// Install a logo image, typically from [`crate::logo::LogoCache`]
    pub fn set_logo(&mut self, logo: Option<RasterImage>) {
        self.logo = logo;
    }

    pub fn config(&self) -> &ReceiptConfig {
        &self.config
    }

    /// Compose the full byte stream for one copy of a document.
    ///
    /// Pure over its inputs: composing the same document twice yields
    /// identical bytes.
    #[instrument(skip(self, doc))]
    pub fn compose(&self, doc: &Document, copy_label: Option<&str>) -> Vec<u8> {
        let lines = templates::document_lines(doc, &self.config, copy_label);
        let mut builder = DocBuilder::new(self.config.profile());

        if let (Some(logo), Document::Receipt(_)) = (&self.logo, doc) {
            builder.center();
            builder.raster(logo.clone());
        }

        let rendered_as_bitmap = match (&self.config.greek_render, &self.rasterizer) {
            (RenderMode::Bitmap, Some(rasterizer)) => {
                match self.append_raster_body(&mut builder, &lines, rasterizer.as_ref()) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(error = %e, "bitmap render failed, falling back to text");
                        false
                    }
                }
            }
            (RenderMode::Bitmap, None) => {
                warn!("bitmap mode configured but no rasterizer installed, using text");
                false
            }
            (RenderMode::Text, _) => false,
        };

        if !rendered_as_bitmap {
            self.append_text_body(&mut builder, &lines);
        }

        builder.left().reset_size().bold_off();
        builder.feed(FEED_BEFORE_CUT);
        if self.config.open_drawer && matches!(doc, Document::Receipt(_)) {
            builder.open_drawer();
        }
        // partial cut leaves the tear-tab receipts are torn off by
        builder.cut(CutMode::Partial);
        builder.build()
    }

    /// Compose every copy of a job, applying the copy banner policy.
    ///
    /// Returns one payload per copy. For single-copy jobs and documents
    /// without banners all payloads are byte-identical.
    pub fn compose_copies(&self, doc: &Document, copies: u32) -> Vec<Vec<u8>> {
        let copies = copies.max(1);
        (0..copies)
            .map(|i| {
                let label = match doc {
                    Document::Receipt(_) => copy_label(i, copies, &self.config),
                    _ => None,
                };
                self.compose(doc, label.as_deref())
            })
            .collect()
    }

    fn append_raster_body(
        &self,
        builder: &mut DocBuilder,
        lines: &[StyledLine],
        rasterizer: &(dyn TextRasterizer + Send + Sync),
    ) -> meltemi_printer::PrintResult<()> {
        let width_px = self.config.profile().pixel_width;
        // Render all batches before emitting anything, so a failure in
        // batch three never leaves half a document in the payload.
        let images = batch_lines(lines)
            .map(|batch| rasterizer.render(batch, width_px))
            .collect::<meltemi_printer::PrintResult<Vec<_>>>()?;
        builder.center();
        for image in images {
            builder.raster(image);
        }
        Ok(())
    }

    fn append_text_body(&self, builder: &mut DocBuilder, lines: &[StyledLine]) {
        builder.code_page(CODE_PAGE_CP1253);
        for line in lines {
            self.append_text_line(builder, line);
        }
    }

    fn append_text_line(&self, builder: &mut DocBuilder, line: &StyledLine) {
        // Inversion is a raster-only affordance; in text mode the pill
        // styles degrade to bold.
        let (double_width, double_height, bold) = match line.style {
            LineStyle::Small | LineStyle::Normal => (false, false, false),
            LineStyle::Bold => (false, false, true),
            LineStyle::Header | LineStyle::DoubleHeight => (false, true, false),
            LineStyle::Title | LineStyle::DoubleSize => (true, true, true),
            LineStyle::BoxHeader => (false, true, true),
        };

        match line.align {
            Align::Left => builder.left(),
            Align::Center => builder.center(),
            Align::Right => builder.right(),
        };
        if bold {
            builder.bold();
        }
        if double_width && double_height {
            builder.double_size();
        } else if double_height {
            builder.double_height();
        }

        match line.right_text.as_deref() {
            Some(right) => builder.line_lr(&line.text, right),
            None if line.text.is_empty() => builder.newline(),
            None => builder.line(&line.text),
        };

        if double_width || double_height {
            builder.reset_size();
        }
        if bold {
            builder.bold_off();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use crate::types::{OrderType, ReceiptData, ReceiptItem};
    use meltemi_printer::{PrintError, PrintResult, RasterImage};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const RASTER_MARKER: [u8; 4] = [0x1D, 0x76, 0x30, 0x00];

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn receipt() -> Document {
        Document::Receipt(ReceiptData {
            order_number: "A-042".to_string(),
            created_at: 1705933935000,
            order_type: OrderType::Takeaway,
            table_name: None,
            items: vec![ReceiptItem {
                name: "Moussaka".to_string(),
                quantity: 2,
                unit_price: dec("6.25"),
                total: dec("12.50"),
                options: Vec::new(),
                note: None,
            }],
            subtotal: dec("12.50"),
            discount: None,
            delivery_fee: None,
            total: dec("12.50"),
            payments: Vec::new(),
            change: None,
            customer: None,
        })
    }

    /// Rasterizer that always produces a fixed 8x8 image
    struct FixedRasterizer;

    impl TextRasterizer for FixedRasterizer {
        fn render(&self, _lines: &[StyledLine], _width_px: usize) -> PrintResult<RasterImage> {
            RasterImage::new(8, 8)
        }
    }

    struct FailingRasterizer;

    impl TextRasterizer for FailingRasterizer {
        fn render(&self, _lines: &[StyledLine], _width_px: usize) -> PrintResult<RasterImage> {
            Err(PrintError::Render("no fonts".to_string()))
        }
    }

    #[test]
    fn test_text_mode_has_no_raster_commands() {
        let composer = Composer::new(ReceiptConfig::default());
        let payload = composer.compose(&receipt(), None);
        assert_eq!(&payload[..2], &[0x1B, 0x40]);
        assert!(!contains(&payload, &RASTER_MARKER));
        // euro sign in cp1253
        assert!(contains(&payload, &[0x80, b'1', b'2', b'.', b'5', b'0']));
        assert_eq!(&payload[payload.len() - 4..], &[0x1D, 0x56, 0x42, 0x03]);
    }

    #[test]
    fn test_every_document_ends_with_partial_cut() {
        let composer = Composer::new(ReceiptConfig::default());
        let payload = composer.compose(&receipt(), None);
        assert_eq!(&payload[payload.len() - 4..], &[0x1D, 0x56, 0x42, 0x03]);

        let mut config = ReceiptConfig::default();
        config.greek_render = RenderMode::Bitmap;
        let composer = Composer::with_rasterizer(config, Box::new(FixedRasterizer));
        let payload = composer.compose(&receipt(), None);
        assert_eq!(&payload[payload.len() - 4..], &[0x1D, 0x56, 0x42, 0x03]);
    }

    #[test]
    fn test_bitmap_mode_rasterizes_greek() {
        let mut config = ReceiptConfig::default();
        config.language = Language::El;
        config.greek_render = RenderMode::Bitmap;
        let composer = Composer::with_rasterizer(config, Box::new(FixedRasterizer));
        let payload = composer.compose(&receipt(), None);
        assert!(contains(&payload, &RASTER_MARKER));
        // cp1253 sigma from a literal Greek total label must not appear
        assert!(!contains(&payload, &[0xD3, 0xD5, 0xCD]));
    }

    #[test]
    fn test_render_failure_falls_back_to_text() {
        let mut config = ReceiptConfig::default();
        config.greek_render = RenderMode::Bitmap;
        let composer = Composer::with_rasterizer(config, Box::new(FailingRasterizer));
        let payload = composer.compose(&receipt(), None);
        assert!(!contains(&payload, &RASTER_MARKER));
        assert!(contains(&payload, b"Moussaka"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = Composer::new(ReceiptConfig::default());
        assert_eq!(composer.compose(&receipt(), None), composer.compose(&receipt(), None));
    }

    #[test]
    fn test_drawer_pulse_only_when_configured() {
        let pulse = [0x1B, 0x70, 0x00];
        let mut config = ReceiptConfig::default();
        config.open_drawer = true;
        let composer = Composer::new(config);
        assert!(contains(&composer.compose(&receipt(), None), &pulse));

        let composer = Composer::new(ReceiptConfig::default());
        assert!(!contains(&composer.compose(&receipt(), None), &pulse));
    }

    #[test]
    fn test_logo_printed_above_receipt() {
        let mut composer = Composer::new(ReceiptConfig::default());
        composer.set_logo(Some(RasterImage::new(16, 4).unwrap()));
        let payload = composer.compose(&receipt(), None);
        let pos = payload
            .windows(RASTER_MARKER.len())
            .position(|w| w == RASTER_MARKER)
            .unwrap();
        // init (2) + align (3) precede the logo raster
        assert_eq!(pos, 5);
    }

    #[test]
    fn test_copy_banners() {
        let composer = Composer::new(ReceiptConfig::default());
        let copies = composer.compose_copies(&receipt(), 3);
        assert_eq!(copies.len(), 3);
        assert!(contains(&copies[0], b"CUSTOMER COPY"));
        assert!(contains(&copies[1], b"MERCHANT COPY"));
        assert_eq!(copies[1], copies[2]);

        let single = composer.compose_copies(&receipt(), 1);
        assert!(!contains(&single[0], b"COPY"));
    }
}

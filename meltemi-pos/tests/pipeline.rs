//! End-to-end pipeline tests: typed document in, ESC/POS bytes out the
//! transport, with a mock printer standing in for hardware.

use std::sync::Mutex;

use meltemi_pos::compose::Composer;
use meltemi_pos::config::{Language, PrinterSettings, ReceiptConfig, RenderMode};
use meltemi_pos::dispatch::{Dispatcher, PrintJob};
use meltemi_pos::types::{
    Document, KitchenItem, KitchenTicketData, OrderType, PaymentLine, ReceiptData, ReceiptItem,
};
use meltemi_printer::{PrintError, PrintResult, Printer, RasterImage, StyledLine, TextRasterizer};
use rust_decimal::Decimal;
use std::str::FromStr;

const RASTER_MARKER: [u8; 4] = [0x1D, 0x76, 0x30, 0x00];

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample_receipt() -> Document {
    Document::Receipt(ReceiptData {
        order_number: "A-042".to_string(),
        created_at: 1705933935000,
        order_type: OrderType::DineIn,
        table_name: Some("5".to_string()),
        items: vec![
            ReceiptItem {
                name: "Moussaka".to_string(),
                quantity: 2,
                unit_price: dec("6.25"),
                total: dec("12.50"),
                options: vec!["extra cheese".to_string()],
                note: None,
            },
            ReceiptItem {
                name: "Greek salad".to_string(),
                quantity: 1,
                unit_price: dec("7.80"),
                total: dec("7.80"),
                options: Vec::new(),
                note: Some("no onions".to_string()),
            },
        ],
        subtotal: dec("20.30"),
        discount: Some(dec("2.00")),
        delivery_fee: None,
        total: dec("18.30"),
        payments: vec![PaymentLine {
            method: "Cash".to_string(),
            amount: dec("20.00"),
        }],
        change: Some(dec("1.70")),
        customer: None,
    })
}

/// Records every payload sent to it
struct RecordingPrinter {
    sent: Mutex<Vec<Vec<u8>>>,
}

impl RecordingPrinter {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl Printer for RecordingPrinter {
    async fn print(&self, data: &[u8]) -> Result<(), PrintError> {
        self.sent.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    async fn is_online(&self) -> bool {
        true
    }
}

/// Produces a fixed-size image per batch, standing in for font shaping
struct StubRasterizer;

impl TextRasterizer for StubRasterizer {
    fn render(&self, lines: &[StyledLine], width_px: usize) -> PrintResult<RasterImage> {
        RasterImage::new(width_px, lines.len().max(1) * 8)
    }
}

#[test]
fn test_english_text_receipt_is_pure_text() {
    let composer = Composer::new(ReceiptConfig::default());
    let payload = composer.compose(&sample_receipt(), None);

    assert_eq!(&payload[..2], &[0x1B, 0x40]);
    assert!(!contains(&payload, &RASTER_MARKER));
    // euro amounts in windows-1253: 0x80 followed by ASCII digits
    assert!(contains(&payload, &[0x80, b'1', b'2', b'.', b'5', b'0']));
    assert!(contains(&payload, &[0x80, b'1', b'8', b'.', b'3', b'0']));
    assert!(contains(&payload, b"2x Moussaka"));
    // partial cut (tear-tab) terminates the job
    assert_eq!(&payload[payload.len() - 4..], &[0x1D, 0x56, 0x42, 0x03]);
}

#[test]
fn test_greek_bitmap_receipt_has_no_codepage_text() {
    let mut config = ReceiptConfig::default();
    config.language = Language::El;
    config.greek_render = RenderMode::Bitmap;
    let composer = Composer::with_rasterizer(config, Box::new(StubRasterizer));
    let payload = composer.compose(&sample_receipt(), None);

    assert!(contains(&payload, &RASTER_MARKER));
    // no cp1253 Greek bytes outside raster data: the total label
    // would start 0xD3 0xD5 0xCD in text mode
    assert!(!contains(&payload, &[0xD3, 0xD5, 0xCD]));
    // no code page select either, the body carries no text
    assert!(!contains(&payload, &[0x1B, 0x74]));
}

#[tokio::test]
async fn test_three_copies_three_identical_sends() {
    let composer = Composer::new(ReceiptConfig::default());
    let ticket = Document::KitchenTicket(KitchenTicketData {
        order_number: "A-042".to_string(),
        created_at: 1705933935000,
        table_name: Some("5".to_string()),
        items: vec![KitchenItem {
            name: "Souvlaki".to_string(),
            quantity: 3,
            category: "Grill".to_string(),
            options: Vec::new(),
            note: None,
        }],
        print_count: 0,
    });
    let payload = composer.compose(&ticket, None);

    let printer = RecordingPrinter::new();
    let job = PrintJob::new(payload.clone(), PrinterSettings::network("192.168.1.50", 9100))
        .with_copies(3);
    let report = Dispatcher::new().dispatch_with(&job, &printer).await;

    assert!(report.all_succeeded());
    let sent = printer.sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|p| *p == payload));
}

#[tokio::test]
async fn test_receipt_copies_carry_banners() {
    let composer = Composer::new(ReceiptConfig::default());
    let payloads = composer.compose_copies(&sample_receipt(), 2);

    let printer = RecordingPrinter::new();
    let dispatcher = Dispatcher::new();
    for payload in &payloads {
        let job = PrintJob::new(payload.clone(), PrinterSettings::network("192.168.1.50", 9100));
        assert!(dispatcher.dispatch_with(&job, &printer).await.all_succeeded());
    }

    let sent = printer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(contains(&sent[0], b"CUSTOMER COPY"));
    assert!(contains(&sent[1], b"MERCHANT COPY"));
}

#[test]
fn test_composition_is_idempotent_across_kinds() {
    let composer = Composer::new(ReceiptConfig::default());
    let doc = sample_receipt();
    assert_eq!(composer.compose(&doc, None), composer.compose(&doc, None));

    let mut config = ReceiptConfig::default();
    config.language = Language::El;
    config.greek_render = RenderMode::Bitmap;
    let composer = Composer::with_rasterizer(config, Box::new(StubRasterizer));
    assert_eq!(composer.compose(&doc, None), composer.compose(&doc, None));
}

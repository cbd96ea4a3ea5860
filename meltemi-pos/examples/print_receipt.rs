//! Compose a sample sale receipt and send it to a network printer.
//!
//! Usage: `cargo run --example print_receipt -- 192.168.1.50 [copies]`
//! With no address the composed payload size is reported instead.

use meltemi_pos::compose::Composer;
use meltemi_pos::config::{PrinterSettings, ReceiptConfig};
use meltemi_pos::dispatch::{Dispatcher, PrintJob};
use meltemi_pos::types::{Document, OrderType, PaymentLine, ReceiptData, ReceiptItem};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::info;

fn sample() -> Document {
    let dec = |s: &str| Decimal::from_str(s).unwrap();
    Document::Receipt(ReceiptData {
        order_number: "A-042".to_string(),
        created_at: chrono::Utc::now().timestamp_millis(),
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
                note: None,
            },
        ],
        subtotal: dec("20.30"),
        discount: None,
        delivery_fee: None,
        total: dec("20.30"),
        payments: vec![PaymentLine {
            method: "Cash".to_string(),
            amount: dec("20.30"),
        }],
        change: None,
        customer: None,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut config = ReceiptConfig::default();
    config.store_name = "MELTEMI TAVERNA".to_string();
    config.footer_lines = vec!["www.meltemi.example".to_string()];
    let composer = Composer::new(config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let copies: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
    let payloads = composer.compose_copies(&sample(), copies);

    let Some(ip) = args.first() else {
        info!(
            copies = payloads.len(),
            bytes = payloads[0].len(),
            "no printer address given, composed only"
        );
        return Ok(());
    };

    let dispatcher = Dispatcher::new();
    for (i, payload) in payloads.into_iter().enumerate() {
        let job = PrintJob::new(payload, PrinterSettings::network(ip, 9100));
        let report = dispatcher.dispatch(&job).await?;
        info!(copy = i, ok = report.all_succeeded(), "copy dispatched");
    }
    Ok(())
}

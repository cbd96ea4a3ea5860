//! # meltemi-pos
//!
//! Receipt pipeline for the point of sale: typed document payloads in,
//! ESC/POS bytes out the configured transport.
//!
//! Layering:
//! - [`types`] - document DTOs (receipt, kitchen ticket, shift
//!   checkout, Z report, driver assignment)
//! - [`templates`] - pure payload-to-styled-lines generators
//! - [`compose`] - styled lines to a complete ESC/POS byte stream,
//!   text or bitmap body
//! - [`dispatch`] - per-copy delivery over network or OS spooler
//!
//! The low-level printer model (commands, encoding, rasterization,
//! transports) lives in `meltemi-printer`.

pub mod compose;
pub mod config;
pub mod dispatch;
pub mod i18n;
pub mod logo;
pub mod money;
pub mod templates;
pub mod types;

pub use compose::Composer;
pub use config::{Language, PrinterSettings, ReceiptConfig, RenderMode, TemplateVariant, Transport};
pub use dispatch::{CopyOutcome, DispatchError, DispatchReport, Dispatcher, PrintJob};
pub use logo::LogoCache;
pub use types::Document;

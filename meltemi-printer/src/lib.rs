//! # meltemi-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - Typed ESC/POS command model and encoder
//! - Windows-1253 encoding for Greek printers
//! - Styled-line rasterization (ab_glyph) for bitmap receipts
//! - Floyd-Steinberg dithering for logo artwork
//! - Network printing (TCP port 9100) and OS spooler RAW jobs
//!
//! Business logic (WHAT to print) lives in `meltemi-pos`: document
//! templates, currency/locale formatting, copy handling and dispatch.
//!
//! ## Example
//!
//! ```ignore
//! use meltemi_printer::{CutMode, DocBuilder, NetworkPrinter, PaperProfile, Printer};
//!
//! let mut builder = DocBuilder::new(PaperProfile::MM80);
//! builder.center();
//! builder.double_size();
//! builder.line("MELTEMI");
//! builder.reset_size();
//! builder.left();
//! builder.line_lr("Coffee x2", "5.00");
//! builder.cut(CutMode::Partial);
//!
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

mod command;
mod dither;
mod encoding;
mod error;
#[cfg(feature = "image")]
mod logo;
mod printer;
mod profile;
mod raster;
mod text_raster;

// Re-exports
pub use command::{Align, CutMode, DocBuilder, Encoder, Op, two_column};
pub use dither::{dither_packed, dither_to_flags};
pub use encoding::{CODE_PAGE_CP1253, cell_width, encode_cp1253, pad_cells, truncate_cells};
pub use error::{PrintError, PrintResult};
pub use printer::{NETWORK_TIMEOUT, NetworkPrinter, Printer, SpoolerPrinter};
pub use profile::PaperProfile;
pub use raster::{RasterImage, luma_is_black, pack_row};
pub use text_raster::{
    BATCH_MARGIN_PX, FontSet, FontSpec, GlyphRasterizer, LineStyle, MAX_LINES_PER_BATCH,
    StyleTable, StyledLine, TextRasterizer, batch_lines, measure_height,
};

#[cfg(feature = "image")]
pub use logo::logo_raster;

//! ESC/POS command model and encoder
//!
//! Print content is modeled as a sequence of typed [`Op`] values that a
//! single [`Encoder`] pass serializes to wire bytes. Keeping the
//! operations as data (instead of appending bytes inside every branch
//! of the document logic) makes each opcode testable in isolation and
//! lets callers inspect a document before it hits a transport.
//!
//! [`DocBuilder`] layers the fluent API used by the document templates
//! on top of the op list.

use crate::encoding::{cell_width, encode_cp1253, truncate_cells};
use crate::profile::PaperProfile;
use crate::raster::RasterImage;

/// Horizontal alignment (ESC a)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Paper cut mode (GS V)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutMode {
    /// Full cut after feeding to the cutter position
    Full,
    /// Partial cut leaving a tear tab
    Partial,
}

/// One atomic ESC/POS operation
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Initialize printer (ESC @). First op of every job.
    Init,
    /// Set horizontal alignment (ESC a)
    Align(Align),
    /// Bold on/off (ESC E)
    Bold(bool),
    /// Underline level 0-2 (ESC -)
    Underline(u8),
    /// Character size (GS !): double width and/or double height
    Size { double_width: bool, double_height: bool },
    /// Select code page (ESC t). Must precede any non-ASCII text.
    CodePage(u8),
    /// Text line encoded per the active code page, followed by LF
    Text(String),
    /// Left text padded, right text right-justified, within the
    /// profile's character width. Overflow truncates, never wraps.
    TwoColumn { left: String, right: String },
    /// Print and feed n lines (ESC d)
    Feed(u8),
    /// Embedded raster image (GS v 0, mode 0)
    Raster(RasterImage),
    /// Cut paper after feeding 3 lines (GS V 65/66)
    Cut(CutMode),
    /// Cash drawer kick pulse on pin 2 (ESC p)
    Pulse,
    /// Verbatim escape hatch for uncovered control codes
    Raw(Vec<u8>),
}

/// Serializes op sequences against a paper profile
///
/// Encoding is infallible by contract: text outside the active code
/// page degrades to `'?'` substitution, it never errors. Callers that
/// need faithful non-Latin output use the raster path.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    profile: PaperProfile,
}

impl Encoder {
    pub fn new(profile: PaperProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> PaperProfile {
        self.profile
    }

    /// Serialize a sequence of operations to wire bytes
    pub fn encode(&self, ops: &[Op]) -> Vec<u8> {
        let mut out = Vec::with_capacity(4096);
        for op in ops {
            self.encode_op(op, &mut out);
        }
        out
    }

    fn encode_op(&self, op: &Op, out: &mut Vec<u8>) {
        match op {
            Op::Init => out.extend_from_slice(&[0x1B, 0x40]),
            Op::Align(align) => {
                let n = match align {
                    Align::Left => 0x00,
                    Align::Center => 0x01,
                    Align::Right => 0x02,
                };
                out.extend_from_slice(&[0x1B, 0x61, n]);
            }
            Op::Bold(on) => out.extend_from_slice(&[0x1B, 0x45, u8::from(*on)]),
            Op::Underline(level) => out.extend_from_slice(&[0x1B, 0x2D, (*level).min(2)]),
            Op::Size {
                double_width,
                double_height,
            } => {
                let n = (u8::from(*double_width) << 4) | u8::from(*double_height);
                out.extend_from_slice(&[0x1D, 0x21, n]);
            }
            Op::CodePage(n) => out.extend_from_slice(&[0x1B, 0x74, *n]),
            Op::Text(s) => {
                out.extend_from_slice(&encode_cp1253(s));
                out.push(b'\n');
            }
            Op::TwoColumn { left, right } => {
                let line = two_column(left, right, self.profile.char_width);
                out.extend_from_slice(&encode_cp1253(&line));
                out.push(b'\n');
            }
            Op::Feed(lines) => out.extend_from_slice(&[0x1B, 0x64, *lines]),
            Op::Raster(image) => out.extend_from_slice(&image.escpos_bytes()),
            Op::Cut(mode) => {
                let m = match mode {
                    CutMode::Full => 65,
                    CutMode::Partial => 66,
                };
                out.extend_from_slice(&[0x1D, 0x56, m, 0x03]);
            }
            Op::Pulse => out.extend_from_slice(&[0x1B, 0x70, 0x00, 25, 250]),
            Op::Raw(bytes) => out.extend_from_slice(bytes),
        }
    }
}

/// Lay out a two-column row within `width` character cells
///
/// Widths are measured in cells, not bytes, so Greek text aligns the
/// same as ASCII. When both columns fit, the result is exactly `width`
/// cells. On overflow the right column wins and the left column is
/// truncated deterministically.
pub fn two_column(left: &str, right: &str, width: usize) -> String {
    let rw = cell_width(right);
    if rw >= width {
        return truncate_cells(right, width);
    }

    let lw = cell_width(left);
    if lw + rw >= width {
        // Keep one space between the truncated left column and the right
        let keep = width - rw - 1;
        let left = truncate_cells(left, keep);
        return format!("{} {}", left, right);
    }

    format!("{}{}{}", left, " ".repeat(width - lw - rw), right)
}

/// Fluent ESC/POS document builder
///
/// Accumulates typed operations; `build()` runs the encoder pass.
/// Every document starts with ESC @ so a previous job's style state
/// can never leak into this one.
pub struct DocBuilder {
    ops: Vec<Op>,
    profile: PaperProfile,
}

impl DocBuilder {
    pub fn new(profile: PaperProfile) -> Self {
        Self {
            ops: vec![Op::Init],
            profile,
        }
    }

    pub fn profile(&self) -> PaperProfile {
        self.profile
    }

    // === Text Output ===

    /// Write a text line
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.ops.push(Op::Text(s.to_string()));
        self
    }

    /// Write an empty line
    pub fn newline(&mut self) -> &mut Self {
        self.ops.push(Op::Text(String::new()));
        self
    }

    /// Print and feed n lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.ops.push(Op::Feed(lines));
        self
    }

    /// Print left and right text on the same line
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        self.ops.push(Op::TwoColumn {
            left: left.to_string(),
            right: right.to_string(),
        });
        self
    }

    // === Alignment ===

    pub fn left(&mut self) -> &mut Self {
        self.ops.push(Op::Align(Align::Left));
        self
    }

    pub fn center(&mut self) -> &mut Self {
        self.ops.push(Op::Align(Align::Center));
        self
    }

    pub fn right(&mut self) -> &mut Self {
        self.ops.push(Op::Align(Align::Right));
        self
    }

    // === Text Style ===

    pub fn bold(&mut self) -> &mut Self {
        self.ops.push(Op::Bold(true));
        self
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.ops.push(Op::Bold(false));
        self
    }

    pub fn underline(&mut self, level: u8) -> &mut Self {
        self.ops.push(Op::Underline(level));
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.ops.push(Op::Size {
            double_width: true,
            double_height: true,
        });
        self
    }

    pub fn double_height(&mut self) -> &mut Self {
        self.ops.push(Op::Size {
            double_width: false,
            double_height: true,
        });
        self
    }

    pub fn double_width(&mut self) -> &mut Self {
        self.ops.push(Op::Size {
            double_width: true,
            double_height: false,
        });
        self
    }

    pub fn reset_size(&mut self) -> &mut Self {
        self.ops.push(Op::Size {
            double_width: false,
            double_height: false,
        });
        self
    }

    // === Code Page ===

    /// Select a code page for following text
    pub fn code_page(&mut self, n: u8) -> &mut Self {
        self.ops.push(Op::CodePage(n));
        self
    }

    // === Separators ===

    /// Print a line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        let sep = "=".repeat(self.profile.char_width);
        self.line(&sep)
    }

    /// Print a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        let sep = "-".repeat(self.profile.char_width);
        self.line(&sep)
    }

    // === Graphics ===

    /// Embed a raster image
    pub fn raster(&mut self, image: RasterImage) -> &mut Self {
        self.ops.push(Op::Raster(image));
        self
    }

    // === Paper Control ===

    /// Feed and cut (partial cut leaves a tear tab)
    pub fn cut(&mut self, mode: CutMode) -> &mut Self {
        self.ops.push(Op::Cut(mode));
        self
    }

    // === Cash Drawer ===

    /// Open cash drawer (pin 2)
    pub fn open_drawer(&mut self) -> &mut Self {
        self.ops.push(Op::Pulse);
        self
    }

    // === Raw Commands ===

    /// Write raw bytes directly
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.ops.push(Op::Raw(bytes.to_vec()));
        self
    }

    // === Build ===

    /// Inspect the accumulated operations
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Serialize to wire bytes
    pub fn build(self) -> Vec<u8> {
        Encoder::new(self.profile).encode(&self.ops)
    }
}

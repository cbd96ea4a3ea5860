//! Styled-line rasterization for scripts the printer cannot render
//!
//! Latin-only thermal heads mangle Greek text even with the right code
//! page selected, so those documents are shaped with a system TTF font
//! in-process (ab_glyph) and shipped to the printer as `GS v 0` raster
//! images instead of text.
//!
//! Rendering happens in fixed-size batches so a long report never
//! produces one enormous canvas: each batch becomes its own raster
//! command and the printer draws them back to back. Batch boundaries
//! always fall between lines.

use ab_glyph::{Font, FontArc, ScaleFont};

use crate::command::Align;
use crate::error::{PrintError, PrintResult};
use crate::raster::RasterImage;

/// Vertical margin above and below each rendered batch, in pixels
pub const BATCH_MARGIN_PX: usize = 8;

/// Maximum styled lines rendered into a single raster image
pub const MAX_LINES_PER_BATCH: usize = 30;

/// Horizontal inset of inverted "pill" backgrounds, in pixels
const PILL_MARGIN_PX: usize = 8;

/// Corner radius of inverted "pill" backgrounds, in pixels
const PILL_RADIUS_PX: usize = 10;

/// Ink coverage above which a canvas pixel prints black
const INK_THRESHOLD: f32 = 0.5;

/// Named line styles, each resolving to a fixed font configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    Small,
    #[default]
    Normal,
    Bold,
    Header,
    Title,
    DoubleHeight,
    DoubleSize,
    BoxHeader,
}

impl LineStyle {
    /// Resolve a style by name. Unknown names fail closed to `Normal`.
    pub fn from_name(name: &str) -> LineStyle {
        match name {
            "small" => LineStyle::Small,
            "normal" => LineStyle::Normal,
            "bold" => LineStyle::Bold,
            "header" => LineStyle::Header,
            "title" => LineStyle::Title,
            "doubleHeight" => LineStyle::DoubleHeight,
            "doubleSize" => LineStyle::DoubleSize,
            "boxHeader" => LineStyle::BoxHeader,
            _ => LineStyle::Normal,
        }
    }
}

/// Font configuration for one line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Glyph height in pixels
    pub px: f32,
    /// Use the bold face
    pub bold: bool,
    /// Vertical space the line occupies, in pixels
    pub line_height: usize,
}

/// Immutable style-to-font lookup table
///
/// Injected at rasterizer construction rather than read from module
/// state, so concurrent renders with different paper sizes can never
/// interfere. Pixel sizes are tuned for 203 DPI legibility.
#[derive(Debug, Clone, Copy)]
pub struct StyleTable {
    specs: [FontSpec; 8],
}

impl StyleTable {
    pub fn spec(&self, style: LineStyle) -> FontSpec {
        self.specs[style as usize]
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        let spec = |px: f32, bold: bool, line_height: usize| FontSpec {
            px,
            bold,
            line_height,
        };
        Self {
            // Index order must match the LineStyle discriminants
            specs: [
                spec(18.0, false, 26), // Small
                spec(22.0, false, 32), // Normal
                spec(22.0, true, 32),  // Bold
                spec(28.0, true, 40),  // Header
                spec(34.0, true, 48),  // Title
                spec(30.0, false, 44), // DoubleHeight
                spec(34.0, true, 50),  // DoubleSize
                spec(36.0, true, 52),  // BoxHeader
            ],
        }
    }
}

/// One printable unit of a rasterized document
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub text: String,
    /// Right-justified companion text for two-column rows. Clipped at
    /// the paper edge when it overflows, never wrapped.
    pub right_text: Option<String>,
    pub style: LineStyle,
    pub align: Align,
    /// White-on-black "pill" background instead of black-on-white
    pub inverted: bool,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            right_text: None,
            style,
            align: Align::Left,
            inverted: false,
        }
    }

    /// Empty spacer row at the normal line height
    pub fn blank() -> Self {
        Self::new("", LineStyle::Normal)
    }

    pub fn with_right(mut self, right: impl Into<String>) -> Self {
        self.right_text = Some(right.into());
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }
}

/// Total pixel height of one rendered batch
pub fn measure_height(lines: &[StyledLine], styles: &StyleTable) -> usize {
    let body: usize = lines
        .iter()
        .map(|line| styles.spec(line.style).line_height)
        .sum();
    BATCH_MARGIN_PX + body + BATCH_MARGIN_PX
}

/// Split lines into rendering batches of at most [`MAX_LINES_PER_BATCH`]
pub fn batch_lines(lines: &[StyledLine]) -> impl Iterator<Item = &[StyledLine]> {
    lines.chunks(MAX_LINES_PER_BATCH)
}

/// Regular and bold faces of the receipt font
///
/// `FontArc` is reference counted, so the set clones cheaply into
/// blocking render tasks.
#[derive(Clone)]
pub struct FontSet {
    regular: FontArc,
    bold: FontArc,
}

impl FontSet {
    /// Load both faces from TTF/OTF files
    pub fn from_files(
        regular: impl AsRef<std::path::Path>,
        bold: impl AsRef<std::path::Path>,
    ) -> PrintResult<Self> {
        let regular = std::fs::read(regular)?;
        let bold = std::fs::read(bold)?;
        Self::from_bytes(regular, bold)
    }

    /// Load both faces from raw font data
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>) -> PrintResult<Self> {
        let regular = FontArc::try_from_vec(regular)
            .map_err(|e| PrintError::Render(format!("Invalid regular font: {}", e)))?;
        let bold = FontArc::try_from_vec(bold)
            .map_err(|e| PrintError::Render(format!("Invalid bold font: {}", e)))?;
        Ok(Self { regular, bold })
    }

    fn face(&self, bold: bool) -> &FontArc {
        if bold { &self.bold } else { &self.regular }
    }
}

/// Renders styled lines into packed 1-bit raster images
pub trait TextRasterizer {
    /// Render one batch of lines at the given paper pixel width
    fn render(&self, lines: &[StyledLine], width_px: usize) -> PrintResult<RasterImage>;
}

/// In-process rasterizer over ab_glyph font shaping
///
/// Replaces the out-of-process renderer the print pipeline historically
/// shelled out to: no temp files, no per-call process spawn.
#[derive(Clone)]
pub struct GlyphRasterizer {
    fonts: FontSet,
    styles: StyleTable,
}

impl GlyphRasterizer {
    pub fn new(fonts: FontSet, styles: StyleTable) -> Self {
        Self { fonts, styles }
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Render all lines as a sequence of batch images
    ///
    /// Batches are rendered sequentially to bound peak memory; each
    /// returned image becomes one raster command in the final payload.
    pub fn render_batched(
        &self,
        lines: &[StyledLine],
        width_px: usize,
    ) -> PrintResult<Vec<RasterImage>> {
        batch_lines(lines)
            .map(|batch| self.render(batch, width_px))
            .collect()
    }

    /// Non-blocking variant of [`render_batched`](Self::render_batched)
    ///
    /// Rasterization is CPU-bound; this suspends the calling task
    /// instead of stalling the runtime during a long report render.
    pub async fn render_batched_async(
        &self,
        lines: Vec<StyledLine>,
        width_px: usize,
    ) -> PrintResult<Vec<RasterImage>> {
        let rasterizer = self.clone();
        tokio::task::spawn_blocking(move || rasterizer.render_batched(&lines, width_px))
            .await
            .map_err(|e| PrintError::Render(format!("Render task failed: {}", e)))?
    }

    fn draw_line(&self, canvas: &mut Canvas, top: usize, line: &StyledLine) {
        let spec = self.styles.spec(line.style);

        if line.inverted {
            paint_pill(canvas, top, spec.line_height);
        }

        let font = self.fonts.face(spec.bold);

        if !line.text.is_empty() {
            let layout = layout_text(font, spec.px, &line.text);
            let x0 = match line.align {
                Align::Left => PILL_MARGIN_PX as f32,
                Align::Center => ((canvas.width as f32) - layout.width).max(0.0) / 2.0,
                Align::Right => {
                    ((canvas.width - PILL_MARGIN_PX) as f32 - layout.width).max(0.0)
                }
            };
            draw_glyphs(canvas, top, spec, font, &layout, x0, line.inverted);
        }

        if let Some(right) = line.right_text.as_deref().filter(|s| !s.is_empty()) {
            let layout = layout_text(font, spec.px, right);
            let x0 = ((canvas.width - PILL_MARGIN_PX) as f32 - layout.width).max(0.0);
            draw_glyphs(canvas, top, spec, font, &layout, x0, line.inverted);
        }
    }
}

impl TextRasterizer for GlyphRasterizer {
    fn render(&self, lines: &[StyledLine], width_px: usize) -> PrintResult<RasterImage> {
        let height = measure_height(lines, &self.styles);
        let mut canvas = Canvas::new(width_px, height);

        let mut y = BATCH_MARGIN_PX;
        for line in lines {
            self.draw_line(&mut canvas, y, line);
            y += self.styles.spec(line.style).line_height;
        }

        canvas.into_raster()
    }
}

/// Grayscale working surface: 0.0 = white, 1.0 = full ink
struct Canvas {
    width: usize,
    height: usize,
    ink: Vec<f32>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ink: vec![0.0; width * height],
        }
    }

    fn add(&mut self, x: i32, y: i32, coverage: f32) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.ink[idx] = (self.ink[idx] + coverage).min(1.0);
        }
    }

    fn subtract(&mut self, x: i32, y: i32, coverage: f32) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.ink[idx] = (self.ink[idx] - coverage).max(0.0);
        }
    }

    fn fill(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.ink[y * self.width + x] = 1.0;
        }
    }

    /// Fixed-threshold 1-bit conversion; no error diffusion so glyph
    /// edges stay crisp.
    fn into_raster(self) -> PrintResult<RasterImage> {
        let mut img = RasterImage::new(self.width, self.height)?;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.ink[y * self.width + x] > INK_THRESHOLD {
                    img.set(x, y, true);
                }
            }
        }
        Ok(img)
    }
}

/// A shaped run of glyphs with its total advance width
struct TextLayout {
    glyphs: Vec<(ab_glyph::GlyphId, f32)>,
    width: f32,
    ascent: f32,
    descent: f32,
}

fn layout_text(font: &FontArc, px: f32, text: &str) -> TextLayout {
    let scaled = font.as_scaled(px);
    let mut glyphs = Vec::with_capacity(text.chars().count());
    let mut caret = 0.0f32;

    for ch in text.chars() {
        let id = font.glyph_id(ch);
        glyphs.push((id, caret));
        caret += scaled.h_advance(id);
    }

    TextLayout {
        glyphs,
        width: caret,
        ascent: scaled.ascent(),
        descent: scaled.descent(),
    }
}

fn draw_glyphs(
    canvas: &mut Canvas,
    top: usize,
    spec: FontSpec,
    font: &FontArc,
    layout: &TextLayout,
    x0: f32,
    inverted: bool,
) {
    // Center the glyph block vertically inside the line box
    let glyph_h = layout.ascent - layout.descent;
    let baseline = top as f32 + (spec.line_height as f32 - glyph_h) / 2.0 + layout.ascent;

    for &(id, glyph_x) in &layout.glyphs {
        let glyph = id.with_scale_and_position(spec.px, ab_glyph::point(x0 + glyph_x, baseline));
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|px, py, coverage| {
            let x = px as i32 + bounds.min.x as i32;
            let y = py as i32 + bounds.min.y as i32;
            if inverted {
                canvas.subtract(x, y, coverage);
            } else {
                canvas.add(x, y, coverage);
            }
        });
    }
}

/// Pixel inset of a pill row from its straight edge, for rounded corners
fn pill_inset(dy: usize, height: usize, radius: usize) -> usize {
    let r = radius.min(height / 2);
    let d = if dy < r {
        r - dy
    } else if dy + r >= height {
        dy + r + 1 - height
    } else {
        0
    };
    if d == 0 {
        return 0;
    }
    let r_f = r as f32;
    let d_f = d as f32;
    (r_f - (r_f * r_f - d_f * d_f).max(0.0).sqrt()).ceil() as usize
}

fn paint_pill(canvas: &mut Canvas, top: usize, line_height: usize) {
    let x_start = PILL_MARGIN_PX;
    let x_end = canvas.width.saturating_sub(PILL_MARGIN_PX);
    for dy in 0..line_height {
        let inset = pill_inset(dy, line_height, PILL_RADIUS_PX);
        for x in (x_start + inset)..x_end.saturating_sub(inset) {
            canvas.fill(x, top + dy);
        }
    }
}

//! Floyd-Steinberg error diffusion for continuous-tone artwork
//!
//! Converts grayscale images (logos, photographic art) to 1-bit output
//! for thermal printing. Quantization error at each pixel is diffused
//! to its unvisited neighbours with the classic 4-tap kernel:
//!
//! ```text
//!           *    7/16
//!   3/16  5/16   1/16
//! ```
//!
//! Integer arithmetic only, so identical input always produces
//! bit-identical output. Text lines never go through this path: error
//! diffusion softens glyph edges, so text uses the fixed threshold in
//! [`crate::raster::luma_is_black`] instead.

use crate::raster::pack_row;

/// Dither a grayscale buffer (0 = black, 255 = white) to black/white flags
///
/// Returns one `bool` per pixel in row-major order, `true` = print black.
pub fn dither_to_flags(luma: &[u8], width: usize, height: usize) -> Vec<bool> {
    debug_assert_eq!(luma.len(), width * height);

    let mut buf: Vec<i32> = luma.iter().map(|&v| v as i32).collect();
    let mut out = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let old = buf[i];
            let (new, black) = if old < 128 { (0, true) } else { (255, false) };
            out.push(black);

            let err = old - new;
            if x + 1 < width {
                buf[i + 1] += err * 7 / 16;
            }
            if y + 1 < height {
                if x > 0 {
                    buf[i + width - 1] += err * 3 / 16;
                }
                buf[i + width] += err * 5 / 16;
                if x + 1 < width {
                    buf[i + width + 1] += err * 1 / 16;
                }
            }
        }
    }

    out
}

/// Dither a grayscale buffer and pack each row MSB-first
///
/// Rows whose width is not a multiple of 8 are padded with white.
/// Output length = `ceil(width/8) * height`.
pub fn dither_packed(luma: &[u8], width: usize, height: usize) -> Vec<u8> {
    let flags = dither_to_flags(luma, width, height);
    let mut out = Vec::with_capacity(width.div_ceil(8) * height);
    for row in flags.chunks(width) {
        out.extend(pack_row(row));
    }
    out
}

//! 1-bit raster images for ESC/POS `GS v 0` printing
//!
//! Bits are stored row-major, MSB-first, 1 = black. The buffer length
//! invariant `bits.len() == width_px / 8 * height_px` is enforced at
//! construction so the emitted command header always matches the data.

use crate::error::{PrintError, PrintResult};

/// A packed monochrome bitmap sized for one raster command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width_px: usize,
    height_px: usize,
    bits: Vec<u8>,
}

impl RasterImage {
    /// Create a blank (all-white) image
    ///
    /// `width_px` must be a multiple of 8: paper profiles guarantee
    /// this, and it keeps every row byte-exact.
    pub fn new(width_px: usize, height_px: usize) -> PrintResult<Self> {
        if width_px == 0 || width_px % 8 != 0 {
            return Err(PrintError::InvalidConfig(format!(
                "Raster width must be a positive multiple of 8, got {}",
                width_px
            )));
        }
        Ok(Self {
            width_px,
            height_px,
            bits: vec![0u8; width_px / 8 * height_px],
        })
    }

    /// Build an image from pre-packed row data
    pub fn from_bits(width_px: usize, height_px: usize, bits: Vec<u8>) -> PrintResult<Self> {
        if width_px == 0 || width_px % 8 != 0 {
            return Err(PrintError::InvalidConfig(format!(
                "Raster width must be a positive multiple of 8, got {}",
                width_px
            )));
        }
        let expected = width_px / 8 * height_px;
        if bits.len() != expected {
            return Err(PrintError::InvalidConfig(format!(
                "Raster buffer length {} does not match {}x{} ({} bytes expected)",
                bits.len(),
                width_px,
                height_px,
                expected
            )));
        }
        Ok(Self {
            width_px,
            height_px,
            bits,
        })
    }

    pub fn width_px(&self) -> usize {
        self.width_px
    }

    pub fn height_px(&self) -> usize {
        self.height_px
    }

    pub fn bytes_per_row(&self) -> usize {
        self.width_px / 8
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Set a single pixel (1 = black). Out-of-bounds coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, black: bool) {
        if x >= self.width_px || y >= self.height_px {
            return;
        }
        let idx = y * self.bytes_per_row() + x / 8;
        let mask = 1u8 << (7 - (x % 8));
        if black {
            self.bits[idx] |= mask;
        } else {
            self.bits[idx] &= !mask;
        }
    }

    /// Read a single pixel. Out-of-bounds coordinates read as white.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width_px || y >= self.height_px {
            return false;
        }
        let idx = y * self.bytes_per_row() + x / 8;
        self.bits[idx] & (1u8 << (7 - (x % 8))) != 0
    }

    /// Encode as a `GS v 0` (mode 0) raster command
    ///
    /// Header fields are little-endian: width in *bytes*, height in dots.
    pub fn escpos_bytes(&self) -> Vec<u8> {
        let x_bytes = self.bytes_per_row();
        let mut out = Vec::with_capacity(8 + self.bits.len());
        out.extend_from_slice(&[0x1D, 0x76, 0x30, 0x00]);
        out.push((x_bytes & 0xFF) as u8);
        out.push((x_bytes >> 8) as u8);
        out.push((self.height_px & 0xFF) as u8);
        out.push((self.height_px >> 8) as u8);
        out.extend_from_slice(&self.bits);
        out
    }

    /// Stack images of equal width vertically into one taller image
    pub fn stack(images: &[RasterImage]) -> PrintResult<RasterImage> {
        let Some(first) = images.first() else {
            return Err(PrintError::InvalidConfig("Cannot stack zero images".into()));
        };
        let width = first.width_px;
        let mut bits = Vec::new();
        let mut height = 0;
        for img in images {
            if img.width_px != width {
                return Err(PrintError::InvalidConfig(format!(
                    "Cannot stack images of widths {} and {}",
                    width, img.width_px
                )));
            }
            bits.extend_from_slice(&img.bits);
            height += img.height_px;
        }
        RasterImage::from_bits(width, height, bits)
    }
}

/// Pack a row of boolean pixel values into bytes (MSB first)
///
/// If the row length is not a multiple of 8, the last byte is padded
/// with white on the right.
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];
    for (i, &black) in pixels.iter().enumerate() {
        if black {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }
    bytes
}

/// Fixed-threshold conversion for text rendering
///
/// Plain average luminance, black below 128. No error diffusion: text
/// edges must stay crisp. Artwork goes through `dither` instead.
pub fn luma_is_black(r: u8, g: u8, b: u8) -> bool {
    (r as u16 + g as u16 + b as u16) / 3 < 128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_length_invariant() {
        let img = RasterImage::new(384, 100).unwrap();
        assert_eq!(img.bits().len(), 48 * 100);

        let img = RasterImage::new(832, 7).unwrap();
        assert_eq!(img.bits().len(), 104 * 7);
    }

    #[test]
    fn test_rejects_unaligned_width() {
        assert!(RasterImage::new(383, 10).is_err());
        assert!(RasterImage::new(0, 10).is_err());
        assert!(RasterImage::from_bits(8, 2, vec![0u8; 3]).is_err());
    }

    #[test]
    fn test_set_get_pixel() {
        let mut img = RasterImage::new(16, 2).unwrap();
        img.set(0, 0, true);
        img.set(15, 1, true);
        assert!(img.get(0, 0));
        assert!(img.get(15, 1));
        assert!(!img.get(1, 0));
        assert_eq!(img.bits(), &[0x80, 0x00, 0x00, 0x01]);

        // Out of bounds is a no-op
        img.set(16, 0, true);
        img.set(0, 2, true);
        assert_eq!(img.bits(), &[0x80, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_escpos_header_little_endian() {
        let img = RasterImage::new(576, 300).unwrap();
        let bytes = img.escpos_bytes();

        assert_eq!(&bytes[..4], &[0x1D, 0x76, 0x30, 0x00]);
        // 576 px = 72 bytes per row
        assert_eq!(bytes[4], 72);
        assert_eq!(bytes[5], 0);
        // 300 = 0x012C little-endian
        assert_eq!(bytes[6], 0x2C);
        assert_eq!(bytes[7], 0x01);
        assert_eq!(bytes.len(), 8 + 72 * 300);
    }

    #[test]
    fn test_pack_row() {
        assert_eq!(pack_row(&[true; 8]), vec![0xFF]);
        assert_eq!(pack_row(&[false; 8]), vec![0x00]);
        assert_eq!(
            pack_row(&[true, false, true, false, true, false, true, false]),
            vec![0xAA]
        );
        // 12 pixels pad to 2 bytes
        assert_eq!(pack_row(&[true; 12]), vec![0xFF, 0xF0]);
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_luma_threshold() {
        assert!(luma_is_black(0, 0, 0));
        assert!(!luma_is_black(255, 255, 255));
        assert!(luma_is_black(127, 127, 127));
        assert!(!luma_is_black(128, 128, 128));
    }

    #[test]
    fn test_stack() {
        let a = RasterImage::new(16, 2).unwrap();
        let b = RasterImage::new(16, 3).unwrap();
        let stacked = RasterImage::stack(&[a, b]).unwrap();
        assert_eq!(stacked.height_px(), 5);
        assert_eq!(stacked.bits().len(), 2 * 5);

        let c = RasterImage::new(24, 1).unwrap();
        let d = RasterImage::new(16, 1).unwrap();
        assert!(RasterImage::stack(&[c, d]).is_err());
    }
}

//! Logo bitmap processing for receipt headers
//!
//! Continuous-tone artwork (store logos, promotional art) is resized to
//! the paper width, converted to grayscale and Floyd-Steinberg dithered
//! before packing. Text never comes through here: see
//! [`crate::text_raster`] for the fixed-threshold text path.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::instrument;

use crate::dither::dither_to_flags;
use crate::error::PrintResult;
use crate::raster::RasterImage;

/// Convert decoded artwork into a raster image no wider than `max_width_px`
///
/// The result is centered on a canvas of exactly `max_width_px` so it
/// can be embedded without a separate position command. Transparent
/// pixels render as white.
#[instrument(skip(img), fields(w = img.width(), h = img.height()))]
pub fn logo_raster(img: &DynamicImage, max_width_px: usize) -> PrintResult<RasterImage> {
    let (w, h) = (img.width(), img.height());

    let resized = if w as usize > max_width_px {
        let ratio = max_width_px as f64 / w as f64;
        img.resize(
            max_width_px as u32,
            (h as f64 * ratio).round().max(1.0) as u32,
            FilterType::Triangle,
        )
    } else {
        img.clone()
    };

    let rgba = resized.to_rgba8();
    let (rw, rh) = rgba.dimensions();

    // Flatten transparency against white before grayscale conversion
    let mut luma = Vec::with_capacity((rw * rh) as usize);
    for p in rgba.pixels() {
        let alpha = p[3] as u16;
        let gray = (p[0] as u16 + p[1] as u16 + p[2] as u16) / 3;
        let over_white = (gray * alpha + 255 * (255 - alpha)) / 255;
        luma.push(over_white as u8);
    }

    let flags = dither_to_flags(&luma, rw as usize, rh as usize);

    let mut out = RasterImage::new(max_width_px, rh as usize)?;
    let x_offset = (max_width_px - rw as usize) / 2;
    for y in 0..rh as usize {
        for x in 0..rw as usize {
            if flags[y * rw as usize + x] {
                out.set(x_offset + x, y, true);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(w: u32, h: u32, px: Rgba<u8>) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, px))
    }

    #[test]
    fn test_black_logo_prints_black() {
        let img = solid(64, 16, Rgba([0, 0, 0, 255]));
        let raster = logo_raster(&img, 384).unwrap();
        assert_eq!(raster.width_px(), 384);
        assert_eq!(raster.height_px(), 16);
        // Centered block is fully black
        let x_offset = (384 - 64) / 2;
        assert!(raster.get(x_offset, 8));
        assert!(raster.get(x_offset + 63, 8));
        // Canvas outside the artwork stays white
        assert!(!raster.get(0, 8));
    }

    #[test]
    fn test_transparent_logo_prints_white() {
        let img = solid(64, 16, Rgba([0, 0, 0, 0]));
        let raster = logo_raster(&img, 384).unwrap();
        assert!(raster.bits().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_wide_logo_resized_to_paper() {
        let img = solid(768, 100, Rgba([0, 0, 0, 255]));
        let raster = logo_raster(&img, 384).unwrap();
        assert_eq!(raster.width_px(), 384);
        assert_eq!(raster.height_px(), 50);
    }
}

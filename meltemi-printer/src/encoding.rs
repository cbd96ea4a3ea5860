//! Windows-1253 encoding utilities for Greek thermal printers
//!
//! Printers interpret bytes 0x80-0xFF according to the active code page,
//! so text must be converted from UTF-8 before it hits the wire. This
//! module provides:
//! - UTF-8 to windows-1253 conversion with best-effort substitution
//! - Character-cell width / truncate / pad helpers for column layout
//!
//! Widths are computed in character cells, never in bytes: every glyph
//! a single-byte code page can express occupies exactly one cell, so
//! cell count equals `chars().count()`. Using byte lengths here would
//! silently corrupt two-column alignment for multi-byte UTF-8 input.

/// ESC t argument selecting windows-1253 on WPC1253-capable firmwares
pub const CODE_PAGE_CP1253: u8 = 90;

/// Encode a string as windows-1253 bytes
///
/// Characters outside the code page are substituted with `'?'` rather
/// than failing: the encoder is infallible by contract and a degraded
/// receipt beats no receipt. Callers needing faithful Greek output
/// should use the bitmap path instead.
pub fn encode_cp1253(s: &str) -> Vec<u8> {
    if s.is_ascii() {
        return s.as_bytes().to_vec();
    }

    let (cow, _, had_errors) = encoding_rs::WINDOWS_1253.encode(s);
    if !had_errors {
        return cow.into_owned();
    }

    // Slow path: re-encode per character so unmappable input degrades
    // to '?' instead of encoding_rs's numeric character references.
    let mut out = Vec::with_capacity(s.len());
    let mut buf = [0u8; 4];
    for c in s.chars() {
        if c.is_ascii() {
            out.push(c as u8);
            continue;
        }
        let enc = c.encode_utf8(&mut buf);
        let (bytes, _, err) = encoding_rs::WINDOWS_1253.encode(enc);
        if err {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

/// Get the cell width of a string (one cell per character)
pub fn cell_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a cell width
pub fn truncate_cells(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to a specific cell width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_cells(s: &str, width: usize, align_right: bool) -> String {
    let current = cell_width(s);
    if current >= width {
        return truncate_cells(s, width);
    }
    let spaces = width - current;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

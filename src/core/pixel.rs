//! Per-pixel conversion between stored pixel formats and the premultiplied
//! RGBA8 working representation used while compositing.
use crate::core::bitmap::PixelFormat;
use crate::types::ColorSpace;

/// `a * b / 255`, rounded. Exact for `b == 0` and `b == 255`.
#[inline]
pub fn mul_div255(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

/// Rec.601 luma with 8-bit fixed-point weights. Equal channels map to themselves.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 77 + g as u32 * 150 + b as u32 * 29 + 128) >> 8) as u8
}

#[inline]
fn read_sample(format: PixelFormat, px: &[u8], index: usize) -> u8 {
    if format.bits_per_component == 16 {
        let wide = u16::from_be_bytes([px[index * 2], px[index * 2 + 1]]);
        ((wide as u32 * 255 + 32_767) / 65_535) as u8
    } else {
        px[index]
    }
}

#[inline]
fn write_sample(format: PixelFormat, out: &mut [u8], index: usize, value: u8) {
    if format.bits_per_component == 16 {
        let wide = value as u16 * 257;
        out[index * 2..index * 2 + 2].copy_from_slice(&wide.to_be_bytes());
    } else {
        out[index] = value;
    }
}

/// Decodes one stored pixel into premultiplied `[r, g, b, a]`.
pub fn decode_rgba8(format: PixelFormat, px: &[u8]) -> [u8; 4] {
    let colors = format.color_space.channels();
    let (alpha_index, color_offset) = match format.alpha {
        a if !a.has_alpha() => (None, 0),
        a if a.is_first() => (Some(0), 1),
        _ => (Some(colors), 0),
    };

    let a = alpha_index.map_or(255, |i| read_sample(format, px, i));
    let (r, g, b) = match format.color_space {
        ColorSpace::Gray => {
            let v = read_sample(format, px, color_offset);
            (v, v, v)
        }
        ColorSpace::Rgb => (
            read_sample(format, px, color_offset),
            read_sample(format, px, color_offset + 1),
            read_sample(format, px, color_offset + 2),
        ),
    };

    if format.alpha.has_alpha() && !format.alpha.is_premultiplied() {
        [mul_div255(r, a), mul_div255(g, a), mul_div255(b, a), a]
    } else {
        // Premultiplied colour never exceeds its alpha.
        [r.min(a), g.min(a), b.min(a), a]
    }
}

/// Encodes a premultiplied `[r, g, b, a]` into `out` using `format`.
///
/// Formats without alpha receive the premultiplied colour, which is the pixel
/// composited over black.
pub fn encode_rgba8(format: PixelFormat, rgba: [u8; 4], out: &mut [u8]) {
    let [r, g, b, a] = rgba;
    let (r, g, b) = if format.alpha.has_alpha() && !format.alpha.is_premultiplied() {
        (unpremultiply(r, a), unpremultiply(g, a), unpremultiply(b, a))
    } else {
        (r, g, b)
    };

    let colors = format.color_space.channels();
    let color_offset = if format.alpha.is_first() { 1 } else { 0 };
    match format.color_space {
        ColorSpace::Gray => write_sample(format, out, color_offset, luma(r, g, b)),
        ColorSpace::Rgb => {
            write_sample(format, out, color_offset, r);
            write_sample(format, out, color_offset + 1, g);
            write_sample(format, out, color_offset + 2, b);
        }
    }
    if format.alpha.has_alpha() {
        let alpha_index = if format.alpha.is_first() { 0 } else { colors };
        write_sample(format, out, alpha_index, a);
    }
}

#[inline]
fn unpremultiply(c: u8, a: u8) -> u8 {
    if a == 0 {
        0
    } else {
        ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8
    }
}

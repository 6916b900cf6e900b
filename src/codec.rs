use std::io::Cursor;

use anyhow::Context;

use crate::color;
use crate::error::{PixelblitError, PixelblitResult};

/// Decode result: pixels are always expanded to packed ARGB words;
/// `channels` reports the source layout (1 = gray, 2 = gray+alpha, 3 = RGB,
/// 4 = RGBA) so callers can pick the blit path.
#[derive(Debug)]
pub struct DecodedImage {
    pub width: i32,
    pub height: i32,
    pub channels: u8,
    pub pixels: Vec<u32>,
}

pub fn decode(bytes: &[u8]) -> PixelblitResult<DecodedImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| PixelblitError::decode(e.to_string()))?;
    let channels = dyn_img.color().channel_count();
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(width, height, channels, "decoded image");

    let pixels = rgba
        .into_raw()
        .chunks_exact(4)
        .map(|px| color::pack(px[3], px[0], px[1], px[2]))
        .collect();

    Ok(DecodedImage {
        width: width as i32,
        height: height as i32,
        channels,
        pixels,
    })
}

pub fn encode(pixels: &[u32], width: i32, height: i32) -> PixelblitResult<Vec<u8>> {
    let mut rgba = Vec::with_capacity(pixels.len() * 4);
    for &px in pixels {
        rgba.push((px >> 16) as u8);
        rgba.push((px >> 8) as u8);
        rgba.push(px as u8);
        rgba.push(color::alpha(px));
    }

    let img = image::RgbaImage::from_raw(width as u32, height as u32, rgba)
        .context("pixel data does not match encode dimensions")?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_png_to_argb_words() {
        let src_rgba = vec![0x12u8, 0x34, 0x56, 0x9A];
        let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode(&buf).unwrap();
        assert_eq!(decoded.width, 1);
        assert_eq!(decoded.height, 1);
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.pixels, vec![0x9A123456]);
    }

    #[test]
    fn decode_garbage_reports_reason() {
        let err = decode(b"not an image").unwrap_err();
        assert!(matches!(err, PixelblitError::Decode(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn encode_then_decode_preserves_pixels() {
        let pixels = vec![0xFF102030, 0x80FFFFFF, 0x00000000, 0xFF000000];
        let bytes = encode(&pixels, 2, 2).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.width, 2);
        assert_eq!(decoded.height, 2);
        assert_eq!(decoded.pixels, pixels);
    }

    #[test]
    fn encode_rejects_mismatched_dimensions() {
        assert!(encode(&[0xFF000000], 2, 2).is_err());
    }
}

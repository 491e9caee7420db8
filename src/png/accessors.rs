//! Typed views over a decoded frame's pixel bytes.
//!
//! Grounded on `imagine`'s use of `bytemuck` to hand back typed pixel slices
//! instead of raw bytes once a format is known to match. Sub-byte and
//! indexed formats have no single-struct-per-pixel representation, so they
//! stay as bytes; every 8-bit direct-color format gets a typed accessor.

use bytemuck::cast_slice;

use crate::pixel_formats::{RGB8, RGBA8, Y8, YA8};

use super::ihdr::PixelFormat;

/// Reinterpret a decoded frame's pixel bytes as `[Y8]`, if the frame's format
/// is 8-bit luminance.
#[must_use]
pub fn as_luminance8(format: PixelFormat, bytes: &[u8]) -> Option<&[Y8]> {
  (format == PixelFormat::Luminance8).then(|| cast_slice(bytes))
}

/// Reinterpret a decoded frame's pixel bytes as `[YA8]`, if the frame's
/// format is 8-bit luminance+alpha.
#[must_use]
pub fn as_luminance_alpha8(format: PixelFormat, bytes: &[u8]) -> Option<&[YA8]> {
  (format == PixelFormat::LuminanceAlpha8).then(|| cast_slice(bytes))
}

/// Reinterpret a decoded frame's pixel bytes as `[RGB8]`, if the frame's
/// format is 8-bit RGB.
#[must_use]
pub fn as_rgb8(format: PixelFormat, bytes: &[u8]) -> Option<&[RGB8]> {
  (format == PixelFormat::Rgb8).then(|| cast_slice(bytes))
}

/// Reinterpret a decoded frame's pixel bytes as `[RGBA8]`, if the frame's
/// format is 8-bit RGBA.
#[must_use]
pub fn as_rgba8(format: PixelFormat, bytes: &[u8]) -> Option<&[RGBA8]> {
  (format == PixelFormat::Rgba8).then(|| cast_slice(bytes))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn casts_rgba8_bytes_to_typed_slice() {
    let bytes = [255_u8, 0, 0, 255, 0, 255, 0, 255];
    let pixels = as_rgba8(PixelFormat::Rgba8, &bytes).unwrap();
    assert_eq!(pixels.len(), 2);
    assert_eq!(pixels[0], RGBA8 { r: 255, g: 0, b: 0, a: 255 });
  }

  #[test]
  fn rejects_mismatched_format() {
    let bytes = [0_u8; 4];
    assert!(as_rgba8(PixelFormat::Rgb8, &bytes).is_none());
  }
}

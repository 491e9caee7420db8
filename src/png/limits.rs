//! Decode-time resource limits.
//!
//! Grounded on `imagine`'s `ImagineError::DimensionsTooLarge` guard (it caps
//! width/height at 17,000px each before trusting `IHDR` enough to size an
//! allocation); this generalizes the same idea to a caller-configurable cap
//! plus a derived byte-budget check, since APNG frame counts multiply the
//! same risk across many frames instead of one image.

/// Caps applied to an `IHDR`/`acTL` pair before any allocation is sized from
/// them.
///
/// The defaults mirror `imagine`'s fixed 17,000px guard; callers decoding
/// from a trusted source can widen them, and callers decoding from untrusted
/// input can tighten them further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
  /// Maximum allowed `width` or `height`, in pixels.
  pub max_dimension: u32,
  /// Maximum allowed `acTL` frame count.
  pub max_frames: u32,
  /// Maximum total decompressed bytes this decoder will allocate for a
  /// single frame's filtered scanline buffer.
  pub max_frame_bytes: u64,
}
impl Default for DecodeLimits {
  fn default() -> Self {
    Self { max_dimension: 17_000, max_frames: 4096, max_frame_bytes: 512 * 1024 * 1024 }
  }
}
impl DecodeLimits {
  /// No caps at all: every dimension/count/size check passes. Intended for
  /// decoding sources the caller already trusts completely.
  #[must_use]
  pub const fn unbounded() -> Self {
    Self { max_dimension: u32::MAX, max_frames: u32::MAX, max_frame_bytes: u64::MAX }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_matches_documented_dimension_cap() {
    assert_eq!(DecodeLimits::default().max_dimension, 17_000);
  }

  #[test]
  fn unbounded_has_no_effective_cap() {
    let limits = DecodeLimits::unbounded();
    assert_eq!(limits.max_dimension, u32::MAX);
    assert_eq!(limits.max_frames, u32::MAX);
  }
}

use core::fmt;

/// Errors that can occur while parsing or decoding a PNG.
///
/// These follow the taxonomy a caller actually needs to act on:
/// * **Structural** ([`NotPng`](PngError::NotPng), [`Malformed`](PngError::Malformed)) —
///   the input violates the container format.
/// * **Capability** ([`Unformat`](PngError::Unformat),
///   [`Uninterlaced`](PngError::Uninterlaced),
///   [`Unsupported`](PngError::Unsupported)) — the input is well-formed but
///   this decoder doesn't handle it.
/// * **Environmental** ([`OutOfMemory`](PngError::OutOfMemory),
///   [`Read`](PngError::Read), [`NotFound`](PngError::NotFound)) — the host
///   side failed us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PngError {
  /// The source doesn't start with the PNG signature, or is too short to
  /// possibly hold one.
  NotPng,
  /// A chunk violated a structural or ordering invariant (bad bounds, bad
  /// chunk sequencing, a `tEXt` chunk with no NUL separator, etc).
  Malformed,
  /// The `(color_type, bit_depth)` pair in `IHDR` isn't one of the 14
  /// combinations PNG allows.
  Unformat,
  /// `IHDR` declares an interlaced image; this decoder doesn't deinterlace.
  Uninterlaced,
  /// An unknown *critical* chunk was found, or a chunk used an op code this
  /// decoder doesn't recognize (unknown dispose/blend op).
  Unsupported,
  /// The allocator could not satisfy a request.
  OutOfMemory,
  /// The byte source returned fewer bytes than requested.
  Read,
  /// The byte source could not be opened at all (e.g. a missing file).
  NotFound,
  /// The decompressor failed to produce the expected number of filtered
  /// bytes.
  Decompression,
  /// A dimension, frame count, or allocation size exceeded the configured
  /// [`DecodeLimits`](super::limits::DecodeLimits).
  LimitExceeded,
}

impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::NotPng => "input is not a PNG",
      Self::Malformed => "malformed PNG chunk stream",
      Self::Unformat => "unrecognized color type / bit depth combination",
      Self::Uninterlaced => "interlaced PNGs are not supported",
      Self::Unsupported => "unsupported critical chunk or op code",
      Self::OutOfMemory => "allocation failed",
      Self::Read => "short read from byte source",
      Self::NotFound => "byte source could not be opened",
      Self::Decompression => "decompression did not produce the expected output",
      Self::LimitExceeded => "image exceeds the configured decode limits",
    };
    f.write_str(s)
  }
}

#[cfg(feature = "std")]
impl std::error::Error for PngError {}

//! The decompression service the decoder drives.
//!
//! Matches the spec's `inflate(dst, dst_cap, src, src_len) -> status`
//! contract. The DEFLATE/zlib algorithm itself is an external collaborator;
//! this crate only ever calls through the [`Inflate`] trait.

use super::error::PngError;

/// A zlib/DEFLATE decompressor.
///
/// `src` is a single assembled zlib stream (the concatenated, sequence-
/// stripped `IDAT`/`fdAT` payloads for one frame). `dst` must end up filled
/// completely with the decompressed filtered scanline bytes; a decompressor
/// that can't do that should return [`PngError::Decompression`].
pub trait Inflate {
  /// Decompress `src` into `dst`, which must be filled exactly.
  fn inflate(&mut self, dst: &mut [u8], src: &[u8]) -> Result<(), PngError>;
}

/// The default [`Inflate`] implementation, backed by `miniz_oxide`.
///
/// This mirrors `Lokathor-imagine`'s own use of `miniz_oxide::inflate::core`
/// to decompress `IDAT` data directly into a caller-supplied buffer without
/// an intermediate allocation.
#[cfg(feature = "miniz_oxide")]
#[derive(Debug, Default, Clone, Copy)]
pub struct MinizInflater;

#[cfg(feature = "miniz_oxide")]
impl Inflate for MinizInflater {
  fn inflate(&mut self, dst: &mut [u8], src: &[u8]) -> Result<(), PngError> {
    use miniz_oxide::inflate::{
      core::{
        decompress,
        inflate_flags::{
          TINFL_FLAG_IGNORE_ADLER32, TINFL_FLAG_PARSE_ZLIB_HEADER,
          TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF,
        },
        DecompressorOxide,
      },
      TINFLStatus,
    };

    let r = &mut DecompressorOxide::new();
    let flags = TINFL_FLAG_PARSE_ZLIB_HEADER
      | TINFL_FLAG_USING_NON_WRAPPING_OUTPUT_BUF
      | TINFL_FLAG_IGNORE_ADLER32;
    let (status, _input_read, bytes_written) = decompress(r, src, dst, 0, flags);
    match status {
      TINFLStatus::Done if bytes_written == dst.len() => Ok(()),
      TINFLStatus::Done | TINFLStatus::Adler32Mismatch => {
        // the stream ended before filling the caller's buffer: the frame's
        // declared dimensions don't match what was actually encoded.
        Err(PngError::Decompression)
      }
      _ => Err(PngError::Decompression),
    }
  }
}

#[cfg(all(test, feature = "miniz_oxide"))]
mod tests {
  use super::*;

  /// Builds a minimal valid zlib stream wrapping a single DEFLATE "stored"
  /// (uncompressed) block, which is trivial to hand-construct and doesn't
  /// require a real compressor.
  pub(crate) fn stored_zlib(data: &[u8]) -> alloc::vec::Vec<u8> {
    let mut out = alloc::vec::Vec::new();
    out.push(0x78); // CMF: deflate, 32k window
    out.push(0x01); // FLG: matches the CMF/FLG checksum requirement
    let len = data.len() as u16;
    out.push(0x01); // BFINAL=1, BTYPE=00 (stored), rest of byte unused
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&(!len).to_le_bytes());
    out.extend_from_slice(data);
    out.extend_from_slice(&[0, 0, 0, 0]); // adler32, ignored by our flags
    out
  }

  #[test]
  fn round_trips_a_stored_block() {
    let payload = [1_u8, 2, 3, 4, 5, 6, 7, 8];
    let zlib = stored_zlib(&payload);
    let mut out = [0_u8; 8];
    MinizInflater.inflate(&mut out, &zlib).unwrap();
    assert_eq!(out, payload);
  }

  #[test]
  fn rejects_truncated_output() {
    let payload = [1_u8, 2, 3];
    let zlib = stored_zlib(&payload);
    let mut out = [0_u8; 8];
    assert_eq!(MinizInflater.inflate(&mut out, &zlib), Err(PngError::Decompression));
  }
}

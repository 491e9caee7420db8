//! The random-access byte source the decoder pulls chunk data from.
//!
//! This is the Rust shape of the capability record `upng_source` uses in the
//! original C implementation: a `size`, a `read(offset, dst)`, and (for
//! owned sources) a drop. In Rust the drop falls out of ownership for free,
//! so the trait only needs `size` and `read`.

use super::error::PngError;

/// A byte-addressable, randomly-readable source of PNG data.
///
/// Implementors only need to support exact reads: a `read` call that can't
/// fill `dst` completely should return [`PngError::Read`], matching the
/// spec's "any short read is a failure" contract.
pub trait ByteSource {
  /// Total number of bytes available from this source.
  fn size(&self) -> u64;

  /// Fill `dst` completely with bytes starting at `offset`.
  ///
  /// A source that can't produce `dst.len()` bytes at `offset` (including
  /// because `offset` is past the end) must return [`PngError::Read`].
  fn read(&mut self, offset: u64, dst: &mut [u8]) -> Result<(), PngError>;
}

/// A [`ByteSource`] backed by an in-memory byte slice.
///
/// This is the adapter for the common case of decoding a PNG that's already
/// fully loaded into memory.
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'b> {
  bytes: &'b [u8],
}
impl<'b> SliceSource<'b> {
  /// Wrap a byte slice as a [`ByteSource`].
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes }
  }
}
impl<'b> ByteSource for SliceSource<'b> {
  #[inline]
  fn size(&self) -> u64 {
    self.bytes.len() as u64
  }

  fn read(&mut self, offset: u64, dst: &mut [u8]) -> Result<(), PngError> {
    let offset = usize::try_from(offset).map_err(|_| PngError::Read)?;
    let end = offset.checked_add(dst.len()).ok_or(PngError::Read)?;
    let slice = self.bytes.get(offset..end).ok_or(PngError::Read)?;
    dst.copy_from_slice(slice);
    Ok(())
  }
}

/// A [`ByteSource`] backed by an owned buffer.
///
/// Useful when the caller has a `Vec<u8>` they want the decoder to own
/// outright (matching `upng_new_from_bytes`'s ownership transfer of the raw
/// buffer).
#[cfg(feature = "alloc")]
#[derive(Debug, Clone)]
pub struct OwnedSource {
  bytes: alloc::vec::Vec<u8>,
}
#[cfg(feature = "alloc")]
impl OwnedSource {
  /// Take ownership of a byte buffer as a [`ByteSource`].
  #[inline]
  #[must_use]
  pub fn new(bytes: alloc::vec::Vec<u8>) -> Self {
    Self { bytes }
  }
}
#[cfg(feature = "alloc")]
impl ByteSource for OwnedSource {
  #[inline]
  fn size(&self) -> u64 {
    self.bytes.len() as u64
  }

  fn read(&mut self, offset: u64, dst: &mut [u8]) -> Result<(), PngError> {
    SliceSource::new(&self.bytes).read(offset, dst)
  }
}

/// A [`ByteSource`] backed by a file on disk.
///
/// Grounded on `upng_new_from_file`'s `fseek`/`fread` adapter; here it's
/// `Seek`/`Read` on a `std::fs::File`.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct FileSource {
  file: std::fs::File,
  size: u64,
}
#[cfg(feature = "std")]
impl FileSource {
  /// Open a file and determine its size up front, mirroring
  /// `upng_new_from_file`'s `fseek(SEEK_END)` probe.
  pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, PngError> {
    let file = std::fs::File::open(path).map_err(|_| PngError::NotFound)?;
    let size = file.metadata().map_err(|_| PngError::NotFound)?.len();
    Ok(Self { file, size })
  }
}
#[cfg(feature = "std")]
impl ByteSource for FileSource {
  #[inline]
  fn size(&self) -> u64 {
    self.size
  }

  fn read(&mut self, offset: u64, dst: &mut [u8]) -> Result<(), PngError> {
    use std::io::{Read, Seek, SeekFrom};
    if offset.checked_add(dst.len() as u64).map_or(true, |end| end > self.size) {
      return Err(PngError::Read);
    }
    self.file.seek(SeekFrom::Start(offset)).map_err(|_| PngError::Read)?;
    self.file.read_exact(dst).map_err(|_| PngError::Read)
  }
}

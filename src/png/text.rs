//! `tEXt` keyword/text pairs.
//!
//! `upng.c`'s `upng_text` stores a keyword pointer and a text pointer, both
//! aliasing into the same owned buffer. Rust can't express that self-reference
//! safely, so this keeps one owned buffer plus the NUL separator's index and
//! recomputes the two slices on demand.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use super::error::PngError;

/// One `tEXt` chunk's keyword/text pair.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
  buffer: Vec<u8>,
  split: usize,
}
#[cfg(feature = "alloc")]
impl TextEntry {
  /// Parse a `tEXt` chunk payload: a Latin-1 keyword, a single NUL byte, then
  /// Latin-1 text (not itself NUL-terminated).
  pub fn parse(data: &[u8]) -> Result<Self, PngError> {
    let split = data.iter().position(|&b| b == 0).ok_or(PngError::Malformed)?;
    Ok(Self { buffer: data.to_vec(), split })
  }

  /// The Latin-1 keyword (may be empty; never contains a NUL).
  #[inline]
  #[must_use]
  pub fn keyword(&self) -> &[u8] {
    &self.buffer[..self.split]
  }

  /// The Latin-1 text body (may be empty).
  #[inline]
  #[must_use]
  pub fn text(&self) -> &[u8] {
    &self.buffer[self.split + 1..]
  }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
  use super::*;

  #[test]
  fn splits_keyword_and_text_on_nul() {
    let entry = TextEntry::parse(b"Author\0Jane Doe").unwrap();
    assert_eq!(entry.keyword(), b"Author");
    assert_eq!(entry.text(), b"Jane Doe");
  }

  #[test]
  fn allows_empty_text() {
    let entry = TextEntry::parse(b"Comment\0").unwrap();
    assert_eq!(entry.keyword(), b"Comment");
    assert_eq!(entry.text(), b"");
  }

  #[test]
  fn rejects_missing_separator() {
    assert_eq!(TextEntry::parse(b"NoSeparatorHere"), Err(PngError::Malformed));
  }

  #[test]
  fn allows_empty_keyword() {
    let entry = TextEntry::parse(b"\0text").unwrap();
    assert_eq!(entry.keyword(), b"");
    assert_eq!(entry.text(), b"text");
  }
}

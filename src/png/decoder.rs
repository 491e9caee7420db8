//! The top-level driver: owns a [`ByteSource`] and an [`Inflate`], and walks
//! a PNG through its lifecycle from "just opened" to "pixels in hand".
//!
//! Grounded on `upng.c`'s `upng_t` state machine (`UPNG_NEW` ->
//! `UPNG_HEADER` -> `UPNG_DECODED`, with `UPNG_ERROR` a sink any state can
//! fall into) and its `SET_ERROR` macro, which records the C source line the
//! error was raised at. `#[track_caller]` is this crate's idiomatic
//! equivalent of that `__LINE__` capture.

use alloc::vec::Vec;
use core::panic::Location;

#[cfg(feature = "log")]
use log::{debug, trace};

use super::error::PngError;
use super::frame::FrameDescriptor;
use super::ihdr::{Ihdr, PixelFormat};
use super::inflate::Inflate;
use super::limits::DecodeLimits;
use super::scanner::{scan, ChunkSpan, ScanResult};
use super::source::ByteSource;
use super::unfilter::{filter_step, remove_padding_bits, unfilter_frame};

/// Where a [`Decoder`] is in its lifecycle.
#[derive(Debug, Clone)]
enum DecoderState {
  New,
  HeaderParsed(ScanResult),
  Decoded { scan: ScanResult, frame_buffers: Vec<Vec<u8>> },
  Error(PngError),
}

/// Decodes a PNG (optionally an APNG) from a [`ByteSource`], using an
/// [`Inflate`] implementation to reverse the zlib compression.
///
/// Once an operation fails the decoder latches into an error state: every
/// further call returns the same [`PngError`] without touching the source
/// again, matching `upng_header`/`upng_decode`'s sticky-error behavior.
pub struct Decoder<S, I> {
  /// `None` once `decode()` has succeeded -- the source is released at that
  /// point, matching `upng_free_source`'s call at the end of `upng_decode`.
  source: Option<S>,
  inflate: I,
  limits: DecodeLimits,
  state: DecoderState,
  error_line: Option<u32>,
}
impl<S: ByteSource, I: Inflate> Decoder<S, I> {
  /// Build a decoder from a source and a decompressor, using
  /// [`DecodeLimits::default`].
  pub fn new(source: S, inflate: I) -> Self {
    Self { source: Some(source), inflate, limits: DecodeLimits::default(), state: DecoderState::New, error_line: None }
  }

  /// Build a decoder with custom resource limits.
  pub fn with_limits(source: S, inflate: I, limits: DecodeLimits) -> Self {
    Self { source: Some(source), inflate, limits, state: DecoderState::New, error_line: None }
  }

  #[track_caller]
  fn fail(&mut self, err: PngError) -> PngError {
    self.error_line = Some(Location::caller().line());
    self.state = DecoderState::Error(err);
    #[cfg(feature = "log")]
    debug!("png decode failed at line {}: {err}", Location::caller().line());
    err
  }

  /// The source line (within this crate) that raised the current sticky
  /// error, if any -- the idiomatic analogue of `upng_get_error_line`.
  #[must_use]
  pub fn error_line(&self) -> Option<u32> {
    self.error_line
  }

  /// The kind of the current sticky error, if any -- the idiomatic analogue
  /// of `upng_get_error`.
  #[must_use]
  pub fn last_error(&self) -> Option<PngError> {
    match &self.state {
      DecoderState::Error(e) => Some(*e),
      _ => None,
    }
  }

  /// Parse the `IHDR` and walk every chunk up to and including `IEND`,
  /// without decompressing any pixel data yet.
  #[track_caller]
  pub fn parse_header(&mut self) -> Result<(), PngError> {
    match &self.state {
      DecoderState::Error(e) => return Err(*e),
      DecoderState::HeaderParsed(_) | DecoderState::Decoded { .. } => return Ok(()),
      DecoderState::New => {}
    }
    let source = self.source.as_mut().unwrap();
    match scan(source, &self.limits) {
      Ok(result) => {
        #[cfg(feature = "log")]
        trace!("header parsed: {}x{}, {} frame(s)", result.ihdr.width, result.ihdr.height, result.frames.len());
        self.state = DecoderState::HeaderParsed(result);
        Ok(())
      }
      Err(e) => Err(self.fail(e)),
    }
  }

  fn scan_result(&self) -> Option<&ScanResult> {
    match &self.state {
      DecoderState::HeaderParsed(s) => Some(s),
      DecoderState::Decoded { scan, .. } => Some(scan),
      _ => None,
    }
  }

  /// The parsed `IHDR`, once [`parse_header`](Self::parse_header) has
  /// succeeded.
  #[must_use]
  pub fn ihdr(&self) -> Option<Ihdr> {
    self.scan_result().map(|s| s.ihdr)
  }

  /// The canvas offset declared by `oFFs`, or `(0, 0)` if the chunk was
  /// absent.
  #[must_use]
  pub fn canvas_offset(&self) -> Option<(i32, i32)> {
    self.scan_result().map(|s| (s.x_offset, s.y_offset))
  }

  /// The decoded palette entries, if the image is indexed color and `PLTE`
  /// was present.
  #[must_use]
  pub fn palette(&self) -> Option<&[[u8; 3]]> {
    self.scan_result().and_then(|s| s.palette.as_deref())
  }

  /// The raw `tRNS` bytes, if present.
  #[must_use]
  pub fn transparency(&self) -> Option<&[u8]> {
    self.scan_result().and_then(|s| s.transparency.as_deref())
  }

  /// Every `tEXt` keyword/text pair found while scanning.
  #[must_use]
  pub fn text_entries(&self) -> &[super::text::TextEntry] {
    self.scan_result().map(|s| s.text_entries.as_slice()).unwrap_or(&[])
  }

  /// Number of frames this PNG carries (1 for a plain PNG with no `acTL`).
  #[must_use]
  pub fn frame_count(&self) -> usize {
    self.scan_result().map(|s| s.frames.len()).unwrap_or(0)
  }

  /// The `fcTL` descriptor for frame `index`, if this PNG is animated and
  /// that frame has one (the default image of an APNG with a fallback frame
  /// has none).
  #[must_use]
  pub fn frame_descriptor(&self, index: usize) -> Option<FrameDescriptor> {
    self.scan_result().and_then(|s| s.frames.get(index)).and_then(|f| f.descriptor)
  }

  /// Number of times the animation should repeat (`0` means loop forever),
  /// or `None` for a non-animated PNG.
  #[must_use]
  pub fn play_count(&self) -> Option<u32> {
    self.scan_result().and_then(|s| s.animation).map(|a| a.play_count)
  }

  fn gather_frame_bytes(&mut self, spans: &[ChunkSpan]) -> Result<Vec<u8>, PngError> {
    let source = self.source.as_mut().unwrap();
    let total: usize = spans.iter().map(|s| s.length as usize).sum();
    let mut compressed = alloc::vec![0_u8; total];
    let mut pos = 0;
    for span in spans {
      let len = span.length as usize;
      source.read(span.offset, &mut compressed[pos..pos + len])?;
      pos += len;
    }
    Ok(compressed)
  }

  /// Decompress and unfilter every frame, leaving pixel buffers ready to
  /// read via [`pixel_buffer`](Self::pixel_buffer).
  #[track_caller]
  pub fn decode(&mut self) -> Result<(), PngError> {
    self.parse_header()?;
    if let DecoderState::Decoded { .. } = &self.state {
      return Ok(());
    }
    let scan = match core::mem::replace(&mut self.state, DecoderState::New) {
      DecoderState::HeaderParsed(s) => s,
      other => {
        // unreachable in practice: parse_header() above guarantees this,
        // but restore state rather than panic if it ever isn't.
        self.state = other;
        return Err(self.fail(PngError::Malformed));
      }
    };

    let ihdr = scan.ihdr;
    let bpp = filter_step(ihdr.pixel_format.bits_per_pixel());
    let mut frame_buffers = Vec::with_capacity(scan.frames.len());

    for frame in &scan.frames {
      let (width, height) = match &frame.descriptor {
        Some(d) => (d.width, d.height),
        None => (ihdr.width, ihdr.height),
      };
      let frame_ihdr = Ihdr { width, height, ..ihdr };
      let frame_stride = frame_ihdr.stride();
      let filtered_len = frame_ihdr.filtered_size(height);
      if (filtered_len as u64) > self.limits.max_frame_bytes {
        return Err(self.fail(PngError::LimitExceeded));
      }

      let compressed = match self.gather_frame_bytes(&frame.data_spans) {
        Ok(bytes) => bytes,
        Err(e) => return Err(self.fail(e)),
      };
      let mut filtered = alloc::vec![0_u8; filtered_len];
      if let Err(e) = self.inflate.inflate(&mut filtered, &compressed) {
        return Err(self.fail(e));
      }

      let mut out = alloc::vec![0_u8; frame_stride * height as usize];
      if let Err(e) = unfilter_frame(&mut filtered, &mut out, frame_stride, height as usize, bpp) {
        return Err(self.fail(e));
      }

      let bits_per_pixel = frame_ihdr.pixel_format.bits_per_pixel();
      if bits_per_pixel < 8 {
        let aligned_width = (((width * bits_per_pixel + 7) / 8) * 8) as usize;
        for row in out.chunks_exact_mut(frame_stride) {
          remove_padding_bits(row, aligned_width, aligned_width);
        }
      }

      frame_buffers.push(out);
    }

    #[cfg(feature = "log")]
    trace!("decoded {} frame(s)", frame_buffers.len());
    self.source = None;
    self.state = DecoderState::Decoded { scan, frame_buffers };
    Ok(())
  }

  /// The unfiltered pixel bytes for frame `index`, once
  /// [`decode`](Self::decode) has succeeded.
  #[must_use]
  pub fn frame_pixel_buffer(&self, index: usize) -> Option<&[u8]> {
    match &self.state {
      DecoderState::Decoded { frame_buffers, .. } => frame_buffers.get(index).map(Vec::as_slice),
      _ => None,
    }
  }

  /// The unfiltered pixel bytes of the first (or only) frame.
  #[must_use]
  pub fn pixel_buffer(&self) -> Option<&[u8]> {
    self.frame_pixel_buffer(0)
  }

  /// The pixel format every frame shares.
  #[must_use]
  pub fn pixel_format(&self) -> Option<PixelFormat> {
    self.ihdr().map(|h| h.pixel_format)
  }
}

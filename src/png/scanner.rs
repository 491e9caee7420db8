//! The single forward pass over a PNG's chunk stream.
//!
//! Grounded on `upng.c`'s `upng_process_chunks`: walk chunk headers one at a
//! time, dispatch on the 4-byte type tag, and either stash a chunk's payload
//! into a side-table (`PLTE`, `tRNS`, `tEXt`, `acTL`) or record where a
//! frame's compressed bytes live (`IDAT`/`fdAT`) without copying them yet.
//! Unlike `upng_process_chunks` this understands the APNG extension: `fcTL`
//! chunks delimit frame boundaries, and an `IDAT` run that precedes every
//! `fcTL` is the "default image" frame.

use alloc::vec::Vec;

#[cfg(feature = "log")]
use log::{trace, warn};

use super::chunk::{ChunkHeader, ChunkType};
use super::error::PngError;
use super::frame::{AnimationControl, BlendOp, DisposeOp, FrameDescriptor};
use super::ihdr::Ihdr;
use super::limits::DecodeLimits;
use super::source::ByteSource;
use super::text::TextEntry;

pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// The location of one chunk's data payload within the byte source, used to
/// gather a frame's `IDAT`/`fdAT` spans without copying them during the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
  pub offset: u64,
  pub length: u32,
}

/// One output frame: its `fcTL` descriptor (absent for the implicit default
/// image of a non-animated or animation-with-fallback PNG) plus the ordered
/// list of chunk spans whose concatenation is a single zlib stream.
#[derive(Debug, Clone)]
pub struct FrameRecord {
  pub descriptor: Option<FrameDescriptor>,
  pub data_spans: Vec<ChunkSpan>,
}

/// Only the first 10 `tEXt` chunks are retained; the rest are silently
/// ignored (see the crate's Non-goals around a bounded text table).
const MAX_TEXT_ENTRIES: usize = 10;

/// Everything the chunk walk discovers about a PNG, before any pixel data is
/// decompressed or unfiltered.
#[derive(Debug, Clone)]
pub struct ScanResult {
  pub ihdr: Ihdr,
  /// Canvas offset from `oFFs`, signed 32-bit; `(0, 0)` if absent.
  pub x_offset: i32,
  pub y_offset: i32,
  pub palette: Option<Vec<[u8; 3]>>,
  pub transparency: Option<Vec<u8>>,
  pub text_entries: Vec<TextEntry>,
  pub animation: Option<AnimationControl>,
  pub frames: Vec<FrameRecord>,
}

fn read_vec<S: ByteSource>(source: &mut S, offset: u64, length: u32) -> Result<Vec<u8>, PngError> {
  let mut buf = alloc::vec![0_u8; length as usize];
  source.read(offset, &mut buf)?;
  Ok(buf)
}

fn parse_offs(data: &[u8]) -> Result<(i32, i32), PngError> {
  let [x0, x1, x2, x3, y0, y1, y2, y3] = *data else {
    return Err(PngError::Malformed);
  };
  Ok((i32::from_be_bytes([x0, x1, x2, x3]), i32::from_be_bytes([y0, y1, y2, y3])))
}

/// Walk the entire chunk stream of `source` and build a [`ScanResult`].
pub fn scan<S: ByteSource>(source: &mut S, limits: &DecodeLimits) -> Result<ScanResult, PngError> {
  // 8-byte signature + 8-byte IHDR header + 13-byte IHDR payload = 29.
  if source.size() < 29 {
    return Err(PngError::NotPng);
  }
  let mut signature = [0_u8; 8];
  source.read(0, &mut signature)?;
  if signature != PNG_SIGNATURE {
    return Err(PngError::NotPng);
  }

  let mut offset: u64 = 8;
  let mut header_bytes = [0_u8; 8];
  source.read(offset, &mut header_bytes)?;
  let header = ChunkHeader::from_bytes(header_bytes);
  if header.ty != ChunkType::IHDR || header.length != 13 {
    return Err(PngError::Malformed);
  }
  offset += 8;
  let ihdr_bytes = read_vec(source, offset, header.length)?;
  let ihdr = Ihdr::parse(&ihdr_bytes)?;
  if ihdr.width == 0 || ihdr.height == 0 {
    return Err(PngError::Malformed);
  }
  if ihdr.width > limits.max_dimension || ihdr.height > limits.max_dimension {
    return Err(PngError::LimitExceeded);
  }
  offset += u64::from(header.length) + 4; // payload + CRC

  let mut x_offset = 0_i32;
  let mut y_offset = 0_i32;
  let mut palette = None;
  let mut transparency = None;
  let mut text_entries = Vec::new();
  let mut animation = None;
  let mut frames: Vec<FrameRecord> = Vec::new();
  let mut saw_iend = false;
  // local to the scan: the index of the most recent fcTL-delimited frame, or
  // `None` before the first one has been seen.
  let mut current_frame_index: Option<u32> = None;
  let mut fdat_sequence = 0_u32;

  while offset < source.size() {
    source.read(offset, &mut header_bytes)?;
    let header = ChunkHeader::from_bytes(header_bytes);
    let data_offset = offset + 8;
    let chunk_end = data_offset.checked_add(u64::from(header.length)).and_then(|n| n.checked_add(4));
    if chunk_end.map_or(true, |end| end > source.size()) {
      return Err(PngError::Malformed);
    }
    #[cfg(feature = "log")]
    trace!("chunk {:?} at {offset}, {} bytes", header.ty, header.length);

    match header.ty {
      ChunkType::IEND => {
        saw_iend = true;
        offset = data_offset + u64::from(header.length) + 4;
        break;
      }
      ChunkType::OFFS => {
        let bytes = read_vec(source, data_offset, header.length)?;
        let (x, y) = parse_offs(&bytes)?;
        x_offset = x;
        y_offset = y;
      }
      ChunkType::PLTE => {
        if header.length % 3 != 0 {
          return Err(PngError::Malformed);
        }
        let bytes = read_vec(source, data_offset, header.length)?;
        palette = Some(bytes.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect());
      }
      ChunkType::TRNS => {
        transparency = Some(read_vec(source, data_offset, header.length)?);
      }
      ChunkType::TEXT => {
        if text_entries.len() < MAX_TEXT_ENTRIES {
          let bytes = read_vec(source, data_offset, header.length)?;
          text_entries.push(TextEntry::parse(&bytes)?);
        }
      }
      ChunkType::ACTL => {
        if !frames.is_empty() {
          return Err(PngError::Malformed);
        }
        let bytes = read_vec(source, data_offset, header.length)?;
        let control = AnimationControl::parse(&bytes)?;
        if control.frame_count > limits.max_frames {
          return Err(PngError::LimitExceeded);
        }
        animation = Some(control);
      }
      ChunkType::FCTL => {
        let frame_count = animation.map(|a| a.frame_count).ok_or(PngError::Malformed)?;
        let bytes = read_vec(source, data_offset, header.length)?;
        let descriptor = FrameDescriptor::parse(&bytes)?;
        let expected = current_frame_index.map_or(0, |i| i + 1);
        if descriptor.sequence_number != expected || descriptor.sequence_number >= frame_count {
          return Err(PngError::Malformed);
        }
        let x_end = descriptor.x_offset.checked_add(descriptor.width);
        let y_end = descriptor.y_offset.checked_add(descriptor.height);
        if x_end.map_or(true, |end| end > ihdr.width) || y_end.map_or(true, |end| end > ihdr.height) {
          return Err(PngError::Malformed);
        }
        current_frame_index = Some(descriptor.sequence_number);
        fdat_sequence = 0;
        frames.push(FrameRecord { descriptor: Some(descriptor), data_spans: Vec::new() });
      }
      ChunkType::IDAT => {
        if frames.is_empty() {
          // Still image: synthesize the single implicit frame descriptor
          // spec.md requires rather than leaving it absent.
          let synthetic = FrameDescriptor {
            sequence_number: 0,
            width: ihdr.width,
            height: ihdr.height,
            x_offset: 0,
            y_offset: 0,
            delay_num: 0,
            delay_den: 0,
            dispose_op: DisposeOp::None,
            blend_op: BlendOp::Source,
          };
          frames.push(FrameRecord { descriptor: Some(synthetic), data_spans: Vec::new() });
        } else if current_frame_index.is_some_and(|i| i != 0) {
          // IDAT only ever contributes to frame 0; later frames are fdAT-only.
          return Err(PngError::Malformed);
        }
        frames.last_mut().unwrap().data_spans.push(ChunkSpan {
          offset: data_offset,
          length: header.length,
        });
      }
      ChunkType::FDAT => {
        if animation.is_none() || header.length < 4 {
          return Err(PngError::Malformed);
        }
        let seq_bytes = read_vec(source, data_offset, 4)?;
        let seq = u32::from_be_bytes(seq_bytes.try_into().unwrap());
        if seq != fdat_sequence {
          return Err(PngError::Malformed);
        }
        fdat_sequence += 1;
        let frame = frames.last_mut().ok_or(PngError::Malformed)?;
        frame.data_spans.push(ChunkSpan { offset: data_offset + 4, length: header.length - 4 });
      }
      other => {
        if other.is_critical() {
          return Err(PngError::Unsupported);
        }
        #[cfg(feature = "log")]
        warn!("skipping unknown ancillary chunk {other:?}");
      }
    }

    offset = data_offset + u64::from(header.length) + 4;
  }

  if !saw_iend {
    return Err(PngError::Malformed);
  }
  if frames.is_empty() {
    return Err(PngError::Malformed);
  }

  Ok(ScanResult { ihdr, x_offset, y_offset, palette, transparency, text_entries, animation, frames })
}

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! A decoder for the PNG container format, including the APNG animation
//! extension.
//!
//! This crate covers the part of PNG decoding that's fiddly to get exactly
//! right: walking chunks with their structural and ordering invariants,
//! gathering a chosen frame's compressed payload out of `IDAT`/`fdAT`
//! chunks, and reversing the five PNG scanline filters. Decompression and
//! the source of bytes are both external collaborators, modeled as traits
//! ([`Inflate`](png::Inflate) and [`ByteSource`](png::ByteSource)) so this
//! crate never has to know whether its bytes came from a `Vec`, a `File`, or
//! something stranger.
//!
//! Color-space conversion, Adam7 deinterlacing, and compositing of decoded
//! animation frames onto a canvas are all out of scope: this crate hands you
//! the raw pixel bytes in the image's native format, plus enough metadata
//! (dimensions, offsets, delay, dispose/blend ops) that a caller can do the
//! compositing itself.
//!
//! ## Example
//! ```no_run
//! use apng_core::png::{Decoder, MinizInflater, SliceSource};
//!
//! # fn main() -> Result<(), apng_core::PngError> {
//! let bytes: &[u8] = unimplemented!("png bytes from somewhere");
//! let mut decoder = Decoder::new(SliceSource::new(bytes), MinizInflater);
//! decoder.parse_header()?;
//! decoder.decode()?;
//! let pixels = decoder.pixel_buffer().unwrap();
//! # let _ = pixels;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod pixel_formats;
pub mod png;

pub use png::error::PngError;

/// Convenience alias for this crate's fallible operations.
pub type PngResult<T> = Result<T, PngError>;

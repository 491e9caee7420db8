//! PNG and APNG container decoding.
//!
//! The pieces are deliberately small and composable, mirroring the original
//! `upng_t` API surface but split across modules instead of one big struct:
//!
//! * [`error`] -- the [`PngError`](error::PngError) taxonomy every fallible
//!   operation here returns.
//! * [`source`] -- [`ByteSource`](source::ByteSource), the random-access read
//!   capability this crate needs from its caller.
//! * [`inflate`] -- [`Inflate`](inflate::Inflate), the zlib/DEFLATE
//!   decompression capability.
//! * [`chunk`] -- the 8-byte chunk header envelope every PNG chunk shares.
//! * [`ihdr`] -- the `IHDR` chunk and the 14-variant
//!   [`PixelFormat`](ihdr::PixelFormat) table.
//! * [`frame`] -- `acTL`/`fcTL` animation metadata.
//! * [`text`] -- `tEXt` keyword/text pairs.
//! * [`unfilter`] -- reversing the five PNG scanline filters.
//! * [`limits`] -- [`DecodeLimits`](limits::DecodeLimits), the caps applied
//!   before trusting a header enough to size an allocation.
//! * [`scanner`] -- the single forward pass that builds a
//!   [`ScanResult`](scanner::ScanResult) from a chunk stream.
//! * [`decoder`] -- [`Decoder`](decoder::Decoder), the driver that ties all
//!   of the above together into a `parse_header` / `decode` lifecycle.
//! * [`accessors`] -- typed views over a decoded frame's raw pixel bytes.
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

pub mod accessors;
pub mod chunk;
#[cfg(feature = "alloc")]
pub mod decoder;
pub mod error;
pub mod frame;
pub mod ihdr;
#[cfg(feature = "alloc")]
pub mod limits;
#[cfg(feature = "alloc")]
pub mod scanner;
pub mod source;
#[cfg(feature = "alloc")]
pub mod text;
#[cfg(feature = "alloc")]
pub mod unfilter;

pub mod inflate;

pub use chunk::{ChunkHeader, ChunkType};
#[cfg(feature = "alloc")]
pub use decoder::Decoder;
pub use error::PngError;
pub use frame::{AnimationControl, BlendOp, DisposeOp, FrameDescriptor};
pub use ihdr::{Ihdr, PixelFormat};
#[cfg(feature = "alloc")]
pub use limits::DecodeLimits;
#[cfg(feature = "miniz_oxide")]
pub use inflate::MinizInflater;
pub use inflate::Inflate;
#[cfg(feature = "alloc")]
pub use scanner::{ChunkSpan, FrameRecord, ScanResult, PNG_SIGNATURE};
#[cfg(feature = "std")]
pub use source::FileSource;
#[cfg(feature = "alloc")]
pub use source::OwnedSource;
pub use source::{ByteSource, SliceSource};
#[cfg(feature = "alloc")]
pub use text::TextEntry;

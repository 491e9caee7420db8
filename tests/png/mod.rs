use apng_core::png::{BlendOp, Decoder, DisposeOp, MinizInflater, PngError, SliceSource};

fn be_u32(x: u32) -> [u8; 4] {
  x.to_be_bytes()
}

fn push_chunk(buf: &mut Vec<u8>, ty: &[u8; 4], data: &[u8]) {
  buf.extend_from_slice(&be_u32(data.len() as u32));
  buf.extend_from_slice(ty);
  buf.extend_from_slice(data);
  buf.extend_from_slice(&[0, 0, 0, 0]); // CRC, never checked by this crate
}

fn ihdr_bytes(width: u32, height: u32, depth: u8, color: u8) -> [u8; 13] {
  let mut out = [0_u8; 13];
  out[0..4].copy_from_slice(&width.to_be_bytes());
  out[4..8].copy_from_slice(&height.to_be_bytes());
  out[8] = depth;
  out[9] = color;
  out
}

fn stored_zlib(data: &[u8]) -> Vec<u8> {
  let mut out = Vec::new();
  out.push(0x78);
  out.push(0x01);
  let len = data.len() as u16;
  out.push(0x01);
  out.extend_from_slice(&len.to_le_bytes());
  out.extend_from_slice(&(!len).to_le_bytes());
  out.extend_from_slice(data);
  out.extend_from_slice(&[0, 0, 0, 0]);
  out
}

fn fctl_bytes(seq: u32, w: u32, h: u32, delay_num: u16, delay_den: u16, dispose: u8, blend: u8) -> Vec<u8> {
  let mut out = Vec::new();
  out.extend_from_slice(&seq.to_be_bytes());
  out.extend_from_slice(&w.to_be_bytes());
  out.extend_from_slice(&h.to_be_bytes());
  out.extend_from_slice(&0_u32.to_be_bytes()); // x_offset
  out.extend_from_slice(&0_u32.to_be_bytes()); // y_offset
  out.extend_from_slice(&delay_num.to_be_bytes());
  out.extend_from_slice(&delay_den.to_be_bytes());
  out.push(dispose);
  out.push(blend);
  out
}

#[test]
fn decodes_one_opaque_red_pixel() {
  let mut buf = Vec::new();
  buf.extend_from_slice(&apng_core::png::PNG_SIGNATURE);
  push_chunk(&mut buf, b"IHDR", &ihdr_bytes(1, 1, 8, 6));
  let filtered = [0_u8, 255, 0, 0, 255];
  push_chunk(&mut buf, b"IDAT", &stored_zlib(&filtered));
  push_chunk(&mut buf, b"IEND", &[]);

  let mut decoder = Decoder::new(SliceSource::new(&buf), MinizInflater);
  decoder.parse_header().unwrap();
  decoder.decode().unwrap();
  assert_eq!(decoder.pixel_buffer().unwrap(), [255, 0, 0, 255]);
}

#[test]
fn decodes_a_two_by_two_luminance1_checkerboard() {
  let mut buf = Vec::new();
  buf.extend_from_slice(&apng_core::png::PNG_SIGNATURE);
  push_chunk(&mut buf, b"IHDR", &ihdr_bytes(2, 2, 1, 0));
  // row0: pixels [1, 0] packed into the top two bits -> 0b1000_0000
  // row1: pixels [0, 1] packed into the top two bits -> 0b0100_0000
  let filtered = [0_u8, 0b1000_0000, 0_u8, 0b0100_0000];
  push_chunk(&mut buf, b"IDAT", &stored_zlib(&filtered));
  push_chunk(&mut buf, b"IEND", &[]);

  let mut decoder = Decoder::new(SliceSource::new(&buf), MinizInflater);
  decoder.decode().unwrap();
  assert_eq!(decoder.pixel_buffer().unwrap(), [0b1000_0000, 0b0100_0000]);
}

#[test]
fn decodes_an_indexed_image_with_palette_and_transparency() {
  let mut buf = Vec::new();
  buf.extend_from_slice(&apng_core::png::PNG_SIGNATURE);
  push_chunk(&mut buf, b"IHDR", &ihdr_bytes(4, 1, 8, 3));
  let mut plte = Vec::new();
  for rgb in [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 0]] {
    plte.extend_from_slice(&rgb);
  }
  push_chunk(&mut buf, b"PLTE", &plte);
  push_chunk(&mut buf, b"tRNS", &[0]); // index 0 is fully transparent
  let filtered = [0_u8, 0, 1, 2, 3];
  push_chunk(&mut buf, b"IDAT", &stored_zlib(&filtered));
  push_chunk(&mut buf, b"IEND", &[]);

  let mut decoder = Decoder::new(SliceSource::new(&buf), MinizInflater);
  decoder.parse_header().unwrap();
  assert_eq!(decoder.palette().unwrap(), [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 0]]);
  assert_eq!(decoder.transparency().unwrap(), [0]);
  decoder.decode().unwrap();
  assert_eq!(decoder.pixel_buffer().unwrap(), [0, 1, 2, 3]);
}

#[test]
fn decodes_a_two_frame_apng_with_dispose_and_blend_ops() {
  let mut buf = Vec::new();
  buf.extend_from_slice(&apng_core::png::PNG_SIGNATURE);
  push_chunk(&mut buf, b"IHDR", &ihdr_bytes(1, 1, 8, 6));
  push_chunk(&mut buf, b"acTL", &[0, 0, 0, 2, 0, 0, 0, 2]);
  push_chunk(&mut buf, b"fcTL", &fctl_bytes(0, 1, 1, 1, 10, 0, 0));
  let frame0 = stored_zlib(&[0_u8, 255, 0, 0, 255]);
  push_chunk(&mut buf, b"IDAT", &frame0);
  push_chunk(&mut buf, b"fcTL", &fctl_bytes(1, 1, 1, 1, 10, 2, 1));
  let frame1_zlib = stored_zlib(&[0_u8, 0, 255, 0, 255]);
  let mut fdat_payload = Vec::new();
  fdat_payload.extend_from_slice(&2_u32.to_be_bytes());
  fdat_payload.extend_from_slice(&frame1_zlib);
  push_chunk(&mut buf, b"fdAT", &fdat_payload);
  push_chunk(&mut buf, b"IEND", &[]);

  let mut decoder = Decoder::new(SliceSource::new(&buf), MinizInflater);
  decoder.parse_header().unwrap();
  assert_eq!(decoder.frame_count(), 2);
  assert_eq!(decoder.play_count(), Some(2));
  assert_eq!(decoder.frame_descriptor(0).unwrap().dispose_op, DisposeOp::None);
  assert_eq!(decoder.frame_descriptor(1).unwrap().dispose_op, DisposeOp::Previous);
  assert_eq!(decoder.frame_descriptor(1).unwrap().blend_op, BlendOp::Over);

  decoder.decode().unwrap();
  assert_eq!(decoder.frame_pixel_buffer(0).unwrap(), [255, 0, 0, 255]);
  assert_eq!(decoder.frame_pixel_buffer(1).unwrap(), [0, 255, 0, 255]);
}

#[test]
fn truncated_file_is_malformed() {
  let mut buf = Vec::new();
  buf.extend_from_slice(&apng_core::png::PNG_SIGNATURE);
  push_chunk(&mut buf, b"IHDR", &ihdr_bytes(1, 1, 8, 6));
  push_chunk(&mut buf, b"IDAT", &stored_zlib(&[0, 1, 2, 3, 4]));
  // no IEND

  let mut decoder = Decoder::new(SliceSource::new(&buf), MinizInflater);
  assert_eq!(decoder.parse_header(), Err(PngError::Malformed));
  assert!(decoder.error_line().unwrap() > 0);
}

#[test]
fn unknown_critical_chunk_is_unsupported() {
  let mut buf = Vec::new();
  buf.extend_from_slice(&apng_core::png::PNG_SIGNATURE);
  push_chunk(&mut buf, b"IHDR", &ihdr_bytes(1, 1, 8, 6));
  push_chunk(&mut buf, b"QUIZ", &[]);
  push_chunk(&mut buf, b"IDAT", &stored_zlib(&[0, 1, 2, 3, 4]));
  push_chunk(&mut buf, b"IEND", &[]);

  let mut decoder = Decoder::new(SliceSource::new(&buf), MinizInflater);
  assert_eq!(decoder.parse_header(), Err(PngError::Unsupported));
}

#[test]
fn random_bytes_never_panic_the_decoder() {
  for _ in 0..20 {
    let v = super::rand_bytes(512);
    let mut decoder = Decoder::new(SliceSource::new(&v), MinizInflater);
    let _ = decoder.parse_header();
    let _ = decoder.decode();
  }
}

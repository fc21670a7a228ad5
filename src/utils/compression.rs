//! Snappy framing-format helpers.
//!
//! Frames carry their payload as a snappy *stream* (framing format: stream
//! identifier chunk followed by CRC-checked compressed/uncompressed chunks),
//! not as a raw snappy block. Chunks are self-delimiting, which lets a reader
//! interleave raw varint reads with decompression on the same transport.

use crate::config::MAX_PAYLOAD_SIZE;
use crate::error::{CodecError, Result};
use snap::read::FrameDecoder;
use snap::write::FrameEncoder;
use std::io::{self, Read, Write};

/// Compress `data` into a standalone snappy stream.
///
/// # Errors
/// Returns `CodecError::Compression` if the encoder fails
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() / 2 + 32);
    write_compressed(&mut out, data).map_err(CodecError::Compression)?;
    Ok(out)
}

/// Stream `data` through a snappy encoder into `w` and flush it.
///
/// Writing zero bytes emits nothing, not even the stream identifier.
pub fn write_compressed<W: Write>(w: W, data: &[u8]) -> io::Result<()> {
    let mut encoder = FrameEncoder::new(w);
    encoder.write_all(data)?;
    encoder.flush()
}

/// Decompress a complete snappy stream.
///
/// Output is capped at `MAX_PAYLOAD_SIZE` to avoid decompression bombs.
///
/// # Errors
/// Returns `CodecError::Decompression` if the stream is corrupt or exceeds the cap
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    FrameDecoder::new(data)
        .take(MAX_PAYLOAD_SIZE as u64 + 1)
        .read_to_end(&mut out)
        .map_err(CodecError::Decompression)?;
    if out.len() > MAX_PAYLOAD_SIZE {
        return Err(CodecError::Decompression(io::Error::new(
            io::ErrorKind::InvalidData,
            "decompressed stream exceeds maximum payload size",
        )));
    }
    Ok(out)
}

/// Read exactly `len` decompressed bytes from `decoder`.
///
/// Short reads are retried until `len` bytes arrive. A decoder that reports end
/// of stream first yields `UnexpectedEof`.
///
/// # Errors
/// Returns `CodecError::Decompression` on corrupt input, truncation or I/O failure
pub fn read_decompressed<R: Read + ?Sized>(decoder: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut raw = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        match decoder.read(&mut raw[filled..]) {
            Ok(0) => {
                return Err(CodecError::Decompression(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("snappy stream ended after {filled} of {len} bytes"),
                )))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CodecError::Decompression(e)),
        }
    }
    Ok(raw)
}

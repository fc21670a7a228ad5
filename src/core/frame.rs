//! # Frame Writer and Reader
//!
//! One frame carries one serialized object:
//!
//! ```text
//! [prefix (0+)] [varint N] [snappy stream of exactly N bytes]
//! ```
//!
//! Response chunks prepend a 4-byte fork digest before the varint. The declared
//! length always counts *decompressed* bytes.

use crate::config::{FORK_DIGEST_LEN, MAX_VARINT_LEN};
use crate::core::packet::{Decode, Encode, Size};
use crate::core::varint::{encode_uvarint, read_uvarint};
use crate::error::{CodecError, Result};
use crate::utils::compression::{read_decompressed, write_compressed};
use crate::utils::metrics::global_metrics;
use bytes::{BufMut, BytesMut};
use snap::read::FrameDecoder;
use std::io::{Read, Write};
use tracing::trace;

/// 4-byte domain separator identifying the fork a chunk was produced for.
pub type ForkDigest = [u8; FORK_DIGEST_LEN];

/// Hook for checking a received fork digest against the active fork.
///
/// Accepts every digest. Matching requires the fork schedule, which this crate
/// does not have; callers that do can compare the digest returned by
/// [`decode_and_read`].
#[inline]
pub fn check_fork_digest(_digest: &ForkDigest) -> Result<()> {
    Ok(())
}

/// Read the fork digest that precedes a response chunk and run it through the hook.
pub(crate) fn read_fork_digest<R: Read + ?Sized>(r: &mut R) -> Result<ForkDigest> {
    let mut digest = [0u8; FORK_DIGEST_LEN];
    r.read_exact(&mut digest).map_err(CodecError::ForkDigest)?;
    check_fork_digest(&digest)?;
    Ok(digest)
}

/// Read the varint length prefix of a frame.
pub(crate) fn read_length<R: Read + ?Sized>(r: &mut R) -> Result<u64> {
    let (len, _) = read_uvarint(r).map_err(CodecError::Framing)?;
    Ok(len)
}

/// Serialize `val` and write it to `w` as one frame.
///
/// The whole frame is assembled in memory first (prefix, varint, snappy
/// stream), then handed to the transport with a single `write_all` and a flush.
/// An encode or compression failure therefore never reaches the wire.
///
/// # Errors
/// - `CodecError::Encode` if serialization fails
/// - `CodecError::LengthMismatch` if the serialized length differs from `size()`
/// - `CodecError::Compression` if the snappy encoder fails
/// - `CodecError::Transport` if the transport write or flush fails
pub fn encode_and_write<W, T>(w: &mut W, val: &T, prefix: &[u8]) -> Result<()>
where
    W: Write + ?Sized,
    T: Encode + ?Sized,
{
    let size = val.size();

    let mut payload = Vec::with_capacity(size);
    val.encode_to(&mut payload).map_err(CodecError::Encode)?;
    if payload.len() != size {
        return Err(CodecError::LengthMismatch {
            expected: size as u64,
            got: payload.len() as u64,
        });
    }

    let mut length = [0u8; MAX_VARINT_LEN];
    let n = encode_uvarint(size as u64, &mut length);

    let mut frame = BytesMut::with_capacity(prefix.len() + MAX_VARINT_LEN + size);
    frame.put_slice(prefix);
    frame.put_slice(&length[..n]);
    write_compressed((&mut frame).writer(), &payload).map_err(CodecError::Compression)?;

    w.write_all(&frame)?;
    w.flush()?;

    global_metrics().frame_written(frame.len() as u64);
    trace!(
        prefix_len = prefix.len(),
        payload_len = size,
        wire_len = frame.len(),
        "Frame written"
    );
    Ok(())
}

/// Decode a response chunk: fork digest, then a fixed-size frame.
///
/// The digest goes through [`check_fork_digest`] and is returned to the caller.
pub fn decode_and_read<R, T>(r: &mut R, val: &mut T) -> Result<ForkDigest>
where
    R: Read + ?Sized,
    T: Size + Decode + ?Sized,
{
    let digest = read_fork_digest(r)?;
    decode_and_read_no_fork_digest(r, val)?;
    Ok(digest)
}

/// Decode a frame whose declared length must equal `val.size()`.
///
/// Decompresses with a decoder scoped to this call.
///
/// # Errors
/// - `CodecError::Framing` if the varint cannot be read
/// - `CodecError::LengthMismatch` if the declared length differs from `val.size()`
/// - `CodecError::Decompression` if the snappy stream is short or corrupt
/// - `CodecError::Decode` if `val` rejects the payload
pub fn decode_and_read_no_fork_digest<R, T>(r: &mut R, val: &mut T) -> Result<()>
where
    R: Read + ?Sized,
    T: Size + Decode + ?Sized,
{
    let declared = read_length(r)?;
    let expected = val.size() as u64;
    if declared != expected {
        global_metrics().length_mismatch();
        return Err(CodecError::LengthMismatch {
            expected,
            got: declared,
        });
    }

    let mut decoder = FrameDecoder::new(r);
    let raw = read_decompressed(&mut decoder, expected as usize)?;
    val.decode_from(&raw).map_err(CodecError::Decode)?;

    global_metrics().frame_read(expected);
    trace!(payload_len = expected, "Fixed-size frame decoded");
    Ok(())
}

//! # List Decoders
//!
//! Multi-item responses arrive as one flat buffer. Two layouts are in use:
//!
//! ```text
//! per item:  { [digest(4)] [varint N_i] [snappy stream of N_i bytes] [1 byte] } x count
//! uniform:   [digest(4)] [varint N] { [snappy stream of N bytes] } x count
//! ```
//!
//! Per-item framing restarts the snappy stream for every item, so each item
//! gets a fresh decoder. The uniform layout declares one length for all items
//! and seeds a new decoder at the buffer cursor for each of them.
//!
//! Neither decoder validates fork digests beyond
//! [`check_fork_digest`](crate::core::frame::check_fork_digest).

use crate::config::MAX_PAYLOAD_SIZE;
use crate::core::frame::{read_fork_digest, read_length};
use crate::core::packet::{Decode, Size};
use crate::error::{CodecError, Result};
use crate::utils::compression::read_decompressed;
use crate::utils::metrics::global_metrics;
use bytes::Buf;
use snap::read::FrameDecoder;
use tracing::{debug, trace};

/// Decode `count` individually framed items from `data` into `list`, in order.
///
/// Each item is a fork digest, a varint length, a snappy stream holding that
/// many bytes, and one trailing byte. Stops at the first error, which carries
/// the index of the failing item.
///
/// # Errors
/// - `CodecError::SlotCountMismatch` if `list` has fewer than `count` slots
/// - `CodecError::Item` wrapping the framing, payload or decode failure
pub fn decode_list_per_item<T: Decode>(data: &[u8], count: u64, list: &mut [T]) -> Result<()> {
    if count > list.len() as u64 {
        return Err(CodecError::SlotCountMismatch {
            expected: count,
            got: list.len() as u64,
        });
    }

    let mut r = data;
    for (index, slot) in list.iter_mut().take(count as usize).enumerate() {
        decode_framed_item(&mut r, slot).map_err(|e| e.at_item(index))?;
    }

    debug!(count, remaining = r.len(), "Per-item list decoded");
    Ok(())
}

fn decode_framed_item<T: Decode>(r: &mut &[u8], slot: &mut T) -> Result<()> {
    read_fork_digest(r)?;

    let declared = read_length(r)?;
    if declared > MAX_PAYLOAD_SIZE as u64 {
        return Err(CodecError::OversizedPayload {
            size: declared,
            max: MAX_PAYLOAD_SIZE,
        });
    }

    // Every item starts a new snappy stream.
    let raw = read_decompressed(&mut FrameDecoder::new(&mut *r), declared as usize)?;
    slot.decode_from(&raw).map_err(CodecError::Decode)?;
    global_metrics().list_item_decoded(declared);

    skip_unconfirmed_trailer(r);
    trace!(payload_len = declared, "List item decoded");
    Ok(())
}

/// Skip the single byte that follows every per-item frame.
///
/// Its meaning has not been confirmed, so its value is ignored, and a buffer
/// that ends right after the last payload is accepted.
fn skip_unconfirmed_trailer(r: &mut &[u8]) {
    if r.has_remaining() {
        r.advance(1);
    }
}

/// Decode `count` items of one uniform size from `data` into `list`, in order.
///
/// The buffer starts with one fork digest and one varint length shared by all
/// items. The uniform size is `list[0].size()`. Both the declared length and the
/// slot count are checked before any item is read.
///
/// # Errors
/// - `CodecError::SlotCountMismatch` if `list.len() != count`
/// - `CodecError::LengthMismatch` if the declared length differs from the uniform size
/// - `CodecError::Item` wrapping a payload or decode failure
pub fn decode_list_uniform<T: Size + Decode>(
    data: &[u8],
    count: u64,
    list: &mut [T],
) -> Result<()> {
    let mut r = data;
    read_fork_digest(&mut r)?;
    let declared = read_length(&mut r)?;

    if list.len() as u64 != count {
        return Err(CodecError::SlotCountMismatch {
            expected: count,
            got: list.len() as u64,
        });
    }
    let Some(first) = list.first() else {
        return Ok(());
    };

    let uniform = first.size();
    if declared != uniform as u64 {
        global_metrics().length_mismatch();
        return Err(CodecError::LengthMismatch {
            expected: uniform as u64,
            got: declared,
        });
    }
    if uniform > MAX_PAYLOAD_SIZE {
        return Err(CodecError::OversizedPayload {
            size: declared,
            max: MAX_PAYLOAD_SIZE,
        });
    }

    for (index, slot) in list.iter_mut().enumerate() {
        // Re-seed at the cursor. The decoder reads whole chunks only, so the
        // cursor ends exactly where this item's compressed bytes end.
        let raw = read_decompressed(&mut FrameDecoder::new(&mut r), uniform)
            .map_err(|e| e.at_item(index))?;
        slot.decode_from(&raw)
            .map_err(|e| CodecError::Decode(e).at_item(index))?;
        global_metrics().list_item_decoded(declared);
        trace!(index, remaining = r.len(), "Uniform list item decoded");
    }

    debug!(count, item_size = uniform, "Uniform list decoded");
    Ok(())
}

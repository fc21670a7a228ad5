//! # Stream Codec
//!
//! [`StreamCodec`] binds one transport to one snappy decoder for the life of the
//! stream. Packet frames are written with the frame writer; packet frames are
//! read by taking the varint straight off the transport and the payload from the
//! persistent decoder, which keeps its chunk state across decode calls.
//!
//! The codec is not synchronized. Calls on one instance must not overlap.

use crate::config::CodecConfig;
use crate::core::frame::{encode_and_write, read_length};
use crate::core::packet::Packet;
use crate::error::{CodecError, Result};
use crate::transport::Transport;
use crate::utils::compression::read_decompressed;
use crate::utils::metrics::global_metrics;
use bytes::Bytes;
use snap::read::FrameDecoder;
use std::io::{self, Read, Write};
use tracing::{debug, trace};

/// Per-stream codec owning the transport and its decompressor.
pub struct StreamCodec<S: Transport> {
    // Owns the transport. Raw reads go through `get_mut` so they bypass the
    // decoder's buffered output, which is empty between frames.
    decoder: FrameDecoder<S>,
    max_payload_size: usize,
}

/// Result of a [`StreamCodec::decode`] call.
///
/// Holds the raw payload bytes and borrows the codec so the caller can answer on
/// the same stream.
pub struct StreamContext<'a, S: Transport> {
    raw: Bytes,
    codec: &'a mut StreamCodec<S>,
}

impl<S: Transport> StreamCodec<S> {
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, &CodecConfig::default())
    }

    pub fn with_config(stream: S, config: &CodecConfig) -> Self {
        debug!(
            protocol = %stream.protocol(),
            max_payload_size = config.max_payload_size,
            "Stream codec created"
        );
        Self {
            decoder: FrameDecoder::new(stream),
            max_payload_size: config.max_payload_size,
        }
    }

    /// Protocol identifier negotiated on the stream.
    pub fn protocol(&self) -> &str {
        self.decoder.get_ref().protocol()
    }

    pub fn get_ref(&self) -> &S {
        self.decoder.get_ref()
    }

    /// Mutable access to the transport. Reading from it directly in the middle
    /// of a frame desynchronizes the decoder.
    pub fn get_mut(&mut self) -> &mut S {
        self.decoder.get_mut()
    }

    /// Read exactly one byte from the transport.
    pub fn read_byte(&mut self) -> Result<u8> {
        let mut b = [0u8; 1];
        self.get_mut().read_exact(&mut b)?;
        Ok(b[0])
    }

    /// Write `packet` as one frame after `prefix`.
    ///
    /// A packet that does not expose [`Encode`](crate::core::packet::Encode)
    /// is skipped and `Ok(())` is returned without touching the stream.
    pub fn write_packet(&mut self, packet: &dyn Packet, prefix: &[u8]) -> Result<()> {
        let Some(val) = packet.as_encode() else {
            trace!("Packet has no encode capability, nothing written");
            return Ok(());
        };
        encode_and_write(self.decoder.get_mut(), val, prefix)
    }

    /// Decode the next frame into `packet`.
    ///
    /// A packet that does not expose [`Decode`](crate::core::packet::Decode)
    /// consumes nothing and yields a context with an empty payload.
    ///
    /// # Errors
    /// - `CodecError::Framing` if the varint cannot be read
    /// - `CodecError::OversizedPayload` if the declared length exceeds the limit
    /// - `CodecError::Decompression` if the payload is short or corrupt
    /// - `CodecError::Decode` if `packet` rejects the payload
    pub fn decode(&mut self, packet: &mut dyn Packet) -> Result<StreamContext<'_, S>> {
        let raw = match packet.as_decode() {
            Some(val) => {
                let raw = self.read_payload().inspect_err(|_| {
                    global_metrics().decode_error();
                })?;
                val.decode_from(&raw).map_err(|e| {
                    global_metrics().decode_error();
                    CodecError::Decode(e)
                })?;
                global_metrics().frame_read(raw.len() as u64);
                raw
            }
            None => Bytes::new(),
        };

        Ok(StreamContext { raw, codec: self })
    }

    fn read_payload(&mut self) -> Result<Bytes> {
        let declared = read_length(self.decoder.get_mut())?;
        if declared > self.max_payload_size as u64 {
            return Err(CodecError::OversizedPayload {
                size: declared,
                max: self.max_payload_size,
            });
        }

        let raw = read_decompressed(&mut self.decoder, declared as usize)?;
        trace!(
            protocol = %self.protocol(),
            payload_len = raw.len(),
            "Frame decoded"
        );
        Ok(Bytes::from(raw))
    }

    /// Close both directions of the stream.
    pub fn close(&mut self) -> Result<()> {
        self.get_mut().close()?;
        Ok(())
    }

    /// Close the write half. Reads keep working until the peer ends its side.
    pub fn close_write(&mut self) -> Result<()> {
        self.get_mut().close_write()?;
        Ok(())
    }

    /// Close the read half. Writes keep working.
    pub fn close_read(&mut self) -> Result<()> {
        self.get_mut().close_read()?;
        Ok(())
    }
}

impl<S: Transport> Read for StreamCodec<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.get_mut().read(buf)
    }
}

impl<S: Transport> Write for StreamCodec<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.get_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.get_mut().flush()
    }
}

impl<S: Transport> StreamContext<'_, S> {
    /// Decompressed payload the packet was decoded from. Empty when the packet
    /// had no decode capability.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Protocol identifier of the stream the frame arrived on.
    pub fn protocol(&self) -> &str {
        self.codec.protocol()
    }

    /// The codec that produced this context.
    pub fn codec(&mut self) -> &mut StreamCodec<S> {
        &mut *self.codec
    }

    /// The transport the frame arrived on.
    pub fn stream(&mut self) -> &mut S {
        self.codec.get_mut()
    }

    pub fn into_raw(self) -> Bytes {
        self.raw
    }
}

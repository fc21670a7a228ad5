// test-only module included via protocol/mod.rs
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::config::CodecConfig;
use crate::core::frame::encode_and_write;
use crate::core::packet::{Decode, Encode, Size};
use crate::core::varint::read_uvarint;
use crate::error::{CodecError, ObjectError, Phase};
use crate::protocol::stream::StreamCodec;
use crate::transport::local::pipe;
use crate::transport::Transport;
use crate::utils::compression::decompress;
use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

/// Variable-length blob that remembers every payload it was decoded from.
#[derive(Debug, Default, Clone, PartialEq)]
struct Blob {
    bytes: Vec<u8>,
    decoded_from: Vec<Vec<u8>>,
}

impl Blob {
    fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            decoded_from: Vec::new(),
        }
    }
}

impl Size for Blob {
    fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl Encode for Blob {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), ObjectError> {
        buf.extend_from_slice(&self.bytes);
        Ok(())
    }
}

impl Decode for Blob {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
        self.bytes = bytes.to_vec();
        self.decoded_from.push(bytes.to_vec());
        Ok(())
    }
}

crate::impl_packet!(Blob: encode, decode);

/// Only readable.
#[derive(Default)]
struct Inbound(Vec<u8>);

impl Decode for Inbound {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
        self.0 = bytes.to_vec();
        Ok(())
    }
}

crate::impl_packet!(Inbound: decode);

/// Neither readable nor writable.
struct Opaque;

crate::impl_packet!(Opaque);

/// Rejects every payload.
struct Strict;

impl Decode for Strict {
    fn decode_from(&mut self, _bytes: &[u8]) -> Result<(), ObjectError> {
        Err("unexpected payload".into())
    }
}

crate::impl_packet!(Strict: decode);

#[test]
fn test_three_byte_example() {
    let (a, mut b) = pipe("/test/1");
    let mut writer = StreamCodec::new(a);
    writer.write_packet(&Blob::new(&[0x01, 0x02, 0x03]), &[]).unwrap();
    writer.close_write().unwrap();

    let mut wire = Vec::new();
    b.read_to_end(&mut wire).unwrap();
    let (len, used) = read_uvarint(&mut &wire[..]).unwrap();
    assert_eq!((len, used), (3, 1));
    assert_eq!(decompress(&wire[used..]).unwrap(), vec![0x01, 0x02, 0x03]);

    let mut reader = StreamCodec::new(pipe_with(&wire));
    let mut target = Blob::default();
    let ctx = reader.decode(&mut target).unwrap();
    assert_eq!(ctx.raw().as_ref(), &[0x01, 0x02, 0x03]);
    assert_eq!(target.decoded_from, vec![vec![0x01, 0x02, 0x03]]);
}

/// Pipe endpoint preloaded with `bytes`, peer already gone.
fn pipe_with(bytes: &[u8]) -> crate::transport::local::MemoryStream {
    let (mut w, r) = pipe("/test/preloaded");
    w.write_all(bytes).unwrap();
    r
}

#[test]
fn test_sequential_frames_share_decoder() {
    let (a, b) = pipe("/test/seq");
    let mut writer = StreamCodec::new(a);
    let mut reader = StreamCodec::new(b);

    let payloads: Vec<Vec<u8>> = vec![
        vec![],
        vec![0xAB; 1],
        (0..=255).collect(),
        vec![0x11; 70_000],
        vec![],
        b"tail".to_vec(),
    ];
    for p in &payloads {
        writer.write_packet(&Blob::new(p), &[]).unwrap();
    }

    for p in &payloads {
        let mut target = Blob::default();
        let ctx = reader.decode(&mut target).unwrap();
        assert_eq!(ctx.raw().len(), p.len());
        assert_eq!(&target.bytes, p);
    }
    assert_eq!(reader.get_ref().pending(), 0);
}

#[test]
fn test_missing_encode_writes_nothing() {
    let (a, b) = pipe("/test/noop");
    let mut writer = StreamCodec::new(a);
    writer.write_packet(&Inbound::default(), &[0xFF]).unwrap();
    writer.write_packet(&Opaque, &[]).unwrap();
    assert_eq!(b.pending(), 0);
}

#[test]
fn test_missing_decode_consumes_nothing() {
    let (a, b) = pipe("/test/noop");
    let mut writer = StreamCodec::new(a);
    let mut reader = StreamCodec::new(b);
    writer.write_packet(&Blob::new(b"kept"), &[]).unwrap();
    let queued = reader.get_ref().pending();

    let ctx = reader.decode(&mut Opaque).unwrap();
    assert!(ctx.raw().is_empty());
    assert_eq!(ctx.protocol(), "/test/noop");
    assert_eq!(reader.get_ref().pending(), queued);

    let mut target = Inbound::default();
    reader.decode(&mut target).unwrap();
    assert_eq!(target.0, b"kept");
}

#[test]
fn test_prefix_byte_then_frame() {
    let (a, b) = pipe("/test/prefix");
    let mut writer = StreamCodec::new(a);
    let mut reader = StreamCodec::new(b);

    writer.write_packet(&Blob::new(b"ok"), &[0x00]).unwrap();
    writer.write_packet(&Blob::new(b"err"), &[0x01]).unwrap();

    assert_eq!(reader.read_byte().unwrap(), 0x00);
    let mut first = Blob::default();
    reader.decode(&mut first).unwrap();
    assert_eq!(first.bytes, b"ok");

    assert_eq!(reader.read_byte().unwrap(), 0x01);
    let mut second = Blob::default();
    reader.decode(&mut second).unwrap();
    assert_eq!(second.bytes, b"err");
}

#[test]
fn test_raw_passthrough() {
    let (a, b) = pipe("/test/raw");
    let mut left = StreamCodec::new(a);
    let mut right = StreamCodec::new(b);

    left.write_all(b"hello").unwrap();
    left.flush().unwrap();
    let mut buf = [0u8; 5];
    right.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"hello");
}

#[test]
fn test_context_answers_on_same_stream() {
    let (a, b) = pipe("/test/reply");
    let mut requester = StreamCodec::new(a);
    let mut responder = StreamCodec::new(b);

    requester.write_packet(&Blob::new(b"req"), &[]).unwrap();

    let mut request = Blob::default();
    let mut ctx = responder.decode(&mut request).unwrap();
    ctx.codec().write_packet(&Blob::new(b"resp"), &[0x00]).unwrap();
    ctx.stream().close_write().unwrap();

    assert_eq!(requester.read_byte().unwrap(), 0x00);
    let mut response = Blob::default();
    requester.decode(&mut response).unwrap();
    assert_eq!(response.bytes, b"resp");
    assert!(requester.read_byte().unwrap_err().is_unexpected_eof());
}

#[test]
fn test_write_half_close_keeps_reads() {
    let (a, b) = pipe("/test/half");
    let mut left = StreamCodec::new(a);
    let mut right = StreamCodec::new(b);

    left.close_write().unwrap();
    assert!(left.write_packet(&Blob::new(b"x"), &[]).is_err());

    right.write_packet(&Blob::new(b"after close"), &[]).unwrap();
    let mut target = Blob::default();
    left.decode(&mut target).unwrap();
    assert_eq!(target.bytes, b"after close");

    right.close().unwrap();
    let err = left.decode(&mut Blob::default()).err().unwrap();
    assert_eq!(err.phase(), Phase::Length);
    assert!(err.is_unexpected_eof());
}

#[test]
fn test_read_half_close_keeps_writes() {
    let (a, b) = pipe("/test/half");
    let mut left = StreamCodec::new(a);
    let mut right = StreamCodec::new(b);

    left.close_read().unwrap();
    assert!(left.read_byte().is_err());

    left.write_packet(&Blob::new(b"still writing"), &[]).unwrap();
    let mut target = Blob::default();
    right.decode(&mut target).unwrap();
    assert_eq!(target.bytes, b"still writing");
}

#[test]
fn test_oversized_declared_length() {
    let (mut a, b) = pipe("/test/limit");
    let config = CodecConfig {
        max_payload_size: 1024,
        ..CodecConfig::default()
    };
    let mut reader = StreamCodec::with_config(b, &config);

    // varint 2048 = 0x80 0x10
    a.write_all(&[0x80, 0x10]).unwrap();
    let err = reader.decode(&mut Blob::default()).err().unwrap();
    assert!(matches!(
        err,
        CodecError::OversizedPayload {
            size: 2048,
            max: 1024
        }
    ));
    assert_eq!(err.phase(), Phase::Length);
}

#[test]
fn test_decode_failure_is_tagged() {
    let (a, b) = pipe("/test/strict");
    let mut writer = StreamCodec::new(a);
    let mut reader = StreamCodec::new(b);
    writer.write_packet(&Blob::new(b"payload"), &[]).unwrap();

    let err = reader.decode(&mut Strict).err().unwrap();
    assert!(matches!(err, CodecError::Decode(_)));
    assert_eq!(err.phase(), Phase::Decode);
}

#[test]
fn test_truncated_payload() {
    let mut wire = Vec::new();
    encode_and_write(&mut wire, &Blob::new(&[0x42; 300]), &[]).unwrap();
    wire.truncate(wire.len() - 10);

    let mut reader = StreamCodec::new(pipe_with(&wire));
    let err = reader.decode(&mut Blob::default()).err().unwrap();
    assert!(matches!(err, CodecError::Decompression(_)));
    assert_eq!(err.phase(), Phase::Payload);
}

#[test]
fn test_close_from_other_thread_unblocks_decode() {
    let (a, _b) = pipe("/test/cancel");
    let closer = a.closer();
    let mut reader = StreamCodec::new(a);

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        closer.close().unwrap();
    });

    let err = reader.decode(&mut Blob::default()).err().unwrap();
    assert_eq!(err.phase(), Phase::Length);
    canceller.join().unwrap();
}

#[test]
fn test_protocol_is_reported() {
    let (a, _b) = pipe("/eth2/beacon_chain/req/status/1/ssz_snappy");
    let codec = StreamCodec::new(a);
    assert_eq!(codec.protocol(), "/eth2/beacon_chain/req/status/1/ssz_snappy");
    assert_eq!(codec.get_ref().protocol(), codec.protocol());
}

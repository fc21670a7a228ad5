#![no_main]

use libfuzzer_sys::fuzz_target;
use snappy_stream_codec::config::CodecConfig;
use snappy_stream_codec::core::frame::decode_and_read;
use snappy_stream_codec::core::packet::{Decode, Size};
use snappy_stream_codec::error::ObjectError;
use snappy_stream_codec::impl_packet;
use snappy_stream_codec::protocol::StreamCodec;
use snappy_stream_codec::transport::local::pipe;
use std::io::Write;

#[derive(Default)]
struct Sink(Vec<u8>);

impl Size for Sink {
    fn size(&self) -> usize {
        32
    }
}

impl Decode for Sink {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
        self.0 = bytes.to_vec();
        Ok(())
    }
}

impl_packet!(Sink: decode);

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a stream of frames; keep the allocation limit small
    let config = CodecConfig {
        max_payload_size: 1024 * 1024,
        ..CodecConfig::default()
    };
    let (mut w, r) = pipe("/fuzz/frame");
    if w.write_all(data).is_err() {
        return;
    }
    drop(w);

    let mut codec = StreamCodec::with_config(r, &config);
    for _ in 0..16 {
        if codec.decode(&mut Sink::default()).is_err() {
            break;
        }
    }

    // Same bytes as a fork-digest chunk
    let _ = decode_and_read(&mut &data[..], &mut Sink::default());
});

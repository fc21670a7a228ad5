#![no_main]

use libfuzzer_sys::fuzz_target;
use snappy_stream_codec::core::packet::{Decode, Size};
use snappy_stream_codec::error::ObjectError;
use snappy_stream_codec::protocol::list::{decode_list_per_item, decode_list_uniform};

#[derive(Default, Clone)]
struct Item(Vec<u8>);

impl Size for Item {
    fn size(&self) -> usize {
        16
    }
}

impl Decode for Item {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
        self.0 = bytes.to_vec();
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let count = count % 8;

    // Items must never be decoded past `count` or panic on malformed input
    let mut slots = vec![Item::default(); count as usize];
    let _ = decode_list_per_item(rest, u64::from(count), &mut slots);

    let mut slots = vec![Item::default(); count as usize];
    let _ = decode_list_uniform(rest, u64::from(count), &mut slots);
});

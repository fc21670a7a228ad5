//! Wire types shared by the integration tests.
#![allow(dead_code)]

use snappy_stream_codec::core::frame::encode_and_write;
use snappy_stream_codec::error::ObjectError;
use snappy_stream_codec::utils::compression::write_compressed;
use snappy_stream_codec::{impl_packet, Decode, Encode, Size};

/// Fixed 40-byte layout: little-endian epoch followed by a 32-byte root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checkpoint {
    pub epoch: u64,
    pub root: [u8; 32],
}

impl Checkpoint {
    pub const SIZE: usize = 40;

    pub fn new(epoch: u64) -> Self {
        Self {
            epoch,
            root: [epoch as u8; 32],
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::SIZE);
        buf.extend_from_slice(&self.epoch.to_le_bytes());
        buf.extend_from_slice(&self.root);
        buf
    }
}

impl Size for Checkpoint {
    fn size(&self) -> usize {
        Self::SIZE
    }
}

impl Encode for Checkpoint {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), ObjectError> {
        buf.extend_from_slice(&self.to_bytes());
        Ok(())
    }
}

impl Decode for Checkpoint {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
        if bytes.len() != Self::SIZE {
            return Err(format!("checkpoint needs {} bytes, got {}", Self::SIZE, bytes.len()).into());
        }
        let (epoch, root) = bytes.split_at(8);
        self.epoch = u64::from_le_bytes(epoch.try_into()?);
        self.root.copy_from_slice(root);
        Ok(())
    }
}

impl_packet!(Checkpoint: encode, decode);

/// Variable-length opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob(pub Vec<u8>);

impl Size for Blob {
    fn size(&self) -> usize {
        self.0.len()
    }
}

impl Encode for Blob {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), ObjectError> {
        buf.extend_from_slice(&self.0);
        Ok(())
    }
}

impl Decode for Blob {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
        self.0 = bytes.to_vec();
        Ok(())
    }
}

impl_packet!(Blob: encode, decode);

/// Per-item list buffer: digest, frame, one trailing byte per item.
pub fn per_item_buffer(items: &[Blob], digest: [u8; 4], trailer: u8) -> Vec<u8> {
    let mut data = Vec::new();
    for item in items {
        encode_and_write(&mut data, item, &digest).expect("encode item");
        data.push(trailer);
    }
    data
}

/// Uniform list buffer: digest and one varint, then one snappy stream per item.
pub fn uniform_buffer(items: &[Checkpoint], digest: [u8; 4], declared: u64) -> Vec<u8> {
    let mut data = digest.to_vec();
    let mut length = [0u8; 10];
    let n = snappy_stream_codec::core::varint::encode_uvarint(declared, &mut length);
    data.extend_from_slice(&length[..n]);
    for item in items {
        write_compressed(&mut data, &item.to_bytes()).expect("compress item");
    }
    data
}

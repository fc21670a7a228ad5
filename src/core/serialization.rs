//! # Serialization Adapter
//!
//! Wire types normally bring a hand-written fixed layout. For application
//! messages where any deterministic encoding will do, [`Bincoded`] lends a serde
//! type all three packet capabilities through bincode.
//!
//! Bincode's default configuration uses fixed-width integers and little-endian
//! byte order, so the serialized length of a value with only fixed-size fields
//! does not depend on its contents. That makes `Bincoded<T>` usable with the
//! uniform list decoder and with fork-digest frames that check the size.
//!
//! ## Usage
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use snappy_stream_codec::core::packet::Size;
//! use snappy_stream_codec::core::serialization::Bincoded;
//!
//! #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
//! struct Goodbye {
//!     reason: u64,
//! }
//!
//! let msg = Bincoded(Goodbye { reason: 1 });
//! assert_eq!(msg.size(), 8);
//! ```

use crate::core::packet::{Decode, Encode, Packet, Size};
use crate::error::ObjectError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ops::{Deref, DerefMut};

/// Serde value carried through the codec with bincode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bincoded<T>(pub T);

impl<T> Bincoded<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Bincoded<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Bincoded<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Serialize> Size for Bincoded<T> {
    fn size(&self) -> usize {
        // A value bincode cannot size cannot be encoded either; encode_to reports it.
        bincode::serialized_size(&self.0).map_or(0, |n| n as usize)
    }
}

impl<T: Serialize> Encode for Bincoded<T> {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), ObjectError> {
        bincode::serialize_into(buf, &self.0)?;
        Ok(())
    }
}

impl<T: DeserializeOwned> Decode for Bincoded<T> {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
        self.0 = bincode::deserialize(bytes)?;
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned> Packet for Bincoded<T> {
    fn as_encode(&self) -> Option<&dyn Encode> {
        Some(self)
    }

    fn as_decode(&mut self) -> Option<&mut dyn Decode> {
        Some(self)
    }
}

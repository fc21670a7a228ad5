//! # Packet Capabilities
//!
//! The codec never serializes anything itself. Message types bring their own
//! deterministic serialization through three independent capabilities:
//!
//! - [`Size`]: exact uncompressed length of the serialized form
//! - [`Encode`]: append the serialized form to a buffer (requires [`Size`])
//! - [`Decode`]: replace `self` with the value parsed from a byte slice
//!
//! A type may implement any subset. [`Packet`] is the capability query the
//! stream codec dispatches on: a packet without `Encode` is not written, a
//! packet without `Decode` is not read, and neither case is an error.
//!
//! ```rust
//! use snappy_stream_codec::core::packet::{Decode, Encode, Size};
//! use snappy_stream_codec::error::ObjectError;
//! use snappy_stream_codec::impl_packet;
//!
//! #[derive(Default)]
//! struct Status {
//!     head_slot: u64,
//! }
//!
//! impl Size for Status {
//!     fn size(&self) -> usize {
//!         8
//!     }
//! }
//!
//! impl Encode for Status {
//!     fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), ObjectError> {
//!         buf.extend_from_slice(&self.head_slot.to_le_bytes());
//!         Ok(())
//!     }
//! }
//!
//! impl Decode for Status {
//!     fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
//!         let raw: [u8; 8] = bytes.try_into()?;
//!         self.head_slot = u64::from_le_bytes(raw);
//!         Ok(())
//!     }
//! }
//!
//! impl_packet!(Status: encode, decode);
//! ```

use crate::error::ObjectError;

/// Exact serialized length of an object, in uncompressed bytes.
pub trait Size {
    fn size(&self) -> usize;
}

/// Deterministic serialization into a caller-provided buffer.
pub trait Encode: Size {
    /// Append exactly `self.size()` bytes to `buf`.
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), ObjectError>;
}

/// Parse an object in place from its serialized form.
pub trait Decode {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError>;
}

/// Capability query used by the stream codec before dispatching.
pub trait Packet {
    fn as_encode(&self) -> Option<&dyn Encode> {
        None
    }

    fn as_decode(&mut self) -> Option<&mut dyn Decode> {
        None
    }
}

impl<T: Size + ?Sized> Size for Box<T> {
    fn size(&self) -> usize {
        (**self).size()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), ObjectError> {
        (**self).encode_to(buf)
    }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
        (**self).decode_from(bytes)
    }
}

impl<T: Size + ?Sized> Size for &mut T {
    fn size(&self) -> usize {
        (**self).size()
    }
}

impl<T: Decode + ?Sized> Decode for &mut T {
    fn decode_from(&mut self, bytes: &[u8]) -> Result<(), ObjectError> {
        (**self).decode_from(bytes)
    }
}

/// Implement [`Packet`] for a type, listing the capabilities it exposes.
///
/// ```ignore
/// impl_packet!(Goodbye: encode, decode);
/// impl_packet!(MetadataRequest: encode);
/// impl_packet!(Ping);
/// ```
#[macro_export]
macro_rules! impl_packet {
    ($ty:ty) => {
        impl $crate::core::packet::Packet for $ty {}
    };
    ($ty:ty: encode) => {
        impl $crate::core::packet::Packet for $ty {
            fn as_encode(&self) -> Option<&dyn $crate::core::packet::Encode> {
                Some(self)
            }
        }
    };
    ($ty:ty: decode) => {
        impl $crate::core::packet::Packet for $ty {
            fn as_decode(&mut self) -> Option<&mut dyn $crate::core::packet::Decode> {
                Some(self)
            }
        }
    };
    ($ty:ty: encode, decode) => {
        impl $crate::core::packet::Packet for $ty {
            fn as_encode(&self) -> Option<&dyn $crate::core::packet::Encode> {
                Some(self)
            }

            fn as_decode(&mut self) -> Option<&mut dyn $crate::core::packet::Decode> {
                Some(self)
            }
        }
    };
}

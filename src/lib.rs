//! # Snappy Stream Codec
//!
//! Wire codec for peer-to-peer request/response streams: every message is a
//! varint-length-prefixed, snappy-streamed, deterministically serialized object.
//!
//! ## Layers
//! - [`core`]: varints, packet capabilities, single-frame writer and reader
//! - [`protocol`]: per-stream codec with a persistent decompressor, list decoders
//! - [`transport`]: the byte-stream contract plus pipe and socket transports
//! - [`utils`]: snappy helpers, logging setup, metrics
//!
//! ## Example
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use snappy_stream_codec::core::serialization::Bincoded;
//! use snappy_stream_codec::protocol::StreamCodec;
//! use snappy_stream_codec::transport::local::pipe;
//!
//! #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
//! struct Ping {
//!     seq: u64,
//! }
//!
//! let (a, b) = pipe("/eth2/beacon_chain/req/ping/1/ssz_snappy");
//! let mut requester = StreamCodec::new(a);
//! let mut responder = StreamCodec::new(b);
//!
//! requester.write_packet(&Bincoded(Ping { seq: 7 }), &[]).unwrap();
//!
//! let mut ping = Bincoded(Ping::default());
//! let ctx = responder.decode(&mut ping).unwrap();
//! assert_eq!(ctx.protocol(), "/eth2/beacon_chain/req/ping/1/ssz_snappy");
//! assert_eq!(ping.seq, 7);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod transport;
pub mod utils;

pub use crate::core::packet::{Decode, Encode, Packet, Size};
pub use error::{CodecError, Phase, Result};
pub use protocol::{StreamCodec, StreamContext};

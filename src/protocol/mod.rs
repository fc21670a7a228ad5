//! # Protocol Layer
//!
//! Stream-level operations built on the core frame codec.
//!
//! - [`stream::StreamCodec`]: one transport, one persistent decompressor
//! - [`list`]: per-item and uniform batch decoders for multi-item responses

pub mod list;
pub mod stream;

pub use list::{decode_list_per_item, decode_list_uniform};
pub use stream::{StreamCodec, StreamContext};

#[cfg(test)]
mod tests;

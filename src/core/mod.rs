//! # Core Codec Components
//!
//! Low-level framing: varints, packet capabilities, and the frame writer/reader.
//!
//! ## Components
//! - **Varint**: unsigned LEB128 length prefixes
//! - **Packet**: `Size` / `Encode` / `Decode` capabilities and the `Packet` query
//! - **Serialization**: bincode adapter for serde types
//! - **Frame**: single-object frame writer and fork-digest frame reader
//!
//! ## Wire Format
//! ```text
//! [Prefix(0+)] [Varint(N)] [Snappy stream of N bytes]
//! ```
//!
//! ## Security
//! - Declared lengths are compared against expected sizes or a limit before allocation
//! - The writer refuses objects whose encoding disagrees with their reported size

pub mod frame;
pub mod packet;
pub mod serialization;
pub mod varint;

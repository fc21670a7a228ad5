//! # Error Types
//!
//! Error handling for the stream codec.
//!
//! Every variant identifies the phase of a frame that produced it, so callers can
//! tell a broken transport from a malformed length prefix or a payload that the
//! target type refused to parse.
//!
//! ## Error Categories
//! - **Transport**: raw reads, writes and closes on the underlying stream
//! - **Framing**: fork digest prefix and varint length prefix
//! - **Length**: declared length disagrees with an expected size or limit
//! - **Payload**: snappy stream truncated or corrupt
//! - **Object**: the serialization capability failed to encode or decode
//!
//! Nothing is retried internally. Every error goes back to the immediate caller.
//!
//! ## Example Usage
//! ```rust
//! use snappy_stream_codec::error::{CodecError, Phase, Result};
//!
//! fn check(declared: u64, expected: u64) -> Result<()> {
//!     if declared != expected {
//!         return Err(CodecError::LengthMismatch { expected, got: declared });
//!     }
//!     Ok(())
//! }
//!
//! let err = check(4, 3).unwrap_err();
//! assert_eq!(err.phase(), Phase::Length);
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Error produced by a serialization capability (`Encode` / `Decode`).
pub type ObjectError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Frame phase an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Raw stream I/O outside of frame parsing
    Transport,
    /// Fork digest prefix
    Prefix,
    /// Varint length prefix and length checks
    Length,
    /// Compressed payload
    Payload,
    /// Target object decode routine
    Decode,
    /// Object serialization on the write path
    Encode,
    /// Codec configuration
    Config,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Transport => "transport",
            Phase::Prefix => "prefix",
            Phase::Length => "length",
            Phase::Payload => "payload",
            Phase::Decode => "decode",
            Phase::Encode => "encode",
            Phase::Config => "config",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// CodecError is the error type for every codec operation
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    #[error("Unable to read fork digest: {0}")]
    ForkDigest(#[source] io::Error),

    #[error("Unable to read varint from message prefix: {0}")]
    Framing(#[source] io::Error),

    #[error("Encoded length exceeds limit: {size} bytes (max: {max})")]
    OversizedPayload { size: u64, max: usize },

    #[error("Encoded length not equal to expected size: want {expected}, got {got}")]
    LengthMismatch { expected: u64, got: u64 },

    #[error("List length mismatch: want {expected} slots, got {got}")]
    SlotCountMismatch { expected: u64, got: u64 },

    #[error("Decompression failed: {0}")]
    Decompression(#[source] io::Error),

    #[error("Compression failed: {0}")]
    Compression(#[source] io::Error),

    #[error("Unable to unmarshal message: {0}")]
    Decode(#[source] ObjectError),

    #[error("Unable to marshal message: {0}")]
    Encode(#[source] ObjectError),

    #[error("List item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<CodecError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CodecError {
    /// Phase of the frame that produced this error.
    pub fn phase(&self) -> Phase {
        match self {
            CodecError::Transport(_) => Phase::Transport,
            CodecError::ForkDigest(_) => Phase::Prefix,
            CodecError::Framing(_)
            | CodecError::OversizedPayload { .. }
            | CodecError::LengthMismatch { .. }
            | CodecError::SlotCountMismatch { .. } => Phase::Length,
            CodecError::Decompression(_) => Phase::Payload,
            CodecError::Decode(_) => Phase::Decode,
            CodecError::Encode(_) | CodecError::Compression(_) => Phase::Encode,
            CodecError::Item { source, .. } => source.phase(),
            CodecError::Config(_) => Phase::Config,
        }
    }

    /// Attach the index of the list item being decoded.
    pub(crate) fn at_item(self, index: usize) -> Self {
        CodecError::Item {
            index,
            source: Box::new(self),
        }
    }

    /// True when the peer ended the stream before the frame was complete.
    pub fn is_unexpected_eof(&self) -> bool {
        match self {
            CodecError::Transport(e)
            | CodecError::ForkDigest(e)
            | CodecError::Framing(e)
            | CodecError::Decompression(e) => e.kind() == io::ErrorKind::UnexpectedEof,
            CodecError::Item { source, .. } => source.is_unexpected_eof(),
            _ => false,
        }
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

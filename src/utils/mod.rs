//! # Utility Modules
//!
//! Supporting utilities for compression, logging, and observability.
//!
//! ## Components
//! - **Compression**: snappy framing-format stream helpers
//! - **Logging**: `tracing-subscriber` setup driven by `LoggingConfig`
//! - **Metrics**: thread-safe codec counters
//!
//! ## Security
//! - Declared lengths are bounded before allocation (16MB default)
//! - Whole-stream decompression is capped at the same limit

pub mod compression;
pub mod logging;
pub mod metrics;

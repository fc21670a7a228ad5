//! # Transport Contract
//!
//! The codec runs over any ordered, bidirectional byte stream that supports a
//! half-duplex shutdown and knows which protocol was negotiated on it.
//!
//! ## Implementations
//! - **Local**: in-process duplex pipe ([`local::pipe`])
//! - **Net**: `std::net::TcpStream` and, on Unix, `UnixStream`
//!
//! Establishing the connection and negotiating the protocol happen elsewhere;
//! a transport arrives here already connected.

use std::io::{self, Read, Write};

pub mod local;
pub mod net;

/// Ordered byte stream carrying codec frames.
///
/// `Read` and `Write` keep their usual semantics, including short reads and
/// writes. Closing one direction must leave the other usable.
pub trait Transport: Read + Write {
    /// Protocol identifier negotiated for this stream.
    fn protocol(&self) -> &str;

    /// Close both directions.
    fn close(&mut self) -> io::Result<()>;

    /// Close the write half. The peer observes end of stream; reads continue.
    fn close_write(&mut self) -> io::Result<()>;

    /// Close the read half. Writes continue.
    fn close_read(&mut self) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn protocol(&self) -> &str {
        (**self).protocol()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }

    fn close_write(&mut self) -> io::Result<()> {
        (**self).close_write()
    }

    fn close_read(&mut self) -> io::Result<()> {
        (**self).close_read()
    }
}

//! Socket transports.
//!
//! Thin wrappers pairing a connected socket with the protocol identifier that
//! was negotiated on it. Half-closes map to `shutdown(Write)` and
//! `shutdown(Read)`.
//!
//! A blocked read is cancelled by shutting the socket down through a handle
//! from [`TcpTransport::shutdown_handle`] on another thread.

use super::Transport;
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
#[cfg(unix)]
use std::path::Path;
use tracing::debug;

macro_rules! socket_transport {
    ($name:ident, $socket:ty) => {
        impl $name {
            /// Wrap an already connected socket.
            pub fn new(stream: $socket, protocol: impl Into<String>) -> Self {
                Self {
                    stream,
                    protocol: protocol.into(),
                }
            }

            /// Clone of the socket that can shut it down from another thread.
            pub fn shutdown_handle(&self) -> io::Result<$socket> {
                self.stream.try_clone()
            }

            pub fn get_ref(&self) -> &$socket {
                &self.stream
            }

            pub fn into_inner(self) -> $socket {
                self.stream
            }
        }

        impl Read for $name {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.stream.read(buf)
            }
        }

        impl Write for $name {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.stream.write(buf)
            }

            fn flush(&mut self) -> io::Result<()> {
                self.stream.flush()
            }
        }

        impl Transport for $name {
            fn protocol(&self) -> &str {
                &self.protocol
            }

            fn close(&mut self) -> io::Result<()> {
                debug!(protocol = %self.protocol, "Closing socket");
                self.stream.shutdown(Shutdown::Both)
            }

            fn close_write(&mut self) -> io::Result<()> {
                debug!(protocol = %self.protocol, "Closing socket write half");
                self.stream.shutdown(Shutdown::Write)
            }

            fn close_read(&mut self) -> io::Result<()> {
                debug!(protocol = %self.protocol, "Closing socket read half");
                self.stream.shutdown(Shutdown::Read)
            }
        }
    };
}

/// TCP stream carrying codec frames.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    protocol: String,
}

impl TcpTransport {
    /// Connect to `addr` and tag the stream with `protocol`.
    pub fn connect<A: ToSocketAddrs>(addr: A, protocol: impl Into<String>) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream, protocol))
    }
}

socket_transport!(TcpTransport, TcpStream);

/// Unix domain socket carrying codec frames.
#[cfg(unix)]
#[derive(Debug)]
pub struct UnixTransport {
    stream: UnixStream,
    protocol: String,
}

#[cfg(unix)]
impl UnixTransport {
    /// Connect to the socket at `path` and tag the stream with `protocol`.
    pub fn connect<P: AsRef<Path>>(path: P, protocol: impl Into<String>) -> io::Result<Self> {
        Ok(Self::new(UnixStream::connect(path)?, protocol))
    }

    /// Connected pair of transports, both tagged with `protocol`.
    pub fn pair(protocol: &str) -> io::Result<(Self, Self)> {
        let (a, b) = UnixStream::pair()?;
        Ok((Self::new(a, protocol), Self::new(b, protocol)))
    }
}

#[cfg(unix)]
socket_transport!(UnixTransport, UnixStream);

//! In-process duplex pipe.
//!
//! [`pipe`] returns two connected endpoints. Each direction is an unbounded
//! byte queue guarded by a mutex and a condvar, so reads block until data
//! arrives, the writer closes its half (end of stream), or the reader's own
//! read half is closed (error).
//!
//! A [`PipeCloser`] closes an endpoint from another thread, which is how a
//! blocked decode gets cancelled.

use super::Transport;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct ChannelState {
    buf: VecDeque<u8>,
    writer_closed: bool,
    reader_closed: bool,
}

#[derive(Debug, Default)]
struct Channel {
    state: Mutex<ChannelState>,
    readable: Condvar,
}

impl Channel {
    fn lock(&self) -> io::Result<MutexGuard<'_, ChannelState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "pipe lock poisoned"))
    }

    fn close_writer(&self) -> io::Result<()> {
        self.lock()?.writer_closed = true;
        self.readable.notify_all();
        Ok(())
    }

    fn close_reader(&self) -> io::Result<()> {
        let mut state = self.lock()?;
        state.reader_closed = true;
        state.buf.clear();
        drop(state);
        self.readable.notify_all();
        Ok(())
    }
}

/// One end of an in-process duplex pipe.
#[derive(Debug)]
pub struct MemoryStream {
    inbound: Arc<Channel>,
    outbound: Arc<Channel>,
    protocol: String,
}

/// Create a connected pair of endpoints that both report `protocol`.
pub fn pipe(protocol: &str) -> (MemoryStream, MemoryStream) {
    let a_to_b = Arc::new(Channel::default());
    let b_to_a = Arc::new(Channel::default());

    let a = MemoryStream {
        inbound: b_to_a.clone(),
        outbound: a_to_b.clone(),
        protocol: protocol.to_string(),
    };
    let b = MemoryStream {
        inbound: a_to_b,
        outbound: b_to_a,
        protocol: protocol.to_string(),
    };
    (a, b)
}

impl MemoryStream {
    /// Handle that closes this endpoint from any thread.
    pub fn closer(&self) -> PipeCloser {
        PipeCloser {
            inbound: self.inbound.clone(),
            outbound: self.outbound.clone(),
        }
    }

    /// Bytes queued for this endpoint and not yet read.
    pub fn pending(&self) -> usize {
        self.inbound.lock().map(|s| s.buf.len()).unwrap_or(0)
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut state = self.inbound.lock()?;
        loop {
            if state.reader_closed {
                return Err(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "read half closed",
                ));
            }
            if !state.buf.is_empty() {
                let n = buf.len().min(state.buf.len());
                for (dst, src) in buf.iter_mut().zip(state.buf.drain(..n)) {
                    *dst = src;
                }
                return Ok(n);
            }
            if state.writer_closed {
                return Ok(0);
            }
            state = self
                .inbound
                .readable
                .wait(state)
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "pipe lock poisoned"))?;
        }
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.outbound.lock()?;
        if state.writer_closed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write half closed",
            ));
        }
        if state.reader_closed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "peer closed its read half",
            ));
        }
        state.buf.extend(buf);
        drop(state);
        self.outbound.readable.notify_all();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for MemoryStream {
    fn protocol(&self) -> &str {
        &self.protocol
    }

    fn close(&mut self) -> io::Result<()> {
        self.closer().close()
    }

    fn close_write(&mut self) -> io::Result<()> {
        debug!(protocol = %self.protocol, "Closing pipe write half");
        self.outbound.close_writer()
    }

    fn close_read(&mut self) -> io::Result<()> {
        debug!(protocol = %self.protocol, "Closing pipe read half");
        self.inbound.close_reader()
    }
}

impl Drop for MemoryStream {
    fn drop(&mut self) {
        let _ = self.outbound.close_writer();
        let _ = self.inbound.close_reader();
    }
}

/// Cross-thread close handle for a [`MemoryStream`].
#[derive(Debug, Clone)]
pub struct PipeCloser {
    inbound: Arc<Channel>,
    outbound: Arc<Channel>,
}

impl PipeCloser {
    /// Close both directions of the endpoint, waking any blocked reader.
    pub fn close(&self) -> io::Result<()> {
        self.outbound.close_writer()?;
        self.inbound.close_reader()
    }
}

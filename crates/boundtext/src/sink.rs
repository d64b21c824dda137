//! Byte sinks.
//!
//! Every renderer in this crate (scalar printing, the printf engine,
//! `core::fmt` adapters) funnels its output through [`ByteSink::put`]. Sinks
//! may refuse bytes once full; renderers keep offering bytes anyway so that
//! counting adapters can report the untruncated length.

use core::fmt;

/// A destination that accepts one byte at a time.
pub trait ByteSink {
    /// Offers `byte` to the sink. Returns `false` if it was dropped.
    fn put(&mut self, byte: u8) -> bool;

    /// Offers every byte of `bytes`, returning how many were stored.
    fn put_slice(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&b| self.put(b)).count()
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn put(&mut self, byte: u8) -> bool {
        (**self).put(byte)
    }

    fn put_slice(&mut self, bytes: &[u8]) -> usize {
        (**self).put_slice(bytes)
    }
}

#[cfg(feature = "alloc")]
impl ByteSink for alloc::vec::Vec<u8> {
    fn put(&mut self, byte: u8) -> bool {
        self.push(byte);
        true
    }

    fn put_slice(&mut self, bytes: &[u8]) -> usize {
        self.extend_from_slice(bytes);
        bytes.len()
    }
}

/// Bounded snprintf-style window over a slice.
///
/// At most `buf.len() - 1` bytes are stored; the slot after the last stored
/// byte is reserved for the terminator written by [`Window::terminate`]. An
/// empty window stores nothing and is never terminated.
pub(crate) struct Window<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl<'b> Window<'b> {
    pub(crate) fn new(buf: &'b mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Writes the terminator after the stored bytes and returns how many
    /// bytes were stored.
    pub(crate) fn terminate(self) -> usize {
        if let Some(slot) = self.buf.get_mut(self.pos) {
            *slot = 0;
        }
        self.pos
    }
}

impl ByteSink for Window<'_> {
    fn put(&mut self, byte: u8) -> bool {
        if self.pos + 1 < self.buf.len() {
            self.buf[self.pos] = byte;
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn put_slice(&mut self, bytes: &[u8]) -> usize {
        let room = self.buf.len().saturating_sub(self.pos + 1);
        let n = bytes.len().min(room);
        self.buf[self.pos..self.pos + n].copy_from_slice(&bytes[..n]);
        self.pos += n;
        n
    }
}

/// Counts every byte offered to the wrapped sink, stored or not.
pub(crate) struct Tally<S> {
    inner: S,
    offered: usize,
}

impl<S: ByteSink> Tally<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner, offered: 0 }
    }

    pub(crate) fn offered(&self) -> usize {
        self.offered
    }
}

impl<S: ByteSink> ByteSink for Tally<S> {
    fn put(&mut self, byte: u8) -> bool {
        self.offered += 1;
        self.inner.put(byte)
    }

    fn put_slice(&mut self, bytes: &[u8]) -> usize {
        self.offered += bytes.len();
        self.inner.put_slice(bytes)
    }
}

/// Drops everything. Paired with [`Tally`] to measure a rendering.
pub(crate) struct Discard;

impl ByteSink for Discard {
    fn put(&mut self, _byte: u8) -> bool {
        false
    }

    fn put_slice(&mut self, _bytes: &[u8]) -> usize {
        0
    }
}

/// Forwards at most `limit` bytes; the rest are dropped.
pub(crate) struct Take<S> {
    inner: S,
    limit: usize,
}

impl<S: ByteSink> Take<S> {
    pub(crate) fn new(inner: S, limit: usize) -> Self {
        Self { inner, limit }
    }
}

impl<S: ByteSink> ByteSink for Take<S> {
    fn put(&mut self, byte: u8) -> bool {
        if self.limit == 0 {
            return false;
        }
        self.limit -= 1;
        self.inner.put(byte)
    }
}

/// Lets `core::fmt` machinery write into any [`ByteSink`]. Never fails.
pub(crate) struct FmtSink<S>(pub(crate) S);

impl<S: ByteSink> fmt::Write for FmtSink<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.put_slice(s.as_bytes());
        Ok(())
    }
}

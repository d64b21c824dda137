//! Read-only byte sources.
//!
//! Targets with split program/data memory (AVR and friends) keep constant
//! strings in flash, which has to be read through dedicated load
//! instructions rather than ordinary pointer dereferences. [`ReadOnlySource`]
//! is the seam for that: implement it over your platform's flash accessor
//! and hand it to [`TextBuffer::format_rom`](crate::TextBuffer::format_rom)
//! or [`TextBuffer::append_rom`](crate::TextBuffer::append_rom). On
//! unified-memory targets the provided impls for `str`, `[u8]`, `CStr` and
//! [`Flash`] are plain loads.

use core::{ffi::CStr, iter::FusedIterator};

/// A NUL-terminated (or length-bounded) byte string living in memory that can
/// only be read byte by byte.
pub trait ReadOnlySource {
    /// Reads the byte at `offset`, or `None` past the end of the region.
    fn read_byte(&self, offset: usize) -> Option<u8>;

    /// Iterates the bytes up to, not including, the first NUL or the end of
    /// the region.
    fn bytes(&self) -> RomBytes<'_, Self> {
        RomBytes {
            source: self,
            offset: 0,
        }
    }
}

impl ReadOnlySource for [u8] {
    fn read_byte(&self, offset: usize) -> Option<u8> {
        self.get(offset).copied()
    }
}

impl ReadOnlySource for str {
    fn read_byte(&self, offset: usize) -> Option<u8> {
        self.as_bytes().get(offset).copied()
    }
}

impl ReadOnlySource for CStr {
    fn read_byte(&self, offset: usize) -> Option<u8> {
        self.to_bytes().get(offset).copied()
    }
}

impl<S: ReadOnlySource + ?Sized> ReadOnlySource for &S {
    fn read_byte(&self, offset: usize) -> Option<u8> {
        (**self).read_byte(offset)
    }
}

/// A string placed in read-only memory.
///
/// On unified-memory targets this is a thin wrapper over a static byte slice;
/// it exists so call sites read the same on every platform.
///
/// ```rust
/// use boundtext::{Flash, TextBuffer, values};
///
/// static GREETING: Flash<'static> = Flash::new(b"hello %s\0");
///
/// let mut storage = [0u8; 16];
/// let mut text = TextBuffer::new(&mut storage);
/// text.format_rom(&GREETING, &values!["rom"]);
/// assert_eq!(text, "hello rom");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash<'a>(&'a [u8]);

impl<'a> Flash<'a> {
    /// Wraps `bytes`. A trailing NUL is optional.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Flash(bytes)
    }
}

impl ReadOnlySource for Flash<'_> {
    fn read_byte(&self, offset: usize) -> Option<u8> {
        self.0.get(offset).copied()
    }
}

/// Iterator over a [`ReadOnlySource`], stopping at the first NUL.
#[derive(Debug)]
pub struct RomBytes<'s, S: ?Sized> {
    source: &'s S,
    offset: usize,
}

impl<S: ReadOnlySource + ?Sized> Iterator for RomBytes<'_, S> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let byte = self.source.read_byte(self.offset).filter(|&b| b != 0)?;
        self.offset += 1;
        Some(byte)
    }
}

impl<S: ReadOnlySource + ?Sized> FusedIterator for RomBytes<'_, S> {}

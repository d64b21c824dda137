use core::{ffi::CStr, fmt, ops::AddAssign};

use bstr::BStr;

use crate::{
    options::PrintOptions,
    printf, render,
    rom::ReadOnlySource,
    sink::{ByteSink, Window},
    storage::Storage,
    value::{Printable, Value},
};

/// A fixed-capacity, always NUL-terminated text buffer.
///
/// The buffer either borrows caller memory or owns an allocation of its own
/// (with the `alloc` feature). One byte of the capacity is reserved for the
/// terminator, so at most `capacity() - 1` bytes of text are kept.
///
/// Nothing here fails loudly: writes that do not fit are truncated or
/// dropped, and a zero-capacity buffer silently ignores everything. The
/// buffer is never written past its end and `as_bytes_with_nul()` always ends
/// in exactly one NUL.
///
/// # Examples
///
/// ```rust
/// use boundtext::{Modifier, TextBuffer};
///
/// let mut storage = [0u8; 8];
/// let mut text = TextBuffer::new(&mut storage);
///
/// text.append("ab");
/// text += "cd";
/// assert_eq!(text, "abcd");
///
/// text.assign((255, Modifier::HEX));
/// assert_eq!(text, "ff");
///
/// // Capacity 8 keeps 7 bytes of text.
/// text.assign("overflowing");
/// assert_eq!(text, "overflo");
/// ```
#[derive(Default)]
pub struct TextBuffer<'a> {
    storage: Storage<'a>,
    cursor: usize,
    options: PrintOptions,
}

impl<'a> TextBuffer<'a> {
    /// Borrows all of `buffer`. The buffer is zeroed.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        let size = buffer.len();
        Self::from_parts(Some(buffer), size)
    }

    /// Allocates a zeroed buffer of `size` bytes, released when the
    /// `TextBuffer` is dropped or rebound. `size == 0` allocates nothing.
    #[cfg(feature = "alloc")]
    #[must_use]
    pub fn with_capacity(size: usize) -> Self {
        Self::from_parts(None, size)
    }

    /// Binds `size` bytes of `buffer`, or allocates `size` bytes when
    /// `buffer` is `None`.
    ///
    /// A borrowed buffer shorter than `size` is only used up to its length.
    /// A zero size, or `None` without the `alloc` feature, gives an inert
    /// buffer.
    pub fn from_parts(buffer: Option<&'a mut [u8]>, size: usize) -> Self {
        let mut text = TextBuffer {
            storage: Storage::bind(buffer, size),
            cursor: 0,
            options: PrintOptions::default(),
        };
        text.reset();
        text
    }

    /// Like [`from_parts`](Self::from_parts), then renders `value` into the
    /// fresh buffer.
    pub fn with_value<'v>(
        buffer: Option<&'a mut [u8]>,
        size: usize,
        value: impl Into<Printable<'v>>,
    ) -> Self {
        let mut text = Self::from_parts(buffer, size);
        text.append(value);
        text
    }

    /// Replaces the rendering options.
    #[must_use]
    pub fn with_options(mut self, options: PrintOptions) -> Self {
        self.options = options;
        self
    }

    /// The rendering options in effect.
    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    /// Replaces the rendering options. Existing text is kept.
    pub fn set_options(&mut self, options: PrintOptions) {
        self.options = options;
    }

    /// Discards all text and zeroes the whole buffer.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.storage.bytes_mut().fill(0);
    }

    /// Alias for [`reset`](Self::reset).
    pub fn clear(&mut self) {
        self.reset();
    }

    /// Rebinds to new storage following the rules of
    /// [`from_parts`](Self::from_parts).
    ///
    /// Previously owned memory is released before the new storage is bound;
    /// previously borrowed memory is simply let go. The buffer is reset.
    pub fn set_buffer(&mut self, buffer: Option<&'a mut [u8]>, size: usize) {
        #[cfg(feature = "log")]
        log::trace!(
            "rebinding text buffer ({} bytes, owned: {}) to {size} bytes",
            self.capacity(),
            self.is_owned(),
        );
        self.storage = Storage::Inert;
        self.storage = Storage::bind(buffer, size);
        self.reset();
    }

    /// Whether the storage was allocated by this buffer.
    pub fn is_owned(&self) -> bool {
        self.storage.is_owned()
    }

    /// Appends one byte if it fits alongside the terminator.
    ///
    /// Returns `false` when the buffer is full; the byte is dropped and the
    /// buffer is unchanged.
    pub fn append_byte(&mut self, byte: u8) -> bool {
        let cursor = self.cursor;
        let bytes = self.storage.bytes_mut();
        if cursor + 1 < bytes.len() {
            bytes[cursor] = byte;
            bytes[cursor + 1] = 0;
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Appends as much of `bytes` as fits and returns how many were stored.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let cursor = self.cursor;
        let buf = self.storage.bytes_mut();
        let n = bytes.len().min(buf.len().saturating_sub(cursor + 1));
        if n > 0 {
            buf[cursor..cursor + n].copy_from_slice(&bytes[..n]);
            buf[cursor + n] = 0;
            self.cursor += n;
        }
        n
    }

    /// Appends printf-style formatted text.
    ///
    /// Output that does not fit is truncated. The return value is the length
    /// the complete rendering would have had, which may exceed what was
    /// stored; use [`len`](Self::len) for the stored length. See the
    /// [`tformat!`](crate::tformat) macro for a shorthand that converts the
    /// arguments.
    ///
    /// ```rust
    /// use boundtext::{TextBuffer, values};
    ///
    /// let mut storage = [0u8; 32];
    /// let mut text = TextBuffer::new(&mut storage);
    /// text.format("%-6s|%05.1f|%#x", &values!["id", 3.14159, 255]);
    /// assert_eq!(text, "id    |003.1|0xff");
    /// ```
    pub fn format(&mut self, pattern: &str, args: &[Value<'_>]) -> usize {
        self.format_bytes(pattern.bytes(), args)
    }

    /// [`format`](Self::format) with a pattern read from read-only memory.
    pub fn format_rom<S>(&mut self, pattern: &S, args: &[Value<'_>]) -> usize
    where
        S: ReadOnlySource + ?Sized,
    {
        self.format_bytes(pattern.bytes(), args)
    }

    fn format_bytes(&mut self, pattern: impl IntoIterator<Item = u8>, args: &[Value<'_>]) -> usize {
        let start = self.cursor;
        let options = self.options;
        let mut window = Window::new(&mut self.storage.bytes_mut()[start..]);
        let rendered = printf::format(&mut window, pattern, args, &options);
        window.terminate();
        self.resync_cursor(start);
        rendered
    }

    /// Re-derives the cursor from the terminator after a formatting call.
    ///
    /// The formatter's reported length counts bytes that never fit, and an
    /// embedded NUL (`%c` of `0`) ends the text early, so the stored text is
    /// whatever lies before the first NUL at or after `from`.
    fn resync_cursor(&mut self, from: usize) {
        let bytes = self.storage.bytes_mut();
        if bytes.is_empty() {
            self.cursor = 0;
            return;
        }
        match bytes[from..].iter().position(|&b| b == 0) {
            Some(offset) => self.cursor = from + offset,
            None => {
                let last = bytes.len() - 1;
                bytes[last] = 0;
                self.cursor = last;
            }
        }
    }

    /// Copies a NUL-terminated string out of read-only memory, stopping at
    /// its terminator or when the buffer is full. Returns the number of bytes
    /// copied.
    pub fn append_rom<S>(&mut self, source: &S) -> usize
    where
        S: ReadOnlySource + ?Sized,
    {
        let mut copied = 0;
        for byte in source.bytes() {
            if !self.append_byte(byte) {
                break;
            }
            copied += 1;
        }
        copied
    }

    /// Number of stored bytes, excluding the terminator.
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Whether no text is stored.
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Total size of the buffer in bytes, terminator slot included.
    pub fn capacity(&self) -> usize {
        self.storage.bytes().len()
    }

    /// How many more bytes of text fit.
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.cursor + 1)
    }

    /// The stored text, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.bytes()[..self.cursor]
    }

    /// The stored text followed by its terminator. Empty for an inert
    /// buffer.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        let bytes = self.storage.bytes();
        if bytes.is_empty() {
            bytes
        } else {
            &bytes[..=self.cursor]
        }
    }

    /// The stored text as a byte string.
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    /// The stored text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    /// The buffer as a C string. Text after an embedded NUL is not part of
    /// the view.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(self.as_bytes_with_nul()).unwrap_or(c"")
    }

    /// Whether the stored text is exactly `other`. An inert buffer equals
    /// nothing, not even the empty string.
    pub fn equals(&self, other: impl AsRef<[u8]>) -> bool {
        self.capacity() > 0 && self.as_bytes() == other.as_ref()
    }

    /// Replaces the contents with the rendering of `value`.
    pub fn assign<'v>(&mut self, value: impl Into<Printable<'v>>) -> &mut Self {
        self.reset();
        self.append(value)
    }

    /// Appends the rendering of `value`.
    pub fn append<'v>(&mut self, value: impl Into<Printable<'v>>) -> &mut Self {
        let options = self.options;
        render::render(&mut *self, value.into(), &options);
        self
    }

    /// Appends the rendering of `value` followed by a line ending.
    pub fn append_line<'v>(&mut self, value: impl Into<Printable<'v>>) -> &mut Self {
        self.append(value).newline()
    }

    /// Appends the configured line ending.
    pub fn newline(&mut self) -> &mut Self {
        self.write_bytes(self.options.line_ending.as_bytes());
        self
    }
}

impl ByteSink for TextBuffer<'_> {
    fn put(&mut self, byte: u8) -> bool {
        self.append_byte(byte)
    }

    fn put_slice(&mut self, bytes: &[u8]) -> usize {
        self.write_bytes(bytes)
    }
}

/// `write!` support. Truncates like every other write and never returns an
/// error.
impl fmt::Write for TextBuffer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

impl<'v, T: Into<Printable<'v>>> AddAssign<T> for TextBuffer<'_> {
    fn add_assign(&mut self, value: T) {
        self.append(value);
    }
}

impl PartialEq<str> for TextBuffer<'_> {
    fn eq(&self, other: &str) -> bool {
        self.equals(other)
    }
}

impl PartialEq<&str> for TextBuffer<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.equals(other)
    }
}

impl PartialEq<[u8]> for TextBuffer<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for TextBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.as_bstr())
            .field("capacity", &self.capacity())
            .field("owned", &self.is_owned())
            .finish()
    }
}

impl fmt::Display for TextBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TextBuffer<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_bytes(self.as_bytes()),
        }
    }
}

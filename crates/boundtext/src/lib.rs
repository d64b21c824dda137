//! A fixed-capacity text buffer for memory-constrained targets.
//!
//! [`TextBuffer`] wraps a caller-supplied (or self-allocated) byte buffer,
//! keeps it NUL-terminated at all times, and offers printf-style formatting,
//! single-byte appends and rendering of scalar values. Writes that do not fit
//! are silently truncated: no operation ever panics, allocates behind the
//! caller's back, or writes past the end of the buffer.
//!
//! ```rust
//! use boundtext::{Modifier, TextBuffer, tformat};
//!
//! let mut storage = [0u8; 16];
//! let mut text = TextBuffer::new(&mut storage);
//!
//! tformat!(text, "%d-%d", 1, 2);
//! assert_eq!(text, "1-2");
//!
//! text.assign((3.5, Modifier::Digits(2)));
//! assert_eq!(text, "3.50");
//! ```

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod error;
mod options;
mod printf;
mod render;
mod rom;
mod sink;
mod storage;
mod value;

#[cfg(all(test, feature = "alloc"))]
mod tests;

pub use buffer::TextBuffer;
pub use options::{BoolStyle, LineEnding, PrintOptions};
pub use rom::{Flash, ReadOnlySource, RomBytes};
pub use sink::ByteSink;
pub use value::{Modifier, Printable, Value};

/// Builds a `[Value; N]` argument array from a heterogeneous list of scalars.
///
/// ```rust
/// # use boundtext::{values, Value};
/// let args = values![7, "seven", 'x'];
/// assert_eq!(args[0], Value::Int(7));
/// assert_eq!(args[2], Value::Char('x'));
/// ```
#[macro_export]
macro_rules! values {
    ( $( $arg:expr ),* $(,)? ) => {
        [$($crate::Value::from($arg)),*]
    };
}

/// printf-style append into a [`TextBuffer`], converting each argument with
/// [`Value::from`].
///
/// Expands to [`TextBuffer::format`] and yields the untruncated length of the
/// rendering.
///
/// ```rust
/// # use boundtext::{TextBuffer, tformat};
/// let mut storage = [0u8; 3];
/// let mut text = TextBuffer::new(&mut storage);
/// assert_eq!(tformat!(text, "%d-%d", 1, 2), 3);
/// assert_eq!(text, "1-");
/// ```
#[macro_export]
macro_rules! tformat {
    ($buf:expr, $pattern:expr $(, $arg:expr )* $(,)?) => {
        $buf.format($pattern, &$crate::values![$($arg),*])
    };
}

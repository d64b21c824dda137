/// Configuration for how a [`TextBuffer`](crate::TextBuffer) renders scalar
/// values passed to [`assign`](crate::TextBuffer::assign),
/// [`append`](crate::TextBuffer::append) and `%s` directives.
///
/// # Examples
///
/// ```rust
/// use boundtext::{BoolStyle, LineEnding, PrintOptions, TextBuffer};
///
/// let mut storage = [0u8; 32];
/// let mut text = TextBuffer::new(&mut storage).with_options(PrintOptions {
///     float_digits: 4,
///     line_ending: LineEnding::Lf,
///     bool_style: BoolStyle::Digits,
/// });
/// text.append(1.5).append(' ').append(true);
/// assert_eq!(text, "1.5000 1");
/// ```
///
/// # Default
///
/// Two decimal digits for floats, `"\r\n"` line endings and booleans rendered
/// as words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Number of digits after the decimal point used for floats that carry
    /// no [`Modifier`](crate::Modifier).
    ///
    /// # Default
    ///
    /// `2`
    pub float_digits: u8,

    /// Line terminator emitted by
    /// [`append_line`](crate::TextBuffer::append_line) and
    /// [`newline`](crate::TextBuffer::newline).
    ///
    /// # Default
    ///
    /// [`LineEnding::CrLf`]
    pub line_ending: LineEnding,

    /// How booleans are spelled.
    ///
    /// # Default
    ///
    /// [`BoolStyle::Words`]
    pub bool_style: BoolStyle,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            float_digits: 2,
            line_ending: LineEnding::default(),
            bool_style: BoolStyle::default(),
        }
    }
}

/// Line terminator written after a line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `"\r\n"`, the serial-console convention.
    #[default]
    CrLf,
    /// `"\n"`.
    Lf,
}

impl LineEnding {
    pub(crate) fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::CrLf => b"\r\n",
            LineEnding::Lf => b"\n",
        }
    }
}

/// Spelling of boolean values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolStyle {
    /// `true` / `false`
    #[default]
    Words,
    /// `1` / `0`
    Digits,
}

impl BoolStyle {
    pub(crate) fn spell(self, value: bool) -> &'static [u8] {
        match (self, value) {
            (BoolStyle::Words, true) => b"true",
            (BoolStyle::Words, false) => b"false",
            (BoolStyle::Digits, true) => b"1",
            (BoolStyle::Digits, false) => b"0",
        }
    }
}

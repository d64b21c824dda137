use bstr::BStr;

/// A scalar that can be rendered as text.
///
/// This is the closed set of argument types understood by
/// [`TextBuffer::format`](crate::TextBuffer::format) and by the generic
/// [`assign`](crate::TextBuffer::assign) / [`append`](crate::TextBuffer::append)
/// entry points. Every Rust primitive converts into one of these variants via
/// [`From`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// A signed integer of any width.
    Int(i64),
    /// An unsigned integer of any width.
    UInt(u64),
    /// A floating point number of any width.
    Float(f64),
    /// A byte string, written verbatim.
    Str(&'a BStr),
    /// A single character, written as UTF-8.
    Char(char),
    /// A boolean, spelled according to [`BoolStyle`](crate::BoolStyle).
    Bool(bool),
}

impl<'a> Value<'a> {
    /// Coerces the value to a signed integer the way an integer conversion
    /// directive reads its argument.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub(crate) fn as_i64(&self) -> i64 {
        match *self {
            Value::Int(n) => n,
            Value::UInt(n) => n as i64,
            Value::Float(f) => f as i64,
            Value::Char(c) => i64::from(u32::from(c)),
            Value::Bool(b) => i64::from(b),
            Value::Str(_) => 0,
        }
    }

    /// Same as [`Value::as_i64`] but reinterpreted as unsigned, so `-1` reads
    /// as `u64::MAX`.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub(crate) fn as_u64(&self) -> u64 {
        match *self {
            Value::UInt(n) => n,
            Value::Float(f) if f >= 0.0 => f as u64,
            other => other.as_i64() as u64,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn as_f64(&self) -> f64 {
        match *self {
            Value::Int(n) => n as f64,
            Value::UInt(n) => n as f64,
            Value::Float(f) => f,
            Value::Char(c) => f64::from(u32::from(c)),
            Value::Bool(b) => f64::from(u8::from(b)),
            Value::Str(_) => 0.0,
        }
    }

    /// Attaches a formatting modifier.
    #[must_use]
    pub fn with(self, modifier: Modifier) -> Printable<'a> {
        Printable {
            value: self,
            modifier: Some(modifier),
        }
    }
}

/// Optional per-value formatting hint.
///
/// Integers honour [`Modifier::Radix`]; floats honour [`Modifier::Digits`].
/// A modifier that does not apply to the value's variant is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Numeric base for integers. `0` writes the low byte of the value raw;
    /// `1` and anything above 36 fall back to base 10.
    Radix(u8),
    /// Number of digits after the decimal point for floats.
    Digits(u8),
}

impl Modifier {
    /// Base 2.
    pub const BIN: Modifier = Modifier::Radix(2);
    /// Base 8.
    pub const OCT: Modifier = Modifier::Radix(8);
    /// Base 10.
    pub const DEC: Modifier = Modifier::Radix(10);
    /// Base 16, lower-case digits.
    pub const HEX: Modifier = Modifier::Radix(16);
}

/// A [`Value`] together with an optional [`Modifier`]: the argument of
/// [`assign`](crate::TextBuffer::assign) and
/// [`append`](crate::TextBuffer::append).
///
/// Built from a bare primitive (`42`, `"text"`, `2.5`) or from a
/// `(primitive, Modifier)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Printable<'a> {
    /// The value to render.
    pub value: Value<'a>,
    /// How to render it, if not the default.
    pub modifier: Option<Modifier>,
}

impl<'a> From<Value<'a>> for Printable<'a> {
    fn from(value: Value<'a>) -> Self {
        Printable {
            value,
            modifier: None,
        }
    }
}

impl<'a> From<(Value<'a>, Modifier)> for Printable<'a> {
    fn from((value, modifier): (Value<'a>, Modifier)) -> Self {
        Printable {
            value,
            modifier: Some(modifier),
        }
    }
}

macro_rules! impl_from_scalar {
    ($variant:ident as $wide:ty: $($t:ty),*) => {$(
        impl From<$t> for Value<'_> {
            fn from(v: $t) -> Self {
                Value::$variant(<$wide>::from(v))
            }
        }

        impl From<$t> for Printable<'_> {
            fn from(v: $t) -> Self {
                Value::from(v).into()
            }
        }

        impl From<($t, Modifier)> for Printable<'_> {
            fn from((v, modifier): ($t, Modifier)) -> Self {
                (Value::from(v), modifier).into()
            }
        }
    )*};
}

impl_from_scalar!(Int as i64: i8, i16, i32, i64);
impl_from_scalar!(UInt as u64: u8, u16, u32, u64);
impl_from_scalar!(Float as f64: f32, f64);
impl_from_scalar!(Char as char: char);
impl_from_scalar!(Bool as bool: bool);

// `isize`/`usize` have no lossless `From` into 64-bit integers on paper.
macro_rules! impl_from_pointer_sized {
    ($($t:ty => $variant:ident as $wide:ty),*) => {$(
        #[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
        impl From<$t> for Value<'_> {
            fn from(v: $t) -> Self {
                Value::$variant(v as $wide)
            }
        }

        impl From<$t> for Printable<'_> {
            fn from(v: $t) -> Self {
                Value::from(v).into()
            }
        }

        impl From<($t, Modifier)> for Printable<'_> {
            fn from((v, modifier): ($t, Modifier)) -> Self {
                (Value::from(v), modifier).into()
            }
        }
    )*};
}

impl_from_pointer_sized!(isize => Int as i64, usize => UInt as u64);

macro_rules! impl_from_text {
    ($($t:ty),*) => {$(
        impl<'a> From<&'a $t> for Value<'a> {
            fn from(v: &'a $t) -> Self {
                Value::Str(BStr::new(v))
            }
        }

        impl<'a> From<&'a $t> for Printable<'a> {
            fn from(v: &'a $t) -> Self {
                Value::from(v).into()
            }
        }
    )*};
}

impl_from_text!(str, [u8], BStr);

#[cfg(feature = "alloc")]
impl_from_text!(alloc::string::String);

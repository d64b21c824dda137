//! Bounded printf-style formatting.
//!
//! The engine reads its pattern from any byte iterator (so patterns kept in
//! read-only memory share the code path with ordinary `&str` patterns), pulls
//! arguments from a slice of [`Value`]s and writes into a [`ByteSink`]. It
//! returns the length the full rendering would have had, regardless of how
//! much the sink actually kept.
//!
//! Supported directive syntax:
//!
//! ```text
//! %[flags][width][.precision][length]conversion
//!
//! flags       - + space # 0
//! width       digits | *
//! precision   . | .digits | .*
//! length      hh h l ll j z t L q   (accepted, ignored)
//! conversion  d i u o x X b B c s f F e E g G %
//! ```
//!
//! Anything else after a `%` is copied through verbatim.

use core::{fmt, fmt::Write as _, iter::Peekable};

use crate::{
    error::DirectiveError,
    options::PrintOptions,
    render::{self, digits},
    sink::{ByteSink, Discard, FmtSink, Tally, Take},
    value::Value,
};

/// Widths and precisions above this are rejected as malformed.
const MAX_FIELD: usize = u16::MAX as usize;

/// Longest directive that can be echoed back intact when it is malformed.
const RAW_CAPACITY: usize = 32;

const DEFAULT_FLOAT_PRECISION: usize = 6;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    alt: bool,
    zero: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FloatStyle {
    Fixed,
    Exponent,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Signed,
    Unsigned { base: u32, upper: bool },
    Char,
    Str,
    Float { style: FloatStyle, upper: bool },
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Directive {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

/// Bytes of the directive consumed so far, echoed back on error.
struct Raw {
    bytes: [u8; RAW_CAPACITY],
    len: usize,
}

impl Raw {
    fn new() -> Self {
        Self {
            bytes: [0; RAW_CAPACITY],
            len: 0,
        }
    }

    fn push(&mut self, byte: u8) {
        if let Some(slot) = self.bytes.get_mut(self.len) {
            *slot = byte;
            self.len += 1;
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Formats `pattern` with `args` into `out`. The pattern ends at its first
/// NUL byte, if any. Returns the untruncated length of the output.
pub(crate) fn format<'a, S, I>(out: S, pattern: I, args: &[Value<'a>], options: &PrintOptions) -> usize
where
    S: ByteSink,
    I: IntoIterator<Item = u8>,
{
    let mut out = Tally::new(out);
    let mut pattern = pattern.into_iter().take_while(|&b| b != 0).peekable();
    let mut args = args.iter().copied();

    while let Some(byte) = pattern.next() {
        if byte != b'%' {
            out.put(byte);
            continue;
        }

        let mut raw = Raw::new();
        match parse_directive(&mut pattern, &mut args, &mut raw) {
            Ok(directive) => emit(&mut out, &directive, &mut args, options),
            Err(err) => {
                #[cfg(feature = "log")]
                log::trace!("copying malformed directive through: {err}");
                #[cfg(not(feature = "log"))]
                let _ = err;
                out.put(b'%');
                out.put_slice(raw.as_bytes());
            }
        }
    }

    out.offered()
}

fn bump<I: Iterator<Item = u8>>(pattern: &mut Peekable<I>, raw: &mut Raw) -> Option<u8> {
    let byte = pattern.next()?;
    raw.push(byte);
    Some(byte)
}

fn bump_if<I: Iterator<Item = u8>>(pattern: &mut Peekable<I>, raw: &mut Raw, want: u8) -> bool {
    if pattern.peek() == Some(&want) {
        bump(pattern, raw);
        true
    } else {
        false
    }
}

fn parse_number<I: Iterator<Item = u8>>(
    pattern: &mut Peekable<I>,
    raw: &mut Raw,
) -> Result<usize, DirectiveError> {
    let mut n: usize = 0;
    while let Some(&b) = pattern.peek() {
        if !b.is_ascii_digit() {
            break;
        }
        bump(pattern, raw);
        n = n * 10 + usize::from(b - b'0');
        if n > MAX_FIELD {
            return Err(DirectiveError::FieldOverflow);
        }
    }
    Ok(n)
}

/// Reads a `*` field from the argument list as `(magnitude, negative)`.
fn star_field<'a>(args: &mut impl Iterator<Item = Value<'a>>) -> Result<(usize, bool), DirectiveError> {
    let n = args.next().map_or(0, |v| v.as_i64());
    let magnitude = usize::try_from(n.unsigned_abs()).map_err(|_| DirectiveError::FieldOverflow)?;
    if magnitude > MAX_FIELD {
        return Err(DirectiveError::FieldOverflow);
    }
    Ok((magnitude, n < 0))
}

fn parse_directive<'a, I>(
    pattern: &mut Peekable<I>,
    args: &mut impl Iterator<Item = Value<'a>>,
    raw: &mut Raw,
) -> Result<Directive, DirectiveError>
where
    I: Iterator<Item = u8>,
{
    let mut flags = Flags::default();
    loop {
        let flag = match pattern.peek() {
            Some(b'-') => &mut flags.left,
            Some(b'+') => &mut flags.plus,
            Some(b' ') => &mut flags.space,
            Some(b'#') => &mut flags.alt,
            Some(b'0') => &mut flags.zero,
            _ => break,
        };
        *flag = true;
        bump(pattern, raw);
    }

    let width = if bump_if(pattern, raw, b'*') {
        let (width, negative) = star_field(args)?;
        flags.left |= negative;
        width
    } else {
        parse_number(pattern, raw)?
    };

    let precision = if bump_if(pattern, raw, b'.') {
        if bump_if(pattern, raw, b'*') {
            match star_field(args)? {
                (_, true) => None,
                (p, false) => Some(p),
            }
        } else {
            Some(parse_number(pattern, raw)?)
        }
    } else {
        None
    };

    while let Some(b'h' | b'l' | b'L' | b'q' | b'j' | b'z' | b't') = pattern.peek() {
        bump(pattern, raw);
    }

    let conversion = match bump(pattern, raw).ok_or(DirectiveError::Truncated)? {
        b'd' | b'i' => Conversion::Signed,
        b'u' => Conversion::Unsigned { base: 10, upper: false },
        b'o' => Conversion::Unsigned { base: 8, upper: false },
        b'x' => Conversion::Unsigned { base: 16, upper: false },
        b'X' => Conversion::Unsigned { base: 16, upper: true },
        b'b' => Conversion::Unsigned { base: 2, upper: false },
        b'B' => Conversion::Unsigned { base: 2, upper: true },
        b'c' => Conversion::Char,
        b's' => Conversion::Str,
        b'f' => Conversion::Float { style: FloatStyle::Fixed, upper: false },
        b'F' => Conversion::Float { style: FloatStyle::Fixed, upper: true },
        b'e' => Conversion::Float { style: FloatStyle::Exponent, upper: false },
        b'E' => Conversion::Float { style: FloatStyle::Exponent, upper: true },
        b'g' => Conversion::Float { style: FloatStyle::General, upper: false },
        b'G' => Conversion::Float { style: FloatStyle::General, upper: true },
        b'%' => Conversion::Percent,
        other => return Err(DirectiveError::UnknownConversion(other)),
    };

    Ok(Directive {
        flags,
        width,
        precision,
        conversion,
    })
}

fn fill<S: ByteSink>(out: &mut S, byte: u8, count: usize) {
    for _ in 0..count {
        out.put(byte);
    }
}

/// Writes `body` space-padded to the directive's width.
fn pad<S: ByteSink>(out: &mut S, directive: &Directive, len: usize, body: impl FnOnce(&mut S)) {
    let padding = directive.width.saturating_sub(len);
    if directive.flags.left {
        body(out);
        fill(out, b' ', padding);
    } else {
        fill(out, b' ', padding);
        body(out);
    }
}

fn emit<'a, S: ByteSink>(
    out: &mut S,
    directive: &Directive,
    args: &mut impl Iterator<Item = Value<'a>>,
    options: &PrintOptions,
) {
    let flags = directive.flags;
    match directive.conversion {
        Conversion::Percent => {
            out.put(b'%');
        }
        Conversion::Signed => {
            let n = args.next().map_or(0, |v| v.as_i64());
            let sign = if n < 0 {
                Some(b'-')
            } else if flags.plus {
                Some(b'+')
            } else if flags.space {
                Some(b' ')
            } else {
                None
            };
            emit_integer(out, directive, sign, n.unsigned_abs(), 10, false);
        }
        Conversion::Unsigned { base, upper } => {
            let n = args.next().map_or(0, |v| v.as_u64());
            emit_integer(out, directive, None, n, base, upper);
        }
        Conversion::Char => {
            let mut utf8 = [0; 4];
            let bytes: &[u8] = match args.next() {
                None => &[],
                Some(Value::Char(c)) => c.encode_utf8(&mut utf8).as_bytes(),
                Some(Value::Str(s)) => s.get(..1).unwrap_or_default(),
                Some(other) => {
                    utf8[0] = other.as_i64().to_le_bytes()[0];
                    &utf8[..1]
                }
            };
            pad(out, directive, bytes.len(), |out| {
                out.put_slice(bytes);
            });
        }
        Conversion::Str => match args.next() {
            None => pad(out, directive, 0, |_| {}),
            Some(Value::Str(s)) => {
                let end = directive.precision.map_or(s.len(), |p| p.min(s.len()));
                let bytes = &s[..end];
                pad(out, directive, bytes.len(), |out| {
                    out.put_slice(bytes);
                });
            }
            Some(other) => {
                let limit = directive.precision.unwrap_or(usize::MAX);
                let mut measure = Tally::new(Take::new(Discard, limit));
                render::render(&mut measure, other.into(), options);
                let len = measure.offered().min(limit);
                pad(out, directive, len, |out| {
                    render::render(Take::new(out, limit), other.into(), options);
                });
            }
        },
        Conversion::Float { style, upper } => {
            let x = args.next().map_or(0.0, |v| v.as_f64());
            emit_float(out, directive, x, style, upper);
        }
    }
}

fn emit_integer<S: ByteSink>(
    out: &mut S,
    directive: &Directive,
    sign: Option<u8>,
    magnitude: u64,
    base: u32,
    upper: bool,
) {
    let flags = directive.flags;
    let mut buf = [0; 64];
    let mut body = digits(magnitude, base, upper, &mut buf);
    if directive.precision == Some(0) && magnitude == 0 {
        body = &[];
    }

    let mut zeros = directive
        .precision
        .map_or(0, |p| p.saturating_sub(body.len()));
    if flags.alt && base == 8 && zeros == 0 && body.first() != Some(&b'0') {
        zeros = 1;
    }

    let prefix: &[u8] = match (flags.alt && magnitude != 0, base, upper) {
        (true, 16, false) => b"0x",
        (true, 16, true) => b"0X",
        (true, 2, false) => b"0b",
        (true, 2, true) => b"0B",
        _ => b"",
    };

    let len = usize::from(sign.is_some()) + prefix.len() + zeros + body.len();
    let head = |out: &mut S| {
        if let Some(sign) = sign {
            out.put(sign);
        }
        out.put_slice(prefix);
    };

    if flags.zero && !flags.left && directive.precision.is_none() {
        head(out);
        fill(out, b'0', directive.width.saturating_sub(len) + zeros);
        out.put_slice(body);
    } else {
        pad(out, directive, len, |out| {
            head(out);
            fill(out, b'0', zeros);
            out.put_slice(body);
        });
    }
}

fn emit_float<S: ByteSink>(out: &mut S, directive: &Directive, x: f64, style: FloatStyle, upper: bool) {
    let flags = directive.flags;
    let sign = if x.is_sign_negative() {
        Some(b'-')
    } else if flags.plus {
        Some(b'+')
    } else if flags.space {
        Some(b' ')
    } else {
        None
    };
    let sign_len = usize::from(sign.is_some());

    if !x.is_finite() {
        let word: &[u8] = match (x.is_nan(), upper) {
            (true, false) => b"nan",
            (true, true) => b"NAN",
            (false, false) => b"inf",
            (false, true) => b"INF",
        };
        pad(out, directive, sign_len + word.len(), |out| {
            if let Some(sign) = sign {
                out.put(sign);
            }
            out.put_slice(word);
        });
        return;
    }

    let x = if x.is_sign_negative() { -x } else { x };
    let body = FloatBody::resolve(
        x,
        style,
        directive.precision.unwrap_or(DEFAULT_FLOAT_PRECISION),
        flags.alt,
    );
    let mut measure = Tally::new(Discard);
    body.write(&mut measure, x, upper);
    let len = sign_len + measure.offered();

    if flags.zero && !flags.left {
        if let Some(sign) = sign {
            out.put(sign);
        }
        fill(out, b'0', directive.width.saturating_sub(len));
        body.write(out, x, upper);
    } else {
        pad(out, directive, len, |out| {
            if let Some(sign) = sign {
                out.put(sign);
            }
            body.write(out, x, upper);
        });
    }
}

/// A concrete float layout: `%g` is resolved into fixed or exponent form
/// before anything is written.
#[derive(Debug, Clone, Copy)]
struct FloatBody {
    exponent_form: bool,
    precision: usize,
    /// Strip trailing fractional zeros (`%g` without `#`).
    trim: bool,
    /// Keep the decimal point even with no fractional digits (`#`).
    keep_point: bool,
}

impl FloatBody {
    fn resolve(x: f64, style: FloatStyle, precision: usize, alt: bool) -> Self {
        match style {
            FloatStyle::Fixed | FloatStyle::Exponent => FloatBody {
                exponent_form: style == FloatStyle::Exponent,
                precision,
                trim: false,
                keep_point: alt,
            },
            FloatStyle::General => {
                let significant = precision.max(1);
                let exponent = split_exponent(Discard, significant - 1, x);
                let fixed = usize::try_from(exponent)
                    .map_or(exponent >= -4, |e| e < significant);
                let precision = if fixed {
                    // exponent lies in [-4, significant) here
                    significant
                        .checked_add_signed(-1 - exponent as isize)
                        .unwrap_or(0)
                } else {
                    significant - 1
                };
                FloatBody {
                    exponent_form: !fixed,
                    precision,
                    trim: !alt,
                    keep_point: alt,
                }
            }
        }
    }

    fn write<S: ByteSink>(&self, out: &mut S, x: f64, upper: bool) {
        let precision = self.precision;
        if self.exponent_form {
            let exponent = if self.trim {
                split_exponent(TrimZeros::new(&mut *out), precision, x)
            } else {
                split_exponent(&mut *out, precision, x)
            };
            if self.keep_point && precision == 0 {
                out.put(b'.');
            }
            out.put(if upper { b'E' } else { b'e' });
            out.put(if exponent < 0 { b'-' } else { b'+' });
            let mut buf = [0; 64];
            let exp_digits = digits(u64::from(exponent.unsigned_abs()), 10, false, &mut buf);
            if exp_digits.len() < 2 {
                out.put(b'0');
            }
            out.put_slice(exp_digits);
        } else {
            if self.trim {
                let _ = write!(FmtSink(TrimZeros::new(&mut *out)), "{x:.precision$}");
            } else {
                let _ = write!(FmtSink(&mut *out), "{x:.precision$}");
            }
            if self.keep_point && precision == 0 {
                out.put(b'.');
            }
        }
    }
}

/// Writes the mantissa of `x` in exponent form to `out` and returns the
/// decimal exponent.
fn split_exponent<S: ByteSink>(out: S, precision: usize, x: f64) -> i32 {
    let mut split = ExpSplit {
        out,
        in_exponent: false,
        negative: false,
        exponent: 0,
    };
    let _ = write!(split, "{x:.precision$e}");
    if split.negative {
        -split.exponent
    } else {
        split.exponent
    }
}

/// Separates `core::fmt`'s `1.5e-3` style output into the mantissa (passed
/// on) and the exponent (captured).
struct ExpSplit<S> {
    out: S,
    in_exponent: bool,
    negative: bool,
    exponent: i32,
}

impl<S: ByteSink> fmt::Write for ExpSplit<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            if self.in_exponent {
                match b {
                    b'-' => self.negative = true,
                    b'0'..=b'9' => {
                        self.exponent = self.exponent * 10 + i32::from(b - b'0');
                    }
                    _ => {}
                }
            } else if b == b'e' {
                self.in_exponent = true;
            } else {
                self.out.put(b);
            }
        }
        Ok(())
    }
}

/// Holds back trailing zeros after a decimal point (and the point itself)
/// until a non-zero digit shows they are significant. Whatever is still held
/// when the adapter is dropped is discarded.
struct TrimZeros<S> {
    inner: S,
    after_point: bool,
    pending_point: bool,
    pending_zeros: usize,
}

impl<S: ByteSink> TrimZeros<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            after_point: false,
            pending_point: false,
            pending_zeros: 0,
        }
    }
}

impl<S: ByteSink> ByteSink for TrimZeros<S> {
    fn put(&mut self, byte: u8) -> bool {
        if !self.after_point {
            if byte == b'.' {
                self.after_point = true;
                self.pending_point = true;
                return true;
            }
            return self.inner.put(byte);
        }
        if byte == b'0' {
            self.pending_zeros += 1;
            return true;
        }
        if core::mem::take(&mut self.pending_point) {
            self.inner.put(b'.');
        }
        fill(&mut self.inner, b'0', core::mem::take(&mut self.pending_zeros));
        self.inner.put(byte)
    }
}

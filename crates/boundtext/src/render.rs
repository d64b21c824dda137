//! Generic printable-value dispatch.
//!
//! Renders a [`Printable`] into any [`ByteSink`] using serial-console
//! conventions: integers in an arbitrary base, floats with a fixed number of
//! decimals (rounded half-up, `nan`/`inf`/`ovf` for out-of-range values),
//! strings verbatim, chars as UTF-8.

use crate::{
    options::PrintOptions,
    sink::ByteSink,
    value::{Modifier, Printable, Value},
};

/// Largest magnitude the float renderer prints; the integer part must fit a
/// `u32`.
const FLOAT_LIMIT: f64 = 4_294_967_040.0;

/// Scratch space for the digits of a `u64` in base 2 (the widest case).
pub(crate) type DigitBuf = [u8; 64];

/// Writes the digits of `n` in `base` to the tail of `buf` and returns them.
pub(crate) fn digits(mut n: u64, base: u32, upper: bool, buf: &mut DigitBuf) -> &[u8] {
    debug_assert!((2..=36).contains(&base));
    let alphabet: &[u8; 36] = if upper {
        b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ"
    } else {
        b"0123456789abcdefghijklmnopqrstuvwxyz"
    };
    let base = u64::from(base);
    let mut start = buf.len();
    loop {
        start -= 1;
        #[allow(clippy::cast_possible_truncation)]
        let d = (n % base) as usize;
        buf[start] = alphabet[d];
        n /= base;
        if n == 0 {
            break;
        }
    }
    &buf[start..]
}

/// Renders `printable` into `out`, returning the number of bytes stored.
pub(crate) fn render<S: ByteSink>(mut out: S, printable: Printable<'_>, options: &PrintOptions) -> usize {
    let Printable { value, modifier } = printable;
    match value {
        Value::Int(n) => match radix(modifier) {
            Radix::Raw => out.put(n.to_le_bytes()[0]).into(),
            Radix::Base(10) if n < 0 => {
                let mut buf = [0; 64];
                usize::from(out.put(b'-'))
                    + out.put_slice(digits(n.unsigned_abs(), 10, false, &mut buf))
            }
            #[allow(clippy::cast_sign_loss)]
            Radix::Base(base) => {
                let mut buf = [0; 64];
                out.put_slice(digits(n as u64, base, false, &mut buf))
            }
        },
        Value::UInt(n) => match radix(modifier) {
            Radix::Raw => out.put(n.to_le_bytes()[0]).into(),
            Radix::Base(base) => {
                let mut buf = [0; 64];
                out.put_slice(digits(n, base, false, &mut buf))
            }
        },
        Value::Float(f) => {
            let places = match modifier {
                Some(Modifier::Digits(d)) => d,
                _ => options.float_digits,
            };
            render_float(&mut out, f, places)
        }
        Value::Str(s) => out.put_slice(s),
        Value::Char(c) => {
            let mut buf = [0; 4];
            out.put_slice(c.encode_utf8(&mut buf).as_bytes())
        }
        Value::Bool(b) => out.put_slice(options.bool_style.spell(b)),
    }
}

enum Radix {
    Raw,
    Base(u32),
}

fn radix(modifier: Option<Modifier>) -> Radix {
    match modifier {
        Some(Modifier::Radix(0)) => Radix::Raw,
        Some(Modifier::Radix(r @ 2..=36)) => Radix::Base(u32::from(r)),
        _ => Radix::Base(10),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless
)]
fn render_float<S: ByteSink>(out: &mut S, mut number: f64, places: u8) -> usize {
    if number.is_nan() {
        return out.put_slice(b"nan");
    }
    if number.is_infinite() {
        return out.put_slice(b"inf");
    }
    if !(-FLOAT_LIMIT..=FLOAT_LIMIT).contains(&number) {
        return out.put_slice(b"ovf");
    }

    let mut n = 0;
    if number < 0.0 {
        n += usize::from(out.put(b'-'));
        number = -number;
    }

    let mut rounding = 0.5;
    for _ in 0..places {
        rounding /= 10.0;
    }
    number += rounding;

    let int_part = number as u32;
    let mut remainder = number - f64::from(int_part);
    let mut buf = [0; 64];
    n += out.put_slice(digits(u64::from(int_part), 10, false, &mut buf));

    if places > 0 {
        n += usize::from(out.put(b'.'));
    }
    for _ in 0..places {
        remainder *= 10.0;
        let digit = (remainder as u32).min(9);
        n += usize::from(out.put(b'0' + digit as u8));
        remainder -= f64::from(digit);
    }
    n
}

use alloc::{format, vec, vec::Vec};

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::{
    arbitrary::{Arg, Pattern, values},
    quickcheck_tests,
};
use crate::{TextBuffer, Value, options::PrintOptions, printf};

const GUARD: u8 = 0x5A;
const GUARD_LEN: usize = 16;

fn unbounded(pattern: &str, args: &[Value<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    let n = printf::format(&mut out, pattern.bytes(), args, &PrintOptions::default());
    assert_eq!(n, out.len());
    out
}

fn magnitude(x: f64) -> f64 {
    if x.is_sign_negative() { -x } else { x }
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

/// Property: a bounded format stores a prefix of what an unbounded one
/// renders, reports the unbounded length, keeps the terminator in place and
/// never touches memory past the bound size.
#[test]
fn bounded_format_is_prefix_of_unbounded_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(capacity: u8, prefix: Vec<u8>, pattern: Pattern, args: Vec<Arg>) -> bool {
        let capacity = usize::from(capacity % 96);
        let prefix: Vec<u8> = prefix.into_iter().filter(|&b| b != 0).collect();
        let args = values(&args);
        let full = unbounded(&pattern.0, &args);

        let mut backing = vec![GUARD; capacity + GUARD_LEN];
        let mut text = TextBuffer::from_parts(Some(&mut backing[..]), capacity);
        let kept_prefix = text.write_bytes(&prefix);
        let reported = text.format(&pattern.0, &args);
        let stored = text.as_bytes().to_vec();
        let len = text.len();
        drop(text);

        let room = capacity.saturating_sub(kept_prefix + 1);
        let tail = until_nul(&full[..full.len().min(room)]);
        let mut expected = prefix[..kept_prefix].to_vec();
        expected.extend_from_slice(tail);

        reported == full.len()
            && stored == expected
            && (capacity == 0 || (len < capacity && backing[len] == 0))
            && backing[capacity..].iter().all(|&b| b == GUARD)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(u8, Vec<u8>, Pattern, Vec<Arg>) -> bool);
}

/// Property: `%e` and `%g` output reads back as a number within the
/// rounding error implied by the precision.
#[test]
fn exponent_forms_read_back_quickcheck() {
    fn prop(x: f64, precision: u8) -> bool {
        // rounding up near f64::MAX reads back as infinity
        if !x.is_finite() || magnitude(x) > 1e307 {
            return true;
        }
        let precision = usize::from(precision % 10);
        let mut tolerance = magnitude(x);
        for _ in 0..precision {
            tolerance /= 10.0;
        }

        let rendered = unbounded(&format!("%.{precision}e|%.{}g", precision + 1), &[Value::from(x); 2]);
        let Ok(rendered) = core::str::from_utf8(&rendered) else {
            return false;
        };
        let Some((exp, general)) = rendered.split_once('|') else {
            return false;
        };
        [exp, general].iter().all(|s| {
            s.parse::<f64>()
                .is_ok_and(|back| back == x || magnitude(back - x) <= tolerance)
        })
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(f64, u8) -> bool);
}

#[quickcheck]
#[allow(clippy::cast_sign_loss)]
fn integer_conversions_match_core_fmt(n: i64, width: u8) -> bool {
    let width = usize::from(width % 24);
    let pattern = format!("%{width}d|%0{width}d|%-{width}d|%x|%X|%o|%b|%u");
    let expected = format!("{n:>width$}|{n:0width$}|{n:<width$}|{n:x}|{n:X}|{n:o}|{n:b}|{}", n as u64);

    let mut storage = [0u8; 256];
    let mut text = TextBuffer::new(&mut storage);
    text.format(&pattern, &[Value::from(n); 8]);
    text == expected.as_str()
}

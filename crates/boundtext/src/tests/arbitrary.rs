use alloc::{string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::Value;

/// Owned stand-in for a [`Value`] so argument lists can be generated.
#[derive(Debug, Clone)]
pub(crate) enum Arg {
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Char(char),
    Bool(bool),
}

impl Arg {
    pub(crate) fn as_value(&self) -> Value<'_> {
        match self {
            Arg::Int(n) => Value::Int(*n),
            Arg::UInt(n) => Value::UInt(*n),
            Arg::Float(x) => Value::Float(*x),
            Arg::Str(s) => Value::from(s.as_str()),
            Arg::Char(c) => Value::Char(*c),
            Arg::Bool(b) => Value::Bool(*b),
        }
    }
}

impl Arbitrary for Arg {
    fn arbitrary(g: &mut Gen) -> Self {
        match usize::arbitrary(g) % 6 {
            0 => Arg::Int(i64::arbitrary(g)),
            1 => Arg::UInt(u64::arbitrary(g)),
            2 => Arg::Float(f64::arbitrary(g)),
            3 => Arg::Str(String::arbitrary(g)),
            4 => Arg::Char(char::arbitrary(g)),
            _ => Arg::Bool(bool::arbitrary(g)),
        }
    }
}

/// A printf pattern mixing literal text with directives, some of them
/// malformed on purpose.
#[derive(Debug, Clone)]
pub(crate) struct Pattern(pub(crate) String);

const LITERALS: &[char] = &['a', 'Z', ' ', '-', '.', '0', '7', 'é'];
const FLAGS: &[char] = &['-', '+', ' ', '#', '0'];
const LENGTHS: &[&str] = &["", "", "", "h", "hh", "l", "ll", "z"];
const CONVERSIONS: &[u8] = b"diuoxXbBcsfFeEgG%";
const BROKEN: &[u8] = b"ykq!";

fn pick<'t, T>(g: &mut Gen, items: &'t [T]) -> &'t T {
    &items[usize::arbitrary(g) % items.len()]
}

fn directive(g: &mut Gen, out: &mut String) {
    out.push('%');
    for _ in 0..usize::arbitrary(g) % 3 {
        out.push(*pick(g, FLAGS));
    }
    match usize::arbitrary(g) % 4 {
        0 => out.push('*'),
        1 => out.push_str(&alloc::format!("{}", usize::arbitrary(g) % 24)),
        _ => {}
    }
    match usize::arbitrary(g) % 4 {
        0 => out.push_str(".*"),
        1 => out.push_str(&alloc::format!(".{}", usize::arbitrary(g) % 12)),
        2 => out.push('.'),
        _ => {}
    }
    out.push_str(*pick(g, LENGTHS));
    match usize::arbitrary(g) % 16 {
        // no conversion letter
        0 => {}
        1 => out.push(char::from(*pick(g, BROKEN))),
        _ => out.push(char::from(*pick(g, CONVERSIONS))),
    }
}

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut out = String::new();
        for _ in 0..usize::arbitrary(g) % 8 {
            if bool::arbitrary(g) {
                directive(g, &mut out);
            } else {
                out.push(*pick(g, LITERALS));
            }
        }
        Pattern(out)
    }
}

/// Borrows a generated argument list as values.
pub(crate) fn values(args: &[Arg]) -> Vec<Value<'_>> {
    args.iter().map(Arg::as_value).collect()
}

#[test]
fn generated_patterns_carry_length_modifiers() {
    let mut g = Gen::new(100);
    let patterns: Vec<Pattern> = (0..1_000).map(|_| Pattern::arbitrary(&mut g)).collect();
    for modifier in ["hh", "ll", "z"] {
        assert!(
            patterns.iter().any(|p| p.0.contains(modifier)),
            "no pattern used the {modifier} length modifier"
        );
    }
}

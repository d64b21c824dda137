#![no_main]

use arbitrary::Arbitrary;
use boundtext::{Modifier, TextBuffer, Value};
use libfuzzer_sys::fuzz_target;

const GUARD: u8 = 0xA5;
const GUARD_LEN: usize = 16;

#[derive(Debug, Arbitrary)]
enum Arg {
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Char(char),
    Bool(bool),
}

impl Arg {
    fn as_value(&self) -> Value<'_> {
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

#[derive(Debug, Arbitrary)]
enum Op {
    Byte(u8),
    Bytes(Vec<u8>),
    // Pattern bytes are arbitrary, so NULs and malformed directives show up.
    Format(Vec<u8>, Vec<Arg>),
    Append(Arg),
    AppendRadix(i64, u8),
    AppendDigits(f64, u8),
    Line(Arg),
    Reset,
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    ops: Vec<Op>,
}

fn apply(text: &mut TextBuffer<'_>, op: &Op) {
    match op {
        Op::Byte(b) => {
            text.append_byte(*b);
        }
        Op::Bytes(bytes) => {
            text.write_bytes(bytes);
        }
        Op::Format(pattern, args) => {
            let pattern = String::from_utf8_lossy(pattern);
            let args: Vec<Value<'_>> = args.iter().map(Arg::as_value).collect();
            text.format(&pattern, &args);
        }
        Op::Append(arg) => {
            text.append(arg.as_value());
        }
        Op::AppendRadix(n, radix) => {
            text.append((*n, Modifier::Radix(*radix)));
        }
        Op::AppendDigits(x, digits) => {
            text.append((*x, Modifier::Digits(*digits % 16)));
        }
        Op::Line(arg) => {
            text.append_line(arg.as_value());
        }
        Op::Reset => text.reset(),
    }
}

fuzz_target!(|input: Input| {
    let capacity = usize::from(input.capacity);
    let mut backing = vec![GUARD; capacity + GUARD_LEN];
    {
        let mut text = TextBuffer::from_parts(Some(&mut backing[..]), capacity);
        for op in &input.ops {
            let before = text.len();
            apply(&mut text, op);
            assert_eq!(text.capacity(), capacity);
            if capacity == 0 {
                assert!(text.is_empty());
                continue;
            }
            assert!(text.len() < capacity);
            let with_nul = text.as_bytes_with_nul();
            assert_eq!(with_nul.len(), text.len() + 1);
            assert_eq!(with_nul[text.len()], 0);
            if !matches!(op, Op::Reset) {
                assert!(text.len() >= before);
            }
        }
    }
    assert!(backing[capacity..].iter().all(|&b| b == GUARD));
});

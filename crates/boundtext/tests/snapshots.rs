#![expect(missing_docs)]

use core::fmt::Write;

use boundtext::{BoolStyle, LineEnding, Modifier, PrintOptions, TextBuffer, tformat};

const READINGS: [(&str, f64); 3] = [("temp", 21.5), ("humidity", 48.25), ("pressure", 1013.2)];

fn render_log(capacity: usize) -> String {
    let mut storage = vec![0u8; capacity];
    let mut text = TextBuffer::new(&mut storage);
    let mut out = String::new();
    for (i, (label, reading)) in READINGS.into_iter().enumerate() {
        text.reset();
        let wanted = tformat!(text, "%02d %-8s %7.2f", i, label, reading);
        writeln!(out, "{:?} len={} wanted={wanted}", text.as_bstr(), text.len()).unwrap();
    }
    out
}

#[test]
fn snapshot_log_lines_fit() {
    insta::assert_snapshot!(render_log(24), @r#"
    "00 temp       21.50" len=19 wanted=19
    "01 humidity   48.25" len=19 wanted=19
    "02 pressure 1013.20" len=19 wanted=19
    "#);
}

#[test]
fn snapshot_log_lines_truncated() {
    insta::assert_snapshot!(render_log(12), @r#"
    "00 temp    " len=11 wanted=19
    "01 humidity" len=11 wanted=19
    "02 pressure" len=11 wanted=19
    "#);
}

#[test]
fn snapshot_mixed_appends() {
    let mut storage = [0u8; 64];
    let mut text = TextBuffer::new(&mut storage);
    text.append("int=")
        .append(-42)
        .append(" hex=")
        .append((0xBEEF_u16, Modifier::HEX))
        .append(" bin=")
        .append((5_u8, Modifier::BIN))
        .append(" f=")
        .append(2.0_f64 / 3.0)
        .append(" f4=")
        .append((2.0_f64 / 3.0, Modifier::Digits(4)))
        .append(" c=")
        .append('Z')
        .append(" b=")
        .append(false);
    insta::assert_snapshot!(text.to_string(), @"int=-42 hex=beef bin=101 f=0.67 f4=0.6667 c=Z b=false");
}

#[test]
fn snapshot_lines_with_options() {
    let mut storage = [0u8; 48];
    let mut text = TextBuffer::new(&mut storage).with_options(PrintOptions {
        float_digits: 3,
        line_ending: LineEnding::Lf,
        bool_style: BoolStyle::Digits,
    });
    text.append_line(1.0_f64 / 8.0).append_line(true).append_line("done");
    insta::assert_snapshot!(format!("{:?}", text.as_bstr()), @r#""0.125\n1\ndone\n""#);
}

#[test]
fn snapshot_debug() {
    let mut storage = [0u8; 8];
    let mut text = TextBuffer::new(&mut storage);
    text.append("abc");
    insta::assert_snapshot!(format!("{text:?}"), @r#"TextBuffer { text: "abc", capacity: 8, owned: false }"#);
}

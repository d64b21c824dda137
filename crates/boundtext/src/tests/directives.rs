use core::time::Duration;

use rstest::rstest;

use crate::{TextBuffer, Value, values};

fn render(pattern: &str, args: &[Value<'_>]) -> (alloc::string::String, usize) {
    let mut storage = [0u8; 128];
    let mut text = TextBuffer::new(&mut storage);
    let n = text.format(pattern, args);
    (alloc::string::ToString::to_string(&text), n)
}

// Expected strings are what glibc printf produces for the same directive.
#[rstest]
#[case::plain_int("%d", &values![42], "42")]
#[case::width("%5d", &values![42], "   42")]
#[case::left("%-5d|", &values![42], "42   |")]
#[case::zero_pad_negative("%05d", &values![-42], "-0042")]
#[case::plus("%+d", &values![5], "+5")]
#[case::space("% d", &values![5], " 5")]
#[case::precision("%.3d", &values![7], "007")]
#[case::width_and_precision("%8.3d", &values![-7], "    -007")]
#[case::precision_overrides_zero_flag("%08.3d", &values![7], "     007")]
#[case::zero_with_zero_precision("[%.0d]", &values![0], "[]")]
#[case::length_modifiers("%hhd %ld %lld %zu", &values![1, 2, 3, 4], "1 2 3 4")]
#[case::hex("%x %X", &values![255, 255], "ff FF")]
#[case::alt_hex("%#x %#X", &values![255, 255], "0xff 0XFF")]
#[case::alt_hex_zero("%#x", &values![0], "0")]
#[case::alt_hex_zero_pad("%#06x", &values![255], "0x00ff")]
#[case::octal("%o %#o", &values![8, 8], "10 010")]
#[case::alt_octal_zero_precision("%#.0o", &values![0], "0")]
#[case::unsigned_of_negative("%u", &values![-1], "18446744073709551615")]
#[case::binary("%b %#B", &values![5, 5], "101 0B101")]
#[case::char("%c%c", &values!['A', 66], "AB")]
#[case::char_width("[%3c]", &values!['x'], "[  x]")]
#[case::string("%s", &values!["hi"], "hi")]
#[case::string_width("[%5s][%-5s]", &values!["hi", "hi"], "[   hi][hi   ]")]
#[case::string_precision("%.1s", &values!["hi"], "h")]
#[case::fixed_default("%f", &values![1.23456], "1.234560")]
#[case::fixed_precision("%.2f", &values![1.23456], "1.23")]
#[case::fixed_width("%8.3f", &values![-1.23456], "  -1.235")]
#[case::fixed_zero_pad("%08.3f", &values![-1.23456], "-001.235")]
#[case::fixed_plus("%+.1f", &values![2.0], "+2.0")]
#[case::fixed_no_fraction("%.0f", &values![2.7], "3")]
#[case::fixed_alt_point("%#.0f", &values![3.0], "3.")]
#[case::negative_zero("%f", &values![-0.0], "-0.000000")]
#[case::fixed_from_int("%.1f", &values![7], "7.0")]
#[case::exponent("%e", &values![12345.678], "1.234568e+04")]
#[case::exponent_upper_negative("%E", &values![0.00012], "1.200000E-04")]
#[case::exponent_zero("%.2e", &values![0.0], "0.00e+00")]
#[case::exponent_no_fraction("%.0e", &values![5e10], "5e+10")]
#[case::exponent_three_digits("%e", &values![1e100], "1.000000e+100")]
#[case::general_small("%g", &values![0.0001], "0.0001")]
#[case::general_large("%g", &values![123_456_789.0], "1.23457e+08")]
#[case::general_boundary("%g", &values![100_000.0], "100000")]
#[case::general_switch("%g", &values![1e6], "1e+06")]
#[case::general_zero("%g", &values![0.0], "0")]
#[case::general_precision("%.3g", &values![1.23456], "1.23")]
#[case::general_alt("%#g", &values![1.0], "1.00000")]
#[case::general_upper("%G", &values![1e-10], "1E-10")]
#[case::general_tiny("%g", &values![0.000_012_34], "1.234e-05")]
#[case::infinity("%f %F", &values![f64::INFINITY, f64::INFINITY], "inf INF")]
#[case::negative_infinity("%f", &values![f64::NEG_INFINITY], "-inf")]
#[case::nan_width("[%5.1f]", &values![f64::NAN], "[  nan]")]
#[case::percent("100%%", &values![], "100%")]
fn directive_matches_c(#[case] pattern: &str, #[case] args: &[Value<'_>], #[case] expected: &str) {
    let (text, n) = render(pattern, args);
    assert_eq!(text, expected);
    assert_eq!(n, expected.len());
}

#[rstest]
#[case::unknown_conversion("a%yb", "a%yb")]
#[case::trailing_percent("50%", "50%")]
#[case::unfinished_flags("[%-5", "[%-5")]
#[case::width_overflow("%99999999d!", "%99999999d!")]
fn malformed_directive_is_echoed(#[case] pattern: &str, #[case] expected: &str) {
    assert_eq!(render(pattern, &values![1]).0, expected);
}

#[rstest]
#[timeout(Duration::from_millis(1_000))]
fn widest_field_is_truncated_not_refused() {
    let mut storage = [0u8; 16];
    let mut text = TextBuffer::new(&mut storage);
    let n = text.format("%65535d", &values![1]);
    assert_eq!(n, 65535);
    assert_eq!(text.len(), 15);
    assert!(text.as_bytes().iter().all(|&b| b == b' '));
}

use super::*;

use crate::cursor::{IterCursor, TextCursor};

fn at(src: &str) -> TextCursor<'_> {
    TextCursor::new(src)
}

#[test]
fn whitespace_classes() {
    assert_eq!(space0().parse(at("  \tx")).unwrap(), "  \t");
    assert_eq!(space0().parse(at("x")).unwrap(), "");
    assert!(!space1().parse(at("x")).matches());
    assert_eq!(multispace1().parse(at(" \r\n\tz")).unwrap(), " \r\n\t");
    // space0/space1 stop at line breaks
    assert_eq!(space0().parse(at("\nx")).unwrap(), "");
}

#[test]
fn character_classes() {
    assert_eq!(digit1().parse(at("123abc")).unwrap(), "123");
    assert_eq!(alpha1().parse(at("abc123")).unwrap(), "abc");
    assert_eq!(alphanumeric1().parse(at("a1b2;")).unwrap(), "a1b2");
    assert_eq!(hex_digit1().parse(at("deadBEEFx")).unwrap(), "deadBEEF");
    let missing = digit1().parse(at("abc"));
    assert!(missing.error().unwrap().contains("expected digit found 'a'"));
}

#[test]
fn class_parsers_work_on_streaming_cursors() {
    let p = digit1();
    let result = p.parse(IterCursor::new("42x".chars()));
    assert_eq!(result.unwrap(), "42".to_owned());
}

#[test]
fn line_endings() {
    assert_eq!(line_ending().parse(at("\nx")).unwrap(), "\n");
    assert_eq!(line_ending().parse(at("\r\nx")).unwrap(), "\r\n");
    // a lone carriage return backtracks
    let miss = line_ending().parse(at("\rx"));
    assert!(!miss.matches());
    assert!(!miss.committed());
}

#[test]
fn char_sets() {
    assert_eq!(one_of_chars("+-").parse(at("-")).unwrap(), '-');
    assert!(!one_of_chars("+-").parse(at("x")).matches());
    assert_eq!(none_of_chars("\"\\").parse(at("a")).unwrap(), 'a');
    assert!(!none_of_chars("\"\\").parse(at("\"")).matches());
    assert!(!none_of_chars("\"\\").parse(at("")).matches());
}

#[test]
fn quoted_strings_decode_escapes() {
    let p = quoted_string();
    assert_eq!(p.parse(at(r#""hello""#)).unwrap(), "hello");
    assert_eq!(p.parse(at(r#""""#)).unwrap(), "");
    assert_eq!(p.parse(at(r#""a\"b\\c\/d""#)).unwrap(), "a\"b\\c/d");
    assert_eq!(p.parse(at(r#""x\ny\tz""#)).unwrap(), "x\ny\tz");
    assert_eq!(p.parse(at(r#""\u00e9""#)).unwrap(), "é");
    assert_eq!(p.parse(at(r#""\b\f\r""#)).unwrap(), "\u{8}\u{c}\r");
}

#[test]
fn quoted_string_failures() {
    let p = quoted_string();
    // no opening quote: backtrackable
    assert!(!p.parse(at("hello")).committed());
    // unterminated: committed
    assert!(p.parse(at(r#""abc"#)).committed());
    // bad escape: committed
    assert!(p.parse(at(r#""a\q""#)).committed());
    // short unicode escape: committed
    let short = p.parse(at(r#""\u12""#));
    assert!(short.committed());
    assert!(short.error().unwrap().contains("hexadecimal digit"));
}

#[test]
fn unsigned_integers() {
    assert_eq!(dec_uint().parse(at("0")).unwrap(), 0);
    assert_eq!(dec_uint().parse(at("18446744073709551615")).unwrap(), u64::MAX);
    assert!(!dec_uint().parse(at("18446744073709551616")).matches());
    assert!(!dec_uint().parse(at("x")).matches());
    assert!(!dec_uint().parse(at("-1")).matches());
}

#[test]
fn signed_integers() {
    assert_eq!(dec_int().parse(at("42")).unwrap(), 42);
    assert_eq!(dec_int().parse(at("+42")).unwrap(), 42);
    assert_eq!(dec_int().parse(at("-42")).unwrap(), -42);
    assert_eq!(
        dec_int().parse(at("-9223372036854775808")).unwrap(),
        i64::MIN
    );
    assert!(!dec_int().parse(at("9223372036854775808")).matches());
    // a sign with no digits is committed
    assert!(dec_int().parse(at("-x")).committed());
    assert!(!dec_int().parse(at("x")).committed());
}

#[test]
fn hex_integers() {
    assert_eq!(hex_uint().parse(at("ff")).unwrap(), 255);
    assert_eq!(hex_uint().parse(at("DEAD")).unwrap(), 0xDEAD);
    assert_eq!(hex_uint().parse(at("ffffffffffffffff")).unwrap(), u64::MAX);
    assert!(!hex_uint().parse(at("10000000000000000")).matches());
    assert!(!hex_uint().parse(at("x")).matches());
}

#[test]
fn floats() {
    assert_eq!(float().parse(at("0")).unwrap(), 0.0);
    assert_eq!(float().parse(at("3.5")).unwrap(), 3.5);
    assert_eq!(float().parse(at("-2.5e2")).unwrap(), -250.0);
    assert_eq!(float().parse(at("1E+3")).unwrap(), 1000.0);
    assert_eq!(float().parse(at("30")).unwrap(), 30.0);
    // the fraction stops at the second dot
    let result = float().parse(at("1.2.3"));
    match result {
        crate::error::ParseResult::Match { value, next } => {
            assert_eq!(value, 1.2);
            assert_eq!(next.position(), 3);
        }
        _ => panic!("must match"),
    }
    // a dangling dot or exponent is committed
    assert!(float().parse(at("1.x")).committed());
    assert!(float().parse(at("1ex")).committed());
    assert!(!float().parse(at("x")).matches());
}

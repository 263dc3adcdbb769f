use super::*;

#[test]
fn slice_cursor_walks_tokens() {
    let tokens = [10, 20, 30];
    let c0 = SliceCursor::new(&tokens);
    assert_eq!(c0.position(), 0);
    assert_eq!(c0.current(), Some(10));
    assert!(!c0.is_eof());

    let c1 = c0.advance();
    assert_eq!(c1.position(), 1);
    assert_eq!(c1.current(), Some(20));
    // the original cursor is untouched
    assert_eq!(c0.current(), Some(10));

    let end = c1.skip(2);
    assert!(end.is_eof());
    assert_eq!(end.current(), None);
    assert_eq!(end.position(), tokens.len());
}

#[test]
fn skip_clamps_and_zero_is_identity() {
    let tokens = [1, 2];
    let c = SliceCursor::new(&tokens);
    assert_eq!(c.skip(0), c);
    assert_eq!(c.skip(100).position(), 2);
    assert!(c.skip(100).is_eof());

    let t = TextCursor::new("ab");
    assert_eq!(t.skip(0), t);
    assert_eq!(t.skip(100).position(), 2);
}

#[test]
fn slice_to_recognizes_consumed_input() {
    let tokens = [1, 2, 3, 4];
    let start = SliceCursor::new(&tokens);
    let end = start.skip(3);
    assert_eq!(start.slice_to(&end), &[1, 2, 3]);
    assert_eq!(start.slice_to(&start), &[] as &[i32]);
}

#[test]
fn text_cursor_counts_chars_not_bytes() {
    let c = TextCursor::new("déjà");
    assert_eq!(c.current(), Some('d'));
    let c = c.advance();
    assert_eq!(c.current(), Some('é'));
    assert_eq!(c.position(), 1);
    let end = c.skip(3);
    assert!(end.is_eof());
    assert_eq!(end.position(), 4);
}

#[test]
fn text_cursor_lines_and_columns() {
    let start = TextCursor::new("one\ntwo\nthree");
    assert_eq!(start.line(), 1);
    assert_eq!(start.column(), 1);

    let at_w = start.skip(5);
    assert_eq!(at_w.current(), Some('w'));
    assert_eq!(at_w.line(), 2);
    assert_eq!(at_w.column(), 2);

    assert_eq!(at_w.get_line(1), Some("one"));
    assert_eq!(at_w.get_line(3), Some("three"));
    assert_eq!(at_w.get_line(4), None);
    assert_eq!(at_w.get_line(0), None);
}

#[test]
fn text_cursor_slices_source() {
    let start = TextCursor::new("key=value");
    let end = start.skip(3);
    assert_eq!(start.slice_to(&end), "key");
}

#[test]
fn framed_snippet_marks_the_column() {
    let c = TextCursor::new("name John").skip(5);
    assert_eq!(c.framed_snippet(1, 1), "1 | name John\n  |      ^");
}

#[test]
fn framed_snippet_windows_surrounding_lines() {
    let c = TextCursor::new("aa\nbb\ncc\ndd").skip(6);
    assert_eq!(c.current(), Some('c'));
    assert_eq!(c.framed_snippet(1, 1), "2 | bb\n3 | cc\n  | ^\n4 | dd");
}

#[test]
fn linear_snippet_flattens_breaks() {
    let c = TextCursor::new("ab\ncd").skip(3);
    assert_eq!(c.snippet(3, 2), "ab cd\n   ^");
}

#[test]
fn iter_cursor_buffers_lazily_and_shares() {
    let c0 = IterCursor::new("abc".chars());
    let c1 = c0.advance();
    let c2 = c1.advance();
    // earlier cursors still see their positions
    assert_eq!(c0.current(), Some('a'));
    assert_eq!(c1.current(), Some('b'));
    assert_eq!(c2.current(), Some('c'));
    assert!(!c2.is_eof());
    assert!(c2.advance().is_eof());
    assert_eq!(c0.slice_to(&c2), "ab".to_owned());
}

#[test]
fn iter_cursor_skip_clamps() {
    let c = IterCursor::new("xy".chars());
    assert_eq!(c.skip(10).position(), 2);
    assert!(c.skip(10).is_eof());
    assert_eq!(c.skip(0), c);
}

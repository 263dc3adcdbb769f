//! A JSON-style value grammar built from `Ref`, `between` and separated
//! lists, generic over the cursor so it parses borrowed text and streaming
//! input alike.

use thresh::combinator::ThenSkip;
use thresh::cursor::Cursor;
use thresh::prelude::*;
use thresh::text::{float, multispace0, quoted_string, CharClass};

#[derive(Debug, Clone, PartialEq)]
enum Json {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Arr(Vec<Json>),
    Obj(Vec<(String, Json)>),
}

/// A lexeme: `parser` plus any trailing whitespace.
fn token<C, A, P>(parser: P) -> ThenSkip<P, CharClass, C::Slice>
where
    C: Cursor<Token = char>,
    P: Parser<C, A>,
{
    parser.then_skip(multispace0())
}

fn json<C>() -> BoxedParser<'static, C, Json>
where
    C: Cursor<Token = char> + 'static,
{
    let value: Ref<'static, C, Json> = Ref::new();

    let member = token(quoted_string())
        .then_skip(token(':'))
        .then(value.clone());
    let array = value
        .clone()
        .separated0(token(','))
        .between(token('['), token(']'))
        .map(Json::Arr);
    let object = member
        .separated0(token(','))
        .between(token('{'), token('}'))
        .map(Json::Obj);

    value.set(one_of((
        token("null").value(Json::Null),
        token("true").value(Json::Bool(true)),
        token("false").value(Json::Bool(false)),
        token(float()).map(Json::Num),
        token(quoted_string()).map(Json::Str),
        array,
        object,
    )));

    multispace0().skip_then(value).boxed()
}

#[test]
fn objects_collect_members() {
    let result = json().parse_all(TextCursor::new(r#"{"name":"John","age":30}"#));
    let parsed = result.unwrap();
    assert_eq!(
        parsed,
        Json::Obj(vec![
            ("name".to_owned(), Json::Str("John".to_owned())),
            ("age".to_owned(), Json::Num(30.0)),
        ])
    );
    match parsed {
        Json::Obj(members) => assert_eq!(members.len(), 2),
        _ => unreachable!(),
    }
}

#[test]
fn nested_values_parse() {
    let src = r#" { "a" : 42, "b": [ "x", "y", 1.5 ], "c": { "d": null }, "e": [true, false] } "#;
    let parsed = json().parse_all(TextCursor::new(src)).unwrap();
    match parsed {
        Json::Obj(members) => {
            assert_eq!(members.len(), 4);
            assert_eq!(members[0], ("a".to_owned(), Json::Num(42.0)));
            assert_eq!(
                members[1].1,
                Json::Arr(vec![
                    Json::Str("x".to_owned()),
                    Json::Str("y".to_owned()),
                    Json::Num(1.5),
                ])
            );
            assert_eq!(members[2].1, Json::Obj(vec![("d".to_owned(), Json::Null)]));
            assert_eq!(
                members[3].1,
                Json::Arr(vec![Json::Bool(true), Json::Bool(false)])
            );
        }
        other => panic!("expected an object, got {other:?}"),
    }
}

#[test]
fn empty_containers_parse() {
    assert_eq!(
        json().parse_all(TextCursor::new("[]")).unwrap(),
        Json::Arr(vec![])
    );
    assert_eq!(
        json().parse_all(TextCursor::new("{ }")).unwrap(),
        Json::Obj(vec![])
    );
    assert_eq!(
        json().parse_all(TextCursor::new("[ \n ]")).unwrap(),
        Json::Arr(vec![])
    );
}

#[test]
fn scalars_parse() {
    assert_eq!(json().parse_all(TextCursor::new("null")).unwrap(), Json::Null);
    assert_eq!(
        json().parse_all(TextCursor::new(" true ")).unwrap(),
        Json::Bool(true)
    );
    assert_eq!(
        json().parse_all(TextCursor::new("-2.5e2")).unwrap(),
        Json::Num(-250.0)
    );
    assert_eq!(
        json().parse_all(TextCursor::new(r#""hi\n""#)).unwrap(),
        Json::Str("hi\n".to_owned())
    );
}

#[test]
fn the_same_grammar_parses_streams() {
    let parsed = json()
        .parse_all(IterCursor::new(r#"[1, "two", {"three": 3}]"#.chars()))
        .unwrap();
    assert_eq!(
        parsed,
        Json::Arr(vec![
            Json::Num(1.0),
            Json::Str("two".to_owned()),
            Json::Obj(vec![("three".to_owned(), Json::Num(3.0))]),
        ])
    );
}

#[test]
fn malformed_json_is_reported() {
    // a trailing comma commits inside the list
    assert!(json().parse_all(TextCursor::new(r#"[1, 2,]"#)).committed());
    // an unterminated string commits
    assert!(json().parse_all(TextCursor::new(r#"{"a": "b}"#)).committed());
    // trailing input is rejected by parse_all
    let trailing = json().parse_all(TextCursor::new("1 x"));
    assert!(trailing
        .error()
        .unwrap()
        .contains("expected end of input found 'x'"));
}

#[test]
fn reports_point_at_the_failure() {
    let report = json()
        .parse_all(TextCursor::new("{\"a\": 1,\n \"b\": }"))
        .error()
        .unwrap();
    assert!(report.starts_with("Error: line 2 position 7"), "{report}");
    assert!(report.contains('^'), "{report}");
}

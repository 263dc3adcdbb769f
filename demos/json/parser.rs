//! A JSON value parser: recursion via `Ref`, lists via `separated0`,
//! whitespace handled lexeme-style (every token eats its trailing space).

use thresh::combinator::ThenSkip;
use thresh::cursor::Cursor;
use thresh::prelude::*;
use thresh::text::{float, multispace0, quoted_string, CharClass};

/// A parsed JSON value. Object members keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Json {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Array(Vec<Json>),
    Object(Vec<(String, Json)>),
}

fn token<C, A, P>(parser: P) -> ThenSkip<P, CharClass, C::Slice>
where
    C: Cursor<Token = char>,
    P: Parser<C, A>,
{
    parser.then_skip(multispace0())
}

/// The `value` grammar, usable on any char cursor.
pub fn json<C>() -> BoxedParser<'static, C, Json>
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
        .map(Json::Array);
    let object = member
        .separated0(token(','))
        .between(token('{'), token('}'))
        .map(Json::Object);

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_values() {
        let parsed = json()
            .parse_all(TextCursor::new(r#"{"a": [1, null], "b": "x"}"#))
            .unwrap();
        assert_eq!(
            parsed,
            Json::Object(vec![
                (
                    "a".to_owned(),
                    Json::Array(vec![Json::Num(1.0), Json::Null])
                ),
                ("b".to_owned(), Json::Str("x".to_owned())),
            ])
        );
    }

    #[test]
    fn errors_carry_a_location() {
        let report = json()
            .parse_all(TextCursor::new("[1, ]"))
            .error()
            .unwrap();
        assert!(report.starts_with("Error: line 1 position 5"), "{report}");
    }
}

//! An HTML-ish tokenizer: start tags with attributes, end tags, text runs.
//! Tokens are pulled lazily with `iterate`, which steps over anything that
//! does not tokenize.

use thresh::prelude::*;
use thresh::text::{alphanumeric1, none_of_chars, quoted_string, space0, space1};

/// One markup token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text(String),
}

/// The `tag-or-text` parser.
pub fn markup_token<'s>() -> BoxedParser<'s, TextCursor<'s>, Token> {
    let name = || alphanumeric1().map(str::to_owned);

    let attr = space1()
        .skip_then(name())
        .then_skip(space0())
        .then_skip('=')
        .then_skip(space0())
        .then(quoted_string());

    let start = '<'
        .skip_then(name())
        .then(attempt(attr).zero_or_more())
        .then_skip(space0())
        .then_skip('>')
        .map(|(name, attrs)| Token::Start { name, attrs });

    let end = "</"
        .skip_then(name())
        .then_skip('>')
        .map(|name| Token::End { name });

    let text = none_of_chars("<")
        .one_or_more()
        .map(|chars| Token::Text(chars.into_iter().collect()));

    // "</" shares its first character with "<": the end-tag branch must stay
    // backtrackable or no start tag would ever be tried
    one_of((attempt(end), start, text)).boxed()
}

/// Tokenizes a whole document.
pub fn tokenize(src: &str) -> Vec<Token> {
    markup_token().iterate(TextCursor::new(src)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_and_text() {
        assert_eq!(
            tokenize("<div id=\"main\">hi</div>"),
            vec![
                Token::Start {
                    name: "div".to_owned(),
                    attrs: vec![("id".to_owned(), "main".to_owned())],
                },
                Token::Text("hi".to_owned()),
                Token::End {
                    name: "div".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn attribute_spacing_is_flexible() {
        assert_eq!(
            tokenize("<a href = \"x\" >go</a>"),
            vec![
                Token::Start {
                    name: "a".to_owned(),
                    attrs: vec![("href".to_owned(), "x".to_owned())],
                },
                Token::Text("go".to_owned()),
                Token::End {
                    name: "a".to_owned(),
                },
            ]
        );
    }
}

//! Shared chumsky parser utilities for markup scanning
//!
//! Small combinators for the tag grammar: whitespace, names and quoted
//! values.

use chumsky::prelude::*;

/// Parse optional whitespace including newlines.
///
/// Uses explicit character matching to avoid the "repeated combinator making no progress"
/// issue that can occur with `chumsky::text::whitespace().repeated()`.
pub fn optional_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t\n\r").repeated().ignored()
}

/// Parse required whitespace (at least one whitespace/newline character).
pub fn whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t\n\r").repeated().at_least(1).ignored()
}

/// Parse a tag or field name: letters, digits, `_`, `-`, `.` and `:`.
pub fn markup_name<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
        .repeated()
        .at_least(1)
        .to_slice()
}

/// Parse a double- or single-quoted value, yielding the text between the quotes.
pub fn quoted_value<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    let double = none_of('"')
        .repeated()
        .to_slice()
        .delimited_by(just('"'), just('"'));
    let single = none_of('\'')
        .repeated()
        .to_slice()
        .delimited_by(just('\''), just('\''));

    double.or(single)
}

/// Parse a `key="value"` field, allowing whitespace around `=`.
pub fn field<'src>() -> impl Parser<'src, &'src str, (String, String)> + Clone {
    markup_name()
        .then_ignore(optional_whitespace())
        .then_ignore(just('='))
        .then_ignore(optional_whitespace())
        .then(quoted_value())
        .map(|(key, value): (&str, &str)| (key.to_string(), value.to_string()))
}

/// Parse a token that is not a `key="value"` field, such as a bare flag or an
/// unquoted value. Stops before whitespace, `>` and `/>`.
pub fn bare_token<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .and_is(just("/>").not())
        .filter(|c: &char| !c.is_whitespace() && *c != '>')
        .repeated()
        .at_least(1)
        .to_slice()
}

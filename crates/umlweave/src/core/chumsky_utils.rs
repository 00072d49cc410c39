//! Shared chumsky parser utilities
//!
//! Common combinators for the line-oriented diagram notation.

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs, no newlines).
///
/// Relationship lines must not consume the newline that separates statements.
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse required inline whitespace (at least one space or tab).
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse a Mermaid-style comment (%% to end of line).
pub fn mermaid_comment<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just("%%").ignore_then(none_of('\n').repeated()).ignored()
}

/// Parse a statement separator: at least one whitespace character or comment.
///
/// Matches characters one at a time to avoid the "repeated combinator making
/// no progress" issue of `chumsky::text::whitespace().repeated()`.
pub fn separator<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t\n\r")
        .ignored()
        .or(mermaid_comment())
        .repeated()
        .at_least(1)
        .ignored()
}

/// Parse an optional run of whitespace and comments.
pub fn optional_separator<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t\n\r")
        .ignored()
        .or(mermaid_comment())
        .repeated()
        .ignored()
}

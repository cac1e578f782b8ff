//! Lexer for template text using logos
//!
//! A template is plain text with `{{identifier}}` placeholders. Anything
//! that does not form a complete placeholder, including a lone `{` or a
//! `{{ spaced }}` token, is literal text.

use logos::{Lexer, Logos};

use crate::error::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A complete placeholder, braces included
    Placeholder(String),
    /// Run of text without braces
    Text,
    /// A `{` that does not open a placeholder
    Brace,
}

#[derive(Logos, Debug, Clone, PartialEq)]
enum RawToken {
    // Either a whole placeholder or a single brace, see `open_brace`
    #[token("{", open_brace)]
    Open(String),

    #[regex(r"[^{]+")]
    Text,
}

/// Extend a `{` over the rest of a placeholder when one follows
fn open_brace(lex: &mut Lexer<RawToken>) -> String {
    if let Some(len) = placeholder_tail(lex.remainder()) {
        lex.bump(len);
    }
    lex.slice().to_string()
}

/// Length of `{ident}}` at the start of `rest`
fn placeholder_tail(rest: &str) -> Option<usize> {
    let inner = rest.strip_prefix('{')?;
    let ident = inner
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if ident == 0 || !inner[ident..].starts_with("}}") {
        return None;
    }
    Some(1 + ident + 2)
}

/// Lex template text into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    RawToken::lexer(input).spanned().map(|(tok, span)| {
        let tok = match tok {
            Ok(RawToken::Open(slice)) if slice.len() > 1 => Token::Placeholder(slice),
            Ok(RawToken::Open(_)) => Token::Brace,
            Ok(RawToken::Text) | Err(()) => Token::Text,
        };
        (tok, span)
    })
}

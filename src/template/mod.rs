//! Theme templates and placeholder substitution
//!
//! A template is a theme file containing literal `{{token}}` placeholders.
//! Expansion is strict: every placeholder in the template must have a
//! binding, otherwise rendering fails and nothing is written.
//!
//! # Example
//!
//! ```text
//! <key>name</key>
//! <string>{{name}}</string>
//! ...
//! <key>background</key>
//! <string>{{bg_hex}}</string>
//! ```

mod binding;
mod expand;
pub mod lexer;

pub use binding::{bind, SubstitutionMap, BG_HEX, BG_RGB, NAME};
pub use expand::{expand, promote, rewrite, stage};

use crate::error::Span;
use lexer::{lex, Token};

/// A piece of parsed template text
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, as a range into the template source
    Text(Span),
    /// Placeholder token such as `{{name}}`
    Placeholder { token: String, span: Span },
}

/// A parsed template
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

/// A placeholder without a binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub token: String,
    pub span: Span,
}

impl Template {
    /// Parse template text
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut segments: Vec<Segment> = Vec::new();

        for (token, span) in lex(&source) {
            match token {
                Token::Placeholder(token) => segments.push(Segment::Placeholder { token, span }),
                Token::Text | Token::Brace => {
                    // Merge adjacent literal runs
                    if let Some(Segment::Text(prev)) = segments.last_mut() {
                        if prev.end == span.start {
                            prev.end = span.end;
                            continue;
                        }
                    }
                    segments.push(Segment::Text(span));
                }
            }
        }

        Self { source, segments }
    }

    /// Original template text
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Replace every placeholder with its binding.
    ///
    /// Fails on the first placeholder that has no binding. Bindings that the
    /// template never uses are ignored.
    pub fn render(&self, bindings: &SubstitutionMap) -> Result<String, Unresolved> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(span) => out.push_str(&self.source[span.clone()]),
                Segment::Placeholder { token, span } => match bindings.get(token) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(Unresolved {
                            token: token.clone(),
                            span: span.clone(),
                        })
                    }
                },
            }
        }
        Ok(out)
    }
}

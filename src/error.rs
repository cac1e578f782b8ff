//! Error types for the theme build pipeline

use std::io;
use std::path::{Path, PathBuf};

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in template text
pub type Span = std::ops::Range<usize>;

/// Errors that abort a build run
#[derive(Debug, Error)]
pub enum BuildError {
    /// Catalog, product metadata or layout file missing or malformed
    #[error("configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// The fixed template file is absent from the template directory
    #[error("template not found: {}", path.display())]
    TemplateMissing { path: PathBuf },

    /// A placeholder in the template has no binding
    #[error("unresolved placeholder {token} in {}", template.display())]
    UnresolvedPlaceholder {
        template: PathBuf,
        token: String,
        span: Span,
        /// Template contents, kept for diagnostics
        text: String,
    },

    /// Copy, read, write or remove failure
    #[error("failed to {action} {}: {error}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

impl BuildError {
    /// Create a configuration error
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a filesystem error
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            error,
        }
    }

    /// Adapter for `map_err` on I/O results
    pub fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Self + 'a {
        move |error| Self::fs(action, path, error)
    }

    /// Format the error for terminal output.
    ///
    /// Unresolved placeholders are rendered with the offending template line
    /// annotated; every other error is its display string.
    pub fn report(&self) -> String {
        match self {
            Self::UnresolvedPlaceholder {
                template,
                token,
                span,
                text,
            } => {
                let filename = template.display().to_string();
                let mut buf = Vec::new();
                let written = Report::build(ReportKind::Error, filename.as_str(), span.start)
                    .with_message(format!("unresolved placeholder {}", token))
                    .with_label(
                        Label::new((filename.as_str(), span.clone()))
                            .with_message("no binding for this placeholder")
                            .with_color(Color::Red),
                    )
                    .with_note("bound placeholders are {{name}}, {{bg_rgb}} and {{bg_hex}}")
                    .finish()
                    .write((filename.as_str(), Source::from(text.as_str())), &mut buf);

                match written {
                    Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
                    Err(_) => self.to_string(),
                }
            }
            _ => self.to_string(),
        }
    }
}

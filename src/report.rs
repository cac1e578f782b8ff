//! Progress reporting for build runs
//!
//! The pipeline never prints directly. It tells a [`Reporter`] what is
//! happening and the reporter decides what the user sees.

use std::io::{self, Write};
use std::path::Path;

use owo_colors::OwoColorize;

use crate::strings::rule;

/// Width of the dashed rule framing section headers
pub const RULE_WIDTH: usize = 77;

/// Receiver of user-facing progress events
pub trait Reporter {
    /// A section header, optionally preceded by a bold title line
    fn header(&mut self, title: Option<&str>, message: &str);

    /// Work on one item is starting
    fn generating(&mut self, what: &str);

    /// A stale artifact was removed before the build
    fn cleaned(&mut self, path: &Path) {
        let _ = path;
    }

    /// A theme file was written
    fn written(&mut self, path: &Path) {
        let _ = path;
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn header(&mut self, _title: Option<&str>, _message: &str) {}

    fn generating(&mut self, _what: &str) {}
}

/// Writes styled progress to a terminal stream
#[derive(Debug)]
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    color: bool,
}

impl ConsoleReporter {
    /// Report to stdout
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Progress output is best effort; a closed stdout must not fail the build
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn header(&mut self, title: Option<&str>, message: &str) {
        if let Some(title) = title {
            let title = if self.color {
                title.bold().to_string()
            } else {
                title.to_string()
            };
            self.line("");
            self.line(&title);
        }
        let d = rule('-', RULE_WIDTH);
        let message = if self.color {
            message.bright_black().to_string()
        } else {
            message.to_string()
        };
        self.line("");
        self.line(&d);
        self.line(&message);
        self.line(&d);
    }

    fn generating(&mut self, what: &str) {
        self.line("");
        self.line(&format!("Generating {}...", what));
    }

    fn written(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let text = format!("  wrote {}", name);
        if self.color {
            self.line(&text.green().to_string());
        } else {
            self.line(&text);
        }
    }
}

/// Records events in memory, mainly for tests
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn header(&mut self, title: Option<&str>, message: &str) {
        match title {
            Some(title) => self.events.push(format!("header {}: {}", title, message)),
            None => self.events.push(format!("header {}", message)),
        }
    }

    fn generating(&mut self, what: &str) {
        self.events.push(format!("generating {}", what));
    }

    fn cleaned(&mut self, path: &Path) {
        self.events.push(format!("cleaned {}", file_name(path)));
    }

    fn written(&mut self, path: &Path) {
        self.events.push(format!("written {}", file_name(path)));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

//! Types shared by the parser registry and its parsers.

use std::fmt;
use std::str::FromStr;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::ConfigError;
use crate::path::combine;

/// Operation expressed by a leaf element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `<add>`: insert or replace a key.
    Add,
    /// `<remove>`: erase a key if present.
    Remove,
}

impl Action {
    /// Element names of all actions, lowercase.
    pub const TAGS: [&'static str; 2] = ["add", "remove"];

    /// Lowercase element name of this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
        }
    }
}

impl FromStr for Action {
    type Err = ConfigError;

    /// Parse an element name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("add") {
            Ok(Action::Add)
        } else if s.eq_ignore_ascii_case("remove") {
            Ok(Action::Remove)
        } else {
            Err(ConfigError::UnsupportedAction(s.to_string()))
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context passed through parsing operations.
///
/// Holds the stack of enclosing element names that prefixes every key, and
/// the optional diagnostics sink.
pub struct ParseContext<'a> {
    /// Enclosing element names, outermost first.
    sections: Vec<String>,

    /// Receiver for non-fatal findings.
    diagnostics: Option<&'a mut dyn DiagnosticSink>,
}

impl<'a> ParseContext<'a> {
    /// Create a context with an empty section stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            diagnostics: None,
        }
    }

    /// Forward diagnostics to `sink` in addition to logging them.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: &'a mut dyn DiagnosticSink) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Enter an element.
    pub fn push(&mut self, section: impl Into<String>) {
        self.sections.push(section.into());
    }

    /// Leave the innermost element.
    pub fn pop(&mut self) -> Option<String> {
        self.sections.pop()
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.sections.len()
    }

    /// Drop sections until the stack is `depth` deep.
    pub fn truncate(&mut self, depth: usize) {
        self.sections.truncate(depth);
    }

    /// Enclosing element names, outermost first.
    #[must_use]
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Full key for `name` at the current nesting level.
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        combine(self.sections.iter().map(String::as_str).chain([name]))
    }

    /// Report an informational finding.
    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(section = %combine(&self.sections), "{message}");
        self.report(Diagnostic::info(message));
    }

    /// Report a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(section = %combine(&self.sections), "{message}");
        self.report(Diagnostic::warning(message));
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        if let Some(sink) = self.diagnostics.as_deref_mut() {
            sink.report(diagnostic);
        }
    }
}

impl Default for ParseContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParseContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("sections", &self.sections)
            .field("has_diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

//! Diagnostic records for analysis findings.
//!
//! A [`Diagnostic`] is the host-facing output of one rule match: a stable
//! rule identifier, a severity, a human-readable message, and the source
//! position of the offending syntax. Diagnostics are immutable once
//! produced and serialize to JSON for whatever reporting channel the host
//! provides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding, no action required.
    Info,
    /// Suspicious or inefficient code; a fix is available or advisable.
    Warning,
    /// Code that is almost certainly wrong.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single analysis finding.
///
/// Produced once per rule match; never deduplicated here. Duplicate
/// suppression, if desired, is a caller concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable identifier of the rule that produced this finding.
    pub rule_id: String,
    /// Severity of the finding.
    pub severity: Severity,
    /// Human-readable message, including the offending source text.
    pub message: String,
    /// Byte span of the offending node in the rendered source.
    pub span: Span,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub col: u32,
}

impl Diagnostic {
    /// Create a warning diagnostic at the given span.
    ///
    /// Line and column default to 1:1; use [`Diagnostic::at`] to fill them
    /// from source text.
    pub fn warning(rule_id: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            rule_id: rule_id.into(),
            severity: Severity::Warning,
            message: message.into(),
            span,
            line: 1,
            col: 1,
        }
    }

    /// Fill in line/column from the source text this diagnostic's span
    /// refers to.
    pub fn at(mut self, source: &str) -> Self {
        let (line, col) = crate::text::byte_offset_to_position(source.as_bytes(), self.span.start);
        self.line = line;
        self.col = col;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}]: {}",
            self.line, self.col, self.severity, self.rule_id, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_constructor_defaults() {
        let d = Diagnostic::warning("TestRule", "something looks off", Span::new(4, 10));
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.rule_id, "TestRule");
        assert_eq!(d.line, 1);
        assert_eq!(d.col, 1);
    }

    #[test]
    fn at_fills_line_and_col() {
        let source = "first\nsecond line here\n";
        // "second" starts at byte 6 -> line 2, col 1
        let d = Diagnostic::warning("TestRule", "msg", Span::new(6, 12)).at(source);
        assert_eq!(d.line, 2);
        assert_eq!(d.col, 1);
    }

    #[test]
    fn display_format() {
        let d = Diagnostic::warning("TestRule", "msg", Span::new(0, 3));
        assert_eq!(d.to_string(), "1:1: warning [TestRule]: msg");
    }

    #[test]
    fn json_shape() {
        let d = Diagnostic::warning("TestRule", "msg", Span::new(2, 5));
        let value = serde_json::to_value(&d).unwrap();
        assert_eq!(value["rule_id"], "TestRule");
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["span"]["start"], 2);
        assert_eq!(value["span"]["end"], 5);
    }
}

//! Parse diagnostics.
//!
//! All language-level failures in this crate are lexical or syntactic
//! and are reported as `Diagnostic` values rather than panics. The
//! desugaring and rendering stages are total and never produce one.

use crate::span::Span;

/// A single error message anchored to a source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    /// Create an error diagnostic at the given span.
    pub fn error(message: impl Into<String>, span: Span) -> Diagnostic {
        Diagnostic {
            message: message.into(),
            span,
        }
    }

    /// The `(line, column, message)` shape expected by callers that
    /// present diagnostics themselves.
    pub fn triple(&self) -> (u32, u32, &str) {
        (self.span.start.line, self.span.start.column, &self.message)
    }
}

//! Core error type for the Newtype toolchain.
//!
//! Language-level errors are expressed as `Diagnostic` values;
//! `CoreError` is the outer wrapper returned by the pipeline entry
//! points. High-level tools (CLI, editors) are expected to render the
//! diagnostics themselves via [`CoreError::triples`].

use thiserror::Error;

use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// One or more lexical or syntactic errors. Parsing aborts at the
    /// first grammar violation, so in practice the list is short, but
    /// the lexer may have collected several before the parser ran.
    #[error("{}", .0.first().map(|d| d.message.as_str()).unwrap_or("parse error"))]
    Parse(Vec<Diagnostic>),
}

impl CoreError {
    pub fn from_diagnostic(diagnostic: Diagnostic) -> CoreError {
        CoreError::Parse(vec![diagnostic])
    }

    /// All diagnostics as `(line, column, message)` triples in source
    /// order.
    pub fn triples(&self) -> Vec<(u32, u32, String)> {
        match self {
            CoreError::Parse(diags) => diags
                .iter()
                .map(|d| {
                    let (line, column, message) = d.triple();
                    (line, column, message.to_string())
                })
                .collect(),
        }
    }
}

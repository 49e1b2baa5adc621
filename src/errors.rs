//! Compiler errors and rich terminal reporting.
//!
//! [`CompileError`] enumerates every way compilation can abort: one syntax
//! kind raised by the parser and the semantic kinds raised by lowering.
//! All of them stop compilation at the site; there is no recovery.
//!
//! Syntax errors carry the offending token's position and byte span so the
//! driver can wrap them in a [`SyntaxReport`] and let miette underline the
//! exact characters in the source.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::token::Span;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        message: String,
        line: u32,
        column: u32,
        span: Span,
    },

    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("undefined function '{0}'")]
    UndefinedFunction(String),

    #[error("function '{name}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Raised when a lowered function fails structural verification.
    /// This guards a compiler invariant rather than a user mistake.
    #[error("malformed IR for function '{name}': {reason}")]
    InvalidFunction { name: String, reason: String },
}

/// A syntax error bundled with its source text for miette rendering.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SyntaxReport {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("unexpected token")]
    pub span: SourceSpan,
}

impl SyntaxReport {
    pub fn new(message: impl Into<String>, src: &str, span: Span) -> Self {
        Self {
            message: message.into(),
            src: src.to_string(),
            span: (span.start, span.len()).into(),
        }
    }
}

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
    /// Loading cannot continue whatever the writer answers.
    Critical,
}

/// A problem found while walking the document, reported to the writer
/// through [`ColladaWriter::handle_error`](super::writer::ColladaWriter::handle_error).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub severity: Severity,
    pub message: String,
}

impl ParseError {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Critical,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.severity, self.message)
    }
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("collada parse error: {0}")]
    Parser(String),

    #[error("import cancelled")]
    Cancelled,

    #[error("import aborted: {0}")]
    Aborted(String),
}

/// Shared abort flag, checked by the loader between elements.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

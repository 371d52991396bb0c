//! cflat_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Defines the semantic error messages produced by the name-resolution pass
//! and the collection that accumulates them. Diagnostics are batched: the
//! resolver reports violations as it finds them and keeps going, so one pass
//! surfaces as many errors as possible.

use cflat_core::pos::SourcePos;
use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic error code (e.g., 2001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The source position this diagnostic points at, if any.
    pub pos: Option<SourcePos>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic error code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            pos: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a new diagnostic with a source position.
    pub fn at(pos: SourcePos, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            pos: Some(pos),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pos) = self.pos {
            write!(f, "{}: ", pos)?;
        }
        write!(f, "{} CF{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a pass.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report a message at a source position.
    pub fn report(&mut self, pos: SourcePos, message: &DiagnosticMessage, args: &[&str]) {
        self.add(Diagnostic::at(pos, message, args));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Sort diagnostics by source position. Diagnostics without a position
    /// sort first. Insertion order (traversal order) is already sorted for a
    /// single top-down pass; this is for merged collections.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by_key(|d| d.pos);
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::Error,
                message: $msg,
            }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::Warning,
                message: $msg,
            }
        };
    }

    // ========================================================================
    // Name-resolution errors (2000-2099)
    // ========================================================================
    pub const MULTIPLY_DECLARED_IDENTIFIER: DiagnosticMessage =
        diag!(2001, Error, "Multiply declared identifier");
    pub const UNDECLARED_IDENTIFIER: DiagnosticMessage =
        diag!(2002, Error, "Undeclared identifier");
    pub const NON_FUNCTION_DECLARED_VOID: DiagnosticMessage =
        diag!(2003, Error, "Non-function declared void");
    pub const INVALID_STRUCT_TYPE_NAME: DiagnosticMessage =
        diag!(2004, Error, "Invalid name of struct type");
    pub const DOT_ACCESS_OF_NON_STRUCT: DiagnosticMessage =
        diag!(2005, Error, "Dot-access of non-struct type");
    pub const INVALID_STRUCT_FIELD_NAME: DiagnosticMessage =
        diag!(2006, Error, "Invalid struct field name");
}

//! The core diagnostic type for technology source errors.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E201]: technology `Pottery` is defined more than once
///   --> tree.plantuml:14:1
///    |
/// 14 | node Pottery [
///    |      ^^^^^^^ duplicate definition
///    |
///   --> tree.plantuml:3:1
///    |
///  3 | node Pottery [
///    |      ------- first defined here
///    |
///    = help: rename one of the technologies or merge their descriptions
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use techgraph_parser::error::{Diagnostic, ErrorCode};
    /// # use techgraph_parser::Span;
    ///
    /// let diag = Diagnostic::error("undefined technology `Sailing`")
    ///     .with_code(ErrorCode::E200)
    ///     .with_label(Span::new(40..47), "not defined")
    ///     .with_help("add a `node Sailing [` block");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E200]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_defaults() {
        let diag = Diagnostic::error("unterminated technology block");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "unterminated technology block");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("technology `Pottery` is defined more than once")
            .with_code(ErrorCode::E201)
            .with_label(Span::new(100..107), "duplicate definition")
            .with_secondary_label(Span::new(20..27), "first defined here")
            .with_help("rename one of the technologies");

        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.help(), Some("rename one of the technologies"));
    }

    #[test]
    fn test_diagnostic_display() {
        let with_code = Diagnostic::error("undefined technology `Sailing`").with_code(ErrorCode::E200);
        let without_code = Diagnostic::warning("malformed technology header");

        assert_eq!(
            with_code.to_string(),
            "error[E200]: undefined technology `Sailing`"
        );
        assert_eq!(without_code.to_string(), "warning: malformed technology header");
    }
}

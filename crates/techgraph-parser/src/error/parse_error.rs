//! The ParseError type for wrapping source diagnostics.

use thiserror::Error;

use crate::error::Diagnostic;

/// Error returned when a technology source cannot be turned into a graph.
///
/// Wraps every error diagnostic collected during the pass, plus any
/// warnings emitted alongside them.
#[derive(Debug, Error)]
#[error("{}", summary(.diagnostics))]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// The first error diagnostic, with a count of the rest.
///
/// Warnings travel along with errors but never lead the summary.
fn summary(diagnostics: &[Diagnostic]) -> String {
    let Some(lead) = diagnostics
        .iter()
        .find(|d| d.severity().is_error())
        .or_else(|| diagnostics.first())
    else {
        return String::new();
    };
    match diagnostics.len() {
        1 => lead.to_string(),
        count => format!("{lead} (+{} more)", count - 1),
    }
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_error_from_diagnostic() {
        let diag = Diagnostic::error("undefined technology `Sailing`").with_code(ErrorCode::E200);
        let err: ParseError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "undefined technology `Sailing`");
    }

    #[test]
    fn test_parse_error_display_single() {
        let err: ParseError = Diagnostic::error("unterminated technology block").into();

        assert_eq!(err.to_string(), "error: unterminated technology block");
    }

    #[test]
    fn test_parse_error_display_multiple() {
        let diags = vec![
            Diagnostic::error("first error").with_code(ErrorCode::E200),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ];
        let err: ParseError = diags.into();

        assert_eq!(err.to_string(), "error[E200]: first error (+2 more)");
    }

    #[test]
    fn test_parse_error_display_leads_with_error() {
        let diags = vec![
            Diagnostic::warning("line is not a valid technology header").with_code(ErrorCode::E101),
            Diagnostic::error("technology `Fire` is never closed").with_code(ErrorCode::E100),
        ];
        let err: ParseError = diags.into();

        assert_eq!(
            err.to_string(),
            "error[E100]: technology `Fire` is never closed (+1 more)"
        );
    }
}

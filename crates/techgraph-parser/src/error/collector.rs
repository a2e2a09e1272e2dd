//! Collector for accumulating diagnostics during a single pass.
//!
//! The [`DiagnosticCollector`] lets the reader report every broken block
//! and dangling link at once instead of stopping at the first one.

use log::warn;

use crate::error::{Diagnostic, ParseError};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Stop early when an error has been emitted, handing back every
    /// diagnostic so far; otherwise keep collecting.
    ///
    /// Warnings are not logged here, only by [`finish`](Self::finish).
    pub fn bail_on_errors(self) -> Result<Self, ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }
        Ok(self)
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - If there are only warnings, they are logged and `Ok(())` is returned.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            warn!(diagnostic:% = diagnostic; "Technology source warning");
        }
        Ok(())
    }
}

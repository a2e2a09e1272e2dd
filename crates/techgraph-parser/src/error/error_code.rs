//! Error codes for the technology source diagnostics.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Structural errors found while reading lines
//! - `E2xx` - Reference errors found while resolving links

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structural Errors (E1xx)
    // =========================================================================
    /// Unterminated technology block.
    ///
    /// A `node Name [` header was never closed by a `]` line.
    E100,

    /// Malformed technology header.
    ///
    /// A line starts like a technology header but does not match
    /// `node <Name> [`. The line is ignored.
    E101,

    // =========================================================================
    // Reference Errors (E2xx)
    // =========================================================================
    /// Undefined technology.
    ///
    /// A link names a technology that is never defined.
    E200,

    /// Duplicate technology definition.
    ///
    /// A technology with this name has already been defined.
    E201,

    /// Self prerequisite.
    ///
    /// A strong link goes from a technology to itself, which can never be
    /// laid out left of itself.
    E202,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unterminated technology block",
            ErrorCode::E101 => "malformed technology header",
            ErrorCode::E200 => "undefined technology",
            ErrorCode::E201 => "duplicate technology definition",
            ErrorCode::E202 => "technology requires itself",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

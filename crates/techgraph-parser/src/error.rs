//! Error and diagnostic system for the technology source parser.
//!
//! Every problem found while reading a source is reported as a
//! [`Diagnostic`] with an [`ErrorCode`], labeled spans and optional help.
//! The reader collects all of them in one pass and returns them together
//! in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use techgraph_parser::error::{Diagnostic, ErrorCode};
//! # use techgraph_parser::Span;
//!
//! let diag = Diagnostic::error("technology `Pottery` is defined more than once")
//!     .with_code(ErrorCode::E201)
//!     .with_label(Span::new(100..107), "duplicate definition")
//!     .with_secondary_label(Span::new(5..12), "first defined here")
//!     .with_help("rename one of the technologies or merge their descriptions");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;

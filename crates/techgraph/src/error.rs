//! Error types for techgraph operations.
//!
//! This module provides the main error type [`TechGraphError`] which wraps
//! the error conditions of every pipeline stage.

use std::io;

use thiserror::Error;

use techgraph_core::GraphError;
use techgraph_parser::ParseError;

/// The main error type for techgraph operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so callers can render snippets around each span.
#[derive(Debug, Error)]
pub enum TechGraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Hierarchy error: {0}")]
    Hierarchy(String),
}

impl TechGraphError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

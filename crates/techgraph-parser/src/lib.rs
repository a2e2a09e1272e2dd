//! # Techgraph Parser
//!
//! Parser for technology trees authored in a PlantUML subset:
//!
//! ```text
//! @startuml
//! node Agriculture [
//!   Domesticated crops
//! ]
//! node Pottery [
//!   Storage vessels
//! ]
//! Agriculture --> Pottery
//! @enduml
//! ```
//!
//! `node Name [` ... `]` blocks declare technologies with their description;
//! `A --> B` marks `A` as a prerequisite of `B` (a strong edge) and any other
//! arrow such as `A ..> B` a plain association.
//!
//! ## Usage
//!
//! ```
//! # use techgraph_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = "node Fire [\n]\nnode Cooking [\n]\nFire --> Cooking\n";
//!     let graph = parse(source)?;
//!     assert_eq!(graph.nodes().len(), 2);
//!     assert!(graph.nodes()[0].is_root());
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod parser;
mod parser_types;
mod span;

pub use error::ParseError;
pub use span::{Span, Spanned};

use log::trace;

use techgraph_core::graph::TechGraph;

use elaborate::Builder;

/// Parse technology source text into a validated graph.
///
/// 1. **Read** - Split lines into technology blocks and links
/// 2. **Elaborate** - Resolve names, derive roots, build the graph
///
/// # Errors
///
/// Returns a [`ParseError`] carrying every diagnostic found: unterminated
/// blocks, undefined or duplicated technologies, self prerequisites. Any
/// warnings from reading travel in the same error; they are only logged
/// when parsing succeeds.
pub fn parse(source: &str) -> Result<TechGraph, ParseError> {
    let (statements, diagnostics) = parser::read_statements(source);
    let diagnostics = diagnostics.bail_on_errors()?;
    trace!(statements = statements.len(); "Technology source read");

    Builder::new(&statements, diagnostics).build()
}

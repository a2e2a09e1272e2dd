//! Techgraph - Layout constraints for technology dependency graphs.
//!
//! Loads a technology graph from PlantUML-style source or a JSON document,
//! validates its prerequisite hierarchy and derives the alignment and
//! separation constraints a constraint-based layout engine needs to draw it
//! as a left-to-right tree.

pub mod config;

mod error;
mod hierarchy;

pub use techgraph_core::{builder, constraint, graph, identifier, layout};

pub use error::TechGraphError;

use std::path::Path;

use log::{debug, info, trace, warn};

use techgraph_core::{
    ConstraintBuilder, constraint::Constraint, graph::GraphDocument, graph::TechGraph,
    layout::LayoutDocument,
};

use config::AppConfig;
use hierarchy::Hierarchy;

/// Input formats understood by [`GraphBuilder::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// `node Name [` ... `]` blocks and `A --> B` links.
    Plantuml,
    /// A `{"nodes": [...], "links": [...]}` document.
    Json,
}

impl InputFormat {
    /// Guess the format from a file extension; anything but `.json` is
    /// treated as PlantUML.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_json = path
            .as_ref()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json { Self::Json } else { Self::Plantuml }
    }
}

/// Builder for loading technology graphs and deriving their layout.
///
/// # Examples
///
/// ```rust
/// use techgraph::{GraphBuilder, config::AppConfig};
///
/// let source = "node Fire [\n]\nnode Cooking [\n]\nFire --> Cooking\n";
///
/// let builder = GraphBuilder::new(AppConfig::default());
/// let graph = builder.parse(source).expect("Failed to parse");
/// let constraints = builder.build_constraints(&graph).expect("Failed to build");
///
/// // y-alignment of the single child, its separation, the root alignment
/// assert_eq!(constraints.len(), 3);
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    config: AppConfig,
}

impl GraphBuilder {
    /// Create a new graph builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse PlantUML-style technology source into a graph.
    ///
    /// # Errors
    ///
    /// Returns `TechGraphError::Parse` carrying every diagnostic and the
    /// source text.
    pub fn parse(&self, source: &str) -> Result<TechGraph, TechGraphError> {
        info!("Parsing technology source");

        let graph = techgraph_parser::parse(source)
            .map_err(|err| TechGraphError::new_parse_error(err, source))?;

        debug!(nodes = graph.nodes().len(), edges = graph.edges().len(); "Technology source parsed");
        trace!(graph:?; "Parsed graph");

        Ok(graph)
    }

    /// Load a graph from a JSON document with `nodes` and `links` arrays.
    ///
    /// # Errors
    ///
    /// Returns `TechGraphError::Json` for malformed documents and
    /// `TechGraphError::Graph` for duplicate ids or dangling links.
    pub fn load_json(&self, source: &str) -> Result<TechGraph, TechGraphError> {
        info!("Loading JSON graph document");

        let document: GraphDocument = serde_json::from_str(source)?;
        let graph = document.into_graph()?;

        debug!(nodes = graph.nodes().len(), edges = graph.edges().len(); "JSON graph loaded");

        Ok(graph)
    }

    /// Load a graph in the given format.
    pub fn load(&self, source: &str, format: InputFormat) -> Result<TechGraph, TechGraphError> {
        match format {
            InputFormat::Plantuml => self.parse(source),
            InputFormat::Json => self.load_json(source),
        }
    }

    /// Validate the prerequisite hierarchy and derive layout constraints.
    ///
    /// # Errors
    ///
    /// Returns `TechGraphError::Hierarchy` when strong edges form a cycle
    /// and cycles are rejected, or `TechGraphError::Graph` when an edge
    /// references an unknown node.
    pub fn build_constraints(&self, graph: &TechGraph) -> Result<Vec<Constraint>, TechGraphError> {
        self.validate_hierarchy(graph)?;

        info!(nodes = graph.nodes().len(); "Building layout constraints");
        let builder = ConstraintBuilder::new(*self.config.constraints());
        let constraints = builder.build(graph.nodes(), graph.edges())?;

        trace!(constraints:?; "Derived constraints");

        Ok(constraints)
    }

    /// Build the full layout document for a graph.
    pub fn render_layout(&self, graph: &TechGraph) -> Result<LayoutDocument, TechGraphError> {
        let constraints = self.build_constraints(graph)?;
        Ok(LayoutDocument::new(
            graph,
            constraints,
            *self.config.layout(),
        ))
    }

    /// Build the layout document and serialize it as pretty-printed JSON.
    pub fn render_layout_json(&self, graph: &TechGraph) -> Result<String, TechGraphError> {
        let document = self.render_layout(graph)?;
        let json = serde_json::to_string_pretty(&document)?;

        debug!(bytes = json.len(); "Layout document serialized");

        Ok(json)
    }

    fn validate_hierarchy(&self, graph: &TechGraph) -> Result<(), TechGraphError> {
        let hierarchy = Hierarchy::new(graph);

        if let Some(cycle) = hierarchy.find_cycle() {
            let members = cycle
                .iter()
                .map(|id| format!("`{id}`"))
                .collect::<Vec<_>>()
                .join(", ");
            if self.config.validation().reject_cycles() {
                return Err(TechGraphError::Hierarchy(format!(
                    "prerequisite links form a cycle through {members}"
                )));
            }
            warn!(members = members.as_str(); "Prerequisite links form a cycle, separations will conflict");
            return Ok(());
        }

        debug!(
            depth = hierarchy.depth().unwrap_or_default(),
            strong_edges = hierarchy.strong_edge_count(),
            roots = graph.roots().count();
            "Hierarchy validated"
        );
        Ok(())
    }
}

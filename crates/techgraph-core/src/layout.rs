//! Layout document handed to an external constraint-based layout engine.
//!
//! A [`LayoutDocument`] bundles everything the engine needs for one run:
//! the nodes, the links with endpoints resolved to node indices, the derived
//! constraints and the engine parameters. Every record is freshly built so
//! the document never aliases the input graph.

use serde::{Deserialize, Serialize};

use crate::{
    constraint::{Axis, Constraint},
    graph::{Node, NodeIndex, TechGraph},
};

/// How the engine computes ideal link lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkLength {
    /// Lengths scaled by the symmetric difference of neighbour sets.
    SymmetricDiff { length: f32 },
    /// Lengths scaled by the Jaccard distance of neighbour sets.
    Jaccard { length: f32 },
}

impl Default for LinkLength {
    fn default() -> Self {
        LinkLength::SymmetricDiff { length: 50.0 }
    }
}

/// Iteration budgets for the three solver phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Iterations {
    pub unconstrained: u32,
    pub user_constraints: u32,
    pub all_constraints: u32,
}

impl Default for Iterations {
    fn default() -> Self {
        Self {
            unconstrained: 50,
            user_constraints: 100,
            all_constraints: 200,
        }
    }
}

/// Engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Axis along which strong links flow.
    flow_axis: Axis,
    /// Minimum spacing between a link's endpoints along the flow axis.
    flow_separation: f32,
    link_length: LinkLength,
    convergence_threshold: f64,
    avoid_overlaps: bool,
    iterations: Iterations,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            flow_axis: Axis::X,
            flow_separation: 300.0,
            link_length: LinkLength::default(),
            convergence_threshold: 1e-3,
            avoid_overlaps: true,
            iterations: Iterations::default(),
        }
    }
}

impl LayoutSettings {
    pub fn with_flow(mut self, axis: Axis, separation: f32) -> Self {
        self.flow_axis = axis;
        self.flow_separation = separation;
        self
    }

    pub fn with_link_length(mut self, link_length: LinkLength) -> Self {
        self.link_length = link_length;
        self
    }

    pub fn with_iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn flow_axis(&self) -> Axis {
        self.flow_axis
    }

    pub fn flow_separation(&self) -> f32 {
        self.flow_separation
    }

    pub fn link_length(&self) -> LinkLength {
        self.link_length
    }

    pub fn convergence_threshold(&self) -> f64 {
        self.convergence_threshold
    }

    pub fn avoid_overlaps(&self) -> bool {
        self.avoid_overlaps
    }

    pub fn iterations(&self) -> Iterations {
        self.iterations
    }
}

/// A link with both endpoints resolved to node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutLink {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub strong: bool,
}

/// Input for one layout engine run.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutDocument {
    nodes: Vec<Node>,
    links: Vec<LayoutLink>,
    constraints: Vec<Constraint>,
    settings: LayoutSettings,
}

impl LayoutDocument {
    /// Assembles a document from a validated graph and its constraints.
    pub fn new(graph: &TechGraph, constraints: Vec<Constraint>, settings: LayoutSettings) -> Self {
        let links = graph
            .edges()
            .iter()
            .filter_map(|edge| {
                let (source, target) = graph.endpoints(edge)?;
                Some(LayoutLink {
                    source,
                    target,
                    strong: edge.is_strong(),
                })
            })
            .collect();

        Self {
            nodes: graph.nodes().to_vec(),
            links,
            constraints,
            settings,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[LayoutLink] {
        &self.links
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }
}

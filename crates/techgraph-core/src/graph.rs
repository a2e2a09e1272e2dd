//! Technology graph data model.
//!
//! A [`TechGraph`] is an ordered list of [`Node`]s plus a list of [`Edge`]s
//! between them. Node positions in the list are the [`NodeIndex`] values
//! that layout constraints refer to; they are assigned once when the graph
//! is constructed and never change.
//!
//! Construction validates the two invariants every consumer relies on:
//! node identifiers are unique and every edge endpoint names an existing
//! node.

use std::{collections::HashMap, fmt};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Endpoint, GraphError},
    identifier::Id,
};

/// Position of a node in its graph's node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Creates a node index from a raw position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw position.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A technology in the dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: Id,
    name: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    root: bool,
}

impl Node {
    /// Creates a non-root node with an empty description.
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: String::new(),
            root: false,
        }
    }

    /// Sets the description text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the root flag.
    pub fn with_root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description text; may contain line breaks.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_root(&self) -> bool {
        self.root
    }
}

/// A directed edge between two technologies.
///
/// Strong edges are hierarchical parent→child relations and drive layout
/// constraints. Weak edges are plain associations that are drawn but never
/// constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    source: Id,
    target: Id,
    #[serde(default)]
    strong: bool,
}

impl Edge {
    pub fn new(source: impl Into<Id>, target: impl Into<Id>, strong: bool) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            strong,
        }
    }

    /// Creates a hierarchical parent→child edge.
    pub fn strong(source: impl Into<Id>, target: impl Into<Id>) -> Self {
        Self::new(source, target, true)
    }

    /// Creates an associative edge.
    pub fn weak(source: impl Into<Id>, target: impl Into<Id>) -> Self {
        Self::new(source, target, false)
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn is_strong(&self) -> bool {
        self.strong
    }
}

/// Map every node identifier to its position, rejecting duplicates.
pub(crate) fn index_nodes(nodes: &[Node]) -> Result<HashMap<Id, NodeIndex>, GraphError> {
    let mut index = HashMap::with_capacity(nodes.len());
    for (position, node) in nodes.iter().enumerate() {
        if let Some(first) = index.insert(node.id(), NodeIndex::new(position)) {
            return Err(GraphError::DuplicateNode {
                id: node.id(),
                first: first.index(),
                second: position,
            });
        }
    }
    Ok(index)
}

/// Resolve both endpoints of the edge at `position`.
pub(crate) fn resolve_edge(
    index: &HashMap<Id, NodeIndex>,
    position: usize,
    edge: &Edge,
) -> Result<(NodeIndex, NodeIndex), GraphError> {
    let lookup = |id: Id, endpoint: Endpoint| {
        index.get(&id).copied().ok_or(GraphError::UnknownNode {
            edge: position,
            endpoint,
            id,
        })
    };
    Ok((
        lookup(edge.source(), Endpoint::Source)?,
        lookup(edge.target(), Endpoint::Target)?,
    ))
}

/// A validated technology graph.
#[derive(Debug, Clone)]
pub struct TechGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<Id, NodeIndex>,
}

impl TechGraph {
    /// Builds a graph, assigning node indices in input order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if two nodes share an identifier
    /// and [`GraphError::UnknownNode`] if an edge names a node that does not
    /// exist.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let index = index_nodes(&nodes)?;
        for (position, edge) in edges.iter().enumerate() {
            resolve_edge(&index, position, edge)?;
        }

        debug!(nodes = nodes.len(), edges = edges.len(); "Technology graph validated");

        Ok(Self {
            nodes,
            edges,
            index,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at `index`, if any.
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.index())
    }

    /// Returns the index assigned to the node with identifier `id`.
    pub fn node_index(&self, id: Id) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    /// Resolves an edge of this graph to node indices.
    pub fn endpoints(&self, edge: &Edge) -> Option<(NodeIndex, NodeIndex)> {
        Some((self.node_index(edge.source())?, self.node_index(edge.target())?))
    }

    /// Iterates over the strong edges in input order.
    pub fn strong_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|edge| edge.is_strong())
    }

    /// Iterates over the indices of nodes flagged as roots.
    pub fn roots(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_root())
            .map(|(position, _)| NodeIndex::new(position))
    }
}

/// Serialized form of a graph: the `nodes` and `links` arrays produced by
/// the data-preparation step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Edge>,
}

impl GraphDocument {
    /// Validates the document into a [`TechGraph`].
    ///
    /// # Errors
    ///
    /// See [`TechGraph::new`].
    pub fn into_graph(self) -> Result<TechGraph, GraphError> {
        TechGraph::new(self.nodes, self.links)
    }
}

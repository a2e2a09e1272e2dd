//! Constraint derivation from strong parent/child edges.
//!
//! [`ConstraintBuilder`] turns a node list and an edge list into the
//! alignment and separation constraints that keep a technology tree
//! readable when handed to a constraint-based layout engine:
//!
//! - a parent with a single child stays on the child's row (`y` alignment),
//! - siblings share a column (`x` alignment),
//! - every child sits at least `gap` to the right of its parent,
//! - all root nodes share a column.
//!
//! Only strong edges drive constraints. Weak edges are still validated so
//! that a dangling reference anywhere rejects the input.

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use serde::Deserialize;

use crate::{
    constraint::{AlignmentConstraint, Axis, Constraint, SeparationConstraint},
    error::GraphError,
    graph::{Edge, Node, NodeIndex, index_nodes, resolve_edge},
};

/// Default gap between a parent and each of its children.
pub const DEFAULT_GAP: f32 = 25.0;

/// Which constraint families are emitted, and the separation gap.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConstraintConfig {
    gap: f32,
    align_single_child: bool,
    align_siblings: bool,
    separate_children: bool,
    align_roots: bool,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            align_single_child: true,
            align_siblings: true,
            separate_children: true,
            align_roots: true,
        }
    }
}

impl ConstraintConfig {
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_single_child_alignment(mut self, enabled: bool) -> Self {
        self.align_single_child = enabled;
        self
    }

    pub fn with_sibling_alignment(mut self, enabled: bool) -> Self {
        self.align_siblings = enabled;
        self
    }

    pub fn with_child_separation(mut self, enabled: bool) -> Self {
        self.separate_children = enabled;
        self
    }

    pub fn with_root_alignment(mut self, enabled: bool) -> Self {
        self.align_roots = enabled;
        self
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn align_single_child(&self) -> bool {
        self.align_single_child
    }

    pub fn align_siblings(&self) -> bool {
        self.align_siblings
    }

    pub fn separate_children(&self) -> bool {
        self.separate_children
    }

    pub fn align_roots(&self) -> bool {
        self.align_roots
    }
}

/// Derives layout constraints from a node/edge list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintBuilder {
    config: ConstraintConfig,
}

impl ConstraintBuilder {
    pub fn new(config: ConstraintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConstraintConfig {
        &self.config
    }

    /// Builds the constraint list.
    ///
    /// Output order: for each parent, in order of its first strong edge,
    /// its alignment followed by one separation per child; the root
    /// alignment comes last.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if node identifiers are not unique or any
    /// edge, strong or not, references an unknown node. Nothing is returned
    /// in that case.
    pub fn build(&self, nodes: &[Node], edges: &[Edge]) -> Result<Vec<Constraint>, GraphError> {
        let index = index_nodes(nodes)?;

        let mut children: IndexMap<NodeIndex, IndexSet<NodeIndex>> = IndexMap::new();
        for (position, edge) in edges.iter().enumerate() {
            let (source, target) = resolve_edge(&index, position, edge)?;
            if !edge.is_strong() {
                continue;
            }
            if !children.entry(source).or_default().insert(target) {
                trace!(parent = source.index(), child = target.index(); "Skipping repeated strong edge");
            }
        }

        let mut constraints = Vec::new();
        for (&parent, kids) in &children {
            if kids.len() == 1 {
                if self.config.align_single_child {
                    let only_child = kids.iter().copied();
                    constraints.push(
                        AlignmentConstraint::aligned(Axis::Y, std::iter::once(parent).chain(only_child))
                            .into(),
                    );
                }
            } else if self.config.align_siblings {
                constraints.push(AlignmentConstraint::aligned(Axis::X, kids.iter().copied()).into());
            }

            if self.config.separate_children {
                constraints.extend(kids.iter().map(|&child| {
                    Constraint::from(SeparationConstraint::new(
                        Axis::X,
                        parent,
                        child,
                        self.config.gap,
                    ))
                }));
            }
        }

        if self.config.align_roots {
            let roots = nodes
                .iter()
                .enumerate()
                .filter(|(_, node)| node.is_root())
                .map(|(position, _)| NodeIndex::new(position));
            constraints.push(AlignmentConstraint::aligned(Axis::X, roots).into());
        }

        debug!(
            parents = children.len(),
            constraints = constraints.len();
            "Layout constraints derived"
        );

        Ok(constraints)
    }
}

/// Builds constraints with the default configuration.
///
/// # Examples
///
/// ```
/// use techgraph_core::{build_constraints, graph::{Edge, Node}};
///
/// let nodes = vec![
///     Node::new("Fire", "Fire").with_root(true),
///     Node::new("Cooking", "Cooking"),
/// ];
/// let edges = vec![Edge::strong("Fire", "Cooking")];
///
/// let constraints = build_constraints(&nodes, &edges).unwrap();
/// assert_eq!(constraints.len(), 3);
/// ```
///
/// # Errors
///
/// See [`ConstraintBuilder::build`].
pub fn build_constraints(nodes: &[Node], edges: &[Edge]) -> Result<Vec<Constraint>, GraphError> {
    ConstraintBuilder::default().build(nodes, edges)
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::{BTreeSet, HashMap};

    use proptest::prelude::*;

    use super::*;
    use crate::identifier::Id;

    // ===================
    // Strategies
    // ===================

    /// A graph of up to 12 nodes with arbitrary (possibly repeated) edges.
    fn graph_strategy() -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
        (1usize..12).prop_flat_map(|count| {
            let roots = proptest::collection::vec(any::<bool>(), count);
            let edges =
                proptest::collection::vec((0..count, 0..count, any::<bool>()), 0..30);
            (roots, edges).prop_map(move |(roots, edges)| {
                let nodes = roots
                    .iter()
                    .enumerate()
                    .map(|(i, &root)| {
                        Node::new(Id::new(&format!("prop_{i}")), format!("N{i}")).with_root(root)
                    })
                    .collect();
                let edges = edges
                    .into_iter()
                    .map(|(s, t, strong)| {
                        Edge::new(
                            Id::new(&format!("prop_{s}")),
                            Id::new(&format!("prop_{t}")),
                            strong,
                        )
                    })
                    .collect();
                (nodes, edges)
            })
        })
    }

    /// Distinct strong (parent, child) pairs grouped by parent, in first-seen order.
    fn strong_children(nodes: &[Node], edges: &[Edge]) -> Vec<(usize, Vec<usize>)> {
        let position: HashMap<Id, usize> =
            nodes.iter().enumerate().map(|(i, n)| (n.id(), i)).collect();
        let mut grouped: Vec<(usize, Vec<usize>)> = Vec::new();
        for edge in edges.iter().filter(|e| e.is_strong()) {
            let (s, t) = (position[&edge.source()], position[&edge.target()]);
            match grouped.iter_mut().find(|(p, _)| *p == s) {
                Some((_, kids)) if kids.contains(&t) => {}
                Some((_, kids)) => kids.push(t),
                None => grouped.push((s, vec![t])),
            }
        }
        grouped
    }

    // ===================
    // Property Test Functions
    // ===================

    /// One separation per distinct strong pair, each pointing parent → child.
    fn check_separation_count(nodes: &[Node], edges: &[Edge]) -> Result<(), TestCaseError> {
        let constraints = build_constraints(nodes, edges).unwrap();
        let expected: BTreeSet<(usize, usize)> = strong_children(nodes, edges)
            .into_iter()
            .flat_map(|(p, kids)| kids.into_iter().map(move |k| (p, k)))
            .collect();
        let separations: Vec<(usize, usize)> = constraints
            .iter()
            .filter_map(Constraint::as_separation)
            .map(|s| (s.left().index(), s.right().index()))
            .collect();

        prop_assert_eq!(separations.len(), expected.len());
        prop_assert_eq!(separations.into_iter().collect::<BTreeSet<_>>(), expected);
        Ok(())
    }

    /// Single-child parents get a `y` row, multi-child parents one `x` column.
    fn check_alignment_shapes(nodes: &[Node], edges: &[Edge]) -> Result<(), TestCaseError> {
        let constraints = build_constraints(nodes, edges).unwrap();
        let alignments: Vec<&AlignmentConstraint> = constraints
            .iter()
            .filter_map(Constraint::as_alignment)
            .collect();
        let grouped = strong_children(nodes, edges);

        // Every alignment but the trailing root alignment belongs to one parent.
        prop_assert_eq!(alignments.len(), grouped.len() + 1);
        for ((parent, kids), alignment) in grouped.iter().zip(&alignments) {
            let aligned: Vec<usize> = alignment.nodes().map(NodeIndex::index).collect();
            prop_assert!(alignment.offsets().iter().all(|o| o.offset() == 0.0));
            if kids.len() == 1 {
                prop_assert_eq!(alignment.axis(), Axis::Y);
                prop_assert_eq!(aligned, vec![*parent, kids[0]]);
            } else {
                prop_assert_eq!(alignment.axis(), Axis::X);
                prop_assert_eq!(&aligned, kids);
            }
        }
        Ok(())
    }

    /// The root alignment lists exactly the root-flagged nodes.
    fn check_root_alignment(nodes: &[Node], edges: &[Edge]) -> Result<(), TestCaseError> {
        let constraints = build_constraints(nodes, edges).unwrap();
        let last = constraints.last().and_then(Constraint::as_alignment);
        prop_assert!(last.is_some(), "root alignment must come last");

        let roots: BTreeSet<usize> = last.unwrap().nodes().map(NodeIndex::index).collect();
        let expected: BTreeSet<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_root())
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(last.unwrap().axis(), Axis::X);
        prop_assert_eq!(roots, expected);
        Ok(())
    }

    /// An unknown endpoint anywhere yields an error, never a partial list.
    fn check_unknown_reference_fails(
        nodes: &[Node],
        edges: &[Edge],
        at: usize,
    ) -> Result<(), TestCaseError> {
        let mut edges = edges.to_vec();
        let at = at % (edges.len() + 1);
        edges.insert(at, Edge::weak(nodes[0].id(), Id::new("prop_missing")));

        prop_assert!(build_constraints(nodes, &edges).is_err());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn separation_count_matches_strong_pairs((nodes, edges) in graph_strategy()) {
            check_separation_count(&nodes, &edges)?;
        }

        #[test]
        fn alignment_shapes_follow_child_count((nodes, edges) in graph_strategy()) {
            check_alignment_shapes(&nodes, &edges)?;
        }

        #[test]
        fn root_alignment_lists_roots((nodes, edges) in graph_strategy()) {
            check_root_alignment(&nodes, &edges)?;
        }

        #[test]
        fn unknown_reference_fails((nodes, edges) in graph_strategy(), at in 0usize..64) {
            check_unknown_reference_fails(&nodes, &edges, at)?;
        }
    }
}

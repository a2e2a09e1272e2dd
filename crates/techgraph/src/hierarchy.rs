//! Strong-edge hierarchy analysis.
//!
//! Separation constraints push every child to the right of its parent, so
//! the strong edges have to form a DAG for the layout to be satisfiable. This module
//! projects the strong edges onto a [`DiGraph`] and checks exactly that.

use petgraph::{
    algo::{kosaraju_scc, toposort},
    graph::{DiGraph, NodeIndex as GraphIndex},
};

use techgraph_core::{graph::TechGraph, identifier::Id};

/// The strong-edge projection of a [`TechGraph`].
///
/// Node `i` of the projection is node `i` of the source graph.
pub(crate) struct Hierarchy {
    graph: DiGraph<Id, ()>,
}

impl Hierarchy {
    pub(crate) fn new(techgraph: &TechGraph) -> Self {
        let mut graph = DiGraph::with_capacity(techgraph.nodes().len(), techgraph.edges().len());
        for node in techgraph.nodes() {
            graph.add_node(node.id());
        }
        for edge in techgraph.strong_edges() {
            if let Some((parent, child)) = techgraph.endpoints(edge) {
                graph.update_edge(
                    GraphIndex::new(parent.index()),
                    GraphIndex::new(child.index()),
                    (),
                );
            }
        }
        Self { graph }
    }

    /// Returns the members of the first strong cycle found, in node order.
    pub(crate) fn find_cycle(&self) -> Option<Vec<Id>> {
        kosaraju_scc(&self.graph)
            .into_iter()
            .find(|scc| match scc.as_slice() {
                [single] => self.graph.contains_edge(*single, *single),
                _ => true,
            })
            .map(|mut scc| {
                scc.sort();
                scc.into_iter().map(|idx| self.graph[idx]).collect()
            })
    }

    /// Number of levels in the hierarchy, `None` when it is cyclic.
    ///
    /// A node's level is one more than the deepest of its parents, so a lone
    /// root counts as one level and an empty graph as zero.
    pub(crate) fn depth(&self) -> Option<usize> {
        let order = toposort(&self.graph, None).ok()?;

        let mut levels = vec![0usize; self.graph.node_count()];
        for idx in order {
            let level = self
                .graph
                .neighbors_directed(idx, petgraph::Direction::Incoming)
                .map(|parent| levels[parent.index()] + 1)
                .max()
                .unwrap_or(1);
            levels[idx.index()] = level;
        }
        Some(levels.into_iter().max().unwrap_or(0))
    }

    pub(crate) fn strong_edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use techgraph_core::graph::{Edge, Node};

    use super::*;

    fn graph(nodes: &[&str], edges: Vec<Edge>) -> TechGraph {
        let nodes = nodes.iter().map(|name| Node::new(*name, *name)).collect();
        TechGraph::new(nodes, edges).unwrap()
    }

    #[test]
    fn test_chain_depth() {
        let hierarchy = Hierarchy::new(&graph(
            &["fire", "cooking", "pottery"],
            vec![Edge::strong("fire", "cooking"), Edge::strong("cooking", "pottery")],
        ));

        assert_eq!(hierarchy.find_cycle(), None);
        assert_eq!(hierarchy.depth(), Some(3));
    }

    #[test]
    fn test_depth_follows_longest_path() {
        let hierarchy = Hierarchy::new(&graph(
            &["a", "b", "c", "d"],
            vec![
                Edge::strong("a", "b"),
                Edge::strong("b", "c"),
                Edge::strong("a", "c"),
                Edge::strong("c", "d"),
            ],
        ));

        assert_eq!(hierarchy.depth(), Some(4));
    }

    #[test]
    fn test_weak_edges_ignored() {
        let hierarchy = Hierarchy::new(&graph(
            &["a", "b"],
            vec![Edge::strong("a", "b"), Edge::weak("b", "a")],
        ));

        assert_eq!(hierarchy.find_cycle(), None);
        assert_eq!(hierarchy.strong_edge_count(), 1);
    }

    #[test]
    fn test_cycle_members_reported() {
        let hierarchy = Hierarchy::new(&graph(
            &["a", "b", "c", "d"],
            vec![
                Edge::strong("a", "b"),
                Edge::strong("b", "c"),
                Edge::strong("c", "b"),
                Edge::strong("c", "d"),
            ],
        ));

        assert_eq!(hierarchy.find_cycle(), Some(vec![Id::new("b"), Id::new("c")]));
        assert_eq!(hierarchy.depth(), None);
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let hierarchy = Hierarchy::new(&graph(&["a"], vec![Edge::strong("a", "a")]));

        assert_eq!(hierarchy.find_cycle(), Some(vec![Id::new("a")]));
    }

    #[test]
    fn test_empty_graph() {
        let hierarchy = Hierarchy::new(&graph(&[], vec![]));

        assert_eq!(hierarchy.find_cycle(), None);
        assert_eq!(hierarchy.depth(), Some(0));
    }
}

//! Error types for graph validation and constraint derivation.

use thiserror::Error;

use crate::identifier::Id;

/// Which end of an edge failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// Errors raised when node/edge input is not a well-formed graph.
///
/// Any of these rejects the whole input; no partial constraint list is
/// ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge #{edge} references unknown {endpoint} node `{id}`")]
    UnknownNode {
        edge: usize,
        endpoint: Endpoint,
        id: Id,
    },

    #[error("node `{id}` is defined more than once (positions {first} and {second})")]
    DuplicateNode { id: Id, first: usize, second: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_node_display() {
        let err = GraphError::UnknownNode {
            edge: 3,
            endpoint: Endpoint::Target,
            id: Id::new("Iron_Working"),
        };

        assert_eq!(
            err.to_string(),
            "edge #3 references unknown target node `Iron_Working`"
        );
    }

    #[test]
    fn test_duplicate_node_display() {
        let err = GraphError::DuplicateNode {
            id: Id::new("Pottery"),
            first: 0,
            second: 4,
        };

        assert_eq!(
            err.to_string(),
            "node `Pottery` is defined more than once (positions 0 and 4)"
        );
    }
}

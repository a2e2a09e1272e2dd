//! Layout constraint model.
//!
//! Constraints are expressed against [`NodeIndex`] values and serialize to
//! the record shapes constraint-based layout engines accept:
//!
//! ```text
//! {"type": "alignment", "axis": "y", "offsets": [{"node": 0, "offset": 0.0}, ...]}
//! {"axis": "x", "left": 0, "right": 1, "gap": 25.0}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

use crate::graph::NodeIndex;

/// Coordinate axis a constraint applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// A node taking part in an alignment, displaced by `offset` from the
/// shared coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offset {
    node: NodeIndex,
    offset: f32,
}

impl Offset {
    pub fn new(node: NodeIndex, offset: f32) -> Self {
        Self { node, offset }
    }

    /// An offset of zero: the node sits exactly on the shared coordinate.
    pub fn aligned(node: NodeIndex) -> Self {
        Self::new(node, 0.0)
    }

    pub fn node(&self) -> NodeIndex {
        self.node
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

/// All listed nodes share one coordinate on `axis`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentConstraint {
    axis: Axis,
    offsets: Vec<Offset>,
}

impl AlignmentConstraint {
    pub fn new(axis: Axis, offsets: Vec<Offset>) -> Self {
        Self { axis, offsets }
    }

    /// Aligns `nodes` at offset zero, keeping their order.
    pub fn aligned(axis: Axis, nodes: impl IntoIterator<Item = NodeIndex>) -> Self {
        Self::new(axis, nodes.into_iter().map(Offset::aligned).collect())
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Iterates over the aligned node indices.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.offsets.iter().map(Offset::node)
    }
}

/// `left + gap <= right` on `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationConstraint {
    axis: Axis,
    left: NodeIndex,
    right: NodeIndex,
    gap: f32,
}

impl SeparationConstraint {
    pub fn new(axis: Axis, left: NodeIndex, right: NodeIndex, gap: f32) -> Self {
        Self {
            axis,
            left,
            right,
            gap,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn left(&self) -> NodeIndex {
        self.left
    }

    pub fn right(&self) -> NodeIndex {
        self.right
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }
}

/// A layout constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Alignment(AlignmentConstraint),
    Separation(SeparationConstraint),
}

impl Constraint {
    pub fn axis(&self) -> Axis {
        match self {
            Constraint::Alignment(alignment) => alignment.axis(),
            Constraint::Separation(separation) => separation.axis(),
        }
    }

    pub fn as_alignment(&self) -> Option<&AlignmentConstraint> {
        match self {
            Constraint::Alignment(alignment) => Some(alignment),
            Constraint::Separation(_) => None,
        }
    }

    pub fn as_separation(&self) -> Option<&SeparationConstraint> {
        match self {
            Constraint::Separation(separation) => Some(separation),
            Constraint::Alignment(_) => None,
        }
    }
}

impl From<AlignmentConstraint> for Constraint {
    fn from(alignment: AlignmentConstraint) -> Self {
        Constraint::Alignment(alignment)
    }
}

impl From<SeparationConstraint> for Constraint {
    fn from(separation: SeparationConstraint) -> Self {
        Constraint::Separation(separation)
    }
}

// Separation records carry no `type` field; engines treat untyped records
// as separations.
impl Serialize for Constraint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Constraint::Alignment(alignment) => {
                let mut state = serializer.serialize_struct("AlignmentConstraint", 3)?;
                state.serialize_field("type", "alignment")?;
                state.serialize_field("axis", &alignment.axis)?;
                state.serialize_field("offsets", &alignment.offsets)?;
                state.end()
            }
            Constraint::Separation(separation) => {
                let mut state = serializer.serialize_struct("SeparationConstraint", 4)?;
                state.serialize_field("axis", &separation.axis)?;
                state.serialize_field("left", &separation.left)?;
                state.serialize_field("right", &separation.right)?;
                state.serialize_field("gap", &separation.gap)?;
                state.end()
            }
        }
    }
}

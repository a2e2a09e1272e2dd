//! Techgraph Core Types and Constraint Derivation
//!
//! This crate provides the foundational types for technology dependency
//! graphs and the derivation of layout constraints from them. It includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::Id`])
//! - **Graph**: Nodes, edges and the validated [`graph::TechGraph`]
//! - **Constraints**: Alignment and separation constraints ([`constraint`] module)
//! - **Builder**: Constraint derivation from strong edges ([`builder`] module)
//! - **Layout**: The document handed to a layout engine ([`layout`] module)

pub mod builder;
pub mod constraint;
pub mod error;
pub mod graph;
pub mod identifier;
pub mod layout;

pub use builder::{ConstraintBuilder, ConstraintConfig, build_constraints};
pub use error::GraphError;

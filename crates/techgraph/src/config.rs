//! Configuration types for technology graph layout generation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every section and field is optional and falls back to
//! the defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`ConstraintConfig`] - Which constraint families are derived, and the gap.
//! - [`LayoutSettings`] - Parameters handed to the layout engine.
//! - [`ValidationConfig`] - Extra checks applied before deriving constraints.
//!
//! # Example
//!
//! ```
//! # use techgraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.constraints().gap(), 25.0);
//! assert!(config.validation().reject_cycles());
//! ```

use serde::Deserialize;

pub use techgraph_core::{
    builder::ConstraintConfig,
    layout::{Iterations, LayoutSettings, LinkLength},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Constraint derivation section.
    #[serde(default)]
    constraints: ConstraintConfig,

    /// Layout engine section.
    #[serde(default)]
    layout: LayoutSettings,

    /// Validation section.
    #[serde(default)]
    validation: ValidationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        constraints: ConstraintConfig,
        layout: LayoutSettings,
        validation: ValidationConfig,
    ) -> Self {
        Self {
            constraints,
            layout,
            validation,
        }
    }

    pub fn constraints(&self) -> &ConstraintConfig {
        &self.constraints
    }

    pub fn layout(&self) -> &LayoutSettings {
        &self.layout
    }

    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }
}

/// Checks applied to a graph before constraints are derived.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ValidationConfig {
    /// Reject graphs whose strong edges form a cycle. When disabled the
    /// cycle is only logged.
    #[serde(default = "default_reject_cycles")]
    reject_cycles: bool,
}

fn default_reject_cycles() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reject_cycles: default_reject_cycles(),
        }
    }
}

impl ValidationConfig {
    pub fn new(reject_cycles: bool) -> Self {
        Self { reject_cycles }
    }

    pub fn reject_cycles(&self) -> bool {
        self.reject_cycles
    }
}

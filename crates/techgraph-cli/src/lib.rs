//! CLI logic for the techgraph layout tool.
//!
//! Reads a technology graph, derives its layout constraints and writes the
//! layout document as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, FormatArg};

use std::fs;

use log::info;

use techgraph::{GraphBuilder, TechGraphError};

/// Run the techgraph CLI application
///
/// # Errors
///
/// Returns `TechGraphError` for file I/O, configuration, parsing, graph
/// validation or hierarchy errors.
pub fn run(args: &Args) -> Result<(), TechGraphError> {
    let format = args.format.resolve(&args.input);
    info!(
        input_path = args.input,
        output_path = args.output,
        format:?;
        "Processing technology graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = GraphBuilder::new(app_config);
    let graph = builder.load(&source, format)?;
    let json = builder.render_layout_json(&graph)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout document written");

    Ok(())
}

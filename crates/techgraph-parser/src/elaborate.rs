//! Resolution of statements into a [`TechGraph`].
//!
//! Technologies become nodes in declaration order, links become edges in
//! link order. A technology is a root when no prerequisite link points at
//! it. Links may name technologies declared further down the source.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use techgraph_core::{
    graph::{Edge, Node, TechGraph},
    identifier::Id,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types::{Link, Statement, TechnologyBlock},
    span::{Span, Spanned},
};

/// Builds the graph from parsed statements, collecting every reference
/// error before giving up.
pub(crate) struct Builder<'a, 'src> {
    statements: &'a [Statement<'src>],
    diagnostics: DiagnosticCollector,
}

impl<'a, 'src> Builder<'a, 'src> {
    /// `diagnostics` carries whatever the reader already reported, so
    /// its warnings end up next to any elaboration error.
    pub(crate) fn new(statements: &'a [Statement<'src>], diagnostics: DiagnosticCollector) -> Self {
        Self {
            statements,
            diagnostics,
        }
    }

    pub(crate) fn build(mut self) -> Result<TechGraph, ParseError> {
        let technologies = self.collect_technologies();
        let links = self.collect_links(&technologies);

        let with_prerequisite: HashSet<&str> = links
            .iter()
            .filter(|link| link.kind().is_strong())
            .map(|link| *link.target.inner())
            .collect();

        let nodes: Vec<Node> = technologies
            .values()
            .map(|block| {
                let name = *block.name.inner();
                Node::new(Id::new(name), name)
                    .with_text(block.text())
                    .with_root(!with_prerequisite.contains(name))
            })
            .collect();
        let edges: Vec<Edge> = links
            .iter()
            .map(|link| {
                Edge::new(
                    Id::new(link.source.inner()),
                    Id::new(link.target.inner()),
                    link.kind().is_strong(),
                )
            })
            .collect();

        self.diagnostics.finish()?;

        debug!(technologies = nodes.len(), links = edges.len(); "Technology source elaborated");

        TechGraph::new(nodes, edges).map_err(|err| Diagnostic::error(err.to_string()).into())
    }

    /// Technologies by name, first definition wins.
    fn collect_technologies(&mut self) -> IndexMap<&'src str, &'a TechnologyBlock<'src>> {
        let mut technologies: IndexMap<&'src str, &'a TechnologyBlock<'src>> = IndexMap::new();
        for statement in self.statements {
            let Statement::Technology(block) = statement else {
                continue;
            };
            let name = *block.name.inner();
            if let Some(first) = technologies.get(name) {
                self.diagnostics.emit(
                    Diagnostic::error(format!("technology `{name}` is defined more than once"))
                        .with_code(ErrorCode::E201)
                        .with_label(block.name.span(), "duplicate definition")
                        .with_secondary_label(first.name.span(), "first defined here")
                        .with_help("rename one of the technologies or merge their descriptions"),
                );
                continue;
            }
            technologies.insert(name, block);
        }
        technologies
    }

    /// Links whose endpoints both resolve.
    fn collect_links(
        &mut self,
        technologies: &IndexMap<&'src str, &'a TechnologyBlock<'src>>,
    ) -> Vec<Link<'src>> {
        let mut links = Vec::new();
        for statement in self.statements {
            let Statement::Link(link) = statement else {
                continue;
            };

            let source_ok = self.check_defined(link.source, technologies);
            let target_ok = self.check_defined(link.target, technologies);
            if !(source_ok && target_ok) {
                continue;
            }

            if link.kind().is_strong() && link.source.inner() == link.target.inner() {
                self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "technology `{}` is listed as its own prerequisite",
                        link.source.inner()
                    ))
                    .with_code(ErrorCode::E202)
                    .with_label(link.span(), ErrorCode::E202.description())
                    .with_help("use `..>` for an associative link or remove the line"),
                );
                continue;
            }

            links.push(*link);
        }
        links
    }

    fn check_defined(
        &mut self,
        name: Spanned<&'src str>,
        technologies: &IndexMap<&'src str, &'a TechnologyBlock<'src>>,
    ) -> bool {
        if technologies.contains_key(name.inner()) {
            return true;
        }
        self.diagnostics.emit(undefined_technology(*name.inner(), name.span()));
        false
    }
}

fn undefined_technology(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(format!("undefined technology `{name}`"))
        .with_code(ErrorCode::E200)
        .with_label(span, "not defined")
        .with_help(format!("add a `node {name} [` block describing it"))
}

//! Statements read from a technology source, before name resolution.

use crate::span::{Span, Spanned};

/// How a link relates its two technologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LinkKind {
    /// `-->`: the source is a prerequisite of the target.
    Prerequisite,
    /// Any other arrow (`..>`, `->`, `.>`): the source merely helps.
    Association,
}

impl LinkKind {
    /// Classifies an arrow token such as `-->` or `..>`.
    pub(crate) fn from_arrow(arrow: &str) -> Self {
        if arrow.contains("-->") {
            LinkKind::Prerequisite
        } else {
            LinkKind::Association
        }
    }

    pub(crate) fn is_strong(self) -> bool {
        matches!(self, LinkKind::Prerequisite)
    }
}

/// `node Name [` ... `]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TechnologyBlock<'src> {
    pub name: Spanned<&'src str>,
    /// Trimmed description lines; leading blank lines are dropped.
    pub description: Vec<&'src str>,
}

impl TechnologyBlock<'_> {
    pub(crate) fn text(&self) -> String {
        self.description.join("\n")
    }
}

/// `Source <arrow> Target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link<'src> {
    pub source: Spanned<&'src str>,
    pub arrow: Spanned<&'src str>,
    pub target: Spanned<&'src str>,
}

impl Link<'_> {
    pub(crate) fn kind(&self) -> LinkKind {
        LinkKind::from_arrow(self.arrow.inner())
    }

    pub(crate) fn span(&self) -> Span {
        self.source.span().union(self.target.span())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement<'src> {
    Technology(TechnologyBlock<'src>),
    Link(Link<'src>),
}

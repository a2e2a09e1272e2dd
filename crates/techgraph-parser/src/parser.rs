//! Line reader for technology sources.
//!
//! The source is read one trimmed line at a time. Outside a technology block
//! a line is either a block header, a link or ignored (`@startuml`,
//! comments, blank lines). Inside a block every line is description text
//! until a line consisting of `]`.
//!
//! Line shapes are recognised with winnow parsers over a
//! [`LocatingSlice`] of the trimmed line, so spans come out relative to the
//! line and are shifted to absolute source offsets. The public entry point
//! is [`read_statements`].

use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{alt, delimited, eof, terminated},
    error::{ContextError, ModalResult},
    stream::LocatingSlice,
    token::{literal, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    parser_types::{Link, Statement, TechnologyBlock},
    span::{Span, Spanned},
};

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = ModalResult<O, ContextError>;

/// Shape of a single line outside a technology block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'src> {
    Open(Spanned<&'src str>),
    Close,
    Link(Link<'src>),
}

/// Parse a technology name: `[A-Za-z0-9_]+`
fn name<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .with_span()
        .map(|(name, range)| Spanned::new(name, Span::new(range)))
        .parse_next(input)
}

/// Parse a block header: `node <name> [`
fn block_open<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    delimited((literal("node"), space1), name, (space1, '[', eof)).parse_next(input)
}

/// Parse a block terminator: `]`
fn block_close(input: &mut Input<'_>) -> IResult<()> {
    terminated(']', eof).void().parse_next(input)
}

/// Parse an arrow: `[.-]+>`
fn arrow<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    (take_while(1.., ['.', '-']), '>')
        .take()
        .with_span()
        .map(|(arrow, range)| Spanned::new(arrow, Span::new(range)))
        .parse_next(input)
}

/// Parse a link: `<name> <arrow> <name>`
fn link<'src>(input: &mut Input<'src>) -> IResult<Link<'src>> {
    (name, space1, arrow, space1, name, space0, eof)
        .map(|(source, _, arrow, _, target, _, _)| Link {
            source,
            arrow,
            target,
        })
        .parse_next(input)
}

fn top_level_line<'src>(input: &mut Input<'src>) -> IResult<Line<'src>> {
    alt((
        block_open.map(Line::Open),
        block_close.value(Line::Close),
        link.map(Line::Link),
    ))
    .parse_next(input)
}

/// A header-looking line that failed to parse as one.
fn looks_like_header(line: &str) -> bool {
    line.strip_prefix("node")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
        && line.ends_with('[')
}

fn shift<T>(spanned: Spanned<T>, offset: usize) -> Spanned<T> {
    let span = spanned.span().shifted(offset);
    Spanned::new(spanned.into_inner(), span)
}

struct OpenBlock<'src> {
    name: Spanned<&'src str>,
    description: Vec<&'src str>,
}

/// Reader state: the statements read so far and the block being filled.
struct Reader<'src> {
    statements: Vec<Statement<'src>>,
    open: Option<OpenBlock<'src>>,
    diagnostics: DiagnosticCollector,
}

impl<'src> Reader<'src> {
    fn new() -> Self {
        Self {
            statements: Vec::new(),
            open: None,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Feed one trimmed line starting at byte `offset` of the source.
    fn line(&mut self, line: &'src str, offset: usize) {
        if let Some(block) = self.open.as_mut() {
            if block_close.parse(LocatingSlice::new(line)).is_ok() {
                self.close_block();
            } else if !(block.description.is_empty() && line.is_empty()) {
                block.description.push(line);
            }
            return;
        }

        match top_level_line.parse(LocatingSlice::new(line)) {
            Ok(Line::Open(name)) => {
                self.open = Some(OpenBlock {
                    name: shift(name, offset),
                    description: Vec::new(),
                });
            }
            Ok(Line::Link(link)) => {
                self.statements.push(Statement::Link(Link {
                    source: shift(link.source, offset),
                    arrow: shift(link.arrow, offset),
                    target: shift(link.target, offset),
                }));
            }
            Ok(Line::Close) => {}
            Err(_) if looks_like_header(line) => {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("line is not a valid technology header: `{line}`"))
                        .with_code(ErrorCode::E101)
                        .with_label(Span::new(offset..offset + line.len()), "ignored")
                        .with_help("technology headers look like `node Name [`"),
                );
            }
            Err(_) => {}
        }
    }

    fn close_block(&mut self) {
        if let Some(OpenBlock { name, description }) = self.open.take() {
            self.statements
                .push(Statement::Technology(TechnologyBlock { name, description }));
        }
    }

    fn finish(mut self) -> (Vec<Statement<'src>>, DiagnosticCollector) {
        if let Some(block) = self.open.take() {
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "technology `{}` is never closed",
                    block.name.inner()
                ))
                .with_code(ErrorCode::E100)
                .with_label(block.name.span(), ErrorCode::E100.description())
                .with_help("close the description with a line containing only `]`"),
            );
        }
        (self.statements, self.diagnostics)
    }
}

/// Read every statement of a technology source.
///
/// Returns the statements together with the diagnostics emitted while
/// reading: E101 warnings for malformed headers and an E100 error if a
/// technology block is still open at the end of the source.
pub(crate) fn read_statements(source: &str) -> (Vec<Statement<'_>>, DiagnosticCollector) {
    let mut reader = Reader::new();
    let mut offset = 0;
    for raw in source.split_inclusive('\n') {
        let leading = raw.len() - raw.trim_start().len();
        reader.line(raw.trim(), offset + leading);
        offset += raw.len();
    }
    reader.finish()
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::parser_types::LinkKind;

    // ===================
    // Strategies
    // ===================

    fn name_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z_][A-Za-z0-9_]{0,12}"
    }

    fn arrow_strategy() -> impl Strategy<Value = String> {
        "[.-]{1,4}>"
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Any `name arrow name` line reads back as a link with exact spans.
    fn check_link_round_trip(
        source: &str,
        arrow_text: &str,
        target: &str,
        indent: usize,
    ) -> Result<(), TestCaseError> {
        let line = format!("{}{source} {arrow_text} {target}\n", " ".repeat(indent));
        let (statements, diagnostics) = read_statements(&line);

        prop_assert!(!diagnostics.has_errors());
        prop_assert_eq!(statements.len(), 1);
        let Statement::Link(link) = &statements[0] else {
            return Err(TestCaseError::fail("expected a link"));
        };
        prop_assert_eq!(*link.source.inner(), source);
        prop_assert_eq!(*link.target.inner(), target);
        prop_assert_eq!(link.source.span().start(), indent);
        let target_span = link.target.span();
        prop_assert_eq!(&line[target_span.start()..target_span.end()], target);
        prop_assert_eq!(
            link.kind(),
            if arrow_text.contains("-->") {
                LinkKind::Prerequisite
            } else {
                LinkKind::Association
            }
        );
        Ok(())
    }

    /// Description lines are kept verbatim (trimmed) in order.
    fn check_block_description(name: &str, lines: &[String]) -> Result<(), TestCaseError> {
        let mut source = format!("node {name} [\n");
        for line in lines {
            source.push_str("  ");
            source.push_str(line);
            source.push('\n');
        }
        source.push_str("]\n");

        let (statements, diagnostics) = read_statements(&source);
        prop_assert!(!diagnostics.has_errors());
        prop_assert_eq!(statements.len(), 1);
        let Statement::Technology(block) = &statements[0] else {
            return Err(TestCaseError::fail("expected a technology block"));
        };
        prop_assert_eq!(*block.name.inner(), name);
        prop_assert_eq!(block.text(), lines.join("\n"));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn link_round_trip(
            source in name_strategy(),
            arrow_text in arrow_strategy(),
            target in name_strategy(),
            indent in 0usize..4,
        ) {
            check_link_round_trip(&source, &arrow_text, &target, indent)?;
        }

        #[test]
        fn block_description_preserved(
            name in name_strategy(),
            lines in proptest::collection::vec("[a-zA-Z][a-zA-Z ,.]{0,20}[a-zA-Z.]", 0..5),
        ) {
            check_block_description(&name, &lines)?;
        }
    }
}

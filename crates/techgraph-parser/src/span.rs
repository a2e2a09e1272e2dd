//! Byte-offset source spans and span-carrying values.

use std::ops::Range;

/// A half-open byte range `start..end` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn union(self, other: Span) -> Span {
        Span::new(self.start.min(other.start)..self.end.max(other.end))
    }

    /// Moves the span forward by `offset` bytes.
    pub(crate) fn shifted(self, offset: usize) -> Span {
        Span::new(self.start + offset..self.end + offset)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range)
    }
}

/// A value paired with the span it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<T> {
    value: T,
    span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    pub fn inner(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned::new(f(self.value), self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = Span::new(4..9);

        assert_eq!(span.start(), 4);
        assert_eq!(span.end(), 9);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::new(3..3).is_empty());
    }

    #[test]
    fn test_span_union_and_shift() {
        let a = Span::new(2..5);
        let b = Span::new(8..12);

        assert_eq!(a.union(b), Span::new(2..12));
        assert_eq!(b.union(a), Span::new(2..12));
        assert_eq!(a.shifted(10), Span::new(12..15));
    }

    #[test]
    fn test_spanned_map() {
        let spanned = Spanned::new("Pottery", Span::new(0..7));
        let mapped = spanned.map(str::len);

        assert_eq!(*mapped.inner(), 7);
        assert_eq!(mapped.span(), Span::new(0..7));
    }
}

use std::ops::Range;

/// A byte range `[start, end)` into the source text.
///
/// Tree nodes store spans rather than positions; line/column/offset
/// positions are derived on demand through [`LineIndex`](super::position::LineIndex).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Same span with its end moved to `end`.
    #[must_use]
    pub fn with_end(self, end: usize) -> Self {
        Self { end, ..self }
    }

    /// Shrinks the end of the span past trailing whitespace in `source`.
    #[must_use]
    pub fn trim_end(self, source: &str) -> Self {
        match source.get(self.start..self.end) {
            Some(text) => self.with_end(self.start + text.trim_end().len()),
            None => self,
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

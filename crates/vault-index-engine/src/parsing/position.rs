//! # Positions
//!
//! Two representations of a location in the source:
//!
//! - [`Point`]: what the syntax tree exposes, a 1-based line and column plus an
//!   absolute character offset.
//! - [`Position`]: the compact 6-tuple written into the index,
//!   `(startLine, startCol, startOffset, endLine, endCol, endOffset)` with
//!   zero-based lines and columns.
//!
//! Offsets count Unicode scalar values, not bytes, so `"é#tag"` puts the tag
//! at offset 1.

use serde::{Deserialize, Serialize};

use super::span::Span;

/// A single location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Point {
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub column: usize,
    /// 0-based character offset from the start of the document.
    pub offset: usize,
}

/// Compact position tuple stored on every index entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position(
    pub usize,
    pub usize,
    pub usize,
    pub usize,
    pub usize,
    pub usize,
);

impl Position {
    /// Encodes a start/end point pair.
    pub fn from_points(start: Point, end: Point) -> Self {
        Self(
            start.line - 1,
            start.column - 1,
            start.offset,
            end.line - 1,
            end.column - 1,
            end.offset,
        )
    }

    pub fn start_line(&self) -> usize {
        self.0
    }

    pub fn start_offset(&self) -> usize {
        self.2
    }

    pub fn end_line(&self) -> usize {
        self.3
    }

    pub fn end_offset(&self) -> usize {
        self.5
    }
}

/// Maps byte offsets to [`Point`]s.
///
/// Line starts are recorded once per document, together with the character
/// offset of each line start, so a lookup only counts characters within one
/// line. Lines that are pure ASCII skip even that.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
    /// Character offset where each line starts.
    char_starts: Vec<usize>,
    /// Whether each line holds only ASCII, so columns equal byte distances.
    ascii: Vec<bool>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut char_starts = vec![0];
        let mut ascii = vec![true];

        for (chars, (byte_pos, ch)) in source.char_indices().enumerate() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
                char_starts.push(chars + 1);
                ascii.push(true);
            } else if !ch.is_ascii() {
                if let Some(flag) = ascii.last_mut() {
                    *flag = false;
                }
            }
        }

        Self {
            line_starts,
            char_starts,
            ascii,
        }
    }

    /// Zero-based index of the line holding `byte_offset`.
    fn line_index(&self, byte_offset: usize) -> usize {
        self.line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1)
    }

    /// 1-based line of `byte_offset`, without the column work of [`Self::point`].
    pub fn line_of(&self, byte_offset: usize) -> usize {
        self.line_index(byte_offset) + 1
    }

    /// Converts a byte offset into a [`Point`].
    ///
    /// Offsets past the end clamp to the end of `source`; offsets inside a
    /// multi-byte character snap back to its first byte.
    pub fn point(&self, source: &str, byte_offset: usize) -> Point {
        let mut byte_offset = byte_offset.min(source.len());
        while !source.is_char_boundary(byte_offset) {
            byte_offset -= 1;
        }

        let line = self.line_index(byte_offset);
        let line_start = self.line_starts[line];
        let column = if self.ascii[line] {
            byte_offset - line_start
        } else {
            source[line_start..byte_offset].chars().count()
        };

        Point {
            line: line + 1,
            column: column + 1,
            offset: self.char_starts[line] + column,
        }
    }

    /// Encodes a byte span as a [`Position`].
    pub fn position(&self, source: &str, span: Span) -> Position {
        Position::from_points(self.point(source, span.start), self.point(source, span.end))
    }
}

//! Source span and position types for locating code regions.

use serde::{Deserialize, Serialize};

/// A location within a source file.
///
/// `line` and `column` are one-based for display. `offset` is the zero-based
/// byte offset into the UTF-8 source.
///
/// # Example
///
/// ```
/// use shapeseek_core::Position;
///
/// let pos = Position::new(10, 4, 212);
/// assert_eq!(pos.line(), 10);
/// assert_eq!(pos.column(), 4);
/// assert_eq!(pos.offset(), 212);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// One-based line number.
    pub line: u32,
    /// One-based column number (byte offset within the line plus one).
    pub column: u32,
    /// Zero-based byte offset from the start of the source.
    pub offset: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Returns the one-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the one-based column number.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the zero-based byte offset.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }
}

/// A half-open region of a source file.
///
/// `start` is inclusive and `end` is exclusive.
///
/// # Example
///
/// ```
/// use shapeseek_core::{Position, Span};
///
/// let span = Span::new(Position::new(2, 1, 10), Position::new(4, 1, 42));
/// assert_eq!(span.start().offset(), 10);
/// assert_eq!(span.end().offset(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Span {
    /// Creates a new span from its boundary positions.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns the inclusive start position.
    #[must_use]
    pub const fn start(&self) -> &Position {
        &self.start
    }

    /// Returns the exclusive end position.
    #[must_use]
    pub const fn end(&self) -> &Position {
        &self.end
    }

    /// Returns the byte range covered by the span.
    #[must_use]
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        usize::try_from(self.start.offset).unwrap_or(usize::MAX)
            ..usize::try_from(self.end.offset).unwrap_or(usize::MAX)
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns `true` when the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the smallest span covering both `self` and `other`.
    #[must_use]
    pub const fn cover(&self, other: &Self) -> Self {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Self { start, end }
    }
}

//! Shared position conversion helpers.
//!
//! Tree-sitter positions are zero-based. Reported positions use one-based
//! line and column numbers alongside zero-based byte offsets.

use shapeseek_core::{Position, Span};

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

fn offset_to_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

/// Returns the span covered by a Tree-sitter node.
#[must_use]
pub(crate) fn node_span(node: tree_sitter::Node<'_>) -> Span {
    let (start_line, start_column) = point_to_one_based(node.start_position());
    let (end_line, end_column) = point_to_one_based(node.end_position());
    Span::new(
        Position::new(start_line, start_column, offset_to_u32(node.start_byte())),
        Position::new(end_line, end_column, offset_to_u32(node.end_byte())),
    )
}

/// Maps byte offsets to line/column positions for plain text.
#[derive(Debug)]
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self { line_starts }
    }

    /// Returns the position of the zero-based byte `offset`.
    pub(crate) fn position(&self, offset: usize) -> Position {
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .max(1);
        let line_start = self
            .line_starts
            .get(line - 1)
            .copied()
            .unwrap_or_default();
        Position::new(
            offset_to_u32(line),
            offset_to_u32(offset - line_start + 1),
            offset_to_u32(offset),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::first_byte(0, (1, 1))]
    #[case::mid_line(3, (1, 4))]
    #[case::after_newline(6, (2, 1))]
    #[case::third_line(13, (3, 2))]
    fn line_index_positions(#[case] offset: usize, #[case] expected: (u32, u32)) {
        let index = LineIndex::new("let a\nlet b\nxy");
        let pos = index.position(offset);
        assert_eq!((pos.line(), pos.column()), expected);
        assert_eq!(pos.offset() as usize, offset);
    }

    #[test]
    fn point_conversion_is_one_based() {
        let point = tree_sitter::Point { row: 0, column: 4 };
        assert_eq!(point_to_one_based(point), (1, 5));
    }
}

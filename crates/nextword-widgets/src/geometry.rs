//! Cell geometry for text drawn on a terminal grid.
//!
//! Lines are separated by `'\n'` and never wrapped. A character takes as many
//! columns as `unicode-width` reports; combining marks take none, so a
//! decomposed Vietnamese letter occupies a single cell.

use nextword_engine::{Geometry, TextBufferState};
use ratatui::layout::Position;
use unicode_width::UnicodeWidthChar;

/// [`Geometry`] for monospace terminal cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellGeometry;

fn width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// Display width of `s` in cells.
pub fn str_width(s: &str) -> u16 {
    s.chars().map(width).fold(0u16, u16::saturating_add)
}

impl Geometry for CellGeometry {
    fn offset_to_cell(&self, buffer: &TextBufferState, offset: usize) -> Position {
        let mut row = 0u16;
        let mut col = 0u16;
        for c in buffer.content().chars().take(offset) {
            if c == '\n' {
                row = row.saturating_add(1);
                col = 0;
            } else {
                col = col.saturating_add(width(c));
            }
        }
        Position::new(col, row)
    }

    fn cell_to_offset(&self, buffer: &TextBufferState, cell: Position) -> usize {
        let mut row = 0u16;
        let mut col = 0u16;
        for (offset, c) in buffer.content().chars().enumerate() {
            if row == cell.y {
                let w = width(c);
                // Past the end of the target line, or on the target cell.
                if c == '\n' || col.saturating_add(w) > cell.x {
                    return offset;
                }
                col = col.saturating_add(w);
            } else if c == '\n' {
                row = row.saturating_add(1);
            }
        }
        buffer.len()
    }
}

//! Placement of the ghost-text overlay and the ranked list.
//!
//! The engine does not measure text. A [`Geometry`] collaborator maps buffer
//! offsets to cells; [`PositionAdapter`] turns that into rectangles that stay
//! inside the visible viewport.

use crate::buffer::TextBufferState;
use ratatui::layout::{Position, Rect, Size};

/// Maps buffer offsets to display cells and back.
pub trait Geometry {
    /// Cell (column, row) of the char at `offset`, in content coordinates
    /// (before scrolling).
    fn offset_to_cell(&self, buffer: &TextBufferState, offset: usize) -> Position;

    /// Offset of the char nearest to `cell`, in content coordinates.
    fn cell_to_offset(&self, buffer: &TextBufferState, cell: Position) -> usize;
}

/// Fits overlays into a viewport of a given size and scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionAdapter {
    viewport: Size,
    scroll: Position,
}

impl PositionAdapter {
    /// Cells kept free between an overlay and the viewport's right edge.
    pub const RIGHT_MARGIN: u16 = 1;

    /// Create an adapter for a viewport, unscrolled.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            scroll: Position::ORIGIN,
        }
    }

    /// Set the scroll offset of the viewport within the content.
    pub fn with_scroll(mut self, scroll: Position) -> Self {
        self.scroll = scroll;
        self
    }

    /// Where the ghost text of `width` cells starts, relative to the
    /// viewport: at the caret, pulled left if it would overflow the right
    /// edge, pulled up onto the last row if below the bottom.
    pub fn overlay(&self, geometry: &impl Geometry, buffer: &TextBufferState, width: u16) -> Rect {
        let caret = geometry.offset_to_cell(buffer, buffer.caret());
        let mut x = caret.x.saturating_sub(self.scroll.x);
        let mut y = caret.y.saturating_sub(self.scroll.y);

        if x.saturating_add(width) > self.viewport.width {
            x = self
                .viewport
                .width
                .saturating_sub(width)
                .saturating_sub(Self::RIGHT_MARGIN);
        }
        if y.saturating_add(1) > self.viewport.height {
            y = self.viewport.height.saturating_sub(1);
        }
        Rect::new(x, y, width.min(self.viewport.width), 1.min(self.viewport.height))
    }

    /// Where a list of `size` goes next to `overlay`: to its right when it
    /// fits, otherwise to its left; shifted up so its bottom lines up with
    /// the overlay when it would run past the bottom edge. Always clipped to
    /// the viewport.
    pub fn list(&self, overlay: Rect, size: Size) -> Rect {
        let mut x = overlay.right();
        if x.saturating_add(size.width) > self.viewport.width {
            x = overlay
                .x
                .saturating_sub(size.width)
                .saturating_sub(Self::RIGHT_MARGIN);
        }
        let mut y = overlay.y;
        if y.saturating_add(size.height) > self.viewport.height {
            y = overlay.bottom().saturating_sub(size.height);
        }
        let width = size.width.min(self.viewport.width.saturating_sub(x));
        let height = size.height.min(self.viewport.height.saturating_sub(y));
        Rect::new(x, y, width, height)
    }
}

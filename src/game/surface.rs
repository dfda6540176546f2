use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
};

/// Something the board can be drawn on.  Coordinates and sizes are in
/// logical board units.
pub(crate) trait Surface {
    /// Blank out the whole surface
    fn clear(&mut self);

    /// Fill the given rectangle
    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, fill: Fill);
}

/// The ways in which a rectangle can be filled
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Fill {
    Head,
    Body,
    Food,
}

impl Fill {
    fn symbol(self) -> char {
        match self {
            Fill::Head => consts::SNAKE_HEAD_SYMBOL,
            Fill::Body => consts::SNAKE_BODY_SYMBOL,
            Fill::Food => consts::FOOD_SYMBOL,
        }
    }

    fn style(self) -> Style {
        match self {
            Fill::Head => consts::SNAKE_HEAD_STYLE,
            Fill::Body => consts::SNAKE_BODY_STYLE,
            Fill::Food => consts::FOOD_STYLE,
        }
    }
}

/// A [`Surface`] backed by a region of a terminal buffer.  Each logical cell
/// of `cell` × `cell` units becomes
/// [`CELL_COLUMNS`][consts::CELL_COLUMNS] terminal cells side by side.
#[derive(Debug, Eq, PartialEq)]
pub(super) struct Canvas<'a> {
    pub(super) area: Rect,
    pub(super) buf: &'a mut Buffer,
    pub(super) cell: u16,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if !self.area.contains(Position { x, y }) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

impl Surface for Canvas<'_> {
    fn clear(&mut self) {
        for p in self.area.positions() {
            if let Some(cell) = self.buf.cell_mut(p) {
                cell.reset();
            }
        }
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, fill: Fill) {
        if self.cell == 0 {
            return;
        }
        let col0 = (x / self.cell).saturating_mul(consts::CELL_COLUMNS);
        let row0 = y / self.cell;
        let cols = (width / self.cell).saturating_mul(consts::CELL_COLUMNS);
        let rows = height / self.cell;
        for dy in 0..rows {
            for dx in 0..cols {
                self.draw_cell(
                    Position::new(col0.saturating_add(dx), row0.saturating_add(dy)),
                    fill.symbol(),
                    fill.style(),
                );
            }
        }
    }
}

/// A surface that remembers what was drawn on it, for tests
#[cfg(test)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct Recording(pub(super) Vec<DrawOp>);

#[cfg(test)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum DrawOp {
    Clear,
    Fill(u16, u16, Fill),
}

#[cfg(test)]
impl Surface for Recording {
    fn clear(&mut self) {
        self.0.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, fill: Fill) {
        assert_eq!(
            (width, height),
            (consts::CELL_SIZE, consts::CELL_SIZE),
            "only whole cells are drawn"
        );
        self.0.push(DrawOp::Fill(x, y, fill));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_cells() {
        let area = Rect::new(0, 0, 8, 3);
        let mut buffer = Buffer::empty(area);
        let mut canvas = Canvas {
            area: Rect::new(1, 1, 6, 2),
            buf: &mut buffer,
            cell: 20,
        };
        canvas.fill_rect(0, 0, 20, 20, Fill::Body);
        canvas.fill_rect(20, 0, 20, 20, Fill::Head);
        canvas.fill_rect(40, 20, 20, 20, Fill::Food);
        let mut expected = Buffer::with_lines(["        ", " ▓▓██   ", "     ██ "]);
        expected.set_style(Rect::new(1, 1, 2, 1), consts::SNAKE_BODY_STYLE);
        expected.set_style(Rect::new(3, 1, 2, 1), consts::SNAKE_HEAD_STYLE);
        expected.set_style(Rect::new(5, 2, 2, 1), consts::FOOD_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn out_of_area_is_clipped() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buffer = Buffer::empty(area);
        let mut canvas = Canvas {
            area: Rect::new(0, 0, 2, 1),
            buf: &mut buffer,
            cell: 20,
        };
        canvas.fill_rect(20, 0, 20, 20, Fill::Head);
        canvas.fill_rect(0, 20, 20, 20, Fill::Head);
        pretty_assertions::assert_eq!(buffer, Buffer::empty(area));
    }

    #[test]
    fn clear_resets_area_only() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buffer = Buffer::with_lines(["abcd"]);
        let mut canvas = Canvas {
            area: Rect::new(1, 0, 2, 1),
            buf: &mut buffer,
            cell: 20,
        };
        canvas.clear();
        pretty_assertions::assert_eq!(buffer, Buffer::with_lines(["a  d"]));
        assert_eq!(buffer.area, area);
    }
}

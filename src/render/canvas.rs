use crate::game::port::{CellDisplay, EMPTY_SYMBOL};
use crate::game::Position;

/// Character buffer covering board cells `1..=width` by `1..=height`.
///
/// Draws outside that range are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    rows: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0) as usize;
        let height = height.max(0) as usize;
        Self {
            rows: vec![vec![EMPTY_SYMBOL; width]; height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn slot(&self, pos: Position) -> Option<(usize, usize)> {
        if pos.x < 1 || pos.y < 1 {
            return None;
        }
        let (col, row) = (pos.x as usize - 1, pos.y as usize - 1);
        (col < self.width && row < self.height).then_some((col, row))
    }

    pub fn symbol_at(&self, pos: Position) -> Option<char> {
        self.slot(pos).map(|(col, row)| self.rows[row][col])
    }

    /// One string per board row, top first
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| row.iter().collect())
    }
}

impl CellDisplay for Canvas {
    fn draw(&mut self, pos: Position, symbol: char) {
        if let Some((col, row)) = self.slot(pos) {
            self.rows[row][col] = symbol;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Simulation};

    #[test]
    fn test_draw_and_clear() {
        let mut canvas = Canvas::new(5, 3);
        canvas.draw(Position::new(1, 1), '#');
        canvas.draw(Position::new(5, 3), 'X');
        assert_eq!(canvas.symbol_at(Position::new(1, 1)), Some('#'));

        canvas.clear(Position::new(5, 3));
        assert_eq!(canvas.symbol_at(Position::new(5, 3)), Some(' '));
    }

    #[test]
    fn test_ignores_cells_off_the_board() {
        let mut canvas = Canvas::new(5, 3);
        canvas.draw(Position::new(0, 2), '#');
        canvas.draw(Position::new(6, 2), '#');
        canvas.draw(Position::new(3, 4), '#');
        assert!(canvas.lines().all(|line| line.trim().is_empty()));
        assert_eq!(canvas.symbol_at(Position::new(0, 2)), None);
    }

    #[test]
    fn test_board_picture() {
        let sim = Simulation::new(GameConfig::default()).unwrap();
        let mut canvas = Canvas::new(80, 40);
        sim.draw_board(&mut canvas);

        let lines: Vec<String> = canvas.lines().collect();
        assert_eq!(lines.len(), 40);
        // top wall with its gap at x = 40
        assert_eq!(lines[0].chars().nth(39), Some(' '));
        assert_eq!(lines[0].chars().nth(38), Some('#'));
        assert_eq!(canvas.symbol_at(Position::new(40, 20)), Some('1'));
        assert_eq!(canvas.symbol_at(Position::new(39, 20)), Some('X'));
        assert_eq!(canvas.symbol_at(Position::new(75, 8)), Some('6'));
    }
}

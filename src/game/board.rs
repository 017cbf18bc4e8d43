//! Board cells, coordinate mapping and border gap geometry.
//!
//! Playable coordinates run from `1..=width` and `1..=height` so that they
//! match on-screen positions. Row 0 and column 0 exist in the backing storage
//! but never hold game cells.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::serpent::SerpentId;

/// A position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance to another position
    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// What occupies a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Wall,
    Block,
    Apple,
    Body,
    Head(SerpentId),
}

impl CellKind {
    /// Walls and blocks are fatal to enter
    pub fn is_solid(&self) -> bool {
        matches!(self, CellKind::Wall | CellKind::Block)
    }

    /// Any serpent segment, head or body
    pub fn is_serpent(&self) -> bool {
        matches!(self, CellKind::Body | CellKind::Head(_))
    }
}

/// One of the four board edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    pub fn opposite(&self) -> Edge {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }
}

/// A passable cell in the middle of a border edge.
///
/// `opening` is the wall-ring cell left Empty; `exit` is the off-board
/// address one step further out. Stepping onto `exit` lands the head on the
/// opposite gap's `opening`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub edge: Edge,
    pub opening: Position,
    pub exit: Position,
}

/// Fixed-size classification grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<CellKind>,
}

impl Board {
    /// Create a board with an Empty interior, a Wall ring and four gaps
    pub fn new(width: i32, height: i32) -> Self {
        let size = ((width + 1) * (height + 1)) as usize;
        let mut board = Self {
            width,
            height,
            cells: vec![CellKind::Empty; size],
        };

        for x in 1..=width {
            board.set(Position::new(x, 1), CellKind::Wall);
            board.set(Position::new(x, height), CellKind::Wall);
        }
        for y in 1..=height {
            board.set(Position::new(1, y), CellKind::Wall);
            board.set(Position::new(width, y), CellKind::Wall);
        }
        for edge in Edge::ALL {
            let opening = board.gap(edge).opening;
            board.set(opening, CellKind::Empty);
        }

        board
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a position is a playable cell
    pub fn is_inside(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.x <= self.width && pos.y >= 1 && pos.y <= self.height
    }

    /// Storage index of a playable position.
    ///
    /// Storage is `(width + 1) * (height + 1)` cells laid out row by row, so
    /// `(x, y)` lives at `y * (width + 1) + x` and index 0 of every row and
    /// the whole of row 0 stay unused.
    pub fn index(&self, pos: Position) -> Option<usize> {
        if self.is_inside(pos) {
            Some((pos.y * (self.width + 1) + pos.x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: Position) -> Option<CellKind> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Classify a cell. Anything off the board reads as Wall.
    pub fn classify(&self, pos: Position) -> CellKind {
        self.get(pos).unwrap_or(CellKind::Wall)
    }

    /// Overwrite a cell. Returns false (and does nothing) off the board.
    pub fn set(&mut self, pos: Position, kind: CellKind) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    pub fn gap(&self, edge: Edge) -> Gap {
        let mid_x = self.width / 2;
        let mid_y = self.height / 2;
        match edge {
            Edge::Top => Gap {
                edge,
                opening: Position::new(mid_x, 1),
                exit: Position::new(mid_x, 0),
            },
            Edge::Bottom => Gap {
                edge,
                opening: Position::new(mid_x, self.height),
                exit: Position::new(mid_x, self.height + 1),
            },
            Edge::Left => Gap {
                edge,
                opening: Position::new(1, mid_y),
                exit: Position::new(0, mid_y),
            },
            Edge::Right => Gap {
                edge,
                opening: Position::new(self.width, mid_y),
                exit: Position::new(self.width + 1, mid_y),
            },
        }
    }

    /// Bring a position that stepped off the board back on the opposite side.
    ///
    /// Returns the wrapped position and whether a wrap happened. Both axes
    /// are checked independently.
    pub fn wrap(&self, pos: Position) -> (Position, bool) {
        let mut wrapped = pos;
        let mut teleported = false;

        if wrapped.x <= 0 {
            wrapped.x = self.width;
            teleported = true;
        } else if wrapped.x > self.width {
            wrapped.x = 1;
            teleported = true;
        }

        if wrapped.y <= 0 {
            wrapped.y = self.height;
            teleported = true;
        } else if wrapped.y > self.height {
            wrapped.y = 1;
            teleported = true;
        }

        (wrapped, teleported)
    }

    /// Stamp square blocks of `side` cells at each origin.
    ///
    /// Cells falling outside the board are skipped. Returns the number of
    /// cells written.
    pub fn place_blocks(&mut self, origins: &[Position], side: i32) -> usize {
        let mut stamped = 0;
        for origin in origins {
            for x in origin.x..origin.x.saturating_add(side) {
                for y in origin.y..origin.y.saturating_add(side) {
                    if self.set(Position::new(x, y), CellKind::Block) {
                        stamped += 1;
                    }
                }
            }
        }
        stamped
    }

    /// Iterate every playable position with its cell kind, column by column
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellKind)> + '_ {
        (1..=self.width).flat_map(move |x| {
            (1..=self.height).map(move |y| {
                let pos = Position::new(x, y);
                (pos, self.classify(pos))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.manhattan(Position::new(2, 9)), 7);
    }

    #[test]
    fn test_index_mapping_skips_row_and_column_zero() {
        let board = Board::new(80, 40);
        assert_eq!(board.index(Position::new(1, 1)), Some(82));
        assert_eq!(board.index(Position::new(80, 40)), Some(40 * 81 + 80));
        assert_eq!(board.index(Position::new(0, 5)), None);
        assert_eq!(board.index(Position::new(5, 0)), None);
        assert_eq!(board.index(Position::new(81, 5)), None);
        assert_eq!(board.index(Position::new(5, 41)), None);
    }

    #[test]
    fn test_perimeter_is_wall_except_gaps() {
        let board = Board::new(80, 40);
        let openings: Vec<Position> = Edge::ALL.iter().map(|e| board.gap(*e).opening).collect();

        for (pos, kind) in board.cells() {
            let on_ring = pos.x == 1 || pos.x == 80 || pos.y == 1 || pos.y == 40;
            if openings.contains(&pos) {
                assert_eq!(kind, CellKind::Empty, "gap at {:?}", pos);
            } else if on_ring {
                assert_eq!(kind, CellKind::Wall, "ring at {:?}", pos);
            } else {
                assert_eq!(kind, CellKind::Empty, "interior at {:?}", pos);
            }
        }
        assert_eq!(openings.len(), 4);
    }

    #[test]
    fn test_gap_geometry() {
        let board = Board::new(80, 40);
        let top = board.gap(Edge::Top);
        assert_eq!(top.opening, Position::new(40, 1));
        assert_eq!(top.exit, Position::new(40, 0));
        assert_eq!(board.gap(Edge::Bottom).exit, Position::new(40, 41));
        assert_eq!(board.gap(Edge::Left).opening, Position::new(1, 20));
        assert_eq!(board.gap(Edge::Right).exit, Position::new(81, 20));

        for edge in Edge::ALL {
            assert_eq!(edge.opposite().opposite(), edge);
            // exiting through a gap lands on the opposite opening
            let (landed, wrapped) = board.wrap(board.gap(edge).exit);
            assert!(wrapped);
            assert_eq!(landed, board.gap(edge.opposite()).opening);
        }
    }

    #[test]
    fn test_wrap_keeps_inside_positions() {
        let board = Board::new(80, 40);
        assert_eq!(board.wrap(Position::new(10, 10)), (Position::new(10, 10), false));
        assert_eq!(board.wrap(Position::new(-3, 10)), (Position::new(80, 10), true));
        assert_eq!(board.wrap(Position::new(10, 55)), (Position::new(10, 1), true));
    }

    #[test]
    fn test_set_outside_is_ignored() {
        let mut board = Board::new(10, 10);
        assert!(!board.set(Position::new(0, 0), CellKind::Apple));
        assert_eq!(board.get(Position::new(0, 0)), None);
        assert_eq!(board.classify(Position::new(0, 0)), CellKind::Wall);
        assert!(board.set(Position::new(5, 5), CellKind::Apple));
        assert_eq!(board.get(Position::new(5, 5)), Some(CellKind::Apple));
    }

    #[test]
    fn test_place_blocks() {
        let mut board = Board::new(80, 40);
        let stamped = board.place_blocks(&[Position::new(3, 3)], 5);
        assert_eq!(stamped, 25);
        assert_eq!(board.classify(Position::new(3, 3)), CellKind::Block);
        assert_eq!(board.classify(Position::new(7, 7)), CellKind::Block);
        assert_eq!(board.classify(Position::new(8, 7)), CellKind::Empty);
    }

    #[test]
    fn test_place_blocks_clips_at_edges() {
        let mut board = Board::new(10, 10);
        let stamped = board.place_blocks(&[Position::new(8, 8), Position::new(-2, 4)], 5);
        // 3x3 survives in the corner, 2x5 on the left edge
        assert_eq!(stamped, 9 + 10);
        assert_eq!(board.classify(Position::new(10, 10)), CellKind::Block);
        assert_eq!(board.classify(Position::new(2, 8)), CellKind::Block);
        assert_eq!(board.classify(Position::new(3, 8)), CellKind::Empty);
    }

    #[test]
    fn test_cell_kind_predicates() {
        assert!(CellKind::Wall.is_solid());
        assert!(CellKind::Block.is_solid());
        assert!(!CellKind::Apple.is_solid());
        assert!(CellKind::Body.is_serpent());
        assert!(CellKind::Head(SerpentId(1)).is_serpent());
        assert!(!CellKind::Empty.is_serpent());
    }
}

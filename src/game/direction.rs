use serde::{Deserialize, Serialize};

/// Direction a serpent can move in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// The direction pointing the other way on the same axis
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Vertical step toward a signed offset; a zero offset reads as Up.
    pub fn vertical_towards(dy: i32) -> Direction {
        if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Horizontal step toward a signed offset; a zero offset reads as Left.
    pub fn horizontal_towards(dx: i32) -> Direction {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

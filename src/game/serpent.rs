use std::fmt;

use super::board::{Board, CellKind, Position};
use super::config::SerpentStart;
use super::direction::Direction;
use super::port::{CellDisplay, BODY_SYMBOL};

/// Identifies a serpent; numbering starts at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SerpentId(pub u8);

impl SerpentId {
    /// Character drawn for this serpent's head
    pub fn head_symbol(&self) -> char {
        char::from_digit(u32::from(self.0 % 10), 10).unwrap_or('?')
    }
}

impl fmt::Display for SerpentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "serpent {}", self.0)
    }
}

/// Lifecycle of a serpent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerpentState {
    Alive,
    Collided,
    Won,
}

/// What happened to the head on a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The head landed on the apple and consumed it
    Ate,
    /// The head would have entered this cell; the body did not move
    Collided(CellKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    /// The head crossed a border gap on this move
    pub teleported: bool,
}

/// A fixed-length serpent, head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Serpent {
    id: SerpentId,
    body: Vec<Position>,
    direction: Direction,
    state: SerpentState,
}

impl Serpent {
    pub fn new(id: SerpentId, start: &SerpentStart, length: usize) -> Self {
        Self {
            id,
            body: start.segments(length),
            direction: start.direction,
            state: SerpentState::Alive,
        }
    }

    pub fn id(&self) -> SerpentId {
        self.id
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    /// Direction of the last move (or the starting heading)
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> SerpentState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == SerpentState::Alive
    }

    pub(crate) fn mark_won(&mut self) {
        if self.is_alive() {
            self.state = SerpentState::Won;
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if any segment, head included, sits on pos
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Write this serpent's markers onto the board
    pub fn stamp(&self, board: &mut Board) {
        for segment in &self.body[1..] {
            board.set(*segment, CellKind::Body);
        }
        board.set(self.head(), CellKind::Head(self.id));
    }

    /// Draw the body then the head
    pub fn draw<D: CellDisplay + ?Sized>(&self, display: &mut D) {
        for segment in &self.body[1..] {
            display.draw(*segment, BODY_SYMBOL);
        }
        display.draw(self.head(), self.id.head_symbol());
    }

    /// One-step lookahead: would moving in `direction` hit a wall, a block,
    /// or any segment of this serpent or of `others` as they are right now?
    pub fn would_collide(&self, board: &Board, direction: Direction, others: &[&Serpent]) -> bool {
        let (next, _) = board.wrap(self.head().moved_in_direction(direction));

        board.classify(next).is_solid()
            || self.occupies(next)
            || others.iter().any(|other| other.occupies(next))
    }

    /// Move one cell in `direction`, wrapping through gaps.
    ///
    /// The tail cell counts as already vacated. An apple under the new head
    /// is consumed; a wall, block or serpent cell is fatal and leaves the
    /// body where it was.
    pub fn advance<D: CellDisplay + ?Sized>(
        &mut self,
        board: &mut Board,
        direction: Direction,
        display: &mut D,
    ) -> MoveReport {
        self.direction = direction;

        let (next, teleported) = board.wrap(self.head().moved_in_direction(direction));
        let tail = self.tail();

        // apple before collision: a cell is never both eaten and fatal
        let outcome = match board.classify(next) {
            CellKind::Apple => MoveOutcome::Ate,
            kind if kind.is_solid() => MoveOutcome::Collided(kind),
            kind if kind.is_serpent() && next != tail => MoveOutcome::Collided(kind),
            _ => MoveOutcome::Moved,
        };

        if let MoveOutcome::Collided(_) = outcome {
            self.state = SerpentState::Collided;
            return MoveReport {
                outcome,
                teleported: false,
            };
        }

        board.set(tail, CellKind::Empty);
        display.clear(tail);

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = next;

        if self.body.len() > 1 {
            board.set(self.body[1], CellKind::Body);
        }
        board.set(next, CellKind::Head(self.id));

        self.draw(display);

        MoveReport {
            outcome,
            teleported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::port::NullDisplay;

    fn serpent_at(board: &mut Board, head: (i32, i32), direction: Direction, length: usize) -> Serpent {
        let start = SerpentStart::new(head.into(), direction);
        let serpent = Serpent::new(SerpentId(1), &start, length);
        serpent.stamp(board);
        serpent
    }

    #[test]
    fn test_serpent_creation() {
        let mut board = Board::new(20, 20);
        let serpent = serpent_at(&mut board, (10, 10), Direction::Right, 3);
        assert_eq!(serpent.len(), 3);
        assert_eq!(serpent.head(), Position::new(10, 10));
        assert_eq!(serpent.tail(), Position::new(8, 10));
        assert_eq!(board.classify(Position::new(10, 10)), CellKind::Head(SerpentId(1)));
        assert_eq!(board.classify(Position::new(9, 10)), CellKind::Body);
    }

    #[test]
    fn test_advance_shifts_body_and_frees_tail() {
        let mut board = Board::new(20, 20);
        let mut serpent = serpent_at(&mut board, (10, 10), Direction::Right, 3);

        let report = serpent.advance(&mut board, Direction::Up, &mut NullDisplay);

        assert_eq!(report.outcome, MoveOutcome::Moved);
        assert!(!report.teleported);
        assert_eq!(
            serpent.body(),
            &[Position::new(10, 9), Position::new(10, 10), Position::new(9, 10)]
        );
        assert_eq!(serpent.direction(), Direction::Up);
        assert_eq!(board.classify(Position::new(8, 10)), CellKind::Empty);
        assert_eq!(board.classify(Position::new(10, 10)), CellKind::Body);
        assert_eq!(board.classify(Position::new(10, 9)), CellKind::Head(SerpentId(1)));
    }

    #[test]
    fn test_eating_clears_apple() {
        let mut board = Board::new(20, 20);
        let mut serpent = serpent_at(&mut board, (10, 10), Direction::Right, 3);
        board.set(Position::new(11, 10), CellKind::Apple);

        let report = serpent.advance(&mut board, Direction::Right, &mut NullDisplay);

        assert_eq!(report.outcome, MoveOutcome::Ate);
        assert!(serpent.is_alive());
        assert_ne!(board.classify(Position::new(11, 10)), CellKind::Apple);
    }

    #[test]
    fn test_block_collision_keeps_head_off_block() {
        let mut board = Board::new(80, 40);
        board.place_blocks(&[Position::new(3, 3)], 5);
        let mut serpent = serpent_at(&mut board, (3, 2), Direction::Left, 2);

        let report = serpent.advance(&mut board, Direction::Down, &mut NullDisplay);

        assert_eq!(report.outcome, MoveOutcome::Collided(CellKind::Block));
        assert_eq!(serpent.state(), SerpentState::Collided);
        assert_eq!(serpent.head(), Position::new(3, 2));
        assert_eq!(board.classify(Position::new(3, 3)), CellKind::Block);
    }

    #[test]
    fn test_self_collision() {
        let mut board = Board::new(20, 20);
        // Body: (6,5), (5,5), (4,5), (3,5), (2,5)
        let mut serpent = serpent_at(&mut board, (6, 5), Direction::Right, 5);

        serpent.advance(&mut board, Direction::Down, &mut NullDisplay);
        serpent.advance(&mut board, Direction::Left, &mut NullDisplay);
        let report = serpent.advance(&mut board, Direction::Up, &mut NullDisplay);

        assert_eq!(report.outcome, MoveOutcome::Collided(CellKind::Body));
        assert!(!serpent.is_alive());
    }

    #[test]
    fn test_may_follow_own_tail() {
        let mut board = Board::new(20, 20);
        let mut serpent = serpent_at(&mut board, (5, 5), Direction::Right, 4);

        serpent.advance(&mut board, Direction::Down, &mut NullDisplay);
        serpent.advance(&mut board, Direction::Left, &mut NullDisplay);
        // tail is at (4,5), about to leave
        assert_eq!(serpent.tail(), Position::new(4, 5));
        let report = serpent.advance(&mut board, Direction::Up, &mut NullDisplay);

        assert_eq!(report.outcome, MoveOutcome::Moved);
        assert_eq!(serpent.head(), Position::new(4, 5));
    }

    #[test]
    fn test_teleport_through_top_gap() {
        let mut board = Board::new(80, 40);
        let mut serpent = serpent_at(&mut board, (40, 1), Direction::Up, 3);

        let report = serpent.advance(&mut board, Direction::Up, &mut NullDisplay);

        assert!(report.teleported);
        assert_eq!(report.outcome, MoveOutcome::Moved);
        assert_eq!(serpent.head(), Position::new(40, 40));
    }

    #[test]
    fn test_teleport_through_side_gaps() {
        let mut board = Board::new(80, 40);
        let mut serpent = serpent_at(&mut board, (1, 20), Direction::Left, 3);
        let report = serpent.advance(&mut board, Direction::Left, &mut NullDisplay);
        assert!(report.teleported);
        assert_eq!(serpent.head(), Position::new(80, 20));

        let mut board = Board::new(80, 40);
        let mut serpent = serpent_at(&mut board, (80, 20), Direction::Right, 3);
        let report = serpent.advance(&mut board, Direction::Right, &mut NullDisplay);
        assert!(report.teleported);
        assert_eq!(serpent.head(), Position::new(1, 20));
    }

    #[test]
    fn test_would_collide_lookahead() {
        let mut board = Board::new(20, 20);
        let serpent = serpent_at(&mut board, (2, 5), Direction::Down, 3);
        let other = Serpent::new(
            SerpentId(2),
            &SerpentStart::new(Position::new(3, 5), Direction::Down),
            4,
        );

        // wall ring on the left
        assert!(serpent.would_collide(&board, Direction::Left, &[]));
        // own neck
        assert!(serpent.would_collide(&board, Direction::Up, &[]));
        assert!(!serpent.would_collide(&board, Direction::Right, &[]));
        // (3,5) is the other serpent's head
        assert!(serpent.would_collide(&board, Direction::Right, &[&other]));
    }

    #[test]
    fn test_head_symbol() {
        assert_eq!(SerpentId(1).head_symbol(), '1');
        assert_eq!(SerpentId(2).head_symbol(), '2');
        assert_eq!(SerpentId(2).to_string(), "serpent 2");
    }
}

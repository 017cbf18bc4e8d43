use super::board::{Board, CellKind, Position};

/// Fixed, ordered list of apple cells shared by every serpent in a run
#[derive(Debug, Clone, PartialEq)]
pub struct AppleSequence {
    positions: Vec<Position>,
    index: usize,
    /// The current apple has not been written to the board yet
    pending: bool,
}

impl AppleSequence {
    pub fn new(positions: Vec<Position>) -> Self {
        let pending = !positions.is_empty();
        Self {
            positions,
            index: 0,
            pending,
        }
    }

    /// Number of apples in the sequence (the win threshold)
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index of the apple currently being raced for
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.positions.len()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Cell of the current apple, or None once every apple has been eaten
    pub fn current_target(&self) -> Option<Position> {
        self.positions.get(self.index).copied()
    }

    /// Move on to the next apple and return the new index
    pub fn advance(&mut self) -> usize {
        if !self.is_exhausted() {
            self.index += 1;
        }
        self.pending = !self.is_exhausted();
        self.index
    }

    /// Write the current apple onto the board if its cell is Empty.
    ///
    /// Returns the placed position. An apple whose cell is still covered
    /// stays pending and is retried on the next call.
    pub fn place(&mut self, board: &mut Board) -> Option<Position> {
        if !self.pending {
            return None;
        }
        let target = self.current_target()?;
        if board.get(target) != Some(CellKind::Empty) {
            return None;
        }
        board.set(target, CellKind::Apple);
        self.pending = false;
        Some(target)
    }
}

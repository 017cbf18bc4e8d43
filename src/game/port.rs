//! Seams between the simulation core and whatever shows it on screen,
//! reads the keyboard and keeps time.

use std::collections::VecDeque;
use std::time::Duration;

use super::board::{CellKind, Position};

pub const WALL_SYMBOL: char = '#';
pub const BLOCK_SYMBOL: char = '#';
pub const APPLE_SYMBOL: char = '6';
pub const BODY_SYMBOL: char = 'X';
pub const EMPTY_SYMBOL: char = ' ';

/// Symbol for a static board cell
pub fn symbol_for(kind: CellKind) -> char {
    match kind {
        CellKind::Empty => EMPTY_SYMBOL,
        CellKind::Wall => WALL_SYMBOL,
        CellKind::Block => BLOCK_SYMBOL,
        CellKind::Apple => APPLE_SYMBOL,
        CellKind::Body => BODY_SYMBOL,
        CellKind::Head(id) => id.head_symbol(),
    }
}

/// Something that can show one symbol per board cell.
///
/// Implementations must not feed anything back into the simulation.
pub trait CellDisplay {
    fn draw(&mut self, pos: Position, symbol: char);

    fn clear(&mut self, pos: Position) {
        self.draw(pos, EMPTY_SYMBOL);
    }
}

/// Non-blocking source of at most one buffered key per call
pub trait AbortInput {
    fn poll_key(&mut self) -> Option<char>;
}

/// Pause between two ticks
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Display that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl CellDisplay for NullDisplay {
    fn draw(&mut self, _pos: Position, _symbol: char) {}
}

/// Input that never has a key ready
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl AbortInput for NoInput {
    fn poll_key(&mut self) -> Option<char> {
        None
    }
}

/// Keys fed one per poll, in order
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    keys: VecDeque<Option<char>>,
}

impl ScriptedInput {
    /// Each entry answers one poll; `None` means no key that tick
    pub fn new(keys: impl IntoIterator<Item = Option<char>>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl AbortInput for ScriptedInput {
    fn poll_key(&mut self) -> Option<char> {
        self.keys.pop_front().flatten()
    }
}

/// Returns immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self, _delay: Duration) {}
}

/// Blocks the current thread for the delay
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Pacer for ThreadSleep {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

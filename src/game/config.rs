use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use super::board::{Board, CellKind, Edge, Position};
use super::direction::Direction;

/// Board width used by the stock layout
pub const BOARD_WIDTH: i32 = 80;
/// Board height used by the stock layout
pub const BOARD_HEIGHT: i32 = 40;
/// Number of segments in every serpent
pub const SERPENT_LENGTH: usize = 10;
/// Side of the square blocks
pub const BLOCK_SIZE: i32 = 5;
/// Largest accepted board side
pub const MAX_BOARD_SIDE: i32 = 1000;
/// Key that stops a running simulation
pub const ABORT_KEY: char = 'a';

const APPLES_X: [i32; 10] = [75, 75, 78, 2, 8, 78, 74, 2, 72, 5];
const APPLES_Y: [i32; 10] = [8, 39, 2, 2, 5, 39, 33, 38, 35, 2];
const BLOCKS_X: [i32; 6] = [3, 74, 3, 74, 38, 38];
const BLOCKS_Y: [i32; 6] = [3, 3, 34, 34, 21, 15];

/// Where a serpent starts and which way it initially faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerpentStart {
    pub head: Position,
    pub direction: Direction,
}

impl SerpentStart {
    pub fn new(head: Position, direction: Direction) -> Self {
        Self { head, direction }
    }

    /// Body segments laid out in a straight line behind the head
    pub fn segments(&self, length: usize) -> Vec<Position> {
        let (dx, dy) = self.direction.delta();
        (0..length as i32)
            .map(|i| self.head.moved_by(-dx * i, -dy * i))
            .collect()
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in cells
    pub board_width: i32,
    /// Height of the board in cells
    pub board_height: i32,
    /// Number of segments in each serpent
    pub serpent_length: usize,
    /// One entry per serpent, processed in this order every tick
    pub starts: Vec<SerpentStart>,
    /// Apple cells in the order they are served
    pub apples: Vec<Position>,
    /// Top-left corners of the blocks
    pub blocks: Vec<Position>,
    /// Side of each square block
    pub block_size: i32,
    /// Key that stops the run
    pub abort_key: char,
    /// Pause between two ticks in milliseconds
    pub tick_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::single()
    }
}

impl GameConfig {
    /// One serpent heading right from the middle of the board
    pub fn single() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            serpent_length: SERPENT_LENGTH,
            starts: vec![SerpentStart::new(Position::new(40, 20), Direction::Right)],
            apples: APPLES_X
                .iter()
                .zip(APPLES_Y.iter())
                .map(|(&x, &y)| Position::new(x, y))
                .collect(),
            blocks: BLOCKS_X
                .iter()
                .zip(BLOCKS_Y.iter())
                .map(|(&x, &y)| Position::new(x, y))
                .collect(),
            block_size: BLOCK_SIZE,
            abort_key: ABORT_KEY,
            tick_delay_ms: 200,
        }
    }

    /// Two serpents racing for the same apples
    pub fn duel() -> Self {
        Self {
            starts: vec![
                SerpentStart::new(Position::new(40, 14), Direction::Right),
                SerpentStart::new(Position::new(40, 26), Direction::Left),
            ],
            tick_delay_ms: 20,
            ..Self::single()
        }
    }

    /// An open board of the given size with no blocks or apples
    pub fn with_board_size(width: i32, height: i32) -> Self {
        Self {
            board_width: width,
            board_height: height,
            starts: Vec::new(),
            apples: Vec::new(),
            blocks: Vec::new(),
            ..Self::single()
        }
    }

    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }

    /// Board with its walls, gaps and blocks, but no apples or serpents
    pub fn build_board(&self) -> Board {
        let mut board = Board::new(self.board_width, self.board_height);
        board.place_blocks(&self.blocks, self.block_size);
        board
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if the layout is playable, `Err(String)` describing the first
    /// problem otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.board_width < 4 || self.board_height < 4 {
            return Err(format!(
                "board must be at least 4x4, got {}x{}",
                self.board_width, self.board_height
            ));
        }

        if self.board_width > MAX_BOARD_SIDE || self.board_height > MAX_BOARD_SIDE {
            return Err(format!(
                "board must be at most {}x{}, got {}x{}",
                MAX_BOARD_SIDE, MAX_BOARD_SIDE, self.board_width, self.board_height
            ));
        }

        if self.serpent_length == 0 {
            return Err("serpent_length must be at least 1".to_string());
        }

        if self.starts.is_empty() || self.starts.len() > 2 {
            return Err(format!(
                "expected one or two serpents, got {}",
                self.starts.len()
            ));
        }

        if self.apples.is_empty() {
            return Err("apple sequence must not be empty".to_string());
        }

        if self.block_size <= 0 || self.block_size > MAX_BOARD_SIDE {
            return Err(format!(
                "block_size must be in 1..={}, got {}",
                MAX_BOARD_SIDE, self.block_size
            ));
        }

        let board = self.build_board();

        for edge in Edge::ALL {
            let opening = board.gap(edge).opening;
            if board.classify(opening) != CellKind::Empty {
                return Err(format!("{:?} gap at {:?} is covered by a block", edge, opening));
            }
        }

        for (i, apple) in self.apples.iter().enumerate() {
            match board.get(*apple) {
                None => return Err(format!("apple {} at {:?} is off the board", i, apple)),
                Some(kind) if kind.is_solid() => {
                    return Err(format!("apple {} at {:?} is inside a wall", i, apple))
                }
                Some(_) => {}
            }
        }

        let mut occupied = HashSet::new();
        for (i, start) in self.starts.iter().enumerate() {
            for segment in start.segments(self.serpent_length) {
                match board.get(segment) {
                    None => {
                        return Err(format!(
                            "serpent {} segment {:?} is off the board",
                            i + 1,
                            segment
                        ))
                    }
                    Some(kind) if kind.is_solid() => {
                        return Err(format!(
                            "serpent {} segment {:?} is inside a wall",
                            i + 1,
                            segment
                        ))
                    }
                    Some(_) => {}
                }
                if !occupied.insert(segment) {
                    return Err(format!("serpent segments overlap at {:?}", segment));
                }
            }
        }

        Ok(())
    }
}

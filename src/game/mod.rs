//! Simulation core for the self-playing snake
//!
//! This module contains the board, the serpents, the route planner and the
//! tick loop, without any terminal or timing dependencies. Drawing, key
//! polling and pacing go through the traits in [`port`].

pub mod apples;
pub mod board;
pub mod config;
pub mod direction;
pub mod engine;
pub mod planner;
pub mod port;
pub mod serpent;

// Re-export commonly used types
pub use apples::AppleSequence;
pub use board::{Board, CellKind, Edge, Gap, Position};
pub use config::{GameConfig, SerpentStart};
pub use direction::Direction;
pub use engine::{Outcome, RunReport, SerpentStats, SimState, Simulation, TickReport};
pub use planner::{classify_route, direction_towards, Route, RoutePlan};
pub use port::{AbortInput, CellDisplay, NoInput, NoPause, NullDisplay, Pacer, ScriptedInput, ThreadSleep};
pub use serpent::{MoveOutcome, MoveReport, Serpent, SerpentId, SerpentState};

//! Snake Autopilot - serpents that steer themselves to a fixed list of apples
//!
//! This library provides:
//! - Core simulation (game module): board, gaps, route planner, tick loop
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Run timing (metrics module)
//! - Execution modes (watch, headless)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

//! Greedy route choice and per-tick steering.
//!
//! There is no search here. A serpent picks once per apple whether to head
//! straight for it or to go through one of the four gaps, by comparing
//! Manhattan distances, then every tick steers toward its current objective
//! with a fixed fallback order.

use super::board::{Board, Edge, Position};
use super::direction::Direction;
use super::serpent::Serpent;

/// How a serpent intends to reach the current apple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Direct,
    ViaTopGap,
    ViaBottomGap,
    ViaLeftGap,
    ViaRightGap,
}

impl Route {
    /// The edge whose gap this route goes through
    pub fn gap_edge(&self) -> Option<Edge> {
        match self {
            Route::Direct => None,
            Route::ViaTopGap => Some(Edge::Top),
            Route::ViaBottomGap => Some(Edge::Bottom),
            Route::ViaLeftGap => Some(Edge::Left),
            Route::ViaRightGap => Some(Edge::Right),
        }
    }
}

/// Distance from `head` to `apple` when leaving through the gap on `edge`
/// and coming back in through the opposite one
pub fn gap_route_cost(board: &Board, head: Position, apple: Position, edge: Edge) -> i32 {
    let exit = board.gap(edge).exit;
    let entry = board.gap(edge.opposite()).opening;
    head.manhattan(exit) + entry.manhattan(apple)
}

/// Pick the cheapest route. Ties go to Direct, then Top, Bottom, Left, Right.
pub fn classify_route(board: &Board, head: Position, apple: Position) -> Route {
    let direct = head.manhattan(apple);
    let top = gap_route_cost(board, head, apple, Edge::Top);
    let bottom = gap_route_cost(board, head, apple, Edge::Bottom);
    let left = gap_route_cost(board, head, apple, Edge::Left);
    let right = gap_route_cost(board, head, apple, Edge::Right);

    if direct <= top && direct <= bottom && direct <= left && direct <= right {
        Route::Direct
    } else if top <= bottom && top <= left && top <= right {
        Route::ViaTopGap
    } else if bottom <= left && bottom <= right {
        Route::ViaBottomGap
    } else if left <= right {
        Route::ViaLeftGap
    } else {
        Route::ViaRightGap
    }
}

/// A serpent's route toward one particular apple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePlan {
    route: Route,
    apple_index: usize,
    used_gap: bool,
}

impl RoutePlan {
    pub fn new(board: &Board, head: Position, apple: Position, apple_index: usize) -> Self {
        Self {
            route: classify_route(board, head, apple),
            apple_index,
            used_gap: false,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Whether this plan was made for the apple at `apple_index`
    pub fn is_for(&self, apple_index: usize) -> bool {
        self.apple_index == apple_index
    }

    pub fn used_gap(&self) -> bool {
        self.used_gap
    }

    /// Record that the serpent went through a gap
    pub fn note_teleport(&mut self) {
        self.used_gap = true;
    }

    /// Where to steer this tick: the chosen gap's exit until a gap has been
    /// used, the apple from then on
    pub fn objective(&self, board: &Board, apple: Position) -> Position {
        match self.route.gap_edge() {
            Some(edge) if !self.used_gap => board.gap(edge).exit,
            _ => apple,
        }
    }
}

/// Pick this tick's direction toward `objective`.
///
/// With a vertical offset the order is: vertical toward the objective,
/// horizontal toward it, the other horizontal, then the other vertical.
/// With only a horizontal offset the axes swap. The first three candidates
/// are checked with the one-step lookahead; the fourth is taken without a
/// check, even if it is fatal. On the objective itself the serpent keeps its
/// current direction.
pub fn direction_towards(
    board: &Board,
    serpent: &Serpent,
    others: &[&Serpent],
    objective: Position,
) -> Direction {
    let head = serpent.head();
    let dx = objective.x - head.x;
    let dy = objective.y - head.y;

    let vertical = Direction::vertical_towards(dy);
    let horizontal = Direction::horizontal_towards(dx);

    let candidates = if dy != 0 {
        [vertical, horizontal, horizontal.opposite(), vertical.opposite()]
    } else if dx != 0 {
        [horizontal, vertical, vertical.opposite(), horizontal.opposite()]
    } else {
        return serpent.direction();
    };

    candidates[..3]
        .iter()
        .copied()
        .find(|&direction| !serpent.would_collide(board, direction, others))
        .unwrap_or(candidates[3])
}

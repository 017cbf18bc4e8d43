use std::fmt;

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use super::{
    apples::AppleSequence,
    board::{Board, Position},
    config::GameConfig,
    direction::Direction,
    planner::{direction_towards, RoutePlan},
    port::{symbol_for, AbortInput, CellDisplay, Pacer, APPLE_SYMBOL},
    serpent::{MoveOutcome, Serpent, SerpentId},
};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A serpent hit a wall, a block or a serpent
    Collided(SerpentId),
    /// Every apple in the sequence was eaten
    Won,
    /// The abort key was pressed
    Aborted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Collided(id) => write!(f, "{} collided", id),
            Outcome::Won => write!(f, "all apples eaten"),
            Outcome::Aborted => write!(f, "aborted"),
        }
    }
}

/// Per-serpent counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerpentStats {
    /// Unit moves attempted, one per tick
    pub moves: u32,
    /// Apples eaten
    pub apples: u32,
}

/// Mutable run state owned by the simulation loop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimState {
    pub tick: u32,
    pub stats: Vec<SerpentStats>,
    pub outcome: Option<Outcome>,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u32,
    pub ate: Vec<SerpentId>,
    pub teleported: Vec<SerpentId>,
    pub collided: Vec<SerpentId>,
    /// Set on the tick the run ends, and on every call afterwards
    pub outcome: Option<Outcome>,
}

/// Summary of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub outcome: Option<Outcome>,
    pub ticks: u32,
    pub serpents: Vec<(SerpentId, SerpentStats)>,
}

impl RunReport {
    pub fn total_apples(&self) -> u32 {
        self.serpents.iter().map(|(_, stats)| stats.apples).sum()
    }
}

/// Board, apples and serpents advanced one tick at a time
pub struct Simulation {
    config: GameConfig,
    board: Board,
    apples: AppleSequence,
    serpents: Vec<Serpent>,
    plans: Vec<Option<RoutePlan>>,
    state: SimState,
}

impl Simulation {
    /// Validate the configuration and lay out the board
    pub fn new(config: GameConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid game config: {}", e))?;

        let mut board = config.build_board();

        let serpents: Vec<Serpent> = config
            .starts
            .iter()
            .enumerate()
            .map(|(i, start)| Serpent::new(SerpentId(i as u8 + 1), start, config.serpent_length))
            .collect();
        for serpent in &serpents {
            serpent.stamp(&mut board);
        }

        let mut apples = AppleSequence::new(config.apples.clone());
        apples.place(&mut board);

        info!(
            width = config.board_width,
            height = config.board_height,
            serpents = serpents.len(),
            apples = apples.len(),
            "Simulation ready"
        );

        Ok(Self {
            plans: vec![None; serpents.len()],
            state: SimState {
                tick: 0,
                stats: vec![SerpentStats::default(); serpents.len()],
                outcome: None,
            },
            config,
            board,
            apples,
            serpents,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn apples(&self) -> &AppleSequence {
        &self.apples
    }

    pub fn serpents(&self) -> &[Serpent] {
        &self.serpents
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.state.outcome.is_some()
    }

    /// Route plan of a serpent, once it has planned for an apple
    pub fn plan(&self, id: SerpentId) -> Option<RoutePlan> {
        self.index_of(id).and_then(|i| self.plans[i])
    }

    fn index_of(&self, id: SerpentId) -> Option<usize> {
        self.serpents.iter().position(|s| s.id() == id)
    }

    /// Paint every board cell, serpents and apple included
    pub fn draw_board<D: CellDisplay + ?Sized>(&self, display: &mut D) {
        for (pos, kind) in self.board.cells() {
            display.draw(pos, symbol_for(kind));
        }
    }

    /// End the run without a winner or a collision
    pub fn abort(&mut self) {
        if self.state.outcome.is_none() {
            info!(tick = self.state.tick, "Simulation aborted");
            self.state.outcome = Some(Outcome::Aborted);
        }
    }

    /// Plan, move and resolve every serpent once
    pub fn tick<D: CellDisplay + ?Sized>(&mut self, display: &mut D) -> TickReport {
        if let Some(outcome) = self.state.outcome {
            return TickReport {
                tick: self.state.tick,
                outcome: Some(outcome),
                ..Default::default()
            };
        }

        self.state.tick += 1;
        let mut report = TickReport {
            tick: self.state.tick,
            ..Default::default()
        };

        if let Some(pos) = self.apples.place(&mut self.board) {
            display.draw(pos, APPLE_SYMBOL);
        }

        // eating the last apple ends the run on that tick, so this only
        // fires for a sequence drained without anyone eating
        let Some(apple) = self.apples.current_target() else {
            self.state.outcome = Some(Outcome::Won);
            report.outcome = self.state.outcome;
            return report;
        };

        self.refresh_plans(apple);
        let directions = self.choose_directions(apple);

        let mut eaters = Vec::new();
        for (i, direction) in directions.into_iter().enumerate() {
            let Some(direction) = direction else {
                continue;
            };
            let id = self.serpents[i].id();
            let moved = self.serpents[i].advance(&mut self.board, direction, &mut *display);
            self.state.stats[i].moves += 1;

            if moved.teleported {
                debug!(serpent = id.0, head = ?self.serpents[i].head(), "Went through a gap");
                if let Some(plan) = self.plans[i].as_mut() {
                    plan.note_teleport();
                }
                report.teleported.push(id);
            }

            match moved.outcome {
                MoveOutcome::Ate => {
                    eaters.push(i);
                    report.ate.push(id);
                }
                MoveOutcome::Collided(kind) => {
                    warn!(
                        serpent = id.0,
                        tick = self.state.tick,
                        head = ?self.serpents[i].head(),
                        ?direction,
                        ?kind,
                        "Collision"
                    );
                    report.collided.push(id);
                }
                MoveOutcome::Moved => {}
            }
        }

        let mut won = false;
        for i in eaters {
            self.state.stats[i].apples += 1;
            let next = self.apples.advance();
            info!(
                serpent = self.serpents[i].id().0,
                tick = self.state.tick,
                eaten = next,
                "Apple eaten"
            );

            if self.apples.is_exhausted() {
                won = true;
            } else if let Some(pos) = self.apples.place(&mut self.board) {
                display.draw(pos, APPLE_SYMBOL);
            }
        }

        if let Some(&first) = report.collided.first() {
            self.state.outcome = Some(Outcome::Collided(first));
        } else if won {
            for serpent in &mut self.serpents {
                serpent.mark_won();
            }
            self.state.outcome = Some(Outcome::Won);
        }

        if let Some(outcome) = self.state.outcome {
            info!(tick = self.state.tick, ?outcome, "Simulation finished");
        }

        report.outcome = self.state.outcome;
        report
    }

    /// Tick until the run ends, pausing and polling for the abort key
    /// between ticks
    pub fn run<D, I, P>(&mut self, display: &mut D, input: &mut I, pacer: &mut P) -> RunReport
    where
        D: CellDisplay + ?Sized,
        I: AbortInput + ?Sized,
        P: Pacer + ?Sized,
    {
        while !self.is_finished() {
            let report = self.tick(&mut *display);
            if report.outcome.is_some() {
                break;
            }

            pacer.pause(self.config.tick_delay());
            if input.poll_key() == Some(self.config.abort_key) {
                self.abort();
            }
        }

        self.report()
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            outcome: self.state.outcome,
            ticks: self.state.tick,
            serpents: self
                .serpents
                .iter()
                .zip(self.state.stats.iter())
                .map(|(serpent, stats)| (serpent.id(), *stats))
                .collect(),
        }
    }

    /// Re-plan every live serpent whose plan was made for an older apple
    fn refresh_plans(&mut self, apple: Position) {
        let index = self.apples.index();
        for (serpent, plan) in self.serpents.iter().zip(self.plans.iter_mut()) {
            if !serpent.is_alive() || plan.is_some_and(|p| p.is_for(index)) {
                continue;
            }
            let fresh = RoutePlan::new(&self.board, serpent.head(), apple, index);
            debug!(
                serpent = serpent.id().0,
                apple = index,
                route = ?fresh.route(),
                "Route chosen"
            );
            *plan = Some(fresh);
        }
    }

    /// Directions for every live serpent, all taken against the bodies as
    /// they stand before anyone moves
    fn choose_directions(&self, apple: Position) -> Vec<Option<Direction>> {
        self.serpents
            .iter()
            .zip(self.plans.iter())
            .map(|(serpent, plan)| {
                if !serpent.is_alive() {
                    return None;
                }
                let others: Vec<&Serpent> = self
                    .serpents
                    .iter()
                    .filter(|other| other.id() != serpent.id())
                    .collect();
                let objective = plan.map_or(apple, |p| p.objective(&self.board, apple));
                Some(direction_towards(&self.board, serpent, &others, objective))
            })
            .collect()
    }
}

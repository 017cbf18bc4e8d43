use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::game::{AbortInput, GameConfig, NullDisplay, RunReport, Simulation, ThreadSleep};
use crate::metrics::RunMetrics;

/// Presses the abort key once a number of ticks have gone by
#[derive(Debug, Clone)]
pub struct TickLimit {
    remaining: Option<u32>,
    key: char,
}

impl TickLimit {
    /// `None` never aborts
    pub fn new(max_ticks: Option<u32>, key: char) -> Self {
        Self {
            remaining: max_ticks,
            key,
        }
    }
}

impl AbortInput for TickLimit {
    // polled once after every tick that did not end the run
    fn poll_key(&mut self) -> Option<char> {
        let remaining = self.remaining.as_mut()?;
        *remaining = remaining.saturating_sub(1);
        (*remaining == 0).then_some(self.key)
    }
}

/// Runs the simulation without a terminal UI and prints a plain report
pub struct HeadlessMode {
    sim: Simulation,
    metrics: RunMetrics,
    limit: TickLimit,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, max_ticks: Option<u32>) -> Result<Self> {
        let limit = TickLimit::new(max_ticks, config.abort_key);
        let sim = Simulation::new(config).context("Failed to set up simulation")?;

        Ok(Self {
            sim,
            metrics: RunMetrics::new(),
            limit,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn run(&mut self) -> RunReport {
        self.metrics.on_run_start();
        let report = self
            .sim
            .run(&mut NullDisplay, &mut self.limit, &mut ThreadSleep);
        self.metrics.on_run_end();

        info!(
            ticks = report.ticks,
            elapsed = %self.metrics.format_seconds(),
            "Headless run complete"
        );
        report
    }

    /// Print the outcome, elapsed time and per-serpent counters
    pub fn write_report<W: Write>(&self, report: &RunReport, out: &mut W) -> Result<()> {
        let outcome = report
            .outcome
            .map_or_else(|| "unfinished".to_string(), |o| o.to_string());

        writeln!(out, "Outcome: {}", outcome).context("Failed to write report")?;
        writeln!(out, "Ticks: {}", report.ticks).context("Failed to write report")?;
        writeln!(out, "Elapsed: {} seconds", self.metrics.format_seconds())
            .context("Failed to write report")?;
        for (id, stats) in &report.serpents {
            writeln!(out, "Serpent {}: {} moves and {} apples eaten", id.0, stats.moves, stats.apples)
                .context("Failed to write report")?;
        }
        Ok(())
    }
}

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::game::{AbortInput, GameConfig, Simulation};
use crate::input::{InputHandler, KeyAction, KeyBuffer};
use crate::metrics::RunMetrics;
use crate::render::{Canvas, Renderer};

/// Key that leaves the summary screen
const SUMMARY_QUIT_KEY: char = 'q';

/// Shows the simulation live in the terminal
pub struct WatchMode {
    sim: Simulation,
    canvas: Canvas,
    keys: KeyBuffer,
    metrics: RunMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl WatchMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut canvas = Canvas::new(config.board_width, config.board_height);
        let sim = Simulation::new(config).context("Failed to set up simulation")?;
        sim.draw_board(&mut canvas);

        Ok(Self {
            sim,
            canvas,
            keys: KeyBuffer::new(),
            metrics: RunMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        // Restore the terminal even when the loop failed
        self.cleanup_terminal(&mut terminal)?;

        if let Some(outcome) = self.sim.outcome() {
            info!(?outcome, ticks = self.sim.state().tick, "Watch run finished");
        }

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // interval() rejects a zero period
        let tick_period = self.sim.config().tick_delay().max(Duration::from_millis(1));
        let mut tick_timer = interval(tick_period);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        self.metrics.on_run_start();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.step();
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &self.canvas, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Key(c) if self.sim.is_finished() => {
                if c.eq_ignore_ascii_case(&SUMMARY_QUIT_KEY) {
                    self.should_quit = true;
                }
            }
            KeyAction::Key(c) => self.keys.push(c),
            KeyAction::None => {}
        }
    }

    /// One tick, then the abort check on the key buffered since the last one
    fn step(&mut self) {
        if self.sim.is_finished() {
            return;
        }

        let report = self.sim.tick(&mut self.canvas);
        if report.outcome.is_none() && self.keys.poll_key() == Some(self.sim.config().abort_key) {
            self.sim.abort();
        }

        if self.sim.is_finished() {
            self.metrics.on_run_end();
        }
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::port::{APPLE_SYMBOL, BODY_SYMBOL, WALL_SYMBOL};
use crate::game::{Outcome, Simulation};
use crate::metrics::RunMetrics;

use super::Canvas;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, sim: &Simulation, canvas: &Canvas, metrics: &RunMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(sim, metrics);
        frame.render_widget(stats, chunks[0]);

        // board width plus its frame, centered
        let board_area = center(chunks[1], canvas.width() as u16 + 2);

        match sim.outcome() {
            Some(outcome) => {
                let summary = self.render_summary(sim, outcome, metrics);
                frame.render_widget(summary, board_area);
            }
            None => {
                let board = self.render_board(canvas);
                frame.render_widget(board, board_area);
            }
        }

        let controls = self.render_controls(sim);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_board(&self, canvas: &Canvas) -> Paragraph<'_> {
        let lines: Vec<Line> = canvas
            .lines()
            .map(|row| Line::from(row.chars().map(styled_cell).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake Autopilot "),
        )
    }

    fn render_stats(&self, sim: &Simulation, metrics: &RunMetrics) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                sim.state().tick.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        for (id, stats) in sim.report().serpents {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("[{}] ", id.head_symbol()),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::styled("Moves: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(stats.moves.to_string(), Style::default().fg(Color::White)));
            spans.push(Span::styled(" Apples: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(stats.apples.to_string(), Style::default().fg(Color::White)));
        }

        spans.push(Span::raw("    "));
        spans.push(Span::styled("Time: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(metrics.format_time(), Style::default().fg(Color::White)));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_summary(&self, sim: &Simulation, outcome: Outcome, metrics: &RunMetrics) -> Paragraph<'_> {
        let color = match outcome {
            Outcome::Won => Color::Green,
            Outcome::Collided(_) => Color::Red,
            Outcome::Aborted => Color::Yellow,
        };

        let report = sim.report();
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                outcome.to_string().to_uppercase(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
                Span::styled(report.ticks.to_string(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}s", metrics.format_seconds()),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        for (id, stats) in &report.serpents {
            text.push(Line::from(vec![
                Span::styled(format!("{}: ", id), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{} moves, {} apples", stats.moves, stats.apples),
                    Style::default().fg(Color::White),
                ),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, sim: &Simulation) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled(
                sim.config().abort_key.to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" to abort | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" or "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn center(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn styled_cell(symbol: char) -> Span<'static> {
    let style = match symbol {
        WALL_SYMBOL => Style::default().fg(Color::Gray),
        APPLE_SYMBOL => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        BODY_SYMBOL => Style::default().fg(Color::Green),
        c if c.is_ascii_digit() => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        _ => Style::default(),
    };
    Span::styled(symbol.to_string(), style)
}

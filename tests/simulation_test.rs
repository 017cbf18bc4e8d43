use std::collections::HashSet;

use snake_autopilot::game::{
    CellKind, GameConfig, NoInput, NoPause, NullDisplay, Outcome, Position, Route, SerpentId,
    SerpentState, Simulation,
};
use snake_autopilot::modes::HeadlessMode;
use snake_autopilot::render::Canvas;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Checks that must hold between any two ticks
fn assert_consistent(sim: &Simulation) {
    let board = sim.board();
    let mut seen = HashSet::new();

    for serpent in sim.serpents() {
        assert_eq!(serpent.len(), sim.config().serpent_length);
        for segment in serpent.body() {
            assert!(
                seen.insert(*segment),
                "tick {}: segment {:?} used twice",
                sim.state().tick,
                segment
            );
            assert!(board.is_inside(*segment));
            assert!(!board.classify(*segment).is_solid());
        }
        assert_eq!(board.classify(serpent.head()), CellKind::Head(serpent.id()));
    }

    if let Some(apple) = sim.apples().current_target() {
        if !sim.apples().is_pending() {
            assert_eq!(board.classify(apple), CellKind::Apple);
        }
    }
}

fn run_checked(sim: &mut Simulation, canvas: &mut Canvas) -> Option<Outcome> {
    while !sim.is_finished() {
        sim.tick(canvas);
        assert_consistent(sim);
        assert!(sim.state().tick < 10_000, "run did not end");
    }
    sim.outcome()
}

#[test]
fn test_single_serpent_eats_every_apple() {
    init_tracing();
    let config = GameConfig::single();
    let mut canvas = Canvas::new(config.board_width, config.board_height);
    let mut sim = Simulation::new(config).unwrap();
    sim.draw_board(&mut canvas);

    assert_eq!(run_checked(&mut sim, &mut canvas), Some(Outcome::Won));

    let report = sim.report();
    assert_eq!(report.ticks, 389);
    assert_eq!(report.serpents.len(), 1);
    assert_eq!(report.serpents[0].0, SerpentId(1));
    assert_eq!(report.serpents[0].1.moves, 389);
    assert_eq!(report.serpents[0].1.apples, 10);
    assert_eq!(report.total_apples(), 10);
    assert_eq!(sim.serpents()[0].state(), SerpentState::Won);

    // the last apple cell now holds the head
    assert_eq!(sim.serpents()[0].head(), Position::new(5, 2));
}

#[test]
fn test_first_apple_eaten_on_tick_47() {
    let mut sim = Simulation::new(GameConfig::single()).unwrap();

    for _ in 0..46 {
        sim.tick(&mut NullDisplay);
    }
    assert_eq!(sim.state().stats[0].apples, 0);

    let report = sim.tick(&mut NullDisplay);
    assert_eq!(report.ate, vec![SerpentId(1)]);
    assert_eq!(sim.serpents()[0].head(), Position::new(75, 8));
    assert_eq!(sim.board().classify(Position::new(75, 39)), CellKind::Apple);
}

#[test]
fn test_far_corner_apple_goes_through_right_gap() {
    let mut sim = Simulation::new(GameConfig::single()).unwrap();

    // third apple is eaten on tick 124 at (78,2); the next one sits at (2,2)
    while sim.state().tick < 125 {
        sim.tick(&mut NullDisplay);
    }

    assert_eq!(sim.apples().index(), 3);
    let plan = sim.plan(SerpentId(1)).unwrap();
    assert_eq!(plan.route(), Route::ViaRightGap);
    assert!(plan.is_for(3));
}

#[test]
fn test_duel_ends_when_second_serpent_hits_first() {
    init_tracing();
    let config = GameConfig::duel();
    let mut canvas = Canvas::new(config.board_width, config.board_height);
    let mut sim = Simulation::new(config).unwrap();
    sim.draw_board(&mut canvas);

    assert_eq!(
        run_checked(&mut sim, &mut canvas),
        Some(Outcome::Collided(SerpentId(2)))
    );

    let report = sim.report();
    assert_eq!(report.ticks, 233);
    assert_eq!(report.serpents[0].1.moves, 233);
    assert_eq!(report.serpents[1].1.moves, 233);
    assert_eq!(report.serpents[0].1.apples, 7);
    assert_eq!(report.serpents[1].1.apples, 0);

    // serpent 2 aimed at the cell serpent 1's head had just moved into
    assert_eq!(sim.serpents()[0].head(), Position::new(74, 33));
    assert_eq!(sim.serpents()[1].head(), Position::new(75, 33));
    assert_eq!(sim.serpents()[0].state(), SerpentState::Alive);
    assert_eq!(sim.serpents()[1].state(), SerpentState::Collided);
}

#[test]
fn test_canvas_tracks_board() {
    for config in [GameConfig::single(), GameConfig::duel()] {
        let mut canvas = Canvas::new(config.board_width, config.board_height);
        let mut sim = Simulation::new(config.clone()).unwrap();
        sim.draw_board(&mut canvas);

        for _ in 0..150 {
            sim.tick(&mut canvas);
        }

        let mut fresh = Canvas::new(config.board_width, config.board_height);
        sim.draw_board(&mut fresh);
        assert_eq!(canvas, fresh);
    }
}

#[test]
fn test_run_matches_manual_ticks() {
    let mut sim = Simulation::new(GameConfig::duel()).unwrap();
    let report = sim.run(&mut NullDisplay, &mut NoInput, &mut NoPause);

    assert_eq!(report.outcome, Some(Outcome::Collided(SerpentId(2))));
    assert_eq!(report.ticks, 233);
}

#[test]
fn test_headless_mode_full_run() {
    let mut config = GameConfig::single();
    config.tick_delay_ms = 0;
    let mut mode = HeadlessMode::new(config, None).unwrap();

    let report = mode.run();
    assert_eq!(report.outcome, Some(Outcome::Won));

    let mut out = Vec::new();
    mode.write_report(&report, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Outcome: all apples eaten"));
    assert!(text.contains("Ticks: 389"));
    assert!(text.contains("Serpent 1: 389 moves and 10 apples eaten"));
    assert_eq!(mode.simulation().apples().index(), 10);
}

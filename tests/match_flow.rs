use std::time::Instant;

use cpu_pong::autopilot::Autopilot;
use cpu_pong::input::{Controls, InputEvent, Key, KeyAction};
use cpu_pong::sim::{GameEvent, Side};
use cpu_pong::{Command, Difficulty, Settings, Simulation};

fn run_autopilot(sim: &mut Simulation, ticks: usize) {
    let pilot = Autopilot::default();
    for _ in 0..ticks {
        let input = pilot.input(sim.state());
        sim.set_up_held(input.up_held);
        sim.set_down_held(input.down_held);
        sim.tick();
    }
}

#[test]
fn test_paused_match_is_frozen() {
    let mut sim = Simulation::new(Settings::default(), 5);
    run_autopilot(&mut sim, 30);

    sim.apply(Command::TogglePause);
    let before = sim.snapshot();
    sim.apply(Command::SetDownHeld(true));
    for _ in 0..120 {
        sim.tick();
        assert!(sim.events().is_empty());
    }
    assert_eq!(sim.snapshot(), before);

    sim.apply(Command::TogglePause);
    sim.tick();
    assert!(sim.player_y() > before.player_y);
    assert_eq!(sim.snapshot().frame_count, before.frame_count + 1);
}

#[test]
fn test_every_point_counted_once() {
    let mut sim = Simulation::new(Settings::from_difficulty(Difficulty::Hard), 99);
    // Player parks at the top and never returns anything aimed low
    sim.apply(Command::SetUpHeld(true));

    let mut player_points = 0;
    let mut opponent_points = 0;
    for _ in 0..6000 {
        sim.tick();
        for event in sim.events() {
            match event {
                GameEvent::Scored { side: Side::Player } => player_points += 1,
                GameEvent::Scored {
                    side: Side::Opponent,
                } => opponent_points += 1,
                _ => {}
            }
        }
    }

    assert!(player_points + opponent_points > 0);
    assert_eq!(sim.score_player(), player_points);
    assert_eq!(sim.score_opponent(), opponent_points);
}

#[test]
fn test_keyboard_moves_player() {
    let settings = Settings::default();
    let mut sim = Simulation::new(settings.clone(), 3);
    let mut controls = Controls::new(true);
    let now = Instant::now();

    for command in controls.handle(InputEvent::Key(Key::Down, KeyAction::Press), now) {
        sim.apply(command);
    }
    sim.tick();
    assert_eq!(
        sim.player_y(),
        settings.paddle_center_y() + settings.player_speed
    );

    for command in controls.handle(InputEvent::Key(Key::Down, KeyAction::Release), now) {
        sim.apply(command);
    }
    let y = sim.player_y();
    sim.tick();
    assert_eq!(sim.player_y(), y);

    for command in controls.handle(InputEvent::Click, now) {
        sim.apply(command);
    }
    assert!(!sim.show_help());
}

#[test]
fn test_reset_mid_match() {
    let settings = Settings::default();
    let mut sim = Simulation::new(settings.clone(), 21);
    sim.apply(Command::SetUpHeld(true));
    for _ in 0..3000 {
        sim.tick();
    }
    sim.apply(Command::TogglePause);
    sim.apply(Command::Reset);

    let snap = sim.snapshot();
    assert_eq!((snap.score_player, snap.score_opponent), (0, 0));
    assert_eq!(snap.player_y, settings.paddle_center_y());
    assert!(!snap.paused);
    assert!(snap.show_help);
    // Held keys survive a reset
    assert!(sim.state().input.up_held);
}

#[test]
fn test_same_seed_same_match() {
    let mut a = Simulation::new(Settings::default(), 2024);
    let mut b = Simulation::new(Settings::default(), 2024);
    run_autopilot(&mut a, 2500);
    run_autopilot(&mut b, 2500);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_snapshot_json() {
    let mut sim = Simulation::new(Settings::default(), 8);
    run_autopilot(&mut sim, 10);
    let value = serde_json::to_value(sim.snapshot()).unwrap();
    assert_eq!(value["frame_count"], 10);
    assert_eq!(value["paused"], false);
    assert!(value["ball"].is_array());
}

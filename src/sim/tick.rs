//! Fixed timestep simulation tick
//!
//! One call advances the match by one frame: player paddle, opponent paddle,
//! then the ball, in that order. Nothing moves while the match is paused.

use super::collision::{Rebound, paddle_rebound};
use super::rng::RandomSource;
use super::state::{GameEvent, Side, SimulationState};

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimulationState, rng: &mut dyn RandomSource) {
    state.events.clear();

    if !state.match_state.is_running() {
        return;
    }

    state.match_state.frame_count += 1;

    move_player(state);

    state
        .opponent_ai
        .update(&mut state.opponent, &state.ball, &state.settings, rng);

    step_ball(state, rng);
}

/// Apply held keys to the player paddle. Up and down together cancel out.
pub fn move_player(state: &mut SimulationState) {
    let speed = state.settings.player_speed;
    let mut dy = 0.0;
    if state.input.up_held {
        dy -= speed;
    }
    if state.input.down_held {
        dy += speed;
    }
    state.player.move_by(dy, &state.settings);
}

/// Integrate the ball, bounce it off walls and paddles, and detect points
pub fn step_ball(state: &mut SimulationState, rng: &mut dyn RandomSource) {
    let SimulationState {
        settings,
        player,
        opponent,
        ball,
        match_state,
        events,
        ..
    } = state;

    ball.pos += ball.vel;

    // Top/bottom walls
    if ball.pos.y <= 0.0 {
        ball.pos.y = 0.0;
        if ball.vel.y < 0.0 {
            events.push(GameEvent::WallBounce);
        }
        ball.vel.y = ball.vel.y.abs();
    } else if ball.pos.y + ball.size >= settings.field_height {
        ball.pos.y = settings.field_height - ball.size;
        if ball.vel.y > 0.0 {
            events.push(GameEvent::WallBounce);
        }
        ball.vel.y = -ball.vel.y.abs();
    }

    // Paddles. Each side only counts while the ball is heading toward it, so a
    // ball already leaving cannot be hit twice.
    let max_deflection = settings.max_deflection_deg.to_radians();
    let ball_rect = ball.rect();

    if ball.vel.x < 0.0 && ball_rect.intersects(&player.rect()) {
        let hit = paddle_rebound(
            &ball_rect,
            ball.vel,
            &player.rect(),
            Rebound::Right,
            max_deflection,
            settings.ball_speed_step,
            settings.ball_speed_max,
        );
        ball.vel = hit.velocity;
        ball.pos.x = player.x + player.width + 1.0;
        log::trace!(
            "Player hit: norm={:.2} angle={:.1}°",
            hit.norm,
            hit.angle.to_degrees()
        );
        events.push(GameEvent::PaddleHit {
            side: player.side,
            speed: ball.speed(),
        });
    }

    if ball.vel.x > 0.0 && ball_rect.intersects(&opponent.rect()) {
        let hit = paddle_rebound(
            &ball_rect,
            ball.vel,
            &opponent.rect(),
            Rebound::Left,
            max_deflection,
            settings.ball_speed_step,
            settings.ball_speed_max,
        );
        ball.vel = hit.velocity;
        ball.pos.x = opponent.x - ball.size - 1.0;
        log::trace!(
            "Opponent hit: norm={:.2} angle={:.1}°",
            hit.norm,
            hit.angle.to_degrees()
        );
        events.push(GameEvent::PaddleHit {
            side: opponent.side,
            speed: ball.speed(),
        });
    }

    // Points. Re-serving recenters the ball, so one exit scores once.
    let scorer = if ball.pos.x + ball.size < 0.0 {
        Some(Side::Opponent)
    } else if ball.pos.x > settings.field_width {
        Some(Side::Player)
    } else {
        None
    };

    if let Some(side) = scorer {
        match_state.award_point(side);
        events.push(GameEvent::Scored { side });
        log::debug!(
            "{:?} scored ({} - {})",
            side,
            match_state.score_player,
            match_state.score_opponent
        );
        ball.serve(settings, rng, false);
        events.push(GameEvent::Served {
            toward_player: false,
        });
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::rng::GameRng;
    use proptest::prelude::*;

    proptest! {
        /// Paddle and ball stay inside the field whatever the player does
        #[test]
        fn prop_positions_stay_in_field(
            seed in any::<u64>(),
            keys in prop::collection::vec((any::<bool>(), any::<bool>()), 1..400)
        ) {
            let mut rng = GameRng::new(seed);
            let mut state = SimulationState::new(Settings::default(), &mut rng);
            let max_paddle = state.settings.paddle_max_y();
            let max_ball = state.settings.field_height - state.ball.size;

            for (up, down) in keys {
                state.input.up_held = up;
                state.input.down_held = down;
                tick(&mut state, &mut rng);

                prop_assert!(state.player.y >= 0.0 && state.player.y <= max_paddle);
                prop_assert!(state.opponent.y >= 0.0 && state.opponent.y <= max_paddle);
                prop_assert!(state.ball.pos.y >= 0.0 && state.ball.pos.y <= max_ball);
            }
        }

        /// Ball speed never leaves [start, max] during play
        #[test]
        fn prop_speed_within_bounds(seed in any::<u64>(), ticks in 1usize..2000) {
            let mut rng = GameRng::new(seed);
            let mut state = SimulationState::new(Settings::default(), &mut rng);
            let start = state.settings.ball_speed_start;
            let max = state.settings.ball_speed_max;

            for _ in 0..ticks {
                tick(&mut state, &mut rng);
                let speed = state.ball.speed();
                prop_assert!(speed >= start - 1e-3 && speed <= max + 1e-3);
            }
        }

        /// Each point adds exactly one to exactly one score
        #[test]
        fn prop_points_counted_once(seed in any::<u64>(), ticks in 1usize..3000) {
            let mut rng = GameRng::new(seed);
            let mut state = SimulationState::new(Settings::default(), &mut rng);

            for _ in 0..ticks {
                let before = state.match_state.score_player + state.match_state.score_opponent;
                tick(&mut state, &mut rng);
                let after = state.match_state.score_player + state.match_state.score_opponent;
                let scored = state
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::Scored { .. }))
                    .count() as u32;
                prop_assert_eq!(after - before, scored);
                prop_assert!(scored <= 1);
            }
        }
    }
}

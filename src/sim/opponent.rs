//! Scripted opponent paddle
//!
//! The opponent only looks at the ball every `reaction_frames` ticks. On those
//! ticks it aims at the ball center with an error that grows with horizontal
//! distance, then covers a `smoothing` fraction of the gap, never more than
//! `max_speed`. Between looks it holds still.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{Ball, Paddle};
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpponentController {
    pub reaction_frames: u32,
    pub smoothing: f32,
    pub max_speed: f32,
    pub error_cap: f32,
    pub error_divisor: f32,
    /// Ticks since the last recompute. Starts at `reaction_frames` so the
    /// first update reacts immediately.
    pub ticks_since_update: u32,
}

impl OpponentController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            reaction_frames: settings.opponent_reaction_frames.max(1),
            smoothing: settings.opponent_smoothing,
            max_speed: settings.opponent_max_speed(),
            error_cap: settings.opponent_error_cap,
            error_divisor: settings.opponent_error_divisor,
            ticks_since_update: settings.opponent_reaction_frames.max(1),
        }
    }

    /// Forget the reaction delay so the next update recomputes
    pub fn reset(&mut self) {
        self.ticks_since_update = self.reaction_frames;
    }

    /// Spread of the aiming error for a ball `distance_x` away
    pub fn aim_error(&self, distance_x: f32) -> f32 {
        (distance_x / self.error_divisor).min(self.error_cap)
    }

    /// Paddle top edge the opponent wants, including aiming error
    pub fn target_y(&self, paddle: &Paddle, ball: &Ball, rng: &mut dyn RandomSource) -> f32 {
        let target = ball.center().y - paddle.height / 2.0;
        let error = self.aim_error((ball.pos.x - paddle.x).abs());
        target + rng.next_unit() * error - error / 2.0
    }

    /// Smoothed, speed-capped step from `current_y` toward `target_y`
    pub fn step_toward(&self, current_y: f32, target_y: f32) -> f32 {
        ((target_y - current_y) * self.smoothing).clamp(-self.max_speed, self.max_speed)
    }

    /// Advance one tick. Returns true when the paddle was recomputed.
    pub fn update(
        &mut self,
        paddle: &mut Paddle,
        ball: &Ball,
        settings: &Settings,
        rng: &mut dyn RandomSource,
    ) -> bool {
        if self.ticks_since_update < self.reaction_frames {
            self.ticks_since_update += 1;
            return false;
        }
        self.ticks_since_update = 1;

        let target = self.target_y(paddle, ball, rng);
        let step = self.step_toward(paddle.y, target);
        paddle.move_by(step, settings);
        true
    }
}

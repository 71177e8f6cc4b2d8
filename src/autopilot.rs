//! Idle/demo mode: synthesised input for the player paddle
//!
//! The autopilot only presses keys, exactly as a person would, so the
//! simulation cannot tell it apart from keyboard play.

use crate::sim::{InputState, SimulationState};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Dead band around the target, in field units
    pub deadzone: f32,
    /// Fraction of paddle height used for the drifting aim offset
    pub wobble: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            deadzone: 6.0,
            wobble: 0.3,
        }
    }
}

impl Autopilot {
    /// Y the paddle center should head for
    pub fn target_y(&self, state: &SimulationState) -> f32 {
        let ball = &state.ball;
        if ball.vel.x >= 0.0 {
            // Ball going away: wait in the middle
            return state.settings.field_height / 2.0;
        }

        // Oscillating offset so rallies are not perfect loops
        let t = state.match_state.frame_count as f32 * 0.01;
        let offset = (t.sin() + (t * 0.7).sin() * 0.5) * self.wobble * state.player.height / 2.0;
        ball.center().y + offset
    }

    /// Keys to hold this tick
    pub fn input(&self, state: &SimulationState) -> InputState {
        let target = self.target_y(state);
        let center = state.player.center_y();
        InputState {
            up_held: center > target + self.deadzone,
            down_held: center < target - self.deadzone,
        }
    }
}

//! Fixed-timestep accumulator
//!
//! Turns irregular frame times into a whole number of simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f32,
    max_substeps: u32,
    max_frame_dt: f32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Feed one frame's elapsed seconds; returns how many ticks to run now.
    ///
    /// Long frames are clamped and at most `MAX_SUBSTEPS` ticks are returned, so
    /// a stalled frontend drops time instead of spiralling into catch-up work.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, self.max_frame_dt);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_substeps {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        ticks
    }
}

//! Rendering collaborators
//!
//! Renderers only read a `Snapshot` after each tick and report input events
//! back; they never touch the simulation directly.

pub mod terminal;

pub use terminal::TerminalRenderer;

use std::io;
use std::time::Duration;

use crate::input::InputEvent;
use crate::settings::Settings;
use crate::sim::Snapshot;

/// Trait that abstracts the rendering/input backend
pub trait Renderer {
    /// Take over the display
    fn init(&mut self) -> io::Result<()>;

    /// Draw one frame
    fn render(&mut self, snapshot: &Snapshot, settings: &Settings) -> io::Result<()>;

    /// Restore the display
    fn cleanup(&mut self) -> io::Result<()>;

    /// Wait up to `timeout` for the next input event
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;

    /// Whether key releases are reported (otherwise holds time out)
    fn reports_key_release(&self) -> bool {
        false
    }
}

pub const TITLE: &str = "Pong - Player vs. Computer";
pub const STATUS_PAUSED: &str = "PAUSED (P/ESC)";
pub const STATUS_CONTROLS: &str = "W/S or Up/Down  |  P/ESC: Pause  |  R: Reset  |  H: Help  |  Q: Quit";
pub const HELP_LINES: [&str; 4] = [
    "Move:   W/S or Up/Down",
    "Pause:  P or ESC",
    "Reset:  R",
    "Help:   H",
];
pub const HELP_HINT: &str = "Click or press Enter to start ...";

/// Maps field coordinates onto a grid of character cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, settings: &Settings) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            scale_x: cols as f32 / settings.field_width,
            scale_y: rows as f32 / settings.field_height,
        }
    }

    /// Column of field x, clamped to the grid
    pub fn col(&self, x: f32) -> u16 {
        ((x * self.scale_x).floor().max(0.0) as u16).min(self.cols - 1)
    }

    /// Row of field y, clamped to the grid
    pub fn row(&self, y: f32) -> u16 {
        ((y * self.scale_y).floor().max(0.0) as u16).min(self.rows - 1)
    }

    /// Rows covered by a vertical span `[y, y + h)`, at least one
    pub fn rows_spanned(&self, y: f32, h: f32) -> std::ops::RangeInclusive<u16> {
        let first = self.row(y);
        let last = self.row((y + h - f32::EPSILON).max(y)).max(first);
        first..=last
    }
}

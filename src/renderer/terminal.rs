//! Terminal renderer (crossterm)
//!
//! The field is scaled onto the terminal grid; the last row is the status bar.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEventKind, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use super::{HELP_HINT, HELP_LINES, Renderer, STATUS_CONTROLS, STATUS_PAUSED, TITLE, Viewport};
use crate::input::{InputEvent, Key, KeyAction};
use crate::settings::Settings;
use crate::sim::Snapshot;

const PADDLE: char = '█';
const BALL: char = '●';
const NET: char = '│';

pub struct TerminalRenderer {
    active: bool,
    enhanced_keys: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            active: false,
            enhanced_keys: false,
        }
    }
}

impl Renderer for TerminalRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            EnableMouseCapture
        )?;

        // Key release events need the kitty keyboard protocol
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.enhanced_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::debug!("Terminal ready (key release events: {})", self.enhanced_keys);

        self.active = true;
        Ok(())
    }

    fn render(&mut self, snapshot: &Snapshot, settings: &Settings) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let lines = compose(snapshot, settings, cols, rows);

        let mut stdout = io::stdout();
        queue!(stdout, SetForegroundColor(Color::White))?;
        for (row, line) in lines.iter().enumerate() {
            queue!(stdout, cursor::MoveTo(0, row as u16), Print(line))?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        if self.enhanced_keys {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()
    }

    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let input = match event::read()? {
            Event::Key(key) => map_key(&key),
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                Some(InputEvent::Click)
            }
            _ => None,
        };
        Ok(input)
    }

    fn reports_key_release(&self) -> bool {
        self.enhanced_keys
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            log::warn!("Failed to restore terminal: {e}");
        }
    }
}

/// Translate a terminal key event
pub fn map_key(event: &KeyEvent) -> Option<InputEvent> {
    let key = match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Esc => Key::Pause,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Key::Up,
            's' => Key::Down,
            'p' => Key::Pause,
            'r' => Key::Reset,
            'h' => Key::Help,
            ' ' => Key::Confirm,
            'q' => Key::Quit,
            _ => return None,
        },
        _ => return None,
    };
    let action = match event.kind {
        KeyEventKind::Press => KeyAction::Press,
        KeyEventKind::Repeat => KeyAction::Repeat,
        KeyEventKind::Release => KeyAction::Release,
    };
    Some(InputEvent::Key(key, action))
}

/// Lay out one frame as `rows` lines of exactly `cols` characters
pub fn compose(snapshot: &Snapshot, settings: &Settings, cols: u16, rows: u16) -> Vec<String> {
    let cols = cols.max(1) as usize;
    let rows = rows.max(2) as usize;
    let field_rows = rows - 1;
    let view = Viewport::new(cols as u16, field_rows as u16, settings);
    let mut grid = vec![vec![' '; cols]; rows];

    // Net
    let net_col = view.col(settings.field_width / 2.0) as usize;
    for row in (0..field_rows).step_by(2) {
        grid[row][net_col] = NET;
    }

    // Scores
    let center = net_col;
    let left = snapshot.score_player.to_string();
    let right = snapshot.score_opponent.to_string();
    put_str(&mut grid, 1, center.saturating_sub(4 + left.len()), &left);
    put_str(&mut grid, 1, center + 4, &right);

    // Paddles
    for (x, y) in [
        (settings.player_x(), snapshot.player_y),
        (settings.opponent_x(), snapshot.opponent_y),
    ] {
        let col = view.col(x + settings.paddle_width / 2.0) as usize;
        for row in view.rows_spanned(y, settings.paddle_height) {
            grid[row as usize][col] = PADDLE;
        }
    }

    // Ball
    let half = settings.ball_size / 2.0;
    let ball_col = view.col(snapshot.ball.x + half) as usize;
    let ball_row = view.row(snapshot.ball.y + half) as usize;
    grid[ball_row][ball_col] = BALL;

    if snapshot.show_help {
        draw_help(&mut grid, cols, field_rows);
    }

    let status = if snapshot.paused {
        STATUS_PAUSED
    } else {
        STATUS_CONTROLS
    };
    put_str(&mut grid, rows - 1, 1, status);

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn draw_help(grid: &mut [Vec<char>], cols: usize, field_rows: usize) {
    let width = HELP_LINES
        .iter()
        .map(|l| l.chars().count())
        .chain([TITLE.chars().count(), HELP_HINT.chars().count()])
        .max()
        .unwrap_or(0)
        + 4;
    let height = HELP_LINES.len() + 6;
    if width > cols || height > field_rows {
        return;
    }

    let left = (cols - width) / 2;
    let top = (field_rows - height) / 2;
    for row in top..top + height {
        for col in left..left + width {
            let edge_row = row == top || row == top + height - 1;
            let edge_col = col == left || col == left + width - 1;
            grid[row][col] = match (edge_row, edge_col) {
                (true, true) => '+',
                (true, false) => '-',
                (false, true) => '|',
                (false, false) => ' ',
            };
        }
    }

    put_str(grid, top + 1, left + 2, TITLE);
    for (i, line) in HELP_LINES.iter().enumerate() {
        put_str(grid, top + 3 + i, left + 2, line);
    }
    put_str(grid, top + height - 2, left + 2, HELP_HINT);
}

/// Write `text` at (row, col), clipped to the grid
fn put_str(grid: &mut [Vec<char>], row: usize, col: usize, text: &str) {
    let Some(line) = grid.get_mut(row) else {
        return;
    };
    for (offset, ch) in text.chars().enumerate() {
        match line.get_mut(col + offset) {
            Some(cell) => *cell = ch,
            None => break,
        }
    }
}

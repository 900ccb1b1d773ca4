use crate::entity::Rect;
use crate::game::Game;
use crate::renderer::{draw, Renderer, Surface};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

const FILL: char = '█';
const BLANK: char = ' ';
pub const TITLE: &str = "Pong with Sound";
const CONTROLS: &str = "W/S: left paddle | Up/Down: right paddle | SPACE: start | Q: quit";

/// Character grid that scales board pixels down to terminal cells.
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    board_width: i32,
    board_height: i32,
    cells: Vec<char>,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16, board_width: i32, board_height: i32) -> Self {
        Self {
            cols,
            rows,
            board_width,
            board_height,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: u16, row: u16) -> char {
        if col >= self.cols || row >= self.rows {
            return BLANK;
        }
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    pub fn line(&self, row: u16) -> String {
        (0..self.cols).map(|col| self.cell(col, row)).collect()
    }

    fn scale(value: i32, cells: u16, extent: i32) -> i64 {
        (value as i64 * cells as i64).div_euclid(extent as i64)
    }

    fn scale_up(value: i32, cells: u16, extent: i32) -> i64 {
        let scaled = value as i64 * cells as i64;
        scaled.div_euclid(extent as i64) + i64::from(scaled.rem_euclid(extent as i64) != 0)
    }

    fn set(&mut self, col: i64, row: i64, ch: char) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = ch;
    }
}

impl Surface for CellCanvas {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn fill_rect(&mut self, rect: Rect) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }

        // Anything visible covers at least one cell
        let col0 = Self::scale(rect.x, self.cols, self.board_width);
        let col1 = Self::scale_up(rect.x + rect.width, self.cols, self.board_width).max(col0 + 1);
        let row0 = Self::scale(rect.y, self.rows, self.board_height);
        let row1 = Self::scale_up(rect.y + rect.height, self.rows, self.board_height).max(row0 + 1);

        for row in row0..row1 {
            for col in col0..col1 {
                self.set(col, row, FILL);
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let row = Self::scale(y, self.rows, self.board_height);
        let col = Self::scale(x, self.cols, self.board_width);
        for (offset, ch) in text.chars().enumerate() {
            self.set(col + offset as i64, row, ch);
        }
    }
}

pub struct CliRenderer {
    canvas: CellCanvas,
    key_release_events: bool,
    active: bool,
}

impl CliRenderer {
    pub fn new(board_width: i32, board_height: i32) -> Self {
        Self {
            canvas: CellCanvas::new(0, 0, board_width, board_height),
            key_release_events: false,
            active: false,
        }
    }

    /// Whether the terminal agreed to report key releases.
    pub fn key_release_events(&self) -> bool {
        self.key_release_events
    }

    fn draw_info(&self, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, self.canvas.rows()),
            terminal::Clear(ClearType::CurrentLine),
            Print(CONTROLS)
        )?;
        Ok(())
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::SetTitle(TITLE),
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        self.active = true;

        // Without the enhancement protocol terminals only report presses
        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.key_release_events = true;
        }
        log::info!("terminal key release events: {}", self.key_release_events);

        let (cols, rows) = terminal::size()?;
        self.resize(cols, rows);
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        draw(game, &mut self.canvas);

        let mut stdout = io::stdout();
        queue!(
            stdout,
            SetBackgroundColor(Color::Black),
            SetForegroundColor(Color::White)
        )?;
        for row in 0..self.canvas.rows() {
            queue!(stdout, cursor::MoveTo(0, row), Print(self.canvas.line(row)))?;
        }
        self.draw_info(&mut stdout)?;
        queue!(stdout, ResetColor)?;

        stdout.flush()?;
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        // Bottom line is reserved for the controls legend
        let rows = rows.saturating_sub(1);
        self.canvas = CellCanvas::new(
            cols,
            rows,
            self.canvas.board_width,
            self.canvas.board_height,
        );
        log::debug!("canvas resized to {}x{}", cols, rows);
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        if self.key_release_events {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

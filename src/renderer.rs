use crate::entity::Rect;
use crate::game::{Game, GameState};
use std::io;

pub const START_PROMPT: &str = "Press SPACE to start";

/// A 2D drawing target addressed in board pixels.
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect);
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
}

/// Draw one frame of `game` onto `surface`. Never mutates the game.
pub fn draw<S: Surface + ?Sized>(game: &Game, surface: &mut S) {
    surface.clear();

    surface.fill_rect(game.left.rect);
    surface.fill_rect(game.right.rect);
    surface.fill_rect(game.ball.rect);

    surface.draw_text(game.width / 2 - 50, 50, &game.score.left.to_string());
    surface.draw_text(game.width / 2 + 30, 50, &game.score.right.to_string());

    if game.state == GameState::NotStarted {
        surface.draw_text(game.width / 2 - 100, game.height / 2, START_PROMPT);
    }
}

/// Trait that abstracts the display backend.
pub trait Renderer {
    /// Take over the display
    fn init(&mut self) -> io::Result<()>;

    /// Render the current game state
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// The display changed size
    fn resize(&mut self, _cols: u16, _rows: u16) {}

    /// Restore the display to how it was before `init`
    fn cleanup(&mut self) -> io::Result<()>;
}

pub mod audio;
pub mod cli_renderer;
pub mod config;
pub mod entity;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod tone;

pub use audio::{AudioError, RodioPlayer, SoundPlayer};
pub use cli_renderer::{CellCanvas, CliRenderer};
pub use config::Config;
pub use entity::{Ball, Intent, Paddle, Rect, Side};
pub use game::{Game, GameState, Score, SoundEvent};
pub use game_loop::GameLoop;
pub use input::{Input, InputController};
pub use renderer::{Renderer, Surface};
pub use tone::{generate_tone, Sound, SoundFormat, Tones};

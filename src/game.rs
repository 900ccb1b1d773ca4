use crate::entity::{Ball, Intent, Paddle, Side};
use std::time::Duration;

pub const BOARD_WIDTH: i32 = 800;
pub const BOARD_HEIGHT: i32 = 600;
pub const PADDLE_WIDTH: i32 = 15;
pub const PADDLE_HEIGHT: i32 = 80;
/// Distance between each paddle and its side of the board
pub const PADDLE_MARGIN: i32 = 30;
pub const PADDLE_SPEED: i32 = 5;
pub const BALL_SIZE: i32 = 15;
/// Per-axis ball speed, restored on every serve
pub const BALL_SPEED: i32 = 3;

/// Fixed simulation step (~60 ticks per second)
pub const TICK: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Running,
}

/// Audible events emitted by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Hit,
    Score,
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

pub struct Game {
    pub width: i32,
    pub height: i32,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub state: GameState,
}

impl Game {
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// A fresh match on a `width` x `height` board; everything is laid out
    /// relative to the board size.
    pub fn with_size(width: i32, height: i32) -> Self {
        let paddle_y = height / 2 - PADDLE_HEIGHT / 2;
        let mut game = Self {
            width,
            height,
            left: Paddle::new(PADDLE_MARGIN, paddle_y, PADDLE_WIDTH, PADDLE_HEIGHT),
            right: Paddle::new(
                width - PADDLE_MARGIN - PADDLE_WIDTH,
                paddle_y,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            ball: Ball::new(0, 0, BALL_SIZE, BALL_SPEED, BALL_SPEED),
            score: Score::default(),
            state: GameState::NotStarted,
        };
        let (x, y) = game.center();
        game.ball.rect.x = x;
        game.ball.rect.y = y;
        game
    }

    fn center(&self) -> (i32, i32) {
        (
            self.width / 2 - BALL_SIZE / 2,
            self.height / 2 - BALL_SIZE / 2,
        )
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn set_intent(&mut self, side: Side, intent: Intent) {
        self.paddle_mut(side).intent = intent;
    }

    /// Begin the match. Only the first call transitions and yields the
    /// start sound; later calls are no-ops.
    pub fn start(&mut self) -> Option<SoundEvent> {
        match self.state {
            GameState::NotStarted => {
                self.state = GameState::Running;
                Some(SoundEvent::Start)
            }
            GameState::Running => None,
        }
    }

    /// Advance one tick. Returns the sound events produced, in order.
    pub fn update(&mut self) -> Vec<SoundEvent> {
        let mut events = Vec::new();
        if self.state != GameState::Running {
            return events;
        }

        self.left.step(PADDLE_SPEED, self.height);
        self.right.step(PADDLE_SPEED, self.height);
        self.ball.advance();

        // Reflect only; the ball may sit past the wall for this frame
        if self.ball.rect.y <= 0 || self.ball.rect.y >= self.height - BALL_SIZE {
            self.ball.velocity.1 = -self.ball.velocity.1;
        }

        // No debounce: a ball still overlapping a paddle flips again next tick
        if self.ball.rect.intersects(&self.left.rect) || self.ball.rect.intersects(&self.right.rect)
        {
            self.ball.velocity.0 = -self.ball.velocity.0;
            events.push(SoundEvent::Hit);
        }

        if self.ball.rect.x < 0 {
            self.score.right = self.score.right.saturating_add(1);
            events.push(SoundEvent::Score);
            self.reset_ball();
        } else if self.ball.rect.x > self.width {
            self.score.left = self.score.left.saturating_add(1);
            events.push(SoundEvent::Score);
            self.reset_ball();
        }

        events
    }

    /// Serve from the center. Direction survives, magnitude returns to `BALL_SPEED`.
    pub fn reset_ball(&mut self) {
        let (x, y) = self.center();
        self.ball.rect.x = x;
        self.ball.rect.y = y;

        let (vx, vy) = self.ball.velocity;
        self.ball.velocity = (
            if vx > 0 { BALL_SPEED } else { -BALL_SPEED },
            if vy > 0 { BALL_SPEED } else { -BALL_SPEED },
        );
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

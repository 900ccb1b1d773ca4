/// Axis-aligned rectangle in board pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the interiors overlap. Touching edges do not count,
    /// and an empty rectangle never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Desired vertical movement of a paddle, driven by held keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    Up,
    Down,
    #[default]
    Idle,
}

impl Intent {
    pub fn velocity(&self, speed: i32) -> i32 {
        match self {
            Intent::Up => -speed,
            Intent::Down => speed,
            Intent::Idle => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
    pub intent: Intent,
}

impl Paddle {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            intent: Intent::Idle,
        }
    }

    /// Apply the current intent, keeping the paddle inside `[0, board_height - height]`.
    pub fn step(&mut self, speed: i32, board_height: i32) {
        let max_y = board_height - self.rect.height;
        let next_y = self.rect.y + self.intent.velocity(speed);
        self.rect.y = next_y.min(max_y).max(0);
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub rect: Rect,
    pub velocity: (i32, i32),
}

impl Ball {
    pub fn new(x: i32, y: i32, size: i32, vx: i32, vy: i32) -> Self {
        Self {
            rect: Rect::new(x, y, size, size),
            velocity: (vx, vy),
        }
    }

    pub fn advance(&mut self) {
        self.rect.x += self.velocity.0;
        self.rect.y += self.velocity.1;
    }
}

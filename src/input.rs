use crate::entity::{Intent, Side};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// For terminals that never report releases: how long a fresh press counts
/// as held. Must outlast the OS auto-repeat delay (typically 500-660 ms).
pub const KEY_PRESS_TIMEOUT: Duration = Duration::from_millis(700);
/// Once auto-repeat is flowing, silence this long means the key is up.
pub const KEY_REPEAT_TIMEOUT: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move(Side, Intent),
    Start,
    Quit,
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    intent: Intent,
    last_seen: Instant,
    repeating: bool,
}

impl HeldKey {
    fn timeout(&self) -> Duration {
        if self.repeating {
            KEY_REPEAT_TIMEOUT
        } else {
            KEY_PRESS_TIMEOUT
        }
    }
}

/// Turns raw terminal events into game inputs and tracks held paddle keys.
pub struct InputController {
    release_events: bool,
    held: [Option<HeldKey>; 2],
}

impl InputController {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            held: [None, None],
        }
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> Option<Input> {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Resize(cols, rows) => Some(Input::Resize(*cols, *rows)),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Option<Input> {
        if key.kind == KeyEventKind::Release {
            // Releasing either key of a pair stops that paddle
            let (side, _) = paddle_key(key.code)?;
            self.held[slot(side)] = None;
            return Some(Input::Move(side, Intent::Idle));
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Input::Quit);
        }

        match key.code {
            KeyCode::Char(' ') => Some(Input::Start),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
            code => {
                let (side, intent) = paddle_key(code)?;
                // Without release reporting, repeats also arrive as presses
                let repeating = key.kind == KeyEventKind::Repeat
                    || matches!(self.held[slot(side)], Some(held) if held.intent == intent);
                self.held[slot(side)] = Some(HeldKey {
                    intent,
                    last_seen: now,
                    repeating,
                });
                Some(Input::Move(side, intent))
            }
        }
    }

    /// Release paddles whose keys went quiet. A no-op when the terminal
    /// reports real key releases.
    pub fn expire(&mut self, now: Instant) -> Vec<Input> {
        let mut released = Vec::new();
        if self.release_events {
            return released;
        }

        for side in [Side::Left, Side::Right] {
            let held = &mut self.held[slot(side)];
            if let Some(key) = *held {
                if now.saturating_duration_since(key.last_seen) >= key.timeout() {
                    *held = None;
                    released.push(Input::Move(side, Intent::Idle));
                }
            }
        }
        released
    }
}

fn slot(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

fn paddle_key(code: KeyCode) -> Option<(Side, Intent)> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some((Side::Left, Intent::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some((Side::Left, Intent::Down)),
        KeyCode::Up => Some((Side::Right, Intent::Up)),
        KeyCode::Down => Some((Side::Right, Intent::Down)),
        _ => None,
    }
}

/// Forward terminal events to the game loop from a dedicated thread.
/// The thread exits once the receiving side is dropped or reading fails.
pub fn spawn_event_reader(tx: Sender<Event>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || loop {
            match event::read() {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("input reader stopped: {}", err);
                    break;
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    #[test]
    fn test_paddle_keys() {
        let mut input = InputController::new(true);
        let now = Instant::now();
        assert_eq!(
            input.handle_event(&press(KeyCode::Char('w')), now),
            Some(Input::Move(Side::Left, Intent::Up))
        );
        assert_eq!(
            input.handle_event(&press(KeyCode::Char('S')), now),
            Some(Input::Move(Side::Left, Intent::Down))
        );
        assert_eq!(
            input.handle_event(&press(KeyCode::Up), now),
            Some(Input::Move(Side::Right, Intent::Up))
        );
        assert_eq!(
            input.handle_event(&press(KeyCode::Down), now),
            Some(Input::Move(Side::Right, Intent::Down))
        );
    }

    #[test]
    fn test_release_of_either_key_stops_paddle() {
        let mut input = InputController::new(true);
        let now = Instant::now();
        input.handle_event(&press(KeyCode::Char('w')), now);
        assert_eq!(
            input.handle_event(&release(KeyCode::Char('s')), now),
            Some(Input::Move(Side::Left, Intent::Idle))
        );
        assert_eq!(
            input.handle_event(&release(KeyCode::Down), now),
            Some(Input::Move(Side::Right, Intent::Idle))
        );
    }

    #[test]
    fn test_start_and_quit_keys() {
        let mut input = InputController::new(true);
        let now = Instant::now();
        assert_eq!(input.handle_event(&press(KeyCode::Char(' ')), now), Some(Input::Start));
        assert_eq!(input.handle_event(&press(KeyCode::Char('q')), now), Some(Input::Quit));
        assert_eq!(input.handle_event(&press(KeyCode::Esc), now), Some(Input::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(input.handle_event(&ctrl_c, now), Some(Input::Quit));
        // Releasing a non-paddle key means nothing
        assert_eq!(input.handle_event(&release(KeyCode::Char(' ')), now), None);
        assert_eq!(input.handle_event(&press(KeyCode::Char('x')), now), None);
    }

    #[test]
    fn test_resize_event() {
        let mut input = InputController::new(true);
        assert_eq!(
            input.handle_event(&Event::Resize(100, 30), Instant::now()),
            Some(Input::Resize(100, 30))
        );
    }

    #[test]
    fn test_held_key_expires_without_release_events() {
        let mut input = InputController::new(false);
        let t0 = Instant::now();
        input.handle_event(&press(KeyCode::Up), t0);

        assert!(input.expire(t0 + Duration::from_millis(100)).is_empty());

        // Auto-repeat has started; now short gaps are enough to release
        input.handle_event(&press(KeyCode::Up), t0 + Duration::from_millis(550));
        input.handle_event(&press(KeyCode::Up), t0 + Duration::from_millis(583));
        assert!(input.expire(t0 + Duration::from_millis(700)).is_empty());

        assert_eq!(
            input.expire(t0 + Duration::from_millis(800)),
            vec![Input::Move(Side::Right, Intent::Idle)]
        );
        assert!(input.expire(t0 + Duration::from_millis(1200)).is_empty());
    }

    #[test]
    fn test_held_key_survives_auto_repeat_delay() {
        let mut input = InputController::new(false);
        let t0 = Instant::now();
        input.handle_event(&press(KeyCode::Char('w')), t0);

        // Still physically held while the OS waits to start repeating
        let mut ms = 0;
        while ms < 500 {
            assert!(
                input.expire(t0 + Duration::from_millis(ms)).is_empty(),
                "released at {ms} ms before the first repeat"
            );
            ms += 16;
        }

        assert_eq!(
            input.handle_event(&press(KeyCode::Char('w')), t0 + Duration::from_millis(500)),
            Some(Input::Move(Side::Left, Intent::Up))
        );
        assert!(input.expire(t0 + Duration::from_millis(600)).is_empty());
    }

    #[test]
    fn test_single_tap_releases_after_press_window() {
        let mut input = InputController::new(false);
        let t0 = Instant::now();
        input.handle_event(&press(KeyCode::Char('s')), t0);
        assert!(input.expire(t0 + Duration::from_millis(320)).is_empty());
        assert_eq!(
            input.expire(t0 + KEY_PRESS_TIMEOUT),
            vec![Input::Move(Side::Left, Intent::Idle)]
        );
    }

    #[test]
    fn test_switching_direction_restarts_press_window() {
        let mut input = InputController::new(false);
        let t0 = Instant::now();
        input.handle_event(&press(KeyCode::Char('w')), t0);
        input.handle_event(&press(KeyCode::Char('w')), t0 + Duration::from_millis(500));
        // Switching to the other key waits for its own repeat delay again
        input.handle_event(&press(KeyCode::Char('s')), t0 + Duration::from_millis(520));
        assert!(input.expire(t0 + Duration::from_millis(1000)).is_empty());
    }

    #[test]
    fn test_no_expiry_with_release_events() {
        let mut input = InputController::new(true);
        let t0 = Instant::now();
        input.handle_event(&press(KeyCode::Char('w')), t0);
        assert!(input.expire(t0 + Duration::from_secs(5)).is_empty());
    }
}

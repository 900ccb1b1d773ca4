use crate::audio::{play_or_log, SoundPlayer};
use crate::game::{Game, GameState, SoundEvent, TICK};
use crate::input::{Input, InputController};
use crate::renderer::Renderer;
use crate::tone::Tones;
use crossterm::event::Event;
use std::io;
use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

/// Owns the game state and drives it at a fixed tick rate.
///
/// Input arrives on a channel and is drained at the start of each tick,
/// so the simulation and the renderer always see a stable state.
pub struct GameLoop<R: Renderer, P: SoundPlayer> {
    game: Game,
    tones: Tones,
    renderer: R,
    player: P,
    input: InputController,
    events: Receiver<Event>,
}

impl<R: Renderer, P: SoundPlayer> GameLoop<R, P> {
    pub fn new(renderer: R, player: P, input: InputController, events: Receiver<Event>) -> Self {
        Self {
            game: Game::new(),
            tones: Tones::new(),
            renderer,
            player,
            input,
            events,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn play(&self, event: SoundEvent) {
        play_or_log(&self.player, self.tones.get(event));
    }

    fn apply(&mut self, input: Input) -> ControlFlow<()> {
        match input {
            Input::Move(side, intent) => self.game.set_intent(side, intent),
            Input::Start => {
                if let Some(sound) = self.game.start() {
                    log::info!("match started");
                    self.play(sound);
                }
            }
            Input::Resize(cols, rows) => self.renderer.resize(cols, rows),
            Input::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Run a single tick: drain input, advance the simulation, redraw.
    pub fn step(&mut self, now: Instant) -> io::Result<ControlFlow<()>> {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if let Some(input) = self.input.handle_event(&event, now) {
                        if self.apply(input).is_break() {
                            return Ok(ControlFlow::Break(()));
                        }
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("input channel closed");
                    return Ok(ControlFlow::Break(()));
                }
            }
        }

        for input in self.input.expire(now) {
            if let Input::Move(side, intent) = input {
                self.game.set_intent(side, intent);
            }
        }

        if self.game.state == GameState::Running {
            for event in self.game.update() {
                if event == SoundEvent::Score {
                    log::info!(
                        "point scored: {} - {}",
                        self.game.score.left,
                        self.game.score.right
                    );
                }
                self.play(event);
            }
        }

        self.renderer.render(&self.game)?;
        Ok(ControlFlow::Continue(()))
    }

    /// Tick until a quit input arrives or the input source goes away.
    pub fn run(&mut self) -> io::Result<()> {
        let mut deadline = Instant::now();
        loop {
            if self.step(Instant::now())?.is_break() {
                break;
            }

            deadline += TICK;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Fell behind; don't try to catch up with a burst of ticks
                deadline = now;
            }
        }
        log::info!("game loop stopped");
        Ok(())
    }

    /// Hand the display back.
    pub fn shutdown(mut self) -> io::Result<()> {
        self.renderer.cleanup()
    }
}

use pong::game::{BOARD_HEIGHT, BOARD_WIDTH};
use pong::input::spawn_event_reader;
use pong::{logging, CliRenderer, Config, GameLoop, InputController, Renderer, RodioPlayer};
use std::io;
use std::sync::mpsc;

fn main() -> io::Result<()> {
    let config = Config::from_env();
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled ({}): {}", config.log_file.display(), err);
    }
    log::info!("starting pong: {:?}", config);

    // Open audio before the terminal is taken over; backends may print to stderr
    let player = if config.muted {
        log::info!("audio muted");
        RodioPlayer::disabled()
    } else {
        RodioPlayer::open()
    };

    let mut renderer = CliRenderer::new(BOARD_WIDTH, BOARD_HEIGHT);
    renderer.init()?;

    let input = InputController::new(renderer.key_release_events());
    let (tx, rx) = mpsc::channel();
    spawn_event_reader(tx)?;

    let mut game_loop = GameLoop::new(renderer, player, input, rx);
    let result = game_loop.run();
    let cleanup = game_loop.shutdown();

    if let Err(err) = &result {
        log::error!("game loop failed: {}", err);
    }
    result.and(cleanup)
}

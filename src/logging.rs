use crate::config::Config;
use env_logger::{Builder, Env, Target, WriteStyle};
use std::fs::OpenOptions;
use std::io;

/// Route `log` records to the configured file. The game owns the terminal,
/// so if the file can't be opened logging is simply left off.
pub fn init(config: &Config) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .try_init()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}

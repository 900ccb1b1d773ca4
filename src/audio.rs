//! Fire-and-forget playback of generated tones.
//!
//! Playback is best effort: failures are logged and dropped so the game
//! never stalls or stops because of the sound device.

use crate::tone::Sound;
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};
use std::fmt;

#[derive(Debug)]
pub enum AudioError {
    /// No output device was opened (none present, or audio is muted)
    Unavailable,
    Play(rodio::PlayError),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "no audio output available"),
            AudioError::Play(err) => write!(f, "playback failed: {}", err),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::Unavailable => None,
            AudioError::Play(err) => Some(err),
        }
    }
}

impl From<rodio::PlayError> for AudioError {
    fn from(err: rodio::PlayError) -> Self {
        AudioError::Play(err)
    }
}

/// Something that can start a sound without waiting for it to finish.
pub trait SoundPlayer {
    fn play(&self, sound: &Sound) -> Result<(), AudioError>;
}

/// Play `sound`, logging and discarding any failure.
pub fn play_or_log<P: SoundPlayer + ?Sized>(player: &P, sound: &Sound) {
    match player.play(sound) {
        Ok(()) => {}
        Err(AudioError::Unavailable) => log::debug!("skipping sound: no audio output"),
        Err(err) => log::warn!("{}", err),
    }
}

pub struct RodioPlayer {
    // The stream must outlive every sink created from its handle
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl RodioPlayer {
    /// Open the default output device, falling back to a silent player.
    pub fn open() -> Self {
        match OutputStream::try_default() {
            Ok(output) => {
                log::info!("audio output opened");
                Self {
                    output: Some(output),
                }
            }
            Err(err) => {
                log::warn!("audio disabled: {}", err);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { output: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }
}

impl SoundPlayer for RodioPlayer {
    fn play(&self, sound: &Sound) -> Result<(), AudioError> {
        let Some((_, handle)) = &self.output else {
            return Err(AudioError::Unavailable);
        };

        let format = sound.format();
        let source = SamplesBuffer::new(
            format.channels,
            format.sample_rate,
            sound.samples().collect::<Vec<i16>>(),
        );

        // A sink per sound so overlapping beeps don't cut each other off
        let sink = Sink::try_new(handle)?;
        sink.append(source);
        sink.detach();
        Ok(())
    }
}

//! Procedural beep generation.
//!
//! Every sound in the game is a plain sine tone rendered once at startup
//! into 16-bit little-endian mono PCM.

use crate::game::SoundEvent;
use std::f64::consts::PI;

pub const SAMPLE_RATE: u32 = 44_100;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const CHANNELS: u16 = 1;

/// PCM layout of a [`Sound`] buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundFormat {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
    pub signed: bool,
    pub big_endian: bool,
}

impl SoundFormat {
    pub const PCM_S16LE_MONO: SoundFormat = SoundFormat {
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        channels: CHANNELS,
        signed: true,
        big_endian: false,
    };

    pub fn frame_size(&self) -> usize {
        (self.bits_per_sample as usize / 8) * self.channels as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    data: Vec<u8>,
    format: SoundFormat,
}

impl Sound {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> SoundFormat {
        self.format
    }

    pub fn frames(&self) -> usize {
        self.data.len() / self.format.frame_size()
    }

    /// Decode the buffer back into signed samples.
    pub fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.data
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
    }
}

/// Number of samples for `duration_secs` of audio. Zero, negative and NaN
/// durations produce no samples.
pub fn sample_count(duration_secs: f64) -> usize {
    let samples = (duration_secs * SAMPLE_RATE as f64).round();
    if samples.is_nan() || samples <= 0.0 {
        0
    } else {
        samples as usize
    }
}

/// Render a full-scale sine tone at `frequency_hz` lasting `duration_secs`.
pub fn generate_tone(frequency_hz: f64, duration_secs: f64) -> Sound {
    let count = sample_count(duration_secs);
    let mut data = Vec::with_capacity(count * 2);

    for i in 0..count {
        let angle = 2.0 * PI * i as f64 * frequency_hz / SAMPLE_RATE as f64;
        let sample = (angle.sin() * i16::MAX as f64) as i16;
        data.extend_from_slice(&sample.to_le_bytes());
    }

    Sound {
        data,
        format: SoundFormat::PCM_S16LE_MONO,
    }
}

/// The fixed beeps, rendered once and shared read-only for the whole run.
#[derive(Debug, Clone)]
pub struct Tones {
    hit: Sound,
    score: Sound,
    start: Sound,
}

impl Tones {
    pub fn new() -> Self {
        Self {
            hit: generate_tone(440.0, 0.1),
            score: generate_tone(523.25, 0.2),
            start: generate_tone(659.25, 0.1),
        }
    }

    pub fn get(&self, event: SoundEvent) -> &Sound {
        match event {
            SoundEvent::Hit => &self.hit,
            SoundEvent::Score => &self.score,
            SoundEvent::Start => &self.start,
        }
    }
}

impl Default for Tones {
    fn default() -> Self {
        Self::new()
    }
}

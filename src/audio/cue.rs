//! Sound effect recipes
//!
//! Each cue is a short list of oscillator tones. The recipes are plain data so
//! they can be checked without an audio device.

use crate::sim::GameEvent;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// How a tone's gain falls off over its duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decay {
    /// Exponential ramp to near silence
    Exponential,
    /// Straight line to zero
    Linear,
}

/// Floor for exponential ramps (they cannot reach zero)
const SILENCE: f32 = 0.01;

/// One oscillator burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Start frequency (Hz)
    pub freq: f32,
    /// Exponential pitch sweep target (Hz)
    pub sweep_to: Option<f32>,
    pub waveform: Waveform,
    /// Seconds after the cue fires
    pub delay: f64,
    /// Seconds
    pub duration: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
    pub decay: Decay,
}

impl Tone {
    pub const fn new(freq: f32, waveform: Waveform, duration: f64, gain: f32) -> Self {
        Self {
            freq,
            sweep_to: None,
            waveform,
            delay: 0.0,
            duration,
            gain,
            decay: Decay::Exponential,
        }
    }

    pub const fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub const fn sweep(mut self, to: f32) -> Self {
        self.sweep_to = Some(to);
        self
    }

    pub const fn linear(mut self) -> Self {
        self.decay = Decay::Linear;
        self
    }

    /// Gain an exponential fade ends at, for a tone peaking at `peak`.
    /// Always below the peak so quiet tones still fade out.
    pub fn fade_floor(peak: f32) -> f32 {
        SILENCE.min(peak * 0.1).max(f32::MIN_POSITIVE)
    }

    /// When the tone has fully stopped, relative to the cue
    pub fn end(&self) -> f64 {
        self.delay + self.duration
    }
}

const SHOOT: [Tone; 1] = [Tone::new(800.0, Waveform::Square, 0.1, 0.1)];

const SCORE: [Tone; 2] = [
    Tone::new(1200.0, Waveform::Sine, 0.2, 0.1),
    Tone::new(1800.0, Waveform::Sine, 0.4, 0.1).delayed(0.1),
];

const CRASH: [Tone; 1] = [Tone::new(100.0, Waveform::Sawtooth, 0.5, 0.3)
    .sweep(10.0)
    .linear()];

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Post dropped
    Shoot,
    /// Post delivered
    Score,
    /// Sled hit an obstacle
    Crash,
}

impl SoundEffect {
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::Shoot => &SHOOT,
            SoundEffect::Score => &SCORE,
            SoundEffect::Crash => &CRASH,
        }
    }

    /// The cue a simulation event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shoot => Some(SoundEffect::Shoot),
            GameEvent::Score { .. } => Some(SoundEffect::Score),
            GameEvent::Crash => Some(SoundEffect::Crash),
            GameEvent::RunStarted => None,
        }
    }
}

/// What the background melody should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// A run began: resume audio and restart the loop
    Start,
    /// The run ended
    Stop,
}

impl MusicCue {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RunStarted => Some(MusicCue::Start),
            GameEvent::Crash => Some(MusicCue::Stop),
            GameEvent::Shoot | GameEvent::Score { .. } => None,
        }
    }
}

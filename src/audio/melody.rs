//! Looping background melody

use super::cue::{Tone, Waveform};

/// Milliseconds between notes
pub const BEAT_MS: i32 = 250;

/// Jingle-ish loop (Hz)
pub const JINGLE: [f32; 18] = [
    330.0, 330.0, 330.0, //
    330.0, 330.0, 330.0, //
    330.0, 392.0, 261.0, 293.0, 330.0, //
    349.0, 349.0, 349.0, 349.0, //
    349.0, 330.0, 330.0,
];

const NOTE_DURATION: f64 = 0.1;
const NOTE_GAIN: f32 = 0.05;

/// Steps through a note sequence forever
#[derive(Debug, Clone)]
pub struct Melody {
    notes: &'static [f32],
    index: usize,
}

impl Default for Melody {
    fn default() -> Self {
        Self::new(&JINGLE)
    }
}

impl Melody {
    pub fn new(notes: &'static [f32]) -> Self {
        Self { notes, index: 0 }
    }

    /// Back to the first note
    pub fn restart(&mut self) {
        self.index = 0;
    }

    /// Tone for the current note, then advance (wrapping)
    pub fn next_note(&mut self) -> Option<Tone> {
        if self.notes.is_empty() {
            return None;
        }
        let freq = self.notes[self.index % self.notes.len()];
        self.index = (self.index + 1) % self.notes.len();
        Some(Tone::new(freq, Waveform::Square, NOTE_DURATION, NOTE_GAIN))
    }
}

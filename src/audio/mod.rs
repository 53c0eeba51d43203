//! Sound cues and background music
//!
//! `cue` and `melody` describe what to play; the browser-only `AudioManager`
//! turns them into Web Audio oscillators.

pub mod cue;
pub mod melody;
#[cfg(target_arch = "wasm32")]
mod web;

pub use cue::{Decay, MusicCue, SoundEffect, Tone, Waveform};
pub use melody::Melody;
#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

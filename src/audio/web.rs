//! Web Audio playback
//!
//! Every cue and melody note is a short oscillator with a gain envelope.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::cue::{Decay, SoundEffect, Tone, Waveform};
use super::melody::{BEAT_MS, Melody};
use crate::settings::Settings;

/// A running background loop; clearing the interval stops it
struct MusicLoop {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    /// Runtime mute (blur), on top of the settings' own mute
    muted: bool,
    /// Effective music gain, read by the loop callback on every beat
    music_gain: Rc<Cell<f32>>,
    music: Option<MusicLoop>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        let manager = Self {
            ctx,
            settings: settings.clone(),
            muted: false,
            music_gain: Rc::new(Cell::new(0.0)),
            music: None,
        };
        manager.sync_music_gain();
        manager
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music_gain();
    }

    fn sync_music_gain(&self) {
        let gain = if self.muted {
            0.0
        } else {
            self.settings.music_gain()
        };
        self.music_gain.set(gain);
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.settings.sfx_gain()
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for tone in effect.tones() {
            play_tone(ctx, tone, vol);
        }
    }

    /// Start the background loop from its first note (no-op if already running)
    pub fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };
        let Some(window) = web_sys::window() else { return };

        let gain = self.music_gain.clone();
        let mut melody = Melody::default();
        let callback = Closure::<dyn FnMut()>::new(move || {
            let vol = gain.get();
            if vol <= 0.0 {
                return;
            }
            if let Some(note) = melody.next_note() {
                play_tone(&ctx, &note, vol);
            }
        });

        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            BEAT_MS,
        ) {
            Ok(handle) => {
                self.music = Some(MusicLoop {
                    handle,
                    _callback: callback,
                });
                log::info!("Music started");
            }
            Err(e) => log::warn!("Failed to start music loop: {:?}", e),
        }
    }

    /// Stop the background loop
    pub fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(music.handle);
            }
            log::info!("Music stopped");
        }
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        self.stop_music();
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
        }
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
    }
}

/// Create an oscillator with gain envelope
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Schedule one tone, scaled by `vol`
fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, tone.freq, oscillator_type(tone.waveform)) else {
        return;
    };
    let t = ctx.current_time() + tone.delay;
    let end = t + tone.duration;
    let peak = tone.gain * vol;

    gain.gain().set_value_at_time(peak, t).ok();
    match tone.decay {
        Decay::Exponential => {
            gain.gain()
                .exponential_ramp_to_value_at_time(Tone::fade_floor(peak), end)
                .ok();
        }
        Decay::Linear => {
            gain.gain().linear_ramp_to_value_at_time(0.0, end).ok();
        }
    }

    osc.frequency().set_value_at_time(tone.freq, t).ok();
    if let Some(target) = tone.sweep_to {
        osc.frequency().exponential_ramp_to_value_at_time(target, end).ok();
    }

    osc.start_with_when(t).ok();
    osc.stop_with_when(end).ok();
}

//! Santa Posts - a side-scrolling sled arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural Web Audio cues and background melody
//! - `input`: Held-key map shared by keyboard and touch controls
//! - `colors`: Palette shared by entity color tags and the renderer
//! - `settings`: Player preferences
//! - `ui`: HUD/overlay view model

pub mod audio;
pub mod colors;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one game frame, 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// World scroll per tick
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 200.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Player may not go lower than `CANVAS_HEIGHT - PLAYER_BOTTOM_MARGIN`
    pub const PLAYER_BOTTOM_MARGIN: f32 = 100.0;

    /// Projectile ("post") defaults
    pub const POST_FALL_SPEED: f32 = 4.0;
    pub const POST_SIZE: f32 = 20.0;
    pub const POST_OFFSET_X: f32 = 10.0;
    pub const POST_OFFSET_Y: f32 = 20.0;

    /// Entities spawn just past the right edge
    pub const SPAWN_X: f32 = CANVAS_WIDTH + 50.0;
    /// Entities left of this are discarded
    pub const DESPAWN_X: f32 = -100.0;

    /// Obstacles: every 120 ticks, somewhere in the air
    pub const OBSTACLE_SPAWN_INTERVAL: u64 = 120;
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const OBSTACLE_Y_RANGE: f32 = CANVAS_HEIGHT - 150.0;

    /// Targets: every 180 ticks, standing on the ground
    pub const TARGET_SPAWN_INTERVAL: u64 = 180;
    pub const TARGET_WIDTH: f32 = 30.0;
    pub const TARGET_HEIGHT: f32 = 50.0;
    pub const TARGET_Y: f32 = CANVAS_HEIGHT - 60.0;

    /// Score per delivered post
    pub const HIT_SCORE: u64 = 1000;

    /// Hit particle burst
    pub const PARTICLE_BURST: usize = 10;
    pub const PARTICLE_SIZE: f32 = 4.0;
    /// Particle velocity per axis is uniform in `[-SPREAD/2, SPREAD/2)`
    pub const PARTICLE_SPREAD: f32 = 10.0;
    pub const PARTICLE_DECAY: f32 = 0.05;

    /// Post-history capacity and the number shown during play
    pub const POST_HISTORY_CAPACITY: usize = 5;
    pub const HUD_POST_COUNT: usize = 3;

    /// Background decoration
    pub const GROUND_HEIGHT: f32 = 50.0;
    pub const STAR_COUNT: u32 = 20;
    pub const STAR_PARALLAX: f32 = 0.5;
}

/// Axis-aligned clamp that never panics on inverted bounds
#[inline]
pub fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

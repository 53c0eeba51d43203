//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; the controller owns exactly one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::colors;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, waiting for the first activate
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Run ended by a crash
    GameOver,
}

/// Air obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Ghost,
    Invite,
    Coach,
    Toxic,
}

impl ObstacleKind {
    /// The closed set obstacles are drawn from
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Ghost,
        ObstacleKind::Invite,
        ObstacleKind::Coach,
        ObstacleKind::Toxic,
    ];
}

/// Entity type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Post,
    Obstacle(ObstacleKind),
    Target,
    Particle,
}

/// A moving rectangle. Player, posts, obstacles and targets all share this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub color: [f32; 4],
    pub kind: EntityKind,
    /// Set during a tick, removed by compaction before the tick returns
    pub marked_for_deletion: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2, vel: Vec2, color: [f32; 4]) -> Self {
        Self {
            pos,
            size,
            vel,
            color,
            kind,
            marked_for_deletion: false,
        }
    }

    /// The player's sled at its start position
    pub fn player() -> Self {
        Self::new(
            EntityKind::Player,
            Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            Vec2::ZERO,
            colors::SANTA,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.rect().overlaps(&other.rect())
    }
}

/// A decorative particle (no gameplay interaction)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub entity: Entity,
    /// Remaining life, 1.0 when spawned
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// Remaining lifetime fraction in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Things that happened during a tick or activation, drained by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A post was dropped
    Shoot,
    /// A post landed on a target; carries the new score
    Score { total: u64 },
    /// The sled hit an obstacle
    Crash,
    /// A new run began
    RunStarted,
}

/// Bounded most-recent-first list of delivered posts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostHistory {
    entries: Vec<String>,
}

impl PostHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(POST_HISTORY_CAPACITY),
        }
    }

    /// Front-insert a message, dropping the oldest past capacity
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.insert(0, message.into());
        self.entries.truncate(POST_HISTORY_CAPACITY);
    }

    /// Up to `n` newest entries, newest first
    pub fn latest(&self, n: usize) -> &[String] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    /// Run RNG (spawns, particles, messages)
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Score of the current run
    pub score: u64,
    /// Ticks since run start
    pub frame: u64,
    /// Distance the world has scrolled this run
    pub scroll_offset: f32,
    /// The player's sled
    pub player: Entity,
    /// Dropped posts in flight
    pub posts: Vec<Entity>,
    pub obstacles: Vec<Entity>,
    pub targets: Vec<Entity>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Delivered posts, newest first
    pub history: PostHistory,
    /// Events raised since the controller last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the start screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            frame: 0,
            scroll_offset: 0.0,
            player: Entity::player(),
            posts: Vec::new(),
            obstacles: Vec::new(),
            targets: Vec::new(),
            particles: Vec::new(),
            history: PostHistory::new(),
            events: Vec::new(),
        }
    }

    /// Clear everything a run accumulates and reseed
    pub fn reset_run(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0;
        self.frame = 0;
        self.scroll_offset = 0.0;
        self.player = Entity::player();
        self.posts.clear();
        self.obstacles.clear();
        self.targets.clear();
        self.particles.clear();
        self.history.clear();
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop deletion-flagged members of every mutable list
    pub fn compact(&mut self) {
        self.posts.retain(|e| !e.marked_for_deletion);
        self.obstacles.retain(|e| !e.marked_for_deletion);
        self.targets.retain(|e| !e.marked_for_deletion);
        self.particles.retain(|p| !p.entity.marked_for_deletion);
    }
}

//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run one frame at a time.

use glam::Vec2;

use super::posts::random_post;
use super::spawn::{drop_post, spawn_obstacle, spawn_particles, spawn_target};
use super::state::{Entity, GameEvent, GamePhase, GameState};
use crate::clamp_axis;
use crate::consts::*;
use crate::colors;

/// Directional keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Per-tick displacement requested by the held keys
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// The single "activate" input.
///
/// While playing it drops a post. From the start screen or after a crash it
/// resets the run (entities, score, history) with `seed` and starts playing.
pub fn activate(state: &mut GameState, seed: u64) {
    match state.phase {
        GamePhase::Playing => {
            drop_post(state);
            state.events.push(GameEvent::Shoot);
        }
        GamePhase::Start | GamePhase::GameOver => {
            state.reset_run(seed);
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::RunStarted);
            log::info!("Run started with seed: {}", seed);
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;
    state.scroll_offset += SCROLL_SPEED;

    move_player(&mut state.player, input);

    if state.frame.is_multiple_of(OBSTACLE_SPAWN_INTERVAL) {
        spawn_obstacle(state);
    }
    if state.frame.is_multiple_of(TARGET_SPAWN_INTERVAL) {
        spawn_target(state);
    }

    // Posts fall and drift left with the world
    for post in &mut state.posts {
        post.pos += post.vel;
        if post.pos.y > CANVAS_HEIGHT {
            post.marked_for_deletion = true;
        }
    }

    // Obstacles scroll; the first one touching the sled ends the run
    let mut crashed = false;
    for obstacle in &mut state.obstacles {
        obstacle.pos += obstacle.vel;
        if obstacle.pos.x < DESPAWN_X {
            obstacle.marked_for_deletion = true;
        }
        if !crashed && state.player.overlaps(obstacle) {
            crashed = true;
        }
    }
    if crashed {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Crash);
        log::info!("Crashed at frame {} with score {}", state.frame, state.score);
    }

    // Targets scroll; each can absorb at most one post
    let mut hits: Vec<Vec2> = Vec::new();
    for target in &mut state.targets {
        target.pos += target.vel;
        if target.pos.x < DESPAWN_X {
            target.marked_for_deletion = true;
        }
        for post in &mut state.posts {
            if !post.marked_for_deletion && !target.marked_for_deletion && post.overlaps(target) {
                post.marked_for_deletion = true;
                target.marked_for_deletion = true;
                hits.push(target.pos);
            }
        }
    }
    for origin in hits {
        register_hit(state, origin);
    }

    for particle in &mut state.particles {
        particle.entity.pos += particle.entity.vel;
        particle.life -= PARTICLE_DECAY;
        if particle.life <= 0.0 {
            particle.entity.marked_for_deletion = true;
        }
    }

    state.compact();
}

/// Apply held-key movement and keep the sled on screen
fn move_player(player: &mut Entity, input: &TickInput) {
    player.pos += input.direction() * PLAYER_SPEED;
    player.pos.x = clamp_axis(player.pos.x, 0.0, CANVAS_WIDTH - player.size.x);
    player.pos.y = clamp_axis(player.pos.y, 0.0, CANVAS_HEIGHT - PLAYER_BOTTOM_MARGIN);
}

/// Reward a delivered post
fn register_hit(state: &mut GameState, origin: Vec2) {
    spawn_particles(state, origin, colors::SUCCESS, PARTICLE_BURST);
    state.score += HIT_SCORE;
    state.events.push(GameEvent::Score { total: state.score });
    let message = random_post(&mut state.rng);
    state.history.push(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityKind, ObstacleKind};
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345);
        activate(&mut state, 12345);
        state.drain_events();
        state
    }

    fn target_at(pos: Vec2) -> Entity {
        Entity::new(
            EntityKind::Target,
            pos,
            Vec2::new(TARGET_WIDTH, TARGET_HEIGHT),
            Vec2::new(-SCROLL_SPEED, 0.0),
            colors::TARGET,
        )
    }

    fn post_at(pos: Vec2) -> Entity {
        Entity::new(
            EntityKind::Post,
            pos,
            Vec2::splat(POST_SIZE),
            Vec2::new(-SCROLL_SPEED, POST_FALL_SPEED),
            colors::POST,
        )
    }

    fn obstacle_at(pos: Vec2) -> Entity {
        Entity::new(
            EntityKind::Obstacle(ObstacleKind::Ghost),
            pos,
            Vec2::splat(OBSTACLE_SIZE),
            Vec2::new(-SCROLL_SPEED, 0.0),
            colors::OBSTACLE,
        )
    }

    #[test]
    fn test_activate_starts_run() {
        let mut state = GameState::new(1);
        state.score = 5000;
        state.history.push("stale");
        activate(&mut state, 99);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.history.is_empty());
        assert_eq!(state.seed, 99);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_activate_while_playing_drops_post() {
        let mut state = playing_state();
        activate(&mut state, 0);
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::Shoot]);
    }

    #[test]
    fn test_tick_noop_unless_playing() {
        let mut state = GameState::new(1);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.frame, 0);
        assert_eq!(state.player.pos.x, PLAYER_START_X);
    }

    #[test]
    fn test_tick_advances_frame_and_scroll() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.frame, 2);
        assert_eq!(state.scroll_offset, 2.0 * SCROLL_SPEED);
    }

    #[test]
    fn test_player_moves_with_held_keys() {
        let mut state = playing_state();
        let input = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(
            state.player.pos,
            Vec2::new(PLAYER_START_X + PLAYER_SPEED, PLAYER_START_Y + PLAYER_SPEED)
        );
    }

    #[test]
    fn test_player_clamped_to_canvas() {
        let mut state = playing_state();
        state.player.pos = Vec2::new(2.0, 2.0);
        let input = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos, Vec2::ZERO);

        state.player.pos = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos.x, CANVAS_WIDTH - PLAYER_WIDTH);
        assert_eq!(state.player.pos.y, CANVAS_HEIGHT - PLAYER_BOTTOM_MARGIN);
    }

    #[test]
    fn test_obstacle_spawns_on_interval() {
        let mut state = playing_state();
        // Park the sled where nothing spawns on it
        state.player.pos = Vec2::ZERO;
        for _ in 0..OBSTACLE_SPAWN_INTERVAL - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.obstacles.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        // Spawned at the edge, then advanced by the same tick
        assert_eq!(state.obstacles[0].pos.x, SPAWN_X - SCROLL_SPEED);
    }

    #[test]
    fn test_target_spawns_on_interval() {
        let mut state = playing_state();
        for _ in 0..TARGET_SPAWN_INTERVAL - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.targets.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.targets[0].pos, Vec2::new(SPAWN_X - SCROLL_SPEED, TARGET_Y));
    }

    #[test]
    fn test_post_hits_target() {
        let mut state = playing_state();
        state.targets.push(target_at(Vec2::new(400.0, TARGET_Y)));
        state.posts.push(post_at(Vec2::new(400.0, TARGET_Y - 10.0)));

        tick(&mut state, &TickInput::default());

        assert!(state.posts.is_empty());
        assert!(state.targets.is_empty());
        assert_eq!(state.score, HIT_SCORE);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Score { total: HIT_SCORE }]
        );
    }

    #[test]
    fn test_one_post_hits_one_target() {
        let mut state = playing_state();
        state.targets.push(target_at(Vec2::new(400.0, TARGET_Y)));
        state.targets.push(target_at(Vec2::new(405.0, TARGET_Y)));
        state.posts.push(post_at(Vec2::new(400.0, TARGET_Y)));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.score, HIT_SCORE);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_touching_post_does_not_hit() {
        let mut state = playing_state();
        // After one tick the post's bottom edge sits exactly on the target's top
        state.targets.push(target_at(Vec2::new(400.0, TARGET_Y)));
        state.posts.push(post_at(Vec2::new(400.0, TARGET_Y - POST_SIZE - POST_FALL_SPEED)));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_crash_ends_run_once() {
        let mut state = playing_state();
        let at_player = state.player.pos;
        state.obstacles.push(obstacle_at(at_player));
        state.obstacles.push(obstacle_at(at_player + Vec2::new(5.0, 0.0)));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.drain_events(), vec![GameEvent::Crash]);

        // Further ticks do nothing
        let frame = state.frame;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.frame, frame);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_restart_after_crash() {
        let mut state = playing_state();
        state.score = 3000;
        state.history.push("old news");
        state.phase = GamePhase::GameOver;

        activate(&mut state, 7);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.history.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_offscreen_entities_pruned() {
        let mut state = playing_state();
        state.posts.push(post_at(Vec2::new(300.0, CANVAS_HEIGHT)));
        state.targets.push(target_at(Vec2::new(DESPAWN_X, TARGET_Y)));
        state.obstacles.push(obstacle_at(Vec2::new(DESPAWN_X, 300.0)));

        tick(&mut state, &TickInput::default());

        assert!(state.posts.is_empty());
        assert!(state.targets.is_empty());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_particles_expire() {
        let mut state = playing_state();
        spawn_particles(&mut state, Vec2::new(100.0, 100.0), colors::SUCCESS, 3);
        for _ in 0..25 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing_state();
        let mut state2 = playing_state();
        let inputs = [
            TickInput {
                down: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                right: true,
                up: true,
                ..Default::default()
            },
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            if i % 45 == 0 {
                activate(&mut state1, 0);
                activate(&mut state2, 0);
            }
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.history, state2.history);
        assert_eq!(state1.phase, state2.phase);
    }

    proptest! {
        #[test]
        fn player_stays_in_bounds(moves in prop::collection::vec(0u8..16, 1..200)) {
            let mut state = playing_state();
            for bits in moves {
                let input = TickInput {
                    up: bits & 1 != 0,
                    down: bits & 2 != 0,
                    left: bits & 4 != 0,
                    right: bits & 8 != 0,
                };
                tick(&mut state, &input);
                // Keep the run alive so every tick moves the sled
                state.phase = GamePhase::Playing;
                state.obstacles.clear();
                let pos = state.player.pos;
                prop_assert!(pos.x >= 0.0 && pos.x <= CANVAS_WIDTH - PLAYER_WIDTH);
                prop_assert!(pos.y >= 0.0 && pos.y <= CANVAS_HEIGHT - PLAYER_BOTTOM_MARGIN);
            }
        }

        #[test]
        fn no_flagged_entity_survives_a_tick(seed in any::<u64>(), drops in prop::collection::vec(any::<bool>(), 1..400)) {
            let mut state = GameState::new(seed);
            activate(&mut state, seed);
            for drop in drops {
                if drop && state.is_playing() {
                    activate(&mut state, seed);
                }
                tick(&mut state, &TickInput::default());
                prop_assert!(state.posts.iter().all(|e| !e.marked_for_deletion));
                prop_assert!(state.obstacles.iter().all(|e| !e.marked_for_deletion));
                prop_assert!(state.targets.iter().all(|e| !e.marked_for_deletion));
                prop_assert!(state.particles.iter().all(|p| !p.entity.marked_for_deletion));
                prop_assert!(state.history.len() <= POST_HISTORY_CAPACITY);
                prop_assert_eq!(state.score % HIT_SCORE, 0);
            }
        }
    }
}

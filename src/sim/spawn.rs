//! Entity construction for everything that enters the world mid-run

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind, GameState, ObstacleKind, Particle};
use crate::consts::*;
use crate::colors;

/// Append one air obstacle of a random kind at the right edge
pub fn spawn_obstacle(state: &mut GameState) {
    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    let y = state.rng.random::<f32>() * OBSTACLE_Y_RANGE;
    state.obstacles.push(Entity::new(
        EntityKind::Obstacle(kind),
        Vec2::new(SPAWN_X, y),
        Vec2::splat(OBSTACLE_SIZE),
        Vec2::new(-SCROLL_SPEED, 0.0),
        colors::OBSTACLE,
    ));
}

/// Append one ground target at the right edge
pub fn spawn_target(state: &mut GameState) {
    state.targets.push(Entity::new(
        EntityKind::Target,
        Vec2::new(SPAWN_X, TARGET_Y),
        Vec2::new(TARGET_WIDTH, TARGET_HEIGHT),
        Vec2::new(-SCROLL_SPEED, 0.0),
        colors::TARGET,
    ));
}

/// Drop a post from under the sled; it falls and drifts with the world
pub fn drop_post(state: &mut GameState) {
    let origin = state.player.pos + Vec2::new(POST_OFFSET_X, POST_OFFSET_Y);
    state.posts.push(Entity::new(
        EntityKind::Post,
        origin,
        Vec2::splat(POST_SIZE),
        Vec2::new(-SCROLL_SPEED, POST_FALL_SPEED),
        colors::POST,
    ));
}

/// Burst of `count` particles from `origin` with random velocities
pub fn spawn_particles(state: &mut GameState, origin: Vec2, color: [f32; 4], count: usize) {
    for _ in 0..count {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        );
        state.particles.push(Particle {
            entity: Entity::new(
                EntityKind::Particle,
                origin,
                Vec2::splat(PARTICLE_SIZE),
                vel,
                color,
            ),
            life: 1.0,
            max_life: 1.0,
        });
    }
}

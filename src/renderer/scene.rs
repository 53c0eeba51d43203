//! Scene assembly: turns a `GameState` snapshot into one vertex list
//!
//! Draw order is back to front: sky, ground, stars, sled, posts, targets,
//! obstacles, particles. Nothing here touches the GPU.

use glam::Vec2;

use super::shapes::{faded, rect, ring};
use super::vertex::Vertex;
use crate::colors;
use crate::consts::*;
use crate::sim::{Entity, EntityKind, GameState, ObstacleKind};

/// Segments used for the target's ring
const RING_SEGMENTS: u32 = 24;

/// Build every vertex for the current frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        64 + 6 * (state.posts.len() + state.particles.len())
            + 12 * state.obstacles.len()
            + (12 + RING_SEGMENTS as usize * 6) * state.targets.len(),
    );

    push_background(&mut vertices, state.scroll_offset);
    push_sled(&mut vertices, state.player.pos);

    for post in &state.posts {
        vertices.extend(rect(post.pos, post.size, post.color));
    }
    for target in &state.targets {
        push_target(&mut vertices, target);
    }
    for obstacle in &state.obstacles {
        push_obstacle(&mut vertices, obstacle);
    }
    for particle in &state.particles {
        let e = &particle.entity;
        vertices.extend(rect(e.pos, e.size, faded(e.color, particle.life_fraction())));
    }

    vertices
}

/// Position of star `i` after the world scrolled `scroll_offset`
pub fn star_position(i: u32, scroll_offset: f32) -> Vec2 {
    let x = (i as f32 * 50.0 - scroll_offset * STAR_PARALLAX).rem_euclid(CANVAS_WIDTH);
    let y = (i as f32 * 30.0).rem_euclid(CANVAS_HEIGHT - 100.0);
    Vec2::new(x, y)
}

fn push_background(out: &mut Vec<Vertex>, scroll_offset: f32) {
    out.extend(rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        colors::SKY,
    ));
    out.extend(rect(
        Vec2::new(0.0, CANVAS_HEIGHT - GROUND_HEIGHT),
        Vec2::new(CANVAS_WIDTH, GROUND_HEIGHT),
        colors::GROUND,
    ));
    for i in 0..STAR_COUNT {
        out.extend(rect(star_position(i, scroll_offset), Vec2::splat(2.0), colors::STAR));
    }
}

fn push_sled(out: &mut Vec<Vertex>, pos: Vec2) {
    let part = |dx: f32, dy: f32, w: f32, h: f32, color: [f32; 4]| {
        rect(pos + Vec2::new(dx, dy), Vec2::new(w, h), color)
    };
    out.extend(part(0.0, 15.0, 40.0, 10.0, colors::SLED));
    out.extend(part(5.0, 25.0, 30.0, 3.0, colors::RUNNERS));
    out.extend(part(10.0, 0.0, 20.0, 15.0, colors::SANTA)); // body
    out.extend(part(20.0, 2.0, 8.0, 8.0, colors::FACE));
    out.extend(part(20.0, 10.0, 10.0, 8.0, colors::BEARD));
    out.extend(part(10.0, -5.0, 20.0, 5.0, colors::SANTA)); // hat
    out.extend(part(30.0, -2.0, 5.0, 5.0, colors::BEARD)); // pompom
}

fn push_target(out: &mut Vec<Vertex>, target: &Entity) {
    out.extend(rect(target.pos, target.size, target.color));
    let ring_center = target.pos + Vec2::new(target.size.x / 2.0, 10.0);
    out.extend(ring(ring_center, 11.0, 13.0, colors::SUCCESS, RING_SEGMENTS));
    out.extend(rect(
        target.pos + Vec2::new(10.0, 5.0),
        Vec2::splat(10.0),
        colors::TARGET_HEAD,
    ));
}

fn push_obstacle(out: &mut Vec<Vertex>, obstacle: &Entity) {
    out.extend(rect(obstacle.pos, obstacle.size, obstacle.color));
    match obstacle.kind {
        EntityKind::Obstacle(ObstacleKind::Ghost) => {
            out.extend(rect(obstacle.pos + Vec2::new(10.0, 10.0), Vec2::splat(5.0), colors::GHOST_EYES));
            out.extend(rect(obstacle.pos + Vec2::new(25.0, 10.0), Vec2::splat(5.0), colors::GHOST_EYES));
        }
        EntityKind::Obstacle(ObstacleKind::Invite) => {
            out.extend(rect(
                obstacle.pos + Vec2::new(5.0, 15.0),
                Vec2::new(30.0, 10.0),
                colors::ENVELOPE,
            ));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, activate, tick};

    /// Vertices emitted for background + sled with nothing else on screen
    const EMPTY_SCENE: usize = 6 * (2 + STAR_COUNT as usize) + 6 * 7;

    #[test]
    fn test_empty_scene() {
        let state = GameState::new(1);
        let verts = build_scene(&state);
        assert_eq!(verts.len(), EMPTY_SCENE);
        // Sky is drawn first and covers the canvas
        assert_eq!(verts[0].color, colors::SKY);
        assert_eq!(verts[5].position, [CANVAS_WIDTH, CANVAS_HEIGHT]);
    }

    #[test]
    fn test_entities_drawn_after_background() {
        let mut state = GameState::new(1);
        activate(&mut state, 1);
        activate(&mut state, 1); // drop a post
        let verts = build_scene(&state);
        assert_eq!(verts.len(), EMPTY_SCENE + 6);
        assert_eq!(verts[EMPTY_SCENE].color, colors::POST);
    }

    #[test]
    fn test_particles_fade_with_life() {
        let mut state = GameState::new(1);
        activate(&mut state, 1);
        crate::sim::spawn::spawn_particles(&mut state, Vec2::new(10.0, 10.0), colors::SUCCESS, 1);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        let verts = build_scene(&state);
        let alpha = verts.last().map(|v| v.color[3]).unwrap_or(1.0);
        assert!(alpha > 0.0 && alpha < 1.0);
    }

    #[test]
    fn test_stars_wrap_inside_canvas() {
        for scroll in [0.0, 1.0, 799.0, 12345.0] {
            for i in 0..STAR_COUNT {
                let p = star_position(i, scroll);
                assert!(p.x >= 0.0 && p.x < CANVAS_WIDTH);
                assert!(p.y >= 0.0 && p.y < CANVAS_HEIGHT - 100.0);
            }
        }
    }
}

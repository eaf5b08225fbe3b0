//! Variable timestep simulation tick
//!
//! Core update that advances the game by the real time elapsed since the
//! previous frame.

use super::collision::check_collisions;
use super::spawn::spawn_entities;
use super::sprite::Animator;
use super::state::{Bullet, Direction, GameEvent, GameState};

/// Input commands for a single tick, polled from the held keys
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire held
    pub fire: bool,
    /// Wall-clock time (ms) for the fire cooldown
    pub now_ms: f64,
}

/// Advance the game state by `dt` seconds
///
/// Non-positive or non-finite deltas are ignored and large ones are
/// clamped to `tuning.max_frame_dt`, so a backgrounded tab cannot tunnel
/// bullets through enemies or flood the spawner on return.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }
    let dt = dt.min(state.tuning.max_frame_dt);

    state.game_time += dt;

    handle_input(state, input, dt);
    update_entities(state, dt);
    spawn_entities(state);
    check_collisions(state);
}

/// Move the ship and fire. Frozen once the game is over.
fn handle_input(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_game_over() {
        return;
    }

    let step = state.tuning.player_speed * dt;
    let pos = &mut state.player.pos;
    if input.down {
        pos.y += step;
    }
    if input.up {
        pos.y -= step;
    }
    if input.left {
        pos.x -= step;
    }
    if input.right {
        pos.x += step;
    }

    if input.fire && input.now_ms - state.last_fire_ms > state.tuning.fire_cooldown_ms {
        let center = state.player.pos + state.player.size() / 2.0;
        for direction in [Direction::Up, Direction::Forward, Direction::Backward] {
            state.bullets.push(Bullet::new(center, direction));
        }
        state.last_fire_ms = input.now_ms;
        state.push_event(GameEvent::Shot);
    }
}

/// Move everything, advance animations, drop what left the canvas
fn update_entities(state: &mut GameState, dt: f32) {
    let canvas = state.canvas_size();

    state.player.sprite.advance(dt);

    let bullet_step = state.tuning.bullet_speed * dt;
    for bullet in &mut state.bullets {
        bullet.entity.pos += bullet.direction.unit() * bullet_step;
        bullet.entity.sprite.advance(dt);
    }
    state.bullets.retain(|b| {
        let p = b.entity.pos;
        !(p.y < 0.0 || p.y > canvas.y || p.x > canvas.x || p.x < 0.0)
    });

    let enemy_step = state.tuning.enemy_speed * dt;
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy_step;
        enemy.sprite.advance(dt);
    }
    state.enemies.retain(|e| !is_gone(e.pos.x + e.size().x, e.pos.y, canvas.y));

    let asteroid_step = state.tuning.asteroid_speed * dt;
    for asteroid in &mut state.asteroids {
        asteroid.pos.y += asteroid_step;
        asteroid.sprite.advance(dt);
    }
    state.asteroids.retain(|a| !is_gone(a.pos.x + a.size().x, a.pos.y, canvas.y));

    for explosion in &mut state.explosions {
        explosion.sprite.advance(dt);
    }
    state.explosions.retain(|e| !e.sprite.is_done());
}

/// Fully past the left edge, or fallen below the bottom
#[inline]
fn is_gone(right: f32, top: f32, canvas_height: f32) -> bool {
    right < 0.0 || top > canvas_height
}

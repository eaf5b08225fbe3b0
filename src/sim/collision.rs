//! Collision detection and response
//!
//! Everything is an axis-aligned box `[pos, pos + size)`. The passes in
//! [`check_collisions`] run in a fixed order every tick; each one marks
//! entities for removal and compacts the collection afterward, so removal
//! never shifts an index that is still being iterated.

use glam::Vec2;

use super::sprite::presets;
use super::state::{Entity, GameEvent, GameState};

/// Raw box overlap test on edges (left, top, right, bottom)
///
/// Both boxes are half-open on their far edges, so boxes that only share
/// an edge do not overlap in either argument order.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn collides(x: f32, y: f32, r: f32, b: f32, x2: f32, y2: f32, r2: f32, b2: f32) -> bool {
    !(r <= x2 || r2 <= x || b <= y2 || b2 <= y)
}

/// Box overlap test on position/size pairs
///
/// Malformed boxes (non-finite coordinates or a negative size) never
/// collide.
pub fn box_collides(pos: Vec2, size: Vec2, pos2: Vec2, size2: Vec2) -> bool {
    if !is_valid_box(pos, size) || !is_valid_box(pos2, size2) {
        return false;
    }
    let far = pos + size;
    let far2 = pos2 + size2;
    collides(pos.x, pos.y, far.x, far.y, pos2.x, pos2.y, far2.x, far2.y)
}

#[inline]
fn is_valid_box(pos: Vec2, size: Vec2) -> bool {
    pos.is_finite() && size.is_finite() && size.x >= 0.0 && size.y >= 0.0
}

#[inline]
fn entities_collide(a: &Entity, b: &Entity) -> bool {
    box_collides(a.pos, a.size(), b.pos, b.size())
}

/// Keep the player ship inside the canvas
pub fn clamp_player(state: &mut GameState) {
    let bounds = state.canvas_size() - state.player.size();
    let pos = &mut state.player.pos;

    if pos.x < 0.0 {
        pos.x = 0.0;
    } else if pos.x > bounds.x {
        pos.x = bounds.x;
    }

    if pos.y < 0.0 {
        pos.y = 0.0;
    } else if pos.y > bounds.y {
        pos.y = bounds.y;
    }
}

/// Run every collision pass for this tick
pub fn check_collisions(state: &mut GameState) {
    clamp_player(state);
    enemies_vs_bullets(state);
    asteroids_vs_bullets(state);
    asteroids_vs_enemies(state);
    enemies_vs_enemies(state);
}

/// Drop every element whose mask entry is false, preserving order
fn compact<T>(items: &mut Vec<T>, keep: &[bool]) {
    let mut i = 0;
    items.retain(|_| {
        let k = keep[i];
        i += 1;
        k
    });
}

/// Shot-down enemies score, explode and take the bullet with them.
/// Any enemy touching the player ends the game.
fn enemies_vs_bullets(state: &mut GameState) {
    let mut keep_enemy = vec![true; state.enemies.len()];
    let mut keep_bullet = vec![true; state.bullets.len()];
    let mut kills = Vec::new();
    let mut player_hit = false;

    for (i, enemy) in state.enemies.iter().enumerate() {
        let hit = state
            .bullets
            .iter()
            .enumerate()
            .find(|(j, bullet)| keep_bullet[*j] && entities_collide(enemy, &bullet.entity))
            .map(|(j, _)| j);

        if let Some(j) = hit {
            keep_enemy[i] = false;
            keep_bullet[j] = false;
            kills.push(enemy.pos);
        }

        // Tested with the enemy's last box even if it was just destroyed
        if entities_collide(enemy, &state.player) {
            player_hit = true;
        }
    }

    compact(&mut state.enemies, &keep_enemy);
    compact(&mut state.bullets, &keep_bullet);

    for pos in kills {
        state.score += state.tuning.enemy_kill_score;
        state.explosions.push(Entity::new(pos, presets::explosion()));
        state.push_event(GameEvent::EnemyDestroyed);
    }

    if player_hit {
        state.trigger_game_over();
    }
}

/// Asteroids are indestructible: they eat bullets and end the game on
/// contact with the player.
fn asteroids_vs_bullets(state: &mut GameState) {
    let mut keep_bullet = vec![true; state.bullets.len()];
    let mut player_hit = false;

    for asteroid in &state.asteroids {
        if let Some(j) = (0..state.bullets.len())
            .find(|&j| keep_bullet[j] && entities_collide(asteroid, &state.bullets[j].entity))
        {
            keep_bullet[j] = false;
        }

        if entities_collide(asteroid, &state.player) {
            player_hit = true;
        }
    }

    compact(&mut state.bullets, &keep_bullet);

    if player_hit {
        state.trigger_game_over();
    }
}

/// An asteroid overlapping any enemy is removed.
fn asteroids_vs_enemies(state: &mut GameState) {
    let enemies = &state.enemies;
    state
        .asteroids
        .retain(|asteroid| !enemies.iter().any(|enemy| entities_collide(asteroid, enemy)));
}

/// For each surviving enemy, the first other surviving enemy that overlaps
/// it is removed.
fn enemies_vs_enemies(state: &mut GameState) {
    let count = state.enemies.len();
    let mut keep = vec![true; count];

    for i in 0..count {
        if !keep[i] {
            continue;
        }
        let other = (0..count).find(|&j| {
            j != i && keep[j] && entities_collide(&state.enemies[i], &state.enemies[j])
        });
        if let Some(j) = other {
            keep[j] = false;
        }
    }

    compact(&mut state.enemies, &keep);
}

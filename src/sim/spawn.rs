//! Enemy and asteroid spawning
//!
//! Each tick makes one independent draw per entity class against
//! `1 - base^game_time`. The draw is per tick, not per second, so faster
//! displays see more spawns per second of play.

use glam::Vec2;
use rand::Rng;

use super::sprite::{Animator, Sprite, presets};
use super::state::{Entity, GameState};

/// Chance of a spawn on a single tick at `game_time` seconds
#[inline]
pub fn spawn_probability(base: f32, game_time: f32) -> f32 {
    1.0 - base.powf(game_time)
}

/// Roll the spawn dice for this tick
pub fn spawn_entities(state: &mut GameState) {
    let t = state.game_time;

    let enemy_chance = spawn_probability(state.tuning.enemy_spawn_base, t);
    if state.rng.random::<f32>() < enemy_chance {
        let enemy = spawn_at_top(state, presets::enemy());
        state.enemies.push(enemy);
    }

    let asteroid_chance = spawn_probability(state.tuning.asteroid_spawn_base, t);
    if state.rng.random::<f32>() < asteroid_chance {
        let asteroid = spawn_at_top(state, presets::asteroid());
        state.asteroids.push(asteroid);
    }
}

/// Place a sprite at a random x along the top edge
fn spawn_at_top(state: &mut GameState, sprite: Sprite) -> Entity {
    let max_x = (state.tuning.canvas_width - sprite.size().x).max(0.0);
    let x = state.rng.random::<f32>() * max_x;
    Entity::new(Vec2::new(x, 0.0), sprite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_probability_curve() {
        assert_eq!(spawn_probability(0.996, 0.0), 0.0);
        let early = spawn_probability(0.996, 10.0);
        let late = spawn_probability(0.996, 100.0);
        assert!(early > 0.0 && early < late && late < 1.0);
        assert!((late - (1.0 - 0.996f32.powf(100.0))).abs() < 1e-6);
    }

    #[test]
    fn test_nothing_spawns_at_time_zero() {
        let mut state = GameState::new(1234, Tuning::default());
        for _ in 0..10_000 {
            spawn_entities(&mut state);
        }
        assert!(state.enemies.is_empty());
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_spawns_stay_on_canvas() {
        let mut state = GameState::new(99, Tuning::default());
        // Late enough that spawning is frequent
        state.game_time = 2000.0;
        for _ in 0..500 {
            spawn_entities(&mut state);
        }
        assert!(!state.enemies.is_empty());
        assert!(!state.asteroids.is_empty());

        for enemy in &state.enemies {
            assert_eq!(enemy.pos.y, 0.0);
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x <= 460.0 - 40.0);
        }
        for asteroid in &state.asteroids {
            assert_eq!(asteroid.pos.y, 0.0);
            assert!(asteroid.pos.x >= 0.0 && asteroid.pos.x <= 460.0 - 34.0);
        }
    }

    #[test]
    fn test_spawning_is_deterministic_per_seed() {
        let mut a = GameState::new(5, Tuning::default());
        let mut b = GameState::new(5, Tuning::default());
        a.game_time = 300.0;
        b.game_time = 300.0;
        for _ in 0..100 {
            spawn_entities(&mut a);
            spawn_entities(&mut b);
        }
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.asteroids, b.asteroids);
    }
}

//! Game state and core simulation types
//!
//! One `GameState` holds everything a tick reads or writes. It is built by
//! [`GameState::new`] and wiped by [`GameState::reset`]; nothing else
//! constructs one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::sprite::{Animator, Sprite, presets};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was hit; world keeps moving until restart
    GameOver,
}

/// Side effects the shell should carry out after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A volley was fired
    Shot,
    /// An enemy was shot down
    EnemyDestroyed,
    /// Playing -> GameOver
    GameOver,
    /// A new game started
    Reset,
}

/// Anything with a position and an animated sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub sprite: Sprite,
}

impl Entity {
    pub fn new(pos: Vec2, sprite: Sprite) -> Self {
        Self { pos, sprite }
    }

    /// Bounding box size (current frame size)
    pub fn size(&self) -> Vec2 {
        self.sprite.size()
    }

    /// Bottom-right corner
    pub fn far_corner(&self) -> Vec2 {
        self.pos + self.size()
    }
}

/// Bullet travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Unit velocity in screen coordinates (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Forward => Vec2::X,
            Direction::Backward => Vec2::NEG_X,
        }
    }
}

/// A bullet entity
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub entity: Entity,
    pub direction: Direction,
}

impl Bullet {
    /// Bullet with the sprite matching its direction
    pub fn new(pos: Vec2, direction: Direction) -> Self {
        let sprite = match direction {
            Direction::Up | Direction::Down => presets::bullet_up(),
            Direction::Forward | Direction::Backward => presets::bullet_side(),
        };
        Self {
            entity: Entity::new(pos, sprite),
            direction,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed (the RNG restarts from it on reset)
    pub seed: u64,
    pub rng: Pcg32,
    /// Gameplay constants
    pub tuning: Tuning,
    /// Seconds since the last reset
    pub game_time: f32,
    pub score: u64,
    pub phase: GamePhase,
    /// Wall-clock time (ms) of the last volley
    pub last_fire_ms: f64,
    pub player: Entity,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Entity>,
    pub asteroids: Vec<Entity>,
    pub explosions: Vec<Entity>,
    /// Events raised since the shell last drained them
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, already reset
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            game_time: 0.0,
            score: 0,
            phase: GamePhase::Playing,
            last_fire_ms: f64::NEG_INFINITY,
            player: Entity::new(Vec2::ZERO, presets::player()),
            bullets: Vec::new(),
            enemies: Vec::new(),
            asteroids: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
        };
        state.reset();
        // Startup is not a restart
        state.events.clear();
        state
    }

    /// Start a new game: clear the world, zero score and time
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.game_time = 0.0;
        self.score = 0;
        self.last_fire_ms = f64::NEG_INFINITY;
        self.rng = Pcg32::seed_from_u64(self.seed);

        self.bullets.clear();
        self.enemies.clear();
        self.asteroids.clear();
        self.explosions.clear();

        self.player = Entity::new(Vec2::from(self.tuning.player_start), presets::player());

        // Collapse back-to-back resets into one notification
        if self.events.last() != Some(&GameEvent::Reset) {
            self.events.push(GameEvent::Reset);
        }
        log::debug!("Game reset (seed {})", self.seed);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Enter GameOver (no-op when already over)
    pub fn trigger_game_over(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!(
                "Game over: score {} after {:.1}s",
                self.score,
                self.game_time
            );
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events without consuming them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.tuning.canvas_width, self.tuning.canvas_height)
    }
}

//! Sprite-sheet animation
//!
//! The simulation only talks to sprites through [`Animator`]; sheet layout
//! details stay in this module.

use glam::Vec2;

/// Image sheets the game draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetId {
    /// Player ship, enemies, bullets and explosions
    Ships,
    /// Asteroid tumble strip
    Asteroids,
    /// Tiled background
    Space,
}

impl SheetId {
    pub const ALL: [SheetId; 3] = [SheetId::Ships, SheetId::Space, SheetId::Asteroids];

    /// Path of the image relative to the page
    pub fn path(self) -> &'static str {
        match self {
            SheetId::Ships => "img/sprites___.png",
            SheetId::Asteroids => "img/asteroids.png",
            SheetId::Space => "img/space.png",
        }
    }
}

/// Source rectangle of one animation frame inside a sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub sheet: SheetId,
    pub origin: Vec2,
    pub size: Vec2,
}

/// Minimal animation capability consumed by the game core
pub trait Animator {
    /// Advance the animation clock by `dt` seconds
    fn advance(&mut self, dt: f32);
    /// Region of the sheet to draw this frame
    fn current_frame(&self) -> FrameRect;
    /// Size of one frame (the entity's bounding box size)
    fn size(&self) -> Vec2;
    /// True once a play-once animation has shown its last frame
    fn is_done(&self) -> bool;
}

/// A horizontally laid out frame strip
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    sheet: SheetId,
    /// Top-left of frame 0 in the sheet
    origin: Vec2,
    /// Frame size in pixels
    frame_size: Vec2,
    /// Frames per second (0 = static)
    speed: f32,
    /// Frame indices to cycle through (empty = frame 0 only)
    frames: &'static [u32],
    /// Play once and stop instead of looping
    once: bool,
    /// Fractional frame clock
    index: f32,
    done: bool,
}

impl Sprite {
    /// A single, non-animated frame
    pub fn still(sheet: SheetId, origin: Vec2, frame_size: Vec2) -> Self {
        Self::animated(sheet, origin, frame_size, 0.0, &[], false)
    }

    pub fn animated(
        sheet: SheetId,
        origin: Vec2,
        frame_size: Vec2,
        speed: f32,
        frames: &'static [u32],
        once: bool,
    ) -> Self {
        Self {
            sheet,
            origin,
            frame_size,
            speed,
            frames,
            once,
            index: 0.0,
            done: false,
        }
    }

    fn frame_number(&self) -> u32 {
        if self.speed <= 0.0 || self.frames.is_empty() {
            return 0;
        }
        let idx = self.index.floor() as usize;
        if self.once && idx >= self.frames.len() {
            // Hold the last frame once finished
            return self.frames[self.frames.len() - 1];
        }
        self.frames[idx % self.frames.len()]
    }
}

impl Animator for Sprite {
    fn advance(&mut self, dt: f32) {
        if self.done {
            return;
        }
        self.index += self.speed * dt;
        if self.once && !self.frames.is_empty() && self.index.floor() as usize >= self.frames.len()
        {
            self.done = true;
        }
    }

    fn current_frame(&self) -> FrameRect {
        let frame = self.frame_number() as f32;
        FrameRect {
            sheet: self.sheet,
            origin: Vec2::new(self.origin.x + frame * self.frame_size.x, self.origin.y),
            size: self.frame_size,
        }
    }

    fn size(&self) -> Vec2 {
        self.frame_size
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

/// Sprite presets for each entity kind
pub mod presets {
    use super::*;

    const ENEMY_IDLE: [u32; 2] = [0, 1];
    const ASTEROID_TUMBLE: [u32; 15] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14];
    const EXPLOSION: [u32; 13] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

    pub const PLAYER_SIZE: Vec2 = Vec2::new(76.0, 74.0);
    pub const ENEMY_SIZE: Vec2 = Vec2::new(40.0, 39.0);
    pub const ASTEROID_SIZE: Vec2 = Vec2::new(34.0, 37.0);
    pub const EXPLOSION_SIZE: Vec2 = Vec2::new(39.0, 39.0);
    pub const BULLET_UP_SIZE: Vec2 = Vec2::new(13.0, 20.0);
    pub const BULLET_SIDE_SIZE: Vec2 = Vec2::new(7.0, 25.0);

    pub fn player() -> Sprite {
        Sprite::still(SheetId::Ships, Vec2::ZERO, PLAYER_SIZE)
    }

    pub fn enemy() -> Sprite {
        Sprite::animated(SheetId::Ships, Vec2::new(80.0, 0.0), ENEMY_SIZE, 2.0, &ENEMY_IDLE, false)
    }

    pub fn asteroid() -> Sprite {
        Sprite::animated(
            SheetId::Asteroids,
            Vec2::ZERO,
            ASTEROID_SIZE,
            6.0,
            &ASTEROID_TUMBLE,
            false,
        )
    }

    pub fn explosion() -> Sprite {
        Sprite::animated(
            SheetId::Ships,
            Vec2::new(0.0, 117.0),
            EXPLOSION_SIZE,
            16.0,
            &EXPLOSION,
            true,
        )
    }

    /// Vertical shot
    pub fn bullet_up() -> Sprite {
        Sprite::still(SheetId::Ships, Vec2::new(13.0, 80.0), BULLET_UP_SIZE)
    }

    /// Horizontal shot (forward/backward)
    pub fn bullet_side() -> Sprite {
        Sprite::still(SheetId::Ships, Vec2::new(3.0, 80.0), BULLET_SIDE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_sprite_never_moves() {
        let mut sprite = presets::player();
        sprite.advance(10.0);
        let frame = sprite.current_frame();
        assert_eq!(frame.origin, Vec2::ZERO);
        assert_eq!(frame.size, presets::PLAYER_SIZE);
        assert!(!sprite.is_done());
    }

    #[test]
    fn test_looping_sprite_wraps() {
        let mut sprite = presets::asteroid();
        // 6 fps: 2.5s -> frame index 15 -> wraps to frame 0
        sprite.advance(2.5);
        assert_eq!(sprite.current_frame().origin.x, 0.0);
        sprite.advance(0.2);
        assert_eq!(sprite.current_frame().origin.x, presets::ASTEROID_SIZE.x);
        assert!(!sprite.is_done());
    }

    #[test]
    fn test_explosion_finishes_after_thirteen_frames() {
        let mut sprite = presets::explosion();
        // 13 frames at 16 fps = 0.8125s
        sprite.advance(0.8);
        assert!(!sprite.is_done());
        assert_eq!(sprite.current_frame().origin.x, 12.0 * 39.0);
        sprite.advance(0.02);
        assert!(sprite.is_done());
        // Finished animations hold their last frame
        assert_eq!(sprite.current_frame().origin.x, 12.0 * 39.0);
        assert_eq!(sprite.current_frame().origin.y, 117.0);
    }
}

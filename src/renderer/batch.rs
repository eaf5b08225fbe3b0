//! Scene building
//!
//! Mirrors a 2D canvas API (`save`/`translate`/`restore`) on top of a flat
//! command list so draw order and transform scoping can be checked without
//! a GPU.

use glam::Vec2;

use crate::sim::{Animator, Entity, FrameRect, GameState, SheetId};

/// One recorded draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Tile a whole sheet over `[0, area)`
    Pattern { sheet: SheetId, area: Vec2 },
    /// Copy `frame` from its sheet to `dest` (top-left, canvas pixels)
    Sprite { frame: FrameRect, dest: Vec2 },
}

impl DrawCommand {
    pub fn sheet(&self) -> SheetId {
        match self {
            DrawCommand::Pattern { sheet, .. } => *sheet,
            DrawCommand::Sprite { frame, .. } => frame.sheet,
        }
    }
}

/// Command recorder with a translation stack
#[derive(Debug, Default)]
pub struct SpriteBatch {
    commands: Vec<DrawCommand>,
    origin: Vec2,
    saved: Vec<Vec2>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands and transform state for a new frame
    pub fn clear(&mut self) {
        self.commands.clear();
        self.origin = Vec2::ZERO;
        self.saved.clear();
    }

    pub fn save(&mut self) {
        self.saved.push(self.origin);
    }

    /// Pop the last `save`; unbalanced calls fall back to the identity
    pub fn restore(&mut self) {
        self.origin = self.saved.pop().unwrap_or(Vec2::ZERO);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.origin += offset;
    }

    /// Current translation
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Number of unmatched `save` calls
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn fill_pattern(&mut self, sheet: SheetId, area: Vec2) {
        self.commands.push(DrawCommand::Pattern { sheet, area });
    }

    /// Draw a frame at the current origin
    pub fn draw_frame(&mut self, frame: FrameRect) {
        self.commands.push(DrawCommand::Sprite {
            frame,
            dest: self.origin,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

/// Record the whole frame: background, player, then every entity list
pub fn build_scene(state: &GameState, batch: &mut SpriteBatch) {
    batch.clear();
    batch.fill_pattern(SheetId::Space, state.canvas_size());

    if !state.is_game_over() {
        render_entity(batch, &state.player);
    }

    for bullet in &state.bullets {
        render_entity(batch, &bullet.entity);
    }
    render_entities(batch, &state.enemies);
    render_entities(batch, &state.asteroids);
    render_entities(batch, &state.explosions);
}

fn render_entities(batch: &mut SpriteBatch, list: &[Entity]) {
    for entity in list {
        render_entity(batch, entity);
    }
}

fn render_entity(batch: &mut SpriteBatch, entity: &Entity) {
    batch.save();
    batch.translate(entity.pos);
    if !entity.sprite.is_done() {
        batch.draw_frame(entity.sprite.current_frame());
    }
    batch.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprite::presets;
    use crate::sim::{Bullet, Direction};
    use crate::tuning::Tuning;

    fn populated_state() -> GameState {
        let mut state = GameState::new(1, Tuning::default());
        state
            .bullets
            .push(Bullet::new(Vec2::new(10.0, 20.0), Direction::Up));
        state
            .enemies
            .push(Entity::new(Vec2::new(30.0, 40.0), presets::enemy()));
        state
            .asteroids
            .push(Entity::new(Vec2::new(50.0, 60.0), presets::asteroid()));
        state
            .explosions
            .push(Entity::new(Vec2::new(70.0, 80.0), presets::explosion()));
        state
    }

    fn sprite_dests(batch: &SpriteBatch) -> Vec<Vec2> {
        batch
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { dest, .. } => Some(*dest),
                DrawCommand::Pattern { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_save_restore_scopes_translation() {
        let mut batch = SpriteBatch::new();
        batch.save();
        batch.translate(Vec2::new(5.0, 6.0));
        batch.save();
        batch.translate(Vec2::new(1.0, 1.0));
        assert_eq!(batch.origin(), Vec2::new(6.0, 7.0));
        batch.restore();
        assert_eq!(batch.origin(), Vec2::new(5.0, 6.0));
        batch.restore();
        assert_eq!(batch.origin(), Vec2::ZERO);
        assert_eq!(batch.depth(), 0);
    }

    #[test]
    fn test_scene_draw_order() {
        let state = populated_state();
        let mut batch = SpriteBatch::new();
        build_scene(&state, &mut batch);

        assert_eq!(
            batch.commands()[0],
            DrawCommand::Pattern {
                sheet: SheetId::Space,
                area: Vec2::new(460.0, 580.0)
            }
        );
        assert_eq!(
            sprite_dests(&batch),
            vec![
                state.player.pos,
                Vec2::new(10.0, 20.0),
                Vec2::new(30.0, 40.0),
                Vec2::new(50.0, 60.0),
                Vec2::new(70.0, 80.0),
            ]
        );
        // Transforms never leak out of an entity draw
        assert_eq!(batch.depth(), 0);
        assert_eq!(batch.origin(), Vec2::ZERO);
    }

    #[test]
    fn test_player_hidden_after_game_over() {
        let mut state = populated_state();
        state.trigger_game_over();
        let mut batch = SpriteBatch::new();
        build_scene(&state, &mut batch);

        let dests = sprite_dests(&batch);
        assert_eq!(dests.len(), 4);
        assert!(!dests.contains(&state.player.pos));
    }

    #[test]
    fn test_rebuild_replaces_previous_frame() {
        let state = populated_state();
        let mut batch = SpriteBatch::new();
        build_scene(&state, &mut batch);
        let first = batch.commands().len();
        build_scene(&state, &mut batch);
        assert_eq!(batch.commands().len(), first);
    }
}

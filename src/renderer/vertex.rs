//! Vertex types for sprite rendering

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::batch::DrawCommand;
use crate::sim::SheetId;

/// Textured 2D vertex in normalized device coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl SpriteVertex {
    pub const fn new(position: [f32; 2], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Canvas pixels (origin top-left, y down) to NDC (origin center, y up)
#[inline]
pub fn canvas_to_ndc(p: Vec2, canvas: Vec2) -> [f32; 2] {
    [p.x / canvas.x * 2.0 - 1.0, 1.0 - p.y / canvas.y * 2.0]
}

/// A contiguous vertex range drawn with one sheet bound
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRun {
    pub sheet: SheetId,
    pub vertices: Range<u32>,
}

/// Triangles for one frame, grouped into same-sheet runs
#[derive(Debug, Default)]
pub struct Tessellation {
    pub vertices: Vec<SpriteVertex>,
    pub runs: Vec<DrawRun>,
}

/// Turn recorded commands into triangles, keeping submission order
///
/// `texture_size` reports each sheet's pixel size; sheets it returns
/// `None` for are skipped.
pub fn tessellate(
    commands: &[DrawCommand],
    canvas: Vec2,
    texture_size: impl Fn(SheetId) -> Option<Vec2>,
) -> Tessellation {
    let mut out = Tessellation {
        vertices: Vec::with_capacity(commands.len() * 6),
        runs: Vec::new(),
    };

    for command in commands {
        let sheet = command.sheet();
        let Some(tex) = texture_size(sheet) else {
            continue;
        };

        let (dest, size, uv_min, uv_max) = match *command {
            // Pattern UVs run past 1.0 and rely on a repeating sampler
            DrawCommand::Pattern { area, .. } => (Vec2::ZERO, area, Vec2::ZERO, area / tex),
            DrawCommand::Sprite { frame, dest } => (
                dest,
                frame.size,
                frame.origin / tex,
                (frame.origin + frame.size) / tex,
            ),
        };

        let start = out.vertices.len() as u32;
        push_quad(&mut out.vertices, dest, size, uv_min, uv_max, canvas);
        let end = out.vertices.len() as u32;

        match out.runs.last_mut() {
            Some(run) if run.sheet == sheet && run.vertices.end == start => {
                run.vertices.end = end;
            }
            _ => out.runs.push(DrawRun {
                sheet,
                vertices: start..end,
            }),
        }
    }

    out
}

fn push_quad(
    vertices: &mut Vec<SpriteVertex>,
    dest: Vec2,
    size: Vec2,
    uv_min: Vec2,
    uv_max: Vec2,
    canvas: Vec2,
) {
    let tl = SpriteVertex::new(canvas_to_ndc(dest, canvas), uv_min.into());
    let tr = SpriteVertex::new(
        canvas_to_ndc(dest + Vec2::new(size.x, 0.0), canvas),
        [uv_max.x, uv_min.y],
    );
    let bl = SpriteVertex::new(
        canvas_to_ndc(dest + Vec2::new(0.0, size.y), canvas),
        [uv_min.x, uv_max.y],
    );
    let br = SpriteVertex::new(canvas_to_ndc(dest + size, canvas), uv_max.into());

    vertices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FrameRect;

    const CANVAS: Vec2 = Vec2::new(460.0, 580.0);

    fn sizes(sheet: SheetId) -> Option<Vec2> {
        match sheet {
            SheetId::Ships => Some(Vec2::new(200.0, 200.0)),
            SheetId::Space => Some(Vec2::new(230.0, 290.0)),
            SheetId::Asteroids => None,
        }
    }

    fn sprite(sheet: SheetId, dest: Vec2) -> DrawCommand {
        DrawCommand::Sprite {
            frame: FrameRect {
                sheet,
                origin: Vec2::new(20.0, 40.0),
                size: Vec2::new(10.0, 20.0),
            },
            dest,
        }
    }

    #[test]
    fn test_canvas_to_ndc_corners() {
        assert_eq!(canvas_to_ndc(Vec2::ZERO, CANVAS), [-1.0, 1.0]);
        assert_eq!(canvas_to_ndc(CANVAS, CANVAS), [1.0, -1.0]);
    }

    #[test]
    fn test_sprite_quad_uvs() {
        let t = tessellate(&[sprite(SheetId::Ships, Vec2::ZERO)], CANVAS, sizes);
        assert_eq!(t.vertices.len(), 6);
        // Top-left vertex samples the frame origin
        assert_eq!(t.vertices[0].uv, [0.1, 0.2]);
        // Bottom-right vertex samples the far frame corner
        assert_eq!(t.vertices[5].uv, [0.15, 0.3]);
    }

    #[test]
    fn test_pattern_repeats() {
        let cmd = DrawCommand::Pattern {
            sheet: SheetId::Space,
            area: CANVAS,
        };
        let t = tessellate(&[cmd], CANVAS, sizes);
        assert_eq!(t.vertices[5].uv, [2.0, 2.0]);
        assert_eq!(t.vertices[5].position, [1.0, -1.0]);
    }

    #[test]
    fn test_runs_merge_only_adjacent_same_sheet() {
        let commands = [
            DrawCommand::Pattern {
                sheet: SheetId::Space,
                area: CANVAS,
            },
            sprite(SheetId::Ships, Vec2::ZERO),
            sprite(SheetId::Ships, Vec2::ONE),
            sprite(SheetId::Asteroids, Vec2::ONE),
            sprite(SheetId::Space, Vec2::ONE),
            sprite(SheetId::Ships, Vec2::ONE),
        ];
        let t = tessellate(&commands, CANVAS, sizes);
        let runs: Vec<_> = t.runs.iter().map(|r| (r.sheet, r.vertices.clone())).collect();
        assert_eq!(
            runs,
            vec![
                (SheetId::Space, 0..6),
                (SheetId::Ships, 6..18),
                (SheetId::Space, 18..24),
                (SheetId::Ships, 24..30),
            ]
        );
    }
}

//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.08, 0.07, 0.1, 1.0];
    pub const PLATFORM: [f32; 4] = [0.35, 0.33, 0.38, 1.0];
    pub const PLAYER: [f32; 4] = [0.25, 0.65, 0.95, 1.0];
    pub const PLAYER_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_DEAD: [f32; 4] = [0.3, 0.3, 0.35, 1.0];
    pub const SPIKE: [f32; 4] = [0.75, 0.15, 0.15, 1.0];
    pub const STONE: [f32; 4] = [0.55, 0.45, 0.35, 1.0];
    pub const STONE_WARNING: [f32; 4] = [0.85, 0.55, 0.25, 1.0];
    pub const MAGIC_WALL: [f32; 4] = [0.55, 0.3, 0.85, 1.0];
    pub const MAGIC_WALL_CRACKED: [f32; 4] = [0.4, 0.22, 0.6, 1.0];
    pub const EXIT: [f32; 4] = [0.2, 0.8, 0.35, 1.0];
}

/// Resolve a particle color code to RGBA with the given alpha
pub fn particle_color(code: u32, alpha: f32) -> [f32; 4] {
    use crate::effects::*;
    match code {
        COLOR_DUST => [0.6, 0.55, 0.45, alpha],
        COLOR_DEATH => [0.9, 0.2, 0.2, alpha],
        COLOR_WALL => [0.65, 0.4, 0.9, alpha],
        COLOR_STONE => [0.55, 0.45, 0.35, alpha],
        COLOR_WIN => [1.0, 0.85, 0.3, alpha],
        COLOR_SPARK => [1.0, 0.95, 0.7, alpha],
        _ => [1.0, 1.0, 1.0, alpha],
    }
}

//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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
    /// rgba(0, 255, 255, 0.8)
    pub const CATCHER: [f32; 4] = [0.0, 1.0, 1.0, 0.8];
    pub const CATCHER_GLOW: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const BALL_GLOW: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PARTICLE: [f32; 3] = [0.0, 1.0, 1.0];
    /// Transparent clear so the page background shows through
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
}

/// 8-bit RGB to normalized RGBA
pub fn rgb8(rgb: [u8; 3], alpha: f32) -> [f32; 4] {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        alpha,
    ]
}

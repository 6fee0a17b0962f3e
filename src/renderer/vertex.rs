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

/// Fixed colors; level and character colors come from their configs
pub mod colors {
    pub const GROUND: [f32; 4] = [0.55, 0.4, 0.22, 1.0];
    pub const GRASS: [f32; 4] = [0.36, 0.7, 0.25, 1.0];
    pub const PIPE_LIP: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
    pub const EGG: [f32; 4] = [1.0, 0.97, 0.86, 1.0];
    pub const EGG_SPOT: [f32; 4] = [0.93, 0.8, 0.55, 1.0];
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = [0.05, 0.05, 0.08, 1.0];
    pub const BEAK: [f32; 4] = [1.0, 0.6, 0.1, 1.0];
    pub const SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    pub const LETTERBOX: [f32; 4] = [0.05, 0.07, 0.12, 1.0];
}

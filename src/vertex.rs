use bytemuck::{Pod, Zeroable};

use crate::color::Color;
use crate::node::QuadGeometry;

pub const VERTICES_PER_QUAD: usize = 4;

/// One corner of a textured quad as laid out in the vertex buffer (20 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    /// Packed RGBA, see [`Color::pack`].
    pub color: u32,
}

impl QuadVertex {
    pub fn new(position: [f32; 2], tex_coords: [f32; 2], color: Color) -> Self {
        Self {
            position,
            tex_coords,
            color: color.pack(),
        }
    }
}

impl QuadGeometry {
    /// Vertices in corner order: top-left, top-right, bottom-right, bottom-left.
    pub fn vertices(&self) -> [QuadVertex; VERTICES_PER_QUAD] {
        let [u0, v0, u1, v1] = self.tex_coords;
        let uvs = [[u0, v0], [u1, v0], [u1, v1], [u0, v1]];
        std::array::from_fn(|corner| {
            QuadVertex::new(self.corners[corner], uvs[corner], self.colors[corner])
        })
    }
}

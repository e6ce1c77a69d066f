use crate::color::Color;
use crate::id::TextureId;

/// Screen-space geometry of a single textured quad, as produced by the scene graph after
/// transforms have been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadGeometry {
    /// Corner positions in the order top-left, top-right, bottom-right, bottom-left.
    pub corners: [[f32; 2]; 4],
    /// Texture rectangle as `[u0, v0, u1, v1]`.
    pub tex_coords: [f32; 4],
    /// Per-corner colors, same order as `corners`.
    pub colors: [Color; 4],
}

impl QuadGeometry {
    /// An untransformed rectangle sampling the whole texture, tinted white.
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            corners: [
                [x, y],
                [x + width, y],
                [x + width, y + height],
                [x, y + height],
            ],
            tex_coords: [0.0, 0.0, 1.0, 1.0],
            colors: [Color::WHITE; 4],
        }
    }

    pub fn with_tex_coords(mut self, tex_coords: [f32; 4]) -> Self {
        self.tex_coords = tex_coords;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.colors = [color; 4];
        self
    }
}

/// A drawable scene-graph node as seen by the accumulator.
///
/// Implementors are cheap handles (an `Rc`, an arena index, ...); the quad list keeps one
/// clone per draw so the back end can look the node up again.
pub trait VisualNode: Clone {
    /// The texture the node currently displays.
    fn displayed_texture(&self) -> TextureId;

    /// The node's quad in render-target coordinates.
    fn quad(&self) -> QuadGeometry;
}

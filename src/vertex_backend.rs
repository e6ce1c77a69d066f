//! CPU-side back end that writes quad vertices as they are added.
//!
//! Vertices for quad `i` live at `4 * i` in [`VertexBackend::vertices`], so the buffer can
//! be uploaded once per frame and every quad operation draws a contiguous slice of it.
//! Device creation and upload are left to the caller.

use crate::backend::RenderBackend;
use crate::color::Color;
use crate::node::{QuadGeometry, VisualNode};
use crate::quad_list::QuadList;
use crate::render_state::FrameView;
use crate::render_texture::RenderTextureInfo;
use crate::vertex::{QuadVertex, VERTICES_PER_QUAD};

/// One step of a frame's submission, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Draw the quad operation at this index.
    Quads(usize),
    /// Run the filter operation at this index.
    Filter(usize),
}

/// Merges quad operations with filter operations by insertion index.
///
/// Filters recorded before any quad operation come first; filters with an insertion index
/// of `n` run after the first `n` quad operations.
pub fn interleave(
    quad_operation_count: usize,
    filter_insertion_indices: impl IntoIterator<Item = usize>,
) -> Vec<Submission> {
    let mut filters = filter_insertion_indices.into_iter().enumerate().peekable();
    let mut steps = Vec::with_capacity(quad_operation_count);

    for quad_operation in 0..quad_operation_count {
        while let Some((filter, _)) = filters.next_if(|&(_, before)| before <= quad_operation) {
            steps.push(Submission::Filter(filter));
        }
        steps.push(Submission::Quads(quad_operation));
    }
    steps.extend(filters.map(|(filter, _)| Submission::Filter(filter)));

    steps
}

#[derive(Debug, Default)]
pub struct VertexBackend {
    vertices: Vec<QuadVertex>,
    submission: Vec<Submission>,
}

impl VertexBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[QuadVertex] {
        &self.vertices
    }

    /// Vertex data ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Submission order of the last finished frame.
    pub fn submission(&self) -> &[Submission] {
        &self.submission
    }

    /// The quad a render target must have received to be replaced by its source texture:
    /// covering the target exactly, sampling the full texture, untinted.
    fn covering_vertices(info: &RenderTextureInfo) -> [QuadVertex; VERTICES_PER_QUAD] {
        QuadGeometry::rect(0.0, 0.0, info.width() as f32, info.height() as f32)
            .with_color(Color::WHITE)
            .vertices()
    }
}

impl<N: VisualNode> RenderBackend<N> for VertexBackend {
    fn create_quad_list(&mut self, capacity: usize) -> QuadList<N> {
        self.vertices.reserve(capacity * VERTICES_PER_QUAD);
        QuadList::with_capacity(capacity)
    }

    fn add_quad(&mut self, frame: &FrameView<'_, N>, index: usize) {
        let Some(node) = frame.quads().view(index) else {
            tracing::warn!(index, "quad added without a view");
            return;
        };

        // A new frame starts writing at quad zero again.
        self.vertices.truncate(index * VERTICES_PER_QUAD);
        self.vertices.extend_from_slice(&node.quad().vertices());
    }

    fn is_render_texture_reusable(
        &mut self,
        _frame: &FrameView<'_, N>,
        info: &RenderTextureInfo,
    ) -> bool {
        let offset = info.offset() * VERTICES_PER_QUAD;
        self.vertices
            .get(offset..offset + VERTICES_PER_QUAD)
            .is_some_and(|quad| quad == Self::covering_vertices(info))
    }

    fn finish_render_state(&mut self, frame: &FrameView<'_, N>) {
        self.vertices.truncate(frame.quad_count() * VERTICES_PER_QUAD);
        self.submission = interleave(
            frame.quad_operations().len(),
            frame
                .filter_operations()
                .iter()
                .map(|filter| filter.insertion_index()),
        );
        tracing::debug!(
            vertices = self.vertices.len(),
            steps = self.submission.len(),
            "vertex data ready for submission"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{DefaultShader, RenderState, Shader, ShaderOwner, TextureId};

    #[derive(Debug, Clone)]
    struct Sprite {
        texture: u64,
        geometry: QuadGeometry,
    }

    impl VisualNode for Sprite {
        fn displayed_texture(&self) -> TextureId {
            TextureId(self.texture)
        }

        fn quad(&self) -> QuadGeometry {
            self.geometry
        }
    }

    fn sprite(texture: u64, geometry: QuadGeometry) -> Sprite {
        Sprite { texture, geometry }
    }

    #[test]
    fn interleave_places_filters_at_their_insertion_index() {
        assert_eq!(
            interleave(3, [0, 2, 2, 3]),
            vec![
                Submission::Filter(0),
                Submission::Quads(0),
                Submission::Quads(1),
                Submission::Filter(1),
                Submission::Filter(2),
                Submission::Quads(2),
                Submission::Filter(3),
            ]
        );
        assert!(interleave(0, []).is_empty());
        assert_eq!(interleave(2, []), vec![Submission::Quads(0), Submission::Quads(1)]);
    }

    #[test]
    fn vertices_are_written_per_quad() {
        let shader: Rc<dyn Shader> = Rc::new(DefaultShader);
        let mut state = RenderState::new(VertexBackend::new());
        state.reset();
        state.set_shader(&shader, ShaderOwner(1));
        state
            .add_quad(sprite(1, QuadGeometry::rect(0.0, 0.0, 4.0, 4.0)))
            .unwrap();
        state
            .add_quad(sprite(2, QuadGeometry::rect(4.0, 0.0, 4.0, 4.0)))
            .unwrap();
        state.finish().unwrap();

        let backend = state.backend();
        assert_eq!(backend.vertices().len(), 8);
        assert_eq!(backend.vertices()[4].position, [4.0, 0.0]);
        assert_eq!(backend.vertex_bytes().len(), 8 * 20);
        assert_eq!(backend.submission(), &[Submission::Quads(0)]);
    }

    #[test]
    fn next_frame_overwrites_previous_vertices() {
        let mut state = RenderState::new(VertexBackend::new());
        state.reset();
        for texture in 0..3 {
            state
                .add_quad(sprite(texture, QuadGeometry::rect(0.0, 0.0, 1.0, 1.0)))
                .unwrap();
        }
        state.finish().unwrap();

        state.reset();
        state
            .add_quad(sprite(9, QuadGeometry::rect(5.0, 5.0, 1.0, 1.0)))
            .unwrap();
        state.finish().unwrap();

        assert_eq!(state.backend().vertices().len(), 4);
        assert_eq!(state.backend().vertices()[0].position, [5.0, 5.0]);
    }

    #[test]
    fn reuse_requires_exact_untinted_cover() {
        let cases = [
            (QuadGeometry::rect(0.0, 0.0, 32.0, 16.0), Some(TextureId(7))),
            (QuadGeometry::rect(1.0, 0.0, 32.0, 16.0), None),
            (QuadGeometry::rect(0.0, 0.0, 32.0, 15.0), None),
            (
                QuadGeometry::rect(0.0, 0.0, 32.0, 16.0).with_color(Color::rgb(255, 0, 0)),
                None,
            ),
            (
                QuadGeometry::rect(0.0, 0.0, 32.0, 16.0).with_tex_coords([0.0, 0.0, 0.5, 1.0]),
                None,
            ),
        ];

        for (geometry, expected) in cases {
            let target = RenderTextureInfo::new(32, 16);
            let mut state = RenderState::new(VertexBackend::new());
            state.reset();
            state.set_render_texture_info(Some(&target));
            state.add_quad(sprite(7, geometry)).unwrap();

            assert_eq!(state.finished_render_texture().unwrap(), expected);
            assert_eq!(target.native_texture(), expected);
        }
    }

    #[test]
    fn reuse_checks_the_candidate_offset() {
        let target = RenderTextureInfo::new(8, 8);
        let mut state = RenderState::new(VertexBackend::new());
        state.reset();
        state
            .add_quad(sprite(1, QuadGeometry::rect(3.0, 3.0, 2.0, 2.0)))
            .unwrap();
        state.set_render_texture_info(Some(&target));
        state
            .add_quad(sprite(2, QuadGeometry::rect(0.0, 0.0, 8.0, 8.0)))
            .unwrap();

        assert_eq!(target.offset(), 1);
        assert_eq!(state.finished_render_texture().unwrap(), Some(TextureId(2)));
    }
}

use std::rc::Rc;

use crate::id::ShaderOwner;
use crate::node::VisualNode;
use crate::operation::{FilterOperation, QuadOperation};
use crate::quad_list::QuadList;
use crate::render_state::FrameView;
use crate::render_texture::RenderTextureInfo;
use crate::scissor::Scissor;
use crate::shader::Shader;

/// The renderer that turns accumulated batches into GPU work.
///
/// The accumulator calls into the back end in draw order: record constructors while
/// batching, `add_quad` after every quad so vertex data can be written right away,
/// `is_render_texture_reusable` when a render target is finalized, and
/// `finish_render_state` once per frame with the complete batch and filter sequences.
pub trait RenderBackend<N: VisualNode> {
    /// Creates the quad list the accumulator fills every frame.
    fn create_quad_list(&mut self, capacity: usize) -> QuadList<N> {
        QuadList::with_capacity(capacity)
    }

    fn create_quad_operation(
        &mut self,
        shader: Rc<dyn Shader>,
        shader_owner: Option<ShaderOwner>,
        render_texture: Option<RenderTextureInfo>,
        scissor: Option<Scissor>,
        index: usize,
    ) -> QuadOperation {
        QuadOperation::new(shader, shader_owner, render_texture, scissor, index)
    }

    fn create_filter_operation(
        &mut self,
        filter: Rc<dyn Shader>,
        owner: ShaderOwner,
        source: RenderTextureInfo,
        target: Option<RenderTextureInfo>,
        before_quad_operation: usize,
    ) -> FilterOperation {
        FilterOperation::new(filter, owner, source, target, before_quad_operation)
    }

    /// Quad `index` was appended to `frame.quads()`.
    fn add_quad(&mut self, frame: &FrameView<'_, N>, index: usize);

    /// Whether the candidate texture of `info` exactly covers the target on its own.
    fn is_render_texture_reusable(
        &mut self,
        frame: &FrameView<'_, N>,
        info: &RenderTextureInfo,
    ) -> bool;

    /// The frame is complete; its quad and filter operations are ready for submission.
    fn finish_render_state(&mut self, frame: &FrameView<'_, N>);
}

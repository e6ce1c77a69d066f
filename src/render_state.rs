use std::rc::Rc;

use smallvec::SmallVec;

use crate::backend::RenderBackend;
use crate::id::{ShaderOwner, TextureId};
use crate::node::VisualNode;
use crate::operation::{FilterOperation, QuadOperation};
use crate::quad_list::QuadList;
use crate::render_texture::RenderTextureInfo;
use crate::scissor::Scissor;
use crate::shader::{shader_ptr_eq, DefaultShader, Shader};

mod batching;
mod metrics;
mod reuse;
#[cfg(test)]
mod tests;
mod types;

pub use metrics::BatchCounts;
use types::{BatchPhase, PendingState};

const DEFAULT_QUAD_CAPACITY: usize = 256;

type FilterOperations = SmallVec<[FilterOperation; 4]>;

/// Construction options for [`RenderState`].
#[derive(Debug, Clone)]
pub struct RenderStateOptions {
    /// Quads the quad list can hold before reallocating.
    pub initial_quad_capacity: usize,
    /// Shader bound in place of every default-equivalent shader. A [`DefaultShader`] is
    /// used when unset.
    pub default_shader: Option<Rc<dyn Shader>>,
}

impl Default for RenderStateOptions {
    fn default() -> Self {
        Self {
            initial_quad_capacity: DEFAULT_QUAD_CAPACITY,
            default_shader: None,
        }
    }
}

/// Accumulates one frame of draws into quad operations and filter operations.
///
/// Per frame, the caller brackets its scene traversal with [`reset`](Self::reset) and
/// [`finish`](Self::finish). For every visible node it sets the shader, scissor and render
/// target, then calls [`add_quad`](Self::add_quad). Consecutive quads that share all four
/// pieces of state end up in one [`QuadOperation`]; any divergence closes the batch and
/// opens the next one.
///
/// ```
/// use std::rc::Rc;
/// use quadstate::{
///     FrameView, QuadGeometry, RenderBackend, RenderState, RenderTextureInfo, Shader,
///     DefaultShader, ShaderOwner, TextureId, VisualNode,
/// };
///
/// #[derive(Clone)]
/// struct Sprite(u64);
///
/// impl VisualNode for Sprite {
///     fn displayed_texture(&self) -> TextureId {
///         TextureId(self.0)
///     }
///     fn quad(&self) -> QuadGeometry {
///         QuadGeometry::rect(0.0, 0.0, 16.0, 16.0)
///     }
/// }
///
/// struct NullBackend;
///
/// impl RenderBackend<Sprite> for NullBackend {
///     fn add_quad(&mut self, _: &FrameView<'_, Sprite>, _: usize) {}
///     fn is_render_texture_reusable(&mut self, _: &FrameView<'_, Sprite>, _: &RenderTextureInfo) -> bool {
///         false
///     }
///     fn finish_render_state(&mut self, _: &FrameView<'_, Sprite>) {}
/// }
///
/// let shader: Rc<dyn Shader> = Rc::new(DefaultShader);
/// let mut state = RenderState::new(NullBackend);
/// state.reset();
/// for id in 0..3 {
///     state.set_shader(&shader, ShaderOwner(1));
///     state.add_quad(Sprite(id)).unwrap();
/// }
/// state.finish().unwrap();
///
/// assert_eq!(state.quad_operations().len(), 1);
/// assert_eq!(state.quad_operations()[0].range(), 0..3);
/// ```
pub struct RenderState<N: VisualNode, B: RenderBackend<N>> {
    backend: B,
    default_shader: Rc<dyn Shader>,
    quads: QuadList<N>,
    pending: PendingState,
    phase: BatchPhase,
    override_quad_texture: Option<TextureId>,
    quad_operations: Vec<QuadOperation>,
    filter_operations: FilterOperations,
    counts: BatchCounts,
}

/// Read-only view of the accumulator handed to the back end.
pub struct FrameView<'a, N> {
    pending: &'a PendingState,
    quads: &'a QuadList<N>,
    open_operation: Option<&'a QuadOperation>,
    quad_operations: &'a [QuadOperation],
    filter_operations: &'a [FilterOperation],
}

impl<'a, N> FrameView<'a, N> {
    pub fn quads(&self) -> &'a QuadList<N> {
        self.quads
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Effective shader of the next quad.
    pub fn shader(&self) -> &'a Rc<dyn Shader> {
        &self.pending.shader
    }

    pub fn shader_owner(&self) -> Option<ShaderOwner> {
        self.pending.shader_owner
    }

    pub fn scissor(&self) -> Option<Scissor> {
        self.pending.scissor
    }

    pub fn render_texture_info(&self) -> Option<&'a RenderTextureInfo> {
        self.pending.render_texture.as_ref()
    }

    /// The batch currently absorbing quads.
    pub fn open_operation(&self) -> Option<&'a QuadOperation> {
        self.open_operation
    }

    /// Closed quad operations in submission order.
    pub fn quad_operations(&self) -> &'a [QuadOperation] {
        self.quad_operations
    }

    pub fn filter_operations(&self) -> &'a [FilterOperation] {
        self.filter_operations
    }
}

impl<N: VisualNode, B: RenderBackend<N>> RenderState<N, B> {
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, RenderStateOptions::default())
    }

    pub fn with_options(mut backend: B, options: RenderStateOptions) -> Self {
        let default_shader = options
            .default_shader
            .unwrap_or_else(|| Rc::new(DefaultShader));
        let quads = backend.create_quad_list(options.initial_quad_capacity);

        Self {
            backend,
            pending: PendingState::new(Rc::clone(&default_shader)),
            default_shader,
            quads,
            phase: BatchPhase::Idle,
            override_quad_texture: None,
            quad_operations: Vec::new(),
            filter_operations: FilterOperations::new(),
            counts: BatchCounts::default(),
        }
    }

    /// Clears everything accumulated for the previous frame.
    pub fn reset(&mut self) {
        self.pending = PendingState::new(Rc::clone(&self.default_shader));
        self.phase = BatchPhase::Idle;
        self.override_quad_texture = None;
        self.quad_operations.clear();
        self.filter_operations.clear();
        self.quads.reset();
        self.counts = BatchCounts::default();
    }

    /// Sets the shader and owner for the following quads.
    ///
    /// Repeating the previous call is free. Default-equivalent shaders are replaced by
    /// the shared default shader so that neighbouring nodes with no-op shading can share
    /// a program; the owner still separates their batches.
    pub fn set_shader(&mut self, shader: &Rc<dyn Shader>, owner: ShaderOwner) {
        let same_real_shader = self
            .pending
            .real_shader
            .as_ref()
            .is_some_and(|real_shader| shader_ptr_eq(real_shader, shader));
        if same_real_shader && self.pending.shader_owner == Some(owner) {
            return;
        }

        self.pending.real_shader = Some(Rc::clone(shader));

        let effective_shader = if shader.is_default_equivalent() {
            Rc::clone(&self.default_shader)
        } else {
            Rc::clone(shader)
        };

        if !shader_ptr_eq(&self.pending.shader, &effective_shader)
            || self.pending.shader_owner != Some(owner)
        {
            self.pending.shader = effective_shader;
            self.pending.shader_owner = Some(owner);
            self.pending.dirty = true;
        }
    }

    /// Sets the clip rectangle for the following quads; `None` disables clipping.
    pub fn set_scissor(&mut self, area: Option<Scissor>) {
        if self.pending.scissor != area {
            self.pending.scissor = area;
            self.pending.dirty = true;
        }
    }

    /// Redirects the following quads to an off-screen target, or back to the primary
    /// surface with `None`. Switching targets also drops the scissor.
    pub fn set_render_texture_info(&mut self, info: Option<&RenderTextureInfo>) {
        if self.pending.render_texture.as_ref() != info {
            self.pending.render_texture = info.cloned();
            self.pending.scissor = None;
            self.pending.dirty = true;
        }
    }

    /// Makes the following quads sample `texture` instead of their node's own texture.
    pub fn set_override_quad_texture(&mut self, texture: Option<TextureId>) {
        self.override_quad_texture = texture;
    }

    pub fn override_quad_texture(&self) -> Option<TextureId> {
        self.override_quad_texture
    }

    /// Number of quads added this frame.
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    pub fn quads(&self) -> &QuadList<N> {
        &self.quads
    }

    pub fn shader(&self) -> &Rc<dyn Shader> {
        &self.pending.shader
    }

    pub fn shader_owner(&self) -> Option<ShaderOwner> {
        self.pending.shader_owner
    }

    pub fn scissor(&self) -> Option<Scissor> {
        self.pending.scissor
    }

    pub fn render_texture_info(&self) -> Option<&RenderTextureInfo> {
        self.pending.render_texture.as_ref()
    }

    pub fn default_shader(&self) -> &Rc<dyn Shader> {
        &self.default_shader
    }

    /// Closed quad operations in submission order.
    pub fn quad_operations(&self) -> &[QuadOperation] {
        &self.quad_operations
    }

    pub fn filter_operations(&self) -> &[FilterOperation] {
        &self.filter_operations
    }

    /// The batch currently absorbing quads, if any.
    pub fn open_operation(&self) -> Option<&QuadOperation> {
        match &self.phase {
            BatchPhase::Open(operation) => Some(operation),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, BatchPhase::Finished)
    }

    /// Counts for the current (or just finished) frame.
    pub fn counts(&self) -> BatchCounts {
        self.counts
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Splits the back end from a view of everything else so the back end can be
    /// called with the accumulator's state.
    fn split_backend(&mut self) -> (&mut B, FrameView<'_, N>) {
        let open_operation = match &self.phase {
            BatchPhase::Open(operation) => Some(operation),
            _ => None,
        };
        let frame = FrameView {
            pending: &self.pending,
            quads: &self.quads,
            open_operation,
            quad_operations: &self.quad_operations,
            filter_operations: &self.filter_operations,
        };
        (&mut self.backend, frame)
    }
}

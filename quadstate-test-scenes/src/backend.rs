use std::ops::Range;
use std::rc::Rc;

use ahash::{HashMap, HashMapExt};
use quadstate::{
    FilterOperation, FrameView, QuadOperation, RenderBackend, RenderTextureInfo, Scissor, Shader,
    ShaderOwner, TextureId, VisualNode,
};

/// Everything the accumulator told the back end, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    QuadOperationCreated {
        index: usize,
        owner: Option<ShaderOwner>,
    },
    FilterOperationCreated {
        before_quad_operation: usize,
    },
    QuadAdded {
        index: usize,
        texture: TextureId,
    },
    ReuseQueried {
        texture: Option<TextureId>,
        offset: usize,
        accepted: bool,
    },
    Finished {
        quad_operations: usize,
        filter_operations: usize,
    },
}

/// Snapshot of a finished frame as the back end received it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinishedFrame {
    pub batches: Vec<Range<usize>>,
    pub owners: Vec<Option<ShaderOwner>>,
    pub scissors: Vec<Option<Scissor>>,
    pub filters: Vec<usize>,
    pub textures: Vec<TextureId>,
}

/// Back end that records calls instead of talking to a GPU.
///
/// Reuse queries are answered per texture: textures registered with
/// [`RecordingBackend::accept_reuse_of`] are accepted, everything else is rejected.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    events: Vec<BackendEvent>,
    reusable_textures: HashMap<TextureId, bool>,
    finished_frames: Vec<FinishedFrame>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            reusable_textures: HashMap::new(),
            finished_frames: Vec::new(),
        }
    }

    pub fn accept_reuse_of(&mut self, texture: TextureId) {
        self.reusable_textures.insert(texture, true);
    }

    pub fn events(&self) -> &[BackendEvent] {
        &self.events
    }

    pub fn finished_frames(&self) -> &[FinishedFrame] {
        &self.finished_frames
    }

    pub fn last_frame(&self) -> Option<&FinishedFrame> {
        self.finished_frames.last()
    }

    pub fn added_quads(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BackendEvent::QuadAdded { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn reuse_queries(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, BackendEvent::ReuseQueried { .. }))
            .count()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl<N: VisualNode> RenderBackend<N> for RecordingBackend {
    fn create_quad_operation(
        &mut self,
        shader: Rc<dyn Shader>,
        shader_owner: Option<ShaderOwner>,
        render_texture: Option<RenderTextureInfo>,
        scissor: Option<Scissor>,
        index: usize,
    ) -> QuadOperation {
        self.events.push(BackendEvent::QuadOperationCreated {
            index,
            owner: shader_owner,
        });
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
        self.events.push(BackendEvent::FilterOperationCreated {
            before_quad_operation,
        });
        FilterOperation::new(filter, owner, source, target, before_quad_operation)
    }

    fn add_quad(&mut self, frame: &FrameView<'_, N>, index: usize) {
        if let Some(texture) = frame.quads().texture(index) {
            self.events.push(BackendEvent::QuadAdded { index, texture });
        }
    }

    fn is_render_texture_reusable(
        &mut self,
        _frame: &FrameView<'_, N>,
        info: &RenderTextureInfo,
    ) -> bool {
        let texture = info.native_texture();
        let accepted = texture
            .and_then(|texture| self.reusable_textures.get(&texture).copied())
            .unwrap_or(false);
        self.events.push(BackendEvent::ReuseQueried {
            texture,
            offset: info.offset(),
            accepted,
        });
        accepted
    }

    fn finish_render_state(&mut self, frame: &FrameView<'_, N>) {
        let quad_operations = frame.quad_operations();
        let filter_operations = frame.filter_operations();
        self.events.push(BackendEvent::Finished {
            quad_operations: quad_operations.len(),
            filter_operations: filter_operations.len(),
        });
        self.finished_frames.push(FinishedFrame {
            batches: quad_operations.iter().map(QuadOperation::range).collect(),
            owners: quad_operations
                .iter()
                .map(QuadOperation::shader_owner)
                .collect(),
            scissors: quad_operations.iter().map(QuadOperation::scissor).collect(),
            filters: filter_operations
                .iter()
                .map(FilterOperation::insertion_index)
                .collect(),
            textures: frame.quads().textures().to_vec(),
        });
    }
}

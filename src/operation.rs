//! Batch records handed to the back end.
//!
//! A [`QuadOperation`] is one GPU draw call over a contiguous range of the quad list. A
//! [`FilterOperation`] is a post-processing pass that runs between two quad operations;
//! its position is given by the number of quad operations that precede it.

use std::ops::Range;
use std::rc::Rc;

use crate::id::ShaderOwner;
use crate::render_texture::RenderTextureInfo;
use crate::scissor::Scissor;
use crate::shader::Shader;

/// Outcome of closing a quad operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseDisposition {
    Submit,
    /// No quads and the shader does not ask to be submitted anyway.
    DroppedEmpty,
    /// The scissor has no visible area.
    DroppedClipped,
}

#[derive(Debug, Clone)]
pub struct QuadOperation {
    shader: Rc<dyn Shader>,
    shader_owner: Option<ShaderOwner>,
    render_texture: Option<RenderTextureInfo>,
    scissor: Option<Scissor>,
    index: usize,
    length: usize,
}

impl QuadOperation {
    pub fn new(
        shader: Rc<dyn Shader>,
        shader_owner: Option<ShaderOwner>,
        render_texture: Option<RenderTextureInfo>,
        scissor: Option<Scissor>,
        index: usize,
    ) -> Self {
        Self {
            shader,
            shader_owner,
            render_texture,
            scissor,
            index,
            length: 0,
        }
    }

    pub fn shader(&self) -> &Rc<dyn Shader> {
        &self.shader
    }

    pub fn shader_owner(&self) -> Option<ShaderOwner> {
        self.shader_owner
    }

    /// `None` means the primary surface.
    pub fn render_texture(&self) -> Option<&RenderTextureInfo> {
        self.render_texture.as_ref()
    }

    pub fn scissor(&self) -> Option<Scissor> {
        self.scissor
    }

    /// Index of the first quad in the quad list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of quads absorbed.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.index..self.index + self.length
    }

    pub(crate) fn push_quad(&mut self) {
        self.length += 1;
    }

    pub(crate) fn close_disposition(&self) -> CloseDisposition {
        if self.length == 0 && !self.shader.requires_empty_submission() {
            return CloseDisposition::DroppedEmpty;
        }
        match self.scissor {
            Some(scissor) if scissor.is_degenerate() => CloseDisposition::DroppedClipped,
            _ => CloseDisposition::Submit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterOperation {
    filter: Rc<dyn Shader>,
    owner: ShaderOwner,
    source: RenderTextureInfo,
    target: Option<RenderTextureInfo>,
    before_quad_operation: usize,
}

impl FilterOperation {
    pub fn new(
        filter: Rc<dyn Shader>,
        owner: ShaderOwner,
        source: RenderTextureInfo,
        target: Option<RenderTextureInfo>,
        before_quad_operation: usize,
    ) -> Self {
        Self {
            filter,
            owner,
            source,
            target,
            before_quad_operation,
        }
    }

    pub fn filter(&self) -> &Rc<dyn Shader> {
        &self.filter
    }

    pub fn owner(&self) -> ShaderOwner {
        self.owner
    }

    pub fn source(&self) -> &RenderTextureInfo {
        &self.source
    }

    /// `None` means the primary surface.
    pub fn target(&self) -> Option<&RenderTextureInfo> {
        self.target.as_ref()
    }

    /// Number of quad operations that were closed when this filter was recorded; the
    /// filter runs after exactly that many quad operations.
    pub fn insertion_index(&self) -> usize {
        self.before_quad_operation
    }
}

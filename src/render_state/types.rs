use std::rc::Rc;

use crate::id::ShaderOwner;
use crate::operation::QuadOperation;
use crate::render_texture::RenderTextureInfo;
use crate::scissor::Scissor;
use crate::shader::Shader;

/// State requested for the next quad. It only reaches a batch when a quad is added.
#[derive(Debug)]
pub(crate) struct PendingState {
    /// Effective shader, after default-shader substitution.
    pub(crate) shader: Rc<dyn Shader>,
    pub(crate) shader_owner: Option<ShaderOwner>,
    /// Shader as passed to the last `set_shader`, used to skip repeated calls.
    pub(crate) real_shader: Option<Rc<dyn Shader>>,
    pub(crate) scissor: Option<Scissor>,
    pub(crate) render_texture: Option<RenderTextureInfo>,
    /// Set when pending state may differ from the open batch.
    pub(crate) dirty: bool,
}

impl PendingState {
    pub(crate) fn new(default_shader: Rc<dyn Shader>) -> Self {
        Self {
            shader: default_shader,
            shader_owner: None,
            real_shader: None,
            scissor: None,
            render_texture: None,
            dirty: false,
        }
    }
}

#[derive(Debug)]
pub(crate) enum BatchPhase {
    /// No batch is open; the next quad opens one.
    Idle,
    Open(QuadOperation),
    /// `finish()` ran. Only `reset()` leaves this phase.
    Finished,
}

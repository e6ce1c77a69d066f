use thiserror::Error;

/// Misuse of the per-frame protocol. Batching itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderStateError {
    /// `finish()` already ran for this frame; call `reset()` first.
    #[error("the frame has already been finished; reset the render state before drawing")]
    FrameFinished,
    /// `finished_render_texture()` was called while drawing to the primary surface.
    #[error("no render texture is active")]
    NoActiveRenderTexture,
}

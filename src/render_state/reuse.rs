use super::*;
use crate::error::RenderStateError;

impl<N: VisualNode, B: RenderBackend<N>> RenderState<N, B> {
    /// Finalizes the active render target once all its quads were added.
    ///
    /// If exactly one default-shaded quad was drawn into the target, the back end decides
    /// whether that quad's texture covers the target exactly; if not, the candidate is
    /// discarded. Returns the texture the target can be replaced with, if any.
    pub fn finished_render_texture(&mut self) -> Result<Option<TextureId>, RenderStateError> {
        self.ensure_not_finished()?;
        let info = self
            .pending
            .render_texture
            .clone()
            .ok_or(RenderStateError::NoActiveRenderTexture)?;

        if let Some(candidate) = info.native_texture() {
            let (backend, frame) = self.split_backend();
            if backend.is_render_texture_reusable(&frame, &info) {
                tracing::trace!(%candidate, offset = info.offset(), "render texture reuse confirmed");
                self.counts.reuse_confirmed += 1;
            } else {
                tracing::trace!(%candidate, offset = info.offset(), "render texture reuse rejected");
                info.clear_candidate();
                self.counts.reuse_rejected += 1;
            }
        }

        Ok(info.native_texture())
    }
}

use super::*;
use crate::error::RenderStateError;
use crate::operation::CloseDisposition;

impl<N: VisualNode, B: RenderBackend<N>> RenderState<N, B> {
    /// Adds a quad for `node` to the current batch and returns its index in the quad list.
    ///
    /// Opens a batch if none is open, or closes the open one and starts another if the
    /// pending state diverged from it since the last quad.
    pub fn add_quad(&mut self, node: N) -> Result<usize, RenderStateError> {
        self.prepare_quad_operation()?;

        let texture = self
            .override_quad_texture
            .unwrap_or_else(|| node.displayed_texture());
        let index = self.quads.len();

        if let Some(info) = &self.pending.render_texture {
            let eligible = shader_ptr_eq(&self.pending.shader, &self.default_shader);
            info.record_draw(texture, index, eligible);
            tracing::trace!(
                index,
                %texture,
                candidate = ?info.native_texture(),
                "quad drawn into render texture"
            );
        }

        self.quads.push(texture, node);
        if let BatchPhase::Open(operation) = &mut self.phase {
            operation.push_quad();
        }
        self.counts.quads += 1;

        let (backend, frame) = self.split_backend();
        backend.add_quad(&frame, index);

        Ok(index)
    }

    /// Records a filter pass after everything drawn so far.
    ///
    /// The open batch is closed and not replaced: quads following a filter often belong
    /// to a different render stage and open their own batch.
    pub fn add_filter(
        &mut self,
        filter: &Rc<dyn Shader>,
        owner: ShaderOwner,
        source: &RenderTextureInfo,
        target: Option<&RenderTextureInfo>,
    ) -> Result<(), RenderStateError> {
        self.ensure_not_finished()?;
        self.close_quad_operation();

        let before_quad_operation = self.quad_operations.len();
        let operation = self.backend.create_filter_operation(
            Rc::clone(filter),
            owner,
            source.clone(),
            target.cloned(),
            before_quad_operation,
        );
        tracing::trace!(
            filter = filter.label(),
            %owner,
            before_quad_operation,
            "filter operation recorded"
        );
        self.filter_operations.push(operation);
        self.counts.filters += 1;

        Ok(())
    }

    /// Closes the last batch and hands the frame to the back end.
    pub fn finish(&mut self) -> Result<(), RenderStateError> {
        self.ensure_not_finished()?;
        self.close_quad_operation();
        self.phase = BatchPhase::Finished;

        tracing::debug!(
            quads = self.counts.quads,
            quad_operations = self.quad_operations.len(),
            filter_operations = self.filter_operations.len(),
            "render state finished"
        );
        #[cfg(feature = "render_metrics")]
        tracing::debug!(counts = ?self.counts, "render state counts");

        let (backend, frame) = self.split_backend();
        backend.finish_render_state(&frame);

        Ok(())
    }

    pub(super) fn ensure_not_finished(&self) -> Result<(), RenderStateError> {
        if self.is_finished() {
            return Err(RenderStateError::FrameFinished);
        }
        Ok(())
    }

    fn prepare_quad_operation(&mut self) -> Result<(), RenderStateError> {
        match self.phase {
            BatchPhase::Finished => return Err(RenderStateError::FrameFinished),
            BatchPhase::Idle => self.open_quad_operation(),
            BatchPhase::Open(_) => {
                if self.pending.dirty {
                    if self.has_changes() {
                        self.close_quad_operation();
                        self.open_quad_operation();
                    }
                    self.pending.dirty = false;
                }
            }
        }
        Ok(())
    }

    /// True if the pending state cannot be drawn as part of the open batch.
    fn has_changes(&self) -> bool {
        let BatchPhase::Open(operation) = &self.phase else {
            return false;
        };

        !shader_ptr_eq(&self.pending.shader, operation.shader())
            || self.pending.shader_owner != operation.shader_owner()
            || self.pending.render_texture.as_ref() != operation.render_texture()
            || self.pending.scissor != operation.scissor()
    }

    fn open_quad_operation(&mut self) {
        let index = self.quads.len();
        let operation = self.backend.create_quad_operation(
            Rc::clone(&self.pending.shader),
            self.pending.shader_owner,
            self.pending.render_texture.clone(),
            self.pending.scissor,
            index,
        );
        tracing::trace!(
            index,
            shader = operation.shader().label(),
            owner = ?operation.shader_owner(),
            scissor = ?operation.scissor(),
            "quad operation opened"
        );

        self.phase = BatchPhase::Open(operation);
        self.pending.dirty = false;
        self.counts.batches_opened += 1;
    }

    /// Closes the open batch, if any, and keeps it unless nothing it would draw is visible.
    fn close_quad_operation(&mut self) {
        let operation = match std::mem::replace(&mut self.phase, BatchPhase::Idle) {
            BatchPhase::Open(operation) => operation,
            other => {
                self.phase = other;
                return;
            }
        };

        match operation.close_disposition() {
            CloseDisposition::Submit => {
                tracing::trace!(range = ?operation.range(), "quad operation closed");
                self.counts.batches_submitted += 1;
                self.quad_operations.push(operation);
            }
            CloseDisposition::DroppedEmpty => {
                tracing::trace!(index = operation.index(), "empty quad operation dropped");
                self.counts.batches_dropped_empty += 1;
            }
            CloseDisposition::DroppedClipped => {
                tracing::trace!(
                    range = ?operation.range(),
                    scissor = ?operation.scissor(),
                    "clipped quad operation dropped"
                );
                self.counts.batches_dropped_clipped += 1;
            }
        }
    }
}

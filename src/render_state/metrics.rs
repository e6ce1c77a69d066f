/// Per-frame batching counts for diagnosing draw-call overhead.
///
/// Counts are reset with the render state and can be merged across frames with
/// [`BatchCounts::accumulate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounts {
    /// Quads added to the quad list.
    pub quads: u32,
    /// Quad operations opened, including ones dropped later.
    pub batches_opened: u32,
    /// Quad operations kept for submission.
    pub batches_submitted: u32,
    /// Quad operations dropped because they received no quads.
    pub batches_dropped_empty: u32,
    /// Quad operations dropped because their scissor had no visible area.
    pub batches_dropped_clipped: u32,
    /// Filter operations recorded.
    pub filters: u32,
    /// Render targets that will reuse their single source texture.
    pub reuse_confirmed: u32,
    /// Reuse candidates the back end rejected.
    pub reuse_rejected: u32,
}

impl BatchCounts {
    /// Merge another frame's counts into this accumulator.
    pub fn accumulate(&mut self, other: &Self) {
        self.quads += other.quads;
        self.batches_opened += other.batches_opened;
        self.batches_submitted += other.batches_submitted;
        self.batches_dropped_empty += other.batches_dropped_empty;
        self.batches_dropped_clipped += other.batches_dropped_clipped;
        self.filters += other.filters;
        self.reuse_confirmed += other.reuse_confirmed;
        self.reuse_rejected += other.reuse_rejected;
    }

    /// Average quads per submitted draw call, or zero when nothing was submitted.
    pub fn quads_per_batch(&self) -> f32 {
        if self.batches_submitted == 0 {
            return 0.0;
        }
        self.quads as f32 / self.batches_submitted as f32
    }
}

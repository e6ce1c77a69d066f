use crate::id::TextureId;

/// The per-frame list of drawn quads.
///
/// Textures and views are kept as two index-aligned vectors: entry `i` of each describes
/// quad `i`. Both only grow during a frame and are cleared together.
#[derive(Debug, Clone)]
pub struct QuadList<N> {
    textures: Vec<TextureId>,
    views: Vec<N>,
}

impl<N> Default for QuadList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> QuadList<N> {
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            views: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            textures: Vec::with_capacity(capacity),
            views: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn textures(&self) -> &[TextureId] {
        &self.textures
    }

    pub fn views(&self) -> &[N] {
        &self.views
    }

    pub fn texture(&self, index: usize) -> Option<TextureId> {
        self.textures.get(index).copied()
    }

    pub fn view(&self, index: usize) -> Option<&N> {
        self.views.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureId, &N)> {
        self.textures.iter().copied().zip(self.views.iter())
    }

    pub(crate) fn push(&mut self, texture: TextureId, view: N) {
        self.textures.push(texture);
        self.views.push(view);
    }

    /// Drops all quads but keeps the allocations for the next frame.
    pub fn reset(&mut self) {
        self.textures.clear();
        self.views.clear();
    }
}

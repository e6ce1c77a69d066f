use std::fmt;

/// Handle of a GPU texture feeding a quad. The accumulator never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the node that owns a shader binding.
///
/// Two nodes sharing one shader instance still get separate batches, because the owner
/// contributes per-node uniforms. Only identity matters, so any stable number works
/// (a node index, an arena key, a pointer-derived id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderOwner(pub u64);

impl fmt::Display for ShaderOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

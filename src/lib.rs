//! Render-state accumulation for a retained-mode scene-graph renderer.
//!
//! A frame of "draw this node" requests goes in; an ordered list of quad operations (one
//! GPU draw call each) and filter operations (post-processing passes between them) comes
//! out. See [`RenderState`] for the per-frame protocol and [`RenderBackend`] for the
//! interface the GPU renderer implements.

mod backend;
mod color;
mod error;
mod id;
mod node;
mod operation;
mod quad_list;
mod render_state;
mod render_texture;
mod scissor;
mod shader;
mod vertex;
mod vertex_backend;

pub use backend::RenderBackend;
pub use color::Color;
pub use error::RenderStateError;
pub use id::{ShaderOwner, TextureId};
pub use node::{QuadGeometry, VisualNode};
pub use operation::{FilterOperation, QuadOperation};
pub use quad_list::QuadList;
pub use render_state::{BatchCounts, FrameView, RenderState, RenderStateOptions};
pub use render_texture::RenderTextureInfo;
pub use scissor::Scissor;
pub use shader::{shader_ptr_eq, DefaultShader, Shader};
pub use vertex::{QuadVertex, VERTICES_PER_QUAD};
pub use vertex_backend::{interleave, Submission, VertexBackend};

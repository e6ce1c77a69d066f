use std::rc::Rc;

use quadstate::{
    QuadGeometry, RenderState, RenderTextureInfo, Scissor, Shader, ShaderOwner, TextureId,
    VisualNode,
};

use crate::backend::RecordingBackend;
use crate::expectations::{BatchExpectation, FilterExpectation};
use crate::shaders::TestShader;

pub type SceneState = RenderState<TestNode, RecordingBackend>;

// ── Scene constants ──────────────────────────────────────────────────────────

pub const TARGET_SIZE: u32 = 64;

const NODE_TEXTURE_BASE: u64 = 1000;
const TARGET_SOURCE_TEXTURE: TextureId = TextureId(77);

/// Scene-graph node stand-in: an id, a texture and a quad.
#[derive(Debug, Clone)]
pub struct TestNode {
    pub id: u64,
    pub texture: TextureId,
    pub geometry: QuadGeometry,
}

impl TestNode {
    /// A 10×10 quad at the origin showing texture `1000 + id`.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            texture: TextureId(NODE_TEXTURE_BASE + id),
            geometry: QuadGeometry::rect(0.0, 0.0, 10.0, 10.0),
        }
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_geometry(mut self, geometry: QuadGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

impl VisualNode for TestNode {
    fn displayed_texture(&self) -> TextureId {
        self.texture
    }

    fn quad(&self) -> QuadGeometry {
        self.geometry
    }
}

/// Everything the main scene expects once the frame is finished.
#[derive(Debug)]
pub struct SceneExpectations {
    pub batches: Vec<BatchExpectation>,
    pub filters: Vec<FilterExpectation>,
    /// Render targets and the texture each is expected to be replaced with.
    pub reuse: Vec<(RenderTextureInfo, Option<TextureId>)>,
}

struct SceneResources {
    default_like: Rc<dyn Shader>,
    first_custom: Rc<dyn Shader>,
    second_custom: Rc<dyn Shader>,
    blur: Rc<dyn Shader>,
    target: RenderTextureInfo,
}

/// A fresh render state with a recording back end, reset and ready for a frame.
pub fn new_scene_state() -> SceneState {
    let mut state = RenderState::new(RecordingBackend::new());
    state.reset();
    state
}

/// Issues the main test scene into `state` and returns what the finished frame must
/// contain. The caller finishes the frame.
///
/// Each section exercises one batching rule; together they cover shader and owner
/// changes, clipping, rendering to a texture and a filter pass.
pub fn build_main_scene(state: &mut SceneState) -> SceneExpectations {
    let resources = load_shared_resources(state);
    let mut batches = Vec::new();

    batches.extend(section_01_constant_state(state, &resources));
    batches.extend(section_02_shader_switch(state, &resources));
    batches.extend(section_03_clipping(state, &resources));
    let (render_to_texture, reuse) = section_04_render_to_texture(state, &resources);
    batches.extend(render_to_texture);
    let filters = section_05_filter(state, &resources);
    batches.extend(section_06_after_filter(state, &resources));

    SceneExpectations {
        batches,
        filters,
        reuse,
    }
}

// ── Shared resource setup ────────────────────────────────────────────────────

fn load_shared_resources(state: &mut SceneState) -> SceneResources {
    state
        .backend_mut()
        .accept_reuse_of(TARGET_SOURCE_TEXTURE);

    SceneResources {
        default_like: Rc::new(TestShader::default_like("tint_none")),
        first_custom: Rc::new(TestShader::custom("grayscale")),
        second_custom: Rc::new(TestShader::custom("sepia")),
        blur: Rc::new(TestShader::custom("blur")),
        target: RenderTextureInfo::new(TARGET_SIZE, TARGET_SIZE),
    }
}

fn draw(state: &mut SceneState, node: TestNode) {
    state
        .add_quad(node)
        .expect("scene draws into an unfinished frame");
}

// ── Sections ─────────────────────────────────────────────────────────────────

fn section_01_constant_state(
    state: &mut SceneState,
    resources: &SceneResources,
) -> Vec<BatchExpectation> {
    let start = state.quad_count();
    let owner = ShaderOwner(1);
    for id in 0..3 {
        state.set_shader(&resources.default_like, owner);
        draw(state, TestNode::new(id));
    }

    vec![BatchExpectation::new(start, 3, "s01_three_quads_one_batch").owned_by(owner)]
}

fn section_02_shader_switch(
    state: &mut SceneState,
    resources: &SceneResources,
) -> Vec<BatchExpectation> {
    let start = state.quad_count();
    let owner = ShaderOwner(2);

    state.set_shader(&resources.first_custom, owner);
    draw(state, TestNode::new(3));
    state.set_shader(&resources.second_custom, owner);
    draw(state, TestNode::new(4));

    vec![
        BatchExpectation::new(start, 1, "s02_first_shader").owned_by(owner),
        BatchExpectation::new(start + 1, 1, "s02_second_shader").owned_by(owner),
    ]
}

fn section_03_clipping(
    state: &mut SceneState,
    resources: &SceneResources,
) -> Vec<BatchExpectation> {
    let owner = ShaderOwner(3);
    state.set_shader(&resources.default_like, owner);

    // Fully clipped quad: its batch never reaches the back end.
    state.set_scissor(Some(Scissor::new(20.0, 20.0, 0.0, 16.0)));
    draw(state, TestNode::new(5));

    let start = state.quad_count();
    state.set_scissor(Some(Scissor::new(0.0, 0.0, 32.0, 32.0)));
    draw(state, TestNode::new(6));
    state.set_scissor(Some(Scissor::from([0.0, 0.0, 32.0, 32.0])));
    draw(state, TestNode::new(7));
    state.set_scissor(None);

    vec![BatchExpectation::new(start, 2, "s03_visible_clip").owned_by(owner)]
}

fn section_04_render_to_texture(
    state: &mut SceneState,
    resources: &SceneResources,
) -> (
    Vec<BatchExpectation>,
    Vec<(RenderTextureInfo, Option<TextureId>)>,
) {
    let start = state.quad_count();
    let owner = ShaderOwner(4);
    let size = TARGET_SIZE as f32;

    state.set_render_texture_info(Some(&resources.target));
    state.set_shader(&resources.default_like, owner);
    draw(
        state,
        TestNode::new(8)
            .with_texture(TARGET_SOURCE_TEXTURE)
            .with_geometry(QuadGeometry::rect(0.0, 0.0, size, size)),
    );
    state
        .finished_render_texture()
        .expect("render target is active");
    state.set_render_texture_info(None);

    (
        vec![BatchExpectation::new(start, 1, "s04_render_target").owned_by(owner)],
        vec![(resources.target.clone(), Some(TARGET_SOURCE_TEXTURE))],
    )
}

fn section_05_filter(state: &mut SceneState, resources: &SceneResources) -> Vec<FilterExpectation> {
    state
        .add_filter(&resources.blur, ShaderOwner(5), &resources.target, None)
        .expect("scene filters an unfinished frame");

    // Sections 1 to 4 closed five quad operations.
    vec![FilterExpectation::new(5, "s05_blur_after_render_target")]
}

fn section_06_after_filter(
    state: &mut SceneState,
    resources: &SceneResources,
) -> Vec<BatchExpectation> {
    let start = state.quad_count();
    let owner = ShaderOwner(6);
    state.set_shader(&resources.default_like, owner);
    draw(state, TestNode::new(9));
    draw(state, TestNode::new(10));

    vec![BatchExpectation::new(start, 2, "s06_after_filter").owned_by(owner)]
}

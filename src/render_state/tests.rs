use std::ops::Range;

use super::*;
use crate::error::RenderStateError;
use crate::node::QuadGeometry;

#[derive(Debug, Clone)]
struct Node(u64);

impl VisualNode for Node {
    fn displayed_texture(&self) -> TextureId {
        TextureId(self.0)
    }

    fn quad(&self) -> QuadGeometry {
        QuadGeometry::rect(0.0, 0.0, 10.0, 10.0)
    }
}

#[derive(Debug)]
struct Custom;

impl Shader for Custom {}

#[derive(Debug)]
struct DefaultLike;

impl Shader for DefaultLike {
    fn is_default_equivalent(&self) -> bool {
        true
    }
}

#[derive(Debug)]
struct Clearing;

impl Shader for Clearing {
    fn requires_empty_submission(&self) -> bool {
        true
    }
}

#[derive(Debug, Default)]
struct Probe {
    reusable: bool,
    added: Vec<usize>,
    reuse_queries: Vec<(usize, Option<TextureId>)>,
    finished: Vec<(Vec<Range<usize>>, Vec<usize>)>,
}

impl RenderBackend<Node> for Probe {
    fn add_quad(&mut self, frame: &FrameView<'_, Node>, index: usize) {
        assert_eq!(frame.quad_count(), index + 1);
        assert!(frame.open_operation().is_some());
        self.added.push(index);
    }

    fn is_render_texture_reusable(
        &mut self,
        _frame: &FrameView<'_, Node>,
        info: &RenderTextureInfo,
    ) -> bool {
        self.reuse_queries.push((info.offset(), info.native_texture()));
        self.reusable
    }

    fn finish_render_state(&mut self, frame: &FrameView<'_, Node>) {
        self.finished.push((
            frame
                .quad_operations()
                .iter()
                .map(QuadOperation::range)
                .collect(),
            frame
                .filter_operations()
                .iter()
                .map(FilterOperation::insertion_index)
                .collect(),
        ));
    }
}

type TestState = RenderState<Node, Probe>;

fn new_state() -> TestState {
    let mut state = RenderState::new(Probe::default());
    state.reset();
    state
}

fn shader<S: Shader + 'static>(shader: S) -> Rc<dyn Shader> {
    Rc::new(shader)
}

fn ranges(state: &TestState) -> Vec<Range<usize>> {
    state
        .quad_operations()
        .iter()
        .map(QuadOperation::range)
        .collect()
}

#[test]
fn constant_state_produces_one_batch() {
    let custom = shader(Custom);
    let mut state = new_state();

    for id in 0..5 {
        state.set_shader(&custom, ShaderOwner(1));
        state.set_scissor(None);
        state.set_render_texture_info(None);
        state.add_quad(Node(id)).unwrap();
    }
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..5]);
    assert_eq!(state.counts().batches_opened, 1);
}

#[test]
fn three_draws_make_one_batch_of_three() {
    let mut state = new_state();
    for id in 0..3 {
        assert_eq!(state.add_quad(Node(id)).unwrap(), id as usize);
    }
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..3]);
    assert_eq!(state.quad_operations()[0].length(), 3);
    assert_eq!(state.quads().textures(), &[TextureId(0), TextureId(1), TextureId(2)]);
}

#[test]
fn owner_change_splits_at_the_changed_draw() {
    let custom = shader(Custom);
    let mut state = new_state();

    for id in 0..5 {
        let owner = if id < 2 { ShaderOwner(1) } else { ShaderOwner(2) };
        state.set_shader(&custom, owner);
        state.add_quad(Node(id)).unwrap();
    }
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..2, 2..5]);
}

#[test]
fn shader_change_splits_batches() {
    let first = shader(Custom);
    let second = shader(Custom);
    let mut state = new_state();

    state.set_shader(&first, ShaderOwner(1));
    state.add_quad(Node(0)).unwrap();
    state.set_shader(&second, ShaderOwner(1));
    state.add_quad(Node(1)).unwrap();
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..1, 1..2]);
    assert!(shader_ptr_eq(state.quad_operations()[0].shader(), &first));
    assert!(shader_ptr_eq(state.quad_operations()[1].shader(), &second));
}

#[test]
fn repeating_set_shader_does_not_mark_dirty() {
    let custom = shader(Custom);
    let mut state = new_state();

    state.set_shader(&custom, ShaderOwner(1));
    state.add_quad(Node(0)).unwrap();
    assert!(!state.pending.dirty);

    state.set_shader(&custom, ShaderOwner(1));
    assert!(!state.pending.dirty);
}

#[test]
fn default_equivalent_shaders_bind_the_shared_default() {
    let a = shader(DefaultLike);
    let b = shader(DefaultLike);
    let mut state = new_state();

    state.set_shader(&a, ShaderOwner(1));
    assert!(shader_ptr_eq(state.shader(), state.default_shader()));
    state.add_quad(Node(0)).unwrap();

    state.set_shader(&b, ShaderOwner(1));
    assert!(!state.pending.dirty);
    state.add_quad(Node(1)).unwrap();
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..2]);
    assert!(shader_ptr_eq(
        state.quad_operations()[0].shader(),
        state.default_shader()
    ));
}

#[test]
fn default_shader_still_batches_per_owner() {
    let default_like = shader(DefaultLike);
    let mut state = new_state();

    state.set_shader(&default_like, ShaderOwner(1));
    state.add_quad(Node(0)).unwrap();
    state.set_shader(&default_like, ShaderOwner(2));
    state.add_quad(Node(1)).unwrap();
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..1, 1..2]);
    assert_eq!(state.quad_operations()[1].shader_owner(), Some(ShaderOwner(2)));
}

#[test]
fn custom_default_shader_option_is_used_for_substitution() {
    let custom_default = shader(DefaultLike);
    let options = RenderStateOptions {
        initial_quad_capacity: 8,
        default_shader: Some(Rc::clone(&custom_default)),
    };
    let mut state = RenderState::with_options(Probe::default(), options);
    state.reset();

    state.set_shader(&shader(DefaultLike), ShaderOwner(1));
    assert!(shader_ptr_eq(state.shader(), &custom_default));
}

#[test]
fn reverted_state_keeps_the_open_batch() {
    let first = shader(Custom);
    let second = shader(Custom);
    let mut state = new_state();

    state.set_shader(&first, ShaderOwner(1));
    state.add_quad(Node(0)).unwrap();
    state.set_shader(&second, ShaderOwner(1));
    state.set_shader(&first, ShaderOwner(1));
    assert!(state.pending.dirty);
    state.add_quad(Node(1)).unwrap();
    assert!(!state.pending.dirty);
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..2]);
}

#[test]
fn equal_scissor_rectangles_share_a_batch() {
    let mut state = new_state();

    state.set_scissor(Some(Scissor::new(0.0, 0.0, 10.0, 10.0)));
    state.add_quad(Node(0)).unwrap();
    state.set_scissor(None);
    state.set_scissor(Some(Scissor::from([0.0, 0.0, 10.0, 10.0])));
    state.add_quad(Node(1)).unwrap();
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..2]);
}

#[test]
fn scissor_change_splits_batches() {
    let mut state = new_state();

    state.add_quad(Node(0)).unwrap();
    state.set_scissor(Some(Scissor::new(0.0, 0.0, 10.0, 10.0)));
    state.add_quad(Node(1)).unwrap();
    state.set_scissor(Some(Scissor::new(0.0, 0.0, 10.0, 11.0)));
    state.add_quad(Node(2)).unwrap();
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..1, 1..2, 2..3]);
    assert_eq!(state.quad_operations()[0].scissor(), None);
}

#[test]
fn no_clip_differs_from_zero_rectangle() {
    let mut state = new_state();

    state.add_quad(Node(0)).unwrap();
    state.set_scissor(Some(Scissor::default()));
    state.add_quad(Node(1)).unwrap();
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..1]);
    assert_eq!(state.counts().batches_dropped_clipped, 1);
}

#[test]
fn zero_area_scissor_drops_its_batch() {
    let mut state = new_state();

    state.set_scissor(Some(Scissor::new(5.0, 5.0, 0.0, 0.0)));
    state.add_quad(Node(0)).unwrap();
    state.finish().unwrap();

    assert!(state.quad_operations().is_empty());
    assert_eq!(state.quad_count(), 1);
    assert_eq!(state.backend().added, vec![0]);
}

#[test]
fn zero_area_scissor_drops_batch_even_for_empty_submission_shaders() {
    let clearing = shader(Clearing);
    let mut state = new_state();

    state.set_shader(&clearing, ShaderOwner(1));
    state.set_scissor(Some(Scissor::new(0.0, 0.0, 10.0, -1.0)));
    state.add_quad(Node(0)).unwrap();
    state.finish().unwrap();

    assert!(state.quad_operations().is_empty());
}

#[test]
fn dropped_batch_keeps_quad_indices() {
    let mut state = new_state();

    state.add_quad(Node(0)).unwrap();
    state.set_scissor(Some(Scissor::new(0.0, 0.0, 0.0, 4.0)));
    state.add_quad(Node(1)).unwrap();
    state.set_scissor(None);
    state.add_quad(Node(2)).unwrap();
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..1, 2..3]);
    assert_eq!(state.quad_count(), 3);
}

#[test]
fn switching_render_target_drops_scissor_and_splits() {
    let target = RenderTextureInfo::new(32, 32);
    let mut state = new_state();

    state.set_scissor(Some(Scissor::new(0.0, 0.0, 8.0, 8.0)));
    state.add_quad(Node(0)).unwrap();
    state.set_render_texture_info(Some(&target));
    assert_eq!(state.scissor(), None);
    state.add_quad(Node(1)).unwrap();
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..1, 1..2]);
    assert_eq!(state.quad_operations()[1].render_texture(), Some(&target));
    assert_eq!(state.quad_operations()[0].render_texture(), None);
}

#[test]
fn setting_the_same_render_target_keeps_scissor() {
    let target = RenderTextureInfo::new(32, 32);
    let mut state = new_state();

    state.set_render_texture_info(Some(&target));
    state.set_scissor(Some(Scissor::new(0.0, 0.0, 8.0, 8.0)));
    state.set_render_texture_info(Some(&target.clone()));

    assert_eq!(state.scissor(), Some(Scissor::new(0.0, 0.0, 8.0, 8.0)));
}

#[test]
fn single_default_draw_becomes_reuse_candidate() {
    let target = RenderTextureInfo::new(16, 16);
    let mut state = new_state();

    state.set_render_texture_info(Some(&target));
    state.add_quad(Node(7)).unwrap();

    assert_eq!(target.native_texture(), Some(TextureId(7)));
    assert_eq!(target.offset(), 0);
    assert!(!target.is_empty());

    assert_eq!(state.finished_render_texture().unwrap(), None);
    assert_eq!(target.native_texture(), None);
    assert_eq!(state.backend().reuse_queries, vec![(0, Some(TextureId(7)))]);
    assert_eq!(state.counts().reuse_rejected, 1);
}

#[test]
fn accepted_candidate_survives_finalization() {
    let target = RenderTextureInfo::new(16, 16);
    let mut state = RenderState::new(Probe {
        reusable: true,
        ..Default::default()
    });
    state.reset();

    state.add_quad(Node(1)).unwrap();
    state.set_render_texture_info(Some(&target));
    state.add_quad(Node(7)).unwrap();

    assert_eq!(target.offset(), 1);
    assert_eq!(state.finished_render_texture().unwrap(), Some(TextureId(7)));
    assert_eq!(target.native_texture(), Some(TextureId(7)));
    assert_eq!(state.counts().reuse_confirmed, 1);
}

#[test]
fn second_draw_abandons_reuse() {
    let target = RenderTextureInfo::new(16, 16);
    let mut state = RenderState::new(Probe {
        reusable: true,
        ..Default::default()
    });
    state.reset();

    state.set_render_texture_info(Some(&target));
    state.add_quad(Node(1)).unwrap();
    state.add_quad(Node(2)).unwrap();
    assert_eq!(target.native_texture(), None);

    assert_eq!(state.finished_render_texture().unwrap(), None);
    assert!(state.backend().reuse_queries.is_empty());
}

#[test]
fn non_default_shader_is_not_reusable() {
    let custom = shader(Custom);
    let target = RenderTextureInfo::new(16, 16);
    let mut state = new_state();

    state.set_render_texture_info(Some(&target));
    state.set_shader(&custom, ShaderOwner(1));
    state.add_quad(Node(1)).unwrap();

    assert_eq!(target.native_texture(), None);
    assert!(!target.is_empty());
}

#[test]
fn default_equivalent_custom_shader_is_reusable() {
    let default_like = shader(DefaultLike);
    let target = RenderTextureInfo::new(16, 16);
    let mut state = new_state();

    state.set_render_texture_info(Some(&target));
    state.set_shader(&default_like, ShaderOwner(3));
    state.add_quad(Node(4)).unwrap();

    assert_eq!(target.native_texture(), Some(TextureId(4)));
}

#[test]
fn override_texture_replaces_node_texture() {
    let target = RenderTextureInfo::new(16, 16);
    let mut state = new_state();

    state.set_override_quad_texture(Some(TextureId(99)));
    state.set_render_texture_info(Some(&target));
    state.add_quad(Node(1)).unwrap();
    state.set_override_quad_texture(None);
    state.set_render_texture_info(None);
    state.add_quad(Node(2)).unwrap();

    assert_eq!(state.quads().textures(), &[TextureId(99), TextureId(2)]);
    assert_eq!(target.native_texture(), Some(TextureId(99)));
}

#[test]
fn finishing_render_texture_needs_an_active_target() {
    let mut state = new_state();
    assert_eq!(
        state.finished_render_texture(),
        Err(RenderStateError::NoActiveRenderTexture)
    );
}

#[test]
fn filter_closes_batch_between_draws() {
    let filter = shader(Custom);
    let source = RenderTextureInfo::new(16, 16);
    let mut state = new_state();

    state.add_quad(Node(0)).unwrap();
    state
        .add_filter(&filter, ShaderOwner(5), &source, None)
        .unwrap();
    assert!(state.open_operation().is_none());
    state.add_quad(Node(1)).unwrap();
    state.finish().unwrap();

    assert_eq!(ranges(&state), vec![0..1, 1..2]);
    let filters = state.filter_operations();
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].insertion_index(), 1);
    assert_eq!(filters[0].owner(), ShaderOwner(5));
    assert_eq!(filters[0].source(), &source);
    assert_eq!(filters[0].target(), None);
    assert_eq!(state.backend().finished, vec![(vec![0..1, 1..2], vec![1])]);
}

#[test]
fn filter_without_open_batch_records_current_count() {
    let filter = shader(Custom);
    let source = RenderTextureInfo::new(16, 16);
    let target = RenderTextureInfo::new(16, 16);
    let mut state = new_state();

    state
        .add_filter(&filter, ShaderOwner(1), &source, Some(&target))
        .unwrap();
    state
        .add_filter(&filter, ShaderOwner(1), &source, Some(&target))
        .unwrap();

    let indices: Vec<_> = state
        .filter_operations()
        .iter()
        .map(FilterOperation::insertion_index)
        .collect();
    assert_eq!(indices, vec![0, 0]);
    assert_eq!(state.filter_operations()[0].target(), Some(&target));
}

#[test]
fn back_end_sees_every_quad_and_one_finish() {
    let mut state = new_state();
    for id in 0..3 {
        state.add_quad(Node(id)).unwrap();
    }
    state.finish().unwrap();

    assert_eq!(state.backend().added, vec![0, 1, 2]);
    assert_eq!(state.backend().finished.len(), 1);
}

#[test]
fn finished_frame_rejects_work_until_reset() {
    let filter = shader(Custom);
    let source = RenderTextureInfo::new(4, 4);
    let mut state = new_state();

    state.add_quad(Node(0)).unwrap();
    state.finish().unwrap();
    assert!(state.is_finished());

    assert_eq!(state.add_quad(Node(1)), Err(RenderStateError::FrameFinished));
    assert_eq!(
        state.add_filter(&filter, ShaderOwner(1), &source, None),
        Err(RenderStateError::FrameFinished)
    );
    assert_eq!(state.finish(), Err(RenderStateError::FrameFinished));
    assert_eq!(state.quad_count(), 1);

    state.reset();
    assert!(!state.is_finished());
    assert_eq!(state.add_quad(Node(1)), Ok(0));
}

#[test]
fn reset_starts_from_a_clean_frame() {
    let custom = shader(Custom);
    let target = RenderTextureInfo::new(4, 4);
    let mut state = new_state();

    state.set_shader(&custom, ShaderOwner(1));
    state.set_render_texture_info(Some(&target));
    state.set_scissor(Some(Scissor::new(0.0, 0.0, 1.0, 1.0)));
    state.set_override_quad_texture(Some(TextureId(3)));
    state.add_quad(Node(0)).unwrap();
    state.reset();

    assert_eq!(state.quad_count(), 0);
    assert!(state.quad_operations().is_empty());
    assert!(state.filter_operations().is_empty());
    assert!(state.open_operation().is_none());
    assert!(shader_ptr_eq(state.shader(), state.default_shader()));
    assert_eq!(state.shader_owner(), None);
    assert_eq!(state.scissor(), None);
    assert_eq!(state.render_texture_info(), None);
    assert_eq!(state.override_quad_texture(), None);
    assert_eq!(state.counts(), BatchCounts::default());
}

#[test]
fn batches_tile_the_quad_list_in_order() {
    let shaders = [shader(Custom), shader(Custom), shader(DefaultLike)];
    let target = RenderTextureInfo::new(8, 8);
    let mut state = new_state();

    for id in 0..40u64 {
        let shader = &shaders[(id / 3 % 3) as usize];
        state.set_shader(shader, ShaderOwner(id / 5));
        state.set_render_texture_info((id / 7 % 2 == 1).then_some(&target));
        state.set_scissor((id % 4 == 0).then(|| Scissor::new(0.0, 0.0, 4.0, 4.0)));
        state.add_quad(Node(id)).unwrap();
    }
    state.finish().unwrap();

    let operations = state.quad_operations();
    assert_eq!(operations.first().map(QuadOperation::index), Some(0));
    for pair in operations.windows(2) {
        assert_eq!(pair[0].range().end, pair[1].index());
    }
    let covered: usize = operations.iter().map(QuadOperation::length).sum();
    assert_eq!(covered, state.quad_count());
    assert_eq!(state.counts().batches_submitted as usize, operations.len());
}

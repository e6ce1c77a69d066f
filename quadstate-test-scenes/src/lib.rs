pub mod backend;
pub mod expectations;
pub mod scene;
pub mod shaders;

pub use backend::{BackendEvent, FinishedFrame, RecordingBackend};
pub use expectations::{check_batches, check_filters, BatchExpectation, FilterExpectation};
pub use scene::{build_main_scene, new_scene_state, SceneExpectations, SceneState, TestNode};
pub use shaders::TestShader;

mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::{input_direction, InputAction, InputSnapshot};
pub use loop_runner::{run_app, AppError, LoopConfig, LoopState};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{AssetError, FrameCanvas, Renderer, SpriteStore};
pub use scene::{Canvas, Scene, SpriteHandle, SpriteLoader, Visual};

mod camera;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use camera::Camera;
pub use input::{InputAction, InputSnapshot};
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{parallax_dest_x, tile_start_x, RenderCommand, Renderer, TextureId, Viewport};
pub use scene::Scene;

use super::{InputSnapshot, RenderCommand};

/// The seam between the frame loop and gameplay. The loop drives one
/// scene per frame: `update` with the capped frame delta and the input
/// snapshot, then `camera_focus_x` to aim the follow camera, then
/// `compose_frame` to collect draw commands in back-to-front order.
pub trait Scene {
    /// Called once before the first frame.
    fn load(&mut self) {}

    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot);

    /// World-space x the camera should center on this frame.
    fn camera_focus_x(&self) -> f32;

    /// Appends this frame's draw commands. The list is cleared by the
    /// caller beforehand; ordering defines paint order.
    fn compose_frame(&self, commands: &mut Vec<RenderCommand>);
}

use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowBuilder};

use crate::{resolve_app_paths, StartupError};

use super::metrics::MetricsAccumulator;
use super::rendering::Viewport;
use super::{Camera, InputAction, MetricsHandle, RenderCommand, Renderer, Scene};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub min_window_width: u32,
    pub min_window_height: u32,
    /// Total scrollable world width; the viewport is the window's
    /// logical width.
    pub world_width: f32,
    /// Cap applied to the measured frame delta before it reaches the
    /// scene, so a stall never produces one giant integration step.
    pub max_frame_delta: Duration,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "2D Platformer Demo v0.1.0".to_string(),
            window_width: 1280,
            window_height: 720,
            min_window_width: 854,
            min_window_height: 480,
            world_width: 2560.0,
            max_frame_delta: Duration::from_millis(100),
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, scene: Box<dyn Scene>) -> Result<(), AppError> {
    let metrics_handle = MetricsHandle::default();
    run_app_with_metrics(config, scene, metrics_handle)
}

pub fn run_app_with_metrics(
    config: LoopConfig,
    mut scene: Box<dyn Scene>,
    metrics_handle: MetricsHandle,
) -> Result<(), AppError> {
    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        asset_dir = %app_paths.asset_dir.display(),
        "startup"
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    // The pixels surface borrows the window for the life of the loop.
    let window: &'static Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .with_min_inner_size(LogicalSize::new(
                config.min_window_width as f64,
                config.min_window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    ));
    let logical = Viewport {
        width: config.window_width,
        height: config.window_height,
    };
    let mut renderer =
        Renderer::new(window, app_paths.asset_dir, logical).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(100));
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let mut camera = Camera::new(config.world_width, config.window_width as f32);
    let mut input_collector = InputCollector::default();
    let mut frame_commands: Vec<RenderCommand> = Vec::new();

    scene.load();
    info!(
        world_width = config.world_width,
        viewport_width = config.window_width,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        "loop_config"
    );

    let mut last_frame_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    input_collector.mark_quit_requested();
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;
                    let dt_seconds = clamp_frame_delta(raw_frame_dt, max_frame_delta).as_secs_f32();

                    let snapshot = input_collector.snapshot_for_frame();
                    if snapshot.toggle_fullscreen_pressed() {
                        toggle_fullscreen(window);
                    }

                    scene.update(dt_seconds, &snapshot);
                    camera.update(scene.camera_focus_x());

                    frame_commands.clear();
                    scene.compose_frame(&mut frame_commands);

                    renderer.begin_frame();
                    renderer.draw_commands(&frame_commands, camera.offset_x());
                    if let Err(error) = renderer.end_frame() {
                        warn!(error = %error, "renderer_present_failed");
                        window_target.exit();
                    }

                    metrics_accumulator.record_frame(raw_frame_dt);
                    if let Some(metrics) = metrics_accumulator.maybe_snapshot(now) {
                        metrics_handle.publish(metrics);
                        window.set_title(&format_fps_title(&config.window_title, metrics.fps));
                        info!(
                            fps = metrics.fps,
                            frame_time_ms = metrics.frame_time_ms,
                            camera_offset_x = camera.offset_x(),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

fn toggle_fullscreen(window: &Window) {
    let entering = window.fullscreen().is_none();
    if entering {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    } else {
        window.set_fullscreen(None);
    }
    info!(fullscreen = entering, "fullscreen_toggled");
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    fullscreen_key_is_down: bool,
    fullscreen_toggle_pressed_edge: bool,
    action_states: super::input::ActionStates,
}

impl InputCollector {
    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    fn handle_keyboard_input(&mut self, key_event: &winit::event::KeyEvent) {
        self.update_action_state_from_key_event(key_event);
        self.handle_fullscreen_key_state(is_fullscreen_key(key_event), key_event.state);
    }

    fn update_action_state_from_key_event(&mut self, key_event: &winit::event::KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        self.update_action_state_from_physical_key(key_event.physical_key, is_pressed);
    }

    fn update_action_state_from_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        match key {
            PhysicalKey::Code(KeyCode::KeyW) | PhysicalKey::Code(KeyCode::ArrowUp) => {
                self.action_states.set(InputAction::MoveUp, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyS) | PhysicalKey::Code(KeyCode::ArrowDown) => {
                self.action_states.set(InputAction::MoveDown, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyA) | PhysicalKey::Code(KeyCode::ArrowLeft) => {
                self.action_states.set(InputAction::MoveLeft, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyD) | PhysicalKey::Code(KeyCode::ArrowRight) => {
                self.action_states.set(InputAction::MoveRight, is_pressed);
            }
            PhysicalKey::Code(KeyCode::Space) => {
                self.action_states.set(InputAction::Jump, is_pressed);
            }
            PhysicalKey::Code(KeyCode::Escape) => {
                self.action_states.set(InputAction::Quit, is_pressed);
                if is_pressed {
                    self.mark_quit_requested();
                }
            }
            _ => {}
        }
    }

    fn handle_fullscreen_key_state(&mut self, is_fullscreen: bool, state: ElementState) {
        if !is_fullscreen {
            return;
        }

        match state {
            ElementState::Pressed => {
                if !self.fullscreen_key_is_down {
                    self.fullscreen_toggle_pressed_edge = true;
                }
                self.fullscreen_key_is_down = true;
            }
            ElementState::Released => self.fullscreen_key_is_down = false,
        }
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.action_states
                .set(InputAction::Attack, state == ElementState::Pressed);
        }
    }

    fn snapshot_for_frame(&mut self) -> super::InputSnapshot {
        let snapshot = super::InputSnapshot::new(
            self.quit_requested,
            self.fullscreen_toggle_pressed_edge,
            self.action_states,
        );
        self.fullscreen_toggle_pressed_edge = false;
        snapshot
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn format_fps_title(base_title: &str, fps: f32) -> String {
    format!("{base_title} | FPS: {:.0}", fps)
}

fn is_fullscreen_key(key_event: &winit::event::KeyEvent) -> bool {
    matches!(key_event.physical_key, PhysicalKey::Code(KeyCode::F11))
}

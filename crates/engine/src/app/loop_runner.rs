use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::motion::Vec2;
use crate::time::{FrameClock, TickTime, DEFAULT_MAX_FRAME_DELTA};
use crate::{resolve_app_paths, StartupError};

use super::input::ActionStates;
use super::metrics::MetricsAccumulator;
use super::{
    AssetError, Canvas, InputAction, InputSnapshot, Renderer, Scene, SpriteLoader, SpriteStore,
};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub background_color: [u8; 4],
    pub max_frame_delta: Duration,
    pub metrics_log_interval: Duration,
    pub max_render_fps: Option<u32>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Starfield".to_string(),
            window_width: 1280,
            window_height: 720,
            background_color: [15, 10, 25, 255],
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            metrics_log_interval: Duration::from_secs(1),
            max_render_fps: Some(60),
        }
    }
}

impl LoopConfig {
    /// Extents the scene simulates and clamps in.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.window_width as f32, self.window_height as f32)
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
    #[error("failed to load scene resources: {0}")]
    LoadScene(#[from] AssetError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Opens the window, builds the scene once its sprites can be loaded, and
/// drives it until the window closes or Escape is pressed.
///
/// `build_scene` runs after the renderer exists; any asset failure aborts
/// startup before the first tick.
pub fn run_app<S, F>(config: LoopConfig, build_scene: F) -> Result<(), AppError>
where
    S: Scene + 'static,
    F: FnOnce(&mut dyn SpriteLoader) -> Result<S, AssetError>,
{
    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        sprites_dir = %app_paths.sprites_dir.display(),
        "startup"
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(
        Arc::clone(&window),
        SpriteStore::new(app_paths.sprites_dir.clone()),
        (config.window_width, config.window_height),
        config.background_color,
    )
    .map_err(AppError::CreateRenderer)?;

    let mut scene = build_scene(renderer.sprites_mut())?;
    info!(entity_count = scene.entity_count(), "scene_loaded");

    event_loop.set_control_flow(ControlFlow::Poll);

    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);
    let started_at = Instant::now();
    let mut clock = FrameClock::new(started_at, config.max_frame_delta);
    info!(
        window_width = config.window_width,
        window_height = config.window_height,
        max_frame_delta_ms = clock.max_frame_delta().as_millis() as u64,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let mut input_collector = InputCollector::default();
    let mut loop_state = LoopState::Running;
    let mut last_frame_instant = started_at;
    let mut last_present_instant = started_at;
    let mut metrics_accumulator = MetricsAccumulator::new(started_at, metrics_log_interval);

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    input_collector.mark_quit_requested();
                    loop_state = LoopState::Terminated;
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize_surface(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        loop_state = LoopState::Terminated;
                        window_target.exit();
                    }
                }
                WindowEvent::Focused(false) => {
                    input_collector.release_all();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let is_pressed = event.state == ElementState::Pressed;
                    input_collector.update_action_state_from_physical_key(
                        event.physical_key,
                        is_pressed,
                    );
                }
                WindowEvent::RedrawRequested if loop_state == LoopState::Running => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    let tick = clock.tick(now);
                    let input = input_collector.snapshot_for_tick();
                    {
                        let mut canvas = renderer.begin_frame();
                        loop_state = step_scene(&mut scene, tick, &input, &mut canvas);
                    }

                    // Single authoritative FPS cap sleep point for render pacing.
                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep =
                        compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    if let Err(error) = renderer.end_frame() {
                        warn!(error = %error, "renderer_draw_failed");
                        loop_state = LoopState::Terminated;
                    }
                    last_present_instant = Instant::now();
                    metrics_accumulator.record_frame(raw_frame_dt);

                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            frame_time_ms = snapshot.frame_time_ms,
                            max_frame_time_ms = snapshot.max_frame_time_ms,
                            entity_count = scene.entity_count(),
                            "loop_metrics"
                        );
                    }

                    if loop_state == LoopState::Terminated {
                        let reason = if input.quit_requested() {
                            "quit_input"
                        } else {
                            "render_failure"
                        };
                        info!(reason, "shutdown_requested");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if loop_state == LoopState::Running {
                    window.request_redraw();
                }
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// One tick after timing and input are sampled: update, draw, then check for termination.
fn step_scene<S: Scene + ?Sized>(
    scene: &mut S,
    tick: TickTime,
    input: &InputSnapshot,
    canvas: &mut dyn Canvas,
) -> LoopState {
    scene.update(tick, input);
    scene.render(canvas);
    if input.quit_requested() {
        LoopState::Terminated
    } else {
        LoopState::Running
    }
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    held: ActionStates,
    pressed: ActionStates,
}

impl InputCollector {
    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::new(self.quit_requested, self.held, self.pressed);
        self.pressed.clear();
        snapshot
    }

    fn release_all(&mut self) {
        self.held.clear();
    }

    fn update_action_state_from_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        let Some(action) = action_for_key(key) else {
            return;
        };
        if is_pressed && !self.held.is_down(action) {
            self.pressed.set(action, true);
        }
        self.held.set(action, is_pressed);
        if action == InputAction::Quit && is_pressed {
            self.mark_quit_requested();
        }
    }
}

fn action_for_key(key: PhysicalKey) -> Option<InputAction> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(InputAction::MoveUp),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(InputAction::MoveDown),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(InputAction::MoveLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(InputAction::MoveRight),
        KeyCode::Space => Some(InputAction::Fire),
        KeyCode::Escape => Some(InputAction::Quit),
        _ => None,
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SpriteHandle;

    #[derive(Default)]
    struct RecordingScene {
        log: Vec<&'static str>,
        last_dt: Option<f32>,
    }

    impl Scene for RecordingScene {
        fn update(&mut self, tick: TickTime, _input: &InputSnapshot) {
            self.log.push("update");
            self.last_dt = Some(tick.dt);
        }

        fn render(&self, canvas: &mut dyn Canvas) {
            canvas.draw_sprite(SpriteHandle(0), Vec2::ZERO, 1.0);
        }
    }

    #[derive(Default)]
    struct CountingCanvas {
        draws: usize,
    }

    impl Canvas for CountingCanvas {
        fn draw_sprite(&mut self, _handle: SpriteHandle, _top_left: Vec2, _scale: f32) {
            self.draws += 1;
        }

        fn draw_text(&mut self, _text: &str, _top_left: Vec2, _size: u32, _color: [u8; 4]) {
            self.draws += 1;
        }
    }

    fn press(input: &mut InputCollector, code: KeyCode) {
        input.update_action_state_from_physical_key(PhysicalKey::Code(code), true);
    }

    fn release(input: &mut InputCollector, code: KeyCode) {
        input.update_action_state_from_physical_key(PhysicalKey::Code(code), false);
    }

    #[test]
    fn step_scene_updates_then_renders_and_keeps_running() {
        let mut scene = RecordingScene::default();
        let mut canvas = CountingCanvas::default();

        let state = step_scene(
            &mut scene,
            TickTime::new(Duration::from_millis(16), 0.016),
            &InputSnapshot::empty(),
            &mut canvas,
        );

        assert_eq!(state, LoopState::Running);
        assert_eq!(scene.log, vec!["update"]);
        assert_eq!(scene.last_dt, Some(0.016));
        assert_eq!(canvas.draws, 1);
    }

    #[test]
    fn quit_request_terminates_after_the_frame_is_drawn() {
        let mut scene = RecordingScene::default();
        let mut canvas = CountingCanvas::default();
        let input = InputSnapshot::empty().with_quit_requested(true);

        let state = step_scene(&mut scene, TickTime::default(), &input, &mut canvas);

        assert_eq!(state, LoopState::Terminated);
        assert_eq!(canvas.draws, 1);
    }

    #[test]
    fn fire_press_is_edge_triggered_for_single_tick() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::Space);

        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();

        assert!(first.was_pressed(InputAction::Fire));
        assert!(!second.was_pressed(InputAction::Fire));
        assert!(second.is_down(InputAction::Fire));
    }

    #[test]
    fn held_key_repeat_does_not_spam_press_edges() {
        let mut input = InputCollector::default();

        press(&mut input, KeyCode::Space);
        let first = input.snapshot_for_tick();
        press(&mut input, KeyCode::Space);
        let second = input.snapshot_for_tick();
        release(&mut input, KeyCode::Space);
        press(&mut input, KeyCode::Space);
        let third = input.snapshot_for_tick();

        assert!(first.was_pressed(InputAction::Fire));
        assert!(!second.was_pressed(InputAction::Fire));
        assert!(third.was_pressed(InputAction::Fire));
    }

    #[test]
    fn press_and_release_within_one_tick_still_reports_edge() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::Space);
        release(&mut input, KeyCode::Space);

        let snapshot = input.snapshot_for_tick();

        assert!(snapshot.was_pressed(InputAction::Fire));
        assert!(!snapshot.is_down(InputAction::Fire));
    }

    #[test]
    fn wasd_and_arrow_keys_map_to_actions() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::ArrowLeft);
        press(&mut input, KeyCode::KeyS);
        press(&mut input, KeyCode::ArrowRight);

        let snapshot = input.snapshot_for_tick();

        assert!(snapshot.is_down(InputAction::MoveUp));
        assert!(snapshot.is_down(InputAction::MoveLeft));
        assert!(snapshot.is_down(InputAction::MoveDown));
        assert!(snapshot.is_down(InputAction::MoveRight));
    }

    #[test]
    fn key_release_clears_action_state() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::KeyD);
        release(&mut input, KeyCode::KeyD);

        let snapshot = input.snapshot_for_tick();
        assert!(!snapshot.is_down(InputAction::MoveRight));
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::KeyA);
        input.snapshot_for_tick();

        input.release_all();

        assert!(!input.snapshot_for_tick().is_down(InputAction::MoveLeft));
    }

    #[test]
    fn escape_requests_quit() {
        let mut input = InputCollector::default();
        assert!(!input.snapshot_for_tick().quit_requested());

        press(&mut input, KeyCode::Escape);

        assert!(input.snapshot_for_tick().quit_requested());
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::KeyQ);

        let snapshot = input.snapshot_for_tick();
        for action in [
            InputAction::MoveUp,
            InputAction::MoveDown,
            InputAction::MoveLeft,
            InputAction::MoveRight,
            InputAction::Fire,
            InputAction::Quit,
        ] {
            assert!(!snapshot.is_down(action));
        }
    }

    #[test]
    fn world_size_matches_window_extents() {
        let config = LoopConfig {
            window_width: 800,
            window_height: 600,
            ..LoopConfig::default()
        };
        assert_eq!(config.world_size(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn target_frame_duration_none_when_cap_off() {
        assert_eq!(target_frame_duration(None), None);
    }

    #[test]
    fn target_frame_duration_for_60hz_is_expected() {
        let duration = target_frame_duration(Some(60)).expect("duration");
        assert!((duration.as_secs_f64() - (1.0 / 60.0)).abs() < 0.000_001);
    }

    #[test]
    fn compute_cap_sleep_zero_when_over_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(20), target_frame_duration(Some(60)));
        assert_eq!(sleep, Duration::ZERO);
    }

    #[test]
    fn compute_cap_sleep_positive_when_under_budget() {
        let sleep = compute_cap_sleep(Duration::from_millis(5), target_frame_duration(Some(60)));
        assert!(sleep > Duration::ZERO);
    }

    #[test]
    fn normalize_render_fps_cap_disables_zero() {
        assert_eq!(normalize_render_fps_cap(Some(0)), None);
        assert_eq!(normalize_render_fps_cap(Some(60)), Some(60));
    }

    #[test]
    fn zero_metrics_interval_falls_back() {
        assert_eq!(
            normalize_non_zero_duration(Duration::ZERO, Duration::from_secs(1)),
            Duration::from_secs(1)
        );
    }
}

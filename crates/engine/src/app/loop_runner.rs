use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::display::Display;
use super::geometry::Point;
use super::input::{InputEvent, Key, MouseButton, PointerState};
use super::metrics::FrameMetrics;
use super::rendering::{Canvas, Presenter};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub max_frame_delta: Duration,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Frontier".to_string(),
            window_width: 1280,
            window_height: 720,
            target_fps: 60,
            max_frame_delta: Duration::from_millis(250),
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub dt_seconds: f32,
    pub events: &'a [InputEvent],
    pub pointer: PointerState,
}

/// Per-frame callbacks driven by [`run_app`]. `frame` always runs before `draw`.
pub trait App {
    fn frame(&mut self, input: FrameInput<'_>, display: &mut Display) -> FrameControl;

    fn draw(&self, canvas: &mut Canvas);

    fn shutdown(&mut self, _display: &mut Display) {}
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize presenter: {0}")]
    CreatePresenter(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app<A: App>(config: LoopConfig, mut app: A) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut display = Display::new(config.window_width, config.window_height);
    let mut canvas = Canvas::new(config.window_width, config.window_height);
    let mut presenter = Presenter::new(Arc::clone(&window), display.resolution())
        .map_err(AppError::CreatePresenter)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let frame_target = target_frame_duration(normalize_fps_cap(config.target_fps));
    info!(
        width = config.window_width,
        height = config.window_height,
        target_fps = config.target_fps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        "loop_config"
    );

    let mut input_collector = InputCollector::default();
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics = FrameMetrics::new(metrics_log_interval);
    let mut shut_down = false;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    input_collector.push_quit_requested();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    if let Err(error) = presenter.rebuild_surface() {
                        warn!(error = %error, "presenter_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let (x, y) = presenter.window_to_buffer(position.x as f32, position.y as f32);
                    input_collector.set_cursor_position(Point::new(x, y));
                }
                WindowEvent::CursorLeft { .. } => {
                    input_collector.clear_cursor_position();
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_key(
                        event.physical_key,
                        event.state,
                        event.text.as_ref().map(|text| text.as_str()),
                    );
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;
                    let frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);

                    let events = input_collector.drain_events();
                    let control = app.frame(
                        FrameInput {
                            dt_seconds: frame_dt.as_secs_f32(),
                            events: &events,
                            pointer: input_collector.pointer(),
                        },
                        &mut display,
                    );
                    if control == FrameControl::Quit {
                        info!(reason = "app_quit", "shutdown_requested");
                        window_target.exit();
                        return;
                    }

                    if let Some((width, height)) = display.take_resize_request() {
                        let _ = window
                            .request_inner_size(LogicalSize::new(width as f64, height as f64));
                        canvas.resize(width, height);
                        if let Err(error) = presenter.set_buffer_size((width, height)) {
                            warn!(error = %error, "presenter_resize_failed");
                            window_target.exit();
                            return;
                        }
                        info!(width, height, "display_resolution_changed");
                    }

                    app.draw(&mut canvas);

                    // Single FPS cap sleep point.
                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep = compute_cap_sleep(elapsed_since_last_present, frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    if let Err(error) = presenter.present(&canvas) {
                        warn!(error = %error, "presenter_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();
                    metrics.record_frame(raw_frame_dt);

                    if let Some(snapshot) = metrics.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            frame_time_ms = snapshot.frame_time_ms,
                            worst_frame_ms = snapshot.worst_frame_ms,
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
                if !shut_down {
                    shut_down = true;
                    app.shutdown(&mut display);
                    info!("shutdown");
                }
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    events: Vec<InputEvent>,
    pointer: PointerState,
    escape_is_down: bool,
}

impl InputCollector {
    fn push_quit_requested(&mut self) {
        self.events.push(InputEvent::QuitRequested);
    }

    fn pointer(&self) -> PointerState {
        self.pointer
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_cursor_position(&mut self, position: Point) {
        self.pointer.position = Some(position);
        self.events.push(InputEvent::PointerMoved(position));
    }

    fn clear_cursor_position(&mut self) {
        self.pointer.position = None;
    }

    fn handle_mouse_input(&mut self, button: WinitMouseButton, state: ElementState) {
        let Some(button) = map_mouse_button(button) else {
            return;
        };
        let pressed = state == ElementState::Pressed;
        if button == MouseButton::Primary {
            self.pointer.primary_down = pressed;
        }
        let Some(position) = self.pointer.position else {
            return;
        };
        self.events.push(if pressed {
            InputEvent::PointerPressed { button, position }
        } else {
            InputEvent::PointerReleased { button, position }
        });
    }

    fn handle_key(&mut self, key: PhysicalKey, state: ElementState, text: Option<&str>) {
        if key == PhysicalKey::Code(KeyCode::Escape) {
            match state {
                ElementState::Pressed => {
                    if !self.escape_is_down {
                        self.events.push(InputEvent::KeyPressed(Key::Escape));
                    }
                    self.escape_is_down = true;
                }
                ElementState::Released => self.escape_is_down = false,
            }
            return;
        }
        if state != ElementState::Pressed {
            return;
        }
        match key {
            PhysicalKey::Code(KeyCode::Enter) | PhysicalKey::Code(KeyCode::NumpadEnter) => {
                self.events.push(InputEvent::KeyPressed(Key::Enter));
            }
            PhysicalKey::Code(KeyCode::Backspace) => {
                self.events.push(InputEvent::KeyPressed(Key::Backspace));
            }
            _ => {
                if let Some(text) = text {
                    self.events.extend(
                        text.chars()
                            .filter(|ch| !ch.is_control())
                            .map(InputEvent::TextEntered),
                    );
                }
            }
        }
    }
}

fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Primary),
        WinitMouseButton::Right => Some(MouseButton::Secondary),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
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

fn normalize_fps_cap(cap: u32) -> Option<u32> {
    Some(cap).filter(|value| *value > 0)
}

fn target_frame_duration(max_fps: Option<u32>) -> Option<Duration> {
    max_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector_at(x: i32, y: i32) -> InputCollector {
        let mut input = InputCollector::default();
        input.set_cursor_position(Point::new(x, y));
        input.drain_events();
        input
    }

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        let raw_frame_dt = Duration::from_millis(600);

        assert_eq!(
            clamp_frame_delta(raw_frame_dt, max_frame_delta),
            max_frame_delta
        );
    }

    #[test]
    fn target_frame_duration_none_when_cap_off() {
        assert_eq!(target_frame_duration(normalize_fps_cap(0)), None);
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
    fn primary_click_queues_press_then_release_at_cursor() {
        let mut input = collector_at(10, 20);

        input.handle_mouse_input(WinitMouseButton::Left, ElementState::Pressed);
        assert!(input.pointer().primary_down);
        input.handle_mouse_input(WinitMouseButton::Left, ElementState::Released);
        assert!(!input.pointer().primary_down);

        let at = Point::new(10, 20);
        assert_eq!(
            input.drain_events(),
            vec![
                InputEvent::PointerPressed {
                    button: MouseButton::Primary,
                    position: at
                },
                InputEvent::PointerReleased {
                    button: MouseButton::Primary,
                    position: at
                },
            ]
        );
        assert!(input.drain_events().is_empty());
    }

    #[test]
    fn release_outside_window_updates_state_without_event() {
        let mut input = collector_at(5, 5);
        input.handle_mouse_input(WinitMouseButton::Left, ElementState::Pressed);
        input.clear_cursor_position();
        input.handle_mouse_input(WinitMouseButton::Left, ElementState::Released);

        assert!(!input.pointer().primary_down);
        assert_eq!(input.drain_events().len(), 1);
    }

    #[test]
    fn held_escape_is_edge_triggered() {
        let mut input = InputCollector::default();
        let escape = PhysicalKey::Code(KeyCode::Escape);

        input.handle_key(escape, ElementState::Pressed, None);
        input.handle_key(escape, ElementState::Pressed, None);
        assert_eq!(
            input.drain_events(),
            vec![InputEvent::KeyPressed(Key::Escape)]
        );

        input.handle_key(escape, ElementState::Released, None);
        input.handle_key(escape, ElementState::Pressed, None);
        assert_eq!(
            input.drain_events(),
            vec![InputEvent::KeyPressed(Key::Escape)]
        );
    }

    #[test]
    fn enter_and_backspace_do_not_leak_text() {
        let mut input = InputCollector::default();
        input.handle_key(
            PhysicalKey::Code(KeyCode::Enter),
            ElementState::Pressed,
            Some("\r"),
        );
        input.handle_key(
            PhysicalKey::Code(KeyCode::Backspace),
            ElementState::Pressed,
            Some("\u{8}"),
        );

        assert_eq!(
            input.drain_events(),
            vec![
                InputEvent::KeyPressed(Key::Enter),
                InputEvent::KeyPressed(Key::Backspace)
            ]
        );
    }

    #[test]
    fn printable_text_becomes_text_events_and_controls_are_dropped() {
        let mut input = InputCollector::default();
        input.handle_key(
            PhysicalKey::Code(KeyCode::KeyA),
            ElementState::Pressed,
            Some("a"),
        );
        input.handle_key(
            PhysicalKey::Code(KeyCode::Tab),
            ElementState::Pressed,
            Some("\t"),
        );
        input.handle_key(
            PhysicalKey::Code(KeyCode::KeyB),
            ElementState::Released,
            Some("b"),
        );

        assert_eq!(input.drain_events(), vec![InputEvent::TextEntered('a')]);
    }
}

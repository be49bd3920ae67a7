#![deny(clippy::all)]
#![forbid(unsafe_code)]

use cave_grid::{Grid, StateHistory};
use log::{debug, error};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Window, WindowId};

const WINDOW_TITLE: &str = "Cellular Automaton";
const MIN_WINDOW_SIDE: u32 = 600;
const BACKGROUND_COLOR: Color = Color::WHITE;
const LIVE_COLOR: [u8; 4] = [0x80, 0x80, 0x80, 0xff];
const DEAD_COLOR: [u8; 4] = [0x00, 0x00, 0x40, 0xff];
const MIN_HOLD_TIME: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playback {
    pub frame_interval: Duration,
    /// How long the last generation stays up before looping back to the first.
    pub repeat_delay: Duration,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(180),
            repeat_delay: Duration::from_millis(2000),
        }
    }
}

/// Which generation is on screen, and how long it stays there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackCursor {
    frame: usize,
    num_frames: usize,
    playback: Playback,
}

impl PlaybackCursor {
    pub fn new(num_frames: usize, playback: Playback) -> Self {
        assert!(num_frames > 0);
        Self {
            frame: 0,
            num_frames,
            playback,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Never shorter than `MIN_HOLD_TIME`, so the wakeup time always moves
    /// forward.
    pub fn hold_time(&self) -> Duration {
        let hold_time = if self.frame + 1 == self.num_frames {
            self.playback.repeat_delay
        } else {
            self.playback.frame_interval
        };
        hold_time.max(MIN_HOLD_TIME)
    }

    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % self.num_frames;
    }
}

pub fn cell_color_rgba(alive: bool) -> [u8; 4] {
    if alive { LIVE_COLOR } else { DEAD_COLOR }
}

/// Side of the pixel buffer for a grid, if it fits the buffer's `u32` sizes.
pub fn pixel_dimension(dimension: usize) -> Option<u32> {
    u32::try_from(dimension).ok()
}

/// Opens a window and loops over the generations of `history` until the
/// window is closed.
pub fn animate(history: StateHistory, playback: Playback) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut AppEventHandler::new(history, playback))
}

struct App {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    cursor: PlaybackCursor,
    next_update: Instant,
}

impl App {
    fn new(event_loop: &ActiveEventLoop, history: &StateHistory, playback: Playback) -> Option<Self> {
        let Some(dimension) = pixel_dimension(history.dimension()) else {
            error!("grid dimension {} too large to display", history.dimension());
            return None;
        };
        let window = match Self::build_window(event_loop, dimension) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("create window: {err}");
                return None;
            }
        };
        let pixels = match Self::build_pixels(&window, dimension) {
            Ok(pixels) => pixels,
            Err(err) => {
                error!("create pixel buffer: {err}");
                return None;
            }
        };
        let cursor = PlaybackCursor::new(history.len(), playback);
        Some(Self {
            window,
            pixels,
            next_update: Instant::now() + cursor.hold_time(),
            cursor,
        })
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        dimension: u32,
    ) -> Result<Window, winit::error::OsError> {
        let scale = MIN_WINDOW_SIDE.div_ceil(dimension).max(1);
        let side = dimension * scale;
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_inner_size(LogicalSize::new(side, side))
            .with_visible(false);
        event_loop.create_window(window_attributes)
    }

    fn build_pixels(window: &Arc<Window>, dimension: u32) -> Result<Pixels<'static>, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(dimension, dimension, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) {
        self.cursor.advance();
        debug!("showing generation {}", self.cursor.frame());
        self.window.request_redraw();

        while self.next_update < Instant::now() {
            self.next_update += self.cursor.hold_time();
        }
    }

    fn on_redraw(&mut self, grid: &Grid) -> Result<(), pixels::Error> {
        let screen = self.pixels.frame_mut();
        debug_assert_eq!(screen.len(), 4 * grid.num_cells());

        for (&alive, pixel) in grid.cells_iter().zip(screen.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&cell_color_rgba(alive));
        }
        self.pixels.render()
    }
}

struct AppEventHandler {
    history: StateHistory,
    playback: Playback,
    app: Option<App>,
}

impl AppEventHandler {
    fn new(history: StateHistory, playback: Playback) -> Self {
        Self {
            history,
            playback,
            app: None,
        }
    }
}

impl ApplicationHandler for AppEventHandler {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
        {
            app.on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            match App::new(event_loop, &self.history, self.playback) {
                Some(mut app) => {
                    app.on_create();
                    self.app = Some(app);
                }
                None => event_loop.exit(),
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                    event_loop.exit();
                }
                _ => (),
            },
            WindowEvent::Resized(size) => {
                if let Some(app) = self.app.as_mut()
                    && let Err(err) = app.pixels.resize_surface(size.width, size.height)
                {
                    error!("resize surface: {err}");
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(app) = self.app.as_mut() {
                    let grid = &self.history[app.cursor.frame()];
                    if let Err(err) = app.on_redraw(grid) {
                        error!("render: {err}");
                        event_loop.exit();
                    }
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playback() -> Playback {
        Playback {
            frame_interval: Duration::from_millis(10),
            repeat_delay: Duration::from_millis(100),
        }
    }

    #[test]
    fn cursor_walks_frames_in_order_then_loops() {
        let mut cursor = PlaybackCursor::new(3, playback());
        let mut frames = vec![cursor.frame()];
        for _ in 0..4 {
            cursor.advance();
            frames.push(cursor.frame());
        }
        assert_eq!(frames, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn last_frame_holds_for_repeat_delay() {
        let mut cursor = PlaybackCursor::new(2, playback());
        assert_eq!(cursor.hold_time(), Duration::from_millis(10));
        cursor.advance();
        assert_eq!(cursor.hold_time(), Duration::from_millis(100));
    }

    #[test]
    fn single_frame_always_waits_repeat_delay() {
        let mut cursor = PlaybackCursor::new(1, playback());
        cursor.advance();
        assert_eq!(cursor.frame(), 0);
        assert_eq!(cursor.hold_time(), Duration::from_millis(100));
    }

    #[test]
    fn zero_durations_still_advance_the_clock() {
        let playback = Playback {
            frame_interval: Duration::ZERO,
            repeat_delay: Duration::ZERO,
        };
        let mut cursor = PlaybackCursor::new(3, playback);
        for _ in 0..3 {
            assert!(cursor.hold_time() > Duration::ZERO);
            cursor.advance();
        }
    }

    #[test]
    fn oversized_grids_have_no_pixel_dimension() {
        assert_eq!(pixel_dimension(100), Some(100));
        assert_eq!(pixel_dimension(u32::MAX as usize), Some(u32::MAX));
        assert_eq!(pixel_dimension(u32::MAX as usize + 1), None);
    }

    #[test]
    fn live_and_dead_cells_differ() {
        assert_ne!(cell_color_rgba(true), cell_color_rgba(false));
        assert_eq!(cell_color_rgba(true)[3], 0xff);
        assert_eq!(cell_color_rgba(false)[3], 0xff);
    }
}

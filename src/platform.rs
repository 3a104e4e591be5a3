//! Seams to the outside world: time, buttons and pixels.
//!
//! The simulation never touches a device directly.  The terminal driver
//! supplies real implementations; the ones here serve headless runs and tests.

use std::convert::Infallible;
use std::time::Instant;

use crate::compute::GameOverSummary;
use crate::entities::{Circle, Triangle};

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Monotonically non-decreasing millisecond counter.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Milliseconds since construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: start_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

pub trait InputSource {
    fn move_up(&mut self) -> bool;
    fn move_down(&mut self) -> bool;
}

/// One tick's worth of button state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
}

impl InputSource for TickInput {
    fn move_up(&mut self) -> bool {
        self.up
    }

    fn move_down(&mut self) -> bool {
        self.down
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Drawing primitives.  One `clear_frame`/`present_frame` pair brackets
/// every tick.
pub trait Renderer {
    type Error;

    fn clear_frame(&mut self) -> Result<(), Self::Error>;
    fn draw_circle(&mut self, circle: Circle) -> Result<(), Self::Error>;
    fn draw_triangle(&mut self, triangle: Triangle) -> Result<(), Self::Error>;
    fn draw_game_over(&mut self, summary: &GameOverSummary) -> Result<(), Self::Error>;
    fn present_frame(&mut self) -> Result<(), Self::Error>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Clear,
    Circle(Circle),
    Triangle(Triangle),
    GameOver(GameOverSummary),
    Present,
}

/// Headless renderer that keeps the commands of the most recent frame.
#[derive(Clone, Debug, Default)]
pub struct FrameRecorder {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the last presented frame, `Clear` through `Present`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.last_frame.iter().filter_map(|c| match c {
            DrawCommand::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn game_over(&self) -> Option<&GameOverSummary> {
        self.last_frame.iter().find_map(|c| match c {
            DrawCommand::GameOver(summary) => Some(summary),
            _ => None,
        })
    }
}

impl Renderer for FrameRecorder {
    type Error = Infallible;

    fn clear_frame(&mut self) -> Result<(), Infallible> {
        self.pending.clear();
        self.pending.push(DrawCommand::Clear);
        Ok(())
    }

    fn draw_circle(&mut self, circle: Circle) -> Result<(), Infallible> {
        self.pending.push(DrawCommand::Circle(circle));
        Ok(())
    }

    fn draw_triangle(&mut self, triangle: Triangle) -> Result<(), Infallible> {
        self.pending.push(DrawCommand::Triangle(triangle));
        Ok(())
    }

    fn draw_game_over(&mut self, summary: &GameOverSummary) -> Result<(), Infallible> {
        self.pending.push(DrawCommand::GameOver(summary.clone()));
        Ok(())
    }

    fn present_frame(&mut self) -> Result<(), Infallible> {
        self.pending.push(DrawCommand::Present);
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
        Ok(())
    }
}

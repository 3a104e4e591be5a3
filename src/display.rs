//! Rendering layer — all terminal I/O lives here.
//!
//! The playfield is rasterised into a character grid scaled to the terminal,
//! then written out row by row on `present_frame`.  No game logic is
//! performed; this module only translates draw calls into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use side_shooter::config::FieldConfig;
use side_shooter::entities::{Circle, Point, Triangle};
use side_shooter::platform::Renderer;
use side_shooter::GameOverSummary;

// ── Palette ───────────────────────────────────────────────────────────────────

const C_FIELD: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;

const CH_EMPTY: char = ' ';
const CH_CIRCLE: char = '●';
const CH_POINT: char = '•';
const CH_SHIP: char = '◆';

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    field_w: i32,
    field_h: i32,
    cols: u16,
    rows: u16,
    canvas: Vec<char>,
    /// Rows holding game-over text, drawn in `C_GAME_OVER`.
    banner_rows: Vec<u16>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, field: &FieldConfig, cols: u16, rows: u16) -> Self {
        let mut renderer = Self {
            out,
            field_w: field.width.max(1),
            field_h: field.height.max(1),
            cols: 0,
            rows: 0,
            canvas: Vec::new(),
            banner_rows: Vec::new(),
        };
        renderer.resize(cols, rows);
        renderer
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.canvas = vec![CH_EMPTY; self.cols as usize * self.rows as usize];
    }

    /// Field pixel → terminal cell, `None` when off-screen.
    fn cell(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.field_w || p.y >= self.field_h {
            return None;
        }
        let col = (p.x as i64 * self.cols as i64 / self.field_w as i64) as usize;
        let row = (p.y as i64 * self.rows as i64 / self.field_h as i64) as usize;
        Some(row * self.cols as usize + col)
    }

    fn plot(&mut self, p: Point, ch: char) {
        if let Some(i) = self.cell(p) {
            self.canvas[i] = ch;
        }
    }

    fn write_centered(&mut self, row: u16, text: &str) {
        if row >= self.rows {
            return;
        }
        let len = text.chars().count() as u16;
        let start = (self.cols.saturating_sub(len) / 2) as usize;
        let base = row as usize * self.cols as usize;
        for (i, ch) in text.chars().enumerate().take(self.cols as usize - start) {
            self.canvas[base + start + i] = ch;
        }
        self.banner_rows.push(row);
    }
}

/// Sign of the cross product (b - a) × (p - a).
fn edge(a: Point, b: Point, p: Point) -> i64 {
    (b.x as i64 - a.x as i64) * (p.y as i64 - a.y as i64)
        - (b.y as i64 - a.y as i64) * (p.x as i64 - a.x as i64)
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = std::io::Error;

    fn clear_frame(&mut self) -> std::io::Result<()> {
        self.canvas.fill(CH_EMPTY);
        self.banner_rows.clear();
        Ok(())
    }

    fn draw_circle(&mut self, circle: Circle) -> std::io::Result<()> {
        let Circle { center, radius } = circle;
        if radius == 0 {
            self.plot(center, CH_POINT);
            return Ok(());
        }
        let r2 = radius as i64 * radius as i64;
        for y in center.y - radius..=center.y + radius {
            for x in center.x - radius..=center.x + radius {
                let dx = (x - center.x) as i64;
                let dy = (y - center.y) as i64;
                if dx * dx + dy * dy <= r2 {
                    self.plot(Point::new(x, y), CH_CIRCLE);
                }
            }
        }
        Ok(())
    }

    fn draw_triangle(&mut self, t: Triangle) -> std::io::Result<()> {
        let min_x = t.apex.x.min(t.base_top.x).min(t.base_bottom.x);
        let max_x = t.apex.x.max(t.base_top.x).max(t.base_bottom.x);
        let min_y = t.apex.y.min(t.base_top.y).min(t.base_bottom.y);
        let max_y = t.apex.y.max(t.base_top.y).max(t.base_bottom.y);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Point::new(x, y);
                let e0 = edge(t.apex, t.base_top, p);
                let e1 = edge(t.base_top, t.base_bottom, p);
                let e2 = edge(t.base_bottom, t.apex, p);
                let inside = (e0 >= 0 && e1 >= 0 && e2 >= 0) || (e0 <= 0 && e1 <= 0 && e2 <= 0);
                if inside {
                    self.plot(p, CH_SHIP);
                }
            }
        }
        Ok(())
    }

    fn draw_game_over(&mut self, summary: &GameOverSummary) -> std::io::Result<()> {
        let mid = self.rows / 2;
        let top = mid.saturating_sub(2);
        self.write_centered(top, summary.title);
        self.write_centered(top + 1, &format!("Score: {}", summary.score));
        self.write_centered(top + 2, &format!("Best:  {}", summary.best_score));
        self.write_centered(top + 3, &format!("Restart in {}s", summary.remaining_secs));
        Ok(())
    }

    fn present_frame(&mut self) -> std::io::Result<()> {
        let cols = self.cols as usize;
        for row in 0..self.rows {
            let start = row as usize * cols;
            let line: String = self.canvas[start..start + cols].iter().collect();
            let color = if self.banner_rows.contains(&row) {
                C_GAME_OVER
            } else {
                C_FIELD
            };
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(style::SetForegroundColor(color))?;
            self.out.queue(Print(line))?;
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

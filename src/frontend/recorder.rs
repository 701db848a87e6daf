//! In-memory [`Surface`] that records draw calls instead of painting.
//!
//! Used by the headless runner (which only logs what would have been
//! drawn) and by tests that inspect the exact call sequence.

use crate::geometry::{Color, Point, Rect};
use crate::traits::Surface;
use log::trace;
use std::convert::Infallible;

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    Polygon {
        vertices: Vec<Point>,
        color: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
    Text {
        pos: Point,
        text: String,
        size: f64,
        color: Color,
    },
}

/// A surface that keeps the calls of the frame being drawn and of the last
/// presented frame.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pending: Vec<DrawCall>,
    presented: Vec<DrawCall>,
    frames: u64,
    total_calls: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls of the most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.presented
    }

    /// Number of [`present`](Surface::present) calls so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw calls across all presented frames.
    pub fn total_calls(&self) -> u64 {
        self.total_calls
    }

    fn record(&mut self, call: DrawCall) -> Result<(), Infallible> {
        self.pending.push(call);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn clear(&mut self, color: Color) -> Result<(), Infallible> {
        self.record(DrawCall::Clear(color))
    }

    fn line(&mut self, from: Point, to: Point, width: f64, color: Color) -> Result<(), Infallible> {
        self.record(DrawCall::Line {
            from,
            to,
            width,
            color,
        })
    }

    fn circle(&mut self, center: Point, radius: f64, color: Color) -> Result<(), Infallible> {
        self.record(DrawCall::Circle {
            center,
            radius,
            color,
        })
    }

    fn polygon(&mut self, vertices: &[Point], color: Color) -> Result<(), Infallible> {
        if vertices.len() < 3 {
            return Ok(());
        }
        self.record(DrawCall::Polygon {
            vertices: vertices.to_vec(),
            color,
        })
    }

    fn rect(&mut self, rect: Rect, color: Color) -> Result<(), Infallible> {
        self.record(DrawCall::Rect { rect, color })
    }

    fn text(&mut self, pos: Point, text: &str, size: f64, color: Color) -> Result<(), Infallible> {
        self.record(DrawCall::Text {
            pos,
            text: text.to_string(),
            size,
            color,
        })
    }

    fn present(&mut self) -> Result<(), Infallible> {
        self.frames += 1;
        self.total_calls += self.pending.len() as u64;
        trace!("frame {}: {} draw calls", self.frames, self.pending.len());
        self.presented = std::mem::take(&mut self.pending);
        Ok(())
    }
}

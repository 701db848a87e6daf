//! Core traits that decouple the curve engine from any specific graphics
//! library or input backend.
//!
//! Every concrete frontend (GTK/cairo, a replay script, a recording test
//! double, …) implements one of these traits.  The
//! [`InteractionController`](crate::controller::InteractionController) and
//! the [`render`](crate::render) module only depend on these abstractions.

use crate::event::InputEvent;
use crate::geometry::{Color, Point, Rect};

/// Abstraction over a 2D drawing target.
///
/// An implementation might paint with cairo into a GTK widget, or it might
/// simply record the calls for inspection in tests.  All coordinates are
/// screen pixels with the origin at the top-left corner.
pub trait Surface {
    /// The error type produced by this surface.
    type Error: std::error::Error + Send + 'static;

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color) -> Result<(), Self::Error>;

    /// Stroke a straight segment from `from` to `to`.
    fn line(&mut self, from: Point, to: Point, width: f64, color: Color)
        -> Result<(), Self::Error>;

    /// Fill a circle.
    fn circle(&mut self, center: Point, radius: f64, color: Color) -> Result<(), Self::Error>;

    /// Fill a closed polygon.  Fewer than three vertices draw nothing.
    fn polygon(&mut self, vertices: &[Point], color: Color) -> Result<(), Self::Error>;

    /// Fill an axis-aligned rectangle.
    fn rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error>;

    /// Draw `text` with its top-left corner at `pos`.
    fn text(&mut self, pos: Point, text: &str, size: f64, color: Color)
        -> Result<(), Self::Error>;

    /// Make everything drawn since the last call visible.
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// A source of [`InputEvent`]s.
///
/// Unlike a blocking listener, a source is **polled** once per frame from
/// the loop thread and hands back whatever arrived since the previous
/// poll.  An empty batch is normal; the loop keeps running until it sees
/// [`InputEvent::Quit`].
///
/// # Contract
///
/// * [`poll`](EventSource::poll) never blocks for longer than it takes to
///   read already-available input.
/// * Events are returned in arrival order.
/// * A source that can produce no more input should return
///   [`InputEvent::Quit`] once instead of empty batches forever.
pub trait EventSource {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Return all events that arrived since the previous call.
    fn poll(&mut self) -> Result<Vec<InputEvent>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    //  Mock EventSource

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    /// A test double that emits a fixed sequence of batches.
    struct MockSource {
        batches: VecDeque<Vec<InputEvent>>,
    }

    impl EventSource for MockSource {
        type Error = MockError;

        fn poll(&mut self) -> Result<Vec<InputEvent>, MockError> {
            Ok(self
                .batches
                .pop_front()
                .unwrap_or_else(|| vec![InputEvent::Quit]))
        }
    }

    #[test]
    fn mock_source_emits_batches_then_quits() {
        let mut src = MockSource {
            batches: VecDeque::from(vec![
                vec![InputEvent::PointerDown { x: 1.0, y: 2.0 }],
                vec![],
            ]),
        };
        assert_eq!(src.poll().unwrap().len(), 1);
        assert!(src.poll().unwrap().is_empty());
        assert_eq!(src.poll().unwrap(), vec![InputEvent::Quit]);
    }

    //  Mock Surface

    /// A test double that only counts calls.
    #[derive(Default)]
    struct CountingSurface {
        calls: usize,
        presented: usize,
    }

    impl Surface for CountingSurface {
        type Error = MockError;

        fn clear(&mut self, _: Color) -> Result<(), MockError> {
            self.calls += 1;
            Ok(())
        }

        fn line(&mut self, _: Point, _: Point, _: f64, _: Color) -> Result<(), MockError> {
            self.calls += 1;
            Ok(())
        }

        fn circle(&mut self, _: Point, _: f64, _: Color) -> Result<(), MockError> {
            self.calls += 1;
            Ok(())
        }

        fn polygon(&mut self, _: &[Point], _: Color) -> Result<(), MockError> {
            self.calls += 1;
            Ok(())
        }

        fn rect(&mut self, _: Rect, _: Color) -> Result<(), MockError> {
            self.calls += 1;
            Ok(())
        }

        fn text(&mut self, _: Point, _: &str, _: f64, _: Color) -> Result<(), MockError> {
            self.calls += 1;
            Ok(())
        }

        fn present(&mut self) -> Result<(), MockError> {
            self.presented += 1;
            Ok(())
        }
    }

    #[test]
    fn surface_is_usable_through_generic_code() {
        fn draw_cross<S: Surface>(s: &mut S) -> Result<(), S::Error> {
            s.line(Point::new(0.0, 0.0), Point::new(10.0, 10.0), 1.0, Color::BLACK)?;
            s.line(Point::new(10.0, 0.0), Point::new(0.0, 10.0), 1.0, Color::BLACK)?;
            s.present()
        }
        let mut s = CountingSurface::default();
        draw_cross(&mut s).unwrap();
        assert_eq!(s.calls, 2);
        assert_eq!(s.presented, 1);
    }
}

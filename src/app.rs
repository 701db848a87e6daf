//! The blocking, single-threaded frame loop.
//!
//! Each iteration waits out the rest of the frame budget, drains the event
//! source into the controller, and paints a frame if one is due.  A quit
//! event is only honoured at the top of the next iteration, so the frame
//! in flight always completes.
//!
//! The GTK frontend drives the same steps from a GLib timer instead; see
//! [`frontend::gtk`](crate::frontend).

use crate::controller::InteractionController;
use crate::menu::MenuLayout;
use crate::render::Compositor;
use crate::traits::{EventSource, Surface};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Possible errors from the frame loop.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The event source failed.
    #[error("event source error: {0}")]
    Source(String),
    /// The surface failed to draw or present.
    #[error("surface error: {0}")]
    Surface(String),
}

/// Whether the loop sleeps between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Hold each frame to the controller's current frame rate.
    Realtime,
    /// Run frames back to back (scripted runs and tests).
    Unpaced,
}

/// Counters reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Loop iterations.
    pub iterations: u64,
    /// Frames actually painted.
    pub frames: u64,
    pub events: u64,
}

/// Sleeps so consecutive [`wait`](FramePacer::wait) calls are at least one
/// frame interval apart.
#[derive(Debug, Default)]
pub struct FramePacer {
    last: Option<Instant>,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time still to wait when `elapsed` has passed of an `interval`
    /// budget.
    pub fn remaining(elapsed: Duration, interval: Duration) -> Duration {
        interval.saturating_sub(elapsed)
    }

    /// Block until `interval` has passed since the previous call.
    ///
    /// The first call returns immediately.
    pub fn wait(&mut self, interval: Duration) {
        if let Some(last) = self.last {
            let rest = Self::remaining(last.elapsed(), interval);
            if !rest.is_zero() {
                std::thread::sleep(rest);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Run the loop until the controller sees a quit event.
pub fn run<S: Surface, E: EventSource>(
    controller: &mut InteractionController,
    compositor: &Compositor,
    source: &mut E,
    surface: &mut S,
    pacing: Pacing,
) -> Result<RunStats, AppError> {
    let mut stats = RunStats::default();
    let mut pacer = FramePacer::new();
    info!(
        "frame loop started ({} points, {} fps, {:?})",
        controller.points().len(),
        controller.clock().fps(),
        pacing
    );

    while !controller.should_stop() {
        if pacing == Pacing::Realtime {
            pacer.wait(controller.frame_interval());
        }
        stats.iterations += 1;

        let events = source
            .poll()
            .map_err(|e| AppError::Source(e.to_string()))?;
        stats.events += events.len() as u64;
        for event in events {
            controller.handle(event);
        }

        if let Some(frame) = controller.frame() {
            let menu: &MenuLayout = controller.menu();
            compositor
                .paint(surface, &frame, menu)
                .map_err(|e| AppError::Surface(e.to_string()))?;
            stats.frames += 1;
        } else {
            debug!("iteration {}: nothing to repaint", stats.iterations);
        }
    }

    info!(
        "frame loop exited after {} iterations ({} frames, {} events)",
        stats.iterations, stats.frames, stats.events
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::event::InputEvent;
    use crate::frontend::recorder::{DrawCall, RecordingSurface};
    use crate::geometry::{Color, Point};
    use std::collections::VecDeque;

    #[derive(Debug, thiserror::Error)]
    #[error("script error")]
    struct ScriptError;

    /// Emits fixed batches, then quits; fails if polled after the quit.
    struct Script {
        batches: VecDeque<Vec<InputEvent>>,
        quit_sent: bool,
    }

    impl Script {
        fn new(batches: Vec<Vec<InputEvent>>) -> Self {
            Self {
                batches: batches.into(),
                quit_sent: false,
            }
        }
    }

    impl EventSource for Script {
        type Error = ScriptError;

        fn poll(&mut self) -> Result<Vec<InputEvent>, ScriptError> {
            if self.quit_sent {
                return Err(ScriptError);
            }
            match self.batches.pop_front() {
                Some(batch) => {
                    self.quit_sent = batch.contains(&InputEvent::Quit);
                    Ok(batch)
                }
                None => {
                    self.quit_sent = true;
                    Ok(vec![InputEvent::Quit])
                }
            }
        }
    }

    fn setup() -> (InteractionController, Compositor) {
        let config = Config::default();
        let ctl = InteractionController::new(&config, MenuLayout::default()).unwrap();
        (ctl, Compositor::from_config(&config))
    }

    fn blue_circle(calls: &[DrawCall]) -> Option<Point> {
        calls.iter().find_map(|c| match c {
            DrawCall::Circle { center, color, .. } if *color == Color::BLUE => Some(*center),
            _ => None,
        })
    }

    #[test]
    fn running_loop_paints_every_iteration() {
        let (mut ctl, compositor) = setup();
        let mut script = Script::new(vec![vec![], vec![], vec![]]);
        let mut surface = RecordingSurface::new();
        let stats = run(&mut ctl, &compositor, &mut script, &mut surface, Pacing::Unpaced).unwrap();
        // Three empty frames plus the one carrying the quit event.
        assert_eq!(stats.iterations, 4);
        assert_eq!(stats.frames, 4);
        assert_eq!(surface.frames(), 4);
        assert_eq!(ctl.clock().t(), 0.04);
    }

    #[test]
    fn paused_loop_paints_only_after_changes() {
        let (mut ctl, compositor) = setup();
        let mut script = Script::new(vec![
            // Pause button.
            vec![InputEvent::PointerDown { x: 75.0, y: 50.0 }],
            vec![],
            vec![],
            // Drag control point 0 from screen (200, 500) to (250, 500).
            vec![
                InputEvent::PointerDown { x: 200.0, y: 500.0 },
                InputEvent::PointerMove { x: 250.0, y: 500.0 },
                InputEvent::PointerUp,
            ],
            vec![],
        ]);
        let mut surface = RecordingSurface::new();
        let stats = run(&mut ctl, &compositor, &mut script, &mut surface, Pacing::Unpaced).unwrap();
        assert_eq!(stats.iterations, 6);
        // Initial frame, then the drag.
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.events, 5);
        // t froze at 0 when paused during the first iteration.
        assert_eq!(blue_circle(surface.last_frame()), Some(Point::new(250.0, 500.0)));
    }

    #[test]
    fn quit_finishes_current_frame() {
        let (mut ctl, compositor) = setup();
        let mut script = Script::new(vec![vec![
            InputEvent::PointerDown { x: 462.0, y: 50.0 },
            InputEvent::Quit,
        ]]);
        let mut surface = RecordingSurface::new();
        let stats = run(&mut ctl, &compositor, &mut script, &mut surface, Pacing::Unpaced).unwrap();
        assert_eq!(stats.iterations, 1);
        assert_eq!(surface.frames(), 1);
        assert_eq!(ctl.points().len(), 5);
    }

    #[test]
    fn source_error_is_reported() {
        let (mut ctl, compositor) = setup();
        let mut script = Script::new(vec![]);
        script.quit_sent = true;
        let mut surface = RecordingSurface::new();
        let err = run(&mut ctl, &compositor, &mut script, &mut surface, Pacing::Unpaced).unwrap_err();
        assert!(matches!(err, AppError::Source(_)));
    }

    #[test]
    fn pacer_remaining_budget() {
        let interval = Duration::from_millis(33);
        assert_eq!(
            FramePacer::remaining(Duration::from_millis(10), interval),
            Duration::from_millis(23)
        );
        assert_eq!(
            FramePacer::remaining(Duration::from_millis(50), interval),
            Duration::ZERO
        );
    }

    #[test]
    fn pacer_holds_frame_interval() {
        let mut pacer = FramePacer::new();
        let start = Instant::now();
        pacer.wait(Duration::from_millis(20));
        pacer.wait(Duration::from_millis(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}

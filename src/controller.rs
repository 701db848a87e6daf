//! The interaction state machine that ties control points, the animation
//! clock and the menu together.
//!
//! [`InteractionController`] owns the [`ControlPointStore`], the
//! [`AnimationClock`] and the sampled curve.  It reacts to [`InputEvent`]s
//! by mutating that state and hands out a [`Frame`] snapshot whenever the
//! display needs repainting.
//!
//! Repaints are requested through a dirty flag rather than by drawing from
//! inside the event handlers: any change to the points marks the state
//! dirty, and [`frame`](InteractionController::frame) reports a frame when
//! the animation is running *or* the state is dirty.

use crate::bezier::{evaluate_with_levels, sample_curve};
use crate::clock::AnimationClock;
use crate::config::Config;
use crate::event::InputEvent;
use crate::geometry::Point;
use crate::menu::{MenuAction, MenuLayout};
use crate::points::{ControlPointStore, StoreError};
use log::{debug, info, trace};
use std::time::Duration;

/// An in-progress drag of one control point.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    index: usize,
    /// `point - pointer` at grab time, in workspace coordinates.
    offset: Point,
}

/// Everything the renderer needs for one frame.
///
/// Points are in workspace coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Curve parameter the construction is drawn for.
    pub t: f64,
    pub control_points: Vec<Point>,
    /// Sampled curve polyline.
    pub curve: Vec<Point>,
    /// De Casteljau levels at `t`, from the control points down to the
    /// evaluated point.
    pub construction: Vec<Vec<Point>>,
}

impl Frame {
    /// The point on the curve at `t`.
    pub fn evaluated(&self) -> Option<Point> {
        self.construction.last().and_then(|l| l.first()).copied()
    }
}

/// Translates input events into state changes.
///
/// # Typical usage
///
/// ```ignore
/// let mut ctl = InteractionController::new(&config, MenuLayout::default())?;
/// for event in source.poll()? {
///     ctl.handle(event);
/// }
/// if let Some(frame) = ctl.frame() {
///     render::render(&mut surface, &frame, &layout, &theme, &config)?;
/// }
/// ```
pub struct InteractionController {
    store: ControlPointStore,
    clock: AnimationClock,
    curve: Vec<Point>,
    menu: MenuLayout,
    drag: Option<DragSession>,
    menu_height: f64,
    hit_radius: f64,
    sample_step: f64,
    dirty: bool,
    stopped: bool,
}

impl InteractionController {
    /// Create a controller from startup configuration.
    ///
    /// Fails only if `config.initial_points` is outside the supported
    /// range.  The first call to [`frame`](Self::frame) always yields a
    /// frame.
    pub fn new(config: &Config, menu: MenuLayout) -> Result<Self, StoreError> {
        let store = ControlPointStore::new(config.initial_points)?;
        let clock = AnimationClock::new(config.animation.fps, config.animation.sweep_steps);
        let sample_step = config.curve.sample_step;
        let curve = sample_curve(store.points(), sample_step);
        Ok(Self {
            store,
            clock,
            curve,
            menu,
            drag: None,
            menu_height: f64::from(config.window.menu_height),
            hit_radius: config.curve.point_radius,
            sample_step,
            dirty: true,
            stopped: false,
        })
    }

    //  Accessors

    pub fn points(&self) -> &ControlPointStore {
        &self.store
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// The sampled curve for the current control points.
    pub fn curve(&self) -> &[Point] {
        &self.curve
    }

    pub fn menu(&self) -> &MenuLayout {
        &self.menu
    }

    /// Whether a quit event has been seen.
    pub fn should_stop(&self) -> bool {
        self.stopped
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether the next [`frame`](Self::frame) call will produce a frame.
    pub fn needs_redraw(&self) -> bool {
        self.dirty || self.clock.is_running()
    }

    /// Wait between frames at the current frame rate.
    pub fn frame_interval(&self) -> Duration {
        self.clock.frame_interval()
    }

    //  Event handling

    /// Process a single [`InputEvent`].
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                info!("quit requested");
                self.stopped = true;
            }

            InputEvent::PointerDown { x, y } => {
                let screen = Point::new(x, y);
                let local = self.to_workspace(screen);
                self.drag = self
                    .store
                    .hit_test(local, self.hit_radius)
                    .and_then(|index| {
                        let point = self.store.get(index)?;
                        Some(DragSession {
                            index,
                            offset: point - local,
                        })
                    });
                match self.drag {
                    Some(drag) => debug!("grab point {} at ({:.1}, {:.1})", drag.index, x, y),
                    None => {
                        if let Some(action) = self.menu.hit_test(screen) {
                            self.apply(action);
                        }
                    }
                }
            }

            InputEvent::PointerUp => {
                if let Some(drag) = self.drag.take() {
                    debug!("release point {}", drag.index);
                }
            }

            InputEvent::PointerMove { x, y } => {
                if let Some(drag) = self.drag {
                    let local = self.to_workspace(Point::new(x, y));
                    if let Some(p) = self.store.move_point(drag.index, local + drag.offset) {
                        trace!("point {} -> ({:.1}, {:.1})", drag.index, p.x, p.y);
                        self.points_changed();
                    }
                }
            }
        }
    }

    /// Run the handler for a menu button.
    pub fn apply(&mut self, action: MenuAction) {
        match action {
            MenuAction::Pause => {
                info!("pause at t={:.2}", self.clock.t());
                self.clock.pause();
            }
            MenuAction::Play => {
                info!("play");
                self.clock.play();
            }
            MenuAction::PointIncrease => {
                if self.store.increase() {
                    info!("control points: {}", self.store.len());
                    self.points_changed();
                }
            }
            MenuAction::PointDecrease => {
                if self.store.decrease() {
                    info!("control points: {}", self.store.len());
                    self.points_changed();
                }
            }
            MenuAction::SpeedUp => {
                let fps = self.clock.speed_up();
                info!("fps: {}", fps);
            }
            MenuAction::SpeedDown => {
                let fps = self.clock.speed_down();
                info!("fps: {}", fps);
            }
        }
    }

    //  Frame production

    /// Snapshot the state for painting, if a repaint is due.
    ///
    /// Returns `Some` while the animation runs or after the points changed.
    /// The snapshot uses the current `t`; the clock advances afterwards, so
    /// a paused clock never moves.
    pub fn frame(&mut self) -> Option<Frame> {
        if !self.needs_redraw() {
            return None;
        }
        let frame = self.snapshot();
        self.dirty = false;
        self.clock.advance();
        Some(frame)
    }

    /// Snapshot the state without touching the dirty flag or the clock.
    pub fn snapshot(&self) -> Frame {
        let t = self.clock.t();
        Frame {
            t,
            control_points: self.store.points().to_vec(),
            curve: self.curve.clone(),
            construction: evaluate_with_levels(self.store.points(), t),
        }
    }

    //  internals

    fn to_workspace(&self, screen: Point) -> Point {
        screen.offset_y(-self.menu_height)
    }

    fn points_changed(&mut self) {
        self.curve = sample_curve(self.store.points(), self.sample_step);
        self.dirty = true;
    }
}

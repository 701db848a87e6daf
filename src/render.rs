//! Paints a [`Frame`] and the menu bar onto a [`Surface`].
//!
//! The compositor has no state of its own beyond sizes and colors fixed at
//! startup.  Each call to [`Compositor::paint`] redraws everything:
//!
//! 1. workspace background and grid,
//! 2. the sampled curve polyline,
//! 3. the De Casteljau construction at the frame's `t`,
//! 4. the menu bar on top.
//!
//! Frame points are in workspace coordinates and are shifted down by the
//! menu height here.  The menu is painted last so anything reaching above
//! the workspace edge (a control point at `y = 0`) is covered by it.

use crate::config::{Config, Theme};
use crate::controller::Frame;
use crate::geometry::{Point, Rect};
use crate::menu::{ButtonShape, MenuLayout};
use crate::traits::Surface;

/// Stroke width of grid and construction lines.
const THIN: f64 = 1.0;

/// Sizes and colors used for painting.
#[derive(Debug, Clone)]
pub struct Compositor {
    width: f64,
    height: f64,
    menu_height: f64,
    grid_step: f64,
    point_radius: f64,
    curve_width: f64,
    theme: Theme,
}

impl Compositor {
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: f64::from(config.window.width),
            height: f64::from(config.window.height),
            menu_height: f64::from(config.window.menu_height),
            grid_step: f64::from(config.curve.grid_step),
            point_radius: config.curve.point_radius,
            curve_width: config.curve.curve_width,
            theme: config.theme.clone(),
        }
    }

    /// Paint one full frame and present it.
    pub fn paint<S: Surface>(
        &self,
        surface: &mut S,
        frame: &Frame,
        menu: &MenuLayout,
    ) -> Result<(), S::Error> {
        self.paint_background(surface)?;
        self.paint_curve(surface, &frame.curve)?;
        self.paint_construction(surface, frame)?;
        self.paint_menu(surface, menu)?;
        surface.present()
    }

    /// Workspace point to screen point.
    fn screen(&self, p: Point) -> Point {
        p.offset_y(self.menu_height)
    }

    fn paint_background<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.theme.background)?;
        let workspace_h = self.height - self.menu_height;
        if self.grid_step <= 0.0 {
            return Ok(());
        }
        let rows = (workspace_h / self.grid_step).floor() as u32;
        for i in 0..rows {
            let y = f64::from(i) * self.grid_step;
            surface.line(
                self.screen(Point::new(0.0, y)),
                self.screen(Point::new(self.width, y)),
                THIN,
                self.theme.grid,
            )?;
        }
        let cols = (self.width / self.grid_step).floor() as u32;
        for i in 0..cols {
            let x = f64::from(i) * self.grid_step;
            surface.line(
                self.screen(Point::new(x, 0.0)),
                self.screen(Point::new(x, workspace_h)),
                THIN,
                self.theme.grid,
            )?;
        }
        Ok(())
    }

    fn paint_curve<S: Surface>(&self, surface: &mut S, curve: &[Point]) -> Result<(), S::Error> {
        for w in curve.windows(2) {
            surface.line(
                self.screen(w[0]),
                self.screen(w[1]),
                self.curve_width,
                self.theme.curve,
            )?;
        }
        Ok(())
    }

    fn paint_construction<S: Surface>(&self, surface: &mut S, frame: &Frame) -> Result<(), S::Error> {
        let r = self.point_radius;
        for level in frame.construction.iter().filter(|l| l.len() > 1) {
            for w in level.windows(2) {
                surface.line(
                    self.screen(w[0]),
                    self.screen(w[1]),
                    THIN,
                    self.theme.construction,
                )?;
            }
            for &p in level {
                surface.circle(self.screen(p), r, self.theme.intermediate)?;
            }
        }
        if let Some(p) = frame.evaluated() {
            surface.circle(self.screen(p), r, self.theme.evaluated)?;
        }
        for &p in &frame.control_points {
            surface.circle(self.screen(p), r, self.theme.control)?;
        }
        Ok(())
    }

    fn paint_menu<S: Surface>(&self, surface: &mut S, menu: &MenuLayout) -> Result<(), S::Error> {
        surface.rect(
            Rect::new(0.0, 0.0, self.width, self.menu_height),
            self.theme.menu,
        )?;
        for button in &menu.buttons {
            match &button.shape {
                ButtonShape::Bars(bars) => {
                    for bar in bars {
                        surface.rect(*bar, self.theme.chrome)?;
                    }
                }
                ButtonShape::Polygon(vertices) => {
                    surface.polygon(vertices, self.theme.chrome)?;
                }
            }
        }
        for label in &menu.labels {
            surface.text(label.pos, &label.text, label.size, self.theme.chrome)?;
        }
        Ok(())
    }
}

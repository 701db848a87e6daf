//! The static menu bar: buttons, their hit regions and their shapes.
//!
//! A [`MenuLayout`] is built once at startup and shared read-only by the
//! controller (for hit-testing) and the renderer (for drawing).  All
//! coordinates are in screen space.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────────┐
//!  │  ▌▌  ▶        ◀ point ▶              ◀ speed ▶                │
//!  ├──────────────────────────────────────────────────────────────┤
//!  │                        workspace                             │
//! ```

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a menu button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuAction {
    Pause,
    Play,
    PointIncrease,
    PointDecrease,
    SpeedUp,
    SpeedDown,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Pause => write!(f, "pause"),
            MenuAction::Play => write!(f, "play"),
            MenuAction::PointIncrease => write!(f, "point-increase"),
            MenuAction::PointDecrease => write!(f, "point-decrease"),
            MenuAction::SpeedUp => write!(f, "speed-up"),
            MenuAction::SpeedDown => write!(f, "speed-down"),
        }
    }
}

/// How a button is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonShape {
    /// Filled rectangles (the two pause bars).
    Bars(Vec<Rect>),
    /// A filled polygon (play and arrow triangles).
    Polygon(Vec<Point>),
}

/// A clickable menu entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuButton {
    pub action: MenuAction,
    /// Region that reacts to pointer-down.
    pub hit: Rect,
    pub shape: ButtonShape,
}

/// Static text in the menu bar.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLabel {
    pub text: String,
    /// Top-left corner of the text box.
    pub pos: Point,
    pub size: f64,
}

/// The full menu bar description.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub buttons: Vec<MenuButton>,
    pub labels: Vec<MenuLabel>,
}

fn triangle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> ButtonShape {
    ButtonShape::Polygon(vec![
        Point::new(a.0, a.1),
        Point::new(b.0, b.1),
        Point::new(c.0, c.1),
    ])
}

impl Default for MenuLayout {
    /// The reference layout for an 800 px wide window with a 100 px menu.
    fn default() -> Self {
        let buttons = vec![
            MenuButton {
                action: MenuAction::Pause,
                hit: Rect::new(50.0, 25.0, 50.0, 50.0),
                shape: ButtonShape::Bars(vec![
                    Rect::new(50.0, 25.0, 20.0, 50.0),
                    Rect::new(80.0, 25.0, 20.0, 50.0),
                ]),
            },
            MenuButton {
                action: MenuAction::Play,
                hit: Rect::new(125.0, 25.0, 50.0, 50.0),
                shape: triangle((125.0, 25.0), (150.0, 50.0), (125.0, 75.0)),
            },
            MenuButton {
                action: MenuAction::PointIncrease,
                hit: Rect::new(450.0, 30.0, 25.0, 40.0),
                shape: triangle((450.0, 30.0), (475.0, 50.0), (450.0, 70.0)),
            },
            MenuButton {
                action: MenuAction::PointDecrease,
                hit: Rect::new(325.0, 30.0, 25.0, 40.0),
                shape: triangle((350.0, 30.0), (325.0, 50.0), (350.0, 70.0)),
            },
            MenuButton {
                action: MenuAction::SpeedUp,
                hit: Rect::new(750.0, 30.0, 25.0, 40.0),
                shape: triangle((750.0, 30.0), (775.0, 50.0), (750.0, 70.0)),
            },
            MenuButton {
                action: MenuAction::SpeedDown,
                hit: Rect::new(625.0, 30.0, 25.0, 40.0),
                shape: triangle((650.0, 30.0), (625.0, 50.0), (650.0, 70.0)),
            },
        ];
        let labels = vec![
            MenuLabel {
                text: "point".into(),
                pos: Point::new(365.0, 40.0),
                size: 28.0,
            },
            MenuLabel {
                text: "speed".into(),
                pos: Point::new(660.0, 40.0),
                size: 28.0,
            },
        ];
        Self { buttons, labels }
    }
}

impl MenuLayout {
    /// Action of the first button whose hit region contains `pos`.
    pub fn hit_test(&self, pos: Point) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|b| b.hit.contains(pos))
            .map(|b| b.action)
    }

    /// Right and bottom edges of the furthest hit region, i.e. the smallest
    /// menu bar that holds every button.
    pub fn extent(&self) -> (f64, f64) {
        self.buttons.iter().fold((0.0_f64, 0.0_f64), |(right, bottom), b| {
            (
                right.max(b.hit.x + b.hit.width),
                bottom.max(b.hit.y + b.hit.height),
            )
        })
    }
}

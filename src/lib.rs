//! **casteljau**: an interactive De Casteljau construction viewer.
//!
//! A Bezier curve with two to six control points is drawn together with the
//! scaffolding of its De Casteljau evaluation at a parameter `t` that
//! sweeps back and forth between 0 and 1.  Control points can be dragged,
//! and a menu bar pauses/plays the animation, changes the number of control
//! points and changes the frame rate.
//!
//! # Architecture
//!
//! The core is pure and single-threaded:
//!
//! * [`bezier`]: curve evaluation and sampling.
//! * [`points`]: the control point store and its templates.
//! * [`clock`]: the ping-pong animation clock.
//! * [`controller`]: the interaction state machine producing [`controller::Frame`]s.
//! * [`render`]: paints a frame and the [`menu`] bar.
//!
//! Two traits keep it independent of any toolkit:
//!
//! * [`traits::Surface`]: a display surface with line, circle, polygon and
//!   text primitives.
//! * [`traits::EventSource`]: a per-frame poll of input events.
//!
//! Concrete implementations live in [`frontend`]: GTK/cairo, an mpsc-fed
//! event source, a JSON-lines replay script and an in-memory recorder.

pub mod app;
pub mod bezier;
pub mod clock;
pub mod config;
pub mod controller;
pub mod event;
pub mod frontend;
pub mod geometry;
pub mod menu;
pub mod points;
pub mod render;
pub mod traits;

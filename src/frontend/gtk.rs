//! GTK4 frontend that runs on the **main thread**.
//!
//! # Widget tree
//!
//! ```text
//! window                 (fixed size, not resizable)
//! └ DrawingArea          (whole window, painted with cairo)
//!     ├ GestureDrag      → PointerDown / PointerMove / PointerUp
//!     └ (close request)  → Quit
//! ```
//!
//! Input callbacks push [`InputEvent`]s into a channel.  A one-shot GLib
//! timer, re-armed after every tick with the controller's current frame
//! interval, drains the channel, asks the controller for a [`Frame`] and
//! queues a redraw.  Changing the frame rate through the menu therefore
//! changes both polling and animation cadence.

use crate::config::Config;
use crate::controller::{Frame, InteractionController};
use crate::event::InputEvent;
use crate::frontend::channel::ChannelSource;
use crate::geometry::{Color, Point, Rect};
use crate::render::Compositor;
use crate::traits::{EventSource, Surface};
use gtk4::prelude::*;
use gtk4::{cairo, glib};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

const FONT_FAMILY: &str = "Sans";

//  Cairo surface

/// [`Surface`] backed by a cairo context of a GTK draw callback.
///
/// GTK shows the result once the callback returns, so
/// [`present`](Surface::present) has nothing to do.
pub struct CairoSurface<'a> {
    cr: &'a cairo::Context,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a cairo::Context) -> Self {
        Self { cr }
    }

    fn source(&self, color: Color) {
        let (r, g, b) = color.to_unit();
        self.cr.set_source_rgb(r, g, b);
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn clear(&mut self, color: Color) -> Result<(), cairo::Error> {
        self.source(color);
        self.cr.paint()
    }

    fn line(&mut self, from: Point, to: Point, width: f64, color: Color) -> Result<(), cairo::Error> {
        self.source(color);
        self.cr.set_line_width(width);
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.cr.stroke()
    }

    fn circle(&mut self, center: Point, radius: f64, color: Color) -> Result<(), cairo::Error> {
        self.source(color);
        self.cr.new_path();
        self.cr.arc(center.x, center.y, radius, 0.0, TAU);
        self.cr.fill()
    }

    fn polygon(&mut self, vertices: &[Point], color: Color) -> Result<(), cairo::Error> {
        let Some((first, rest)) = vertices.split_first() else {
            return Ok(());
        };
        if rest.len() < 2 {
            return Ok(());
        }
        self.source(color);
        self.cr.move_to(first.x, first.y);
        for p in rest {
            self.cr.line_to(p.x, p.y);
        }
        self.cr.close_path();
        self.cr.fill()
    }

    fn rect(&mut self, rect: Rect, color: Color) -> Result<(), cairo::Error> {
        self.source(color);
        self.cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.cr.fill()
    }

    fn text(&mut self, pos: Point, text: &str, size: f64, color: Color) -> Result<(), cairo::Error> {
        self.source(color);
        self.cr.select_font_face(
            FONT_FAMILY,
            cairo::FontSlant::Normal,
            cairo::FontWeight::Normal,
        );
        self.cr.set_font_size(size);
        let ascent = self.cr.font_extents()?.ascent();
        self.cr.move_to(pos.x, pos.y + ascent);
        self.cr.show_text(text)
    }

    fn present(&mut self) -> Result<(), cairo::Error> {
        Ok(())
    }
}

//  Frame ticker

/// State shared between the timer and the draw callback.
struct Ticker {
    controller: RefCell<InteractionController>,
    source: RefCell<ChannelSource>,
    last_frame: Rc<RefCell<Option<Frame>>>,
    area: gtk4::DrawingArea,
    main_loop: glib::MainLoop,
}

/// Run one loop iteration and re-arm the timer.
fn tick(ticker: Rc<Ticker>) {
    let interval = {
        let mut controller = ticker.controller.borrow_mut();

        // 1. Drain input.
        let events = match ticker.source.borrow_mut().poll() {
            Ok(events) => events,
            Err(never) => match never {},
        };
        for event in events {
            controller.handle(event);
        }

        // 2. Snapshot and request a repaint if one is due.
        if let Some(frame) = controller.frame() {
            *ticker.last_frame.borrow_mut() = Some(frame);
            ticker.area.queue_draw();
        }

        if controller.should_stop() {
            info!("stopping main loop");
            ticker.main_loop.quit();
            return;
        }
        controller.frame_interval()
    };
    glib::timeout_add_local_once(interval, move || tick(ticker));
}

//  Public API

/// Open the window and run the GLib main loop on the **current** (main)
/// thread until the window is closed.
pub fn run_main_loop(controller: InteractionController, config: &Config) -> Result<(), glib::BoolError> {
    gtk4::init()?;
    info!("GTK4 initialised on main thread");

    let width = config.window.width as i32;
    let height = config.window.height as i32;

    let window = gtk4::Window::new();
    window.set_title(Some(config.window.title.as_str()));
    window.set_default_size(width, height);
    window.set_resizable(false);

    let area = gtk4::DrawingArea::new();
    area.set_content_width(width);
    area.set_content_height(height);
    window.set_child(Some(&area));

    //  Input → channel
    let (tx, source) = ChannelSource::pair();

    let drag = gtk4::GestureDrag::new();
    drag.set_button(0);
    {
        let tx = tx.clone();
        drag.connect_drag_begin(move |_, x, y| {
            let _ = tx.send(InputEvent::PointerDown { x, y });
        });
    }
    {
        let tx = tx.clone();
        drag.connect_drag_update(move |gesture, dx, dy| {
            if let Some((sx, sy)) = gesture.start_point() {
                let _ = tx.send(InputEvent::PointerMove {
                    x: sx + dx,
                    y: sy + dy,
                });
            }
        });
    }
    {
        let tx = tx.clone();
        drag.connect_drag_end(move |_, _, _| {
            let _ = tx.send(InputEvent::PointerUp);
        });
    }
    area.add_controller(drag);

    window.connect_close_request(move |_| {
        debug!("close requested");
        let _ = tx.send(InputEvent::Quit);
        glib::Propagation::Stop
    });

    //  Painting
    let last_frame: Rc<RefCell<Option<Frame>>> = Rc::new(RefCell::new(None));
    {
        let last_frame = last_frame.clone();
        let compositor = Compositor::from_config(config);
        let menu = controller.menu().clone();
        area.set_draw_func(move |_, cr, _, _| {
            if let Some(frame) = last_frame.borrow().as_ref() {
                let mut surface = CairoSurface::new(cr);
                if let Err(e) = compositor.paint(&mut surface, frame, &menu) {
                    warn!("paint failed: {}", e);
                }
            }
        });
    }

    let main_loop = glib::MainLoop::new(None, false);
    info!(
        "window {}x{} ready ({} points, {} fps)",
        width,
        height,
        controller.points().len(),
        controller.clock().fps()
    );

    let ticker = Rc::new(Ticker {
        controller: RefCell::new(controller),
        source: RefCell::new(source),
        last_frame,
        area,
        main_loop: main_loop.clone(),
    });
    tick(ticker);

    window.present();
    info!("entering GLib main loop");
    main_loop.run();
    window.destroy();
    info!("GLib main loop exited");
    Ok(())
}

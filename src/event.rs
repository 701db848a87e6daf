//! Input events consumed by the
//! [`InteractionController`](crate::controller::InteractionController).
//!
//! Events are produced by [`EventSource`](crate::traits::EventSource)
//! implementations.  Positions are absolute screen coordinates; the
//! controller converts them to workspace coordinates where needed.
//!
//! The serde representation is the replay wire format:
//!
//! ```json
//! "Quit"
//! {"PointerDown":{"x":200.0,"y":500.0}}
//! {"PointerMove":{"x":250,"y":480}}
//! "PointerUp"
//! ```

use serde::{Deserialize, Serialize};

/// A discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// The window was closed; the loop exits after the current frame.
    Quit,
    /// A pointer button was pressed at the given screen position.
    PointerDown { x: f64, y: f64 },
    /// A pointer button was released.
    PointerUp,
    /// The pointer moved to the given screen position.
    PointerMove { x: f64, y: f64 },
}

//! Input model: host surface events and the drag session.
//!
//! `SurfaceEvent` is the normalized form of everything the host forwards to
//! the engine: size changes, pointer sequences, and wheel ticks. All points
//! are surface-local CSS pixels (origin top-left), never page coordinates.
//! `DragSession` is the ephemeral pan gesture tracked between pointer-down
//! and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// A normalized event from the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// The surface's CSS size or device pixel ratio changed.
    Resize {
        width: f64,
        height: f64,
        #[serde(default = "default_dpr")]
        dpr: f64,
    },
    /// A pointer went down on the surface.
    PointerDown { x: f64, y: f64 },
    /// The pointer moved over the surface.
    PointerMove { x: f64, y: f64 },
    /// The pointer was released over the surface.
    PointerUp { x: f64, y: f64 },
    /// The pointer left the surface; ends any drag in progress.
    PointerLeave,
    /// A wheel or trackpad scroll over the surface. Only the vertical
    /// delta `dy` (positive = down) drives zoom; any other fields the host
    /// sends, such as a horizontal `dx`, are ignored.
    Wheel { x: f64, y: f64, dy: f64 },
    /// The user asked to return to the home view.
    Reset,
}

fn default_dpr() -> f64 {
    1.0
}

/// An in-progress pan gesture.
///
/// Exists only between drag-start and drag-end; the store drops it on
/// drag-end rather than flagging it inactive, so a stale pointer can never be
/// read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Surface-local position of the previous pointer event.
    pub last_pointer: Point,
}

impl DragSession {
    #[must_use]
    pub fn new(anchor: Point) -> Self {
        Self { last_pointer: anchor }
    }

    /// Advance to `pointer`, returning the screen-space delta since the last step.
    pub fn advance(&mut self, pointer: Point) -> Point {
        let delta = Point::new(pointer.x - self.last_pointer.x, pointer.y - self.last_pointer.y);
        self.last_pointer = pointer;
        delta
    }
}

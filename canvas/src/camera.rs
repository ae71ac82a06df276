#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl WorldRect {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Camera state for pan/zoom on the infinite plane.
///
/// `offset_x` / `offset_y` are the world coordinates mapped to the centre of
/// the surface. `zoom` is the world-to-screen multiplier (1.0 = no zoom).
/// `width` / `height` are the surface size in CSS pixels, `0` until the host
/// reports the first resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, zoom: 1.0, width: 0.0, height: 0.0 }
    }
}

impl Viewport {
    /// Screen-space centre of the surface.
    #[must_use]
    pub fn center_screen(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// World point currently under the centre of the surface.
    #[must_use]
    pub fn center_world(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Convert a screen-space point (CSS pixels, origin top-left) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        let center = self.center_screen();
        Point {
            x: (screen.x - center.x) / self.zoom + self.offset_x,
            y: (screen.y - center.y) / self.zoom + self.offset_y,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        let center = self.center_screen();
        Point {
            x: (world.x - self.offset_x) * self.zoom + center.x,
            y: (world.y - self.offset_y) * self.zoom + center.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// The world-space rectangle covered by the surface.
    ///
    /// Equivalent to mapping the corners `(0, 0)` and `(width, height)`
    /// through [`Viewport::screen_to_world`].
    #[must_use]
    pub fn visible_world_rect(&self) -> WorldRect {
        let top_left = self.screen_to_world(Point::new(0.0, 0.0));
        let bottom_right = self.screen_to_world(Point::new(self.width, self.height));
        WorldRect { left: top_left.x, top: top_left.y, right: bottom_right.x, bottom: bottom_right.y }
    }

    /// Zoom formatted for display, e.g. `"1.00000x"`.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("{:.5}x", self.zoom)
    }
}

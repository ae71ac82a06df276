//! Grid geometry: the reference lines visible through a viewport.
//!
//! The grid is a pure function of a [`Viewport`] snapshot. Line spacing is
//! fixed in world units, so on-screen density follows zoom. Only when an axis
//! would exceed the line cap does the grid thin to every n-th line, still
//! spanning the whole surface. Lines are produced lazily by [`GridLines`];
//! callers may build the iterator as often as they like per frame.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Viewport, WorldRect};
use crate::consts::{GRID_MAX_LINES_PER_AXIS, GRID_SIZE};

/// Grid spacing and the per-axis line cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    /// Distance between adjacent lines, in world units.
    pub size: f64,
    /// Maximum number of lines emitted per axis.
    pub max_lines_per_axis: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { size: GRID_SIZE, max_lines_per_axis: GRID_MAX_LINES_PER_AXIS }
    }
}

impl GridSpec {
    /// Lines visible through `viewport`.
    #[must_use]
    pub fn lines(&self, viewport: &Viewport) -> GridLines {
        grid_lines(viewport, self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Constant x, spanning top to bottom.
    Vertical,
    /// Constant y, spanning left to right.
    Horizontal,
}

/// One grid line segment in world space.
///
/// `coordinate` is the x of a vertical line or the y of a horizontal one;
/// `from`/`to` bound the perpendicular extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub orientation: Orientation,
    pub coordinate: f64,
    pub from: f64,
    pub to: f64,
}

impl GridLine {
    /// Start and end points of the segment in world space.
    #[must_use]
    pub fn endpoints(&self) -> (Point, Point) {
        match self.orientation {
            Orientation::Vertical => (Point::new(self.coordinate, self.from), Point::new(self.coordinate, self.to)),
            Orientation::Horizontal => (Point::new(self.from, self.coordinate), Point::new(self.to, self.coordinate)),
        }
    }
}

/// Multiples of the grid size along one axis.
///
/// When the visible span holds more multiples than the cap, the run thins out
/// to every `stride`-th multiple. Kept lines are multiples of `stride * size`
/// so they stay fixed in world space while panning.
#[derive(Debug, Clone, Copy)]
struct AxisRun {
    first_index: f64,
    stride: f64,
    count: usize,
}

impl AxisRun {
    const EMPTY: Self = Self { first_index: 0.0, stride: 1.0, count: 0 };

    /// Multiples `k * size` from `floor(min / size)` through `max`, using at
    /// most `cap` lines and always reaching within one stride of `max`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn new(min: f64, max: f64, size: f64, cap: usize) -> Self {
        let first_index = (min / size).floor();
        let last_index = (max / size).floor();
        let span = last_index - first_index + 1.0;
        if !span.is_finite() || span < 1.0 || cap == 0 {
            return Self::EMPTY;
        }
        let cap_f = cap as f64;
        if span <= cap_f {
            return Self { first_index, stride: 1.0, count: span as usize };
        }
        if cap == 1 {
            return Self { first_index, stride: 1.0, count: 1 };
        }
        // Aligning the start down to a stride multiple can add one line, so
        // size the stride for `cap - 1` gaps.
        let stride = (span / (cap_f - 1.0)).ceil();
        let first_step = (first_index / stride).floor();
        let last_step = (last_index / stride).floor();
        let count = (last_step - first_step + 1.0).min(cap_f) as usize;
        Self { first_index: first_step * stride, stride, count }
    }

    #[allow(clippy::cast_precision_loss)]
    fn coordinate(&self, i: usize, size: f64) -> f64 {
        (self.first_index + i as f64 * self.stride) * size
    }
}

/// Lazy, finite sequence of [`GridLine`]s: every vertical line, then every
/// horizontal line.
///
/// Cloning yields an independent iterator starting from the same position.
#[derive(Debug, Clone)]
pub struct GridLines {
    bounds: WorldRect,
    size: f64,
    vertical: AxisRun,
    horizontal: AxisRun,
    next_vertical: usize,
    next_horizontal: usize,
}

impl GridLines {
    fn empty(size: f64) -> Self {
        Self {
            bounds: WorldRect { left: 0.0, top: 0.0, right: 0.0, bottom: 0.0 },
            size,
            vertical: AxisRun::EMPTY,
            horizontal: AxisRun::EMPTY,
            next_vertical: 0,
            next_horizontal: 0,
        }
    }

    /// World rectangle the lines are clipped to.
    #[must_use]
    pub fn bounds(&self) -> WorldRect {
        self.bounds
    }

    /// Total number of vertical lines in the sequence.
    #[must_use]
    pub fn vertical_count(&self) -> usize {
        self.vertical.count
    }

    /// Total number of horizontal lines in the sequence.
    #[must_use]
    pub fn horizontal_count(&self) -> usize {
        self.horizontal.count
    }
}

impl Iterator for GridLines {
    type Item = GridLine;

    fn next(&mut self) -> Option<GridLine> {
        if self.next_vertical < self.vertical.count {
            let x = self.vertical.coordinate(self.next_vertical, self.size);
            self.next_vertical += 1;
            return Some(GridLine {
                orientation: Orientation::Vertical,
                coordinate: x,
                from: self.bounds.top,
                to: self.bounds.bottom,
            });
        }
        if self.next_horizontal < self.horizontal.count {
            let y = self.horizontal.coordinate(self.next_horizontal, self.size);
            self.next_horizontal += 1;
            return Some(GridLine {
                orientation: Orientation::Horizontal,
                coordinate: y,
                from: self.bounds.left,
                to: self.bounds.right,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining =
            (self.vertical.count - self.next_vertical) + (self.horizontal.count - self.next_horizontal);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridLines {}

impl std::iter::FusedIterator for GridLines {}

/// Grid lines visible through `viewport` for the given spacing.
///
/// A surface with zero width or height shows nothing and yields no lines.
#[must_use]
pub fn grid_lines(viewport: &Viewport, spec: &GridSpec) -> GridLines {
    let size = spec.size;
    if viewport.width <= 0.0 || viewport.height <= 0.0 || size.is_nan() || size <= 0.0 {
        return GridLines::empty(size);
    }
    let bounds = viewport.visible_world_rect();
    GridLines {
        bounds,
        size,
        vertical: AxisRun::new(bounds.left, bounds.right, size, spec.max_lines_per_axis),
        horizontal: AxisRun::new(bounds.top, bounds.bottom, size, spec.max_lines_per_axis),
        next_vertical: 0,
        next_horizontal: 0,
    }
}

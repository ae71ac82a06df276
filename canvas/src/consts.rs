//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor the store will ever hold.
pub const ZOOM_MIN: f64 = 1e-5;

/// Largest zoom factor the store will ever hold.
pub const ZOOM_MAX: f64 = 5.0;

/// Multiplier applied for one zoom-in wheel step.
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Multiplier applied for one zoom-out wheel step.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Grid ────────────────────────────────────────────────────────

/// Spacing between grid lines, in world units.
pub const GRID_SIZE: f64 = 100.0;

/// Upper bound on lines emitted per axis, so far-out zoom stays cheap.
pub const GRID_MAX_LINES_PER_AXIS: usize = 2048;

/// Grid stroke color.
pub const GRID_STROKE: &str = "rgba(255, 255, 255, 0.1)";

/// Grid stroke width in screen pixels (constant regardless of zoom).
pub const GRID_LINE_WIDTH_PX: f64 = 1.0;

// ── Host ────────────────────────────────────────────────────────

/// Delay before the one-shot re-measure requested after mount.
pub const REMEASURE_DELAY_MS: u32 = 100;

/// Cursor shown while idle over the surface.
pub const CURSOR_IDLE: &str = "grab";

/// Cursor shown while a drag session is active.
pub const CURSOR_DRAGGING: &str = "grabbing";

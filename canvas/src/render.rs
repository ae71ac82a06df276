//! Rendering: paints the reference grid to a 2D context.
//!
//! This module is the only place that issues drawing calls on a
//! [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only viewport snapshot and produces pixels; it never
//! mutates engine state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Viewport;
use crate::consts::{GRID_LINE_WIDTH_PX, GRID_STROKE};
use crate::grid::{GridLines, GridSpec};

/// A 2D affine transform in `setTransform(a, b, c, d, e, f)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    /// Uniform scale with no translation.
    #[must_use]
    pub fn scale(s: f64) -> Self {
        Self { a: s, b: 0.0, c: 0.0, d: s, e: 0.0, f: 0.0 }
    }

    /// World-to-backing-store transform for a viewport at the given DPR.
    ///
    /// Equivalent to `scale(dpr)`, `translate(w/2, h/2)`, `scale(zoom)`,
    /// `translate(-offset)` applied in that order.
    #[must_use]
    pub fn world_to_device(viewport: &Viewport, dpr: f64) -> Self {
        let s = dpr * viewport.zoom;
        Self {
            a: s,
            b: 0.0,
            c: 0.0,
            d: s,
            e: dpr * (viewport.width * 0.5 - viewport.offset_x * viewport.zoom),
            f: dpr * (viewport.height * 0.5 - viewport.offset_y * viewport.zoom),
        }
    }

    fn apply(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        ctx.set_transform(self.a, self.b, self.c, self.d, self.e, self.f)
    }
}

/// Draw one frame: clear the surface, then stroke the grid.
///
/// `viewport.width` / `viewport.height` are CSS pixels; `dpr` is the device
/// pixel ratio the backing store was sized with.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, viewport: &Viewport, grid: &GridSpec, dpr: f64) -> Result<(), JsValue> {
    // Layer 1: clear in CSS pixel space.
    Affine::scale(dpr).apply(ctx)?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);

    // Layer 2: grid in world space.
    Affine::world_to_device(viewport, dpr).apply(ctx)?;
    stroke_grid(ctx, grid.lines(viewport), viewport.zoom);

    Ok(())
}

/// Stroke every line as one path with a constant on-screen width.
fn stroke_grid(ctx: &CanvasRenderingContext2d, lines: GridLines, zoom: f64) {
    ctx.set_stroke_style_str(GRID_STROKE);
    ctx.set_line_width(GRID_LINE_WIDTH_PX / zoom);
    ctx.begin_path();
    for line in lines {
        let (from, to) = line.endpoints();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
    }
    ctx.stroke();
}

use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Point, Viewport};
use crate::config::{ConfigError, ViewportConfig};
use crate::consts::{CURSOR_DRAGGING, CURSOR_IDLE, REMEASURE_DELAY_MS};
use crate::grid::GridLines;
use crate::input::SurfaceEvent;
use crate::render;
use crate::store::ViewportStore;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// The viewport changed; repaint on the next frame.
    RenderNeeded,
    /// Set the CSS cursor on the surface element.
    SetCursor(String),
    /// Measure the surface again after `delay_ms` and report it via resize.
    ScheduleRemeasure { delay_ms: u32 },
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub store: ViewportStore,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self { store: ViewportStore::default(), dpr: 1.0 }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine around a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn with_config(config: ViewportConfig) -> Result<Self, ConfigError> {
        Ok(Self { store: ViewportStore::new(config)?, dpr: 1.0 })
    }

    // --- Surface ---

    /// First measurement after the surface is attached.
    ///
    /// Layout may not have settled yet, so the host is asked to measure once
    /// more shortly afterwards.
    pub fn mount(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let mut actions = self.on_resize(width_css, height_css, dpr);
        actions.push(Action::SetCursor(self.cursor().to_owned()));
        actions.push(Action::ScheduleRemeasure { delay_ms: REMEASURE_DELAY_MS });
        actions
    }

    /// Update surface dimensions (CSS pixels) and device pixel ratio.
    pub fn on_resize(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let before = self.store.snapshot();
        let before_dpr = self.dpr;
        self.dpr = sanitize_dpr(dpr);
        self.store.resize(width_css, height_css);
        render_if(before != self.store.snapshot() || before_dpr.to_bits() != self.dpr.to_bits())
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        self.store.drag_start(screen_pt.x, screen_pt.y);
        if self.store.is_dragging() {
            vec![Action::SetCursor(CURSOR_DRAGGING.to_owned())]
        } else {
            Vec::new()
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if !self.store.is_dragging() {
            return Vec::new();
        }
        let before = self.store.snapshot();
        self.store.drag_move(screen_pt.x, screen_pt.y);
        render_if_changed(before, self.store.snapshot())
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point) -> Vec<Action> {
        self.end_drag()
    }

    /// A pointer leaving the surface ends the drag just like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_drag()
    }

    /// Zoom one step about the pointer.
    ///
    /// The host must suppress the browser's default scroll for wheel events
    /// over the surface and pass surface-local coordinates.
    pub fn on_wheel(&mut self, screen_pt: Point, delta_y: f64) -> Vec<Action> {
        let before = self.store.snapshot();
        self.store.zoom_at(delta_y, screen_pt.x, screen_pt.y);
        render_if_changed(before, self.store.snapshot())
    }

    /// Return to the home view.
    pub fn reset(&mut self) -> Vec<Action> {
        let before = self.store.snapshot();
        self.store.reset();
        render_if_changed(before, self.store.snapshot())
    }

    /// Dispatch a normalized surface event to the matching handler.
    pub fn handle(&mut self, event: SurfaceEvent) -> Vec<Action> {
        match event {
            SurfaceEvent::Resize { width, height, dpr } => self.on_resize(width, height, dpr),
            SurfaceEvent::PointerDown { x, y } => self.on_pointer_down(Point::new(x, y)),
            SurfaceEvent::PointerMove { x, y } => self.on_pointer_move(Point::new(x, y)),
            SurfaceEvent::PointerUp { x, y } => self.on_pointer_up(Point::new(x, y)),
            SurfaceEvent::PointerLeave => self.on_pointer_leave(),
            SurfaceEvent::Wheel { x, y, dy } => self.on_wheel(Point::new(x, y), dy),
            SurfaceEvent::Reset => self.reset(),
        }
    }

    fn end_drag(&mut self) -> Vec<Action> {
        if !self.store.is_dragging() {
            return Vec::new();
        }
        self.store.drag_end();
        vec![Action::SetCursor(CURSOR_IDLE.to_owned())]
    }

    // --- Queries ---

    /// The current viewport snapshot.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.store.snapshot()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.store.is_dragging()
    }

    /// CSS cursor matching the current drag state.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        if self.store.is_dragging() { CURSOR_DRAGGING } else { CURSOR_IDLE }
    }

    /// Grid lines for the current viewport.
    #[must_use]
    pub fn grid_lines(&self) -> GridLines {
        self.store.config().grid.lines(&self.store.snapshot())
    }

    /// Backing-store size in device pixels for the current surface and DPR.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn backing_size(&self) -> (u32, u32) {
        let vp = self.store.snapshot();
        ((vp.width * self.dpr).round() as u32, (vp.height * self.dpr).round() as u32)
    }
}

fn render_if_changed(before: Viewport, after: Viewport) -> Vec<Action> {
    render_if(before != after)
}

fn render_if(needed: bool) -> Vec<Action> {
    if needed { vec![Action::RenderNeeded] } else { Vec::new() }
}

fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        warn!(dpr, "invalid device pixel ratio, using 1.0");
        1.0
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// One engine is created per mounted canvas and dropped when it unmounts.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn with_config(canvas: HtmlCanvasElement, config: ViewportConfig) -> Result<Self, ConfigError> {
        Ok(Self { canvas, core: EngineCore::with_config(config)? })
    }

    // --- Viewport ---

    /// First measurement after mount; also sizes the backing store.
    pub fn mount(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.mount(width_css, height_css, dpr);
        self.sync_backing_store();
        actions
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.on_resize(width_css, height_css, dpr);
        self.sync_backing_store();
        actions
    }

    fn sync_backing_store(&self) {
        let (width, height) = self.core.backing_size();
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta_y: f64) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta_y)
    }

    pub fn reset(&mut self) -> Vec<Action> {
        self.core.reset()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// A missing 2D context skips the frame; engine state is never touched.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` drawing call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let context: Option<js_sys::Object> = match self.canvas.get_context("2d") {
            Ok(context) => context,
            Err(err) => {
                warn!(?err, "2d context lookup failed, skipping frame");
                return Ok(());
            }
        };
        let Some(context) = context else {
            debug!("no 2d context, skipping frame");
            return Ok(());
        };
        let Ok(ctx) = context.dyn_into::<CanvasRenderingContext2d>() else {
            debug!("context is not 2d, skipping frame");
            return Ok(());
        };
        render::draw(&ctx, &self.core.viewport(), &self.core.store.config().grid, self.core.dpr)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport()
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.core.cursor()
    }
}

//! Viewport state store: the single owner of camera state and drag session.
//!
//! Every mutation of the [`Viewport`] goes through this type. Operations are
//! total over finite input: a zoom request past the limits is clamped, a
//! drag-move without a drag is ignored, and a zero-sized surface is accepted
//! as a transient state. Non-finite input is outside the domain and dropped
//! with a warning so the invariants below can never be broken:
//!
//! - `zoom` stays inside `[zoom_min, zoom_max]` of the active config.
//! - `width` / `height` are always the last size reported via [`ViewportStore::resize`].
//! - offsets stay finite.
//!
//! Each operation computes the complete next [`Viewport`] before assigning
//! it, so a reader never observes zoom and offset from different steps.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::{debug, trace, warn};

use crate::camera::{Point, Viewport};
use crate::config::{ConfigError, ViewportConfig};
use crate::input::DragSession;

#[derive(Debug, Clone, Default)]
pub struct ViewportStore {
    config: ViewportConfig,
    viewport: Viewport,
    drag: Option<DragSession>,
}

impl ViewportStore {
    /// Create a store at the home view with an unmeasured surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: ViewportConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, viewport: Viewport::default(), drag: None })
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    // --- Queries ---

    /// An immutable copy of the current viewport.
    #[must_use]
    pub fn snapshot(&self) -> Viewport {
        self.viewport
    }

    /// Whether a drag session is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The active drag session, if any.
    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag
    }

    // --- Surface ---

    /// Record the surface size in CSS pixels.
    ///
    /// Offset, zoom, and any drag in progress are left untouched; the drag
    /// keeps working in surface-local coordinates.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            warn!(width, height, "ignoring resize outside the valid domain");
            return;
        }
        debug!(width, height, "viewport resized");
        self.viewport = Viewport { width, height, ..self.viewport };
    }

    // --- Pan ---

    /// Begin a pan gesture anchored at a surface-local point.
    ///
    /// A second start while already dragging re-anchors instead of stacking.
    pub fn drag_start(&mut self, screen_x: f64, screen_y: f64) {
        let anchor = Point::new(screen_x, screen_y);
        if !anchor.is_finite() {
            warn!(screen_x, screen_y, "ignoring drag start at non-finite point");
            return;
        }
        if self.drag.is_some() {
            debug!(screen_x, screen_y, "drag re-anchored");
        } else {
            debug!(screen_x, screen_y, "drag started");
        }
        self.drag = Some(DragSession::new(anchor));
    }

    /// Pan by the pointer travel since the previous step. No-op without a drag.
    pub fn drag_move(&mut self, screen_x: f64, screen_y: f64) {
        let Some(session) = self.drag.as_mut() else {
            return;
        };
        let pointer = Point::new(screen_x, screen_y);
        if !pointer.is_finite() {
            warn!(screen_x, screen_y, "ignoring drag move to non-finite point");
            return;
        }
        let delta = session.advance(pointer);
        let vp = self.viewport;
        self.viewport = Viewport {
            offset_x: vp.offset_x - delta.x / vp.zoom,
            offset_y: vp.offset_y - delta.y / vp.zoom,
            ..vp
        };
        trace!(
            dx = delta.x,
            dy = delta.y,
            offset_x = self.viewport.offset_x,
            offset_y = self.viewport.offset_y,
            "drag moved"
        );
    }

    /// End the pan gesture and discard its session.
    pub fn drag_end(&mut self) {
        if self.drag.take().is_some() {
            debug!("drag ended");
        }
    }

    // --- Zoom ---

    /// Zoom one step about a surface-local anchor.
    ///
    /// Only the sign of `delta` matters; see [`ViewportConfig::zoom_factor`].
    /// The world point under the anchor stays under the anchor. When the zoom
    /// limits cut the step short the offset is solved for the clamped zoom, so
    /// the anchor still holds; at the limit itself nothing moves.
    pub fn zoom_at(&mut self, delta: f64, screen_x: f64, screen_y: f64) {
        let Some(factor) = self.config.zoom_factor(delta) else {
            return;
        };
        let anchor = Point::new(screen_x, screen_y);
        if !anchor.is_finite() {
            warn!(screen_x, screen_y, "ignoring zoom at non-finite point");
            return;
        }

        let before = self.viewport;
        let new_zoom = self.config.clamp_zoom(before.zoom * factor);
        let world = before.screen_to_world(anchor);
        let center = before.center_screen();
        let rel_x = anchor.x - center.x;
        let rel_y = anchor.y - center.y;

        self.viewport = Viewport {
            offset_x: world.x - rel_x / new_zoom,
            offset_y: world.y - rel_y / new_zoom,
            zoom: new_zoom,
            ..before
        };
        trace!(from = before.zoom, to = new_zoom, "zoomed");
    }

    // --- Whole-state updates ---

    /// Return to the home view: origin centred, zoom 1. Surface size is kept.
    pub fn reset(&mut self) {
        debug!("viewport reset");
        self.viewport = Viewport {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: self.config.clamp_zoom(1.0),
            ..self.viewport
        };
    }

    /// Replace offset and zoom wholesale.
    ///
    /// `zoom` is clamped to the configured limits and `width`/`height` from
    /// `next` are ignored in favour of the last reported surface size. A
    /// viewport with non-finite offset or zoom is rejected.
    pub fn set_viewport(&mut self, next: Viewport) {
        if let Some(vp) = self.admit(next) {
            self.viewport = vp;
        }
    }

    /// Derive the next viewport from the current one.
    ///
    /// The result is admitted under the same rules as [`ViewportStore::set_viewport`].
    pub fn update_viewport(&mut self, transform: impl FnOnce(Viewport) -> Viewport) {
        let next = transform(self.viewport);
        self.set_viewport(next);
    }

    fn admit(&self, next: Viewport) -> Option<Viewport> {
        if !(next.offset_x.is_finite() && next.offset_y.is_finite() && next.zoom.is_finite()) {
            warn!(
                offset_x = next.offset_x,
                offset_y = next.offset_y,
                zoom = next.zoom,
                "rejecting non-finite viewport"
            );
            return None;
        }
        Some(Viewport {
            offset_x: next.offset_x,
            offset_y: next.offset_y,
            zoom: self.config.clamp_zoom(next.zoom),
            width: self.viewport.width,
            height: self.viewport.height,
        })
    }
}

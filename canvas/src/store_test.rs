#![allow(clippy::float_cmp)]

use super::*;
use crate::config::WheelConvention;
use crate::consts::{ZOOM_MAX, ZOOM_MIN};

// =============================================================
// Helpers
// =============================================================

const TOLERANCE: f64 = 1e-9;

fn store_800x600() -> ViewportStore {
    let mut store = ViewportStore::default();
    store.resize(800.0, 600.0);
    store
}

fn store_with(offset_x: f64, offset_y: f64, zoom: f64) -> ViewportStore {
    let mut store = store_800x600();
    store.set_viewport(Viewport { offset_x, offset_y, zoom, ..Viewport::default() });
    store
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Zoom at `anchor` and report where the pre-zoom world point lands afterwards.
fn anchor_after_zoom(store: &mut ViewportStore, delta: f64, anchor: Point) -> Point {
    let world = store.snapshot().screen_to_world(anchor);
    store.zoom_at(delta, anchor.x, anchor.y);
    store.snapshot().world_to_screen(world)
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_starts_at_home_view_unmeasured() {
    let store = ViewportStore::new(ViewportConfig::default()).unwrap();
    assert_eq!(store.snapshot(), Viewport::default());
    assert!(!store.is_dragging());
}

#[test]
fn new_rejects_invalid_config() {
    let cfg = ViewportConfig { zoom_min: 3.0, zoom_max: 2.0, ..ViewportConfig::default() };
    assert!(ViewportStore::new(cfg).is_err());
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_replaces_size_only() {
    let mut store = store_with(12.0, -4.0, 2.0);
    store.resize(1024.0, 768.0);
    let vp = store.snapshot();
    assert_eq!((vp.width, vp.height), (1024.0, 768.0));
    assert_eq!((vp.offset_x, vp.offset_y, vp.zoom), (12.0, -4.0, 2.0));
}

#[test]
fn resize_accepts_zero() {
    let mut store = store_800x600();
    store.resize(0.0, 0.0);
    assert_eq!(store.snapshot().width, 0.0);
    assert_eq!(store.snapshot().height, 0.0);
}

#[test]
fn resize_ignores_negative_or_non_finite() {
    let mut store = store_800x600();
    store.resize(-1.0, 10.0);
    store.resize(f64::NAN, 10.0);
    store.resize(10.0, f64::INFINITY);
    assert_eq!(store.snapshot().width, 800.0);
    assert_eq!(store.snapshot().height, 600.0);
}

#[test]
fn resize_during_drag_keeps_session_and_offset() {
    let mut store = store_800x600();
    store.drag_start(100.0, 100.0);
    store.resize(400.0, 300.0);
    assert!(store.is_dragging());
    assert_eq!(store.snapshot().offset_x, 0.0);
    store.drag_move(110.0, 100.0);
    assert_eq!(store.snapshot().offset_x, -10.0);
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_round_trip_at_zoom_one() {
    let mut store = store_800x600();
    store.drag_start(0.0, 0.0);
    store.drag_move(10.0, 0.0);
    store.drag_end();
    assert_eq!(store.snapshot().offset_x, -10.0);
    assert_eq!(store.snapshot().offset_y, 0.0);
}

#[test]
fn drag_round_trip_at_zoom_two() {
    let mut store = store_with(0.0, 0.0, 2.0);
    store.drag_start(0.0, 0.0);
    store.drag_move(10.0, 0.0);
    store.drag_end();
    assert_eq!(store.snapshot().offset_x, -5.0);
}

#[test]
fn drag_move_before_start_is_noop() {
    let mut store = store_with(3.0, 4.0, 1.5);
    let before = store.snapshot();
    store.drag_move(500.0, 500.0);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn drag_move_after_end_is_noop() {
    let mut store = store_800x600();
    store.drag_start(0.0, 0.0);
    store.drag_move(5.0, 5.0);
    store.drag_end();
    let before = store.snapshot();
    store.drag_move(50.0, 50.0);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn drag_end_discards_session() {
    let mut store = store_800x600();
    store.drag_start(1.0, 2.0);
    assert_eq!(store.drag_session(), Some(DragSession::new(Point::new(1.0, 2.0))));
    store.drag_end();
    assert_eq!(store.drag_session(), None);
    assert!(!store.is_dragging());
}

#[test]
fn drag_end_without_start_is_harmless() {
    let mut store = store_800x600();
    store.drag_end();
    assert!(!store.is_dragging());
    assert_eq!(store.snapshot().offset_x, 0.0);
}

#[test]
fn duplicate_drag_start_reanchors() {
    let mut store = store_800x600();
    store.drag_start(0.0, 0.0);
    store.drag_start(100.0, 0.0);
    store.drag_move(110.0, 0.0);
    // Only the 10px since the second anchor counts.
    assert_eq!(store.snapshot().offset_x, -10.0);
}

#[test]
fn drag_path_uses_incremental_deltas() {
    let mut store = store_800x600();
    store.drag_start(0.0, 0.0);
    for (x, y) in [(3.0, 1.0), (3.0, 1.0), (17.0, -9.0), (-2.0, 4.0), (20.0, 30.0)] {
        store.drag_move(x, y);
    }
    // Irregular steps still sum to the total pointer travel.
    assert_eq!(store.snapshot().offset_x, -20.0);
    assert_eq!(store.snapshot().offset_y, -30.0);
}

#[test]
fn drag_leaves_zoom_alone() {
    let mut store = store_with(0.0, 0.0, 0.5);
    store.drag_start(0.0, 0.0);
    store.drag_move(10.0, 20.0);
    let vp = store.snapshot();
    assert_eq!(vp.zoom, 0.5);
    assert_eq!(vp.offset_x, -20.0);
    assert_eq!(vp.offset_y, -40.0);
}

#[test]
fn drag_ignores_non_finite_points() {
    let mut store = store_800x600();
    store.drag_start(f64::NAN, 0.0);
    assert!(!store.is_dragging());
    store.drag_start(0.0, 0.0);
    store.drag_move(f64::INFINITY, 0.0);
    assert_eq!(store.snapshot().offset_x, 0.0);
    store.drag_move(4.0, 0.0);
    assert_eq!(store.snapshot().offset_x, -4.0);
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn zoom_in_at_center_never_pans() {
    let mut store = store_800x600();
    store.zoom_at(-1.0, 400.0, 300.0);
    let vp = store.snapshot();
    assert_eq!(vp.offset_x, 0.0);
    assert_eq!(vp.offset_y, 0.0);
    assert!(close(vp.zoom, 1.1));
}

#[test]
fn zoom_out_at_center_never_pans() {
    let mut store = store_800x600();
    store.zoom_at(1.0, 400.0, 300.0);
    let vp = store.snapshot();
    assert_eq!((vp.offset_x, vp.offset_y), (0.0, 0.0));
    assert!(close(vp.zoom, 0.9));
}

#[test]
fn zoom_step_ignores_delta_magnitude() {
    let mut a = store_800x600();
    let mut b = store_800x600();
    a.zoom_at(-1.0, 100.0, 50.0);
    b.zoom_at(-960.0, 100.0, 50.0);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn zoom_with_zero_delta_is_noop() {
    let mut store = store_with(5.0, 5.0, 2.0);
    let before = store.snapshot();
    store.zoom_at(0.0, 10.0, 10.0);
    store.zoom_at(f64::NAN, 10.0, 10.0);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn zoom_ignores_non_finite_anchor() {
    let mut store = store_800x600();
    store.zoom_at(-1.0, f64::NAN, 0.0);
    assert_eq!(store.snapshot().zoom, 1.0);
}

#[test]
fn zoom_preserves_anchor_across_states() {
    let anchors = [
        Point::new(0.0, 0.0),
        Point::new(800.0, 600.0),
        Point::new(123.0, 456.0),
        Point::new(-50.0, 700.0),
    ];
    let states = [(0.0, 0.0, 1.0), (1500.0, -320.0, 0.3), (-7.25, 99.5, 3.2), (1.0e6, 2.0e6, 0.001)];
    for (ox, oy, zoom) in states {
        for delta in [-1.0, 1.0] {
            for anchor in anchors {
                let mut store = store_with(ox, oy, zoom);
                let landed = anchor_after_zoom(&mut store, delta, anchor);
                assert!(
                    close(landed.x, anchor.x) && close(landed.y, anchor.y),
                    "state ({ox}, {oy}, {zoom}) delta {delta}: {anchor:?} -> {landed:?}"
                );
            }
        }
    }
}

#[test]
fn zoom_preserves_anchor_over_many_steps() {
    let mut store = store_with(250.0, -75.0, 1.0);
    let anchor = Point::new(620.0, 140.0);
    let world = store.snapshot().screen_to_world(anchor);
    for _ in 0..15 {
        store.zoom_at(-1.0, anchor.x, anchor.y);
    }
    for _ in 0..30 {
        store.zoom_at(1.0, anchor.x, anchor.y);
    }
    let landed = store.snapshot().world_to_screen(world);
    assert!((landed.x - anchor.x).abs() < 1e-6);
    assert!((landed.y - anchor.y).abs() < 1e-6);
}

#[test]
fn zoom_in_clamps_at_max() {
    let mut store = store_with(0.0, 0.0, ZOOM_MAX);
    for _ in 0..50 {
        store.zoom_at(-1.0, 10.0, 10.0);
        assert!(store.snapshot().zoom <= ZOOM_MAX);
    }
    assert_eq!(store.snapshot().zoom, ZOOM_MAX);
}

#[test]
fn zoom_out_clamps_at_min() {
    let mut store = store_with(0.0, 0.0, ZOOM_MIN);
    for _ in 0..50 {
        store.zoom_at(1.0, 790.0, 590.0);
        assert!(store.snapshot().zoom >= ZOOM_MIN);
    }
    assert_eq!(store.snapshot().zoom, ZOOM_MIN);
}

#[test]
fn zoom_out_from_home_reaches_min_and_stops() {
    let mut store = store_800x600();
    for _ in 0..500 {
        store.zoom_at(1.0, 400.0, 300.0);
    }
    assert_eq!(store.snapshot().zoom, ZOOM_MIN);
}

#[test]
fn saturated_zoom_at_boundary_does_not_pan() {
    let mut store = store_with(40.0, 60.0, ZOOM_MAX);
    store.zoom_at(-1.0, 0.0, 0.0);
    let vp = store.snapshot();
    assert_eq!(vp.zoom, ZOOM_MAX);
    assert!(close(vp.offset_x, 40.0));
    assert!(close(vp.offset_y, 60.0));
}

#[test]
fn partially_clamped_step_still_lands_anchor() {
    // 4.8 * 1.1 overshoots the max, so only part of the step applies.
    let mut store = store_with(0.0, 0.0, 4.8);
    let anchor = Point::new(700.0, 100.0);
    let landed = anchor_after_zoom(&mut store, -1.0, anchor);
    assert_eq!(store.snapshot().zoom, ZOOM_MAX);
    assert!(close(landed.x, anchor.x));
    assert!(close(landed.y, anchor.y));
}

#[test]
fn reversed_wheel_convention_flips_direction() {
    let cfg = ViewportConfig { wheel: WheelConvention::ScrollDownZoomsIn, ..ViewportConfig::default() };
    let mut store = ViewportStore::new(cfg).unwrap();
    store.resize(800.0, 600.0);
    store.zoom_at(1.0, 400.0, 300.0);
    assert!(store.snapshot().zoom > 1.0);
}

#[test]
fn zoom_on_unmeasured_surface_anchors_at_corner() {
    let mut store = ViewportStore::default();
    let landed = anchor_after_zoom(&mut store, -1.0, Point::new(30.0, 40.0));
    assert!(close(landed.x, 30.0));
    assert!(close(landed.y, 40.0));
}

// =============================================================
// Reset
// =============================================================

#[test]
fn reset_restores_home_view_and_keeps_size() {
    let mut store = store_800x600();
    store.drag_start(0.0, 0.0);
    store.drag_move(-300.0, 75.0);
    store.drag_end();
    store.zoom_at(-1.0, 10.0, 20.0);
    store.reset();
    assert_eq!(
        store.snapshot(),
        Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 1.0, width: 800.0, height: 600.0 }
    );
}

#[test]
fn reset_on_fresh_store_is_identity() {
    let mut store = ViewportStore::default();
    store.reset();
    assert_eq!(store.snapshot(), Viewport::default());
}

// =============================================================
// set_viewport / update_viewport
// =============================================================

#[test]
fn set_viewport_keeps_reported_size() {
    let mut store = store_800x600();
    store.set_viewport(Viewport { offset_x: 1.0, offset_y: 2.0, zoom: 3.0, width: 10.0, height: 10.0 });
    assert_eq!(
        store.snapshot(),
        Viewport { offset_x: 1.0, offset_y: 2.0, zoom: 3.0, width: 800.0, height: 600.0 }
    );
}

#[test]
fn set_viewport_clamps_zoom() {
    let mut store = store_800x600();
    store.set_viewport(Viewport { zoom: 100.0, ..store.snapshot() });
    assert_eq!(store.snapshot().zoom, ZOOM_MAX);
    store.set_viewport(Viewport { zoom: 0.0, ..store.snapshot() });
    assert_eq!(store.snapshot().zoom, ZOOM_MIN);
}

#[test]
fn set_viewport_rejects_non_finite() {
    let mut store = store_with(1.0, 1.0, 1.0);
    let before = store.snapshot();
    store.set_viewport(Viewport { offset_x: f64::NAN, ..before });
    store.set_viewport(Viewport { zoom: f64::INFINITY, ..before });
    assert_eq!(store.snapshot(), before);
}

#[test]
fn update_viewport_applies_transform() {
    let mut store = store_with(10.0, 20.0, 1.0);
    store.update_viewport(|vp| Viewport { offset_x: vp.offset_x * 2.0, zoom: vp.zoom * 2.0, ..vp });
    let vp = store.snapshot();
    assert_eq!(vp.offset_x, 20.0);
    assert_eq!(vp.offset_y, 20.0);
    assert_eq!(vp.zoom, 2.0);
}

#[test]
fn update_viewport_cannot_change_size() {
    let mut store = store_800x600();
    store.update_viewport(|vp| Viewport { width: 1.0, height: 1.0, ..vp });
    assert_eq!(store.snapshot().width, 800.0);
    assert_eq!(store.snapshot().height, 600.0);
}

#[test]
fn snapshot_is_a_copy() {
    let mut store = store_800x600();
    let mut snap = store.snapshot();
    snap.offset_x = 999.0;
    assert_eq!(store.snapshot().offset_x, 0.0);
    store.drag_start(0.0, 0.0);
    store.drag_move(1.0, 0.0);
    assert_eq!(snap.offset_x, 999.0);
}

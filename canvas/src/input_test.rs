#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// DragSession
// =============================================================

#[test]
fn drag_session_starts_at_anchor() {
    let s = DragSession::new(Point::new(3.0, 4.0));
    assert_eq!(s.last_pointer, Point::new(3.0, 4.0));
}

#[test]
fn drag_session_advance_returns_delta() {
    let mut s = DragSession::new(Point::new(10.0, 10.0));
    let d = s.advance(Point::new(15.0, 7.0));
    assert_eq!(d, Point::new(5.0, -3.0));
    assert_eq!(s.last_pointer, Point::new(15.0, 7.0));
}

#[test]
fn drag_session_deltas_sum_to_total_travel() {
    let mut s = DragSession::new(Point::new(0.0, 0.0));
    let steps = [Point::new(1.0, 0.0), Point::new(7.0, 2.0), Point::new(7.5, -4.0), Point::new(20.0, 1.0)];
    let (mut sx, mut sy) = (0.0, 0.0);
    for p in steps {
        let d = s.advance(p);
        sx += d.x;
        sy += d.y;
    }
    assert_eq!(sx, 20.0);
    assert_eq!(sy, 1.0);
}

#[test]
fn drag_session_repeated_position_is_zero_delta() {
    let mut s = DragSession::new(Point::new(5.0, 5.0));
    assert_eq!(s.advance(Point::new(5.0, 5.0)), Point::new(0.0, 0.0));
}

// =============================================================
// SurfaceEvent
// =============================================================

#[test]
fn surface_event_parses_resize_with_default_dpr() {
    let ev: SurfaceEvent = serde_json::from_str(r#"{"type":"resize","width":800,"height":600}"#).unwrap();
    assert_eq!(ev, SurfaceEvent::Resize { width: 800.0, height: 600.0, dpr: 1.0 });
}

#[test]
fn surface_event_parses_wheel_with_flat_delta() {
    let ev: SurfaceEvent = serde_json::from_str(r#"{"type":"wheel","x":400,"y":300,"dy":-120}"#).unwrap();
    assert_eq!(ev, SurfaceEvent::Wheel { x: 400.0, y: 300.0, dy: -120.0 });
}

#[test]
fn surface_event_wheel_ignores_horizontal_delta() {
    let ev: SurfaceEvent = serde_json::from_str(r#"{"type":"wheel","x":1,"y":2,"dx":35,"dy":4}"#).unwrap();
    assert_eq!(ev, SurfaceEvent::Wheel { x: 1.0, y: 2.0, dy: 4.0 });
}

#[test]
fn surface_event_parses_unit_variants() {
    let leave: SurfaceEvent = serde_json::from_str(r#"{"type":"pointer_leave"}"#).unwrap();
    assert_eq!(leave, SurfaceEvent::PointerLeave);
    let reset: SurfaceEvent = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
    assert_eq!(reset, SurfaceEvent::Reset);
}

#[test]
fn surface_event_rejects_unknown_type() {
    let result = serde_json::from_str::<SurfaceEvent>(r#"{"type":"pinch","scale":2}"#);
    assert!(result.is_err());
}

#[test]
fn surface_event_serializes_tag() {
    let json = serde_json::to_value(SurfaceEvent::PointerDown { x: 1.0, y: 2.0 }).unwrap();
    assert_eq!(json["type"], "pointer_down");
    assert_eq!(json["x"], 1.0);
}

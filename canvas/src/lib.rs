//! Viewport engine for an infinite pan/zoom plane with a reference grid.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and also
//! builds natively for the headless host. It owns the camera state for a
//! single drawing surface: converting between surface and world coordinates,
//! applying pan and zoom-at-cursor, and producing the grid lines to paint. The
//! host layer is responsible only for wiring DOM events to the engine and
//! executing the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Surface adapter: [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`store`] | Viewport state store: the only place camera state is mutated |
//! | [`camera`] | Viewport snapshot and coordinate conversions |
//! | [`grid`] | Lazy grid line geometry for a viewport |
//! | [`input`] | Surface events and the drag session |
//! | [`render`] | Paints the grid to a 2D context |
//! | [`config`] | Zoom limits, wheel convention, grid spacing |
//! | [`consts`] | Shared numeric constants (zoom limits, grid defaults, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod grid;
pub mod input;
pub mod render;
pub mod store;

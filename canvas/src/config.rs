//! Tunable engine parameters: zoom limits, wheel step policy, and grid spacing.
//!
//! Defaults come from [`crate::consts`]. Hosts may supply their own values (for
//! example deserialized from JSON); [`ViewportConfig::validate`] rejects
//! combinations that would break the store's invariants.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_MAX_LINES_PER_AXIS, GRID_SIZE, ZOOM_IN_FACTOR, ZOOM_MAX, ZOOM_MIN, ZOOM_OUT_FACTOR};
use crate::grid::GridSpec;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("zoom bounds must be finite and positive (min {min}, max {max})")]
    InvalidZoomBounds { min: f64, max: f64 },
    #[error("zoom_min {min} exceeds zoom_max {max}")]
    InvertedZoomBounds { min: f64, max: f64 },
    #[error("zoom_in_factor must be finite and greater than 1, got {0}")]
    InvalidZoomInFactor(f64),
    #[error("zoom_out_factor must lie strictly between 0 and 1, got {0}")]
    InvalidZoomOutFactor(f64),
    #[error("grid size must be finite and positive, got {0}")]
    InvalidGridSize(f64),
    #[error("grid line cap must be at least 1")]
    ZeroGridLineCap,
    #[error("unknown wheel convention '{0}' (expected 'scroll-down-zooms-out' or 'scroll-down-zooms-in')")]
    UnknownWheelConvention(String),
}

/// How the sign of a wheel delta maps to a zoom direction.
///
/// Only the sign matters; the magnitude of a wheel delta never changes the
/// step size.
///
/// The default follows browser convention (scroll down zooms out). This is
/// the reverse of a plain `delta > 0 => zoom in` rule; choose
/// [`WheelConvention::ScrollDownZoomsIn`] to get that mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WheelConvention {
    /// Positive delta (scroll down) zooms out; negative zooms in.
    #[default]
    ScrollDownZoomsOut,
    /// Positive delta (scroll down) zooms in; negative zooms out.
    ScrollDownZoomsIn,
}

impl FromStr for WheelConvention {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "scroll-down-zooms-out" => Ok(Self::ScrollDownZoomsOut),
            "scroll-down-zooms-in" => Ok(Self::ScrollDownZoomsIn),
            other => Err(ConfigError::UnknownWheelConvention(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub wheel: WheelConvention,
    pub grid: GridSpec,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            wheel: WheelConvention::default(),
            grid: GridSpec { size: GRID_SIZE, max_lines_per_axis: GRID_MAX_LINES_PER_AXIS },
        }
    }
}

impl ViewportConfig {
    /// Check that every parameter keeps the store's invariants satisfiable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds_ok = |v: f64| v.is_finite() && v > 0.0;
        if !bounds_ok(self.zoom_min) || !bounds_ok(self.zoom_max) {
            return Err(ConfigError::InvalidZoomBounds { min: self.zoom_min, max: self.zoom_max });
        }
        if self.zoom_min > self.zoom_max {
            return Err(ConfigError::InvertedZoomBounds { min: self.zoom_min, max: self.zoom_max });
        }
        if !self.zoom_in_factor.is_finite() || self.zoom_in_factor <= 1.0 {
            return Err(ConfigError::InvalidZoomInFactor(self.zoom_in_factor));
        }
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0) {
            return Err(ConfigError::InvalidZoomOutFactor(self.zoom_out_factor));
        }
        if !self.grid.size.is_finite() || self.grid.size <= 0.0 {
            return Err(ConfigError::InvalidGridSize(self.grid.size));
        }
        if self.grid.max_lines_per_axis == 0 {
            return Err(ConfigError::ZeroGridLineCap);
        }
        Ok(())
    }

    /// Clamp a zoom value into `[zoom_min, zoom_max]`.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.zoom_min, self.zoom_max)
    }

    /// The multiplicative step for a wheel delta, or `None` when the delta has
    /// no usable sign (zero or NaN).
    #[must_use]
    pub fn zoom_factor(&self, delta: f64) -> Option<f64> {
        let positive = if delta > 0.0 {
            true
        } else if delta < 0.0 {
            false
        } else {
            return None;
        };
        let zoom_in = match self.wheel {
            WheelConvention::ScrollDownZoomsOut => !positive,
            WheelConvention::ScrollDownZoomsIn => positive,
        };
        Some(if zoom_in { self.zoom_in_factor } else { self.zoom_out_factor })
    }
}

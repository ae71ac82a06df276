//! Viewport configuration parsed from environment variables.

use std::str::FromStr;

use canvas::config::{ConfigError, ViewportConfig, WheelConvention};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const ENV_ZOOM_MIN: &str = "UNIVERSE_ZOOM_MIN";
pub const ENV_ZOOM_MAX: &str = "UNIVERSE_ZOOM_MAX";
pub const ENV_ZOOM_IN_FACTOR: &str = "UNIVERSE_ZOOM_IN_FACTOR";
pub const ENV_ZOOM_OUT_FACTOR: &str = "UNIVERSE_ZOOM_OUT_FACTOR";
pub const ENV_WHEEL: &str = "UNIVERSE_WHEEL";
pub const ENV_GRID_SIZE: &str = "UNIVERSE_GRID_SIZE";
pub const ENV_GRID_MAX_LINES: &str = "UNIVERSE_GRID_MAX_LINES";

#[derive(Debug, thiserror::Error)]
pub enum EnvConfigError {
    #[error("{var} has malformed value `{value}`")]
    Malformed { var: &'static str, value: String },
    #[error("{var}: {source}")]
    Wheel { var: &'static str, source: ConfigError },
    #[error("invalid viewport config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Build a validated config from the process environment.
///
/// Optional, each falling back to the library default:
/// - `UNIVERSE_ZOOM_MIN`, `UNIVERSE_ZOOM_MAX`
/// - `UNIVERSE_ZOOM_IN_FACTOR`, `UNIVERSE_ZOOM_OUT_FACTOR`
/// - `UNIVERSE_WHEEL`: `scroll-down-zooms-out` (default) or `scroll-down-zooms-in`
/// - `UNIVERSE_GRID_SIZE`, `UNIVERSE_GRID_MAX_LINES`
///
/// # Errors
///
/// Returns [`EnvConfigError`] if a variable is set but unparseable, or the
/// resulting config fails validation.
pub fn from_env() -> Result<ViewportConfig, EnvConfigError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Same as [`from_env`] but reads variables through `lookup`.
///
/// # Errors
///
/// See [`from_env`].
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<ViewportConfig, EnvConfigError> {
    let mut config = ViewportConfig::default();

    override_parsed(&lookup, ENV_ZOOM_MIN, &mut config.zoom_min)?;
    override_parsed(&lookup, ENV_ZOOM_MAX, &mut config.zoom_max)?;
    override_parsed(&lookup, ENV_ZOOM_IN_FACTOR, &mut config.zoom_in_factor)?;
    override_parsed(&lookup, ENV_ZOOM_OUT_FACTOR, &mut config.zoom_out_factor)?;
    override_parsed(&lookup, ENV_GRID_SIZE, &mut config.grid.size)?;
    override_parsed(&lookup, ENV_GRID_MAX_LINES, &mut config.grid.max_lines_per_axis)?;

    if let Some(raw) = non_empty(&lookup, ENV_WHEEL) {
        config.wheel = WheelConvention::from_str(&raw).map_err(|source| EnvConfigError::Wheel { var: ENV_WHEEL, source })?;
    }

    config.validate()?;
    Ok(config)
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    lookup(var)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    slot: &mut T,
) -> Result<(), EnvConfigError> {
    let Some(raw) = non_empty(lookup, var) else {
        return Ok(());
    };
    *slot = raw
        .parse::<T>()
        .map_err(|_| EnvConfigError::Malformed { var, value: raw.clone() })?;
    Ok(())
}

mod config;
mod script;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use canvas::camera::{Point, Viewport};
use canvas::config::{ConfigError, ViewportConfig};
use canvas::engine::{Action, EngineCore};
use canvas::grid::GridLine;
use canvas::input::SurfaceEvent;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use crate::config::EnvConfigError;
use crate::script::ScriptError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("{0}")]
    Config(#[from] EnvConfigError),
    #[error("{0}")]
    Engine(#[from] ConfigError),
    #[error("script: {0}")]
    Script(#[from] ScriptError),
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "universe", about = "Headless host for the pan/zoom viewport engine")]
struct Cli {
    /// Log engine internals at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Surface size reported to the engine, in CSS pixels.
#[derive(Args, Debug, Clone, Copy)]
struct SurfaceArgs {
    #[arg(long, env = "UNIVERSE_WIDTH", default_value_t = 800.0)]
    width: f64,
    #[arg(long, env = "UNIVERSE_HEIGHT", default_value_t = 600.0)]
    height: f64,
    #[arg(long, env = "UNIVERSE_DPR", default_value_t = 1.0)]
    dpr: f64,
}

/// Camera position in world space.
#[derive(Args, Debug, Clone, Copy)]
struct CameraArgs {
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset_x: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset_y: f64,
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive the engine with a JSON-lines event script ("-" reads stdin).
    Replay {
        script: PathBuf,
        #[command(flatten)]
        surface: SurfaceArgs,
        /// Include the grid lines with every snapshot.
        #[arg(long)]
        grid: bool,
    },
    /// Print the grid lines visible in a viewport.
    Grid {
        #[command(flatten)]
        surface: SurfaceArgs,
        #[command(flatten)]
        camera: CameraArgs,
    },
    /// Map a point between surface and world space.
    Convert {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Treat the point as world coordinates and map it to the surface.
        #[arg(long)]
        to_screen: bool,
        #[command(flatten)]
        surface: SurfaceArgs,
        #[command(flatten)]
        camera: CameraArgs,
    },
}

/// One line of replay output.
#[derive(Serialize)]
struct ReplayRecord<'a> {
    line: usize,
    event: &'a SurfaceEvent,
    actions: &'a [Action],
    viewport: Viewport,
    zoom_label: String,
    dragging: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<Vec<GridLine>>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "universe failed");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    let config = config::from_env()?;
    match command {
        Command::Replay { script, surface, grid } => run_replay(config, &script, surface, grid),
        Command::Grid { surface, camera } => run_grid(config, surface, camera),
        Command::Convert { x, y, to_screen, surface, camera } => {
            run_convert(config, Point::new(x, y), to_screen, surface, camera)
        }
    }
}

fn run_replay(config: ViewportConfig, path: &Path, surface: SurfaceArgs, with_grid: bool) -> Result<(), CliError> {
    let steps = if path.as_os_str() == "-" {
        script::read_script(io::stdin().lock())?
    } else {
        let file = File::open(path).map_err(|source| CliError::Open { path: path.to_path_buf(), source })?;
        script::read_script(BufReader::new(file))?
    };
    tracing::info!(events = steps.len(), path = %path.display(), "replaying script");

    let mut core = EngineCore::with_config(config)?;
    let mount_actions = core.mount(surface.width, surface.height, surface.dpr);
    tracing::debug!(?mount_actions, "mounted");

    for step in &steps {
        let actions = core.handle(step.event);
        let viewport = core.viewport();
        let record = ReplayRecord {
            line: step.line,
            event: &step.event,
            actions: &actions,
            viewport,
            zoom_label: viewport.zoom_label(),
            dragging: core.is_dragging(),
            grid: with_grid.then(|| core.grid_lines().collect()),
        };
        print_json_line(&record)?;
    }
    Ok(())
}

fn run_grid(config: ViewportConfig, surface: SurfaceArgs, camera: CameraArgs) -> Result<(), CliError> {
    let core = positioned(config, surface, camera)?;
    let lines = core.grid_lines();
    tracing::info!(
        vertical = lines.vertical_count(),
        horizontal = lines.horizontal_count(),
        "grid"
    );
    for line in lines {
        print_json_line(&line)?;
    }
    Ok(())
}

fn run_convert(
    config: ViewportConfig,
    point: Point,
    to_screen: bool,
    surface: SurfaceArgs,
    camera: CameraArgs,
) -> Result<(), CliError> {
    let core = positioned(config, surface, camera)?;
    let viewport = core.viewport();
    let (screen, world) = if to_screen {
        (viewport.world_to_screen(point), point)
    } else {
        (point, viewport.screen_to_world(point))
    };
    print_json_line(&json!({ "screen": screen, "world": world, "viewport": viewport }))
}

/// An engine sized to `surface` and moved to `camera`.
fn positioned(config: ViewportConfig, surface: SurfaceArgs, camera: CameraArgs) -> Result<EngineCore, CliError> {
    let mut core = EngineCore::with_config(config)?;
    core.on_resize(surface.width, surface.height, surface.dpr);
    core.store.set_viewport(Viewport {
        offset_x: camera.offset_x,
        offset_y: camera.offset_y,
        zoom: camera.zoom,
        ..core.viewport()
    });
    Ok(core)
}

fn print_json_line(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string(value)?;
    println!("{rendered}");
    Ok(())
}

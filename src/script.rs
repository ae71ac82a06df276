//! Recorded surface event scripts.
//!
//! A script is JSON lines, one [`SurfaceEvent`] per line in the tagged form
//! the engine deserializes (`{"type":"wheel","x":400,"y":300,"dy":-120}`).
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;

use canvas::input::SurfaceEvent;

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Parse { line: usize, source: serde_json::Error },
}

/// One parsed event and the 1-based line it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub line: usize,
    pub event: SurfaceEvent,
}

/// Parse a single script line. Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns the JSON error if the line is not a valid event.
pub fn parse_line(raw: &str) -> Result<Option<SurfaceEvent>, serde_json::Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Read every event from `reader`, stopping at the first bad line.
///
/// # Errors
///
/// Returns [`ScriptError::Io`] on read failure and [`ScriptError::Parse`]
/// with the offending line number on malformed input.
pub fn read_script(reader: impl BufRead) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let parsed = parse_line(&line).map_err(|source| ScriptError::Parse { line: line_no, source })?;
        if let Some(event) = parsed {
            steps.push(ScriptStep { line: line_no, event });
        }
    }
    Ok(steps)
}

//! Recorded pointer scripts.
//!
//! A script is a JSON array of [`PointerEvent`]s, replayed in order:
//!
//! ```json
//! [
//!   {"type": "down", "x": 20, "y": 30},
//!   {"type": "move", "x": 20, "y": 80},
//!   {"type": "up",   "x": 20, "y": 80}
//! ]
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::PointerEvent;

/// Error type for reading pointer scripts.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error reading script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pointer script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses a script from JSON text.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] if the text is not an array of events.
pub fn parse_script(json: &str) -> Result<Vec<PointerEvent>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses the script at `path`.
///
/// # Errors
///
/// Returns [`ScriptError::Io`] if the file cannot be read, or
/// [`ScriptError::Parse`] if its content is invalid.
pub fn load_script(path: &Path) -> Result<Vec<PointerEvent>, ScriptError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&content)
}

//! Pointer event infrastructure.
//!
//! A platform (a window system, a test, a recorded script) reports mouse
//! activity as [`PointerEvent`]s.  The board session consumes them one at a
//! time; it never asks the platform for state.
//!
//! # Testability
//!
//! Events are plain data, so tests and the `replay` command build them
//! directly or read them from a JSON script (see [`script`]).

use serde::{Deserialize, Serialize};

pub mod script;

/// A mouse event in board coordinates.
///
/// The JSON form is tagged by `type`:
///
/// ```json
/// {"type": "down", "x": 20.0, "y": 30.0}
/// {"type": "cancel"}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// The primary button was pressed.
    Down { x: f64, y: f64 },
    /// The pointer moved, with or without a button held.
    Move { x: f64, y: f64 },
    /// The primary button was released.
    Up { x: f64, y: f64 },
    /// A full press and release without movement in between.
    Click { x: f64, y: f64 },
    /// The platform aborted the gesture (focus loss, Escape).
    Cancel,
}

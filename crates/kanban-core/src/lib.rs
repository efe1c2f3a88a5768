//! # kanban-core
//!
//! Shared library for the kanban board containing the board model, the
//! on-screen layout geometry, and the drop-target resolver used while a card
//! is being dragged.
//!
//! This crate has zero dependencies on OS APIs, UI frameworks, or storage.
//!
//! # Architecture overview (for beginners)
//!
//! The board has three fixed columns (`todo`, `in-progress`, `done`), each an
//! ordered list of text cards.  Cards are moved by dragging them with the
//! mouse: while the button is held, the card under the pointer decides where
//! the dragged card would land, and releasing the button commits the move.
//!
//! - **`domain::board`** – The ordered-list model and its mutation primitives.
//!   Every card id lives in exactly one column, at most once.
//!
//! - **`domain::geometry`** – Points, offsets and rectangles in screen units.
//!
//! - **`domain::layout`** – Where every column and card sits on screen for a
//!   given board, plus hit-testing ("what is under the pointer?").
//!
//! - **`domain::drop_target`** – Turns a pointer position into the column and
//!   insertion index the dragged card would be dropped at.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `kanban_core::Board` instead of `kanban_core::domain::board::Board`.
pub use domain::board::{Board, BoardError, Card, CardId, ColumnId};
pub use domain::drop_target::{resolve, DropAnchor, DropTarget};
pub use domain::geometry::{Offset, Point, Rect};
pub use domain::layout::{BoardLayout, CardLayout, ColumnLayout, HitTarget, LayoutMetrics};

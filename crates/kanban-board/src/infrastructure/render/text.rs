//! Plain-text board renderer.
//!
//! ```text
//! TODO (2)
//!   card-1f0c…  buy milk
//!   card-77ab…  call mom
//! IN-PROGRESS (0)
//!   (empty)
//! DONE (0)
//!   (empty)
//! ```

use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};

use kanban_core::{Board, BoardLayout};

use crate::application::board_session::BoardRenderer;

/// Renders every column with its cards, top to bottom.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for (column, cards) in board.columns() {
        let _ = writeln!(out, "{} ({})", column.as_str().to_uppercase(), cards.len());
        if cards.is_empty() {
            out.push_str("  (empty)\n");
        }
        for card in cards {
            let _ = writeln!(out, "  {}  {}", card.id, card.text);
        }
    }
    out
}

/// Describes the computed geometry of every column and card.
pub fn describe_layout(layout: &BoardLayout) -> String {
    let mut out = String::new();
    for col in layout.columns() {
        let c = &col.container;
        let _ = writeln!(
            out,
            "{}: container x={} y={} w={} h={}",
            col.column, c.x, c.y, c.width, c.height
        );
        for card in &col.cards {
            let r = &card.rect;
            let _ = writeln!(
                out,
                "  [{}] {}: x={} y={} w={} h={} mid_y={}",
                card.index,
                card.id,
                r.x,
                r.y,
                r.width,
                r.height,
                r.mid_y()
            );
        }
    }
    out
}

/// [`BoardRenderer`] that keeps the latest frame as text.
#[derive(Debug, Default)]
pub struct TextRenderer {
    frame: Mutex<String>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently rendered frame.
    pub fn frame(&self) -> String {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl BoardRenderer for TextRenderer {
    fn render(&self, board: &Board) {
        *self.frame.lock().unwrap_or_else(PoisonError::into_inner) = render_board(board);
    }
}

//! Drag feedback reported through `tracing`.
//!
//! A terminal has no floating proxy to draw, so each visual change becomes a
//! `trace!` event.  The drag-active flag is kept so callers can query it.

use std::sync::atomic::{AtomicBool, Ordering};

use kanban_core::{Card, CardId, DropAnchor, DropTarget, Point, Rect};
use tracing::trace;

use crate::application::drag_controller::DragFeedback;

/// [`DragFeedback`] that logs every visual change.
#[derive(Debug, Default)]
pub struct TracingFeedback {
    drag_active: AtomicBool,
}

impl TracingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the global drag-active flag is set.
    pub fn is_drag_active(&self) -> bool {
        self.drag_active.load(Ordering::Relaxed)
    }
}

impl DragFeedback for TracingFeedback {
    fn set_drag_active(&self, active: bool) {
        self.drag_active.store(active, Ordering::Relaxed);
        trace!(active, "drag flag");
    }

    fn show_proxy(&self, card: &Card, rect: Rect) {
        trace!(card = %card.id, x = rect.x, y = rect.y, w = rect.width, h = rect.height, "proxy shown");
    }

    fn move_proxy(&self, top_left: Point) {
        trace!(x = top_left.x, y = top_left.y, "proxy moved");
    }

    fn remove_proxy(&self) {
        trace!("proxy removed");
    }

    fn set_card_hidden(&self, card_id: &CardId, hidden: bool) {
        trace!(card = %card_id, hidden, "card visibility");
    }

    fn show_indicator(&self, target: &DropTarget, height: f64) {
        let anchor = match &target.anchor {
            DropAnchor::Before(id) => format!("before {id}"),
            DropAnchor::After(id) => format!("after {id}"),
            DropAnchor::End => "end".to_string(),
        };
        trace!(column = %target.column, index = target.index, %anchor, height, "indicator shown");
    }

    fn clear_indicator(&self) {
        trace!("indicator cleared");
    }
}

//! DragController: the pointer-driven card drag state machine.
//!
//! ```text
//!            begin_drag                 end_drag / cancel_drag
//!   Idle ──────────────────► Dragging ─────────────────────────► Idle
//!                              │   ▲
//!                              └───┘ on_move
//! ```
//!
//! While dragging, the original card stays in its sequence and is only hidden;
//! a floating proxy follows the pointer at the same grab point.  Hit-testing
//! always runs against the unchanged layout with the dragged card excluded.
//!
//! # Architecture
//!
//! Visual effects go through the [`DragFeedback`] trait, injected at
//! construction time.  The controller never touches the renderer or storage;
//! committing only mutates the [`Board`] passed to [`DragController::end_drag`].

use std::sync::Arc;

use kanban_core::{
    resolve, Board, BoardError, BoardLayout, Card, CardId, ColumnId, DropTarget, Offset, Point,
    Rect,
};
use tracing::{debug, info};

/// Visual side effects of a drag.
///
/// Infrastructure implementations draw or log them; test implementations
/// record the calls.
pub trait DragFeedback: Send + Sync {
    /// Sets or clears the global "a drag is in progress" flag.
    fn set_drag_active(&self, active: bool);

    /// Creates the floating proxy for `card`, sized and placed like `rect`.
    fn show_proxy(&self, card: &Card, rect: Rect);

    /// Moves the proxy so its top-left corner is at `top_left`.
    fn move_proxy(&self, top_left: Point);

    /// Removes the floating proxy.
    fn remove_proxy(&self);

    /// Hides or restores the original card in place.
    fn set_card_hidden(&self, card_id: &CardId, hidden: bool);

    /// Shows the insertion indicator at `target`.
    fn show_indicator(&self, target: &DropTarget, height: f64);

    /// Removes the insertion indicator, if any.
    fn clear_indicator(&self);
}

/// Data carried by an active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub card_id: CardId,
    pub origin: ColumnId,
    /// Pointer position relative to the card's top-left at drag start.
    pub grab_offset: Offset,
    /// The card's rectangle at drag start.
    pub card_rect: Rect,
    /// Drop target resolved on the latest move.
    pub target: Option<DropTarget>,
}

/// State of the controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// A move committed by [`DragController::end_drag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedMove {
    pub card_id: CardId,
    pub from: ColumnId,
    pub to: ColumnId,
    /// Index the card landed at.
    pub index: usize,
}

/// The drag state machine.
pub struct DragController {
    state: DragState,
    feedback: Arc<dyn DragFeedback>,
}

impl DragController {
    /// Creates an idle controller.
    pub fn new(feedback: Arc<dyn DragFeedback>) -> Self {
        Self {
            state: DragState::Idle,
            feedback,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Returns the active drag session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Starts dragging `card`, which currently sits in `origin` at `card_rect`.
    ///
    /// Returns `false` and does nothing when a drag is already active; drags
    /// never nest.
    pub fn begin_drag(&mut self, card: &Card, origin: ColumnId, card_rect: Rect, pointer: Point) -> bool {
        if self.is_dragging() {
            debug!(card = %card.id, "pointer-down ignored: drag already in progress");
            return false;
        }

        let session = DragSession {
            card_id: card.id.clone(),
            origin,
            grab_offset: pointer - card_rect.top_left(),
            card_rect,
            target: None,
        };

        self.feedback.show_proxy(card, card_rect);
        self.feedback.set_card_hidden(&card.id, true);
        self.feedback.set_drag_active(true);

        debug!(card = %card.id, column = %origin, "drag started");
        self.state = DragState::Dragging(session);
        true
    }

    /// Tracks the pointer during a drag.
    ///
    /// Moves the proxy, resolves the drop target against `layout`, and swaps
    /// the insertion indicator when the target changed.  Returns the current
    /// target.  Ignored while idle.
    pub fn on_move(&mut self, layout: &BoardLayout, pointer: Point) -> Option<&DropTarget> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };

        self.feedback.move_proxy(pointer - session.grab_offset);

        let target = resolve(layout, pointer, &session.card_id);
        if target != session.target {
            if session.target.is_some() {
                self.feedback.clear_indicator();
            }
            if let Some(t) = &target {
                self.feedback.show_indicator(t, session.card_rect.height);
            }
            debug!(card = %session.card_id, target = ?target, "drop target changed");
            session.target = target;
        }
        session.target.as_ref()
    }

    /// Ends the drag and commits the move if a target was resolved.
    ///
    /// Always returns to idle and removes every drag visual, whether or not
    /// the commit succeeds.  Returns `Ok(None)` for a drop with no target or
    /// when no drag was active.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CardNotFound`] if the dragged card is no longer in
    /// its origin column.
    pub fn end_drag(&mut self, board: &mut Board) -> Result<Option<CommittedMove>, BoardError> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return Ok(None);
        };

        self.feedback.remove_proxy();
        self.feedback.set_card_hidden(&session.card_id, false);

        let result = match &session.target {
            Some(target) => board
                .move_card(&session.card_id, session.origin, target.column, target.index)
                .map(|index| {
                    Some(CommittedMove {
                        card_id: session.card_id.clone(),
                        from: session.origin,
                        to: target.column,
                        index,
                    })
                }),
            None => Ok(None),
        };

        if session.target.is_some() {
            self.feedback.clear_indicator();
        }
        self.feedback.set_drag_active(false);

        match &result {
            Ok(Some(m)) => info!(card = %m.card_id, from = %m.from, to = %m.to, index = m.index, "card moved"),
            Ok(None) => debug!(card = %session.card_id, "drag released without a drop target"),
            Err(e) => debug!(card = %session.card_id, error = %e, "drag commit failed"),
        }
        result
    }

    /// Abandons the drag without touching the board.
    ///
    /// Returns `false` when no drag was active.
    pub fn cancel_drag(&mut self) -> bool {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return false;
        };

        self.feedback.remove_proxy();
        self.feedback.set_card_hidden(&session.card_id, false);
        if session.target.is_some() {
            self.feedback.clear_indicator();
        }
        self.feedback.set_drag_active(false);

        debug!(card = %session.card_id, "drag cancelled");
        true
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::render::mock::{FeedbackEvent, RecordingFeedback};
    use kanban_core::{DropAnchor, LayoutMetrics};

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            origin: Point::new(0.0, 0.0),
            column_width: 100.0,
            column_gap: 10.0,
            column_min_height: 50.0,
            header_height: 20.0,
            card_height: 30.0,
            card_gap: 4.0,
            padding: 5.0,
            delete_control_size: 10.0,
        }
    }

    /// todo = [a, b]: a at y 25..55 (mid 40), b at y 59..89 (mid 74).
    fn fixture() -> (DragController, Arc<RecordingFeedback>, Board, BoardLayout) {
        let feedback = Arc::new(RecordingFeedback::default());
        let controller = DragController::new(Arc::clone(&feedback) as Arc<dyn DragFeedback>);
        let mut board = Board::new();
        board.insert(ColumnId::Todo, 0, Card::with_id("a", "A")).unwrap();
        board.insert(ColumnId::Todo, 1, Card::with_id("b", "B")).unwrap();
        let layout = BoardLayout::compute(&board, &metrics());
        (controller, feedback, board, layout)
    }

    fn start(controller: &mut DragController, board: &Board, layout: &BoardLayout, id: &str, pointer: Point) {
        let id = CardId::new(id);
        let (column, card_layout) = layout.card(&id).unwrap();
        let card = board.card(&id).unwrap().clone();
        assert!(controller.begin_drag(&card, column, card_layout.rect, pointer));
    }

    // ── begin_drag ────────────────────────────────────────────────────────────

    #[test]
    fn test_begin_drag_enters_dragging_and_captures_grab_offset() {
        // Arrange
        let (mut controller, feedback, board, layout) = fixture();

        // Act
        start(&mut controller, &board, &layout, "a", Point::new(15.0, 30.0));

        // Assert
        let session = controller.session().unwrap();
        assert_eq!(session.card_id, CardId::new("a"));
        assert_eq!(session.origin, ColumnId::Todo);
        assert_eq!(session.grab_offset, Offset { dx: 10.0, dy: 5.0 });
        assert_eq!(session.target, None);
        assert_eq!(
            feedback.events(),
            vec![
                FeedbackEvent::ProxyShown {
                    card_id: CardId::new("a"),
                    rect: Rect::new(5.0, 25.0, 90.0, 30.0),
                },
                FeedbackEvent::CardHidden(CardId::new("a"), true),
                FeedbackEvent::DragActive(true),
            ]
        );
    }

    #[test]
    fn test_begin_drag_while_dragging_is_ignored() {
        // Arrange
        let (mut controller, feedback, board, layout) = fixture();
        start(&mut controller, &board, &layout, "a", Point::new(15.0, 30.0));
        let events_before = feedback.events().len();

        // Act
        let card_b = board.cards(ColumnId::Todo)[1].clone();
        let started = controller.begin_drag(&card_b, ColumnId::Todo, Rect::default(), Point::new(0.0, 0.0));

        // Assert
        assert!(!started);
        assert_eq!(controller.session().unwrap().card_id, CardId::new("a"));
        assert_eq!(feedback.events().len(), events_before);
    }

    // ── on_move ───────────────────────────────────────────────────────────────

    #[test]
    fn test_on_move_keeps_grab_offset_under_pointer() {
        let (mut controller, feedback, board, layout) = fixture();
        start(&mut controller, &board, &layout, "a", Point::new(15.0, 30.0));

        controller.on_move(&layout, Point::new(215.0, 300.0));

        assert!(feedback
            .events()
            .contains(&FeedbackEvent::ProxyMoved(Point::new(205.0, 295.0))));
    }

    #[test]
    fn test_on_move_shows_indicator_once_per_target() {
        // Arrange
        let (mut controller, feedback, board, layout) = fixture();
        start(&mut controller, &board, &layout, "a", Point::new(15.0, 30.0));

        // Act – two moves over the lower half of b resolve to the same target
        controller.on_move(&layout, Point::new(20.0, 80.0));
        controller.on_move(&layout, Point::new(25.0, 82.0));

        // Assert
        let shown: Vec<_> = feedback
            .events()
            .into_iter()
            .filter(|e| matches!(e, FeedbackEvent::IndicatorShown { .. }))
            .collect();
        assert_eq!(
            shown,
            vec![FeedbackEvent::IndicatorShown {
                target: DropTarget {
                    column: ColumnId::Todo,
                    index: 1,
                    anchor: DropAnchor::After(CardId::new("b")),
                },
                height: 30.0,
            }]
        );
    }

    #[test]
    fn test_on_move_off_board_clears_indicator_and_target() {
        let (mut controller, feedback, board, layout) = fixture();
        start(&mut controller, &board, &layout, "a", Point::new(15.0, 30.0));
        controller.on_move(&layout, Point::new(20.0, 80.0));

        let target = controller.on_move(&layout, Point::new(500.0, 500.0));

        assert_eq!(target, None);
        assert_eq!(feedback.events().last(), Some(&FeedbackEvent::IndicatorCleared));
        assert_eq!(controller.session().unwrap().target, None);
    }

    #[test]
    fn test_on_move_while_idle_does_nothing() {
        let (mut controller, feedback, _board, layout) = fixture();

        assert_eq!(controller.on_move(&layout, Point::new(20.0, 80.0)), None);
        assert!(feedback.events().is_empty());
    }

    // ── end_drag ──────────────────────────────────────────────────────────────

    #[test]
    fn test_end_drag_commits_resolved_target() {
        // Arrange
        let (mut controller, feedback, mut board, layout) = fixture();
        start(&mut controller, &board, &layout, "a", Point::new(15.0, 30.0));
        controller.on_move(&layout, Point::new(20.0, 80.0));

        // Act
        let committed = controller.end_drag(&mut board).unwrap();

        // Assert
        assert_eq!(
            committed,
            Some(CommittedMove {
                card_id: CardId::new("a"),
                from: ColumnId::Todo,
                to: ColumnId::Todo,
                index: 1,
            })
        );
        let order: Vec<_> = board.cards(ColumnId::Todo).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(controller.state(), &DragState::Idle);
        let events = feedback.events();
        let tail = &events[events.len() - 4..];
        assert_eq!(
            tail,
            &[
                FeedbackEvent::ProxyRemoved,
                FeedbackEvent::CardHidden(CardId::new("a"), false),
                FeedbackEvent::IndicatorCleared,
                FeedbackEvent::DragActive(false),
            ]
        );
    }

    #[test]
    fn test_end_drag_without_target_leaves_board_unchanged() {
        let (mut controller, _feedback, mut board, layout) = fixture();
        let before = board.clone();
        start(&mut controller, &board, &layout, "a", Point::new(15.0, 30.0));
        controller.on_move(&layout, Point::new(500.0, 500.0));

        let committed = controller.end_drag(&mut board).unwrap();

        assert_eq!(committed, None);
        assert_eq!(board, before);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_end_drag_returns_to_idle_even_when_commit_fails() {
        // Arrange – the dragged card disappears from the board mid-drag
        let (mut controller, feedback, mut board, layout) = fixture();
        start(&mut controller, &board, &layout, "a", Point::new(15.0, 30.0));
        controller.on_move(&layout, Point::new(20.0, 80.0));
        board.delete_card(ColumnId::Todo, &CardId::new("a"));

        // Act
        let result = controller.end_drag(&mut board);

        // Assert
        assert!(matches!(result, Err(BoardError::CardNotFound { .. })));
        assert!(!controller.is_dragging());
        assert_eq!(feedback.events().last(), Some(&FeedbackEvent::DragActive(false)));
    }

    #[test]
    fn test_end_drag_while_idle_is_noop() {
        let (mut controller, feedback, mut board, _layout) = fixture();

        assert_eq!(controller.end_drag(&mut board), Ok(None));
        assert!(feedback.events().is_empty());
    }

    // ── cancel_drag ───────────────────────────────────────────────────────────

    #[test]
    fn test_cancel_drag_discards_target() {
        let (mut controller, feedback, board, layout) = fixture();
        start(&mut controller, &board, &layout, "a", Point::new(15.0, 30.0));
        controller.on_move(&layout, Point::new(20.0, 80.0));

        assert!(controller.cancel_drag());

        assert!(!controller.is_dragging());
        assert!(feedback.events().contains(&FeedbackEvent::IndicatorCleared));
        assert_eq!(feedback.events().last(), Some(&FeedbackEvent::DragActive(false)));
        assert!(!controller.cancel_drag());
    }
}

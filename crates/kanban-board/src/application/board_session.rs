//! BoardSession: the board owner and entry point for every user action.
//!
//! The session holds the one [`Board`] instance, its current [`BoardLayout`],
//! and the [`DragController`].  Pointer events from the platform are fed to
//! [`BoardSession::handle_event`]; card creation and deletion come in through
//! [`BoardSession::add_card`] and [`BoardSession::delete_card`].
//!
//! Every committed mutation is followed by a full save and a full render, so
//! the state is durable and visible before the next input is processed.
//!
//! # Architecture
//!
//! Rendering, persistence, and drag visuals are injected as traits, making
//! the session fully unit-testable with recording doubles.

use std::sync::Arc;

use kanban_core::{Board, BoardError, BoardLayout, CardId, ColumnId, HitTarget, LayoutMetrics, Point};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::drag_controller::{CommittedMove, DragController, DragFeedback};
use crate::infrastructure::pointer::PointerEvent;

/// Error type for board session operations.
#[derive(Debug, Error, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("card text must not be empty")]
    EmptyCardText,
    /// No column holds a card with this id.
    #[error("card {0} is not on the board")]
    UnknownCard(CardId),
    /// The mutation was applied in memory but could not be saved.
    #[error("failed to persist board: {0}")]
    Persist(String),
}

/// Refreshes the on-screen cards from the board.
///
/// Implementations must be idempotent: each call replaces everything the
/// previous call produced.
pub trait BoardRenderer: Send + Sync {
    fn render(&self, board: &Board);
}

/// Loads and saves the board.
pub trait BoardPersistence: Send + Sync {
    /// Returns the stored board, or an empty board when nothing usable is stored.
    fn load(&self) -> Board;

    /// Overwrites the stored board.  Best effort: failures are reported, not retried.
    fn save(&self, board: &Board) -> Result<(), String>;
}

/// The board session use case.
pub struct BoardSession {
    board: Board,
    metrics: LayoutMetrics,
    layout: BoardLayout,
    controller: DragController,
    renderer: Arc<dyn BoardRenderer>,
    persistence: Arc<dyn BoardPersistence>,
}

impl BoardSession {
    /// Loads the board from `persistence` and prepares an idle session.
    ///
    /// Call [`BoardSession::start`] to draw the initial frame.
    pub fn new(
        persistence: Arc<dyn BoardPersistence>,
        renderer: Arc<dyn BoardRenderer>,
        feedback: Arc<dyn DragFeedback>,
        metrics: LayoutMetrics,
    ) -> Self {
        let board = persistence.load();
        let layout = BoardLayout::compute(&board, &metrics);
        info!(cards = board.total_cards(), "board loaded");
        Self {
            board,
            metrics,
            layout,
            controller: DragController::new(feedback),
            renderer,
            persistence,
        }
    }

    /// Renders the board once at startup.
    pub fn start(&self) {
        self.renderer.render(&self.board);
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the layout the pointer is hit-tested against.
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Returns the drag controller.
    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Creates a card from user input and appends it to `column`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmptyCardText`] if `text` is blank after trimming,
    /// or [`AppError::Persist`] if the board could not be saved.
    pub fn add_card(&mut self, column: ColumnId, text: &str) -> Result<CardId, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyCardText);
        }
        let id = self.board.add_card(column, text).id.clone();
        info!(card = %id, column = %column, "card added");
        self.commit()?;
        Ok(id)
    }

    /// Deletes a card.  Deleting an absent card is not an error.
    ///
    /// Returns whether a card was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persist`] if the board could not be saved.
    pub fn delete_card(&mut self, column: ColumnId, id: &CardId) -> Result<bool, AppError> {
        let removed = self.board.delete_card(column, id);
        if removed {
            info!(card = %id, column = %column, "card deleted");
        } else {
            debug!(card = %id, column = %column, "delete of absent card ignored");
        }
        self.commit()?;
        Ok(removed)
    }

    /// Moves a card directly, bypassing the pointer.
    ///
    /// `index` addresses `to` with the card already removed.  Returns the
    /// index the card landed at.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownCard`] if no column holds the card, or
    /// [`AppError::Persist`] if the board could not be saved.
    pub fn move_card(&mut self, id: &CardId, to: ColumnId, index: usize) -> Result<usize, AppError> {
        let from = self
            .board
            .find_column_of(id)
            .ok_or_else(|| AppError::UnknownCard(id.clone()))?;
        let landed = self.board.move_card(id, from, to, index)?;
        info!(card = %id, from = %from, to = %to, index = landed, "card moved");
        self.commit()?;
        Ok(landed)
    }

    /// Handles a pointer event from the platform layer.
    ///
    /// Returns the move committed by this event, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if a commit or delete fails.  The drag state is
    /// idle again in every case after a pointer-up.
    pub fn handle_event(&mut self, event: PointerEvent) -> Result<Option<CommittedMove>, AppError> {
        match event {
            PointerEvent::Down { x, y } => {
                self.handle_pointer_down(Point::new(x, y));
                Ok(None)
            }
            PointerEvent::Move { x, y } => {
                self.controller.on_move(&self.layout, Point::new(x, y));
                Ok(None)
            }
            PointerEvent::Up { .. } => self.handle_pointer_up(),
            PointerEvent::Click { x, y } => {
                self.handle_click(Point::new(x, y))?;
                Ok(None)
            }
            PointerEvent::Cancel => {
                self.controller.cancel_drag();
                Ok(None)
            }
        }
    }

    // ── Private event handlers ────────────────────────────────────────────────

    fn handle_pointer_down(&mut self, pointer: Point) {
        if self.controller.is_dragging() {
            debug!("pointer-down ignored during drag");
            return;
        }
        let Some(HitTarget::Card {
            column,
            card_id,
            rect,
            ..
        }) = self.layout.hit_test(pointer, None)
        else {
            return;
        };
        if let Some(card) = self.board.card(&card_id) {
            self.controller.begin_drag(card, column, rect, pointer);
        }
    }

    fn handle_pointer_up(&mut self) -> Result<Option<CommittedMove>, AppError> {
        let committed = self.controller.end_drag(&mut self.board)?;
        if committed.is_some() {
            self.commit()?;
        }
        Ok(committed)
    }

    fn handle_click(&mut self, pointer: Point) -> Result<(), AppError> {
        if self.controller.is_dragging() {
            return Ok(());
        }
        if let Some(HitTarget::DeleteControl { column, card_id }) = self.layout.hit_test(pointer, None) {
            self.delete_card(column, &card_id)?;
        }
        Ok(())
    }

    /// Saves, recomputes the layout, and re-renders after a mutation.
    fn commit(&mut self) -> Result<(), AppError> {
        let saved = self.persistence.save(&self.board);
        self.layout = BoardLayout::compute(&self.board, &self.metrics);
        self.renderer.render(&self.board);
        saved.map_err(|e| {
            warn!(error = %e, "board change kept in memory only");
            AppError::Persist(e)
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::render::mock::{RecordingFeedback, RecordingRenderer};
    use kanban_core::Card;
    use std::sync::Mutex;

    // ── Test doubles ──────────────────────────────────────────────────────────

    #[derive(Default)]
    struct InMemoryPersistence {
        stored: Mutex<Option<Board>>,
        saves: Mutex<u32>,
        should_fail: bool,
    }

    impl BoardPersistence for InMemoryPersistence {
        fn load(&self) -> Board {
            self.stored.lock().unwrap().clone().unwrap_or_default()
        }

        fn save(&self, board: &Board) -> Result<(), String> {
            *self.saves.lock().unwrap() += 1;
            if self.should_fail {
                return Err("quota exceeded".to_string());
            }
            *self.stored.lock().unwrap() = Some(board.clone());
            Ok(())
        }
    }

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

    fn make_session(
        initial: Board,
        should_fail: bool,
    ) -> (BoardSession, Arc<InMemoryPersistence>, Arc<RecordingRenderer>) {
        let persistence = Arc::new(InMemoryPersistence {
            stored: Mutex::new(Some(initial)),
            saves: Mutex::new(0),
            should_fail,
        });
        let renderer = Arc::new(RecordingRenderer::default());
        let session = BoardSession::new(
            Arc::clone(&persistence) as Arc<dyn BoardPersistence>,
            Arc::clone(&renderer) as Arc<dyn BoardRenderer>,
            Arc::new(RecordingFeedback::default()),
            metrics(),
        );
        (session, persistence, renderer)
    }

    fn todo_ab() -> Board {
        let mut board = Board::new();
        board.insert(ColumnId::Todo, 0, Card::with_id("a", "A")).unwrap();
        board.insert(ColumnId::Todo, 1, Card::with_id("b", "B")).unwrap();
        board
    }

    fn ids(board: &Board, column: ColumnId) -> Vec<&str> {
        board.cards(column).iter().map(|c| c.id.as_str()).collect()
    }

    // ── add / delete ──────────────────────────────────────────────────────────

    #[test]
    fn test_add_card_trims_saves_and_renders() {
        // Arrange
        let (mut session, persistence, renderer) = make_session(Board::new(), false);

        // Act
        let id = session.add_card(ColumnId::Todo, "  buy milk \n").unwrap();

        // Assert
        assert_eq!(session.board().cards(ColumnId::Todo)[0].text, "buy milk");
        assert_eq!(session.board().cards(ColumnId::Todo)[0].id, id);
        assert_eq!(*persistence.saves.lock().unwrap(), 1);
        assert_eq!(renderer.render_count(), 1);
        assert_eq!(persistence.load(), *session.board());
    }

    #[test]
    fn test_add_card_rejects_blank_text() {
        let (mut session, persistence, renderer) = make_session(Board::new(), false);

        assert_eq!(session.add_card(ColumnId::Done, "   "), Err(AppError::EmptyCardText));
        assert!(session.board().is_empty());
        assert_eq!(*persistence.saves.lock().unwrap(), 0);
        assert_eq!(renderer.render_count(), 0);
    }

    #[test]
    fn test_add_card_keeps_card_when_save_fails() {
        let (mut session, _persistence, renderer) = make_session(Board::new(), true);

        let result = session.add_card(ColumnId::Todo, "note");

        assert_eq!(result, Err(AppError::Persist("quota exceeded".to_string())));
        assert_eq!(session.board().len(ColumnId::Todo), 1);
        assert_eq!(renderer.render_count(), 1);
    }

    #[test]
    fn test_delete_card_is_idempotent() {
        let (mut session, _, _) = make_session(todo_ab(), false);

        assert_eq!(session.delete_card(ColumnId::Todo, &CardId::new("a")), Ok(true));
        assert_eq!(session.delete_card(ColumnId::Todo, &CardId::new("a")), Ok(false));
        assert_eq!(ids(session.board(), ColumnId::Todo), vec!["b"]);
    }

    // ── pointer events ────────────────────────────────────────────────────────

    #[test]
    fn test_drag_a_after_b_reorders_and_persists() {
        // Arrange
        let (mut session, persistence, renderer) = make_session(todo_ab(), false);

        // Act – grab a, move over lower half of b (mid 74), release
        session.handle_event(PointerEvent::Down { x: 20.0, y: 30.0 }).unwrap();
        session.handle_event(PointerEvent::Move { x: 20.0, y: 60.0 }).unwrap();
        session.handle_event(PointerEvent::Move { x: 20.0, y: 80.0 }).unwrap();
        let committed = session.handle_event(PointerEvent::Up { x: 20.0, y: 80.0 }).unwrap();

        // Assert
        assert_eq!(committed.map(|m| m.index), Some(1));
        assert_eq!(ids(session.board(), ColumnId::Todo), vec!["b", "a"]);
        assert_eq!(ids(&persistence.load(), ColumnId::Todo), vec!["b", "a"]);
        assert_eq!(renderer.render_count(), 1);
        assert!(!session.controller().is_dragging());
    }

    #[test]
    fn test_pointer_down_on_delete_control_does_not_start_drag() {
        let (mut session, _, _) = make_session(todo_ab(), false);

        session.handle_event(PointerEvent::Down { x: 90.0, y: 27.0 }).unwrap();

        assert!(!session.controller().is_dragging());
    }

    #[test]
    fn test_second_pointer_down_during_drag_is_ignored() {
        let (mut session, _, _) = make_session(todo_ab(), false);
        session.handle_event(PointerEvent::Down { x: 20.0, y: 30.0 }).unwrap();

        session.handle_event(PointerEvent::Down { x: 20.0, y: 65.0 }).unwrap();

        assert_eq!(
            session.controller().session().unwrap().card_id,
            CardId::new("a")
        );
    }

    #[test]
    fn test_release_over_background_changes_nothing() {
        let (mut session, persistence, renderer) = make_session(todo_ab(), false);
        let before = session.board().clone();

        session.handle_event(PointerEvent::Down { x: 20.0, y: 30.0 }).unwrap();
        session.handle_event(PointerEvent::Move { x: 105.0, y: 30.0 }).unwrap();
        let committed = session.handle_event(PointerEvent::Up { x: 105.0, y: 30.0 }).unwrap();

        assert_eq!(committed, None);
        assert_eq!(*session.board(), before);
        assert_eq!(*persistence.saves.lock().unwrap(), 0);
        assert_eq!(renderer.render_count(), 0);
    }

    #[test]
    fn test_click_on_delete_control_deletes_card() {
        let (mut session, _, _) = make_session(todo_ab(), false);

        session.handle_event(PointerEvent::Click { x: 90.0, y: 27.0 }).unwrap();

        assert_eq!(ids(session.board(), ColumnId::Todo), vec!["b"]);
        // Layout follows the board: b moved up into a's slot.
        assert!(matches!(
            session.layout().hit_test(Point::new(20.0, 30.0), None),
            Some(HitTarget::Card { index: 0, .. })
        ));
    }

    #[test]
    fn test_click_during_drag_is_suppressed() {
        let (mut session, _, _) = make_session(todo_ab(), false);
        session.handle_event(PointerEvent::Down { x: 20.0, y: 30.0 }).unwrap();

        session.handle_event(PointerEvent::Click { x: 90.0, y: 61.0 }).unwrap();

        assert_eq!(session.board().total_cards(), 2);
    }

    #[test]
    fn test_cancel_discards_drag() {
        let (mut session, _, _) = make_session(todo_ab(), false);
        session.handle_event(PointerEvent::Down { x: 20.0, y: 30.0 }).unwrap();
        session.handle_event(PointerEvent::Move { x: 20.0, y: 80.0 }).unwrap();

        session.handle_event(PointerEvent::Cancel).unwrap();
        let committed = session.handle_event(PointerEvent::Up { x: 20.0, y: 80.0 }).unwrap();

        assert_eq!(committed, None);
        assert_eq!(ids(session.board(), ColumnId::Todo), vec!["a", "b"]);
    }

    // ── move_card ─────────────────────────────────────────────────────────────

    #[test]
    fn test_move_card_unknown_id_fails() {
        // Arrange
        let (mut session, persistence, _) = make_session(todo_ab(), false);
        let before = session.board().clone();

        // Act
        let result = session.move_card(&CardId::new("zzz"), ColumnId::Done, 0);

        // Assert
        assert_eq!(result, Err(AppError::UnknownCard(CardId::new("zzz"))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "card zzz is not on the board"
        );
        assert_eq!(*session.board(), before);
        assert_eq!(*persistence.saves.lock().unwrap(), 0);
    }

    #[test]
    fn test_move_card_across_columns() {
        let (mut session, _, _) = make_session(todo_ab(), false);

        let landed = session.move_card(&CardId::new("b"), ColumnId::Done, 5).unwrap();

        assert_eq!(landed, 0);
        assert_eq!(ids(session.board(), ColumnId::Done), vec!["b"]);
    }
}

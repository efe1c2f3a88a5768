//! Recording adapters for unit and integration tests.
//!
//! Both types capture every call in order so tests can assert on exactly
//! what the application asked the screen to do.

use std::sync::Mutex;

use kanban_core::{Board, Card, CardId, DropTarget, Point, Rect};

use crate::application::board_session::BoardRenderer;
use crate::application::drag_controller::DragFeedback;

/// A [`BoardRenderer`] that keeps a copy of every rendered board.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Mutex<Vec<Board>>,
}

impl RecordingRenderer {
    /// Returns how many times `render` was called.
    pub fn render_count(&self) -> usize {
        self.frames.lock().expect("lock poisoned").len()
    }

    /// Returns the most recently rendered board.
    pub fn last_frame(&self) -> Option<Board> {
        self.frames.lock().expect("lock poisoned").last().cloned()
    }
}

impl BoardRenderer for RecordingRenderer {
    fn render(&self, board: &Board) {
        self.frames.lock().expect("lock poisoned").push(board.clone());
    }
}

/// One call made on [`RecordingFeedback`].
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackEvent {
    DragActive(bool),
    ProxyShown { card_id: CardId, rect: Rect },
    ProxyMoved(Point),
    ProxyRemoved,
    CardHidden(CardId, bool),
    IndicatorShown { target: DropTarget, height: f64 },
    IndicatorCleared,
}

/// A [`DragFeedback`] that records every call.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    events: Mutex<Vec<FeedbackEvent>>,
}

impl RecordingFeedback {
    /// Returns a copy of all calls so far.
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.lock().expect("lock poisoned").clone()
    }

    /// Returns `true` while an indicator is shown and not yet cleared.
    pub fn indicator_visible(&self) -> bool {
        self.events
            .lock()
            .expect("lock poisoned")
            .iter()
            .rev()
            .find_map(|e| match e {
                FeedbackEvent::IndicatorShown { .. } => Some(true),
                FeedbackEvent::IndicatorCleared => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    fn push(&self, event: FeedbackEvent) {
        self.events.lock().expect("lock poisoned").push(event);
    }
}

impl DragFeedback for RecordingFeedback {
    fn set_drag_active(&self, active: bool) {
        self.push(FeedbackEvent::DragActive(active));
    }

    fn show_proxy(&self, card: &Card, rect: Rect) {
        self.push(FeedbackEvent::ProxyShown {
            card_id: card.id.clone(),
            rect,
        });
    }

    fn move_proxy(&self, top_left: Point) {
        self.push(FeedbackEvent::ProxyMoved(top_left));
    }

    fn remove_proxy(&self) {
        self.push(FeedbackEvent::ProxyRemoved);
    }

    fn set_card_hidden(&self, card_id: &CardId, hidden: bool) {
        self.push(FeedbackEvent::CardHidden(card_id.clone(), hidden));
    }

    fn show_indicator(&self, target: &DropTarget, height: f64) {
        self.push(FeedbackEvent::IndicatorShown {
            target: target.clone(),
            height,
        });
    }

    fn clear_indicator(&self) {
        self.push(FeedbackEvent::IndicatorCleared);
    }
}

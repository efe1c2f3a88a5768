//! Board persistence on top of a [`StorageBackend`].
//!
//! The board is stored as one JSON document under a single key:
//!
//! ```json
//! {
//!   "todo":        [{"id": "card-…", "text": "buy milk"}],
//!   "in-progress": [],
//!   "done":        []
//! }
//! ```
//!
//! Loading never fails.  Each column is read on its own, so a missing or
//! malformed column comes back empty without losing the others, and a card id
//! that shows up twice keeps only its first occurrence.

use kanban_core::{Board, BoardError, Card, ColumnId};
use serde_json::Value;
use tracing::{debug, warn};

use super::backend::{StorageBackend, StorageError};
use crate::application::board_session::BoardPersistence;

/// Storage key used when the configuration does not name one.
pub const DEFAULT_KEY: &str = "trello-clone";

/// Loads and saves the board through a key/value backend.
#[derive(Debug)]
pub struct BoardStore<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> BoardStore<B> {
    /// Creates a store that keeps the board under [`DEFAULT_KEY`].
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Serializes `board` and writes it under the store's key.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`StorageError`] unchanged.
    pub fn save_board(&self, board: &Board) -> Result<(), StorageError> {
        let json = serde_json::to_string(board)?;
        self.backend.set_item(&self.key, &json)?;
        debug!(key = %self.key, cards = board.total_cards(), "board saved");
        Ok(())
    }

    /// Reads the stored board, repairing what can be repaired.
    pub fn load_board(&self) -> Board {
        match self.backend.get_item(&self.key) {
            Ok(Some(json)) => parse_board(&json),
            Ok(None) => {
                debug!(key = %self.key, "no stored board, starting empty");
                Board::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read stored board, starting empty");
                Board::new()
            }
        }
    }

    /// Removes the stored board.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`StorageError`] unchanged.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove_item(&self.key)
    }
}

impl<B: StorageBackend> BoardPersistence for BoardStore<B> {
    fn load(&self) -> Board {
        self.load_board()
    }

    fn save(&self, board: &Board) -> Result<(), String> {
        self.save_board(board).map_err(|e| e.to_string())
    }
}

/// Parses a stored board leniently, column by column.
pub fn parse_board(json: &str) -> Board {
    let mut board = Board::new();

    let root = match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("stored board is not a JSON object, starting empty");
            return board;
        }
        Err(e) => {
            warn!(error = %e, "stored board is not valid JSON, starting empty");
            return board;
        }
    };

    for column in ColumnId::ALL {
        let Some(value) = root.get(column.as_str()) else {
            continue;
        };
        let cards: Vec<Card> = match serde_json::from_value(value.clone()) {
            Ok(cards) => cards,
            Err(e) => {
                warn!(column = %column, error = %e, "stored column is malformed, leaving it empty");
                continue;
            }
        };
        for card in cards {
            let at = board.len(column);
            if let Err(BoardError::DuplicateCard { card, column: first }) = board.insert(column, at, card) {
                warn!(card = %card, column = %column, kept_in = %first, "duplicate card id dropped");
            }
        }
    }

    board
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Board model domain entity.
//!
//! The board maps each of the three fixed columns to an ordered sequence of
//! cards.  Order is top-to-bottom on screen and only changes through the
//! explicit mutation primitives below.
//!
//! # Identity invariant
//!
//! A card id appears in at most one column, at most once.  [`Board::insert`]
//! refuses ids that are already present and [`Board::move_card`] removes
//! before it inserts, so no sequence of operations can duplicate or orphan a
//! card.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque, unique card identifier.
///
/// Fresh ids have the form `card-<uuid v4>`; ids read back from storage are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh id that does not collide with any existing card.
    pub fn generate() -> Self {
        Self(format!("card-{}", Uuid::new_v4()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single text card.
///
/// Both fields are immutable once the card has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub text: String,
}

impl Card {
    /// Creates a card with a freshly generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: CardId::generate(),
            text: text.into(),
        }
    }

    /// Creates a card with a caller-supplied id.
    pub fn with_id(id: impl Into<CardId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// One of the three fixed board columns.
///
/// The serialized names (`"todo"`, `"in-progress"`, `"done"`) are the keys of
/// the persisted board object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    /// All columns in left-to-right display order.
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    /// Returns the wire name of the column.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "in-progress",
            ColumnId::Done => "done",
        }
    }

    /// Zero-based display position (left to right).
    pub fn position(self) -> usize {
        match self {
            ColumnId::Todo => 0,
            ColumnId::InProgress => 1,
            ColumnId::Done => 2,
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnId::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| BoardError::InvalidColumn(s.to_string()))
    }
}

/// Errors raised by board mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// A column identifier outside the fixed `todo | in-progress | done` set.
    #[error("invalid column: {0:?}")]
    InvalidColumn(String),

    /// The card id is already present somewhere on the board.
    #[error("card {card} already exists in column {column}")]
    DuplicateCard { card: CardId, column: ColumnId },

    /// The card id is not present in the expected column.
    #[error("card {card} not found in column {column}")]
    CardNotFound { card: CardId, column: ColumnId },
}

/// The board: three ordered card sequences.
///
/// Serializes to `{ "todo": [...], "in-progress": [...], "done": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    todo: Vec<Card>,
    #[serde(default, rename = "in-progress")]
    in_progress: Vec<Card>,
    #[serde(default)]
    done: Vec<Card>,
}

impl Board {
    /// Creates a board with three empty columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cards of `column` in display order.
    pub fn cards(&self, column: ColumnId) -> &[Card] {
        match column {
            ColumnId::Todo => &self.todo,
            ColumnId::InProgress => &self.in_progress,
            ColumnId::Done => &self.done,
        }
    }

    fn cards_mut(&mut self, column: ColumnId) -> &mut Vec<Card> {
        match column {
            ColumnId::Todo => &mut self.todo,
            ColumnId::InProgress => &mut self.in_progress,
            ColumnId::Done => &mut self.done,
        }
    }

    /// Iterates over every column with its cards, left to right.
    pub fn columns(&self) -> impl Iterator<Item = (ColumnId, &[Card])> {
        ColumnId::ALL.into_iter().map(move |c| (c, self.cards(c)))
    }

    /// Number of cards in `column`.
    pub fn len(&self, column: ColumnId) -> usize {
        self.cards(column).len()
    }

    /// Total number of cards across all columns.
    pub fn total_cards(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns `true` when every column is empty.
    pub fn is_empty(&self) -> bool {
        self.total_cards() == 0
    }

    /// Returns the column containing `id`, if any.
    pub fn find_column_of(&self, id: &CardId) -> Option<ColumnId> {
        self.position_of(id).map(|(column, _)| column)
    }

    /// Returns the column and index of `id`, if any.
    pub fn position_of(&self, id: &CardId) -> Option<(ColumnId, usize)> {
        self.columns().find_map(|(column, cards)| {
            cards
                .iter()
                .position(|c| &c.id == id)
                .map(|index| (column, index))
        })
    }

    /// Returns the card with `id`, if any.
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.position_of(id)
            .map(|(column, index)| &self.cards(column)[index])
    }

    /// Inserts `card` into `column` at `index`, clamped to `[0, len]`.
    ///
    /// Returns the index the card actually landed at.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateCard`] if the id is already on the board.
    pub fn insert(&mut self, column: ColumnId, index: usize, card: Card) -> Result<usize, BoardError> {
        if let Some(existing) = self.find_column_of(&card.id) {
            return Err(BoardError::DuplicateCard {
                card: card.id,
                column: existing,
            });
        }
        let cards = self.cards_mut(column);
        let index = index.min(cards.len());
        cards.insert(index, card);
        Ok(index)
    }

    /// Removes the card with `id` from `column`.
    ///
    /// Absent ids are not an error; `None` is returned and the board is
    /// left untouched.
    pub fn remove_by_id(&mut self, column: ColumnId, id: &CardId) -> Option<Card> {
        let cards = self.cards_mut(column);
        let index = cards.iter().position(|c| &c.id == id)?;
        Some(cards.remove(index))
    }

    /// Moves a card from `from` to `to` at `index`.
    ///
    /// The card is removed first and `index` is then applied to the
    /// post-removal sequence of `to` (clamped to `[0, len]`).  Within one
    /// column this means `index` counts positions with the moved card
    /// already taken out.
    ///
    /// Returns the index the card landed at.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CardNotFound`] if `id` is not in `from`; the
    /// board is unchanged in that case.
    pub fn move_card(
        &mut self,
        id: &CardId,
        from: ColumnId,
        to: ColumnId,
        index: usize,
    ) -> Result<usize, BoardError> {
        let card = self
            .remove_by_id(from, id)
            .ok_or_else(|| BoardError::CardNotFound {
                card: id.clone(),
                column: from,
            })?;
        let cards = self.cards_mut(to);
        let index = index.min(cards.len());
        cards.insert(index, card);
        Ok(index)
    }

    /// Appends a new card with a fresh id to `column`.
    pub fn add_card(&mut self, column: ColumnId, text: impl Into<String>) -> &Card {
        let cards = self.cards_mut(column);
        cards.push(Card::new(text));
        &cards[cards.len() - 1]
    }

    /// Deletes the card with `id` from `column`.
    ///
    /// Idempotent: returns `false` when there was nothing to delete.
    pub fn delete_card(&mut self, column: ColumnId, id: &CardId) -> bool {
        self.remove_by_id(column, id).is_some()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

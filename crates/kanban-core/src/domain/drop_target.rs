//! Drop-target resolution.
//!
//! While a card is dragged, every pointer position maps to at most one place
//! the card would land if released there:
//!
//! 1. Over another card: before it when the pointer is above the card's
//!    vertical midpoint, after it otherwise.  The comparison is strict, so a
//!    pointer exactly on the midpoint resolves to "after".
//! 2. Over empty space in a column's card container: the end of that column.
//! 3. Anywhere else: nothing.
//!
//! The dragged card is transparent to hit-testing and is not counted in the
//! returned index.  Indices therefore address the target column's sequence
//! with the dragged card already removed, which is exactly how
//! [`Board::move_card`](crate::domain::board::Board::move_card) applies them.

use crate::domain::board::{CardId, ColumnId};
use crate::domain::geometry::Point;
use crate::domain::layout::{BoardLayout, ColumnLayout, HitTarget};

/// Where the insertion indicator is anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAnchor {
    /// Immediately above the given card.
    Before(CardId),
    /// Immediately below the given card.
    After(CardId),
    /// At the end of the column's card container.
    End,
}

/// A resolved insertion point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub column: ColumnId,
    /// Insertion index into the column with the dragged card absent.
    pub index: usize,
    pub anchor: DropAnchor,
}

/// Resolves the drop target under `pointer` for the card `dragged`.
///
/// Pure function of the layout and the pointer: repeated calls with the same
/// inputs return the same answer.
///
/// Within the dragged card's own column the index is deliberately not the
/// pre-removal position: dropping `A` before `C` in `[A, B, C]` gives index 1
/// and yields `[B, A, C]`, never `[B, C, A]`.
pub fn resolve(layout: &BoardLayout, pointer: Point, dragged: &CardId) -> Option<DropTarget> {
    let card_id = match layout.hit_test(pointer, Some(dragged))? {
        HitTarget::Column(column) => {
            let index = layout
                .column(column)
                .map_or(0, |col| cards_excluding(col, dragged, usize::MAX));
            return Some(DropTarget {
                column,
                index,
                anchor: DropAnchor::End,
            });
        }
        // The delete control sits inside the card, so it counts as the card.
        HitTarget::Card { card_id, .. } | HitTarget::DeleteControl { card_id, .. } => card_id,
    };

    let (column, card) = layout.card(&card_id)?;
    let col = layout.column(column)?;
    let index = cards_excluding(col, dragged, card.index);

    if pointer.y < card.rect.mid_y() {
        Some(DropTarget {
            column,
            index,
            anchor: DropAnchor::Before(card_id),
        })
    } else {
        Some(DropTarget {
            column,
            index: index + 1,
            anchor: DropAnchor::After(card_id),
        })
    }
}

/// Counts the cards of `col` positioned before `limit`, skipping `dragged`.
fn cards_excluding(col: &ColumnLayout, dragged: &CardId, limit: usize) -> usize {
    col.cards
        .iter()
        .take(limit)
        .filter(|c| &c.id != dragged)
        .count()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

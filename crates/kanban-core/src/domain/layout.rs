//! Board layout domain entity.
//!
//! The layout places the three columns side by side and stacks each column's
//! cards top to bottom inside the column's card container.  It is recomputed
//! from the [`Board`] after every mutation and is the surface that pointer
//! positions are hit-tested against.
//!
//! ```text
//!  origin
//!    ┌──────────┐ gap ┌──────────┐ gap ┌──────────┐
//!    │ header   │     │ header   │     │ header   │
//!    ├──────────┤     ├──────────┤     ├──────────┤  ← card container
//!    │ ┌──────x┐│     │          │     │ ┌──────x┐│     (x = delete control)
//!    │ └───────┘│     │          │     │ └───────┘│
//!    │ ┌──────x┐│     │          │     │          │
//!    │ └───────┘│     │          │     │          │
//!    └──────────┘     └──────────┘     └──────────┘
//! ```
//!
//! Stacking order for hit-testing, topmost first: delete control, card,
//! card container.  Column headers and the space between columns belong to
//! the board background.

use crate::domain::board::{Board, CardId, ColumnId};
use crate::domain::geometry::{Point, Rect};

/// Sizes and spacing used to lay the board out.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutMetrics {
    /// Top-left corner of the first column.
    pub origin: Point,
    pub column_width: f64,
    /// Horizontal space between two columns.
    pub column_gap: f64,
    /// Minimum height of a card container, so empty columns stay droppable.
    pub column_min_height: f64,
    pub header_height: f64,
    pub card_height: f64,
    /// Vertical space between two cards.
    pub card_gap: f64,
    /// Inner padding of the card container.
    pub padding: f64,
    /// Edge length of the square delete control in a card's top-right corner.
    pub delete_control_size: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            origin: Point::new(0.0, 0.0),
            column_width: 272.0,
            column_gap: 16.0,
            column_min_height: 120.0,
            header_height: 40.0,
            card_height: 56.0,
            card_gap: 8.0,
            padding: 8.0,
            delete_control_size: 20.0,
        }
    }
}

/// Placement of a single card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub id: CardId,
    /// Index of the card in its column's sequence.
    pub index: usize,
    pub rect: Rect,
    pub delete_control: Rect,
}

/// Placement of a column and its cards.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub column: ColumnId,
    /// Whole column including its header.
    pub frame: Rect,
    /// Card container below the header.
    pub container: Rect,
    pub cards: Vec<CardLayout>,
}

/// The topmost element under a point.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    /// A card's delete control.
    DeleteControl { column: ColumnId, card_id: CardId },
    /// A card body.
    Card {
        column: ColumnId,
        card_id: CardId,
        index: usize,
        rect: Rect,
    },
    /// Empty space inside a column's card container.
    Column(ColumnId),
}

/// Geometry of the whole board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    columns: Vec<ColumnLayout>,
}

impl BoardLayout {
    /// Lays out `board` using `metrics`.
    pub fn compute(board: &Board, metrics: &LayoutMetrics) -> Self {
        let columns = board
            .columns()
            .map(|(column, cards)| {
                let x = metrics.origin.x
                    + column.position() as f64 * (metrics.column_width + metrics.column_gap);
                let container_y = metrics.origin.y + metrics.header_height;

                let card_width = (metrics.column_width - 2.0 * metrics.padding).max(0.0);
                let card_layouts: Vec<CardLayout> = cards
                    .iter()
                    .enumerate()
                    .map(|(index, card)| {
                        let y = container_y
                            + metrics.padding
                            + index as f64 * (metrics.card_height + metrics.card_gap);
                        let rect = Rect::new(x + metrics.padding, y, card_width, metrics.card_height);
                        let size = metrics.delete_control_size.min(card_width).min(metrics.card_height);
                        CardLayout {
                            id: card.id.clone(),
                            index,
                            rect,
                            delete_control: Rect::new(rect.right() - size, rect.y, size, size),
                        }
                    })
                    .collect();

                let stacked = match cards.len() {
                    0 => 0.0,
                    n => n as f64 * metrics.card_height + (n - 1) as f64 * metrics.card_gap,
                };
                let container_height =
                    (stacked + 2.0 * metrics.padding).max(metrics.column_min_height);
                let container = Rect::new(x, container_y, metrics.column_width, container_height);

                ColumnLayout {
                    column,
                    frame: Rect::new(
                        x,
                        metrics.origin.y,
                        metrics.column_width,
                        metrics.header_height + container_height,
                    ),
                    container,
                    cards: card_layouts,
                }
            })
            .collect();

        Self { columns }
    }

    /// Returns the layout of every column, left to right.
    pub fn columns(&self) -> &[ColumnLayout] {
        &self.columns
    }

    /// Returns the layout of `column`.
    pub fn column(&self, column: ColumnId) -> Option<&ColumnLayout> {
        self.columns.iter().find(|c| c.column == column)
    }

    /// Returns the column and placement of the card `id`.
    pub fn card(&self, id: &CardId) -> Option<(ColumnId, &CardLayout)> {
        self.columns.iter().find_map(|col| {
            col.cards
                .iter()
                .find(|c| &c.id == id)
                .map(|c| (col.column, c))
        })
    }

    /// Returns the topmost element under `point`.
    ///
    /// The card `exclude` is transparent: a point over it falls through to
    /// whatever lies beneath (normally its column's container).  This is how
    /// the card being dragged is kept out of its own hit-testing.
    pub fn hit_test(&self, point: Point, exclude: Option<&CardId>) -> Option<HitTarget> {
        for col in &self.columns {
            if !col.container.contains(point) {
                continue;
            }
            for card in &col.cards {
                if Some(&card.id) == exclude {
                    continue;
                }
                if card.delete_control.contains(point) {
                    return Some(HitTarget::DeleteControl {
                        column: col.column,
                        card_id: card.id.clone(),
                    });
                }
                if card.rect.contains(point) {
                    return Some(HitTarget::Card {
                        column: col.column,
                        card_id: card.id.clone(),
                        index: card.index,
                        rect: card.rect,
                    });
                }
            }
            return Some(HitTarget::Column(col.column));
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

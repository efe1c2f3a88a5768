//! Domain entities for the kanban board.
//!
//! Pure business logic with no I/O.  The board model owns the card order,
//! the layout describes the board on screen, and the drop-target resolver
//! combines the two while a drag is in progress.

pub mod board;
pub mod drop_target;
pub mod geometry;
pub mod layout;

//! Rendering infrastructure.
//!
//! - [`text`] draws the board as plain text for the terminal.
//! - [`feedback`] reports drag visuals through `tracing`.
//! - [`mock`] records every call for tests.

pub mod feedback;
pub mod mock;
pub mod text;

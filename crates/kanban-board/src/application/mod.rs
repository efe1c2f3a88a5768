//! Application layer use cases for the kanban board.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The *application* layer sits between the domain (`kanban-core`: the board
//! model, layout and drop-target rules) and the infrastructure (storage,
//! rendering, platform pointer events).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "move this
//!   card to where the pointer was released").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the infrastructure can be swapped without changing this code.
//! - **Contain no file system access and no terminal output**.
//!
//! # Sub-modules
//!
//! - **`drag_controller`** – The Idle/Dragging state machine: starts a drag on
//!   pointer-down, tracks the drop target on every move, and commits or
//!   discards on pointer-up.
//!
//! - **`board_session`** – Owns the board and wires the controller, card
//!   creation/deletion, persistence and rendering together.  Every pointer
//!   event from the platform enters here.

pub mod board_session;
pub mod drag_controller;

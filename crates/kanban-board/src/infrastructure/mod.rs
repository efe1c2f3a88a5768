//! Infrastructure layer for the kanban board.
//!
//! Contains the adapters around the application: pointer event sources,
//! the text renderer and drag feedback, and key/value storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `kanban_core`, but MUST NOT be imported by the domain layer.

pub mod pointer;
pub mod render;
pub mod storage;

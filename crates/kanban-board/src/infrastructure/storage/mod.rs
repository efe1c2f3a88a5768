//! Storage infrastructure: board persistence and configuration.
//!
//! - [`backend`] is a small key/value store with string values, modelled on
//!   browser local storage, with a file-backed and an in-memory implementation.
//! - [`board_store`] saves and loads the board as JSON through a backend.
//! - [`config`] reads the TOML configuration file.

pub mod backend;
pub mod board_store;
pub mod config;

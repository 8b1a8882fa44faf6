//! Persistence layer for TaskFlow.
//!
//! This crate stores each board collection as one JSON document, written
//! with atomic file operations (write to temp file, then rename).
//!
//! # Example
//!
//! ```no_run
//! use taskflow_persistence::{BoardStore, Collection};
//!
//! let store = BoardStore::new("/home/user/.taskflow");
//!
//! // Missing or corrupt blobs come back as defaults
//! let board = store.load_board();
//!
//! // Write one collection back
//! store.save_columns(&board.columns).unwrap();
//! store.save(Collection::Projects, &board.projects).unwrap();
//! ```

pub mod atomic;
pub mod board_store;
mod columns;
pub mod error;

pub use board_store::{BoardStore, Collection, LoadedBoard, SCHEMA_VERSION};
pub use error::{PersistenceError, Result};

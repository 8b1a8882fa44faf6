//! Board state manager for TaskFlow.
//!
//! This crate owns the in-memory store and is the only sanctioned way to
//! change it:
//! - `TaskBoard` holds the current `Snapshot` and exposes the mutation API
//!   for tasks, projects, team members, events and notifications
//! - `reorder` turns drag-and-drop results into column transitions
//! - every mutation persists the changed collections through
//!   `taskflow_persistence::BoardStore` before it is published
//! - `search`, `filter` and `metrics` are read-only views over snapshots
//!
//! # Example
//!
//! ```no_run
//! use taskflow_board::{DragLocation, DragResult, TaskBoard};
//! use taskflow_models::{column, TaskDraft};
//! use taskflow_persistence::BoardStore;
//!
//! let mut board = TaskBoard::open(BoardStore::new("/tmp/taskflow"));
//! board.add_task(TaskDraft::new("Research competitors"), None).unwrap();
//!
//! // Drag the first card into "Done"
//! let drag = DragResult::new(
//!     DragLocation::new(column::TO_DO, 0),
//!     Some(DragLocation::new(column::DONE, 0)),
//! );
//! board.handle_drag_end(&drag).unwrap();
//! ```

pub mod board;
pub mod collections;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod notifications;
pub mod reorder;
pub mod search;
pub mod snapshot;

pub use board::TaskBoard;
pub use error::{BoardError, Result};
pub use filter::{ProjectFilter, TaskFilter};
pub use metrics::{BoardMetrics, MemberWorkload, ProjectProgress};
pub use reorder::{apply_drag, DragLocation, DragOutcome, DragResult};
pub use search::{search, SearchHit, SearchScope};
pub use snapshot::{Snapshot, TaskPosition};

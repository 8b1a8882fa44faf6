//! Drag-and-drop result processing.
//!
//! Translates a finished drag gesture into the next snapshot. The transition
//! is computed on a private copy, so the board only ever publishes a
//! snapshot where the task is both removed from its source and placed at
//! its destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;

/// One end of a drag: a column and a position within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub column: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column: impl Into<String>, index: usize) -> Self {
        Self {
            column: column.into(),
            index,
        }
    }
}

/// Outcome of a drag gesture.
///
/// `destination` is `None` when the drag was cancelled or dropped outside
/// any column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

impl DragResult {
    pub fn new(source: DragLocation, destination: Option<DragLocation>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// A drag that was released outside every column.
    pub fn cancelled(source: DragLocation) -> Self {
        Self::new(source, None)
    }
}

/// What a drag did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing changed.
    Unchanged,
    /// Task moved within its column; status untouched.
    Reordered,
    /// Task changed column; status and modification time updated.
    Moved,
}

/// Computes the snapshot after a drag.
///
/// Returns `None` when the drag is a no-op: no destination, identical
/// source and destination, unknown source column, or a source index past
/// the end of the column. Destination indices past the end append.
pub fn apply_drag(
    snapshot: &Snapshot,
    drag: &DragResult,
    now: DateTime<Utc>,
) -> Option<(Snapshot, DragOutcome)> {
    let destination = drag.destination.as_ref()?;
    let source = &drag.source;
    if source == destination {
        return None;
    }

    let src_col = snapshot.columns.iter().position(|c| c.name == source.column)?;
    if source.index >= snapshot.columns[src_col].tasks.len() {
        return None;
    }

    let mut next = snapshot.clone();
    let mut task = next.columns[src_col].tasks.remove(source.index);

    let outcome = if source.column == destination.column {
        DragOutcome::Reordered
    } else {
        task.set_status(destination.column.as_str(), now);
        task.updated_at = now;
        DragOutcome::Moved
    };

    let dst_col = next.column_index_or_insert(&destination.column);
    let tasks = &mut next.columns[dst_col].tasks;
    let index = destination.index.min(tasks.len());
    tasks.insert(index, task);

    Some((next, outcome))
}

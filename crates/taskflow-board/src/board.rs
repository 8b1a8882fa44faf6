//! TaskBoard - the owned store and its mutation API for tasks.
//!
//! Every mutation follows the same shape:
//! 1. Validate input (rejects before anything changes)
//! 2. Build the next snapshot from a copy of the current one
//! 3. Persist the collections that changed
//! 4. Publish the next snapshot
//!
//! A failed write in step 3 leaves the current snapshot published.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use taskflow_models::{column, TaskDraft, TaskId, TaskPatch};
use taskflow_persistence::{BoardStore, Collection};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::reorder::{apply_drag, DragOutcome, DragResult};
use crate::snapshot::Snapshot;

/// Explicitly owned board state.
///
/// Consumers receive a `TaskBoard` (or a reference to one) instead of
/// reaching for ambient state. Mutations take `&mut self`, so there is a
/// single writer; readers hold `Arc<Snapshot>` values that stay valid after
/// later mutations.
///
/// # Example
///
/// ```no_run
/// use taskflow_board::TaskBoard;
/// use taskflow_models::{column, TaskDraft};
/// use taskflow_persistence::BoardStore;
///
/// let mut board = TaskBoard::open(BoardStore::new("/tmp/taskflow"));
/// let id = board.add_task(TaskDraft::new("Write release notes"), None).unwrap();
/// board.move_task(&id, column::TO_DO, column::IN_PROGRESS).unwrap();
/// ```
pub struct TaskBoard {
    store: BoardStore,
    snapshot: Arc<Snapshot>,
}

impl TaskBoard {
    /// Loads the board from the store, falling back to defaults for any
    /// missing or unreadable collection.
    pub fn open(store: BoardStore) -> Self {
        let snapshot = Snapshot::from(store.load_board());
        info!(
            path = %store.base_path().display(),
            columns = snapshot.columns.len(),
            tasks = snapshot.tasks().count(),
            "board loaded"
        );
        Self {
            store,
            snapshot: Arc::new(snapshot),
        }
    }

    /// Creates a board around an existing snapshot without reading disk.
    pub fn with_snapshot(store: BoardStore, snapshot: Snapshot) -> Self {
        Self {
            store,
            snapshot: Arc::new(snapshot),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Persists the given collections of `next`, then publishes it.
    ///
    /// If one write fails, the collections already written are rewritten
    /// from the published snapshot so disk and memory keep agreeing.
    pub(crate) fn commit(&mut self, next: Snapshot, changed: &[Collection]) -> Result<()> {
        for (written, collection) in changed.iter().enumerate() {
            if let Err(e) = self.persist(&next, *collection) {
                self.restore(&changed[..written]);
                return Err(e);
            }
        }
        self.snapshot = Arc::new(next);
        Ok(())
    }

    fn restore(&self, collections: &[Collection]) {
        for collection in collections {
            match self.persist(&self.snapshot, *collection) {
                Ok(()) => debug!(collection = %collection, "rolled back partial write"),
                Err(e) => warn!(
                    collection = %collection,
                    error = %e,
                    "rollback failed; collection on disk is ahead of the board"
                ),
            }
        }
    }

    /// Writes every collection of the current snapshot.
    pub fn save_all(&self) -> Result<()> {
        for collection in Collection::ALL {
            self.persist(&self.snapshot, collection)?;
        }
        Ok(())
    }

    fn persist(&self, snapshot: &Snapshot, collection: Collection) -> Result<()> {
        match collection {
            Collection::Tasks => self.store.save_columns(&snapshot.columns)?,
            Collection::Projects => self.store.save(collection, &snapshot.projects)?,
            Collection::Team => self.store.save(collection, &snapshot.team)?,
            Collection::Events => self.store.save(collection, &snapshot.events)?,
            Collection::Notifications => self.store.save(collection, &snapshot.notifications)?,
        }
        Ok(())
    }

    pub(crate) fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn today(now: DateTime<Utc>) -> NaiveDate {
        now.date_naive()
    }

    /// Adds a task at the end of `column` (default "To Do", or the draft's
    /// status when no column is given).
    ///
    /// # Errors
    /// Returns a validation error for a blank title; the board is unchanged.
    pub fn add_task(&mut self, draft: TaskDraft, column: Option<&str>) -> Result<TaskId> {
        draft.validate()?;
        let target = column
            .map(str::to_string)
            .or_else(|| draft.status.clone())
            .unwrap_or_else(|| column::TO_DO.to_string());

        let now = Self::now();
        let task = draft.into_task(target.as_str(), now, Self::today(now))?;
        let id = task.id.clone();

        let mut next = (*self.snapshot).clone();
        let col = next.column_index_or_insert(&target);
        next.columns[col].tasks.push(task);
        self.commit(next, &[Collection::Tasks])?;

        info!(task_id = %id, column = %target, "task added");
        Ok(id)
    }

    /// Updates a task found in `current_column`.
    ///
    /// A patch whose status names another column moves the task to the end
    /// of that column; otherwise the task is edited in place. Returns
    /// `Ok(false)` without changes if the task is not in `current_column`.
    pub fn update_task(
        &mut self,
        id: &TaskId,
        current_column: &str,
        patch: &TaskPatch,
    ) -> Result<bool> {
        patch.validate()?;
        let Some(pos) = self.snapshot.position_in(current_column, id) else {
            debug!(task_id = %id, column = %current_column, "update skipped: task not found");
            return Ok(false);
        };

        let now = Self::now();
        let mut next = (*self.snapshot).clone();
        match patch.status.as_deref() {
            Some(target) if target != current_column => {
                let mut task = next.columns[pos.column].tasks.remove(pos.index);
                patch.apply_fields(&mut task, now);
                task.set_status(target, now);
                let col = next.column_index_or_insert(target);
                next.columns[col].tasks.push(task);
                info!(task_id = %id, from = %current_column, to = %target, "task updated and moved");
            }
            _ => {
                let task = &mut next.columns[pos.column].tasks[pos.index];
                patch.apply_fields(task, now);
                info!(task_id = %id, column = %current_column, "task updated");
            }
        }
        self.commit(next, &[Collection::Tasks])?;
        Ok(true)
    }

    /// Removes a task from `column`. Returns `Ok(false)` if it was not there.
    ///
    /// Events linked to the task keep existing with the link cleared.
    pub fn delete_task(&mut self, column: &str, id: &TaskId) -> Result<bool> {
        let Some(pos) = self.snapshot.position_in(column, id) else {
            debug!(task_id = %id, column = %column, "delete skipped: task not found");
            return Ok(false);
        };

        let mut next = (*self.snapshot).clone();
        next.columns[pos.column].tasks.remove(pos.index);
        let mut changed = vec![Collection::Tasks];
        if next.clear_task_refs(id) {
            changed.push(Collection::Events);
        }
        self.commit(next, &changed)?;

        info!(task_id = %id, column = %column, "task deleted");
        Ok(true)
    }

    /// Moves a task from `from` to the end of `to`, updating its status.
    ///
    /// Returns `Ok(false)` if the task is not in `from`. Moving a task to its
    /// own column re-appends it at the end.
    pub fn move_task(&mut self, id: &TaskId, from: &str, to: &str) -> Result<bool> {
        let Some(pos) = self.snapshot.position_in(from, id) else {
            debug!(task_id = %id, column = %from, "move skipped: task not found");
            return Ok(false);
        };

        let now = Self::now();
        let mut next = (*self.snapshot).clone();
        let mut task = next.columns[pos.column].tasks.remove(pos.index);
        task.set_status(to, now);
        task.updated_at = now;
        let col = next.column_index_or_insert(to);
        next.columns[col].tasks.push(task);
        self.commit(next, &[Collection::Tasks])?;

        info!(task_id = %id, from = %from, to = %to, "task moved");
        Ok(true)
    }

    /// Applies a finished drag gesture.
    ///
    /// No-op drags (cancelled, dropped in place, stale source) leave the
    /// current snapshot published as the very same `Arc`.
    pub fn handle_drag_end(&mut self, drag: &DragResult) -> Result<DragOutcome> {
        let Some((next, outcome)) = apply_drag(&self.snapshot, drag, Self::now()) else {
            debug!(?drag, "drag ignored");
            return Ok(DragOutcome::Unchanged);
        };
        self.commit(next, &[Collection::Tasks])?;
        info!(
            from = %drag.source.column,
            to = ?drag.destination.as_ref().map(|d| d.column.as_str()),
            outcome = ?outcome,
            "drag applied"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reorder::DragLocation;
    use crate::BoardError;
    use chrono::Duration;
    use taskflow_models::{
        Assignee, EventDraft, MemberDraft, Priority, TaskColumn, ValidationError,
    };
    use tempfile::{tempdir, TempDir};

    fn open() -> (TempDir, TaskBoard) {
        let dir = tempdir().unwrap();
        let board = TaskBoard::open(BoardStore::new(dir.path()));
        (dir, board)
    }

    /// "To Do" = [task 1 (high)], everything else empty.
    fn seeded() -> (TempDir, TaskBoard) {
        let dir = tempdir().unwrap();
        let mut snapshot = Snapshot::default();
        let mut task = TaskDraft::new("Research competitors")
            .priority(Priority::High)
            .into_task(column::TO_DO, Utc::now(), Utc::now().date_naive())
            .unwrap();
        task.id = TaskId::from("1");
        snapshot.columns[0].tasks.push(task);
        let board = TaskBoard::with_snapshot(BoardStore::new(dir.path()), snapshot);
        (dir, board)
    }

    #[test]
    fn test_add_task_defaults() {
        let (_dir, mut board) = open();

        let id = board.add_task(TaskDraft::new("Write release notes"), None).unwrap();

        let snapshot = board.snapshot();
        let tasks = snapshot.column_tasks(column::TO_DO);
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.id, id);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, Utc::now().date_naive());
        assert_eq!(task.assignee, None);
        assert_eq!(task.status, column::TO_DO);
    }

    #[test]
    fn test_add_task_appends_to_target_column() {
        let (_dir, mut board) = open();
        board.add_task(TaskDraft::new("first"), Some(column::REVIEW)).unwrap();
        let second = board.add_task(TaskDraft::new("second"), Some(column::REVIEW)).unwrap();
        let from_draft = board
            .add_task(TaskDraft::new("third").status(column::DONE), None)
            .unwrap();

        let snapshot = board.snapshot();
        assert_eq!(snapshot.column_tasks(column::REVIEW)[1].id, second);
        assert_eq!(snapshot.column_tasks(column::DONE)[0].id, from_draft);
    }

    #[test]
    fn test_add_task_rejects_blank_title() {
        let (_dir, mut board) = open();
        let before = board.snapshot();

        let result = board.add_task(TaskDraft::new(""), None);

        assert!(matches!(
            result,
            Err(BoardError::Validation(ValidationError::EmptyField { .. }))
        ));
        assert!(Arc::ptr_eq(&before, &board.snapshot()));
    }

    #[test]
    fn test_move_task_scenario() {
        let (_dir, mut board) = seeded();
        let id = TaskId::from("1");

        assert!(board.move_task(&id, column::TO_DO, column::IN_PROGRESS).unwrap());

        let snapshot = board.snapshot();
        assert!(snapshot.column_tasks(column::TO_DO).is_empty());
        let moved = snapshot.column_tasks(column::IN_PROGRESS);
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, id);
        assert_eq!(moved[0].status, column::IN_PROGRESS);
        assert_eq!(moved[0].priority, Priority::High);
    }

    #[test]
    fn test_move_task_conserves_task() {
        let (_dir, mut board) = seeded();
        let id = TaskId::from("1");
        board.add_task(TaskDraft::new("other"), Some(column::DONE)).unwrap();

        board.move_task(&id, column::TO_DO, column::DONE).unwrap();

        let snapshot = board.snapshot();
        assert_eq!(snapshot.tasks().filter(|t| t.id == id).count(), 1);
        let done = snapshot.column_tasks(column::DONE);
        assert_eq!(done.last().unwrap().id, id);
        assert!(done.last().unwrap().completed_at.is_some());
    }

    #[test]
    fn test_move_task_missing_is_noop() {
        let (_dir, mut board) = seeded();
        let before = board.snapshot();

        let moved = board
            .move_task(&TaskId::from("1"), column::REVIEW, column::DONE)
            .unwrap();

        assert!(!moved);
        assert!(Arc::ptr_eq(&before, &board.snapshot()));
    }

    #[test]
    fn test_update_task_in_place_keeps_position() {
        let (_dir, mut board) = seeded();
        board.add_task(TaskDraft::new("second"), None).unwrap();
        let id = TaskId::from("1");
        let before = board.snapshot().column_tasks(column::TO_DO)[0].updated_at;

        let patch = TaskPatch::new().title("Research market").status(column::TO_DO);
        assert!(board.update_task(&id, column::TO_DO, &patch).unwrap());

        let snapshot = board.snapshot();
        let task = &snapshot.column_tasks(column::TO_DO)[0];
        assert_eq!(task.id, id);
        assert_eq!(task.title, "Research market");
        assert!(task.updated_at >= before);
    }

    #[test]
    fn test_update_task_with_new_status_moves_to_end() {
        let (_dir, mut board) = seeded();
        board.add_task(TaskDraft::new("already there"), Some(column::REVIEW)).unwrap();
        let id = TaskId::from("1");

        let patch = TaskPatch::new().status(column::REVIEW).priority(Priority::Low);
        assert!(board.update_task(&id, column::TO_DO, &patch).unwrap());

        let snapshot = board.snapshot();
        assert!(snapshot.column_tasks(column::TO_DO).is_empty());
        let review = snapshot.column_tasks(column::REVIEW);
        assert_eq!(review.len(), 2);
        assert_eq!(review[1].id, id);
        assert_eq!(review[1].status, column::REVIEW);
        assert_eq!(review[1].priority, Priority::Low);
    }

    #[test]
    fn test_update_task_wrong_column_is_noop() {
        let (_dir, mut board) = seeded();
        let before = board.snapshot();

        let updated = board
            .update_task(&TaskId::from("1"), column::DONE, &TaskPatch::new().title("x"))
            .unwrap();

        assert!(!updated);
        assert!(Arc::ptr_eq(&before, &board.snapshot()));
    }

    #[test]
    fn test_update_task_rejects_blank_title() {
        let (_dir, mut board) = seeded();
        let result = board.update_task(&TaskId::from("1"), column::TO_DO, &TaskPatch::new().title(" "));
        assert!(matches!(result, Err(BoardError::Validation(_))));
        assert_eq!(board.snapshot().column_tasks(column::TO_DO)[0].title, "Research competitors");
    }

    #[test]
    fn test_delete_task_is_idempotent() {
        let (_dir, mut board) = seeded();
        board.add_task(TaskDraft::new("keep"), None).unwrap();
        let id = TaskId::from("1");

        assert!(board.delete_task(column::TO_DO, &id).unwrap());
        let once = board.snapshot();
        assert!(!board.delete_task(column::TO_DO, &id).unwrap());

        assert_eq!(*once, *board.snapshot());
        assert_eq!(once.column_tasks(column::TO_DO).len(), 1);
    }

    #[test]
    fn test_delete_task_clears_event_link() {
        let (_dir, mut board) = seeded();
        let id = TaskId::from("1");
        let start = Utc::now();
        let event_id = board
            .add_event(EventDraft::new("Kickoff", start, start + Duration::hours(1)).task(id.clone()))
            .unwrap();

        board.delete_task(column::TO_DO, &id).unwrap();

        let snapshot = board.snapshot();
        assert_eq!(snapshot.event(&event_id).unwrap().task_id, None);
    }

    #[test]
    fn test_drag_without_destination_returns_same_snapshot() {
        let (_dir, mut board) = seeded();
        let before = board.snapshot();

        let outcome = board
            .handle_drag_end(&DragResult::cancelled(DragLocation::new(column::TO_DO, 0)))
            .unwrap();

        assert_eq!(outcome, DragOutcome::Unchanged);
        assert!(Arc::ptr_eq(&before, &board.snapshot()));
        assert_eq!(*before, *board.snapshot());
    }

    #[test]
    fn test_drag_across_columns() {
        let (_dir, mut board) = seeded();
        let drag = DragResult::new(
            DragLocation::new(column::TO_DO, 0),
            Some(DragLocation::new(column::DONE, 0)),
        );

        assert_eq!(board.handle_drag_end(&drag).unwrap(), DragOutcome::Moved);
        let snapshot = board.snapshot();
        assert_eq!(snapshot.column_tasks(column::DONE)[0].status, column::DONE);
    }

    #[test]
    fn test_old_snapshot_survives_mutation() {
        let (_dir, mut board) = seeded();
        let before = board.snapshot();

        board.delete_task(column::TO_DO, &TaskId::from("1")).unwrap();

        assert_eq!(before.column_tasks(column::TO_DO).len(), 1);
        assert!(board.snapshot().column_tasks(column::TO_DO).is_empty());
    }

    #[test]
    fn test_mutations_are_persisted() {
        let dir = tempdir().unwrap();
        let mut board = TaskBoard::open(BoardStore::new(dir.path()));
        let id = board.add_task(TaskDraft::new("persist me"), None).unwrap();
        board.move_task(&id, column::TO_DO, column::REVIEW).unwrap();

        let reopened = TaskBoard::open(BoardStore::new(dir.path()));

        assert_eq!(*reopened.snapshot(), *board.snapshot());
        assert_eq!(reopened.snapshot().column_tasks(column::REVIEW)[0].id, id);
    }

    #[test]
    fn test_save_all_writes_in_memory_board() {
        let (dir, board) = seeded();
        board.save_all().unwrap();

        let reopened = TaskBoard::open(BoardStore::new(dir.path()));
        assert_eq!(*reopened.snapshot(), *board.snapshot());
    }

    #[test]
    fn test_failed_write_keeps_previous_snapshot() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("state");
        std::fs::write(&blocker, "not a directory").unwrap();
        let mut board = TaskBoard::open(BoardStore::new(&blocker));
        let before = board.snapshot();

        let result = board.add_task(TaskDraft::new("lost"), None);

        assert!(matches!(result, Err(BoardError::Persistence(_))));
        assert!(Arc::ptr_eq(&before, &board.snapshot()));
    }

    #[test]
    fn test_failed_multi_collection_write_rolls_back_disk() {
        let dir = tempdir().unwrap();
        let store = BoardStore::new(dir.path());
        let mut board = TaskBoard::open(store.clone());
        let ada = board.add_team_member(MemberDraft::new("Ada")).unwrap();
        let task = board
            .add_task(TaskDraft::new("Review PR").assignee(Assignee::Member(ada.clone())), None)
            .unwrap();
        let start = Utc::now();
        board
            .add_event(EventDraft::new("Standup", start, start).attendee(ada.clone()))
            .unwrap();

        // Events are written last by a member delete; make that write fail
        let events = store.path(Collection::Events);
        std::fs::remove_file(&events).unwrap();
        std::fs::create_dir(&events).unwrap();

        let result = board.delete_team_member(&ada);

        assert!(matches!(result, Err(BoardError::Persistence(_))));
        assert!(board.snapshot().member(&ada).is_some());
        let loaded = store.load_board();
        assert!(loaded.team.iter().any(|m| m.id == ada));
        let reloaded = Snapshot::from(loaded);
        let (_, on_disk) = reloaded.find_task(&task).unwrap();
        assert_eq!(on_disk.assignee, Some(Assignee::Member(ada)));
    }

    #[test]
    fn test_unknown_target_column_is_created() {
        let (_dir, mut board) = seeded();
        board
            .move_task(&TaskId::from("1"), column::TO_DO, "Blocked")
            .unwrap();

        let snapshot = board.snapshot();
        let blocked: &TaskColumn = snapshot.column("Blocked").unwrap();
        assert_eq!(blocked.tasks[0].status, "Blocked");
    }
}

//! Immutable view of the whole store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskflow_models::{
    Event, EventId, MemberId, Notification, Project, ProjectId, Task, TaskColumn, TaskId,
    TeamMember,
};
use taskflow_persistence::LoadedBoard;
use tracing::warn;

/// Location of a task on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPosition {
    pub column: usize,
    pub index: usize,
}

/// Store contents at one point in time.
///
/// Snapshots are values: a mutation builds a new one and the board swaps it
/// in whole, so a held snapshot never changes underneath its reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Columns in display order, each holding tasks in display order.
    pub columns: Vec<TaskColumn>,
    pub projects: Vec<Project>,
    pub team: Vec<TeamMember>,
    pub events: Vec<Event>,
    /// Newest first.
    pub notifications: Vec<Notification>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            columns: TaskColumn::default_board(),
            projects: Vec::new(),
            team: Vec::new(),
            events: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

impl From<LoadedBoard> for Snapshot {
    /// Adopts loaded data; a task's status always names the column holding it.
    fn from(board: LoadedBoard) -> Self {
        let mut columns = board.columns;
        for column in &mut columns {
            for task in &mut column.tasks {
                if task.status != column.name {
                    warn!(
                        task_id = %task.id,
                        status = %task.status,
                        column = %column.name,
                        "task status disagrees with its column; using column"
                    );
                    let stamp = task.updated_at;
                    task.set_status(column.name.clone(), stamp);
                }
            }
        }
        Self {
            columns,
            projects: board.projects,
            team: board.team,
            events: board.events,
            notifications: board.notifications,
        }
    }
}

impl Snapshot {
    /// Returns a column by name.
    pub fn column(&self, name: &str) -> Option<&TaskColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the tasks of a column, empty if the column does not exist.
    pub fn column_tasks(&self, name: &str) -> &[Task] {
        self.column(name).map(|c| c.tasks.as_slice()).unwrap_or(&[])
    }

    /// Column names in display order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterates over every task, column by column.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    /// Finds a task anywhere on the board.
    pub fn find_task(&self, id: &TaskId) -> Option<(&TaskColumn, &Task)> {
        self.columns
            .iter()
            .find_map(|c| c.tasks.iter().find(|t| &t.id == id).map(|t| (c, t)))
    }

    /// Finds a task within one column.
    pub fn position_in(&self, column: &str, id: &TaskId) -> Option<TaskPosition> {
        let col = self.columns.iter().position(|c| c.name == column)?;
        let index = self.columns[col].position(id)?;
        Some(TaskPosition { column: col, index })
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn member(&self, id: &MemberId) -> Option<&TeamMember> {
        self.team.iter().find(|m| &m.id == id)
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Events starting on a UTC calendar day, earliest first.
    pub fn events_on(&self, day: NaiveDate) -> Vec<&Event> {
        let mut events: Vec<_> = self.events.iter().filter(|e| e.starts_on(day)).collect();
        events.sort_by_key(|e| e.start);
        events
    }

    /// Number of unread notifications.
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Returns the index of a column, appending an empty one if missing.
    pub(crate) fn column_index_or_insert(&mut self, name: &str) -> usize {
        match self.columns.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.columns.push(TaskColumn::new(name));
                self.columns.len() - 1
            }
        }
    }

    /// Clears every reference to a deleted project. Returns which
    /// collections changed as (tasks, events).
    pub(crate) fn clear_project_refs(&mut self, id: &ProjectId) -> (bool, bool) {
        let mut tasks_changed = false;
        for task in self.columns.iter_mut().flat_map(|c| c.tasks.iter_mut()) {
            if task.project_id.as_ref() == Some(id) {
                task.project_id = None;
                tasks_changed = true;
            }
        }
        let mut events_changed = false;
        for event in &mut self.events {
            if event.project_id.as_ref() == Some(id) {
                event.project_id = None;
                events_changed = true;
            }
        }
        (tasks_changed, events_changed)
    }

    /// Unassigns a deleted member everywhere. Returns which collections
    /// changed as (tasks, projects, events).
    pub(crate) fn clear_member_refs(&mut self, id: &MemberId) -> (bool, bool, bool) {
        let mut tasks_changed = false;
        for task in self.columns.iter_mut().flat_map(|c| c.tasks.iter_mut()) {
            if task.is_assigned_to(id) {
                task.assignee = None;
                tasks_changed = true;
            }
        }
        let mut projects_changed = false;
        for project in &mut self.projects {
            projects_changed |= project.remove_member(id);
        }
        let mut events_changed = false;
        for event in &mut self.events {
            events_changed |= event.remove_attendee(id);
        }
        (tasks_changed, projects_changed, events_changed)
    }

    /// Clears event links to a deleted task. Returns true if any changed.
    pub(crate) fn clear_task_refs(&mut self, id: &TaskId) -> bool {
        let mut changed = false;
        for event in &mut self.events {
            if event.task_id.as_ref() == Some(id) {
                event.task_id = None;
                changed = true;
            }
        }
        changed
    }
}

//! Task types for TaskFlow.
//!
//! A task lives in exactly one board column. Its `status` field names that
//! column, and the board keeps the two in agreement.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::ids::{MemberId, ProjectId, TaskId};
use crate::validation::{self, ValidationError};

/// Well-known board columns.
pub mod column {
    /// New work lands here unless another column is requested.
    pub const TO_DO: &str = "To Do";
    pub const IN_PROGRESS: &str = "In Progress";
    pub const REVIEW: &str = "Review";
    /// Entering this column stamps `completed_at`.
    pub const DONE: &str = "Done";

    /// Columns every new board starts with, in display order.
    pub const DEFAULT_COLUMNS: [&str; 4] = [TO_DO, IN_PROGRESS, REVIEW, DONE];
}

/// Priority levels shared by tasks and projects.
///
/// Higher numeric value = higher priority: High (3) > Medium (2) > Low (1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Returns the numeric value of this priority.
    pub fn as_value(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_value().cmp(&other.as_value())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who a task is assigned to.
///
/// Older boards store a free-text name; the roster-aware UI stores member ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assignee {
    /// A team member from the roster.
    Member(MemberId),
    /// A free-text name with no roster entry.
    Name(String),
}

impl Assignee {
    /// Returns true if this assignee references the given member.
    pub fn is_member(&self, id: &MemberId) -> bool {
        matches!(self, Assignee::Member(m) if m == id)
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignee::Member(id) => write!(f, "{}", id),
            Assignee::Name(name) => f.write_str(name),
        }
    }
}

/// A task card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, stable identifier.
    pub id: TaskId,

    /// Short title; never blank.
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub priority: Priority,

    /// Calendar due date (ISO `YYYY-MM-DD` on the wire).
    pub due_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,

    /// Name of the column holding this task.
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Set while the task sits in the `Done` column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Moves the task's status to `column`, maintaining `completed_at`.
    ///
    /// Does not touch `updated_at`; callers decide whether the transition
    /// counts as a modification.
    pub fn set_status(&mut self, column: impl Into<String>, now: DateTime<Utc>) {
        let column = column.into();
        let entering_done = column == column::DONE;
        if entering_done && self.completed_at.is_none() {
            self.completed_at = Some(now);
        } else if !entering_done {
            self.completed_at = None;
        }
        self.status = column;
    }

    /// Returns true if the task sits in the `Done` column.
    pub fn is_done(&self) -> bool {
        self.status == column::DONE
    }

    /// Returns true if the task is past due on `today` and not done.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today && !self.is_done()
    }

    /// Returns true if the task is assigned to the given member.
    pub fn is_assigned_to(&self, member: &MemberId) -> bool {
        self.assignee.as_ref().is_some_and(|a| a.is_member(member))
    }
}

/// One board column: a name and its tasks in on-screen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskColumn {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskColumn {
    /// Creates an empty column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Returns the position of a task in this column.
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Returns the default board: the four standard columns, all empty.
    pub fn default_board() -> Vec<TaskColumn> {
        column::DEFAULT_COLUMNS.iter().map(|name| TaskColumn::new(*name)).collect()
    }
}

/// Unsaved task fields, owned by whoever is editing them.
///
/// A draft never aliases store state: the board turns it into a new task or
/// a patch when it is committed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub assignee: Option<Assignee>,
    /// Target column; used when no explicit column is given on commit.
    pub status: Option<String>,
    pub project_id: Option<ProjectId>,
    pub tags: BTreeSet<String>,
}

impl TaskDraft {
    /// Creates a draft with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Copies a committed task into an editable draft.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: Some(task.priority),
            due_date: Some(task.due_date),
            assignee: task.assignee.clone(),
            status: Some(task.status.clone()),
            project_id: task.project_id.clone(),
            tags: task.tags.clone(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Checks required fields.
    pub fn validate(&self) -> validation::Result<()> {
        validation::require_text("task", "title", &self.title)
    }

    /// Builds a new task in `column`, applying defaults for unset fields.
    ///
    /// Defaults: medium priority, due `today`, no assignee.
    pub fn into_task(
        self,
        column: impl Into<String>,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Task, ValidationError> {
        self.validate()?;
        let mut task = Task {
            id: TaskId::new(),
            title: self.title,
            description: self.description,
            priority: self.priority.unwrap_or_default(),
            due_date: self.due_date.unwrap_or(today),
            assignee: self.assignee,
            status: String::new(),
            project_id: self.project_id,
            tags: self.tags,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };
        task.set_status(column, now);
        Ok(task)
    }

    /// Converts an edited draft into a patch that overwrites every field.
    pub fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title),
            description: Some(self.description),
            priority: self.priority,
            due_date: self.due_date,
            assignee: Some(self.assignee),
            status: self.status,
            project_id: Some(self.project_id),
            tags: Some(self.tags),
        }
    }
}

/// Partial update for a task. `None` leaves the field untouched; for
/// nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub assignee: Option<Option<Assignee>>,
    /// A value different from the current column moves the task.
    pub status: Option<String>,
    pub project_id: Option<Option<ProjectId>>,
    pub tags: Option<BTreeSet<String>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn assignee(mut self, assignee: Option<Assignee>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn project(mut self, project_id: Option<ProjectId>) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn tags(mut self, tags: BTreeSet<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Checks the fields this patch would write.
    pub fn validate(&self) -> validation::Result<()> {
        match &self.title {
            Some(title) => validation::require_text("task", "title", title),
            None => Ok(()),
        }
    }

    /// Merges every field except `status` onto `task` and stamps `updated_at`.
    ///
    /// Column changes are the board's job because they move the task between
    /// sequences.
    pub fn apply_fields(&self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(assignee) = &self.assignee {
            task.assignee = assignee.clone();
        }
        if let Some(project_id) = &self.project_id {
            task.project_id = project_id.clone();
        }
        if let Some(tags) = &self.tags {
            task.tags = tags.clone();
        }
        task.updated_at = now;
    }
}

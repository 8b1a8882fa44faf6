//! Task and project filtering for list views.

use taskflow_models::{Assignee, Priority, Project, ProjectId, ProjectStatus, Task};

/// Case-insensitive substring test on a trimmed needle.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Normalizes a search term; `None` when it is blank.
pub(crate) fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_lowercase())
}

/// Filter criteria for querying tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Filter by column name.
    pub column: Option<String>,
    /// Filter by priority.
    pub priority: Option<Priority>,
    /// Filter by assignee.
    pub assignee: Option<Assignee>,
    /// Filter by project ID.
    pub project_id: Option<ProjectId>,
    /// Title/description substring, case-insensitive.
    pub text: Option<String>,
}

impl TaskFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn with_project_id(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the text filter; blank text is ignored.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = normalize_term(text);
        self
    }

    /// Returns true if the task matches this filter.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(ref column) = self.column {
            if task.status != *column {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }

        if let Some(ref assignee) = self.assignee {
            if task.assignee.as_ref() != Some(assignee) {
                return false;
            }
        }

        if let Some(ref project_id) = self.project_id {
            if task.project_id.as_ref() != Some(project_id) {
                return false;
            }
        }

        if let Some(ref text) = self.text {
            let in_title = contains_ci(&task.title, text);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, text));
            if !in_title && !in_description {
                return false;
            }
        }

        true
    }
}

/// Filter criteria for the project list.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    /// Name/description substring, case-insensitive.
    pub text: Option<String>,
}

impl ProjectFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = normalize_term(text);
        self
    }

    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if let Some(ref text) = self.text {
            if !contains_ci(&project.name, text) && !contains_ci(&project.description, text) {
                return false;
            }
        }
        true
    }
}

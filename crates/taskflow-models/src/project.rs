//! Project types for TaskFlow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::ids::{MemberId, ProjectId};
use crate::task::Priority;
use crate::validation::{self, ValidationError};

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamps a progress value into `0..=100`.
pub fn clamp_progress(progress: i64) -> u8 {
    progress.clamp(0, 100) as u8
}

/// A project grouping tasks and team members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Percentage complete, always within `0..=100`.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub team_members: Vec<MemberId>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Drops a member from the team list. Returns true if it was present.
    pub fn remove_member(&mut self, member: &MemberId) -> bool {
        let before = self.team_members.len();
        self.team_members.retain(|m| m != member);
        self.team_members.len() != before
    }
}

/// Unsaved project fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Clamped into `0..=100` on commit.
    pub progress: i64,
    pub team_members: Vec<MemberId>,
    pub priority: Priority,
    pub tags: BTreeSet<String>,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn progress(mut self, progress: i64) -> Self {
        self.progress = progress;
        self
    }

    pub fn member(mut self, member: MemberId) -> Self {
        if !self.team_members.contains(&member) {
            self.team_members.push(member);
        }
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn validate(&self) -> validation::Result<()> {
        validation::require_text("project", "name", &self.name)?;
        validation::require_ordered("project", self.start_date.as_ref(), self.end_date.as_ref())
    }

    /// Builds a new project with a generated id.
    pub fn into_project(self, now: DateTime<Utc>) -> Result<Project, ValidationError> {
        self.validate()?;
        Ok(Project {
            id: ProjectId::new(),
            name: self.name,
            description: self.description,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            progress: clamp_progress(self.progress),
            team_members: self.team_members,
            priority: self.priority,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update for a project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub progress: Option<i64>,
    pub team_members: Option<Vec<MemberId>>,
    pub priority: Option<Priority>,
    pub tags: Option<BTreeSet<String>>,
}

impl ProjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn progress(mut self, progress: i64) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn end_date(mut self, end: Option<NaiveDate>) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn team_members(mut self, members: Vec<MemberId>) -> Self {
        self.team_members = Some(members);
        self
    }

    /// Applies the patch to a copy of `project`, validating the result.
    ///
    /// Dates are checked against the merged values so a patch touching only
    /// one bound still cannot invert the range.
    pub fn apply(&self, project: &Project, now: DateTime<Utc>) -> Result<Project, ValidationError> {
        let mut next = project.clone();
        if let Some(name) = &self.name {
            validation::require_text("project", "name", name)?;
            next.name = name.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(start) = self.start_date {
            next.start_date = start;
        }
        if let Some(end) = self.end_date {
            next.end_date = end;
        }
        validation::require_ordered("project", next.start_date.as_ref(), next.end_date.as_ref())?;
        if let Some(progress) = self.progress {
            next.progress = clamp_progress(progress);
        }
        if let Some(members) = &self.team_members {
            next.team_members = members.clone();
        }
        if let Some(priority) = self.priority {
            next.priority = priority;
        }
        if let Some(tags) = &self.tags {
            next.tags = tags.clone();
        }
        next.updated_at = now;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn test_progress_is_clamped() {
        let project = ProjectDraft::new("Launch")
            .progress(140)
            .into_project(Utc::now())
            .unwrap();
        assert_eq!(project.progress, 100);

        let patched = ProjectPatch::new().progress(-5).apply(&project, Utc::now()).unwrap();
        assert_eq!(patched.progress, 0);
    }

    #[test]
    fn test_rejects_end_before_start() {
        let result = ProjectDraft::new("Backwards")
            .dates(Some(date(2024, 5, 2)), Some(date(2024, 5, 1)))
            .into_project(Utc::now());
        assert!(matches!(result, Err(ValidationError::InvertedRange { .. })));
    }

    #[test]
    fn test_patch_checks_merged_dates() {
        let project = ProjectDraft::new("Q3")
            .dates(Some(date(2024, 7, 1)), Some(date(2024, 9, 30)))
            .into_project(Utc::now())
            .unwrap();

        let result = ProjectPatch::new()
            .end_date(Some(date(2024, 6, 1)))
            .apply(&project, Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_member() {
        let m1 = MemberId::from("member-1");
        let m2 = MemberId::from("member-2");
        let mut project = ProjectDraft::new("Team")
            .member(m1.clone())
            .member(m2.clone())
            .member(m1.clone())
            .into_project(Utc::now())
            .unwrap();
        assert_eq!(project.team_members.len(), 2);

        assert!(project.remove_member(&m1));
        assert!(!project.remove_member(&m1));
        assert_eq!(project.team_members, vec![m2]);
    }
}

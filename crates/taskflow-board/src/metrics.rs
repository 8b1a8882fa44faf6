//! Dashboard metrics derived from a snapshot.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use taskflow_models::{MemberId, Priority, ProjectId, ProjectStatus, TaskId};

use crate::snapshot::Snapshot;

/// Look-ahead window for upcoming deadlines, and look-back window for
/// recently completed tasks.
pub const WINDOW_DAYS: i64 = 7;

/// Task count of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCount {
    pub column: String,
    pub count: usize,
}

/// A task due soon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deadline {
    pub task_id: TaskId,
    pub title: String,
    pub due_date: NaiveDate,
    pub column: String,
}

/// Number of projects in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: usize,
}

/// Task completion for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProgress {
    pub project_id: ProjectId,
    pub name: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
}

impl ProjectProgress {
    /// Completed share in whole percent; 0 for a project without tasks.
    pub fn percent(&self) -> u8 {
        if self.total_tasks == 0 {
            return 0;
        }
        ((self.completed_tasks * 100 + self.total_tasks / 2) / self.total_tasks) as u8
    }
}

/// Task load of one team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberWorkload {
    pub member_id: MemberId,
    pub name: String,
    pub assigned: usize,
    pub in_progress: usize,
    pub completed: usize,
}

/// Summary numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardMetrics {
    pub total_tasks: usize,
    pub by_column: Vec<ColumnCount>,
    pub high_priority: usize,
    /// Due before today and not done.
    pub overdue: usize,
    /// Due within the next [`WINDOW_DAYS`] days and not done, soonest first.
    pub upcoming_deadlines: Vec<Deadline>,
    /// Entered `Done` within the last [`WINDOW_DAYS`] days.
    pub completed_recently: usize,
    pub projects_by_status: Vec<StatusCount>,
    /// Projects not yet completed.
    pub active_projects: usize,
    pub active_members: usize,
    /// Events starting after `now`.
    pub upcoming_events: usize,
    pub project_progress: Vec<ProjectProgress>,
    pub workloads: Vec<MemberWorkload>,
}

impl BoardMetrics {
    /// Computes metrics for `snapshot` as seen at `now`.
    pub fn compute(snapshot: &Snapshot, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let horizon = today + Duration::days(WINDOW_DAYS);
        let since = now - Duration::days(WINDOW_DAYS);

        let by_column = snapshot
            .columns
            .iter()
            .map(|c| ColumnCount {
                column: c.name.clone(),
                count: c.tasks.len(),
            })
            .collect();

        let mut upcoming_deadlines: Vec<Deadline> = snapshot
            .tasks()
            .filter(|t| !t.is_done() && t.due_date >= today && t.due_date <= horizon)
            .map(|t| Deadline {
                task_id: t.id.clone(),
                title: t.title.clone(),
                due_date: t.due_date,
                column: t.status.clone(),
            })
            .collect();
        upcoming_deadlines.sort_by_key(|d| d.due_date);

        let projects_by_status = ProjectStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: snapshot.projects.iter().filter(|p| p.status == *status).count(),
            })
            .collect();

        Self {
            total_tasks: snapshot.tasks().count(),
            by_column,
            high_priority: snapshot
                .tasks()
                .filter(|t| t.priority == Priority::High)
                .count(),
            overdue: snapshot.tasks().filter(|t| t.is_overdue(today)).count(),
            upcoming_deadlines,
            completed_recently: snapshot
                .tasks()
                .filter(|t| t.completed_at.is_some_and(|at| at > since))
                .count(),
            projects_by_status,
            active_projects: snapshot
                .projects
                .iter()
                .filter(|p| p.status != ProjectStatus::Completed)
                .count(),
            active_members: snapshot.team.iter().filter(|m| m.is_active()).count(),
            upcoming_events: snapshot.events.iter().filter(|e| e.start > now).count(),
            project_progress: project_progress(snapshot),
            workloads: member_workloads(snapshot),
        }
    }
}

/// Task completion for every project, in project order.
pub fn project_progress(snapshot: &Snapshot) -> Vec<ProjectProgress> {
    snapshot
        .projects
        .iter()
        .map(|project| {
            let tasks: Vec<_> = snapshot
                .tasks()
                .filter(|t| t.project_id.as_ref() == Some(&project.id))
                .collect();
            ProjectProgress {
                project_id: project.id.clone(),
                name: project.name.clone(),
                total_tasks: tasks.len(),
                completed_tasks: tasks.iter().filter(|t| t.is_done()).count(),
            }
        })
        .collect()
}

/// Task load for every roster member, in roster order.
pub fn member_workloads(snapshot: &Snapshot) -> Vec<MemberWorkload> {
    snapshot
        .team
        .iter()
        .map(|member| {
            let tasks: Vec<_> = snapshot
                .tasks()
                .filter(|t| t.is_assigned_to(&member.id))
                .collect();
            MemberWorkload {
                member_id: member.id.clone(),
                name: member.name.clone(),
                assigned: tasks.len(),
                in_progress: tasks
                    .iter()
                    .filter(|t| t.status == taskflow_models::column::IN_PROGRESS)
                    .count(),
                completed: tasks.iter().filter(|t| t.is_done()).count(),
            }
        })
        .collect()
}

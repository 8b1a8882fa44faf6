//! Global search across the board.
//!
//! Matches a case-insensitive, trimmed term against the text fields of every
//! entity in scope. A blank term returns everything in scope.

use serde::Serialize;
use taskflow_models::{Event, EventId, MemberId, Project, ProjectId, Task, TaskId, TeamMember};

use crate::filter::{contains_ci, normalize_term};
use crate::snapshot::Snapshot;

/// Which collections a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    All,
    Tasks,
    Projects,
    Team,
    Events,
}

impl SearchScope {
    fn includes(&self, other: SearchScope) -> bool {
        *self == SearchScope::All || *self == other
    }
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchHit {
    Task {
        id: TaskId,
        column: String,
        title: String,
    },
    Project {
        id: ProjectId,
        name: String,
    },
    Member {
        id: MemberId,
        name: String,
    },
    Event {
        id: EventId,
        title: String,
    },
}

impl SearchHit {
    /// Display label of the matched entity.
    pub fn label(&self) -> &str {
        match self {
            SearchHit::Task { title, .. } | SearchHit::Event { title, .. } => title,
            SearchHit::Project { name, .. } | SearchHit::Member { name, .. } => name,
        }
    }
}

fn task_matches(task: &Task, term: &str) -> bool {
    contains_ci(&task.title, term)
        || task.description.as_deref().is_some_and(|d| contains_ci(d, term))
        || contains_ci(&task.status, term)
        || contains_ci(task.priority.as_str(), term)
        || task
            .assignee
            .as_ref()
            .is_some_and(|a| contains_ci(&a.to_string(), term))
        || task.tags.iter().any(|t| contains_ci(t, term))
        || contains_ci(&task.due_date.to_string(), term)
}

fn project_matches(project: &Project, term: &str) -> bool {
    contains_ci(&project.name, term)
        || contains_ci(&project.description, term)
        || contains_ci(project.status.as_str(), term)
        || project.tags.iter().any(|t| contains_ci(t, term))
}

fn member_matches(member: &TeamMember, term: &str) -> bool {
    [&member.name, &member.role, &member.department, &member.email]
        .iter()
        .any(|field| contains_ci(field, term))
}

fn event_matches(event: &Event, term: &str) -> bool {
    contains_ci(&event.title, term)
        || contains_ci(&event.description, term)
        || contains_ci(&event.kind.to_string(), term)
}

/// Searches `snapshot` for `term` within `scope`.
///
/// Results are grouped tasks, projects, team, events, each in store order.
pub fn search(snapshot: &Snapshot, term: &str, scope: SearchScope) -> Vec<SearchHit> {
    let term = normalize_term(term);
    let hit = |matched: bool| term.is_none() || matched;
    let t = term.as_deref().unwrap_or_default();
    let mut hits = Vec::new();

    if scope.includes(SearchScope::Tasks) {
        for column in &snapshot.columns {
            for task in column.tasks.iter().filter(|task| hit(task_matches(task, t))) {
                hits.push(SearchHit::Task {
                    id: task.id.clone(),
                    column: column.name.clone(),
                    title: task.title.clone(),
                });
            }
        }
    }

    if scope.includes(SearchScope::Projects) {
        hits.extend(
            snapshot
                .projects
                .iter()
                .filter(|p| hit(project_matches(p, t)))
                .map(|p| SearchHit::Project {
                    id: p.id.clone(),
                    name: p.name.clone(),
                }),
        );
    }

    if scope.includes(SearchScope::Team) {
        hits.extend(
            snapshot
                .team
                .iter()
                .filter(|m| hit(member_matches(m, t)))
                .map(|m| SearchHit::Member {
                    id: m.id.clone(),
                    name: m.name.clone(),
                }),
        );
    }

    if scope.includes(SearchScope::Events) {
        hits.extend(
            snapshot
                .events
                .iter()
                .filter(|e| hit(event_matches(e, t)))
                .map(|e| SearchHit::Event {
                    id: e.id.clone(),
                    title: e.title.clone(),
                }),
        );
    }

    hits
}

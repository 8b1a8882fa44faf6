//! Core data models for TaskFlow.
//!
//! This crate provides the entities held by the board store (tasks,
//! projects, team members, events, notifications), their typed ids, and the
//! draft/patch values callers edit before committing them.

pub mod event;
pub mod ids;
pub mod member;
pub mod notification;
pub mod project;
pub mod task;
pub mod validation;

// Re-export main types
pub use event::{Event, EventDraft, EventKind, EventPatch};
pub use ids::{EventId, MemberId, NotificationId, ProjectId, TaskId};
pub use member::{MemberDraft, MemberPatch, MemberStatus, TeamMember, DEFAULT_DEPARTMENT};
pub use notification::{Notification, NotificationKind};
pub use project::{clamp_progress, Project, ProjectDraft, ProjectPatch, ProjectStatus};
pub use task::{column, Assignee, Priority, Task, TaskColumn, TaskDraft, TaskPatch};
pub use validation::ValidationError;

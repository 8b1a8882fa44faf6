//! Command-line interface definition using clap.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taskflow_board::SearchScope;
use taskflow_models::{
    EventId, EventKind, MemberId, MemberStatus, NotificationId, NotificationKind, Priority,
    ProjectId, ProjectStatus, TaskId,
};

use crate::config::{self, STATE_DIR_ENV};

/// TaskFlow - Kanban board, projects, team and calendar in one store
#[derive(Parser, Debug)]
#[command(name = "taskflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = STATE_DIR_ENV, global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the board column by column
    Board {
        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Manage task cards
    #[command(subcommand)]
    Task(TaskCommand),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Manage the team roster
    #[command(subcommand)]
    Member(MemberCommand),

    /// Manage calendar events
    #[command(subcommand)]
    Event(EventCommand),

    /// Manage the notification inbox
    #[command(subcommand)]
    Notify(NotifyCommand),

    /// Search tasks, projects, members and events
    Search {
        /// Search term (case-insensitive)
        #[arg(required = true)]
        term: String,

        /// Restrict the search to one collection
        #[arg(long, default_value = "all")]
        scope: ScopeArg,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show dashboard metrics
    Stats {
        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task
    Add {
        #[arg(required = true)]
        title: String,

        /// Column to add to (default: the task's status, else "To Do")
        #[arg(short, long)]
        column: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        priority: Option<PriorityArg>,

        /// Due date, YYYY-MM-DD (default: today)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Free-text assignee name
        #[arg(long, conflicts_with = "member")]
        assignee: Option<String>,

        /// Roster member to assign
        #[arg(long)]
        member: Option<MemberId>,

        #[arg(long)]
        project: Option<ProjectId>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Edit a task in place, or move it with --status
    Edit {
        #[arg(required = true)]
        id: TaskId,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,

        #[arg(long)]
        clear_description: bool,

        #[arg(short, long)]
        priority: Option<PriorityArg>,

        #[arg(long)]
        due: Option<NaiveDate>,

        #[arg(long, conflicts_with_all = ["member", "unassign"])]
        assignee: Option<String>,

        #[arg(long, conflicts_with = "unassign")]
        member: Option<MemberId>,

        #[arg(long)]
        unassign: bool,

        #[arg(long, conflicts_with = "no_project")]
        project: Option<ProjectId>,

        #[arg(long)]
        no_project: bool,

        /// Replace all tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Move to this column (appended at the end)
        #[arg(long)]
        status: Option<String>,
    },

    /// Move a task to the end of another column
    Move {
        #[arg(required = true)]
        id: TaskId,

        /// Destination column
        #[arg(required = true)]
        to: String,
    },

    /// Replay a drag gesture: source slot to destination slot
    Drag {
        /// Source column
        #[arg(required = true)]
        from: String,

        /// Index within the source column
        #[arg(required = true)]
        from_index: usize,

        /// Destination column (omit to cancel the drag)
        to: Option<String>,

        /// Index within the destination column (default: 0)
        to_index: Option<usize>,
    },

    /// Delete a task
    Rm {
        #[arg(required = true)]
        id: TaskId,
    },

    /// List tasks
    Ls {
        #[arg(short, long)]
        column: Option<String>,

        #[arg(short, long)]
        priority: Option<PriorityArg>,

        #[arg(long)]
        project: Option<ProjectId>,

        #[arg(long)]
        member: Option<MemberId>,

        /// Title/description filter
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project
    Add {
        #[arg(required = true)]
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        status: Option<ProjectStatusArg>,

        /// Start date, YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date, YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Progress percentage (clamped to 0-100)
        #[arg(long, allow_negative_numbers = true)]
        progress: Option<i64>,

        #[arg(short, long)]
        priority: Option<PriorityArg>,

        /// Team member (repeatable)
        #[arg(long = "member")]
        members: Vec<MemberId>,
    },

    /// Edit a project
    Edit {
        #[arg(required = true)]
        id: ProjectId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        status: Option<ProjectStatusArg>,

        #[arg(long, allow_negative_numbers = true)]
        progress: Option<i64>,

        #[arg(long, conflicts_with = "clear_end")]
        end: Option<NaiveDate>,

        #[arg(long)]
        clear_end: bool,

        /// Replace the team list (repeatable)
        #[arg(long = "member")]
        members: Vec<MemberId>,
    },

    /// Delete a project; tasks and events keep existing unlinked
    Rm {
        #[arg(required = true)]
        id: ProjectId,
    },

    /// List projects
    Ls {
        #[arg(long)]
        status: Option<ProjectStatusArg>,

        /// Name/description filter
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    /// Add a team member
    Add {
        #[arg(required = true)]
        name: String,

        #[arg(long)]
        role: Option<String>,

        /// Department (default: Engineering)
        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        inactive: bool,
    },

    /// Edit a team member
    Edit {
        #[arg(required = true)]
        id: MemberId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        status: Option<MemberStatusArg>,
    },

    /// Remove a team member; their tasks become unassigned
    Rm {
        #[arg(required = true)]
        id: MemberId,
    },

    /// List the roster
    Ls {
        /// Show only active members
        #[arg(short, long)]
        active: bool,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommand {
    /// Schedule an event
    Add {
        #[arg(required = true)]
        title: String,

        /// Start time, RFC 3339
        #[arg(long, required = true)]
        start: DateTime<Utc>,

        /// End time, RFC 3339
        #[arg(long, required = true)]
        end: DateTime<Utc>,

        #[arg(long = "type")]
        kind: Option<EventKindArg>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        project: Option<ProjectId>,

        #[arg(long)]
        task: Option<TaskId>,

        /// Attendee (repeatable)
        #[arg(long = "attendee")]
        attendees: Vec<MemberId>,
    },

    /// Edit an event
    Edit {
        #[arg(required = true)]
        id: EventId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, requires = "end")]
        start: Option<DateTime<Utc>>,

        #[arg(long)]
        end: Option<DateTime<Utc>>,

        #[arg(long = "type")]
        kind: Option<EventKindArg>,

        /// Replace the attendee list (repeatable)
        #[arg(long = "attendee")]
        attendees: Vec<MemberId>,
    },

    /// Delete an event
    Rm {
        #[arg(required = true)]
        id: EventId,
    },

    /// List events
    Ls {
        /// Only events starting on this day, YYYY-MM-DD
        #[arg(long)]
        on: Option<NaiveDate>,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotifyCommand {
    /// Push a notification
    Send {
        #[arg(required = true)]
        title: String,

        #[arg(default_value = "")]
        message: String,

        #[arg(long = "type", default_value = "info")]
        kind: NotificationKindArg,
    },

    /// List notifications, newest first
    Ls {
        /// Show only unread notifications
        #[arg(short, long)]
        unread: bool,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Mark one notification as read
    Read {
        #[arg(required = true)]
        id: NotificationId,
    },

    /// Mark every notification as read
    ReadAll,

    /// Delete a notification
    Rm {
        #[arg(required = true)]
        id: NotificationId,
    },

    /// Delete every notification
    Clear,
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectStatusArg {
    Planning,
    InProgress,
    Completed,
}

impl From<ProjectStatusArg> for ProjectStatus {
    fn from(arg: ProjectStatusArg) -> Self {
        match arg {
            ProjectStatusArg::Planning => ProjectStatus::Planning,
            ProjectStatusArg::InProgress => ProjectStatus::InProgress,
            ProjectStatusArg::Completed => ProjectStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MemberStatusArg {
    Active,
    Inactive,
}

impl From<MemberStatusArg> for MemberStatus {
    fn from(arg: MemberStatusArg) -> Self {
        match arg {
            MemberStatusArg::Active => MemberStatus::Active,
            MemberStatusArg::Inactive => MemberStatus::Inactive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventKindArg {
    Meeting,
    Deadline,
    Reminder,
    General,
}

impl From<EventKindArg> for EventKind {
    fn from(arg: EventKindArg) -> Self {
        match arg {
            EventKindArg::Meeting => EventKind::Meeting,
            EventKindArg::Deadline => EventKind::Deadline,
            EventKindArg::Reminder => EventKind::Reminder,
            EventKindArg::General => EventKind::General,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotificationKindArg {
    Info,
    Success,
    Warning,
    Error,
}

impl From<NotificationKindArg> for NotificationKind {
    fn from(arg: NotificationKindArg) -> Self {
        match arg {
            NotificationKindArg::Info => NotificationKind::Info,
            NotificationKindArg::Success => NotificationKind::Success,
            NotificationKindArg::Warning => NotificationKind::Warning,
            NotificationKindArg::Error => NotificationKind::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    All,
    Tasks,
    Projects,
    Team,
    Events,
}

impl From<ScopeArg> for SearchScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => SearchScope::All,
            ScopeArg::Tasks => SearchScope::Tasks,
            ScopeArg::Projects => SearchScope::Projects,
            ScopeArg::Team => SearchScope::Team,
            ScopeArg::Events => SearchScope::Events,
        }
    }
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        config::resolve_state_dir(self.state_dir.as_deref())
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

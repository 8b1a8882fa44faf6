//! Command implementations.

use std::path::Path;

use chrono::Utc;
use taskflow_board::{
    search, BoardMetrics, DragLocation, DragOutcome, DragResult, ProjectFilter, SearchHit,
    SearchScope, Snapshot, TaskBoard, TaskFilter,
};
use taskflow_models::{
    Assignee, EventDraft, EventPatch, MemberDraft, MemberPatch, MemberStatus, ProjectDraft,
    ProjectPatch, Task, TaskDraft, TaskId, TaskPatch,
};
use taskflow_persistence::BoardStore;
use tracing::debug;

use crate::cli::{
    Commands, EventCommand, MemberCommand, NotifyCommand, OutputFormat, ProjectCommand,
    TaskCommand,
};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Executes a CLI command against the board stored in `state_dir`.
pub fn execute(command: Commands, state_dir: &Path) -> Result<()> {
    debug!(state_dir = %state_dir.display(), "opening board");
    let mut board = TaskBoard::open(BoardStore::new(state_dir));

    match command {
        Commands::Board { format } => cmd_board(&board.snapshot(), format),
        Commands::Task(command) => cmd_task(&mut board, command),
        Commands::Project(command) => cmd_project(&mut board, command),
        Commands::Member(command) => cmd_member(&mut board, command),
        Commands::Event(command) => cmd_event(&mut board, command),
        Commands::Notify(command) => cmd_notify(&mut board, command),
        Commands::Search {
            term,
            scope,
            format,
        } => cmd_search(&board.snapshot(), &term, scope.into(), format),
        Commands::Stats { format } => cmd_stats(&board.snapshot(), format),
    }
}

fn cmd_board(snapshot: &Snapshot, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for column in &snapshot.columns {
                println!("== {} ({}) ==", column.name, column.tasks.len());
                for task in &column.tasks {
                    println!(
                        "  {:<8}  {:<40}  due {}",
                        task.priority,
                        truncate(&task.title, 40),
                        task.due_date
                    );
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot.columns)?);
        }
        OutputFormat::Brief => {
            for column in &snapshot.columns {
                println!("{}\t{}", column.name, column.tasks.len());
            }
        }
    }
    Ok(())
}

/// Column currently holding `id`.
fn task_column(board: &TaskBoard, id: &TaskId) -> Result<String> {
    let snapshot = board.snapshot();
    let (column, _) = snapshot
        .find_task(id)
        .ok_or_else(|| format!("Task not found: {}", id))?;
    Ok(column.name.clone())
}

fn cmd_task(board: &mut TaskBoard, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Add {
            title,
            column,
            description,
            priority,
            due,
            assignee,
            member,
            project,
            tags,
        } => {
            let mut draft = TaskDraft::new(title);
            if let Some(description) = description {
                draft = draft.description(description);
            }
            if let Some(priority) = priority {
                draft = draft.priority(priority.into());
            }
            if let Some(due) = due {
                draft = draft.due_date(due);
            }
            if let Some(assignee) = member.map(Assignee::Member).or(assignee.map(Assignee::Name)) {
                draft = draft.assignee(assignee);
            }
            if let Some(project) = project {
                draft = draft.project(project);
            }
            for tag in tags {
                draft = draft.tag(tag);
            }
            let id = board.add_task(draft, column.as_deref())?;
            println!("Added task {}", id);
        }

        TaskCommand::Edit {
            id,
            title,
            description,
            clear_description,
            priority,
            due,
            assignee,
            member,
            unassign,
            project,
            no_project,
            tags,
            status,
        } => {
            let column = task_column(board, &id)?;
            let mut patch = TaskPatch::new();
            if let Some(title) = title {
                patch = patch.title(title);
            }
            if clear_description {
                patch = patch.description(None);
            } else if let Some(description) = description {
                patch = patch.description(Some(description));
            }
            if let Some(priority) = priority {
                patch = patch.priority(priority.into());
            }
            if let Some(due) = due {
                patch = patch.due_date(due);
            }
            if unassign {
                patch = patch.assignee(None);
            } else if let Some(assignee) =
                member.map(Assignee::Member).or(assignee.map(Assignee::Name))
            {
                patch = patch.assignee(Some(assignee));
            }
            if no_project {
                patch = patch.project(None);
            } else if let Some(project) = project {
                patch = patch.project(Some(project));
            }
            if !tags.is_empty() {
                patch = patch.tags(tags.into_iter().collect());
            }
            if let Some(status) = status {
                patch = patch.status(status);
            }
            board.update_task(&id, &column, &patch)?;
            println!("Updated task {}", id);
        }

        TaskCommand::Move { id, to } => {
            let from = task_column(board, &id)?;
            board.move_task(&id, &from, &to)?;
            println!("Moved task {} from '{}' to '{}'", id, from, to);
        }

        TaskCommand::Drag {
            from,
            from_index,
            to,
            to_index,
        } => {
            let destination = to.map(|column| DragLocation::new(column, to_index.unwrap_or(0)));
            let drag = DragResult::new(DragLocation::new(from, from_index), destination);
            match board.handle_drag_end(&drag)? {
                DragOutcome::Unchanged => println!("Board unchanged."),
                DragOutcome::Reordered => println!("Task reordered."),
                DragOutcome::Moved => println!("Task moved."),
            }
        }

        TaskCommand::Rm { id } => {
            let column = task_column(board, &id)?;
            board.delete_task(&column, &id)?;
            println!("Deleted task {}", id);
        }

        TaskCommand::Ls {
            column,
            priority,
            project,
            member,
            search,
            format,
        } => {
            let mut filter = TaskFilter::new();
            if let Some(column) = column {
                filter = filter.with_column(column);
            }
            if let Some(priority) = priority {
                filter = filter.with_priority(priority.into());
            }
            if let Some(project) = project {
                filter = filter.with_project_id(project);
            }
            if let Some(member) = member {
                filter = filter.with_assignee(Assignee::Member(member));
            }
            if let Some(search) = search {
                filter = filter.with_text(&search);
            }
            let snapshot = board.snapshot();
            let tasks: Vec<&Task> = snapshot.tasks().filter(|t| filter.matches(t)).collect();
            print_tasks(&snapshot, &tasks, format)?;
        }
    }
    Ok(())
}

/// Display name for an assignee, resolving roster ids to names.
fn assignee_label(snapshot: &Snapshot, assignee: &Assignee) -> String {
    match assignee {
        Assignee::Member(id) => snapshot
            .member(id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string()),
        Assignee::Name(name) => name.clone(),
    }
}

fn print_tasks(snapshot: &Snapshot, tasks: &[&Task], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if tasks.is_empty() {
                println!("No tasks found.");
                return Ok(());
            }

            println!(
                "{:<41}  {:<30}  {:<12}  {:<8}  {:<10}  ASSIGNEE",
                "ID", "TITLE", "COLUMN", "PRIORITY", "DUE"
            );
            println!("{}", "-".repeat(120));
            for task in tasks {
                let assignee = task
                    .assignee
                    .as_ref()
                    .map(|a| assignee_label(snapshot, a))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<41}  {:<30}  {:<12}  {:<8}  {:<10}  {}",
                    task.id,
                    truncate(&task.title, 30),
                    truncate(&task.status, 12),
                    task.priority,
                    task.due_date,
                    assignee
                );
            }
            println!("\n{} task(s)", tasks.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(tasks)?);
        }
        OutputFormat::Brief => {
            for task in tasks {
                println!("{}\t{}\t{}", task.id, task.status, task.title);
            }
        }
    }
    Ok(())
}

fn cmd_project(board: &mut TaskBoard, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::Add {
            name,
            description,
            status,
            start,
            end,
            progress,
            priority,
            members,
        } => {
            let mut draft = ProjectDraft::new(name).dates(start, end);
            if let Some(description) = description {
                draft = draft.description(description);
            }
            if let Some(status) = status {
                draft = draft.status(status.into());
            }
            if let Some(progress) = progress {
                draft = draft.progress(progress);
            }
            if let Some(priority) = priority {
                draft = draft.priority(priority.into());
            }
            for member in members {
                draft = draft.member(member);
            }
            let id = board.add_project(draft)?;
            println!("Added project {}", id);
        }

        ProjectCommand::Edit {
            id,
            name,
            status,
            progress,
            end,
            clear_end,
            members,
        } => {
            let mut patch = ProjectPatch::new();
            if let Some(name) = name {
                patch = patch.name(name);
            }
            if let Some(status) = status {
                patch = patch.status(status.into());
            }
            if let Some(progress) = progress {
                patch = patch.progress(progress);
            }
            if clear_end {
                patch = patch.end_date(None);
            } else if end.is_some() {
                patch = patch.end_date(end);
            }
            if !members.is_empty() {
                patch = patch.team_members(members);
            }
            if !board.update_project(&id, &patch)? {
                return Err(format!("Project not found: {}", id).into());
            }
            println!("Updated project {}", id);
        }

        ProjectCommand::Rm { id } => {
            if !board.delete_project(&id)? {
                return Err(format!("Project not found: {}", id).into());
            }
            println!("Deleted project {}", id);
        }

        ProjectCommand::Ls {
            status,
            search,
            format,
        } => {
            let mut filter = ProjectFilter::new();
            if let Some(status) = status {
                filter = filter.with_status(status.into());
            }
            if let Some(search) = search {
                filter = filter.with_text(&search);
            }
            let snapshot = board.snapshot();
            let projects: Vec<_> = snapshot
                .projects
                .iter()
                .filter(|p| filter.matches(p))
                .collect();

            match format {
                OutputFormat::Table => {
                    if projects.is_empty() {
                        println!("No projects found.");
                        return Ok(());
                    }
                    println!(
                        "{:<41}  {:<24}  {:<11}  {:>8}  TEAM",
                        "ID", "NAME", "STATUS", "PROGRESS"
                    );
                    println!("{}", "-".repeat(100));
                    for project in &projects {
                        println!(
                            "{:<41}  {:<24}  {:<11}  {:>7}%  {}",
                            project.id,
                            truncate(&project.name, 24),
                            project.status,
                            project.progress,
                            project.team_members.len()
                        );
                    }
                    println!("\n{} project(s)", projects.len());
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&projects)?);
                }
                OutputFormat::Brief => {
                    for project in &projects {
                        println!("{}\t{}", project.id, project.name);
                    }
                }
            }
        }
    }
    Ok(())
}

fn cmd_member(board: &mut TaskBoard, command: MemberCommand) -> Result<()> {
    match command {
        MemberCommand::Add {
            name,
            role,
            department,
            email,
            phone,
            location,
            inactive,
        } => {
            let mut draft = MemberDraft::new(name);
            if let Some(role) = role {
                draft = draft.role(role);
            }
            if let Some(department) = department {
                draft = draft.department(department);
            }
            if let Some(email) = email {
                draft = draft.email(email);
            }
            if let Some(phone) = phone {
                draft = draft.phone(phone);
            }
            if let Some(location) = location {
                draft = draft.location(location);
            }
            if inactive {
                draft = draft.status(MemberStatus::Inactive);
            }
            let id = board.add_team_member(draft)?;
            println!("Added team member {}", id);
        }

        MemberCommand::Edit {
            id,
            name,
            role,
            location,
            status,
        } => {
            let mut patch = MemberPatch::new();
            if let Some(name) = name {
                patch = patch.name(name);
            }
            if let Some(role) = role {
                patch = patch.role(role);
            }
            if let Some(location) = location {
                patch = patch.location(location);
            }
            if let Some(status) = status {
                patch = patch.status(status.into());
            }
            if !board.update_team_member(&id, &patch)? {
                return Err(format!("Team member not found: {}", id).into());
            }
            println!("Updated team member {}", id);
        }

        MemberCommand::Rm { id } => {
            if !board.delete_team_member(&id)? {
                return Err(format!("Team member not found: {}", id).into());
            }
            println!("Removed team member {}", id);
        }

        MemberCommand::Ls { active, format } => {
            let snapshot = board.snapshot();
            let members: Vec<_> = snapshot
                .team
                .iter()
                .filter(|m| !active || m.is_active())
                .collect();

            match format {
                OutputFormat::Table => {
                    if members.is_empty() {
                        println!("No team members found.");
                        return Ok(());
                    }
                    println!(
                        "{:<43}  {:<20}  {:<16}  {:<14}  STATUS",
                        "ID", "NAME", "ROLE", "DEPARTMENT"
                    );
                    println!("{}", "-".repeat(110));
                    for member in &members {
                        println!(
                            "{:<43}  {:<20}  {:<16}  {:<14}  {:?}",
                            member.id,
                            truncate(&member.name, 20),
                            truncate(&member.role, 16),
                            truncate(&member.department, 14),
                            member.status
                        );
                    }
                    println!("\n{} member(s)", members.len());
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&members)?);
                }
                OutputFormat::Brief => {
                    for member in &members {
                        println!("{}\t{}", member.id, member.name);
                    }
                }
            }
        }
    }
    Ok(())
}

fn cmd_event(board: &mut TaskBoard, command: EventCommand) -> Result<()> {
    match command {
        EventCommand::Add {
            title,
            start,
            end,
            kind,
            description,
            location,
            project,
            task,
            attendees,
        } => {
            let mut draft = EventDraft::new(title, start, end);
            if let Some(kind) = kind {
                draft = draft.kind(kind.into());
            }
            if let Some(description) = description {
                draft = draft.description(description);
            }
            if let Some(location) = location {
                draft = draft.location(location);
            }
            if let Some(project) = project {
                draft = draft.project(project);
            }
            if let Some(task) = task {
                draft = draft.task(task);
            }
            for attendee in attendees {
                draft = draft.attendee(attendee);
            }
            let id = board.add_event(draft)?;
            println!("Added event {}", id);
        }

        EventCommand::Edit {
            id,
            title,
            start,
            end,
            kind,
            attendees,
        } => {
            let mut patch = EventPatch::new();
            if let Some(title) = title {
                patch = patch.title(title);
            }
            match (start, end) {
                (Some(start), Some(end)) => patch = patch.times(start, end),
                (None, Some(end)) => patch = patch.end(end),
                _ => {}
            }
            if let Some(kind) = kind {
                patch = patch.kind(kind.into());
            }
            if !attendees.is_empty() {
                patch = patch.attendees(attendees);
            }
            if !board.update_event(&id, &patch)? {
                return Err(format!("Event not found: {}", id).into());
            }
            println!("Updated event {}", id);
        }

        EventCommand::Rm { id } => {
            if !board.delete_event(&id)? {
                return Err(format!("Event not found: {}", id).into());
            }
            println!("Deleted event {}", id);
        }

        EventCommand::Ls { on, format } => {
            let snapshot = board.snapshot();
            let mut events: Vec<_> = match on {
                Some(day) => snapshot.events_on(day),
                None => snapshot.events.iter().collect(),
            };
            events.sort_by_key(|e| e.start);

            match format {
                OutputFormat::Table => {
                    if events.is_empty() {
                        println!("No events found.");
                        return Ok(());
                    }
                    println!(
                        "{:<40}  {:<24}  {:<9}  {:<16}  END",
                        "ID", "TITLE", "TYPE", "START"
                    );
                    println!("{}", "-".repeat(110));
                    for event in &events {
                        println!(
                            "{:<40}  {:<24}  {:<9}  {:<16}  {}",
                            event.id,
                            truncate(&event.title, 24),
                            event.kind,
                            event.start.format("%Y-%m-%d %H:%M"),
                            event.end.format("%Y-%m-%d %H:%M")
                        );
                    }
                    println!("\n{} event(s)", events.len());
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&events)?);
                }
                OutputFormat::Brief => {
                    for event in &events {
                        println!("{}\t{}\t{}", event.id, event.start.to_rfc3339(), event.title);
                    }
                }
            }
        }
    }
    Ok(())
}

fn cmd_notify(board: &mut TaskBoard, command: NotifyCommand) -> Result<()> {
    match command {
        NotifyCommand::Send {
            title,
            message,
            kind,
        } => {
            let id = board.add_notification(kind.into(), title, message)?;
            println!("Added notification {}", id);
        }

        NotifyCommand::Ls { unread, format } => {
            let snapshot = board.snapshot();
            let notifications: Vec<_> = snapshot
                .notifications
                .iter()
                .filter(|n| !unread || !n.is_read)
                .collect();

            match format {
                OutputFormat::Table => {
                    if notifications.is_empty() {
                        println!("No notifications.");
                        return Ok(());
                    }
                    for n in &notifications {
                        let marker = if n.is_read { " " } else { "*" };
                        println!(
                            "{} {}  [{:?}] {}: {}  ({})",
                            marker,
                            n.id,
                            n.kind,
                            n.title,
                            n.message,
                            n.timestamp.format("%Y-%m-%d %H:%M")
                        );
                    }
                    println!("\n{} unread", snapshot.unread_notifications());
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&notifications)?);
                }
                OutputFormat::Brief => {
                    for n in &notifications {
                        println!("{}\t{}", n.id, n.title);
                    }
                }
            }
        }

        NotifyCommand::Read { id } => {
            if !board.snapshot().notifications.iter().any(|n| n.id == id) {
                return Err(format!("Notification not found: {}", id).into());
            }
            if board.mark_notification_read(&id)? {
                println!("Marked {} as read", id);
            } else {
                println!("{} was already read", id);
            }
        }

        NotifyCommand::ReadAll => {
            let changed = board.mark_all_notifications_read()?;
            println!("Marked {} notification(s) as read", changed);
        }

        NotifyCommand::Rm { id } => {
            if !board.delete_notification(&id)? {
                return Err(format!("Notification not found: {}", id).into());
            }
            println!("Deleted notification {}", id);
        }

        NotifyCommand::Clear => {
            let removed = board.clear_notifications()?;
            println!("Cleared {} notification(s)", removed);
        }
    }
    Ok(())
}

fn cmd_search(
    snapshot: &Snapshot,
    term: &str,
    scope: SearchScope,
    format: OutputFormat,
) -> Result<()> {
    let hits = search(snapshot, term, scope);

    match format {
        OutputFormat::Table => {
            if hits.is_empty() {
                println!("No matches for '{}'.", term);
                return Ok(());
            }
            for hit in &hits {
                let (kind, id) = hit_kind_and_id(hit);
                match hit {
                    SearchHit::Task { column, .. } => {
                        println!("{:<8}  {:<43}  {} [{}]", kind, id, hit.label(), column)
                    }
                    _ => println!("{:<8}  {:<43}  {}", kind, id, hit.label()),
                }
            }
            println!("\n{} match(es)", hits.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        OutputFormat::Brief => {
            for hit in &hits {
                let (kind, id) = hit_kind_and_id(hit);
                println!("{}\t{}\t{}", kind, id, hit.label());
            }
        }
    }
    Ok(())
}

fn hit_kind_and_id(hit: &SearchHit) -> (&'static str, &str) {
    match hit {
        SearchHit::Task { id, .. } => ("task", id.as_str()),
        SearchHit::Project { id, .. } => ("project", id.as_str()),
        SearchHit::Member { id, .. } => ("member", id.as_str()),
        SearchHit::Event { id, .. } => ("event", id.as_str()),
    }
}

fn cmd_stats(snapshot: &Snapshot, format: OutputFormat) -> Result<()> {
    let metrics = BoardMetrics::compute(snapshot, Utc::now());

    match format {
        OutputFormat::Table => {
            println!("Tasks: {}", metrics.total_tasks);
            for column in &metrics.by_column {
                println!("  {:<14} {}", column.column, column.count);
            }
            println!("  High priority:      {}", metrics.high_priority);
            println!("  Overdue:            {}", metrics.overdue);
            println!("  Completed (7 days): {}", metrics.completed_recently);

            println!(
                "\nProjects: {} active of {}",
                metrics.active_projects,
                snapshot.projects.len()
            );
            for progress in &metrics.project_progress {
                println!(
                    "  {:<24} {}/{} tasks done ({}%)",
                    truncate(&progress.name, 24),
                    progress.completed_tasks,
                    progress.total_tasks,
                    progress.percent()
                );
            }

            println!(
                "\nTeam: {} active of {}",
                metrics.active_members,
                snapshot.team.len()
            );
            for load in &metrics.workloads {
                println!(
                    "  {:<24} {} assigned, {} in progress, {} done",
                    truncate(&load.name, 24),
                    load.assigned,
                    load.in_progress,
                    load.completed
                );
            }

            println!("\nUpcoming events: {}", metrics.upcoming_events);
            if !metrics.upcoming_deadlines.is_empty() {
                println!("Upcoming deadlines:");
                for deadline in &metrics.upcoming_deadlines {
                    println!(
                        "  {}  {} [{}]",
                        deadline.due_date, deadline.title, deadline.column
                    );
                }
            }
            println!("Unread notifications: {}", snapshot.unread_notifications());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        OutputFormat::Brief => {
            println!(
                "tasks={} overdue={} projects={} members={} events={}",
                metrics.total_tasks,
                metrics.overdue,
                metrics.active_projects,
                metrics.active_members,
                metrics.upcoming_events
            );
        }
    }
    Ok(())
}

/// Truncates a string to the given number of characters, adding "..." if
/// truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::sync::Arc;
    use taskflow_models::{column, Priority};
    use tempfile::tempdir;

    fn run(dir: &Path, args: &[&str]) -> Result<()> {
        let argv = std::iter::once("taskflow").chain(args.iter().copied());
        let cli = Cli::parse_from(argv);
        execute(cli.command, dir)
    }

    fn load(dir: &Path) -> Arc<Snapshot> {
        TaskBoard::open(BoardStore::new(dir)).snapshot()
    }

    #[test]
    fn test_empty_board_listings() {
        let dir = tempdir().unwrap();

        // Should not fail on a fresh state directory
        run(dir.path(), &["board"]).unwrap();
        run(dir.path(), &["task", "ls", "-f", "brief"]).unwrap();
        run(dir.path(), &["stats", "-f", "json"]).unwrap();
        run(dir.path(), &["search", "anything"]).unwrap();
    }

    #[test]
    fn test_task_add_persists() {
        let dir = tempdir().unwrap();
        run(
            dir.path(),
            &["task", "add", "Write release notes", "-p", "high", "--assignee", "Ada"],
        )
        .unwrap();

        let snapshot = load(dir.path());
        let tasks = snapshot.column_tasks(column::TO_DO);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Write release notes");
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].assignee, Some(Assignee::Name("Ada".to_string())));
    }

    #[test]
    fn test_task_add_rejects_blank_title() {
        let dir = tempdir().unwrap();
        assert!(run(dir.path(), &["task", "add", "  "]).is_err());
        assert_eq!(load(dir.path()).tasks().count(), 0);
    }

    #[test]
    fn test_task_move_and_edit() {
        let dir = tempdir().unwrap();
        run(dir.path(), &["task", "add", "Ship it"]).unwrap();
        let id = load(dir.path()).column_tasks(column::TO_DO)[0].id.clone();

        run(dir.path(), &["task", "move", id.as_str(), column::DONE]).unwrap();
        let snapshot = load(dir.path());
        let (col, task) = snapshot.find_task(&id).unwrap();
        assert_eq!(col.name, column::DONE);
        assert!(task.completed_at.is_some());

        run(
            dir.path(),
            &["task", "edit", id.as_str(), "--title", "Shipped", "--status", column::REVIEW],
        )
        .unwrap();
        let snapshot = load(dir.path());
        let (col, task) = snapshot.find_task(&id).unwrap();
        assert_eq!(col.name, column::REVIEW);
        assert_eq!(task.title, "Shipped");
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_task_drag_between_columns() {
        let dir = tempdir().unwrap();
        run(dir.path(), &["task", "add", "first"]).unwrap();
        run(dir.path(), &["task", "add", "second"]).unwrap();

        run(dir.path(), &["task", "drag", column::TO_DO, "1", column::IN_PROGRESS]).unwrap();
        let snapshot = load(dir.path());
        assert_eq!(snapshot.column_tasks(column::TO_DO)[0].title, "first");
        assert_eq!(snapshot.column_tasks(column::IN_PROGRESS)[0].title, "second");

        // Cancelled drag
        run(dir.path(), &["task", "drag", column::TO_DO, "0"]).unwrap();
        assert_eq!(load(dir.path()).column_tasks(column::TO_DO).len(), 1);
    }

    #[test]
    fn test_unknown_task_is_an_error() {
        let dir = tempdir().unwrap();
        let err = run(dir.path(), &["task", "rm", "task-missing"]).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_contact_and_location_flags() {
        let dir = tempdir().unwrap();
        run(
            dir.path(),
            &["member", "add", "Grace", "--phone", "+1 555 0100", "--location", "Remote"],
        )
        .unwrap();
        let member_id = load(dir.path()).team[0].id.clone();
        run(dir.path(), &["member", "edit", member_id.as_str(), "--location", "Berlin"]).unwrap();
        run(
            dir.path(),
            &[
                "event",
                "add",
                "Offsite",
                "--start",
                "2024-12-02T09:00:00Z",
                "--end",
                "2024-12-02T17:00:00Z",
                "--location",
                "Lisbon office",
            ],
        )
        .unwrap();

        let snapshot = load(dir.path());
        assert_eq!(snapshot.team[0].phone, "+1 555 0100");
        assert_eq!(snapshot.team[0].location, "Berlin");
        assert_eq!(snapshot.events[0].location, "Lisbon office");
    }

    #[test]
    fn test_member_removal_unassigns_tasks() {
        let dir = tempdir().unwrap();
        run(dir.path(), &["member", "add", "Ada", "--role", "Engineer"]).unwrap();
        let member_id = load(dir.path()).team[0].id.clone();
        run(
            dir.path(),
            &["task", "add", "Review PR", "--member", member_id.as_str()],
        )
        .unwrap();
        run(dir.path(), &["task", "ls", "--member", member_id.as_str()]).unwrap();

        run(dir.path(), &["member", "rm", member_id.as_str()]).unwrap();
        let snapshot = load(dir.path());
        assert!(snapshot.team.is_empty());
        assert!(snapshot.tasks().all(|t| t.assignee.is_none()));
    }

    #[test]
    fn test_project_lifecycle() {
        let dir = tempdir().unwrap();
        run(dir.path(), &["project", "add", "Launch", "--progress", "150"]).unwrap();
        let project = load(dir.path()).projects[0].clone();
        assert_eq!(project.progress, 100);

        run(
            dir.path(),
            &["project", "edit", project.id.as_str(), "--status", "completed"],
        )
        .unwrap();
        run(dir.path(), &["project", "ls", "--status", "completed", "-f", "json"]).unwrap();

        run(dir.path(), &["project", "rm", project.id.as_str()]).unwrap();
        assert!(load(dir.path()).projects.is_empty());
        assert!(run(dir.path(), &["project", "rm", project.id.as_str()]).is_err());
    }

    #[test]
    fn test_event_rejects_inverted_times() {
        let dir = tempdir().unwrap();
        let result = run(
            dir.path(),
            &[
                "event",
                "add",
                "Backwards",
                "--start",
                "2024-12-10T10:00:00Z",
                "--end",
                "2024-12-10T09:00:00Z",
            ],
        );
        assert!(result.is_err());
        assert!(load(dir.path()).events.is_empty());
    }

    #[test]
    fn test_notifications() {
        let dir = tempdir().unwrap();
        run(dir.path(), &["notify", "send", "Deploy", "finished", "--type", "success"]).unwrap();
        run(dir.path(), &["notify", "send", "Build", "failed", "--type", "error"]).unwrap();
        assert_eq!(load(dir.path()).unread_notifications(), 2);

        run(dir.path(), &["notify", "read-all"]).unwrap();
        assert_eq!(load(dir.path()).unread_notifications(), 0);

        run(dir.path(), &["notify", "clear"]).unwrap();
        assert!(load(dir.path()).notifications.is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hi", 2), "hi");
    }
}

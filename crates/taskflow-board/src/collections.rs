//! Mutation API for projects, team members and events.
//!
//! All three follow the same pattern: generate id + timestamps on create,
//! merge-patch + refresh `updated_at` on update, filter by id on delete.
//! Deleting a project or member never deletes the entities that referenced
//! it; the references are cleared instead.

use taskflow_models::{
    EventDraft, EventId, EventPatch, MemberDraft, MemberId, MemberPatch, ProjectDraft, ProjectId,
    ProjectPatch,
};
use taskflow_persistence::Collection;
use tracing::{debug, info};

use crate::board::TaskBoard;
use crate::error::Result;

impl TaskBoard {
    /// Adds a project.
    ///
    /// # Errors
    /// Validation error for a blank name or an end date before the start.
    pub fn add_project(&mut self, draft: ProjectDraft) -> Result<ProjectId> {
        let project = draft.into_project(Self::now())?;
        let id = project.id.clone();

        let mut next = (*self.snapshot()).clone();
        next.projects.push(project);
        self.commit(next, &[Collection::Projects])?;

        info!(project_id = %id, "project added");
        Ok(id)
    }

    /// Merges a patch onto a project. `Ok(false)` if the id is unknown.
    pub fn update_project(&mut self, id: &ProjectId, patch: &ProjectPatch) -> Result<bool> {
        let current = self.snapshot();
        let Some(index) = current.projects.iter().position(|p| &p.id == id) else {
            debug!(project_id = %id, "update skipped: project not found");
            return Ok(false);
        };
        let updated = patch.apply(&current.projects[index], Self::now())?;

        let mut next = (*current).clone();
        next.projects[index] = updated;
        self.commit(next, &[Collection::Projects])?;

        info!(project_id = %id, "project updated");
        Ok(true)
    }

    /// Deletes a project and clears its id from tasks and events.
    pub fn delete_project(&mut self, id: &ProjectId) -> Result<bool> {
        let current = self.snapshot();
        if current.project(id).is_none() {
            debug!(project_id = %id, "delete skipped: project not found");
            return Ok(false);
        }

        let mut next = (*current).clone();
        next.projects.retain(|p| &p.id != id);
        let (tasks_changed, events_changed) = next.clear_project_refs(id);

        let mut changed = vec![Collection::Projects];
        if tasks_changed {
            changed.push(Collection::Tasks);
        }
        if events_changed {
            changed.push(Collection::Events);
        }
        self.commit(next, &changed)?;

        info!(project_id = %id, tasks_changed, events_changed, "project deleted");
        Ok(true)
    }

    /// Adds a team member.
    pub fn add_team_member(&mut self, draft: MemberDraft) -> Result<MemberId> {
        let member = draft.into_member(Self::now())?;
        let id = member.id.clone();

        let mut next = (*self.snapshot()).clone();
        next.team.push(member);
        self.commit(next, &[Collection::Team])?;

        info!(member_id = %id, "team member added");
        Ok(id)
    }

    /// Merges a patch onto a team member. `Ok(false)` if the id is unknown.
    pub fn update_team_member(&mut self, id: &MemberId, patch: &MemberPatch) -> Result<bool> {
        let current = self.snapshot();
        let Some(index) = current.team.iter().position(|m| &m.id == id) else {
            debug!(member_id = %id, "update skipped: member not found");
            return Ok(false);
        };
        let updated = patch.apply(&current.team[index], Self::now())?;

        let mut next = (*current).clone();
        next.team[index] = updated;
        self.commit(next, &[Collection::Team])?;

        info!(member_id = %id, "team member updated");
        Ok(true)
    }

    /// Deletes a team member and unassigns it everywhere.
    ///
    /// Tasks lose the assignee, projects and events drop the id from their
    /// member lists. Nothing else is deleted.
    pub fn delete_team_member(&mut self, id: &MemberId) -> Result<bool> {
        let current = self.snapshot();
        if current.member(id).is_none() {
            debug!(member_id = %id, "delete skipped: member not found");
            return Ok(false);
        }

        let mut next = (*current).clone();
        next.team.retain(|m| &m.id != id);
        let (tasks_changed, projects_changed, events_changed) = next.clear_member_refs(id);

        let mut changed = vec![Collection::Team];
        if tasks_changed {
            changed.push(Collection::Tasks);
        }
        if projects_changed {
            changed.push(Collection::Projects);
        }
        if events_changed {
            changed.push(Collection::Events);
        }
        self.commit(next, &changed)?;

        info!(member_id = %id, "team member deleted");
        Ok(true)
    }

    /// Adds a calendar event.
    ///
    /// # Errors
    /// Validation error for a blank title or an end before the start.
    pub fn add_event(&mut self, draft: EventDraft) -> Result<EventId> {
        let event = draft.into_event(Self::now())?;
        let id = event.id.clone();

        let mut next = (*self.snapshot()).clone();
        next.events.push(event);
        self.commit(next, &[Collection::Events])?;

        info!(event_id = %id, "event added");
        Ok(id)
    }

    /// Merges a patch onto an event. `Ok(false)` if the id is unknown.
    pub fn update_event(&mut self, id: &EventId, patch: &EventPatch) -> Result<bool> {
        let current = self.snapshot();
        let Some(index) = current.events.iter().position(|e| &e.id == id) else {
            debug!(event_id = %id, "update skipped: event not found");
            return Ok(false);
        };
        let updated = patch.apply(&current.events[index], Self::now())?;

        let mut next = (*current).clone();
        next.events[index] = updated;
        self.commit(next, &[Collection::Events])?;

        info!(event_id = %id, "event updated");
        Ok(true)
    }

    /// Deletes an event. `Ok(false)` if the id is unknown.
    pub fn delete_event(&mut self, id: &EventId) -> Result<bool> {
        let current = self.snapshot();
        if current.event(id).is_none() {
            debug!(event_id = %id, "delete skipped: event not found");
            return Ok(false);
        }

        let mut next = (*current).clone();
        next.events.retain(|e| &e.id != id);
        self.commit(next, &[Collection::Events])?;

        info!(event_id = %id, "event deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::{BoardError, TaskBoard};
    use chrono::{Duration, NaiveDate, Utc};
    use std::sync::Arc;
    use taskflow_models::{
        column, Assignee, EventDraft, EventPatch, MemberDraft, MemberPatch, MemberStatus,
        ProjectDraft, ProjectPatch, ProjectStatus, TaskDraft,
    };
    use taskflow_persistence::BoardStore;
    use tempfile::{tempdir, TempDir};

    fn open() -> (TempDir, TaskBoard) {
        let dir = tempdir().unwrap();
        let board = TaskBoard::open(BoardStore::new(dir.path()));
        (dir, board)
    }

    #[test]
    fn test_project_crud() {
        let (_dir, mut board) = open();
        let id = board
            .add_project(ProjectDraft::new("Website redesign").progress(20))
            .unwrap();

        let patch = ProjectPatch::new().status(ProjectStatus::InProgress).progress(55);
        assert!(board.update_project(&id, &patch).unwrap());
        let snapshot = board.snapshot();
        let project = snapshot.project(&id).unwrap();
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.progress, 55);
        assert!(project.updated_at >= project.created_at);

        assert!(board.delete_project(&id).unwrap());
        assert!(!board.delete_project(&id).unwrap());
        assert!(board.snapshot().projects.is_empty());
    }

    #[test]
    fn test_update_unknown_project_is_noop() {
        let (_dir, mut board) = open();
        let before = board.snapshot();
        let updated = board
            .update_project(&"proj-missing".into(), &ProjectPatch::new().name("x"))
            .unwrap();
        assert!(!updated);
        assert!(Arc::ptr_eq(&before, &board.snapshot()));
    }

    #[test]
    fn test_project_validation_errors() {
        let (_dir, mut board) = open();
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let result = board.add_project(ProjectDraft::new("Backwards").dates(Some(start), Some(end)));
        assert!(matches!(result, Err(BoardError::Validation(_))));
        assert!(board.snapshot().projects.is_empty());
    }

    #[test]
    fn test_delete_project_clears_references() {
        let (_dir, mut board) = open();
        let project = board.add_project(ProjectDraft::new("Launch")).unwrap();
        let task = board
            .add_task(TaskDraft::new("Press kit").project(project.clone()), None)
            .unwrap();
        let now = Utc::now();
        let event = board
            .add_event(EventDraft::new("Launch day", now, now).project(project.clone()))
            .unwrap();

        board.delete_project(&project).unwrap();

        let snapshot = board.snapshot();
        let (_, task) = snapshot.find_task(&task).unwrap();
        assert_eq!(task.project_id, None);
        assert_eq!(snapshot.event(&event).unwrap().project_id, None);
    }

    #[test]
    fn test_member_crud() {
        let (_dir, mut board) = open();
        let id = board
            .add_team_member(MemberDraft::new("Ada Lovelace").role("Engineer"))
            .unwrap();

        let patch = MemberPatch::new().status(MemberStatus::Inactive);
        assert!(board.update_team_member(&id, &patch).unwrap());
        assert!(!board.snapshot().member(&id).unwrap().is_active());

        assert!(board.delete_team_member(&id).unwrap());
        assert!(!board.delete_team_member(&id).unwrap());
    }

    #[test]
    fn test_delete_member_unassigns_everywhere() {
        let (_dir, mut board) = open();
        let ada = board.add_team_member(MemberDraft::new("Ada")).unwrap();
        let grace = board.add_team_member(MemberDraft::new("Grace")).unwrap();

        let task = board
            .add_task(
                TaskDraft::new("Compile").assignee(Assignee::Member(ada.clone())),
                Some(column::IN_PROGRESS),
            )
            .unwrap();
        let other = board
            .add_task(TaskDraft::new("Debug").assignee(Assignee::Member(grace.clone())), None)
            .unwrap();
        let project = board
            .add_project(ProjectDraft::new("Engine").member(ada.clone()).member(grace.clone()))
            .unwrap();
        let now = Utc::now();
        let event = board
            .add_event(
                EventDraft::new("Sync", now, now + Duration::minutes(30))
                    .attendee(ada.clone())
                    .attendee(grace.clone()),
            )
            .unwrap();

        board.delete_team_member(&ada).unwrap();

        let snapshot = board.snapshot();
        assert_eq!(snapshot.tasks().count(), 2);
        assert!(snapshot.tasks().all(|t| !t.is_assigned_to(&ada)));
        assert!(snapshot.projects.iter().all(|p| !p.team_members.contains(&ada)));
        assert!(snapshot.events.iter().all(|e| !e.attendees.contains(&ada)));

        assert_eq!(snapshot.find_task(&task).unwrap().1.assignee, None);
        assert_eq!(
            snapshot.find_task(&other).unwrap().1.assignee,
            Some(Assignee::Member(grace.clone()))
        );
        assert_eq!(snapshot.project(&project).unwrap().team_members, vec![grace.clone()]);
        assert_eq!(snapshot.event(&event).unwrap().attendees, vec![grace]);
    }

    #[test]
    fn test_event_crud_and_validation() {
        let (_dir, mut board) = open();
        let start = Utc::now();
        let id = board
            .add_event(EventDraft::new("Retro", start, start + Duration::hours(1)))
            .unwrap();

        let bad = EventPatch::new().end(start - Duration::hours(1));
        assert!(matches!(
            board.update_event(&id, &bad),
            Err(BoardError::Validation(_))
        ));

        assert!(board.update_event(&id, &EventPatch::new().title("Retrospective")).unwrap());
        assert_eq!(board.snapshot().event(&id).unwrap().title, "Retrospective");

        assert!(board.delete_event(&id).unwrap());
        assert!(!board.delete_event(&id).unwrap());
    }

    #[test]
    fn test_collections_persist_across_reopen() {
        let dir = tempdir().unwrap();
        let mut board = TaskBoard::open(BoardStore::new(dir.path()));
        let member = board.add_team_member(MemberDraft::new("Ada")).unwrap();
        board
            .add_project(ProjectDraft::new("Engine").member(member.clone()))
            .unwrap();
        let now = Utc::now();
        board
            .add_event(EventDraft::new("Demo", now, now).attendee(member))
            .unwrap();

        let reopened = TaskBoard::open(BoardStore::new(dir.path()));
        assert_eq!(*reopened.snapshot(), *board.snapshot());
    }
}

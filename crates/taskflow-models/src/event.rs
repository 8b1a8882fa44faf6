//! Calendar event types.
//!
//! # Invariants
//! - `end >= start` for every committed event.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{EventId, MemberId, ProjectId, TaskId};
use crate::validation::{self, ValidationError};

/// Kind of calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    Meeting,
    Deadline,
    Reminder,
    General,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::Meeting => "meeting",
            EventKind::Deadline => "deadline",
            EventKind::Reminder => "reminder",
            EventKind::General => "general",
        };
        f.write_str(s)
    }
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    /// Serialized as `type` to match the calendar's field naming.
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(default)]
    pub attendees: Vec<MemberId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Returns true if the event starts on the given UTC calendar day.
    pub fn starts_on(&self, day: NaiveDate) -> bool {
        self.start.date_naive() == day
    }

    /// Drops an attendee. Returns true if it was present.
    pub fn remove_attendee(&mut self, member: &MemberId) -> bool {
        let before = self.attendees.len();
        self.attendees.retain(|m| m != member);
        self.attendees.len() != before
    }
}

/// Unsaved event fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    pub kind: EventKind,
    pub project_id: Option<ProjectId>,
    pub task_id: Option<TaskId>,
    pub attendees: Vec<MemberId>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start,
            end,
            location: String::new(),
            kind: EventKind::default(),
            project_id: None,
            task_id: None,
            attendees: Vec::new(),
        }
    }

    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn attendee(mut self, member: MemberId) -> Self {
        if !self.attendees.contains(&member) {
            self.attendees.push(member);
        }
        self
    }

    pub fn validate(&self) -> validation::Result<()> {
        validation::require_text("event", "title", &self.title)?;
        validation::require_ordered("event", Some(&self.start), Some(&self.end))
    }

    pub fn into_event(self, now: DateTime<Utc>) -> Result<Event, ValidationError> {
        self.validate()?;
        Ok(Event {
            id: EventId::new(),
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            location: self.location,
            kind: self.kind,
            project_id: self.project_id,
            task_id: self.task_id,
            attendees: self.attendees,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update for an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub kind: Option<EventKind>,
    pub project_id: Option<Option<ProjectId>>,
    pub task_id: Option<Option<TaskId>>,
    pub attendees: Option<Vec<MemberId>>,
}

impl EventPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn times(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn attendees(mut self, attendees: Vec<MemberId>) -> Self {
        self.attendees = Some(attendees);
        self
    }

    /// Applies the patch to a copy of `event`, validating the merged times.
    pub fn apply(&self, event: &Event, now: DateTime<Utc>) -> Result<Event, ValidationError> {
        let mut next = event.clone();
        if let Some(title) = &self.title {
            validation::require_text("event", "title", title)?;
            next.title = title.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(start) = self.start {
            next.start = start;
        }
        if let Some(end) = self.end {
            next.end = end;
        }
        validation::require_ordered("event", Some(&next.start), Some(&next.end))?;
        if let Some(location) = &self.location {
            next.location = location.clone();
        }
        if let Some(kind) = self.kind {
            next.kind = kind;
        }
        if let Some(project_id) = &self.project_id {
            next.project_id = project_id.clone();
        }
        if let Some(task_id) = &self.task_id {
            next.task_id = task_id.clone();
        }
        if let Some(attendees) = &self.attendees {
            next.attendees = attendees.clone();
        }
        next.updated_at = now;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 2, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_kind_serialized_as_type() {
        let event = EventDraft::new("Standup", at(9), at(10))
            .kind(EventKind::Reminder)
            .into_event(Utc::now())
            .unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "reminder");
    }

    #[test]
    fn test_location_optional_on_the_wire() {
        let event = EventDraft::new("Offsite", at(9), at(17))
            .location("Lisbon office")
            .into_event(Utc::now())
            .unwrap();
        let mut json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["location"], "Lisbon office");

        json.as_object_mut().unwrap().remove("location");
        let older: Event = serde_json::from_value(json).unwrap();
        assert_eq!(older.location, "");

        let moved = EventPatch::new()
            .location("Room 4")
            .apply(&event, Utc::now())
            .unwrap();
        assert_eq!(moved.location, "Room 4");
        assert_eq!(moved.title, "Offsite");
    }

    #[test]
    fn test_end_before_start_rejected() {
        let result = EventDraft::new("Backwards", at(10), at(9)).into_event(Utc::now());
        assert!(matches!(result, Err(ValidationError::InvertedRange { .. })));
    }

    #[test]
    fn test_zero_length_event_allowed() {
        assert!(EventDraft::new("Deadline", at(17), at(17))
            .into_event(Utc::now())
            .is_ok());
    }

    #[test]
    fn test_patch_validates_merged_times() {
        let event = EventDraft::new("Review", at(13), at(14)).into_event(Utc::now()).unwrap();
        assert!(EventPatch::new().end(at(12)).apply(&event, Utc::now()).is_err());

        let moved = EventPatch::new()
            .times(at(15), at(15) + Duration::minutes(30))
            .apply(&event, Utc::now())
            .unwrap();
        assert_eq!(moved.start, at(15));
    }

    #[test]
    fn test_starts_on() {
        let event = EventDraft::new("Standup", at(9), at(10)).into_event(Utc::now()).unwrap();
        assert!(event.starts_on(NaiveDate::from_ymd_opt(2024, 12, 2).unwrap()));
        assert!(!event.starts_on(NaiveDate::from_ymd_opt(2024, 12, 3).unwrap()));
    }
}

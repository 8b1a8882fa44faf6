//! Team roster types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::MemberId;
use crate::validation::{self, ValidationError};

/// Department assigned when none is given.
pub const DEFAULT_DEPARTMENT: &str = "Engineering";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

/// A person on the team roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// Unsaved roster entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDraft {
    pub name: String,
    pub role: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub status: MemberStatus,
}

impl MemberDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: String::new(),
            department: DEFAULT_DEPARTMENT.to_string(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            status: MemberStatus::Active,
        }
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> validation::Result<()> {
        validation::require_text("member", "name", &self.name)
    }

    pub fn into_member(self, now: DateTime<Utc>) -> Result<TeamMember, ValidationError> {
        self.validate()?;
        Ok(TeamMember {
            id: MemberId::new(),
            name: self.name,
            role: self.role,
            department: self.department,
            email: self.email,
            phone: self.phone,
            location: self.location,
            status: self.status,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update for a roster entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub status: Option<MemberStatus>,
}

impl MemberPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn status(mut self, status: MemberStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn apply(&self, member: &TeamMember, now: DateTime<Utc>) -> Result<TeamMember, ValidationError> {
        let mut next = member.clone();
        if let Some(name) = &self.name {
            validation::require_text("member", "name", name)?;
            next.name = name.clone();
        }
        if let Some(role) = &self.role {
            next.role = role.clone();
        }
        if let Some(department) = &self.department {
            next.department = department.clone();
        }
        if let Some(email) = &self.email {
            next.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            next.phone = phone.clone();
        }
        if let Some(location) = &self.location {
            next.location = location.clone();
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        next.updated_at = now;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let member = MemberDraft::new("Ada").role("Engineer").into_member(Utc::now()).unwrap();
        assert_eq!(member.department, DEFAULT_DEPARTMENT);
        assert!(member.is_active());
        assert!(member.id.as_str().starts_with("member-"));
    }

    #[test]
    fn test_contact_fields() {
        let member = MemberDraft::new("Grace")
            .phone("+1 555 0100")
            .location("Remote")
            .into_member(Utc::now())
            .unwrap();
        assert_eq!(member.phone, "+1 555 0100");

        let moved = MemberPatch::new()
            .location("Berlin")
            .apply(&member, Utc::now())
            .unwrap();
        assert_eq!(moved.location, "Berlin");
        assert_eq!(moved.phone, "+1 555 0100");

        let bare = r#"{"id":"member-1","name":"Linus","created_at":"2024-12-01T00:00:00Z","updated_at":"2024-12-01T00:00:00Z"}"#;
        let older: TeamMember = serde_json::from_str(bare).unwrap();
        assert!(older.phone.is_empty() && older.location.is_empty());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(MemberDraft::new("").into_member(Utc::now()).is_err());

        let member = MemberDraft::new("Ada").into_member(Utc::now()).unwrap();
        assert!(MemberPatch::new().name(" ").apply(&member, Utc::now()).is_err());
    }

    #[test]
    fn test_patch_deactivates() {
        let member = MemberDraft::new("Ada").into_member(Utc::now()).unwrap();
        let patched = MemberPatch::new()
            .status(MemberStatus::Inactive)
            .apply(&member, Utc::now())
            .unwrap();
        assert!(!patched.is_active());
        assert_eq!(patched.name, "Ada");
    }
}

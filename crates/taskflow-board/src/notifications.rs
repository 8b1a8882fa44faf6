//! Notification inbox operations.
//!
//! Notifications have their own lifecycle and blob; they never touch the
//! task, project, team or event collections.

use taskflow_models::{Notification, NotificationId, NotificationKind};
use taskflow_persistence::Collection;
use tracing::debug;

use crate::board::TaskBoard;
use crate::error::Result;

impl TaskBoard {
    /// Pushes an unread notification to the front of the inbox.
    pub fn add_notification(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<NotificationId> {
        let notification = Notification::new(kind, title, message, Self::now());
        let id = notification.id.clone();

        let mut next = (*self.snapshot()).clone();
        next.notifications.insert(0, notification);
        self.commit(next, &[Collection::Notifications])?;

        debug!(notification_id = %id, "notification added");
        Ok(id)
    }

    /// Marks one notification as read. `Ok(false)` if unknown or already read.
    pub fn mark_notification_read(&mut self, id: &NotificationId) -> Result<bool> {
        let current = self.snapshot();
        let Some(index) = current
            .notifications
            .iter()
            .position(|n| &n.id == id && !n.is_read)
        else {
            return Ok(false);
        };

        let mut next = (*current).clone();
        next.notifications[index].is_read = true;
        self.commit(next, &[Collection::Notifications])?;
        Ok(true)
    }

    /// Marks every notification as read. Returns how many changed.
    pub fn mark_all_notifications_read(&mut self) -> Result<usize> {
        let current = self.snapshot();
        let unread = current.unread_notifications();
        if unread == 0 {
            return Ok(0);
        }

        let mut next = (*current).clone();
        for notification in &mut next.notifications {
            notification.is_read = true;
        }
        self.commit(next, &[Collection::Notifications])?;
        Ok(unread)
    }

    /// Removes one notification. `Ok(false)` if unknown.
    pub fn delete_notification(&mut self, id: &NotificationId) -> Result<bool> {
        let current = self.snapshot();
        if !current.notifications.iter().any(|n| &n.id == id) {
            return Ok(false);
        }

        let mut next = (*current).clone();
        next.notifications.retain(|n| &n.id != id);
        self.commit(next, &[Collection::Notifications])?;
        Ok(true)
    }

    /// Empties the inbox. Returns how many were removed.
    pub fn clear_notifications(&mut self) -> Result<usize> {
        let current = self.snapshot();
        let count = current.notifications.len();
        if count == 0 {
            return Ok(0);
        }

        let mut next = (*current).clone();
        next.notifications.clear();
        self.commit(next, &[Collection::Notifications])?;
        Ok(count)
    }
}

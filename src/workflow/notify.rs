#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

/// Holds at most one visible notification. Dismissal is keyed by id so a timer armed for
/// an older notification cannot hide a newer one.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        let id = self.next_id;
        self.current = Some(Notification {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Returns true when the notification was still visible and is now hidden.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|current| current.id == id) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationCenter, NotificationKind};

    #[test]
    fn show_replaces_the_current_notification() {
        let mut center = NotificationCenter::default();
        center.show(NotificationKind::Success, "saved");
        center.show(NotificationKind::Error, "failed");
        let current = center.current().expect("notification should be visible");
        assert_eq!(current.message, "failed");
        assert_eq!(current.kind, NotificationKind::Error);
    }

    #[test]
    fn stale_expiry_does_not_hide_newer_notification() {
        let mut center = NotificationCenter::default();
        let first = center.show(NotificationKind::Success, "first");
        let second = center.show(NotificationKind::Success, "second");

        assert!(!center.expire(first));
        assert_eq!(center.current().map(|n| n.id), Some(second));
        assert!(center.expire(second));
        assert!(center.current().is_none());
        assert!(!center.expire(second));
    }
}

//! Transient toast notifications.
//!
//! [`NotificationQueue`] is plain data: time is passed in by the caller, so
//! expiry can be driven by a browser timer in the app and by hand in tests.

use crate::config::NOTIFICATION_TTL_MS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    /// Milliseconds; `<= 0` means the record stays until dismissed.
    pub ttl_ms: i64,
    pub created_at: f64,
}

impl Notification {
    pub fn is_sticky(&self) -> bool {
        self.ttl_ms <= 0
    }

    pub fn is_expired(&self, now: f64) -> bool {
        !self.is_sticky() && now - self.created_at >= self.ttl_ms as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    records: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record and return its id.
    pub fn enqueue(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        ttl_ms: i64,
        now: f64,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.records.push(Notification {
            id,
            message: message.into(),
            kind,
            ttl_ms,
            created_at: now,
        });
        id
    }

    /// Insert with the default TTL.
    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind, now: f64) -> u64 {
        self.enqueue(message, kind, NOTIFICATION_TTL_MS, now)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|n| n.id != id);
        self.records.len() != before
    }

    /// Drop expired records; returns how many were removed.
    pub fn expire(&mut self, now: f64) -> usize {
        let before = self.records.len();
        self.records.retain(|n| !n.is_expired(now));
        before - self.records.len()
    }

    /// Records still visible at `now`, oldest first.
    pub fn active(&self, now: f64) -> Vec<&Notification> {
        self.records.iter().filter(|n| !n.is_expired(now)).collect()
    }

    pub fn records(&self) -> &[Notification] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_expiry() {
        let mut q = NotificationQueue::new();
        let id = q.enqueue("Saved", NotificationKind::Success, 3000, 1_000.0);

        assert_eq!(q.active(1_000.0).len(), 1);
        assert_eq!(q.active(3_999.0)[0].id, id);
        assert!(q.active(4_000.0).is_empty());

        assert_eq!(q.expire(4_000.0), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn test_zero_ttl_never_expires() {
        let mut q = NotificationQueue::new();
        q.enqueue("Pinned", NotificationKind::Warning, 0, 0.0);
        q.enqueue("Also pinned", NotificationKind::Info, -5, 0.0);

        assert_eq!(q.expire(1.0e12), 0);
        assert_eq!(q.active(1.0e12).len(), 2);
    }

    #[test]
    fn test_dismiss() {
        let mut q = NotificationQueue::new();
        let a = q.enqueue("a", NotificationKind::Info, 0, 0.0);
        let b = q.enqueue("b", NotificationKind::Error, 0, 0.0);
        assert_ne!(a, b);

        assert!(q.dismiss(a));
        assert!(!q.dismiss(a));
        assert_eq!(q.records().len(), 1);
        assert_eq!(q.records()[0].message, "b");
    }

    #[test]
    fn test_push_uses_default_ttl() {
        let mut q = NotificationQueue::new();
        q.push("hello", NotificationKind::Info, 0.0);
        assert_eq!(q.records()[0].ttl_ms, NOTIFICATION_TTL_MS);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_expire_keeps_fresh_records() {
        let mut q = NotificationQueue::new();
        q.enqueue("old", NotificationKind::Info, 1000, 0.0);
        q.enqueue("new", NotificationKind::Info, 1000, 900.0);
        assert_eq!(q.expire(1000.0), 1);
        assert_eq!(q.records()[0].message, "new");
    }
}

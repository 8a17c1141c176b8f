//! Notification side-channel for store mutations.
//!
//! Store operations never perform I/O themselves; user-visible outcomes are
//! reported through a [`Notifier`] capability so the engine stays testable
//! and the presentation layer decides how notices are shown.

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A single user-facing notice raised by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Receiver for notices raised during an operation.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices in order. Used by tests and by callers that render
/// notices after the operation returns.
#[derive(Debug, Default)]
pub struct NoticeLog {
    pub notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn successes(&self) -> usize {
        self.notices
            .iter()
            .filter(|n| n.kind == NoticeKind::Success)
            .count()
    }

    pub fn errors(&self) -> usize {
        self.notices
            .iter()
            .filter(|n| n.kind == NoticeKind::Error)
            .count()
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Discards all notices.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _notice: Notice) {}
}

use std::time::Duration;
use web_time::Instant;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Notice {
    message: String,
    deadline: Instant,
}

impl Notice {
    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

/// Owns at most one transient message and the deadline it disappears at.
#[derive(Debug, Default)]
pub(crate) struct Notifier {
    pending: Option<Notice>,
}

impl Notifier {
    /// Shows `message` until `now + duration`, replacing whatever was pending.
    pub(crate) fn show(&mut self, message: impl Into<String>, duration: Duration, now: Instant) {
        let notice = Notice {
            message: message.into(),
            deadline: now + duration,
        };
        if let Some(previous) = self.pending.replace(notice) {
            log::trace!("notice replaced: {}", previous.message);
        }
    }

    /// Cancels the pending notice, returning it if there was one.
    pub(crate) fn hide(&mut self) -> Option<Notice> {
        self.pending.take()
    }

    /// The visible notice at `now`. Expired notices are dropped.
    pub(crate) fn current(&mut self, now: Instant) -> Option<&Notice> {
        if self
            .pending
            .as_ref()
            .is_some_and(|notice| now >= notice.deadline)
        {
            self.pending = None;
        }
        self.pending.as_ref()
    }
}

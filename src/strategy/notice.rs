//! A single user-visible error message that dismisses itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Sequence number; a dismissal only clears the notice it was scheduled for.
    pub id: u64,
    pub message: String,
}

/// Holds at most one notice. A new notice replaces the old one and reschedules
/// the dismissal. Dropping the holder cancels any pending dismissal.
pub struct ErrorNotice {
    tx: Arc<watch::Sender<Option<Notice>>>,
    dismiss_after: Duration,
    next_id: u64,
    pending: Option<JoinHandle<()>>,
}

impl ErrorNotice {
    pub fn new(dismiss_after: Duration) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            dismiss_after,
            next_id: 0,
            pending: None,
        }
    }

    /// Publishes `message` and schedules its dismissal. Must run inside a tokio runtime.
    pub fn show(&mut self, message: impl Into<String>) {
        self.cancel_pending();
        self.next_id += 1;
        let id = self.next_id;
        self.tx.send_replace(Some(Notice {
            id,
            message: message.into(),
        }));

        let tx = Arc::clone(&self.tx);
        let delay = self.dismiss_after;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send_if_modified(|current| match current {
                Some(notice) if notice.id == id => {
                    *current = None;
                    true
                }
                _ => false,
            });
        }));
    }

    pub fn clear(&mut self) {
        self.cancel_pending();
        self.tx.send_if_modified(|current| current.take().is_some());
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|n| n.message.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notice>> {
        self.tx.subscribe()
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for ErrorNotice {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, sleep};

    #[tokio::test(start_paused = true)]
    async fn notice_dismisses_after_interval() {
        let mut notice = ErrorNotice::new(DEFAULT_DISMISS_AFTER);
        let mut rx = notice.subscribe();
        let start = Instant::now();

        notice.show("boom");
        assert_eq!(notice.current().as_deref(), Some("boom"));
        rx.borrow_and_update();

        sleep(Duration::from_secs(4)).await;
        assert_eq!(notice.current().as_deref(), Some("boom"));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), None);
        assert!(start.elapsed() >= DEFAULT_DISMISS_AFTER);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_notice_survives_older_dismissal() {
        let mut notice = ErrorNotice::new(Duration::from_secs(5));

        notice.show("first");
        sleep(Duration::from_secs(3)).await;
        notice.show("second");

        // The first notice's deadline passes; the second must stay.
        sleep(Duration::from_secs(3)).await;
        assert_eq!(notice.current().as_deref(), Some("second"));

        sleep(Duration::from_secs(3)).await;
        assert_eq!(notice.current(), None);
    }

    #[tokio::test]
    async fn clear_removes_immediately() {
        let mut notice = ErrorNotice::new(Duration::from_secs(5));
        notice.show("boom");
        notice.clear();
        assert_eq!(notice.current(), None);
    }

    #[tokio::test]
    async fn clear_without_notice_does_not_notify() {
        let mut notice = ErrorNotice::new(Duration::from_secs(5));
        let rx = notice.subscribe();
        notice.clear();
        assert!(!rx.has_changed().unwrap());
    }
}

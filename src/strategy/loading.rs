use tokio::sync::watch;

/// In-flight flag plus a status line, valid only while a generation call is outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub message: String,
}

/// Marks the session as loading for its lifetime and resets the state on drop,
/// including when the awaiting future is dropped early.
pub(crate) struct LoadingGuard<'a> {
    tx: &'a watch::Sender<LoadingState>,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn start(tx: &'a watch::Sender<LoadingState>, message: impl Into<String>) -> Self {
        tx.send_replace(LoadingState {
            is_loading: true,
            message: message.into(),
        });
        Self { tx }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.tx.send_replace(LoadingState::default());
    }
}

//! Debounced autosave: one cancellable scheduled task per builder session.
//!
//! Every edit cancels the pending task and schedules a fresh one; when the
//! 2-second quiet window elapses, exactly one update call fires carrying the
//! latest snapshot. Intermediate states are never queued — last write wins.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::upstream::types::PortfolioUpdate;
use crate::upstream::{PortfolioApi, Session};

/// Quiet window before an edit is persisted.
pub const AUTOSAVE_DELAY: Duration = Duration::from_secs(2);

pub struct Autosaver {
    api: Arc<dyn PortfolioApi>,
    session: Session,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Autosaver {
    pub fn new(api: Arc<dyn PortfolioApi>, session: Session) -> Self {
        Self::with_delay(api, session, AUTOSAVE_DELAY)
    }

    pub fn with_delay(api: Arc<dyn PortfolioApi>, session: Session, delay: Duration) -> Self {
        Autosaver {
            api,
            session,
            delay,
            pending: None,
        }
    }

    /// Cancels any pending save and schedules this snapshot instead.
    pub fn schedule(&mut self, portfolio_id: i64, update: PortfolioUpdate) {
        self.cancel();

        let api = Arc::clone(&self.api);
        let session = self.session.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = api.update_portfolio(&session, portfolio_id, &update).await {
                warn!("Auto-save failed: {e}");
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Waits for the pending save, if any, to run to completion.
    pub async fn flush(&mut self) {
        if let Some(handle) = self.pending.take() {
            let _ = handle.await;
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        // A builder going away must not leave a stray save behind.
        self.cancel();
    }
}

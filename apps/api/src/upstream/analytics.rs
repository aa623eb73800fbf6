//! View/click tracking and stats retrieval.
//!
//! Tracking calls are fire-and-forget: failures are logged at warn and
//! swallowed, never surfaced to the visitor. Stats reads behave like every
//! other authenticated call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::json;
use tokio::sync::watch;
use tracing::warn;

use crate::upstream::types::PortfolioStats;
use crate::upstream::{Session, UpstreamClient, UpstreamError};

/// Auto-refresh period for stats dashboards.
pub const STATS_REFRESH_PERIOD: Duration = Duration::from_secs(30);

impl UpstreamClient {
    pub async fn track_view(&self, portfolio_id: i64) -> Result<(), UpstreamError> {
        self.request_empty(
            &Session::anonymous(),
            Method::POST,
            &format!("/analytics/portfolios/{portfolio_id}/track-view/"),
            Some(&json!({})),
        )
        .await
    }

    pub async fn track_click(
        &self,
        portfolio_id: i64,
        element_id: &str,
        element_type: &str,
    ) -> Result<(), UpstreamError> {
        self.request_empty(
            &Session::anonymous(),
            Method::POST,
            &format!("/analytics/portfolios/{portfolio_id}/track-click/"),
            Some(&json!({
                "element_id": element_id,
                "element_type": element_type,
            })),
        )
        .await
    }

    /// Spawns a view-tracking call that outlives the current handler.
    pub fn spawn_track_view(self: &Arc<Self>, portfolio_id: i64) {
        let client = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = client.track_view(portfolio_id).await {
                warn!("Failed to track view for portfolio {portfolio_id}: {e}");
            }
        });
    }

    /// Spawns a click-tracking call that outlives the current handler.
    pub fn spawn_track_click(self: &Arc<Self>, portfolio_id: i64, element_id: String, element_type: String) {
        let client = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = client
                .track_click(portfolio_id, &element_id, &element_type)
                .await
            {
                warn!("Failed to track click for portfolio {portfolio_id}: {e}");
            }
        });
    }

    pub async fn get_portfolio_stats(
        &self,
        session: &Session,
        portfolio_id: i64,
    ) -> Result<PortfolioStats, UpstreamError> {
        self.request_json(
            session,
            Method::GET,
            &format!("/analytics/portfolios/{portfolio_id}/stats/"),
            None,
        )
        .await
    }

    /// Fixed-interval stats auto-refresh into a watch channel. The loop
    /// stops when every receiver is dropped — the dashboard went away.
    pub fn spawn_stats_refresher(
        self: &Arc<Self>,
        session: Session,
        portfolio_id: i64,
        period: Duration,
    ) -> watch::Receiver<Option<PortfolioStats>> {
        let client = Arc::clone(self);
        spawn_refresher(period, move || {
            let client = Arc::clone(&client);
            let session = session.clone();
            async move { client.get_portfolio_stats(&session, portfolio_id).await }
        })
    }
}

/// Generic fixed-interval refresher. Each tick runs `fetch` once and
/// publishes a successful result; failures are logged and the previous value
/// stays. Terminates when the receiver side is dropped.
pub fn spawn_refresher<F, Fut, T>(period: Duration, mut fetch: F) -> watch::Receiver<Option<T>>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, UpstreamError>> + Send,
    T: Send + Sync + 'static,
{
    let (tx, rx) = watch::channel(None);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if tx.is_closed() {
                break;
            }
            match fetch().await {
                Ok(value) => {
                    if tx.send(Some(value)).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Stats refresh failed: {e}"),
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_refresher_publishes_on_each_tick() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let mut rx = spawn_refresher(Duration::from_secs(30), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok::<u32, UpstreamError>(n) }
        });

        // First tick fires immediately.
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(1));

        tokio::time::advance(Duration::from_secs(30)).await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresher_keeps_last_value_on_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let mut rx = spawn_refresher(Duration::from_secs(30), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Ok::<u32, UpstreamError>(7)
                } else {
                    Err(UpstreamError::Api {
                        status: 500,
                        message: "down".to_string(),
                    })
                }
            }
        });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(7));

        // A failing tick leaves the previous value in place.
        tokio::time::advance(Duration::from_secs(31)).await;
        tokio::task::yield_now().await;
        assert_eq!(*rx.borrow(), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresher_stops_when_receiver_dropped() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let rx = spawn_refresher(Duration::from_secs(30), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<u32, UpstreamError>(0) }
        });
        // Allow the first tick to run, then hang up.
        tokio::task::yield_now().await;
        drop(rx);

        let before = calls.load(Ordering::SeqCst);
        tokio::time::advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        let after = calls.load(Ordering::SeqCst);
        // At most one further tick may have been in flight when the receiver
        // went away; the loop must not keep polling every period.
        assert!(after <= before + 1, "refresher kept running: {before} -> {after}");
    }
}

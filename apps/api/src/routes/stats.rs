//! Analytics stats handler.

use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::routes::bearer_session;
use crate::state::AppState;
use crate::upstream::analytics::STATS_REFRESH_PERIOD;
use crate::upstream::types::PortfolioStats;

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    /// Read through the 30-second auto-refresh channel instead of a direct
    /// fetch. Dashboards re-request to follow the refresh cadence.
    #[serde(default)]
    pub watch: bool,
}

/// GET /api/v1/portfolios/:id/stats
pub async fn portfolio_stats(
    State(state): State<AppState>,
    Path(portfolio_id): Path<i64>,
    Query(query): Query<StatsQuery>,
    headers: HeaderMap,
) -> Result<Json<PortfolioStats>, AppError> {
    let session = bearer_session(&headers)?;

    if !query.watch {
        let stats = state
            .upstream
            .get_portfolio_stats(&session, portfolio_id)
            .await?;
        return Ok(Json(stats));
    }

    let mut rx = state
        .upstream
        .spawn_stats_refresher(session, portfolio_id, STATS_REFRESH_PERIOD);

    // One refresh period of grace: a refresher whose fetches keep failing
    // never publishes, and the request must not hang forever.
    let wait = tokio::time::timeout(STATS_REFRESH_PERIOD + Duration::from_secs(5), rx.changed());
    wait.await
        .map_err(|_| AppError::Upstream {
            status: 504,
            message: "stats refresh timed out".to_string(),
        })?
        .map_err(|_| AppError::Upstream {
            status: 502,
            message: "stats refresher stopped".to_string(),
        })?;

    let stats = rx.borrow().clone().ok_or(AppError::Upstream {
        status: 502,
        message: "no stats available".to_string(),
    })?;
    Ok(Json(stats))
}

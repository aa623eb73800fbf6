//! Export job endpoints: creation, status, download, and the fixed-interval
//! polling loop.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;

use crate::upstream::types::{ExportFormat, ExportJob, ExportJobCreated};
use crate::upstream::{Session, UpstreamClient, UpstreamError};

/// Job status poll period.
pub const EXPORT_POLL_PERIOD: Duration = Duration::from_secs(2);
/// Poll cap: 150 ticks at 2s — five minutes — before giving up.
pub const EXPORT_POLL_MAX_TICKS: u32 = 150;

impl UpstreamClient {
    pub async fn start_export(
        &self,
        session: &Session,
        portfolio_id: i64,
        format: ExportFormat,
    ) -> Result<ExportJobCreated, UpstreamError> {
        self.request_json(
            session,
            Method::POST,
            &format!("/export/{}/{portfolio_id}/", format.as_str()),
            None,
        )
        .await
    }

    pub async fn get_export_job(
        &self,
        session: &Session,
        job_id: i64,
    ) -> Result<ExportJob, UpstreamError> {
        self.request_json(session, Method::GET, &format!("/export/jobs/{job_id}/"), None)
            .await
    }

    /// Polls a job until it reaches a terminal status, at the fixed period
    /// and tick cap.
    pub async fn poll_export_job(
        &self,
        session: &Session,
        job_id: i64,
    ) -> Result<ExportJob, UpstreamError> {
        poll_job(EXPORT_POLL_PERIOD, EXPORT_POLL_MAX_TICKS, || {
            self.get_export_job(session, job_id)
        })
        .await
    }

    /// Authenticated archive download, streamed through as bytes with the
    /// upstream's content type.
    pub async fn download_export(
        &self,
        session: &Session,
        job_id: i64,
    ) -> Result<(Bytes, String), UpstreamError> {
        let mut request = self
            .http()
            .get(self.url(&format!("/export/jobs/{job_id}/download/")));
        if let Some(token) = session.access_token() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/zip")
            .to_string();
        Ok((response.bytes().await?, content_type))
    }
}

/// Fixed-interval polling loop shared by export (and any future job kind):
/// fetch, stop on a terminal status, stop with a timeout after `max_ticks`.
/// Fetch errors end the poll — no retry policy here by design.
pub async fn poll_job<F, Fut>(
    period: Duration,
    max_ticks: u32,
    mut fetch: F,
) -> Result<ExportJob, UpstreamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ExportJob, UpstreamError>>,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    for _ in 0..max_ticks {
        interval.tick().await;
        let job = fetch().await?;
        if job.status.is_terminal() {
            return Ok(job);
        }
    }

    Err(UpstreamError::Timeout(format!(
        "export job did not complete within {} polls",
        max_ticks
    )))
}

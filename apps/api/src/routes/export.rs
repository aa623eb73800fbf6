//! Export handlers: trigger an upstream export job, report status (with an
//! optional blocking poll), and stream the finished archive through.

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::routes::bearer_session;
use crate::state::AppState;
use crate::upstream::types::{ExportFormat, ExportJob, ExportJobCreated};

#[derive(Debug, Default, Deserialize)]
pub struct StartExportRequest {
    #[serde(default)]
    pub export_type: Option<ExportFormat>,
}

/// POST /api/v1/portfolios/:id/export
pub async fn start_export(
    State(state): State<AppState>,
    Path(portfolio_id): Path<i64>,
    headers: HeaderMap,
    body: Option<Json<StartExportRequest>>,
) -> Result<Json<ExportJobCreated>, AppError> {
    let session = bearer_session(&headers)?;
    let format = body
        .and_then(|Json(req)| req.export_type)
        .unwrap_or(ExportFormat::Html);
    let created = state
        .upstream
        .start_export(&session, portfolio_id, format)
        .await?;
    Ok(Json(created))
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportStatusQuery {
    /// Block-poll at the fixed 2s period until the job reaches a terminal
    /// status (bounded), instead of answering with the current snapshot.
    #[serde(default)]
    pub wait: bool,
}

/// GET /api/v1/export/:job_id
pub async fn export_status(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(query): Query<ExportStatusQuery>,
    headers: HeaderMap,
) -> Result<Json<ExportJob>, AppError> {
    let session = bearer_session(&headers)?;
    let job = if query.wait {
        state.upstream.poll_export_job(&session, job_id).await?
    } else {
        state.upstream.get_export_job(&session, job_id).await?
    };
    Ok(Json(job))
}

/// GET /api/v1/export/:job_id/download
pub async fn download_export(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = bearer_session(&headers)?;
    let (data, content_type) = state.upstream.download_export(&session, job_id).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"portfolio_export_{job_id}.zip\""),
        )
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}

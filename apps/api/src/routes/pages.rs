//! Portfolio page handlers: the public page by slug and the authenticated
//! builder preview by id.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::builder::merge::merge_catalog;
use crate::errors::AppError;
use crate::models::portfolio::TemplateConfig;
use crate::render::{try_render_page, PageOptions};
use crate::routes::bearer_session;
use crate::state::AppState;

/// GET /p/:slug
///
/// Server-side render of a published portfolio. Upstream 404/403 surface as
/// their own status codes, distinct from transport failure (502). The view
/// is tracked fire-and-forget after the page is produced.
pub async fn public_portfolio(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let portfolio = state.upstream.get_public_portfolio(&slug).await?;

    // The upstream should only expose published portfolios here; double-check.
    if !portfolio.is_published {
        return Err(AppError::NotFound(
            "This portfolio is not published".to_string(),
        ));
    }

    let config = TemplateConfig::from_value(&portfolio.custom_settings);
    let options = PageOptions {
        canonical_url: Some(format!("{}/p/{slug}", state.config.public_base_url)),
        track_endpoint: Some(format!("/p/{slug}/track")),
    };
    let page = try_render_page(&portfolio, &config, &options).map_err(AppError::Render)?;

    if let Some(id) = portfolio.id {
        state.upstream.spawn_track_view(id);
    }

    Ok(Html(page))
}

#[derive(Debug, Deserialize)]
pub struct TrackClickRequest {
    pub element_id: String,
    pub element_type: String,
}

/// POST /p/:slug/track
///
/// Click-tracking forwarder. Always answers 204 — tracking failures are a
/// logging concern, never the visitor's.
pub async fn track_click(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<TrackClickRequest>,
) -> StatusCode {
    let upstream = Arc::clone(&state.upstream);
    tokio::spawn(async move {
        match upstream.get_public_portfolio(&slug).await {
            Ok(portfolio) if portfolio.is_published => {
                if let Some(id) = portfolio.id {
                    upstream.spawn_track_click(id, req.element_id, req.element_type);
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to resolve portfolio '{slug}' for click tracking: {e}"),
        }
    });
    StatusCode::NO_CONTENT
}

/// GET /api/v1/portfolios/:id/preview
///
/// Authenticated render of the caller's portfolio, enriched with their
/// projects and blog posts. Catalog fetch failures degrade to the stored
/// component content. No tracking on previews.
pub async fn preview_portfolio(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: axum::http::HeaderMap,
) -> Result<Html<String>, AppError> {
    let session = bearer_session(&headers)?;
    let mut portfolio = state.upstream.get_portfolio(&session, id).await?;

    let projects = match state.upstream.list_projects(&session).await {
        Ok(projects) => projects,
        Err(e) => {
            warn!("Failed to load projects for preview: {e}");
            vec![]
        }
    };
    let posts = match state.upstream.list_blog_posts(&session).await {
        Ok(posts) => posts,
        Err(e) => {
            warn!("Failed to load blog posts for preview: {e}");
            vec![]
        }
    };
    merge_catalog(&mut portfolio, &projects, &posts, false);

    let config = match portfolio.template {
        Some(template_id) => match state.upstream.get_template(&session, template_id).await {
            Ok(record) => record.config,
            Err(e) => {
                warn!("Failed to load template {template_id}: {e}");
                TemplateConfig::from_value(&portfolio.custom_settings)
            }
        },
        None => TemplateConfig::from_value(&portfolio.custom_settings),
    };

    let page = try_render_page(&portfolio, &config, &PageOptions::default())
        .map_err(AppError::Render)?;
    Ok(Html(page))
}

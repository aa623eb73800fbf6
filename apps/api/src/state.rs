use std::sync::Arc;

use crate::config::Config;
use crate::upstream::UpstreamClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Single point of entry for the portfolio platform API.
    pub upstream: Arc<UpstreamClient>,
    pub config: Config,
}

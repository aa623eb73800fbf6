//! Portfolio, component, template, and SEO endpoints.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};

use crate::models::portfolio::{Portfolio, PortfolioComponent, TemplateRecord};
use crate::upstream::types::{ComponentPatch, ComponentPayload, PortfolioCreate, PortfolioUpdate};
use crate::upstream::{PortfolioApi, Session, UpstreamClient, UpstreamError};

impl UpstreamClient {
    pub async fn list_portfolios(&self, session: &Session) -> Result<Vec<Portfolio>, UpstreamError> {
        self.request_json(session, Method::GET, "/portfolios/portfolios/", None)
            .await
    }

    pub async fn get_portfolio(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<Portfolio, UpstreamError> {
        self.request_json(
            session,
            Method::GET,
            &format!("/portfolios/portfolios/{id}/"),
            None,
        )
        .await
    }

    /// Public, unauthenticated read by slug. 404 and 403 arrive as their own
    /// error variants, distinct from transport failure.
    pub async fn get_public_portfolio(&self, slug: &str) -> Result<Portfolio, UpstreamError> {
        self.request_json(
            &Session::anonymous(),
            Method::GET,
            &format!("/portfolios/portfolios/public/{slug}/"),
            None,
        )
        .await
    }

    pub async fn delete_portfolio(&self, session: &Session, id: i64) -> Result<(), UpstreamError> {
        self.request_empty(
            session,
            Method::DELETE,
            &format!("/portfolios/portfolios/{id}/"),
            None,
        )
        .await
    }

    pub async fn get_template(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<TemplateRecord, UpstreamError> {
        self.request_json(
            session,
            Method::GET,
            &format!("/portfolios/templates/{id}/"),
            None,
        )
        .await
    }

    pub async fn list_templates(
        &self,
        session: &Session,
    ) -> Result<Vec<TemplateRecord>, UpstreamError> {
        self.request_json(session, Method::GET, "/portfolios/templates/", None)
            .await
    }

    /// Profile photo passthrough upload.
    pub async fn upload_profile_photo(
        &self,
        session: &Session,
        portfolio_id: i64,
        filename: String,
        content_type: String,
        data: bytes::Bytes,
    ) -> Result<Portfolio, UpstreamError> {
        let part = reqwest::multipart::Part::stream(data)
            .file_name(filename)
            .mime_str(&content_type)
            .map_err(UpstreamError::Http)?;
        let form = reqwest::multipart::Form::new().part("profile_photo", part);

        let mut request = self
            .http()
            .post(self.url(&format!("/portfolios/portfolios/{portfolio_id}/upload_photo/")))
            .multipart(form);
        if let Some(token) = session.access_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// AI content generation for one component kind.
    pub async fn generate_component_content(
        &self,
        session: &Session,
        portfolio_id: i64,
        component_type: &str,
        context: Option<Value>,
        component_id: Option<i64>,
    ) -> Result<Value, UpstreamError> {
        let mut body = json!({ "component_type": component_type });
        if let Some(context) = context {
            body["context"] = context;
        }
        if let Some(component_id) = component_id {
            body["component_id"] = json!(component_id);
        }
        self.request_json(
            session,
            Method::POST,
            &format!("/portfolios/portfolios/{portfolio_id}/generate_content/"),
            Some(&body),
        )
        .await
    }

    // ── SEO ──

    pub async fn generate_seo_keywords(
        &self,
        session: &Session,
        portfolio_id: i64,
    ) -> Result<Value, UpstreamError> {
        self.request_json(
            session,
            Method::POST,
            &format!("/portfolios/portfolios/{portfolio_id}/generate_keywords/"),
            Some(&json!({})),
        )
        .await
    }

    pub async fn optimize_seo(
        &self,
        session: &Session,
        portfolio_id: i64,
    ) -> Result<Value, UpstreamError> {
        self.request_json(
            session,
            Method::POST,
            &format!("/portfolios/portfolios/{portfolio_id}/optimize_seo/"),
            Some(&json!({})),
        )
        .await
    }

    pub async fn seo_suggestions(
        &self,
        session: &Session,
        portfolio_id: i64,
    ) -> Result<Value, UpstreamError> {
        self.request_json(
            session,
            Method::GET,
            &format!("/portfolios/portfolios/{portfolio_id}/suggestions/"),
            None,
        )
        .await
    }

    pub async fn analyze_seo(&self, session: &Session, text: &str) -> Result<Value, UpstreamError> {
        self.request_json(
            session,
            Method::POST,
            "/ai/analyze-seo/",
            Some(&json!({ "text": text })),
        )
        .await
    }
}

#[async_trait]
impl PortfolioApi for UpstreamClient {
    async fn create_portfolio(
        &self,
        session: &Session,
        req: &PortfolioCreate,
    ) -> Result<Portfolio, UpstreamError> {
        self.request_json(
            session,
            Method::POST,
            "/portfolios/portfolios/",
            Some(&serde_json::to_value(req)?),
        )
        .await
    }

    async fn update_portfolio(
        &self,
        session: &Session,
        id: i64,
        req: &PortfolioUpdate,
    ) -> Result<Portfolio, UpstreamError> {
        self.request_json(
            session,
            Method::PATCH,
            &format!("/portfolios/portfolios/{id}/"),
            Some(&serde_json::to_value(req)?),
        )
        .await
    }

    async fn publish_portfolio(
        &self,
        session: &Session,
        id: i64,
        is_published: bool,
    ) -> Result<Portfolio, UpstreamError> {
        self.request_json(
            session,
            Method::POST,
            &format!("/portfolios/portfolios/{id}/publish/"),
            Some(&json!({ "is_published": is_published })),
        )
        .await
    }

    async fn create_component(
        &self,
        session: &Session,
        portfolio_id: i64,
        req: &ComponentPayload,
    ) -> Result<PortfolioComponent, UpstreamError> {
        self.request_json(
            session,
            Method::POST,
            &format!("/portfolios/portfolios/{portfolio_id}/components/"),
            Some(&serde_json::to_value(req)?),
        )
        .await
    }

    async fn update_component(
        &self,
        session: &Session,
        portfolio_id: i64,
        component_id: i64,
        patch: &ComponentPatch,
    ) -> Result<PortfolioComponent, UpstreamError> {
        self.request_json(
            session,
            Method::PATCH,
            &format!("/portfolios/portfolios/{portfolio_id}/components/{component_id}/"),
            Some(&serde_json::to_value(patch)?),
        )
        .await
    }

    async fn delete_component(
        &self,
        session: &Session,
        portfolio_id: i64,
        component_id: i64,
    ) -> Result<(), UpstreamError> {
        self.request_empty(
            session,
            Method::DELETE,
            &format!("/portfolios/portfolios/{portfolio_id}/components/{component_id}/"),
            None,
        )
        .await
    }
}

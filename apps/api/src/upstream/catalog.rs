//! Project and blog-post catalog endpoints, plus their AI helpers.

use reqwest::Method;
use serde_json::{json, Value};

use crate::models::catalog::{BlogPost, Project, Tag};
use crate::upstream::{Session, UpstreamClient, UpstreamError};

impl UpstreamClient {
    pub async fn list_projects(&self, session: &Session) -> Result<Vec<Project>, UpstreamError> {
        self.request_json(session, Method::GET, "/projects/projects/", None)
            .await
    }

    pub async fn get_project(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<Project, UpstreamError> {
        self.request_json(session, Method::GET, &format!("/projects/projects/{id}/"), None)
            .await
    }

    pub async fn project_categories(&self, session: &Session) -> Result<Value, UpstreamError> {
        self.request_json(session, Method::GET, "/projects/categories/", None)
            .await
    }

    pub async fn project_tags(&self, session: &Session) -> Result<Vec<Tag>, UpstreamError> {
        self.request_json(session, Method::GET, "/projects/tags/", None)
            .await
    }

    /// AI project description generation.
    pub async fn generate_project_description(
        &self,
        session: &Session,
        title: &str,
        technologies: &[String],
    ) -> Result<Value, UpstreamError> {
        self.request_json(
            session,
            Method::POST,
            "/projects/projects/generate_description/",
            Some(&json!({ "title": title, "technologies": technologies })),
        )
        .await
    }

    pub async fn list_blog_posts(&self, session: &Session) -> Result<Vec<BlogPost>, UpstreamError> {
        self.request_json(session, Method::GET, "/blogs/posts/", None)
            .await
    }

    pub async fn get_blog_post(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<BlogPost, UpstreamError> {
        self.request_json(session, Method::GET, &format!("/blogs/posts/{id}/"), None)
            .await
    }

    pub async fn blog_categories(&self, session: &Session) -> Result<Value, UpstreamError> {
        self.request_json(session, Method::GET, "/blogs/categories/", None)
            .await
    }

    pub async fn blog_tags(&self, session: &Session) -> Result<Vec<Tag>, UpstreamError> {
        self.request_json(session, Method::GET, "/blogs/tags/", None)
            .await
    }

    /// AI excerpt generation for a post.
    pub async fn generate_post_excerpt(
        &self,
        session: &Session,
        post_id: i64,
    ) -> Result<Value, UpstreamError> {
        self.request_json(
            session,
            Method::POST,
            &format!("/blogs/posts/{post_id}/generate_excerpt/"),
            Some(&json!({})),
        )
        .await
    }
}

//! Catalog merge: before a preview or public render, the user's separately
//! owned projects and blog posts overwrite the matching component content
//! with validated canonical records. Stale hand-authored entries (including
//! dangling references to deleted records) are replaced wholesale; other
//! content keys stay untouched.

use serde_json::{json, Value};

use crate::content::catalog::{validate_blog_posts, validate_projects};
use crate::models::catalog::{BlogPost, Project};
use crate::models::portfolio::{ComponentType, Portfolio};

/// Merges catalog records into the portfolio's `projects` and `blog`
/// components. With `public_only`, unpublished posts are excluded.
pub fn merge_catalog(
    portfolio: &mut Portfolio,
    projects: &[Project],
    posts: &[BlogPost],
    public_only: bool,
) {
    if !projects.is_empty() {
        if let Some(component) = portfolio
            .components
            .iter_mut()
            .find(|c| c.component_type == ComponentType::Projects)
        {
            let raw: Vec<Value> = projects
                .iter()
                .map(|p| {
                    json!({
                        "id": p.id,
                        "title": p.title,
                        "description": p.description,
                        "short_description": p.short_description,
                        "image": p.image,
                        "github_url": p.github_url,
                        "live_url": p.live_url,
                        "technologies": p.technology_names(),
                    })
                })
                .collect();
            let cards = validate_projects(&Value::Array(raw));
            set_content_key(component, "projects", cards);
        }
    }

    let visible_posts: Vec<&BlogPost> = posts
        .iter()
        .filter(|p| !public_only || p.published)
        .collect();
    if !visible_posts.is_empty() {
        if let Some(component) = portfolio
            .components
            .iter_mut()
            .find(|c| c.component_type == ComponentType::Blog)
        {
            let raw: Vec<Value> = visible_posts
                .iter()
                .filter_map(|p| serde_json::to_value(p).ok())
                .collect();
            let cards = validate_blog_posts(&Value::Array(raw));
            set_content_key(component, "posts", cards);
        }
    }
}

fn set_content_key<T: serde::Serialize>(
    component: &mut crate::models::portfolio::PortfolioComponent,
    key: &str,
    cards: Vec<T>,
) {
    if !component.content.is_object() {
        component.content = json!({});
    }
    component.content[key] = serde_json::to_value(cards).unwrap_or_else(|_| json!([]));
}

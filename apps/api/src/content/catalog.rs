//! Card validators for project and blog-post lists embedded in component
//! content.
//!
//! Component content may hold raw platform records, hand-authored objects,
//! or stale id references to records that no longer exist. Everything is
//! mapped to one canonical card shape; entries that fail the minimum
//! required fields (`id` and `title`) are dropped, not replaced with
//! placeholders.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::normalize::{
    field_i64, field_text, field_text_alias, normalize_skills, validate_url,
};

const SHORT_DESCRIPTION_LIMIT: usize = 200;

/// Canonical project card consumed by the section renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// Canonical blog-post card consumed by the section renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPostCard {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

/// Validates one project-shaped value. Bare numeric ids are unresolved
/// references and are dropped here — resolution happens upstream of the
/// renderer or not at all.
pub fn validate_project(value: &Value) -> Option<ProjectCard> {
    if !value.is_object() {
        return None;
    }
    let id = field_i64(value, "id")?;
    let title = field_text(value, "title")?;

    let description = field_text(value, "description")
        .or_else(|| field_text(value, "short_description"))
        .unwrap_or_default();
    let short_description = field_text(value, "short_description")
        .or_else(|| field_text(value, "description").map(|d| truncate(&d, SHORT_DESCRIPTION_LIMIT)));

    Some(ProjectCard {
        id,
        title,
        description,
        short_description,
        image: field_text(value, "image"),
        github_url: field_text_alias(value, &["github_url", "github"]).and_then(|u| validate_url(&Value::String(u))),
        live_url: field_text_alias(value, &["live_url", "website", "live"])
            .and_then(|u| validate_url(&Value::String(u))),
        technologies: normalize_skills(
            value
                .get("technologies")
                .filter(|v| !is_empty_list(v))
                .or_else(|| value.get("tags"))
                .unwrap_or(&Value::Null),
        ),
    })
}

/// Validates a project list; invalid entries are filtered, never fatal to the
/// whole list.
pub fn validate_projects(value: &Value) -> Vec<ProjectCard> {
    match value {
        Value::Array(items) => items.iter().filter_map(validate_project).collect(),
        _ => Vec::new(),
    }
}

/// Validates one blog-post-shaped value. Same minimum-fields policy as
/// projects.
pub fn validate_blog_post(value: &Value) -> Option<BlogPostCard> {
    if !value.is_object() {
        return None;
    }
    let id = field_i64(value, "id")?;
    let title = field_text(value, "title")?;

    Some(BlogPostCard {
        id,
        title,
        excerpt: field_text(value, "excerpt"),
        content_markdown: field_text_alias(value, &["content_markdown", "content"]),
        featured_image: field_text_alias(value, &["featured_image", "image"]),
        published: value
            .get("published")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        published_date: field_text_alias(value, &["published_date", "created_at"]),
    })
}

pub fn validate_blog_posts(value: &Value) -> Vec<BlogPostCard> {
    match value {
        Value::Array(items) => items.iter().filter_map(validate_blog_post).collect(),
        _ => Vec::new(),
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{cut}...")
}

fn is_empty_list(value: &Value) -> bool {
    matches!(value, Value::Array(items) if items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_and_invalid_projects_filtered_by_required_fields() {
        let cards = validate_projects(&json!([
            {"id": 1, "title": "A"},
            {"title": "B"},
            {"id": 2},
            {"id": 3, "title": "C"}
        ]));
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "A");
        assert_eq!(cards[1].title, "C");
    }

    #[test]
    fn test_bare_id_reference_is_dropped() {
        assert!(validate_project(&json!(42)).is_none());
        assert!(validate_projects(&json!([42, {"id": 1, "title": "A"}])).len() == 1);
    }

    #[test]
    fn test_project_alias_fields() {
        let card = validate_project(&json!({
            "id": 5,
            "title": "Site",
            "github": "github.com/me/site",
            "website": "site.example",
            "tags": [{"name": "rust"}, {"name": "axum"}]
        }))
        .unwrap();
        assert_eq!(card.github_url.as_deref(), Some("https://github.com/me/site"));
        assert_eq!(card.live_url.as_deref(), Some("https://site.example"));
        assert_eq!(card.technologies, vec!["rust", "axum"]);
    }

    #[test]
    fn test_project_short_description_synthesized_from_long_description() {
        let long = "x".repeat(250);
        let card = validate_project(&json!({"id": 1, "title": "A", "description": long})).unwrap();
        let short = card.short_description.unwrap();
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 203);
    }

    #[test]
    fn test_project_short_description_not_truncated_when_short() {
        let card = validate_project(&json!({"id": 1, "title": "A", "description": "brief"}))
            .unwrap();
        assert_eq!(card.short_description.as_deref(), Some("brief"));
    }

    #[test]
    fn test_project_invalid_link_normalizes_to_absence() {
        let card = validate_project(&json!({
            "id": 1,
            "title": "A",
            "live_url": "not a url"
        }))
        .unwrap();
        assert_eq!(card.live_url, None);
    }

    #[test]
    fn test_blog_posts_filtered_and_aliased() {
        let cards = validate_blog_posts(&json!([
            {"id": 1, "title": "Post", "content": "body", "image": "https://a/i.png",
             "created_at": "2025-01-01"},
            {"title": "no id"},
            null
        ]));
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].content_markdown.as_deref(), Some("body"));
        assert_eq!(cards[0].featured_image.as_deref(), Some("https://a/i.png"));
        assert_eq!(cards[0].published_date.as_deref(), Some("2025-01-01"));
        assert!(!cards[0].published);
    }

    #[test]
    fn test_non_array_lists_are_empty() {
        assert!(validate_projects(&json!({"0": {"id": 1, "title": "A"}})).is_empty());
        assert!(validate_blog_posts(&Value::Null).is_empty());
    }

    #[test]
    fn test_string_id_is_coerced() {
        let card = validate_project(&json!({"id": "17", "title": "A"})).unwrap();
        assert_eq!(card.id, 17);
    }
}

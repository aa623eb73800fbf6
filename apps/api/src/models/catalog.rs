//! User-owned catalog records — projects and blog posts.
//!
//! These live outside any portfolio and are merely linked into `projects` /
//! `blog` component content. Deleting one does not touch stale references in
//! component content; the normalizers filter those at render time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Project {
    /// Technology names for display: explicit technologies first, tag names
    /// as the fallback the platform uses for newer records.
    pub fn technology_names(&self) -> Vec<String> {
        if !self.technologies.is_empty() {
            return self.technologies.clone();
        }
        self.tags.iter().map(|t| t.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content_markdown: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub published_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_technology_names_prefers_explicit_list() {
        let p: Project = serde_json::from_value(json!({
            "id": 1,
            "title": "A",
            "technologies": ["Rust"],
            "tags": [{"name": "Go"}]
        }))
        .unwrap();
        assert_eq!(p.technology_names(), vec!["Rust"]);
    }

    #[test]
    fn test_technology_names_falls_back_to_tags() {
        let p: Project = serde_json::from_value(json!({
            "id": 1,
            "title": "A",
            "tags": [{"id": 7, "name": "Go"}, {"name": "SQL"}]
        }))
        .unwrap();
        assert_eq!(p.technology_names(), vec!["Go", "SQL"]);
    }
}

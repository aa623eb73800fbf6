//! Request/response payloads for the platform API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<i64>,
    pub template_type: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub custom_settings: Value,
}

/// Partial portfolio update; only present fields are sent, mirroring the
/// platform's allowed-fields contract.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PortfolioUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentPayload {
    pub component_type: String,
    pub order: i64,
    pub is_visible: bool,
    pub content: Value,
}

/// Partial component update.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ComponentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

// ── export ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl ExportStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportStatus::Completed | ExportStatus::Failed)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportJobCreated {
    pub job_id: i64,
    pub status: ExportStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportJob {
    pub id: i64,
    pub status: ExportStatus,
    #[serde(default)]
    pub export_type: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

// ── analytics ──

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PortfolioStats {
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub unique_visitors: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── auth ──

#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Value,
    pub tokens: TokenPair,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthRedirect {
    pub auth_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_portfolio_update_serializes_only_present_fields() {
        let update = PortfolioUpdate {
            title: Some("T".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"title": "T"}));
    }

    #[test]
    fn test_component_patch_order_only() {
        let patch = ComponentPatch {
            order: Some(3),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"order": 3}));
    }

    #[test]
    fn test_export_status_terminal() {
        assert!(ExportStatus::Completed.is_terminal());
        assert!(ExportStatus::Failed.is_terminal());
        assert!(!ExportStatus::Processing.is_terminal());
        assert!(!ExportStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_export_status_unknown_wire_value() {
        let status: ExportStatus = serde_json::from_value(json!("queued-v2")).unwrap();
        assert_eq!(status, ExportStatus::Unknown);
    }

    #[test]
    fn test_stats_tolerates_extra_keys() {
        let stats: PortfolioStats = serde_json::from_value(json!({
            "total_views": 10,
            "views_by_day": [{"day": "2025-01-01", "count": 3}]
        }))
        .unwrap();
        assert_eq!(stats.total_views, 10);
        assert!(stats.extra.contains_key("views_by_day"));
    }
}

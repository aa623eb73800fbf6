use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fixed set of section kinds a portfolio page is assembled from.
///
/// Wire values this build does not know deserialize into `Unknown` and are
/// skipped at render time instead of failing the whole portfolio payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Header,
    About,
    AboutMeCard,
    Skills,
    SkillsCloud,
    Projects,
    ProjectGrid,
    Blog,
    BlogPreviewGrid,
    Contact,
    ContactForm,
    ExperienceTimeline,
    HeroBanner,
    ServicesSection,
    AchievementsCounters,
    TestimonialsCarousel,
    Footer,
    #[serde(other)]
    Unknown,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Header => "header",
            ComponentType::About => "about",
            ComponentType::AboutMeCard => "about_me_card",
            ComponentType::Skills => "skills",
            ComponentType::SkillsCloud => "skills_cloud",
            ComponentType::Projects => "projects",
            ComponentType::ProjectGrid => "project_grid",
            ComponentType::Blog => "blog",
            ComponentType::BlogPreviewGrid => "blog_preview_grid",
            ComponentType::Contact => "contact",
            ComponentType::ContactForm => "contact_form",
            ComponentType::ExperienceTimeline => "experience_timeline",
            ComponentType::HeroBanner => "hero_banner",
            ComponentType::ServicesSection => "services_section",
            ComponentType::AchievementsCounters => "achievements_counters",
            ComponentType::TestimonialsCarousel => "testimonials_carousel",
            ComponentType::Footer => "footer",
            ComponentType::Unknown => "unknown",
        }
    }

    /// Human-readable section label, used in error fallback cards.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentType::Header => "Header",
            ComponentType::About => "About",
            ComponentType::AboutMeCard => "About Me Card",
            ComponentType::Skills => "Skills",
            ComponentType::SkillsCloud => "Skills Cloud",
            ComponentType::Projects => "Projects",
            ComponentType::ProjectGrid => "Project Grid",
            ComponentType::Blog => "Blog",
            ComponentType::BlogPreviewGrid => "Blog Preview Grid",
            ComponentType::Contact => "Contact",
            ComponentType::ContactForm => "Contact Form",
            ComponentType::ExperienceTimeline => "Experience Timeline",
            ComponentType::HeroBanner => "Hero Banner",
            ComponentType::ServicesSection => "Services Section",
            ComponentType::AchievementsCounters => "Achievements Counters",
            ComponentType::TestimonialsCarousel => "Testimonials Carousel",
            ComponentType::Footer => "Footer",
            ComponentType::Unknown => "Unknown",
        }
    }
}

/// One ordered, independently visible section of a portfolio page.
///
/// `content` is free-form until normalized: it is user-authored through
/// free-form builder forms or AI-generated, so it may be partially or fully
/// malformed at any time. Validation happens at render time, never at write
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub component_type: ComponentType,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub content: Value,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default = "default_template_type")]
    pub template_type: String,
    /// Optional reference to a template record carrying a saved config.
    #[serde(default)]
    pub template: Option<i64>,
    #[serde(default)]
    pub custom_settings: Value,
    #[serde(default)]
    pub components: Vec<PortfolioComponent>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub seo_keywords: Option<String>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    #[serde(default)]
    pub user_profile_photo_url: Option<String>,
    /// Public URL key; present only once published.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

fn default_template_type() -> String {
    "modern".to_string()
}

/// Template appearance configuration — colors and fonts, supplied by a
/// template record or a portfolio's custom settings. Unknown keys pass
/// through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl TemplateConfig {
    /// Best-effort parse from a free-form settings value. Non-object values
    /// yield the empty config.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// A saved template record as the platform returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default = "default_template_type")]
    pub template_type: String,
    #[serde(default)]
    pub config: TemplateConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_type_roundtrip() {
        let t: ComponentType = serde_json::from_str("\"about_me_card\"").unwrap();
        assert_eq!(t, ComponentType::AboutMeCard);
        assert_eq!(serde_json::to_value(t).unwrap(), json!("about_me_card"));
    }

    #[test]
    fn test_unknown_component_type_does_not_fail_deserialization() {
        let t: ComponentType = serde_json::from_str("\"marquee_banner\"").unwrap();
        assert_eq!(t, ComponentType::Unknown);
    }

    #[test]
    fn test_component_defaults_fill_missing_fields() {
        let c: PortfolioComponent =
            serde_json::from_value(json!({ "component_type": "skills" })).unwrap();
        assert_eq!(c.id, None);
        assert_eq!(c.order, 0);
        assert!(c.is_visible);
        assert!(c.content.is_null());
    }

    #[test]
    fn test_portfolio_defaults() {
        let p: Portfolio = serde_json::from_value(json!({ "title": "My Work" })).unwrap();
        assert_eq!(p.template_type, "modern");
        assert!(p.components.is_empty());
        assert!(!p.is_published);
        assert_eq!(p.slug, None);
    }

    #[test]
    fn test_template_config_from_non_object_is_empty() {
        let cfg = TemplateConfig::from_value(&json!("not a config"));
        assert!(cfg.primary_color.is_none());
        assert!(cfg.extra.is_empty());
    }

    #[test]
    fn test_template_config_passthrough_keys_survive() {
        let cfg = TemplateConfig::from_value(&json!({
            "primary_color": "#112233",
            "layout": "wide"
        }));
        assert_eq!(cfg.primary_color.as_deref(), Some("#112233"));
        assert_eq!(cfg.extra.get("layout"), Some(&json!("wide")));
    }
}

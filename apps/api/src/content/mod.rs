//! The portfolio component content model.
//!
//! Component `content` arrives as free-form JSON — authored through builder
//! forms, produced by the AI generator, or merged from catalog records — and
//! is parsed here into one tagged union, [`SectionContent`], keyed by the
//! component type. Parsing is total: any shape, however malformed, produces
//! a renderable value. Invalid entries are filtered; invalid scalars become
//! absence.

pub mod catalog;
pub mod normalize;

use serde_json::{json, Value};

use crate::content::catalog::{validate_blog_posts, validate_projects, BlogPostCard, ProjectCard};
use crate::content::normalize::{
    field_bool, field_f64, field_i64, field_text, field_text_alias, normalize_skills,
    validate_email, validate_url,
};
use crate::models::portfolio::{ComponentType, PortfolioComponent};

// ────────────────────────────────────────────────────────────────────────────
// Shared pieces
// ────────────────────────────────────────────────────────────────────────────

/// Validated social links. URLs are normalized (scheme added, malformed
/// dropped); `email` is email-validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialLinks {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    pub email: Option<String>,
}

impl SocialLinks {
    /// Reads links from `value`, preferring top-level keys and falling back
    /// to the same key nested under `social` / `social_links` — both layouts
    /// exist in stored content.
    pub fn from_value(value: &Value) -> Self {
        let nested = value
            .get("social")
            .or_else(|| value.get("social_links"))
            .cloned()
            .unwrap_or(Value::Null);

        let link = |key: &str| -> Option<String> {
            value
                .get(key)
                .and_then(|v| validate_url(v))
                .or_else(|| nested.get(key).and_then(|v| validate_url(v)))
        };

        SocialLinks {
            linkedin: link("linkedin"),
            github: link("github"),
            twitter: link("twitter"),
            website: link("website"),
            facebook: link("facebook"),
            instagram: link("instagram"),
            youtube: link("youtube"),
            email: value
                .get("email")
                .and_then(|v| validate_email(v))
                .or_else(|| nested.get("email").and_then(|v| validate_email(v))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.linkedin.is_none()
            && self.github.is_none()
            && self.twitter.is_none()
            && self.website.is_none()
            && self.facebook.is_none()
            && self.instagram.is_none()
            && self.youtube.is_none()
            && self.email.is_none()
    }

    /// (label, href) pairs for rendering, in a stable display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        let mut push = |label: &'static str, value: &Option<String>| {
            if let Some(v) = value {
                out.push((label, v.clone()));
            }
        };
        push("LinkedIn", &self.linkedin);
        push("GitHub", &self.github);
        push("Twitter", &self.twitter);
        push("Website", &self.website);
        push("Facebook", &self.facebook);
        push("Instagram", &self.instagram);
        push("YouTube", &self.youtube);
        if let Some(email) = &self.email {
            out.push(("Email", format!("mailto:{email}")));
        }
        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-section payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderContent {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AboutContent {
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AboutMeCardContent {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub social: SocialLinks,
}

impl AboutMeCardContent {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.title.is_none()
            && self.bio.is_none()
            && self.image.is_none()
            && self.social.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillsContent {
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillsDisplayMode {
    #[default]
    Cloud,
    Bars,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillsCloudContent {
    pub skills: Vec<String>,
    pub display_mode: SkillsDisplayMode,
}

/// A code sample attached to a projects component; the developer skin
/// renders these as a dedicated section.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSnippet {
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsContent {
    pub projects: Vec<ProjectCard>,
    pub code_snippets: Vec<CodeSnippet>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectGridContent {
    pub projects: Vec<ProjectCard>,
    pub filter_categories: Vec<String>,
    pub show_filters: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogContent {
    pub posts: Vec<BlogPostCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPreviewGridContent {
    pub posts: Vec<BlogPostCard>,
    pub posts_per_row: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactContent {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub social: SocialLinks,
}

impl ContactContent {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.social.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactFormContent {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<String>,
    pub submit_button_text: String,
    pub info: ContactContent,
}

impl ContactFormContent {
    /// Nothing authored: no form fields, no contact info, no description.
    /// The title and button text are labels with defaults, so they don't
    /// count as content.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.info.is_empty() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperienceTimelineContent {
    pub experiences: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CtaButton {
    pub text: String,
    pub url: String,
    pub variant: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroBannerContent {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub background_image: Option<String>,
    pub background_video: Option<String>,
    pub cta_buttons: Vec<CtaButton>,
    pub overlay_opacity: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Service {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicesContent {
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counter {
    pub label: Option<String>,
    pub value: i64,
    pub prefix: String,
    pub suffix: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountersContent {
    pub counters: Vec<Counter>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Testimonial {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestimonialsContent {
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FooterColumn {
    pub title: Option<String>,
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FooterContent {
    pub copyright_text: Option<String>,
    pub links: Vec<FooterLink>,
    pub social: SocialLinks,
    pub columns: Vec<FooterColumn>,
}

impl FooterContent {
    pub fn is_empty(&self) -> bool {
        self.copyright_text.is_none()
            && self.links.is_empty()
            && self.social.is_empty()
            && self.columns.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// The tagged union
// ────────────────────────────────────────────────────────────────────────────

/// Normalized content for one section, keyed by component type.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    Header(HeaderContent),
    About(AboutContent),
    AboutMeCard(AboutMeCardContent),
    Skills(SkillsContent),
    SkillsCloud(SkillsCloudContent),
    Projects(ProjectsContent),
    ProjectGrid(ProjectGridContent),
    Blog(BlogContent),
    BlogPreviewGrid(BlogPreviewGridContent),
    Contact(ContactContent),
    ContactForm(ContactFormContent),
    ExperienceTimeline(ExperienceTimelineContent),
    HeroBanner(HeroBannerContent),
    ServicesSection(ServicesContent),
    AchievementsCounters(CountersContent),
    TestimonialsCarousel(TestimonialsContent),
    Footer(FooterContent),
    Unknown,
}

impl SectionContent {
    /// Total normalization: any component yields a renderable value, no
    /// matter how malformed its content is.
    pub fn from_component(component: &PortfolioComponent) -> SectionContent {
        let c = &component.content;
        match component.component_type {
            ComponentType::Header => SectionContent::Header(HeaderContent {
                title: field_text(c, "title"),
                subtitle: field_text(c, "subtitle"),
            }),
            ComponentType::About => SectionContent::About(AboutContent {
                bio: field_text(c, "bio"),
            }),
            ComponentType::AboutMeCard => SectionContent::AboutMeCard(AboutMeCardContent {
                name: field_text(c, "name"),
                title: field_text(c, "title"),
                bio: field_text(c, "bio"),
                image: field_text(c, "image"),
                social: SocialLinks::from_value(c),
            }),
            ComponentType::Skills => SectionContent::Skills(SkillsContent {
                skills: normalize_skills(c.get("skills").unwrap_or(&Value::Null)),
            }),
            ComponentType::SkillsCloud => SectionContent::SkillsCloud(SkillsCloudContent {
                skills: normalize_skills(c.get("skills").unwrap_or(&Value::Null)),
                display_mode: match field_text(c, "display_mode").as_deref() {
                    Some("bars") => SkillsDisplayMode::Bars,
                    _ => SkillsDisplayMode::Cloud,
                },
            }),
            ComponentType::Projects => SectionContent::Projects(ProjectsContent {
                projects: validate_projects(c.get("projects").unwrap_or(&Value::Null)),
                code_snippets: parse_code_snippets(c.get("code_snippets").unwrap_or(&Value::Null)),
            }),
            ComponentType::ProjectGrid => SectionContent::ProjectGrid(ProjectGridContent {
                projects: validate_projects(c.get("projects").unwrap_or(&Value::Null)),
                filter_categories: normalize_skills(
                    c.get("filter_categories").unwrap_or(&Value::Null),
                ),
                show_filters: field_bool(c, "show_filters").unwrap_or(true),
            }),
            ComponentType::Blog => SectionContent::Blog(BlogContent {
                posts: validate_blog_posts(c.get("posts").unwrap_or(&Value::Null)),
            }),
            ComponentType::BlogPreviewGrid => {
                SectionContent::BlogPreviewGrid(BlogPreviewGridContent {
                    posts: validate_blog_posts(c.get("posts").unwrap_or(&Value::Null)),
                    posts_per_row: field_i64(c, "posts_per_row")
                        .filter(|n| (1..=6).contains(n))
                        .unwrap_or(3) as u32,
                })
            }
            ComponentType::Contact => SectionContent::Contact(parse_contact(c)),
            ComponentType::ContactForm => SectionContent::ContactForm(ContactFormContent {
                title: field_text(c, "title").unwrap_or_else(|| "Contact Info".to_string()),
                description: field_text(c, "description"),
                // Kept as authored, possibly empty — an empty form renders
                // nothing, so defaulting fields here would foreclose that.
                fields: normalize_skills(c.get("fields").unwrap_or(&Value::Null)),
                submit_button_text: field_text(c, "submit_button_text")
                    .unwrap_or_else(|| "Send Message".to_string()),
                info: parse_contact(c.get("contact_info").unwrap_or(&Value::Null)),
            }),
            ComponentType::ExperienceTimeline => {
                SectionContent::ExperienceTimeline(ExperienceTimelineContent {
                    experiences: parse_experiences(c.get("experiences").unwrap_or(&Value::Null)),
                })
            }
            ComponentType::HeroBanner => SectionContent::HeroBanner(HeroBannerContent {
                title: field_text(c, "title"),
                subtitle: field_text(c, "subtitle"),
                background_image: field_text(c, "background_image"),
                background_video: field_text(c, "background_video"),
                cta_buttons: parse_cta_buttons(c.get("cta_buttons").unwrap_or(&Value::Null)),
                overlay_opacity: field_f64(c, "overlay_opacity")
                    .unwrap_or(0.5)
                    .clamp(0.0, 1.0),
            }),
            ComponentType::ServicesSection => SectionContent::ServicesSection(ServicesContent {
                services: parse_services(c.get("services").unwrap_or(&Value::Null)),
            }),
            ComponentType::AchievementsCounters => {
                SectionContent::AchievementsCounters(CountersContent {
                    counters: parse_counters(c.get("counters").unwrap_or(&Value::Null)),
                })
            }
            ComponentType::TestimonialsCarousel => {
                SectionContent::TestimonialsCarousel(TestimonialsContent {
                    testimonials: parse_testimonials(c.get("testimonials").unwrap_or(&Value::Null)),
                })
            }
            ComponentType::Footer => SectionContent::Footer(FooterContent {
                copyright_text: field_text(c, "copyright_text"),
                links: parse_footer_links(c.get("links").unwrap_or(&Value::Null)),
                social: SocialLinks::from_value(c),
                columns: parse_footer_columns(c.get("columns").unwrap_or(&Value::Null)),
            }),
            ComponentType::Unknown => SectionContent::Unknown,
        }
    }
}

fn parse_contact(value: &Value) -> ContactContent {
    let mut social = SocialLinks::from_value(value);
    // The email renders as its own contact row, not as a social entry.
    let email = social.email.take();
    ContactContent {
        email,
        phone: field_text(value, "phone"),
        location: field_text(value, "location"),
        social,
    }
}

fn parse_code_snippets(value: &Value) -> Vec<CodeSnippet> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let code = field_text(item, "code")?;
            Some(CodeSnippet {
                language: field_text(item, "language").unwrap_or_else(|| "text".to_string()),
                code,
                description: field_text(item, "description"),
                filename: field_text(item, "filename"),
            })
        })
        .collect()
}

fn parse_experiences(value: &Value) -> Vec<ExperienceEntry> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let entry = ExperienceEntry {
                title: field_text_alias(item, &["title", "role"]),
                company: field_text(item, "company"),
                start_date: field_text_alias(item, &["start_date", "startDate"]),
                end_date: field_text_alias(item, &["end_date", "endDate"]),
                location: field_text(item, "location"),
                description: field_text(item, "description"),
            };
            // An entry with neither a role nor a company renders as an empty
            // row; drop it instead.
            if entry.title.is_none() && entry.company.is_none() {
                None
            } else {
                Some(entry)
            }
        })
        .collect()
}

fn parse_cta_buttons(value: &Value) -> Vec<CtaButton> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let text = field_text(item, "text")?;
            Some(CtaButton {
                text,
                url: field_text(item, "url").unwrap_or_else(|| "#".to_string()),
                variant: field_text(item, "variant").unwrap_or_else(|| "primary".to_string()),
            })
        })
        .collect()
}

fn parse_services(value: &Value) -> Vec<Service> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let service = Service {
                title: field_text(item, "title"),
                description: field_text(item, "description"),
                icon: field_text(item, "icon"),
            };
            if service.title.is_none() && service.description.is_none() {
                None
            } else {
                Some(service)
            }
        })
        .collect()
}

fn parse_counters(value: &Value) -> Vec<Counter> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            if !item.is_object() {
                return None;
            }
            Some(Counter {
                label: field_text(item, "label"),
                value: field_i64(item, "value").unwrap_or(0),
                prefix: field_text(item, "prefix").unwrap_or_default(),
                suffix: field_text(item, "suffix").unwrap_or_default(),
            })
        })
        .collect()
}

fn parse_testimonials(value: &Value) -> Vec<Testimonial> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let t = Testimonial {
                name: field_text(item, "name"),
                role: field_text(item, "role"),
                company: field_text(item, "company"),
                content: field_text_alias(item, &["content", "quote", "text"]),
                image: field_text(item, "image"),
                rating: field_i64(item, "rating")
                    .filter(|r| (1..=5).contains(r))
                    .map(|r| r as u8),
            };
            if t.content.is_none() && t.name.is_none() {
                None
            } else {
                Some(t)
            }
        })
        .collect()
}

fn parse_footer_links(value: &Value) -> Vec<FooterLink> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let text = field_text(item, "text")?;
            let url = item.get("url").and_then(|v| validate_url(v))?;
            Some(FooterLink { text, url })
        })
        .collect()
}

fn parse_footer_columns(value: &Value) -> Vec<FooterColumn> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            if !item.is_object() {
                return None;
            }
            let column = FooterColumn {
                title: field_text(item, "title"),
                links: parse_footer_links(item.get("links").unwrap_or(&Value::Null)),
            };
            if column.title.is_none() && column.links.is_empty() {
                None
            } else {
                Some(column)
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Builder defaults
// ────────────────────────────────────────────────────────────────────────────

/// Starter content for a freshly added component, mirroring what the builder
/// seeds each kind with. Legacy kinds start from an empty object and get
/// their shape on first edit.
pub fn default_content(component_type: ComponentType) -> Value {
    match component_type {
        ComponentType::HeroBanner => json!({
            "title": "",
            "subtitle": "",
            "background_image": "",
            "background_video": "",
            "cta_buttons": [{"text": "Get Started", "url": "#", "variant": "primary"}],
            "overlay_opacity": 0.5
        }),
        ComponentType::AboutMeCard => json!({
            "bio": "",
            "image": "",
            "name": "",
            "title": "",
            "social_links": {"linkedin": "", "github": "", "twitter": "", "email": ""}
        }),
        ComponentType::SkillsCloud => json!({"skills": [], "display_mode": "cloud"}),
        ComponentType::ExperienceTimeline => json!({"experiences": []}),
        ComponentType::ProjectGrid => {
            json!({"projects": [], "filter_categories": [], "show_filters": true})
        }
        ComponentType::ServicesSection => json!({"services": []}),
        ComponentType::AchievementsCounters => json!({"counters": []}),
        ComponentType::TestimonialsCarousel => json!({"testimonials": []}),
        ComponentType::BlogPreviewGrid => json!({"posts": [], "posts_per_row": 3}),
        ComponentType::ContactForm => json!({
            "title": "Contact Info",
            "description": "",
            "fields": ["name", "email", "message"],
            "submit_button_text": "Send Message",
            "contact_info": {
                "email": "", "phone": "", "location": "",
                "linkedin": "", "github": "", "website": ""
            }
        }),
        ComponentType::Footer => json!({
            "copyright_text": "",
            "links": [],
            "social_links": {},
            "columns": []
        }),
        _ => json!({}),
    }
}

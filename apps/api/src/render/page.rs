//! Full-document assembly: head metadata, skin styling, section stream, and
//! the page scripts (counter animation, carousel, grid filters, optional
//! click tracking).

use crate::models::portfolio::{Portfolio, TemplateConfig};
use crate::render::html::escape;
use crate::render::skin::{hex_to_rgb, Skin};
use crate::render::template::{catch_render, render_portfolio_sections};

/// Counter animation timing: fixed 2s duration over 60 steps with an
/// ease-out-cubic curve. Cosmetic only.
const COUNTER_SCRIPT: &str = r#"(function () {
  var duration = 2000, steps = 60, stepDuration = duration / steps;
  document.querySelectorAll('[data-counter-target]').forEach(function (el) {
    var target = parseInt(el.getAttribute('data-counter-target'), 10) || 0;
    var step = 0;
    el.textContent = '0';
    var timer = setInterval(function () {
      step++;
      var progress = Math.min(step / steps, 1);
      var eased = 1 - Math.pow(1 - progress, 3);
      el.textContent = String(Math.floor(target * eased));
      if (step >= steps) { clearInterval(timer); el.textContent = String(target); }
    }, stepDuration);
  });
})();"#;

const CAROUSEL_SCRIPT: &str = r#"(function () {
  document.querySelectorAll('.carousel').forEach(function (carousel) {
    var slides = carousel.querySelectorAll('.carousel-slide');
    if (slides.length < 2) return;
    var index = 0;
    function show(next) {
      slides[index].classList.remove('active');
      index = (next + slides.length) % slides.length;
      slides[index].classList.add('active');
    }
    var prev = carousel.querySelector('.carousel-prev');
    var next = carousel.querySelector('.carousel-next');
    if (prev) prev.addEventListener('click', function () { show(index - 1); });
    if (next) next.addEventListener('click', function () { show(index + 1); });
  });
})();"#;

const FILTER_SCRIPT: &str = r#"(function () {
  document.querySelectorAll('.grid-filters').forEach(function (filters) {
    var grid = filters.parentElement.querySelector('.project-grid');
    if (!grid) return;
    filters.querySelectorAll('.grid-filter').forEach(function (button) {
      button.addEventListener('click', function () {
        filters.querySelectorAll('.grid-filter').forEach(function (b) { b.classList.remove('active'); });
        button.classList.add('active');
        var filter = button.getAttribute('data-filter');
        grid.querySelectorAll('[data-categories]').forEach(function (card) {
          var categories = (card.getAttribute('data-categories') || '').split(',');
          card.style.display = (filter === 'all' || categories.indexOf(filter) !== -1) ? '' : 'none';
        });
      });
    });
  });
})();"#;

/// Base layout rules; everything color-related flows through the CSS custom
/// properties set per page.
const BASE_STYLES: &str = r#"
* { box-sizing: border-box; margin: 0; }
body.template-container {
  background: var(--template-background);
  color: var(--template-text);
  font-family: var(--template-font-family, system-ui, sans-serif);
  line-height: 1.6;
}
.section-inner { max-width: 960px; margin: 0 auto; padding: 3rem 1.5rem; }
.template-section-title { font-size: 1.75rem; margin-bottom: 1.25rem; color: var(--template-primary); }
.empty-state { color: var(--template-secondary); text-align: center; padding: 2rem 0; }
.profile-photo { border-radius: 50%; object-fit: cover; }
.header-title { font-size: 2.5rem; }
.header-subtitle { color: var(--template-secondary); font-size: 1.25rem; }
.skill-chips, .skills-cloud { display: flex; flex-wrap: wrap; gap: 0.75rem; }
.skill-chip {
  padding: 0.25rem 0.75rem; border-radius: 9999px;
  background: rgba(var(--template-primary-rgb), 0.1);
  color: var(--template-primary);
  border: 1px solid rgba(var(--template-primary-rgb), 0.2);
}
.skill-chip-minimalist { border-radius: 0; background: none; border-width: 0 0 1px; }
.skill-chip-developer { border-radius: 0.25rem; font-family: monospace; }
.project-cards, .blog-cards, .services-grid, .counters-grid, .preview-grid, .project-grid {
  display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
}
.preview-grid { grid-template-columns: repeat(var(--posts-per-row, 3), 1fr); }
[class^="template-"][class$="-card"], .counter-item {
  border: 1px solid rgba(var(--template-primary-rgb), 0.15);
  border-radius: 0.5rem; padding: 1.25rem;
}
.project-image, .blog-image, .preview-image { width: 100%; border-radius: 0.25rem; }
.tech-chip { font-size: 0.8rem; margin-right: 0.5rem; color: var(--template-secondary); }
.project-links a, .social-links a { color: var(--template-primary); margin-right: 1rem; }
.hero-banner { position: relative; min-height: 60vh; display: flex; align-items: center;
  justify-content: center; background-size: cover; background-position: center; text-align: center; }
.hero-overlay { position: absolute; inset: 0; background: #000; }
.hero-content { position: relative; color: #fff; }
.hero-title { font-size: 3rem; }
.hero-cta { display: inline-block; margin: 1rem 0.5rem 0; padding: 0.6rem 1.4rem;
  border-radius: 0.375rem; background: var(--template-primary); color: #fff; text-decoration: none; }
.timeline-list { list-style: none; padding-left: 1rem; border-left: 2px solid var(--template-primary); }
.timeline-entry { margin-bottom: 1.5rem; }
.timeline-dates, .timeline-location { color: var(--template-secondary); font-size: 0.9rem; }
.counter-value { font-size: 2rem; color: var(--template-primary); text-align: center; }
.counter-label { text-align: center; color: var(--template-secondary); }
.carousel { position: relative; }
.carousel-slide { display: none; text-align: center; }
.carousel-slide.active { display: block; }
.carousel-prev, .carousel-next { position: absolute; top: 50%; transform: translateY(-50%);
  background: none; border: none; font-size: 2rem; cursor: pointer; color: var(--template-primary); }
.carousel-prev { left: 0; }
.carousel-next { right: 0; }
.testimonial-rating { color: var(--template-primary); }
.contact-form-fields { display: grid; gap: 0.75rem; max-width: 480px; }
.contact-form-fields input, .contact-form-fields textarea {
  padding: 0.6rem; border: 1px solid rgba(var(--template-primary-rgb), 0.3); border-radius: 0.25rem; }
.contact-form-fields button { padding: 0.6rem; background: var(--template-primary);
  color: #fff; border: none; border-radius: 0.25rem; cursor: pointer; }
.grid-filters { margin-bottom: 1.5rem; }
.grid-filter { margin-right: 0.5rem; padding: 0.3rem 0.9rem; border-radius: 9999px;
  border: 1px solid var(--template-primary); background: none; color: var(--template-primary); cursor: pointer; }
.grid-filter.active { background: var(--template-primary); color: #fff; }
.site-footer { border-top: 1px solid rgba(var(--template-primary-rgb), 0.15); }
.footer-columns { display: flex; gap: 3rem; flex-wrap: wrap; }
.section-error { border: 1px dashed #dc2626; }
.section-error-message { color: #dc2626; text-align: center; }
.section-error-retry { display: block; margin: 0.5rem auto 0; cursor: pointer; }
.code-snippet pre { background: rgba(0, 0, 0, 0.6); color: #6ee7b7; padding: 1rem;
  border-radius: 0.375rem; overflow-x: auto; }
"#;

#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Absolute URL of the page, emitted as `og:url` when present.
    pub canonical_url: Option<String>,
    /// Endpoint the click-delegation script POSTs to. `None` disables
    /// tracking entirely (builder preview).
    pub track_endpoint: Option<String>,
}

/// [`render_page`] behind the assembly supervisor: a panic anywhere in
/// document composition (outside the per-section isolation) comes back as
/// `Err(reason)` for the route layer to map to an error response.
pub fn try_render_page(
    portfolio: &Portfolio,
    config: &TemplateConfig,
    options: &PageOptions,
) -> Result<String, String> {
    catch_render(|| render_page(portfolio, config, options))
}

/// Assembles the complete HTML document for a portfolio.
pub fn render_page(portfolio: &Portfolio, config: &TemplateConfig, options: &PageOptions) -> String {
    let skin = Skin::parse(&portfolio.template_type);
    let colors = skin.resolve_colors(config);

    let title = portfolio
        .seo_title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(&portfolio.title);
    let description = portfolio.seo_description.as_deref().unwrap_or_default();

    let mut head = String::new();
    head.push_str(&format!("<title>{}</title>\n", escape(title)));
    head.push_str("<meta charset=\"utf-8\">\n");
    head.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if !description.is_empty() {
        head.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            escape(description)
        ));
    }
    if let Some(keywords) = portfolio.seo_keywords.as_deref().filter(|k| !k.is_empty()) {
        head.push_str(&format!(
            "<meta name=\"keywords\" content=\"{}\">\n",
            escape(keywords)
        ));
    }
    head.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\">\n",
        escape(title)
    ));
    if !description.is_empty() {
        head.push_str(&format!(
            "<meta property=\"og:description\" content=\"{}\">\n",
            escape(description)
        ));
    }
    if let Some(url) = &options.canonical_url {
        head.push_str(&format!(
            "<meta property=\"og:url\" content=\"{}\">\n",
            escape(url)
        ));
    }

    let mut root_vars = format!(
        "--template-primary: {p}; --template-secondary: {s}; \
         --template-background: {b}; --template-text: {t};",
        p = escape(&colors.primary),
        s = escape(&colors.secondary),
        b = escape(&colors.background),
        t = escape(&colors.text),
    );
    if let Some((r, g, b)) = hex_to_rgb(&colors.primary) {
        root_vars.push_str(&format!(" --template-primary-rgb: {r}, {g}, {b};"));
    }
    if let Some((r, g, b)) = hex_to_rgb(&colors.secondary) {
        root_vars.push_str(&format!(" --template-secondary-rgb: {r}, {g}, {b};"));
    }
    if let Some(font) = &config.font_family {
        root_vars.push_str(&format!(" --template-font-family: {};", escape(font)));
    }

    let sections: String = render_portfolio_sections(portfolio)
        .into_iter()
        .map(|s| s.html)
        .collect();

    let mut scripts = format!("<script>{COUNTER_SCRIPT}</script>\n<script>{CAROUSEL_SCRIPT}</script>\n<script>{FILTER_SCRIPT}</script>\n");
    if let Some(endpoint) = &options.track_endpoint {
        scripts.push_str(&format!("<script>{}</script>\n", track_script(endpoint)));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n{head}\
         <style>:root {{ {root_vars} }}{BASE_STYLES}</style>\n</head>\n\
         <body class=\"{container} template-container\">\n{sections}{scripts}</body>\n</html>\n",
        container = skin.container_class(),
    )
}

/// Click delegation: any interactive element carrying `data-element-id`
/// reports a `{element_id, element_type}` pair. Fire-and-forget — failures
/// stay in the console.
fn track_script(endpoint: &str) -> String {
    format!(
        r#"(function () {{
  document.addEventListener('click', function (event) {{
    var el = event.target.closest('a, button, [role="button"]');
    if (!el) return;
    var elementId = el.id || el.getAttribute('data-element-id') || el.className;
    if (!elementId) return;
    var elementType = el.getAttribute('data-element-type') ||
      (el.tagName === 'A' ? 'link' : el.tagName === 'BUTTON' ? 'button' : 'interactive');
    fetch('{}', {{
      method: 'POST',
      headers: {{ 'Content-Type': 'application/json' }},
      body: JSON.stringify({{ element_id: elementId, element_type: elementType }}),
      keepalive: true
    }}).catch(function (err) {{ console.error('Failed to track click:', err); }});
  }});
}})();"#,
        escape(endpoint)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::{ComponentType, PortfolioComponent};
    use serde_json::json;

    fn portfolio() -> Portfolio {
        Portfolio {
            id: Some(1),
            title: "Jane's Work".to_string(),
            template_type: "developer".to_string(),
            template: None,
            custom_settings: json!({}),
            components: vec![PortfolioComponent {
                id: Some(1),
                component_type: ComponentType::Header,
                order: 0,
                is_visible: true,
                content: json!({"title": "Jane", "subtitle": "Engineer"}),
            }],
            seo_title: Some("Jane — Portfolio".to_string()),
            seo_description: Some("Rust engineer".to_string()),
            seo_keywords: Some("rust,engineer".to_string()),
            profile_photo_url: None,
            user_profile_photo_url: None,
            slug: Some("jane".to_string()),
            is_published: true,
        }
    }

    #[test]
    fn test_page_head_prefers_seo_title() {
        let html = render_page(&portfolio(), &TemplateConfig::default(), &PageOptions::default());
        assert!(html.contains("<title>Jane — Portfolio</title>"));
        assert!(html.contains("meta name=\"description\" content=\"Rust engineer\""));
        assert!(html.contains("meta name=\"keywords\" content=\"rust,engineer\""));
    }

    #[test]
    fn test_page_emits_skin_variables() {
        let html = render_page(&portfolio(), &TemplateConfig::default(), &PageOptions::default());
        // Developer skin default primary.
        assert!(html.contains("--template-primary: #10b981"));
        assert!(html.contains("--template-primary-rgb: 16, 185, 129"));
        assert!(html.contains("class=\"template-developer template-container\""));
    }

    #[test]
    fn test_page_config_overrides_colors_and_font() {
        let config = TemplateConfig {
            primary_color: Some("#112233".to_string()),
            font_family: Some("Inter".to_string()),
            ..Default::default()
        };
        let html = render_page(&portfolio(), &config, &PageOptions::default());
        assert!(html.contains("--template-primary: #112233"));
        assert!(html.contains("--template-font-family: Inter;"));
    }

    #[test]
    fn test_track_script_only_with_endpoint() {
        let without = render_page(&portfolio(), &TemplateConfig::default(), &PageOptions::default());
        assert!(!without.contains("Failed to track click"));

        let with = render_page(
            &portfolio(),
            &TemplateConfig::default(),
            &PageOptions {
                canonical_url: Some("https://f.example/p/jane".to_string()),
                track_endpoint: Some("/p/jane/track".to_string()),
            },
        );
        assert!(with.contains("Failed to track click"));
        assert!(with.contains("og:url"));
    }

    #[test]
    fn test_counter_script_constants() {
        assert!(COUNTER_SCRIPT.contains("duration = 2000"));
        assert!(COUNTER_SCRIPT.contains("steps = 60"));
        assert!(COUNTER_SCRIPT.contains("Math.pow(1 - progress, 3)"));
    }

    #[test]
    fn test_unknown_skin_falls_back_to_modern_styling() {
        let mut p = portfolio();
        p.template_type = "brutalist".to_string();
        let html = render_page(&p, &TemplateConfig::default(), &PageOptions::default());
        assert!(html.contains("class=\"template-modern template-container\""));
    }

    #[test]
    fn test_try_render_page_succeeds_for_well_formed_portfolio() {
        let result = try_render_page(
            &portfolio(),
            &TemplateConfig::default(),
            &PageOptions::default(),
        );
        assert!(result.unwrap().contains("<!DOCTYPE html>"));
    }
}

//! Template dispatch: turns a portfolio's component list into an ordered
//! sequence of rendered sections.
//!
//! Each section renders inside a panic supervisor, so one malformed section
//! produces an inline error card instead of taking down the page. Dispatch is
//! idempotent — the same component list yields the same section sequence.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::content::SectionContent;
use crate::models::portfolio::{ComponentType, Portfolio, PortfolioComponent};
use crate::render::sections::{render_section, SectionCtx};
use crate::render::skin::Skin;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub component_type: ComponentType,
    pub html: String,
}

/// Renders every visible component of `portfolio`, in order.
///
/// 1. Filter to `is_visible == true`
/// 2. Stable sort by `order` ascending — ties keep original relative position
/// 3. Normalize + render each behind a panic supervisor
/// 4. A panicking section becomes an inline error card; siblings are
///    unaffected. Unknown component types are skipped silently.
pub fn render_portfolio_sections(portfolio: &Portfolio) -> Vec<RenderedSection> {
    let skin = Skin::parse(&portfolio.template_type);
    let ctx = SectionCtx {
        skin,
        portfolio_title: &portfolio.title,
        profile_photo_url: portfolio.profile_photo_url.as_deref(),
        user_profile_photo_url: portfolio.user_profile_photo_url.as_deref(),
    };

    let mut visible: Vec<&PortfolioComponent> =
        portfolio.components.iter().filter(|c| c.is_visible).collect();
    visible.sort_by_key(|c| c.order);

    let mut sections = Vec::new();
    for component in visible {
        match supervised(|| {
            let content = SectionContent::from_component(component);
            render_section(&content, &ctx)
        }) {
            Ok(Some(html)) => sections.push(RenderedSection {
                component_type: component.component_type,
                html,
            }),
            Ok(None) => {}
            Err(reason) => {
                warn!(
                    "Section '{}' failed to render: {reason}",
                    component.component_type.as_str()
                );
                sections.push(RenderedSection {
                    component_type: component.component_type,
                    html: error_card(component.component_type, skin),
                });
            }
        }
    }
    sections
}

/// Runs one section render in an isolated scope, converting a panic into an
/// `Err(reason)` the caller turns into a fallback card.
fn supervised<F>(render: F) -> Result<Option<String>, String>
where
    F: FnOnce() -> Option<String>,
{
    catch_unwind(AssertUnwindSafe(render)).map_err(panic_message)
}

/// Same isolation for full-document assembly: the route layer calls this so
/// a panic outside any single section degrades to an error response instead
/// of aborting the handler task.
pub fn catch_render<F>(render: F) -> Result<String, String>
where
    F: FnOnce() -> String,
{
    catch_unwind(AssertUnwindSafe(render)).map_err(panic_message)
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The inline fallback shown in place of a section that failed to render.
fn error_card(component_type: ComponentType, skin: Skin) -> String {
    format!(
        "<section class=\"section-error {}\">\n<div class=\"section-inner\">\n\
         <p class=\"section-error-message\">Error in {}</p>\n\
         <button class=\"section-error-retry\" onclick=\"location.reload()\">Retry</button>\n\
         </div>\n</section>\n",
        skin.section_class(),
        component_type.label(),
    )
}

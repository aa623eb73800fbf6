//! Section renderers — one per component kind.
//!
//! Each renderer is a pure function from normalized content plus a skin to an
//! HTML string. `None` means the section renders nothing at all (the policy
//! for strictly-optional decorative sections); required sections return a
//! placeholder card instead of disappearing. Failures are not signalled
//! through the return value — the template renderer supervises each call.

mod primary;
mod engagement;
mod showcase;

use crate::content::SectionContent;
use crate::render::html::escape;
use crate::render::skin::Skin;

/// Per-render context shared by all sections: the skin plus the few
/// portfolio-level fields some sections fall back to.
#[derive(Debug, Clone, Copy)]
pub struct SectionCtx<'a> {
    pub skin: Skin,
    pub portfolio_title: &'a str,
    pub profile_photo_url: Option<&'a str>,
    pub user_profile_photo_url: Option<&'a str>,
}

/// Dispatches normalized content to its renderer. Unknown kinds render
/// nothing.
pub fn render_section(content: &SectionContent, ctx: &SectionCtx) -> Option<String> {
    match content {
        SectionContent::Header(c) => Some(primary::header(c, ctx)),
        SectionContent::About(c) => Some(primary::about(c, ctx)),
        SectionContent::Skills(c) => Some(primary::skills(c, ctx)),
        SectionContent::Projects(c) => Some(primary::projects(c, ctx)),
        SectionContent::Blog(c) => Some(primary::blog(c, ctx)),
        SectionContent::Contact(c) => Some(primary::contact(c, ctx)),
        SectionContent::HeroBanner(c) => showcase::hero_banner(c, ctx),
        SectionContent::AboutMeCard(c) => showcase::about_me_card(c, ctx),
        SectionContent::SkillsCloud(c) => showcase::skills_cloud(c, ctx),
        SectionContent::ExperienceTimeline(c) => showcase::experience_timeline(c, ctx),
        SectionContent::ProjectGrid(c) => showcase::project_grid(c, ctx),
        SectionContent::ServicesSection(c) => showcase::services_section(c, ctx),
        SectionContent::AchievementsCounters(c) => engagement::achievements_counters(c, ctx),
        SectionContent::TestimonialsCarousel(c) => engagement::testimonials_carousel(c, ctx),
        SectionContent::BlogPreviewGrid(c) => engagement::blog_preview_grid(c, ctx),
        SectionContent::ContactForm(c) => engagement::contact_form(c, ctx),
        SectionContent::Footer(c) => engagement::footer(c, ctx),
        SectionContent::Unknown => None,
    }
}

/// Placeholder body for a required section with no usable content.
fn empty_state(ctx: &SectionCtx, section_id: &str, heading: &str, message: &str) -> String {
    format!(
        "<section id=\"{section_id}\" class=\"{section_class}\">\n\
         <div class=\"section-inner\">\n\
         <h2 class=\"template-section-title\">{heading}</h2>\n\
         <p class=\"empty-state\">{message}</p>\n\
         </div>\n\
         </section>\n",
        section_class = ctx.skin.section_class(),
        heading = escape(heading),
        message = escape(message),
    )
}

/// Opens a standard section wrapper; closed by [`close_section`].
fn open_section(ctx: &SectionCtx, section_id: &str, heading: Option<&str>) -> String {
    let mut out = format!(
        "<section id=\"{section_id}\" class=\"{}\">\n<div class=\"section-inner\">\n",
        ctx.skin.section_class()
    );
    if let Some(heading) = heading {
        out.push_str(&format!(
            "<h2 class=\"template-section-title\">{}</h2>\n",
            escape(heading)
        ));
    }
    out
}

fn close_section(out: &mut String) {
    out.push_str("</div>\n</section>\n");
}

/// An anchor carrying the tracking attributes the click-delegation script
/// reports on.
fn tracked_link(href: &str, element_id: &str, element_type: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" \
         data-element-id=\"{}\" data-element-type=\"{}\">{}</a>",
        escape(href),
        escape(element_id),
        escape(element_type),
        escape(label),
    )
}

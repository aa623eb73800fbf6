//! Showcase sections: hero banner, about-me card, skills cloud, experience
//! timeline, project grid, services. All of these are strictly optional —
//! with nothing to show they render nothing at all, no heading, no
//! placeholder.

use crate::content::{
    AboutMeCardContent, ExperienceTimelineContent, HeroBannerContent, ProjectGridContent,
    ServicesContent, SkillsCloudContent, SkillsDisplayMode,
};
use crate::render::html::{escape, markdown_to_html};
use crate::render::sections::{close_section, open_section, tracked_link, SectionCtx};

pub fn hero_banner(content: &HeroBannerContent, ctx: &SectionCtx) -> Option<String> {
    let title = content.title.as_deref()?;

    let skin = ctx.skin.as_str();
    let mut out = format!("<section id=\"section-hero_banner\" class=\"hero-banner hero-banner-{skin}\"");
    if let Some(image) = &content.background_image {
        out.push_str(&format!(
            " style=\"background-image: url('{}')\"",
            escape(image)
        ));
    }
    out.push_str(">\n");

    if let Some(video) = &content.background_video {
        out.push_str(&format!(
            "<video class=\"hero-video\" autoplay muted loop playsinline>\
             <source src=\"{}\"></video>\n",
            escape(video)
        ));
    }
    out.push_str(&format!(
        "<div class=\"hero-overlay\" style=\"opacity: {:.2}\"></div>\n",
        content.overlay_opacity
    ));

    out.push_str("<div class=\"hero-content\">\n");
    out.push_str(&format!("<h1 class=\"hero-title\">{}</h1>\n", escape(title)));
    if let Some(subtitle) = &content.subtitle {
        out.push_str(&format!(
            "<p class=\"hero-subtitle\">{}</p>\n",
            escape(subtitle)
        ));
    }
    if !content.cta_buttons.is_empty() {
        out.push_str("<div class=\"hero-actions\">\n");
        for (idx, button) in content.cta_buttons.iter().enumerate() {
            out.push_str(&format!(
                "<a href=\"{}\" class=\"hero-cta hero-cta-{}\" \
                 data-element-id=\"hero-cta-{idx}\" data-element-type=\"cta_button\">{}</a>\n",
                escape(&button.url),
                escape(&button.variant),
                escape(&button.text),
            ));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</section>\n");
    Some(out)
}

pub fn about_me_card(content: &AboutMeCardContent, ctx: &SectionCtx) -> Option<String> {
    if content.is_empty() {
        return None;
    }

    let mut out = format!(
        "<section id=\"section-about_me_card\" class=\"about-me-card about-me-card-{}\">\n\
         <div class=\"section-inner\">\n<div class=\"{}\">\n",
        ctx.skin.as_str(),
        ctx.skin.card_class(),
    );
    if let Some(image) = &content.image {
        let alt = content.name.as_deref().unwrap_or("Profile photo");
        out.push_str(&format!(
            "<img class=\"about-me-photo\" src=\"{}\" alt=\"{}\">\n",
            escape(image),
            escape(alt),
        ));
    }
    if let Some(name) = &content.name {
        out.push_str(&format!("<h2 class=\"about-me-name\">{}</h2>\n", escape(name)));
    }
    if let Some(title) = &content.title {
        out.push_str(&format!(
            "<p class=\"about-me-title\">{}</p>\n",
            escape(title)
        ));
    }
    if let Some(bio) = &content.bio {
        out.push_str(&format!(
            "<div class=\"about-me-bio\">{}</div>\n",
            markdown_to_html(bio)
        ));
    }
    let social = content.social.entries();
    if !social.is_empty() {
        out.push_str("<div class=\"social-links\">\n");
        for (label, href) in social {
            out.push_str(&format!(
                "{}\n",
                tracked_link(
                    &href,
                    &format!("about-me-{}", label.to_lowercase()),
                    "social_link",
                    label,
                )
            ));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</div>\n</section>\n");
    Some(out)
}

pub fn skills_cloud(content: &SkillsCloudContent, ctx: &SectionCtx) -> Option<String> {
    if content.skills.is_empty() {
        return None;
    }

    let skin = ctx.skin.as_str();
    let mut out = format!(
        "<section id=\"section-skills_cloud\" class=\"skills-display skills-display-{skin}\">\n\
         <div class=\"section-inner\">\n\
         <h2 class=\"template-section-title\">Skills</h2>\n"
    );
    match content.display_mode {
        SkillsDisplayMode::Cloud => {
            out.push_str("<div class=\"skills-cloud\">\n");
            for skill in &content.skills {
                out.push_str(&format!(
                    "<span class=\"skill-chip skill-chip-{skin}\">{}</span>\n",
                    escape(skill)
                ));
            }
            out.push_str("</div>\n");
        }
        SkillsDisplayMode::Bars => {
            out.push_str("<div class=\"skills-bars\">\n");
            for skill in &content.skills {
                out.push_str(&format!(
                    "<div class=\"skill-bar-row\"><span class=\"skill-bar-label\">{}</span>\
                     <span class=\"skill-bar\"></span></div>\n",
                    escape(skill)
                ));
            }
            out.push_str("</div>\n");
        }
    }
    out.push_str("</div>\n</section>\n");
    Some(out)
}

pub fn experience_timeline(
    content: &ExperienceTimelineContent,
    ctx: &SectionCtx,
) -> Option<String> {
    if content.experiences.is_empty() {
        return None;
    }

    let mut out = format!(
        "<section id=\"section-experience_timeline\" \
         class=\"experience-timeline experience-timeline-{}\">\n\
         <div class=\"section-inner\">\n\
         <h2 class=\"template-section-title\">Experience</h2>\n\
         <ol class=\"timeline-list\">\n",
        ctx.skin.as_str()
    );
    for entry in &content.experiences {
        out.push_str("<li class=\"timeline-entry\">\n");
        let role = entry.title.as_deref().unwrap_or("");
        let company = entry.company.as_deref().unwrap_or("");
        let heading = match (role.is_empty(), company.is_empty()) {
            (false, false) => format!("{role} · {company}"),
            (false, true) => role.to_string(),
            _ => company.to_string(),
        };
        out.push_str(&format!(
            "<h3 class=\"timeline-heading\">{}</h3>\n",
            escape(&heading)
        ));
        if entry.start_date.is_some() || entry.end_date.is_some() {
            let start = entry.start_date.as_deref().unwrap_or("");
            let end = entry.end_date.as_deref().unwrap_or("Present");
            out.push_str(&format!(
                "<p class=\"timeline-dates\">{} – {}</p>\n",
                escape(start),
                escape(end),
            ));
        }
        if let Some(location) = &entry.location {
            out.push_str(&format!(
                "<p class=\"timeline-location\">{}</p>\n",
                escape(location)
            ));
        }
        if let Some(description) = &entry.description {
            out.push_str(&format!(
                "<p class=\"timeline-description\">{}</p>\n",
                escape(description)
            ));
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ol>\n</div>\n</section>\n");
    Some(out)
}

pub fn project_grid(content: &ProjectGridContent, ctx: &SectionCtx) -> Option<String> {
    if content.projects.is_empty() {
        return None;
    }

    let mut out = open_section(ctx, "section-project_grid", Some("Projects"));

    // Filter buttons: explicit categories, else the union of technologies.
    if content.show_filters {
        let categories: Vec<String> = if content.filter_categories.is_empty() {
            let mut seen = Vec::new();
            for project in &content.projects {
                for tech in &project.technologies {
                    if !seen.contains(tech) {
                        seen.push(tech.clone());
                    }
                }
            }
            seen
        } else {
            content.filter_categories.clone()
        };

        if !categories.is_empty() {
            out.push_str("<div class=\"grid-filters\">\n");
            out.push_str(
                "<button class=\"grid-filter active\" data-filter=\"all\" \
                 data-element-id=\"grid-filter-all\" data-element-type=\"filter_button\">All</button>\n",
            );
            for category in &categories {
                out.push_str(&format!(
                    "<button class=\"grid-filter\" data-filter=\"{}\" \
                     data-element-id=\"grid-filter-{}\" data-element-type=\"filter_button\">{}</button>\n",
                    escape(category),
                    escape(&category.to_lowercase()),
                    escape(category),
                ));
            }
            out.push_str("</div>\n");
        }
    }

    out.push_str("<div class=\"project-grid\">\n");
    for project in &content.projects {
        out.push_str(&format!(
            "<article class=\"{}\" data-categories=\"{}\">\n",
            ctx.skin.card_class(),
            escape(&project.technologies.join(",")),
        ));
        if let Some(image) = &project.image {
            out.push_str(&format!(
                "<img class=\"project-image\" src=\"{}\" alt=\"{}\">\n",
                escape(image),
                escape(&project.title),
            ));
        }
        out.push_str(&format!(
            "<h3 class=\"project-title\">{}</h3>\n",
            escape(&project.title)
        ));
        if let Some(short) = &project.short_description {
            out.push_str(&format!(
                "<p class=\"project-description\">{}</p>\n",
                escape(short)
            ));
        }
        if let Some(url) = &project.live_url {
            out.push_str(&format!(
                "{}\n",
                tracked_link(
                    url,
                    &format!("grid-project-{}-live", project.id),
                    "project_link",
                    "View",
                )
            ));
        }
        out.push_str("</article>\n");
    }
    out.push_str("</div>\n");
    close_section(&mut out);
    Some(out)
}

pub fn services_section(content: &ServicesContent, ctx: &SectionCtx) -> Option<String> {
    if content.services.is_empty() {
        return None;
    }

    let mut out = format!(
        "<section id=\"section-services_section\" class=\"services-section services-section-{}\">\n\
         <div class=\"section-inner\">\n\
         <h2 class=\"template-section-title\">Services</h2>\n\
         <div class=\"services-grid\">\n",
        ctx.skin.as_str()
    );
    for service in &content.services {
        out.push_str(&format!("<div class=\"{}\">\n", ctx.skin.card_class()));
        if let Some(icon) = &service.icon {
            out.push_str(&format!(
                "<span class=\"service-icon\">{}</span>\n",
                escape(icon)
            ));
        }
        if let Some(title) = &service.title {
            out.push_str(&format!(
                "<h3 class=\"service-title\">{}</h3>\n",
                escape(title)
            ));
        }
        if let Some(description) = &service.description {
            out.push_str(&format!(
                "<p class=\"service-description\">{}</p>\n",
                escape(description)
            ));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</div>\n</section>\n");
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::catalog::ProjectCard;
    use crate::content::{CtaButton, ExperienceEntry, Service};
    use crate::render::skin::Skin;

    fn ctx() -> SectionCtx<'static> {
        SectionCtx {
            skin: Skin::Designer,
            portfolio_title: "T",
            profile_photo_url: None,
            user_profile_photo_url: None,
        }
    }

    #[test]
    fn test_hero_banner_requires_title() {
        assert!(hero_banner(&HeroBannerContent::default(), &ctx()).is_none());
    }

    #[test]
    fn test_hero_banner_overlay_and_ctas() {
        let content = HeroBannerContent {
            title: Some("Hi".to_string()),
            overlay_opacity: 0.5,
            cta_buttons: vec![CtaButton {
                text: "Go".to_string(),
                url: "#".to_string(),
                variant: "primary".to_string(),
            }],
            ..Default::default()
        };
        let html = hero_banner(&content, &ctx()).unwrap();
        assert!(html.contains("opacity: 0.50"));
        assert!(html.contains("data-element-id=\"hero-cta-0\""));
        assert!(html.contains("hero-cta-primary"));
    }

    #[test]
    fn test_experience_timeline_end_defaults_to_present() {
        let content = ExperienceTimelineContent {
            experiences: vec![ExperienceEntry {
                title: Some("Engineer".to_string()),
                company: Some("Acme".to_string()),
                start_date: Some("2021".to_string()),
                ..Default::default()
            }],
        };
        let html = experience_timeline(&content, &ctx()).unwrap();
        assert!(html.contains("Engineer · Acme"));
        assert!(html.contains("2021 – Present"));
    }

    #[test]
    fn test_project_grid_derives_filters_from_technologies() {
        let content = ProjectGridContent {
            projects: vec![ProjectCard {
                id: 1,
                title: "A".to_string(),
                description: String::new(),
                short_description: None,
                image: None,
                github_url: None,
                live_url: None,
                technologies: vec!["Rust".to_string(), "Wasm".to_string()],
            }],
            filter_categories: vec![],
            show_filters: true,
        };
        let html = project_grid(&content, &ctx()).unwrap();
        assert!(html.contains("data-filter=\"Rust\""));
        assert!(html.contains("data-categories=\"Rust,Wasm\""));
    }

    #[test]
    fn test_project_grid_hides_filters_when_disabled() {
        let content = ProjectGridContent {
            projects: vec![ProjectCard {
                id: 1,
                title: "A".to_string(),
                description: String::new(),
                short_description: None,
                image: None,
                github_url: None,
                live_url: None,
                technologies: vec!["Rust".to_string()],
            }],
            filter_categories: vec![],
            show_filters: false,
        };
        let html = project_grid(&content, &ctx()).unwrap();
        assert!(!html.contains("grid-filter"));
    }

    #[test]
    fn test_services_render_nothing_when_empty() {
        assert!(services_section(&ServicesContent::default(), &ctx()).is_none());
    }

    #[test]
    fn test_services_cards() {
        let content = ServicesContent {
            services: vec![Service {
                title: Some("Design".to_string()),
                description: Some("I design".to_string()),
                icon: Some("✏".to_string()),
            }],
        };
        let html = services_section(&content, &ctx()).unwrap();
        assert!(html.contains("service-title"));
        assert!(html.contains("template-designer-card"));
    }

    #[test]
    fn test_about_me_card_empty_renders_nothing() {
        assert!(about_me_card(&AboutMeCardContent::default(), &ctx()).is_none());
    }

    #[test]
    fn test_skills_cloud_modes() {
        let cloud = SkillsCloudContent {
            skills: vec!["Rust".to_string()],
            display_mode: SkillsDisplayMode::Cloud,
        };
        assert!(skills_cloud(&cloud, &ctx()).unwrap().contains("skills-cloud"));

        let bars = SkillsCloudContent {
            skills: vec!["Rust".to_string()],
            display_mode: SkillsDisplayMode::Bars,
        };
        assert!(skills_cloud(&bars, &ctx()).unwrap().contains("skill-bar-row"));
    }
}

//! The six original section kinds: header, about, skills, projects, blog,
//! contact. These always render — an empty one shows its placeholder rather
//! than vanishing, so the builder preview makes the gap obvious.

use crate::content::{
    AboutContent, BlogContent, ContactContent, HeaderContent, ProjectsContent, SkillsContent,
};
use crate::render::html::{escape, format_date, markdown_excerpt, markdown_to_html};
use crate::render::sections::{close_section, empty_state, open_section, tracked_link, SectionCtx};
use crate::render::skin::Skin;

pub fn header(content: &HeaderContent, ctx: &SectionCtx) -> String {
    let title = content
        .title
        .clone()
        .or_else(|| {
            let t = ctx.portfolio_title.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        });

    let Some(title) = title else {
        return empty_state(ctx, "section-header", "Welcome", "No title available");
    };

    let mut out = format!(
        "<header id=\"section-header\" class=\"{}\">\n<div class=\"section-inner\">\n",
        ctx.skin.header_class()
    );

    // Portfolio photo wins over the account photo when both exist.
    if let Some(photo) = ctx.profile_photo_url.or(ctx.user_profile_photo_url) {
        let size = ctx.skin.photo_size();
        out.push_str(&format!(
            "<img class=\"profile-photo\" src=\"{}\" alt=\"Profile photo of {}\" \
             width=\"{size}\" height=\"{size}\">\n",
            escape(photo),
            escape(&title),
        ));
    }

    out.push_str(&format!("<h1 class=\"header-title\">{}</h1>\n", escape(&title)));
    if let Some(subtitle) = &content.subtitle {
        out.push_str(&format!(
            "<p class=\"header-subtitle\">{}</p>\n",
            escape(subtitle)
        ));
    }
    out.push_str("</div>\n</header>\n");
    out
}

pub fn about(content: &AboutContent, ctx: &SectionCtx) -> String {
    let Some(bio) = &content.bio else {
        return empty_state(
            ctx,
            "section-about",
            "About Me",
            "No bio available. Add your bio to tell visitors about yourself.",
        );
    };

    let mut out = open_section(ctx, "section-about", Some("About Me"));
    out.push_str(&format!(
        "<div class=\"about-bio\">{}</div>\n",
        markdown_to_html(bio)
    ));
    close_section(&mut out);
    out
}

pub fn skills(content: &SkillsContent, ctx: &SectionCtx) -> String {
    if content.skills.is_empty() {
        return empty_state(
            ctx,
            "section-skills",
            "Skills",
            "No skills to display. Add your skills to showcase your expertise.",
        );
    }

    let mut out = open_section(ctx, "section-skills", Some("Skills"));
    out.push_str("<div class=\"skill-chips\">\n");
    for skill in &content.skills {
        out.push_str(&format!(
            "<span class=\"skill-chip skill-chip-{}\" title=\"{}\">{}</span>\n",
            ctx.skin.as_str(),
            escape(skill),
            escape(skill),
        ));
    }
    out.push_str("</div>\n");
    close_section(&mut out);
    out
}

pub fn projects(content: &ProjectsContent, ctx: &SectionCtx) -> String {
    if content.projects.is_empty() {
        return empty_state(ctx, "section-projects", "Projects", "No projects to display");
    }

    let mut out = open_section(ctx, "section-projects", Some("Projects"));
    out.push_str("<div class=\"project-cards\">\n");
    for project in &content.projects {
        out.push_str(&format!("<article class=\"{}\">\n", ctx.skin.card_class()));
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
        let blurb = project
            .short_description
            .as_deref()
            .unwrap_or(&project.description);
        if !blurb.is_empty() {
            out.push_str(&format!(
                "<p class=\"project-description\">{}</p>\n",
                escape(blurb)
            ));
        }
        if !project.technologies.is_empty() {
            out.push_str("<div class=\"project-tech\">\n");
            for tech in &project.technologies {
                out.push_str(&format!(
                    "<span class=\"tech-chip\">{}</span>\n",
                    escape(tech)
                ));
            }
            out.push_str("</div>\n");
        }
        let mut links = Vec::new();
        if let Some(url) = &project.github_url {
            links.push(tracked_link(
                url,
                &format!("project-{}-github", project.id),
                "project_link",
                "Code",
            ));
        }
        if let Some(url) = &project.live_url {
            links.push(tracked_link(
                url,
                &format!("project-{}-live", project.id),
                "project_link",
                "Live Demo",
            ));
        }
        if !links.is_empty() {
            out.push_str(&format!(
                "<div class=\"project-links\">{}</div>\n",
                links.join(" ")
            ));
        }
        out.push_str("</article>\n");
    }
    out.push_str("</div>\n");

    // The developer skin shows attached code samples as their own block.
    if ctx.skin == Skin::Developer && !content.code_snippets.is_empty() {
        out.push_str("<h2 class=\"template-section-title\">Code Samples</h2>\n");
        for snippet in &content.code_snippets {
            out.push_str("<figure class=\"code-snippet\">\n");
            if let Some(filename) = &snippet.filename {
                out.push_str(&format!(
                    "<figcaption class=\"code-filename\">{}</figcaption>\n",
                    escape(filename)
                ));
            }
            out.push_str(&format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                escape(&snippet.language),
                escape(&snippet.code),
            ));
            if let Some(description) = &snippet.description {
                out.push_str(&format!(
                    "<figcaption class=\"code-description\">{}</figcaption>\n",
                    escape(description)
                ));
            }
            out.push_str("</figure>\n");
        }
    }

    close_section(&mut out);
    out
}

pub fn blog(content: &BlogContent, ctx: &SectionCtx) -> String {
    if content.posts.is_empty() {
        return empty_state(ctx, "section-blog", "Blog", "No blog posts to display");
    }

    let mut out = open_section(ctx, "section-blog", Some("Blog"));
    out.push_str("<div class=\"blog-cards\">\n");
    for post in &content.posts {
        out.push_str(&format!("<article class=\"{}\">\n", ctx.skin.card_class()));
        if let Some(image) = &post.featured_image {
            out.push_str(&format!(
                "<img class=\"blog-image\" src=\"{}\" alt=\"{}\">\n",
                escape(image),
                escape(&post.title),
            ));
        }
        out.push_str(&format!(
            "<h3 class=\"blog-title\">{}</h3>\n",
            escape(&post.title)
        ));
        if let Some(date) = &post.published_date {
            out.push_str(&format!(
                "<time class=\"blog-date\">{}</time>\n",
                escape(&format_date(date))
            ));
        }
        let excerpt = post
            .excerpt
            .clone()
            .or_else(|| {
                post.content_markdown
                    .as_deref()
                    .map(|md| markdown_excerpt(md, 150))
            })
            .unwrap_or_default();
        if !excerpt.is_empty() {
            out.push_str(&format!(
                "<p class=\"blog-excerpt\">{}</p>\n",
                escape(&excerpt)
            ));
        }
        out.push_str("</article>\n");
    }
    out.push_str("</div>\n");
    close_section(&mut out);
    out
}

pub fn contact(content: &ContactContent, ctx: &SectionCtx) -> String {
    if content.is_empty() {
        return empty_state(
            ctx,
            "section-contact",
            "Contact",
            "No contact information available",
        );
    }

    let mut out = open_section(ctx, "section-contact", Some("Contact"));
    out.push_str("<div class=\"contact-rows\">\n");
    if let Some(email) = &content.email {
        out.push_str(&format!(
            "<p class=\"contact-row\">{}</p>\n",
            tracked_link(
                &format!("mailto:{email}"),
                "contact-email",
                "contact_link",
                email,
            )
        ));
    }
    if let Some(phone) = &content.phone {
        out.push_str(&format!(
            "<p class=\"contact-row\">{}</p>\n",
            escape(phone)
        ));
    }
    if let Some(location) = &content.location {
        out.push_str(&format!(
            "<p class=\"contact-row\">{}</p>\n",
            escape(location)
        ));
    }
    out.push_str("</div>\n");

    let social = content.social.entries();
    if !social.is_empty() {
        out.push_str("<div class=\"social-links\">\n");
        for (label, href) in social {
            out.push_str(&format!(
                "{}\n",
                tracked_link(
                    &href,
                    &format!("social-{}", label.to_lowercase()),
                    "social_link",
                    label,
                )
            ));
        }
        out.push_str("</div>\n");
    }
    close_section(&mut out);
    out
}

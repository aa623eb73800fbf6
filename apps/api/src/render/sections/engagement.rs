//! Engagement sections: animated counters, the testimonials carousel, the
//! blog preview grid, the contact form, and the footer.

use crate::content::{
    BlogPreviewGridContent, ContactFormContent, CountersContent, FooterContent,
    TestimonialsContent,
};
use crate::render::html::{escape, format_date, markdown_excerpt};
use crate::render::sections::{tracked_link, SectionCtx};

/// Counter values render at their target (a no-script fallback); the page
/// script animates 0 → `data-counter-target` on load.
pub fn achievements_counters(content: &CountersContent, ctx: &SectionCtx) -> Option<String> {
    if content.counters.is_empty() {
        return None;
    }

    let mut out = format!(
        "<section id=\"section-achievements_counters\" \
         class=\"achievements-counters achievements-counters-{}\">\n\
         <div class=\"section-inner\">\n<div class=\"counters-grid\">\n",
        ctx.skin.as_str()
    );
    for counter in &content.counters {
        out.push_str("<div class=\"counter-item\">\n");
        out.push_str(&format!(
            "<div class=\"counter-value\">{}<span class=\"counter-number\" \
             data-counter-target=\"{}\">{}</span>{}</div>\n",
            escape(&counter.prefix),
            counter.value,
            counter.value,
            escape(&counter.suffix),
        ));
        if let Some(label) = &counter.label {
            out.push_str(&format!(
                "<div class=\"counter-label\">{}</div>\n",
                escape(label)
            ));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</div>\n</section>\n");
    Some(out)
}

pub fn testimonials_carousel(content: &TestimonialsContent, ctx: &SectionCtx) -> Option<String> {
    if content.testimonials.is_empty() {
        return None;
    }

    let mut out = format!(
        "<section id=\"section-testimonials_carousel\" \
         class=\"testimonials-carousel testimonials-carousel-{}\">\n\
         <div class=\"section-inner\">\n\
         <h2 class=\"template-section-title\">Testimonials</h2>\n\
         <div class=\"carousel\">\n",
        ctx.skin.as_str()
    );
    for (idx, t) in content.testimonials.iter().enumerate() {
        let active = if idx == 0 { " active" } else { "" };
        out.push_str(&format!("<figure class=\"carousel-slide{active}\">\n"));
        if let Some(text) = &t.content {
            out.push_str(&format!(
                "<blockquote class=\"testimonial-quote\">{}</blockquote>\n",
                escape(text)
            ));
        }
        if let Some(rating) = t.rating {
            out.push_str(&format!(
                "<div class=\"testimonial-rating\" aria-label=\"{rating} out of 5\">{}</div>\n",
                "★".repeat(rating as usize),
            ));
        }
        let mut caption = Vec::new();
        if let Some(name) = &t.name {
            caption.push(escape(name));
        }
        let role_company = match (&t.role, &t.company) {
            (Some(role), Some(company)) => Some(format!("{role}, {company}")),
            (Some(role), None) => Some(role.clone()),
            (None, Some(company)) => Some(company.clone()),
            (None, None) => None,
        };
        if let Some(rc) = role_company {
            caption.push(escape(&rc));
        }
        if !caption.is_empty() {
            out.push_str(&format!(
                "<figcaption class=\"testimonial-author\">{}</figcaption>\n",
                caption.join(" — ")
            ));
        }
        out.push_str("</figure>\n");
    }
    // Controls are local page script only; nothing else coordinates with them.
    if content.testimonials.len() > 1 {
        out.push_str(
            "<button class=\"carousel-prev\" data-element-id=\"testimonials-prev\" \
             data-element-type=\"carousel_control\" aria-label=\"Previous\">&#8249;</button>\n\
             <button class=\"carousel-next\" data-element-id=\"testimonials-next\" \
             data-element-type=\"carousel_control\" aria-label=\"Next\">&#8250;</button>\n",
        );
    }
    out.push_str("</div>\n</div>\n</section>\n");
    Some(out)
}

pub fn blog_preview_grid(content: &BlogPreviewGridContent, ctx: &SectionCtx) -> Option<String> {
    if content.posts.is_empty() {
        return None;
    }

    let mut out = format!(
        "<section id=\"section-blog_preview_grid\" \
         class=\"blog-preview-grid blog-preview-grid-{}\">\n\
         <div class=\"section-inner\">\n\
         <h2 class=\"template-section-title\">Latest Posts</h2>\n\
         <div class=\"preview-grid\" style=\"--posts-per-row: {}\">\n",
        ctx.skin.as_str(),
        content.posts_per_row,
    );
    for post in &content.posts {
        out.push_str(&format!("<article class=\"{}\">\n", ctx.skin.card_class()));
        if let Some(image) = &post.featured_image {
            out.push_str(&format!(
                "<img class=\"preview-image\" src=\"{}\" alt=\"{}\">\n",
                escape(image),
                escape(&post.title),
            ));
        }
        out.push_str(&format!(
            "<h3 class=\"preview-title\">{}</h3>\n",
            escape(&post.title)
        ));
        if let Some(date) = &post.published_date {
            out.push_str(&format!(
                "<time class=\"preview-date\">{}</time>\n",
                escape(&format_date(date))
            ));
        }
        let excerpt = post.excerpt.clone().or_else(|| {
            post.content_markdown
                .as_deref()
                .map(|md| markdown_excerpt(md, 100))
        });
        if let Some(excerpt) = excerpt {
            out.push_str(&format!(
                "<p class=\"preview-excerpt\">{}</p>\n",
                escape(&excerpt)
            ));
        }
        out.push_str("</article>\n");
    }
    out.push_str("</div>\n</div>\n</section>\n");
    Some(out)
}

/// Strictly optional like the other engagement sections: a form nobody
/// filled in — no fields, no contact info, no description — renders nothing.
pub fn contact_form(content: &ContactFormContent, ctx: &SectionCtx) -> Option<String> {
    if content.is_empty() {
        return None;
    }

    let mut out = format!(
        "<section id=\"section-contact_form\" class=\"contact-form contact-form-{}\">\n\
         <div class=\"section-inner\">\n",
        ctx.skin.as_str()
    );
    out.push_str(&format!(
        "<h2 class=\"template-section-title\">{}</h2>\n",
        escape(&content.title)
    ));
    if let Some(description) = &content.description {
        out.push_str(&format!(
            "<p class=\"contact-form-description\">{}</p>\n",
            escape(description)
        ));
    }

    // No inputs means no form element; the section may still carry the
    // description and contact info rows.
    if !content.fields.is_empty() {
        out.push_str("<form class=\"contact-form-fields\" data-element-type=\"contact_form\">\n");
        for field in &content.fields {
            let name = escape(field);
            if field == "message" {
                out.push_str(&format!(
                    "<textarea name=\"{name}\" placeholder=\"{name}\" rows=\"5\"></textarea>\n"
                ));
            } else {
                let input_type = if field == "email" { "email" } else { "text" };
                out.push_str(&format!(
                    "<input type=\"{input_type}\" name=\"{name}\" placeholder=\"{name}\">\n"
                ));
            }
        }
        out.push_str(&format!(
            "<button type=\"submit\" data-element-id=\"contact-form-submit\" \
             data-element-type=\"button\">{}</button>\n</form>\n",
            escape(&content.submit_button_text)
        ));
    }

    if !content.info.is_empty() {
        out.push_str("<div class=\"contact-form-info\">\n");
        if let Some(email) = &content.info.email {
            out.push_str(&format!(
                "<p class=\"contact-row\">{}</p>\n",
                tracked_link(
                    &format!("mailto:{email}"),
                    "contact-form-email",
                    "contact_link",
                    email,
                )
            ));
        }
        if let Some(phone) = &content.info.phone {
            out.push_str(&format!("<p class=\"contact-row\">{}</p>\n", escape(phone)));
        }
        if let Some(location) = &content.info.location {
            out.push_str(&format!(
                "<p class=\"contact-row\">{}</p>\n",
                escape(location)
            ));
        }
        for (label, href) in content.info.social.entries() {
            out.push_str(&format!(
                "{}\n",
                tracked_link(
                    &href,
                    &format!("contact-form-{}", label.to_lowercase()),
                    "social_link",
                    label,
                )
            ));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</section>\n");
    Some(out)
}

pub fn footer(content: &FooterContent, ctx: &SectionCtx) -> Option<String> {
    if content.is_empty() {
        return None;
    }

    let mut out = format!(
        "<footer id=\"section-footer\" class=\"site-footer site-footer-{}\">\n\
         <div class=\"section-inner\">\n",
        ctx.skin.as_str()
    );

    if !content.columns.is_empty() {
        out.push_str("<div class=\"footer-columns\">\n");
        for column in &content.columns {
            out.push_str("<div class=\"footer-column\">\n");
            if let Some(title) = &column.title {
                out.push_str(&format!(
                    "<h3 class=\"footer-column-title\">{}</h3>\n",
                    escape(title)
                ));
            }
            for link in &column.links {
                out.push_str(&format!(
                    "{}\n",
                    tracked_link(&link.url, &format!("footer-{}", link.text), "link", &link.text)
                ));
            }
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n");
    }

    if !content.links.is_empty() {
        out.push_str("<nav class=\"footer-links\">\n");
        for link in &content.links {
            out.push_str(&format!(
                "{}\n",
                tracked_link(&link.url, &format!("footer-{}", link.text), "link", &link.text)
            ));
        }
        out.push_str("</nav>\n");
    }

    let social = content.social.entries();
    if !social.is_empty() {
        out.push_str("<div class=\"social-links\">\n");
        for (label, href) in social {
            out.push_str(&format!(
                "{}\n",
                tracked_link(
                    &href,
                    &format!("footer-{}", label.to_lowercase()),
                    "social_link",
                    label,
                )
            ));
        }
        out.push_str("</div>\n");
    }

    if let Some(copyright) = &content.copyright_text {
        out.push_str(&format!(
            "<p class=\"footer-copyright\">{}</p>\n",
            escape(copyright)
        ));
    }
    out.push_str("</div>\n</footer>\n");
    Some(out)
}

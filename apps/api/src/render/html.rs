//! Markup string helpers: escaping and the small markdown subset bios and
//! post bodies are written in.

/// Escapes text for both element content and attribute values.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Converts the small markdown subset used in bios and post bodies to HTML:
/// `#`/`##`/`###` headers, `**bold**`, `*italic*`, `[text](url)`,
/// fenced and inline code. Input is escaped first, so authored HTML stays
/// inert. Everything else becomes paragraphs with line breaks.
pub fn markdown_to_html(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut code_block: Option<Vec<String>> = None;

    let flush_paragraph = |out: &mut String, paragraph: &mut Vec<String>| {
        if paragraph.is_empty() {
            return;
        }
        out.push_str("<p>");
        out.push_str(&paragraph.join("<br>"));
        out.push_str("</p>\n");
        paragraph.clear();
    };

    for raw_line in markdown.lines() {
        let line = raw_line.trim_end();

        if let Some(block) = &mut code_block {
            if line.trim_start().starts_with("```") {
                out.push_str("<pre><code>");
                out.push_str(&escape(&block.join("\n")));
                out.push_str("</code></pre>\n");
                code_block = None;
            } else {
                block.push(line.to_string());
            }
            continue;
        }

        if line.trim_start().starts_with("```") {
            flush_paragraph(&mut out, &mut paragraph);
            code_block = Some(Vec::new());
            continue;
        }

        if line.trim().is_empty() {
            flush_paragraph(&mut out, &mut paragraph);
            continue;
        }

        if let Some(rest) = line.strip_prefix("### ") {
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str(&format!("<h3>{}</h3>\n", inline_markdown(rest)));
        } else if let Some(rest) = line.strip_prefix("## ") {
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str(&format!("<h2>{}</h2>\n", inline_markdown(rest)));
        } else if let Some(rest) = line.strip_prefix("# ") {
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str(&format!("<h1>{}</h1>\n", inline_markdown(rest)));
        } else {
            paragraph.push(inline_markdown(line));
        }
    }

    // An unterminated fence renders as a code block rather than losing text.
    if let Some(block) = code_block {
        out.push_str("<pre><code>");
        out.push_str(&escape(&block.join("\n")));
        out.push_str("</code></pre>\n");
    }
    flush_paragraph(&mut out, &mut paragraph);

    out
}

/// Inline pass: bold, italic, links, inline code, over escaped text.
fn inline_markdown(text: &str) -> String {
    let escaped = escape(text);
    let linked = replace_links(&escaped);
    let bolded = replace_delimited(&linked, "**", "strong");
    let italicized = replace_delimited(&bolded, "*", "em");
    replace_delimited(&italicized, "`", "code")
}

/// Replaces `[text](url)` with an anchor. Operates on escaped input, so the
/// delimiters are literal.
fn replace_links(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if !rest[close..].starts_with("](") {
            out.push_str(&rest[..close + 1]);
            rest = &rest[close + 1..];
            continue;
        }
        let Some(end) = rest[close..].find(')').map(|i| close + i) else {
            break;
        };
        let label = &rest[open + 1..close];
        let url = &rest[close + 2..end];
        out.push_str(&rest[..open]);
        out.push_str(&format!(
            "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a>"
        ));
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}

/// Replaces paired `delim...delim` spans with `<tag>...</tag>`. Unpaired
/// delimiters are left alone.
fn replace_delimited(text: &str, delim: &str, tag: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    loop {
        let Some(open) = rest.find(delim) else {
            out.push_str(rest);
            return out;
        };
        let after = &rest[open + delim.len()..];
        let Some(close) = after.find(delim) else {
            out.push_str(rest);
            return out;
        };
        let inner = &after[..close];
        if inner.is_empty() {
            // "**" alone — emit literally and move on.
            out.push_str(&rest[..open + delim.len()]);
            rest = after;
            continue;
        }
        out.push_str(&rest[..open]);
        out.push_str(&format!("<{tag}>{inner}</{tag}>"));
        rest = &after[close + delim.len()..];
    }
}

/// Formats a stored date string for display: RFC 3339 timestamps and plain
/// `YYYY-MM-DD` dates become `Jan 2, 2025`; anything else passes through
/// verbatim.
pub fn format_date(raw: &str) -> String {
    if let Ok(timestamp) = chrono::DateTime::parse_from_rfc3339(raw) {
        return timestamp.format("%b %-d, %Y").to_string();
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    raw.to_string()
}

/// Strips the same markdown subset for plain-text excerpts, truncating to
/// `limit` characters with an ellipsis.
pub fn markdown_excerpt(markdown: &str, limit: usize) -> String {
    let mut plain = String::new();
    for line in markdown.lines() {
        let line = line.trim_start_matches('#').trim();
        if line.starts_with("```") {
            continue;
        }
        if !line.is_empty() {
            if !plain.is_empty() {
                plain.push(' ');
            }
            plain.push_str(&line.replace("**", "").replace(['*', '`'], ""));
        }
    }
    if plain.chars().count() > limit {
        let cut: String = plain.chars().take(limit).collect();
        format!("{}...", cut.trim_end())
    } else {
        plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(
            escape(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_markdown_headers_and_paragraphs() {
        let html = markdown_to_html("# Title\n\nSome text\nmore text");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Some text<br>more text</p>"));
    }

    #[test]
    fn test_markdown_bold_italic_code() {
        let html = markdown_to_html("**bold** and *em* and `code`");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_markdown_links_open_in_new_tab() {
        let html = markdown_to_html("see [docs](https://example.com)");
        assert!(html.contains(
            "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">docs</a>"
        ));
    }

    #[test]
    fn test_markdown_fenced_code_block_is_escaped() {
        let html = markdown_to_html("```\n<script>alert(1)</script>\n```");
        assert!(html.contains("<pre><code>&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_markdown_unterminated_fence_still_renders() {
        let html = markdown_to_html("```\nlet x = 1;");
        assert!(html.contains("let x = 1;"));
        assert!(html.contains("<pre><code>"));
    }

    #[test]
    fn test_markdown_html_input_stays_inert() {
        let html = markdown_to_html("<img src=x onerror=alert(1)>");
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
    }

    #[test]
    fn test_markdown_empty_input() {
        assert_eq!(markdown_to_html("   "), "");
    }

    #[test]
    fn test_unpaired_delimiters_left_alone() {
        let html = markdown_to_html("3 * 4 is twelve");
        assert!(html.contains("3 * 4 is twelve"));
    }

    #[test]
    fn test_excerpt_strips_and_truncates() {
        let excerpt = markdown_excerpt("# Heading\n**bold** body text", 10);
        assert_eq!(excerpt, "Heading bo...");
    }

    #[test]
    fn test_excerpt_short_text_untouched() {
        assert_eq!(markdown_excerpt("plain", 50), "plain");
    }

    #[test]
    fn test_format_date_rfc3339() {
        assert_eq!(format_date("2025-01-02T10:30:00Z"), "Jan 2, 2025");
    }

    #[test]
    fn test_format_date_plain_date() {
        assert_eq!(format_date("2025-11-30"), "Nov 30, 2025");
    }

    #[test]
    fn test_format_date_passthrough_for_freeform_text() {
        assert_eq!(format_date("last summer"), "last summer");
    }
}

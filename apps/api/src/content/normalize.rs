//! Scalar normalizers over untrusted content values.
//!
//! Contract shared by every function here: accept any `serde_json::Value`,
//! return a best-effort typed result, never panic, never error. Malformed
//! entries are dropped, not replaced with placeholders.

use serde_json::Value;

/// Coerces a value to a trimmed, non-empty string. Numbers and booleans are
/// stringified the way hand-authored content tends to carry them; arrays,
/// objects, and null yield `None`.
pub fn as_text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Looks up `key` in an object value and coerces it with [`as_text`].
pub fn field_text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(as_text)
}

/// First non-empty text among several aliased keys, in order.
pub fn field_text_alias(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| field_text(value, k))
}

pub fn field_f64(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

pub fn field_i64(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        // Counters and ratings arrive as strings often enough to be worth coercing.
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn field_bool(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

/// Normalizes a skills value from any of the shapes the builder and the AI
/// generator produce: an array of strings, an array of `{name, ...}` objects,
/// or a comma-separated string.
///
/// Returns a flat, order-preserving list of non-empty display strings.
/// Duplicates are allowed; blank entries are dropped. Any other shape yields
/// an empty list.
pub fn normalize_skills(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(_) => field_text(item, "name"),
                other => as_text(other),
            })
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pub url: String,
    pub alt: String,
    pub caption: Option<String>,
}

/// Normalizes an image list: entries may be bare URL strings or
/// `{url, alt, caption}` objects. Entries without a string `url` are dropped;
/// a missing `alt` is synthesized as `"Image {n}"` (1-based over the kept
/// entries).
pub fn normalize_images(value: &Value) -> Vec<NormalizedImage> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        _ => return Vec::new(),
    };

    let mut images = Vec::new();
    for item in items {
        let (url, alt, caption) = match item {
            Value::String(_) => match as_text(item) {
                Some(url) => (url, None, None),
                None => continue,
            },
            Value::Object(_) => match field_text(item, "url") {
                Some(url) => (url, field_text(item, "alt"), field_text(item, "caption")),
                None => continue,
            },
            _ => continue,
        };
        let index = images.len() + 1;
        images.push(NormalizedImage {
            url,
            alt: alt.unwrap_or_else(|| format!("Image {index}")),
            caption,
        });
    }
    images
}

/// Validates and normalizes a URL-ish string. A missing scheme gets
/// `https://` prepended; anything that still does not look like an HTTP URL
/// (empty host, embedded whitespace, unsupported scheme) normalizes to
/// `None` — absence, never an error.
pub fn validate_url(value: &Value) -> Option<String> {
    let raw = as_text(value)?;
    if raw.chars().any(char::is_whitespace) {
        return None;
    }

    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw
    } else if raw.contains("://") {
        // Some other scheme (ftp:, javascript:, ...) — not a portfolio link.
        return None;
    } else {
        format!("https://{raw}")
    };

    let rest = with_scheme
        .strip_prefix("https://")
        .or_else(|| with_scheme.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return None;
    }

    Some(with_scheme)
}

/// Validates an email-shaped string: one `@`, non-empty local part, and a
/// dotted domain. Invalid values normalize to `None`.
pub fn validate_email(value: &Value) -> Option<String> {
    let raw = as_text(value)?;
    if raw.chars().any(char::is_whitespace) {
        return None;
    }

    let (local, domain) = raw.split_once('@')?;
    if local.is_empty() || domain.contains('@') {
        return None;
    }
    let (name, tld) = domain.rsplit_once('.')?;
    if name.is_empty() || tld.is_empty() {
        return None;
    }

    Some(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── skills ──

    #[test]
    fn test_skills_from_string_array_drops_blanks() {
        let skills = normalize_skills(&json!(["React", "", "Node.js", "  "]));
        assert_eq!(skills, vec!["React", "Node.js"]);
    }

    #[test]
    fn test_skills_from_tagged_objects() {
        let skills = normalize_skills(&json!([
            {"name": "Rust", "category": "lang", "confidence": 0.9},
            {"name": "  Tokio  "},
            {"category": "orphan"}
        ]));
        assert_eq!(skills, vec!["Rust", "Tokio"]);
    }

    #[test]
    fn test_skills_from_comma_separated_string() {
        let skills = normalize_skills(&json!("Python, Django ,  , SQL"));
        assert_eq!(skills, vec!["Python", "Django", "SQL"]);
    }

    #[test]
    fn test_skills_preserves_order_and_duplicates() {
        let skills = normalize_skills(&json!(["Go", "Rust", "Go"]));
        assert_eq!(skills, vec!["Go", "Rust", "Go"]);
    }

    #[test]
    fn test_skills_from_null_and_wrong_shapes() {
        assert!(normalize_skills(&Value::Null).is_empty());
        assert!(normalize_skills(&json!(42)).is_empty());
        assert!(normalize_skills(&json!({"skills": ["x"]})).is_empty());
    }

    #[test]
    fn test_skills_numbers_in_array_are_stringified() {
        // Mirrors the loosest authored content: numeric entries become text.
        let skills = normalize_skills(&json!(["C", 3]));
        assert_eq!(skills, vec!["C", "3"]);
    }

    // ── images ──

    #[test]
    fn test_images_mixed_shapes() {
        let images = normalize_images(&json!([
            "https://a.example/one.png",
            {"url": "https://a.example/two.png", "alt": "Two"},
            {"alt": "no url"},
            {"url": "https://a.example/three.png", "caption": "cap"}
        ]));
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].alt, "Image 1");
        assert_eq!(images[1].alt, "Two");
        assert_eq!(images[2].alt, "Image 3");
        assert_eq!(images[2].caption.as_deref(), Some("cap"));
    }

    #[test]
    fn test_images_non_array_is_empty() {
        assert!(normalize_images(&json!("https://a.example/x.png")).is_empty());
    }

    // ── urls ──

    #[test]
    fn test_url_adds_https_when_schemeless() {
        assert_eq!(
            validate_url(&json!("example.com/me")),
            Some("https://example.com/me".to_string())
        );
    }

    #[test]
    fn test_url_keeps_existing_scheme() {
        assert_eq!(
            validate_url(&json!("http://example.com")),
            Some("http://example.com".to_string())
        );
    }

    #[test]
    fn test_url_rejects_whitespace_and_empty_host() {
        assert_eq!(validate_url(&json!("not a url")), None);
        assert_eq!(validate_url(&json!("https://")), None);
        assert_eq!(validate_url(&json!("   ")), None);
        assert_eq!(validate_url(&Value::Null), None);
    }

    #[test]
    fn test_url_rejects_foreign_schemes() {
        assert_eq!(validate_url(&json!("javascript://alert(1)")), None);
        assert_eq!(validate_url(&json!("ftp://example.com")), None);
    }

    // ── email ──

    #[test]
    fn test_email_accepts_plain_address() {
        assert_eq!(
            validate_email(&json!("me@example.com")),
            Some("me@example.com".to_string())
        );
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert_eq!(validate_email(&json!("not-an-email")), None);
        assert_eq!(validate_email(&json!("a@b")), None);
        assert_eq!(validate_email(&json!("@example.com")), None);
        assert_eq!(validate_email(&json!("a b@example.com")), None);
        assert_eq!(validate_email(&Value::Null), None);
    }

    // ── scalar coercion ──

    #[test]
    fn test_as_text_coerces_numbers() {
        assert_eq!(as_text(&json!(7)), Some("7".to_string()));
        assert_eq!(as_text(&json!("  x ")), Some("x".to_string()));
        assert_eq!(as_text(&json!([])), None);
    }

    #[test]
    fn test_field_i64_coerces_strings() {
        assert_eq!(field_i64(&json!({"value": "120"}), "value"), Some(120));
        assert_eq!(field_i64(&json!({"value": 120.7}), "value"), Some(120));
        assert_eq!(field_i64(&json!({"value": "n/a"}), "value"), None);
    }

    #[test]
    fn test_field_text_alias_takes_first_present() {
        let v = json!({"github": "a", "github_url": "b"});
        assert_eq!(
            field_text_alias(&v, &["github_url", "github"]),
            Some("b".to_string())
        );
    }
}

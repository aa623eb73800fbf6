//! Template skins — the five fixed visual styles a portfolio can render in.
//!
//! A skin changes styling only, never data shape: class names, default
//! colors, and photo sizing all come from lookup tables keyed here.

use crate::models::portfolio::TemplateConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Skin {
    Classic,
    #[default]
    Modern,
    Minimalist,
    Developer,
    Designer,
}

impl Skin {
    /// Parses a stored `template_type` string; unknown values fall back to
    /// `Modern`.
    pub fn parse(value: &str) -> Skin {
        match value {
            "classic" => Skin::Classic,
            "modern" => Skin::Modern,
            "minimalist" => Skin::Minimalist,
            "developer" => Skin::Developer,
            "designer" => Skin::Designer,
            _ => Skin::Modern,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Classic => "classic",
            Skin::Modern => "modern",
            Skin::Minimalist => "minimalist",
            Skin::Developer => "developer",
            Skin::Designer => "designer",
        }
    }

    pub fn container_class(&self) -> String {
        format!("template-{}", self.as_str())
    }

    pub fn header_class(&self) -> String {
        format!("template-{}-header", self.as_str())
    }

    pub fn section_class(&self) -> String {
        format!("template-{}-section", self.as_str())
    }

    pub fn card_class(&self) -> String {
        format!("template-{}-card", self.as_str())
    }

    /// Profile photo diameter in pixels for the header.
    pub fn photo_size(&self) -> u32 {
        match self {
            Skin::Minimalist => 96,
            Skin::Classic | Skin::Designer => 128,
            Skin::Modern | Skin::Developer => 112,
        }
    }

    pub fn default_colors(&self) -> SkinColors {
        match self {
            Skin::Classic => SkinColors::new("#2563eb", "#64748b", "#ffffff", "#1f2937"),
            Skin::Modern => SkinColors::new("#7c3aed", "#a78bfa", "#0f172a", "#f8fafc"),
            Skin::Minimalist => SkinColors::new("#000000", "#6b7280", "#ffffff", "#000000"),
            Skin::Developer => SkinColors::new("#10b981", "#6ee7b7", "#1e293b", "#f1f5f9"),
            Skin::Designer => SkinColors::new("#f59e0b", "#fbbf24", "#ffffff", "#1f2937"),
        }
    }

    /// Skin defaults with config overrides applied for primary/secondary.
    pub fn resolve_colors(&self, config: &TemplateConfig) -> SkinColors {
        let mut colors = self.default_colors();
        if let Some(primary) = &config.primary_color {
            colors.primary = primary.clone();
        }
        if let Some(secondary) = &config.secondary_color {
            colors.secondary = secondary.clone();
        }
        colors
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
}

impl SkinColors {
    fn new(primary: &str, secondary: &str, background: &str, text: &str) -> Self {
        SkinColors {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            background: background.to_string(),
            text: text.to_string(),
        }
    }
}

/// Parses `#rrggbb` (leading `#` optional) into an RGB triple. Invalid input
/// yields `None` and the caller skips the RGB custom property.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

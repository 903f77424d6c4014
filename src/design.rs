//! Design configuration: template choice, avatar frame and colors.

use serde::{Deserialize, Serialize};

use crate::color::Color;

// ============================================================================
// Variants
// ============================================================================

/// One of the four fixed signature layouts.
///
/// Deserializing an unknown name yields [`TemplateVariant::Modern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum TemplateVariant {
    #[default]
    Modern,
    Classic,
    Minimal,
    Corporate,
}

impl TemplateVariant {
    pub const ALL: [TemplateVariant; 4] = [
        TemplateVariant::Modern,
        TemplateVariant::Classic,
        TemplateVariant::Minimal,
        TemplateVariant::Corporate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Minimal => "minimal",
            Self::Corporate => "corporate",
        }
    }

    /// Parses a variant name, falling back to `modern` for anything unknown.
    pub fn parse_or_default(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                tracing::debug!(name, "Unknown template variant, using modern");
                Self::default()
            })
    }
}

impl From<String> for TemplateVariant {
    fn from(name: String) -> Self {
        Self::parse_or_default(&name)
    }
}

impl From<&str> for TemplateVariant {
    fn from(name: &str) -> Self {
        Self::parse_or_default(name)
    }
}

/// One of the five avatar border treatments.
///
/// Deserializing an unknown name yields [`FrameVariant::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum FrameVariant {
    #[default]
    None,
    Solid,
    Double,
    Dashed,
    Gradient,
}

impl FrameVariant {
    pub const ALL: [FrameVariant; 5] = [
        FrameVariant::None,
        FrameVariant::Solid,
        FrameVariant::Double,
        FrameVariant::Dashed,
        FrameVariant::Gradient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::Double => "double",
            Self::Dashed => "dashed",
            Self::Gradient => "gradient",
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No Frame",
            Self::Solid => "Solid Border",
            Self::Double => "Double Border",
            Self::Dashed => "Dashed Border",
            Self::Gradient => "Modern Gradient",
        }
    }

    /// Parses a variant name, falling back to `none` for anything unknown.
    pub fn parse_or_default(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                tracing::debug!(name, "Unknown frame variant, using none");
                Self::default()
            })
    }
}

impl From<String> for FrameVariant {
    fn from(name: String) -> Self {
        Self::parse_or_default(&name)
    }
}

impl From<&str> for FrameVariant {
    fn from(name: &str) -> Self {
        Self::parse_or_default(name)
    }
}

// ============================================================================
// DesignConfig
// ============================================================================

/// Visual settings for a signature.
///
/// `font_size` is carried for completeness; the layouts use fixed type
/// scales and do not read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct DesignConfig {
    #[serde(alias = "style")]
    pub template: TemplateVariant,
    pub frame: FrameVariant,
    pub frame_color: Color,
    pub accent_color: Color,
    pub text_color: Color,
    pub font_size: u32,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            template: TemplateVariant::Modern,
            frame: FrameVariant::Solid,
            frame_color: Color::rgb(0x25, 0x63, 0xeb),
            accent_color: Color::rgb(0x25, 0x63, 0xeb),
            text_color: Color::rgb(0x1e, 0x29, 0x3b),
            font_size: 14,
        }
    }
}

impl DesignConfig {
    pub fn with_template(mut self, template: TemplateVariant) -> Self {
        self.template = template;
        self
    }

    pub fn with_frame(mut self, frame: FrameVariant) -> Self {
        self.frame = frame;
        self
    }

    /// Sets accent and frame color together, as the color picker does.
    pub fn with_accent(mut self, color: Color) -> Self {
        self.accent_color = color;
        self.frame_color = color;
        self
    }
}

//! Contact fields and the serializable editing session.
//!
//! A [`SessionSnapshot`] captures both records of an editing session in a
//! format that can be written to JSON and loaded back later.
//!
//! # Example
//!
//! ```
//! use signgen_renderer::{ProfileField, ProfileInfo, SessionSnapshot};
//!
//! let mut profile = ProfileInfo::default();
//! ProfileField::Name.set(&mut profile, "Jane Doe");
//!
//! let snapshot = SessionSnapshot::new(profile, Default::default());
//! let json = snapshot.to_json().unwrap();
//!
//! let restored = SessionSnapshot::from_json(&json).unwrap();
//! assert_eq!(restored.profile.name, "Jane Doe");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::avatar::Avatar;
use crate::design::DesignConfig;

// ============================================================================
// ProfileInfo
// ============================================================================

/// The person's contact details shown on the signature.
///
/// Every text field may be empty; nothing is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ProfileInfo {
    pub name: String,
    pub title: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
}

impl Default for ProfileInfo {
    fn default() -> Self {
        Self {
            name: "Alex Johnson".into(),
            title: "Senior Product Designer".into(),
            company: "TechFlow Solutions Inc.".into(),
            phone: "+1 (555) 123-4567".into(),
            email: "alex.j@techflow.com".into(),
            address: "123 Innovation Way, San Francisco, CA".into(),
            website: "www.techflow.com".into(),
            avatar: None,
        }
    }
}

impl ProfileInfo {
    /// A profile with every field empty and no avatar.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            company: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            website: String::new(),
            avatar: None,
        }
    }
}

// ============================================================================
// ProfileField
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profile field `{0}`")]
pub struct UnknownField(pub String);

/// The editable text fields of [`ProfileInfo`], in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Title,
    Company,
    Phone,
    Email,
    Address,
    Website,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Name,
        ProfileField::Title,
        ProfileField::Company,
        ProfileField::Phone,
        ProfileField::Email,
        ProfileField::Address,
        ProfileField::Website,
    ];

    /// Stable identifier, also used as the JSON key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Title => "title",
            Self::Company => "company",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
            Self::Website => "website",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Title => "Job Title",
            Self::Company => "Company",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Address => "Address",
            Self::Website => "Website",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "e.g. Alex Johnson",
            Self::Title => "e.g. Designer",
            Self::Company => "e.g. TechFlow",
            Self::Phone => "+1...",
            Self::Email => "alex@company.com",
            Self::Address => "City, State",
            Self::Website => "www.site.com",
        }
    }

    pub fn get<'a>(&self, profile: &'a ProfileInfo) -> &'a str {
        match self {
            Self::Name => &profile.name,
            Self::Title => &profile.title,
            Self::Company => &profile.company,
            Self::Phone => &profile.phone,
            Self::Email => &profile.email,
            Self::Address => &profile.address,
            Self::Website => &profile.website,
        }
    }

    pub fn set(&self, profile: &mut ProfileInfo, value: impl Into<String>) {
        let slot = match self {
            Self::Name => &mut profile.name,
            Self::Title => &mut profile.title,
            Self::Company => &mut profile.company,
            Self::Phone => &mut profile.phone,
            Self::Email => &mut profile.email,
            Self::Address => &mut profile.address,
            Self::Website => &mut profile.website,
        };
        *slot = value.into();
    }
}

impl FromStr for ProfileField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

// ============================================================================
// SessionSnapshot
// ============================================================================

/// Errors produced while loading a session file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Both records of an editing session.
///
/// # JSON Format
///
/// ```json
/// {
///   "profile": { "name": "Jane Doe", "title": "CTO", "avatar": "data:image/png;base64,..." },
///   "design": { "template": "minimal", "frame": "dashed", "accentColor": "#2563eb" }
/// }
/// ```
///
/// Missing keys take their session-start defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SessionSnapshot {
    pub profile: ProfileInfo,
    pub design: DesignConfig,
}

impl SessionSnapshot {
    pub fn new(profile: ProfileInfo, design: DesignConfig) -> Self {
        Self { profile, design }
    }

    /// Serializes the session to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the session to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a session from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a session file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{FrameVariant, TemplateVariant};
    use pretty_assertions::assert_eq;

    #[test]
    fn field_table_reads_and_writes_every_field() {
        let mut profile = ProfileInfo::blank();
        for field in ProfileField::ALL {
            field.set(&mut profile, format!("value-{}", field.key()));
        }
        for field in ProfileField::ALL {
            assert_eq!(field.get(&profile), format!("value-{}", field.key()));
        }
        assert_eq!(profile.website, "value-website");
    }

    #[test]
    fn field_from_str() {
        assert_eq!("email".parse::<ProfileField>(), Ok(ProfileField::Email));
        assert_eq!(" Phone ".parse::<ProfileField>(), Ok(ProfileField::Phone));
        assert_eq!(
            "avatar".parse::<ProfileField>(),
            Err(UnknownField("avatar".into()))
        );
    }

    #[test]
    fn session_json_format() {
        let snapshot = SessionSnapshot::default();
        let json = snapshot.to_json_pretty().unwrap();

        assert!(json.contains("\"accentColor\": \"#2563eb\""));
        assert!(json.contains("\"template\": \"modern\""));
        assert!(json.contains("\"frame\": \"solid\""));
        assert!(!json.contains("\"avatar\""));
    }

    #[test]
    fn session_roundtrip_with_avatar() {
        use crate::avatar::tests::sample_bytes;

        let mut profile = ProfileInfo::blank();
        profile.name = "Jane Doe".into();
        profile.avatar =
            Some(Avatar::from_bytes(&sample_bytes(image::ImageFormat::Png)).unwrap());
        let design = DesignConfig::default()
            .with_template(TemplateVariant::Corporate)
            .with_frame(FrameVariant::Gradient);

        let snapshot = SessionSnapshot::new(profile, design);
        let restored = SessionSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();

        assert_eq!(restored, snapshot);
    }

    #[test]
    fn empty_session_deserializes_to_defaults() {
        let snapshot = SessionSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot.profile, ProfileInfo::default());
        assert_eq!(snapshot.design, DesignConfig::default());
    }

    #[test]
    fn corrupt_avatar_fails_the_session() {
        let json = r#"{ "profile": { "avatar": "data:image/png;base64,AAAA" } }"#;
        assert!(SessionSnapshot::from_json(json).is_err());
    }
}

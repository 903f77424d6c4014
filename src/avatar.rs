//! Embedded avatar images.
//!
//! An [`Avatar`] holds the uploaded image inline as a `data:` URI so the
//! rendered scene never references an external resource. Uploads are decoded
//! once to prove they are images; formats the rasterizer cannot embed are
//! transcoded to PNG on the way in.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced while accepting or re-reading an avatar.
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("failed to read avatar file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized image data: {0}")]
    Decode(#[from] image::ImageError),

    #[error("malformed data URI: {0}")]
    DataUri(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// An avatar image embedded as a `data:<mime>;base64,<payload>` URI.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Avatar {
    mime: &'static str,
    data_uri: String,
    width: u32,
    height: u32,
}

impl Avatar {
    /// Accepts raw image file bytes.
    ///
    /// PNG, JPEG and GIF are embedded as-is; any other format `image` can
    /// decode is transcoded to PNG. Bytes that are not an image are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AvatarError> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        let (width, height) = (decoded.width(), decoded.height());

        let (mime, payload) = match format {
            ImageFormat::Png => ("image/png", bytes.to_vec()),
            ImageFormat::Jpeg => ("image/jpeg", bytes.to_vec()),
            ImageFormat::Gif => ("image/gif", bytes.to_vec()),
            other => {
                tracing::debug!(format = ?other, "Transcoding avatar to PNG");
                ("image/png", encode_png(&decoded)?)
            }
        };

        Ok(Self {
            mime,
            data_uri: format!("data:{};base64,{}", mime, STANDARD.encode(payload)),
            width,
            height,
        })
    }

    /// Reads and accepts an image file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AvatarError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Parses a previously exported `data:` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, AvatarError> {
        let payload = split_data_uri(uri)?;
        let bytes = STANDARD.decode(payload)?;
        Self::from_bytes(&bytes)
    }

    /// The `data:` URI, suitable for use as an image `href`.
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// The MIME type of the embedded payload.
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Pixel dimensions of the embedded image.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Decodes the embedded payload again from scratch.
    pub fn decode(&self) -> Result<DynamicImage, AvatarError> {
        let payload = split_data_uri(&self.data_uri)?;
        let bytes = STANDARD.decode(payload)?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

impl fmt::Debug for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Avatar")
            .field("mime", &self.mime)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data_uri.len())
            .finish()
    }
}

impl TryFrom<String> for Avatar {
    type Error = AvatarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_data_uri(&value)
    }
}

impl From<Avatar> for String {
    fn from(avatar: Avatar) -> Self {
        avatar.data_uri
    }
}

impl<'de> Deserialize<'de> for Avatar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        Self::try_from(uri).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Avatar {
    fn schema_name() -> String {
        "Avatar".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

/// Returns the base64 payload of a `data:<mime>;base64,<payload>` URI.
fn split_data_uri(uri: &str) -> Result<&str, AvatarError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| AvatarError::DataUri("missing `data:` scheme".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AvatarError::DataUri("missing `,` separator".into()))?;
    if !header.ends_with(";base64") {
        return Err(AvatarError::DataUri("payload is not base64".into()));
    }
    Ok(payload)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, AvatarError> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    pub(crate) fn sample_bytes(format: ImageFormat) -> Vec<u8> {
        let pixels = RgbaImage::from_pixel(8, 6, Rgba([200, 40, 40, 255]));
        let img = DynamicImage::ImageRgba8(pixels);
        // JPEG has no alpha channel
        let img = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
            _ => img,
        };
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        buf
    }

    #[test]
    fn png_is_embedded_verbatim() {
        let bytes = sample_bytes(ImageFormat::Png);
        let avatar = Avatar::from_bytes(&bytes).unwrap();

        assert_eq!(avatar.mime(), "image/png");
        assert_eq!(avatar.dimensions(), (8, 6));
        let expected = format!("data:image/png;base64,{}", STANDARD.encode(&bytes));
        assert_eq!(avatar.data_uri(), expected);
    }

    #[test]
    fn bmp_is_transcoded_to_png() {
        let bytes = sample_bytes(ImageFormat::Bmp);
        let avatar = Avatar::from_bytes(&bytes).unwrap();

        assert_eq!(avatar.mime(), "image/png");
        assert!(avatar.data_uri().starts_with("data:image/png;base64,"));
        assert_eq!(avatar.decode().unwrap().width(), 8);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Avatar::from_bytes(b"definitely not an image").is_err());
        assert!(Avatar::from_bytes(&[]).is_err());
    }

    #[test]
    fn data_uri_roundtrip() {
        let avatar = Avatar::from_bytes(&sample_bytes(ImageFormat::Png)).unwrap();
        let restored = Avatar::from_data_uri(avatar.data_uri()).unwrap();
        assert_eq!(restored, avatar);

        assert!(matches!(
            Avatar::from_data_uri("https://example.com/me.png"),
            Err(AvatarError::DataUri(_))
        ));
        assert!(matches!(
            Avatar::from_data_uri("data:image/png;base64,!!!"),
            Err(AvatarError::Base64(_))
        ));
    }

    #[test]
    fn deserializes_from_owned_json() {
        let avatar = Avatar::from_bytes(&sample_bytes(ImageFormat::Png)).unwrap();
        let json: String = serde_json::to_string(&avatar).unwrap();
        assert_eq!(json, format!("\"{}\"", avatar.data_uri()));

        let restored: Avatar = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, avatar);

        let value = serde_json::Value::String(avatar.data_uri().to_string());
        let from_value: Avatar = serde_json::from_value(value).unwrap();
        assert_eq!(from_value.dimensions(), (8, 6));
    }

    #[test]
    fn deserialize_reports_bad_uri() {
        let json = r#""https://example.com/me.png""#;
        let err = serde_json::from_str::<Avatar>(json).unwrap_err();
        assert!(err.to_string().contains("missing `data:` scheme"));
    }
}

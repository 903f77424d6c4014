//! Capturing the preview as a PNG file.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::avatar::AvatarError;
use crate::color::Color;
use crate::preview::Preview;
use crate::raster::{Rasterizer, RenderError};

const FILE_STEM: &str = "email-signature";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("avatar could not be decoded for capture: {0}")]
    Avatar(#[from] AvatarError),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// File names
// ============================================================================

/// Lowercases `name` and joins its words with `-`.
///
/// Path separators become `-` and other control characters are dropped, so
/// the result is always a single file name component.
///
/// ```
/// use signgen_renderer::slugify_name;
///
/// assert_eq!(slugify_name("  Jane   Doe "), "jane-doe");
/// assert_eq!(slugify_name("R&D / Ops"), "r&d---ops");
/// ```
pub fn slugify_name(name: &str) -> String {
    name.to_lowercase()
        .replace(|c: char| c.is_control() && !c.is_whitespace(), "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .replace(['/', '\\'], "-")
}

/// `email-signature-<slug>.png`, or `email-signature.png` for an empty slug.
pub fn export_file_name(name: &str) -> String {
    let slug = slugify_name(name);
    if slug.is_empty() {
        format!("{}.png", FILE_STEM)
    } else {
        format!("{}-{}.png", FILE_STEM, slug)
    }
}

// ============================================================================
// Capture
// ============================================================================

/// How a preview is turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Output pixels per layout unit.
    pub pixel_ratio: f32,

    /// Opaque fill behind the document; `None` keeps transparency.
    pub background: Option<Color>,

    /// Check that the embedded avatar payload still decodes before capture.
    ///
    /// An [`Avatar`](crate::Avatar) is validated when it is built, and resvg
    /// decodes the data URI from scratch on every render, so this never
    /// changes the pixels. It only surfaces a corrupt payload as
    /// [`ExportError::Avatar`] instead of a silently missing image.
    pub cache_bust: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 2.0,
            background: Some(Color::WHITE),
            cache_bust: true,
        }
    }
}

/// A rasterized preview ready to be written out.
#[derive(Debug, Clone)]
pub struct Capture {
    pub image: RgbaImage,
    pub file_name: String,
}

impl Capture {
    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut buf = Cursor::new(Vec::new());
        self.image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// Writes the PNG into `dir` (created if missing) and returns its path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.to_png()?)?;
        Ok(path)
    }
}

/// Rasterizes `preview` according to `options`.
///
/// With [`ExportOptions::cache_bust`] the avatar payload is decoded once more
/// as a consistency check; the decoded image is discarded.
pub fn capture(
    preview: &Preview,
    options: &ExportOptions,
    rasterizer: &Rasterizer,
) -> Result<Capture, ExportError> {
    if options.cache_bust {
        if let Some(avatar) = preview.avatar() {
            let decoded = avatar.decode()?;
            tracing::debug!(
                width = decoded.width(),
                height = decoded.height(),
                "Re-decoded avatar for capture"
            );
        }
    }

    let svg = preview.to_svg();
    let image = rasterizer.rasterize(&svg, options.pixel_ratio, options.background)?;
    Ok(Capture {
        image,
        file_name: preview.file_name().to_string(),
    })
}

// ============================================================================
// Jobs
// ============================================================================

/// Holds the shared busy flag for as long as a job lives.
#[derive(Debug)]
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, ExportError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::Busy)?;
        Ok(Self { flag: flag.clone() })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// An in-flight export.
///
/// Owns a snapshot of the preview, so edits made while it runs do not leak
/// into the image. The editor reports busy until the job is dropped.
#[derive(Debug)]
pub struct ExportJob {
    preview: Preview,
    options: ExportOptions,
    rasterizer: Arc<Rasterizer>,
    _busy: BusyGuard,
}

impl ExportJob {
    pub(crate) fn start(
        busy: &Arc<AtomicBool>,
        preview: Preview,
        options: ExportOptions,
        rasterizer: Arc<Rasterizer>,
    ) -> Result<Self, ExportError> {
        let guard = BusyGuard::acquire(busy)?;
        Ok(Self {
            preview,
            options,
            rasterizer,
            _busy: guard,
        })
    }

    /// The preview this job captures.
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Captures without saving.
    pub fn capture(&self) -> Result<Capture, ExportError> {
        capture(&self.preview, &self.options, &self.rasterizer)
    }

    /// Captures and writes the PNG into `dir`, consuming the job.
    pub fn run(self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = self.capture()?.save_to(dir)?;
        tracing::info!(path = %path.display(), "Exported signature");
        Ok(path)
    }
}

//! Editing session: owns the profile and design, renders previews, exports.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use image::RgbaImage;

use crate::avatar::{Avatar, AvatarError};
use crate::color::{Color, ColorError, palette_color};
use crate::design::{DesignConfig, FrameVariant, TemplateVariant};
use crate::export::{ExportError, ExportJob, ExportOptions};
use crate::preview::{Preview, render_preview};
use crate::profile::{ProfileField, ProfileInfo, SessionSnapshot};
use crate::raster::{Rasterizer, RenderError};

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`SessionSnapshot`].
pub trait Configurable {
    /// Replaces this instance's state with the snapshot's.
    fn apply_snapshot(&mut self, snapshot: &SessionSnapshot);

    /// Exports the current state as a snapshot.
    fn export_snapshot(&self) -> SessionSnapshot;
}

// ============================================================================
// CacheKey
// ============================================================================

/// Key for cached preview rasters.
///
/// Uses width, height, and scale (as integer bits) to identify unique image sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    width: u32,
    height: u32,
    scale_bits: u32,
}

impl CacheKey {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale_bits: scale.to_bits(),
        }
    }
}

// ============================================================================
// Editor
// ============================================================================

/// One editing session.
///
/// All mutation goes through the update methods, which bump [`version`]
/// when something actually changed. Previews and preview rasters are
/// cached against that version; exports always render fresh.
///
/// [`version`]: Self::version
///
/// # Example
///
/// ```no_run
/// use signgen_renderer::{Editor, ProfileField};
///
/// let mut editor = Editor::new();
/// editor.set_field(ProfileField::Name, "Jane Doe");
/// editor.pick_palette_color(2).unwrap();
///
/// if let Some(path) = editor.export("out") {
///     println!("saved {}", path.display());
/// }
/// ```
pub struct Editor {
    profile: ProfileInfo,
    design: DesignConfig,
    version: u64,
    busy: Arc<AtomicBool>,
    rasterizer: Arc<Rasterizer>,
    preview: Option<Preview>,
    cache: HashMap<CacheKey, (RgbaImage, u64)>,
}

impl Editor {
    /// Starts a session from the default records, with system fonts loaded.
    pub fn new() -> Self {
        Self::with_rasterizer(Arc::new(Rasterizer::new()))
    }

    /// Starts a session sharing an existing rasterizer.
    pub fn with_rasterizer(rasterizer: Arc<Rasterizer>) -> Self {
        Self {
            profile: ProfileInfo::default(),
            design: DesignConfig::default(),
            version: 0,
            busy: Arc::new(AtomicBool::new(false)),
            rasterizer,
            preview: None,
            cache: HashMap::new(),
        }
    }

    pub fn profile(&self) -> &ProfileInfo {
        &self.profile
    }

    pub fn design(&self) -> &DesignConfig {
        &self.design
    }

    /// Incremented on every effective change to the profile or design.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ------------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------------

    /// Applies `update` to the profile. Returns true if it changed.
    pub fn update_profile(&mut self, update: impl FnOnce(&mut ProfileInfo)) -> bool {
        let mut next = self.profile.clone();
        update(&mut next);
        if next == self.profile {
            return false;
        }
        self.profile = next;
        self.invalidate();
        true
    }

    /// Applies `update` to the design. Returns true if it changed.
    pub fn update_design(&mut self, update: impl FnOnce(&mut DesignConfig)) -> bool {
        let mut next = self.design.clone();
        update(&mut next);
        if next == self.design {
            return false;
        }
        self.design = next;
        self.invalidate();
        true
    }

    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update_profile(|p| field.set(p, value))
    }

    pub fn set_template(&mut self, template: TemplateVariant) -> bool {
        self.update_design(|d| d.template = template)
    }

    pub fn set_frame(&mut self, frame: FrameVariant) -> bool {
        self.update_design(|d| d.frame = frame)
    }

    pub fn set_text_color(&mut self, color: Color) -> bool {
        self.update_design(|d| d.text_color = color)
    }

    /// Sets accent and frame color to palette entry `index`.
    pub fn pick_palette_color(&mut self, index: usize) -> Result<bool, ColorError> {
        let color = palette_color(index)?;
        Ok(self.pick_custom_color(color))
    }

    /// Sets accent and frame color to `color`.
    pub fn pick_custom_color(&mut self, color: Color) -> bool {
        self.update_design(|d| {
            d.accent_color = color;
            d.frame_color = color;
        })
    }

    /// Replaces the avatar with an uploaded image file.
    ///
    /// Bytes that do not decode as an image are rejected and the current
    /// avatar is kept.
    pub fn upload_avatar(&mut self, bytes: &[u8]) -> Result<(), AvatarError> {
        match Avatar::from_bytes(bytes) {
            Ok(avatar) => {
                tracing::debug!(
                    mime = avatar.mime(),
                    dimensions = ?avatar.dimensions(),
                    "Accepted avatar upload"
                );
                self.update_profile(|p| p.avatar = Some(avatar));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Rejected avatar upload");
                Err(err)
            }
        }
    }

    pub fn remove_avatar(&mut self) -> bool {
        self.update_profile(|p| p.avatar = None)
    }

    fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.preview = None;
        self.cache.clear();
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// The live preview for the current state.
    pub fn preview(&mut self) -> &Preview {
        if self.preview.is_some() {
            tracing::debug!(version = self.version, "Preview cache hit");
        }
        let (profile, design) = (&self.profile, &self.design);
        self.preview.get_or_insert_with(|| render_preview(profile, design))
    }

    /// Rasterizes the live preview at `scale` on a white background.
    pub fn render(&mut self, scale: f32) -> Result<RgbaImage, RenderError> {
        let version = self.version;
        let size = self.preview().size();
        let key = CacheKey::new(size.width, size.height, scale);

        if let Some((image, stored)) = self.cache.get(&key) {
            if *stored == version {
                tracing::debug!(?key, "Render cache hit");
                return Ok(image.clone());
            }
        }

        let svg = self.preview().to_svg();
        let image = self.rasterizer.rasterize(&svg, scale, Some(Color::WHITE))?;
        self.cache.insert(key, (image.clone(), version));
        Ok(image)
    }

    /// Clears cached previews and rasters.
    pub fn clear_cache(&mut self) {
        self.preview = None;
        self.cache.clear();
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    /// True while an [`ExportJob`] from this editor is alive.
    pub fn is_exporting(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Starts an export of the current state with default options.
    ///
    /// Fails with [`ExportError::Busy`] if a job is already in flight. The
    /// returned job may be run on another thread while editing continues.
    pub fn begin_export(&mut self) -> Result<ExportJob, ExportError> {
        self.begin_export_with(ExportOptions::default())
    }

    pub fn begin_export_with(
        &mut self,
        options: ExportOptions,
    ) -> Result<ExportJob, ExportError> {
        if self.is_exporting() {
            return Err(ExportError::Busy);
        }
        let preview = render_preview(&self.profile, &self.design);
        ExportJob::start(&self.busy, preview, options, self.rasterizer.clone())
    }

    /// Exports into `dir` and returns the written path.
    ///
    /// Failures are logged, not returned; the editor stays usable.
    pub fn export(&mut self, dir: impl AsRef<Path>) -> Option<PathBuf> {
        match self.begin_export().and_then(|job| job.run(dir)) {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::error!(error = %err, "Export failed");
                None
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for Editor {
    fn apply_snapshot(&mut self, snapshot: &SessionSnapshot) {
        let profile = snapshot.profile.clone();
        let design = snapshot.design.clone();
        self.update_profile(|p| *p = profile);
        self.update_design(|d| *d = design);
    }

    fn export_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.profile.clone(), self.design.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::tests::sample_bytes;
    use image::ImageFormat;
    use pretty_assertions::assert_eq;

    fn editor() -> Editor {
        Editor::with_rasterizer(Arc::new(Rasterizer::without_system_fonts()))
    }

    #[test]
    fn starts_from_defaults() {
        let editor = editor();
        assert_eq!(editor.profile(), &ProfileInfo::default());
        assert_eq!(editor.design(), &DesignConfig::default());
        assert_eq!(editor.version(), 0);
        assert!(!editor.is_exporting());
    }

    #[test]
    fn palette_and_custom_colors_set_accent_and_frame() {
        let mut editor = editor();

        assert!(editor.pick_palette_color(2).unwrap());
        assert_eq!(editor.design().accent_color.to_hex(), "#16a34a");
        assert_eq!(editor.design().frame_color.to_hex(), "#16a34a");

        let custom: Color = "#abcdef".parse().unwrap();
        assert!(editor.pick_custom_color(custom));
        assert_eq!(editor.design().accent_color, custom);
        assert_eq!(editor.design().frame_color, custom);

        let before = editor.design().clone();
        assert!(editor.pick_palette_color(42).is_err());
        assert_eq!(editor.design(), &before);
    }

    #[test]
    fn version_bumps_only_on_change() {
        let mut editor = editor();

        assert!(editor.set_field(ProfileField::Name, "Jane Doe"));
        assert_eq!(editor.version(), 1);
        assert!(!editor.set_field(ProfileField::Name, "Jane Doe"));
        assert_eq!(editor.version(), 1);

        assert!(editor.set_template(TemplateVariant::Classic));
        assert!(!editor.set_template(TemplateVariant::Classic));
        assert_eq!(editor.version(), 2);
    }

    #[test]
    fn malformed_upload_keeps_existing_avatar() {
        let mut editor = editor();
        editor.upload_avatar(&sample_bytes(ImageFormat::Png)).unwrap();
        let kept = editor.profile().avatar.clone();
        let version = editor.version();

        assert!(editor.upload_avatar(b"definitely not an image").is_err());
        assert_eq!(editor.profile().avatar, kept);
        assert_eq!(editor.version(), version);

        assert!(editor.remove_avatar());
        assert!(editor.profile().avatar.is_none());
    }

    #[test]
    fn preview_reflects_edits() {
        let mut editor = editor();
        let before = editor.preview().to_svg();

        editor.set_field(ProfileField::Title, "CTO");
        let after = editor.preview().to_svg();

        assert_ne!(before, after);
        assert!(after.contains("CTO"));
    }

    #[test]
    fn render_cache_follows_version() {
        let mut editor = editor();
        let first = editor.render(1.0).unwrap();
        let again = editor.render(1.0).unwrap();
        assert_eq!(first, again);
        assert_eq!(editor.cache.len(), 1);

        editor.render(0.5).unwrap();
        assert_eq!(editor.cache.len(), 2);

        editor.pick_custom_color("#ff0000".parse().unwrap());
        assert!(editor.cache.is_empty());
        editor.render(1.0).unwrap();
        assert_eq!(editor.cache.len(), 1);
    }

    #[test]
    fn busy_flag_lifecycle_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor();

        let job = editor.begin_export().unwrap();
        assert!(editor.is_exporting());
        assert!(matches!(editor.begin_export(), Err(ExportError::Busy)));
        assert!(editor.export(dir.path()).is_none());

        let path = job.run(dir.path()).unwrap();
        assert!(path.exists());
        assert!(!editor.is_exporting());
        assert!(editor.begin_export().is_ok());
    }

    #[test]
    fn busy_flag_cleared_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let mut editor = editor();

        let job = editor.begin_export().unwrap();
        assert!(matches!(job.run(&blocker), Err(ExportError::Io(_))));
        assert!(!editor.is_exporting());

        assert!(editor.export(&blocker).is_none());
        assert!(!editor.is_exporting());
    }

    #[test]
    fn edits_continue_while_job_runs_elsewhere() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor();
        editor.set_field(ProfileField::Name, "Jane Doe");

        let job = editor.begin_export().unwrap();
        let out = dir.path().to_path_buf();
        let handle = std::thread::spawn(move || job.run(out));

        editor.set_field(ProfileField::Name, "Someone Else");
        let path = handle.join().unwrap().unwrap();

        assert_eq!(path.file_name().unwrap(), "email-signature-jane-doe.png");
        assert!(!editor.is_exporting());
    }

    #[test]
    fn end_to_end_export_is_double_size_on_white() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor();
        editor.update_profile(|p| {
            p.name = "Jane Doe".into();
            p.title = "CTO".into();
            p.company = "Acme".into();
        });
        editor.set_template(TemplateVariant::Minimal);
        editor.set_frame(FrameVariant::Dashed);
        editor.upload_avatar(&sample_bytes(ImageFormat::Jpeg)).unwrap();

        let size = editor.preview().size();
        let path = editor.export(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("email-signature-jane-doe.png"));

        let png = image::open(&path).unwrap().to_rgba8();
        assert_eq!(png.dimensions(), (size.width * 2, size.height * 2));
        assert_eq!(png.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn control_characters_in_fields_still_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor();
        editor.update_profile(|p| {
            p.name = "Jane\u{0000} Doe".into();
            p.company = "Acme\u{000B}Corp".into();
            p.website = "acme.example\u{001B}".into();
        });
        editor.set_template(TemplateVariant::Corporate);

        let svg = editor.preview().to_svg();
        assert!(svg.contains("AcmeCorp"));
        assert!(!svg.contains('\u{000B}'));

        let path = editor.begin_export().unwrap().run(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("email-signature-jane-doe.png"));
        assert!(!editor.is_exporting());
    }

    #[test]
    fn corporate_without_avatar_exports_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor();
        editor.set_template(TemplateVariant::Corporate);
        editor.remove_avatar();

        assert!(
            editor
                .preview()
                .document()
                .find_by_attr("data-role", "avatar-placeholder")
                .is_some()
        );
        assert!(editor.export(dir.path()).is_some());
    }

    #[test]
    fn snapshot_round_trip() {
        let mut source = editor();
        source.set_field(ProfileField::Email, "jane@acme.test");
        source.set_frame(FrameVariant::Gradient);
        let snapshot = source.export_snapshot();

        let mut target = editor();
        target.apply_snapshot(&snapshot);
        assert_eq!(target.export_snapshot(), snapshot);
        assert!(target.version() > 0);
    }
}

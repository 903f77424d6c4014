//! signgen-renderer: email signature layouts rendered to SVG and PNG
//!
//! This crate turns a [`ProfileInfo`] and a [`DesignConfig`] into a vector
//! scene using one of four templates, frames the avatar, and exports the
//! result as a 2× PNG on a white background.
//!
//! # Example
//!
//! ```
//! use signgen_renderer::{
//!     DesignConfig, FrameVariant, ProfileInfo, TemplateVariant, render_preview,
//! };
//!
//! let mut profile = ProfileInfo::default();
//! profile.name = "Jane Doe".into();
//!
//! let design = DesignConfig::default()
//!     .with_template(TemplateVariant::Classic)
//!     .with_frame(FrameVariant::Double);
//!
//! let preview = render_preview(&profile, &design);
//! assert!(preview.to_svg().contains("Jane Doe"));
//! assert_eq!(preview.file_name(), "email-signature-jane-doe.png");
//! ```
//!
//! # Sessions
//!
//! The editor state round-trips through [`SessionSnapshot`] with the
//! [`Configurable`] trait:
//!
//! ```
//! use std::sync::Arc;
//! use signgen_renderer::{Configurable, Editor, Rasterizer, SessionSnapshot};
//!
//! let json = r##"{ "profile": { "name": "Jane Doe" }, "design": { "template": "minimal" } }"##;
//! let snapshot = SessionSnapshot::from_json(json).unwrap();
//!
//! let mut editor = Editor::with_rasterizer(Arc::new(Rasterizer::without_system_fonts()));
//! editor.apply_snapshot(&snapshot);
//!
//! let exported = editor.export_snapshot();
//! assert_eq!(exported.profile.name, "Jane Doe");
//! assert_eq!(exported.profile.email, "alex.j@techflow.com");
//! ```

mod avatar;
mod color;
mod design;
mod editor;
mod export;
mod frame;
mod glyph;
mod preview;
mod profile;
mod raster;
mod scene;
mod template;
mod text;

pub use avatar::{Avatar, AvatarError};
pub use color::{ACCENT_PALETTE, Color, ColorError, palette_color};
pub use design::{DesignConfig, FrameVariant, TemplateVariant};
pub use editor::{CacheKey, Configurable, Editor};
pub use export::{
    Capture, ExportError, ExportJob, ExportOptions, capture, export_file_name, slugify_name,
};
pub use frame::render_frame;
pub use glyph::Glyph;
pub use preview::{Preview, render_preview};
pub use profile::{ProfileField, ProfileInfo, SessionError, SessionSnapshot, UnknownField};
pub use raster::{Rasterizer, RenderError};
pub use scene::{Element, Node};
pub use template::{
    Classic, Corporate, Layout, Minimal, Modern, NAME_PLACEHOLDER, Rendered, STAGE_MAX_WIDTH,
    Size, render_signature,
};
pub use text::{Family, TextStyle};

//! Signature layouts.
//!
//! Each [`TemplateVariant`] maps to one [`Layout`] implementation. Layouts are
//! pure projections of `(ProfileInfo, DesignConfig)` onto a scene: they embed
//! the avatar frame, tint icons and dividers with the accent color, and draw
//! body text in the text color.
//!
//! Every contact line is tagged `data-field="<key>"` so callers can tell
//! which fields made it into the output.

mod classic;
mod corporate;
mod minimal;
mod modern;

pub use classic::Classic;
pub use corporate::Corporate;
pub use minimal::Minimal;
pub use modern::Modern;

use crate::color::Color;
use crate::design::{DesignConfig, TemplateVariant};
use crate::glyph::Glyph;
use crate::profile::ProfileInfo;
use crate::scene::Element;
use crate::text::TextStyle;

/// Shown instead of an empty name by layouts that require one.
pub const NAME_PLACEHOLDER: &str = "Your Name";

/// Widest the preview stage lets a signature grow before rows wrap.
pub const STAGE_MAX_WIDTH: f32 = 736.0;

/// Side of the icon drawn before a contact line.
const ICON_SIZE: f32 = 14.0;

/// Space between an icon and its text.
const ICON_GAP: f32 = 8.0;

/// A layout size in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rounds fractional extents up to whole units.
    pub fn ceil(width: f32, height: f32) -> Self {
        Self::new(width.ceil() as u32, height.ceil() as u32)
    }
}

/// Output of a layout: the scene and the box it occupies.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub root: Element,
    pub size: Size,
}

/// A signature layout.
pub trait Layout {
    fn variant(&self) -> TemplateVariant;

    fn render(&self, profile: &ProfileInfo, design: &DesignConfig) -> Rendered;
}

impl TemplateVariant {
    /// The layout implementing this variant.
    pub fn layout(&self) -> &'static dyn Layout {
        match self {
            TemplateVariant::Modern => &Modern,
            TemplateVariant::Classic => &Classic,
            TemplateVariant::Minimal => &Minimal,
            TemplateVariant::Corporate => &Corporate,
        }
    }
}

/// Renders the signature for `design.template`.
pub fn render_signature(profile: &ProfileInfo, design: &DesignConfig) -> Rendered {
    design.template.layout().render(profile, design)
}

fn root_for(variant: TemplateVariant) -> Element {
    Element::new("g").attr("data-template", variant.as_str())
}

fn name_or_placeholder(name: &str) -> &str {
    if name.is_empty() { NAME_PLACEHOLDER } else { name }
}

/// A contact line: icon followed by text, both sharing one line box.
struct IconLine<'a> {
    field: &'static str,
    glyph: Glyph,
    icon_color: Color,
    icon_opacity: f32,
    style: TextStyle,
    text: &'a str,
}

impl<'a> IconLine<'a> {
    fn new(
        field: &'static str,
        glyph: Glyph,
        icon_color: Color,
        style: TextStyle,
        text: &'a str,
    ) -> Self {
        Self {
            field,
            glyph,
            icon_color,
            icon_opacity: 1.0,
            style,
            text,
        }
    }

    fn icon_opacity(mut self, opacity: f32) -> Self {
        self.icon_opacity = opacity;
        self
    }

    fn width(&self) -> f32 {
        ICON_SIZE + ICON_GAP + self.style.measure(self.text)
    }

    fn height(&self) -> f32 {
        self.style.line_height.max(ICON_SIZE)
    }

    fn icon(&self, x: f32, top: f32) -> Element {
        let icon_top = top + (self.height() - ICON_SIZE) / 2.0;
        let mut icon = self.glyph.draw(x, icon_top, ICON_SIZE, self.icon_color);
        if self.icon_opacity < 1.0 {
            icon.set_attr("opacity", crate::scene::num(self.icon_opacity));
        }
        icon
    }

    fn text_element(&self, x: f32, top: f32) -> Element {
        let text_top = top + (self.height() - self.style.line_height) / 2.0;
        self.style.draw(x + ICON_SIZE + ICON_GAP, text_top, self.text)
    }

    fn draw(&self, x: f32, top: f32) -> Element {
        Element::new("g")
            .attr("data-field", self.field)
            .child(self.icon(x, top))
            .child(self.text_element(x, top))
    }
}

/// Stacks lines vertically with `gap` between them; returns the total height.
fn stack_height(heights: impl IntoIterator<Item = f32>, gap: f32) -> f32 {
    let mut total = 0.0;
    let mut count = 0;
    for h in heights {
        total += h;
        count += 1;
    }
    if count > 1 {
        total += gap * (count - 1) as f32;
    }
    total
}

//! Text styles and width estimation.
//!
//! Layouts need widths before anything is rasterized, and the fonts that end
//! up in the bitmap depend on the machine. Widths are therefore estimated
//! from per-character advance classes, which keeps layout sizes identical
//! everywhere.

use crate::color::Color;
use crate::scene::{Element, num};

const SANS: &str = "Inter, Helvetica, Arial, sans-serif";
const SERIF: &str = "Georgia, Times New Roman, serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Sans,
    Serif,
}

/// How a run of text is drawn and measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub line_height: f32,
    pub weight: u16,
    pub family: Family,
    pub italic: bool,
    pub uppercase: bool,
    /// Extra tracking in em.
    pub tracking: f32,
    pub color: Color,
    pub opacity: f32,
}

impl TextStyle {
    pub fn new(size: f32, line_height: f32, color: Color) -> Self {
        Self {
            size,
            line_height,
            weight: 400,
            family: Family::Sans,
            italic: false,
            uppercase: false,
            tracking: 0.0,
            color,
            opacity: 1.0,
        }
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn serif(mut self) -> Self {
        self.family = Family::Serif;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn tracking(mut self, em: f32) -> Self {
        self.tracking = em;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    fn displayed(&self, text: &str) -> String {
        if self.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }

    /// Estimated advance width of `text` in this style.
    pub fn measure(&self, text: &str) -> f32 {
        let shown = self.displayed(text);
        let count = shown.chars().count() as f32;
        let ems: f32 = shown.chars().map(advance).sum();
        let family = match self.family {
            Family::Sans => 1.0,
            Family::Serif => 0.95,
        };
        ems * self.size * family * weight_factor(self.weight) + self.tracking * self.size * count
    }

    /// Baseline offset from the top of this style's line box.
    pub fn baseline(&self) -> f32 {
        (self.line_height - self.size) / 2.0 + self.size * 0.8
    }

    /// Draws `text` with its line box starting at `(x, top)`.
    pub fn draw(&self, x: f32, top: f32, text: &str) -> Element {
        let mut el = Element::new("text")
            .num("x", x)
            .num("y", top + self.baseline())
            .attr(
                "font-family",
                match self.family {
                    Family::Sans => SANS,
                    Family::Serif => SERIF,
                },
            )
            .num("font-size", self.size)
            .attr("font-weight", self.weight.to_string())
            .attr("fill", self.color.to_hex());
        if self.italic {
            el.set_attr("font-style", "italic");
        }
        if self.tracking != 0.0 {
            el.set_attr("letter-spacing", num(self.tracking * self.size));
        }
        if self.opacity < 1.0 {
            el.set_attr("fill-opacity", num(self.opacity));
        }
        el.text(self.displayed(text))
    }
}

/// Advance of a single character in em, for a regular-weight sans face.
fn advance(c: char) -> f32 {
    match c {
        ' ' => 0.28,
        'i' | 'l' | 'j' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.26,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '1' => 0.36,
        'm' | 'w' | 'M' | 'W' | '@' => 0.86,
        c if c.is_ascii_digit() => 0.56,
        c if c.is_uppercase() => 0.68,
        _ => 0.52,
    }
}

fn weight_factor(weight: u16) -> f32 {
    match weight {
        0..=450 => 1.0,
        451..=550 => 1.02,
        551..=650 => 1.05,
        651..=800 => 1.08,
        _ => 1.14,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Color = Color::rgb(0x1e, 0x29, 0x3b);

    #[test]
    fn measure_scales_with_size_and_weight() {
        let regular = TextStyle::new(12.0, 16.0, INK);
        let big = TextStyle::new(24.0, 32.0, INK);
        let bold = regular.weight(700);

        let w = regular.measure("Jane Doe");
        assert!(w > 0.0);
        assert!((big.measure("Jane Doe") - 2.0 * w).abs() < 0.001);
        assert!(bold.measure("Jane Doe") > w);
        assert_eq!(regular.measure(""), 0.0);
    }

    #[test]
    fn uppercase_and_tracking_widen() {
        let base = TextStyle::new(10.0, 15.0, INK);
        assert!(base.uppercase().measure("acme") > base.measure("acme"));
        assert!(base.tracking(0.1).measure("acme") > base.measure("acme"));
    }

    #[test]
    fn draw_emits_styled_text() {
        let el = TextStyle::new(14.0, 20.0, INK)
            .italic()
            .opacity(0.8)
            .uppercase()
            .draw(5.0, 10.0, "cto");

        assert_eq!(el.tag, "text");
        assert_eq!(el.text_content(), "CTO");
        assert_eq!(el.get_attr("font-style"), Some("italic"));
        assert_eq!(el.get_attr("fill"), Some("#1e293b"));
        assert_eq!(el.get_attr("fill-opacity"), Some("0.8"));
        // (20 - 14) / 2 + 14 * 0.8 = 14.2
        assert_eq!(el.get_attr("y"), Some("24.2"));
    }
}

//! Circular avatar frames.

use crate::avatar::Avatar;
use crate::color::Color;
use crate::design::FrameVariant;
use crate::glyph::Glyph;
use crate::scene::{Element, num};

const CLIP_ID: &str = "avatar-clip";
const RING_ID: &str = "avatar-ring";

/// Side of the placeholder silhouette.
const PLACEHOLDER_GLYPH_SIZE: f32 = 40.0;

/// Gradient frame: width of the colored band, then of the white gap.
const RING_WIDTH: f32 = 4.0;
const RING_GAP: f32 = 2.0;

/// Renders a circular avatar of `diameter` units, origin at the top-left of
/// its bounding square.
///
/// Borders are drawn inside the diameter; the image (or the placeholder
/// silhouette when `avatar` is `None`) fills the remaining inner circle.
/// Border elements are tagged `data-role="frame-border"`.
pub fn render_frame(
    avatar: Option<&Avatar>,
    variant: FrameVariant,
    color: Color,
    diameter: f32,
) -> Element {
    let r = diameter / 2.0;
    let mut root = Element::new("g")
        .attr("data-role", "avatar")
        .attr("data-frame", variant.as_str());

    let (inner_r, border) = match variant {
        FrameVariant::None => (r, Vec::new()),
        FrameVariant::Solid => (r - 3.0, vec![ring(r, r - 1.5, 3.0, color)]),
        FrameVariant::Double => {
            let line = 4.0 / 3.0;
            (
                r - 4.0,
                vec![
                    ring(r, r - line / 2.0, line, color),
                    ring(r, r - 4.0 + line / 2.0, line, color),
                ],
            )
        }
        FrameVariant::Dashed => (
            r - 2.0,
            vec![ring(r, r - 1.0, 2.0, color).attr("stroke-dasharray", "6 4")],
        ),
        FrameVariant::Gradient => {
            root.push(Element::new("defs").child(gradient(color)));
            root.push(
                disc(r, r)
                    .attr("fill", format!("url(#{})", RING_ID))
                    .attr("data-role", "frame-border"),
            );
            root.push(disc(r, r - RING_WIDTH).attr("fill", Color::WHITE.to_hex()));
            (r - RING_WIDTH - RING_GAP, Vec::new())
        }
    };

    root.push(
        Element::new("defs").child(
            Element::new("clipPath")
                .attr("id", CLIP_ID)
                .child(disc(r, inner_r)),
        ),
    );
    root.push(content(avatar, r, inner_r));
    root.children(border)
}

fn content(avatar: Option<&Avatar>, c: f32, inner_r: f32) -> Element {
    let clipped = Element::new("g").attr("clip-path", format!("url(#{})", CLIP_ID));
    match avatar {
        Some(avatar) => clipped.child(
            Element::new("image")
                .attr("data-role", "avatar-image")
                .num("x", c - inner_r)
                .num("y", c - inner_r)
                .num("width", inner_r * 2.0)
                .num("height", inner_r * 2.0)
                .attr("preserveAspectRatio", "xMidYMid slice")
                .attr("xlink:href", avatar.data_uri()),
        ),
        None => {
            let half = PLACEHOLDER_GLYPH_SIZE / 2.0;
            clipped
                .attr("data-role", "avatar-placeholder")
                .child(disc(c, inner_r).attr("fill", Color::PLACEHOLDER_FILL.to_hex()))
                .child(Glyph::User.draw(
                    c - half,
                    c - half,
                    PLACEHOLDER_GLYPH_SIZE,
                    Color::PLACEHOLDER_GLYPH,
                ))
        }
    }
}

/// A filled circle centered in a square of side `2 * c`.
fn disc(c: f32, r: f32) -> Element {
    Element::new("circle")
        .num("cx", c)
        .num("cy", c)
        .num("r", r.max(0.0))
}

/// A stroked circle whose stroke is centered on radius `r`.
fn ring(c: f32, r: f32, width: f32, color: Color) -> Element {
    disc(c, r)
        .attr("data-role", "frame-border")
        .attr("fill", "none")
        .attr("stroke", color.to_hex())
        .attr("stroke-width", num(width))
}

/// Diagonal gradient from `color` (bottom-left) to near-white (top-right).
fn gradient(color: Color) -> Element {
    Element::new("linearGradient")
        .attr("id", RING_ID)
        .attr("x1", "0")
        .attr("y1", "1")
        .attr("x2", "1")
        .attr("y2", "0")
        .child(
            Element::new("stop")
                .attr("offset", "0")
                .attr("stop-color", color.to_hex()),
        )
        .child(
            Element::new("stop")
                .attr("offset", "1")
                .attr("stop-color", Color::NEAR_WHITE.to_hex()),
        )
}

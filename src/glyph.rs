//! Line icons drawn next to contact details.
//!
//! Each glyph is authored on a 24×24 grid as stroked outlines and scaled to
//! the requested size when placed.

use crate::color::Color;
use crate::scene::{Element, num};

/// Grid size the glyph outlines are authored on.
const GRID: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Phone,
    Mail,
    Globe,
    MapPin,
    Briefcase,
    User,
}

enum Shape {
    Path(&'static str),
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        rx: f32,
    },
}

impl Glyph {
    fn shapes(&self) -> &'static [Shape] {
        match self {
            Glyph::Phone => &[Shape::Path(
                "M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 \
                 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72 12.84 12.84 0 0 0 \
                 .7 2.81 2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45 \
                 12.84 12.84 0 0 0 2.81.7A2 2 0 0 1 22 16.92z",
            )],
            Glyph::Mail => &[
                Shape::Rect {
                    x: 2.0,
                    y: 4.0,
                    w: 20.0,
                    h: 16.0,
                    rx: 2.0,
                },
                Shape::Path("m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7"),
            ],
            Glyph::Globe => &[
                Shape::Circle {
                    cx: 12.0,
                    cy: 12.0,
                    r: 10.0,
                },
                Shape::Path("M12 2a14.5 14.5 0 0 0 0 20 14.5 14.5 0 0 0 0-20"),
                Shape::Path("M2 12h20"),
            ],
            Glyph::MapPin => &[
                Shape::Path("M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z"),
                Shape::Circle {
                    cx: 12.0,
                    cy: 10.0,
                    r: 3.0,
                },
            ],
            Glyph::Briefcase => &[
                Shape::Rect {
                    x: 2.0,
                    y: 7.0,
                    w: 20.0,
                    h: 14.0,
                    rx: 2.0,
                },
                Shape::Path("M16 21V5a2 2 0 0 0-2-2h-4a2 2 0 0 0-2 2v16"),
            ],
            Glyph::User => &[
                Shape::Path("M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2"),
                Shape::Circle {
                    cx: 12.0,
                    cy: 7.0,
                    r: 4.0,
                },
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Glyph::Phone => "phone",
            Glyph::Mail => "mail",
            Glyph::Globe => "globe",
            Glyph::MapPin => "map-pin",
            Glyph::Briefcase => "briefcase",
            Glyph::User => "user",
        }
    }

    /// Draws the glyph as a `size`×`size` box with its top-left at `(x, y)`.
    pub fn draw(&self, x: f32, y: f32, size: f32, color: Color) -> Element {
        let scale = size / GRID;
        let mut group = Element::new("g")
            .attr("data-glyph", self.name())
            .attr(
                "transform",
                format!("translate({} {}) scale({})", num(x), num(y), num(scale)),
            )
            .attr("fill", "none")
            .attr("stroke", color.to_hex())
            .attr("stroke-width", "2")
            .attr("stroke-linecap", "round")
            .attr("stroke-linejoin", "round");

        for shape in self.shapes() {
            group.push(match shape {
                Shape::Path(d) => Element::new("path").attr("d", *d),
                Shape::Circle { cx, cy, r } => Element::new("circle")
                    .num("cx", *cx)
                    .num("cy", *cy)
                    .num("r", *r),
                Shape::Rect { x, y, w, h, rx } => Element::new("rect")
                    .num("x", *x)
                    .num("y", *y)
                    .num("width", *w)
                    .num("height", *h)
                    .num("rx", *rx),
            });
        }
        group
    }
}

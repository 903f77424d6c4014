//! Bordered card with contact badges under the avatar.

use super::{IconLine, Layout, Rendered, Size, root_for, stack_height};
use crate::color::Color;
use crate::design::{DesignConfig, TemplateVariant};
use crate::frame::render_frame;
use crate::glyph::Glyph;
use crate::profile::ProfileInfo;
use crate::scene::{Element, num};
use crate::text::TextStyle;

const MIN_WIDTH: f32 = 500.0;
const PADDING: f32 = 24.0;
const BORDER: f32 = 1.0;
const RADIUS: f32 = 12.0;
const AVATAR: f32 = 90.0;
const GAP: f32 = 32.0;
const BADGE: f32 = 20.0;
const BADGE_GLYPH: f32 = 14.0 * 0.6;
const BADGE_GAP: f32 = 8.0;
const AVATAR_BADGE_GAP: f32 = 12.0;
const HEADER_MARGIN: f32 = 16.0;
const RULE_PADDING: f32 = 16.0;
const LINE_GAP: f32 = 6.0;

/// Card border and divider are the accent color at reduced alpha.
const BORDER_ALPHA: f32 = 0.2;
const RULE_ALPHA: f32 = 0.1;
const ICON_ALPHA: f32 = 0.5;

pub struct Corporate;

impl Layout for Corporate {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Corporate
    }

    fn render(&self, profile: &ProfileInfo, design: &DesignConfig) -> Rendered {
        let text = design.text_color;
        let accent = design.accent_color;

        let name_style = TextStyle::new(20.0, 28.0, text)
            .weight(900)
            .uppercase()
            .tracking(0.025);
        let title_style = TextStyle::new(12.0, 16.0, accent).weight(700);
        let line_style = TextStyle::new(11.0, 16.5, text);

        let lines = [
            IconLine::new(
                "company",
                Glyph::Briefcase,
                text,
                line_style.weight(700),
                &profile.company,
            )
            .icon_opacity(ICON_ALPHA),
            IconLine::new(
                "address",
                Glyph::MapPin,
                text,
                line_style,
                &profile.address,
            )
            .icon_opacity(ICON_ALPHA),
            IconLine::new(
                "website",
                Glyph::Globe,
                text,
                line_style,
                &profile.website,
            )
            .icon_opacity(ICON_ALPHA),
        ];

        let left_height = AVATAR + AVATAR_BADGE_GAP + BADGE;
        let right_height = name_style.line_height
            + title_style.line_height
            + HEADER_MARGIN
            + BORDER
            + RULE_PADDING
            + stack_height(lines.iter().map(IconLine::height), LINE_GAP);
        let right_width = lines.iter().map(IconLine::width).fold(
            name_style
                .measure(&profile.name)
                .max(title_style.measure(&profile.title)),
            f32::max,
        );

        let inset = PADDING + BORDER;
        let right_x = inset + AVATAR + GAP;
        let width = MIN_WIDTH.max(right_x + right_width + inset);
        let height = inset * 2.0 + left_height.max(right_height);

        let mut root = root_for(TemplateVariant::Corporate);
        root.push(
            Element::new("rect")
                .attr("data-role", "card")
                .num("x", BORDER / 2.0)
                .num("y", BORDER / 2.0)
                .num("width", width - BORDER)
                .num("height", height - BORDER)
                .num("rx", RADIUS)
                .attr("fill", "none")
                .attr("stroke", accent.to_hex())
                .attr("stroke-opacity", num(BORDER_ALPHA))
                .num("stroke-width", BORDER),
        );

        root.push(Element::group_at(inset, inset).child(render_frame(
            profile.avatar.as_ref(),
            design.frame,
            design.frame_color,
            AVATAR,
        )));

        let badges_width = BADGE * 2.0 + BADGE_GAP;
        let badge_x = inset + (AVATAR - badges_width) / 2.0;
        let badge_y = inset + AVATAR + AVATAR_BADGE_GAP;
        root.push(badge("phone", Glyph::Phone, badge_x, badge_y, accent));
        root.push(badge(
            "email",
            Glyph::Mail,
            badge_x + BADGE + BADGE_GAP,
            badge_y,
            accent,
        ));

        let mut top = inset;
        root.push(
            name_style
                .draw(right_x, top, &profile.name)
                .attr("data-field", "name"),
        );
        top += name_style.line_height;
        root.push(
            title_style
                .draw(right_x, top, &profile.title)
                .attr("data-field", "title"),
        );
        top += title_style.line_height + HEADER_MARGIN;

        root.push(
            Element::new("rect")
                .attr("data-role", "divider")
                .num("x", right_x)
                .num("y", top)
                .num("width", width - inset - right_x)
                .num("height", BORDER)
                .attr("fill", accent.to_hex())
                .attr("fill-opacity", num(RULE_ALPHA)),
        );
        top += BORDER + RULE_PADDING;

        for line in &lines {
            if line.field == "website" {
                root.push(website_line(line, right_x, top));
            } else {
                root.push(line.draw(right_x, top));
            }
            top += line.height() + LINE_GAP;
        }

        Rendered {
            root,
            size: Size::ceil(width, height),
        }
    }
}

/// A filled accent disc with a white glyph centered on it.
fn badge(kind: &'static str, glyph: Glyph, x: f32, y: f32, accent: Color) -> Element {
    let r = BADGE / 2.0;
    let offset = (BADGE - BADGE_GLYPH) / 2.0;
    Element::group_at(x, y)
        .attr("data-role", "badge")
        .attr("data-badge", kind)
        .child(
            Element::new("circle")
                .num("cx", r)
                .num("cy", r)
                .num("r", r)
                .attr("fill", accent.to_hex()),
        )
        .child(glyph.draw(offset, offset, BADGE_GLYPH, Color::WHITE))
}

/// The website line, with its text linking to `https://<website>`.
fn website_line(line: &IconLine, x: f32, top: f32) -> Element {
    let link = Element::new("a")
        .attr("xlink:href", format!("https://{}", line.text))
        .child(
            line.text_element(x, top)
                .attr("text-decoration", "underline"),
        );
    Element::new("g")
        .attr("data-field", line.field)
        .child(line.icon(x, top))
        .child(link)
}

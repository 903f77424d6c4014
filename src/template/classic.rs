//! Serif header beside the avatar, full-width rule, wrapping contact row.

use super::{IconLine, Layout, Rendered, STAGE_MAX_WIDTH, Size, name_or_placeholder, root_for};
use crate::design::{DesignConfig, TemplateVariant};
use crate::frame::render_frame;
use crate::glyph::Glyph;
use crate::profile::ProfileInfo;
use crate::scene::Element;
use crate::text::TextStyle;

const MIN_WIDTH: f32 = 400.0;
const AVATAR: f32 = 70.0;
const HEADER_GAP: f32 = 24.0;
const SECTION_GAP: f32 = 16.0;
const RULE_HEIGHT: f32 = 1.0;
const ROW_GAP_X: f32 = 24.0;
const ROW_GAP_Y: f32 = 8.0;

/// Absorbs float drift between summed item widths and the row width.
const WRAP_TOLERANCE: f32 = 0.01;

/// Company, phone and email are always shown, even when empty.
pub struct Classic;

impl Layout for Classic {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Classic
    }

    fn render(&self, profile: &ProfileInfo, design: &DesignConfig) -> Rendered {
        let text = design.text_color;
        let accent = design.accent_color;

        let name_style = TextStyle::new(24.0, 32.0, text).serif().weight(700);
        let title_style = TextStyle::new(14.0, 20.0, text).italic().opacity(0.8);
        let item_style = TextStyle::new(12.0, 16.0, text);

        let name = name_or_placeholder(&profile.name);
        let header_text_height = name_style.line_height + title_style.line_height;
        let header_height = AVATAR.max(header_text_height);
        let header_width = AVATAR
            + HEADER_GAP
            + name_style
                .measure(name)
                .max(title_style.measure(&profile.title));

        let items = [
            IconLine::new(
                "company",
                Glyph::Briefcase,
                accent,
                item_style,
                &profile.company,
            ),
            IconLine::new("phone", Glyph::Phone, accent, item_style, &profile.phone),
            IconLine::new("email", Glyph::Mail, accent, item_style, &profile.email),
        ];
        let single_row = items.iter().map(IconLine::width).sum::<f32>()
            + ROW_GAP_X * (items.len() - 1) as f32;

        let floor = MIN_WIDTH.max(header_width);
        let width = floor.max(single_row.min(STAGE_MAX_WIDTH));
        let rows = wrap(&items, width);

        let row_height = items[0].height();
        let rows_height =
            rows.len() as f32 * row_height + rows.len().saturating_sub(1) as f32 * ROW_GAP_Y;
        let height = header_height + SECTION_GAP + RULE_HEIGHT + SECTION_GAP + rows_height;

        let mut root = root_for(TemplateVariant::Classic);
        root.push(
            Element::group_at(0.0, (header_height - AVATAR) / 2.0).child(render_frame(
                profile.avatar.as_ref(),
                design.frame,
                design.frame_color,
                AVATAR,
            )),
        );

        let text_x = AVATAR + HEADER_GAP;
        let text_top = (header_height - header_text_height) / 2.0;
        root.push(name_style.draw(text_x, text_top, name).attr("data-field", "name"));
        root.push(
            title_style
                .draw(text_x, text_top + name_style.line_height, &profile.title)
                .attr("data-field", "title"),
        );

        let rule_y = header_height + SECTION_GAP;
        root.push(
            Element::new("rect")
                .attr("data-role", "divider")
                .num("x", 0.0)
                .num("y", rule_y)
                .num("width", width)
                .num("height", RULE_HEIGHT)
                .attr("fill", accent.to_hex()),
        );

        let mut top = rule_y + RULE_HEIGHT + SECTION_GAP;
        for row in &rows {
            let mut x = 0.0;
            for &index in row {
                root.push(items[index].draw(x, top));
                x += items[index].width() + ROW_GAP_X;
            }
            top += row_height + ROW_GAP_Y;
        }

        Rendered {
            root,
            size: Size::ceil(width, height),
        }
    }
}

/// Greedily packs items into rows no wider than `max_width`.
///
/// Returns item indices per row; an item wider than `max_width` gets a row
/// of its own.
fn wrap(items: &[IconLine], max_width: f32) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut used = 0.0;
    for (index, item) in items.iter().enumerate() {
        let w = item.width();
        match rows.last_mut() {
            Some(row) if used + ROW_GAP_X + w <= max_width + WRAP_TOLERANCE => {
                row.push(index);
                used += ROW_GAP_X + w;
            }
            _ => {
                rows.push(vec![index]);
                used = w;
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_fields_render_even_when_empty() {
        let rendered = Classic.render(&ProfileInfo::blank(), &DesignConfig::default());

        for key in ["company", "phone", "email"] {
            let line = rendered
                .root
                .field(key)
                .unwrap_or_else(|| panic!("{} missing", key));
            assert_eq!(line.text_content(), "");
        }
        assert_eq!(rendered.root.field("name").unwrap().text_content(), "Your Name");
        assert!(rendered.root.field("title").is_some());
        assert!(rendered.root.field("website").is_none());
    }

    #[test]
    fn divider_spans_full_width() {
        let design = DesignConfig::default();
        let rendered = Classic.render(&ProfileInfo::default(), &design);

        let divider = rendered.root.find_by_attr("data-role", "divider").unwrap();
        assert_eq!(divider.get_attr("fill"), Some("#2563eb"));
        let w: f32 = divider.get_attr("width").unwrap().parse().unwrap();
        assert!((w - rendered.size.width as f32).abs() < 1.0);
    }

    #[test]
    fn name_uses_serif_family() {
        let rendered = Classic.render(&ProfileInfo::default(), &DesignConfig::default());
        let name = rendered.root.field("name").unwrap();
        assert!(name.get_attr("font-family").unwrap().contains("serif"));
        assert_eq!(name.get_attr("font-weight"), Some("700"));
    }

    #[test]
    fn long_values_wrap_onto_new_rows() {
        let mut profile = ProfileInfo::default();
        profile.company = "A".repeat(60);
        profile.email = "someone.with.a.very.long.address@example-company.test".into();

        let short = Classic.render(&ProfileInfo::default(), &DesignConfig::default());
        let long = Classic.render(&profile, &DesignConfig::default());

        assert!(long.size.width as f32 <= STAGE_MAX_WIDTH.max(MIN_WIDTH) + 1.0);
        assert!(long.size.height > short.size.height);
    }

    #[test]
    fn wrap_packs_greedily() {
        let style = TextStyle::new(12.0, 16.0, crate::color::Color::WHITE);
        let items = [
            IconLine::new("a", Glyph::Phone, crate::color::Color::WHITE, style, "aaaa"),
            IconLine::new("b", Glyph::Phone, crate::color::Color::WHITE, style, "bbbb"),
            IconLine::new("c", Glyph::Phone, crate::color::Color::WHITE, style, "cccc"),
        ];
        let one = items[0].width();

        assert_eq!(wrap(&items, 1000.0), vec![vec![0, 1, 2]]);
        assert_eq!(wrap(&items, one * 2.0 + ROW_GAP_X + 0.5), vec![vec![0, 1], vec![2]]);
        assert_eq!(wrap(&items, 1.0), vec![vec![0], vec![1], vec![2]]);
    }
}

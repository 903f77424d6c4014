//! Avatar on the left, accent rule, stacked details on the right.

use super::{IconLine, Layout, Rendered, Size, name_or_placeholder, root_for, stack_height};
use crate::design::{DesignConfig, TemplateVariant};
use crate::frame::render_frame;
use crate::glyph::Glyph;
use crate::profile::ProfileInfo;
use crate::scene::Element;
use crate::text::TextStyle;

const MIN_WIDTH: f32 = 450.0;
const AVATAR: f32 = 100.0;
const GAP: f32 = 32.0;
const RULE_WIDTH: f32 = 2.0;
const PAD_LEFT: f32 = 32.0;
const PAD_Y: f32 = 8.0;
const NAME_MARGIN: f32 = 2.0;
const HEADLINE_MARGIN: f32 = 12.0;
const LINE_GAP: f32 = 6.0;

/// Contact lines appear only for non-empty fields.
pub struct Modern;

impl Layout for Modern {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Modern
    }

    fn render(&self, profile: &ProfileInfo, design: &DesignConfig) -> Rendered {
        let text = design.text_color;
        let accent = design.accent_color;

        let name_style = TextStyle::new(20.0, 28.0, text).weight(700);
        let headline_style = TextStyle::new(14.0, 20.0, text).weight(500).opacity(0.7);
        let line_style = TextStyle::new(12.0, 16.0, text);

        let name = name_or_placeholder(&profile.name);
        let headline = format!("{} @ {}", profile.title, profile.company);

        let lines: Vec<IconLine> = [
            ("phone", Glyph::Phone, profile.phone.as_str()),
            ("email", Glyph::Mail, profile.email.as_str()),
            ("website", Glyph::Globe, profile.website.as_str()),
        ]
        .into_iter()
        .filter(|(_, _, value)| !value.is_empty())
        .map(|(field, glyph, value)| IconLine::new(field, glyph, accent, line_style, value))
        .collect();

        let lines_height = stack_height(lines.iter().map(IconLine::height), LINE_GAP);
        let column_height = PAD_Y
            + name_style.line_height
            + NAME_MARGIN
            + headline_style.line_height
            + HEADLINE_MARGIN
            + lines_height
            + PAD_Y;
        let content_width = lines
            .iter()
            .map(IconLine::width)
            .fold(
                name_style.measure(name).max(headline_style.measure(&headline)),
                f32::max,
            );

        let height = AVATAR.max(column_height);
        let column_x = AVATAR + GAP;
        let column_y = (height - column_height) / 2.0;
        let text_x = column_x + RULE_WIDTH + PAD_LEFT;
        let width = MIN_WIDTH.max(text_x + content_width);

        let mut root = root_for(TemplateVariant::Modern);
        root.push(
            Element::group_at(0.0, (height - AVATAR) / 2.0).child(render_frame(
                profile.avatar.as_ref(),
                design.frame,
                design.frame_color,
                AVATAR,
            )),
        );
        root.push(
            Element::new("rect")
                .attr("data-role", "divider")
                .num("x", column_x)
                .num("y", column_y)
                .num("width", RULE_WIDTH)
                .num("height", column_height)
                .attr("fill", accent.to_hex()),
        );

        let mut top = column_y + PAD_Y;
        root.push(name_style.draw(text_x, top, name).attr("data-field", "name"));
        top += name_style.line_height + NAME_MARGIN;
        root.push(
            headline_style
                .draw(text_x, top, &headline)
                .attr("data-field", "headline"),
        );
        top += headline_style.line_height + HEADLINE_MARGIN;

        for line in &lines {
            root.push(line.draw(text_x, top));
            top += line.height() + LINE_GAP;
        }

        Rendered {
            root,
            size: Size::ceil(width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(profile: &ProfileInfo) -> Rendered {
        Modern.render(profile, &DesignConfig::default())
    }

    #[test]
    fn contact_lines_follow_field_emptiness() {
        let mut profile = ProfileInfo::default();
        let full = render(&profile);
        for key in ["phone", "email", "website"] {
            assert!(full.root.field(key).is_some(), "{} shown", key);
        }

        for key in ["phone", "email", "website"] {
            let mut partial = profile.clone();
            crate::profile::ProfileField::ALL
                .into_iter()
                .find(|f| f.key() == key)
                .unwrap()
                .set(&mut partial, "");
            let rendered = render(&partial);
            assert!(rendered.root.field(key).is_none(), "{} hidden", key);
        }

        profile.phone.clear();
        profile.email.clear();
        profile.website.clear();
        let bare = render(&profile);
        assert!(bare.root.field("phone").is_none());
        assert!(bare.root.field("email").is_none());
        assert!(bare.root.field("website").is_none());
        assert!(bare.size.height < full.size.height);
    }

    #[test]
    fn name_placeholder_and_headline_always_render() {
        let rendered = render(&ProfileInfo::blank());

        assert_eq!(rendered.root.field("name").unwrap().text_content(), "Your Name");
        assert_eq!(rendered.root.field("headline").unwrap().text_content(), " @ ");
    }

    #[test]
    fn headline_joins_title_and_company() {
        let rendered = render(&ProfileInfo::default());
        assert_eq!(
            rendered.root.field("headline").unwrap().text_content(),
            "Senior Product Designer @ TechFlow Solutions Inc."
        );
    }

    #[test]
    fn icons_and_divider_use_accent() {
        let design = DesignConfig::default().with_accent("#9333ea".parse().unwrap());
        let rendered = Modern.render(&ProfileInfo::default(), &design);

        let divider = rendered.root.find_by_attr("data-role", "divider").unwrap();
        assert_eq!(divider.get_attr("fill"), Some("#9333ea"));
        let phone_icon = rendered
            .root
            .field("phone")
            .unwrap()
            .find_by_attr("data-glyph", "phone")
            .unwrap();
        assert_eq!(phone_icon.get_attr("stroke"), Some("#9333ea"));
        let email_text = rendered
            .root
            .field("email")
            .unwrap()
            .find_all(|e| e.tag == "text")[0];
        assert_eq!(email_text.get_attr("fill"), Some("#1e293b"));
    }

    #[test]
    fn minimum_width_and_avatar_height() {
        let rendered = render(&ProfileInfo::blank());
        assert_eq!(rendered.size, Size::new(450, 100));
    }
}

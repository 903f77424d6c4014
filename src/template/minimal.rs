//! Small avatar with a compact text block.

use super::{Layout, Rendered, Size, root_for};
use crate::design::{DesignConfig, TemplateVariant};
use crate::frame::render_frame;
use crate::profile::ProfileInfo;
use crate::scene::Element;
use crate::text::TextStyle;

const MIN_WIDTH: f32 = 350.0;
const AVATAR: f32 = 60.0;
const GAP: f32 = 24.0;
const NAME_COMPANY_GAP: f32 = 8.0;
const HEADER_MARGIN: f32 = 4.0;
const TITLE_MARGIN: f32 = 8.0;
const CONTACT_GAP: f32 = 16.0;

pub struct Minimal;

impl Layout for Minimal {
    fn variant(&self) -> TemplateVariant {
        TemplateVariant::Minimal
    }

    fn render(&self, profile: &ProfileInfo, design: &DesignConfig) -> Rendered {
        let text = design.text_color;
        let accent = design.accent_color;

        let name_style = TextStyle::new(18.0, 28.0, text).weight(700);
        let company_style = TextStyle::new(10.0, 15.0, text)
            .uppercase()
            .tracking(-0.05)
            .opacity(0.5);
        let title_style = TextStyle::new(12.0, 16.0, text).opacity(0.7);
        let contact_style = TextStyle::new(12.0, 16.0, accent).weight(600);

        let company = format!("| {}", profile.company);
        let name_width = name_style.measure(&profile.name);
        let header_width = name_width + NAME_COMPANY_GAP + company_style.measure(&company);
        let phone_width = contact_style.measure(&profile.phone);
        let contact_width = phone_width + CONTACT_GAP + contact_style.measure(&profile.email);
        let column_width = header_width
            .max(title_style.measure(&profile.title))
            .max(contact_width);

        let column_height = name_style.line_height
            + HEADER_MARGIN
            + title_style.line_height
            + TITLE_MARGIN
            + contact_style.line_height;
        let height = AVATAR.max(column_height);
        let text_x = AVATAR + GAP;
        let width = MIN_WIDTH.max(text_x + column_width);

        let mut root = root_for(TemplateVariant::Minimal);
        root.push(
            Element::group_at(0.0, (height - AVATAR) / 2.0).child(render_frame(
                profile.avatar.as_ref(),
                design.frame,
                design.frame_color,
                AVATAR,
            )),
        );

        let mut top = (height - column_height) / 2.0;
        root.push(
            name_style
                .draw(text_x, top, &profile.name)
                .attr("data-field", "name"),
        );
        // Company sits on the name's baseline.
        let company_top = top + name_style.baseline() - company_style.baseline();
        root.push(
            company_style
                .draw(text_x + name_width + NAME_COMPANY_GAP, company_top, &company)
                .attr("data-field", "company"),
        );
        top += name_style.line_height + HEADER_MARGIN;

        root.push(
            title_style
                .draw(text_x, top, &profile.title)
                .attr("data-field", "title"),
        );
        top += title_style.line_height + TITLE_MARGIN;

        root.push(
            contact_style
                .draw(text_x, top, &profile.phone)
                .attr("data-field", "phone"),
        );
        root.push(
            contact_style
                .draw(text_x + phone_width + CONTACT_GAP, top, &profile.email)
                .attr("data-field", "email"),
        );

        Rendered {
            root,
            size: Size::ceil(width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contacts_render_unconditionally_in_accent() {
        let design = DesignConfig::default().with_accent("#16a34a".parse().unwrap());
        let rendered = Minimal.render(&ProfileInfo::blank(), &design);

        for key in ["phone", "email"] {
            let el = rendered.root.field(key).unwrap();
            assert_eq!(el.get_attr("fill"), Some("#16a34a"));
            assert_eq!(el.get_attr("font-weight"), Some("600"));
        }
        assert!(rendered.root.field("website").is_none());
        assert!(rendered.root.field("address").is_none());
    }

    #[test]
    fn name_has_no_placeholder() {
        let rendered = Minimal.render(&ProfileInfo::blank(), &DesignConfig::default());
        assert_eq!(rendered.root.field("name").unwrap().text_content(), "");
    }

    #[test]
    fn company_is_deemphasized_and_shares_the_name_baseline() {
        let rendered = Minimal.render(&ProfileInfo::default(), &DesignConfig::default());
        let name = rendered.root.field("name").unwrap();
        let company = rendered.root.field("company").unwrap();

        assert_eq!(company.text_content(), "| TECHFLOW SOLUTIONS INC.");
        assert_eq!(company.get_attr("fill-opacity"), Some("0.5"));
        assert_eq!(company.get_attr("y"), name.get_attr("y"));
    }

    #[test]
    fn size_for_blank_profile() {
        let rendered = Minimal.render(&ProfileInfo::blank(), &DesignConfig::default());
        // 28 + 4 + 16 + 8 + 16
        assert_eq!(rendered.size, Size::new(350, 72));
    }
}

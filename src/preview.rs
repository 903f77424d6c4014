//! The export container: template output on a padded white card.

use crate::avatar::Avatar;
use crate::color::Color;
use crate::design::DesignConfig;
use crate::export::export_file_name;
use crate::profile::ProfileInfo;
use crate::scene::{Element, svg_document};
use crate::template::{Size, render_signature};

/// Padding around the signature inside the export container.
pub const PADDING: u32 = 16;

/// A complete SVG document ready to display or rasterize.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    document: Element,
    size: Size,
    avatar: Option<Avatar>,
    file_name: String,
}

impl Preview {
    /// The root `<svg>` element.
    pub fn document(&self) -> &Element {
        &self.document
    }

    /// Container size in layout units, padding included.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The avatar embedded in the document, if any.
    pub fn avatar(&self) -> Option<&Avatar> {
        self.avatar.as_ref()
    }

    /// File name the exported image is saved under.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Serializes the document as SVG markup.
    pub fn to_svg(&self) -> String {
        self.document.to_markup()
    }
}

/// Renders the signature and wraps it in the export container.
pub fn render_preview(profile: &ProfileInfo, design: &DesignConfig) -> Preview {
    let rendered = render_signature(profile, design);
    let size = Size::new(
        rendered.size.width + PADDING * 2,
        rendered.size.height + PADDING * 2,
    );

    let body = Element::new("g")
        .attr("data-role", "container")
        .child(
            Element::new("rect")
                .attr("data-role", "background")
                .attr("width", size.width.to_string())
                .attr("height", size.height.to_string())
                .attr("fill", Color::WHITE.to_hex()),
        )
        .child(Element::group_at(PADDING as f32, PADDING as f32).child(rendered.root));

    Preview {
        document: svg_document(size.width, size.height, body),
        size,
        avatar: profile.avatar.clone(),
        file_name: export_file_name(&profile.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::TemplateVariant;

    #[test]
    fn container_pads_the_signature() {
        let profile = ProfileInfo::default();
        for template in TemplateVariant::ALL {
            let design = DesignConfig::default().with_template(template);
            let inner = render_signature(&profile, &design).size;
            let preview = render_preview(&profile, &design);

            assert_eq!(preview.size().width, inner.width + 32);
            assert_eq!(preview.size().height, inner.height + 32);
        }
    }

    #[test]
    fn document_declares_size_and_namespaces() {
        let preview = render_preview(&ProfileInfo::default(), &DesignConfig::default());
        let svg = preview.to_svg();
        let size = preview.size();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
        assert_eq!(
            preview.document().get_attr("viewBox"),
            Some(format!("0 0 {} {}", size.width, size.height).as_str())
        );
    }

    #[test]
    fn background_is_white() {
        let preview = render_preview(&ProfileInfo::default(), &DesignConfig::default());
        let bg = preview
            .document()
            .find_by_attr("data-role", "background")
            .unwrap();
        assert_eq!(bg.get_attr("fill"), Some("#ffffff"));
    }

    #[test]
    fn carries_avatar_and_file_name() {
        let preview = render_preview(&ProfileInfo::default(), &DesignConfig::default());
        assert!(preview.avatar().is_none());
        assert_eq!(preview.file_name(), "email-signature-alex-johnson.png");
    }
}

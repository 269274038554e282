use log::info;

use super::{
    BackgroundElement, BackgroundShape, BookCategory, ImageSpot, PageCategory, PageTemplate,
    PhotobookTemplate, TextArea,
};
use crate::canvas::TextAlign;
use crate::variant::{
    VariantData, design_name_from_options, page_count_from_options, size_from_options,
};

const DEFAULT_FONT_FAMILY: &str = "Poppins";
const PLACEHOLDER_TEXT: &str = "Add Image";

/// Derives a [`PhotobookTemplate`] from purchased-product-variant attributes
/// when no pre-built template is supplied.
///
/// Deterministic: the same variant always yields the same template id and
/// page count. Never fails; absent or malformed option data falls back to
/// defaults, since the editor must not block on bad commerce metadata.
pub struct TemplateGenerator<'a> {
    variant: &'a VariantData,
}

impl<'a> TemplateGenerator<'a> {
    pub fn new(variant: &'a VariantData) -> Self {
        Self { variant }
    }

    pub fn generate(&self) -> PhotobookTemplate {
        let template_id = self.template_id();
        let page_count = page_count_from_options(&self.variant.selected_options);
        info!(
            "generating template {} with {} interior pages",
            template_id, page_count
        );

        PhotobookTemplate {
            id: template_id.clone(),
            name: self.template_name(),
            description: self.description(),
            category: BookCategory::Family,
            cover_template: self.cover_template(&template_id),
            back_cover_template: self.back_cover_template(&template_id),
            pages: (1..=page_count)
                .map(|n| self.page_template(&template_id, n))
                .collect(),
        }
    }

    /// Id built from the sorted, slug-cased option name/value pairs.
    fn template_id(&self) -> String {
        let mut parts: Vec<String> = self
            .variant
            .selected_options
            .iter()
            .map(|opt| format!("{}-{}", slug(&opt.name), slug(&opt.value)))
            .collect();
        parts.sort();
        format!("generated-{}", parts.join("-"))
    }

    fn template_name(&self) -> String {
        match size_from_options(&self.variant.selected_options) {
            Some(size) => format!("{size} Template"),
            None => "Photobook Template".to_string(),
        }
    }

    fn description(&self) -> String {
        match size_from_options(&self.variant.selected_options) {
            Some(size) => format!("Generated photobook template in {size} size"),
            None => "Generated photobook template".to_string(),
        }
    }

    fn cover_template(&self, template_id: &str) -> PageTemplate {
        let design_name = design_name_from_options(&self.variant.selected_options);
        PageTemplate {
            id: format!("cover-{template_id}"),
            name: "Cover Template".to_string(),
            description: "Cover template for photobook".to_string(),
            category: PageCategory::Cover,
            image_spots: vec![ImageSpot {
                id: "cover-main-image".to_string(),
                x: 175.0,
                y: 200.0,
                width: 400.0,
                height: 250.0,
                aspect_ratio: 1.6,
                placeholder_text: PLACEHOLDER_TEXT.to_string(),
                is_required: true,
            }],
            text_areas: vec![
                styled_text_area("cover-title", 375.0, 80.0, 400.0, 60.0, 36.0, design_name, "#333333"),
                styled_text_area(
                    "cover-subtitle",
                    375.0,
                    500.0,
                    400.0,
                    40.0,
                    20.0,
                    "A beautiful collection of memories",
                    "#666666",
                ),
            ],
            background_elements: vec![page_border("cover-border")],
            background_color: "#ffffff".to_string(),
        }
    }

    fn back_cover_template(&self, template_id: &str) -> PageTemplate {
        PageTemplate {
            id: format!("back-cover-{template_id}"),
            name: "Back Cover Template".to_string(),
            description: "Back cover template for photobook".to_string(),
            category: PageCategory::Cover,
            image_spots: vec![ImageSpot {
                id: "back-cover-image".to_string(),
                x: 225.0,
                y: 200.0,
                width: 300.0,
                height: 200.0,
                aspect_ratio: 1.5,
                placeholder_text: PLACEHOLDER_TEXT.to_string(),
                is_required: false,
            }],
            text_areas: vec![styled_text_area(
                "back-cover-text",
                375.0,
                450.0,
                400.0,
                80.0,
                16.0,
                "Back cover placeholder text",
                "#333333",
            )],
            background_elements: Vec::new(),
            background_color: "#ffffff".to_string(),
        }
    }

    /// Interior page `n` (1-based): a 2x2 image-spot grid plus a title and
    /// description pair. Ids are namespaced by page number so spots never
    /// collide across pages.
    fn page_template(&self, template_id: &str, n: usize) -> PageTemplate {
        PageTemplate {
            id: format!("page-{template_id}-{n}"),
            name: format!("Page {n}"),
            description: format!("Page {n} template for photobook"),
            category: PageCategory::Spread,
            image_spots: vec![
                self.page_spot(n, 1, 150.0, 100.0, true),
                self.page_spot(n, 2, 400.0, 100.0, true),
                self.page_spot(n, 3, 150.0, 300.0, false),
                self.page_spot(n, 4, 400.0, 300.0, false),
            ],
            text_areas: vec![
                styled_text_area(
                    &format!("page{n}-title"),
                    375.0,
                    50.0,
                    400.0,
                    40.0,
                    24.0,
                    "Page Title",
                    "#333333",
                ),
                styled_text_area(
                    &format!("page{n}-description"),
                    375.0,
                    500.0,
                    400.0,
                    60.0,
                    16.0,
                    "Add your story here...",
                    "#666666",
                ),
            ],
            background_elements: Vec::new(),
            background_color: "#ffffff".to_string(),
        }
    }

    fn page_spot(&self, page: usize, slot: usize, x: f32, y: f32, required: bool) -> ImageSpot {
        ImageSpot {
            id: format!("page{page}-img{slot}"),
            x,
            y,
            width: 200.0,
            height: 150.0,
            aspect_ratio: 1.33,
            placeholder_text: PLACEHOLDER_TEXT.to_string(),
            is_required: required,
        }
    }
}

/// Convenience wrapper matching the one-shot call sites.
pub fn generate_template_from_variant(variant: &VariantData) -> PhotobookTemplate {
    TemplateGenerator::new(variant).generate()
}

fn slug(value: &str) -> String {
    value.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

fn styled_text_area(
    id: &str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    font_size: f32,
    default_text: &str,
    fill: &str,
) -> TextArea {
    TextArea {
        id: id.to_string(),
        x,
        y,
        width,
        height,
        font_size,
        font_family: DEFAULT_FONT_FAMILY.to_string(),
        fill: fill.to_string(),
        text_align: TextAlign::Center,
        default_text: default_text.to_string(),
        max_length: None,
        is_editable: true,
    }
}

fn page_border(id: &str) -> BackgroundElement {
    BackgroundElement {
        id: id.to_string(),
        shape: BackgroundShape::Rectangle,
        x: 0.0,
        y: 0.0,
        width: Some(750.0),
        height: Some(550.0),
        fill: None,
        stroke: Some("#e5e7eb".to_string()),
        stroke_width: Some(2.0),
        opacity: Some(0.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::SelectedOption;

    fn variant(options: Vec<SelectedOption>) -> VariantData {
        VariantData {
            id: "gid://shopify/ProductVariant/1".to_string(),
            title: "Test Variant".to_string(),
            selected_options: options,
            product_title: "Photobook".to_string(),
            product_handle: "photobook".to_string(),
        }
    }

    #[test]
    fn test_deterministic_id_ignores_option_order() {
        let a = variant(vec![
            SelectedOption::new("Number of Pages", "24 Pages"),
            SelectedOption::new("Size", "8x8"),
        ]);
        let b = variant(vec![
            SelectedOption::new("Size", "8x8"),
            SelectedOption::new("Number of Pages", "24 Pages"),
        ]);
        assert_eq!(
            generate_template_from_variant(&a).id,
            generate_template_from_variant(&b).id
        );
    }

    #[test]
    fn test_page_count_from_option() {
        let template = generate_template_from_variant(&variant(vec![SelectedOption::new(
            "Number of Pages",
            "12 Pages",
        )]));
        assert_eq!(template.pages.len(), 12);
        assert_eq!(template.total_pages(), 14);
    }

    #[test]
    fn test_defaults_on_empty_options() {
        let template = generate_template_from_variant(&variant(Vec::new()));
        assert_eq!(template.pages.len(), 12);
        assert_eq!(template.name, "Photobook Template");
        assert_eq!(template.cover_template.text_areas[0].default_text, "Photobook");
    }

    #[test]
    fn test_spot_ids_namespaced_by_page() {
        let template = generate_template_from_variant(&variant(Vec::new()));
        assert_eq!(template.pages[0].image_spots[0].id, "page1-img1");
        assert_eq!(template.pages[2].image_spots[3].id, "page3-img4");
        assert_eq!(template.pages[2].text_areas[0].id, "page3-title");
    }

    #[test]
    fn test_size_option_feeds_name_and_description() {
        let template = generate_template_from_variant(&variant(vec![SelectedOption::new(
            "Book Size",
            "8x8",
        )]));
        assert_eq!(template.name, "8x8 Template");
        assert!(template.description.contains("8x8"));
    }
}

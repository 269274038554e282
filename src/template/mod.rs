pub mod applicator;
pub mod generator;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, point};

/// A named rectangular placement region awaiting a user image. Coordinates
/// are the region's center. Immutable once defined by a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSpot {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub aspect_ratio: f32,
    pub placeholder_text: String,
    pub is_required: bool,
}

impl ImageSpot {
    pub fn center(&self) -> Point {
        point(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center(), self.width, self.height)
    }
}

/// A named editable text region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextArea {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub font_family: String,
    pub fill: String,
    pub text_align: crate::canvas::TextAlign,
    pub default_text: String,
    pub max_length: Option<usize>,
    pub is_editable: bool,
}

/// Shape of a decorative background element. Only rectangles are drawn by
/// the applicator today; other shapes pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundShape {
    Rectangle,
    Circle,
    Line,
    Image,
}

/// A locked, non-interactive decorative shape drawn once when a template is
/// applied. Never mutated by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundElement {
    pub id: String,
    pub shape: BackgroundShape,
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    pub opacity: Option<f32>,
}

/// Which slot of the book a page template fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageCategory {
    Cover,
    Spread,
    Single,
}

/// Catalog grouping for full-book templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookCategory {
    Family,
    Travel,
    Love,
    Professional,
}

/// A named page layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: PageCategory,
    pub image_spots: Vec<ImageSpot>,
    pub text_areas: Vec<TextArea>,
    pub background_elements: Vec<BackgroundElement>,
    pub background_color: String,
}

impl PageTemplate {
    pub fn image_spot(&self, spot_id: &str) -> Option<&ImageSpot> {
        self.image_spots.iter().find(|spot| spot.id == spot_id)
    }

    pub fn text_area(&self, area_id: &str) -> Option<&TextArea> {
        self.text_areas.iter().find(|area| area.id == area_id)
    }

    /// The image spot (if any) whose region contains the given point.
    pub fn image_spot_at(&self, pos: Point) -> Option<&ImageSpot> {
        self.image_spots.iter().find(|spot| spot.rect().contains(pos))
    }
}

/// A full-book layout: front cover, interior pages, back cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotobookTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: BookCategory,
    pub cover_template: PageTemplate,
    pub back_cover_template: PageTemplate,
    pub pages: Vec<PageTemplate>,
}

impl PhotobookTemplate {
    /// Total visitable pages: interior pages plus front and back cover.
    pub fn total_pages(&self) -> usize {
        self.pages.len() + 2
    }
}

/// Read-only template catalog, injected wherever pre-built templates are
/// offered. Replaces what used to be process-wide static data.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<PhotobookTemplate>,
}

impl TemplateRegistry {
    pub fn new(templates: Vec<PhotobookTemplate>) -> Self {
        Self { templates }
    }

    /// The catalog shipped with the storefront.
    pub fn builtin() -> Self {
        Self::new(vec![classic_family_template()])
    }

    pub fn all(&self) -> &[PhotobookTemplate] {
        &self.templates
    }

    pub fn by_id(&self, id: &str) -> Option<&PhotobookTemplate> {
        self.templates.iter().find(|tpl| tpl.id == id)
    }

    pub fn by_category(&self, category: BookCategory) -> Vec<&PhotobookTemplate> {
        self.templates
            .iter()
            .filter(|tpl| tpl.category == category)
            .collect()
    }
}

fn text_area(
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
        font_family: "Arial".to_string(),
        fill: fill.to_string(),
        text_align: crate::canvas::TextAlign::Center,
        default_text: default_text.to_string(),
        max_length: None,
        is_editable: true,
    }
}

fn image_spot(
    id: &str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    placeholder_text: &str,
    is_required: bool,
) -> ImageSpot {
    ImageSpot {
        id: id.to_string(),
        x,
        y,
        width,
        height,
        aspect_ratio: width / height,
        placeholder_text: placeholder_text.to_string(),
        is_required,
    }
}

fn classic_family_template() -> PhotobookTemplate {
    let cover = PageTemplate {
        id: "classic-family-cover".to_string(),
        name: "Classic Family Cover".to_string(),
        description: "Elegant cover with title and subtitle".to_string(),
        category: PageCategory::Cover,
        image_spots: vec![image_spot(
            "cover-main-image",
            375.0,
            200.0,
            300.0,
            200.0,
            "Add Cover Photo",
            true,
        )],
        text_areas: vec![
            text_area(
                "cover-title",
                375.0,
                350.0,
                400.0,
                60.0,
                36.0,
                "Our Family Story",
                "#333333",
            ),
            text_area(
                "cover-subtitle",
                375.0,
                420.0,
                400.0,
                40.0,
                18.0,
                "A Collection of Memories",
                "#666666",
            ),
        ],
        background_elements: vec![BackgroundElement {
            id: "cover-border".to_string(),
            shape: BackgroundShape::Rectangle,
            x: 0.0,
            y: 0.0,
            width: Some(750.0),
            height: Some(550.0),
            fill: None,
            stroke: Some("#e5e7eb".to_string()),
            stroke_width: Some(2.0),
            opacity: Some(0.5),
        }],
        background_color: "#ffffff".to_string(),
    };

    let back_cover = PageTemplate {
        id: "classic-family-back".to_string(),
        name: "Classic Family Back Cover".to_string(),
        description: "Simple back cover with optional image".to_string(),
        category: PageCategory::Cover,
        image_spots: vec![image_spot(
            "back-cover-image",
            375.0,
            275.0,
            200.0,
            150.0,
            "Add Back Photo (Optional)",
            false,
        )],
        text_areas: vec![text_area(
            "back-cover-text",
            375.0,
            450.0,
            400.0,
            40.0,
            14.0,
            "Made with love",
            "#666666",
        )],
        background_elements: Vec::new(),
        background_color: "#ffffff".to_string(),
    };

    let pages = vec![
        PageTemplate {
            id: "classic-family-page-1".to_string(),
            name: "Classic Family Page 1".to_string(),
            description: "Two-column layout with text".to_string(),
            category: PageCategory::Spread,
            image_spots: vec![
                image_spot("page1-image1", 150.0, 150.0, 200.0, 150.0, "Add Photo 1", true),
                image_spot("page1-image2", 400.0, 150.0, 200.0, 150.0, "Add Photo 2", true),
            ],
            text_areas: vec![text_area(
                "page1-caption",
                375.0,
                400.0,
                400.0,
                40.0,
                18.0,
                "Write a caption",
                "#333333",
            )],
            background_elements: Vec::new(),
            background_color: "#ffffff".to_string(),
        },
        PageTemplate {
            id: "classic-family-page-2".to_string(),
            name: "Classic Family Page 2".to_string(),
            description: "Single large photo with story text".to_string(),
            category: PageCategory::Single,
            image_spots: vec![image_spot(
                "page2-image1",
                375.0,
                220.0,
                400.0,
                280.0,
                "Add Photo",
                true,
            )],
            text_areas: vec![text_area(
                "page2-story",
                375.0,
                470.0,
                500.0,
                60.0,
                16.0,
                "Tell your story",
                "#666666",
            )],
            background_elements: Vec::new(),
            background_color: "#ffffff".to_string(),
        },
    ];

    PhotobookTemplate {
        id: "classic-family".to_string(),
        name: "Classic Family".to_string(),
        description: "Traditional family photobook with elegant layouts".to_string(),
        category: BookCategory::Family,
        cover_template: cover,
        back_cover_template: back_cover,
        pages,
    }
}

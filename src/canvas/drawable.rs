use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Point, Rect};

/// Default uniform scale applied when an image is placed freely on the
/// canvas (25% of its natural size).
pub const DEFAULT_IMAGE_SCALE: f32 = 0.25;

/// Movement/rotation/scaling lock flags carried by template-placed objects.
///
/// Scene deserialization does not guarantee these survive, so persistence
/// reasserts them after every reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Locks {
    pub movement: bool,
    pub rotation: bool,
    pub scaling: bool,
}

impl Locks {
    /// The full lock set used for text areas, background elements and
    /// placeholders.
    pub fn all() -> Self {
        Self {
            movement: true,
            rotation: true,
            scaling: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_fully_locked(&self) -> bool {
        self.movement && self.rotation && self.scaling
    }
}

/// Horizontal text alignment inside a text drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A user image placed on the canvas. Position is the object's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDrawable {
    pub id: Uuid,
    /// Renderable image source (typically a compressed data URL from the
    /// image library collaborator).
    pub src: String,
    pub left: f32,
    pub top: f32,
    /// Natural pixel dimensions learned at decode time.
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub angle: f32,
    pub selectable: bool,
}

impl ImageDrawable {
    pub fn new(src: impl Into<String>, center: Point, width: f32, height: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            src: src.into(),
            left: center.x,
            top: center.y,
            width,
            height,
            scale_x: DEFAULT_IMAGE_SCALE,
            scale_y: DEFAULT_IMAGE_SCALE,
            angle: 0.0,
            selectable: true,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale_x = scale;
        self.scale_y = scale;
        self
    }

    /// The on-canvas bounding rect at the current scale (ignoring rotation).
    pub fn display_rect(&self) -> Rect {
        Rect::from_center_size(
            Point {
                x: self.left,
                y: self.top,
            },
            self.width * self.scale_x,
            self.height * self.scale_y,
        )
    }
}

/// An editable text box. Template-placed text carries its `area_id` so it
/// can be found again after serialization round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDrawable {
    pub id: Uuid,
    pub text: String,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub font_family: String,
    pub fill: String,
    pub text_align: TextAlign,
    pub editable: bool,
    pub selectable: bool,
    pub locks: Locks,
    /// Stable reference to the template text area this box realizes.
    pub area_id: Option<String>,
    /// True while the user is editing text content. Runtime-only state.
    #[serde(skip)]
    pub is_editing: bool,
}

impl TextDrawable {
    pub fn new(text: impl Into<String>, center: Point, font_size: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            left: center.x,
            top: center.y,
            width: 0.0,
            height: 0.0,
            font_size,
            font_family: "Arial".to_string(),
            fill: "#000000".to_string(),
            text_align: TextAlign::Center,
            editable: true,
            selectable: true,
            locks: Locks::all(),
            area_id: None,
            is_editing: false,
        }
    }

    pub fn display_rect(&self) -> Rect {
        // Width defaults to a rough glyph-box estimate when the template
        // did not size the area.
        let width = if self.width > 0.0 {
            self.width
        } else {
            self.text.len() as f32 * self.font_size * 0.5
        };
        let height = if self.height > 0.0 {
            self.height
        } else {
            self.font_size * 1.2
        };
        Rect::from_center_size(
            Point {
                x: self.left,
                y: self.top,
            },
            width,
            height,
        )
    }
}

/// A non-interactive rectangle: template background elements and image-spot
/// placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectDrawable {
    pub id: Uuid,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f32,
    /// Dash/gap lengths for dashed placeholder borders.
    pub stroke_dash: Option<(f32, f32)>,
    pub opacity: f32,
    pub selectable: bool,
    pub evented: bool,
    pub locks: Locks,
    /// Stable reference to the image spot this placeholder marks.
    pub spot_id: Option<String>,
}

impl RectDrawable {
    pub fn new(center: Point, width: f32, height: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            left: center.x,
            top: center.y,
            width,
            height,
            fill: None,
            stroke: None,
            stroke_width: 0.0,
            stroke_dash: None,
            opacity: 1.0,
            selectable: false,
            evented: false,
            locks: Locks::all(),
            spot_id: None,
        }
    }

    pub fn display_rect(&self) -> Rect {
        Rect::from_center_size(
            Point {
                x: self.left,
                y: self.top,
            },
            self.width,
            self.height,
        )
    }
}

/// Label text attached to a placeholder rect. Shares the placeholder's
/// `spot_id` so both are removed together when the spot is filled.
pub fn placeholder_label(
    spot_id: &str,
    center: Point,
    text: impl Into<String>,
) -> TextDrawable {
    let mut label = TextDrawable::new(text, center, 12.0);
    label.fill = "#9ca3af".to_string();
    label.editable = false;
    label.selectable = false;
    label.area_id = Some(format!("placeholder-{spot_id}"));
    label
}

/// A single object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Drawable {
    Image(ImageDrawable),
    Text(TextDrawable),
    Rect(RectDrawable),
}

impl Drawable {
    pub fn id(&self) -> Uuid {
        match self {
            Drawable::Image(i) => i.id,
            Drawable::Text(t) => t.id,
            Drawable::Rect(r) => r.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Drawable::Image(_) => "image",
            Drawable::Text(_) => "text",
            Drawable::Rect(_) => "rect",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Drawable::Image(_))
    }

    pub fn display_rect(&self) -> Rect {
        match self {
            Drawable::Image(i) => i.display_rect(),
            Drawable::Text(t) => t.display_rect(),
            Drawable::Rect(r) => r.display_rect(),
        }
    }

    pub fn selectable(&self) -> bool {
        match self {
            Drawable::Image(i) => i.selectable,
            Drawable::Text(t) => t.selectable,
            Drawable::Rect(r) => r.selectable,
        }
    }

    /// Regenerate the object's uuid, as scene reloads do.
    pub fn regenerate_id(&mut self) {
        let id = Uuid::new_v4();
        match self {
            Drawable::Image(i) => i.id = id,
            Drawable::Text(t) => t.id = id,
            Drawable::Rect(r) => r.id = id,
        }
    }

    pub fn as_image(&self) -> Option<&ImageDrawable> {
        match self {
            Drawable::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageDrawable> {
        match self {
            Drawable::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextDrawable> {
        match self {
            Drawable::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextDrawable> {
        match self {
            Drawable::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<&RectDrawable> {
        match self {
            Drawable::Rect(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    #[test]
    fn test_image_display_rect_uses_scale() {
        let image = ImageDrawable::new("img", point(100.0, 100.0), 400.0, 200.0);
        let rect = image.display_rect();
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
        assert_eq!(rect.center(), point(100.0, 100.0));
    }

    #[test]
    fn test_drawable_scene_round_trip() {
        let drawable = Drawable::Text(TextDrawable::new("Hello", point(375.0, 80.0), 36.0));
        let json = serde_json::to_string(&drawable).unwrap();
        let restored: Drawable = serde_json::from_str(&json).unwrap();
        assert_eq!(drawable, restored);
    }

    #[test]
    fn test_is_editing_not_serialized() {
        let mut text = TextDrawable::new("Hello", point(0.0, 0.0), 12.0);
        text.is_editing = true;
        let json = serde_json::to_string(&Drawable::Text(text)).unwrap();
        let restored: Drawable = serde_json::from_str(&json).unwrap();
        assert!(!restored.as_text().unwrap().is_editing);
    }
}

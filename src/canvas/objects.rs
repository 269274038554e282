use log::{debug, info};
use uuid::Uuid;

use super::drawable::{Drawable, ImageDrawable, Locks, TextDrawable};
use super::surface::CanvasSurface;
use crate::geometry::Point;
use crate::template::{ImageSpot, PageTemplate};
use crate::util::decode_image_source;

/// Font attributes for freely placed text.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_family: String,
    pub fill: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 48.0,
            font_family: "Arial".to_string(),
            fill: "#000000".to_string(),
        }
    }
}

/// Place a user image at the given canvas position.
///
/// Decodes the source to learn its natural dimensions; an undecodable source
/// means the operation never completes (no drawable is added, no error is
/// surfaced, the user can retry). When the position falls inside a still
/// vacant image spot of the current page template, the image is fitted to
/// the spot instead of free placement.
pub fn place_image(
    canvas: &mut dyn CanvasSurface,
    page_template: Option<&PageTemplate>,
    src: &str,
    pos: Point,
) -> Option<Uuid> {
    let decoded = decode_image_source(src)?;
    let (width, height) = (decoded.width() as f32, decoded.height() as f32);

    if let Some(spot) = page_template.and_then(|tpl| tpl.image_spot_at(pos)) {
        if spot_is_vacant(canvas, &spot.id) {
            return Some(fill_spot(canvas, spot, src, width, height));
        }
        debug!("spot {} already filled, placing image freely", spot.id);
    }

    let image = ImageDrawable::new(src, pos, width, height);
    let id = canvas.add(Drawable::Image(image));
    canvas.render_all();
    Some(id)
}

/// Whether the spot's placeholder is still on the canvas.
pub fn spot_is_vacant(canvas: &dyn CanvasSurface, spot_id: &str) -> bool {
    canvas.objects().iter().any(|obj| {
        obj.as_rect()
            .and_then(|rect| rect.spot_id.as_deref())
            .is_some_and(|id| id == spot_id)
    })
}

/// Fill an image spot: remove its placeholder pair and add the image fitted
/// to the spot's box with a uniform scale.
pub fn fill_spot(
    canvas: &mut dyn CanvasSurface,
    spot: &ImageSpot,
    src: &str,
    img_width: f32,
    img_height: f32,
) -> Uuid {
    let scale = (spot.width / img_width).min(spot.height / img_height);
    info!("filling spot {} (scale {:.3})", spot.id, scale);

    remove_placeholder_pair(canvas, &spot.id);

    let image =
        ImageDrawable::new(src, spot.center(), img_width, img_height).with_scale(scale);
    let id = canvas.add(Drawable::Image(image));
    canvas.render_all();
    id
}

fn remove_placeholder_pair(canvas: &mut dyn CanvasSurface, spot_id: &str) {
    let label_id = format!("placeholder-{spot_id}");
    let doomed: Vec<Uuid> = canvas
        .objects()
        .iter()
        .filter(|obj| match obj {
            Drawable::Rect(rect) => rect.spot_id.as_deref() == Some(spot_id),
            Drawable::Text(text) => text.area_id.as_deref() == Some(label_id.as_str()),
            Drawable::Image(_) => false,
        })
        .map(|obj| obj.id())
        .collect();

    for id in doomed {
        canvas.remove(id);
    }
}

/// Add a style-locked editable text box at the given position.
pub fn place_text(
    canvas: &mut dyn CanvasSurface,
    text: &str,
    pos: Point,
    style: &TextStyle,
) -> Uuid {
    let mut drawable = TextDrawable::new(text, pos, style.font_size);
    drawable.font_family = style.font_family.clone();
    drawable.fill = style.fill.clone();
    drawable.locks = Locks::all();
    let id = canvas.add(Drawable::Text(drawable));
    canvas.render_all();
    id
}

/// Remove an object if and only if it is an image. Clears focus when the
/// removed object was active. Returns whether anything was removed.
pub fn delete_object(canvas: &mut dyn CanvasSurface, id: Uuid) -> bool {
    let is_image = canvas.object(id).is_some_and(|obj| obj.is_image());
    if !is_image {
        debug!("delete ignored: {id} is not an image");
        return false;
    }
    canvas.remove(id);
    canvas.discard_active_object();
    canvas.render_all();
    true
}

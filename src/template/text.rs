use log::debug;
use uuid::Uuid;

use super::{PageTemplate, TextArea};
use crate::canvas::{CanvasEvent, CanvasSurface, Drawable, Locks, TextDrawable};
use crate::geometry::point;

/// Find the text object realizing a template text area.
///
/// Lookup is by the stable `area_id` attached at creation time; it survives
/// serialization round-trips, unlike heuristic position/font matching.
pub fn find_area_object(canvas: &dyn CanvasSurface, area_id: &str) -> Option<Uuid> {
    canvas
        .objects()
        .iter()
        .find(|obj| {
            obj.as_text()
                .and_then(|text| text.area_id.as_deref())
                .is_some_and(|id| id == area_id)
        })
        .map(|obj| obj.id())
}

/// Set the text content of a template text area on the current page.
///
/// Updates the existing object when the area has been realized, creating an
/// editable text box from the area definition on first edit. Either way the
/// area's style is reasserted and a modification event fires so thumbnails
/// and persistence stay in sync. Unknown area ids are ignored.
pub fn update_text_in_area(
    canvas: &mut dyn CanvasSurface,
    template: &PageTemplate,
    area_id: &str,
    new_text: &str,
) {
    let Some(area) = template.text_area(area_id) else {
        debug!("update ignored: no text area {area_id} on current template");
        return;
    };
    let text = clamp_to_max_length(area, new_text);

    if let Some(id) = find_area_object(canvas, area_id) {
        if let Some(obj) = canvas.object_mut(id).and_then(|obj| obj.as_text_mut()) {
            obj.text = text;
            obj.font_size = area.font_size;
            obj.font_family = area.font_family.clone();
            obj.fill = area.fill.clone();
            obj.text_align = area.text_align;
            obj.width = area.width;
            obj.height = area.height;
            obj.selectable = true;
            obj.editable = area.is_editable;
            obj.locks = Locks::all();
        }
        canvas.render_all();
        canvas.fire(CanvasEvent::ObjectModified { id });
    } else {
        let mut obj = TextDrawable::new(text, point(area.x, area.y), area.font_size);
        obj.width = area.width;
        obj.height = area.height;
        obj.font_family = area.font_family.clone();
        obj.fill = area.fill.clone();
        obj.text_align = area.text_align;
        obj.selectable = true;
        obj.editable = area.is_editable;
        obj.locks = Locks::all();
        obj.area_id = Some(area.id.clone());
        canvas.add(Drawable::Text(obj));
        canvas.render_all();
    }
}

/// Read the current text of a template text area, falling back to the
/// area's default text when it has not been realized yet.
pub fn text_from_area(canvas: &dyn CanvasSurface, template: &PageTemplate, area_id: &str) -> String {
    let Some(area) = template.text_area(area_id) else {
        return String::new();
    };
    find_area_object(canvas, area_id)
        .and_then(|id| canvas.object(id))
        .and_then(|obj| obj.as_text())
        .map(|text| text.text.clone())
        .unwrap_or_else(|| area.default_text.clone())
}

fn clamp_to_max_length(area: &TextArea, text: &str) -> String {
    match area.max_length {
        Some(max) => text.chars().take(max).collect(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SceneCanvas;
    use crate::template::applicator::apply_to_canvas;
    use crate::template::generator::generate_template_from_variant;
    use crate::variant::VariantData;

    fn page_with_canvas() -> (SceneCanvas, PageTemplate) {
        let template = generate_template_from_variant(&VariantData {
            id: "v1".to_string(),
            title: "t".to_string(),
            selected_options: Vec::new(),
            product_title: "Photobook".to_string(),
            product_handle: "photobook".to_string(),
        });
        let page = template.pages[0].clone();
        let mut canvas = SceneCanvas::new();
        apply_to_canvas(&mut canvas, &page);
        (canvas, page)
    }

    #[test]
    fn test_update_existing_area_object() {
        let (mut canvas, page) = page_with_canvas();
        update_text_in_area(&mut canvas, &page, "page1-title", "Summer 2025");
        assert_eq!(text_from_area(&canvas, &page, "page1-title"), "Summer 2025");

        let id = find_area_object(&canvas, "page1-title").unwrap();
        let obj = canvas.object(id).unwrap().as_text().unwrap();
        assert!(obj.editable);
        assert!(obj.locks.is_fully_locked());
    }

    #[test]
    fn test_default_text_before_first_edit() {
        let (canvas, page) = page_with_canvas();
        assert_eq!(text_from_area(&canvas, &page, "page1-title"), "Page Title");
    }

    #[test]
    fn test_first_edit_creates_object_when_missing() {
        let template = generate_template_from_variant(&VariantData {
            id: "v1".to_string(),
            title: "t".to_string(),
            selected_options: Vec::new(),
            product_title: "Photobook".to_string(),
            product_handle: "photobook".to_string(),
        });
        let page = template.pages[0].clone();
        let mut canvas = SceneCanvas::new();

        update_text_in_area(&mut canvas, &page, "page1-description", "Our trip");
        assert!(find_area_object(&canvas, "page1-description").is_some());
        assert_eq!(text_from_area(&canvas, &page, "page1-description"), "Our trip");
    }

    #[test]
    fn test_unknown_area_is_ignored() {
        let (mut canvas, page) = page_with_canvas();
        let before = canvas.objects().len();
        update_text_in_area(&mut canvas, &page, "nope", "text");
        assert_eq!(canvas.objects().len(), before);
        assert_eq!(text_from_area(&canvas, &page, "nope"), "");
    }
}

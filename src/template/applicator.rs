use log::warn;

use super::{BackgroundShape, PageTemplate, PhotobookTemplate};
use crate::canvas::{
    CanvasSurface, Drawable, Locks, RectDrawable, TextDrawable, placeholder_label,
};
use crate::geometry::point;

/// Resolve which page template governs a page slot: the cover at index 0,
/// the back cover at the last index, otherwise interior page `index - 1`.
///
/// An out-of-range interior index is a contract violation by the caller and
/// resolves to `None` (logged, never a panic).
pub fn resolve_page_template<'a>(
    template: &'a PhotobookTemplate,
    page_index: usize,
    total_pages: usize,
) -> Option<&'a PageTemplate> {
    if page_index == 0 {
        return Some(&template.cover_template);
    }
    if total_pages > 0 && page_index == total_pages - 1 {
        return Some(&template.back_cover_template);
    }
    let interior = page_index - 1;
    match template.pages.get(interior) {
        Some(page) => Some(page),
        None => {
            warn!(
                "no page template for index {} (template has {} interior pages)",
                page_index,
                template.pages.len()
            );
            None
        }
    }
}

/// Build the locked drawables for a page template's background elements and
/// text areas. Only rectangle background shapes are realized.
pub fn background_drawables(template: &PageTemplate) -> Vec<Drawable> {
    let mut drawables = Vec::new();

    for element in &template.background_elements {
        if element.shape != BackgroundShape::Rectangle {
            continue;
        }
        let width = element.width.unwrap_or(0.0);
        let height = element.height.unwrap_or(0.0);
        // Background element coordinates are the top-left corner.
        let mut rect = RectDrawable::new(
            point(element.x + width / 2.0, element.y + height / 2.0),
            width,
            height,
        );
        rect.fill = element.fill.clone();
        rect.stroke = element.stroke.clone();
        rect.stroke_width = element.stroke_width.unwrap_or(0.0);
        rect.opacity = element.opacity.unwrap_or(1.0);
        drawables.push(Drawable::Rect(rect));
    }

    for area in &template.text_areas {
        let mut text = TextDrawable::new(area.default_text.clone(), point(area.x, area.y), area.font_size);
        text.width = area.width;
        text.height = area.height;
        text.font_family = area.font_family.clone();
        text.fill = area.fill.clone();
        text.text_align = area.text_align;
        text.locks = Locks::all();
        // Template text starts non-interactive; editing a text area through
        // the editor makes its object editable.
        text.selectable = false;
        text.editable = false;
        text.area_id = Some(area.id.clone());
        drawables.push(Drawable::Text(text));
    }

    drawables
}

/// Build the placeholder pair (dashed rect + centered label) for each image
/// spot. Both carry the spot id so filling the spot removes them together.
pub fn placeholder_drawables(template: &PageTemplate) -> Vec<Drawable> {
    let mut drawables = Vec::new();

    for spot in &template.image_spots {
        let mut rect = RectDrawable::new(spot.center(), spot.width, spot.height);
        rect.fill = Some("#f3f4f6".to_string());
        rect.stroke = Some("#d1d5db".to_string());
        rect.stroke_width = 2.0;
        rect.stroke_dash = Some((5.0, 5.0));
        rect.spot_id = Some(spot.id.clone());
        drawables.push(Drawable::Rect(rect));
        drawables.push(Drawable::Text(placeholder_label(
            &spot.id,
            spot.center(),
            spot.placeholder_text.clone(),
        )));
    }

    drawables
}

/// Clear the canvas and populate it with a page template's starting layout.
///
/// Must run exactly once per page, only the first time that page is visited;
/// re-running it would destroy user edits saved for the page. The
/// orchestrator enforces this with its visited-page set.
pub fn apply_to_canvas(canvas: &mut dyn CanvasSurface, template: &PageTemplate) {
    canvas.clear();
    canvas.set_background_color(&template.background_color);
    canvas.render_all();

    for drawable in background_drawables(template) {
        canvas.add(drawable);
    }
    for drawable in placeholder_drawables(template) {
        canvas.add(drawable);
    }
    canvas.render_all();
}

/// Resolve a page slot and apply its template. Returns the applied page
/// template so the caller can record it as the page's current template.
pub fn apply_to_page_index<'a>(
    canvas: &mut dyn CanvasSurface,
    template: &'a PhotobookTemplate,
    page_index: usize,
    total_pages: usize,
) -> Option<&'a PageTemplate> {
    let page_template = resolve_page_template(template, page_index, total_pages)?;
    apply_to_canvas(canvas, page_template);
    Some(page_template)
}

use image::{Rgba, RgbaImage};
use photobook_editor::canvas::keyboard::Key;
use photobook_editor::canvas::objects::TextStyle;
use photobook_editor::canvas::CanvasSurface;
use photobook_editor::editor::PhotobookEditor;
use photobook_editor::geometry::point;
use photobook_editor::util::encode_png_data_url;
use photobook_editor::variant::{SelectedOption, VariantData};
use uuid::Uuid;

fn editor_on_page(page_index: usize) -> PhotobookEditor {
    let variant = VariantData {
        id: "gid://shopify/ProductVariant/1".to_string(),
        title: "Test Variant".to_string(),
        selected_options: vec![SelectedOption::new("Pages", "4 Pages")],
        product_title: "Custom Photobook".to_string(),
        product_handle: "custom-photobook".to_string(),
    };
    let mut editor = PhotobookEditor::new(variant);
    editor.initialize_template(None).unwrap();
    if page_index != 0 {
        editor.switch_to_page(page_index).unwrap();
        editor.settle().unwrap();
    }
    editor
}

fn png(width: u32, height: u32) -> String {
    encode_png_data_url(&RgbaImage::from_pixel(width, height, Rgba([0, 0, 255, 255]))).unwrap()
}

fn angle_of(editor: &PhotobookEditor, id: Uuid) -> f32 {
    let canvas = editor.canvas();
    let canvas = canvas.borrow();
    canvas.object(id).unwrap().as_image().unwrap().angle
}

#[test]
fn test_drop_into_vacant_spot_snaps_and_scales() {
    // Interior page 3 (index 3), spot page3-img1 centered at (150, 100),
    // 200x150 box
    let mut editor = editor_on_page(3);
    let id = editor.add_image_at(&png(400, 600), point(150.0, 100.0)).unwrap();

    let canvas = editor.canvas();
    let canvas = canvas.borrow();
    let image = canvas.object(id).unwrap().as_image().unwrap();
    // Uniform fit: min(200/400, 150/600)
    assert_eq!(image.scale_x, 0.25);
    assert_eq!(image.scale_y, 0.25);
    let center = canvas.object(id).unwrap().display_rect().center();
    assert_eq!((center.x, center.y), (150.0, 100.0));
    // Placeholder pair for the spot is gone
    assert!(!canvas.objects().iter().any(|obj| {
        obj.as_rect().is_some_and(|r| r.spot_id.as_deref() == Some("page3-img1"))
    }));
}

#[test]
fn test_drop_on_filled_spot_places_freely() {
    let mut editor = editor_on_page(3);
    editor.add_image_at(&png(400, 600), point(150.0, 100.0)).unwrap();
    let second = editor.add_image_at(&png(100, 100), point(150.0, 100.0)).unwrap();

    let canvas = editor.canvas();
    let canvas = canvas.borrow();
    let image = canvas.object(second).unwrap().as_image().unwrap();
    // Default free-placement scale, not a spot fit
    assert_eq!(image.scale_x, 0.25);
    assert_eq!(image.width, 100.0);
    let center = canvas.object(second).unwrap().display_rect().center();
    assert_eq!((center.x, center.y), (150.0, 100.0));
}

#[test]
fn test_undecodable_source_places_nothing() {
    let mut editor = editor_on_page(0);
    let before = {
        let canvas = editor.canvas();
        let len = canvas.borrow().objects().len();
        len
    };
    assert!(editor.add_image_at("data:image/png;base64,not-a-png", point(600.0, 450.0)).is_none());
    let canvas = editor.canvas();
    assert_eq!(canvas.borrow().objects().len(), before);
}

#[test]
fn test_rotate_button_steps_with_fine_snap() {
    let mut editor = editor_on_page(0);
    let id = editor.add_image_at(&png(50, 50), point(600.0, 450.0)).unwrap();
    editor.focus_object(id);

    editor.rotate_focused();
    assert_eq!(angle_of(&editor, id), 90.0);

    // From an off-grid angle the step lands back on the 15-degree grid
    editor.drag_rotate_focused(37.0);
    assert_eq!(angle_of(&editor, id), 37.0);
    editor.rotate_focused();
    assert_eq!(angle_of(&editor, id), 120.0);
}

#[test]
fn test_rotate_step_wraps_past_full_turn() {
    let mut editor = editor_on_page(0);
    let id = editor.add_image_at(&png(50, 50), point(600.0, 450.0)).unwrap();
    editor.focus_object(id);

    // Five 53-degree steps reach 265; one click from there must wrap
    // to 0, never land on 360.
    for _ in 0..5 {
        editor.precise_rotate_focused(53.0);
    }
    assert_eq!(angle_of(&editor, id), 265.0);

    editor.rotate_focused();
    assert_eq!(angle_of(&editor, id), 0.0);
}

#[test]
fn test_drag_rotation_snaps_near_cardinals() {
    let mut editor = editor_on_page(0);
    let id = editor.add_image_at(&png(50, 50), point(600.0, 450.0)).unwrap();
    editor.focus_object(id);

    editor.drag_rotate_focused(87.0);
    assert_eq!(angle_of(&editor, id), 90.0);

    editor.drag_rotate_focused(75.0);
    assert_eq!(angle_of(&editor, id), 75.0);

    editor.drag_rotate_focused(355.0);
    assert_eq!(angle_of(&editor, id), 0.0);
}

#[test]
fn test_reset_restores_default_transform() {
    let mut editor = editor_on_page(0);
    let id = editor.add_image_at(&png(50, 50), point(600.0, 450.0)).unwrap();
    editor.focus_object(id);
    editor.drag_rotate_focused(45.0);
    editor.reset_focused_transform();

    let canvas = editor.canvas();
    let canvas = canvas.borrow();
    let image = canvas.object(id).unwrap().as_image().unwrap();
    assert_eq!(image.angle, 0.0);
    assert_eq!(image.scale_x, 0.25);
    assert_eq!(image.scale_y, 0.25);
}

#[test]
fn test_delete_key_removes_focused_image_only() {
    let mut editor = editor_on_page(0);
    let image_id = editor.add_image_at(&png(50, 50), point(600.0, 450.0)).unwrap();
    let text_id = editor.add_text_at("Hello", point(500.0, 500.0), &TextStyle::default());

    // Text is never deletable
    editor.focus_object(text_id);
    editor.handle_key(Key::Backspace);
    {
        let canvas = editor.canvas();
        assert!(canvas.borrow().object(text_id).is_some());
    }

    editor.focus_object(image_id);
    editor.handle_key(Key::Delete);
    let canvas = editor.canvas();
    let canvas = canvas.borrow();
    assert!(canvas.object(image_id).is_none());
    assert!(canvas.active_object().is_none());
}

#[test]
fn test_escape_clears_focus() {
    let mut editor = editor_on_page(0);
    let id = editor.add_image_at(&png(50, 50), point(600.0, 450.0)).unwrap();
    editor.focus_object(id);
    assert_eq!(editor.focused_object(), Some(id));

    editor.handle_key(Key::Escape);
    assert_eq!(editor.focused_object(), None);
}

#[test]
fn test_template_text_updates_by_stable_area_id() {
    let mut editor = editor_on_page(3);
    editor.update_text_area("page3-title", "Summer 2025");
    assert_eq!(editor.text_in_area("page3-title").as_deref(), Some("Summer 2025"));

    // Unknown areas are ignored
    editor.update_text_area("no-such-area", "x");
    assert_eq!(editor.text_in_area("no-such-area"), None);
}

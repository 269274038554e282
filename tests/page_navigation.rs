use image::{Rgba, RgbaImage};
use photobook_editor::canvas::CanvasSurface;
use photobook_editor::editor::PhotobookEditor;
use photobook_editor::geometry::point;
use photobook_editor::util::encode_png_data_url;
use photobook_editor::variant::{SelectedOption, VariantData};

fn variant(pages: &str) -> VariantData {
    VariantData {
        id: "gid://shopify/ProductVariant/1".to_string(),
        title: "Test Variant".to_string(),
        selected_options: vec![SelectedOption::new("Pages", pages)],
        product_title: "Custom Photobook".to_string(),
        product_handle: "custom-photobook".to_string(),
    }
}

fn editor(pages: &str) -> PhotobookEditor {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut editor = PhotobookEditor::new(variant(pages));
    editor.initialize_template(None).unwrap();
    editor
}

fn red_png(width: u32, height: u32) -> String {
    encode_png_data_url(&RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]))).unwrap()
}

fn image_count(editor: &PhotobookEditor) -> usize {
    let canvas = editor.canvas();
    let canvas = canvas.borrow();
    canvas.objects().iter().filter(|obj| obj.is_image()).count()
}

#[test]
fn test_twelve_pages_gives_fourteen_navigable_pages() {
    let editor = editor("12 Pages");
    assert_eq!(editor.page_state().total_pages(), 14);
    assert_eq!(editor.page_state().current_page_number(), 1);
    assert!(editor.page_state().has_next_page());
    assert!(!editor.page_state().has_previous_page());
}

#[test]
fn test_cover_is_templated_on_initialize() {
    let editor = editor("4 Pages");
    assert!(editor.is_page_visited(0));
    assert!(editor.page_state().has_content(0));

    let canvas = editor.canvas();
    let canvas = canvas.borrow();
    // Border, two locked text areas, plus placeholder rect and label for
    // the cover image spot
    assert_eq!(canvas.objects().len(), 5);
}

#[test]
fn test_content_round_trip() {
    let mut editor = editor("4 Pages");
    editor.add_image_at(&red_png(100, 80), point(600.0, 450.0));
    assert_eq!(image_count(&editor), 1);

    editor.switch_to_page(1).unwrap();
    editor.settle().unwrap();
    // Fresh interior page: template placeholders, no real images yet
    assert_eq!(image_count(&editor), 0);

    editor.switch_to_page(0).unwrap();
    editor.settle().unwrap();
    assert_eq!(image_count(&editor), 1);
}

#[test]
fn test_revisit_does_not_reapply_template() {
    let mut editor = editor("4 Pages");
    editor.switch_to_page(1).unwrap();
    editor.settle().unwrap();

    let before = {
        let canvas = editor.canvas();
        let len = canvas.borrow().objects().len();
        len
    };
    // Fill a spot; the placeholder pair is replaced by one image
    editor.add_image_to_spot(&red_png(400, 300), "page1-img1").unwrap();
    let after_fill = {
        let canvas = editor.canvas();
        let len = canvas.borrow().objects().len();
        len
    };
    assert_eq!(after_fill, before - 1);

    editor.switch_to_page(2).unwrap();
    editor.settle().unwrap();
    editor.switch_to_page(1).unwrap();
    editor.settle().unwrap();

    // Restored, not re-templated: the filled spot stays filled
    let canvas = editor.canvas();
    let canvas = canvas.borrow();
    assert_eq!(canvas.objects().len(), after_fill);
    assert_eq!(canvas.objects().iter().filter(|o| o.is_image()).count(), 1);
}

#[test]
fn test_images_survive_a_far_round_trip() {
    let mut editor = editor("12 Pages");
    editor.switch_to_page(2).unwrap();
    editor.settle().unwrap();

    for _ in 0..3 {
        editor.add_image_at(&red_png(60, 60), point(680.0, 480.0));
    }
    assert_eq!(image_count(&editor), 3);

    editor.switch_to_page(5).unwrap();
    editor.settle().unwrap();
    assert_eq!(image_count(&editor), 0);

    editor.switch_to_page(2).unwrap();
    editor.settle().unwrap();
    assert_eq!(image_count(&editor), 3);
}

#[test]
fn test_rapid_navigation_discards_stale_mount() {
    let mut editor = editor("8 Pages");
    editor.switch_to_page(1).unwrap();
    // Navigate again before the first mount runs
    editor.switch_to_page(2).unwrap();
    editor.settle().unwrap();

    assert_eq!(editor.page_state().current_page_index(), 2);
    assert!(editor.is_page_visited(2));
    // Page 1 was never mounted: not visited, nothing saved for it
    assert!(!editor.is_page_visited(1));
    assert!(!editor.page_state().has_content(1));
}

#[test]
fn test_out_of_bounds_navigation_is_a_no_op() {
    let mut editor = editor("4 Pages");
    editor.switch_to_page(1).unwrap();
    editor.settle().unwrap();

    editor.switch_to_page(99).unwrap();
    editor.settle().unwrap();
    assert_eq!(editor.page_state().current_page_index(), 1);
}

#[test]
fn test_switch_to_current_page_is_a_no_op() {
    let mut editor = editor("4 Pages");
    editor.add_image_at(&red_png(50, 50), point(600.0, 450.0));
    editor.switch_to_page(0).unwrap();
    editor.settle().unwrap();
    // Nothing restored over the live edit
    assert_eq!(image_count(&editor), 1);
}

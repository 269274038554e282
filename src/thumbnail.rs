//! Low-resolution page previews.
//!
//! Thumbnails are 0.2-scale renders of the 750x550 reference page (150x110),
//! encoded as PNG data URLs. Unvisited pages get template-derived previews;
//! once a page has live content its thumbnail is captured from the canvas
//! and supersedes the template one.

use image::{Rgba, RgbaImage, imageops};
use log::debug;

use crate::canvas::{CanvasSurface, Drawable, SceneData};
use crate::error::EditorResult;
use crate::template::applicator::{background_drawables, placeholder_drawables, resolve_page_template};
use crate::template::{PageTemplate, PhotobookTemplate};
use crate::util::{decode_image_source, encode_png_data_url, parse_hex_color};

/// Thumbnails render at this fraction of the reference page size.
pub const THUMBNAIL_SCALE: f32 = 0.2;

const BORDER_COLOR: [u8; 4] = [229, 231, 235, 255]; // #e5e7eb
const IMAGE_FALLBACK_COLOR: [u8; 4] = [156, 163, 175, 255];

/// Renders and stores per-page preview snapshots, keyed by page index.
#[derive(Debug, Default)]
pub struct ThumbnailEngine {
    thumbnails: Vec<Option<String>>,
}

impl ThumbnailEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thumbnails(&self) -> &[Option<String>] {
        &self.thumbnails
    }

    pub fn thumbnail(&self, page_index: usize) -> Option<&str> {
        self.thumbnails.get(page_index)?.as_deref()
    }

    /// Bulk-generate template-derived thumbnails for every page. Runs as
    /// soon as a template and a non-empty page list are both available.
    /// Slots the template cannot resolve fall back to the empty snapshot.
    pub fn generate_initial(
        &mut self,
        template: &PhotobookTemplate,
        total_pages: usize,
    ) -> EditorResult<()> {
        debug!("generating initial thumbnails for {total_pages} pages");
        let mut thumbnails = Vec::with_capacity(total_pages);
        for index in 0..total_pages {
            let url = match resolve_page_template(template, index, total_pages) {
                Some(page) => self.generate_from_template(page)?,
                None => self.empty_snapshot()?,
            };
            thumbnails.push(Some(url));
        }
        self.thumbnails = thumbnails;
        Ok(())
    }

    /// Off-screen-render a page template's starting layout at thumbnail
    /// scale.
    pub fn generate_from_template(&self, page: &PageTemplate) -> EditorResult<String> {
        let mut objects = background_drawables(page);
        objects.extend(placeholder_drawables(page));
        let scene = SceneData {
            background_color: page.background_color.clone(),
            objects,
        };
        let (width, height) = thumbnail_size();
        let mut img = rasterize_scene(&scene, width, height, THUMBNAIL_SCALE);
        stroke_border(&mut img, BORDER_COLOR);
        Ok(encode_png_data_url(&img)?)
    }

    /// A plain white bordered snapshot, the fallback for unresolvable slots.
    pub fn empty_snapshot(&self) -> EditorResult<String> {
        let (width, height) = thumbnail_size();
        let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
        stroke_border(&mut img, BORDER_COLOR);
        Ok(encode_png_data_url(&img)?)
    }

    /// Re-render the live canvas at full size, downsample to thumbnail
    /// scale, and store the result for the given page. This supersedes any
    /// template-derived thumbnail for that page.
    pub fn capture_live(
        &mut self,
        canvas: &dyn CanvasSurface,
        page_index: usize,
    ) -> EditorResult<()> {
        let scene = canvas.to_scene();
        let full = rasterize_scene(&scene, canvas.width(), canvas.height(), 1.0);
        let (width, height) = thumbnail_size();
        let mut small = imageops::resize(&full, width, height, imageops::FilterType::Triangle);
        stroke_border(&mut small, BORDER_COLOR);
        let url = encode_png_data_url(&small)?;
        self.store(page_index, url);
        Ok(())
    }

    fn store(&mut self, page_index: usize, url: String) {
        if page_index >= self.thumbnails.len() {
            self.thumbnails.resize(page_index + 1, None);
        }
        self.thumbnails[page_index] = Some(url);
    }
}

fn thumbnail_size() -> (u32, u32) {
    let width = (crate::canvas::CANVAS_WIDTH as f32 * THUMBNAIL_SCALE) as u32;
    let height = (crate::canvas::CANVAS_HEIGHT as f32 * THUMBNAIL_SCALE) as u32;
    (width, height)
}

/// Software-render a scene description. Rotation is not rasterized at
/// thumbnail resolution; text renders as an alignment band, since glyph
/// shaping belongs to the out-of-scope rendering library.
fn rasterize_scene(scene: &SceneData, width: u32, height: u32, scale: f32) -> RgbaImage {
    let background = parse_hex_color(&scene.background_color);
    let mut img = RgbaImage::from_pixel(width, height, Rgba(background));

    for obj in &scene.objects {
        match obj {
            Drawable::Rect(rect) => {
                let bounds = scaled_bounds(obj, scale);
                if let Some(fill) = &rect.fill {
                    let mut color = parse_hex_color(fill);
                    color[3] = (color[3] as f32 * rect.opacity) as u8;
                    fill_region(&mut img, bounds, color);
                }
                if let Some(stroke) = &rect.stroke {
                    let mut color = parse_hex_color(stroke);
                    color[3] = (color[3] as f32 * rect.opacity) as u8;
                    stroke_region(&mut img, bounds, color);
                }
            }
            Drawable::Image(image_obj) => {
                let bounds = scaled_bounds(obj, scale);
                draw_image(&mut img, bounds, &image_obj.src);
            }
            Drawable::Text(text) => {
                let bounds = scaled_bounds(obj, scale);
                let mut color = parse_hex_color(&text.fill);
                color[3] = 64;
                fill_region(&mut img, bounds, color);
            }
        }
    }

    img
}

/// Pixel bounds of an object's display rect at the given render scale.
fn scaled_bounds(obj: &Drawable, scale: f32) -> (i64, i64, i64, i64) {
    let rect = obj.display_rect();
    (
        (rect.min.x * scale) as i64,
        (rect.min.y * scale) as i64,
        (rect.max.x * scale) as i64,
        (rect.max.y * scale) as i64,
    )
}

fn draw_image(img: &mut RgbaImage, bounds: (i64, i64, i64, i64), src: &str) {
    let (x0, y0, x1, y1) = bounds;
    let w = (x1 - x0).max(0) as u32;
    let h = (y1 - y0).max(0) as u32;
    if w == 0 || h == 0 {
        return;
    }
    match decode_image_source(src) {
        Some(decoded) => {
            let resized =
                imageops::resize(&decoded.to_rgba8(), w, h, imageops::FilterType::Triangle);
            imageops::overlay(img, &resized, x0, y0);
        }
        None => fill_region(img, bounds, IMAGE_FALLBACK_COLOR),
    }
}

fn fill_region(img: &mut RgbaImage, bounds: (i64, i64, i64, i64), color: [u8; 4]) {
    let (x0, y0, x1, y1) = bounds;
    for y in y0.max(0)..y1.min(img.height() as i64) {
        for x in x0.max(0)..x1.min(img.width() as i64) {
            blend_pixel(img, x as u32, y as u32, color);
        }
    }
}

fn stroke_region(img: &mut RgbaImage, bounds: (i64, i64, i64, i64), color: [u8; 4]) {
    let (x0, y0, x1, y1) = bounds;
    for x in x0.max(0)..x1.min(img.width() as i64) {
        for y in [y0, y1 - 1] {
            if y >= 0 && y < img.height() as i64 {
                blend_pixel(img, x as u32, y as u32, color);
            }
        }
    }
    for y in y0.max(0)..y1.min(img.height() as i64) {
        for x in [x0, x1 - 1] {
            if x >= 0 && x < img.width() as i64 {
                blend_pixel(img, x as u32, y as u32, color);
            }
        }
    }
}

/// A 1px border stroke around the whole thumbnail.
fn stroke_border(img: &mut RgbaImage, color: [u8; 4]) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    stroke_region(img, (0, 0, w, h), color);
}

fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: [u8; 4]) {
    let alpha = color[3] as f32 / 255.0;
    let pixel = img.get_pixel_mut(x, y);
    for c in 0..3 {
        pixel.0[c] = (color[c] as f32 * alpha + pixel.0[c] as f32 * (1.0 - alpha)) as u8;
    }
    pixel.0[3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{ImageDrawable, SceneCanvas};
    use crate::geometry::point;
    use crate::template::generator::generate_template_from_variant;
    use crate::util::encode_png_data_url;
    use crate::variant::{SelectedOption, VariantData};

    fn template(pages: &str) -> PhotobookTemplate {
        generate_template_from_variant(&VariantData {
            id: "v1".to_string(),
            title: "t".to_string(),
            selected_options: vec![SelectedOption::new("Pages", pages)],
            product_title: "Photobook".to_string(),
            product_handle: "photobook".to_string(),
        })
    }

    fn decode_thumbnail(url: &str) -> RgbaImage {
        decode_image_source(url).unwrap().to_rgba8()
    }

    #[test]
    fn test_template_thumbnail_has_thumbnail_dimensions() {
        let engine = ThumbnailEngine::new();
        let template = template("4 Pages");
        let url = engine.generate_from_template(&template.cover_template).unwrap();
        let img = decode_thumbnail(&url);
        assert_eq!((img.width(), img.height()), (150, 110));
    }

    #[test]
    fn test_initial_generation_covers_all_pages() {
        let mut engine = ThumbnailEngine::new();
        let template = template("4 Pages");
        engine.generate_initial(&template, template.total_pages()).unwrap();
        assert_eq!(engine.thumbnails().len(), 6);
        assert!(engine.thumbnails().iter().all(|t| t.is_some()));
    }

    #[test]
    fn test_live_capture_supersedes_template_thumbnail() {
        let mut engine = ThumbnailEngine::new();
        let template = template("4 Pages");
        engine.generate_initial(&template, template.total_pages()).unwrap();
        let before = engine.thumbnail(1).unwrap().to_string();

        let mut canvas = SceneCanvas::new();
        let src = encode_png_data_url(&RgbaImage::from_pixel(
            40,
            40,
            Rgba([255, 0, 0, 255]),
        ))
        .unwrap();
        canvas.add(crate::canvas::Drawable::Image(ImageDrawable::new(
            src,
            point(375.0, 275.0),
            40.0,
            40.0,
        )));
        engine.capture_live(&canvas, 1).unwrap();

        let after = engine.thumbnail(1).unwrap();
        assert_ne!(before, after);
        let img = decode_thumbnail(after);
        assert_eq!((img.width(), img.height()), (150, 110));
    }

    #[test]
    fn test_capture_live_tolerates_malformed_background_color() {
        let mut engine = ThumbnailEngine::new();
        let mut canvas = SceneCanvas::new();
        canvas.set_background_color("#a\u{e9}aaa");

        engine.capture_live(&canvas, 0).unwrap();

        // Unparseable colors render as the white canvas default.
        let img = decode_thumbnail(engine.thumbnail(0).unwrap());
        assert_eq!(img.get_pixel(75, 55).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_empty_snapshot_is_white_with_border() {
        let engine = ThumbnailEngine::new();
        let img = decode_thumbnail(&engine.empty_snapshot().unwrap());
        assert_eq!(img.get_pixel(75, 55).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [229, 231, 235, 255]);
    }
}

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use log::debug;

/// Decode a renderable image source into pixels.
///
/// Supports `data:image/...;base64,` URLs, the form the image library
/// hands out. Anything else (remote URLs, corrupt payloads) yields `None`
/// and the surrounding add-image operation never completes.
pub fn decode_image_source(src: &str) -> Option<DynamicImage> {
    let payload = src.strip_prefix("data:")?.split_once(";base64,")?.1;
    let bytes = match STANDARD.decode(payload) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!("image source base64 decode failed: {err}");
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => Some(img),
        Err(err) => {
            debug!("image source pixel decode failed: {err}");
            None
        }
    }
}

/// Encode pixels as a `data:image/png;base64,` URL.
pub fn encode_png_data_url(img: &image::RgbaImage) -> Result<String, image::ImageError> {
    let mut bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&bytes)))
}

/// Parse `#rrggbb` / `#rrggbbaa` into RGBA bytes. Unknown formats fall back
/// to opaque white, the canvas default.
pub fn parse_hex_color(color: &str) -> [u8; 4] {
    let hex = color.trim_start_matches('#');
    // Byte-index slicing below is only safe on ASCII input.
    if !hex.is_ascii() {
        return [255, 255, 255, 255];
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        6 => {
            if let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) {
                return [r, g, b, 255];
            }
        }
        8 => {
            if let (Some(r), Some(g), Some(b), Some(a)) =
                (channel(0), channel(2), channel(4), channel(6))
            {
                return [r, g, b, a];
            }
        }
        _ => {}
    }
    [255, 255, 255, 255]
}

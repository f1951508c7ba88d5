//! Square portrait crops for uploads.
//!
//! Gallery and portrait uploads are cut to the largest centered square of the
//! chosen image and scaled to [`CROP_SIZE`] × [`CROP_SIZE`] JPEG before they
//! are sent. The geometry is plain arithmetic; the pixel work goes through an
//! offscreen canvas in the browser.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Edge length of uploaded face images.
pub const CROP_SIZE: u32 = 256;

/// Source rectangle of a crop, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub side: f64,
}

/// Largest square centered in a `width` × `height` image.
pub fn center_square(width: u32, height: u32) -> Option<CropRect> {
    if width == 0 || height == 0 {
        return None;
    }
    let side = width.min(height) as f64;
    Some(CropRect {
        x: (width as f64 - side) / 2.0,
        y: (height as f64 - side) / 2.0,
        side,
    })
}

/// Decode the body of a `data:...;base64,` URL.
pub fn data_url_bytes(data_url: &str) -> Result<Vec<u8>, String> {
    let (header, body) = data_url
        .split_once(',')
        .ok_or_else(|| "not a data URL".to_string())?;
    if !header.ends_with(";base64") {
        return Err("data URL is not base64".to_string());
    }
    STANDARD.decode(body).map_err(|e| e.to_string())
}

/// Crop `bytes` (any browser-decodable image) to a centered square JPEG of
/// [`CROP_SIZE`] pixels.
#[cfg(target_arch = "wasm32")]
pub async fn crop_square_jpeg(bytes: &[u8], content_type: &str) -> Result<Vec<u8>, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url};

    let js_err = |e: wasm_bindgen::JsValue| format!("{e:?}");

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let image = HtmlImageElement::new().map_err(js_err)?;
    image.set_src(&url);
    let decoded = JsFuture::from(image.decode()).await;
    let _ = Url::revoke_object_url(&url);
    decoded.map_err(|_| "the selected file is not an image".to_string())?;

    let rect = center_square(image.natural_width(), image.natural_height())
        .ok_or_else(|| "the selected image is empty".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| "canvas element unavailable".to_string())?;
    canvas.set_width(CROP_SIZE);
    canvas.set_height(CROP_SIZE);
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| "2d context unavailable".to_string())?
        .dyn_into()
        .map_err(|_| "2d context unavailable".to_string())?;

    context
        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            &image,
            rect.x,
            rect.y,
            rect.side,
            rect.side,
            0.0,
            0.0,
            CROP_SIZE as f64,
            CROP_SIZE as f64,
        )
        .map_err(js_err)?;

    let data_url = canvas
        .to_data_url_with_type("image/jpeg")
        .map_err(js_err)?;
    data_url_bytes(&data_url)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn crop_square_jpeg(_bytes: &[u8], _content_type: &str) -> Result<Vec<u8>, String> {
    Err("image cropping needs a browser".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_crop_is_centered() {
        let rect = center_square(640, 480).unwrap();
        assert_eq!(rect, CropRect { x: 80.0, y: 0.0, side: 480.0 });
    }

    #[test]
    fn test_portrait_crop_is_centered() {
        let rect = center_square(300, 500).unwrap();
        assert_eq!(rect, CropRect { x: 0.0, y: 100.0, side: 300.0 });
    }

    #[test]
    fn test_square_and_empty_images() {
        assert_eq!(
            center_square(256, 256),
            Some(CropRect { x: 0.0, y: 0.0, side: 256.0 })
        );
        assert!(center_square(0, 10).is_none());
    }

    #[test]
    fn test_data_url_bytes() {
        assert_eq!(
            data_url_bytes("data:image/jpeg;base64,/9j/").unwrap(),
            vec![0xff, 0xd8, 0xff]
        );
        assert!(data_url_bytes("data:text/plain,hello").is_err());
        assert!(data_url_bytes("plain").is_err());
    }
}

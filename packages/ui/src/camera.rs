//! Browser camera and face detector for the attendance loop.
//!
//! The dashboard renders a `<video>` element ([`VIDEO_ID`]) with a canvas
//! overlay ([`OVERLAY_ID`]) on top. [`VideoFrames`] snapshots the video into a
//! JPEG data URL, [`FaceApiDetector`] runs face-api.js's SSD MobileNet single
//! face detection and draws the box on the overlay, and [`IntervalTicker`]
//! paces [`api::capture::CaptureLoop`].
//!
//! face-api.js is loaded by the page as the global `faceapi`; its weights are
//! served from [`MODEL_URI`]. On native targets every call fails with
//! [`CaptureError::Camera`].

use std::time::Duration;

use api::capture::{CaptureError, Detection, FaceDetector, FrameSource, Ticker};

pub const VIDEO_ID: &str = "attendance-video";
pub const OVERLAY_ID: &str = "attendance-overlay";
pub const MODEL_URI: &str = "/models";

/// Paces the capture loop with a fixed sleep between ticks.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u32) -> Self {
        Self::new(Duration::from_millis(u64::from(ms.max(1))))
    }
}

impl Ticker for IntervalTicker {
    async fn next_tick(&mut self) -> bool {
        crate::platform::sleep(self.interval).await;
        true
    }
}

/// Frames from the dashboard's `<video>` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoFrames;

/// face-api.js single-face detector drawing onto the overlay canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceApiDetector;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement};

    use super::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = faceapi, js_name = detectSingleFace)]
        fn detect_single_face(input: &HtmlVideoElement, options: &JsValue) -> Result<JsValue, JsValue>;

        #[wasm_bindgen(catch, js_namespace = ["faceapi", "nets", "ssdMobilenetv1"], js_name = loadFromUri)]
        fn load_ssd_mobilenet(uri: &str) -> Result<js_sys::Promise, JsValue>;

        #[wasm_bindgen(js_namespace = ["faceapi", "draw"], js_name = drawDetections)]
        fn draw_detections(canvas: &HtmlCanvasElement, detections: &js_sys::Array);

        #[wasm_bindgen(js_namespace = faceapi)]
        type SsdMobilenetv1Options;

        #[wasm_bindgen(constructor, js_namespace = faceapi)]
        fn new(options: &JsValue) -> SsdMobilenetv1Options;
    }

    fn element<T: JsCast>(id: &str) -> Result<T, CaptureError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|e| e.dyn_into::<T>().ok())
            .ok_or_else(|| CaptureError::Camera(format!("element #{id} not found")))
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CaptureError> {
        canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into().ok())
            .ok_or_else(|| CaptureError::Frame("2d context unavailable".into()))
    }

    fn js_message(e: &JsValue) -> String {
        e.as_string()
            .or_else(|| {
                js_sys::Reflect::get(e, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{e:?}"))
    }

    /// The video element may not be in the DOM yet on the first poll.
    async fn wait_for_video() -> Result<HtmlVideoElement, CaptureError> {
        for _ in 0..20 {
            if let Ok(video) = element(VIDEO_ID) {
                return Ok(video);
            }
            crate::platform::sleep(Duration::from_millis(50)).await;
        }
        element(VIDEO_ID)
    }

    /// Ask for the webcam and attach it to the video element.
    pub async fn start_camera() -> Result<(), CaptureError> {
        let video = wait_for_video().await?;
        let devices = web_sys::window()
            .ok_or_else(|| CaptureError::Camera("no window".into()))?
            .navigator()
            .media_devices()
            .map_err(|e| CaptureError::Camera(js_message(&e)))?;

        let constraints = web_sys::MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| CaptureError::Camera(js_message(&e)))?;
        let stream: web_sys::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| CaptureError::Camera(js_message(&e)))?
            .unchecked_into();

        video.set_src_object(Some(&stream));
        if let Ok(play) = video.play() {
            let _ = JsFuture::from(play).await;
        }
        tracing::info!("Camera started");
        Ok(())
    }

    /// Stop every track on the video element's stream.
    pub fn stop_camera() {
        let Ok(video) = element::<HtmlVideoElement>(VIDEO_ID) else {
            return;
        };
        if let Some(stream) = video.src_object() {
            let tracks = stream.get_tracks();
            for track in tracks.iter() {
                track.unchecked_into::<web_sys::MediaStreamTrack>().stop();
            }
        }
        video.set_src_object(None);
    }

    pub async fn load_detector() -> Result<(), CaptureError> {
        let promise = load_ssd_mobilenet(MODEL_URI).map_err(|e| CaptureError::Detector(js_message(&e)))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| CaptureError::Detector(js_message(&e)))?;
        tracing::info!("Face detector loaded from {}", MODEL_URI);
        Ok(())
    }

    impl FrameSource for VideoFrames {
        async fn capture(&self) -> Result<String, CaptureError> {
            let video: HtmlVideoElement = element(VIDEO_ID)?;
            let (width, height) = (video.video_width(), video.video_height());
            if width == 0 || height == 0 {
                return Err(CaptureError::Frame("video not ready".into()));
            }

            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| CaptureError::Frame("no document".into()))?;
            let canvas: HtmlCanvasElement = document
                .create_element("canvas")
                .map_err(|e| CaptureError::Frame(js_message(&e)))?
                .unchecked_into();
            canvas.set_width(width);
            canvas.set_height(height);
            context_2d(&canvas)?
                .draw_image_with_html_video_element_and_dw_and_dh(
                    &video,
                    0.0,
                    0.0,
                    width as f64,
                    height as f64,
                )
                .map_err(|e| CaptureError::Frame(js_message(&e)))?;
            canvas
                .to_data_url_with_type("image/jpeg")
                .map_err(|e| CaptureError::Frame(js_message(&e)))
        }
    }

    impl FaceDetector for FaceApiDetector {
        async fn detect(&self, min_confidence: f32) -> Result<Option<Detection>, CaptureError> {
            let video: HtmlVideoElement = element(VIDEO_ID)?;
            let overlay: HtmlCanvasElement = element(OVERLAY_ID)?;

            let settings = js_sys::Object::new();
            js_sys::Reflect::set(&settings, &"minConfidence".into(), &f64::from(min_confidence).into())
                .map_err(|e| CaptureError::Detector(js_message(&e)))?;
            let options = SsdMobilenetv1Options::new(&settings);

            let task = detect_single_face(&video, &options)
                .map_err(|e| CaptureError::Detector(js_message(&e)))?;
            let result = JsFuture::from(js_sys::Promise::resolve(&task))
                .await
                .map_err(|e| CaptureError::Detector(js_message(&e)))?;

            if overlay.width() != video.video_width() {
                overlay.set_width(video.video_width());
                overlay.set_height(video.video_height());
            }
            let context = context_2d(&overlay)?;
            context.clear_rect(0.0, 0.0, overlay.width() as f64, overlay.height() as f64);

            if result.is_undefined() || result.is_null() {
                return Ok(None);
            }
            draw_detections(&overlay, &js_sys::Array::of1(&result));

            let score = js_sys::Reflect::get(&result, &"score".into())
                .ok()
                .and_then(|s| s.as_f64())
                .unwrap_or(0.0);
            Ok(Some(Detection {
                score: score as f32,
            }))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{load_detector, start_camera, stop_camera};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;

    fn unsupported() -> CaptureError {
        CaptureError::Camera("camera capture needs a browser".into())
    }

    pub async fn start_camera() -> Result<(), CaptureError> {
        Err(unsupported())
    }

    pub fn stop_camera() {}

    pub async fn load_detector() -> Result<(), CaptureError> {
        Err(unsupported())
    }

    impl FrameSource for VideoFrames {
        async fn capture(&self) -> Result<String, CaptureError> {
            Err(unsupported())
        }
    }

    impl FaceDetector for FaceApiDetector {
        async fn detect(&self, _min_confidence: f32) -> Result<Option<Detection>, CaptureError> {
            Err(unsupported())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{load_detector, start_camera, stop_camera};

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_native_camera_reports_unsupported() {
        assert!(matches!(start_camera().await, Err(CaptureError::Camera(_))));
        assert!(VideoFrames.capture().await.is_err());
        assert!(FaceApiDetector.detect(0.5).await.is_err());
    }

    #[tokio::test]
    async fn test_interval_ticker_keeps_ticking() {
        let mut ticker = IntervalTicker::from_millis(0);
        assert!(ticker.next_tick().await);
        assert!(ticker.next_tick().await);
    }
}

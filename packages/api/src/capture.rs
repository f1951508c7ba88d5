//! # Attendance capture loop
//!
//! Drives face recognition on the teacher dashboard. Each tick:
//!
//! 1. ask the [`FaceDetector`] for a single face at the current detection
//!    threshold (a score below the threshold counts as no face);
//! 2. if a face is there, grab the frame from the [`FrameSource`] as a JPEG
//!    data URL and send it with the class roster to the recognizer;
//! 3. on a match, re-fetch today's attendance so the caller can replace the
//!    "present today" table with the fresh snapshot.
//!
//! Every tick produces a [`TickOutcome`]; the caller turns it into notices
//! and table updates. Failures never stop the loop. [`CaptureLoop::run`] keeps
//! going until its [`Ticker`] reports that the page is gone.
//!
//! Submissions within one loop are sequential: the next tick only starts after
//! the previous recognition round trip has finished.
//!
//! The browser pieces (video element, canvas, face-api detector, animation
//! frame timer) live in the `ui` crate. Everything here is plain async Rust so
//! the loop can be tested natively with mocks.

use std::future::Future;

use chrono::NaiveDate;
use thiserror::Error;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AttendanceDetail, FramePayload, RecognitionRequest, RecognitionResult};

/// Camera or detector failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    #[error("camera unavailable: {0}")]
    Camera(String),

    #[error("could not capture frame: {0}")]
    Frame(String),

    #[error("face detector failed: {0}")]
    Detector(String),
}

/// One detected face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Detector confidence in `0..=1`.
    pub score: f32,
}

/// Thresholds read at the start of every tick, so slider changes take effect
/// while the loop is running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum detector confidence, `0..=1`.
    pub detection: f32,
    /// Maximum embedding distance for a match (`euclid_threshold`).
    pub matching: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            detection: 0.5,
            matching: 0.6,
        }
    }
}

impl Thresholds {
    pub fn new(detection: f32, matching: f32) -> Self {
        Self {
            detection: detection.clamp(0.0, 1.0),
            matching: matching.max(0.0),
        }
    }

    pub fn from_config(config: &store::ConsoleConfig) -> Self {
        Self::new(
            config.attendance.detection_threshold,
            config.attendance.match_threshold,
        )
    }
}

/// Produces the current camera frame.
pub trait FrameSource {
    /// The frame as a `data:image/jpeg;base64,...` URL.
    fn capture(&self) -> impl Future<Output = Result<String, CaptureError>>;
}

/// Single-face detector.
pub trait FaceDetector {
    fn detect(
        &self,
        min_confidence: f32,
    ) -> impl Future<Output = Result<Option<Detection>, CaptureError>>;
}

/// The two backend calls the loop makes.
pub trait AttendanceBackend {
    fn recognize(
        &self,
        request: &RecognitionRequest,
        match_threshold: f32,
    ) -> impl Future<Output = Result<RecognitionResult, ApiError>>;

    /// Today's attendance for the class being watched.
    fn present_today(&self) -> impl Future<Output = Result<Vec<AttendanceDetail>, ApiError>>;
}

/// Paces the loop. Returns `false` once the loop should stop.
pub trait Ticker {
    fn next_tick(&mut self) -> impl Future<Output = bool>;
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No face, or a face below the detection threshold. Nothing was sent.
    NoFace,
    /// The recognizer found someone. `present` is the re-fetched attendance
    /// for today, or `None` when that refresh failed.
    Matched {
        message: String,
        present: Option<Vec<AttendanceDetail>>,
    },
    /// The recognizer answered but found nobody.
    NoMatch { message: String },
    /// The camera or detector failed before anything was sent. These repeat
    /// every tick while the camera warms up, so callers usually only log them.
    CaptureFailed(String),
    /// Submitting or reading the verdict failed; the message is ready to show.
    Failed(String),
}

impl TickOutcome {
    /// Whether a recognition request went out during the tick.
    pub fn submitted(&self) -> bool {
        !matches!(self, TickOutcome::NoFace | TickOutcome::CaptureFailed(_))
    }
}

/// Notice shown whenever the recognizer reports no match.
pub const NO_MATCH_MESSAGE: &str = "No matching face found";

/// The recognition loop for one class.
pub struct CaptureLoop<F, D, B, T> {
    frames: F,
    detector: D,
    backend: B,
    thresholds: T,
    roster: Vec<i64>,
}

impl<F, D, B, T> CaptureLoop<F, D, B, T>
where
    F: FrameSource,
    D: FaceDetector,
    B: AttendanceBackend,
    T: Fn() -> Thresholds,
{
    pub fn new(frames: F, detector: D, backend: B, thresholds: T, roster: Vec<i64>) -> Self {
        Self {
            frames,
            detector,
            backend,
            thresholds,
            roster,
        }
    }

    pub fn roster(&self) -> &[i64] {
        &self.roster
    }

    pub fn set_roster(&mut self, roster: Vec<i64>) {
        self.roster = roster;
    }

    /// Run one detect / submit / refresh round.
    pub async fn tick(&self) -> TickOutcome {
        let thresholds = (self.thresholds)();

        let detection = match self.detector.detect(thresholds.detection).await {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!("Detection failed: {}", e);
                return TickOutcome::CaptureFailed(e.to_string());
            }
        };
        match detection {
            Some(d) if d.score >= thresholds.detection => {}
            _ => return TickOutcome::NoFace,
        }

        let frame = match self.frames.capture().await {
            Ok(url) => FramePayload::from_data_url(&url),
            Err(e) => {
                tracing::debug!("Frame capture failed: {}", e);
                return TickOutcome::CaptureFailed(e.to_string());
            }
        };

        let request = RecognitionRequest {
            frame,
            roster: self.roster.clone(),
        };
        tracing::debug!(
            "Submitting frame with {} roster ids, threshold {}",
            request.roster.len(),
            thresholds.matching
        );

        let result = match self.backend.recognize(&request, thresholds.matching).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Recognition request failed: {}", e);
                return TickOutcome::Failed(e.user_message());
            }
        };

        if !result.success {
            tracing::info!("No match: {}", result.message);
            return TickOutcome::NoMatch {
                message: NO_MATCH_MESSAGE.to_string(),
            };
        }

        let present = match self.backend.present_today().await {
            Ok(rows) => Some(rows),
            Err(e) => {
                tracing::error!("Failed to refresh attendance: {}", e);
                None
            }
        };
        TickOutcome::Matched {
            message: result.message,
            present,
        }
    }

    /// Tick until `ticker` says stop, handing each outcome to `on_outcome`.
    pub async fn run<K, O>(&self, ticker: &mut K, mut on_outcome: O)
    where
        K: Ticker,
        O: FnMut(TickOutcome),
    {
        tracing::info!("Capture loop started ({} roster ids)", self.roster.len());
        while ticker.next_tick().await {
            on_outcome(self.tick().await);
        }
        tracing::info!("Capture loop stopped");
    }
}

/// [`AttendanceBackend`] for one class over the REST client.
#[derive(Debug, Clone)]
pub struct ClassAttendance {
    client: ApiClient,
    class_id: i64,
}

impl ClassAttendance {
    pub fn new(client: ApiClient, class_id: i64) -> Self {
        Self { client, class_id }
    }

    pub fn class_id(&self) -> i64 {
        self.class_id
    }
}

/// Today in the browser's (or host's) local time zone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl AttendanceBackend for ClassAttendance {
    async fn recognize(
        &self,
        request: &RecognitionRequest,
        match_threshold: f32,
    ) -> Result<RecognitionResult, ApiError> {
        self.client.recognize(request, match_threshold).await
    }

    async fn present_today(&self) -> Result<Vec<AttendanceDetail>, ApiError> {
        self.client.attendance_by_date(self.class_id, today()).await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use super::*;
    use crate::models::BestMatch;

    struct StaticFrame;

    impl FrameSource for StaticFrame {
        async fn capture(&self) -> Result<String, CaptureError> {
            Ok("data:image/jpeg;base64,/9j/".to_string())
        }
    }

    /// Replays scores; `None` means no face.
    struct ScriptedDetector {
        scores: RefCell<VecDeque<Option<f32>>>,
        seen_thresholds: RefCell<Vec<f32>>,
    }

    impl ScriptedDetector {
        fn new(scores: &[Option<f32>]) -> Self {
            Self {
                scores: RefCell::new(scores.iter().copied().collect()),
                seen_thresholds: RefCell::new(Vec::new()),
            }
        }
    }

    impl FaceDetector for ScriptedDetector {
        async fn detect(&self, min_confidence: f32) -> Result<Option<Detection>, CaptureError> {
            self.seen_thresholds.borrow_mut().push(min_confidence);
            let score = self.scores.borrow_mut().pop_front().flatten();
            Ok(score.map(|score| Detection { score }))
        }
    }

    struct BrokenDetector;

    impl FaceDetector for BrokenDetector {
        async fn detect(&self, _: f32) -> Result<Option<Detection>, CaptureError> {
            Err(CaptureError::Detector("model not loaded".into()))
        }
    }

    #[derive(Default)]
    struct MockBackend {
        /// Replies to `recognize`, in order; empty means transport error.
        replies: RefCell<VecDeque<Result<RecognitionResult, ApiError>>>,
        requests: RefCell<Vec<(RecognitionRequest, f32)>>,
        refreshes: Cell<usize>,
        present: Vec<AttendanceDetail>,
    }

    impl MockBackend {
        fn with_replies(replies: Vec<Result<RecognitionResult, ApiError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                ..Self::default()
            }
        }
    }

    impl AttendanceBackend for MockBackend {
        async fn recognize(
            &self,
            request: &RecognitionRequest,
            match_threshold: f32,
        ) -> Result<RecognitionResult, ApiError> {
            self.requests
                .borrow_mut()
                .push((request.clone(), match_threshold));
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("connection refused".into())))
        }

        async fn present_today(&self) -> Result<Vec<AttendanceDetail>, ApiError> {
            self.refreshes.set(self.refreshes.get() + 1);
            Ok(self.present.clone())
        }
    }

    struct CountingTicker(usize);

    impl Ticker for CountingTicker {
        async fn next_tick(&mut self) -> bool {
            if self.0 == 0 {
                return false;
            }
            self.0 -= 1;
            true
        }
    }

    fn matched(message: &str) -> Result<RecognitionResult, ApiError> {
        Ok(RecognitionResult {
            success: true,
            message: message.to_string(),
            data: Some(BestMatch {
                parent_id: 4,
                image_path: "images/phu_huynh/4/a.jpg".into(),
                distance: 0.31,
            }),
        })
    }

    fn present_row(name: &str) -> AttendanceDetail {
        AttendanceDetail {
            student_name: Some(name.to_string()),
            check_in: Some("07:02:11".into()),
            parent_name: Some("Nguyen Van A".into()),
            relationship: Some("Cha".into()),
            ..AttendanceDetail::default()
        }
    }

    #[tokio::test]
    async fn test_face_below_threshold_is_not_submitted() {
        let capture = CaptureLoop::new(
            StaticFrame,
            ScriptedDetector::new(&[Some(0.3), None]),
            MockBackend::default(),
            || Thresholds::new(0.5, 0.6),
            vec![1, 2],
        );

        assert_eq!(capture.tick().await, TickOutcome::NoFace);
        assert_eq!(capture.tick().await, TickOutcome::NoFace);
        assert!(capture.backend.requests.borrow().is_empty());
        assert_eq!(capture.backend.refreshes.get(), 0);
    }

    #[tokio::test]
    async fn test_match_submits_roster_and_refreshes_table() {
        let mut backend = MockBackend::with_replies(vec![matched("Le Van C checked in")]);
        backend.present = vec![present_row("Le Van C"), present_row("Tran Thi D")];
        let roster = vec![11, 12, 13, 14];

        let capture = CaptureLoop::new(
            StaticFrame,
            ScriptedDetector::new(&[Some(0.9)]),
            backend,
            || Thresholds::new(0.5, 0.45),
            roster.clone(),
        );

        let outcome = capture.tick().await;
        let requests = capture.backend.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0.roster, roster);
        assert_eq!(requests[0].1, 0.45);
        assert!(requests[0].0.frame.frame.starts_with("data:image/jpeg;base64,"));

        match outcome {
            TickOutcome::Matched { message, present } => {
                assert_eq!(message, "Le Van C checked in");
                assert_eq!(present, Some(capture.backend.present.clone()));
            }
            other => panic!("expected a match, got {other:?}"),
        }
        assert_eq!(capture.backend.refreshes.get(), 1);
    }

    #[tokio::test]
    async fn test_no_match_skips_refresh() {
        let capture = CaptureLoop::new(
            StaticFrame,
            ScriptedDetector::new(&[Some(0.8)]),
            MockBackend::with_replies(vec![Ok(RecognitionResult {
                success: false,
                message: String::new(),
                data: None,
            })]),
            Thresholds::default,
            vec![1],
        );

        assert_eq!(
            capture.tick().await,
            TickOutcome::NoMatch {
                message: NO_MATCH_MESSAGE.to_string()
            }
        );
        assert_eq!(capture.backend.refreshes.get(), 0);
    }

    #[tokio::test]
    async fn test_no_match_ignores_server_wording() {
        let capture = CaptureLoop::new(
            StaticFrame,
            ScriptedDetector::new(&[Some(0.8)]),
            MockBackend::with_replies(vec![Ok(RecognitionResult {
                success: false,
                message: "Khong tim thay".into(),
                data: None,
            })]),
            Thresholds::default,
            vec![1],
        );

        assert_eq!(
            capture.tick().await,
            TickOutcome::NoMatch {
                message: NO_MATCH_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_loop() {
        let backend = MockBackend::with_replies(vec![
            Err(ApiError::from_status(500, r#"{"detail":"Recognizer offline"}"#)),
            Err(ApiError::Transport("timeout".into())),
            matched("ok"),
        ]);
        let capture = CaptureLoop::new(
            StaticFrame,
            ScriptedDetector::new(&[Some(0.9), Some(0.9), None, Some(0.9)]),
            backend,
            Thresholds::default,
            vec![7],
        );

        let mut outcomes = Vec::new();
        capture
            .run(&mut CountingTicker(4), |o| outcomes.push(o))
            .await;

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0], TickOutcome::Failed("Recognizer offline".into()));
        assert_eq!(outcomes[1], TickOutcome::Failed(crate::error::GENERIC_FAILURE.into()));
        assert_eq!(outcomes[2], TickOutcome::NoFace);
        assert!(matches!(outcomes[3], TickOutcome::Matched { .. }));
        assert_eq!(capture.backend.requests.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_detector_error_is_reported() {
        let capture = CaptureLoop::new(
            StaticFrame,
            BrokenDetector,
            MockBackend::default(),
            Thresholds::default,
            vec![],
        );
        let outcome = capture.tick().await;
        assert!(matches!(outcome, TickOutcome::CaptureFailed(ref m) if m.contains("model not loaded")));
        assert!(!outcome.submitted());
        assert!(capture.backend.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_thresholds_are_read_every_tick() {
        let current = Cell::new(Thresholds::new(0.5, 0.6));
        let capture = CaptureLoop::new(
            StaticFrame,
            ScriptedDetector::new(&[Some(0.7), Some(0.7)]),
            MockBackend::with_replies(vec![matched("a"), matched("b")]),
            || current.get(),
            vec![1],
        );

        assert!(matches!(capture.tick().await, TickOutcome::Matched { .. }));
        current.set(Thresholds::new(0.9, 0.3));
        assert_eq!(capture.tick().await, TickOutcome::NoFace);

        assert_eq!(*capture.detector.seen_thresholds.borrow(), vec![0.5, 0.9]);
        assert_eq!(capture.backend.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_when_ticker_ends() {
        let capture = CaptureLoop::new(
            StaticFrame,
            ScriptedDetector::new(&[]),
            MockBackend::default(),
            Thresholds::default,
            vec![],
        );
        let mut count = 0;
        capture.run(&mut CountingTicker(0), |_| count += 1).await;
        assert_eq!(count, 0);
    }

    #[test]
    fn test_thresholds_clamped() {
        let t = Thresholds::new(1.7, -0.2);
        assert_eq!(t.detection, 1.0);
        assert_eq!(t.matching, 0.0);
    }
}

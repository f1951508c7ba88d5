//! Teacher dashboard widgets: class roster, present-today table, threshold
//! sliders and the live camera with its capture loop.

use api::capture::{CaptureLoop, ClassAttendance, Thresholds, TickOutcome};
use api::filter::filter_rows;
use api::models::display_date;
use api::{AttendanceDetail, Student};
use dioxus::prelude::*;

use crate::activity_log::{log_activity, use_activity_log, LogLevel};
use crate::camera::{
    load_detector, start_camera, stop_camera, FaceApiDetector, IntervalTicker, VideoFrames,
    OVERLAY_ID, VIDEO_ID,
};
use crate::components::{Button, ButtonVariant, Slider};
use crate::platform::make_client;

use super::EmptyRow;

/// Students of the class with a manual "present" button per row.
#[component]
pub fn RosterTable(students: Vec<Student>, query: String, on_confirm: EventHandler<Student>) -> Element {
    let filtered = filter_rows(&students, &query);
    let rows: Vec<Student> = filtered.rows.into_iter().cloned().collect();

    rsx! {
        table { class: "data-table",
            thead {
                tr {
                    th { "ID" }
                    th { "Name" }
                    th { "Gender" }
                    th { "Birth date" }
                    th { "" }
                }
            }
            tbody {
                if !filtered.any_match {
                    EmptyRow { colspan: 5 }
                }
                for student in rows {
                    tr { key: "{student.id}",
                        td { "{student.id}" }
                        td { "{student.name}" }
                        td { "{student.gender}" }
                        td { {display_date(&student.birth_date)} }
                        td {
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: {
                                    let student = student.clone();
                                    move |_: MouseEvent| on_confirm.call(student.clone())
                                },
                                "Present"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Who checked in on the selected day. Re-rendering the same rows always
/// yields the same table.
#[component]
pub fn PresentTable(rows: Vec<AttendanceDetail>, query: String) -> Element {
    let filtered = filter_rows(&rows, &query);
    let cells: Vec<[String; 5]> = filtered.rows.iter().map(|r| r.cells()).collect();

    rsx! {
        table { class: "data-table",
            thead {
                tr {
                    th { "Student" }
                    th { "Check in" }
                    th { "Check out" }
                    th { "Picked up by" }
                    th { "Relationship" }
                }
            }
            tbody {
                if !filtered.any_match {
                    EmptyRow { colspan: 5, message: "No students present" }
                }
                for (i, row) in cells.into_iter().enumerate() {
                    tr { key: "{i}",
                        for cell in row {
                            td { "{cell}" }
                        }
                    }
                }
            }
        }
    }
}

/// Detection and match sliders. Changes apply to the running loop.
#[component]
pub fn ThresholdControls(thresholds: Signal<Thresholds>) -> Element {
    let mut thresholds = thresholds;
    let current = thresholds();
    rsx! {
        div { class: "threshold-controls",
            Slider {
                label: "Detection confidence",
                value: current.detection,
                onchange: move |v: f32| {
                    let matching = thresholds.peek().matching;
                    thresholds.set(Thresholds::new(v, matching));
                },
            }
            Slider {
                label: "Match distance",
                value: current.matching,
                max: 1.5,
                onchange: move |v: f32| {
                    let detection = thresholds.peek().detection;
                    thresholds.set(Thresholds::new(detection, v));
                },
            }
        }
    }
}

/// Live camera feed running the recognition loop for `class_id`. The loop
/// and the camera stop when the view unmounts.
#[component]
pub fn CaptureView(
    class_id: i64,
    roster: Vec<i64>,
    tick_interval_ms: u32,
    thresholds: Signal<Thresholds>,
    present: Signal<Vec<AttendanceDetail>>,
) -> Element {
    let mut present = present;
    let mut log = use_activity_log();
    let mut status = use_signal(|| "Starting camera...".to_string());

    use_future(move || {
        let roster = roster.clone();
        async move {
            if let Err(e) = start_camera().await {
                tracing::error!("{}", e);
                status.set("Camera unavailable".to_string());
                log_activity(
                    &mut log,
                    LogLevel::Error,
                    "Could not open the camera. Check the camera permission and device.",
                );
                return;
            }
            if let Err(e) = load_detector().await {
                tracing::error!("{}", e);
                status.set("Face detector unavailable".to_string());
                log_activity(
                    &mut log,
                    LogLevel::Error,
                    "Could not load the face detection model.",
                );
                return;
            }
            status.set(format!("Watching ({} students)", roster.len()));

            let backend = ClassAttendance::new(make_client(), class_id);
            let capture = CaptureLoop::new(
                VideoFrames,
                FaceApiDetector,
                backend,
                move || *thresholds.peek(),
                roster,
            );
            let mut ticker = IntervalTicker::from_millis(tick_interval_ms);
            capture
                .run(&mut ticker, |outcome| match outcome {
                    TickOutcome::NoFace | TickOutcome::CaptureFailed(_) => {}
                    TickOutcome::Matched { message, present: rows } => {
                        log_activity(&mut log, LogLevel::Success, &message);
                        match rows {
                            Some(rows) => present.set(rows),
                            None => log_activity(
                                &mut log,
                                LogLevel::Warning,
                                "Could not refresh today's attendance.",
                            ),
                        }
                    }
                    TickOutcome::NoMatch { message } => {
                        log_activity(&mut log, LogLevel::Warning, &message);
                    }
                    TickOutcome::Failed(message) => {
                        log_activity(&mut log, LogLevel::Error, &message);
                    }
                })
                .await;
        }
    });

    use_drop(stop_camera);

    rsx! {
        div { class: "capture-view",
            div { class: "capture-stage",
                video {
                    id: VIDEO_ID,
                    autoplay: true,
                    muted: true,
                    playsinline: true,
                }
                canvas { id: OVERLAY_ID, class: "capture-overlay" }
            }
            p { class: "capture-status", "{status}" }
        }
    }
}

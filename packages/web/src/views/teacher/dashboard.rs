//! Attendance dashboard.
//!
//! Left: the class roster with a manual "present" button. Right: who checked
//! in on the chosen day, the threshold sliders and the live camera. The
//! camera loop only starts once the roster and the class id are known.

use api::capture::{today, Thresholds};
use api::{AttendanceDetail, NewAttendance, Student};
use chrono::{Local, NaiveDate, Timelike};
use dioxus::prelude::*;
use ui::components::{Field, Input};
use ui::platform::console_config;
use ui::views::{CaptureView, PresentTable, RosterTable, SearchBox, ThresholdControls};
use ui::{log_activity, log_api_error, make_client, use_account, use_activity_log, LogLevel};

use super::load_class;
use crate::views::form::date_value;

#[component]
pub fn Dashboard() -> Element {
    match use_account().and_then(|a| a.teacher_id) {
        Some(teacher_id) => rsx! { TeacherClass { teacher_id } },
        None => rsx! {
            p { class: "form-error", "This account is not linked to a teacher record." }
        },
    }
}

#[component]
fn TeacherClass(teacher_id: i64) -> Element {
    let class = use_resource(move || load_class(teacher_id));

    let view = match &*class.read() {
        None => rsx! { p { "Loading your class..." } },
        Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
        Some(Ok((None, _))) => rsx! {
            p { class: "form-error", "You are not assigned to a class yet." }
        },
        Some(Ok((Some(class_id), students))) => rsx! {
            ClassDashboard { class_id: *class_id, students: students.clone() }
        },
    };
    view
}

#[component]
fn ClassDashboard(class_id: i64, students: Vec<Student>) -> Element {
    let mut log = use_activity_log();
    let config = use_hook(console_config);
    let thresholds = use_signal(|| Thresholds::from_config(&config));
    let mut present = use_signal(Vec::<AttendanceDetail>::new);
    let mut date = use_signal(today);
    let mut roster_query = use_signal(String::new);
    let mut present_query = use_signal(String::new);

    let roster: Vec<i64> = students.iter().map(|s| s.id).collect();

    let _loader = use_resource(move || async move {
        let day = date();
        match make_client().attendance_by_date(class_id, day).await {
            Ok(rows) => present.set(rows),
            Err(e) => {
                present.set(Vec::new());
                log_api_error(&mut log, &e);
            }
        }
    });

    let on_confirm = move |student: Student| async move {
        let now = Local::now().time();
        let entry = NewAttendance {
            student_id: student.id,
            class_id,
            date: today(),
            check_in: now.with_nanosecond(0).unwrap_or(now),
        };
        let client = make_client();
        match client.confirm_attendance(&entry).await {
            Ok(confirmed) => {
                log_activity(
                    &mut log,
                    LogLevel::Success,
                    &format!("{}: {}", student.name, confirmed.message),
                );
                if *date.peek() == entry.date {
                    match client.attendance_by_date(class_id, entry.date).await {
                        Ok(rows) => present.set(rows),
                        Err(e) => log_api_error(&mut log, &e),
                    }
                } else {
                    date.set(entry.date);
                }
            }
            Err(e) => log_api_error(&mut log, &e),
        }
    };

    rsx! {
        div { class: "page-header", h1 { "Attendance" } }
        div { class: "dashboard",
            div { class: "dashboard-panel",
                h2 { "Class roster" }
                SearchBox {
                    value: roster_query(),
                    placeholder: "Search by id or name",
                    oninput: move |v: String| roster_query.set(v),
                }
                RosterTable {
                    students: students.clone(),
                    query: roster_query(),
                    on_confirm: on_confirm,
                }
            }
            div { class: "dashboard-panel",
                CaptureView {
                    class_id,
                    roster,
                    tick_interval_ms: config.attendance.tick_interval_ms,
                    thresholds,
                    present,
                }
                ThresholdControls { thresholds }
                Field { label: "Day", id: "attendance-day",
                    Input {
                        id: "attendance-day",
                        r#type: "date",
                        value: date_value(&date()),
                        oninput: move |e: FormEvent| {
                            if let Ok(day) = NaiveDate::parse_from_str(&e.value(), "%Y-%m-%d") {
                                date.set(day);
                            }
                        },
                    }
                }
                SearchBox {
                    value: present_query(),
                    placeholder: "Search by student name",
                    oninput: move |v: String| present_query.set(v),
                }
                PresentTable { rows: present(), query: present_query() }
            }
        }
    }
}

use api::filter::filter_rows;
use api::import::{plan_from_xlsx, ImportReport};
use api::models::display_date;
use api::Student;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant};
use ui::views::{ConfirmDialog, EmptyRow, SearchBox};
use ui::{log_activity, log_api_error, make_client, use_activity_log, LogLevel};

use crate::Route;

#[component]
pub fn Students() -> Element {
    let nav = use_navigator();
    let mut log = use_activity_log();
    let mut query = use_signal(String::new);
    let mut version = use_signal(|| 0u32);
    let mut pending_delete = use_signal(|| Option::<Student>::None);
    let mut importing = use_signal(|| false);

    let students = use_resource(move || async move {
        let _ = version();
        make_client().list_students().await
    });

    let confirm_delete = move |_| async move {
        let Some(student) = pending_delete.take() else {
            return;
        };
        match make_client().delete_student(student.id).await {
            Ok(()) => {
                log_activity(
                    &mut log,
                    LogLevel::Success,
                    &format!("Deleted student {}", student.name),
                );
                version += 1;
            }
            Err(e) => log_api_error(&mut log, &e),
        }
    };

    let on_import = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        importing.set(true);
        let plan = match file.read_bytes().await {
            Ok(bytes) => plan_from_xlsx(bytes.to_vec()).map_err(|e| e.to_string()),
            Err(e) => Err(format!("Could not read {}: {}", file.name(), e)),
        };
        match plan {
            Ok(plan) => {
                for row in &plan.skipped {
                    log_activity(
                        &mut log,
                        LogLevel::Warning,
                        &format!("Row {} skipped: {}", row.line, row.reason),
                    );
                }
                let client = make_client();
                let mut report = ImportReport::default();
                for student in &plan.students {
                    let result = client
                        .create_student(student)
                        .await
                        .map(|_| ())
                        .map_err(|e| e.user_message());
                    report.record(student, result);
                }
                for failure in &report.failures {
                    log_activity(&mut log, LogLevel::Error, failure);
                }
                let level = if report.failures.is_empty() {
                    LogLevel::Success
                } else {
                    LogLevel::Warning
                };
                log_activity(&mut log, level, &report.summary());
                version += 1;
            }
            Err(message) => log_activity(&mut log, LogLevel::Error, &message),
        }
        importing.set(false);
    };

    rsx! {
        div { class: "page-header",
            h1 { "Students" }
            Button {
                onclick: move |_| {
                    nav.push(Route::NewStudentPage {});
                },
                "New student"
            }
            label { class: "btn btn-secondary",
                if importing() { "Importing..." } else { "Import spreadsheet" }
                input {
                    r#type: "file",
                    accept: ".xlsx",
                    hidden: true,
                    disabled: importing(),
                    onchange: on_import,
                }
            }
        }
        SearchBox {
            value: query(),
            placeholder: "Search by id or name",
            oninput: move |v: String| query.set(v),
        }
        match &*students.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok(list)) => rsx! {
                StudentTable {
                    students: list.clone(),
                    query: query(),
                    on_delete: move |s: Student| pending_delete.set(Some(s)),
                }
            },
        }
        if let Some(student) = pending_delete() {
            ConfirmDialog {
                message: format!("Delete student {}?", student.name),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn StudentTable(students: Vec<Student>, query: String, on_delete: EventHandler<Student>) -> Element {
    let nav = use_navigator();
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
                    th { "Class" }
                    th { "Parents" }
                    th { "" }
                }
            }
            tbody {
                if !filtered.any_match {
                    EmptyRow { colspan: 7 }
                }
                for student in rows {
                    tr { key: "{student.id}",
                        td { "{student.id}" }
                        td { "{student.name}" }
                        td { "{student.gender}" }
                        td { {display_date(&student.birth_date)} }
                        td { {student.class_label()} }
                        td { {student.parent_names()} }
                        td { class: "row-actions",
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: {
                                    let id = student.id;
                                    move |_| {
                                        nav.push(Route::EditStudent { id });
                                    }
                                },
                                "Edit"
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: {
                                    let student = student.clone();
                                    move |_| on_delete.call(student.clone())
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

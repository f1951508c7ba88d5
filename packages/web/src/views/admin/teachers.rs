use api::filter::filter_rows;
use api::models::display_date;
use api::Teacher;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant};
use ui::views::{ConfirmDialog, EmptyRow, SearchBox};
use ui::{log_activity, log_api_error, make_client, use_activity_log, LogLevel};

use crate::Route;

#[component]
pub fn Teachers() -> Element {
    let nav = use_navigator();
    let mut log = use_activity_log();
    let mut query = use_signal(String::new);
    let mut version = use_signal(|| 0u32);
    let mut pending_delete = use_signal(|| Option::<Teacher>::None);

    let teachers = use_resource(move || async move {
        let _ = version();
        make_client().list_teachers().await
    });

    let confirm_delete = move |_| async move {
        let Some(teacher) = pending_delete.take() else {
            return;
        };
        match make_client().delete_teacher(teacher.id).await {
            Ok(()) => {
                log_activity(
                    &mut log,
                    LogLevel::Success,
                    &format!("Deleted teacher {}", teacher.name),
                );
                version += 1;
            }
            Err(e) => log_api_error(&mut log, &e),
        }
    };

    rsx! {
        div { class: "page-header",
            h1 { "Teachers" }
            Button {
                onclick: move |_| {
                    nav.push(Route::NewTeacherPage {});
                },
                "New teacher"
            }
        }
        SearchBox {
            value: query(),
            placeholder: "Search by id or name",
            oninput: move |v: String| query.set(v),
        }
        match &*teachers.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok(list)) => rsx! {
                TeacherTable {
                    teachers: list.clone(),
                    query: query(),
                    on_delete: move |t: Teacher| pending_delete.set(Some(t)),
                }
            },
        }
        if let Some(teacher) = pending_delete() {
            ConfirmDialog {
                message: format!("Delete teacher {}?", teacher.name),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn TeacherTable(teachers: Vec<Teacher>, query: String, on_delete: EventHandler<Teacher>) -> Element {
    let nav = use_navigator();
    let filtered = filter_rows(&teachers, &query);
    let rows: Vec<Teacher> = filtered.rows.into_iter().cloned().collect();

    rsx! {
        table { class: "data-table",
            thead {
                tr {
                    th { "ID" }
                    th { "Name" }
                    th { "Gender" }
                    th { "Birth date" }
                    th { "Phone" }
                    th { "Email" }
                    th { "Class" }
                    th { "" }
                }
            }
            tbody {
                if !filtered.any_match {
                    EmptyRow { colspan: 8 }
                }
                for teacher in rows {
                    tr { key: "{teacher.id}",
                        td { "{teacher.id}" }
                        td { "{teacher.name}" }
                        td { "{teacher.gender}" }
                        td { {display_date(&teacher.birth_date)} }
                        td { "{teacher.phone}" }
                        td { "{teacher.email}" }
                        td { {teacher.class_name.clone().unwrap_or_else(|| "-".to_string())} }
                        td { class: "row-actions",
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: {
                                    let id = teacher.id;
                                    move |_| {
                                        nav.push(Route::EditTeacher { id });
                                    }
                                },
                                "Edit"
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: {
                                    let teacher = teacher.clone();
                                    move |_| on_delete.call(teacher.clone())
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

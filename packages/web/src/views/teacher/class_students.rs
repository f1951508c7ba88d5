use api::filter::filter_rows;
use api::models::display_date;
use api::Student;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant};
use ui::views::{ConfirmDialog, EmptyRow, SearchBox};
use ui::{log_activity, log_api_error, make_client, use_account, use_activity_log, LogLevel};

/// Students of the signed-in teacher's class.
#[component]
pub fn ClassStudents() -> Element {
    let teacher_id = use_account().and_then(|a| a.teacher_id);
    let mut log = use_activity_log();
    let mut query = use_signal(String::new);
    let mut version = use_signal(|| 0u32);
    let mut pending_delete = use_signal(|| Option::<Student>::None);

    let students = use_resource(move || async move {
        let _ = version();
        match teacher_id {
            Some(id) => make_client().list_class_students(id).await.map(Some),
            None => Ok(None),
        }
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
                    &format!("Removed {} from the class", student.name),
                );
                version += 1;
            }
            Err(e) => log_api_error(&mut log, &e),
        }
    };

    rsx! {
        div { class: "page-header", h1 { "My class" } }
        SearchBox {
            value: query(),
            placeholder: "Search by id or name",
            oninput: move |v: String| query.set(v),
        }
        match &*students.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok(None)) => rsx! {
                p { class: "form-error", "This account is not linked to a teacher record." }
            },
            Some(Ok(Some(list))) => {
                let filtered = filter_rows(list, &query());
                let rows: Vec<Student> = filtered.rows.into_iter().cloned().collect();
                rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "ID" }
                                th { "Name" }
                                th { "Gender" }
                                th { "Birth date" }
                                th { "Parents" }
                                th { "" }
                            }
                        }
                        tbody {
                            if !filtered.any_match {
                                EmptyRow { colspan: 6 }
                            }
                            for student in rows {
                                tr { key: "{student.id}",
                                    td { "{student.id}" }
                                    td { "{student.name}" }
                                    td { "{student.gender}" }
                                    td { {display_date(&student.birth_date)} }
                                    td { {student.parent_names()} }
                                    td {
                                        Button {
                                            variant: ButtonVariant::Destructive,
                                            onclick: {
                                                let student = student.clone();
                                                move |_| pending_delete.set(Some(student.clone()))
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

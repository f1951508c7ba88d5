use api::filter::filter_rows;
use api::Class;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant};
use ui::views::{ConfirmDialog, EmptyRow, SearchBox};
use ui::{log_activity, log_api_error, make_client, use_activity_log, LogLevel};

use crate::Route;

#[component]
pub fn Classes() -> Element {
    let nav = use_navigator();
    let mut log = use_activity_log();
    let mut query = use_signal(String::new);
    let mut version = use_signal(|| 0u32);
    let mut pending_delete = use_signal(|| Option::<Class>::None);

    let classes = use_resource(move || async move {
        let _ = version();
        make_client().list_classes().await
    });

    let confirm_delete = move |_| async move {
        let Some(class) = pending_delete.take() else {
            return;
        };
        match make_client().delete_class(class.id).await {
            Ok(()) => {
                log_activity(
                    &mut log,
                    LogLevel::Success,
                    &format!("Deleted class {}", class.name),
                );
                version += 1;
            }
            Err(e) => log_api_error(&mut log, &e),
        }
    };

    rsx! {
        div { class: "page-header",
            h1 { "Classes" }
            Button {
                onclick: move |_| {
                    nav.push(Route::NewClassPage {});
                },
                "New class"
            }
        }
        SearchBox {
            value: query(),
            placeholder: "Search by class name",
            oninput: move |v: String| query.set(v),
        }
        match &*classes.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok(list)) => rsx! {
                ClassTable {
                    classes: list.clone(),
                    query: query(),
                    on_delete: move |c: Class| pending_delete.set(Some(c)),
                }
            },
        }
        if let Some(class) = pending_delete() {
            ConfirmDialog {
                message: format!("Delete class {}?", class.name),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn ClassTable(classes: Vec<Class>, query: String, on_delete: EventHandler<Class>) -> Element {
    let nav = use_navigator();
    let filtered = filter_rows(&classes, &query);
    let rows: Vec<Class> = filtered.rows.into_iter().cloned().collect();

    rsx! {
        table { class: "data-table",
            thead {
                tr {
                    th { "ID" }
                    th { "Class" }
                    th { "Academic year" }
                    th { "Teachers" }
                    th { "Students" }
                    th { "" }
                }
            }
            tbody {
                if !filtered.any_match {
                    EmptyRow { colspan: 6 }
                }
                for class in rows {
                    tr { key: "{class.id}",
                        td { "{class.id}" }
                        td { "{class.name}" }
                        td { {class.year_label()} }
                        td { {class.teacher_names()} }
                        td { {class.student_count.unwrap_or(0).to_string()} }
                        td { class: "row-actions",
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: {
                                    let id = class.id;
                                    move |_| {
                                        nav.push(Route::EditClass { id });
                                    }
                                },
                                "Edit"
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: {
                                    let class = class.clone();
                                    move |_| on_delete.call(class.clone())
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

use api::Parent;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant};
use ui::views::{ConfirmDialog, EmptyRow};
use ui::{log_activity, log_api_error, make_client, use_account, use_activity_log, LogLevel};

use crate::Route;

fn or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}

/// Parents linked to the signed-in student.
#[component]
pub fn Parents() -> Element {
    let student_id = use_account().and_then(|a| a.student_id);
    let nav = use_navigator();
    let mut log = use_activity_log();
    let mut version = use_signal(|| 0u32);
    let mut pending_delete = use_signal(|| Option::<Parent>::None);

    let parents = use_resource(move || async move {
        let _ = version();
        match student_id {
            Some(id) => make_client().list_student_parents(id).await,
            None => Ok(Vec::new()),
        }
    });

    let confirm_delete = move |_| async move {
        let Some(id) = pending_delete.take().and_then(|p| p.id) else {
            return;
        };
        match make_client().delete_parent(id).await {
            Ok(()) => {
                log_activity(&mut log, LogLevel::Success, "Parent deleted");
                version += 1;
            }
            Err(e) => log_api_error(&mut log, &e),
        }
    };

    rsx! {
        div { class: "page-header", h1 { "Parents" } }
        match &*parents.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok(list)) => rsx! {
                table { class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Relationship" }
                            th { "Gender" }
                            th { "Phone" }
                            th { "Address" }
                            th { "" }
                        }
                    }
                    tbody {
                        if list.is_empty() {
                            EmptyRow { colspan: 6, message: "No parents recorded" }
                        }
                        for (i, parent) in list.iter().cloned().enumerate() {
                            tr { key: "{i}",
                                td { {or_dash(&parent.name)} }
                                td { {or_dash(&parent.relationship)} }
                                td { {or_dash(&parent.gender)} }
                                td { {or_dash(&parent.phone)} }
                                td { {or_dash(&parent.address)} }
                                td { class: "row-actions",
                                    if let Some(id) = parent.id {
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            onclick: move |_| {
                                                nav.push(Route::ParentEdit { id });
                                            },
                                            "Edit"
                                        }
                                        Button {
                                            variant: ButtonVariant::Destructive,
                                            onclick: {
                                                let parent = parent.clone();
                                                move |_| pending_delete.set(Some(parent.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
        }
        if let Some(parent) = pending_delete() {
            ConfirmDialog {
                message: format!("Delete {}?", parent.name.unwrap_or_else(|| "this parent".to_string())),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_render_as_dash() {
        assert_eq!(or_dash(&None), "-");
        assert_eq!(or_dash(&Some(String::new())), "-");
        assert_eq!(or_dash(&Some("Cha".into())), "Cha");
    }
}

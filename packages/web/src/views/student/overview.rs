use api::models::{display_date, ImageOwner};
use api::{validate, Student, StudentUpdate};
use dioxus::prelude::*;
use ui::components::{Button, Field, Input, Select};
use ui::views::PortraitUpload;
use ui::{log_activity, make_client, use_account, use_activity_log, LogLevel};

use crate::views::form::{date_value, gender_options, parse_date};

/// The signed-in student's record and portrait.
#[component]
pub fn Overview() -> Element {
    let student_id = use_account().and_then(|a| a.student_id);

    let student = use_resource(move || async move {
        match student_id {
            Some(id) => make_client().get_student(id).await.map(Some),
            None => Ok(None),
        }
    });

    rsx! {
        div { class: "page-header", h1 { "My record" } }
        match &*student.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok(None)) => rsx! {
                p { class: "form-error", "This account is not linked to a student record." }
            },
            Some(Ok(Some(student))) => rsx! {
                div { class: "profile",
                    PortraitUpload { owner: ImageOwner::Student, owner_id: student.id }
                    div {
                        dl { class: "record-summary",
                            dt { "Class" }
                            dd { {student.class_label()} }
                            dt { "School year" }
                            dd { {student.school_year.clone().unwrap_or_else(|| "-".to_string())} }
                            dt { "Birth date" }
                            dd { {display_date(&student.birth_date)} }
                            dt { "Parents" }
                            dd { {student.parent_names()} }
                        }
                        RecordForm { student: student.clone() }
                    }
                }
            },
        }
    }
}

#[component]
fn RecordForm(student: Student) -> Element {
    let mut log = use_activity_log();
    let original = student.clone();

    let mut name = use_signal(|| student.name.clone());
    let mut gender = use_signal(|| student.gender.clone());
    let mut birth_date = use_signal(|| date_value(&student.birth_date));
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let original = original.clone();
        spawn(async move {
            error.set(None);

            let n = match validate::required("Name", &name()) {
                Ok(n) => n.to_string(),
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let birth = match parse_date("Birth date", &birth_date()) {
                Ok(d) => d,
                Err(msg) => {
                    error.set(Some(msg));
                    return;
                }
            };

            let update = StudentUpdate {
                name: Some(n),
                gender: Some(gender()),
                birth_date: Some(birth),
                ..StudentUpdate::from_student(&original)
            };

            saving.set(true);
            let result = make_client().update_student(original.id, &update).await;
            saving.set(false);

            match result {
                Ok(_) => log_activity(&mut log, LogLevel::Success, "Record saved"),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    rsx! {
        form { onsubmit: handle_submit,
            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }
            div { class: "form-grid",
                Field { label: "Name", id: "record-name",
                    Input { id: "record-name", value: name(), oninput: move |e: FormEvent| name.set(e.value()) }
                }
                Field { label: "Gender", id: "record-gender",
                    Select {
                        id: "record-gender",
                        options: gender_options(),
                        value: gender(),
                        onchange: move |e: FormEvent| gender.set(e.value()),
                    }
                }
                Field { label: "Birth date", id: "record-birth",
                    Input {
                        id: "record-birth",
                        r#type: "date",
                        value: birth_date(),
                        oninput: move |e: FormEvent| birth_date.set(e.value()),
                    }
                }
            }
            div { class: "form-actions",
                Button { r#type: "submit", disabled: saving(),
                    if saving() { "Saving..." } else { "Save" }
                }
            }
        }
    }
}

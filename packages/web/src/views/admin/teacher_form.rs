//! Create and edit forms for teachers.

use api::{validate, Class, NewTeacher, Role, Teacher, TeacherUpdate};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Field, Input, Select};
use ui::{log_activity, make_client, use_activity_log, LogLevel};

use crate::views::form::{date_value, gender_options, parse_date};
use crate::Route;

#[component]
pub fn NewTeacherPage() -> Element {
    rsx! {
        div { class: "page-header", h1 { "New teacher" } }
        TeacherForm {}
    }
}

#[component]
pub fn EditTeacher(id: i64) -> Element {
    let loaded = use_resource(move || async move {
        let client = make_client();
        let teacher = client.get_teacher(id).await?;
        let classes = client.list_classes().await?;
        Ok::<_, api::ApiError>((teacher, classes))
    });

    rsx! {
        div { class: "page-header", h1 { "Edit teacher" } }
        match &*loaded.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok((teacher, classes))) => rsx! {
                TeacherForm { existing: teacher.clone(), classes: classes.clone() }
            },
        }
    }
}

/// Fields of a teacher record. With `existing` the form edits that record and
/// offers the class assignment; without it, it creates a teacher account.
#[component]
fn TeacherForm(existing: Option<Teacher>, #[props(default)] classes: Vec<Class>) -> Element {
    let nav = use_navigator();
    let mut log = use_activity_log();
    let editing = existing.clone();

    let mut name = use_signal(|| existing.as_ref().map(|t| t.name.clone()).unwrap_or_default());
    let mut gender = use_signal(|| {
        existing
            .as_ref()
            .map(|t| t.gender.clone())
            .unwrap_or_else(|| "Nam".to_string())
    });
    let mut birth_date = use_signal(|| {
        existing
            .as_ref()
            .map(|t| date_value(&t.birth_date))
            .unwrap_or_default()
    });
    let mut phone = use_signal(|| existing.as_ref().map(|t| t.phone.clone()).unwrap_or_default());
    let mut address = use_signal(|| existing.as_ref().map(|t| t.address.clone()).unwrap_or_default());
    let mut email = use_signal(|| existing.as_ref().map(|t| t.email.clone()).unwrap_or_default());
    let mut class_id = use_signal(|| {
        existing
            .as_ref()
            .and_then(|t| t.class_id)
            .map(|id| id.to_string())
            .unwrap_or_default()
    });
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let class_options: Vec<(String, String)> = classes
        .iter()
        .map(|c| (c.id.to_string(), c.name.clone()))
        .collect();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let editing = editing.clone();
        spawn(async move {
            error.set(None);

            let checked = (|| {
                let n = validate::required("Name", &name())?.to_string();
                let p = validate::phone(&phone())?.to_string();
                let e = validate::email(&email())?.to_string();
                Ok::<_, api::ValidationError>((n, p, e))
            })();
            let (n, p, e) = match checked {
                Ok(fields) => fields,
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

            let client = make_client();
            saving.set(true);
            let result = match &editing {
                Some(teacher) => {
                    let update = TeacherUpdate {
                        name: Some(n),
                        gender: Some(gender()),
                        birth_date: Some(birth),
                        address: Some(address().trim().to_string()),
                        phone: Some(p),
                        email: Some(e),
                        class_id: class_id().parse().ok(),
                        ..TeacherUpdate::from_teacher(teacher)
                    };
                    client.update_teacher(&update).await
                }
                None => {
                    let account = (|| {
                        let u = validate::required("Username", &username())?.to_string();
                        let pw = validate::required("Password", &password())?.to_string();
                        Ok::<_, api::ValidationError>((u, pw))
                    })();
                    let (u, pw) = match account {
                        Ok(a) => a,
                        Err(err) => {
                            saving.set(false);
                            error.set(Some(err.to_string()));
                            return;
                        }
                    };
                    let teacher = NewTeacher {
                        name: n,
                        gender: gender(),
                        birth_date: birth,
                        phone: p,
                        address: address().trim().to_string(),
                        email: e,
                        username: u,
                        password: pw,
                        role_code: Role::Teacher.code(),
                    };
                    client.create_teacher(&teacher).await
                }
            };
            saving.set(false);

            match result {
                Ok(teacher) => {
                    log_activity(
                        &mut log,
                        LogLevel::Success,
                        &format!("Saved teacher {}", teacher.name),
                    );
                    nav.push(Route::Teachers {});
                }
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
                Field { label: "Name", id: "teacher-name",
                    Input { id: "teacher-name", value: name(), oninput: move |e: FormEvent| name.set(e.value()) }
                }
                Field { label: "Gender", id: "teacher-gender",
                    Select {
                        id: "teacher-gender",
                        options: gender_options(),
                        value: gender(),
                        onchange: move |e: FormEvent| gender.set(e.value()),
                    }
                }
                Field { label: "Birth date", id: "teacher-birth",
                    Input {
                        id: "teacher-birth",
                        r#type: "date",
                        value: birth_date(),
                        oninput: move |e: FormEvent| birth_date.set(e.value()),
                    }
                }
                Field { label: "Phone", id: "teacher-phone",
                    Input { id: "teacher-phone", r#type: "tel", value: phone(), oninput: move |e: FormEvent| phone.set(e.value()) }
                }
                Field { label: "Address", id: "teacher-address",
                    Input { id: "teacher-address", value: address(), oninput: move |e: FormEvent| address.set(e.value()) }
                }
                Field { label: "Email", id: "teacher-email",
                    Input { id: "teacher-email", r#type: "email", value: email(), oninput: move |e: FormEvent| email.set(e.value()) }
                }
                if existing.is_some() {
                    Field { label: "Class", id: "teacher-class",
                        Select {
                            id: "teacher-class",
                            placeholder: "No class",
                            options: class_options,
                            value: class_id(),
                            onchange: move |e: FormEvent| class_id.set(e.value()),
                        }
                    }
                } else {
                    Field { label: "Username", id: "teacher-username",
                        Input { id: "teacher-username", value: username(), oninput: move |e: FormEvent| username.set(e.value()) }
                    }
                    Field { label: "Password", id: "teacher-password",
                        Input {
                            id: "teacher-password",
                            r#type: "password",
                            value: password(),
                            oninput: move |e: FormEvent| password.set(e.value()),
                        }
                    }
                }
            }
            div { class: "form-actions",
                Button { r#type: "submit", disabled: saving(),
                    if saving() { "Saving..." } else { "Save" }
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| {
                        nav.push(Route::Teachers {});
                    },
                    "Cancel"
                }
            }
        }
    }
}

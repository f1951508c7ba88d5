//! The signed-in teacher's own record and portrait.

use api::models::ImageOwner;
use api::{validate, Teacher, TeacherUpdate};
use dioxus::prelude::*;
use ui::components::{Button, Field, Input, Select};
use ui::views::PortraitUpload;
use ui::{log_activity, make_client, use_account, use_activity_log, LogLevel};

use crate::views::form::{date_value, gender_options, parse_date};

#[component]
pub fn TeacherProfile() -> Element {
    let teacher_id = use_account().and_then(|a| a.teacher_id);

    let teacher = use_resource(move || async move {
        match teacher_id {
            Some(id) => make_client().get_teacher(id).await.map(Some),
            None => Ok(None),
        }
    });

    rsx! {
        div { class: "page-header", h1 { "Profile" } }
        match &*teacher.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok(None)) => rsx! {
                p { class: "form-error", "This account is not linked to a teacher record." }
            },
            Some(Ok(Some(teacher))) => rsx! {
                div { class: "profile",
                    PortraitUpload { owner: ImageOwner::Teacher, owner_id: teacher.id }
                    ProfileForm { teacher: teacher.clone() }
                }
            },
        }
    }
}

#[component]
fn ProfileForm(teacher: Teacher) -> Element {
    let mut log = use_activity_log();
    let original = teacher.clone();

    let mut name = use_signal(|| teacher.name.clone());
    let mut gender = use_signal(|| teacher.gender.clone());
    let mut birth_date = use_signal(|| date_value(&teacher.birth_date));
    let mut phone = use_signal(|| teacher.phone.clone());
    let mut address = use_signal(|| teacher.address.clone());
    let mut email = use_signal(|| teacher.email.clone());
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let original = original.clone();
        spawn(async move {
            error.set(None);

            let fields = (|| {
                let n = validate::required("Name", &name())?.to_string();
                let p = validate::phone(&phone())?.to_string();
                let e = validate::email(&email())?.to_string();
                Ok::<_, api::ValidationError>((n, p, e))
            })();
            let (n, p, e) = match fields {
                Ok(f) => f,
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

            let update = TeacherUpdate {
                name: Some(n),
                gender: Some(gender()),
                birth_date: Some(birth),
                address: Some(address().trim().to_string()),
                phone: Some(p),
                email: Some(e),
                ..TeacherUpdate::from_teacher(&original)
            };

            saving.set(true);
            let result = make_client().update_teacher(&update).await;
            saving.set(false);

            match result {
                Ok(_) => log_activity(&mut log, LogLevel::Success, "Profile saved"),
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
                Field { label: "Name", id: "profile-name",
                    Input { id: "profile-name", value: name(), oninput: move |e: FormEvent| name.set(e.value()) }
                }
                Field { label: "Gender", id: "profile-gender",
                    Select {
                        id: "profile-gender",
                        options: gender_options(),
                        value: gender(),
                        onchange: move |e: FormEvent| gender.set(e.value()),
                    }
                }
                Field { label: "Birth date", id: "profile-birth",
                    Input {
                        id: "profile-birth",
                        r#type: "date",
                        value: birth_date(),
                        oninput: move |e: FormEvent| birth_date.set(e.value()),
                    }
                }
                Field { label: "Phone", id: "profile-phone",
                    Input { id: "profile-phone", r#type: "tel", value: phone(), oninput: move |e: FormEvent| phone.set(e.value()) }
                }
                Field { label: "Address", id: "profile-address",
                    Input { id: "profile-address", value: address(), oninput: move |e: FormEvent| address.set(e.value()) }
                }
                Field { label: "Email", id: "profile-email",
                    Input { id: "profile-email", r#type: "email", value: email(), oninput: move |e: FormEvent| email.set(e.value()) }
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

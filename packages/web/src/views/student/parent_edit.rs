//! One parent's details and enrolled face images.

use api::{validate, Parent, ParentUpdate};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Field, Input, Select};
use ui::views::ParentGallery;
use ui::{log_activity, make_client, use_activity_log, LogLevel};

use crate::views::form::{date_value, gender_options, non_blank, relationship_options};
use crate::Route;

#[component]
pub fn ParentEdit(id: i64) -> Element {
    let parent = use_resource(move || async move { make_client().get_parent(id).await });

    rsx! {
        div { class: "page-header", h1 { "Parent" } }
        match &*parent.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok(parent)) => rsx! {
                ParentForm { id, parent: parent.clone() }
                ParentGallery { parent_id: id }
            },
        }
    }
}

#[component]
fn ParentForm(id: i64, parent: Parent) -> Element {
    let nav = use_navigator();
    let mut log = use_activity_log();

    let mut name = use_signal(|| parent.name.clone().unwrap_or_default());
    let mut gender = use_signal(|| parent.gender.clone().unwrap_or_else(|| "Nam".to_string()));
    let mut birth_date = use_signal(|| parent.birth_date.as_ref().map(date_value).unwrap_or_default());
    let mut phone = use_signal(|| parent.phone.clone().unwrap_or_default());
    let mut address = use_signal(|| parent.address.clone().unwrap_or_default());
    let mut relationship = use_signal(|| {
        parent
            .relationship
            .clone()
            .unwrap_or_else(|| "Cha".to_string())
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let checked = (|| {
                let n = validate::required("Name", &name())?.to_string();
                let p = validate::optional_phone(&phone())?.map(str::to_string);
                Ok::<_, api::ValidationError>((n, p))
            })();
            let (n, p) = match checked {
                Ok(fields) => fields,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let birth = match non_blank(&birth_date()) {
                Some(value) => match chrono::NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                    Ok(d) => Some(d),
                    Err(_) => {
                        error.set(Some("Birth date is not a valid date".to_string()));
                        return;
                    }
                },
                None => None,
            };

            let update = ParentUpdate {
                id: Some(id),
                name: Some(n),
                gender: non_blank(&gender()),
                birth_date: birth,
                phone: p,
                address: non_blank(&address()),
                relationship: non_blank(&relationship()),
            };

            saving.set(true);
            let result = make_client().update_parent(id, &update).await;
            saving.set(false);

            match result {
                Ok(_) => log_activity(&mut log, LogLevel::Success, "Parent saved"),
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
                Field { label: "Name", id: "parent-name",
                    Input { id: "parent-name", value: name(), oninput: move |e: FormEvent| name.set(e.value()) }
                }
                Field { label: "Relationship", id: "parent-relationship",
                    Select {
                        id: "parent-relationship",
                        options: relationship_options(),
                        value: relationship(),
                        onchange: move |e: FormEvent| relationship.set(e.value()),
                    }
                }
                Field { label: "Gender", id: "parent-gender",
                    Select {
                        id: "parent-gender",
                        options: gender_options(),
                        value: gender(),
                        onchange: move |e: FormEvent| gender.set(e.value()),
                    }
                }
                Field { label: "Birth date", id: "parent-birth",
                    Input {
                        id: "parent-birth",
                        r#type: "date",
                        value: birth_date(),
                        oninput: move |e: FormEvent| birth_date.set(e.value()),
                    }
                }
                Field { label: "Phone", id: "parent-phone",
                    Input { id: "parent-phone", r#type: "tel", value: phone(), oninput: move |e: FormEvent| phone.set(e.value()) }
                }
                Field { label: "Address", id: "parent-address",
                    Input { id: "parent-address", value: address(), oninput: move |e: FormEvent| address.set(e.value()) }
                }
            }
            div { class: "form-actions",
                Button { r#type: "submit", disabled: saving(),
                    if saving() { "Saving..." } else { "Save" }
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| {
                        nav.push(Route::Parents {});
                    },
                    "Back"
                }
            }
        }
    }
}

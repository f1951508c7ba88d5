//! Create and edit forms for classes: name, academic year and teachers.

use api::{validate, AcademicYear, Class, ClassUpdate, NewClass, Teacher};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Field, Input, Select};
use ui::{log_activity, make_client, use_activity_log, LogLevel};

use crate::Route;

/// Years and teachers the form can pick from.
async fn load_choices() -> Result<(Vec<AcademicYear>, Vec<Teacher>), api::ApiError> {
    let client = make_client();
    let years = client.list_years().await?;
    let teachers = client.list_teachers().await?;
    Ok((years, teachers))
}

#[component]
pub fn NewClassPage() -> Element {
    let choices = use_resource(load_choices);

    rsx! {
        div { class: "page-header", h1 { "New class" } }
        match &*choices.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok((years, teachers))) => rsx! {
                ClassForm { years: years.clone(), teachers: teachers.clone() }
            },
        }
    }
}

#[component]
pub fn EditClass(id: i64) -> Element {
    let loaded = use_resource(move || async move {
        let class = make_client().get_class(id).await?;
        let (years, teachers) = load_choices().await?;
        Ok::<_, api::ApiError>((class, years, teachers))
    });

    rsx! {
        div { class: "page-header", h1 { "Edit class" } }
        match &*loaded.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok((class, years, teachers))) => rsx! {
                ClassForm {
                    existing: class.clone(),
                    years: years.clone(),
                    teachers: teachers.clone(),
                }
            },
        }
    }
}

#[component]
fn ClassForm(existing: Option<Class>, years: Vec<AcademicYear>, teachers: Vec<Teacher>) -> Element {
    let nav = use_navigator();
    let mut log = use_activity_log();
    let class_id = existing.as_ref().map(|c| c.id);

    let mut name = use_signal(|| existing.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let mut year_id = use_signal(|| {
        existing
            .as_ref()
            .and_then(|c| c.year.as_ref())
            .map(|y| y.id.to_string())
            .unwrap_or_default()
    });
    let mut selected = use_signal(|| {
        existing
            .as_ref()
            .map(Class::teacher_ids)
            .unwrap_or_default()
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let year_options: Vec<(String, String)> = years
        .iter()
        .map(|y| (y.id.to_string(), y.label.clone()))
        .collect();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let teacher_ids = selected();
            let year = year_id().parse::<i64>().ok();
            let (n, y) = match validate::class_form(&name(), year, &teacher_ids) {
                Ok((n, y)) => (n.to_string(), y),
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };

            let client = make_client();
            saving.set(true);
            let result = match class_id {
                Some(id) => {
                    let update = ClassUpdate {
                        id,
                        name: Some(n),
                        year_id: Some(y),
                        teacher_ids: Some(teacher_ids),
                    };
                    client.update_class(&update).await
                }
                None => {
                    let class = NewClass {
                        name: n,
                        year_id: y,
                        teacher_ids,
                    };
                    client.create_class(&class).await
                }
            };
            saving.set(false);

            match result {
                Ok(class) => {
                    log_activity(&mut log, LogLevel::Success, &format!("Saved class {}", class.name));
                    nav.push(Route::Classes {});
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
                Field { label: "Class name", id: "class-name",
                    Input { id: "class-name", value: name(), oninput: move |e: FormEvent| name.set(e.value()) }
                }
                Field { label: "Academic year", id: "class-year",
                    Select {
                        id: "class-year",
                        placeholder: "Choose a year",
                        options: year_options,
                        value: year_id(),
                        onchange: move |e: FormEvent| year_id.set(e.value()),
                    }
                }
            }
            div { class: "form-section",
                h3 { "Teachers" }
                for teacher in teachers {
                    label { key: "{teacher.id}", class: "checkbox-row",
                        input {
                            r#type: "checkbox",
                            checked: selected.read().contains(&teacher.id),
                            onchange: {
                                let teacher_id = teacher.id;
                                move |e: FormEvent| {
                                    let mut ids = selected.write();
                                    ids.retain(|id| *id != teacher_id);
                                    if e.checked() {
                                        ids.push(teacher_id);
                                    }
                                }
                            },
                        }
                        " {teacher.name}"
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
                        nav.push(Route::Classes {});
                    },
                    "Cancel"
                }
            }
        }
    }
}

//! Create and edit forms for students. A new student gets an account and any
//! number of parent entries in one request.

use api::{validate, NewStudent, ParentInfo, Role, Student, StudentUpdate};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Field, Input, Select};
use ui::{log_activity, make_client, use_activity_log, LogLevel};

use crate::views::form::{date_value, gender_options, non_blank, parse_date, relationship_options};
use crate::Route;

/// One parent row of the create form.
#[derive(Debug, Clone, PartialEq)]
struct ParentDraft {
    name: String,
    relationship: String,
    gender: String,
}

impl Default for ParentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            relationship: "Cha".to_string(),
            gender: "Nam".to_string(),
        }
    }
}

/// Drafts with a name, as request entries. Rows left blank are skipped.
fn parent_entries(drafts: &[ParentDraft]) -> Vec<ParentInfo> {
    drafts
        .iter()
        .filter(|d| !d.name.trim().is_empty())
        .map(|d| ParentInfo::new(d.name.trim(), &d.relationship, &d.gender))
        .collect()
}

#[component]
pub fn NewStudentPage() -> Element {
    rsx! {
        div { class: "page-header", h1 { "New student" } }
        StudentForm {}
    }
}

#[component]
pub fn EditStudent(id: i64) -> Element {
    let student = use_resource(move || async move { make_client().get_student(id).await });

    rsx! {
        div { class: "page-header", h1 { "Edit student" } }
        match &*student.read() {
            None => rsx! { p { "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "form-error", {e.user_message()} } },
            Some(Ok(student)) => rsx! {
                StudentForm { existing: student.clone() }
            },
        }
    }
}

#[component]
fn StudentForm(existing: Option<Student>) -> Element {
    let nav = use_navigator();
    let mut log = use_activity_log();
    let editing = existing.clone();

    let mut name = use_signal(|| existing.as_ref().map(|s| s.name.clone()).unwrap_or_default());
    let mut gender = use_signal(|| {
        existing
            .as_ref()
            .map(|s| s.gender.clone())
            .unwrap_or_else(|| "Nam".to_string())
    });
    let mut birth_date = use_signal(|| {
        existing
            .as_ref()
            .map(|s| date_value(&s.birth_date))
            .unwrap_or_default()
    });
    let mut class_name = use_signal(|| {
        existing
            .as_ref()
            .and_then(|s| s.class_name.clone())
            .unwrap_or_default()
    });
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut parents = use_signal(|| vec![ParentDraft::default()]);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let editing = editing.clone();
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

            let client = make_client();
            let result = match &editing {
                Some(student) => {
                    let update = StudentUpdate {
                        name: Some(n),
                        gender: Some(gender()),
                        birth_date: Some(birth),
                        class_name: non_blank(&class_name()),
                        ..StudentUpdate::from_student(student)
                    };
                    saving.set(true);
                    client.update_student(student.id, &update).await
                }
                None => {
                    let account = validate::required("Username", &username())
                        .map(str::to_string)
                        .and_then(|u| {
                            validate::required("Password", &password()).map(|p| (u, p.to_string()))
                        });
                    let (u, pw) = match account {
                        Ok(a) => a,
                        Err(err) => {
                            error.set(Some(err.to_string()));
                            return;
                        }
                    };
                    let student = NewStudent {
                        name: n,
                        gender: gender(),
                        birth_date: birth,
                        username: u,
                        password: pw,
                        role_code: Role::Student.code(),
                        parents: parent_entries(&parents.read()),
                    };
                    saving.set(true);
                    client.create_student(&student).await
                }
            };
            saving.set(false);

            match result {
                Ok(student) => {
                    log_activity(
                        &mut log,
                        LogLevel::Success,
                        &format!("Saved student {}", student.name),
                    );
                    nav.push(Route::Students {});
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    let drafts = parents();

    rsx! {
        form { onsubmit: handle_submit,
            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }
            div { class: "form-grid",
                Field { label: "Name", id: "student-name",
                    Input { id: "student-name", value: name(), oninput: move |e: FormEvent| name.set(e.value()) }
                }
                Field { label: "Gender", id: "student-gender",
                    Select {
                        id: "student-gender",
                        options: gender_options(),
                        value: gender(),
                        onchange: move |e: FormEvent| gender.set(e.value()),
                    }
                }
                Field { label: "Birth date", id: "student-birth",
                    Input {
                        id: "student-birth",
                        r#type: "date",
                        value: birth_date(),
                        oninput: move |e: FormEvent| birth_date.set(e.value()),
                    }
                }
                if existing.is_some() {
                    Field { label: "Class", id: "student-class",
                        Input {
                            id: "student-class",
                            value: class_name(),
                            oninput: move |e: FormEvent| class_name.set(e.value()),
                        }
                    }
                } else {
                    Field { label: "Username", id: "student-username",
                        Input { id: "student-username", value: username(), oninput: move |e: FormEvent| username.set(e.value()) }
                    }
                    Field { label: "Password", id: "student-password",
                        Input {
                            id: "student-password",
                            r#type: "password",
                            value: password(),
                            oninput: move |e: FormEvent| password.set(e.value()),
                        }
                    }
                }
            }

            if existing.is_none() {
                div { class: "form-section",
                    h3 { "Parents" }
                    for (i, draft) in drafts.into_iter().enumerate() {
                        div { key: "{i}", class: "parent-entry",
                            Input {
                                placeholder: "Parent name",
                                value: draft.name.clone(),
                                oninput: move |e: FormEvent| parents.write()[i].name = e.value(),
                            }
                            Select {
                                options: relationship_options(),
                                value: draft.relationship.clone(),
                                onchange: move |e: FormEvent| parents.write()[i].relationship = e.value(),
                            }
                            Select {
                                options: gender_options(),
                                value: draft.gender.clone(),
                                onchange: move |e: FormEvent| parents.write()[i].gender = e.value(),
                            }
                            Button {
                                variant: ButtonVariant::Ghost,
                                title: "Remove parent",
                                onclick: move |_| {
                                    parents.write().remove(i);
                                },
                                "Remove"
                            }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| parents.write().push(ParentDraft::default()),
                        "Add parent"
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
                        nav.push(Route::Students {});
                    },
                    "Cancel"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_parent_rows_are_skipped() {
        let drafts = vec![
            ParentDraft {
                name: " Le Van A ".into(),
                ..ParentDraft::default()
            },
            ParentDraft::default(),
            ParentDraft {
                name: "Pham Thi D".into(),
                relationship: "Mẹ".into(),
                gender: "Nữ".into(),
            },
        ];
        let entries = parent_entries(&drafts);
        assert_eq!(
            entries,
            vec![
                ParentInfo::new("Le Van A", "Cha", "Nam"),
                ParentInfo::new("Pham Thi D", "Mẹ", "Nữ"),
            ]
        );
    }
}

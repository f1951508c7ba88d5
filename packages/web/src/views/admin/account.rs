use api::validate;
use dioxus::prelude::*;
use ui::components::{Button, Field, Input};
use ui::{log_activity, make_client, use_account, use_activity_log, LogLevel};

/// Password change for the signed-in administrator.
#[component]
pub fn AccountSettings() -> Element {
    let account = use_account();
    let mut log = use_activity_log();
    let mut password = use_signal(String::new);
    let mut confirmation = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let username = account.map(|a| a.username).unwrap_or_default();
    let target = username.clone();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let username = target.clone();
        spawn(async move {
            error.set(None);

            let new_password = match validate::password_confirmation(&password(), &confirmation()) {
                Ok(p) => p.to_string(),
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };

            saving.set(true);
            let result = make_client().change_password(&username, &new_password).await;
            saving.set(false);

            match result {
                Ok(()) => {
                    password.set(String::new());
                    confirmation.set(String::new());
                    log_activity(&mut log, LogLevel::Success, "Password changed");
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    rsx! {
        div { class: "page-header", h1 { "Account" } }
        p { "Signed in as {username}" }
        form { onsubmit: handle_submit,
            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }
            div { class: "form-grid",
                Field { label: "New password", id: "new-password",
                    Input {
                        id: "new-password",
                        r#type: "password",
                        value: password(),
                        oninput: move |e: FormEvent| password.set(e.value()),
                    }
                }
                Field { label: "Confirm password", id: "confirm-password",
                    Input {
                        id: "confirm-password",
                        r#type: "password",
                        value: confirmation(),
                        oninput: move |e: FormEvent| confirmation.set(e.value()),
                    }
                }
            }
            div { class: "form-actions",
                Button { r#type: "submit", disabled: saving(),
                    if saving() { "Saving..." } else { "Change password" }
                }
            }
        }
    }
}

//! Sign-in page.

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};

use crate::landing_route;

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let u = username().trim().to_string();
            let p = password();
            if u.is_empty() || p.is_empty() {
                error.set(Some("Please enter your username and password".to_string()));
                return;
            }

            loading.set(true);
            match ui::sign_in(&u, &p).await {
                Ok(role) => {
                    tracing::info!("Signed in with role {}", role.label());
                    nav.replace(landing_route(role));
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "login-container",

            h1 {
                style: "margin-bottom: 0.5rem; font-weight: 700; font-size: 1.75rem;",
                "School attendance"
            }

            p {
                style: "margin-bottom: 2rem; color: #787774; font-size: 0.9375rem;",
                "Sign in with your school account"
            }

            form {
                onsubmit: handle_login,
                class: "login-form",

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                Input {
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                Input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}

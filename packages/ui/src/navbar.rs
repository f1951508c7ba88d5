use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::{OnlineIndicator, VIEWS_CSS};

/// Top bar of every signed-in page. Children are the role's nav links.
#[component]
pub fn Navbar(title: String, children: Element) -> Element {
    let auth = use_auth();
    let username = auth().account.map(|a| a.username).unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "navbar",
            span { class: "navbar-title", "{title}" }
            nav { class: "navbar-links", {children} }
            div {
                class: "navbar-session",
                OnlineIndicator {}
                span { class: "navbar-user", "{username}" }
                LogoutButton { class: "btn btn-ghost" }
            }
        }
    }
}

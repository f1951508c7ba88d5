use dioxus::prelude::*;

mod layout;
pub use layout::{AdminLayout, StudentLayout, TeacherLayout};

mod form;

mod login;
pub use login::Login;

pub mod admin;
pub mod student;
pub mod teacher;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "session-status",
            h1 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: crate::Route::Root {}, "Back to start" }
        }
    }
}

//! Role layouts: session guard, navbar and the page outlet.

use api::Role;
use dioxus::prelude::*;
use ui::{AuthProvider, Navbar};

use crate::Route;

#[component]
pub fn AdminLayout() -> Element {
    rsx! {
        AuthProvider { required: Role::Admin,
            Navbar { title: "School admin",
                Link { to: Route::Teachers {}, active_class: "active", "Teachers" }
                Link { to: Route::Students {}, active_class: "active", "Students" }
                Link { to: Route::Classes {}, active_class: "active", "Classes" }
                Link { to: Route::AccountSettings {}, active_class: "active", "Account" }
            }
            div { class: "page", Outlet::<Route> {} }
        }
    }
}

#[component]
pub fn TeacherLayout() -> Element {
    rsx! {
        AuthProvider { required: Role::Teacher,
            Navbar { title: "Teacher",
                Link { to: Route::Dashboard {}, active_class: "active", "Attendance" }
                Link { to: Route::ClassStudents {}, active_class: "active", "My class" }
                Link { to: Route::TeacherProfile {}, active_class: "active", "Profile" }
            }
            div { class: "page", Outlet::<Route> {} }
        }
    }
}

#[component]
pub fn StudentLayout() -> Element {
    rsx! {
        AuthProvider { required: Role::Student,
            Navbar { title: "Student",
                Link { to: Route::Overview {}, active_class: "active", "Overview" }
                Link { to: Route::Parents {}, active_class: "active", "Parents" }
            }
            div { class: "page", Outlet::<Route> {} }
        }
    }
}

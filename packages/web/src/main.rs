use api::Role;
use dioxus::prelude::*;

use ui::{ActivityLogPanel, ActivityLogToggle, NoticeBanner};
use views::admin::{
    AccountSettings, Classes, EditClass, EditStudent, EditTeacher, NewClassPage, NewStudentPage,
    NewTeacherPage, Students, Teachers,
};
use views::student::{Overview, ParentEdit, Parents};
use views::teacher::{ClassStudents, Dashboard, TeacherProfile};
use views::{AdminLayout, Login, NotFound, StudentLayout, TeacherLayout};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},

    #[layout(AdminLayout)]
        #[route("/admin/teachers")]
        Teachers {},
        #[route("/admin/teachers/new")]
        NewTeacherPage {},
        #[route("/admin/teachers/:id/edit")]
        EditTeacher { id: i64 },
        #[route("/admin/students")]
        Students {},
        #[route("/admin/students/new")]
        NewStudentPage {},
        #[route("/admin/students/:id/edit")]
        EditStudent { id: i64 },
        #[route("/admin/classes")]
        Classes {},
        #[route("/admin/classes/new")]
        NewClassPage {},
        #[route("/admin/classes/:id/edit")]
        EditClass { id: i64 },
        #[route("/admin/account")]
        AccountSettings {},
    #[end_layout]

    #[layout(TeacherLayout)]
        #[route("/teacher")]
        Dashboard {},
        #[route("/teacher/students")]
        ClassStudents {},
        #[route("/teacher/profile")]
        TeacherProfile {},
    #[end_layout]

    #[layout(StudentLayout)]
        #[route("/student")]
        Overview {},
        #[route("/student/parents")]
        Parents {},
        #[route("/student/parents/:id")]
        ParentEdit { id: i64 },
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Where each role starts after signing in.
fn landing_route(role: Role) -> Route {
    match role {
        Role::Admin => Route::Teachers {},
        Role::Teacher => Route::Dashboard {},
        Role::Student => Route::Overview {},
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::use_activity_log_provider();

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::VIEWS_CSS }
        document::Script { src: "/face-api.min.js" }

        NoticeBanner {}
        Router::<Route> {}
        ActivityLogPanel {}
        ActivityLogToggle {}
    }
}

/// Send `/` to the signed-in role's landing page, or to the sign-in page.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    use_effect(move || {
        let role = ui::make_session_store()
            .token()
            .and_then(|token| api::auth::decode_claims(&token).ok())
            .and_then(|claims| claims.role());
        match role {
            Some(role) => nav.replace(landing_route(role)),
            None => nav.replace(Route::Login {}),
        };
    });
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_routes_match_role_paths() {
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            assert_eq!(landing_route(role).to_string(), role.landing_path());
        }
    }

    #[test]
    fn test_edit_routes_parse() {
        let route: Route = "/admin/teachers/12/edit".parse().unwrap();
        assert_eq!(route, Route::EditTeacher { id: 12 });
        let route: Route = "/student/parents/4".parse().unwrap();
        assert_eq!(route, Route::ParentEdit { id: 4 });
    }
}

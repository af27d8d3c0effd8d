use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::CurrentUser;
use crate::views::{AdminView, HomeView, LeaderboardView, LoginView, PlayView, SignupView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LoginView)] Login {},
        #[route("/signup", SignupView)] Signup {},
        #[route("/home", HomeView)] Home {},
        #[route("/play/:difficulty", PlayView)] Play { difficulty: String },
        #[route("/leaderboard", LeaderboardView)] Leaderboard {},
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    let mut current = use_context::<CurrentUser>();
    let navigator = use_navigator();
    let session = current.session();
    let signed_in = session.is_some();
    let is_admin = session.as_ref().is_some_and(services::Session::is_admin);
    let user_label = session
        .as_ref()
        .map(|s| s.username().to_string())
        .unwrap_or_default();

    rsx! {
        header { class: "topbar",
            h1 { "Quiz" }
            if signed_in {
                nav {
                    if is_admin {
                        Link { to: Route::Admin {}, "Dashboard" }
                    } else {
                        Link { to: Route::Home {}, "Home" }
                        Link { to: Route::Leaderboard {}, "Leaderboard" }
                    }
                    span { class: "topbar-user", "{user_label}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            current.sign_out();
                            navigator.replace(Route::Login {});
                        },
                        "Logout"
                    }
                }
            }
        }
    }
}

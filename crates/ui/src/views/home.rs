use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::Difficulty;

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::format_average;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let current = use_context::<CurrentUser>();
    let navigator = use_navigator();
    let mut difficulty = use_signal(|| Difficulty::Easy);
    let player = current.player();

    let scores = ctx.scores();
    let player_for_resource = player.clone();
    let resource = use_resource(move || {
        let scores = scores.clone();
        let player = player_for_resource.clone();
        async move {
            let Some(player) = player else {
                return Err(ViewError::NotSignedIn);
            };
            let average = scores.latest_average(&player).await?;
            Ok::<_, ViewError>(average)
        }
    });
    let state = view_state_from_resource(resource);

    let Some(player) = player else {
        return rsx! { SignInPrompt {} };
    };

    rsx! {
        div { class: "page",
            h2 { "Welcome, {player}!" }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading your average..." }
                },
                ViewState::Ready(Some(average)) => rsx! {
                    p { "Your current average: {format_average(average)}" }
                },
                ViewState::Ready(None) => rsx! {
                    p { "You have not played yet." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                },
            }

            div { class: "form",
                label { class: "form-label", "Select difficulty" }
                select {
                    class: "form-input",
                    value: "{difficulty().as_str()}",
                    onchange: move |evt| {
                        if let Ok(parsed) = evt.value().parse::<Difficulty>() {
                            difficulty.set(parsed);
                        }
                    },
                    for level in Difficulty::ALL {
                        option { value: "{level.as_str()}", "{level.as_str()}" }
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        navigator.push(Route::Play {
                            difficulty: difficulty().as_str().to_string(),
                        });
                    },
                    "Start Quiz"
                }
            }

            Link { class: "btn btn-secondary", to: Route::Leaderboard {}, "View Leaderboard" }
        }
    }
}

/// Shown on player-only screens when no player is signed in.
#[component]
pub(crate) fn SignInPrompt() -> Element {
    let current = use_context::<CurrentUser>();
    if current.is_admin() {
        return rsx! {
            div { class: "page",
                p { "Administrators do not play quizzes." }
                Link { to: Route::Admin {}, "Go to dashboard" }
            }
        };
    }

    rsx! {
        div { class: "page",
            p { "{ViewError::NotSignedIn.message()}" }
            Link { to: Route::Login {}, "Go to login" }
        }
    }
}

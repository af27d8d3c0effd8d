use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LEADERBOARD_LIMIT, ScoreRowVm, map_leaderboard};

#[component]
pub fn LeaderboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let scores = ctx.scores();

    let resource = use_resource(move || {
        let scores = scores.clone();
        async move {
            let ranked = scores.leaderboard(LEADERBOARD_LIMIT).await?;
            Ok::<_, ViewError>(map_leaderboard(&ranked))
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Leaderboard" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "No scores yet." }
                    } else {
                        ScoreTable { rows, show_time: false }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
pub(crate) fn ScoreTable(rows: Vec<ScoreRowVm>, show_time: bool) -> Element {
    rsx! {
        table { class: "table",
            thead {
                tr {
                    th { "Rank" }
                    th { "Username" }
                    th { "Score" }
                    th { "Average at submission" }
                    if show_time {
                        th { "Submitted" }
                    }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.rank}",
                        td { "{row.rank}" }
                        td { "{row.username}" }
                        td { "{row.score}" }
                        td { "{row.average_str}" }
                        if show_time {
                            td { "{row.submitted_at_str}" }
                        }
                    }
                }
            }
        }
    }
}

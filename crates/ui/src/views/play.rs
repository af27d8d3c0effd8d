use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::{Difficulty, OptionKey};

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;
use crate::views::home::SignInPrompt;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::QuizVm;

#[component]
pub fn PlayView(difficulty: String) -> Element {
    let ctx = use_context::<AppContext>();
    let current = use_context::<CurrentUser>();
    let quiz_loop = ctx.quiz_loop();
    let player = current.player();

    let vm = use_signal(|| None::<QuizVm>);
    let error = use_signal(|| None::<ViewError>);

    let quiz_loop_for_resource = quiz_loop.clone();
    let player_for_resource = player.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let player = player_for_resource.clone();
        let label = difficulty.clone();
        let mut vm = vm;
        async move {
            let level = label.parse::<Difficulty>().map_err(|_| {
                ViewError::Invalid(format!("Unknown difficulty: {label}"))
            })?;
            let player = player.ok_or(ViewError::NotSignedIn)?;
            let started = QuizVm::start(&quiz_loop, player, level).await;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    let on_select = use_callback(move |key: OptionKey| {
        let mut vm = vm;
        if let Some(vm) = vm.write().as_mut() {
            vm.select(key);
        }
    });

    let on_submit = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |()| {
            let quiz_loop = quiz_loop.clone();
            let mut vm = vm;
            let mut error = error;
            spawn(async move {
                let taken = vm.write().take();
                let Some(mut vm_value) = taken else {
                    error.set(Some(ViewError::Unknown));
                    return;
                };
                let result = vm_value.submit(&quiz_loop).await;
                vm.set(Some(vm_value));
                match result {
                    Ok(_) => error.set(None),
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    if player.is_none() {
        return rsx! { SignInPrompt {} };
    }

    let vm_guard = vm.read();
    let body = match (state, vm_guard.as_ref()) {
        (ViewState::Error(err), _) => rsx! {
            p { class: "form-error", "{err.message()}" }
            Link { to: Route::Home {}, "Back to home" }
        },
        (ViewState::Ready(()), Some(quiz)) if quiz.is_finished() => rsx! {
            if let Some(feedback) = quiz.feedback() {
                p { class: "feedback", "{feedback.message()}" }
            }
            QuizFinished {
                message: quiz.final_message(),
                recording: quiz.recording_message().unwrap_or_default(),
            }
        },
        (ViewState::Ready(()), Some(quiz)) => rsx! {
            if let Some(notice) = quiz.notice() {
                p { class: "notice", "{notice}" }
            }
            if let Some(feedback) = quiz.feedback() {
                p { class: "feedback", "{feedback.message()}" }
            }
            p { class: "progress", "{quiz.progress().label()}" }
            h3 { class: "question", "{quiz.prompt().unwrap_or_default()}" }
            div { class: "options",
                for (key, text) in quiz.options() {
                    button {
                        key: "{key.label()}",
                        class: option_class(quiz.selected() == Some(key)),
                        r#type: "button",
                        onclick: move |_| on_select.call(key),
                        "{key.label()}. {text}"
                    }
                }
            }
            if let Some(err) = error() {
                p { class: "form-error", "{err.message()}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_submit.call(()),
                "Submit Answer"
            }
        },
        _ => rsx! {
            p { "Loading questions..." }
        },
    };

    rsx! {
        div { class: "page",
            h2 { "Quiz" }
            {body}
        }
    }
}

fn option_class(selected: bool) -> &'static str {
    if selected { "option selected" } else { "option" }
}

#[component]
fn QuizFinished(message: String, recording: String) -> Element {
    rsx! {
        div { class: "quiz-finished",
            h3 { "{message}" }
            if !recording.is_empty() {
                p { "{recording}" }
            }
            Link { class: "btn btn-primary", to: Route::Home {}, "Back to home" }
        }
    }
}

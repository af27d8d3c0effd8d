use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::{Difficulty, OptionKey};

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;
use crate::views::leaderboard::ScoreTable;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    QuestionFormVm, QuestionRowVm, ReportVm, map_question_rows, map_report, parse_difficulty,
    parse_question_id,
};

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let current = use_context::<CurrentUser>();
    let scores = ctx.scores();
    let bank = ctx.question_bank();

    let mut form = use_signal(QuestionFormVm::default);
    let mut target_id = use_signal(String::new);
    let mut target_difficulty = use_signal(|| Difficulty::Easy.as_str().to_string());
    let status = use_signal(|| None::<String>);
    let error = use_signal(|| None::<ViewError>);

    let report = use_resource(move || {
        let scores = scores.clone();
        async move {
            let report = scores.report().await?;
            Ok::<_, ViewError>(map_report(&report))
        }
    });
    let bank_for_list = bank.clone();
    let questions = use_resource(move || {
        let bank = bank_for_list.clone();
        async move {
            let items = bank.list_questions().await?;
            Ok::<_, ViewError>(map_question_rows(&items))
        }
    });

    let on_add = {
        let bank = bank.clone();
        use_callback(move |()| {
            let bank = bank.clone();
            let mut form = form;
            let mut status = status;
            let mut error = error;
            let mut questions = questions;
            let draft = form.read().to_draft();
            spawn(async move {
                let result = match draft {
                    Ok(draft) => bank.add_question(draft).await.map_err(ViewError::from),
                    Err(err) => Err(err),
                };
                match result {
                    Ok(id) => {
                        form.set(QuestionFormVm::default());
                        error.set(None);
                        status.set(Some(format!("Question added with ID {id}.")));
                        questions.restart();
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    let on_delete = {
        let bank = bank.clone();
        use_callback(move |()| {
            let bank = bank.clone();
            let mut status = status;
            let mut error = error;
            let mut questions = questions;
            let parsed = parse_question_id(&target_id());
            spawn(async move {
                let result = match parsed {
                    Ok(id) => bank
                        .delete_question(id)
                        .await
                        .map(|()| id)
                        .map_err(ViewError::from),
                    Err(err) => Err(err),
                };
                match result {
                    Ok(id) => {
                        error.set(None);
                        status.set(Some(format!("Question {id} deleted.")));
                        questions.restart();
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    let on_update = {
        let bank = bank.clone();
        use_callback(move |()| {
            let bank = bank.clone();
            let mut status = status;
            let mut error = error;
            let mut questions = questions;
            let parsed = parse_question_id(&target_id())
                .and_then(|id| parse_difficulty(&target_difficulty()).map(|d| (id, d)));
            spawn(async move {
                let result = match parsed {
                    Ok((id, difficulty)) => bank
                        .update_difficulty(id, difficulty)
                        .await
                        .map(|()| (id, difficulty))
                        .map_err(ViewError::from),
                    Err(err) => Err(err),
                };
                match result {
                    Ok((id, difficulty)) => {
                        error.set(None);
                        status.set(Some(format!("Question {id} is now {difficulty}.")));
                        questions.restart();
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    if !current.is_admin() {
        return rsx! {
            div { class: "page",
                p { "Administrators only." }
                Link { to: Route::Login {}, "Go to login" }
            }
        };
    }

    let report_state = view_state_from_resource(report);
    let questions_state = view_state_from_resource(questions);

    rsx! {
        div { class: "page admin",
            h2 { "Admin Dashboard" }

            if let Some(message) = status() {
                p { class: "notice", "{message}" }
            }
            if let Some(err) = error() {
                p { class: "form-error", "{err.message()}" }
            }

            section { class: "admin-section",
                h3 { "User Reports (Scores)" }
                match report_state {
                    ViewState::Idle | ViewState::Loading => rsx! { p { "Loading..." } },
                    ViewState::Ready(report) => rsx! { ReportPanel { report } },
                    ViewState::Error(err) => rsx! { p { class: "form-error", "{err.message()}" } },
                }
            }

            section { class: "admin-section",
                h3 { "Add Question" }
                div { class: "form",
                    label { class: "form-label", "Question" }
                    textarea {
                        class: "form-input",
                        rows: 2,
                        value: "{form.read().prompt}",
                        oninput: move |evt| form.write().prompt = evt.value(),
                    }
                    for key in OptionKey::ALL {
                        label { class: "form-label", "Option {key.label()}" }
                        input {
                            class: "form-input",
                            value: "{form.read().options[key.index()]}",
                            oninput: move |evt| form.write().options[key.index()] = evt.value(),
                        }
                    }
                    label { class: "form-label", "Correct answer" }
                    input {
                        class: "form-input",
                        value: "{form.read().correct_answer}",
                        oninput: move |evt| form.write().correct_answer = evt.value(),
                    }
                    label { class: "form-label", "Difficulty" }
                    select {
                        class: "form-input",
                        value: "{form.read().difficulty}",
                        onchange: move |evt| form.write().difficulty = evt.value(),
                        option { value: "", "Choose..." }
                        for level in Difficulty::ALL {
                            option { value: "{level.as_str()}", "{level.as_str()}" }
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_add.call(()),
                        "Add Question"
                    }
                }
            }

            section { class: "admin-section",
                h3 { "Delete or Re-grade" }
                div { class: "form form-inline",
                    label { class: "form-label", "Question ID" }
                    input {
                        class: "form-input",
                        value: "{target_id}",
                        oninput: move |evt| target_id.set(evt.value()),
                    }
                    select {
                        class: "form-input",
                        value: "{target_difficulty}",
                        onchange: move |evt| target_difficulty.set(evt.value()),
                        for level in Difficulty::ALL {
                            option { value: "{level.as_str()}", "{level.as_str()}" }
                        }
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_update.call(()),
                        "Update Difficulty"
                    }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| on_delete.call(()),
                        "Delete Question"
                    }
                }
            }

            section { class: "admin-section",
                h3 { "Question Bank" }
                match questions_state {
                    ViewState::Idle | ViewState::Loading => rsx! { p { "Loading..." } },
                    ViewState::Ready(rows) => rsx! { QuestionTable { rows } },
                    ViewState::Error(err) => rsx! { p { class: "form-error", "{err.message()}" } },
                }
            }
        }
    }
}

#[component]
fn ReportPanel(report: ReportVm) -> Element {
    rsx! {
        if report.rows.is_empty() {
            p { "No scores recorded yet." }
        } else {
            ScoreTable { rows: report.rows.clone(), show_time: true }
        }
        p { class: "report-average", "Overall average score: {report.overall_average_str}" }
    }
}

#[component]
fn QuestionTable(rows: Vec<QuestionRowVm>) -> Element {
    rsx! {
        if rows.is_empty() {
            p { "The question bank is empty." }
        } else {
            table { class: "table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Question" }
                        th { "A" }
                        th { "B" }
                        th { "C" }
                        th { "D" }
                        th { "Correct" }
                        th { "Difficulty" }
                    }
                }
                tbody {
                    for row in rows {
                        tr { key: "{row.id}",
                            td { "{row.id}" }
                            td { "{row.prompt}" }
                            for (i, option) in row.options.iter().enumerate() {
                                td { key: "{i}", "{option}" }
                            }
                            td { "{row.correct_answer}" }
                            td { "{row.difficulty}" }
                        }
                    }
                }
            }
        }
    }
}

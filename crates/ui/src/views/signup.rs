use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[component]
pub fn SignupView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut country = use_signal(String::new);
    let error = use_signal(|| None::<ViewError>);

    let on_register = {
        let auth = ctx.auth();
        use_callback(move |()| {
            let auth = auth.clone();
            let mut error = error;
            let (name, pw, place) = (username(), password(), country());
            spawn(async move {
                match auth.register(&name, &pw, &place).await {
                    Ok(_) => {
                        error.set(None);
                        navigator.push(Route::Login {});
                    }
                    Err(err) => error.set(Some(err.into())),
                }
            });
        })
    };

    rsx! {
        div { class: "page auth-page",
            h2 { "Sign Up" }

            div { class: "form",
                label { class: "form-label", "Username" }
                input {
                    class: "form-input",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                label { class: "form-label", "Password" }
                input {
                    class: "form-input",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                label { class: "form-label", "Country" }
                input {
                    class: "form-input",
                    value: "{country}",
                    oninput: move |evt| country.set(evt.value()),
                }

                if let Some(err) = error() {
                    p { class: "form-error", "{err.message()}" }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_register.call(()),
                    "Register"
                }
            }

            p { class: "auth-switch",
                "Already registered? "
                Link { to: Route::Login {}, "Back to login" }
            }
        }
    }
}

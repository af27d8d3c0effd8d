use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;
use crate::views::ViewError;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let current = use_context::<CurrentUser>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let error = use_signal(|| None::<ViewError>);
    let busy = use_signal(|| false);

    let on_login = {
        let auth = ctx.auth();
        use_callback(move |()| {
            let auth = auth.clone();
            let mut current = current;
            let mut error = error;
            let mut busy = busy;
            let name = username();
            let pw = password();
            spawn(async move {
                busy.set(true);
                let result = auth.login(&name, &pw).await;
                busy.set(false);
                match result {
                    Ok(session) => {
                        let route = if session.is_admin() {
                            Route::Admin {}
                        } else {
                            Route::Home {}
                        };
                        current.sign_in(session);
                        error.set(None);
                        navigator.push(route);
                    }
                    Err(err) => error.set(Some(err.into())),
                }
            });
        })
    };

    rsx! {
        div { class: "page auth-page",
            h2 { "Login" }

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

                if let Some(err) = error() {
                    p { class: "form-error", "{err.message()}" }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: move |_| on_login.call(()),
                    "Login"
                }
            }

            p { class: "auth-switch",
                "New here? "
                Link { to: Route::Signup {}, "Create an account" }
            }
        }
    }
}

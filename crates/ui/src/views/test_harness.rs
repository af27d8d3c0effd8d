use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{Difficulty, Username};
use quiz_core::time::fixed_now;
use services::{
    AdminCredentials, AppServices, AuthService, Clock, QuestionBankService, QuizLoopService,
    ScoreService, Session,
};
use storage::repository::Storage;

use crate::context::{CurrentUser, UiApp, build_app_context};
use crate::views::{AdminView, HomeView, LeaderboardView, LoginView, PlayView, SignupView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn question_bank(&self) -> Arc<QuestionBankService> {
        self.services.question_bank()
    }

    fn scores(&self) -> Arc<ScoreService> {
        self.services.scores()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Signup,
    Home,
    Play(Difficulty),
    Leaderboard,
    Admin,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: Option<Session>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| CurrentUser::new(props.session.clone()));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Signup => rsx! { SignupView {} },
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Play(difficulty) => rsx! {
            PlayView { difficulty: difficulty.as_str().to_string() }
        },
        ViewKind::Leaderboard => rsx! { LeaderboardView {} },
        ViewKind::Admin => rsx! { AdminView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn player(name: &str) -> Session {
    Session::Player(Username::new(name).expect("valid username"))
}

pub fn admin() -> Session {
    Session::Admin(Username::new("admin").expect("valid username"))
}

pub fn test_services() -> AppServices {
    AppServices::from_storage(
        &Storage::in_memory(),
        Clock::fixed(fixed_now()),
        AdminCredentials::default(),
    )
}

pub fn setup_view_harness(view: ViewKind, session: Option<Session>) -> ViewHarness {
    setup_view_harness_with_services(view, session, test_services())
}

pub fn setup_view_harness_with_services(
    view: ViewKind,
    session: Option<Session>,
    services: AppServices,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps { app, view, session },
    );
    ViewHarness { dom, services }
}

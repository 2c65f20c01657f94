use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{QuizConfig, TimingPolicy, TypeFilter};
use quiz_core::time::fixed_now;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{AppServices, Clock, NameService, QuizLoopService, QuizRun};
use storage::repository::{InMemoryRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::store::QuizStore;
use crate::views::{QuizView, ResultsView, SetupView};

/// Four single-choice and two multi-choice questions.
pub const SMALL_BANK: &str = r#"[
    {"question": "Capital of France?", "answer_options": ["Paris", "Lyon"], "correct_answers": ["Paris"]},
    {"question": "2 + 3?", "answer_options": ["4", "5", "6"], "correct_answers": ["5"]},
    {"question": "Largest planet?", "answer_options": ["Mars", "Jupiter"], "correct_answers": ["Jupiter"]},
    {"question": "Boiling point of water (C)?", "answer_options": ["90", "100"], "correct_answers": ["100"]},
    {"question": "Primes?", "answer_options": ["2", "4", "7"], "correct_answers": ["2", "7"], "is_multi_choice": true},
    {"question": "Even numbers?", "answer_options": ["1", "2", "8"], "correct_answers": ["2", "8"], "is_multi_choice": true}
]"#;

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn names(&self) -> Arc<NameService> {
        self.services.names()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Setup,
    Quiz,
    Results,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    seed: Rc<RefCell<Option<QuizRun>>>,
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
    use_context_provider(|| props.view);
    let seed = Rc::clone(&props.seed);
    use_context_provider(move || QuizStore::with_run(seed.borrow_mut().take()));
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
        ViewKind::Setup => rsx! { SetupView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Results => rsx! { ResultsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
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

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn services_for(repo: &InMemoryRepository) -> AppServices {
    AppServices::new(
        &Storage::from_repository(repo.clone()),
        Clock::fixed(fixed_now()),
        TimingPolicy::default(),
    )
}

fn build(view: ViewKind, services: AppServices, run: Option<QuizRun>) -> ViewHarness {
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
            seed: Rc::new(RefCell::new(run)),
        },
    );
    ViewHarness { dom }
}

/// Harness over `repo` with no quiz in progress.
pub fn setup_view_harness(view: ViewKind, repo: InMemoryRepository) -> ViewHarness {
    let services = services_for(&repo);
    build(view, services, None)
}

/// Harness over an arbitrary storage, for bank sources that need control over
/// when the fetch completes.
pub fn setup_view_harness_with_storage(view: ViewKind, storage: &Storage) -> ViewHarness {
    let services = AppServices::new(storage, Clock::fixed(fixed_now()), TimingPolicy::default());
    build(view, services, None)
}

/// Harness with a five-question mixed run drawn from `SMALL_BANK`, after
/// `prepare` has been applied to it.
pub async fn setup_view_harness_with_run(
    view: ViewKind,
    prepare: impl FnOnce(&mut QuizRun),
) -> ViewHarness {
    setup_view_harness_with_bank_run(view, SMALL_BANK, prepare).await
}

/// Harness with a mixed run of up to five questions drawn from `bank`.
pub async fn setup_view_harness_with_bank_run(
    view: ViewKind,
    bank: &str,
    prepare: impl FnOnce(&mut QuizRun),
) -> ViewHarness {
    let repo = InMemoryRepository::with_bank(bank);
    let services = services_for(&repo);
    let quiz_loop = services.quiz_loop();
    let bank = quiz_loop.load_bank().await.expect("load bank");
    let config = QuizConfig::new(5, TypeFilter::Mixed).expect("config");
    let mut run = quiz_loop
        .start_from_bank(&bank, config, None, &mut StdRng::seed_from_u64(7))
        .expect("start run");
    prepare(&mut run);
    build(view, services, Some(run))
}

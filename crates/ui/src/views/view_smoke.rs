use std::sync::Arc;

use quiz_core::time::fixed_now;
use storage::repository::{InMemoryRepository, Storage};
use storage::{BankSource, NameStore, StorageError};
use tokio::sync::Notify;

use super::test_harness::{
    SMALL_BANK, ViewKind, setup_view_harness, setup_view_harness_with_bank_run,
    setup_view_harness_with_run, setup_view_harness_with_storage,
};

/// Bank whose fetch stays pending until `release` is notified.
struct GatedBank {
    release: Arc<Notify>,
}

#[async_trait::async_trait]
impl BankSource for GatedBank {
    fn describe(&self) -> String {
        "gated".to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, StorageError> {
        self.release.notified().await;
        Ok(SMALL_BANK.as_bytes().to_vec())
    }
}

/// The opening tag of the element with `id`.
fn tag_with_id<'a>(html: &'a str, id: &str) -> &'a str {
    let needle = format!("id=\"{id}\"");
    let at = html.find(&needle).unwrap_or_else(|| panic!("no #{id} in {html}"));
    let start = html[..at].rfind('<').expect("tag start");
    let end = at + html[at..].find('>').expect("tag end");
    &html[start..=end]
}

fn is_disabled(tag: &str) -> bool {
    tag.contains("disabled")
        && !tag.contains("disabled=false")
        && !tag.contains("disabled=\"false\"")
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_renders_bank_summary_and_saved_name() {
    let repo = InMemoryRepository::with_bank(SMALL_BANK);
    repo.save_taker_name(Some("Ada")).await.expect("save name");

    let mut harness = setup_view_harness(ViewKind::Setup, repo);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();

    let expected = "6 questions available (4 single choice, 2 multiple choice)";
    assert!(html.contains(expected), "missing {expected} in {html}");
    assert!(html.contains("Ada"), "missing saved name in {html}");
    assert!(html.contains("Start quiz"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_disables_controls_while_bank_loads() {
    let release = Arc::new(Notify::new());
    let names = InMemoryRepository::new();
    let storage = Storage {
        bank: Arc::new(GatedBank {
            release: Arc::clone(&release),
        }),
        names: Arc::new(names),
    };

    let mut harness = setup_view_harness_with_storage(ViewKind::Setup, &storage);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Loading question bank..."), "missing loading notice in {html}");
    for id in ["setup-start", "setup-count", "setup-filter"] {
        let tag = tag_with_id(&html, id);
        assert!(is_disabled(tag), "#{id} should be disabled while loading: {tag}");
    }

    release.notify_one();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("6 questions available"), "missing summary in {html}");
    for id in ["setup-start", "setup-count", "setup-filter"] {
        let tag = tag_with_id(&html, id);
        assert!(!is_disabled(tag), "#{id} should be enabled once loaded: {tag}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_renders_unreachable_error_with_retry() {
    let mut harness = setup_view_harness(ViewKind::Setup, InMemoryRepository::new());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Could not reach the question bank."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_renders_empty_bank_notice() {
    let mut harness = setup_view_harness(ViewKind::Setup, InMemoryRepository::with_bank("[]"));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("has no questions yet"), "missing notice in {html}");
    assert!(html.contains("Check again"), "missing reload in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_current_question() {
    let mut harness = setup_view_harness_with_run(ViewKind::Quiz, |run| {
        run.toggle_mark(2).expect("mark");
    })
    .await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "missing position in {html}");
    assert!(html.contains("Time left: 5:00"), "missing timer in {html}");
    assert!(html.contains("palette__cell--marked"), "missing marked cell in {html}");
    assert!(html.contains("Submit quiz"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_run_links_back_to_setup() {
    let mut harness = setup_view_harness(ViewKind::Quiz, InMemoryRepository::with_bank(SMALL_BANK));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No quiz in progress."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score_and_filters() {
    let mut harness = setup_view_harness_with_run(ViewKind::Results, |run| {
        run.submit(fixed_now()).expect("submit");
    })
    .await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("You scored 0 / 5 (0%)"), "missing headline in {html}");
    assert!(html.contains("Time taken: 0:00"), "missing elapsed in {html}");
    for label in ["All", "Correct", "Wrong"] {
        assert!(html.contains(label), "missing filter {label} in {html}");
    }
    assert!(html.contains("correct answer"), "missing key decoration in {html}");
    assert!(html.contains("Start a new quiz"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_without_submission_has_no_results() {
    let mut harness = setup_view_harness_with_run(ViewKind::Results, |_| {}).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No results yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_and_results_render_every_repeated_option_label() {
    let bank = r#"[
        {"question": "Pick one", "answer_options": ["Same", "Same", "Other"], "correct_answers": ["Other"]}
    ]"#;
    let mut harness = setup_view_harness_with_bank_run(ViewKind::Quiz, bank, |_| {}).await;
    harness.rebuild();
    let html = harness.render();
    assert_eq!(html.matches(">Same</button>").count(), 2, "repeated options in {html}");
    assert!(html.contains(">Other</button>"), "missing option in {html}");

    let mut harness = setup_view_harness_with_bank_run(ViewKind::Results, bank, |run| {
        run.submit(fixed_now()).expect("submit");
    })
    .await;
    harness.rebuild();
    let html = harness.render();
    assert_eq!(html.matches("Same").count(), 2, "repeated options in {html}");
}

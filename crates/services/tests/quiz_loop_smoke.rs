use std::sync::Arc;

use chrono::Duration;
use quiz_core::countdown::{TimerEvent, TimerPhase};
use quiz_core::model::{QuizConfig, ResultFilter, TimingPolicy, TypeFilter};
use quiz_core::time::fixed_now;
use services::{AppServices, Clock, SessionError, SubmitReason};
use storage::repository::{InMemoryRepository, Storage};

fn bank_json(single: usize, multi: usize) -> String {
    let records: Vec<String> = (0..single)
        .map(|i| {
            format!(
                r#"{{"question": "Single {i}", "answer_options": ["right", "wrong"], "correct_answers": ["right"], "is_multi_choice": false}}"#
            )
        })
        .chain((0..multi).map(|i| {
            format!(
                r#"{{"question": "Multi {i}", "answer_options": ["a", "b", "c"], "correct_answers": ["a", "c"], "is_multi_choice": true}}"#
            )
        }))
        .collect();
    format!("[{}]", records.join(","))
}

fn services(repo: InMemoryRepository, seconds_per_question: u32) -> AppServices {
    AppServices::new(
        &Storage::from_repository(repo),
        Clock::fixed(fixed_now()),
        TimingPolicy::new(seconds_per_question).unwrap(),
    )
}

#[tokio::test]
async fn quiz_loop_answers_then_expires_into_results() {
    let repo = InMemoryRepository::with_bank(bank_json(12, 4));
    let app = services(repo.clone(), 2);

    let name = app.names().save("Lin").await.unwrap();
    let config = QuizConfig::new(8, TypeFilter::Mixed).unwrap();
    let mut run = app.quiz_loop().start_quiz(config, name).await.unwrap();

    assert_eq!(run.session().len(), 8);
    let multi = run
        .session()
        .questions()
        .iter()
        .filter(|q| q.question().is_multi_choice())
        .count();
    assert_eq!(multi, 2);
    assert_eq!(run.budget_secs(), 16);

    // Answer everything correctly except the last question.
    for index in 0..run.session().len() - 1 {
        run.go_to(index);
        if run.question_view().is_multi_choice {
            run.select_current("a").unwrap();
            run.select_current("c").unwrap();
        } else {
            run.select_current("right").unwrap();
        }
    }

    let mut now = fixed_now();
    let mut last = Vec::new();
    while run.timer_phase().is_running() {
        now += Duration::seconds(1);
        last = run.tick(now).events;
    }
    assert_eq!(last, vec![TimerEvent::Expired]);
    assert_eq!(run.timer_phase(), TimerPhase::Expired);

    let results = run.results().unwrap();
    assert_eq!(results.reason, SubmitReason::Expired);
    assert_eq!(results.report.correct_count, 7);
    assert_eq!(results.elapsed_secs, 16);

    let wrong = run.results_view(ResultFilter::Wrong).unwrap();
    assert_eq!(wrong.items.len(), 1);
    assert_eq!(wrong.items[0].index, 7);
    assert_eq!(wrong.taker_name.as_deref(), Some("Lin"));

    assert!(matches!(run.submit(now), Err(SessionError::AlreadySubmitted)));
}

#[tokio::test]
async fn restart_draws_a_fresh_session_and_keeps_the_name() {
    let repo = InMemoryRepository::with_bank(bank_json(10, 10));
    let app = services(repo.clone(), 60);
    app.names().save("Sam").await.unwrap();

    let config = QuizConfig::new(5, TypeFilter::Single).unwrap();
    let mut first = app.quiz_loop().start_quiz(config, app.names().load().await.unwrap()).await.unwrap();
    first.select_current("right").unwrap();
    first.submit(fixed_now()).unwrap();

    let second = app.quiz_loop().start_quiz(config, app.names().load().await.unwrap()).await.unwrap();
    assert_ne!(first.id(), second.id());
    assert_eq!(second.progress().answered, 0);
    assert!(!second.is_submitted());
    assert_eq!(second.taker_name().map(|n| n.as_str()), Some("Sam"));
}

#[tokio::test]
async fn bank_changes_are_picked_up_on_next_start() {
    let repo = InMemoryRepository::with_bank("[]");
    let app = services(repo.clone(), 60);
    let config = QuizConfig::new(5, TypeFilter::Mixed).unwrap();

    assert!(matches!(
        app.quiz_loop().start_quiz(config, None).await,
        Err(SessionError::EmptyBank)
    ));

    repo.set_bank(bank_json(3, 0));
    let run = app.quiz_loop().start_quiz(config, None).await.unwrap();
    assert_eq!(run.session().len(), 3);

    let summary = app.quiz_loop().check_bank().await.unwrap();
    assert_eq!((summary.total, summary.single, summary.multi), (3, 3, 0));
}

#[tokio::test]
async fn bank_source_can_be_shared_across_services() {
    let repo = InMemoryRepository::with_bank(bank_json(6, 2));
    let storage = Storage {
        bank: Arc::new(repo.clone()),
        names: Arc::new(repo),
    };
    let app = AppServices::new(&storage, Clock::fixed(fixed_now()), TimingPolicy::default());
    assert_eq!(app.quiz_loop().bank_location(), "memory");
    assert_eq!(app.quiz_loop().check_bank().await.unwrap().total, 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rapid_name_edits_persist_the_last_keystroke_in_sqlite() {
    let bank: Arc<dyn storage::BankSource> =
        Arc::new(InMemoryRepository::with_bank(bank_json(5, 0)));
    let app = AppServices::new_sqlite(
        "sqlite:file:memdb_name_edits?mode=memory&cache=shared",
        bank,
        Clock::fixed(fixed_now()),
        TimingPolicy::default(),
    )
    .await
    .unwrap();
    let names = app.names();

    for round in 0..20 {
        let mut handles = Vec::new();
        for typed in ["G", "Gr", "Gra", "Grac", "Grace"] {
            handles.push(tokio::spawn(names.save(typed)));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        let stored = names.load().await.unwrap();
        assert_eq!(
            stored.as_ref().map(|name| name.as_str()),
            Some("Grace"),
            "round {round}"
        );
        names.save("").await.unwrap();
    }
}

use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::store::QuizStore;
use crate::views::ViewError;
use crate::vm::{QuizIntent, QuizOutcome, QuizScreenVm, apply_intent, intent_for_key};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = use_context::<QuizStore>();
    let navigator = use_navigator();
    let clock = ctx.clock();
    let mut run = store.run;

    let mut error = use_signal(|| None::<ViewError>);
    let mut confirming = use_signal(|| false);

    // One-second tick; stops once the run is submitted either way.
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let outcome = {
                let mut guard = run.write();
                let Some(active) = guard.as_mut() else {
                    break;
                };
                if active.is_submitted() {
                    break;
                }
                active.tick(clock.now())
            };
            if outcome.auto_submitted {
                confirming.set(false);
                let _ = navigator.push(Route::Results {});
                break;
            }
        }
    });

    use_effect(move || {
        let _ = eval(r#"document.getElementById("quiz-root")?.focus();"#);
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let outcome = {
            let mut guard = run.write();
            let Some(active) = guard.as_mut() else {
                return;
            };
            apply_intent(active, intent, clock.now())
        };
        match outcome {
            Ok(QuizOutcome::Submitted) => {
                confirming.set(false);
                let _ = navigator.push(Route::Results {});
            }
            Ok(QuizOutcome::Updated(_)) => error.set(None),
            Err(err) => error.set(Some(err)),
        }
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if confirming() {
            return;
        }
        if let Some(intent) = intent_for_key(&evt.key()) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    });

    let vm = run.read().as_ref().map(QuizScreenVm::from_run);
    let Some(vm) = vm else {
        return rsx! {
            div { class: "page quiz-page",
                p { "No quiz in progress." }
                Link { to: Route::Setup {}, "Set up a quiz" }
            }
        };
    };

    if vm.is_submitted {
        return rsx! {
            div { class: "page quiz-page",
                p { "This quiz has been submitted." }
                Link { to: Route::Results {}, "See results" }
            }
        };
    }

    let submit_prompt = vm.submit_prompt();
    let mark_label = vm.mark_label();

    rsx! {
        div {
            class: "page quiz-page",
            id: "quiz-root",
            tabindex: "0",
            onkeydown: move |evt| on_key.call(evt),
            div { class: "quiz-toolbar",
                span { class: vm.timer_class, id: "quiz-timer", role: "timer", "{vm.timer_label}" }
                span { class: "quiz-position", "{vm.position_label}" }
            }
            div { class: "progress",
                div { class: "progress__bar", style: "width: {vm.progress_percent}%" }
            }

            section { class: "question",
                h2 { class: "question__text", "{vm.text}" }
                p { class: "question__hint", "{vm.hint}" }
                ul { class: "options", role: if vm.is_multi_choice { "group" } else { "radiogroup" },
                    for (position, option) in vm.options.iter().cloned().enumerate() {
                        li { key: "{position}",
                            button {
                                class: option.class,
                                r#type: "button",
                                aria_pressed: "{option.selected}",
                                onclick: move |_| dispatch.call(QuizIntent::Select(option.label.clone())),
                                "{option.label}"
                            }
                        }
                    }
                }
            }

            div { class: "quiz-nav",
                button {
                    id: "quiz-previous",
                    r#type: "button",
                    disabled: !vm.can_previous,
                    onclick: move |_| dispatch.call(QuizIntent::Previous),
                    "Previous"
                }
                button {
                    class: if vm.marked { "mark mark--on" } else { "mark" },
                    id: "quiz-mark",
                    r#type: "button",
                    onclick: move |_| dispatch.call(QuizIntent::ToggleMark),
                    "{mark_label}"
                }
                button {
                    id: "quiz-next",
                    r#type: "button",
                    disabled: !vm.can_next,
                    onclick: move |_| dispatch.call(QuizIntent::Next),
                    "Next"
                }
            }

            nav { class: "palette", aria_label: "Questions",
                for cell in vm.palette.iter().cloned() {
                    button {
                        key: "{cell.index}",
                        class: "{cell.class}",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::GoTo(cell.index)),
                        "{cell.label}"
                    }
                }
            }

            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }

            if confirming() {
                div { class: "confirm", role: "dialog", aria_modal: "true",
                    p { "{submit_prompt}" }
                    button {
                        class: "primary",
                        id: "quiz-confirm-submit",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::Submit),
                        "Submit"
                    }
                    button {
                        id: "quiz-cancel-submit",
                        r#type: "button",
                        onclick: move |_| confirming.set(false),
                        "Keep working"
                    }
                }
            } else {
                button {
                    class: "primary",
                    id: "quiz-submit",
                    r#type: "button",
                    onclick: move |_| confirming.set(true),
                    "Submit quiz"
                }
            }
        }
    }
}

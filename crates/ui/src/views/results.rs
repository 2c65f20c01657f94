use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use quiz_core::model::ResultFilter;

use crate::routes::Route;
use crate::store::QuizStore;
use crate::vm::map_results;

#[component]
pub fn ResultsView() -> Element {
    let store = use_context::<QuizStore>();
    let navigator = use_navigator();
    let mut filter = use_signal(ResultFilter::default);

    let vm = store
        .run
        .read()
        .as_ref()
        .and_then(|run| map_results(run, filter()));
    let Some(vm) = vm else {
        return rsx! {
            div { class: "page results-page",
                p { "No results yet." }
                Link { to: Route::Setup {}, "Set up a quiz" }
            }
        };
    };

    let on_new_quiz = move |_| {
        store.clear();
        let _ = navigator.push(Route::Setup {});
    };

    rsx! {
        div { class: "page results-page",
            h2 { class: "results__headline", "{vm.headline}" }
            p { class: "results__meta", "{vm.elapsed_label} · {vm.submitted_label}" }
            if let Some(note) = vm.reason_note {
                p { class: "notice", "{note}" }
            }

            div { class: "filters", role: "group", aria_label: "Filter results",
                for option in ResultFilter::ALL {
                    button {
                        key: "{option.label()}",
                        class: if option == vm.filter { "filter filter--active" } else { "filter" },
                        r#type: "button",
                        aria_pressed: "{option == vm.filter}",
                        onclick: move |_| filter.set(option),
                        "{option.label()}"
                    }
                }
            }

            if vm.items.is_empty() {
                p { class: "empty", "No questions match this filter." }
            }
            for item in vm.items.iter().cloned() {
                article { key: "{item.number}", class: item.class,
                    header { class: "result-item__header",
                        span { class: "result-item__number", "{item.number}." }
                        h3 { class: "result-item__text", "{item.text}" }
                        span { class: "result-item__verdict", "{item.verdict_label}" }
                    }
                    ul { class: "result-options",
                        for (position, option) in item.options.iter().cloned().enumerate() {
                            li { key: "{position}", class: option.class,
                                "{option.label}"
                                if let Some(note) = option.note {
                                    span { class: "result-option__note", " ({note})" }
                                }
                            }
                        }
                    }
                }
            }

            button {
                class: "primary",
                id: "results-new",
                r#type: "button",
                onclick: on_new_quiz,
                "Start a new quiz"
            }
        }
    }
}

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{TakerName, TypeFilter};

use crate::context::AppContext;
use crate::routes::Route;
use crate::store::QuizStore;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::SetupForm;

#[component]
pub fn SetupView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = use_context::<QuizStore>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let names = ctx.names();

    let mut name = use_signal(String::new);
    let mut name_edited = use_signal(|| false);
    let mut name_error = use_signal(|| None::<ViewError>);
    let mut form = use_signal(SetupForm::default);
    let mut start_error = use_signal(|| None::<ViewError>);
    let mut starting = use_signal(|| false);

    let names_for_load = names.clone();
    use_future(move || {
        let names = names_for_load.clone();
        async move {
            if let Ok(Some(stored)) = names.load().await {
                // Typing before the load finished wins over the stored value.
                if !name_edited() {
                    name.set(stored.as_str().to_string());
                }
            }
        }
    });

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        async move {
            quiz_loop
                .check_bank()
                .await
                .map_err(|err| ViewError::from(&err))
        }
    });
    let state = view_state_from_resource(resource);
    let controls_disabled = starting() || !matches!(state, ViewState::Ready(_));

    let on_name_input = use_callback(move |value: String| {
        name_edited.set(true);
        let save = names.save(&value);
        name.set(value);
        spawn(async move {
            match save.await {
                Ok(_) => name_error.set(None),
                Err(err) => name_error.set(Some(ViewError::from(&err))),
            }
        });
    });

    let on_start = use_callback(move |()| {
        if starting() {
            return;
        }
        let config = match form.read().to_config() {
            Ok(config) => config,
            Err(err) => {
                start_error.set(Some(err));
                return;
            }
        };
        let taker_name = TakerName::parse(&name.read()).ok().flatten();
        let quiz_loop = quiz_loop.clone();
        starting.set(true);
        start_error.set(None);
        spawn(async move {
            let result = quiz_loop.start_quiz(config, taker_name).await;
            starting.set(false);
            match result {
                Ok(run) => {
                    store.replace(run);
                    let _ = navigator.push(Route::Quiz {});
                }
                Err(err) => start_error.set(Some(ViewError::from(&err))),
            }
        });
    });

    let selected_filter = form.read().filter;
    let count_value = form.read().count.clone();

    rsx! {
        div { class: "page setup-page",
            h2 { "Set up your quiz" }
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { class: "notice", "Loading question bank..." }
                },
                ViewState::Ready(summary) => rsx! {
                    p { class: "bank-summary",
                        "{summary.total} questions available ({summary.single} single choice, {summary.multi} multiple choice)"
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: if err.is_notice() { "notice" } else { "error" },
                        p { "{err.message()}" }
                        button {
                            id: "setup-reload",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            if err.is_notice() { "Check again" } else { "Retry" }
                        }
                    }
                },
            }

            div { class: "form",
                label { r#for: "setup-name", "Your name (optional)" }
                input {
                    id: "setup-name",
                    r#type: "text",
                    maxlength: "64",
                    value: "{name}",
                    oninput: move |evt| on_name_input.call(evt.value()),
                }
                if let Some(err) = name_error() {
                    p { class: "field-error", "{err.message()}" }
                }

                label { r#for: "setup-count", "Number of questions" }
                input {
                    id: "setup-count",
                    r#type: "number",
                    min: "5",
                    max: "500",
                    disabled: controls_disabled,
                    value: "{count_value}",
                    oninput: move |evt| form.write().count = evt.value(),
                }

                label { r#for: "setup-filter", "Question type" }
                select {
                    id: "setup-filter",
                    disabled: controls_disabled,
                    onchange: move |evt| {
                        if let Some(filter) = TypeFilter::parse(&evt.value()) {
                            form.write().filter = filter;
                        }
                    },
                    for filter in TypeFilter::ALL {
                        option {
                            key: "{filter.as_str()}",
                            value: filter.as_str(),
                            selected: filter == selected_filter,
                            "{filter.label()}"
                        }
                    }
                }
            }

            if let Some(err) = start_error() {
                div { class: if err.is_notice() { "notice" } else { "error" },
                    p { "{err.message()}" }
                    if err.is_retryable() {
                        button {
                            id: "setup-retry",
                            r#type: "button",
                            onclick: move |_| on_start.call(()),
                            "Retry"
                        }
                    }
                }
            }

            button {
                class: "primary",
                id: "setup-start",
                r#type: "button",
                disabled: controls_disabled,
                onclick: move |_| on_start.call(()),
                if starting() { "Starting..." } else { "Start quiz" }
            }
        }
    }
}

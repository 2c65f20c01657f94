use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{QuizView, ResultsView, SetupView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", SetupView)] Setup {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/results", ResultsView)] Results {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Timed Quiz" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

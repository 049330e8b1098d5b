use dioxus::prelude::*;
use ui::EventsBoard;

#[component]
pub fn Events() -> Element {
    rsx! {
        div { class: "container",
            div { class: "page-head",
                h1 { "Events" }
                p { class: "muted", "Meetings, cultural programs and welfare drives organised by the association." }
            }
            EventsBoard {}
        }
    }
}

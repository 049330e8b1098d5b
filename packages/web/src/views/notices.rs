use dioxus::prelude::*;
use ui::NoticeBoard;

#[component]
pub fn Notices() -> Element {
    rsx! {
        div { class: "container",
            div { class: "page-head",
                h1 { "Announcements & Notices" }
                p { class: "muted", "Water supply schedules, civic updates, meeting notices and general announcements." }
            }
            NoticeBoard {}
        }
    }
}

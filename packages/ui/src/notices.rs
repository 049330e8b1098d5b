use dioxus::prelude::*;
use store::models::{Notice, NoticeCategory};
use store::QueryState;

use crate::client::{query_state, use_latest_notices, use_notices};
use crate::icons::FaBell;
use crate::status::{read_error, EmptyState, ErrorBanner, LoadingState};
use crate::Icon;

#[component]
pub fn NoticeCard(notice: Notice) -> Element {
    rsx! {
        article { class: "card notice-card",
            div { class: "card-head",
                Icon { icon: FaBell, width: 14, height: 14 }
                h3 { "{notice.title}" }
            }
            p { class: "muted small", "{notice.date}" }
            p { class: "card-body pre", "{notice.content}" }
        }
    }
}

/// Category tabs over the notice lists. Opens on the general category.
#[component]
pub fn NoticeBoard() -> Element {
    let mut category = use_signal(|| NoticeCategory::General);
    let notices = use_notices(category);

    let body = match query_state(&notices) {
        QueryState::Idle | QueryState::Loading => rsx! {
            LoadingState { message: "Loading notices..." }
        },
        QueryState::Error(err) => rsx! {
            ErrorBanner { message: read_error(&err) }
        },
        QueryState::Success(list) if list.is_empty() => {
            let label = category().label().to_lowercase();
            rsx! {
                EmptyState {
                    title: "No notices yet",
                    description: "There are currently no {label} notices.",
                }
            }
        }
        QueryState::Success(list) => rsx! {
            div { class: "stack",
                for notice in list {
                    NoticeCard { key: "{notice.id}", notice }
                }
            }
        },
    };

    rsx! {
        div { class: "tabs",
            for tab in NoticeCategory::ALL {
                button {
                    class: if category() == tab { "tab active" } else { "tab" },
                    onclick: move |_| category.set(tab),
                    "{tab.short_label()}"
                }
            }
        }
        {body}
    }
}

/// Compact list of the most recent notices across categories.
#[component]
pub fn LatestNotices(#[props(default = 5)] limit: u64) -> Element {
    let notices = use_latest_notices(limit);

    match query_state(&notices) {
        QueryState::Idle | QueryState::Loading => rsx! {
            LoadingState { message: "Loading notices..." }
        },
        QueryState::Error(err) => rsx! {
            ErrorBanner { message: read_error(&err) }
        },
        QueryState::Success(list) if list.is_empty() => rsx! {
            p { class: "muted", "No notices available at the moment." }
        },
        QueryState::Success(list) => rsx! {
            ul { class: "compact-list",
                for notice in list {
                    li { key: "{notice.id}",
                        span { class: "badge", "{notice.category.short_label()}" }
                        strong { "{notice.title}" }
                        span { class: "muted small", "{notice.date}" }
                    }
                }
            }
        },
    }
}

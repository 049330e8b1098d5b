use dioxus::prelude::*;
use store::models::Event;
use store::QueryState;

use crate::client::{query_state, use_past_events, use_upcoming_events};
use crate::icons::FaCalendarDays;
use crate::status::{read_error, EmptyState, ErrorBanner, LoadingState};
use crate::Icon;

#[component]
pub fn EventCard(event: Event) -> Element {
    let status_class = if event.is_past { "badge badge-muted" } else { "badge badge-accent" };

    rsx! {
        article { class: "card event-card",
            div { class: "card-head",
                Icon { icon: FaCalendarDays, width: 14, height: 14 }
                h3 { "{event.title}" }
            }
            div { class: "meta",
                span { class: "badge", "{event.event_type.label()}" }
                span { class: "{status_class}", "{event.status_label()}" }
                span { class: "muted small", "{event.date}" }
            }
            p { class: "card-body pre", "{event.description}" }
        }
    }
}

fn event_list(state: QueryState<Vec<Event>>, empty_title: &str, empty_description: &str) -> Element {
    match state {
        QueryState::Idle | QueryState::Loading => rsx! {
            LoadingState { message: "Loading events..." }
        },
        QueryState::Error(err) => rsx! {
            ErrorBanner { message: read_error(&err) }
        },
        QueryState::Success(list) if list.is_empty() => rsx! {
            EmptyState {
                title: empty_title.to_string(),
                description: empty_description.to_string(),
            }
        },
        QueryState::Success(list) => rsx! {
            div { class: "grid two",
                for event in list {
                    EventCard { key: "{event.id}", event }
                }
            }
        },
    }
}

/// Upcoming and past events, each with its own loading and empty state.
#[component]
pub fn EventsBoard() -> Element {
    let upcoming = use_upcoming_events();
    let past = use_past_events();

    rsx! {
        section { class: "section",
            h2 { "Upcoming Events" }
            {event_list(
                query_state(&upcoming),
                "No upcoming events",
                "Check back later for upcoming community events.",
            )}
        }
        section { class: "section",
            h2 { "Past Events" }
            {event_list(query_state(&past), "No past events", "Past events will appear here.")}
        }
    }
}

/// First few upcoming events, for the home page.
#[component]
pub fn UpcomingEvents(#[props(default = 3)] limit: usize) -> Element {
    let upcoming = use_upcoming_events();

    match query_state(&upcoming) {
        QueryState::Idle | QueryState::Loading => rsx! {
            LoadingState { message: "Loading events..." }
        },
        QueryState::Error(err) => rsx! {
            ErrorBanner { message: read_error(&err) }
        },
        QueryState::Success(list) if list.is_empty() => rsx! {
            p { class: "muted", "No upcoming events at the moment." }
        },
        QueryState::Success(list) => rsx! {
            div { class: "grid three",
                for event in list.into_iter().take(limit) {
                    EventCard { key: "{event.id}", event }
                }
            }
        },
    }
}

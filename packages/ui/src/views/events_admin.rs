use dioxus::prelude::*;
use store::models::{Event, EventDraft, EventType, Id};
use store::QueryState;

use crate::auth::confirm;
use crate::client::{query_state, use_past_events, use_site, use_upcoming_events};
use crate::icons::{FaPenToSquare, FaTrashCan};
use crate::status::{read_error, ToastMessage};
use crate::Icon;

/// Create, edit and delete events, upcoming and past together.
#[component]
pub fn EventsAdmin(toast: Signal<Option<ToastMessage>>) -> Element {
    let site = use_site();
    let upcoming = use_upcoming_events();
    let past = use_past_events();
    let mut toast = toast;
    let mut editing = use_signal(|| None::<Id>);
    let mut event_type = use_signal(|| EventType::AssociationMeeting);
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut date = use_signal(String::new);
    let mut is_past = use_signal(|| false);
    let mut saving = use_signal(|| false);

    let mut reset = move || {
        editing.set(None);
        event_type.set(EventType::AssociationMeeting);
        title.set(String::new());
        description.set(String::new());
        date.set(String::new());
        is_past.set(false);
    };

    let submit_site = site.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let site = submit_site.clone();
        async move {
            let draft = EventDraft {
                event_type: event_type(),
                title: title().trim().to_string(),
                description: description().trim().to_string(),
                date: date().trim().to_string(),
                is_past: is_past(),
            };
            if draft.title.is_empty() || draft.description.is_empty() || draft.date.is_empty() {
                toast.set(Some(ToastMessage::Error("Please fill in all fields".to_string())));
                return;
            }
            saving.set(true);
            let result = match editing() {
                Some(id) => site
                    .client
                    .update_event(id, draft)
                    .await
                    .map(|()| "Event updated successfully!"),
                None => site
                    .client
                    .create_event(draft)
                    .await
                    .map(|_| "Event created successfully!"),
            };
            match result {
                Ok(message) => {
                    toast.set(Some(ToastMessage::Success(message.to_string())));
                    reset();
                    site.notify();
                }
                Err(e) => toast.set(Some(ToastMessage::Error(e.message))),
            }
            saving.set(false);
        }
    };

    let mut start_edit = move |event: Event| {
        editing.set(Some(event.id));
        event_type.set(event.event_type);
        title.set(event.title);
        description.set(event.description);
        date.set(event.date);
        is_past.set(event.is_past);
    };

    let delete = move |id: Id| {
        let site = site.clone();
        async move {
            if !confirm("Are you sure you want to delete this event?") {
                return;
            }
            match site.client.delete_event(id).await {
                Ok(()) => {
                    toast.set(Some(ToastMessage::Success("Event deleted successfully!".to_string())));
                    if editing() == Some(id) {
                        reset();
                    }
                    site.notify();
                }
                Err(e) => toast.set(Some(ToastMessage::Error(e.message))),
            }
        }
    };

    let rows = match (query_state(&upcoming), query_state(&past)) {
        (QueryState::Error(err), _) | (_, QueryState::Error(err)) => {
            let message = read_error(&err);
            rsx! {
                tr { td { colspan: "5", class: "field-error center", "{message}" } }
            }
        }
        (QueryState::Success(mut events), QueryState::Success(past_events)) => {
            events.extend(past_events);
            if events.is_empty() {
                rsx! {
                    tr { td { colspan: "5", class: "muted center", "No events found" } }
                }
            } else {
                rsx! {
                    for event in events {
                        tr { key: "{event.id}",
                            td { class: "strong", "{event.title}" }
                            td { "{event.event_type.label()}" }
                            td { "{event.date}" }
                            td {
                                span {
                                    class: if event.is_past { "badge badge-muted" } else { "badge badge-accent" },
                                    "{event.status_label()}"
                                }
                            }
                            td { class: "actions",
                                button {
                                    class: "icon-btn",
                                    aria_label: "Edit event",
                                    onclick: {
                                        let event = event.clone();
                                        move |_| start_edit(event.clone())
                                    },
                                    Icon { icon: FaPenToSquare, width: 14, height: 14 }
                                }
                                button {
                                    class: "icon-btn danger",
                                    aria_label: "Delete event",
                                    onclick: {
                                        let id = event.id;
                                        let delete = delete.clone();
                                        move |_| delete(id)
                                    },
                                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                                }
                            }
                        }
                    }
                }
            }
        }
        _ => rsx! {
            tr { td { colspan: "5", class: "muted center", "Loading events..." } }
        },
    };

    let heading = if editing().is_some() { "Edit Event" } else { "Create Event" };

    rsx! {
        div { class: "grid two",
            section { class: "card",
                h3 { "{heading}" }
                p { class: "muted", "Add a new event to the website" }
                form { class: "form", onsubmit,
                    div { class: "field",
                        label { r#for: "event-type", "Event Type" }
                        select {
                            id: "event-type",
                            value: event_type().key(),
                            onchange: move |evt: FormEvent| event_type.set(EventType::from_key(&evt.value())),
                            for option_type in EventType::ALL {
                                option {
                                    key: "{option_type.key()}",
                                    value: option_type.key(),
                                    "{option_type.label()}"
                                }
                            }
                        }
                    }
                    div { class: "field",
                        label { r#for: "event-title", "Title" }
                        input {
                            id: "event-title",
                            placeholder: "Event title",
                            value: title(),
                            oninput: move |evt: FormEvent| title.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { r#for: "event-description", "Description" }
                        textarea {
                            id: "event-description",
                            rows: "5",
                            placeholder: "Event description",
                            value: description(),
                            oninput: move |evt: FormEvent| description.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { r#for: "event-date", "Date" }
                        input {
                            id: "event-date",
                            r#type: "date",
                            value: date(),
                            oninput: move |evt: FormEvent| date.set(evt.value()),
                        }
                    }
                    label { class: "checkbox",
                        input {
                            r#type: "checkbox",
                            checked: is_past(),
                            onchange: move |evt: FormEvent| is_past.set(evt.checked()),
                        }
                        " Mark as past event"
                    }
                    div { class: "row",
                        button {
                            class: "btn btn-primary wide",
                            r#type: "submit",
                            disabled: saving(),
                            if saving() {
                                "Saving..."
                            } else if editing().is_some() {
                                "Save Changes"
                            } else {
                                "Create Event"
                            }
                        }
                        if editing().is_some() {
                            button {
                                class: "btn btn-outline",
                                r#type: "button",
                                onclick: move |_| reset(),
                                "Cancel"
                            }
                        }
                    }
                }
            }
            section { class: "card",
                h3 { "Manage Events" }
                p { class: "muted", "View, edit and delete existing events" }
                div { class: "table-wrap",
                    table {
                        thead {
                            tr {
                                th { "Title" }
                                th { "Type" }
                                th { "Date" }
                                th { "Status" }
                                th { class: "actions", "Action" }
                            }
                        }
                        tbody { {rows} }
                    }
                }
            }
        }
    }
}

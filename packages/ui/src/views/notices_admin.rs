use dioxus::prelude::*;
use store::models::{Id, Notice, NoticeCategory, NoticeDraft};
use store::QueryState;

use crate::auth::confirm;
use crate::client::{query_state, use_all_notices, use_site};
use crate::icons::{FaPenToSquare, FaTrashCan};
use crate::status::{read_error, ToastMessage};
use crate::Icon;

/// Create, edit and delete notices.
#[component]
pub fn NoticesAdmin(toast: Signal<Option<ToastMessage>>) -> Element {
    let site = use_site();
    let notices = use_all_notices();
    let mut toast = toast;
    let mut editing = use_signal(|| None::<Id>);
    let mut category = use_signal(|| NoticeCategory::General);
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut date = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let mut reset = move || {
        editing.set(None);
        category.set(NoticeCategory::General);
        title.set(String::new());
        content.set(String::new());
        date.set(String::new());
    };

    let submit_site = site.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let site = submit_site.clone();
        async move {
            let draft = NoticeDraft {
                category: category(),
                title: title().trim().to_string(),
                content: content().trim().to_string(),
                date: date().trim().to_string(),
            };
            if draft.title.is_empty() || draft.content.is_empty() || draft.date.is_empty() {
                toast.set(Some(ToastMessage::Error("Please fill in all fields".to_string())));
                return;
            }
            saving.set(true);
            let result = match editing() {
                Some(id) => site
                    .client
                    .update_notice(id, draft)
                    .await
                    .map(|()| "Notice updated successfully!"),
                None => site
                    .client
                    .create_notice(draft)
                    .await
                    .map(|_| "Notice created successfully!"),
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

    let mut start_edit = move |notice: Notice| {
        editing.set(Some(notice.id));
        category.set(notice.category);
        title.set(notice.title);
        content.set(notice.content);
        date.set(notice.date);
    };

    let delete = move |id: Id| {
        let site = site.clone();
        async move {
            if !confirm("Are you sure you want to delete this notice?") {
                return;
            }
            match site.client.delete_notice(id).await {
                Ok(()) => {
                    toast.set(Some(ToastMessage::Success("Notice deleted successfully!".to_string())));
                    if editing() == Some(id) {
                        reset();
                    }
                    site.notify();
                }
                Err(e) => toast.set(Some(ToastMessage::Error(e.message))),
            }
        }
    };

    let rows = match query_state(&notices) {
        QueryState::Idle | QueryState::Loading => rsx! {
            tr { td { colspan: "4", class: "muted center", "Loading notices..." } }
        },
        QueryState::Error(err) => {
            let message = read_error(&err);
            rsx! {
                tr { td { colspan: "4", class: "field-error center", "{message}" } }
            }
        }
        QueryState::Success(list) if list.is_empty() => rsx! {
            tr { td { colspan: "4", class: "muted center", "No notices found" } }
        },
        QueryState::Success(list) => rsx! {
            for notice in list {
                tr { key: "{notice.id}",
                    td { class: "strong", "{notice.title}" }
                    td { "{notice.category.short_label()}" }
                    td { "{notice.date}" }
                    td { class: "actions",
                        button {
                            class: "icon-btn",
                            aria_label: "Edit notice",
                            onclick: {
                                let notice = notice.clone();
                                move |_| start_edit(notice.clone())
                            },
                            Icon { icon: FaPenToSquare, width: 14, height: 14 }
                        }
                        button {
                            class: "icon-btn danger",
                            aria_label: "Delete notice",
                            onclick: {
                                let id = notice.id;
                                let delete = delete.clone();
                                move |_| delete(id)
                            },
                            Icon { icon: FaTrashCan, width: 14, height: 14 }
                        }
                    }
                }
            }
        },
    };

    let heading = if editing().is_some() { "Edit Notice" } else { "Create Notice" };

    rsx! {
        div { class: "grid two",
            section { class: "card",
                h3 { "{heading}" }
                p { class: "muted", "Add a new notice to the website" }
                form { class: "form", onsubmit,
                    div { class: "field",
                        label { r#for: "notice-category", "Category" }
                        select {
                            id: "notice-category",
                            value: category().key(),
                            onchange: move |evt: FormEvent| category.set(NoticeCategory::from_key(&evt.value())),
                            for option_category in NoticeCategory::ALL {
                                option {
                                    key: "{option_category.key()}",
                                    value: option_category.key(),
                                    "{option_category.short_label()}"
                                }
                            }
                        }
                    }
                    div { class: "field",
                        label { r#for: "notice-title", "Title" }
                        input {
                            id: "notice-title",
                            placeholder: "Notice title",
                            value: title(),
                            oninput: move |evt: FormEvent| title.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { r#for: "notice-content", "Content" }
                        textarea {
                            id: "notice-content",
                            rows: "5",
                            placeholder: "Notice content",
                            value: content(),
                            oninput: move |evt: FormEvent| content.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { r#for: "notice-date", "Date" }
                        input {
                            id: "notice-date",
                            r#type: "date",
                            value: date(),
                            oninput: move |evt: FormEvent| date.set(evt.value()),
                        }
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
                                "Create Notice"
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
                h3 { "Manage Notices" }
                p { class: "muted", "View, edit and delete existing notices" }
                div { class: "table-wrap",
                    table {
                        thead {
                            tr {
                                th { "Title" }
                                th { "Category" }
                                th { "Date" }
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

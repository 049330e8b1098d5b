//! Gallery grid, image fallback and lightbox.

use dioxus::prelude::*;
use store::gallery::{fallback_source, next_index, previous_index, process, with_fallback};
use store::models::GalleryItem;
use store::QueryState;

use crate::client::{query_state, use_gallery};
use crate::icons::{FaChevronLeft, FaChevronRight, FaImage, FaXmark};
use crate::status::{read_error, LoadingState};
use crate::views::ModalOverlay;
use crate::Icon;

/// An `img` that swaps to the local placeholder once if its source fails.
#[component]
pub fn ImageWithFallback(
    src: String,
    alt: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut current = use_signal(|| src.clone());
    let mut swapped = use_signal(|| false);

    // A new source prop restarts the fallback cycle.
    use_effect(use_reactive!(|src| {
        current.set(src);
        swapped.set(false);
    }));

    rsx! {
        img {
            class: "{class}",
            src: "{current}",
            alt: "{alt}",
            loading: "lazy",
            onerror: move |_| {
                let next = fallback_source(&current.peek(), swapped());
                if let Some(next) = next {
                    current.set(next.to_string());
                    swapped.set(true);
                }
            },
        }
    }
}

fn alt_text(item: &GalleryItem) -> String {
    if item.description.is_empty() {
        item.title.clone()
    } else {
        item.description.clone()
    }
}

/// Full-size view with wrap-around navigation. Arrow keys move, Escape
/// closes.
#[component]
pub fn Lightbox(items: Vec<GalleryItem>, index: Signal<Option<usize>>) -> Element {
    let mut index = index;
    let len = items.len();
    let Some(current) = index().filter(|i| *i < len) else {
        return rsx! {};
    };
    let item = items[current].clone();

    rsx! {
        ModalOverlay { on_close: move |_| index.set(None), wide: true,
            div {
                class: "lightbox",
                tabindex: "0",
                onmounted: move |evt| async move {
                    let _ = evt.set_focus(true).await;
                },
                onkeydown: move |evt: KeyboardEvent| match evt.key() {
                    Key::ArrowLeft => index.set(Some(previous_index(current, len))),
                    Key::ArrowRight => index.set(Some(next_index(current, len))),
                    Key::Escape => index.set(None),
                    _ => {}
                },
                button {
                    class: "lightbox-close",
                    aria_label: "Close",
                    onclick: move |_| index.set(None),
                    Icon { icon: FaXmark, width: 18, height: 18 }
                }
                ImageWithFallback { key: "{item.id}", src: item.image_url.clone(), alt: alt_text(&item) }
                if len > 1 {
                    button {
                        class: "lightbox-nav prev",
                        aria_label: "Previous image",
                        onclick: move |_| index.set(Some(previous_index(current, len))),
                        Icon { icon: FaChevronLeft, width: 18, height: 18 }
                    }
                    button {
                        class: "lightbox-nav next",
                        aria_label: "Next image",
                        onclick: move |_| index.set(Some(next_index(current, len))),
                        Icon { icon: FaChevronRight, width: 18, height: 18 }
                    }
                }
                p { class: "lightbox-caption", "{item.title}" }
                p { class: "muted small", "{current + 1} / {len}" }
            }
        }
    }
}

/// Gallery thumbnails opening into a [`Lightbox`].
///
/// With `fallback` set, an empty or failed read shows the local placeholder
/// set instead of an empty or error card.
#[component]
pub fn GalleryGrid(#[props(default = false)] fallback: bool, limit: Option<usize>) -> Element {
    let gallery = use_gallery();
    let mut selected = use_signal(|| None::<usize>);

    let state = query_state(&gallery);
    let items = match &state {
        QueryState::Idle | QueryState::Loading => {
            return rsx! {
                LoadingState { message: "Loading gallery..." }
            };
        }
        QueryState::Error(err) if !fallback => {
            let message = read_error(err);
            return rsx! {
                div { class: "card status-error center",
                    Icon { icon: FaImage, width: 32, height: 32 }
                    p { "Failed to load gallery images" }
                    p { class: "muted small", "{message}" }
                }
            };
        }
        QueryState::Error(_) => with_fallback(None),
        QueryState::Success(list) if fallback => with_fallback(Some(list.as_slice())),
        QueryState::Success(list) => process(list),
    };
    let items: Vec<GalleryItem> = match limit {
        Some(limit) => items.into_iter().take(limit).collect(),
        None => items,
    };

    if items.is_empty() {
        return rsx! {
            div { class: "card center",
                Icon { icon: FaImage, width: 32, height: 32 }
                p { "No gallery images available at the moment." }
                p { class: "muted small", "Check back later for photos of community events and activities." }
            }
        };
    }

    rsx! {
        div { class: "grid three gallery",
            for (i, item) in items.iter().enumerate() {
                button {
                    key: "{item.id}",
                    class: "gallery-thumb",
                    onclick: move |_| selected.set(Some(i)),
                    ImageWithFallback { src: item.image_url.clone(), alt: alt_text(item) }
                    span { class: "gallery-title", "{item.title}" }
                }
            }
        }
        Lightbox { items, index: selected }
    }
}

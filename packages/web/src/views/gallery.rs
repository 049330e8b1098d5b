use dioxus::prelude::*;
use ui::GalleryGrid;

#[component]
pub fn Gallery() -> Element {
    rsx! {
        div { class: "container",
            div { class: "page-head",
                h1 { "Gallery" }
                p { class: "muted", "Photos of community gatherings, development works, and cultural celebrations." }
            }
            GalleryGrid {}
        }
    }
}

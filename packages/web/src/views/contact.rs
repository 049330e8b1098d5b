use dioxus::prelude::*;
use ui::{ContactDetails, ContactForm};

#[component]
pub fn Contact() -> Element {
    rsx! {
        div { class: "container",
            div { class: "page-head",
                h1 { "Contact Us" }
            }
            div { class: "grid two",
                section { class: "card",
                    h3 { "NCRL Welfare Association Office" }
                    ContactDetails {}
                }
                section { class: "card",
                    h3 { "Send us a message" }
                    ContactForm {}
                }
            }
        }
    }
}

use dioxus::prelude::*;
use ui::icons::{FaBullseye, FaEye, FaFileLines, FaMap};
use ui::Icon;

const BYLAWS_PDF: &str = "/assets/documents/association-bylaws-placeholder.pdf";
const LAYOUT_PLAN_PDF: &str = "/assets/documents/layout-plan-placeholder.pdf";

#[component]
pub fn About() -> Element {
    let committee = [
        ("President", "[Name]"),
        ("Secretary", "[Name]"),
        ("Treasurer", "[Name]"),
        ("Members", "[List of names]"),
    ];

    rsx! {
        div { class: "container",
            div { class: "page-head",
                h1 { "About Us" }
            }
            div { class: "card section",
                p { class: "lead muted",
                    "The NCRL Welfare Association represents residents of New City Regency Layout (Madhu Reddy Layout)."
                }
            }
            div { class: "grid two",
                div { class: "card",
                    div { class: "card-head",
                        Icon { icon: FaBullseye, width: 18, height: 18 }
                        h3 { "Mission" }
                    }
                    p { class: "muted", "To ensure fair representation, transparent communication, and community-driven development." }
                }
                div { class: "card",
                    div { class: "card-head",
                        Icon { icon: FaEye, width: 18, height: 18 }
                        h3 { "Vision" }
                    }
                    p { class: "muted", "A self-reliant, well-connected, and progressive neighborhood." }
                }
            }
            div { class: "card section",
                h3 { "Committee" }
                dl { class: "committee",
                    for (role, name) in committee {
                        dt { key: "{role}", "{role} –" }
                        dd { "{name}" }
                    }
                }
            }
            div { class: "card section",
                h3 { "Bylaws" }
                DocumentLink {
                    title: "Association Bylaws and Rules",
                    description: "Official bylaws and rules governing the association",
                    href: BYLAWS_PDF,
                }
            }
        }
    }
}

#[component]
pub fn Documents() -> Element {
    rsx! {
        div { class: "container",
            div { class: "page-head",
                h1 { "Documents" }
            }
            div { class: "grid two",
                div { class: "card",
                    div { class: "card-head",
                        Icon { icon: FaMap, width: 18, height: 18 }
                        h3 { "Layout Plan (image/PDF)" }
                    }
                    DocumentLink {
                        title: "Layout Plan",
                        description: "Official layout plan of New City Regency Layout",
                        href: LAYOUT_PLAN_PDF,
                    }
                }
                div { class: "card",
                    div { class: "card-head",
                        Icon { icon: FaFileLines, width: 18, height: 18 }
                        h3 { "Association Bylaws and Rules" }
                    }
                    DocumentLink {
                        title: "Bylaws",
                        description: "Official bylaws and rules governing the association",
                        href: BYLAWS_PDF,
                    }
                }
            }
        }
    }
}

#[component]
fn DocumentLink(title: String, description: String, href: &'static str) -> Element {
    rsx! {
        div { class: "document",
            p { class: "strong", "{title}" }
            p { class: "muted small", "{description}" }
            a {
                class: "btn btn-outline",
                href: href,
                target: "_blank",
                rel: "noopener noreferrer",
                "Open Document"
            }
        }
    }
}

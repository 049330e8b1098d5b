use dioxus::prelude::*;
use ui::icons::{FaBell, FaCalendarDays, FaEnvelope, FaUsers};
use ui::{ContactDetails, ContactForm, GalleryGrid, Icon, LatestNotices, UpcomingEvents};

use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "hero",
            div { class: "container",
                h1 { "New City Regency Layout Residents Welfare Association" }
                p { class: "lead", "Working together for a better neighbourhood in New City Regency Layout (Madhu Reddy Layout)." }
                div { class: "row",
                    Link { class: "btn btn-primary", to: Route::Membership {}, "Join Us" }
                    Link { class: "btn btn-outline", to: Route::About {}, "Learn More" }
                }
            }
        }

        div { class: "container",
            section { class: "section",
                h2 { class: "center", "Quick Links" }
                div { class: "grid four quick-links",
                    Link { class: "card quick-link", to: Route::Notices {},
                        Icon { icon: FaBell, width: 22, height: 22 }
                        h3 { "Notices" }
                        p { class: "muted small", "Stay updated with important announcements" }
                    }
                    Link { class: "card quick-link", to: Route::Events {},
                        Icon { icon: FaCalendarDays, width: 22, height: 22 }
                        h3 { "Events" }
                        p { class: "muted small", "Meetings, cultural programs and welfare drives" }
                    }
                    Link { class: "card quick-link", to: Route::Membership {},
                        Icon { icon: FaUsers, width: 22, height: 22 }
                        h3 { "Membership" }
                        p { class: "muted small", "Register as a member of the association" }
                    }
                    Link { class: "card quick-link", to: Route::Contact {},
                        Icon { icon: FaEnvelope, width: 22, height: 22 }
                        h3 { "Contact" }
                        p { class: "muted small", "Reach the association office" }
                    }
                }
            }

            section { class: "section",
                div { class: "section-head",
                    h2 { "Latest Notices" }
                    Link { class: "btn btn-outline", to: Route::Notices {}, "View All" }
                }
                div { class: "card",
                    LatestNotices { limit: 5 }
                }
            }

            section { class: "section",
                div { class: "section-head",
                    h2 { "Upcoming Events" }
                    Link { class: "btn btn-outline", to: Route::Events {}, "View All" }
                }
                UpcomingEvents { limit: 3 }
            }

            section { class: "section",
                div { class: "section-head",
                    h2 { "Gallery" }
                    Link { class: "btn btn-outline", to: Route::Gallery {}, "View All" }
                }
                GalleryGrid { fallback: true, limit: 6 }
            }

            section { class: "section grid two",
                div {
                    h2 { "Get in Touch" }
                    p { class: "muted",
                        "Have questions or suggestions? We'd love to hear from you. Fill out the form and we'll get back to you as soon as possible."
                    }
                    ContactDetails {}
                }
                div { class: "card",
                    ContactForm {}
                }
            }
        }
    }
}

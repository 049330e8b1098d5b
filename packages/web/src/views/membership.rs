use dioxus::prelude::*;
use ui::icons::{FaCreditCard, FaUserPlus};
use ui::{Icon, MembershipForm, PaymentForm};

#[component]
pub fn Membership() -> Element {
    rsx! {
        div { class: "container",
            div { class: "page-head",
                h1 { "Membership & Payments" }
            }
            div { class: "grid two",
                section { class: "card",
                    div { class: "card-head",
                        Icon { icon: FaUserPlus, width: 18, height: 18 }
                        h3 { "Online Membership Registration" }
                    }
                    p { class: "muted", "Register as a member of the NCRL Welfare Association." }
                    MembershipForm {}
                }
                section { class: "card",
                    div { class: "card-head",
                        Icon { icon: FaCreditCard, width: 18, height: 18 }
                        h3 { "Payment Options" }
                    }
                    PaymentForm {}
                }
            }
        }
    }
}

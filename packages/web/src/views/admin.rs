use dioxus::prelude::*;
use store::AdminTab;
use ui::views::AdminDashboard;

use crate::Route;

/// `/admin?tab=...`; an unknown or missing tab falls back to notices.
#[component]
pub fn Admin(tab: String) -> Element {
    let nav = navigator();
    let current = AdminTab::parse(Some(tab.as_str()));

    rsx! {
        AdminDashboard {
            tab: current,
            on_select: move |selected: AdminTab| {
                nav.push(Route::Admin { tab: selected.as_str().to_string() });
            },
        }
    }
}

use dioxus::prelude::*;

/// Full-screen backdrop centring its children in a card. Clicking the
/// backdrop triggers `on_close`; clicks inside the card do not.
#[component]
pub fn ModalOverlay(
    on_close: EventHandler<()>,
    #[props(default = false)] wide: bool,
    children: Element,
) -> Element {
    let card_class = if wide { "modal-card wide" } else { "modal-card" };

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "{card_class}",
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

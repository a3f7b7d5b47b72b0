//! The dialog frame every create form opens in.

use dioxus::prelude::*;

/// Backdrop plus a titled card. The backdrop, the close button and the
/// Escape key all call `on_close`; clicks inside the card do not.
#[component]
pub fn ModalOverlay(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            tabindex: "-1",
            onclick: move |_| on_close.call(()),
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Escape {
                    on_close.call(());
                }
            },
            section {
                class: "modal-card",
                role: "dialog",
                "aria-label": "{title}",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                header { class: "modal-header",
                    h2 { class: "modal-title", "{title}" }
                    button {
                        r#type: "button",
                        class: "modal-close",
                        title: "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                {children}
            }
        }
    }
}

//! Transient banners.
//!
//! A banner shows one [`Message`] and asks its owner to expire it after the
//! message's window. Expiry is by id, so a newer message is never cleared
//! by an older timer.

use std::time::Duration;

use api::forms::{Message, Tone};
use dioxus::prelude::*;

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

#[component]
pub fn MessageBanner(message: Option<Message>, on_expire: EventHandler<u64>) -> Element {
    use_effect(use_reactive!(|message| {
        if let Some(message) = message {
            spawn(async move {
                sleep(message.window).await;
                on_expire.call(message.id);
            });
        }
    }));

    match message {
        Some(message) => {
            let class = match message.tone {
                Tone::Info => "banner banner-info",
                Tone::Error => "banner banner-error",
            };
            rsx! {
                div { class: "{class}", role: "status", "{message.text}" }
            }
        }
        None => rsx! {},
    }
}

/// A banner slot for views that are not backed by a form controller.
#[derive(Clone, Copy, PartialEq)]
pub struct Flash {
    current: Signal<Option<Message>>,
    next: Signal<u64>,
}

pub fn use_flash() -> Flash {
    Flash {
        current: use_signal(|| None),
        next: use_signal(|| 0),
    }
}

impl Flash {
    pub fn show(mut self, text: impl Into<String>, tone: Tone, window: Duration) {
        let id = self.next.with_mut(|next| {
            *next += 1;
            *next
        });
        self.current.set(Some(Message {
            id,
            text: text.into(),
            tone,
            window,
        }));
    }

    pub fn expire(mut self, id: u64) {
        if self.current.peek().as_ref().is_some_and(|m| m.id == id) {
            self.current.set(None);
        }
    }

    pub fn get(&self) -> Option<Message> {
        (self.current)()
    }
}

#[component]
pub fn FlashBanner(flash: Flash) -> Element {
    rsx! {
        MessageBanner {
            message: flash.get(),
            on_expire: move |id| flash.expire(id),
        }
    }
}

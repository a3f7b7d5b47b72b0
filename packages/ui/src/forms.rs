//! Signal-side drivers for [`FormController`].
//!
//! The controller lives in a `Signal` owned by the view that shows the
//! modal. These helpers run its network work on the component's task
//! scope and write the results back with `try_write`, so a view that was
//! unmounted mid-request is simply skipped.

use api::forms::{dispatch, fetch_reference, Draft, FormController, SubmitOutcome};
use api::HttpGateway;
use dioxus::prelude::*;

use crate::session::use_console;

/// A controller for `draft`, with the configured message windows.
pub fn use_form<D: Draft + 'static>(draft: impl FnOnce() -> D) -> Signal<FormController<D>> {
    let windows = use_console().config.messages;
    use_signal(move || FormController::new(draft(), windows))
}

/// Like [`use_form`], for drafts bound to a route parameter. When `key`
/// changes on a reused component the controller is rebound to `draft(key)`.
pub fn use_keyed_form<K, D>(key: K, draft: fn(K) -> D) -> Signal<FormController<D>>
where
    K: Clone + PartialEq + 'static,
    D: Draft + 'static,
{
    let initial = key.clone();
    let mut form = use_form(move || draft(initial));
    let mut bound = use_signal(|| key.clone());
    use_effect(use_reactive((&key,), move |(key,)| {
        if *bound.peek() != key {
            bound.set(key.clone());
            form.write().rebind(draft(key));
        }
    }));
    form
}

/// Open the modal and fetch whichever reference lists are still missing.
pub fn open_form<D: Draft + 'static>(mut form: Signal<FormController<D>>, gateway: HttpGateway) {
    let fetches = form.write().open();
    for fetch in fetches {
        let gateway = gateway.clone();
        spawn(async move {
            if let Some(loaded) = fetch_reference(&fetch, &gateway).await {
                if let Ok(mut controller) = form.try_write() {
                    controller.apply_references(loaded);
                }
            }
        });
    }
}

/// Validate and send the draft. Validation failures and a second click
/// while a request is pending stay local; `on_settled` only fires once the
/// server has answered.
pub fn submit_form<D: Draft + 'static>(
    mut form: Signal<FormController<D>>,
    gateway: HttpGateway,
    on_settled: EventHandler<SubmitOutcome>,
) {
    let payload = match form.write().begin_submit() {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("submit not sent: {e}");
            return;
        }
    };
    spawn(async move {
        let result = dispatch::<D, _>(&payload, &gateway).await;
        let outcome = match form.try_write() {
            Ok(mut controller) => controller.finish_submit(result),
            Err(_) => return,
        };
        on_settled.call(outcome);
    });
}

pub fn close_form<D: Draft + 'static>(mut form: Signal<FormController<D>>) {
    form.write().cancel();
}

/// The banner belonging to `form`. Stays visible after the modal closes.
pub fn form_banner<D: Draft + 'static>(mut form: Signal<FormController<D>>) -> Element {
    let message = form.read().message().cloned();
    rsx! {
        crate::MessageBanner {
            message,
            on_expire: move |id| {
                form.write().expire_message(id);
            },
        }
    }
}

/// Labeled text input bound to a string field.
#[component]
pub fn TextField(
    label: String,
    value: String,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] placeholder: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            input {
                r#type: "{kind}",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
        }
    }
}

/// Submit and cancel buttons; the submit button is disabled while sending.
#[component]
pub fn FormActions(submitting: bool, label: String, on_cancel: EventHandler<()>) -> Element {
    rsx! {
        div { class: "modal-actions",
            button {
                r#type: "submit",
                class: "btn btn-primary",
                disabled: submitting,
                if submitting { "Saving..." } else { "{label}" }
            }
            button {
                r#type: "button",
                class: "btn",
                onclick: move |_| on_cancel.call(()),
                "Cancel"
            }
        }
    }
}

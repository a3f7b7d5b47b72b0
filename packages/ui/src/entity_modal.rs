//! Create modals for the registry entities.

use api::forms::{
    CategoryDraft, CustomerDraft, FormController, ProductDraft, SubmitOutcome, SupplierDraft,
    WarehouseDraft,
};
use dioxus::prelude::*;

use crate::forms::{close_form, submit_form, FormActions, TextField};
use crate::modal::ModalOverlay;
use crate::session::use_gateway;

#[component]
pub fn CategoryModal(
    mut form: Signal<FormController<CategoryDraft>>,
    on_settled: EventHandler<SubmitOutcome>,
) -> Element {
    let gateway = use_gateway();
    if !form.read().is_open() {
        return rsx! {};
    }
    let draft = form.read().draft().clone();
    let submitting = form.read().is_submitting();

    rsx! {
        ModalOverlay {
            title: "New category",
            on_close: move |_| close_form(form),
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit_form(form, gateway.clone(), on_settled);
                },
                TextField {
                    label: "Name",
                    value: draft.name,
                    on_input: move |value| form.write().draft_mut().name = value,
                }
                TextField {
                    label: "Description",
                    value: draft.description,
                    on_input: move |value| form.write().draft_mut().description = value,
                }
                FormActions { submitting, label: "Add", on_cancel: move |_| close_form(form) }
            }
        }
    }
}

#[component]
pub fn ProductModal(
    mut form: Signal<FormController<ProductDraft>>,
    on_settled: EventHandler<SubmitOutcome>,
) -> Element {
    let gateway = use_gateway();
    if !form.read().is_open() {
        return rsx! {};
    }
    let draft = form.read().draft().clone();
    let categories = form.read().references().categories.items().to_vec();
    let submitting = form.read().is_submitting();
    let selected = draft.category.clone();

    rsx! {
        ModalOverlay {
            title: "New product",
            on_close: move |_| close_form(form),
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit_form(form, gateway.clone(), on_settled);
                },
                TextField {
                    label: "Code",
                    value: draft.code,
                    on_input: move |value| form.write().draft_mut().code = value,
                }
                TextField {
                    label: "Name",
                    value: draft.name,
                    on_input: move |value| form.write().draft_mut().name = value,
                }
                TextField {
                    label: "Description",
                    value: draft.description,
                    on_input: move |value| form.write().draft_mut().description = value,
                }
                TextField {
                    label: "Price",
                    kind: "number",
                    value: draft.price,
                    on_input: move |value| form.write().draft_mut().price = value,
                }
                label { class: "field",
                    span { class: "field-label", "Category" }
                    select {
                        value: "{selected}",
                        onchange: move |evt: FormEvent| form.write().draft_mut().category = evt.value(),
                        option { value: "", "Select a category" }
                        for category in categories {
                            option {
                                key: "{category.id}",
                                value: "{category.id}",
                                selected: category.id.to_string() == selected,
                                "{category.name}"
                            }
                        }
                    }
                }
                FormActions { submitting, label: "Add", on_cancel: move |_| close_form(form) }
            }
        }
    }
}

#[component]
pub fn SupplierModal(
    mut form: Signal<FormController<SupplierDraft>>,
    on_settled: EventHandler<SubmitOutcome>,
) -> Element {
    let gateway = use_gateway();
    if !form.read().is_open() {
        return rsx! {};
    }
    let draft = form.read().draft().clone();
    let submitting = form.read().is_submitting();

    rsx! {
        ModalOverlay {
            title: "New supplier",
            on_close: move |_| close_form(form),
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit_form(form, gateway.clone(), on_settled);
                },
                TextField {
                    label: "Name",
                    value: draft.name,
                    on_input: move |value| form.write().draft_mut().name = value,
                }
                TextField {
                    label: "Address",
                    value: draft.address,
                    on_input: move |value| form.write().draft_mut().address = value,
                }
                TextField {
                    label: "Phone number",
                    kind: "tel",
                    value: draft.phone_number,
                    on_input: move |value| form.write().draft_mut().phone_number = value,
                }
                FormActions { submitting, label: "Add", on_cancel: move |_| close_form(form) }
            }
        }
    }
}

#[component]
pub fn CustomerModal(
    mut form: Signal<FormController<CustomerDraft>>,
    on_settled: EventHandler<SubmitOutcome>,
) -> Element {
    let gateway = use_gateway();
    if !form.read().is_open() {
        return rsx! {};
    }
    let draft = form.read().draft().clone();
    let submitting = form.read().is_submitting();

    rsx! {
        ModalOverlay {
            title: "New customer",
            on_close: move |_| close_form(form),
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit_form(form, gateway.clone(), on_settled);
                },
                TextField {
                    label: "Name",
                    value: draft.name,
                    on_input: move |value| form.write().draft_mut().name = value,
                }
                TextField {
                    label: "Phone number",
                    kind: "tel",
                    value: draft.phone_number,
                    on_input: move |value| form.write().draft_mut().phone_number = value,
                }
                FormActions { submitting, label: "Add", on_cancel: move |_| close_form(form) }
            }
        }
    }
}

#[component]
pub fn WarehouseModal(
    mut form: Signal<FormController<WarehouseDraft>>,
    on_settled: EventHandler<SubmitOutcome>,
) -> Element {
    let gateway = use_gateway();
    if !form.read().is_open() {
        return rsx! {};
    }
    let draft = form.read().draft().clone();
    let submitting = form.read().is_submitting();

    rsx! {
        ModalOverlay {
            title: "New warehouse",
            on_close: move |_| close_form(form),
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit_form(form, gateway.clone(), on_settled);
                },
                TextField {
                    label: "Code",
                    value: draft.code,
                    on_input: move |value| form.write().draft_mut().code = value,
                }
                TextField {
                    label: "Location",
                    value: draft.location,
                    on_input: move |value| form.write().draft_mut().location = value,
                }
                FormActions { submitting, label: "Add", on_cancel: move |_| close_form(form) }
            }
        }
    }
}

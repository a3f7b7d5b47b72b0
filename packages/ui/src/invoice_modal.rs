//! Create-invoice modals for one warehouse.
//!
//! Both modals edit a line sequence that always keeps at least one row.
//! Reference dropdowns come from the controller's caches, which are filled
//! on first open and reused afterwards.

use api::forms::{ExportDraft, FormController, ImportDraft, LineField, LineItem, SubmitOutcome};
use dioxus::prelude::*;

use crate::forms::{close_form, submit_form, FormActions};
use crate::modal::ModalOverlay;
use crate::session::use_gateway;

#[derive(Clone, PartialEq)]
struct Choice {
    value: String,
    label: String,
}

#[component]
fn LineRows(
    lines: Vec<LineItem>,
    choices: Vec<Choice>,
    placeholder: String,
    on_set: EventHandler<(usize, LineField, String)>,
    on_remove: EventHandler<usize>,
) -> Element {
    let last = lines.len() == 1;
    rsx! {
        table { class: "line-items",
            thead {
                tr {
                    th { "Item" }
                    th { "Quantity" }
                    th { "Unit price" }
                    th {}
                }
            }
            tbody {
                for (index, line) in lines.into_iter().enumerate() {
                    tr { key: "{index}",
                        td {
                            select {
                                value: "{line.reference}",
                                onchange: move |evt: FormEvent| on_set.call((index, LineField::Reference, evt.value())),
                                option { value: "", "{placeholder}" }
                                for choice in choices.iter() {
                                    option {
                                        key: "{choice.value}",
                                        value: "{choice.value}",
                                        selected: choice.value == line.reference,
                                        "{choice.label}"
                                    }
                                }
                            }
                        }
                        td {
                            input {
                                r#type: "number",
                                min: "1",
                                step: "1",
                                value: "{line.quantity}",
                                oninput: move |evt: FormEvent| on_set.call((index, LineField::Quantity, evt.value())),
                            }
                        }
                        td {
                            input {
                                r#type: "number",
                                min: "0",
                                step: "any",
                                value: "{line.unit_price}",
                                oninput: move |evt: FormEvent| on_set.call((index, LineField::UnitPrice, evt.value())),
                            }
                        }
                        td {
                            button {
                                r#type: "button",
                                class: "btn btn-small",
                                disabled: last,
                                onclick: move |_| on_remove.call(index),
                                "Remove"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ImportInvoiceModal(
    mut form: Signal<FormController<ImportDraft>>,
    on_settled: EventHandler<SubmitOutcome>,
) -> Element {
    let gateway = use_gateway();
    let controller = form.read();
    if !controller.is_open() {
        return rsx! {};
    }

    let supplier = controller.draft().supplier().to_string();
    let suppliers: Vec<Choice> = controller
        .references()
        .suppliers
        .items()
        .iter()
        .map(|s| Choice {
            value: s.id.to_string(),
            label: s.name.clone(),
        })
        .collect();
    let products: Vec<Choice> = controller
        .references()
        .products
        .items()
        .iter()
        .map(|p| Choice {
            value: p.id.to_string(),
            label: p.label(),
        })
        .collect();
    let lines = controller.lines().items().to_vec();
    let submitting = controller.is_submitting();
    drop(controller);

    rsx! {
        ModalOverlay {
            title: "New import invoice",
            on_close: move |_| close_form(form),
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit_form(form, gateway.clone(), on_settled);
                },
                label { class: "field",
                    span { class: "field-label", "Supplier" }
                    select {
                        value: "{supplier}",
                        onchange: move |evt: FormEvent| form.write().draft_mut().set_supplier(evt.value()),
                        option { value: "", "Select a supplier" }
                        for choice in suppliers {
                            option {
                                key: "{choice.value}",
                                value: "{choice.value}",
                                selected: choice.value == supplier,
                                "{choice.label}"
                            }
                        }
                    }
                }
                LineRows {
                    lines,
                    choices: products,
                    placeholder: "Select a product",
                    on_set: move |(index, field, value): (usize, LineField, String)| {
                        form.write().set_line_field(index, field, value);
                    },
                    on_remove: move |index| {
                        form.write().remove_line(index);
                    },
                }
                button {
                    r#type: "button",
                    class: "btn",
                    onclick: move |_| form.write().add_line(),
                    "Add line"
                }
                FormActions { submitting, label: "Create", on_cancel: move |_| close_form(form) }
            }
        }
    }
}

#[component]
pub fn ExportInvoiceModal(
    mut form: Signal<FormController<ExportDraft>>,
    on_settled: EventHandler<SubmitOutcome>,
) -> Element {
    let gateway = use_gateway();
    let controller = form.read();
    if !controller.is_open() {
        return rsx! {};
    }

    let customer = controller.draft().customer().to_string();
    let use_points = controller.draft().use_points();
    let customers: Vec<Choice> = controller
        .references()
        .customers
        .items()
        .iter()
        .map(|c| Choice {
            value: c.id.to_string(),
            label: c.label(),
        })
        .collect();
    let stock: Vec<Choice> = controller
        .references()
        .stock
        .items()
        .iter()
        .map(|item| Choice {
            value: item.id.to_string(),
            label: format!("{} ({}) - {} in stock", item.product_name, item.product_code, item.quantity),
        })
        .collect();
    let lines = controller.lines().items().to_vec();
    let submitting = controller.is_submitting();
    drop(controller);

    rsx! {
        ModalOverlay {
            title: "New export invoice",
            on_close: move |_| close_form(form),
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit_form(form, gateway.clone(), on_settled);
                },
                label { class: "field",
                    span { class: "field-label", "Customer" }
                    select {
                        value: "{customer}",
                        onchange: move |evt: FormEvent| form.write().draft_mut().set_customer(evt.value()),
                        option { value: "", "Select a customer" }
                        for choice in customers {
                            option {
                                key: "{choice.value}",
                                value: "{choice.value}",
                                selected: choice.value == customer,
                                "{choice.label}"
                            }
                        }
                    }
                }
                label { class: "field field-inline",
                    input {
                        r#type: "checkbox",
                        checked: use_points,
                        onchange: move |evt: FormEvent| form.write().draft_mut().set_use_points(evt.checked()),
                    }
                    span { "Redeem customer points" }
                }
                LineRows {
                    lines,
                    choices: stock,
                    placeholder: "Select an item",
                    on_set: move |(index, field, value): (usize, LineField, String)| {
                        form.write().set_line_field(index, field, value);
                    },
                    on_remove: move |index| {
                        form.write().remove_line(index);
                    },
                }
                button {
                    r#type: "button",
                    class: "btn",
                    onclick: move |_| form.write().add_line(),
                    "Add line"
                }
                FormActions { submitting, label: "Create", on_cancel: move |_| close_form(form) }
            }
        }
    }
}

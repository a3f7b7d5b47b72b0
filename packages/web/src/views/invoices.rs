//! Import and export history of one warehouse, with create modals and
//! per-invoice detail views.

use api::forms::{ExportDraft, ImportDraft, SubmitOutcome};
use api::models::{ExportInvoice, ExportLine, ImportInvoice, ImportLine};
use api::ListState;
use dioxus::prelude::*;
use ui::{
    form_banner, list_notice, money, open_form, use_gateway, use_keyed_form, ExportInvoiceModal,
    ImportInvoiceModal,
};

use crate::Route;

#[component]
pub fn Imports(id: i64) -> Element {
    let gateway = use_gateway();
    let form = use_keyed_form(id, ImportDraft::new);

    let loader = gateway.clone();
    let mut rows = use_resource(use_reactive!(|id| {
        let gateway = loader.clone();
        async move { ListState::from_result(gateway.imports(id).await, "Failed to load import invoices.") }
    }));
    let state: ListState<ImportInvoice> = rows.cloned().unwrap_or(ListState::Loading);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Import invoices" }
                div { class: "page-actions",
                    Link { class: "btn", to: Route::WarehouseDetail { id }, "Stock" }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| open_form(form, gateway.clone()),
                        "New import"
                    }
                }
            }
            {form_banner(form)}
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "#" }
                            th { "Supplier" }
                            th { "Created by" }
                            th { "Date" }
                            th { "Total" }
                            th {}
                        }
                    }
                    tbody {
                        for invoice in state.rows().iter().cloned() {
                            tr { key: "{invoice.id}",
                                td { "{invoice.id}" }
                                td { "{invoice.supplier}" }
                                td { "{invoice.created_by}" }
                                td { {invoice.created_date.clone().unwrap_or_default()} }
                                td { {money(invoice.total)} }
                                td {
                                    Link { to: Route::ImportDetail { id, invoice: invoice.id }, "Details" }
                                }
                            }
                        }
                    }
                }
            }
            ImportInvoiceModal {
                form,
                on_settled: move |outcome: SubmitOutcome| {
                    if outcome.refreshes_list() {
                        rows.restart();
                    }
                },
            }
        }
    }
}

#[component]
pub fn ImportDetail(id: i64, invoice: i64) -> Element {
    let gateway = use_gateway();
    let rows = use_resource(use_reactive!(|invoice| {
        let gateway = gateway.clone();
        async move {
            ListState::from_result(gateway.import_detail(invoice).await, "Failed to load invoice lines.")
        }
    }));
    let state: ListState<ImportLine> = rows.cloned().unwrap_or(ListState::Loading);
    let total: f64 = state.rows().iter().map(|line| line.total).sum();

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Import invoice #{invoice}" }
                Link { class: "btn", to: Route::Imports { id }, "Back" }
            }
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "Code" }
                            th { "Item" }
                            th { "Quantity" }
                            th { "Unit price" }
                            th { "Total" }
                        }
                    }
                    tbody {
                        for line in state.rows().iter().cloned() {
                            tr { key: "{line.id}",
                                td { "{line.item_code}" }
                                td { "{line.item_name}" }
                                td { "{line.quantity}" }
                                td { {money(line.unit_price)} }
                                td { {money(line.total)} }
                            }
                        }
                    }
                    tfoot {
                        tr {
                            td { colspan: "4", "Invoice total" }
                            td { {money(total)} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Exports(id: i64) -> Element {
    let gateway = use_gateway();
    let form = use_keyed_form(id, ExportDraft::new);

    let loader = gateway.clone();
    let mut rows = use_resource(use_reactive!(|id| {
        let gateway = loader.clone();
        async move { ListState::from_result(gateway.exports(id).await, "Failed to load export invoices.") }
    }));
    let state: ListState<ExportInvoice> = rows.cloned().unwrap_or(ListState::Loading);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Export invoices" }
                div { class: "page-actions",
                    Link { class: "btn", to: Route::WarehouseDetail { id }, "Stock" }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| open_form(form, gateway.clone()),
                        "New export"
                    }
                }
            }
            {form_banner(form)}
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "#" }
                            th { "Customer" }
                            th { "Created by" }
                            th { "Date" }
                            th { "Discount" }
                            th { "Total" }
                            th {}
                        }
                    }
                    tbody {
                        for invoice in state.rows().iter().cloned() {
                            tr { key: "{invoice.id}",
                                td { "{invoice.id}" }
                                td { "{invoice.customer_name}" }
                                td { "{invoice.created_by}" }
                                td { {invoice.created_date.clone().unwrap_or_default()} }
                                td { {money(invoice.discount)} }
                                td { {money(invoice.total)} }
                                td {
                                    Link { to: Route::ExportDetail { id, invoice: invoice.id }, "Details" }
                                }
                            }
                        }
                    }
                }
            }
            ExportInvoiceModal {
                form,
                on_settled: move |outcome: SubmitOutcome| {
                    if outcome.refreshes_list() {
                        rows.restart();
                    }
                },
            }
        }
    }
}

#[component]
pub fn ExportDetail(id: i64, invoice: i64) -> Element {
    let gateway = use_gateway();
    let rows = use_resource(use_reactive!(|invoice| {
        let gateway = gateway.clone();
        async move {
            ListState::from_result(gateway.export_detail(invoice).await, "Failed to load invoice lines.")
        }
    }));
    let state: ListState<ExportLine> = rows.cloned().unwrap_or(ListState::Loading);
    let total: f64 = state.rows().iter().map(ExportLine::total).sum();

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Export invoice #{invoice}" }
                Link { class: "btn", to: Route::Exports { id }, "Back" }
            }
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "Code" }
                            th { "Product" }
                            th { "Quantity" }
                            th { "Unit price" }
                            th { "Total" }
                        }
                    }
                    tbody {
                        for line in state.rows().iter().cloned() {
                            tr { key: "{line.id}",
                                td { "{line.product_code}" }
                                td { "{line.product_name}" }
                                td { "{line.quantity}" }
                                td { {money(line.unit_price)} }
                                td { {money(line.total())} }
                            }
                        }
                    }
                    tfoot {
                        tr {
                            td { colspan: "4", "Subtotal" }
                            td { {money(total)} }
                        }
                    }
                }
            }
        }
    }
}

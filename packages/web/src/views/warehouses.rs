use api::forms::{SubmitOutcome, WarehouseDraft};
use api::models::{sort_stock, StockItem, Warehouse};
use api::ListState;
use dioxus::prelude::*;
use ui::icons::{FaArrowDown, FaArrowUp};
use ui::{
    form_banner, list_notice, money, open_form, use_form, use_gateway, Icon, WarehouseModal,
};

use crate::Route;

#[component]
pub fn Warehouses() -> Element {
    let gateway = use_gateway();
    let form = use_form(WarehouseDraft::default);

    let loader = gateway.clone();
    let mut rows = use_resource(move || {
        let gateway = loader.clone();
        async move { ListState::from_result(gateway.warehouses().await, "Failed to load warehouses.") }
    });
    let state: ListState<Warehouse> = rows.cloned().unwrap_or(ListState::Loading);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Warehouses" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| open_form(form, gateway.clone()),
                    "New warehouse"
                }
            }
            {form_banner(form)}
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "Code" }
                            th { "Location" }
                            th { "Items" }
                            th { "Owner" }
                            th { "Created" }
                            th {}
                        }
                    }
                    tbody {
                        for warehouse in state.rows().iter().cloned() {
                            tr { key: "{warehouse.id}",
                                td { "{warehouse.code}" }
                                td { "{warehouse.location}" }
                                td { "{warehouse.item_count}" }
                                td { "{warehouse.owner_name}" }
                                td { {warehouse.created_date.clone().unwrap_or_default()} }
                                td {
                                    Link { to: Route::WarehouseDetail { id: warehouse.id }, "Open" }
                                }
                            }
                        }
                    }
                }
            }
            WarehouseModal {
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

/// Stock of one warehouse, sortable by product name.
#[component]
pub fn WarehouseDetail(id: i64) -> Element {
    let gateway = use_gateway();
    let mut ascending = use_signal(|| true);

    let rows = use_resource(use_reactive!(|id| {
        let gateway = gateway.clone();
        async move { ListState::from_result(gateway.stock(id).await, "Failed to load stock.") }
    }));
    let mut state: ListState<StockItem> = rows.cloned().unwrap_or(ListState::Loading);
    state.update(|items| sort_stock(items, ascending()));

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Warehouse stock" }
                div { class: "page-actions",
                    Link { class: "btn", to: Route::Imports { id }, "Imports" }
                    Link { class: "btn", to: Route::Exports { id }, "Exports" }
                }
            }
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th {
                                button {
                                    class: "sort-toggle",
                                    onclick: move |_| ascending.toggle(),
                                    "Product"
                                    if ascending() {
                                        Icon { width: 12, height: 12, icon: FaArrowUp }
                                    } else {
                                        Icon { width: 12, height: 12, icon: FaArrowDown }
                                    }
                                }
                            }
                            th { "Code" }
                            th { "Quantity" }
                            th { "Price" }
                            th { "Total" }
                            th { "Updated" }
                        }
                    }
                    tbody {
                        for item in state.rows().iter().cloned() {
                            tr { key: "{item.id}",
                                td {
                                    div { class: "product-cell",
                                        if let Some(image) = item.product_image.clone() {
                                            img { class: "thumb", src: "{image}", alt: "" }
                                        }
                                        span { "{item.product_name}" }
                                    }
                                }
                                td { "{item.product_code}" }
                                td { "{item.quantity}" }
                                td { {money(item.price)} }
                                td { {money(item.total_amount)} }
                                td { {item.updated_at.clone().unwrap_or_default()} }
                            }
                        }
                    }
                }
            }
        }
    }
}

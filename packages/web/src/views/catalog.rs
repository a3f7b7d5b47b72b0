//! Registry views: categories, products, suppliers and customers.
//!
//! Each view lists its rows and owns a create modal; a successful create
//! reloads the list.

use api::forms::{CategoryDraft, CustomerDraft, ProductDraft, SubmitOutcome, SupplierDraft};
use api::models::{Category, Customer, Product, Supplier};
use api::ListState;
use dioxus::prelude::*;
use ui::{
    form_banner, list_notice, money, open_form, use_form, use_gateway, CategoryModal,
    CustomerModal, ProductModal, SupplierModal,
};

#[component]
pub fn Categories() -> Element {
    let gateway = use_gateway();
    let form = use_form(CategoryDraft::default);

    let loader = gateway.clone();
    let mut rows = use_resource(move || {
        let gateway = loader.clone();
        async move { ListState::from_result(gateway.categories().await, "Failed to load categories.") }
    });
    let state: ListState<Category> = rows.cloned().unwrap_or(ListState::Loading);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Categories" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| open_form(form, gateway.clone()),
                    "New category"
                }
            }
            {form_banner(form)}
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "#" }
                            th { "Name" }
                            th { "Description" }
                        }
                    }
                    tbody {
                        for category in state.rows().iter().cloned() {
                            tr { key: "{category.id}",
                                td { "{category.id}" }
                                td { "{category.name}" }
                                td { "{category.description}" }
                            }
                        }
                    }
                }
            }
            CategoryModal {
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
pub fn Products() -> Element {
    let gateway = use_gateway();
    let form = use_form(ProductDraft::default);

    let loader = gateway.clone();
    let mut rows = use_resource(move || {
        let gateway = loader.clone();
        async move { ListState::from_result(gateway.products().await, "Failed to load products.") }
    });
    let state: ListState<Product> = rows.cloned().unwrap_or(ListState::Loading);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Products" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| open_form(form, gateway.clone()),
                    "New product"
                }
            }
            {form_banner(form)}
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "Code" }
                            th { "Name" }
                            th { "Description" }
                            th { "Price" }
                            th { "Created" }
                        }
                    }
                    tbody {
                        for product in state.rows().iter().cloned() {
                            tr { key: "{product.id}",
                                td { "{product.code}" }
                                td {
                                    div { class: "product-cell",
                                        if let Some(image) = product.image.clone() {
                                            img { class: "thumb", src: "{image}", alt: "" }
                                        }
                                        span { "{product.name}" }
                                    }
                                }
                                td { "{product.description}" }
                                td { {money(product.price)} }
                                td { {product.created_date.clone().unwrap_or_default()} }
                            }
                        }
                    }
                }
            }
            ProductModal {
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
pub fn Suppliers() -> Element {
    let gateway = use_gateway();
    let form = use_form(SupplierDraft::default);

    let loader = gateway.clone();
    let mut rows = use_resource(move || {
        let gateway = loader.clone();
        async move { ListState::from_result(gateway.suppliers().await, "Failed to load suppliers.") }
    });
    let state: ListState<Supplier> = rows.cloned().unwrap_or(ListState::Loading);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Suppliers" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| open_form(form, gateway.clone()),
                    "New supplier"
                }
            }
            {form_banner(form)}
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Address" }
                            th { "Phone" }
                        }
                    }
                    tbody {
                        for supplier in state.rows().iter().cloned() {
                            tr { key: "{supplier.id}",
                                td { "{supplier.name}" }
                                td { "{supplier.address}" }
                                td { "{supplier.phone_number}" }
                            }
                        }
                    }
                }
            }
            SupplierModal {
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
pub fn Customers() -> Element {
    let gateway = use_gateway();
    let form = use_form(CustomerDraft::default);

    let loader = gateway.clone();
    let mut rows = use_resource(move || {
        let gateway = loader.clone();
        async move { ListState::from_result(gateway.customers().await, "Failed to load customers.") }
    });
    let state: ListState<Customer> = rows.cloned().unwrap_or(ListState::Loading);

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Customers" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| open_form(form, gateway.clone()),
                    "New customer"
                }
            }
            {form_banner(form)}
            {list_notice(&state)}
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Phone" }
                            th { "Points" }
                        }
                    }
                    tbody {
                        for customer in state.rows().iter().cloned() {
                            tr { key: "{customer.id}",
                                td { "{customer.name}" }
                                td { "{customer.phone_number}" }
                                td { "{customer.point}" }
                            }
                        }
                    }
                }
            }
            CustomerModal {
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

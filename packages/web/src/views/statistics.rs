//! Charts over warehouse data, drawn with plain CSS.

use api::models::{share, CategoryRevenue, StockShare, Warehouse};
use api::ListState;
use dioxus::prelude::*;
use ui::{list_notice, money, use_gateway};

const PALETTE: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
];

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// `value` as a percentage of `total`, one decimal.
fn percent(value: f64, total: f64) -> String {
    format!("{:.1}%", share(value, total) * 100.0)
}

/// A `conic-gradient` with one slice per value, in order.
fn pie_gradient(values: &[f64]) -> String {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return "conic-gradient(#ddd 0 100%)".to_string();
    }
    let mut start = 0.0;
    let stops: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let end = start + share(*value, total) * 100.0;
            let stop = format!("{} {start:.2}% {end:.2}%", color(i));
            start = end;
            stop
        })
        .collect();
    format!("conic-gradient({})", stops.join(", "))
}

#[component]
pub fn Statistics() -> Element {
    let gateway = use_gateway();
    let mut selected = use_signal(|| Option::<i64>::None);

    let loader = gateway.clone();
    let warehouses = use_resource(move || {
        let gateway = loader.clone();
        async move { ListState::from_result(gateway.warehouses().await, "Failed to load warehouses.") }
    });

    let shares_loader = gateway.clone();
    let shares = use_resource(move || {
        let gateway = shares_loader.clone();
        let warehouse = selected();
        async move {
            match warehouse {
                Some(id) => ListState::from_result(gateway.stock_shares(id).await, "Failed to load stock."),
                None => ListState::Empty(String::new()),
            }
        }
    });

    let revenue = use_resource(move || {
        let gateway = gateway.clone();
        let warehouse = selected();
        async move {
            match warehouse {
                Some(id) => ListState::from_result(
                    gateway.category_revenue(id).await,
                    "Failed to load revenue.",
                ),
                None => ListState::Empty(String::new()),
            }
        }
    });

    let warehouses: ListState<Warehouse> = warehouses.cloned().unwrap_or(ListState::Loading);
    let shares: ListState<StockShare> = shares.cloned().unwrap_or(ListState::Loading);
    let revenue: ListState<CategoryRevenue> = revenue.cloned().unwrap_or(ListState::Loading);

    let max_items = warehouses
        .rows()
        .iter()
        .map(|w| w.item_count)
        .fold(0.0, f64::max);
    let share_values: Vec<f64> = shares.rows().iter().map(|s| s.quantity).collect();
    let share_total: f64 = share_values.iter().sum();
    let pie = pie_gradient(&share_values);
    let max_revenue = revenue.rows().iter().map(|r| r.revenue).fold(0.0, f64::max);
    let current = selected().map(|id| id.to_string()).unwrap_or_default();

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Statistics" }
            }

            section { class: "chart",
                h2 { "Items per warehouse" }
                {list_notice(&warehouses)}
                for warehouse in warehouses.rows().iter().cloned() {
                    div { key: "{warehouse.id}", class: "bar-row",
                        span { class: "bar-label", "{warehouse.code}" }
                        div { class: "bar-track",
                            div {
                                class: "bar",
                                style: "width: {percent(warehouse.item_count, max_items)}",
                            }
                        }
                        span { class: "bar-value", "{warehouse.item_count}" }
                    }
                }
            }

            label { class: "field",
                span { class: "field-label", "Warehouse" }
                select {
                    value: "{current}",
                    onchange: move |evt: FormEvent| selected.set(evt.value().parse().ok()),
                    option { value: "", "Select a warehouse" }
                    for warehouse in warehouses.rows().iter().cloned() {
                        option {
                            key: "{warehouse.id}",
                            value: "{warehouse.id}",
                            selected: warehouse.id.to_string() == current,
                            "{warehouse.code} - {warehouse.location}"
                        }
                    }
                }
            }

            if selected().is_some() {
                section { class: "chart",
                    h2 { "Stock share" }
                    {list_notice(&shares)}
                    if !shares.rows().is_empty() {
                        div { class: "pie-chart",
                            div { class: "pie", style: "background: {pie}" }
                            ul { class: "legend",
                                for (i, slice) in shares.rows().iter().cloned().enumerate() {
                                    li { key: "{i}",
                                        span { class: "swatch", style: "background: {color(i)}" }
                                        "{slice.product_name}: {slice.quantity} ({percent(slice.quantity, share_total)})"
                                    }
                                }
                            }
                        }
                    }
                }

                section { class: "chart",
                    h2 { "Revenue by category" }
                    {list_notice(&revenue)}
                    for (i, row) in revenue.rows().iter().cloned().enumerate() {
                        div { key: "{i}", class: "bar-row",
                            span { class: "bar-label", "{row.category}" }
                            div { class: "bar-track",
                                div {
                                    class: "bar",
                                    style: "width: {percent(row.revenue, max_revenue)}; background: {color(i)}",
                                }
                            }
                            span { class: "bar-value", {money(row.revenue)} }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(1.0, 3.0), "33.3%");
        assert_eq!(percent(5.0, 0.0), "0.0%");
    }

    #[test]
    fn test_pie_gradient() {
        assert_eq!(pie_gradient(&[]), "conic-gradient(#ddd 0 100%)");
        assert_eq!(
            pie_gradient(&[1.0, 3.0]),
            "conic-gradient(#4e79a7 0.00% 25.00%, #f28e2b 25.00% 100.00%)"
        );
    }
}

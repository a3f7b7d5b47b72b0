use serde::{Deserialize, Serialize};

use super::lenient;

/// One slice of the per-warehouse stock pie.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockShare {
    pub product_name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub quantity: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryRevenue {
    pub category: String,
    #[serde(deserialize_with = "lenient::number")]
    pub revenue: f64,
}

/// Fraction of `value` in `total`, for proportional bars. `0.0` when empty.
pub fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        (value / total).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

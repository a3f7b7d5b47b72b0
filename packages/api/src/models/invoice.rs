use serde::{Deserialize, Serialize};

use super::lenient;

/// Row of a warehouse's import history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportInvoice {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub supplier: String,
    pub created_by: String,
    pub created_date: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub total: f64,
}

/// Row of a warehouse's export history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportInvoice {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub customer_name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub discount: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub total: f64,
    pub created_by: String,
    pub created_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportLine {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub item_name: String,
    pub item_code: String,
    #[serde(deserialize_with = "lenient::number")]
    pub unit_price: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub total: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportLine {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub product_code: String,
    pub product_name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub unit_price: f64,
}

impl ExportLine {
    /// Export detail rows carry no total; it is derived.
    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

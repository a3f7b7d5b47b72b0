use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "lenient::number")]
    pub price: f64,
    pub image: Option<String>,
    pub created_date: Option<String>,
}

impl Product {
    /// Dropdown label, `CODE - Name`.
    pub fn label(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.code, self.name)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone_number: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    #[serde(deserialize_with = "lenient::number")]
    pub point: f64,
}

impl Customer {
    pub fn label(&self) -> String {
        if self.phone_number.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.phone_number)
        }
    }
}

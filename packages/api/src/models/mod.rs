//! Shapes of the `data` payloads the warehouse API returns.
//!
//! The server is loose about types (ids arrive as numbers or strings, fields
//! go missing), so every model deserializes leniently: absent fields take
//! their default and ids go through [`lenient`].

mod catalog;
mod invoice;
mod stats;
mod user;
mod warehouse;

pub use catalog::{Category, Customer, Product, Supplier};
pub use invoice::{ExportInvoice, ExportLine, ImportInvoice, ImportLine};
pub use stats::{share, CategoryRevenue, StockShare};
pub use user::{avatar_ref, sort_accounts, AccountSort, AccountSortKey, LoginData, UserAccount};
pub use warehouse::{sort_stock, MemberRole, StockItem, Warehouse, WarehouseMember};

pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Numeric id from a number, a numeric string or nothing (`0`).
    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or_default(),
            Value::String(s) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        })
    }

    /// Opaque id kept as text, whatever JSON type it arrived as.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    /// Number from a number or numeric string; anything else is `0.0`.
    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64().unwrap_or_default(),
            Value::String(s) => s.trim().parse().unwrap_or_default(),
            _ => 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let a: Supplier = serde_json::from_value(json!({ "id": 3, "name": "Acme" })).unwrap();
        let b: Supplier = serde_json::from_value(json!({ "id": "3", "name": "Acme" })).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id, 3);
    }

    #[test]
    fn test_missing_fields_default() {
        let p: Product = serde_json::from_value(json!({ "id": 10 })).unwrap();
        assert_eq!(p.name, "");
        assert_eq!(p.price, 0.0);
    }

    #[test]
    fn test_user_id_kept_as_text() {
        let u: UserAccount = serde_json::from_value(json!({ "id": 42, "userName": "bob" })).unwrap();
        assert_eq!(u.id, "42");
        let u: UserAccount =
            serde_json::from_value(json!({ "id": "a1b2", "userName": "bob" })).unwrap();
        assert_eq!(u.id, "a1b2");
    }
}

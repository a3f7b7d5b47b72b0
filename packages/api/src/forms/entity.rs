//! Create forms for the registries: categories, products, suppliers,
//! customers and warehouses.

use serde::Serialize;

use super::lines::{parse_amount, parse_id, Amount};
use super::{rows_or_empty, Cache, Draft, FetchReferences, NoReferences, ReferenceSet, ValidationError};
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::Category;
use crate::transport::Transport;

pub const INVALID_PHONE: &str = "Phone number must be 8-15 digits.";

/// 8 to 15 ASCII digits, nothing else.
pub fn is_valid_phone(phone: &str) -> bool {
    (8..=15).contains(&phone.len()) && phone.bytes().all(|b| b.is_ascii_digit())
}

fn required(value: &str, reason: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::new(reason))
    } else {
        Ok(value.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

impl Draft for CategoryDraft {
    type Payload = CategoryDraft;
    type References = NoReferences;

    const ENDPOINT: &'static str = "/cate/create";
    const FAILURE_MESSAGE: &'static str = "Failed to add category.";

    fn references(&self) -> NoReferences {
        NoReferences
    }

    fn validate(&self) -> Result<CategoryDraft, ValidationError> {
        Ok(CategoryDraft {
            name: required(&self.name, "Please enter a category name.")?,
            description: self.description.trim().to_string(),
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: String,
    /// Selected category id.
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub cat_id: i64,
    /// The API requires an image field; uploads are not supported yet.
    pub image: &'static str,
}

impl Draft for ProductDraft {
    type Payload = ProductPayload;
    type References = ProductReferences;

    const ENDPOINT: &'static str = "/product/create";
    const FAILURE_MESSAGE: &'static str = "Failed to add product.";

    fn references(&self) -> ProductReferences {
        ProductReferences::default()
    }

    fn validate(&self) -> Result<ProductPayload, ValidationError> {
        let code = required(&self.code, "Please enter product code and name.")?;
        let name = required(&self.name, "Please enter product code and name.")?;
        let price = parse_amount(&self.price)
            .filter(|p| *p >= 0.0)
            .ok_or_else(|| ValidationError::new("Please enter a valid price."))?;
        let cat_id =
            parse_id(&self.category).ok_or_else(|| ValidationError::new("Please select a category."))?;
        Ok(ProductPayload {
            code,
            name,
            description: self.description.trim().to_string(),
            price: Amount(price),
            cat_id,
            image: "nun",
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductReferences {
    pub categories: Cache<Category>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductFetch;

impl ReferenceSet for ProductReferences {
    type Fetch = ProductFetch;
    type Loaded = Vec<Category>;

    fn missing(&self) -> Vec<ProductFetch> {
        if self.categories.is_loaded() {
            Vec::new()
        } else {
            vec![ProductFetch]
        }
    }

    fn apply(&mut self, loaded: Vec<Category>) {
        self.categories.fill(loaded);
    }
}

impl FetchReferences for ProductFetch {
    type Loaded = Vec<Category>;

    async fn fetch<T: Transport>(&self, gateway: &Gateway<T>) -> Result<Vec<Category>, ApiError> {
        rows_or_empty(gateway.categories().await)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    pub name: String,
    pub address: String,
    pub phone_number: String,
}

impl Draft for SupplierDraft {
    type Payload = SupplierDraft;
    type References = NoReferences;

    const ENDPOINT: &'static str = "/supplier/create";
    const FAILURE_MESSAGE: &'static str = "Failed to add supplier.";

    fn references(&self) -> NoReferences {
        NoReferences
    }

    fn validate(&self) -> Result<SupplierDraft, ValidationError> {
        if !is_valid_phone(&self.phone_number) {
            return Err(ValidationError::new(INVALID_PHONE));
        }
        Ok(SupplierDraft {
            name: required(&self.name, "Please enter a supplier name.")?,
            address: self.address.trim().to_string(),
            phone_number: self.phone_number.clone(),
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    pub phone_number: String,
}

impl Draft for CustomerDraft {
    type Payload = CustomerDraft;
    type References = NoReferences;

    const ENDPOINT: &'static str = "/cust/create";
    const FAILURE_MESSAGE: &'static str = "Failed to add customer.";

    fn references(&self) -> NoReferences {
        NoReferences
    }

    fn validate(&self) -> Result<CustomerDraft, ValidationError> {
        if !is_valid_phone(&self.phone_number) {
            return Err(ValidationError::new(INVALID_PHONE));
        }
        Ok(CustomerDraft {
            name: required(&self.name, "Please enter a customer name.")?,
            phone_number: self.phone_number.clone(),
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WarehouseDraft {
    pub location: String,
    pub code: String,
}

impl Draft for WarehouseDraft {
    type Payload = WarehouseDraft;
    type References = NoReferences;

    const ENDPOINT: &'static str = "/warehouse/create";
    const FAILURE_MESSAGE: &'static str = "Failed to add warehouse.";

    fn references(&self) -> NoReferences {
        NoReferences
    }

    fn validate(&self) -> Result<WarehouseDraft, ValidationError> {
        let reason = "Please enter warehouse code and location.";
        Ok(WarehouseDraft {
            location: required(&self.location, reason)?,
            code: required(&self.code, reason)?,
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use store::config::MessageConfig;

    use super::*;
    use crate::forms::{load_references, submit, FormController, SubmitOutcome};
    use crate::gateway::tests::{live_token, signed_in};

    #[test]
    fn test_phone_rule() {
        assert!(is_valid_phone("12345678"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("1234567"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("+84123456789"));
        assert!(!is_valid_phone("0912 345 678"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_supplier_phone_checked() {
        let draft = SupplierDraft {
            name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            phone_number: "12ab".to_string(),
        };
        assert_eq!(draft.validate().unwrap_err().reason, INVALID_PHONE);
    }

    #[test]
    fn test_customer_payload() {
        let draft = CustomerDraft {
            name: " Linh ".to_string(),
            phone_number: "0912345678".to_string(),
        };
        assert_eq!(
            serde_json::to_value(draft.validate().unwrap()).unwrap(),
            json!({ "name": "Linh", "phoneNumber": "0912345678" })
        );
    }

    #[test]
    fn test_product_payload() {
        let draft = ProductDraft {
            code: "P-1".to_string(),
            name: "Bolt".to_string(),
            description: String::new(),
            price: "2.50".to_string(),
            category: "4".to_string(),
        };
        assert_eq!(
            serde_json::to_value(draft.validate().unwrap()).unwrap(),
            json!({
                "code": "P-1",
                "name": "Bolt",
                "description": "",
                "price": 2.5,
                "catId": 4,
                "image": "nun",
            })
        );
    }

    #[test]
    fn test_product_requires_category_and_price() {
        let mut draft = ProductDraft {
            code: "P-1".to_string(),
            name: "Bolt".to_string(),
            price: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.validate().unwrap_err().reason, "Please enter a valid price.");
        draft.price = "3".to_string();
        assert_eq!(draft.validate().unwrap_err().reason, "Please select a category.");
    }

    #[test]
    fn test_warehouse_requires_both_fields() {
        let draft = WarehouseDraft {
            location: "Hanoi".to_string(),
            code: " ".to_string(),
        };
        assert!(draft.validate().is_err());
    }

    #[tokio::test]
    async fn test_category_create_round_trip() {
        let (gateway, transport) = signed_in(live_token());
        transport.reply(201, "Category created", Value::Null);
        let mut form = FormController::new(CategoryDraft::default(), MessageConfig::default());
        assert!(form.open().is_empty());
        form.draft_mut().name = "Tools".to_string();

        let outcome = submit(&mut form, &gateway).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Created("Category created".to_string()));
        let sent = transport.sent();
        assert_eq!(sent[0].path, "/cate/create");
        assert_eq!(sent[0].body, Some(json!({ "name": "Tools", "description": "" })));
        assert_eq!(form.draft(), &CategoryDraft::default());
    }

    #[tokio::test]
    async fn test_product_form_loads_categories() {
        let (gateway, transport) = signed_in(live_token());
        transport.reply(200, "", json!([{ "id": 4, "name": "Hardware" }]));
        let mut form = FormController::new(ProductDraft::default(), MessageConfig::default());

        assert_eq!(form.open(), vec![ProductFetch]);
        load_references(&mut form, &gateway).await;

        assert_eq!(transport.sent()[0].path, "/cate/getall");
        assert_eq!(form.references().categories.items()[0].name, "Hardware");
    }
}

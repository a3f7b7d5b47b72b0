use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Warehouse {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub code: String,
    pub location: String,
    #[serde(deserialize_with = "lenient::number")]
    pub item_count: f64,
    pub owner_name: String,
    pub created_date: Option<String>,
    pub updated_date: Option<String>,
}

/// A product held in a warehouse. Export lines reference these ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockItem {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub product_name: String,
    pub product_code: String,
    pub product_image: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub price: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub total_amount: f64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Stock ordered by product name, case-insensitively.
pub fn sort_stock(items: &mut [StockItem], ascending: bool) {
    items.sort_by(|a, b| {
        let ordering: Ordering = a
            .product_name
            .to_lowercase()
            .cmp(&b.product_name.to_lowercase());
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

/// Privilege of a user inside one warehouse. The wire ids are fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberRole {
    Owner = 1,
    Manager = 2,
}

impl MemberRole {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(MemberRole::Owner),
            2 => Some(MemberRole::Manager),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemberRole::Owner => "Owner",
            MemberRole::Manager => "Manager",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarehouseMember {
    /// Id of the membership row, not of the user.
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    pub full_name: String,
    pub user_name: String,
    pub avatar: Option<String>,
    #[serde(rename = "privilage")]
    pub privilege: String,
    pub last_login: Option<String>,
}

impl WarehouseMember {
    /// Anything other than `Owner` is treated as a manager.
    pub fn role(&self) -> MemberRole {
        if self.privilege == MemberRole::Owner.label() {
            MemberRole::Owner
        } else {
            MemberRole::Manager
        }
    }

    pub fn set_role(&mut self, role: MemberRole) {
        self.privilege = role.label().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(name: &str) -> StockItem {
        StockItem {
            product_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_stock() {
        let mut items = vec![item("pear"), item("Apple"), item("banana")];
        sort_stock(&mut items, true);
        let names: Vec<_> = items.iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(names, ["Apple", "banana", "pear"]);
        sort_stock(&mut items, false);
        assert_eq!(items[0].product_name, "pear");
    }

    #[test]
    fn test_member_role() {
        let mut member: WarehouseMember =
            serde_json::from_value(json!({ "id": 4, "userName": "kim", "privilage": "Owner" }))
                .unwrap();
        assert_eq!(member.role(), MemberRole::Owner);
        member.set_role(MemberRole::Manager);
        assert_eq!(member.role(), MemberRole::Manager);
        assert_eq!(MemberRole::from_id(1), Some(MemberRole::Owner));
        assert_eq!(MemberRole::from_id(3), None);
        assert_eq!(MemberRole::Manager.id(), 2);
    }
}

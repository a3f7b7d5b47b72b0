//! # Account models
//!
//! - [`LoginData`]: the `data` of a successful login. It carries the token
//!   and the profile fields the console caches in the session store.
//! - [`UserAccount`]: one row of the admin user list.
//!
//! [`sort_accounts`] implements the admin list ordering. Admin accounts are
//! never listed, and rows missing the sort key go first when ascending.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use store::{claims, Profile, Role};

use super::lenient;

/// Avatar value the server uses for "no picture uploaded".
pub const DEFAULT_AVATAR: &str = "def";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginData {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    pub token: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub is_admin: bool,
}

impl LoginData {
    /// Full name when known, otherwise the user name.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.user_name.clone()
        } else {
            full.to_string()
        }
    }

    /// Split into the cached profile and the bearer token.
    pub fn into_session(self) -> (Profile, String) {
        let role = if self.is_admin {
            Role::Admin
        } else {
            claims::role(&self.token)
        };
        let profile = Profile {
            display_name: self.display_name(),
            avatar_ref: avatar_ref(self.avatar.as_deref()),
            id: self.id,
            role,
        };
        (profile, self.token)
    }
}

/// `None` for the server's placeholder avatar.
pub fn avatar_ref(avatar: Option<&str>) -> Option<String> {
    avatar
        .map(str::trim)
        .filter(|a| !a.is_empty() && *a != DEFAULT_AVATAR)
        .map(str::to_string)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAccount {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_date: Option<String>,
    pub last_login: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountSortKey {
    #[default]
    UserName,
    CreatedDate,
    LastLogin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountSort {
    pub key: AccountSortKey,
    pub ascending: bool,
}

impl Default for AccountSort {
    fn default() -> Self {
        Self {
            key: AccountSortKey::UserName,
            ascending: true,
        }
    }
}

impl AccountSort {
    /// Clicking the active column flips direction; another column starts ascending.
    pub fn toggle(self, key: AccountSortKey) -> Self {
        if self.key == key {
            Self {
                key,
                ascending: !self.ascending,
            }
        } else {
            Self {
                key,
                ascending: true,
            }
        }
    }

    fn sort_value(self, account: &UserAccount) -> String {
        match self.key {
            AccountSortKey::UserName => account.user_name.to_lowercase(),
            AccountSortKey::CreatedDate => account.created_date.clone().unwrap_or_default(),
            AccountSortKey::LastLogin => account.last_login.clone().unwrap_or_default(),
        }
    }

    fn compare(self, a: &UserAccount, b: &UserAccount) -> Ordering {
        let (a, b) = (self.sort_value(a), self.sort_value(b));
        // ISO-8601 timestamps order correctly as text.
        let ordering = match (a.is_empty(), b.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.cmp(&b),
        };
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// Non-admin accounts in display order.
pub fn sort_accounts(accounts: &[UserAccount], sort: AccountSort) -> Vec<UserAccount> {
    let mut visible: Vec<UserAccount> = accounts.iter().filter(|a| !a.is_admin).cloned().collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account(name: &str, created: Option<&str>, admin: bool) -> UserAccount {
        UserAccount {
            id: name.to_string(),
            user_name: name.to_string(),
            created_date: created.map(str::to_string),
            is_admin: admin,
            ..Default::default()
        }
    }

    #[test]
    fn test_login_data_into_session() {
        let data: LoginData = serde_json::from_value(json!({
            "id": 7,
            "token": "not.a.jwt",
            "userName": "ada",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "avatar": "def",
        }))
        .unwrap();
        let (profile, token) = data.into_session();
        assert_eq!(token, "not.a.jwt");
        assert_eq!(profile.id, "7");
        assert_eq!(profile.display_name, "Ada Lovelace");
        assert_eq!(profile.avatar_ref, None);
        assert_eq!(profile.role, Role::Member);
    }

    #[test]
    fn test_display_name_falls_back_to_user_name() {
        let data = LoginData {
            user_name: "ada".to_string(),
            ..Default::default()
        };
        assert_eq!(data.display_name(), "ada");
    }

    #[test]
    fn test_avatar_ref() {
        assert_eq!(avatar_ref(Some("def")), None);
        assert_eq!(avatar_ref(Some("")), None);
        assert_eq!(avatar_ref(None), None);
        assert_eq!(avatar_ref(Some("https://cdn/a.png")).as_deref(), Some("https://cdn/a.png"));
    }

    #[test]
    fn test_sort_hides_admins() {
        let accounts = vec![account("zed", None, false), account("root", None, true)];
        let sorted = sort_accounts(&accounts, AccountSort::default());
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].user_name, "zed");
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let accounts = vec![
            account("bob", None, false),
            account("Alice", None, false),
            account("carol", None, false),
        ];
        let names = |sort| {
            sort_accounts(&accounts, sort)
                .into_iter()
                .map(|a| a.user_name)
                .collect::<Vec<_>>()
        };
        assert_eq!(names(AccountSort::default()), ["Alice", "bob", "carol"]);
        let desc = AccountSort::default().toggle(AccountSortKey::UserName);
        assert_eq!(names(desc), ["carol", "bob", "Alice"]);
    }

    #[test]
    fn test_sort_by_date_missing_first_when_ascending() {
        let accounts = vec![
            account("b", Some("2024-03-01T10:00:00"), false),
            account("a", None, false),
            account("c", Some("2023-12-31T23:59:59"), false),
        ];
        let sort = AccountSort::default().toggle(AccountSortKey::CreatedDate);
        assert!(sort.ascending);
        let order: Vec<_> = sort_accounts(&accounts, sort)
            .into_iter()
            .map(|a| a.user_name)
            .collect();
        assert_eq!(order, ["a", "c", "b"]);

        let order: Vec<_> = sort_accounts(&accounts, sort.toggle(AccountSortKey::CreatedDate))
            .into_iter()
            .map(|a| a.user_name)
            .collect();
        assert_eq!(order, ["b", "c", "a"]);
    }
}

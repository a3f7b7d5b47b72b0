//! Role-gated sidebar.
//!
//! The entries live in one table ([`NAV_ENTRIES`]). Which of them a user
//! sees is decided by [`visible_entries`] from the token's role claim, read
//! once per render.

use dioxus::prelude::*;
use store::Session;

use crate::icons::{
    FaAddressBook, FaBoxesStacked, FaChartPie, FaPeopleGroup, FaTags, FaTruck, FaUser,
    FaUserShield, FaWarehouse,
};
use crate::session::{use_session, LogoutButton};
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIcon {
    Warehouses,
    Categories,
    Products,
    Suppliers,
    Customers,
    Statistics,
    Users,
    Members,
    Profile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: NavIcon,
    pub admin_only: bool,
}

pub const NAV_ENTRIES: &[NavEntry] = &[
    NavEntry { label: "Warehouses", path: "/warehouses", icon: NavIcon::Warehouses, admin_only: false },
    NavEntry { label: "Categories", path: "/categories", icon: NavIcon::Categories, admin_only: false },
    NavEntry { label: "Products", path: "/products", icon: NavIcon::Products, admin_only: false },
    NavEntry { label: "Suppliers", path: "/suppliers", icon: NavIcon::Suppliers, admin_only: false },
    NavEntry { label: "Customers", path: "/customers", icon: NavIcon::Customers, admin_only: false },
    NavEntry { label: "Statistics", path: "/statistics", icon: NavIcon::Statistics, admin_only: false },
    NavEntry { label: "Users", path: "/users", icon: NavIcon::Users, admin_only: true },
    NavEntry { label: "Members", path: "/members", icon: NavIcon::Members, admin_only: true },
    NavEntry { label: "Profile", path: "/profile", icon: NavIcon::Profile, admin_only: false },
];

/// Entries shown for a session. Admin-only entries need the admin role claim.
pub fn visible_entries(session: &Session) -> Vec<NavEntry> {
    let admin = session.is_admin();
    NAV_ENTRIES
        .iter()
        .filter(|entry| admin || !entry.admin_only)
        .copied()
        .collect()
}

#[component]
fn NavIconView(icon: NavIcon) -> Element {
    match icon {
        NavIcon::Warehouses => rsx! { Icon { width: 16, height: 16, icon: FaWarehouse } },
        NavIcon::Categories => rsx! { Icon { width: 16, height: 16, icon: FaTags } },
        NavIcon::Products => rsx! { Icon { width: 16, height: 16, icon: FaBoxesStacked } },
        NavIcon::Suppliers => rsx! { Icon { width: 16, height: 16, icon: FaTruck } },
        NavIcon::Customers => rsx! { Icon { width: 16, height: 16, icon: FaAddressBook } },
        NavIcon::Statistics => rsx! { Icon { width: 16, height: 16, icon: FaChartPie } },
        NavIcon::Users => rsx! { Icon { width: 16, height: 16, icon: FaUserShield } },
        NavIcon::Members => rsx! { Icon { width: 16, height: 16, icon: FaPeopleGroup } },
        NavIcon::Profile => rsx! { Icon { width: 16, height: 16, icon: FaUser } },
    }
}

#[component]
pub fn Sidebar(active_path: String, on_navigate: EventHandler<String>) -> Element {
    let session = use_session();
    let current = session();
    let entries = visible_entries(&current);
    let profile = current.profile;

    rsx! {
        div {
            class: "sidebar",

            div {
                class: "sidebar-user",
                if let Some(ref p) = profile {
                    if let Some(ref avatar) = p.avatar_ref {
                        img {
                            class: "sidebar-user-avatar",
                            src: "{avatar}",
                            alt: "avatar",
                        }
                    }
                    span { class: "sidebar-user-name", "{p.display_name}" }
                } else {
                    span { class: "sidebar-user-name", "Warehouse" }
                }
            }

            nav {
                class: "sidebar-links",
                for entry in entries {
                    button {
                        key: "{entry.path}",
                        class: if active_path.starts_with(entry.path) { "sidebar-link active" } else { "sidebar-link" },
                        onclick: move |_| on_navigate.call(entry.path.to_string()),
                        NavIconView { icon: entry.icon }
                        span { "{entry.label}" }
                    }
                }
            }

            div {
                class: "sidebar-bottom",
                LogoutButton { class: "sidebar-link" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use super::*;

    fn session_with_role(role: &str) -> Session {
        let payload = format!(r#"{{"exp":4102444800,"role":"{role}"}}"#);
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload));
        Session {
            token: Some(token),
            profile: None,
        }
    }

    fn labels(session: &Session) -> Vec<&'static str> {
        visible_entries(session).iter().map(|e| e.label).collect()
    }

    #[test]
    fn test_admin_sees_admin_links() {
        let labels = labels(&session_with_role("Admin"));
        assert!(labels.contains(&"Users"));
        assert!(labels.contains(&"Members"));
        assert_eq!(labels.len(), NAV_ENTRIES.len());
    }

    #[test]
    fn test_member_does_not() {
        for session in [
            session_with_role("Member"),
            session_with_role("admin"),
            Session::default(),
            Session {
                token: Some("not-a-token".to_string()),
                profile: None,
            },
        ] {
            let labels = labels(&session);
            assert!(!labels.contains(&"Users"));
            assert!(!labels.contains(&"Members"));
            assert!(labels.contains(&"Warehouses"));
        }
    }
}

//! Admin views: user accounts and warehouse membership.
//!
//! Both are reachable only from the admin navigation. The server enforces
//! the role; these views show a notice instead of calling it for members.

use api::forms::Tone;
use api::models::{sort_accounts, AccountSort, AccountSortKey, MemberRole, UserAccount, WarehouseMember};
use api::ListState;
use dioxus::prelude::*;
use store::Session;
use ui::{list_notice, use_console, use_flash, use_gateway, use_session, FlashBanner};

const ADMIN_ONLY: &str = "This page is only available to administrators.";

/// What an admin listing holds for a non-admin session. `None` means the
/// list may be fetched.
fn admin_listing<T>(session: &Session) -> Option<ListState<T>> {
    (!session.is_admin()).then(|| ListState::Failed(ADMIN_ONLY.to_string()))
}

#[component]
pub fn Users() -> Element {
    let gateway = use_gateway();
    let session = use_session();
    let results = use_console().config.messages.result_window();
    let flash = use_flash();
    let mut sort = use_signal(AccountSort::default);
    let mut accounts = use_signal(|| ListState::<UserAccount>::Loading);

    let loader = gateway.clone();
    let _loader = use_resource(move || {
        let gateway = loader.clone();
        let blocked = admin_listing(&session.peek());
        async move {
            if let Some(blocked) = blocked {
                accounts.set(blocked);
                return;
            }
            accounts.set(ListState::from_result(gateway.accounts().await, "Failed to load users."));
        }
    });

    let toggle_lock = use_callback(move |user_id: String| {
        let gateway = gateway.clone();
        spawn(async move {
            match gateway.toggle_lock(&user_id).await {
                Ok(_) => accounts.write().update(|rows| {
                    if let Some(account) = rows.iter_mut().find(|a| a.id == user_id) {
                        account.is_active = !account.is_active;
                    }
                }),
                Err(e) => {
                    tracing::warn!(user = %user_id, "lock toggle failed: {e}");
                    flash.show("Failed to update the account.", Tone::Error, results);
                }
            }
        });
    });

    if !session().is_admin() {
        return rsx! {
            div { class: "page",
                p { class: "list-notice", "{ADMIN_ONLY}" }
            }
        };
    }

    let state = accounts();
    let visible = sort_accounts(state.rows(), sort());
    let header = move |label: &'static str, key: AccountSortKey| {
        let current = sort();
        let marker = match (current.key == key, current.ascending) {
            (false, _) => "",
            (true, true) => " ▲",
            (true, false) => " ▼",
        };
        rsx! {
            th {
                button {
                    class: "sort-toggle",
                    onclick: move |_| sort.set(sort().toggle(key)),
                    "{label}{marker}"
                }
            }
        }
    };

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Users" }
            }
            FlashBanner { flash }
            {list_notice(&state)}
            if !visible.is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            {header("User name", AccountSortKey::UserName)}
                            th { "Name" }
                            th { "Email" }
                            {header("Created", AccountSortKey::CreatedDate)}
                            {header("Last login", AccountSortKey::LastLogin)}
                            th { "Status" }
                            th {}
                        }
                    }
                    tbody {
                        for (user_id, account) in visible.into_iter().map(|a| (a.id.clone(), a)) {
                            tr { key: "{account.id}",
                                td { "{account.user_name}" }
                                td { "{account.first_name} {account.last_name}" }
                                td { {account.email.clone().unwrap_or_default()} }
                                td { {account.created_date.clone().unwrap_or_default()} }
                                td { {account.last_login.clone().unwrap_or_default()} }
                                td { if account.is_active { "Active" } else { "Locked" } }
                                td {
                                    button {
                                        class: "btn btn-small",
                                        onclick: move |_| toggle_lock.call(user_id.clone()),
                                        if account.is_active { "Lock" } else { "Unlock" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Members() -> Element {
    let gateway = use_gateway();
    let session = use_session();
    let results = use_console().config.messages.result_window();
    let flash = use_flash();
    let mut selected = use_signal(String::new);
    let mut new_member = use_signal(String::new);
    let mut members = use_signal(|| ListState::<WarehouseMember>::Empty(String::new()));

    let codes_loader = gateway.clone();
    let codes = use_resource(move || {
        let gateway = codes_loader.clone();
        let blocked = admin_listing(&session.peek());
        async move {
            match blocked {
                Some(blocked) => blocked,
                None => ListState::from_result(gateway.storage_codes().await, "Failed to load warehouses."),
            }
        }
    });

    let members_loader = gateway.clone();
    let mut reload = use_resource(move || {
        let gateway = members_loader.clone();
        let code = selected();
        let blocked = admin_listing(&session.peek());
        async move {
            if let Some(blocked) = blocked {
                members.set(blocked);
                return;
            }
            if code.is_empty() {
                members.set(ListState::Empty(String::new()));
                return;
            }
            members.set(ListState::Loading);
            members.set(ListState::from_result(gateway.members(&code).await, "Failed to load members."));
        }
    });

    let role_gateway = gateway.clone();
    let change_role = use_callback(move |(member, role): (i64, MemberRole)| {
        let gateway = role_gateway.clone();
        spawn(async move {
            match gateway.change_member_role(member, role).await {
                Ok(envelope) => {
                    members.write().update(|rows| {
                        if let Some(row) = rows.iter_mut().find(|m| m.id == member) {
                            row.set_role(role);
                        }
                    });
                    if !envelope.message.is_empty() {
                        flash.show(envelope.message, Tone::Info, results);
                    }
                }
                Err(e) => {
                    tracing::warn!(member, "role change failed: {e}");
                    flash.show("Failed to change the member's role.", Tone::Error, results);
                }
            }
        });
    });

    let add_member = move |evt: FormEvent| {
        evt.prevent_default();
        let code = selected();
        let user_name = new_member();
        if code.is_empty() || user_name.trim().is_empty() {
            flash.show("Please choose a warehouse and enter a user name.", Tone::Error, results);
            return;
        }
        let gateway = gateway.clone();
        spawn(async move {
            match gateway.add_member(&code, &user_name).await {
                Ok(envelope) => {
                    new_member.set(String::new());
                    let message = if envelope.message.is_empty() {
                        "Member added.".to_string()
                    } else {
                        envelope.message
                    };
                    flash.show(message, Tone::Info, results);
                    reload.restart();
                }
                Err(api::ApiError::Rejected { message, .. }) if !message.is_empty() => {
                    flash.show(message, Tone::Error, results);
                }
                Err(e) => {
                    tracing::warn!("add member failed: {e}");
                    flash.show("Failed to add member.", Tone::Error, results);
                }
            }
        });
    };

    if !session().is_admin() {
        return rsx! {
            div { class: "page",
                p { class: "list-notice", "{ADMIN_ONLY}" }
            }
        };
    }

    let code_state: ListState<String> = codes.cloned().unwrap_or(ListState::Loading);
    let state = members();
    let current_code = selected();

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Warehouse members" }
            }
            FlashBanner { flash }
            div { class: "toolbar",
                label { class: "field",
                    span { class: "field-label", "Warehouse" }
                    select {
                        value: "{current_code}",
                        onchange: move |evt: FormEvent| selected.set(evt.value()),
                        option { value: "", "Select a warehouse" }
                        for code in code_state.rows().iter().cloned() {
                            option {
                                key: "{code}",
                                value: "{code}",
                                selected: code == current_code,
                                "{code}"
                            }
                        }
                    }
                }
                form { class: "inline-form", onsubmit: add_member,
                    input {
                        r#type: "text",
                        placeholder: "User name",
                        value: "{new_member}",
                        oninput: move |evt: FormEvent| new_member.set(evt.value()),
                    }
                    button { r#type: "submit", class: "btn btn-primary", "Add member" }
                }
            }
            {list_notice(&code_state)}
            if !current_code.is_empty() {
                {list_notice(&state)}
            }
            if !state.rows().is_empty() {
                table { class: "table",
                    thead {
                        tr {
                            th { "Member" }
                            th { "User name" }
                            th { "Role" }
                            th { "Last login" }
                            th {}
                        }
                    }
                    tbody {
                        for member in state.rows().iter().cloned() {
                            tr { key: "{member.id}",
                                td {
                                    div { class: "product-cell",
                                        if let Some(avatar) = member.avatar.clone() {
                                            img { class: "thumb round", src: "{avatar}", alt: "" }
                                        }
                                        span { "{member.full_name}" }
                                    }
                                }
                                td { "{member.user_name}" }
                                td {
                                    select {
                                        value: "{member.role().id()}",
                                        onchange: move |evt: FormEvent| {
                                            let role = evt.value().parse::<u8>().ok().and_then(MemberRole::from_id);
                                            if let Some(role) = role {
                                                change_role.call((member.id, role));
                                            }
                                        },
                                        for role in [MemberRole::Owner, MemberRole::Manager] {
                                            option {
                                                value: "{role.id()}",
                                                selected: role == member.role(),
                                                "{role.label()}"
                                            }
                                        }
                                    }
                                }
                                td { {member.last_login.clone().unwrap_or_default()} }
                                td {
                                    button {
                                        class: "btn btn-small",
                                        onclick: move |_| {
                                            // Removal is not backed by an endpoint; it only hides the row.
                                            members.write().update(|rows| rows.retain(|m| m.id != member.id));
                                        },
                                        "Remove"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

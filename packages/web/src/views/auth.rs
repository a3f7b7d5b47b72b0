//! Public views: sign-in and account creation.

use api::forms::{LoginForm, RegisterForm, Tone};
use dioxus::prelude::*;
use ui::{sleep, use_console, use_flash, use_gateway, use_session, FlashBanner, TextField};

use crate::Route;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
const REGISTER_FAILED: &str = "Registration failed.";
const REGISTERED: &str = "Account created. You can sign in now.";

/// The banner shown after a successful registration, before leaving for the
/// login page.
fn registered_notice(message: String) -> String {
    if message.trim().is_empty() {
        REGISTERED.to_string()
    } else {
        message
    }
}

#[component]
pub fn Login() -> Element {
    let console = use_console();
    let gateway = use_gateway();
    let session = use_session();
    let nav = use_navigator();
    let flash = use_flash();
    let mut form = use_signal(LoginForm::default);
    let mut busy = use_signal(|| false);

    let home = Route::from_path(&console.config.routes.home, Route::Warehouses {});
    let validation_window = console.config.messages.validation_window();
    let result_window = console.config.messages.result_window();

    // Already signed in with a live token.
    let already = home.clone();
    use_effect(move || {
        if session().is_valid() {
            nav.replace(already.clone());
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(e) => {
                flash.show(e.reason, Tone::Error, validation_window);
                return;
            }
        };
        busy.set(true);
        let gateway = gateway.clone();
        let home = home.clone();
        spawn(async move {
            match gateway.login(&request).await {
                Ok(_) => {
                    nav.replace(home);
                }
                Err(e) => {
                    tracing::warn!("login failed: {e}");
                    flash.show(LOGIN_FAILED, Tone::Error, result_window);
                }
            }
            busy.set(false);
        });
    };

    let current = form();
    rsx! {
        div { class: "auth-page",
            h1 { "Warehouse console" }
            FlashBanner { flash }
            form { class: "auth-form", onsubmit: on_submit,
                TextField {
                    label: "Username",
                    value: current.username,
                    on_input: move |value| form.write().username = value,
                }
                TextField {
                    label: "Password",
                    kind: "password",
                    value: current.password,
                    on_input: move |value| form.write().password = value,
                }
                button { r#type: "submit", class: "btn btn-primary", disabled: busy(),
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
            p { class: "auth-switch",
                "No account yet? "
                Link { to: Route::Register {}, "Register" }
            }
        }
    }
}

#[component]
pub fn Register() -> Element {
    let console = use_console();
    let gateway = use_gateway();
    let nav = use_navigator();
    let flash = use_flash();
    let mut form = use_signal(RegisterForm::default);
    let mut busy = use_signal(|| false);

    let login = Route::from_path(&console.config.routes.login, Route::Login {});
    let validation_window = console.config.messages.validation_window();
    let result_window = console.config.messages.result_window();

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(e) => {
                flash.show(e.reason, Tone::Error, validation_window);
                return;
            }
        };
        busy.set(true);
        let gateway = gateway.clone();
        let login = login.clone();
        spawn(async move {
            match gateway.register(&request).await {
                Ok(message) => {
                    tracing::info!(%message, "account created");
                    flash.show(registered_notice(message), Tone::Info, result_window);
                    sleep(result_window).await;
                    nav.push(login);
                }
                Err(api::ApiError::Rejected { message, .. }) if !message.is_empty() => {
                    flash.show(message, Tone::Error, result_window);
                }
                Err(e) => {
                    tracing::warn!("registration failed: {e}");
                    flash.show(REGISTER_FAILED, Tone::Error, result_window);
                }
            }
            busy.set(false);
        });
    };

    let current = form();
    rsx! {
        div { class: "auth-page",
            h1 { "Create an account" }
            FlashBanner { flash }
            form { class: "auth-form", onsubmit: on_submit,
                TextField {
                    label: "First name",
                    value: current.first_name,
                    on_input: move |value| form.write().first_name = value,
                }
                TextField {
                    label: "Last name",
                    value: current.last_name,
                    on_input: move |value| form.write().last_name = value,
                }
                TextField {
                    label: "Username",
                    value: current.username,
                    on_input: move |value| form.write().username = value,
                }
                TextField {
                    label: "Password",
                    kind: "password",
                    value: current.password,
                    on_input: move |value| form.write().password = value,
                }
                button { r#type: "submit", class: "btn btn-primary", disabled: busy(),
                    if busy() { "Creating..." } else { "Register" }
                }
            }
            p { class: "auth-switch",
                "Already registered? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_notice() {
        assert_eq!(registered_notice("Welcome aboard".to_string()), "Welcome aboard");
        assert_eq!(registered_notice(String::new()), REGISTERED);
        assert_eq!(registered_notice("  ".to_string()), REGISTERED);
    }
}

use api::forms::{ChangePasswordForm, Tone};
use api::ApiError;
use dioxus::prelude::*;
use ui::icons::FaUser;
use ui::{use_console, use_flash, use_gateway, use_session, FlashBanner, Icon, TextField};

/// Server text when present, otherwise `fallback`.
fn failure_text(error: ApiError, fallback: &str) -> String {
    match error {
        ApiError::Rejected { message, .. } if !message.is_empty() => message,
        _ => fallback.to_string(),
    }
}

#[component]
pub fn ProfileView() -> Element {
    let gateway = use_gateway();
    let session = use_session();
    let messages = use_console().config.messages;
    let (validation, results) = (messages.validation_window(), messages.result_window());
    let flash = use_flash();
    let mut form = use_signal(ChangePasswordForm::default);
    let mut saving = use_signal(|| false);

    let password_gateway = gateway.clone();
    let on_change_password = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(e) => {
                flash.show(e.reason, Tone::Error, validation);
                return;
            }
        };
        saving.set(true);
        let gateway = password_gateway.clone();
        spawn(async move {
            match gateway.change_password(&request).await {
                Ok(message) => {
                    form.set(ChangePasswordForm::default());
                    let text = if message.is_empty() {
                        "Password changed.".to_string()
                    } else {
                        message
                    };
                    flash.show(text, Tone::Info, results);
                }
                Err(e) => {
                    tracing::warn!("password change failed: {e}");
                    flash.show(failure_text(e, "Failed to change password."), Tone::Error, results);
                }
            }
            saving.set(false);
        });
    };

    let on_avatar = move |evt: FormEvent| {
        let gateway = gateway.clone();
        async move {
            let Some(file) = evt.files().into_iter().next() else {
                return;
            };
            let bytes = match file.read_bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("avatar not readable: {e}");
                    flash.show("Could not read the selected image.", Tone::Error, results);
                    return;
                }
            };
            match gateway.change_avatar(&bytes).await {
                Ok(_) => flash.show("Avatar updated.", Tone::Info, results),
                Err(e) => {
                    tracing::warn!("avatar upload failed: {e}");
                    flash.show(failure_text(e, "Failed to update avatar."), Tone::Error, results);
                }
            }
        }
    };

    let profile = session().profile;
    let current = form();

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { "Profile" }
            }
            FlashBanner { flash }
            section { class: "profile-card",
                div { class: "profile-avatar",
                    {match profile.as_ref().and_then(|p| p.avatar_ref.clone()) {
                        Some(avatar) => rsx! { img { src: "{avatar}", alt: "avatar" } },
                        None => rsx! { Icon { width: 64, height: 64, icon: FaUser } },
                    }}
                }
                if let Some(profile) = profile.as_ref() {
                    h2 { "{profile.display_name}" }
                }
                label { class: "btn",
                    "Change avatar"
                    input {
                        r#type: "file",
                        accept: "image/*",
                        class: "visually-hidden",
                        onchange: on_avatar,
                    }
                }
            }
            section { class: "profile-card",
                h2 { "Change password" }
                form { class: "auth-form", onsubmit: on_change_password,
                    TextField {
                        label: "Current password",
                        kind: "password",
                        value: current.old_password,
                        on_input: move |value| form.write().old_password = value,
                    }
                    TextField {
                        label: "New password",
                        kind: "password",
                        value: current.new_password,
                        on_input: move |value| form.write().new_password = value,
                    }
                    TextField {
                        label: "Repeat new password",
                        kind: "password",
                        value: current.repeat_new_password,
                        on_input: move |value| form.write().repeat_new_password = value,
                    }
                    button { r#type: "submit", class: "btn btn-primary", disabled: saving(),
                        if saving() { "Saving..." } else { "Change password" }
                    }
                }
            }
        }
    }
}

//! The protected shell.
//!
//! Every protected route renders inside [`Guarded`]. The guard is evaluated
//! once per navigation and again whenever the session changes, so a logout
//! or a server-side expiry anywhere in the tree lands on the login view.

use dioxus::prelude::*;
use store::{GuardState, RouteGuard};
use ui::{use_console, use_session, Sidebar};

use crate::Route;

#[component]
pub fn Guarded() -> Element {
    let console = use_console();
    let session = use_session();
    let route = use_route::<Route>();
    let nav = use_navigator();
    let mut state = use_signal(|| GuardState::Checking);

    use_effect(use_reactive!(|route| {
        // Subscribe to session changes as well as route changes.
        let _ = session.read();
        tracing::trace!(?route, "guard check");
        let mut guard = RouteGuard::new(console.config.routes.login.clone());
        let next = guard.enter(console.session_store()).clone();
        if let GuardState::Redirect(path) = &next {
            nav.replace(Route::from_path(path, Route::Login {}));
        }
        state.set(next);
    }));

    let active_path = route.to_string();
    match state() {
        GuardState::Settled => rsx! {
            div { class: "shell",
                Sidebar {
                    active_path,
                    on_navigate: move |path: String| {
                        if let Ok(route) = path.parse::<Route>() {
                            nav.push(route);
                        }
                    },
                }
                main { class: "content",
                    Outlet::<Route> {}
                }
            }
        },
        GuardState::Checking | GuardState::Redirect(_) => rsx! {
            div { class: "shell-checking" }
        },
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "not-found",
            h1 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Root {}, "Back to the console" }
        }
    }
}

//! Session context for the UI.
//!
//! [`SessionProvider`] opens the [`SessionStore`] once, builds the HTTP
//! gateway over it and mirrors the store into a `Signal<Session>` through a
//! store subscription. Components read the signal; only the store (through
//! login, logout, the gateway or the route guard) ever changes it.

use api::{Gateway, HttpGateway, HttpTransport};
use dioxus::prelude::*;
use store::{ConsoleConfig, Session, SessionStore};

/// Shared, non-reactive handles: the gateway and the loaded configuration.
#[derive(Clone)]
pub struct Console {
    pub gateway: HttpGateway,
    pub config: ConsoleConfig,
}

impl Console {
    pub fn session_store(&self) -> &SessionStore {
        self.gateway.session()
    }
}

fn open_store() -> SessionStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionStore::open(store::LocalStorage::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        SessionStore::open(store::MemoryStore::new())
    }
}

/// The current session. Updates whenever the store changes.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

pub fn use_console() -> Console {
    use_context::<Console>()
}

pub fn use_gateway() -> HttpGateway {
    use_context::<Console>().gateway
}

/// Provider component for the session and gateway contexts.
/// Wrap the router with this component.
#[component]
pub fn SessionProvider(config: ConsoleConfig, children: Element) -> Element {
    let console = use_hook(|| {
        let store = open_store();
        Console {
            gateway: Gateway::new(store, HttpTransport::new(&config.api)),
            config: config.clone(),
        }
    });
    let store = console.session_store().clone();
    let session = use_signal(|| store.session());

    let subscription = use_hook(|| {
        store.subscribe(move |current| {
            // The store outlives the component; skip writes after unmount.
            let mut session = session;
            if let Ok(mut value) = session.try_write() {
                if *value != *current {
                    *value = current.clone();
                }
            };
        })
    });
    use_drop(move || store.unsubscribe(subscription));

    use_context_provider(|| console);
    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Button to sign out. The guarded layout routes to login once the session
/// signal empties.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let gateway = use_gateway();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| gateway.logout(),
            "{label}"
        }
    }
}

use dioxus::prelude::*;

use store::ConsoleConfig;
use ui::SessionProvider;
use views::{
    Categories, Customers, ExportDetail, Exports, Guarded, ImportDetail, Imports, Login, Members,
    NotFound, Products, ProfileView, Register, Statistics, Suppliers, Users, WarehouseDetail,
    Warehouses,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(Guarded)]
        #[route("/warehouses")]
        Warehouses {},
        #[route("/warehouses/:id")]
        WarehouseDetail { id: i64 },
        #[route("/warehouses/:id/imports")]
        Imports { id: i64 },
        #[route("/warehouses/:id/imports/:invoice")]
        ImportDetail { id: i64, invoice: i64 },
        #[route("/warehouses/:id/exports")]
        Exports { id: i64 },
        #[route("/warehouses/:id/exports/:invoice")]
        ExportDetail { id: i64, invoice: i64 },
        #[route("/categories")]
        Categories {},
        #[route("/products")]
        Products {},
        #[route("/suppliers")]
        Suppliers {},
        #[route("/customers")]
        Customers {},
        #[route("/statistics")]
        Statistics {},
        #[route("/users")]
        Users {},
        #[route("/members")]
        Members {},
        #[route("/profile")]
        ProfileView {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// The route for a configured path, or `fallback` when it matches none.
    fn from_path(path: &str, fallback: Route) -> Route {
        path.parse().unwrap_or(fallback)
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONSOLE_TOML: &str = include_str!("../console.toml");

fn load_config() -> ConsoleConfig {
    match ConsoleConfig::from_toml(CONSOLE_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("console.toml not usable, using defaults: {e}");
            ConsoleConfig::default()
        }
    }
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            config,
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the home view, or to login without a live session.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    let console = ui::use_console();
    let session = ui::use_session();
    let routes = &console.config.routes;
    if session.peek().is_valid() {
        nav.replace(Route::from_path(&routes.home, Route::Warehouses {}));
    } else {
        nav.replace(Route::from_path(&routes.login, Route::Login {}));
    }
    rsx! {}
}

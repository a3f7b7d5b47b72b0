//! Shared components for the warehouse console.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod session;
pub use session::{use_console, use_gateway, use_session, Console, LogoutButton, SessionProvider};

mod nav;
pub use nav::{visible_entries, NavEntry, NavIcon, Sidebar, NAV_ENTRIES};

mod message;
pub use message::{sleep, use_flash, Flash, FlashBanner, MessageBanner};

mod modal;
pub use modal::ModalOverlay;

mod list;
pub use list::{list_notice, money};

pub mod forms;
pub use forms::{
    form_banner, open_form, submit_form, use_form, use_keyed_form, FormActions, TextField,
};

mod invoice_modal;
pub use invoice_modal::{ExportInvoiceModal, ImportInvoiceModal};

mod entity_modal;
pub use entity_modal::{CategoryModal, CustomerModal, ProductModal, SupplierModal, WarehouseModal};

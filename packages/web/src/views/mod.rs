mod layout;
pub use layout::{Guarded, NotFound};

mod auth;
pub use auth::{Login, Register};

mod warehouses;
pub use warehouses::{WarehouseDetail, Warehouses};

mod invoices;
pub use invoices::{ExportDetail, Exports, ImportDetail, Imports};

mod catalog;
pub use catalog::{Categories, Customers, Products, Suppliers};

mod admin;
pub use admin::{Members, Users};

mod statistics;
pub use statistics::Statistics;

mod profile;
pub use profile::ProfileView;

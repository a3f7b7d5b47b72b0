//! Import and export invoice drafts.
//!
//! An import buys products from a supplier into the warehouse; its lines
//! reference catalog products. An export sells to a customer out of the
//! warehouse; its lines reference the warehouse's stock items.

use serde::Serialize;

use super::lines::{parse_id, Amount, Lines};
use super::{rows_or_empty, Cache, Draft, FetchReferences, LineDraft, ReferenceSet, ValidationError};
use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::{Customer, Product, StockItem, Supplier};
use crate::transport::Transport;

pub const SELECT_SUPPLIER: &str = "Please select a supplier.";
pub const INVALID_IMPORT_LINE: &str =
    "Please select product and enter valid quantity and unit price.";
pub const SELECT_CUSTOMER: &str = "Please select a customer.";
pub const INVALID_EXPORT_LINE: &str =
    "Please select item and enter valid quantity and unit price.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDraft {
    warehouse: i64,
    supplier: String,
    lines: Lines,
}

impl ImportDraft {
    pub fn new(warehouse: i64) -> Self {
        Self {
            warehouse,
            supplier: String::new(),
            lines: Lines::default(),
        }
    }

    pub fn warehouse(&self) -> i64 {
        self.warehouse
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn set_supplier(&mut self, supplier: impl Into<String>) {
        self.supplier = supplier.into();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    pub supplier_id: i64,
    pub storage_id: i64,
    pub list: Vec<ImportLinePayload>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportLinePayload {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Amount,
}

impl Draft for ImportDraft {
    type Payload = ImportPayload;
    type References = ImportReferences;

    const ENDPOINT: &'static str = "/import/create";
    const FAILURE_MESSAGE: &'static str = "Failed to create import invoice.";

    fn references(&self) -> ImportReferences {
        ImportReferences::default()
    }

    fn validate(&self) -> Result<ImportPayload, ValidationError> {
        let supplier_id =
            parse_id(&self.supplier).ok_or_else(|| ValidationError::new(SELECT_SUPPLIER))?;
        let lines = self
            .lines
            .check_all()
            .ok_or_else(|| ValidationError::new(INVALID_IMPORT_LINE))?;
        Ok(ImportPayload {
            supplier_id,
            storage_id: self.warehouse,
            list: lines
                .into_iter()
                .map(|line| ImportLinePayload {
                    product_id: line.reference,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
        })
    }

    fn reset(&mut self) {
        *self = Self::new(self.warehouse);
    }
}

impl LineDraft for ImportDraft {
    fn lines(&self) -> &Lines {
        &self.lines
    }

    fn lines_mut(&mut self) -> &mut Lines {
        &mut self.lines
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportReferences {
    pub suppliers: Cache<Supplier>,
    pub products: Cache<Product>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportFetch {
    Suppliers,
    Products,
}

pub enum ImportLoaded {
    Suppliers(Vec<Supplier>),
    Products(Vec<Product>),
}

impl ReferenceSet for ImportReferences {
    type Fetch = ImportFetch;
    type Loaded = ImportLoaded;

    fn missing(&self) -> Vec<ImportFetch> {
        let mut fetches = Vec::new();
        if !self.suppliers.is_loaded() {
            fetches.push(ImportFetch::Suppliers);
        }
        if !self.products.is_loaded() {
            fetches.push(ImportFetch::Products);
        }
        fetches
    }

    fn apply(&mut self, loaded: ImportLoaded) {
        match loaded {
            ImportLoaded::Suppliers(rows) => self.suppliers.fill(rows),
            ImportLoaded::Products(rows) => self.products.fill(rows),
        }
    }
}

impl FetchReferences for ImportFetch {
    type Loaded = ImportLoaded;

    async fn fetch<T: Transport>(&self, gateway: &Gateway<T>) -> Result<ImportLoaded, ApiError> {
        Ok(match self {
            ImportFetch::Suppliers => ImportLoaded::Suppliers(rows_or_empty(gateway.suppliers().await)?),
            ImportFetch::Products => ImportLoaded::Products(rows_or_empty(gateway.products().await)?),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportDraft {
    warehouse: i64,
    customer: String,
    use_points: bool,
    lines: Lines,
}

impl ExportDraft {
    pub fn new(warehouse: i64) -> Self {
        Self {
            warehouse,
            customer: String::new(),
            use_points: false,
            lines: Lines::default(),
        }
    }

    pub fn warehouse(&self) -> i64 {
        self.warehouse
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn set_customer(&mut self, customer: impl Into<String>) {
        self.customer = customer.into();
    }

    pub fn use_points(&self) -> bool {
        self.use_points
    }

    pub fn set_use_points(&mut self, use_points: bool) {
        self.use_points = use_points;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub storage_id: i64,
    pub cust_id: i64,
    pub use_point: bool,
    pub items: Vec<ExportLinePayload>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLinePayload {
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price: Amount,
}

impl Draft for ExportDraft {
    type Payload = ExportPayload;
    type References = ExportReferences;

    const ENDPOINT: &'static str = "/export/export";
    const FAILURE_MESSAGE: &'static str = "Failed to create export invoice.";

    fn references(&self) -> ExportReferences {
        ExportReferences {
            warehouse: self.warehouse,
            customers: Cache::default(),
            stock: Cache::default(),
        }
    }

    fn validate(&self) -> Result<ExportPayload, ValidationError> {
        let cust_id =
            parse_id(&self.customer).ok_or_else(|| ValidationError::new(SELECT_CUSTOMER))?;
        let lines = self
            .lines
            .check_all()
            .ok_or_else(|| ValidationError::new(INVALID_EXPORT_LINE))?;
        Ok(ExportPayload {
            storage_id: self.warehouse,
            cust_id,
            use_point: self.use_points,
            items: lines
                .into_iter()
                .map(|line| ExportLinePayload {
                    item_id: line.reference,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
        })
    }

    fn reset(&mut self) {
        *self = Self::new(self.warehouse);
    }
}

impl LineDraft for ExportDraft {
    fn lines(&self) -> &Lines {
        &self.lines
    }

    fn lines_mut(&mut self) -> &mut Lines {
        &mut self.lines
    }
}

/// Customers plus the stock of the draft's warehouse.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportReferences {
    pub warehouse: i64,
    pub customers: Cache<Customer>,
    pub stock: Cache<StockItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFetch {
    Customers,
    Stock(i64),
}

pub enum ExportLoaded {
    Customers(Vec<Customer>),
    /// Stock rows and the warehouse they were fetched for.
    Stock(i64, Vec<StockItem>),
}

impl ReferenceSet for ExportReferences {
    type Fetch = ExportFetch;
    type Loaded = ExportLoaded;

    fn missing(&self) -> Vec<ExportFetch> {
        let mut fetches = Vec::new();
        if !self.customers.is_loaded() {
            fetches.push(ExportFetch::Customers);
        }
        if !self.stock.is_loaded() {
            fetches.push(ExportFetch::Stock(self.warehouse));
        }
        fetches
    }

    fn apply(&mut self, loaded: ExportLoaded) {
        match loaded {
            ExportLoaded::Customers(rows) => self.customers.fill(rows),
            ExportLoaded::Stock(warehouse, rows) if warehouse == self.warehouse => {
                self.stock.fill(rows)
            }
            ExportLoaded::Stock(warehouse, _) => {
                tracing::debug!(warehouse, "dropping stock fetched for another warehouse")
            }
        }
    }
}

impl FetchReferences for ExportFetch {
    type Loaded = ExportLoaded;

    async fn fetch<T: Transport>(&self, gateway: &Gateway<T>) -> Result<ExportLoaded, ApiError> {
        Ok(match *self {
            ExportFetch::Customers => ExportLoaded::Customers(rows_or_empty(gateway.customers().await)?),
            ExportFetch::Stock(warehouse) => {
                ExportLoaded::Stock(warehouse, rows_or_empty(gateway.stock(warehouse).await)?)
            }
        })
    }
}

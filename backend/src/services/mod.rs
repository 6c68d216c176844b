//! Business logic services for the Inventory Ledger platform

pub mod auth;
pub mod category;
pub mod customer;
pub mod dashboard;
pub mod import_export;
pub mod product;
pub mod purchase;
pub mod sales;
pub mod settings;
pub mod stock;
pub mod supplier;

pub use auth::AuthService;
pub use category::CategoryService;
pub use customer::CustomerService;
pub use dashboard::DashboardService;
pub use import_export::ImportExportService;
pub use product::ProductService;
pub use purchase::PurchaseService;
pub use sales::SalesService;
pub use settings::SettingsService;
pub use stock::{StockAdjustment, StockChanges};
pub use supplier::SupplierService;

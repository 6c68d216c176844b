//! HTTP request handlers

pub mod auth;
pub mod category;
pub mod customer;
pub mod dashboard;
pub mod health;
pub mod import_export;
pub mod product;
pub mod purchase;
pub mod sales;
pub mod settings;
pub mod supplier;

pub use auth::*;
pub use category::*;
pub use customer::*;
pub use dashboard::*;
pub use health::*;
pub use import_export::*;
pub use product::*;
pub use purchase::*;
pub use sales::*;
pub use settings::*;
pub use supplier::*;

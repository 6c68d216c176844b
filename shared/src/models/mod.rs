//! Domain models for the Inventory Ledger platform

mod category;
mod order;
mod party;
mod product;
mod settings;
mod user;

pub use category::*;
pub use order::*;
pub use party::*;
pub use product::*;
pub use settings::*;
pub use user::*;

//! Product categories

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product category. Products reference it by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// Categories seeded the first time the category collection is read
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Electronics",
    "Groceries",
    "Clothing",
    "Home & Kitchen",
    "Office Supplies",
    "Health & Beauty",
];

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Category names are unique ignoring case
    pub fn same_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES.iter().map(|name| Category::new(*name)).collect()
}

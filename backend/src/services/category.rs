//! Category registry

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use shared::{default_categories, Category, Product};

use crate::error::{AppError, AppResult};
use crate::store::{Collection, Repository, Storage, WriteGuard};

/// Category service
#[derive(Clone)]
pub struct CategoryService {
    db: Storage,
    categories: Repository<Category>,
    products: Repository<Product>,
}

/// Input for creating or renaming a category
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,
}

impl CategoryService {
    pub fn new(db: Storage) -> Self {
        Self {
            categories: db.repository(Collection::Categories),
            products: db.repository(Collection::Products),
            db,
        }
    }

    /// List categories, seeding the default set on first use
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        if let Some(categories) = self.categories.load().await? {
            return Ok(categories);
        }

        let guard = self.db.lock().await;
        self.load_or_seed(&guard).await
    }

    async fn load_or_seed(&self, _guard: &WriteGuard<'_>) -> AppResult<Vec<Category>> {
        if let Some(categories) = self.categories.load().await? {
            return Ok(categories);
        }

        let defaults = default_categories();
        self.categories.save_all(&defaults).await?;
        info!(count = defaults.len(), "default categories seeded");
        Ok(defaults)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Category> {
        self.list()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Category"))
    }

    pub async fn create(&self, input: CategoryInput) -> AppResult<Category> {
        input.validate()?;
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("name", "Category name is required"));
        }

        let guard = self.db.lock().await;
        let mut categories = self.load_or_seed(&guard).await?;
        if categories.iter().any(|c| c.same_name(&name)) {
            return Err(AppError::DuplicateEntry(format!("Category \"{}\"", name)));
        }

        let category = Category::new(name);
        categories.push(category.clone());
        self.categories.save_all(&categories).await?;
        Ok(category)
    }

    /// Rename a category. Products keep the old name; they are not cascaded.
    pub async fn update(&self, id: Uuid, input: CategoryInput) -> AppResult<Category> {
        input.validate()?;
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("name", "Category name is required"));
        }

        let guard = self.db.lock().await;
        let mut categories = self.load_or_seed(&guard).await?;
        if categories.iter().any(|c| c.id != id && c.same_name(&name)) {
            return Err(AppError::DuplicateEntry(format!("Category \"{}\"", name)));
        }

        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Category"))?;
        category.name = name;

        let updated = category.clone();
        self.categories.save_all(&categories).await?;
        Ok(updated)
    }

    /// Delete a category no product uses
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let guard = self.db.lock().await;
        let mut categories = self.load_or_seed(&guard).await?;
        let category = categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Category"))?;

        let in_use = self
            .products
            .load_all()
            .await?
            .iter()
            .any(|p| p.category == category.name);
        if in_use {
            return Err(AppError::CategoryInUse(category.name));
        }

        categories.retain(|c| c.id != id);
        self.categories.save_all(&categories).await?;
        info!(category = %category.name, "category deleted");
        Ok(())
    }
}

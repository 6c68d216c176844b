//! Supplier registry

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use shared::Supplier;

use crate::error::{AppError, AppResult};
use crate::store::{Collection, Repository, Storage};

/// Supplier service
#[derive(Clone)]
pub struct SupplierService {
    db: Storage,
    suppliers: Repository<Supplier>,
}

/// Input for creating a supplier
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, max = 200, message = "Supplier name is required"))]
    pub name: String,
    pub contact_person: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

/// Partial supplier update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierInput {
    #[validate(length(min = 1, max = 200, message = "Supplier name cannot be empty"))]
    pub name: Option<String>,
    pub contact_person: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl SupplierService {
    pub fn new(db: Storage) -> Self {
        let suppliers = db.repository(Collection::Suppliers);
        Self { db, suppliers }
    }

    pub async fn list(&self) -> AppResult<Vec<Supplier>> {
        Ok(self.suppliers.load_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Supplier> {
        self.suppliers
            .find(|s| s.id == id)
            .await?
            .ok_or_else(|| AppError::not_found("Supplier"))
    }

    pub async fn create(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        input.validate()?;

        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: input.name,
            contact_person: input.contact_person,
            email: input.email,
            phone: input.phone,
            address: input.address,
            city: input.city,
            state: input.state,
        };

        let _guard = self.db.lock().await;
        let mut suppliers = self.suppliers.load_all().await?;
        suppliers.push(supplier.clone());
        self.suppliers.save_all(&suppliers).await?;

        info!(supplier_id = %supplier.id, "supplier created");
        Ok(supplier)
    }

    pub async fn update(&self, id: Uuid, input: UpdateSupplierInput) -> AppResult<Supplier> {
        input.validate()?;

        let _guard = self.db.lock().await;
        let mut suppliers = self.suppliers.load_all().await?;
        let supplier = suppliers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found("Supplier"))?;

        if let Some(name) = input.name {
            supplier.name = name;
        }
        if input.contact_person.is_some() {
            supplier.contact_person = input.contact_person;
        }
        if input.email.is_some() {
            supplier.email = input.email;
        }
        if input.phone.is_some() {
            supplier.phone = input.phone;
        }
        if let Some(address) = input.address {
            supplier.address = address;
        }
        if let Some(city) = input.city {
            supplier.city = city;
        }
        if let Some(state) = input.state {
            supplier.state = state;
        }

        let updated = supplier.clone();
        self.suppliers.save_all(&suppliers).await?;
        Ok(updated)
    }

    /// Delete a supplier. Purchase orders keep their supplier name snapshot.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let _guard = self.db.lock().await;
        let mut suppliers = self.suppliers.load_all().await?;

        let before = suppliers.len();
        suppliers.retain(|s| s.id != id);
        if suppliers.len() == before {
            return Err(AppError::not_found("Supplier"));
        }

        self.suppliers.save_all(&suppliers).await?;
        Ok(())
    }
}

//! Customer registry

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::Customer;

use crate::error::{AppError, AppResult};
use crate::store::{Collection, Repository, Storage};

/// Customer service
#[derive(Clone)]
pub struct CustomerService {
    db: Storage,
    customers: Repository<Customer>,
}

/// Input for creating a customer
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerInput {
    #[validate(length(min = 1, max = 200, message = "Customer name is required"))]
    pub name: String,
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

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerInput {
    #[validate(length(min = 1, max = 200, message = "Customer name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl CustomerService {
    pub fn new(db: Storage) -> Self {
        let customers = db.repository(Collection::Customers);
        Self { db, customers }
    }

    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        Ok(self.customers.load_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Customer> {
        self.customers
            .find(|c| c.id == id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer"))
    }

    pub async fn create(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        input.validate()?;

        let customer = Customer {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            city: input.city,
            state: input.state,
        };

        let _guard = self.db.lock().await;
        let mut customers = self.customers.load_all().await?;
        customers.push(customer.clone());
        self.customers.save_all(&customers).await?;
        Ok(customer)
    }

    pub async fn update(&self, id: Uuid, input: UpdateCustomerInput) -> AppResult<Customer> {
        input.validate()?;

        let _guard = self.db.lock().await;
        let mut customers = self.customers.load_all().await?;
        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Customer"))?;

        if let Some(name) = input.name {
            customer.name = name;
        }
        if input.email.is_some() {
            customer.email = input.email;
        }
        if input.phone.is_some() {
            customer.phone = input.phone;
        }
        if let Some(address) = input.address {
            customer.address = address;
        }
        if let Some(city) = input.city {
            customer.city = city;
        }
        if let Some(state) = input.state {
            customer.state = state;
        }

        let updated = customer.clone();
        self.customers.save_all(&customers).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let _guard = self.db.lock().await;
        let mut customers = self.customers.load_all().await?;

        let before = customers.len();
        customers.retain(|c| c.id != id);
        if customers.len() == before {
            return Err(AppError::not_found("Customer"));
        }

        self.customers.save_all(&customers).await?;
        Ok(())
    }
}

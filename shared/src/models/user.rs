//! User accounts

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

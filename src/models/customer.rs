use crate::core::{CinemaError, Result};
use crate::storage::record::field;
use crate::storage::{Record, Row, Table};

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// bcrypt hash, never the plain password.
    pub password_hash: String,
}

impl Customer {
    /// Hashes a password with bcrypt at the given cost.
    pub fn hash_password(password: &str, cost: u32) -> Result<String> {
        bcrypt::hash(password, cost)
            .map_err(|e| CinemaError::InvalidInput(format!("cannot hash password: {}", e)))
    }

    /// Checks a password against the stored hash. An unreadable hash never matches.
    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

impl Record for Customer {
    const TABLE: Table = Table::Customers;
    const KIND: &'static str = "customer";

    fn from_fields(fields: &[String]) -> Result<Self> {
        let get = |i| field(fields, Self::TABLE, i);
        Ok(Self {
            id: get(0)?.to_string(),
            name: get(1)?.to_string(),
            phone: get(2)?.to_string(),
            email: get(3)?.to_string(),
            password_hash: get(4)?.to_string(),
        })
    }

    fn to_fields(&self) -> Row {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.password_hash.clone(),
        ]
    }

    fn id(&self) -> &str {
        &self.id
    }
}

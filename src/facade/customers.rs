use super::Cinema;
use crate::core::{CinemaError, Result};
use crate::models::Customer;
use crate::storage::{IdKind, RecordStore, RecordStoreExt, next_id};
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;

lazy_static! {
    static ref PHONE_PATTERN: Regex = Regex::new(r"^60\d+$").expect("valid phone pattern");
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^\S+@\S+$").expect("valid email pattern");
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Requested changes to a customer's details. Blank or absent values keep
/// the current one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// New password and its confirmation
    pub password: Option<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub customer: Customer,
    /// Fields whose new value was invalid and therefore left unchanged
    pub ignored: Vec<&'static str>,
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone.trim())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

fn check_password(password: &str, confirmation: &str) -> Result<()> {
    if password.is_empty() {
        return Err(CinemaError::InvalidInput("password cannot be empty".into()));
    }
    if password != confirmation {
        return Err(CinemaError::InvalidInput("passwords do not match".into()));
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl<S: RecordStore> Cinema<S> {
    pub fn customer(&self, id: &str) -> Result<Customer> {
        self.store.get(id)
    }

    pub fn register_customer(&mut self, new: NewCustomer) -> Result<Customer> {
        if new.name.trim().is_empty() {
            return Err(CinemaError::InvalidInput("name cannot be empty".into()));
        }
        if !is_valid_phone(&new.phone) {
            return Err(CinemaError::InvalidInput(
                "phone number must be digits starting with 60".into(),
            ));
        }
        if !is_valid_email(&new.email) {
            return Err(CinemaError::InvalidInput("email must contain '@'".into()));
        }
        check_password(&new.password, &new.confirm_password)?;

        let customer = Customer {
            id: next_id(&mut self.store, IdKind::Customer)?,
            name: new.name.trim().to_string(),
            phone: new.phone.trim().to_string(),
            email: new.email.trim().to_string(),
            password_hash: Customer::hash_password(&new.password, self.config.password_cost)?,
        };
        self.store.insert(&customer)?;
        info!("Customer {} registered", customer.id);
        Ok(customer)
    }

    /// Checks credentials. Unknown ids and wrong passwords fail the same way.
    pub fn login(&self, customer_id: &str, password: &str) -> Result<Customer> {
        let invalid = || CinemaError::InvalidInput("invalid customer ID or password".into());
        let customer: Customer = self.store.find(customer_id.trim())?.ok_or_else(invalid)?;
        if !customer.verify_password(password) {
            warn!("Failed login for {}", customer.id);
            return Err(invalid());
        }
        info!("Customer {} logged in", customer.id);
        Ok(customer)
    }

    pub fn update_customer(&mut self, customer_id: &str, update: CustomerUpdate) -> Result<UpdateOutcome> {
        let mut customer: Customer = self.store.get(customer_id)?;
        let mut ignored = Vec::new();

        if let Some(name) = non_blank(&update.name) {
            customer.name = name.to_string();
        }
        if let Some(phone) = non_blank(&update.phone) {
            if is_valid_phone(phone) {
                customer.phone = phone.to_string();
            } else {
                ignored.push("phone");
            }
        }
        if let Some(email) = non_blank(&update.email) {
            if is_valid_email(email) {
                customer.email = email.to_string();
            } else {
                ignored.push("email");
            }
        }
        if let Some((password, confirmation)) = &update.password {
            check_password(password, confirmation)?;
            customer.password_hash = Customer::hash_password(password, self.config.password_cost)?;
        }

        self.store.replace(&customer)?;
        info!("Customer {} updated", customer.id);
        Ok(UpdateOutcome { customer, ignored })
    }
}
